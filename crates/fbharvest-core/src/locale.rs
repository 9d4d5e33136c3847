//! Localized long-form timestamps.
//!
//! Post time indicators carry a human-readable title such as
//! `5 Nisan 2021 Pazartesi 14:03`. `chrono` only parses English month and
//! weekday names, so the locale maps whole localized tokens to their English
//! counterparts before delegating to [`NaiveDateTime::parse_from_str`].

use chrono::NaiveDateTime;

use crate::CoreError;

const ENGLISH_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const ENGLISH_WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const TURKISH_MONTHS: [&str; 12] = [
    "Ocak", "Şubat", "Mart", "Nisan", "Mayıs", "Haziran", "Temmuz", "Ağustos", "Eylül", "Ekim",
    "Kasım", "Aralık",
];

const TURKISH_WEEKDAYS: [&str; 7] = [
    "Pazartesi",
    "Salı",
    "Çarşamba",
    "Perşembe",
    "Cuma",
    "Cumartesi",
    "Pazar",
];

/// Default long-form pattern, in `chrono` syntax.
pub const DEFAULT_PATTERN: &str = "%d %B %Y %A %H:%M";

/// Date pattern plus localized month and weekday names.
///
/// Month names are January-first, weekday names Monday-first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateLocale {
    pattern: String,
    month_names: [String; 12],
    weekday_names: [String; 7],
}

impl DateLocale {
    #[must_use]
    pub fn new(pattern: &str, month_names: [&str; 12], weekday_names: [&str; 7]) -> Self {
        Self {
            pattern: pattern.to_owned(),
            month_names: month_names.map(str::to_owned),
            weekday_names: weekday_names.map(str::to_owned),
        }
    }

    #[must_use]
    pub fn turkish() -> Self {
        Self::new(DEFAULT_PATTERN, TURKISH_MONTHS, TURKISH_WEEKDAYS)
    }

    #[must_use]
    pub fn english() -> Self {
        Self::new(DEFAULT_PATTERN, ENGLISH_MONTHS, ENGLISH_WEEKDAYS)
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Parses a localized timestamp.
    ///
    /// Tokens are compared case-insensitively; a trailing comma on a token is
    /// dropped before matching.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTimestamp`] when the translated text does
    /// not match the pattern.
    pub fn parse(&self, raw: &str) -> Result<NaiveDateTime, CoreError> {
        let translated = raw
            .split_whitespace()
            .map(|token| self.to_english(token.trim_end_matches(',')))
            .collect::<Vec<_>>()
            .join(" ");

        NaiveDateTime::parse_from_str(&translated, &self.pattern).map_err(|e| {
            CoreError::InvalidTimestamp {
                raw: raw.to_owned(),
                reason: e.to_string(),
            }
        })
    }

    /// Formats a timestamp in this locale's long form.
    #[must_use]
    pub fn format(&self, time: &NaiveDateTime) -> String {
        time.format(&self.pattern)
            .to_string()
            .split(' ')
            .map(|token| self.from_english(token))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn to_english<'a>(&self, token: &'a str) -> &'a str {
        let lower = token.to_lowercase();
        if let Some(i) = self
            .month_names
            .iter()
            .position(|m| m.to_lowercase() == lower)
        {
            return ENGLISH_MONTHS[i];
        }
        if let Some(i) = self
            .weekday_names
            .iter()
            .position(|d| d.to_lowercase() == lower)
        {
            return ENGLISH_WEEKDAYS[i];
        }
        token
    }

    fn from_english<'a>(&'a self, token: &'a str) -> &'a str {
        if let Some(i) = ENGLISH_MONTHS.iter().position(|m| *m == token) {
            return &self.month_names[i];
        }
        if let Some(i) = ENGLISH_WEEKDAYS.iter().position(|d| *d == token) {
            return &self.weekday_names[i];
        }
        token
    }
}

impl Default for DateLocale {
    fn default() -> Self {
        Self::turkish()
    }
}
