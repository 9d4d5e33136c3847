//! Reaction counts from recognized reaction-bar text.
//!
//! The bar reads, left to right, `<likes> <n> Yorum <n> Paylaşım` followed by
//! the action buttons `Beğen Yorum yap Paylaş`. Comment and share counts are
//! omitted when zero. Parsing cuts the text at the buttons and then peels
//! fields off the end: shares, then comments, then likes from the start.
//! Each unit noun must be the true end of what is left; an earlier
//! occurrence means two candidate values and the text is rejected.

use fbharvest_core::ReactionTriple;
use regex::Regex;

use crate::error::ParseError;

/// Localized labels that frame the counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrLocale {
    /// Action button labels, always present below the counts.
    pub buttons: String,
    pub shares_unit: String,
    pub comments_unit: String,
}

impl OcrLocale {
    #[must_use]
    pub fn turkish() -> Self {
        Self {
            buttons: "Beğen Yorum yap Paylaş".to_owned(),
            shares_unit: "Paylaşım".to_owned(),
            comments_unit: "Yorum".to_owned(),
        }
    }
}

impl Default for OcrLocale {
    fn default() -> Self {
        Self::turkish()
    }
}

#[derive(Debug, Clone)]
pub struct ReactionParser {
    locale: OcrLocale,
    shares: Regex,
    comments: Regex,
    likes: Regex,
}

impl ReactionParser {
    /// # Errors
    ///
    /// Returns the regex error if a unit pattern cannot be compiled.
    pub fn new(locale: OcrLocale) -> Result<Self, regex::Error> {
        let unit_pattern =
            |noun: &str| Regex::new(&format!(r"([0-9]+)\s*({})", regex::escape(noun)));
        Ok(Self {
            shares: unit_pattern(&locale.shares_unit)?,
            comments: unit_pattern(&locale.comments_unit)?,
            likes: Regex::new(r"^\s*([0-9]+)")?,
            locale,
        })
    }

    /// Parses one recognized text block.
    ///
    /// # Errors
    ///
    /// Returns the [`ParseError`] describing the first field that does not
    /// fit the expected shape.
    pub fn parse(&self, text: &str) -> Result<ReactionTriple, ParseError> {
        let cut = text
            .find(&self.locale.buttons)
            .ok_or(ParseError::MissingButtons)?;
        let counts = text[..cut].trim();

        let (shares, counts) = take_trailing_count(
            counts,
            &self.shares,
            &self.locale.shares_unit,
            &TrailingErrors {
                unreadable: ParseError::UnreadableShares,
                ambiguous: ParseError::AmbiguousShares,
            },
        )?;
        let (comments, counts) = take_trailing_count(
            counts,
            &self.comments,
            &self.locale.comments_unit,
            &TrailingErrors {
                unreadable: ParseError::UnreadableComments,
                ambiguous: ParseError::AmbiguousComments,
            },
        )?;
        let likes = self.leading_likes(counts)?;

        Ok(ReactionTriple::new(likes, comments, shares))
    }

    fn leading_likes(&self, counts: &str) -> Result<u64, ParseError> {
        self.likes
            .captures(counts)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .ok_or(ParseError::UnexpectedLikes)
    }
}

struct TrailingErrors {
    unreadable: ParseError,
    ambiguous: ParseError,
}

/// Strips `<n> <unit>` from the end of `text`. Text not ending in `unit`
/// has no such field: zero, nothing consumed.
fn take_trailing_count<'t>(
    text: &'t str,
    pattern: &Regex,
    unit: &str,
    errors: &TrailingErrors,
) -> Result<(u64, &'t str), ParseError> {
    if !text.ends_with(unit) {
        return Ok((0, text));
    }

    let caps = pattern
        .captures(text)
        .ok_or_else(|| errors.unreadable.clone())?;
    let (Some(whole), Some(count), Some(noun)) = (caps.get(0), caps.get(1), caps.get(2)) else {
        return Err(errors.unreadable.clone());
    };
    if noun.start() != text.len() - unit.len() {
        return Err(errors.ambiguous.clone());
    }
    let value = count
        .as_str()
        .parse::<u64>()
        .map_err(|_| errors.unreadable.clone())?;

    Ok((value, text[..whole.start()].trim()))
}

#[cfg(test)]
#[path = "parser_test.rs"]
mod tests;
