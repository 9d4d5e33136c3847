//! Deterministic artifact names.
//!
//! Every file a run writes is named from `{identity_hash, target_month,
//! sequence}` only, so two runs over the same account and month produce
//! directly comparable trees.

use crate::month::TargetMonth;
use crate::CoreError;

pub const APP_NAME: &str = "fbharvest";

/// URL to identity-hash mapping, truncated at the start of each run.
pub const URL_HASH_CSV: &str = "url-hash.csv";

/// Directory for triples read from live markup.
pub const DOM_DIR: &str = "DOM";

/// Directory for reaction-area captures and the triples recognized from them.
pub const OCR_DIR: &str = "OCR";

pub const SUMMARY_CSV: &str = "fbharvest-sum.csv";

#[must_use]
pub fn account_screenshot(identity_hash: &str) -> String {
    format!("{APP_NAME}_{identity_hash}.png")
}

#[must_use]
pub fn all_posts_screenshot(month: &TargetMonth, identity_hash: &str) -> String {
    format!("{APP_NAME}_{}_{identity_hash}.png", month.as_yyyymm())
}

/// Per-account triples file; the same name is used under `DOM/` and `OCR/`.
#[must_use]
pub fn triples_csv(identity_hash: &str) -> String {
    format!("{APP_NAME}_{identity_hash}.csv")
}

/// Reaction-area capture for the `sequence`-th matched post (1-based).
#[must_use]
pub fn reaction_capture(month: &TargetMonth, identity_hash: &str, sequence: u32) -> String {
    format!(
        "{APP_NAME}_{}_{identity_hash}_{sequence:04}.png",
        month.as_yyyymm()
    )
}

/// Parsed form of a [`reaction_capture`] file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureName {
    pub month: String,
    pub identity_hash: String,
    pub sequence: u32,
}

/// Splits a reaction capture file name back into its parts.
///
/// # Errors
///
/// Returns [`CoreError::InvalidArtifactName`] for anything that is not
/// `fbharvest_<YYYYMM>_<hash>_<seq>.png`.
pub fn parse_reaction_capture(file_name: &str) -> Result<CaptureName, CoreError> {
    let invalid = || CoreError::InvalidArtifactName(file_name.to_owned());

    let stem = file_name.strip_suffix(".png").ok_or_else(invalid)?;
    let rest = stem
        .strip_prefix(APP_NAME)
        .and_then(|s| s.strip_prefix('_'))
        .ok_or_else(invalid)?;

    let parts: Vec<&str> = rest.split('_').collect();
    let [month, hash, seq] = parts.as_slice() else {
        return Err(invalid());
    };
    if month.len() != 6 || !month.bytes().all(|b| b.is_ascii_digit()) || hash.is_empty() {
        return Err(invalid());
    }
    let sequence = seq.parse::<u32>().map_err(|_| invalid())?;

    Ok(CaptureName {
        month: (*month).to_owned(),
        identity_hash: (*hash).to_owned(),
        sequence,
    })
}

/// Identity hash encoded in a [`triples_csv`] file name, if it is one.
#[must_use]
pub fn identity_from_triples_csv(file_name: &str) -> Option<&str> {
    let hash = file_name
        .strip_suffix(".csv")?
        .strip_prefix(APP_NAME)?
        .strip_prefix('_')?;
    if hash.is_empty() || hash.contains('_') {
        return None;
    }
    Some(hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn april() -> TargetMonth {
        TargetMonth::parse_with_current_year("202104", 2026).unwrap()
    }

    #[test]
    fn names_follow_fixed_layout() {
        assert_eq!(account_screenshot("abc"), "fbharvest_abc.png");
        assert_eq!(all_posts_screenshot(&april(), "abc"), "fbharvest_202104_abc.png");
        assert_eq!(triples_csv("abc"), "fbharvest_abc.csv");
        assert_eq!(
            reaction_capture(&april(), "abc", 7),
            "fbharvest_202104_abc_0007.png"
        );
    }

    #[test]
    fn capture_name_parses_back() {
        let name = reaction_capture(&april(), "deadbeef", 12);
        let parsed = parse_reaction_capture(&name).unwrap();
        assert_eq!(
            parsed,
            CaptureName {
                month: "202104".to_owned(),
                identity_hash: "deadbeef".to_owned(),
                sequence: 12,
            }
        );
    }

    #[test]
    fn capture_name_rejects_foreign_files() {
        for name in [
            "fbharvest_deadbeef.png",
            "fbharvest_202104_deadbeef.png",
            "other_202104_deadbeef_0001.png",
            "fbharvest_202104_deadbeef_0001.txt",
            "fbharvest_2021_deadbeef_0001.png",
            "fbharvest_202104_deadbeef_abcd.png",
        ] {
            assert!(parse_reaction_capture(name).is_err(), "accepted {name}");
        }
    }

    #[test]
    fn triples_csv_identity_round_trip() {
        assert_eq!(identity_from_triples_csv(&triples_csv("abc")), Some("abc"));
        assert_eq!(identity_from_triples_csv(SUMMARY_CSV), None);
        assert_eq!(identity_from_triples_csv("notes.csv"), None);
    }
}
