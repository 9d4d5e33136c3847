//! Additive roll-up of reaction triples into per-account summaries.
//!
//! Both functions are pure: no state survives between calls, and the result
//! does not depend on the order triples arrive in.

use std::collections::BTreeMap;

use crate::post::{ReactionTriple, SummaryRecord};

/// Sums every triple captured for one account.
#[must_use]
pub fn aggregate(identity_hash: &str, triples: &[ReactionTriple]) -> SummaryRecord {
    let mut summary = SummaryRecord {
        identity_hash: identity_hash.to_owned(),
        total_likes: 0,
        total_comments: 0,
        total_shares: 0,
    };
    for t in triples {
        summary.total_likes = summary.total_likes.saturating_add(t.likes);
        summary.total_comments = summary.total_comments.saturating_add(t.comments);
        summary.total_shares = summary.total_shares.saturating_add(t.shares);
    }
    summary
}

/// Groups `(identity_hash, triple)` rows by account and aggregates each group.
///
/// Output is ordered by identity hash so repeated runs over the same rows
/// produce byte-identical summary files.
pub fn aggregate_by_identity<I>(rows: I) -> Vec<SummaryRecord>
where
    I: IntoIterator<Item = (String, ReactionTriple)>,
{
    let mut grouped: BTreeMap<String, Vec<ReactionTriple>> = BTreeMap::new();
    for (hash, triple) in rows {
        grouped.entry(hash).or_default().push(triple);
    }
    grouped
        .iter()
        .map(|(hash, triples)| aggregate(hash, triples))
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::seq::SliceRandom;

    use super::*;

    fn sample() -> Vec<ReactionTriple> {
        vec![
            ReactionTriple::new(12, 3, 0),
            ReactionTriple::new(150, 41, 7),
            ReactionTriple::new(0, 0, 0),
            ReactionTriple::new(9, 1, 2),
            ReactionTriple::new(1_024, 77, 30),
        ]
    }

    #[test]
    fn sums_each_field() {
        let summary = aggregate("abc", &sample());
        assert_eq!(summary.identity_hash, "abc");
        assert_eq!(summary.total_likes, 1_195);
        assert_eq!(summary.total_comments, 122);
        assert_eq!(summary.total_shares, 39);
    }

    #[test]
    fn empty_input_is_all_zero() {
        let summary = aggregate("abc", &[]);
        assert_eq!(
            (summary.total_likes, summary.total_comments, summary.total_shares),
            (0, 0, 0)
        );
    }

    #[test]
    fn shuffled_input_gives_same_summary() {
        let expected = aggregate("abc", &sample());
        let mut rng = rand::rng();
        for _ in 0..50 {
            let mut shuffled = sample();
            shuffled.shuffle(&mut rng);
            assert_eq!(aggregate("abc", &shuffled), expected);
        }
    }

    #[test]
    fn splitting_and_recombining_is_associative() {
        let triples = sample();
        let (left, right) = triples.split_at(2);
        let l = aggregate("abc", left);
        let r = aggregate("abc", right);
        let whole = aggregate("abc", &triples);
        assert_eq!(l.total_likes + r.total_likes, whole.total_likes);
        assert_eq!(l.total_comments + r.total_comments, whole.total_comments);
        assert_eq!(l.total_shares + r.total_shares, whole.total_shares);
    }

    #[test]
    fn reaggregation_is_deterministic() {
        assert_eq!(aggregate("abc", &sample()), aggregate("abc", &sample()));
    }

    #[test]
    fn groups_rows_by_identity_in_hash_order() {
        let rows = vec![
            ("bbb".to_owned(), ReactionTriple::new(1, 1, 1)),
            ("aaa".to_owned(), ReactionTriple::new(5, 0, 0)),
            ("bbb".to_owned(), ReactionTriple::new(2, 0, 3)),
        ];
        let summaries = aggregate_by_identity(rows);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].identity_hash, "aaa");
        assert_eq!(summaries[0].total_likes, 5);
        assert_eq!(summaries[1].identity_hash, "bbb");
        assert_eq!(
            (
                summaries[1].total_likes,
                summaries[1].total_comments,
                summaries[1].total_shares
            ),
            (3, 1, 4)
        );
    }
}
