//! Correctness rules, one per question kind. All of these are pure
//! comparisons against the authored answer; the session decides when to
//! call them.

use std::collections::HashSet;

use crate::quiz::MatchingPair;

/// Multiple-choice and image-choice: exact, case-sensitive string
/// equality with no trimming. A candidate that is not even among the
/// options is simply wrong.
pub fn choice_is_correct(correct_answer: &str, candidate: &str) -> bool {
    candidate == correct_answer
}

pub fn true_false_is_correct(correct_answer: bool, candidate: bool) -> bool {
    candidate == correct_answer
}

/// An ordering answer is only judged once the whole sequence has been
/// picked. Shorter candidates are still in progress.
pub fn order_is_complete(correct_order: &[String], candidate: &[String]) -> bool {
    candidate.len() == correct_order.len()
}

/// Element-wise positional equality. A rotation or reversal of the
/// correct order is wrong.
pub fn order_is_correct(correct_order: &[String], candidate: &[String]) -> bool {
    order_is_complete(correct_order, candidate) && candidate == correct_order
}

/// A matching question is decided (always as correct) once every
/// authored pair id is in the matched set. Ids that never belonged to
/// the question do not count.
pub fn all_pairs_matched(matching_pairs: &[MatchingPair], matched: &HashSet<String>) -> bool {
    matching_pairs.iter().all(|pair| matched.contains(&pair.id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn choice_requires_an_exact_match() {
        assert!(choice_is_correct("إيمان", "إيمان"));
        assert!(!choice_is_correct("hand", "Hand"));
        assert!(!choice_is_correct("hand", "hand "));
        assert!(!choice_is_correct("hand", "run"));
    }

    #[test]
    fn true_false_compares_booleans() {
        assert!(true_false_is_correct(false, false));
        assert!(!true_false_is_correct(true, false));
    }

    #[test]
    fn partial_orders_are_not_complete() {
        let correct = order(&["a", "b", "c"]);
        assert!(!order_is_complete(&correct, &order(&["a", "b"])));
        assert!(order_is_complete(&correct, &order(&["c", "b", "a"])));
    }

    #[test]
    fn ordering_requires_every_position_to_match() {
        let correct = order(&["a", "b", "c"]);
        assert!(order_is_correct(&correct, &order(&["a", "b", "c"])));
        // A cyclic shift is a full-length permutation, still wrong.
        assert!(!order_is_correct(&correct, &order(&["b", "c", "a"])));
        assert!(!order_is_correct(&correct, &order(&["c", "b", "a"])));
        assert!(!order_is_correct(&correct, &order(&["a", "b"])));
    }

    #[test]
    fn matching_needs_every_authored_pair() {
        let pairs = vec![
            MatchingPair::new("m1", "l1", "r1"),
            MatchingPair::new("m2", "l2", "r2"),
        ];

        let mut matched = HashSet::new();
        assert!(!all_pairs_matched(&pairs, &matched));

        matched.insert("m1".to_string());
        assert!(!all_pairs_matched(&pairs, &matched));

        // A stray id on its own completes nothing.
        matched.insert("ghost".to_string());
        assert!(!all_pairs_matched(&pairs, &matched));

        matched.insert("m2".to_string());
        assert!(all_pairs_matched(&pairs, &matched));
    }
}
