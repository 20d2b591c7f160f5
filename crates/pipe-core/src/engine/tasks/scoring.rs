use crate::core::io::tope::TopeSet;
use crate::core::models::residue::ResidueKey;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ScoringError {
    #[error("Predicted residue set is empty; the fractional contact score is undefined")]
    EmptyPrediction,
}

/// Fraction of the predicted residues recovered by the detected contacts.
///
/// Repeats in `detected` do not count twice, and its order does not matter. A predicted key
/// without a chain identifier is recovered by a detected residue with the same name and
/// number on any chain.
///
/// # Errors
///
/// Returns [`ScoringError::EmptyPrediction`] if `predicted` is empty.
pub fn fractional_contact_score(
    detected: &[ResidueKey],
    predicted: &TopeSet,
) -> Result<f64, ScoringError> {
    if predicted.is_empty() {
        return Err(ScoringError::EmptyPrediction);
    }

    let detected: TopeSet = detected.iter().cloned().collect();
    let recovered = predicted
        .iter()
        .filter(|key| detected.contains_match(key))
        .count();

    Ok(recovered as f64 / predicted.len() as f64)
}

/// Retention test used throughout: strictly above the threshold.
#[inline]
pub fn passes_threshold(score: f64, threshold: f64) -> bool {
    score > threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> ResidueKey {
        s.parse().unwrap()
    }

    fn set(items: &[&str]) -> TopeSet {
        items.iter().map(|s| key(s)).collect()
    }

    fn keys(items: &[&str]) -> Vec<ResidueKey> {
        items.iter().map(|s| key(s)).collect()
    }

    #[test]
    fn duplicate_contacts_count_once() {
        let score =
            fractional_contact_score(&keys(&["ALA.A.10", "ALA.A.10"]), &set(&["ALA.A.10"]))
                .unwrap();
        assert_eq!(score, 1.0);
    }

    #[test]
    fn repeated_contact_does_not_inflate_a_full_recovery() {
        let predicted = set(&["ALA.A.10", "GLY.A.11"]);
        let detected = keys(&["ALA.A.10", "ALA.A.10", "GLY.A.11"]);
        let score = fractional_contact_score(&detected, &predicted).unwrap();
        assert_eq!(score, 1.0);
        assert!(passes_threshold(score, 0.25));
    }

    #[test]
    fn score_is_fraction_of_prediction_recovered() {
        let predicted = set(&["ALA.A.1", "GLY.A.2", "SER.A.3", "LYS.A.4"]);
        let detected = keys(&["GLY.A.2", "TRP.A.9", "LYS.A.4"]);
        assert_eq!(fractional_contact_score(&detected, &predicted).unwrap(), 0.5);
    }

    #[test]
    fn score_ignores_detection_order() {
        let predicted = set(&["ALA.A.1", "GLY.A.2", "SER.A.3"]);
        let forward = keys(&["ALA.A.1", "SER.A.3", "TRP.A.9"]);
        let mut reversed = forward.clone();
        reversed.reverse();
        assert_eq!(
            fractional_contact_score(&forward, &predicted),
            fractional_contact_score(&reversed, &predicted)
        );
    }

    #[test]
    fn score_stays_within_unit_interval() {
        let predicted = set(&["ALA.A.1"]);
        let empty = fractional_contact_score(&[], &predicted).unwrap();
        let full = fractional_contact_score(&keys(&["ALA.A.1", "GLY.A.2"]), &predicted).unwrap();
        assert_eq!(empty, 0.0);
        assert_eq!(full, 1.0);
    }

    #[test]
    fn chain_must_match_for_qualified_predictions() {
        let predicted = set(&["ALA.A.10"]);
        assert_eq!(
            fractional_contact_score(&keys(&["ALA.B.10"]), &predicted).unwrap(),
            0.0
        );
    }

    #[test]
    fn unqualified_prediction_matches_any_chain() {
        let predicted = set(&["ALA.10", "GLY.11"]);
        let detected = keys(&["ALA.B.10", "GLY.C.12"]);
        assert_eq!(fractional_contact_score(&detected, &predicted).unwrap(), 0.5);
    }

    #[test]
    fn empty_prediction_fails_fast() {
        assert_eq!(
            fractional_contact_score(&keys(&["ALA.A.1"]), &TopeSet::new()),
            Err(ScoringError::EmptyPrediction)
        );
    }

    #[test]
    fn threshold_is_strict() {
        assert!(!passes_threshold(0.25, 0.25));
        assert!(passes_threshold(0.2501, 0.25));
        assert!(!passes_threshold(0.0, 0.0));
    }
}
