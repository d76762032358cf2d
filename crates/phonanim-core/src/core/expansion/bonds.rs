use std::collections::HashMap;
use thiserror::Error;

/// Element placeholder that matches any symbol in a bond-distance pair.
pub const WILDCARD: &str = "X";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BondTableError {
    #[error("Bond pair '{key}' is not of the form 'A-B'")]
    MalformedPair { key: String },
    #[error("Bond distance for '{key}' set twice; '{key}' and '{duplicate}' are equivalent")]
    DuplicatePair { key: String, duplicate: String },
}

/// Reference bond distances keyed by unordered element pairs.
///
/// Pairs are canonicalised by sorting the two symbols, so `C-H` and `H-C`
/// address the same entry. Either side may be the wildcard [`WILDCARD`];
/// lookups prefer the exact pair, then single-wildcard pairs, then `X-X`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BondTable {
    distances: HashMap<(String, String), f64>,
}

fn canonical_pair(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

impl BondTable {
    /// Builds a table from `"A-B"` keys and distances in Angstroms.
    ///
    /// # Errors
    ///
    /// Returns an error for keys that are not a single `A-B` pair, or for two
    /// keys that canonicalise to the same pair.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, BondTableError>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut distances = HashMap::new();
        for (key, distance) in pairs {
            let mut elements = key.split('-');
            let (Some(first), Some(second), None) =
                (elements.next(), elements.next(), elements.next())
            else {
                return Err(BondTableError::MalformedPair {
                    key: key.to_string(),
                });
            };

            let canonical = canonical_pair(first.trim(), second.trim());
            if distances.contains_key(&canonical) {
                return Err(BondTableError::DuplicatePair {
                    key: key.to_string(),
                    duplicate: format!("{}-{}", canonical.0, canonical.1),
                });
            }
            distances.insert(canonical, distance);
        }

        Ok(Self { distances })
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Looks up the reference distance for an element pair.
    ///
    /// Tries the exact pair first, then each single-wildcard pair, then the
    /// double wildcard. Returns `None` when no entry matches.
    pub fn lookup(&self, first: &str, second: &str) -> Option<f64> {
        let candidates = [
            canonical_pair(first, second),
            canonical_pair(first, WILDCARD),
            canonical_pair(WILDCARD, second),
            canonical_pair(WILDCARD, WILDCARD),
        ];

        candidates
            .iter()
            .find_map(|pair| self.distances.get(pair).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_are_order_insensitive() {
        let table = BondTable::from_pairs([("C-H", 1.2)]).unwrap();
        assert_eq!(table.lookup("C", "H"), Some(1.2));
        assert_eq!(table.lookup("H", "C"), Some(1.2));
    }

    #[test]
    fn exact_pair_wins_over_wildcards() {
        let table = BondTable::from_pairs([("C-H", 1.2), ("C-X", 1.8), ("X-X", 2.5)]).unwrap();
        assert_eq!(table.lookup("C", "H"), Some(1.2));
        assert_eq!(table.lookup("C", "N"), Some(1.8));
        assert_eq!(table.lookup("O", "N"), Some(2.5));
    }

    #[test]
    fn missing_pair_returns_none() {
        let table = BondTable::from_pairs([("C-H", 1.2)]).unwrap();
        assert_eq!(table.lookup("Pb", "I"), None);
    }

    #[test]
    fn equivalent_keys_are_rejected() {
        let result = BondTable::from_pairs([("C-H", 1.2), ("H-C", 1.3)]);
        assert!(matches!(
            result,
            Err(BondTableError::DuplicatePair { .. })
        ));
    }

    #[test]
    fn malformed_keys_are_rejected() {
        assert!(matches!(
            BondTable::from_pairs([("CH", 1.2)]),
            Err(BondTableError::MalformedPair { .. })
        ));
        assert!(matches!(
            BondTable::from_pairs([("C-H-O", 1.2)]),
            Err(BondTableError::MalformedPair { .. })
        ));
    }
}
