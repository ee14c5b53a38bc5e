//! Pairing of incoming document entries with existing live ones.

use crate::options::MatchBy;
use std::collections::{HashMap, VecDeque};

/// For each incoming entry, the index of the existing entry it updates, or
/// `None` when it has to be created.
///
/// By index the Nth incoming entry pairs with the Nth existing one. By name
/// entries are grouped by name and paired in order within each group, so
/// duplicate names still resolve deterministically.
pub fn pair<S: AsRef<str>>(existing: &[S], incoming: &[S], by: MatchBy) -> Vec<Option<usize>> {
    match by {
        MatchBy::Index => (0..incoming.len())
            .map(|i| (i < existing.len()).then_some(i))
            .collect(),
        MatchBy::Name => {
            let mut groups: HashMap<&str, VecDeque<usize>> = HashMap::new();
            for (i, name) in existing.iter().enumerate() {
                groups.entry(name.as_ref()).or_default().push_back(i);
            }
            incoming
                .iter()
                .map(|name| groups.get_mut(name.as_ref()).and_then(VecDeque::pop_front))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_pairs_positionally() {
        let out = pair(&["a", "b"], &["x", "y", "z"], MatchBy::Index);
        assert_eq!(out, vec![Some(0), Some(1), None]);
    }

    #[test]
    fn name_pairs_within_equal_names() {
        let existing = ["Solid", "Comp", "Solid"];
        let incoming = ["Solid", "Solid", "Solid", "Other", "Comp"];
        let out = pair(&existing, &incoming, MatchBy::Name);
        assert_eq!(out, vec![Some(0), Some(2), None, None, Some(1)]);
    }
}
