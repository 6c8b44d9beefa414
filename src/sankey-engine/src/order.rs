// Copyright 2026 The Sankey Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::collections::BTreeSet;

/// Produces the display order for one diagram column: every canonical label
/// that was actually observed, in canonical order, followed by the observed
/// labels the canonical list doesn't know about, sorted lexicographically.
///
/// The result is a permutation of exactly `observed`, independent of how the
/// observed set was accumulated.
pub fn ordered_categories(observed: &BTreeSet<String>, canonical: &[String]) -> Vec<String> {
    let mut remaining = observed.clone();
    let mut ordered = Vec::with_capacity(observed.len());

    for label in canonical {
        if remaining.remove(label) {
            ordered.push(label.clone());
        }
    }

    // BTreeSet iteration is already lexicographic
    ordered.extend(remaining);
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(labels: &[&str]) -> BTreeSet<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    fn canonical(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn canonical_prefix_then_alphabetical_remainder() {
        let observed = set(&["Zebra", "Money", "Aardvark", "Political"]);
        let order = canonical(&["Political", "News", "Money"]);
        assert_eq!(
            ordered_categories(&observed, &order),
            vec!["Political", "Money", "Aardvark", "Zebra"]
        );
    }

    #[test]
    fn output_is_a_permutation_of_observed() {
        let observed = set(&["b", "a", "c"]);
        let ordered = ordered_categories(&observed, &canonical(&["c"]));
        assert_eq!(ordered.len(), observed.len());
        let roundtrip: BTreeSet<String> = ordered.into_iter().collect();
        assert_eq!(roundtrip, observed);
    }

    #[test]
    fn unobserved_canonical_entries_are_skipped() {
        let observed = set(&["News"]);
        let order = canonical(&["Political", "News", "Money"]);
        assert_eq!(ordered_categories(&observed, &order), vec!["News"]);
    }

    #[test]
    fn empty_observed_set_yields_empty_order() {
        assert!(ordered_categories(&BTreeSet::new(), &canonical(&["a", "b"])).is_empty());
    }
}
