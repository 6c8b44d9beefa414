// Copyright 2026 The Sankey Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::collections::BTreeMap;

use crate::datamodel::{AggregatedFlows, AggregationMode, EntityRecord, Flow};
use crate::taxonomy::Taxonomy;

/// Optional predicate dropping a primary category from the diagram entirely.
/// Rows whose primary category matches are removed before any aggregation,
/// so the rest of the pipeline never sees the excluded category.
pub type ExclusionPredicate<'a> = &'a dyn Fn(&str) -> bool;

/// Aggregates entity rows into the two weighted flow sets of a three-level
/// diagram: primary category -> broad category and broad category ->
/// specific topic.
///
/// In `Binary` mode each active indicator on a row counts 1.  In
/// `Proportional` mode a row's k active indicators each contribute 1/k, so
/// every classified row contributes exactly 1 in total.  Rows with no active
/// indicator always contribute 1 to the no-signal specific topic, in both
/// modes: the no-signal path represents absence, not a multi-label split,
/// and stays a plain count even when everything else is proportional.
///
/// Zero-weight flows are never emitted.  An empty row collection (including
/// one emptied by exclusion) yields two empty flow sets.
pub fn aggregate_flows(
    records: &[EntityRecord],
    taxonomy: &Taxonomy,
    mode: AggregationMode,
    exclude: Option<ExclusionPredicate<'_>>,
) -> AggregatedFlows {
    // (primary category, specific topic) -> weight
    let mut specific_weights: BTreeMap<(String, String), f64> = BTreeMap::new();

    for record in records {
        if let Some(excluded) = exclude {
            if excluded(&record.primary_category) {
                continue;
            }
        }

        let active: Vec<&str> = taxonomy
            .vocabulary()
            .filter(|indicator| record.indicator(indicator))
            .collect();

        if active.is_empty() {
            let key = (
                record.primary_category.clone(),
                taxonomy.no_signal_specific().to_string(),
            );
            *specific_weights.entry(key).or_insert(0.0) += 1.0;
            continue;
        }

        let weight = match mode {
            AggregationMode::Binary => 1.0,
            AggregationMode::Proportional => 1.0 / active.len() as f64,
        };
        for indicator in active {
            if let Some(topic) = taxonomy.specific_topic_for(indicator) {
                let key = (record.primary_category.clone(), topic.to_string());
                *specific_weights.entry(key).or_insert(0.0) += weight;
            }
        }
    }

    // collapse (primary, specific) over the taxonomy tree
    let mut primary_to_broad: BTreeMap<(String, String), f64> = BTreeMap::new();
    let mut broad_to_specific: BTreeMap<(String, String), f64> = BTreeMap::new();
    for ((primary, specific), weight) in &specific_weights {
        let broad = taxonomy
            .broad_category_for(specific)
            .unwrap_or(taxonomy.no_signal_broad());
        *primary_to_broad
            .entry((primary.clone(), broad.to_string()))
            .or_insert(0.0) += weight;
        *broad_to_specific
            .entry((broad.to_string(), specific.clone()))
            .or_insert(0.0) += weight;
    }

    let collect = |weights: BTreeMap<(String, String), f64>| -> Vec<Flow> {
        weights
            .into_iter()
            .filter(|(_, weight)| *weight > 0.0)
            .map(|((source, target), weight)| Flow {
                source,
                target,
                weight,
            })
            .collect()
    };

    AggregatedFlows {
        primary_to_broad: collect(primary_to_broad),
        broad_to_specific: collect(broad_to_specific),
    }
}

/// How many entities carry at least one active indicator in each broad
/// category, plus the entities carrying none at all.  An entity with topics
/// in two broad categories counts once in each, so the per-category counts
/// can overlap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoverageSummary {
    pub total: usize,
    /// (broad category, entity count), in canonical broad order, excluding
    /// the no-signal bucket.
    pub by_broad: Vec<(String, usize)>,
    pub with_any: usize,
    pub with_none: usize,
}

pub fn coverage_summary(
    records: &[EntityRecord],
    taxonomy: &Taxonomy,
    exclude: Option<ExclusionPredicate<'_>>,
) -> CoverageSummary {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    let mut total = 0usize;
    let mut with_any = 0usize;

    for record in records {
        if let Some(excluded) = exclude {
            if excluded(&record.primary_category) {
                continue;
            }
        }
        total += 1;

        let mut hit = false;
        let mut seen: Vec<&str> = Vec::new();
        for indicator in taxonomy.vocabulary() {
            if !record.indicator(indicator) {
                continue;
            }
            hit = true;
            if let Some(broad) = taxonomy
                .specific_topic_for(indicator)
                .and_then(|topic| taxonomy.broad_category_for(topic))
            {
                if !seen.contains(&broad) {
                    seen.push(broad);
                    *counts.entry(broad).or_insert(0) += 1;
                }
            }
        }
        if hit {
            with_any += 1;
        }
    }

    let by_broad = taxonomy
        .broad_order()
        .iter()
        .filter(|broad| broad.as_str() != taxonomy.no_signal_broad())
        .map(|broad| (broad.clone(), counts.get(broad.as_str()).copied().unwrap_or(0)))
        .collect();

    CoverageSummary {
        total,
        by_broad,
        with_any,
        with_none: total - with_any,
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;
    use crate::datamodel::AggregationMode::{Binary, Proportional};

    fn flow_weight(flows: &[Flow], source: &str, target: &str) -> Option<f64> {
        flows
            .iter()
            .find(|f| f.source == source && f.target == target)
            .map(|f| f.weight)
    }

    fn sample_records() -> Vec<EntityRecord> {
        vec![
            EntityRecord::new("A")
                .with_indicator("political_content", true)
                .with_indicator("financial_content", true),
            EntityRecord::new("A")
                .with_indicator("political_content", true)
                .with_indicator("financial_content", true),
            EntityRecord::new("A"),
        ]
    }

    #[test]
    fn binary_mode_counts_each_active_indicator() {
        let flows = aggregate_flows(&sample_records(), Taxonomy::standard(), Binary, None);

        assert_eq!(
            flow_weight(&flows.primary_to_broad, "A", "Ideological"),
            Some(2.0)
        );
        assert_eq!(
            flow_weight(&flows.primary_to_broad, "A", "Financial"),
            Some(2.0)
        );
        assert_eq!(flow_weight(&flows.primary_to_broad, "A", "Other"), Some(1.0));
        assert_eq!(
            flow_weight(&flows.broad_to_specific, "Ideological", "Political"),
            Some(2.0)
        );
        assert_eq!(
            flow_weight(&flows.broad_to_specific, "Financial", "Money"),
            Some(2.0)
        );
        assert_eq!(
            flow_weight(&flows.broad_to_specific, "Other", "Not at-risk"),
            Some(1.0)
        );
    }

    #[test]
    fn proportional_mode_splits_rows_evenly() {
        let flows = aggregate_flows(&sample_records(), Taxonomy::standard(), Proportional, None);

        // two rows, each contributing 0.5 to Political and 0.5 to Money
        let political = flow_weight(&flows.broad_to_specific, "Ideological", "Political").unwrap();
        let money = flow_weight(&flows.broad_to_specific, "Financial", "Money").unwrap();
        assert!(approx_eq!(f64, political, 1.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, money, 1.0, epsilon = 1e-9));

        // the no-signal path stays a plain count even in proportional mode
        assert_eq!(
            flow_weight(&flows.broad_to_specific, "Other", "Not at-risk"),
            Some(1.0)
        );
    }

    #[test]
    fn proportional_rows_conserve_unit_weight() {
        let records = vec![
            EntityRecord::new("A")
                .with_indicator("political_content", true)
                .with_indicator("news_content", true)
                .with_indicator("gambling_content", true),
        ];
        let flows = aggregate_flows(&records, Taxonomy::standard(), Proportional, None);
        let total: f64 = flows.broad_to_specific.iter().map(|f| f.weight).sum();
        assert!(approx_eq!(f64, total, 1.0, epsilon = 1e-9));
    }

    #[test]
    fn binary_conservation_per_primary_category() {
        let records = vec![
            EntityRecord::new("A").with_indicator("news_content", true),
            EntityRecord::new("A")
                .with_indicator("news_content", true)
                .with_indicator("gambling_content", true),
            EntityRecord::new("B"),
        ];
        let flows = aggregate_flows(&records, Taxonomy::standard(), Binary, None);

        // A: three active indicators over two rows
        let a_out: f64 = flows
            .primary_to_broad
            .iter()
            .filter(|f| f.source == "A")
            .map(|f| f.weight)
            .sum();
        assert_eq!(a_out, 3.0);

        // B: one no-signal row
        let b_out: f64 = flows
            .primary_to_broad
            .iter()
            .filter(|f| f.source == "B")
            .map(|f| f.weight)
            .sum();
        assert_eq!(b_out, 1.0);
    }

    #[test]
    fn excluded_category_disappears_from_both_flow_sets() {
        let records = vec![
            EntityRecord::new("X").with_indicator("political_content", true),
            EntityRecord::new("A").with_indicator("news_content", true),
        ];
        let exclude = |category: &str| category == "X";
        let flows = aggregate_flows(&records, Taxonomy::standard(), Binary, Some(&exclude));

        assert!(flows.primary_to_broad.iter().all(|f| f.source != "X"));
        assert_eq!(
            flow_weight(&flows.broad_to_specific, "Ideological", "Political"),
            None
        );
        assert_eq!(
            flow_weight(&flows.broad_to_specific, "Ideological", "News"),
            Some(1.0)
        );
    }

    #[test]
    fn empty_input_yields_empty_flow_sets() {
        let flows = aggregate_flows(&[], Taxonomy::standard(), Binary, None);
        assert!(flows.primary_to_broad.is_empty());
        assert!(flows.broad_to_specific.is_empty());

        let records = vec![EntityRecord::new("X")];
        let exclude = |category: &str| category == "X";
        let flows = aggregate_flows(&records, Taxonomy::standard(), Binary, Some(&exclude));
        assert!(flows.primary_to_broad.is_empty());
        assert!(flows.broad_to_specific.is_empty());
    }

    #[test]
    fn no_zero_weight_flows_are_emitted() {
        let flows = aggregate_flows(&sample_records(), Taxonomy::standard(), Proportional, None);
        assert!(flows.primary_to_broad.iter().all(|f| f.weight > 0.0));
        assert!(flows.broad_to_specific.iter().all(|f| f.weight > 0.0));
    }

    #[test]
    fn coverage_counts_overlap_but_entities_count_once() {
        let records = vec![
            EntityRecord::new("A")
                .with_indicator("political_content", true)
                .with_indicator("news_content", true)
                .with_indicator("financial_content", true),
            EntityRecord::new("B").with_indicator("gambling_content", true),
            EntityRecord::new("C"),
        ];
        let summary = coverage_summary(&records, Taxonomy::standard(), None);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.with_any, 2);
        assert_eq!(summary.with_none, 1);
        assert_eq!(
            summary.by_broad,
            vec![
                ("Ideological".to_string(), 1),
                ("Financial".to_string(), 2)
            ]
        );
    }
}
