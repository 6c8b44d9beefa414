// Copyright 2026 The Sankey Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::collections::BTreeMap;

use lazy_static::lazy_static;

use crate::common::Result;
use crate::config_err;

/// The static classification tables behind a diagram: which specific topic
/// each 0/1 indicator column stands for, which broad category each specific
/// topic rolls up into, and the canonical display orders per level.
///
/// The mapping is a tree: every indicator resolves to exactly one specific
/// topic and every specific topic to exactly one broad category.  The
/// no-signal labels ("Not at-risk" / "Other" in the standard tables) mark
/// the catch-all path for entities with no active indicator; the no-signal
/// specific topic has no indicator column of its own and is computed.
#[derive(Clone, Debug)]
pub struct Taxonomy {
    specific_for_indicator: BTreeMap<String, String>,
    broad_for_specific: BTreeMap<String, String>,
    display_labels: BTreeMap<String, String>,
    primary_order: Vec<String>,
    broad_order: Vec<String>,
    specific_order: Vec<String>,
    no_signal_specific: String,
    no_signal_broad: String,
}

lazy_static! {
    static ref STANDARD_TAXONOMY: Taxonomy =
        Taxonomy::build_standard().expect("curated taxonomy tables are valid");
}

impl Taxonomy {
    /// Builds a taxonomy from explicit tables, validating that the mapping
    /// forms a tree.  Violations are configuration errors, reported here and
    /// never silently ignored.
    pub fn new(
        indicator_topics: &[(&str, &str)],
        broad_groups: &[(&str, &[&str])],
        display_labels: &[(&str, &str)],
        primary_order: &[&str],
        broad_order: &[&str],
        specific_order: &[&str],
        no_signal_specific: &str,
        no_signal_broad: &str,
    ) -> Result<Taxonomy> {
        let mut broad_for_specific: BTreeMap<String, String> = BTreeMap::new();
        for (broad, topics) in broad_groups {
            for topic in topics.iter() {
                if broad_for_specific
                    .insert(topic.to_string(), broad.to_string())
                    .is_some()
                {
                    return config_err!(DuplicateSpecificTopic, topic.to_string());
                }
            }
        }

        let mut specific_for_indicator: BTreeMap<String, String> = BTreeMap::new();
        for (indicator, topic) in indicator_topics {
            if !broad_for_specific.contains_key(*topic) {
                return config_err!(
                    UnknownSpecificTopic,
                    format!("indicator '{indicator}' maps to unknown topic '{topic}'")
                );
            }
            if specific_for_indicator
                .insert(indicator.to_string(), topic.to_string())
                .is_some()
            {
                return config_err!(DuplicateIndicator, indicator.to_string());
            }
        }

        match broad_for_specific.get(no_signal_specific) {
            Some(broad) if broad == no_signal_broad => {}
            _ => {
                return config_err!(
                    UnknownSpecificTopic,
                    format!("no-signal topic '{no_signal_specific}' must map to '{no_signal_broad}'")
                );
            }
        }

        Ok(Taxonomy {
            specific_for_indicator,
            broad_for_specific,
            display_labels: display_labels
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            primary_order: primary_order.iter().map(|s| s.to_string()).collect(),
            broad_order: broad_order.iter().map(|s| s.to_string()).collect(),
            specific_order: specific_order.iter().map(|s| s.to_string()).collect(),
            no_signal_specific: no_signal_specific.to_string(),
            no_signal_broad: no_signal_broad.to_string(),
        })
    }

    /// The curated marketplace taxonomy, established once at startup.
    pub fn standard() -> &'static Taxonomy {
        &STANDARD_TAXONOMY
    }

    fn build_standard() -> Result<Taxonomy> {
        Taxonomy::new(
            &[
                ("cryptocurrency_content", "Cryptocurrency"),
                ("financial_content", "Money"),
                ("gambling_content", "Gambling"),
                ("hateful_extremist_content", "Extremist"),
                ("manosphere_redpill_content", "Manosphere"),
                ("medical_health_content", "Medical"),
                ("news_content", "News"),
                ("political_content", "Political"),
                ("religious_content", "Religious"),
            ],
            &[
                (
                    "Ideological",
                    &[
                        "Political",
                        "Religious",
                        "News",
                        "Medical",
                        "Manosphere",
                        "Extremist",
                    ][..],
                ),
                ("Financial", &["Cryptocurrency", "Money", "Gambling"][..]),
                ("Other", &["Not at-risk"][..]),
            ],
            &[
                ("Tech & Science", "Technology"),
                ("Educational & QA", "Education"),
                ("Quotes & Sayings", "Quotes"),
                ("Pets & Animals", "Pets"),
                ("Food & Nutrition", "Food"),
                ("Outdoor & Travel", "Travel"),
                ("Art & Creativity", "Creativity"),
                ("Cars & Bikes", "Cars"),
                ("Crypto & NFT", "Crypto"),
                ("Beauty & Makeup", "Beauty"),
                ("Fitness & Sports", "Sports"),
                ("Reviews & How-to", "How-to"),
                ("Models & Celebrities", "Celebrities"),
                ("Humor & Memes", "Memes"),
                ("Luxury & Motivation", "Motivation"),
                ("Gaming & Entertainment", "Gaming"),
                ("Fashion & Style", "Fashion"),
                ("Movies TV & Fanpages", "Fanpages"),
            ],
            &[
                "Humor & Memes",
                "Gaming & Entertainment",
                "Tech & Science",
                "Educational & QA",
                "Reviews & How-to",
                "Models & Celebrities",
                "Luxury & Motivation",
                "Movies TV & Fanpages",
                "Fitness & Sports",
                "Fashion & Style",
                "Quotes & Sayings",
                "Crypto & NFT",
                "Food & Nutrition",
                "Art & Creativity",
                "Cars & Bikes",
                "Outdoor & Travel",
                "Pets & Animals",
                "Beauty & Makeup",
            ],
            // no-signal labels come first by construction
            &["Other", "Ideological", "Financial"],
            &[
                "Not at-risk",
                "Political",
                "News",
                "Religious",
                "Medical",
                "Manosphere",
                "Extremist",
                "Cryptocurrency",
                "Money",
                "Gambling",
            ],
            "Not at-risk",
            "Other",
        )
    }

    pub fn specific_topic_for(&self, indicator: &str) -> Option<&str> {
        self.specific_for_indicator.get(indicator).map(String::as_str)
    }

    pub fn broad_category_for(&self, specific_topic: &str) -> Option<&str> {
        self.broad_for_specific.get(specific_topic).map(String::as_str)
    }

    /// The indicator column names this taxonomy expects in the input table,
    /// in deterministic order.  The no-signal pseudo-indicator is excluded.
    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.specific_for_indicator.keys().map(String::as_str)
    }

    /// Short display label for a primary category; falls back to the raw
    /// category name.
    pub fn display_label<'a>(&'a self, primary_category: &'a str) -> &'a str {
        self.display_labels
            .get(primary_category)
            .map(String::as_str)
            .unwrap_or(primary_category)
    }

    pub fn primary_order(&self) -> &[String] {
        &self.primary_order
    }

    pub fn broad_order(&self) -> &[String] {
        &self.broad_order
    }

    pub fn specific_order(&self) -> &[String] {
        &self.specific_order
    }

    pub fn no_signal_specific(&self) -> &str {
        &self.no_signal_specific
    }

    pub fn no_signal_broad(&self) -> &str {
        &self.no_signal_broad
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{ErrorCode, ErrorKind};

    #[test]
    fn standard_mapping_is_a_tree() {
        let taxonomy = Taxonomy::standard();
        for indicator in taxonomy.vocabulary() {
            let topic = taxonomy
                .specific_topic_for(indicator)
                .expect("indicator resolves");
            assert!(taxonomy.broad_category_for(topic).is_some());
        }
        assert_eq!(
            taxonomy.broad_category_for("Political"),
            Some("Ideological")
        );
        assert_eq!(taxonomy.broad_category_for("Money"), Some("Financial"));
        assert_eq!(
            taxonomy.broad_category_for(taxonomy.no_signal_specific()),
            Some(taxonomy.no_signal_broad())
        );
    }

    #[test]
    fn vocabulary_excludes_no_signal() {
        let taxonomy = Taxonomy::standard();
        assert_eq!(taxonomy.vocabulary().count(), 9);
        assert!(!taxonomy.vocabulary().any(|i| i == "unclassified"));
    }

    #[test]
    fn no_signal_labels_lead_canonical_orders() {
        let taxonomy = Taxonomy::standard();
        assert_eq!(taxonomy.broad_order()[0], taxonomy.no_signal_broad());
        assert_eq!(taxonomy.specific_order()[0], taxonomy.no_signal_specific());
    }

    #[test]
    fn display_label_fallback() {
        let taxonomy = Taxonomy::standard();
        assert_eq!(taxonomy.display_label("Humor & Memes"), "Memes");
        assert_eq!(taxonomy.display_label("Knitting"), "Knitting");
    }

    #[test]
    fn indicator_to_unknown_topic_is_a_config_error() {
        let err = Taxonomy::new(
            &[("politics_flag", "Politics")],
            &[("Other", &["Not at-risk"][..])],
            &[],
            &[],
            &["Other"],
            &["Not at-risk"],
            "Not at-risk",
            "Other",
        )
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Config);
        assert_eq!(err.code, ErrorCode::UnknownSpecificTopic);
    }

    #[test]
    fn duplicate_indicator_is_a_config_error() {
        let err = Taxonomy::new(
            &[("flag", "Not at-risk"), ("flag", "Not at-risk")],
            &[("Other", &["Not at-risk"][..])],
            &[],
            &[],
            &["Other"],
            &["Not at-risk"],
            "Not at-risk",
            "Other",
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateIndicator);
    }
}
