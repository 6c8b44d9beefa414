// Copyright 2026 The Sankey Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::collections::BTreeMap;

use crate::datamodel::CategoryLevel;
use crate::taxonomy::Taxonomy;

/// Layout policy for the three diagram columns.
///
/// All positions are fractions of the canvas in [0, 1].  The per-category
/// vertical anchors are display policy, hand-tuned for the standard
/// taxonomy, not derived from the data.
#[derive(Clone, Debug)]
pub struct LayoutConfig {
    /// Column x for primary categories.
    pub left_x: f64,
    /// Column x for broad categories.
    pub middle_x: f64,
    /// Column x for specific topics.
    pub right_x: f64,

    /// y of the first primary node.
    pub primary_top: f64,
    /// Vertical span the primary column spreads across.
    pub primary_span: f64,

    /// Vertical band anchor per visible broad category.
    pub band_anchors: BTreeMap<String, f64>,
    /// Band anchor for broad categories without an entry above.
    pub default_band_y: f64,

    /// Hand-assigned y per specific topic, grouped visually by broad
    /// category.
    pub specific_y: BTreeMap<String, f64>,
    /// Mid-column fallback for specific topics without an entry above.
    pub default_specific_y: f64,

    /// y pinning the invisible no-signal broad node to the column top.
    pub hidden_broad_y: f64,
    /// y pinning the invisible no-signal specific node to the column top.
    pub hidden_specific_y: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let band_anchors = [("Ideological", 0.3)]
            .iter()
            .map(|(label, y)| (label.to_string(), *y))
            .collect();
        let specific_y = [
            ("Political", 0.1),
            ("News", 0.2),
            ("Religious", 0.3),
            ("Medical", 0.4),
            ("Manosphere", 0.45),
            ("Extremist", 0.5),
            ("Cryptocurrency", 0.6),
            ("Money", 0.68),
            ("Gambling", 0.75),
        ]
        .iter()
        .map(|(label, y)| (label.to_string(), *y))
        .collect();

        Self {
            left_x: 0.01,
            middle_x: 0.5,
            right_x: 0.8,
            primary_top: 0.05,
            primary_span: 0.9,
            band_anchors,
            default_band_y: 0.7,
            specific_y,
            default_specific_y: 0.5,
            hidden_broad_y: 0.001,
            hidden_specific_y: 0.0001,
        }
    }
}

/// Where one category sits in the diagram, before colors and display labels
/// are attached.
#[derive(Clone, Debug, PartialEq)]
pub struct NodePlacement {
    pub category: String,
    pub level: CategoryLevel,
    pub x: f64,
    pub y: f64,
    pub visible: bool,
}

/// Assigns every category a column, a vertical position, and a visibility
/// flag.  The no-signal broad category and specific topic become invisible
/// anchor nodes pinned to the top of their columns; they keep their layout
/// space so visible proportions stay honest.
pub fn place_nodes(
    primary: &[String],
    broad: &[String],
    specific: &[String],
    taxonomy: &Taxonomy,
    config: &LayoutConfig,
) -> Vec<NodePlacement> {
    let mut placements =
        Vec::with_capacity(primary.len() + broad.len() + specific.len());

    let spacing = if primary.is_empty() {
        0.0
    } else {
        config.primary_span / primary.len() as f64
    };
    for (i, category) in primary.iter().enumerate() {
        placements.push(NodePlacement {
            category: category.clone(),
            level: CategoryLevel::Primary,
            x: config.left_x,
            y: config.primary_top + i as f64 * spacing,
            visible: true,
        });
    }

    for category in broad {
        let hidden = category.as_str() == taxonomy.no_signal_broad();
        placements.push(NodePlacement {
            category: category.clone(),
            level: CategoryLevel::Broad,
            x: config.middle_x,
            y: if hidden {
                config.hidden_broad_y
            } else {
                config
                    .band_anchors
                    .get(category)
                    .copied()
                    .unwrap_or(config.default_band_y)
            },
            visible: !hidden,
        });
    }

    for category in specific {
        let hidden = category.as_str() == taxonomy.no_signal_specific();
        placements.push(NodePlacement {
            category: category.clone(),
            level: CategoryLevel::Specific,
            x: config.right_x,
            y: if hidden {
                config.hidden_specific_y
            } else {
                config
                    .specific_y
                    .get(category)
                    .copied()
                    .unwrap_or(config.default_specific_y)
            },
            visible: !hidden,
        });
    }

    placements
}
