// Copyright 2026 The Sankey Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::color::Color;

/// One row of the input table: an entity with a single primary category
/// and a set of 0/1 topic indicators.  An indicator absent from the map
/// is treated as 0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityRecord {
    pub primary_category: String,
    pub indicators: BTreeMap<String, bool>,
}

impl EntityRecord {
    pub fn new(primary_category: &str) -> Self {
        EntityRecord {
            primary_category: primary_category.to_string(),
            indicators: BTreeMap::new(),
        }
    }

    pub fn with_indicator(mut self, name: &str, active: bool) -> Self {
        self.indicators.insert(name.to_string(), active);
        self
    }

    pub fn indicator(&self, name: &str) -> bool {
        self.indicators.get(name).copied().unwrap_or(false)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum AggregationMode {
    /// Each active indicator on a row counts 1.
    #[default]
    Binary,
    /// A row's active indicators split a total weight of 1 between them.
    Proportional,
}

/// An aggregated weighted edge between two categories at adjacent levels.
#[derive(Clone, Debug, PartialEq)]
pub struct Flow {
    pub source: String,
    pub target: String,
    pub weight: f64,
}

impl Flow {
    pub fn new(source: &str, target: &str, weight: f64) -> Self {
        Flow {
            source: source.to_string(),
            target: target.to_string(),
            weight,
        }
    }
}

/// The two flow sets of a three-level diagram.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AggregatedFlows {
    /// primary category -> broad category
    pub primary_to_broad: Vec<Flow>,
    /// broad category -> specific topic
    pub broad_to_specific: Vec<Flow>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryLevel {
    Primary,
    Broad,
    Specific,
}

/// A node in the final diagram.  Invisible nodes are layout placeholders:
/// they always carry an empty label and a fully transparent fill, but their
/// incident flows still occupy layout space.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryNode {
    pub label: String,
    pub level: CategoryLevel,
    pub color: Color,
    pub x: f64,
    pub y: f64,
    pub visible: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Edge {
    pub source: usize,
    pub target: usize,
    pub weight: f64,
    pub color: Color,
}

/// The renderer-agnostic artifact: an ordered node list plus an ordered,
/// index-addressed edge list.  Built fresh per invocation.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DiagramGraph {
    pub nodes: Vec<CategoryNode>,
    pub edges: Vec<Edge>,
}

impl DiagramGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
