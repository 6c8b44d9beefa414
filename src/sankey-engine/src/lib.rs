// Copyright 2026 The Sankey Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Turns row-level categorical membership data into a three-level weighted
//! flow graph for sankey rendering: primary category -> broad category ->
//! specific topic, with deterministic ordering, 2-D layout positions, and
//! colors, including invisible placeholder nodes anchoring the no-signal
//! flows.
//!
//! Building a diagram is a pure function of (rows, taxonomy, mode,
//! exclusion); the only mutable state anywhere is inside each build.

#![forbid(unsafe_code)]

use std::collections::BTreeSet;

pub mod aggregate;
pub mod color;
pub mod common;
pub mod datamodel;
pub mod graph;
#[cfg(feature = "file_io")]
pub mod io;
pub mod layout;
pub mod order;
pub mod taxonomy;

pub use self::aggregate::{
    CoverageSummary, ExclusionPredicate, aggregate_flows, coverage_summary,
};
pub use self::color::{Color, Palette};
pub use self::common::{Error, ErrorCode, ErrorKind, Result};
pub use self::datamodel::{
    AggregatedFlows, AggregationMode, CategoryLevel, CategoryNode, DiagramGraph, Edge,
    EntityRecord, Flow,
};
pub use self::graph::build_graph;
pub use self::layout::{LayoutConfig, NodePlacement, place_nodes};
pub use self::order::ordered_categories;
pub use self::taxonomy::Taxonomy;

/// Runs the whole pipeline: aggregate flows, order the observed categories
/// per level, place nodes, and assemble the index-addressed graph.
///
/// Nodes exist only for observed categories, so an input emptied by the
/// exclusion predicate produces a graph with no nodes and no edges.
pub fn build_diagram(
    records: &[EntityRecord],
    taxonomy: &Taxonomy,
    palette: &Palette,
    layout: &LayoutConfig,
    mode: AggregationMode,
    exclude: Option<ExclusionPredicate<'_>>,
) -> DiagramGraph {
    let flows = aggregate_flows(records, taxonomy, mode, exclude);

    let observed_primary: BTreeSet<String> = flows
        .primary_to_broad
        .iter()
        .map(|f| f.source.clone())
        .collect();
    let observed_broad: BTreeSet<String> = flows
        .primary_to_broad
        .iter()
        .map(|f| f.target.clone())
        .collect();
    let observed_specific: BTreeSet<String> = flows
        .broad_to_specific
        .iter()
        .map(|f| f.target.clone())
        .collect();

    let primary = ordered_categories(&observed_primary, taxonomy.primary_order());
    let broad = ordered_categories(&observed_broad, taxonomy.broad_order());
    let specific = ordered_categories(&observed_specific, taxonomy.specific_order());

    let placements = place_nodes(&primary, &broad, &specific, taxonomy, layout);
    build_graph(&flows, &placements, taxonomy, palette)
}
