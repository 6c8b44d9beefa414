// Copyright 2026 The Sankey Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::collections::HashMap;

use crate::color::Palette;
use crate::datamodel::{
    AggregatedFlows, CategoryLevel, CategoryNode, DiagramGraph, Edge, Flow,
};
use crate::layout::NodePlacement;
use crate::taxonomy::Taxonomy;

/// Assembles placements, colors, and aggregated flows into the final
/// index-addressed graph.  Node indices follow the placement order (level 1,
/// then 2, then 3); edges come as all level-1->2 flows followed by all
/// level-2->3 flows, each block sorted by (source index, target index).
///
/// No aggregation or layout happens here.
pub fn build_graph(
    flows: &AggregatedFlows,
    placements: &[NodePlacement],
    taxonomy: &Taxonomy,
    palette: &Palette,
) -> DiagramGraph {
    let index: HashMap<(CategoryLevel, &str), usize> = placements
        .iter()
        .enumerate()
        .map(|(i, p)| ((p.level, p.category.as_str()), i))
        .collect();

    let nodes: Vec<CategoryNode> = placements
        .iter()
        .map(|p| {
            let label = if !p.visible {
                String::new()
            } else if p.level == CategoryLevel::Primary {
                taxonomy.display_label(&p.category).to_string()
            } else {
                p.category.clone()
            };
            let color = if p.visible {
                palette.node_color(&p.category, p.level)
            } else {
                crate::color::Color::TRANSPARENT
            };
            CategoryNode {
                label,
                level: p.level,
                color,
                x: p.x,
                y: p.y,
                visible: p.visible,
            }
        })
        .collect();

    let edges_for = |flow_set: &[Flow],
                     source_level: CategoryLevel,
                     target_level: CategoryLevel|
     -> Vec<Edge> {
        let mut edges: Vec<Edge> = flow_set
            .iter()
            .filter_map(|flow| {
                let source = *index.get(&(source_level, flow.source.as_str()))?;
                let target = *index.get(&(target_level, flow.target.as_str()))?;
                let color = palette.edge_color(
                    &flow.target,
                    target_level,
                    placements[source].visible,
                    placements[target].visible,
                );
                Some(Edge {
                    source,
                    target,
                    weight: flow.weight,
                    color,
                })
            })
            .collect();
        edges.sort_by_key(|e| (e.source, e.target));
        edges
    };

    let mut edges = edges_for(
        &flows.primary_to_broad,
        CategoryLevel::Primary,
        CategoryLevel::Broad,
    );
    edges.extend(edges_for(
        &flows.broad_to_specific,
        CategoryLevel::Broad,
        CategoryLevel::Specific,
    ));

    DiagramGraph { nodes, edges }
}
