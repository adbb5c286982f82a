//! Automatic layered layout of the schema graph.
//!
//! Adapts the document's tables (sized nodes) and relationships (directed
//! edges) onto an external Sugiyama-style layout algorithm and maps the
//! computed positions back into the document's top-left position
//! convention. The algorithm works in a fixed top-to-bottom frame; the four
//! requested flow directions are produced by swapping or negating axes
//! around it.

use std::collections::{HashMap, HashSet};

use petgraph::stable_graph::{NodeIndex, StableGraph};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::document::SchemaDocument;
use crate::core::geometry::Point;

/// Minimum spacing between nodes within a layer.
pub const NODE_SEPARATION: f64 = 50.0;

/// Margin the laid-out drawing is normalized into.
pub const LAYOUT_MARGIN: f64 = 50.0;

/// Flow direction of the layered layout.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, derive_more::Display,
)]
pub enum LayoutDirection {
    #[default]
    LeftToRight,
    RightToLeft,
    TopToBottom,
    BottomToTop,
}

impl LayoutDirection {
    fn is_horizontal(self) -> bool {
        matches!(self, LayoutDirection::LeftToRight | LayoutDirection::RightToLeft)
    }
}

struct LayoutNode {
    id: Uuid,
    width: f64,
    height: f64,
}

/// Computes a new top-left position for every table in the document.
///
/// Self-referencing relationships and duplicate edges between the same
/// table pair are ignored for ranking purposes; disconnected components
/// are placed side by side. Tables keep every field except `position`.
pub fn compute_positions(
    doc: &SchemaDocument,
    direction: LayoutDirection,
) -> Vec<(Uuid, Point)> {
    if doc.tables.is_empty() {
        return Vec::new();
    }

    let horizontal = direction.is_horizontal();

    let mut graph: StableGraph<LayoutNode, ()> = StableGraph::new();
    let mut index_of: HashMap<Uuid, NodeIndex> = HashMap::new();
    for table in &doc.tables {
        let idx = graph.add_node(LayoutNode {
            id: table.id,
            width: table.width,
            height: table.height,
        });
        index_of.insert(table.id, idx);
    }

    let mut seen = HashSet::new();
    for rel in &doc.relationships {
        if let (Some(&from), Some(&to)) =
            (index_of.get(&rel.from_table), index_of.get(&rel.to_table))
            && from != to
            && seen.insert((from, to))
        {
            graph.add_edge(from, to, ());
        }
    }

    // The algorithm spaces layers along y; feed swapped extents for the
    // horizontal directions so layer spacing ends up on the x axis.
    let vertices: Vec<(u32, (f64, f64))> = graph
        .node_indices()
        .map(|idx| {
            let node = &graph[idx];
            let size = if horizontal {
                (node.height, node.width)
            } else {
                (node.width, node.height)
            };
            (idx.index() as u32, size)
        })
        .collect();

    let edges: Vec<(u32, u32)> = graph
        .edge_indices()
        .filter_map(|e| {
            let (a, b) = graph.edge_endpoints(e)?;
            Some((a.index() as u32, b.index() as u32))
        })
        .collect();

    let config = rust_sugiyama::configure::Config {
        vertex_spacing: NODE_SEPARATION,
        ..Default::default()
    };

    let subgraphs = rust_sugiyama::from_vertices_and_edges(&vertices, &edges, &config);

    // Each connected component comes back in its own coordinate frame;
    // shift them apart along the in-layer axis before direction mapping.
    let mut centers: HashMap<usize, (f64, f64)> = HashMap::new();
    let mut component_offset = 0.0;
    for (layout, width, _height) in &subgraphs {
        for &(idx, (x, y)) in layout {
            centers.insert(idx, (x + component_offset, y));
        }
        component_offset += width + NODE_SEPARATION;
    }

    let mut positions: Vec<(Uuid, Point)> = Vec::with_capacity(doc.tables.len());
    for idx in graph.node_indices() {
        let node = &graph[idx];
        let Some(&(ax, ay)) = centers.get(&idx.index()) else {
            continue;
        };
        let (cx, cy) = match direction {
            LayoutDirection::TopToBottom => (ax, ay),
            LayoutDirection::BottomToTop => (ax, -ay),
            LayoutDirection::LeftToRight => (ay, ax),
            LayoutDirection::RightToLeft => (-ay, ax),
        };
        // The algorithm reports node centers; the document stores top-left.
        positions.push((
            node.id,
            Point::new(cx - node.width / 2.0, cy - node.height / 2.0),
        ));
    }

    // Normalize the drawing into the margin origin.
    let min_x = positions.iter().map(|(_, p)| p.x).fold(f64::INFINITY, f64::min);
    let min_y = positions.iter().map(|(_, p)| p.y).fold(f64::INFINITY, f64::min);
    for (_, p) in &mut positions {
        p.x += LAYOUT_MARGIN - min_x;
        p.y += LAYOUT_MARGIN - min_y;
    }

    positions
}
