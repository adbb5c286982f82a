//! Geometry for drawing relationships between tables.
//!
//! Relationships are rendered as cubic bezier curves anchored to column
//! rows. The router decides which side of each table the curve leaves
//! from and how far the control points flare out, and it ranks edges and
//! nodes for the hover/selection emphasis pass.

use uuid::Uuid;

use crate::core::document::{Relationship, SchemaDocument, Table};
use crate::core::geometry::Point;

/// Height of a table's title bar in world units.
pub const TABLE_HEADER_HEIGHT: f64 = 45.0;
/// Height of one column row in world units.
pub const COLUMN_ROW_HEIGHT: f64 = 34.0;
/// Control points never flare out less than this, so short edges still curve.
pub const MIN_CONTROL_OFFSET: f64 = 50.0;

/// Which edge of the table a connector sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnchorSide {
    Left,
    Right,
}

/// World-space anchor point for a column's connector on the given side.
///
/// Returns `None` if the column is not part of the table.
pub fn column_anchor(table: &Table, column_id: Uuid, side: AnchorSide) -> Option<Point> {
    let idx = table.column_index(column_id)?;
    let x = match side {
        AnchorSide::Left => table.position.x,
        AnchorSide::Right => table.position.x + table.width,
    };
    let y = table.position.y
        + TABLE_HEADER_HEIGHT
        + idx as f64 * COLUMN_ROW_HEIGHT
        + COLUMN_ROW_HEIGHT / 2.0;
    Some(Point::new(x, y))
}

/// A routed cubic bezier from one column anchor to another.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RelationshipPath {
    pub from: Point,
    pub c1: Point,
    pub c2: Point,
    pub to: Point,
}

impl RelationshipPath {
    /// SVG path data for this curve.
    pub fn to_svg(&self) -> String {
        format!(
            "M {} {} C {} {}, {} {}, {} {}",
            self.from.x, self.from.y, self.c1.x, self.c1.y, self.c2.x, self.c2.y, self.to.x,
            self.to.y
        )
    }
}

/// Route a relationship through the current table positions.
///
/// Each endpoint leaves from the table edge facing the other table, and
/// the control points extend horizontally past that edge so the curve
/// enters and exits with a horizontal tangent. Returns `None` when either
/// endpoint no longer resolves.
pub fn relationship_path(doc: &SchemaDocument, rel: &Relationship) -> Option<RelationshipPath> {
    let from_table = doc.table(rel.from_table)?;
    let to_table = doc.table(rel.to_table)?;

    let from_center = from_table.position.x + from_table.width / 2.0;
    let to_center = to_table.position.x + to_table.width / 2.0;
    let (from_side, to_side) = if from_center <= to_center {
        (AnchorSide::Right, AnchorSide::Left)
    } else {
        (AnchorSide::Left, AnchorSide::Right)
    };

    let from = column_anchor(from_table, rel.from_col, from_side)?;
    let to = column_anchor(to_table, rel.to_col, to_side)?;

    let offset = ((to.x - from.x).abs() * 0.5).max(MIN_CONTROL_OFFSET);
    let from_dir = match from_side {
        AnchorSide::Right => 1.0,
        AnchorSide::Left => -1.0,
    };
    let to_dir = match to_side {
        AnchorSide::Right => 1.0,
        AnchorSide::Left => -1.0,
    };

    Some(RelationshipPath {
        from,
        c1: Point::new(from.x + from_dir * offset, from.y),
        c2: Point::new(to.x + to_dir * offset, to.y),
        to,
    })
}

/// Visual weight of a relationship edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeEmphasis {
    Selected,
    Highlighted,
    Normal,
    Dimmed,
}

/// Visual weight of a table node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeEmphasis {
    Hovered,
    Related,
    Normal,
    Dimmed,
}

/// Rank an edge against the current hover and selection state.
///
/// Selection wins over hover dimming: a selected edge stays selected even
/// while an unrelated table is hovered.
pub fn relationship_emphasis(
    rel: &Relationship,
    hovered_table: Option<Uuid>,
    selected_relationship: Option<Uuid>,
) -> EdgeEmphasis {
    if selected_relationship == Some(rel.id) {
        return EdgeEmphasis::Selected;
    }
    match hovered_table {
        Some(hovered) if rel.touches_table(hovered) => EdgeEmphasis::Highlighted,
        Some(_) => EdgeEmphasis::Dimmed,
        None => EdgeEmphasis::Normal,
    }
}

/// Rank a table against the current hover state.
///
/// The hovered table and every table it shares a relationship with stay
/// prominent, everything else fades back.
pub fn table_emphasis(doc: &SchemaDocument, table_id: Uuid, hovered_table: Option<Uuid>) -> NodeEmphasis {
    let Some(hovered) = hovered_table else {
        return NodeEmphasis::Normal;
    };
    if hovered == table_id {
        return NodeEmphasis::Hovered;
    }
    let related = doc.relationships.iter().any(|rel| {
        rel.touches_table(hovered) && rel.touches_table(table_id)
    });
    if related {
        NodeEmphasis::Related
    } else {
        NodeEmphasis::Dimmed
    }
}
