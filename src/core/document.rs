//! The schema document: tables, relationships, and bookmarks.
//!
//! This is the unit of persistence, import, export, and history snapshots.
//! The JSON shape (camelCase keys, `type`/`isPk` on columns, `bookmarkId`
//! on tables) is the wire format exchanged with the persistence service and
//! with external schema producers, so the serde attributes here are part of
//! the public contract.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::error::SchemaError;
use crate::core::geometry::{Point, Rect};

/// Fallback table width when a document does not carry one.
pub const DEFAULT_TABLE_WIDTH: f64 = 240.0;

/// Fallback table height when a document does not carry one.
pub const DEFAULT_TABLE_HEIGHT: f64 = 300.0;

/// Column data type used when a new column is seeded.
pub const DEFAULT_COLUMN_TYPE: &str = "VARCHAR(255)";

fn default_table_width() -> f64 {
    DEFAULT_TABLE_WIDTH
}

fn default_table_height() -> f64 {
    DEFAULT_TABLE_HEIGHT
}

fn default_table_color() -> String {
    "#6366f1".to_string()
}

fn default_bookmark_color() -> String {
    "rgba(255, 255, 255, 0.05)".to_string()
}

/// A single table column.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    #[serde(default)]
    pub is_pk: bool,
    #[serde(default)]
    pub comment: String,
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            data_type: data_type.into(),
            is_pk: false,
            comment: String::new(),
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.is_pk = true;
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

/// A table node on the canvas. `position` is the top-left corner in
/// world-space units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub comment: String,
    pub position: Point,
    #[serde(default = "default_table_width")]
    pub width: f64,
    #[serde(default = "default_table_height")]
    pub height: f64,
    #[serde(default = "default_table_color")]
    pub color: String,
    #[serde(default)]
    pub bookmark_id: Option<Uuid>,
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            comment: String::new(),
            position: Point::ZERO,
            width: DEFAULT_TABLE_WIDTH,
            height: DEFAULT_TABLE_HEIGHT,
            color: default_table_color(),
            bookmark_id: None,
            columns: Vec::new(),
        }
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = Point::new(x, y);
        self
    }

    pub fn add_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn column(&self, column_id: Uuid) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    pub fn column_mut(&mut self, column_id: Uuid) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.id == column_id)
    }

    /// Index of a column within the table, used for connector anchor math.
    pub fn column_index(&self, column_id: Uuid) -> Option<usize> {
        self.columns.iter().position(|c| c.id == column_id)
    }
}

/// A directed foreign-key style link between two columns of two tables.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub id: Uuid,
    pub from_table: Uuid,
    pub from_col: Uuid,
    pub to_table: Uuid,
    pub to_col: Uuid,
}

impl Relationship {
    pub fn new(from_table: Uuid, from_col: Uuid, to_table: Uuid, to_col: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            from_table,
            from_col,
            to_table,
            to_col,
        }
    }

    /// Whether the relationship touches the given table on either end.
    pub fn touches_table(&self, table_id: Uuid) -> bool {
        self.from_table == table_id || self.to_table == table_id
    }

    /// Whether the relationship touches the given column on either end.
    pub fn touches_column(&self, column_id: Uuid) -> bool {
        self.from_col == column_id || self.to_col == column_id
    }
}

/// A visual grouping rectangle. Tables become members through their
/// `bookmark_id`, re-evaluated on drag completion rather than per render.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: Uuid,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_bookmark_color")]
    pub color: String,
}

impl Bookmark {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            x: 100.0,
            y: 100.0,
            width: 400.0,
            height: 300.0,
            color: default_bookmark_color(),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// The full schema value. A snapshot for history purposes is simply a
/// value copy of this struct; clipboard and history are never part of it.
///
/// On deserialization the `tables` list is required: a fragment without it
/// is malformed. `relationships` and `bookmarks` default to empty.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    pub tables: Vec<Table>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
    #[serde(default)]
    pub bookmarks: Vec<Bookmark>,
}

impl SchemaDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a schema document from JSON, rejecting malformed input before
    /// any of it can reach the store.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        serde_json::from_str(json).map_err(|e| SchemaError::MalformedFragment {
            reason: e.to_string(),
        })
    }

    pub fn to_json(&self) -> Result<String, SchemaError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, SchemaError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn table(&self, id: Uuid) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    pub fn table_mut(&mut self, id: Uuid) -> Option<&mut Table> {
        self.tables.iter_mut().find(|t| t.id == id)
    }

    pub fn bookmark(&self, id: Uuid) -> Option<&Bookmark> {
        self.bookmarks.iter().find(|b| b.id == id)
    }

    pub fn bookmark_mut(&mut self, id: Uuid) -> Option<&mut Bookmark> {
        self.bookmarks.iter_mut().find(|b| b.id == id)
    }

    pub fn relationship(&self, id: Uuid) -> Option<&Relationship> {
        self.relationships.iter().find(|r| r.id == id)
    }

    /// Whether all four endpoints of a relationship resolve to live ids.
    pub fn relationship_resolves(&self, rel: &Relationship) -> bool {
        let from_ok = self
            .table(rel.from_table)
            .is_some_and(|t| t.column(rel.from_col).is_some());
        let to_ok = self
            .table(rel.to_table)
            .is_some_and(|t| t.column(rel.to_col).is_some());
        from_ok && to_ok
    }

    /// Referential integrity check: every relationship resolves and every
    /// table's bookmark reference is live. Exposed so callers (and tests)
    /// can assert the invariant on any reachable state.
    pub fn is_consistent(&self) -> bool {
        self.relationships
            .iter()
            .all(|r| self.relationship_resolves(r))
            && self.tables.iter().all(|t| match t.bookmark_id {
                Some(id) => self.bookmark(id).is_some(),
                None => true,
            })
    }

    /// Drops every relationship whose endpoints no longer resolve. Used
    /// after any mutation that can orphan references.
    pub fn prune_dangling_relationships(&mut self) {
        let tables = &self.tables;
        self.relationships.retain(|r| {
            let from_ok = tables
                .iter()
                .find(|t| t.id == r.from_table)
                .is_some_and(|t| t.column(r.from_col).is_some());
            let to_ok = tables
                .iter()
                .find(|t| t.id == r.to_table)
                .is_some_and(|t| t.column(r.to_col).is_some());
            from_ok && to_ok
        });
    }
}
