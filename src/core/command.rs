//! The command vocabulary the store dispatches over.
//!
//! A single tagged enum, pattern-matched by the store, keeps every document
//! mutation serialized through one entry point. The history behaviour of a
//! command is a property of its variant, classified by
//! [`Command::history_policy`]: structural commands snapshot the document
//! before mutating, continuous (pointer-driven) commands never touch
//! history themselves, and the controller closes a continuous gesture with
//! an explicit [`Command::PushHistory`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::document::{Relationship, SchemaDocument};
use crate::core::geometry::Point;
use crate::core::layout::LayoutDirection;

/// Partial update for a table's simple scalar fields. `None` fields are
/// left untouched. Geometry changes go through the continuous move/resize
/// commands instead.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TableUpdate {
    pub name: Option<String>,
    pub comment: Option<String>,
    pub color: Option<String>,
}

/// Partial update for a column.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnUpdate {
    pub name: Option<String>,
    pub data_type: Option<String>,
    pub is_pk: Option<bool>,
    pub comment: Option<String>,
}

/// Partial update for a bookmark's scalar fields.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BookmarkUpdate {
    pub name: Option<String>,
    pub color: Option<String>,
}

/// How a command interacts with the undo/redo stacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryPolicy {
    /// Pushes the pre-mutation snapshot and clears the redo stack (only
    /// when the command actually changes something).
    Structural,
    /// Applied directly; the owning gesture pushes one snapshot on
    /// completion via [`Command::PushHistory`].
    Continuous,
    /// Operates on history or clipboard itself.
    Meta,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Command {
    // Structural
    AddTable { position: Option<Point> },
    UpdateTable { id: Uuid, update: TableUpdate },
    DeleteTable { id: Uuid },
    AddColumn { table_id: Uuid },
    UpdateColumn { table_id: Uuid, column_id: Uuid, update: ColumnUpdate },
    DeleteColumn { table_id: Uuid, column_id: Uuid },
    AddRelationship { relationship: Relationship },
    DeleteRelationship { id: Uuid },
    AddBookmark { at: Option<Point> },
    UpdateBookmark { id: Uuid, update: BookmarkUpdate },
    DeleteBookmark { id: Uuid },
    PasteTable,
    AutoLayout { direction: LayoutDirection },
    Import { document: SchemaDocument },
    Append { fragment: SchemaDocument },

    // Continuous (pointer-driven, no history of their own)
    MoveTable { id: Uuid, position: Point },
    ResizeTable { id: Uuid, width: f64, height: f64 },
    MoveBookmark { id: Uuid, dx: f64, dy: f64 },
    ResizeBookmark { id: Uuid, width: f64, height: f64 },
    AssignTableToBookmark { table_id: Uuid, bookmark_id: Option<Uuid> },

    // Meta
    PushHistory { snapshot: SchemaDocument },
    Undo,
    Redo,
    CopyTable { id: Uuid },
}

impl Command {
    pub fn history_policy(&self) -> HistoryPolicy {
        match self {
            Command::AddTable { .. }
            | Command::UpdateTable { .. }
            | Command::DeleteTable { .. }
            | Command::AddColumn { .. }
            | Command::UpdateColumn { .. }
            | Command::DeleteColumn { .. }
            | Command::AddRelationship { .. }
            | Command::DeleteRelationship { .. }
            | Command::AddBookmark { .. }
            | Command::UpdateBookmark { .. }
            | Command::DeleteBookmark { .. }
            | Command::PasteTable
            | Command::AutoLayout { .. }
            | Command::Import { .. }
            | Command::Append { .. } => HistoryPolicy::Structural,

            Command::MoveTable { .. }
            | Command::ResizeTable { .. }
            | Command::MoveBookmark { .. }
            | Command::ResizeBookmark { .. }
            | Command::AssignTableToBookmark { .. } => HistoryPolicy::Continuous,

            Command::PushHistory { .. }
            | Command::Undo
            | Command::Redo
            | Command::CopyTable { .. } => HistoryPolicy::Meta,
        }
    }

    /// Short name for log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddTable { .. } => "add_table",
            Command::UpdateTable { .. } => "update_table",
            Command::DeleteTable { .. } => "delete_table",
            Command::AddColumn { .. } => "add_column",
            Command::UpdateColumn { .. } => "update_column",
            Command::DeleteColumn { .. } => "delete_column",
            Command::AddRelationship { .. } => "add_relationship",
            Command::DeleteRelationship { .. } => "delete_relationship",
            Command::AddBookmark { .. } => "add_bookmark",
            Command::UpdateBookmark { .. } => "update_bookmark",
            Command::DeleteBookmark { .. } => "delete_bookmark",
            Command::PasteTable => "paste_table",
            Command::AutoLayout { .. } => "auto_layout",
            Command::Import { .. } => "import",
            Command::Append { .. } => "append",
            Command::MoveTable { .. } => "move_table",
            Command::ResizeTable { .. } => "resize_table",
            Command::MoveBookmark { .. } => "move_bookmark",
            Command::ResizeBookmark { .. } => "resize_bookmark",
            Command::AssignTableToBookmark { .. } => "assign_table_to_bookmark",
            Command::PushHistory { .. } => "push_history",
            Command::Undo => "undo",
            Command::Redo => "redo",
            Command::CopyTable { .. } => "copy_table",
        }
    }
}
