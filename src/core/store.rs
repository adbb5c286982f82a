//! The schema store: single dispatch entry point over the document.
//!
//! Every mutation of the document flows through [`SchemaStore::dispatch`],
//! which pattern-matches the command, enforces referential integrity, and
//! applies the history policy of the command's category. Commands that
//! name a nonexistent id are silent no-ops — the UI is the only source of
//! ids and is allowed to race slightly stale state — so nothing in here
//! returns an error.

use tracing::{debug, info};
use uuid::Uuid;

use crate::core::command::{BookmarkUpdate, ColumnUpdate, Command, TableUpdate};
use crate::core::document::{
    Bookmark, Column, Relationship, SchemaDocument, Table, DEFAULT_COLUMN_TYPE,
};
use crate::core::geometry::Point;
use crate::core::history::History;
use crate::core::layout::{self, LayoutDirection};
use crate::core::merge;

/// Offset applied to a pasted table relative to the clipboard original.
pub const PASTE_OFFSET: f64 = 20.0;

/// Default spawn position for a table created without an explicit point.
const NEW_TABLE_POSITION: Point = Point { x: 250.0, y: 250.0 };

/// Owns the authoritative document, its bounded history, and the
/// single-slot clipboard. Constructed once and passed by reference to the
/// controller and the render layer.
#[derive(Debug, Default)]
pub struct SchemaStore {
    document: SchemaDocument,
    history: History,
    clipboard: Option<Table>,
}

impl SchemaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: SchemaDocument) -> Self {
        Self {
            document,
            history: History::new(),
            clipboard: None,
        }
    }

    pub fn document(&self) -> &SchemaDocument {
        &self.document
    }

    /// Value copy of the current document, for history capture and saving.
    pub fn snapshot(&self) -> SchemaDocument {
        self.document.clone()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn clipboard(&self) -> Option<&Table> {
        self.clipboard.as_ref()
    }

    /// Applies one command. All document mutations funnel through here.
    pub fn dispatch(&mut self, command: Command) {
        match command {
            Command::AddTable { position } => self.add_table(position),
            Command::UpdateTable { id, update } => self.update_table(id, update),
            Command::DeleteTable { id } => self.delete_table(id),
            Command::AddColumn { table_id } => self.add_column(table_id),
            Command::UpdateColumn {
                table_id,
                column_id,
                update,
            } => self.update_column(table_id, column_id, update),
            Command::DeleteColumn {
                table_id,
                column_id,
            } => self.delete_column(table_id, column_id),
            Command::AddRelationship { relationship } => self.add_relationship(relationship),
            Command::DeleteRelationship { id } => self.delete_relationship(id),
            Command::AddBookmark { at } => self.add_bookmark(at),
            Command::UpdateBookmark { id, update } => self.update_bookmark(id, update),
            Command::DeleteBookmark { id } => self.delete_bookmark(id),
            Command::PasteTable => self.paste_table(),
            Command::AutoLayout { direction } => self.auto_layout(direction),
            Command::Import { document } => self.import(document),
            Command::Append { fragment } => self.append(fragment),
            Command::MoveTable { id, position } => self.move_table(id, position),
            Command::ResizeTable { id, width, height } => self.resize_table(id, width, height),
            Command::MoveBookmark { id, dx, dy } => self.move_bookmark(id, dx, dy),
            Command::ResizeBookmark { id, width, height } => {
                self.resize_bookmark(id, width, height)
            }
            Command::AssignTableToBookmark {
                table_id,
                bookmark_id,
            } => self.assign_table_to_bookmark(table_id, bookmark_id),
            Command::PushHistory { snapshot } => self.history.push(snapshot),
            Command::Undo => {
                self.history.undo(&mut self.document);
            }
            Command::Redo => {
                self.history.redo(&mut self.document);
            }
            Command::CopyTable { id } => self.copy_table(id),
        }
    }

    /// Pushes the current document as the pre-mutation snapshot.
    fn push_history(&mut self) {
        self.history.push(self.document.clone());
    }

    fn noop(&self, command: &str, id: Uuid) {
        debug!(%id, command, "command targeted a nonexistent id, ignoring");
    }

    // === Structural commands ===

    fn add_table(&mut self, position: Option<Point>) {
        self.push_history();
        let at = position.unwrap_or(NEW_TABLE_POSITION);
        let table = Table::new("new_table")
            .with_position(at.x, at.y)
            .add_column(Column::new("id", DEFAULT_COLUMN_TYPE).primary_key());
        self.document.tables.push(table);
    }

    fn update_table(&mut self, id: Uuid, update: TableUpdate) {
        if self.document.table(id).is_none() {
            return self.noop("update_table", id);
        }
        self.push_history();
        if let Some(table) = self.document.table_mut(id) {
            if let Some(name) = update.name {
                table.name = name;
            }
            if let Some(comment) = update.comment {
                table.comment = comment;
            }
            if let Some(color) = update.color {
                table.color = color;
            }
        }
    }

    fn delete_table(&mut self, id: Uuid) {
        if self.document.table(id).is_none() {
            return self.noop("delete_table", id);
        }
        self.push_history();
        self.document.tables.retain(|t| t.id != id);
        // Cascade: a relationship may not outlive either endpoint table.
        self.document
            .relationships
            .retain(|r| !r.touches_table(id));
    }

    fn add_column(&mut self, table_id: Uuid) {
        if self.document.table(table_id).is_none() {
            return self.noop("add_column", table_id);
        }
        self.push_history();
        if let Some(table) = self.document.table_mut(table_id) {
            table.columns.push(Column::new("new_col", DEFAULT_COLUMN_TYPE));
        }
    }

    fn update_column(&mut self, table_id: Uuid, column_id: Uuid, update: ColumnUpdate) {
        let exists = self
            .document
            .table(table_id)
            .is_some_and(|t| t.column(column_id).is_some());
        if !exists {
            return self.noop("update_column", column_id);
        }
        self.push_history();
        if let Some(column) = self
            .document
            .table_mut(table_id)
            .and_then(|t| t.column_mut(column_id))
        {
            if let Some(name) = update.name {
                column.name = name;
            }
            if let Some(data_type) = update.data_type {
                column.data_type = data_type;
            }
            if let Some(is_pk) = update.is_pk {
                column.is_pk = is_pk;
            }
            if let Some(comment) = update.comment {
                column.comment = comment;
            }
        }
    }

    fn delete_column(&mut self, table_id: Uuid, column_id: Uuid) {
        let exists = self
            .document
            .table(table_id)
            .is_some_and(|t| t.column(column_id).is_some());
        if !exists {
            return self.noop("delete_column", column_id);
        }
        self.push_history();
        if let Some(table) = self.document.table_mut(table_id) {
            table.columns.retain(|c| c.id != column_id);
        }
        // Cascade: relationships anchored to the removed column go with it.
        self.document
            .relationships
            .retain(|r| !r.touches_column(column_id));
    }

    fn add_relationship(&mut self, relationship: Relationship) {
        if !self.document.relationship_resolves(&relationship) {
            return self.noop("add_relationship", relationship.id);
        }
        self.push_history();
        self.document.relationships.push(relationship);
    }

    fn delete_relationship(&mut self, id: Uuid) {
        if self.document.relationship(id).is_none() {
            return self.noop("delete_relationship", id);
        }
        self.push_history();
        self.document.relationships.retain(|r| r.id != id);
    }

    fn add_bookmark(&mut self, at: Option<Point>) {
        self.push_history();
        let mut bookmark = Bookmark::new("new_bookmark");
        if let Some(p) = at {
            bookmark.x = p.x;
            bookmark.y = p.y;
        }
        self.document.bookmarks.push(bookmark);
    }

    fn update_bookmark(&mut self, id: Uuid, update: BookmarkUpdate) {
        if self.document.bookmark(id).is_none() {
            return self.noop("update_bookmark", id);
        }
        self.push_history();
        if let Some(bookmark) = self.document.bookmark_mut(id) {
            if let Some(name) = update.name {
                bookmark.name = name;
            }
            if let Some(color) = update.color {
                bookmark.color = color;
            }
        }
    }

    fn delete_bookmark(&mut self, id: Uuid) {
        if self.document.bookmark(id).is_none() {
            return self.noop("delete_bookmark", id);
        }
        self.push_history();
        self.document.bookmarks.retain(|b| b.id != id);
        // Members survive, membership does not.
        for table in &mut self.document.tables {
            if table.bookmark_id == Some(id) {
                table.bookmark_id = None;
            }
        }
    }

    fn paste_table(&mut self) {
        let Some(original) = self.clipboard.clone() else {
            debug!("paste with empty clipboard, ignoring");
            return;
        };
        self.push_history();
        let mut pasted = original;
        pasted.id = Uuid::new_v4();
        pasted.name.push_str("_copy");
        pasted.position.x += PASTE_OFFSET;
        pasted.position.y += PASTE_OFFSET;
        pasted.bookmark_id = None;
        for column in &mut pasted.columns {
            column.id = Uuid::new_v4();
        }
        self.document.tables.push(pasted);
    }

    fn auto_layout(&mut self, direction: LayoutDirection) {
        if self.document.tables.is_empty() {
            debug!("auto layout on empty document, ignoring");
            return;
        }
        self.push_history();
        let positions = layout::compute_positions(&self.document, direction);
        for (id, position) in positions {
            if let Some(table) = self.document.table_mut(id) {
                table.position = position;
            }
        }
        info!(%direction, tables = self.document.tables.len(), "auto layout applied");
    }

    fn import(&mut self, document: SchemaDocument) {
        self.push_history();
        info!(
            tables = document.tables.len(),
            relationships = document.relationships.len(),
            "importing document"
        );
        self.document = document;
    }

    fn append(&mut self, fragment: SchemaDocument) {
        self.push_history();
        let normalized = merge::normalize_fragment(&fragment);
        info!(
            tables = normalized.tables.len(),
            relationships = normalized.relationships.len(),
            "appending normalized fragment"
        );
        self.document.tables.extend(normalized.tables);
        self.document.relationships.extend(normalized.relationships);
    }

    // === Continuous commands (no history of their own) ===

    fn move_table(&mut self, id: Uuid, position: Point) {
        if let Some(table) = self.document.table_mut(id) {
            table.position = position;
        } else {
            self.noop("move_table", id);
        }
    }

    fn resize_table(&mut self, id: Uuid, width: f64, height: f64) {
        if let Some(table) = self.document.table_mut(id) {
            table.width = width;
            table.height = height;
        } else {
            self.noop("resize_table", id);
        }
    }

    /// Moves the bookmark and every member table by the same delta.
    fn move_bookmark(&mut self, id: Uuid, dx: f64, dy: f64) {
        if self.document.bookmark(id).is_none() {
            return self.noop("move_bookmark", id);
        }
        if let Some(bookmark) = self.document.bookmark_mut(id) {
            bookmark.x += dx;
            bookmark.y += dy;
        }
        for table in &mut self.document.tables {
            if table.bookmark_id == Some(id) {
                table.position.x += dx;
                table.position.y += dy;
            }
        }
    }

    fn resize_bookmark(&mut self, id: Uuid, width: f64, height: f64) {
        if let Some(bookmark) = self.document.bookmark_mut(id) {
            bookmark.width = width;
            bookmark.height = height;
        } else {
            self.noop("resize_bookmark", id);
        }
    }

    fn assign_table_to_bookmark(&mut self, table_id: Uuid, bookmark_id: Option<Uuid>) {
        if self.document.table(table_id).is_none() {
            return self.noop("assign_table_to_bookmark", table_id);
        }
        // A dead target would break the membership invariant.
        if let Some(id) = bookmark_id
            && self.document.bookmark(id).is_none()
        {
            return self.noop("assign_table_to_bookmark", id);
        }
        if let Some(table) = self.document.table_mut(table_id) {
            table.bookmark_id = bookmark_id;
        }
    }

    // === Clipboard ===

    fn copy_table(&mut self, id: Uuid) {
        match self.document.table(id) {
            Some(table) => self.clipboard = Some(table.clone()),
            None => self.noop("copy_table", id),
        }
    }
}
