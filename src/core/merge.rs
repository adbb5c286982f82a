//! Merge/import normalizer for externally produced schema fragments.
//!
//! Any fragment headed for an append — AI output, a reverse-engineered
//! schema, a copy of another document — gets fresh identifiers and
//! remapped relationships before it may touch the current document, so
//! colliding ids can never alias existing tables. Relationships whose
//! endpoints fall outside the fragment are dropped rather than spliced in
//! dangling. Whole-document import skips all of this and trusts the
//! fragment's own internal integrity.

use std::collections::HashMap;

use tracing::debug;
use uuid::Uuid;

use crate::core::document::{Relationship, SchemaDocument, Table};

/// Translation applied to every incoming table so appended content does
/// not land exactly on top of identical prior positions.
pub const APPEND_OFFSET: f64 = 20.0;

/// Rewrites a fragment into a collision-free one: fresh table and column
/// ids, positions shifted by [`APPEND_OFFSET`] on each axis, relationship
/// endpoints remapped through the fresh ids. Bookmarks are not carried by
/// appends. Relationships with unmappable endpoints are silently omitted.
pub fn normalize_fragment(fragment: &SchemaDocument) -> SchemaDocument {
    let mut table_ids: HashMap<Uuid, Uuid> = HashMap::new();
    let mut column_ids: HashMap<Uuid, Uuid> = HashMap::new();

    for table in &fragment.tables {
        table_ids.insert(table.id, Uuid::new_v4());
        for column in &table.columns {
            column_ids.insert(column.id, Uuid::new_v4());
        }
    }

    let tables: Vec<Table> = fragment
        .tables
        .iter()
        .map(|t| {
            let mut table = t.clone();
            table.id = table_ids[&t.id];
            table.position.x += APPEND_OFFSET;
            table.position.y += APPEND_OFFSET;
            // Membership cannot survive an append; the target document's
            // bookmarks are a different id space.
            table.bookmark_id = None;
            for column in &mut table.columns {
                column.id = column_ids[&column.id];
            }
            table
        })
        .collect();

    let relationships: Vec<Relationship> = fragment
        .relationships
        .iter()
        .filter_map(|r| {
            let remapped = Relationship {
                id: Uuid::new_v4(),
                from_table: *table_ids.get(&r.from_table)?,
                from_col: *column_ids.get(&r.from_col)?,
                to_table: *table_ids.get(&r.to_table)?,
                to_col: *column_ids.get(&r.to_col)?,
            };
            Some(remapped)
        })
        .collect();

    let dropped = fragment.relationships.len() - relationships.len();
    if dropped > 0 {
        debug!(dropped, "omitted relationships with unresolvable endpoints");
    }

    SchemaDocument {
        tables,
        relationships,
        bookmarks: Vec::new(),
    }
}
