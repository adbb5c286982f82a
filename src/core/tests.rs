#[cfg(test)]
mod tests {
    use crate::core::{
        Column, Command, LayoutDirection, Relationship, SchemaDocument, SchemaStore, Table,
        TableUpdate, MAX_HISTORY,
    };
    use crate::core::geometry::Point;
    use uuid::Uuid;

    /// Store seeded with two linked tables: `a` with an `id` primary key,
    /// `b` with `id` and `a_id`, and a relationship `a.id -> b.a_id`.
    fn linked_store() -> (SchemaStore, Uuid, Uuid, Uuid) {
        let a = Table::new("a")
            .with_position(100.0, 100.0)
            .add_column(Column::new("id", "INTEGER").primary_key());
        let b = Table::new("b")
            .with_position(400.0, 100.0)
            .add_column(Column::new("id", "INTEGER").primary_key())
            .add_column(Column::new("a_id", "INTEGER"));
        let rel = Relationship::new(a.id, a.columns[0].id, b.id, b.columns[1].id);
        let (a_id, b_id, rel_id) = (a.id, b.id, rel.id);

        let store = SchemaStore::with_document(SchemaDocument {
            tables: vec![a, b],
            relationships: vec![rel],
            bookmarks: vec![],
        });
        (store, a_id, b_id, rel_id)
    }

    #[test]
    fn test_add_table_seeds_primary_key_and_history() {
        let mut store = SchemaStore::new();
        store.dispatch(Command::AddTable { position: None });

        let doc = store.document();
        assert_eq!(doc.tables.len(), 1);
        assert_eq!(doc.tables[0].position, Point::new(250.0, 250.0));
        assert_eq!(doc.tables[0].columns.len(), 1);
        assert!(doc.tables[0].columns[0].is_pk);
        assert_eq!(store.history().past_len(), 1);
    }

    #[test]
    fn test_rename_is_one_history_entry() {
        let (mut store, a, _, _) = linked_store();
        store.dispatch(Command::UpdateTable {
            id: a,
            update: TableUpdate {
                name: Some("accounts".into()),
                ..Default::default()
            },
        });

        assert_eq!(store.document().table(a).unwrap().name, "accounts");
        assert_eq!(store.history().past_len(), 1);
    }

    #[test]
    fn test_commands_on_unknown_ids_are_silent_no_ops() {
        let (mut store, _, _, _) = linked_store();
        let before = store.snapshot();
        let ghost = Uuid::new_v4();

        store.dispatch(Command::DeleteTable { id: ghost });
        store.dispatch(Command::UpdateTable {
            id: ghost,
            update: TableUpdate::default(),
        });
        store.dispatch(Command::MoveTable {
            id: ghost,
            position: Point::new(1.0, 1.0),
        });
        store.dispatch(Command::DeleteRelationship { id: ghost });
        store.dispatch(Command::CopyTable { id: ghost });

        assert_eq!(store.snapshot(), before);
        assert_eq!(store.history().past_len(), 0);
    }

    #[test]
    fn test_delete_table_cascades_then_undo_restores_exactly() {
        let (mut store, a, b, _) = linked_store();
        let before_delete = store.snapshot();

        store.dispatch(Command::DeleteTable { id: a });
        assert!(store.document().table(a).is_none());
        assert!(store.document().table(b).is_some());
        assert!(store.document().relationships.is_empty());
        assert!(store.document().is_consistent());

        store.dispatch(Command::Undo);
        assert_eq!(store.snapshot(), before_delete);
    }

    #[test]
    fn test_delete_table_keeps_unrelated_relationships() {
        let (mut store, a, b, _) = linked_store();
        // Third table related only to b.
        let c = Table::new("c")
            .add_column(Column::new("id", "INTEGER").primary_key())
            .add_column(Column::new("b_id", "INTEGER"));
        let b_pk = store.document().table(b).unwrap().columns[0].id;
        let keep = Relationship::new(b, b_pk, c.id, c.columns[1].id);
        let keep_id = keep.id;
        store.dispatch(Command::Import {
            document: SchemaDocument {
                tables: {
                    let mut t = store.document().tables.clone();
                    t.push(c);
                    t
                },
                relationships: {
                    let mut r = store.document().relationships.clone();
                    r.push(keep);
                    r
                },
                bookmarks: vec![],
            },
        });

        store.dispatch(Command::DeleteTable { id: a });
        assert_eq!(store.document().relationships.len(), 1);
        assert_eq!(store.document().relationships[0].id, keep_id);
    }

    #[test]
    fn test_delete_column_cascades_relationships() {
        let (mut store, _, b, _) = linked_store();
        let a_id_col = store.document().table(b).unwrap().columns[1].id;

        store.dispatch(Command::DeleteColumn {
            table_id: b,
            column_id: a_id_col,
        });

        assert!(store.document().relationships.is_empty());
        assert!(store.document().is_consistent());
    }

    #[test]
    fn test_add_relationship_with_unresolvable_endpoint_is_refused() {
        let (mut store, a, _, _) = linked_store();
        let a_pk = store.document().table(a).unwrap().columns[0].id;
        let before = store.snapshot();

        store.dispatch(Command::AddRelationship {
            relationship: Relationship::new(a, a_pk, Uuid::new_v4(), Uuid::new_v4()),
        });

        assert_eq!(store.snapshot(), before);
        assert_eq!(store.history().past_len(), 0);
    }

    #[test]
    fn test_delete_bookmark_clears_membership_keeps_tables() {
        let (mut store, a, _, _) = linked_store();
        store.dispatch(Command::AddBookmark { at: None });
        let bookmark_id = store.document().bookmarks[0].id;
        store.dispatch(Command::AssignTableToBookmark {
            table_id: a,
            bookmark_id: Some(bookmark_id),
        });
        assert_eq!(
            store.document().table(a).unwrap().bookmark_id,
            Some(bookmark_id)
        );

        store.dispatch(Command::DeleteBookmark { id: bookmark_id });
        assert!(store.document().bookmarks.is_empty());
        assert_eq!(store.document().tables.len(), 2);
        assert_eq!(store.document().table(a).unwrap().bookmark_id, None);
        assert!(store.document().is_consistent());
    }

    #[test]
    fn test_assign_to_dead_bookmark_is_refused() {
        let (mut store, a, _, _) = linked_store();
        store.dispatch(Command::AssignTableToBookmark {
            table_id: a,
            bookmark_id: Some(Uuid::new_v4()),
        });
        assert_eq!(store.document().table(a).unwrap().bookmark_id, None);
        assert!(store.document().is_consistent());
    }

    #[test]
    fn test_undo_redo_exactness_over_command_sequence() {
        let (mut store, a, b, rel_id) = linked_store();
        let commands = vec![
            Command::AddTable {
                position: Some(Point::new(700.0, 100.0)),
            },
            Command::UpdateTable {
                id: a,
                update: TableUpdate {
                    name: Some("renamed".into()),
                    ..Default::default()
                },
            },
            Command::AddColumn { table_id: b },
            Command::DeleteRelationship { id: rel_id },
            Command::AddBookmark { at: None },
        ];

        let mut states = vec![store.snapshot()];
        for cmd in commands {
            store.dispatch(cmd);
            states.push(store.snapshot());
        }
        let n = states.len() - 1;

        for i in (0..n).rev() {
            store.dispatch(Command::Undo);
            assert_eq!(store.snapshot(), states[i], "undo mismatch at step {i}");
        }
        for (i, state) in states.iter().enumerate().skip(1) {
            store.dispatch(Command::Redo);
            assert_eq!(store.snapshot(), *state, "redo mismatch at step {i}");
        }
    }

    #[test]
    fn test_history_is_bounded_at_fifty() {
        let mut store = SchemaStore::new();
        for i in 0..(MAX_HISTORY + 20) {
            store.dispatch(Command::AddTable {
                position: Some(Point::new(i as f64, 0.0)),
            });
        }
        assert_eq!(store.history().past_len(), MAX_HISTORY);

        let mut undone = 0;
        while store.history().can_undo() {
            store.dispatch(Command::Undo);
            undone += 1;
        }
        assert_eq!(undone, MAX_HISTORY);
        // Only the most recent 50 pre-states were retained.
        assert_eq!(store.document().tables.len(), 20);
    }

    #[test]
    fn test_structural_command_after_undo_clears_redo() {
        let (mut store, a, _, _) = linked_store();
        store.dispatch(Command::DeleteTable { id: a });
        store.dispatch(Command::Undo);
        assert!(store.history().can_redo());

        store.dispatch(Command::AddTable { position: None });
        assert!(!store.history().can_redo());

        store.dispatch(Command::Redo);
        // Redo was invalidated: nothing changes.
        assert_eq!(store.document().tables.len(), 3);
    }

    #[test]
    fn test_copy_paste_duplicates_with_fresh_identity() {
        let (mut store, a, _, _) = linked_store();
        let original = store.document().table(a).unwrap().clone();

        store.dispatch(Command::CopyTable { id: a });
        assert_eq!(store.history().past_len(), 0, "copy must not touch history");

        store.dispatch(Command::PasteTable);
        let doc = store.document();
        assert_eq!(doc.tables.len(), 3);
        let pasted = doc.tables.last().unwrap();
        assert_ne!(pasted.id, original.id);
        assert_eq!(pasted.name, "a_copy");
        assert_eq!(pasted.position.x, original.position.x + 20.0);
        assert_eq!(pasted.position.y, original.position.y + 20.0);
        assert_eq!(pasted.bookmark_id, None);
        for (fresh, old) in pasted.columns.iter().zip(original.columns.iter()) {
            assert_ne!(fresh.id, old.id);
            assert_eq!(fresh.name, old.name);
        }
        assert_eq!(store.history().past_len(), 1);
    }

    #[test]
    fn test_paste_with_empty_clipboard_is_a_no_op() {
        let mut store = SchemaStore::new();
        store.dispatch(Command::PasteTable);
        assert!(store.document().tables.is_empty());
        assert_eq!(store.history().past_len(), 0);
    }

    #[test]
    fn test_clipboard_survives_undo() {
        let (mut store, a, _, _) = linked_store();
        store.dispatch(Command::CopyTable { id: a });
        store.dispatch(Command::DeleteTable { id: a });
        store.dispatch(Command::Undo);
        assert_eq!(store.clipboard().unwrap().id, a);
    }

    #[test]
    fn test_append_same_fragment_twice_yields_distinct_tables() {
        let mut store = SchemaStore::new();
        let fragment = SchemaDocument {
            tables: vec![Table::new("x")
                .with_position(0.0, 0.0)
                .add_column(Column::new("id", "INTEGER").primary_key())],
            ..Default::default()
        };

        store.dispatch(Command::Append {
            fragment: fragment.clone(),
        });
        store.dispatch(Command::Append { fragment });

        let doc = store.document();
        assert_eq!(doc.tables.len(), 2);
        assert_ne!(doc.tables[0].id, doc.tables[1].id);
        assert!(doc.tables.iter().all(|t| t.name == "x"));
        assert!(doc.is_consistent());
    }

    #[test]
    fn test_append_colliding_ids_never_reuse_existing_ones() {
        let (mut store, _, _, _) = linked_store();
        // Append the current document to itself: every id collides.
        let fragment = store.snapshot();
        store.dispatch(Command::Append { fragment });

        let doc = store.document();
        assert_eq!(doc.tables.len(), 4);
        assert_eq!(doc.relationships.len(), 2);
        let mut ids: Vec<Uuid> = doc.tables.iter().map(|t| t.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4, "table ids must stay unique after append");
        assert!(doc.is_consistent());
    }

    #[test]
    fn test_import_replaces_document_wholesale() {
        let (mut store, _, _, _) = linked_store();
        let incoming =
            SchemaDocument::from_json(r#"{"tables": [], "relationships": []}"#).unwrap();

        store.dispatch(Command::Import { document: incoming });
        assert!(store.document().tables.is_empty());
        assert!(store.document().bookmarks.is_empty());

        store.dispatch(Command::Undo);
        assert_eq!(store.document().tables.len(), 2);
    }

    #[test]
    fn test_auto_layout_is_historied_and_touches_positions_only() {
        let (mut store, a, _, _) = linked_store();
        let before = store.snapshot();

        store.dispatch(Command::AutoLayout {
            direction: LayoutDirection::LeftToRight,
        });

        assert_eq!(store.history().past_len(), 1);
        let doc = store.document();
        assert_eq!(doc.tables.len(), before.tables.len());
        assert_eq!(doc.relationships, before.relationships);
        for (now, was) in doc.tables.iter().zip(before.tables.iter()) {
            assert_eq!(now.id, was.id);
            assert_eq!(now.columns, was.columns);
            assert_eq!(now.width, was.width);
        }

        store.dispatch(Command::Undo);
        assert_eq!(
            store.document().table(a).unwrap().position,
            Point::new(100.0, 100.0)
        );
    }

    #[test]
    fn test_move_commands_bypass_history() {
        let (mut store, a, _, _) = linked_store();
        store.dispatch(Command::MoveTable {
            id: a,
            position: Point::new(160.0, 220.0),
        });
        store.dispatch(Command::ResizeTable {
            id: a,
            width: 300.0,
            height: 340.0,
        });
        assert_eq!(store.history().past_len(), 0);
        assert_eq!(
            store.document().table(a).unwrap().position,
            Point::new(160.0, 220.0)
        );
    }

    #[test]
    fn test_explicit_push_then_undo_restores_pre_gesture_state() {
        let (mut store, a, _, _) = linked_store();
        let pre_drag = store.snapshot();

        store.dispatch(Command::MoveTable {
            id: a,
            position: Point::new(500.0, 500.0),
        });
        store.dispatch(Command::PushHistory { snapshot: pre_drag.clone() });

        store.dispatch(Command::Undo);
        assert_eq!(store.snapshot(), pre_drag);
    }

    #[test]
    fn test_move_bookmark_translates_members_as_a_group() {
        let (mut store, a, b, _) = linked_store();
        store.dispatch(Command::AddBookmark {
            at: Some(Point::new(0.0, 0.0)),
        });
        let bookmark_id = store.document().bookmarks[0].id;
        store.dispatch(Command::AssignTableToBookmark {
            table_id: a,
            bookmark_id: Some(bookmark_id),
        });

        store.dispatch(Command::MoveBookmark {
            id: bookmark_id,
            dx: 30.0,
            dy: -10.0,
        });

        let doc = store.document();
        assert_eq!(doc.bookmarks[0].x, 30.0);
        assert_eq!(doc.bookmarks[0].y, -10.0);
        assert_eq!(doc.table(a).unwrap().position, Point::new(130.0, 90.0));
        // Non-member untouched.
        assert_eq!(doc.table(b).unwrap().position, Point::new(400.0, 100.0));
    }

    #[test]
    fn test_referential_integrity_holds_across_a_workflow() {
        let (mut store, a, b, rel_id) = linked_store();
        let a_pk = store.document().table(a).unwrap().columns[0].id;
        let b_pk = store.document().table(b).unwrap().columns[0].id;

        let commands = vec![
            Command::AddBookmark { at: None },
            Command::AddRelationship {
                relationship: Relationship::new(b, b_pk, a, a_pk),
            },
            Command::DeleteRelationship { id: rel_id },
            Command::CopyTable { id: b },
            Command::PasteTable,
            Command::DeleteColumn {
                table_id: b,
                column_id: b_pk,
            },
            Command::DeleteTable { id: a },
            Command::Undo,
            Command::Undo,
            Command::Redo,
            Command::AutoLayout {
                direction: LayoutDirection::TopToBottom,
            },
        ];

        for cmd in commands {
            let name = cmd.name();
            store.dispatch(cmd);
            assert!(
                store.document().is_consistent(),
                "integrity broken after {name}"
            );
        }
    }
}
