//! Demo binary: drives the editing engine through a short session and
//! prints the resulting document as JSON.

use schemaforge::core::{
    Column, Command, LayoutDirection, Relationship, SchemaDocument, SchemaError, SchemaStore,
    Table,
};
use tracing::info;

fn demo_document() -> SchemaDocument {
    let users = Table::new("users")
        .with_position(100.0, 100.0)
        .add_column(Column::new("id", "INTEGER").primary_key())
        .add_column(Column::new("email", "VARCHAR(255)"))
        .add_column(Column::new("created_at", "TIMESTAMP"));
    let posts = Table::new("posts")
        .with_position(500.0, 100.0)
        .add_column(Column::new("id", "INTEGER").primary_key())
        .add_column(Column::new("user_id", "INTEGER"))
        .add_column(Column::new("title", "VARCHAR(255)"));
    let comments = Table::new("comments")
        .with_position(900.0, 100.0)
        .add_column(Column::new("id", "INTEGER").primary_key())
        .add_column(Column::new("post_id", "INTEGER"))
        .add_column(Column::new("author_id", "INTEGER"));

    let relationships = vec![
        Relationship::new(
            users.id,
            users.columns[0].id,
            posts.id,
            posts.columns[1].id,
        ),
        Relationship::new(
            posts.id,
            posts.columns[0].id,
            comments.id,
            comments.columns[1].id,
        ),
        Relationship::new(
            users.id,
            users.columns[0].id,
            comments.id,
            comments.columns[2].id,
        ),
    ];

    SchemaDocument {
        tables: vec![users, posts, comments],
        relationships,
        bookmarks: vec![],
    }
}

fn main() -> Result<(), SchemaError> {
    tracing_subscriber::fmt::init();

    let mut store = SchemaStore::with_document(demo_document());
    info!(tables = store.document().tables.len(), "demo schema loaded");

    // Duplicate the users table, then merge the whole demo in again to
    // show identifier remapping keeping the document consistent.
    let users_id = store.document().tables[0].id;
    store.dispatch(Command::CopyTable { id: users_id });
    store.dispatch(Command::PasteTable);
    store.dispatch(Command::Append {
        fragment: demo_document(),
    });

    store.dispatch(Command::AutoLayout {
        direction: LayoutDirection::LeftToRight,
    });
    info!(
        tables = store.document().tables.len(),
        relationships = store.document().relationships.len(),
        undo_depth = store.history().past_len(),
        "session finished"
    );

    println!("{}", store.document().to_json_pretty()?);
    Ok(())
}
