//! Schemaforge is the headless editing engine of an entity-relationship
//! schema editor.
//!
//! The [`core`] module holds the document model, the bounded undo/redo
//! history and the command-dispatching [`core::store::SchemaStore`] that
//! every mutation goes through, plus the import/append normalizer and the
//! layered auto-layout adapter. The [`canvas`] module builds on it with a
//! rendering-agnostic interaction controller and the bezier router used
//! to draw relationships.
//!
//! A minimal session:
//!
//! ```
//! use schemaforge::core::{Command, SchemaStore};
//!
//! let mut store = SchemaStore::new();
//! store.dispatch(Command::AddTable { position: None });
//! assert_eq!(store.document().tables.len(), 1);
//! store.dispatch(Command::Undo);
//! assert!(store.document().tables.is_empty());
//! ```

pub mod canvas;
pub mod core;
