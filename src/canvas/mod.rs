//! View-facing canvas layer: interaction controller and edge routing.

pub mod controller;
pub mod router;

pub use controller::{CanvasController, HitTarget, Key, KeyInput};
pub use router::{
    column_anchor, relationship_emphasis, relationship_path, table_emphasis, AnchorSide,
    EdgeEmphasis, NodeEmphasis, RelationshipPath,
};
