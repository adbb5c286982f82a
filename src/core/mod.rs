//! Core editing engine: document model, command dispatch, bounded history,
//! merge normalization, and automatic layout.

pub mod command;
pub mod document;
pub mod error;
pub mod geometry;
pub mod history;
pub mod layout;
pub mod merge;
pub mod store;
#[cfg(test)]
mod tests;

pub use command::*;
pub use document::*;
pub use error::*;
pub use geometry::*;
pub use history::*;
pub use layout::*;
pub use merge::*;
pub use store::*;
