//! Theme system providing colors, typography, and layout dimensions.
//!
//! Themes are JSON documents with one or more variants (e.g., dark and
//! light modes) sharing a consistent set of semantic color tokens and size
//! scales. The active theme is stored as a gpui global.

mod schema;
pub use schema::*;

mod deserializers;

mod ext;
pub use ext::*;

mod kinds;
pub use kinds::*;
