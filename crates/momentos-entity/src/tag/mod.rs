//! Tag entities and name normalization.

pub mod model;

pub use model::{Tag, TagName, MAX_TAG_LENGTH};
