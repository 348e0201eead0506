//! Data models for `family_tree`

pub mod generation;
pub mod person;

pub use generation::{GenerationKey, DEFAULT_GENERATION};
pub use person::{element_id_for, PersonRecord};
