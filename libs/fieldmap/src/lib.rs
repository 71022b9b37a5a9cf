//! Structural mapping between unrelated record shapes.
//!
//! Two structs that share fields by name and declared type can be converted
//! into one another without either declaring a relationship to the other —
//! the entity ↔ transfer-object problem at a persistence/API boundary.
//! Field correspondence is discovered per call from descriptor tables,
//! normally generated by `#[derive(Shape)]`.

pub mod error;
pub mod mapper;
pub mod schema;
pub mod shape;

pub use fieldmap_derive::Shape;
