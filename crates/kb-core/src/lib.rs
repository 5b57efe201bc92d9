//! # kb-core
//!
//! Core types, ID generation, and error types for the knowledge workbench.
//!
//! This crate provides the foundational types shared across all workbench crates:
//! - Entity structs for the domain objects (file entries, previews, triples, regex matches)
//! - Persisted snapshot shapes (regex state, last server selection)
//! - Ontology listing kinds
//! - ID prefix constants and generation
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
