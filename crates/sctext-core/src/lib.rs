//! SCText Core Types and Definitions
//!
//! This crate provides the foundational types for translating SCg knowledge
//! graphs into SCs text. It includes:
//!
//! - **Identifiers**: String-interned structural element ids ([`identifier::ElementId`])
//! - **Elements**: The closed set of SCg element kinds ([`element`] module)
//! - **Graph**: An id-indexed element arena with nested contours ([`graph`] module)
//! - **Types**: SCg type to SCs token encoding tables ([`types`] module)

pub mod element;
pub mod graph;
pub mod identifier;
pub mod types;

mod error;

pub use error::GraphError;
