//! Mopro Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Mopro profile
//! compiler. It includes:
//!
//! - **Identifiers**: Numeric element identity ([`identifier::ElementId`])
//! - **Model**: Packages, diagrams, elements and connectors of a design model ([`model`] module)
//! - **Repository**: The read interface to a design-model repository ([`repository::ModelRepository`])
//! - **Run state**: The attribute-override format stored on elements ([`run_state`] module)
//! - **Style**: Interpretation of raw styling attribute values ([`style`] and [`color`] modules)

pub mod color;
pub mod identifier;
pub mod model;
pub mod repository;
pub mod run_state;
pub mod style;
