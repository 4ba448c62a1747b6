//! # Domain Module
//!
//! Core domain types for Selective Disclosure.

pub mod commitment;
pub mod component_disclosure;
pub mod entities;
pub mod errors;
pub mod full_view;
pub mod grouping;
pub mod padding;
pub mod partial_view;
pub mod utxo;
pub mod value_objects;

pub use commitment::*;
pub use component_disclosure::*;
pub use entities::*;
pub use errors::*;
pub use full_view::*;
pub use grouping::*;
pub use padding::*;
pub use partial_view::*;
pub use utxo::*;
pub use value_objects::*;
