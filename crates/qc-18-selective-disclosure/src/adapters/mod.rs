//! # Adapters Layer
//!
//! Secondary adapters for the Selective Disclosure subsystem.

pub mod bincode_serializer;
pub mod memory_store;

pub use bincode_serializer::BincodeComponentSerializer;
pub use memory_store::InMemoryTransactionStore;
