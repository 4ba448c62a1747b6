//! # IPC Module
//!
//! Wire payloads for transmitting partial transactions.

pub mod payloads;

pub use payloads::PartialTransactionPayload;
