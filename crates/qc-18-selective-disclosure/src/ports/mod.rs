//! # Ports Layer
//!
//! Hexagonal architecture ports (interfaces) for the Selective Disclosure subsystem.
//!
//! - **Driving Ports (Inbound)**: API consumed by adapters and other subsystems
//! - **Driven Ports (Outbound)**: transaction storage and component serialization

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
