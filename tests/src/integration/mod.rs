//! # Integration Tests
//!
//! End-to-end flows across prover, storage and verifier.

pub mod disclosure_flows;
