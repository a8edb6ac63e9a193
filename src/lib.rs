//! Q-RISC: simulated post-quantum accelerator design miner.
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod design;
pub mod validation;
pub mod network;
pub mod engine;
pub mod console;
pub mod storage;
