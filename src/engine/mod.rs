//! Core engine: the generate → validate → broadcast loop.

pub mod miner;
pub mod accountant;
