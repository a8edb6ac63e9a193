//! Integration tests for the Q-RISC miner.

mod cli;
mod mock_subnet;
mod session;
