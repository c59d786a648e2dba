//! Engine arena
//!
//! This crate provides infrastructure for:
//! - Playing games between two UCI engines drawn from a roster
//! - Recording each finished game as a row of a CSV result log
//! - Tallying standings from that log
//!
//! # Usage
//!
//! ```bash
//! # Play ten games between engines listed in arena.toml
//! cargo run -p tournament -- play --config arena.toml --games 10
//!
//! # Show standings from the result log
//! cargo run -p tournament -- standings --results game_results.csv
//! ```

mod config;
mod error;
mod match_runner;
mod players;
mod report;
mod results;
mod standings;

pub use config::*;
pub use error::*;
pub use match_runner::*;
pub use players::*;
pub use report::*;
pub use results::*;
pub use standings::*;
