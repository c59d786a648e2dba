//! UCI engine client for the arena.
//!
//! Spawns an engine binary, talks UCI to it over stdin/stdout and exposes it
//! as a [`chess_core::Engine`]:
//!
//! ```text
//! arena -> engine:  uci | setoption name N value V | isready
//!                   position startpos moves e2e4 ... | go movetime 1000
//!                   stop | quit
//! engine -> arena:  id name X | uciok | readyok | info ... | bestmove e7e5
//! ```
//!
//! Each engine owns one reader thread that forwards stdout lines over a
//! channel, which is what lets every wait be bounded by a timeout.

mod process;
mod protocol;
mod spec;

pub use process::{AdapterTimeouts, UciEngine};
pub use protocol::*;
pub use spec::*;
