//! Miscellaneous utilities for nicels.
//!
//! - [cli]: the `nls` command line and its resolution into render options.
//! - [helpers]: color parsing, case-folded lookups, `--block-size` parsing and home lookup.
//! - [logging]: the stderr `tracing` subscriber.

pub mod cli;
pub mod helpers;
pub mod logging;

pub use helpers::{get_home, parse_block_size, parse_color, with_lowered_stack};
