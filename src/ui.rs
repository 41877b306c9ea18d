//! Rendering for nicels.
//!
//! Everything that turns prepared entries into text lives here:
//! - [width]: display width of decorated strings.
//! - [quoting]: control-character hiding and the name quoting styles.
//! - [icons]: Nerd Font icon lookup.
//! - [cell]: decorated name cells with their measured width.
//! - [layout]: column, comma, single-column and long layouts.
//! - [tree]: the tree layout over lazily fetched children.
//! - [report]: the summary printed after a listing.
//! - [render]: the [Renderer] entry point tying the above together.

pub mod cell;
pub mod icons;
pub mod layout;
pub mod quoting;
pub mod render;
pub mod report;
pub mod tree;
pub mod width;

pub use cell::{Cell, CellBuilder};
pub use quoting::{quote, sanitize};
pub use render::Renderer;
pub use report::{ReportStats, aggregate};
pub use width::visible_width;
