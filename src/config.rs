//! Configuration for nicels.
//!
//! - [options]: the resolved, immutable [RenderOptions] for one invocation.
//! - [general]: the `[general]` section of nicels.toml.
//! - [theme]: the `[theme]` section, color schemes and ANSI painting.
//! - [load]: locating, reading and generating nicels.toml.

pub mod general;
pub mod load;
pub mod options;
pub mod theme;

pub use general::General;
pub use load::Config;
pub use options::{
    BlockSize, DEFAULT_TAB_SIZE, DEFAULT_WIDTH, IndicatorStyle, LayoutMode, QuotingStyle,
    RenderOptions, ReportMode, SizeMode, SortKey, TimeStyle,
};
pub use theme::Theme;
