//! The general configuration settings for nicels.
//!
//! This module defines the [General] struct for deserializing the `[general]`
//! section of nicels.toml. Every field is optional: unset fields leave the
//! built-in defaults of [RenderOptions] untouched.

use crate::config::{IndicatorStyle, LayoutMode, QuotingStyle, RenderOptions, SortKey, TimeStyle};

use serde::Deserialize;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct General {
    format: Option<LayoutMode>,
    sort: Option<SortKey>,
    dirs_first: Option<bool>,
    dots_first: Option<bool>,
    icons: Option<bool>,
    color: Option<bool>,
    git_status: Option<bool>,
    hyperlink: Option<bool>,
    quoting_style: Option<QuotingStyle>,
    indicator_style: Option<IndicatorStyle>,
    time_style: Option<String>,
    tab_size: Option<usize>,
}

impl General {
    #[inline]
    pub fn color(&self) -> Option<bool> {
        self.color
    }

    /// Copy every configured value onto `opts`.
    pub fn apply(&self, opts: &mut RenderOptions) {
        if let Some(format) = self.format {
            opts.layout = format;
        }
        if let Some(sort) = self.sort {
            opts.sort = sort;
        }
        if let Some(dirs_first) = self.dirs_first {
            opts.dirs_first = dirs_first;
            if dirs_first {
                opts.files_first = false;
            }
        }
        if let Some(dots_first) = self.dots_first {
            opts.dots_first = dots_first;
        }
        if let Some(icons) = self.icons {
            opts.icons = icons;
        }
        if let Some(git_status) = self.git_status {
            opts.git_status = git_status;
        }
        if let Some(hyperlink) = self.hyperlink {
            opts.hyperlink = hyperlink;
        }
        if let Some(quoting) = self.quoting_style {
            opts.quoting = quoting;
        }
        if let Some(indicator) = self.indicator_style {
            opts.indicator = indicator;
        }
        if let Some(style) = &self.time_style {
            opts.time_style = TimeStyle::parse(style);
        }
        if let Some(tab_size) = self.tab_size {
            opts.tab_size = tab_size;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_fields_keep_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let general: General = toml::from_str("dirs_first = true\nformat = \"long\"")?;
        let mut opts = RenderOptions::default();
        general.apply(&mut opts);
        assert!(opts.dirs_first);
        assert_eq!(opts.layout, LayoutMode::Long);
        assert_eq!(opts.sort, SortKey::Name);
        assert_eq!(opts.tab_size, crate::config::DEFAULT_TAB_SIZE);
        Ok(())
    }

    #[test]
    fn words_match_cli_spelling() -> Result<(), Box<dyn std::error::Error>> {
        let general: General = toml::from_str(
            r#"
            quoting_style = "shell-escape"
            time_style = "long-iso"
            format = "across"
            indicator_style = "none"
            "#,
        )?;
        let mut opts = RenderOptions::default();
        general.apply(&mut opts);
        assert_eq!(opts.quoting, QuotingStyle::ShellEscape);
        assert_eq!(opts.time_style, TimeStyle::LongIso);
        assert_eq!(opts.layout, LayoutMode::ColumnsHorizontal);
        assert_eq!(opts.indicator, IndicatorStyle::None);
        Ok(())
    }
}
