//! Render entry point.
//!
//! [Renderer] turns a prepared entry sequence into text for the configured layout.
//! It owns no state beyond the options and theme it was given.

use crate::config::{LayoutMode, RenderOptions, Theme};
use crate::core::{ChildSource, Entry};
use crate::error::{ExitStatus, RenderError, ScanError};
use crate::ui::cell::CellBuilder;
use crate::ui::layout::{render_columns, render_commas, render_long, render_single};
use crate::ui::report::{ReportStats, write_report};
use crate::ui::tree::render_tree;

use std::io::Write;

/// Child source for trees rendered without filesystem access.
struct NoChildren;

impl ChildSource for NoChildren {
    fn children(&mut self, _parent: &Entry) -> Result<Vec<Entry>, ScanError> {
        Ok(Vec::new())
    }
}

pub struct Renderer<'a> {
    options: &'a RenderOptions,
    theme: &'a Theme,
}

impl<'a> Renderer<'a> {
    pub fn new(options: &'a RenderOptions, theme: &'a Theme) -> Self {
        Renderer { options, theme }
    }

    /// Render `entries` in the configured layout.
    ///
    /// `source` is only consulted in tree mode; without one the tree is flat.
    pub fn render<W: Write>(
        &self,
        entries: Vec<Entry>,
        source: Option<&mut dyn ChildSource>,
        out: &mut W,
    ) -> Result<ExitStatus, RenderError> {
        let opts = self.options;
        let builder = CellBuilder::new(opts, self.theme);
        let term = opts.line_terminator();
        let width = opts.effective_width();

        match opts.layout {
            LayoutMode::Long => render_long(&entries, &builder, opts, self.theme, out)?,
            LayoutMode::SingleColumn => render_single(&builder.build_all(&entries), term, out)?,
            LayoutMode::ColumnsVertical => {
                render_columns(&builder.build_all(&entries), width, false, term, out)?
            }
            LayoutMode::ColumnsHorizontal => {
                render_columns(&builder.build_all(&entries), width, true, term, out)?
            }
            LayoutMode::CommaSeparated => render_commas(&builder.build_all(&entries), width, term, out)?,
            LayoutMode::Tree => {
                let mut leaves = NoChildren;
                let source: &mut dyn ChildSource = match source {
                    Some(source) => source,
                    None => &mut leaves,
                };
                return Ok(render_tree(entries, source, &builder, opts, self.theme, out)?);
            }
        }
        Ok(ExitStatus::Ok)
    }

    /// Write the summary configured by `--report`, if any.
    pub fn render_report<W: Write>(&self, stats: &ReportStats, out: &mut W) -> Result<(), RenderError> {
        write_report(stats, self.options, self.theme, out)?;
        Ok(())
    }
}
