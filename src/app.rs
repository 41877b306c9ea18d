//! Listing orchestration for nicels.
//!
//! [App] lists every path from the command line: files given as arguments come first
//! as one group, then each directory under an optional `PATH:` heading. Paths that
//! cannot be accessed are reported on stderr and the rest are still listed.

use crate::config::theme::paint;
use crate::config::{LayoutMode, RenderOptions, Theme};
use crate::core::{Entry, Formatter, FsChildSource, GitStatusCache, Listing, Scanner};
use crate::error::{ExitStatus, RenderError};
use crate::ui::{Renderer, aggregate};

use std::io::Write;
use std::path::{Path, PathBuf};

pub struct App<'a> {
    options: &'a RenderOptions,
    theme: &'a Theme,
    scanner: Scanner,
    git: Option<GitStatusCache>,
}

impl<'a> App<'a> {
    pub fn new(options: &'a RenderOptions, theme: &'a Theme) -> Self {
        App {
            options,
            theme,
            scanner: Scanner::new(options),
            git: options.git_status.then(GitStatusCache::new),
        }
    }

    /// List `paths` to `out` and return the combined exit status.
    pub fn run<W: Write>(&mut self, paths: &[PathBuf], out: &mut W) -> Result<ExitStatus, RenderError> {
        let mut status = ExitStatus::Ok;
        let mut files = Vec::new();
        let mut dirs = Vec::new();

        for path in paths {
            match self.scanner.scan_path(path) {
                Ok(Listing::File(entry)) => files.push(entry),
                Ok(Listing::Directory { path, entries }) => dirs.push((path, entries)),
                Err(e) => {
                    eprintln!("nls: {}", e);
                    status = status.combine(ExitStatus::Serious);
                }
            }
        }

        let headings = paths.len() > 1;
        let term = self.options.line_terminator();
        let mut first = true;

        if !files.is_empty() {
            // Arguments are listed as given: ordered, never filtered.
            Formatter::new(self.options).sort_entries(&mut files);
            status = status.combine(self.list(files, out)?);
            first = false;
        }

        for (path, entries) in dirs {
            if !first {
                out.write_all(term.as_bytes())?;
            }
            first = false;

            if headings {
                write!(out, "{}:{}", path.display(), term)?;
            }
            status = status.combine(self.list_directory(&path, entries, out)?);
        }

        out.flush()?;
        Ok(status.combine(self.scanner.take_status()))
    }

    fn list_directory<W: Write>(
        &mut self,
        path: &Path,
        entries: Vec<Entry>,
        out: &mut W,
    ) -> Result<ExitStatus, RenderError> {
        let opts = self.options;
        if opts.layout == LayoutMode::Long && opts.header {
            let line = format!("Directory: {}", path.display());
            if opts.color {
                write!(out, "{}{}", paint(self.theme.header(), &line), opts.line_terminator())?;
            } else {
                write!(out, "{}{}", line, opts.line_terminator())?;
            }
        }

        let entries = Formatter::new(opts).prepare(entries);
        self.list(entries, out)
    }

    /// Annotate, render and summarize one prepared group of entries.
    fn list<W: Write>(&mut self, mut entries: Vec<Entry>, out: &mut W) -> Result<ExitStatus, RenderError> {
        if let Some(git) = self.git.as_mut() {
            git.annotate(&mut entries);
        }
        let stats = aggregate(&entries);
        let renderer = Renderer::new(self.options, self.theme);

        let status = if self.options.layout == LayoutMode::Tree {
            let mut source = FsChildSource::new(self.options, &self.scanner, self.git.as_mut());
            renderer.render(entries, Some(&mut source), out)?
        } else {
            renderer.render(entries, None, out)?
        };

        renderer.render_report(&stats, out)?;
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::TempDir;

    fn single_column() -> RenderOptions {
        RenderOptions {
            layout: LayoutMode::SingleColumn,
            ..RenderOptions::default()
        }
    }

    #[test]
    fn files_come_before_directories() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        let dir = tmp.path().join("dir");
        fs::create_dir(&dir)?;
        File::create(dir.join("inner"))?;
        let file = tmp.path().join("zfile");
        File::create(&file)?;

        let opts = single_column();
        let theme = Theme::default();
        let mut out = Vec::new();
        let status = App::new(&opts, &theme).run(&[dir.clone(), file.clone()], &mut out)?;

        assert_eq!(status, ExitStatus::Ok);
        let expected = format!("{}\n\n{}:\ninner\n", file.display(), dir.display());
        assert_eq!(String::from_utf8(out)?, expected);
        Ok(())
    }

    #[test]
    fn missing_path_is_serious_but_others_list() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        File::create(tmp.path().join("a"))?;
        let missing = tmp.path().join("missing");

        let opts = single_column();
        let theme = Theme::default();
        let mut out = Vec::new();
        let status = App::new(&opts, &theme).run(&[missing, tmp.path().to_path_buf()], &mut out)?;

        assert_eq!(status, ExitStatus::Serious);
        let expected = format!("{}:\na\n", tmp.path().display());
        assert_eq!(String::from_utf8(out)?, expected);
        Ok(())
    }

    #[test]
    fn single_directory_has_no_heading() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        File::create(tmp.path().join("b"))?;
        File::create(tmp.path().join("a"))?;

        let opts = RenderOptions {
            report: crate::config::ReportMode::Short,
            ..single_column()
        };
        let theme = Theme::default();
        let mut out = Vec::new();
        App::new(&opts, &theme).run(&[tmp.path().to_path_buf()], &mut out)?;

        assert_eq!(
            String::from_utf8(out)?,
            "a\nb\n\nFolders: 0, Files: 2, Size: 0B\n"
        );
        Ok(())
    }

    #[test]
    fn long_header_names_the_directory() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        let opts = RenderOptions {
            layout: LayoutMode::Long,
            header: true,
            ..RenderOptions::default()
        };
        let theme = Theme::default();
        let mut out = Vec::new();
        App::new(&opts, &theme).run(&[tmp.path().to_path_buf()], &mut out)?;

        let text = String::from_utf8(out)?;
        let first = text.lines().next().ok_or("empty output")?;
        assert_eq!(first, format!("Directory: {}", tmp.path().display()));
        Ok(())
    }
}
