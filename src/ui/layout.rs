//! Layout engine for nicels.
//!
//! Each layout is a function from pre-built [Cell]s (or, for the long format,
//! entries plus a [CellBuilder]) to an output stream. Layouts never measure
//! decorated text themselves; they read the width stored in each cell.

use crate::config::theme::paint;
use crate::config::{RenderOptions, Theme};
use crate::core::{Entry, format_blocks, format_file_size, format_file_time, format_permissions};
use crate::ui::cell::{BADGE_WIDTH, Cell, CellBuilder};

use std::io::{self, Write};

/// Gap between packed columns.
const COLUMN_GAP: usize = 2;
const COMMA_SEPARATOR: &str = ", ";

/// One cell per line.
pub fn render_single<W: Write>(cells: &[Cell], terminator: &str, out: &mut W) -> io::Result<()> {
    for cell in cells {
        write!(out, "{}{}", cell.text(), terminator)?;
    }
    Ok(())
}

/// Column and row counts for packing `cells` into `width` columns.
/// As many columns as fit, capped at the number of cells.
pub fn grid_dimensions(cells: &[Cell], width: usize) -> (usize, usize) {
    let n = cells.len();
    if n == 0 {
        return (0, 0);
    }
    let max_width = cells.iter().map(Cell::width).max().unwrap_or(0);
    let column_width = max_width + COLUMN_GAP;
    let columns = (width / column_width).clamp(1, n);
    (columns, n.div_ceil(columns))
}

/// Packs cells into columns filling down (`across == false`) or across rows.
pub fn render_columns<W: Write>(
    cells: &[Cell],
    width: usize,
    across: bool,
    terminator: &str,
    out: &mut W,
) -> io::Result<()> {
    let (columns, rows) = grid_dimensions(cells, width);
    if rows == 0 {
        return Ok(());
    }
    let column_width = cells.iter().map(Cell::width).max().unwrap_or(0) + COLUMN_GAP;
    let index_of = |row: usize, col: usize| {
        if across {
            row * columns + col
        } else {
            col * rows + row
        }
    };

    for row in 0..rows {
        let in_row: Vec<usize> = (0..columns)
            .map(|col| index_of(row, col))
            .filter(|&i| i < cells.len())
            .collect();

        for (pos, &i) in in_row.iter().enumerate() {
            let cell = &cells[i];
            out.write_all(cell.text().as_bytes())?;
            if pos + 1 < in_row.len() {
                let pad = column_width.saturating_sub(cell.width());
                write!(out, "{:pad$}", "", pad = pad)?;
            }
        }
        out.write_all(terminator.as_bytes())?;
    }
    Ok(())
}

/// Joins cells with `", "`, wrapping before a cell that would cross `width`.
/// A cell is never split and no line ends with a dangling separator.
pub fn render_commas<W: Write>(
    cells: &[Cell],
    width: usize,
    terminator: &str,
    out: &mut W,
) -> io::Result<()> {
    if cells.is_empty() {
        return Ok(());
    }
    let mut line_width = 0usize;
    for (i, cell) in cells.iter().enumerate() {
        if i == 0 {
            line_width = cell.width();
        } else if line_width
            .saturating_add(COMMA_SEPARATOR.len())
            .saturating_add(cell.width())
            > width
        {
            out.write_all(terminator.as_bytes())?;
            line_width = cell.width();
        } else {
            out.write_all(COMMA_SEPARATOR.as_bytes())?;
            line_width += COMMA_SEPARATOR.len() + cell.width();
        }
        out.write_all(cell.text().as_bytes())?;
    }
    out.write_all(terminator.as_bytes())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

/// One column of the long format.
struct Column {
    label: &'static str,
    align: Align,
    min_width: usize,
    cells: Vec<Cell>,
}

impl Column {
    fn new(label: &'static str, align: Align) -> Self {
        Column {
            label,
            align,
            min_width: 0,
            cells: Vec::new(),
        }
    }

    fn with_min_width(mut self, min_width: usize) -> Self {
        self.min_width = min_width;
        self
    }

    fn width(&self, with_header: bool) -> usize {
        let content = self
            .cells
            .iter()
            .map(Cell::width)
            .max()
            .unwrap_or(0)
            .max(self.min_width);
        if with_header {
            content.max(self.label.len())
        } else {
            content
        }
    }
}

/// The long format: one row per entry with aligned metadata columns.
pub fn render_long<W: Write>(
    entries: &[Entry],
    builder: &CellBuilder<'_>,
    options: &RenderOptions,
    theme: &Theme,
    out: &mut W,
) -> io::Result<()> {
    let tab = options.tab_size;
    let term = options.line_terminator();

    let mut columns: Vec<Column> = Vec::with_capacity(10);
    let mut inode = options.show_inode.then(|| Column::new("Inode", Align::Right));
    let mut blocks = options.show_blocks.then(|| Column::new("Blocks", Align::Right));
    let mut perms = Column::new("Permissions", Align::Left);
    let mut links = Column::new("Links", Align::Right);
    let mut owner = options.show_owner.then(|| Column::new("Owner", Align::Left));
    let mut group = options.show_group.then(|| Column::new("Group", Align::Left));
    let mut size = Column::new("Size", Align::Right);
    let mut time = Column::new("Modified", Align::Left);
    let mut git = options
        .git_status
        .then(|| Column::new("Git", Align::Left).with_min_width(BADGE_WIDTH));
    let mut names = Column::new("Name", Align::Left);

    for entry in entries {
        if let Some(col) = inode.as_mut() {
            let text = entry.inode().map_or_else(|| "?".to_string(), |i| i.to_string());
            col.cells.push(Cell::new(text, tab));
        }
        if let Some(col) = blocks.as_mut() {
            col.cells.push(Cell::new(format_blocks(entry.allocated(), &options.size_mode), tab));
        }
        perms.cells.push(Cell::new(permission_text(entry, options, theme), tab));
        links.cells.push(Cell::new(entry.links().to_string(), tab));
        if let Some(col) = owner.as_mut() {
            col.cells.push(Cell::new(id_text(entry.owner(), entry.uid(), options.numeric_ids), tab));
        }
        if let Some(col) = group.as_mut() {
            col.cells.push(Cell::new(id_text(entry.group(), entry.gid(), options.numeric_ids), tab));
        }
        size.cells.push(Cell::new(size_text(entry, options), tab));
        time.cells.push(Cell::new(format_file_time(entry.modified(), &options.time_style), tab));
        if let Some(col) = git.as_mut() {
            col.cells.push(Cell::new(builder.badge(entry), tab));
        }
        let mut name = builder.name(entry);
        name.push_str(&builder.target(entry));
        names.cells.push(Cell::new(name, tab));
    }

    columns.extend(inode);
    columns.extend(blocks);
    columns.push(perms);
    columns.push(links);
    columns.extend(owner);
    columns.extend(group);
    columns.push(size);
    columns.push(time);
    columns.extend(git);
    columns.push(names);

    let header = options.header;
    let widths: Vec<usize> = columns.iter().map(|c| c.width(header)).collect();

    if header {
        let labels: Vec<Cell> = columns.iter().map(|c| Cell::new(c.label.to_string(), tab)).collect();
        let row: Vec<(&Cell, Align)> = labels.iter().zip(columns.iter().map(|c| c.align)).collect();
        let line = join_row(&row, &widths);
        let rule: String = widths
            .iter()
            .map(|&w| "-".repeat(w))
            .collect::<Vec<_>>()
            .join(" ");
        if options.color {
            write!(out, "{}{}", paint(theme.header(), &line), term)?;
            write!(out, "{}{}", paint(theme.header(), &rule), term)?;
        } else {
            write!(out, "{}{}{}{}", line, term, rule, term)?;
        }
    }

    for i in 0..entries.len() {
        let row: Vec<(&Cell, Align)> = columns.iter().map(|c| (&c.cells[i], c.align)).collect();
        write!(out, "{}{}", join_row(&row, &widths), term)?;
    }
    Ok(())
}

/// Join one row, padding every column but the last to its width.
fn join_row(row: &[(&Cell, Align)], widths: &[usize]) -> String {
    let mut line = String::new();
    let last = row.len().saturating_sub(1);
    for (i, ((cell, align), &width)) in row.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push(' ');
        }
        let pad = width.saturating_sub(cell.width());
        match align {
            Align::Right => {
                line.push_str(&" ".repeat(pad));
                line.push_str(cell.text());
            }
            Align::Left => {
                line.push_str(cell.text());
                if i != last {
                    line.push_str(&" ".repeat(pad));
                }
            }
        }
    }
    line
}

fn permission_text(entry: &Entry, options: &RenderOptions, theme: &Theme) -> String {
    let plain = format_permissions(entry.kind(), entry.mode());
    if !options.color || entry.mode().is_none() {
        return plain;
    }
    plain
        .chars()
        .enumerate()
        .map(|(i, c)| paint(theme.perm_color(i, c), &c.to_string()))
        .collect()
}

/// Owner or group column text. Falls back to the numeric id, then `?`.
fn id_text(name: Option<&str>, id: Option<u32>, numeric: bool) -> String {
    match (name, id) {
        (Some(name), _) if !numeric => name.to_string(),
        (_, Some(id)) => id.to_string(),
        _ => "?".to_string(),
    }
}

fn size_text(entry: &Entry, options: &RenderOptions) -> String {
    format_file_size(entry.size(), &options.size_mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(widths: &[usize]) -> Vec<Cell> {
        widths
            .iter()
            .enumerate()
            .map(|(i, &w)| {
                let c = char::from(b'a' + i as u8);
                Cell::new(c.to_string().repeat(w), 8)
            })
            .collect()
    }

    fn rendered<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).expect("writing to a Vec cannot fail");
        String::from_utf8(buf).expect("layout output is utf-8")
    }

    #[test]
    fn five_cells_fit_three_columns() {
        let cells = cells(&[4; 5]);
        assert_eq!(grid_dimensions(&cells, 20), (3, 2));

        let out = rendered(|buf| render_columns(&cells, 20, false, "\n", buf));
        assert_eq!(out, "aaaa  cccc  eeee\nbbbb  dddd\n");
    }

    #[test]
    fn across_fills_rows_first() {
        let cells = cells(&[4; 5]);
        let out = rendered(|buf| render_columns(&cells, 20, true, "\n", buf));
        assert_eq!(out, "aaaa  bbbb  cccc\ndddd  eeee\n");
    }

    #[test]
    fn across_uses_every_column_that_fits() {
        let cells = cells(&[4; 5]);
        assert_eq!(grid_dimensions(&cells, 24), (4, 2));

        let out = rendered(|buf| render_columns(&cells, 24, true, "\n", buf));
        assert_eq!(out, "aaaa  bbbb  cccc  dddd\neeee\n");

        let out = rendered(|buf| render_columns(&cells, 24, false, "\n", buf));
        assert_eq!(out, "aaaa  cccc  eeee\nbbbb  dddd\n");
    }

    #[test]
    fn column_min_width_holds_when_cells_are_empty() {
        let mut col = Column::new("Git", Align::Left).with_min_width(BADGE_WIDTH);
        col.cells.push(Cell::new(String::new(), 8));
        assert_eq!(col.width(false), BADGE_WIDTH);
        assert_eq!(Column::new("Size", Align::Right).width(true), 4);
    }

    #[test]
    fn narrow_width_gives_one_column() {
        let cells = cells(&[6, 2]);
        assert_eq!(grid_dimensions(&cells, 3), (1, 2));
        let out = rendered(|buf| render_columns(&cells, 3, false, "\n", buf));
        assert_eq!(out, "aaaaaa\nbb\n");
    }

    #[test]
    fn unlimited_width_is_one_row() {
        let cells = cells(&[1, 1, 1]);
        assert_eq!(grid_dimensions(&cells, usize::MAX), (3, 1));
        assert_eq!(grid_dimensions(&[], 80), (0, 0));
    }

    #[test]
    fn commas_wrap_without_dangling_separator() {
        let cells = vec![
            Cell::new("aa".into(), 8),
            Cell::new("bb".into(), 8),
            Cell::new("cccccccccc".into(), 8),
        ];
        let out = rendered(|buf| render_commas(&cells, 10, "\n", buf));
        assert_eq!(out, "aa, bb\ncccccccccc\n");

        let out = rendered(|buf| render_commas(&cells, usize::MAX, "\n", buf));
        assert_eq!(out, "aa, bb, cccccccccc\n");
    }

    #[test]
    fn single_column_uses_terminator() {
        let cells = cells(&[1, 2]);
        let out = rendered(|buf| render_single(&cells, "\0", buf));
        assert_eq!(out, "a\0bb\0");
    }

    #[test]
    fn join_row_aligns() {
        let a = Cell::new("7".into(), 8);
        let b = Cell::new("x".into(), 8);
        let c = Cell::new("name".into(), 8);
        let row = [(&a, Align::Right), (&b, Align::Left), (&c, Align::Left)];
        assert_eq!(join_row(&row, &[3, 2, 10]), "  7 x  name");
    }

    #[test]
    fn ids_fall_back_to_numbers() {
        assert_eq!(id_text(Some("root"), Some(0), false), "root");
        assert_eq!(id_text(Some("root"), Some(0), true), "0");
        assert_eq!(id_text(None, Some(1000), false), "1000");
        assert_eq!(id_text(None, None, false), "?");
    }
}
