//! Column-aligned console tables
//!
//! Columns are sized to their widest cell plus two spaces. When the table is
//! wider than the terminal only the widest column is shrunk, and its long
//! cells get an ellipsis in the middle.

/// Message printed instead of a table without data rows
pub const NO_RESULTS: &str = "No results found.";

/// Terminal width assumed when it cannot be detected
pub const FALLBACK_WIDTH: usize = 80;

/// Narrowest width the shrunk column is allowed to reach
const MIN_COLUMN_WIDTH: usize = 5;

/// Padding added to every column's natural width
const COLUMN_PADDING: usize = 2;

const ELLIPSIS: &str = "...";

#[derive(Debug, Clone)]
struct Column {
    header: String,
    cells: Vec<String>,
}

/// A table built column by column
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<Column>,
}

/// Rendered table lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub header: String,
    pub rows: Vec<String>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column
    ///
    /// All columns of a table must have the same number of cells.
    pub fn column<I, S>(mut self, header: &str, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cells: Vec<String> = cells.into_iter().map(Into::into).collect();
        debug_assert!(
            self.columns.first().is_none_or(|c| c.cells.len() == cells.len()),
            "table columns must have equal length"
        );
        self.columns.push(Column {
            header: header.to_string(),
            cells,
        });
        self
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.cells.len())
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Lay the table out for a terminal `terminal_width` characters wide
    ///
    /// Returns `None` when there are no data rows.
    pub fn render(&self, terminal_width: usize) -> Option<Rendered> {
        if self.is_empty() {
            return None;
        }

        let mut widths: Vec<usize> = self.columns.iter().map(natural_width).collect();
        let mut columns = self.columns.clone();

        let total: usize = widths.iter().sum();
        if total > terminal_width {
            let widest = widest_column(&widths);
            let overflow = total - terminal_width;
            widths[widest] = widths[widest]
                .saturating_sub(overflow)
                .max(MIN_COLUMN_WIDTH);

            let column = &mut columns[widest];
            column.header = shorten(&column.header, widths[widest]);
            for cell in &mut column.cells {
                *cell = shorten(cell, widths[widest]);
            }
        }

        let header = format_row(columns.iter().map(|c| c.header.as_str()), &widths);
        let rows = (0..self.row_count())
            .map(|row| format_row(columns.iter().map(|c| c.cells[row].as_str()), &widths))
            .collect();

        Some(Rendered { header, rows })
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn natural_width(column: &Column) -> usize {
    column
        .cells
        .iter()
        .map(|c| char_len(c))
        .chain(std::iter::once(char_len(&column.header)))
        .max()
        .unwrap_or(0)
        + COLUMN_PADDING
}

/// Index of the widest column; the first one wins a tie
fn widest_column(widths: &[usize]) -> usize {
    let max = widths.iter().copied().max().unwrap_or(0);
    widths.iter().position(|&w| w == max).unwrap_or(0)
}

/// Replace the middle of `text` with an ellipsis if it does not fit `width`
///
/// Equal-length prefix and suffix of the original are kept. The result is
/// never longer than `text`.
fn shorten(text: &str, width: usize) -> String {
    let len = char_len(text);
    if len <= width {
        return text.to_string();
    }

    let keep = (width / 2).saturating_sub(ELLIPSIS.len());
    if 2 * keep + ELLIPSIS.len() >= len {
        return text.to_string();
    }
    let prefix: String = text.chars().take(keep).collect();
    let suffix: String = text.chars().skip(len - keep).collect();
    format!("{prefix}{ELLIPSIS}{suffix}")
}

fn format_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let mut line = String::new();
    for (cell, width) in cells.zip(widths) {
        line.push_str(&format!("{cell:<width$}"));
    }
    line.trim_end().to_string()
}
