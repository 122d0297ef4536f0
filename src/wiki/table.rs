//! Pipe-delimited table markup as stored in a page body.
//!
//! A row line looks like `|a|b|`. Parsing keeps the empty cell in front of the
//! first delimiter, so `|a|b|` becomes `["", "a", "b"]`, and encoding joins the
//! cells back with `|` and appends one trailing `|`. Cells are not escaped: a
//! `|` inside a cell value splits it on the next parse.

pub const DELIMITER: char = '|';

/// Opening and closing marker. Both are the same literal.
pub const TABLE_MARKER: &str = "{table}";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableRow {
    cells: Vec<String>,
}

impl TableRow {
    /// Wrap cells exactly as given, leading empty cell included.
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Build a row from user-facing values, adding the leading empty cell so it
    /// encodes the same way as a parsed row.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cells = std::iter::once(String::new())
            .chain(values.into_iter().map(Into::into))
            .collect();
        Self { cells }
    }

    fn parse_line(line: &str) -> Self {
        let line = line.strip_suffix(DELIMITER).unwrap_or(line);
        Self {
            cells: line.split(DELIMITER).map(str::to_string).collect(),
        }
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// Cells after the leading empty one.
    pub fn values(&self) -> &[String] {
        self.cells.get(1..).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn encode(&self) -> String {
        let separator = DELIMITER.to_string();
        let mut line = self.cells.join(separator.as_str());
        line.push(DELIMITER);
        line
    }
}

/// Extract every line that starts with the delimiter. Everything else,
/// including the `{table}` markers, is dropped.
pub fn parse_table(raw_body: &str) -> Vec<TableRow> {
    raw_body
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| line.starts_with(DELIMITER))
        .map(TableRow::parse_line)
        .collect()
}

pub fn append_row(mut rows: Vec<TableRow>, new_row: TableRow) -> Vec<TableRow> {
    rows.push(new_row);
    rows
}

pub fn encode_table(rows: &[TableRow]) -> String {
    let lines: Vec<String> = rows.iter().map(TableRow::encode).collect();
    format!("{TABLE_MARKER}\n{}\n{TABLE_MARKER}", lines.join("\n"))
}
