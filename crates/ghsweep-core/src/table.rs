//! Inventory and summary tables.
//!
//! On a terminal rows are aligned under uppercase headers. When stdout is a
//! pipe or file each row becomes one tab-separated line with no header, so a
//! saved audit trail can be grepped and cut.

use comfy_table::presets::NOTHING;
use comfy_table::{ContentArrangement, Table};

use crate::iostreams::IOStreams;

/// Rows collected for one table.
#[derive(Debug)]
pub struct TablePrinter {
    aligned: bool,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TablePrinter {
    /// Start a table for the stdout of `ios`.
    pub fn new(ios: &IOStreams) -> Self {
        Self {
            aligned: ios.is_stdout_tty(),
            headers: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Column headers, shown only on a terminal.
    #[must_use]
    pub fn with_headers(mut self, headers: &[&str]) -> Self {
        self.headers = headers.iter().map(|h| h.to_uppercase()).collect();
        self
    }

    /// Append a row.
    pub fn add_row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    /// The finished table, without a trailing newline.
    pub fn render(&self) -> String {
        if !self.aligned {
            return self
                .rows
                .iter()
                .map(|r| r.join("\t"))
                .collect::<Vec<_>>()
                .join("\n");
        }

        let mut table = Table::new();
        table
            .load_preset(NOTHING)
            .set_content_arrangement(ContentArrangement::Dynamic);
        if !self.headers.is_empty() {
            table.set_header(&self.headers);
        }
        for row in &self.rows {
            table.add_row(row);
        }
        table.to_string()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn printer(tty: bool) -> TablePrinter {
        let (mut ios, _) = IOStreams::test_with_output();
        ios.set_stdout_tty(tty);
        let mut tp = TablePrinter::new(&ios).with_headers(&["id", "title"]);
        tp.add_row(vec!["12".into(), "laptop".into()]);
        tp.add_row(vec!["13".into(), "ci runner".into()]);
        tp
    }

    #[test]
    fn test_should_write_tab_separated_rows_when_piped() {
        assert_eq!(printer(false).render(), "12\tlaptop\n13\tci runner");
    }

    #[test]
    fn test_should_align_under_headers_on_terminal() {
        let out = printer(true).render();
        let first = out.lines().next().unwrap_or_default();
        assert!(first.contains("ID") && first.contains("TITLE"), "{out}");
        assert!(out.contains("ci runner"));
        assert!(!out.contains('\t'));
    }

    #[test]
    fn test_should_render_nothing_without_rows() {
        let (ios, _) = IOStreams::test_with_output();
        assert!(TablePrinter::new(&ios).render().is_empty());
    }
}
