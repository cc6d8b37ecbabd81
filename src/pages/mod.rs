//! Page controllers. Each one loads what its page needs through the resource
//! clients and keeps a renderable model of the page.

use crate::config::Config;

pub mod book_form;
pub mod book_view;
pub mod books_list;
pub mod references;

pub const FAILED_TO_LOAD: &str = "Failed to load";

/// Body of a table page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody<R> {
    Rows(Vec<R>),
    /// The service returned an empty list.
    Empty,
    /// Loading failed; shows a single failure row.
    Failed,
}

impl<R> TableBody<R> {
    pub fn from_rows(rows: Vec<R>) -> Self {
        if rows.is_empty() {
            TableBody::Empty
        } else {
            TableBody::Rows(rows)
        }
    }

    /// The data rows, none for the empty and failed states.
    pub fn rows(&self) -> &[R] {
        match self {
            TableBody::Rows(rows) => rows,
            TableBody::Empty | TableBody::Failed => &[],
        }
    }

    pub fn is_empty_state(&self) -> bool {
        matches!(self, TableBody::Empty)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, TableBody::Failed)
    }

    /// Renders one line per row, or the empty/failure line.
    pub fn render(
        &self,
        config: &Config,
        empty_text: &str,
        render_row: impl Fn(&R) -> String,
    ) -> String {
        match self {
            TableBody::Rows(rows) => rows
                .iter()
                .map(render_row)
                .collect::<Vec<_>>()
                .join("\n"),
            TableBody::Empty => config.output_empty.format_str(empty_text),
            TableBody::Failed => config.output_error.format_str(FAILED_TO_LOAD),
        }
    }
}

pub(crate) fn heading(config: &Config, text: &str) -> String {
    config.output_heading.format_str(text)
}
