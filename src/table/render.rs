//! HTML rendering for [`Table`].

use super::{Table, selection::SelectionMode, value::TableRow};
use crate::html::escape;
use std::fmt::Write as _;

/// Turns widget interactions into hrefs. Pages decide how the next state is
/// encoded (the posts page uses query parameters).
pub trait TableLinks<K> {
    /// Target for a click on the header of a sortable column.
    fn header_href(&self, column_key: &str) -> String;

    /// Target for a click on the row identified by `row_key`.
    fn row_href(&self, row_key: &K) -> String;
}

impl<T: TableRow, K: Clone + PartialEq> Table<T, K> {
    /// Renders the table as HTML for `data`.
    #[must_use]
    pub fn render_html(&self, data: &[T], links: &impl TableLinks<K>) -> String {
        let mut html = String::from(
            r#"<div class="overflow-hidden bg-white shadow-sm border border-gray-200 rounded-lg w-full"><table class="min-w-full divide-y divide-gray-200"><thead class="bg-gray-50"><tr>"#,
        );

        let column_count = self.columns.len()
            + usize::from(self.show_selection_column)
            + usize::from(self.show_row_number);

        if self.show_selection_column {
            html.push_str(r#"<th scope="col" class="w-12 p-2 text-center"></th>"#);
        }
        if self.show_row_number {
            html.push_str(r#"<th scope="col" class="w-12 p-2 text-center">#</th>"#);
        }

        for column in &self.columns {
            let header = escape(column.header());
            if column.is_sortable() {
                let indicator = if self.sort.key() == Some(column.key()) {
                    format!(" <span>{}</span>", self.sort.order().indicator())
                } else {
                    String::new()
                };
                let _ = write!(
                    html,
                    r#"<th scope="col" class="p-2 text-left cursor-pointer select-none hover:bg-gray-200"><a href="{}">{header}{indicator}</a></th>"#,
                    escape(&links.header_href(column.key())),
                );
            } else {
                let _ = write!(html, r#"<th scope="col" class="p-2 text-left">{header}</th>"#);
            }
        }
        html.push_str("</tr></thead><tbody>");

        let rows = self.rows(data);
        if rows.is_empty() {
            let _ = write!(
                html,
                r#"<tr><td colspan="{column_count}" class="p-4 text-center text-gray-500">{}</td></tr>"#,
                escape(self.no_data_message()),
            );
        }

        let spacing = if self.collapse_row { "mb-0" } else { "mb-2" };
        for (index, row) in rows.into_iter().enumerate() {
            let key = self.key_of(row);
            let selected = self.selection.contains(&key);
            let highlight = if selected { " bg-blue-100" } else { "" };
            let _ = write!(
                html,
                r#"<tr class="{spacing} hover:bg-gray-200 border-b border-gray-200{highlight}" aria-selected="{selected}">"#,
            );

            if self.show_selection_column {
                let glyph = match (self.selection.mode(), selected) {
                    (SelectionMode::Multiple, true) => "☑",
                    (SelectionMode::Multiple, false) => "☐",
                    (SelectionMode::Single, true) => "◉",
                    (SelectionMode::Single, false) => "○",
                };
                let _ = write!(
                    html,
                    r#"<td class="w-12 p-2 text-center"><a href="{}" aria-checked="{selected}">{glyph}</a></td>"#,
                    escape(&links.row_href(&key)),
                );
            }
            if self.show_row_number {
                let _ = write!(
                    html,
                    r#"<td class="w-12 p-2 text-center">{}</td>"#,
                    index + 1
                );
            }

            for column in &self.columns {
                let value = row.cell(column.key());
                let content = match column.renderer() {
                    Some(render) => render(&value, row),
                    None => escape(&value.to_string()),
                };
                let _ = write!(html, r#"<td class="p-2">{content}</td>"#);
            }
            html.push_str("</tr>");
        }

        html.push_str("</tbody></table></div>");
        html
    }
}
