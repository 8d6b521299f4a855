//! Generic sortable/selectable table widget.
//!
//! The widget owns two pieces of state: a [`SortState`] changed by header
//! clicks and a [`Selection`] changed by row toggles. Rows are never mutated;
//! [`Table::rows`] returns a sorted view over the caller's slice.
//!
//! Row identity for selection comes from the key extractor passed to
//! [`Table::new`], so two rows with identical content but different keys are
//! selected independently.

mod column;
mod render;
mod selection;
mod sort;
mod value;

pub use column::Column;
pub use render::TableLinks;
pub use selection::{Selection, SelectionMode};
pub use sort::{SortOrder, SortState};
pub use value::{CellValue, TableRow, compare_present};

use std::collections::HashMap;

pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_NO_DATA_MESSAGE: &str = "Data not found";

type KeyFn<T, K> = Box<dyn Fn(&T) -> K + Send + Sync>;

pub struct Table<T, K> {
    columns: Vec<Column<T>>,
    key_of: KeyFn<T, K>,
    show_row_number: bool,
    show_selection_column: bool,
    collapse_row: bool,
    no_data_message: HashMap<String, String>,
    language: String,
    sort: SortState,
    selection: Selection<K>,
}

impl<T, K: Clone + PartialEq> Table<T, K> {
    #[must_use]
    pub fn new(columns: Vec<Column<T>>, key_of: impl Fn(&T) -> K + Send + Sync + 'static) -> Self {
        let mut no_data_message = HashMap::new();
        no_data_message.insert(
            DEFAULT_LANGUAGE.to_string(),
            DEFAULT_NO_DATA_MESSAGE.to_string(),
        );

        Self {
            columns,
            key_of: Box::new(key_of),
            show_row_number: false,
            show_selection_column: true,
            collapse_row: true,
            no_data_message,
            language: DEFAULT_LANGUAGE.to_string(),
            sort: SortState::default(),
            selection: Selection::new(SelectionMode::default()),
        }
    }

    #[must_use]
    pub fn with_row_numbers(mut self, show: bool) -> Self {
        self.show_row_number = show;
        self
    }

    #[must_use]
    pub fn with_selection_column(mut self, show: bool) -> Self {
        self.show_selection_column = show;
        self
    }

    #[must_use]
    pub fn with_collapse_row(mut self, collapse: bool) -> Self {
        self.collapse_row = collapse;
        self
    }

    /// Replaces the language-keyed "no data" messages.
    #[must_use]
    pub fn with_no_data_message(mut self, messages: HashMap<String, String>) -> Self {
        self.no_data_message = messages;
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Restores a sort state. A key that does not name a sortable column is
    /// dropped and the rows keep their input order.
    #[must_use]
    pub fn with_sort(mut self, sort: SortState) -> Self {
        self.sort = match sort.key() {
            Some(key) if !self.is_sortable(key) => SortState::new(None, sort.order()),
            _ => sort,
        };
        self
    }

    #[must_use]
    pub fn with_selection(mut self, selection: Selection<K>) -> Self {
        self.selection = selection;
        self
    }

    #[must_use]
    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    #[must_use]
    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    #[must_use]
    pub fn selection(&self) -> &Selection<K> {
        &self.selection
    }

    #[must_use]
    pub fn key_of(&self, row: &T) -> K {
        (self.key_of)(row)
    }

    #[must_use]
    pub fn is_selected(&self, row: &T) -> bool {
        self.selection.contains(&self.key_of(row))
    }

    fn is_sortable(&self, key: &str) -> bool {
        self.columns
            .iter()
            .any(|column| column.key() == key && column.is_sortable())
    }

    /// Applies a header click. Returns `false` for unknown or non-sortable columns.
    pub fn click_header(&mut self, key: &str) -> bool {
        let sortable = self.is_sortable(key);
        if sortable {
            self.sort.click(key);
        }
        sortable
    }

    pub fn toggle_row(&mut self, row: &T) -> &[K] {
        let key = self.key_of(row);
        self.selection.toggle(&key)
    }

    pub fn toggle_key(&mut self, key: &K) -> &[K] {
        self.selection.toggle(key)
    }

    /// Message for the active language, falling back to English.
    #[must_use]
    pub fn no_data_message(&self) -> &str {
        self.no_data_message
            .get(&self.language)
            .or_else(|| self.no_data_message.get(DEFAULT_LANGUAGE))
            .map_or(DEFAULT_NO_DATA_MESSAGE, String::as_str)
    }
}

impl<T: TableRow, K: Clone + PartialEq> Table<T, K> {
    /// Rows in display order.
    #[must_use]
    pub fn rows<'a>(&self, data: &'a [T]) -> Vec<&'a T> {
        self.sort.apply(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    fn columns() -> Vec<Column<Value>> {
        vec![
            Column::new("title", "Title").sortable(),
            Column::new("description", "Description"),
            Column::new("price", "Price").sortable(),
        ]
    }

    fn id_of(row: &Value) -> i64 {
        row.get("id").and_then(Value::as_i64).unwrap_or_default()
    }

    #[test]
    fn non_sortable_header_click_is_ignored() {
        let mut table = Table::new(columns(), id_of);
        assert!(!table.click_header("description"));
        assert!(!table.click_header("unknown"));
        assert_eq!(table.sort().key(), None);
        assert!(table.click_header("price"));
        assert_eq!(table.sort().key(), Some("price"));
    }

    #[test]
    fn rows_follow_sort_state() {
        let data = vec![
            json!({"id": 1, "title": "b", "price": 3}),
            json!({"id": 2, "title": "a", "price": 1}),
        ];
        let mut table = Table::new(columns(), id_of);
        table.click_header("price");
        let ids: Vec<i64> = table.rows(&data).into_iter().map(id_of).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn restored_sort_on_non_sortable_column_is_dropped() {
        let data = vec![
            json!({"id": 1, "description": "zzz"}),
            json!({"id": 2, "description": "aaa"}),
        ];
        let table = Table::new(columns(), id_of)
            .with_sort(SortState::new(Some("description".to_string()), SortOrder::Asc));
        assert_eq!(table.sort().key(), None);
        let ids: Vec<i64> = table.rows(&data).into_iter().map(id_of).collect();
        assert_eq!(ids, vec![1, 2]);

        let table = Table::new(columns(), id_of)
            .with_sort(SortState::new(Some("price".to_string()), SortOrder::Desc));
        assert_eq!(table.sort().key(), Some("price"));
        assert_eq!(table.sort().order(), SortOrder::Desc);
    }

    #[test]
    fn identical_rows_select_independently() {
        let data = vec![
            json!({"id": 1, "title": "same"}),
            json!({"id": 2, "title": "same"}),
        ];
        let mut table = Table::new(columns(), id_of);
        table.toggle_row(&data[0]);
        assert!(table.is_selected(&data[0]));
        assert!(!table.is_selected(&data[1]));
    }

    #[test]
    fn toggle_row_notifies_once() {
        let counter = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&counter);
        let selection =
            Selection::new(SelectionMode::Multiple).with_on_change(move |_keys: &[i64]| {
                seen.fetch_add(1, Ordering::SeqCst);
            });
        let data = vec![json!({"id": 1}), json!({"id": 2})];
        let mut table = Table::new(columns(), id_of).with_selection(selection);

        table.toggle_row(&data[0]);
        table.toggle_row(&data[1]);
        table.toggle_row(&data[0]);

        assert_eq!(counter.load(Ordering::SeqCst), 3);
        assert_eq!(table.selection().selected(), &[2]);
    }

    #[test]
    fn no_data_message_falls_back_to_english() {
        let mut messages = HashMap::new();
        messages.insert("en".to_string(), "No posts".to_string());
        messages.insert("es".to_string(), "Sin publicaciones".to_string());
        let table = Table::new(columns(), id_of)
            .with_no_data_message(messages)
            .with_language("fr");
        assert_eq!(table.no_data_message(), "No posts");

        let table = Table::new(columns(), id_of).with_language("es");
        assert_eq!(table.no_data_message(), DEFAULT_NO_DATA_MESSAGE);
    }

    #[test]
    fn no_data_message_uses_requested_language() {
        let mut messages = HashMap::new();
        messages.insert("en".to_string(), "No posts".to_string());
        messages.insert("es".to_string(), "Sin publicaciones".to_string());
        let table = Table::new(columns(), id_of)
            .with_no_data_message(messages)
            .with_language("es");
        assert_eq!(table.no_data_message(), "Sin publicaciones");
    }

    #[test]
    fn missing_english_entry_uses_builtin_message() {
        let mut messages = HashMap::new();
        messages.insert("de".to_string(), "Keine Daten".to_string());
        let table = Table::new(columns(), id_of)
            .with_no_data_message(messages)
            .with_language("fr");
        assert_eq!(table.no_data_message(), DEFAULT_NO_DATA_MESSAGE);
    }
}
