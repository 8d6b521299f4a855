use super::value::CellValue;
use std::fmt;

type Renderer<T> = Box<dyn Fn(&CellValue, &T) -> String + Send + Sync>;

/// Declarative column definition.
pub struct Column<T> {
    key: String,
    header: String,
    render: Option<Renderer<T>>,
    sortable: bool,
}

impl<T> Column<T> {
    #[must_use]
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            render: None,
            sortable: false,
        }
    }

    #[must_use]
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Custom cell renderer. The returned string is inserted as HTML, so the
    /// renderer is responsible for escaping any text it includes.
    #[must_use]
    pub fn render(mut self, render: impl Fn(&CellValue, &T) -> String + Send + Sync + 'static) -> Self {
        self.render = Some(Box::new(render));
        self
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn header(&self) -> &str {
        &self.header
    }

    #[must_use]
    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    pub(super) fn renderer(&self) -> Option<&Renderer<T>> {
        self.render.as_ref()
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("render", &self.render.is_some())
            .finish()
    }
}
