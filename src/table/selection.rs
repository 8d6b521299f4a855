//! Row selection keyed by a caller-supplied identity.

use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionMode {
    Single,
    #[default]
    Multiple,
}

type OnChange<K> = Box<dyn FnMut(&[K]) + Send>;

/// Ordered set of selected row keys plus an optional change callback.
pub struct Selection<K> {
    mode: SelectionMode,
    selected: Vec<K>,
    on_change: Option<OnChange<K>>,
}

impl<K: Clone + PartialEq> Selection<K> {
    #[must_use]
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            selected: Vec::new(),
            on_change: None,
        }
    }

    /// Restores a selection without firing the callback. Duplicate keys are
    /// dropped and single mode keeps only the first key.
    #[must_use]
    pub fn from_keys(mode: SelectionMode, keys: impl IntoIterator<Item = K>) -> Self {
        let mut selected: Vec<K> = Vec::new();
        for key in keys {
            if !selected.contains(&key) {
                selected.push(key);
            }
        }
        if mode == SelectionMode::Single {
            selected.truncate(1);
        }
        Self {
            mode,
            selected,
            on_change: None,
        }
    }

    #[must_use]
    pub fn with_on_change(mut self, on_change: impl FnMut(&[K]) + Send + 'static) -> Self {
        self.on_change = Some(Box::new(on_change));
        self
    }

    #[must_use]
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    #[must_use]
    pub fn selected(&self) -> &[K] {
        &self.selected
    }

    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.selected.contains(key)
    }

    /// The selection that toggling `key` would produce.
    #[must_use]
    pub fn toggled(&self, key: &K) -> Vec<K> {
        match self.mode {
            SelectionMode::Multiple => {
                if self.selected.contains(key) {
                    self.selected
                        .iter()
                        .filter(|selected| *selected != key)
                        .cloned()
                        .collect()
                } else {
                    let mut next = self.selected.clone();
                    next.push(key.clone());
                    next
                }
            }
            SelectionMode::Single => {
                if self.selected.contains(key) {
                    Vec::new()
                } else {
                    vec![key.clone()]
                }
            }
        }
    }

    /// Toggles `key` and notifies the callback once with the full selection.
    pub fn toggle(&mut self, key: &K) -> &[K] {
        self.selected = self.toggled(key);
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(&self.selected);
        }
        &self.selected
    }
}

impl<K: fmt::Debug> fmt::Debug for Selection<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selection")
            .field("mode", &self.mode)
            .field("selected", &self.selected)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}
