//! Header-click sort state and the stable row ordering derived from it.

use super::value::{TableRow, compare_present};
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Parses `asc`/`desc`; anything else is ascending.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    #[must_use]
    pub fn indicator(self) -> &'static str {
        match self {
            Self::Asc => "▲",
            Self::Desc => "▼",
        }
    }
}

/// Active sort column and direction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SortState {
    key: Option<String>,
    order: SortOrder,
}

impl SortState {
    #[must_use]
    pub fn new(key: Option<String>, order: SortOrder) -> Self {
        Self { key, order }
    }

    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    #[must_use]
    pub fn order(&self) -> SortOrder {
        self.order
    }

    /// Same column flips direction, a new column starts ascending.
    pub fn click(&mut self, key: &str) {
        if self.key.as_deref() == Some(key) {
            self.order = self.order.flipped();
        } else {
            self.key = Some(key.to_string());
            self.order = SortOrder::Asc;
        }
    }

    /// Returns the rows in display order without touching the input.
    ///
    /// Missing cells sort after every present cell in both directions and the
    /// sort is stable, so equal rows keep their input order.
    #[must_use]
    pub fn apply<'a, T: TableRow>(&self, rows: &'a [T]) -> Vec<&'a T> {
        let mut sorted: Vec<&T> = rows.iter().collect();
        let Some(key) = self.key.as_deref() else {
            return sorted;
        };

        sorted.sort_by(|a, b| {
            let left = a.cell(key);
            let right = b.cell(key);
            match (left.is_missing(), right.is_missing()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => {
                    let ordering = compare_present(&left, &right);
                    match self.order {
                        SortOrder::Asc => ordering,
                        SortOrder::Desc => ordering.reverse(),
                    }
                }
            }
        });

        sorted
    }
}
