//! The fixed set of mirrored catalog categories.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical list of local tables that hold mirrored catalog rows.
pub const CATALOG_TABLES: [&str; 5] = ["characters", "comics", "series", "stories", "events"];

/// One of the five mirrored content types. The upstream path segment,
/// the local table and the iteration order are all derived from this
/// enum so category wiring is checked at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Characters,
    Comics,
    Series,
    Stories,
    Events,
}

impl Category {
    /// Sync order for a tick. Categories run strictly sequentially.
    pub const ALL: [Category; 5] = [
        Category::Characters,
        Category::Comics,
        Category::Series,
        Category::Stories,
        Category::Events,
    ];

    /// Upstream API path segment for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Characters => "characters",
            Category::Comics => "comics",
            Category::Series => "series",
            Category::Stories => "stories",
            Category::Events => "events",
        }
    }

    /// Local table holding this category's mirrored rows.
    pub fn table_name(&self) -> &'static str {
        self.as_str()
    }

    /// Characters carry their display text in `name` upstream; every
    /// other category uses `title`.
    pub fn uses_name_field(&self) -> bool {
        matches!(self, Category::Characters)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_names_match_canonical_list() {
        let names: Vec<&str> = Category::ALL.iter().map(|c| c.table_name()).collect();
        assert_eq!(names, CATALOG_TABLES);
    }

    #[test]
    fn only_characters_use_the_name_field() {
        assert!(Category::Characters.uses_name_field());
        for category in [
            Category::Comics,
            Category::Series,
            Category::Stories,
            Category::Events,
        ] {
            assert!(!category.uses_name_field());
        }
    }
}
