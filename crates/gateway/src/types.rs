//! Gateway types: the resource enumeration and its policies

use std::fmt;
use std::str::FromStr;
use storage::Filter;

use crate::error::GatewayError;

/// Owner column, never writable through update
pub const OWNER_COLUMN: &str = "user_id";
/// Primary key column
pub const ID_COLUMN: &str = "id";
/// Denormalized like counter on shelves
pub const LIKES_COLUMN: &str = "likes_count";

const SHELF_COLUMNS: &[&str] = &[
    "id",
    "created_at",
    "user_id",
    "name",
    "description",
    "is_public",
    "likes_count",
];

const SOUP_IN_SHELF_COLUMNS: &[&str] = &[
    "id",
    "created_at",
    "shelf_id",
    "name",
    "description",
    "added_at",
];

const SHELF_LIKE_COLUMNS: &[&str] = &["id", "created_at", "user_id", "shelf_id"];

const SOUP_COLUMNS: &[&str] = &[
    "id",
    "created_at",
    "user_id",
    "name",
    "description",
    "is_public",
    "ingredients",
    "preparation_time",
    "dietary_restrictions",
    "symptoms_addressed",
];

/// Tables reachable through the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    SoupShelves,
    SoupsInShelf,
    ShelfLikes,
    Soups,
}

/// How a create request is carried out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreatePolicy {
    /// Plain insert
    Insert,
    /// Return the row matching `keys` if one exists, insert otherwise
    GetOrCreate { keys: &'static [&'static str] },
}

/// How an update request is carried out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatePolicy {
    /// Apply the body to whatever the selector matches
    Direct,
    /// Require the primary key; `counter` in the body is a delta
    CounterDelta { counter: &'static str },
}

impl Resource {
    pub const ALL: [Resource; 4] = [
        Resource::SoupShelves,
        Resource::SoupsInShelf,
        Resource::ShelfLikes,
        Resource::Soups,
    ];

    /// Store table name
    pub fn table_name(&self) -> &'static str {
        match self {
            Resource::SoupShelves => "soup_shelves",
            Resource::SoupsInShelf => "soups_in_shelf",
            Resource::ShelfLikes => "shelf_likes",
            Resource::Soups => "soups",
        }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Resource::SoupShelves => SHELF_COLUMNS,
            Resource::SoupsInShelf => SOUP_IN_SHELF_COLUMNS,
            Resource::ShelfLikes => SHELF_LIKE_COLUMNS,
            Resource::Soups => SOUP_COLUMNS,
        }
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns().contains(&column)
    }

    pub fn create_policy(&self) -> CreatePolicy {
        match self {
            Resource::SoupShelves => CreatePolicy::GetOrCreate {
                keys: &[OWNER_COLUMN, "name"],
            },
            Resource::SoupsInShelf | Resource::ShelfLikes | Resource::Soups => {
                CreatePolicy::Insert
            }
        }
    }

    pub fn update_policy(&self) -> UpdatePolicy {
        match self {
            Resource::SoupShelves => UpdatePolicy::CounterDelta {
                counter: LIKES_COLUMN,
            },
            Resource::SoupsInShelf | Resource::ShelfLikes | Resource::Soups => {
                UpdatePolicy::Direct
            }
        }
    }

    /// Check that every filter targets a known column
    pub fn check_filters(&self, filters: &[Filter]) -> Result<(), GatewayError> {
        match filters.iter().find(|f| !self.has_column(&f.column)) {
            Some(f) => Err(GatewayError::UnknownColumn {
                table: self.table_name().to_string(),
                column: f.column.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl FromStr for Resource {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|r| r.table_name() == s)
            .ok_or_else(|| GatewayError::UnknownTable(s.to_string()))
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

/// Which rows a write applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// By primary key
    Id(String),
    /// By an equality filter on one column
    Column(Filter),
    /// Every row of the table
    All,
}

impl Selector {
    /// Build from an optional primary key and an optional column filter; the
    /// primary key wins
    pub fn from_parts(id: Option<String>, filter: Option<Filter>) -> Self {
        match (id, filter) {
            (Some(id), _) => Selector::Id(id),
            (None, Some(filter)) => Selector::Column(filter),
            (None, None) => Selector::All,
        }
    }

    pub fn is_unscoped(&self) -> bool {
        matches!(self, Selector::All)
    }

    pub fn filters(&self) -> Vec<Filter> {
        match self {
            Selector::Id(id) => vec![Filter::eq(ID_COLUMN, id.as_str())],
            Selector::Column(filter) => vec![filter.clone()],
            Selector::All => Vec::new(),
        }
    }
}
