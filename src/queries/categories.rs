//! Read-only category listing.

use crate::cache::QueryKey;
use crate::config::SCOPE_CATEGORIES;
use crate::connection::Connection;
use crate::error::Result;
use crate::models::Category;

/// Query interface for product categories.
pub struct CategoryQuery<'a> {
    conn: &'a Connection,
}

impl<'a> CategoryQuery<'a> {
    /// Create a new `CategoryQuery` bound to the given connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// List every category known to the API.
    pub fn list(&self) -> Result<Vec<Category>> {
        let url = self.conn.read_url(&["categories"]).build();
        self.conn
            .fetch(&categories_key(), &url, "Failed to fetch categories")
    }

    /// Category names, in API order. Used for the filter and form selects.
    pub fn names(&self) -> Result<Vec<String>> {
        Ok(self.list()?.into_iter().map(|c| c.name).collect())
    }
}

/// Cache key of the category listing.
pub fn categories_key() -> QueryKey {
    QueryKey::new(SCOPE_CATEGORIES)
}
