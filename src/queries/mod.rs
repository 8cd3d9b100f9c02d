//! Query modules for the product dashboard SDK.
//!
//! Each module provides a query struct that borrows from a
//! [`Connection`](crate::connection::Connection) and exposes methods returning
//! `Result<T>` with typed model payloads.

pub mod categories;
pub mod products;

pub use categories::CategoryQuery;
pub use products::{ListProductsParams, ProductQuery};
