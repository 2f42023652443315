//! Common library for the ResidentialHub application
//!
//! This crate provides shared functionality used across the ResidentialHub
//! services, including the in-memory storage primitives and error handling.

pub mod error;
pub mod store;

/// Example usage of the store module
///
/// ```rust,no_run
/// use common::store::Table;
///
/// #[tokio::main]
/// async fn main() {
///     let table: Table<i64> = Table::new();
///     table.write().await.push(1);
///     println!("Rows stored: {}", table.read().await.len());
/// }
/// ```
pub fn example_usage() {}
