/*!
 * Database module for persistent storage of complaint drafts.
 *
 * This module provides SQLite-based persistence for:
 * - Users, legal profiles and subscriptions with AI budgets
 * - Lawsuit documents and their generated sections
 * - Legal templates, discount and referral codes
 * - Video evidence segments and transcript quotes
 */

pub mod schema;
pub mod connection;
pub mod repository;
pub mod models;

// Re-export main types
pub use connection::{DatabaseConnection, DatabaseStats};
pub use repository::Repository;
