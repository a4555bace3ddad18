//! Validated create/search core of a personal finance tracker.
//!
//! The transaction store is the single owner of the session's list; forms
//! validate input through the schemas before they reach it, and views read it
//! through selectors.

pub mod actors;
pub mod engine;
pub mod forms;
pub mod models;
pub mod schema;
pub mod storage;
pub mod store;
pub mod types;
pub mod views;
