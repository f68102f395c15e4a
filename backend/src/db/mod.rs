//! Persistence for users and generation history.

mod sqlite;

pub use sqlite::{Store, StoreError};
