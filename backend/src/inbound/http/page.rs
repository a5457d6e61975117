//! Collection envelope shared by list endpoints.

use serde::Serialize;

/// `{"content": [...]}` wrapper around a listed collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
}

impl<T> From<Vec<T>> for Page<T> {
    fn from(content: Vec<T>) -> Self {
        Self { content }
    }
}
