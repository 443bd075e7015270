//! View-local resource lists.
//!
//! Each view keeps its own copy of whatever it fetched; there is no shared
//! cache. [`ResourceList`] encodes the update rules every view follows:
//!
//! - a successful load replaces the items with exactly what the server sent;
//! - a failed load keeps the previous items and records the error;
//! - mutations are applied only after the server confirmed them;
//! - a delete is sent only after the user confirmed it ([`confirm_then_delete`]).

use std::fmt::Display;
use std::future::Future;

/// A backend record with a stable identifier.
pub trait Resource {
    fn id(&self) -> &str;
}

/// Where a list is in its load cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceList<T> {
    items: Vec<T>,
    status: LoadStatus,
}

impl<T> Default for ResourceList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            status: LoadStatus::Loading,
        }
    }
}

impl<T: Resource> ResourceList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    /// Loaded successfully and the server had nothing.
    pub fn is_empty_loaded(&self) -> bool {
        self.status == LoadStatus::Loaded && self.items.is_empty()
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            LoadStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Apply the outcome of a load. On failure the current items are kept.
    pub fn apply_load<E: Display>(&mut self, result: Result<Vec<T>, E>) {
        match result {
            Ok(items) => {
                self.items = items;
                self.status = LoadStatus::Loaded;
            }
            Err(err) => {
                self.status = LoadStatus::Failed(err.to_string());
            }
        }
    }

    /// Put `item` at the head, dropping any existing entry with the same id.
    pub fn prepend(&mut self, item: T) {
        self.items.retain(|existing| existing.id() != item.id());
        self.items.insert(0, item);
    }

    /// Remove the entry with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|existing| existing.id() != id);
        self.items.len() != before
    }

    pub fn find(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }
}

/// Outcome of a delete the user was asked to confirm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal {
    /// The prompt was dismissed. Nothing was sent.
    Cancelled,
    /// The server deleted the record with this id.
    Removed(String),
}

impl<T: Resource> ResourceList<T> {
    /// Apply a delete outcome. Only a server-confirmed removal changes the list.
    pub fn apply_removal<E>(&mut self, outcome: &Result<Removal, E>) -> bool {
        match outcome {
            Ok(Removal::Removed(id)) => self.remove(id),
            _ => false,
        }
    }
}

/// Await the user's answer, then run `delete` only if it was `true`.
///
/// `delete` is a lazy future, so no request exists until the answer is in.
pub async fn confirm_then_delete<E, F>(
    id: &str,
    confirmed: impl Future<Output = bool>,
    delete: F,
) -> Result<Removal, E>
where
    F: Future<Output = Result<(), E>>,
{
    if !confirmed.await {
        return Ok(Removal::Cancelled);
    }
    delete.await?;
    Ok(Removal::Removed(id.to_string()))
}
