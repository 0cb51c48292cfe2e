use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to move an item of a [SortableList].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    /// The source index does not point at an item.
    #[error("Cannot move item {from}: the list has {len} items")]
    OutOfRange {
        #[allow(missing_docs)]
        from: usize,
        #[allow(missing_docs)]
        len: usize,
    },
}

/// An ordered list the user can rearrange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortableList<T> {
    items: Vec<T>,
}

impl<T> Default for SortableList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> SortableList<T> {
    #[allow(missing_docs)]
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    #[allow(missing_docs)]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[allow(missing_docs)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Replaces the whole list.
    pub fn set(&mut self, items: Vec<T>) {
        self.items = items;
    }

    /// Appends items at the end, keeping their order.
    pub fn extend(&mut self, items: impl IntoIterator<Item = T>) {
        self.items.extend(items);
    }

    #[allow(missing_docs)]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Removes the item at `from` and inserts it at `to`.
    ///
    /// `to` is interpreted after the removal and clamped to the end of the list, so moving to any
    /// index past the end moves the item last.
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<(), MoveError> {
        if from >= self.items.len() {
            return Err(MoveError::OutOfRange {
                from,
                len: self.items.len(),
            });
        }

        let item = self.items.remove(from);
        let to = to.min(self.items.len());
        self.items.insert(to, item);
        Ok(())
    }
}

impl<T> From<Vec<T>> for SortableList<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T> From<SortableList<T>> for Vec<T> {
    fn from(list: SortableList<T>) -> Self {
        list.items
    }
}
