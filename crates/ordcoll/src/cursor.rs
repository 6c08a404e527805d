//! Stepwise traversal.
//!
//! Each collection carries one cursor, an ordinal position into its entries.
//! The cursor starts on the first entry, and `None` is returned whenever it
//! points past either end. Stepping off an end leaves it there: `next` and
//! `prev` keep returning `None` until `reset` or `end` brings it back.

use ordcoll_core::Key;

use crate::collection::Collection;
use crate::value::Value;

impl Collection {
    fn cursor_pos(&self) -> Option<usize> {
        self.cursor.filter(|&c| c < self.len())
    }

    /// Value under the cursor.
    pub fn current(&self) -> Option<&Value> {
        self.cursor_pos()
            .and_then(|c| self.get_index(c))
            .map(|(_, v)| v)
    }

    /// Key under the cursor.
    pub fn key(&self) -> Option<&Key> {
        self.cursor_pos()
            .and_then(|c| self.get_index(c))
            .map(|(k, _)| k)
    }

    /// Advance the cursor and return the new current value.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&Value> {
        self.cursor = match self.cursor_pos() {
            Some(c) if c + 1 < self.len() => Some(c + 1),
            _ => None,
        };
        self.current()
    }

    /// Step the cursor back and return the new current value.
    pub fn prev(&mut self) -> Option<&Value> {
        self.cursor = match self.cursor_pos() {
            Some(c) if c > 0 => Some(c - 1),
            _ => None,
        };
        self.current()
    }

    /// Move the cursor to the first entry and return its value.
    pub fn reset(&mut self) -> Option<&Value> {
        self.cursor = Some(0);
        self.current()
    }

    /// Move the cursor to the last entry and return its value.
    pub fn end(&mut self) -> Option<&Value> {
        self.cursor = Some(self.len().saturating_sub(1));
        self.current()
    }
}
