//! Bounded undo/redo history.
//!
//! A linear list of entries with a cursor. Entry 0 starts out as the
//! initial sentinel, which is never an undo target. Once the depth limit
//! evicts it, the oldest retained entry becomes reachable instead.
//!
//! Restoring is two-phase: `begin_undo`/`begin_redo` hand out the target
//! entry and suppress `record` until `complete` or `abort` is called. The
//! cursor only moves on `complete`, so a failed restore leaves the history
//! exactly as it was.

use mockupkit_core::{constants, HistoryError};
use std::fmt::Display;

#[derive(Debug, Clone)]
pub struct HistoryManager<T> {
    entries: Vec<T>,
    cursor: usize,
    max_depth: usize,
    sentinel: bool,
    restoring: Option<usize>,
}

impl<T: Clone> HistoryManager<T> {
    pub fn new(initial: T) -> Self {
        Self::with_depth(initial, constants::HISTORY_DEPTH)
    }

    /// `max_depth` counts every retained entry, the sentinel included.
    pub fn with_depth(initial: T, max_depth: usize) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
            max_depth: max_depth.max(1),
            sentinel: true,
            restoring: None,
        }
    }

    /// Drop everything and start over from `initial`.
    pub fn reset(&mut self, initial: T) {
        self.entries.clear();
        self.entries.push(initial);
        self.cursor = 0;
        self.sentinel = true;
        self.restoring = None;
    }

    /// Append an entry after the cursor, discarding any redo branch.
    ///
    /// Ignored while a restore is in progress. Returns whether the entry
    /// was recorded.
    pub fn record(&mut self, entry: T) -> bool {
        if self.restoring.is_some() {
            tracing::trace!("History record suppressed during restore");
            return false;
        }

        self.entries.truncate(self.cursor + 1);
        self.entries.push(entry);
        self.cursor = self.entries.len() - 1;

        while self.entries.len() > self.max_depth {
            self.entries.remove(0);
            self.cursor -= 1;
            self.sentinel = false;
        }
        true
    }

    fn floor(&self) -> usize {
        usize::from(self.sentinel)
    }

    pub fn can_undo(&self) -> bool {
        self.restoring.is_none() && self.cursor > self.floor()
    }

    pub fn can_redo(&self) -> bool {
        self.restoring.is_none() && self.cursor + 1 < self.entries.len()
    }

    pub fn is_restoring(&self) -> bool {
        self.restoring.is_some()
    }

    /// Start restoring the previous entry.
    pub fn begin_undo(&mut self) -> Option<T> {
        if !self.can_undo() {
            return None;
        }
        self.begin(self.cursor - 1)
    }

    /// Start restoring the next entry.
    pub fn begin_redo(&mut self) -> Option<T> {
        if !self.can_redo() {
            return None;
        }
        self.begin(self.cursor + 1)
    }

    fn begin(&mut self, target: usize) -> Option<T> {
        let entry = self.entries.get(target)?.clone();
        self.restoring = Some(target);
        Some(entry)
    }

    /// Finish a restore successfully and move the cursor.
    pub fn complete(&mut self) {
        if let Some(target) = self.restoring.take() {
            self.cursor = target;
        }
    }

    /// Abandon a restore; the cursor stays where it was.
    pub fn abort(&mut self) {
        self.restoring = None;
    }

    /// Undo through `restore`.
    ///
    /// Returns `Ok(false)` when there is nothing to undo.
    pub fn undo<F, E>(&mut self, restore: F) -> Result<bool, HistoryError>
    where
        F: FnOnce(&T) -> Result<(), E>,
        E: Display,
    {
        match self.begin_undo() {
            Some(entry) => self.finish(&entry, restore),
            None => Ok(false),
        }
    }

    /// Redo through `restore`.
    pub fn redo<F, E>(&mut self, restore: F) -> Result<bool, HistoryError>
    where
        F: FnOnce(&T) -> Result<(), E>,
        E: Display,
    {
        match self.begin_redo() {
            Some(entry) => self.finish(&entry, restore),
            None => Ok(false),
        }
    }

    fn finish<F, E>(&mut self, entry: &T, restore: F) -> Result<bool, HistoryError>
    where
        F: FnOnce(&T) -> Result<(), E>,
        E: Display,
    {
        let index = self.restoring.unwrap_or(self.cursor);
        match restore(entry) {
            Ok(()) => {
                self.complete();
                Ok(true)
            }
            Err(e) => {
                self.abort();
                Err(HistoryError::RestoreFailed {
                    index,
                    reason: e.to_string(),
                })
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn current(&self) -> Option<&T> {
        self.entries.get(self.cursor)
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }
}
