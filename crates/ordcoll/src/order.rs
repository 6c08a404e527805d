//! Ordering and selection: the sort family, multi-column sort, duplicate
//! removal and search.
//!
//! Every sort is stable, including the descending ones: entries that
//! compare equal keep their relative order. Sorting rebuilds the store and
//! returns the cursor to the first entry.

use std::cmp::Ordering;

use ordcoll_core::{CollectionError, Equality, Key, Result, SortFlags, SortSpec};

use crate::collection::Collection;
use crate::equality::{compare, compare_keys, equals};
use crate::value::Value;

/// What happens to keys once the entries are in their new order.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Rekey {
    /// Every entry keeps its key.
    Keep,
    /// Every entry gets a fresh key `0..n`.
    Reindex,
}

impl Collection {
    fn sort_entries<F>(&mut self, rekey: Rekey, mut cmp: F)
    where
        F: FnMut(&(Key, Value), &(Key, Value)) -> Ordering,
    {
        let mut entries = self.take_entries();
        entries.sort_by(|a, b| cmp(a, b));
        match rekey {
            Rekey::Keep => self.rebuild(entries),
            Rekey::Reindex => self.reindex(entries),
        }
    }

    /// Replace all entries with the values of `entries`, keyed `0..n`.
    pub(crate) fn reindex(&mut self, entries: Vec<(Key, Value)>) {
        let renumbered = entries.into_iter().map(|(_, v)| (Key::Int(0), v)).collect();
        self.rebuild_renumbered(renumbered);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // By value
    // ─────────────────────────────────────────────────────────────────────────

    /// Sort values ascending and rekey `0..n`.
    pub fn sort(&mut self, flags: SortFlags) {
        self.sort_entries(Rekey::Reindex, |a, b| compare(&a.1, &b.1, flags));
    }

    /// Sort values descending and rekey `0..n`.
    pub fn rsort(&mut self, flags: SortFlags) {
        self.sort_entries(Rekey::Reindex, |a, b| compare(&b.1, &a.1, flags));
    }

    /// Sort values ascending, keeping keys.
    pub fn asort(&mut self, flags: SortFlags) {
        self.sort_entries(Rekey::Keep, |a, b| compare(&a.1, &b.1, flags));
    }

    /// Sort values descending, keeping keys.
    pub fn arsort(&mut self, flags: SortFlags) {
        self.sort_entries(Rekey::Keep, |a, b| compare(&b.1, &a.1, flags));
    }

    /// Sort values with `cmp` and rekey `0..n`.
    pub fn usort<F>(&mut self, mut cmp: F)
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        self.sort_entries(Rekey::Reindex, |a, b| cmp(&a.1, &b.1));
    }

    /// Sort values with `cmp`, keeping keys.
    pub fn uasort<F>(&mut self, mut cmp: F)
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        self.sort_entries(Rekey::Keep, |a, b| cmp(&a.1, &b.1));
    }

    /// Natural-order sort of values, keeping keys.
    pub fn natsort(&mut self) {
        self.asort(SortFlags::Natural);
    }

    /// Case-insensitive natural-order sort of values, keeping keys.
    pub fn natcasesort(&mut self) {
        self.asort(SortFlags::NaturalIgnoreCase);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // By key
    // ─────────────────────────────────────────────────────────────────────────

    /// Sort by key ascending.
    pub fn ksort(&mut self, flags: SortFlags) {
        self.sort_entries(Rekey::Keep, |a, b| compare_keys(&a.0, &b.0, flags));
    }

    /// Sort by key descending.
    pub fn krsort(&mut self, flags: SortFlags) {
        self.sort_entries(Rekey::Keep, |a, b| compare_keys(&b.0, &a.0, flags));
    }

    /// Sort by key with `cmp`.
    pub fn uksort<F>(&mut self, mut cmp: F)
    where
        F: FnMut(&Key, &Key) -> Ordering,
    {
        self.sort_entries(Rekey::Keep, |a, b| cmp(&a.0, &b.0));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Multi-column
    // ─────────────────────────────────────────────────────────────────────────

    /// Sort values by `spec`. Integer keys are renumbered, string keys kept.
    pub fn multisort(&mut self, spec: SortSpec) {
        self.sort_rows(spec, &mut []);
    }

    /// Sort values by `spec`, breaking ties with each of `columns` in turn.
    ///
    /// Every column is a parallel collection of the same length; each one is
    /// reordered along with the receiver, so row `i` stays row `i` across
    /// all of them. Integer keys are renumbered and string keys kept, in the
    /// receiver and in every column.
    pub fn multisort_with(
        &mut self,
        spec: SortSpec,
        columns: &mut [(&mut Collection, SortSpec)],
    ) -> Result<()> {
        let rows = self.len();
        if let Some((column, _)) = columns.iter().find(|(c, _)| c.len() != rows) {
            return Err(CollectionError::LengthMismatch {
                expected: rows,
                actual: column.len(),
            });
        }
        self.sort_rows(spec, columns);
        Ok(())
    }

    /// Sort the receiver and `columns` together. Callers guarantee every
    /// column has the receiver's length.
    fn sort_rows(&mut self, spec: SortSpec, columns: &mut [(&mut Collection, SortSpec)]) {
        let rows = self.len();
        tracing::debug!(
            "multisort: {} rows, {} tie-break columns",
            rows,
            columns.len()
        );

        let mut order: Vec<usize> = (0..rows).collect();
        {
            let primary = self.entries();
            order.sort_by(|&i, &j| {
                let first = spec
                    .order
                    .apply(compare(&primary[i].1, &primary[j].1, spec.flags));
                columns.iter().fold(first, |acc, (column, col_spec)| {
                    acc.then_with(|| {
                        let entries = column.entries();
                        col_spec
                            .order
                            .apply(compare(&entries[i].1, &entries[j].1, col_spec.flags))
                    })
                })
            });
        }

        apply_permutation(self, &order);
        for (column, _) in columns.iter_mut() {
            apply_permutation(column, &order);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Selection
    // ─────────────────────────────────────────────────────────────────────────

    /// Remove entries whose value compares equal to an earlier one.
    ///
    /// Values are compared with `flags`, `SortFlags::String` when `None`.
    /// The first occurrence of each value keeps its key and position.
    pub fn unique(&mut self, flags: Option<SortFlags>) {
        let flags = flags.unwrap_or(SortFlags::String);
        let entries = self.entries();
        let mut order: Vec<usize> = (0..entries.len()).collect();
        order.sort_by(|&a, &b| compare(&entries[a].1, &entries[b].1, flags));

        let mut duplicate = vec![false; entries.len()];
        let mut run_head: Option<usize> = None;
        for &i in &order {
            match run_head {
                Some(head)
                    if compare(&entries[head].1, &entries[i].1, flags) == Ordering::Equal =>
                {
                    duplicate[i] = true;
                }
                _ => run_head = Some(i),
            }
        }

        let mut pos = 0;
        self.retain_entries(|_, _| {
            let keep = !duplicate[pos];
            pos += 1;
            keep
        });
    }

    /// Key of the first value equal to `needle` under `mode`.
    pub fn search(&self, needle: &Value, mode: Equality) -> Option<&Key> {
        self.iter()
            .find(|(_, v)| equals(v, needle, mode))
            .map(|(k, _)| k)
    }

    /// Whether some value equals `needle` under `mode`.
    pub fn in_array(&self, needle: &Value, mode: Equality) -> bool {
        self.values_iter().any(|v| equals(v, needle, mode))
    }
}

/// Reorder `target` so that position `p` holds the entry previously at
/// `order[p]`, then renumber its integer keys.
fn apply_permutation(target: &mut Collection, order: &[usize]) {
    let mut slots: Vec<Option<(Key, Value)>> =
        target.take_entries().into_iter().map(Some).collect();
    let reordered = order.iter().filter_map(|&i| slots[i].take()).collect();
    target.rebuild_renumbered(reordered);
}
