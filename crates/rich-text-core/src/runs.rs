//! Attribute runs.
//!
//! Stores the value of a single [`StyleKey`](crate::StyleKey) across a text as a sorted vector of
//! contiguous runs. Lookups use binary search (O(log n)); assignments split at most two runs and
//! merge equal neighbours, so the run list stays minimal.
//!
//! Invariants (for a text of length `len > 0`):
//! - the first run starts at 0 and the last run ends at `len`
//! - runs are contiguous and never empty
//! - adjacent runs hold different values

use crate::attributes::StyleValue;
use std::ops::Range;

/// A maximal span of characters sharing one value.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    /// Character range covered by the run (half-open).
    pub range: Range<usize>,
    /// Value held by every character in the range.
    pub value: StyleValue,
}

impl Run {
    /// Create a run.
    pub fn new(range: Range<usize>, value: StyleValue) -> Self {
        Self { range, value }
    }
}

/// Contiguous run list for one attribute key.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttributeRuns {
    runs: Vec<Run>,
}

impl AttributeRuns {
    /// Runs covering `len` characters with a single `value`.
    pub fn new(len: usize, value: StyleValue) -> Self {
        let runs = if len == 0 {
            Vec::new()
        } else {
            vec![Run::new(0..len, value)]
        };
        Self { runs }
    }

    /// Number of characters covered.
    pub fn len(&self) -> usize {
        self.runs.last().map(|run| run.range.end).unwrap_or(0)
    }

    /// Returns `true` if no characters are covered.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Number of runs.
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// Iterate over all runs in order.
    pub fn iter(&self) -> impl Iterator<Item = &Run> {
        self.runs.iter()
    }

    fn index_at(&self, offset: usize) -> Option<usize> {
        let idx = self.runs.partition_point(|run| run.range.end <= offset);
        (idx < self.runs.len()).then_some(idx)
    }

    /// Value of the character at `offset`, or `None` past the end.
    pub fn value_at(&self, offset: usize) -> Option<&StyleValue> {
        self.index_at(offset).map(|idx| &self.runs[idx].value)
    }

    /// Runs overlapping `range`, clipped to it.
    pub fn runs_in(&self, range: Range<usize>) -> Vec<Run> {
        let end = range.end.min(self.len());
        if range.start >= end {
            return Vec::new();
        }

        let Some(first) = self.index_at(range.start) else {
            return Vec::new();
        };

        self.runs[first..]
            .iter()
            .take_while(|run| run.range.start < end)
            .map(|run| {
                Run::new(
                    run.range.start.max(range.start)..run.range.end.min(end),
                    run.value.clone(),
                )
            })
            .collect()
    }

    /// Assign `value` to every character in `range` (clamped to the covered length).
    pub fn set(&mut self, range: Range<usize>, value: StyleValue) {
        let end = range.end.min(self.len());
        if range.start >= end {
            return;
        }

        let first = self.split_at(range.start);
        let last = self.split_at(end);
        self.runs
            .splice(first..last, std::iter::once(Run::new(range.start..end, value)));
        self.merge_neighbors(first);
    }

    /// Insert `count` characters holding `value` at `offset`, shifting later runs.
    pub fn insert(&mut self, offset: usize, count: usize, value: StyleValue) {
        if count == 0 {
            return;
        }

        let offset = offset.min(self.len());
        let idx = self.split_at(offset);
        for run in &mut self.runs[idx..] {
            run.range.start += count;
            run.range.end += count;
        }
        self.runs.insert(idx, Run::new(offset..offset + count, value));
        self.merge_neighbors(idx);
    }

    /// Remove the characters in `range`, shifting later runs back.
    pub fn remove(&mut self, range: Range<usize>) {
        let end = range.end.min(self.len());
        if range.start >= end {
            return;
        }

        let removed = end - range.start;
        let first = self.split_at(range.start);
        let last = self.split_at(end);
        self.runs.drain(first..last);
        for run in &mut self.runs[first..] {
            run.range.start -= removed;
            run.range.end -= removed;
        }

        if first > 0 && first < self.runs.len() && self.runs[first - 1].value == self.runs[first].value
        {
            let run = self.runs.remove(first);
            self.runs[first - 1].range.end = run.range.end;
        }
    }

    /// Split the run containing `offset` so that a run starts exactly at `offset`.
    ///
    /// Returns the index of that run (or the run count when `offset` is at the end).
    fn split_at(&mut self, offset: usize) -> usize {
        let idx = self.runs.partition_point(|run| run.range.end <= offset);
        if idx == self.runs.len() || self.runs[idx].range.start == offset {
            return idx;
        }

        let tail = Run::new(offset..self.runs[idx].range.end, self.runs[idx].value.clone());
        self.runs[idx].range.end = offset;
        self.runs.insert(idx + 1, tail);
        idx + 1
    }

    fn merge_neighbors(&mut self, idx: usize) {
        if idx + 1 < self.runs.len() && self.runs[idx].value == self.runs[idx + 1].value {
            let next = self.runs.remove(idx + 1);
            self.runs[idx].range.end = next.range.end;
        }
        if idx > 0 && idx < self.runs.len() && self.runs[idx - 1].value == self.runs[idx].value {
            let run = self.runs.remove(idx);
            self.runs[idx - 1].range.end = run.range.end;
        }
    }
}
