use serde::{Deserialize, Serialize};

/// Inclusive range of records a detector scored.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SearchWindow {
    pub start_index: usize,
    pub end_index: usize,
    pub start_frame: u32,
    pub end_frame: u32,
}

impl SearchWindow {
    /// Build from inclusive record bounds; `None` if empty or out of range.
    pub(crate) fn from_indices(frames: &[u32], start: usize, end: usize) -> Option<Self> {
        if start > end || end >= frames.len() {
            return None;
        }
        Some(Self {
            start_index: start,
            end_index: end,
            start_frame: frames[start],
            end_frame: frames[end],
        })
    }

    pub fn len(&self) -> usize {
        (self.end_index + 1).saturating_sub(self.start_index)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn indices(&self) -> std::ops::RangeInclusive<usize> {
        self.start_index..=self.end_index
    }
}
