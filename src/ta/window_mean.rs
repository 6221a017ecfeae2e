use std::collections::VecDeque;

/// Slot value marking positions that no pushed sample has reached yet.
const SENTINEL: f64 = -1.0;

/// Fixed-capacity FIFO producing an arithmetic mean once full.
///
/// Slots start sentinel-filled; each push appends the new sample and evicts
/// the oldest slot. The window is warm once the oldest slot no longer holds
/// the sentinel. `mean()` before that point is polluted by sentinels, so
/// callers must gate on the `push` return value.
#[derive(Debug, Clone)]
pub struct WindowedMean {
    slots: VecDeque<f64>,
}

impl WindowedMean {
    /// Creates a window of `capacity` slots. `capacity` must be > 0.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        Self {
            slots: std::iter::repeat(SENTINEL).take(capacity).collect(),
        }
    }

    /// Appends a sample, evicting the oldest slot.
    ///
    /// Returns whether the window is fully warmed.
    pub fn push(&mut self, value: f64) -> bool {
        self.slots.push_back(value);
        self.slots.pop_front();
        self.slots.front() != Some(&SENTINEL)
    }

    /// Arithmetic mean over all slots.
    #[must_use]
    pub fn mean(&self) -> f64 {
        let sum: f64 = self.slots.iter().sum();
        sum / self.slots.len() as f64
    }
}
