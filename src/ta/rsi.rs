use std::collections::VecDeque;

/// Streaming relative-strength oscillator over consecutive price deltas.
///
/// The first push only records the baseline price. Each later push appends
/// the delta to a buffer bounded to `period` entries; once full, the deltas
/// are partitioned into gain and loss sums and the oldest delta is evicted.
///
/// A flat window (`gains + losses == 0`) reports not-ready instead of
/// dividing zero by zero; the previous `value()` reading is kept.
#[derive(Debug, Clone)]
pub struct RelativeStrengthIndex {
    period: usize,
    last: Option<f64>,
    deltas: VecDeque<f64>,
    value: i64,
}

impl RelativeStrengthIndex {
    /// Creates an oscillator with the given lookback period (conventionally 14).
    #[must_use]
    pub fn new(period: usize) -> Self {
        debug_assert!(period >= 2);
        Self {
            period,
            last: None,
            deltas: VecDeque::with_capacity(period),
            value: 0,
        }
    }

    /// Last computed reading in `0..=100`; 0 before the first ready push.
    #[must_use]
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Feeds the next price. Returns whether a fresh reading was computed.
    ///
    /// Negative prices are rejected without mutating any state.
    pub fn push(&mut self, price: f64) -> bool {
        if price < 0.0 {
            return false;
        }

        let Some(last) = self.last else {
            self.last = Some(price);
            return false;
        };

        self.deltas.push_back(price - last);
        self.last = Some(price);
        if self.deltas.len() < self.period {
            return false;
        }

        let mut up = 0.0;
        let mut down = 0.0;
        for &delta in &self.deltas {
            if delta >= 0.0 {
                up += delta;
            } else {
                down -= delta;
            }
        }
        self.deltas.pop_front();

        if up + down == 0.0 {
            return false;
        }

        self.value = (up / (up + down) * 100.0) as i64;
        true
    }
}
