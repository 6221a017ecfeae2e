/// Acceleration factor ceiling shared by every tracker instance.
const MAX_ACCELERATION: f64 = 0.2;

#[derive(Debug, Clone, Copy)]
struct Observation {
    low: f64,
    high: f64,
    close: f64,
}

/// Trend-following stop-and-reverse tracker.
///
/// Phases per observation:
/// - no prior observation: record it, emit 0 (no stop defined yet)
/// - one prior observation: pick the initial trend from close vs. prior
///   close, seed the extreme point from the current bar and the stop from
///   the prior bar
/// - steady state: re-evaluate trend continuation against the stop, advance
///   the extreme point and stop, or flip and snap the stop to the abandoned
///   trend's extreme point
#[derive(Debug, Clone)]
pub struct ParabolicTracker {
    step: f64,
    acceleration: f64,
    extreme: f64,
    stop: f64,
    up_trend: bool,
    prev: Option<Observation>,
}

impl ParabolicTracker {
    /// Creates a tracker with the given acceleration increment
    /// (conventionally 0.02).
    #[must_use]
    pub fn new(step: f64) -> Self {
        Self {
            step,
            acceleration: 0.0,
            extreme: 0.0,
            stop: 0.0,
            up_trend: true,
            prev: None,
        }
    }

    /// Current trend direction, for color-coding the overlay.
    #[must_use]
    pub fn is_uptrend(&self) -> bool {
        self.up_trend
    }

    /// Feeds the next bar and returns the stop-and-reverse level.
    pub fn update(&mut self, low: f64, high: f64, close: f64) -> f64 {
        match self.prev {
            None => {}
            Some(prev) if self.acceleration == 0.0 => {
                self.acceleration = self.step;
                self.up_trend = close > prev.close;
                if self.up_trend {
                    self.extreme = high;
                    self.stop = prev.high;
                } else {
                    self.extreme = low;
                    self.stop = prev.low;
                }
            }
            Some(_) => {
                let prev_trend = self.up_trend;
                let prev_extreme = self.extreme;

                // The trend survives only while the stop stays on the far
                // side of the bar.
                self.up_trend = if prev_trend {
                    self.stop < low
                } else {
                    self.stop < high
                };

                // Track the most favorable price in the trend direction,
                // clamped by a same-bar stop breach.
                self.extreme = if self.up_trend {
                    if self.stop > low {
                        low
                    } else {
                        high.max(self.extreme)
                    }
                } else if self.stop < high {
                    high
                } else {
                    low.min(self.extreme)
                };

                if self.up_trend == prev_trend {
                    if prev_extreme != self.extreme && self.acceleration < MAX_ACCELERATION {
                        self.acceleration += self.step;
                    }
                    self.stop += self.acceleration * (self.extreme - self.stop);
                } else {
                    self.acceleration = self.step;
                    self.stop = prev_extreme;
                }
            }
        }

        self.prev = Some(Observation { low, high, close });
        self.stop
    }
}
