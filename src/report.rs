use std::collections::BTreeMap;

/// A keyed accumulator for per-run metrics
///
/// Drivers that chart progress read counters out of this between steps.
/// Keys are fixed at construction; `take` hands back the current values and
/// zeroes the counters for the next window.
#[derive(Debug, Clone)]
pub struct Report {
    data: BTreeMap<&'static str, f64>,
}

impl Report {
    pub fn new(keys: Vec<&'static str>) -> Self {
        Self {
            data: keys.into_iter().map(|k| (k, 0.0)).collect(),
        }
    }

    /// Keys in iteration order
    pub fn keys(&self) -> Vec<&'static str> {
        self.data.keys().copied().collect()
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.data.get(key).copied()
    }

    /// Add `amount` to a counter
    ///
    /// Unknown keys are a programming error.
    pub fn add(&mut self, key: &'static str, amount: f64) {
        let counter = self
            .data
            .get_mut(key)
            .unwrap_or_else(|| panic!("unknown report key `{key}`"));
        *counter += amount;
    }

    /// Take the current values, resetting every counter to zero
    pub fn take(&mut self) -> BTreeMap<&'static str, f64> {
        let zeroed = self.data.keys().map(|&k| (k, 0.0)).collect();
        std::mem::replace(&mut self.data, zeroed)
    }
}
