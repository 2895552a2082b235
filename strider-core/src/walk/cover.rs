//! Percentage-cover curve recorded by every walk.

/// Number of slots in a [`PercentageCover`]: one per integer percentage 0..=100.
pub const COVER_SLOTS: usize = 101;

/// Simulation time at which each integer percentage of vertices was first
/// discovered.
///
/// Slot `p` holds the first time the discovered share was measured at exactly
/// `p`%, or zero while unknown. [`PercentageCover::fill_forward`] copies the
/// nearest lower recorded time into the gaps, leaving a monotone curve.
///
/// # Examples
/// ```
/// use strider_core::PercentageCover;
///
/// let mut cover = PercentageCover::default();
/// cover.record(50, 1);
/// cover.record(100, 2);
/// cover.fill_forward();
/// assert_eq!(cover.get(49), Some(0));
/// assert_eq!(cover.get(75), Some(1));
/// assert_eq!(cover.get(100), Some(2));
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PercentageCover([u64; COVER_SLOTS]);

impl Default for PercentageCover {
    fn default() -> Self {
        Self([0; COVER_SLOTS])
    }
}

impl PercentageCover {
    /// Wraps an explicit curve.
    #[must_use]
    pub const fn from_slots(slots: [u64; COVER_SLOTS]) -> Self {
        Self(slots)
    }

    /// Time stored for `percent`, or `None` when `percent > 100`.
    #[must_use]
    pub fn get(&self, percent: u8) -> Option<u64> {
        self.0.get(usize::from(percent)).copied()
    }

    /// The raw slots, indexed by percentage.
    #[must_use]
    pub const fn as_slice(&self) -> &[u64; COVER_SLOTS] {
        &self.0
    }

    /// Iterates `(percent, time)` pairs for 0..=100.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (u8, u64)> + '_ {
        (0_u8..=100).zip(self.0.iter().copied())
    }

    /// Stores `time` for `percent` unless the slot already holds a value.
    pub fn record(&mut self, percent: u8, time: u64) {
        if let Some(slot) = self.0.get_mut(usize::from(percent)) {
            if *slot == 0 {
                *slot = time;
            }
        }
    }

    /// Replaces every empty slot with the largest time seen at a lower
    /// percentage.
    pub fn fill_forward(&mut self) {
        let mut current = 0;
        for slot in &mut self.0 {
            current = current.max(*slot);
            if *slot == 0 {
                *slot = current;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_keeps_the_first_time() {
        let mut cover = PercentageCover::default();
        cover.record(10, 4);
        cover.record(10, 9);
        assert_eq!(cover.get(10), Some(4));
    }

    #[test]
    fn record_ignores_out_of_range_percentages() {
        let mut cover = PercentageCover::default();
        cover.record(101, 4);
        assert_eq!(cover, PercentageCover::default());
        assert_eq!(cover.get(101), None);
    }

    #[test]
    fn fill_forward_is_monotone() {
        let mut slots = [0_u64; COVER_SLOTS];
        slots[3] = 5;
        slots[40] = 17;
        slots[41] = 21;
        slots[100] = 30;
        let mut cover = PercentageCover::from_slots(slots);
        cover.fill_forward();
        let values: Vec<u64> = cover.iter().map(|(_, time)| time).collect();
        assert!(values.windows(2).all(|pair| pair[0] <= pair[1]), "{values:?}");
        assert_eq!(cover.get(2), Some(0));
        assert_eq!(cover.get(20), Some(5));
        assert_eq!(cover.get(41), Some(21));
        assert_eq!(cover.get(99), Some(21));
    }
}
