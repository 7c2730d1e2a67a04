use serde::{Deserialize, Serialize};

/// Largest hue value in the 8-bit HSV convention (degrees halved).
pub const HUE_MAX: u8 = 179;
/// Largest saturation / value.
pub const CHANNEL_MAX: u8 = 255;

/// One clicked pixel in HSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sample {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

impl Sample {
    pub const fn new(h: u8, s: u8, v: u8) -> Self {
        Self { h, s, v }
    }

    fn component_min(self, other: Sample) -> Sample {
        Sample::new(self.h.min(other.h), self.s.min(other.s), self.v.min(other.v))
    }

    fn component_max(self, other: Sample) -> Sample {
        Sample::new(self.h.max(other.h), self.s.max(other.s), self.v.max(other.v))
    }
}

/// Componentwise min/max over the current history.
///
/// With no history the bounds sit at their sentinels: `min` at each
/// channel's ceiling, `max` at zero, so `min > max` on every channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extrema {
    pub min: Sample,
    pub max: Sample,
}

impl Extrema {
    pub const EMPTY: Extrema = Extrema {
        min: Sample::new(HUE_MAX, CHANNEL_MAX, CHANNEL_MAX),
        max: Sample::new(0, 0, 0),
    };

    fn of(sample: Sample) -> Self {
        Self { min: sample, max: sample }
    }

    fn include(&mut self, sample: Sample) {
        self.min = self.min.component_min(sample);
        self.max = self.max.component_max(sample);
    }

    /// Full scan. Falls back to the sentinels for an empty slice.
    fn scan(samples: &[Sample]) -> Self {
        let mut iter = samples.iter().copied();
        match iter.next() {
            Some(first) => iter.fold(Extrema::of(first), |mut acc, s| {
                acc.include(s);
                acc
            }),
            None => Extrema::EMPTY,
        }
    }
}

impl Default for Extrema {
    fn default() -> Self {
        Extrema::EMPTY
    }
}

/// Result of [`StatisticsTracker::undo_last`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoOutcome {
    Removed(Sample),
    Empty,
}

/// Read model handed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub count: usize,
    pub min: Sample,
    pub max: Sample,
    pub avg: Sample,
}

impl Snapshot {
    /// Per-channel `max - min`. Zero on every channel when empty.
    pub fn range(&self) -> Sample {
        Sample::new(
            self.max.h.saturating_sub(self.min.h),
            self.max.s.saturating_sub(self.min.s),
            self.max.v.saturating_sub(self.min.v),
        )
    }

    /// Format as a multi-line report string.
    pub fn report(&self) -> String {
        let range = self.range();
        format!(
            "Samples: {}\n  Min: ({}, {}, {})\n  Max: ({}, {}, {})\n  Avg: ({}, {}, {})\n  Range: ({}, {}, {})\n",
            self.count,
            self.min.h, self.min.s, self.min.v,
            self.max.h, self.max.s, self.max.v,
            self.avg.h, self.avg.s, self.avg.v,
            range.h, range.s, range.v,
        )
    }
}

/// Running statistics over clicked pixels.
///
/// Extrema are maintained incrementally on append. Undo rescans the remaining
/// history, since a removed value may have been the only one at a bound.
#[derive(Debug, Clone, Default)]
pub struct StatisticsTracker {
    history: Vec<Sample>,
    extrema: Extrema,
}

impl StatisticsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, sample: Sample) {
        if self.history.is_empty() {
            self.extrema = Extrema::of(sample);
        } else {
            self.extrema.include(sample);
        }
        self.history.push(sample);
    }

    pub fn undo_last(&mut self) -> UndoOutcome {
        let Some(removed) = self.history.pop() else {
            return UndoOutcome::Empty;
        };
        self.extrema = Extrema::scan(&self.history);
        UndoOutcome::Removed(removed)
    }

    pub fn reset(&mut self) {
        self.history.clear();
        self.extrema = Extrema::EMPTY;
    }

    /// Per-channel mean truncated toward zero; `(0, 0, 0)` when empty.
    pub fn averages(&self) -> Sample {
        let count = self.history.len() as u64;
        if count == 0 {
            return Sample::new(0, 0, 0);
        }
        let (h, s, v) = self.history.iter().fold((0u64, 0u64, 0u64), |(h, s, v), x| {
            (h + x.h as u64, s + x.s as u64, v + x.v as u64)
        });
        // Means of u8 values always fit back into u8.
        Sample::new((h / count) as u8, (s / count) as u8, (v / count) as u8)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            count: self.history.len(),
            min: self.extrema.min,
            max: self.extrema.max,
            avg: self.averages(),
        }
    }

    pub fn last(&self) -> Option<Sample> {
        self.history.last().copied()
    }

    pub fn history(&self) -> &[Sample] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}
