//! Range Comparator
//!
//! Places a site reading relative to a crop's suitable range. Both bounds
//! are inclusive.

/// Where a reading falls relative to a crop's range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeFit {
    /// value < min
    BelowRange,

    /// min <= value <= max
    WithinRange,

    /// value > max
    AboveRange,
}

impl RangeFit {
    pub fn is_within_range(&self) -> bool {
        *self == RangeFit::WithinRange
    }
}

/// Place a reading against an inclusive `(min, max)` range
pub fn compare_to_range(value: f64, (min, max): (f64, f64)) -> RangeFit {
    if value < min {
        RangeFit::BelowRange
    } else if value > max {
        RangeFit::AboveRange
    } else {
        RangeFit::WithinRange
    }
}

// ============================================================================
// Soil Reaction Bands
// ============================================================================

/// Lower bound of the optimal pH band
pub const PH_OPTIMAL_MIN: f64 = 6.0;

/// Upper bound of the optimal pH band
pub const PH_OPTIMAL_MAX: f64 = 7.5;

/// Soil reaction band used by the pH rule and the seasonal tips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhBand {
    Acidic,
    Optimal,
    Alkaline,
}

impl PhBand {
    pub fn classify(ph: f64) -> Self {
        match compare_to_range(ph, (PH_OPTIMAL_MIN, PH_OPTIMAL_MAX)) {
            RangeFit::BelowRange => PhBand::Acidic,
            RangeFit::WithinRange => PhBand::Optimal,
            RangeFit::AboveRange => PhBand::Alkaline,
        }
    }
}
