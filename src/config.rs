//! Growth configuration, fixed at table construction.

/// Default threshold above which an insert triggers growth.
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.75;

/// Default capacity multiplier applied on growth.
pub const DEFAULT_GROWTH_FACTOR: usize = 2;

/// Immutable-after-construction growth parameters.
///
/// Invalid fields fall back to the defaults via [`Config::sanitized`],
/// which every constructor applies: a table never carries a
/// non-positive or non-finite load factor, nor a zero growth factor.
/// A growth factor of 1 is accepted but effectively disables growth
/// (capacity never changes), leaving the table to operate
/// over-threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// Resize once `len / capacity` strictly exceeds this. Must be > 0.
    pub max_load_factor: f64,
    /// Capacity multiplier on resize. Must be > 0.
    pub growth_factor: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
            growth_factor: DEFAULT_GROWTH_FACTOR,
        }
    }
}

impl Config {
    /// Replace invalid fields with their defaults.
    pub fn sanitized(self) -> Self {
        let max_load_factor = if self.max_load_factor.is_finite() && self.max_load_factor > 0.0 {
            self.max_load_factor
        } else {
            DEFAULT_MAX_LOAD_FACTOR
        };
        let growth_factor = if self.growth_factor > 0 {
            self.growth_factor
        } else {
            DEFAULT_GROWTH_FACTOR
        };
        Self {
            max_load_factor,
            growth_factor,
        }
    }
}
