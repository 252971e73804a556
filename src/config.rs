use std::fmt;
use std::str::FromStr;

use crate::constants::config::{
    DEFAULT_HIGH_END, DEFAULT_HIGH_START, DEFAULT_LOW_END, DEFAULT_LOW_START,
    DEFAULT_REPEAT_PER_TARGET, DEFAULT_SEED, MODE_LABEL_RANDOM, MODE_LABEL_RANGE,
};
use crate::errors::TripletError;

/// Triplet search strategy selected per run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SamplingMode {
    /// Two uniform draws; the closer candidate becomes the context.
    Random,
    /// Batched draws constrained to the configured distance bands.
    Range,
}

impl SamplingMode {
    /// Canonical label used on the command line and in logs.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SamplingMode::Random => MODE_LABEL_RANDOM,
            SamplingMode::Range => MODE_LABEL_RANGE,
        }
    }

    /// Random stream id owned by this mode.
    ///
    /// Stream `0` is reserved for the metadata shuffle.
    pub const fn stream(&self) -> u64 {
        match self {
            SamplingMode::Random => 1,
            SamplingMode::Range => 2,
        }
    }
}

impl fmt::Display for SamplingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SamplingMode {
    type Err = TripletError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            MODE_LABEL_RANDOM => Ok(SamplingMode::Random),
            MODE_LABEL_RANGE => Ok(SamplingMode::Range),
            other => Err(TripletError::Configuration(format!(
                "unknown sampling mode '{other}' (expected '{MODE_LABEL_RANDOM}' or '{MODE_LABEL_RANGE}')"
            ))),
        }
    }
}

/// Closed distance intervals used by range mode.
///
/// Context candidates must fall in `[low_start, low_end]`, negatives in
/// `[high_start, high_end]`, with `low_start <= low_end < high_start <= high_end`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeBands {
    pub low_start: f64,
    pub low_end: f64,
    pub high_start: f64,
    pub high_end: f64,
}

impl Default for RangeBands {
    fn default() -> Self {
        Self {
            low_start: DEFAULT_LOW_START,
            low_end: DEFAULT_LOW_END,
            high_start: DEFAULT_HIGH_START,
            high_end: DEFAULT_HIGH_END,
        }
    }
}

impl RangeBands {
    /// Build bands, rejecting boundaries that overlap or run backwards.
    pub fn new(
        low_start: f64,
        low_end: f64,
        high_start: f64,
        high_end: f64,
    ) -> Result<Self, TripletError> {
        Self {
            low_start,
            low_end,
            high_start,
            high_end,
        }
        .validated()
    }

    /// Validate boundary ordering.
    pub fn validated(self) -> Result<Self, TripletError> {
        let values = [self.low_start, self.low_end, self.high_start, self.high_end];
        if values.iter().any(|value| !value.is_finite()) {
            return Err(TripletError::Configuration(
                "band boundaries must be finite numbers".to_string(),
            ));
        }
        if !(self.low_start <= self.low_end
            && self.low_end < self.high_start
            && self.high_start <= self.high_end)
        {
            return Err(TripletError::Configuration(format!(
                "context band must not cross or exceed the negative band: expected {} <= {} < {} <= {}",
                self.low_start, self.low_end, self.high_start, self.high_end
            )));
        }
        Ok(self)
    }

    /// True if `distance` lies in the context band.
    pub fn in_low(&self, distance: f64) -> bool {
        self.low_start <= distance && distance <= self.low_end
    }

    /// True if `distance` lies in the negative band.
    pub fn in_high(&self, distance: f64) -> bool {
        self.high_start <= distance && distance <= self.high_end
    }
}

/// Top-level run configuration.
#[derive(Clone, Debug)]
pub struct TripletConfig {
    /// RNG seed that controls shuffling and every sampler draw.
    pub seed: u64,
    /// Sampler invocations per target document.
    pub repeat_per_target: usize,
    /// Optional cap on the number of triplets written per mode.
    pub max_size: Option<usize>,
    /// Modes to run, in order. Each mode writes its own output file.
    pub modes: Vec<SamplingMode>,
    /// Band boundaries; required when `modes` contains [`SamplingMode::Range`].
    pub bands: Option<RangeBands>,
    /// Permute the metadata collection with the run RNG before sampling.
    pub shuffle: bool,
}

impl Default for TripletConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            repeat_per_target: DEFAULT_REPEAT_PER_TARGET,
            max_size: None,
            modes: vec![SamplingMode::Random, SamplingMode::Range],
            bands: Some(RangeBands::default()),
            shuffle: true,
        }
    }
}

impl TripletConfig {
    /// Check every precondition that must hold before any sampling starts.
    pub fn validated(self) -> Result<Self, TripletError> {
        if self.repeat_per_target == 0 {
            return Err(TripletError::Configuration(
                "repeat per target must be greater than zero".to_string(),
            ));
        }
        if self.max_size == Some(0) {
            return Err(TripletError::Configuration(
                "max size must be greater than zero when set".to_string(),
            ));
        }
        if self.modes.is_empty() {
            return Err(TripletError::Configuration(
                "at least one sampling mode is required".to_string(),
            ));
        }
        if let Some(bands) = self.bands {
            bands.validated()?;
        } else if self.modes.contains(&SamplingMode::Range) {
            return Err(TripletError::Configuration(
                "range mode requires all four band boundaries".to_string(),
            ));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_reject_overlap_and_reversal() {
        assert!(RangeBands::new(0.0, 2.0, 3.0, 5.0).is_ok());
        assert!(RangeBands::new(1.0, 1.0, 1.5, 1.5).is_ok());

        for (ls, le, hs, he) in [
            (0.0, 3.0, 3.0, 5.0),
            (2.0, 1.0, 3.0, 5.0),
            (0.0, 2.0, 5.0, 3.0),
            (0.0, f64::NAN, 3.0, 5.0),
        ] {
            let err = RangeBands::new(ls, le, hs, he).unwrap_err();
            assert!(matches!(err, TripletError::Configuration(_)));
        }
    }

    #[test]
    fn range_mode_without_bands_is_rejected() {
        let config = TripletConfig {
            bands: None,
            ..TripletConfig::default()
        };
        let err = config.validated().unwrap_err();
        assert!(matches!(
            err,
            TripletError::Configuration(ref msg) if msg.contains("all four")
        ));

        let random_only = TripletConfig {
            bands: None,
            modes: vec![SamplingMode::Random],
            ..TripletConfig::default()
        };
        assert!(random_only.validated().is_ok());
    }

    #[test]
    fn band_membership_is_closed_on_both_ends() {
        let bands = RangeBands::default();
        assert!(bands.in_low(0.0));
        assert!(bands.in_low(2.0));
        assert!(!bands.in_low(2.5));
        assert!(bands.in_high(3.0));
        assert!(bands.in_high(5.0));
        assert!(!bands.in_high(5.1));
    }

    #[test]
    fn config_requires_bands_for_range_mode() {
        let config = TripletConfig {
            bands: None,
            ..TripletConfig::default()
        };
        assert!(matches!(
            config.validated().unwrap_err(),
            TripletError::Configuration(_)
        ));

        let random_only = TripletConfig {
            bands: None,
            modes: vec![SamplingMode::Random],
            ..TripletConfig::default()
        };
        assert!(random_only.validated().is_ok());
    }

    #[test]
    fn config_rejects_zero_repeat_and_zero_size() {
        let zero_repeat = TripletConfig {
            repeat_per_target: 0,
            ..TripletConfig::default()
        };
        assert!(zero_repeat.validated().is_err());

        let zero_size = TripletConfig {
            max_size: Some(0),
            ..TripletConfig::default()
        };
        assert!(zero_size.validated().is_err());
    }

    #[test]
    fn mode_labels_parse_case_insensitively() {
        assert_eq!("random".parse::<SamplingMode>().unwrap(), SamplingMode::Random);
        assert_eq!(" RANGE ".parse::<SamplingMode>().unwrap(), SamplingMode::Range);
        assert!("hard".parse::<SamplingMode>().is_err());
        assert_eq!(SamplingMode::Range.to_string(), "range");
    }
}
