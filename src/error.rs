use std::fmt;

/// Rejected configuration, detected synchronously when the solver is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// `pattern_size` must be at least 2.
    PatternSizeTooSmall { pattern_size: u32 },
    /// `pattern_size` exceeds the input grid's height or width (and `periodic_input` is false,
    /// so no window of that size fits).
    PatternSizeExceedsInput { pattern_size: u32 },
    /// `out_height` or `out_width` is zero.
    ZeroDimensionOutput,
    /// `symmetry` is outside `1..=8`.
    SymmetryOutOfRange { symmetry: u32 },
    /// `periodic_output` is false and the requested output is smaller than a single pattern.
    OutputSmallerThanPattern { pattern_size: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::PatternSizeTooSmall { pattern_size } => {
                write!(f, "pattern_size {} must be at least 2", pattern_size)
            }
            ConfigError::PatternSizeExceedsInput { pattern_size } => write!(
                f,
                "pattern_size {} exceeds the input dimensions and periodic_input is false",
                pattern_size
            ),
            ConfigError::ZeroDimensionOutput => {
                write!(f, "requested output has a zero dimension")
            }
            ConfigError::SymmetryOutOfRange { symmetry } => {
                write!(f, "symmetry {} is outside the valid range 1..=8", symmetry)
            }
            ConfigError::OutputSmallerThanPattern { pattern_size } => write!(
                f,
                "non-periodic output is smaller than a single {}x{} pattern",
                pattern_size, pattern_size
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
