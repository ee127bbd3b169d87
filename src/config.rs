//! Spec §6/§7: the solver's configuration surface, validated once at construction time.

use crate::error::ConfigError;
use coord_2d::Size;

/// Options controlling extraction, propagation topology, and output shape.
#[derive(Debug, Clone, Copy)]
pub struct WfcConfig {
    pub pattern_size: u32,
    pub periodic_input: bool,
    pub periodic_output: bool,
    pub output_size: Size,
    pub symmetry: u32,
    pub ground: bool,
    pub seed: u64,
}

impl WfcConfig {
    /// Validates the configuration against an input grid's dimensions (spec §7 error kind 1).
    pub fn validate(&self, input_size: Size) -> Result<(), ConfigError> {
        if self.pattern_size < 2 {
            return Err(ConfigError::PatternSizeTooSmall {
                pattern_size: self.pattern_size,
            });
        }
        if !self.periodic_input
            && (self.pattern_size > input_size.x() || self.pattern_size > input_size.y())
        {
            return Err(ConfigError::PatternSizeExceedsInput {
                pattern_size: self.pattern_size,
            });
        }
        if self.output_size.x() == 0 || self.output_size.y() == 0 {
            return Err(ConfigError::ZeroDimensionOutput);
        }
        if self.symmetry < 1 || self.symmetry > 8 {
            return Err(ConfigError::SymmetryOutOfRange {
                symmetry: self.symmetry,
            });
        }
        if !self.periodic_output
            && (self.output_size.x() < self.pattern_size || self.output_size.y() < self.pattern_size)
        {
            return Err(ConfigError::OutputSmallerThanPattern {
                pattern_size: self.pattern_size,
            });
        }
        Ok(())
    }

    /// The wave's own dimensions, shrunk from the output size by `pattern_size - 1` per axis
    /// when the output is bounded (spec §3, "Wave dimensions vs. output dimensions").
    pub(crate) fn wave_size(&self) -> Size {
        if self.periodic_output {
            self.output_size
        } else {
            Size::new(
                self.output_size.x() - self.pattern_size + 1,
                self.output_size.y() - self.pattern_size + 1,
            )
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn base() -> WfcConfig {
        WfcConfig {
            pattern_size: 3,
            periodic_input: true,
            periodic_output: true,
            output_size: Size::new(16, 16),
            symmetry: 1,
            ground: false,
            seed: 42,
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(base().validate(Size::new(8, 8)).is_ok());
    }

    #[test]
    fn pattern_size_too_small_rejected() {
        let config = WfcConfig {
            pattern_size: 1,
            ..base()
        };
        assert_eq!(
            config.validate(Size::new(8, 8)),
            Err(ConfigError::PatternSizeTooSmall { pattern_size: 1 })
        );
    }

    #[test]
    fn symmetry_out_of_range_rejected() {
        let config = WfcConfig {
            symmetry: 9,
            ..base()
        };
        assert_eq!(
            config.validate(Size::new(8, 8)),
            Err(ConfigError::SymmetryOutOfRange { symmetry: 9 })
        );
    }

    #[test]
    fn non_periodic_output_smaller_than_pattern_rejected() {
        let config = WfcConfig {
            periodic_output: false,
            output_size: Size::new(2, 2),
            ..base()
        };
        assert_eq!(
            config.validate(Size::new(8, 8)),
            Err(ConfigError::OutputSmallerThanPattern { pattern_size: 3 })
        );
    }

    #[test]
    fn wave_size_shrinks_when_output_bounded() {
        let config = WfcConfig {
            periodic_output: false,
            output_size: Size::new(12, 12),
            pattern_size: 3,
            ..base()
        };
        assert_eq!(config.wave_size(), Size::new(10, 10));
    }
}
