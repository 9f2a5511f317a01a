/*!
 * Length-ratio anomalies between source and rewritten text.
 *
 * Rewriting is expected to keep units roughly the same size. Units whose
 * rewritten text is far shorter or longer than the source are listed as
 * warnings for a reviewer; nothing is rejected.
 */

use log::debug;
use serde::Serialize;
use std::fmt;

/// Default lower bound of the transformed / source ratio
pub const DEFAULT_MIN_LENGTH_RATIO: f64 = 0.5;

/// Default upper bound of the transformed / source ratio
pub const DEFAULT_MAX_LENGTH_RATIO: f64 = 2.0;

/// Sources shorter than this are not ratio-checked
const MIN_SOURCE_CHARS_FOR_RATIO: usize = 10;

/// Why a unit's length looks wrong
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LengthWarningKind {
    /// Rewriting produced nothing for a non-empty source
    Emptied,
    /// Rewritten text is much shorter than the source
    TooShort { min_ratio: f64 },
    /// Rewritten text is much longer than the source
    TooLong { max_ratio: f64 },
}

/// A length anomaly on one unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LengthWarning {
    pub unit_id: String,
    pub source_len: usize,
    pub transformed_len: usize,
    pub ratio: f64,
    pub kind: LengthWarningKind,
}

impl fmt::Display for LengthWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LengthWarningKind::Emptied => write!(
                f,
                "Unit {}: rewritten text is empty ({} source chars)",
                self.unit_id, self.source_len
            ),
            LengthWarningKind::TooShort { min_ratio } => write!(
                f,
                "Unit {}: too short, ratio {:.2} < {:.2} ({} -> {} chars)",
                self.unit_id, self.ratio, min_ratio, self.source_len, self.transformed_len
            ),
            LengthWarningKind::TooLong { max_ratio } => write!(
                f,
                "Unit {}: too long, ratio {:.2} > {:.2} ({} -> {} chars)",
                self.unit_id, self.ratio, max_ratio, self.source_len, self.transformed_len
            ),
        }
    }
}

/// Bounds for the length check
#[derive(Debug, Clone, PartialEq)]
pub struct LengthValidatorConfig {
    pub min_ratio: f64,
    pub max_ratio: f64,
}

impl Default for LengthValidatorConfig {
    fn default() -> Self {
        Self {
            min_ratio: DEFAULT_MIN_LENGTH_RATIO,
            max_ratio: DEFAULT_MAX_LENGTH_RATIO,
        }
    }
}

/// Flags units whose rewritten length is out of bounds
#[derive(Debug, Clone, Default)]
pub struct LengthValidator {
    config: LengthValidatorConfig,
}

impl LengthValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: LengthValidatorConfig) -> Self {
        Self { config }
    }

    /// Transformed / source ratio in characters (1.0 when both are empty)
    pub fn calculate_ratio(source: &str, transformed: &str) -> f64 {
        let source_len = source.chars().count();
        let transformed_len = transformed.chars().count();

        match (source_len, transformed_len) {
            (0, 0) => 1.0,
            (0, _) => f64::INFINITY,
            _ => transformed_len as f64 / source_len as f64,
        }
    }

    /// Check one unit
    pub fn check_unit(&self, unit_id: &str, source: &str, transformed: &str) -> Option<LengthWarning> {
        let source = source.trim();
        let transformed = transformed.trim();
        let source_len = source.chars().count();
        let transformed_len = transformed.chars().count();
        let ratio = Self::calculate_ratio(source, transformed);

        let kind = if source_len > 0 && transformed_len == 0 {
            LengthWarningKind::Emptied
        } else if source_len < MIN_SOURCE_CHARS_FOR_RATIO {
            return None;
        } else if ratio < self.config.min_ratio {
            LengthWarningKind::TooShort {
                min_ratio: self.config.min_ratio,
            }
        } else if ratio > self.config.max_ratio {
            LengthWarningKind::TooLong {
                max_ratio: self.config.max_ratio,
            }
        } else {
            return None;
        };

        Some(LengthWarning {
            unit_id: unit_id.to_string(),
            source_len,
            transformed_len,
            ratio,
            kind,
        })
    }

    /// Check a run of `(unit_id, source, transformed)` triples
    pub fn check_units<'a, I>(&self, units: I) -> Vec<LengthWarning>
    where
        I: IntoIterator<Item = (&'a str, &'a str, &'a str)>,
    {
        let mut checked = 0;
        let warnings: Vec<LengthWarning> = units
            .into_iter()
            .inspect(|_| checked += 1)
            .filter_map(|(id, source, transformed)| self.check_unit(id, source, transformed))
            .collect();

        debug!("Length check: {} units, {} warnings", checked, warnings.len());
        warnings
    }
}
