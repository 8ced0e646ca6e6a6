pub mod special;

pub use special::{MAX_FACTORIAL_ARGUMENT, factorial, gamma, polylog, zeta};

use serde::{Deserialize, Serialize};

/// Absolute/relative tolerance pair used when comparing computed values
/// against reference data. A comparison passes if either bound holds.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericTolerance {
    #[serde(default)]
    pub abs_tol: f64,
    #[serde(default)]
    pub rel_tol: f64,
}

impl Default for NumericTolerance {
    fn default() -> Self {
        Self {
            abs_tol: 0.0,
            rel_tol: 1.0e-9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToleranceComparison {
    pub abs_diff: f64,
    pub rel_diff: f64,
    pub passes: bool,
}

impl NumericTolerance {
    pub const fn new(abs_tol: f64, rel_tol: f64) -> Self {
        Self { abs_tol, rel_tol }
    }

    pub fn compare(&self, expected: f64, actual: f64) -> ToleranceComparison {
        if expected == actual {
            return ToleranceComparison {
                abs_diff: 0.0,
                rel_diff: 0.0,
                passes: true,
            };
        }

        let abs_diff = (actual - expected).abs();
        let rel_diff = if expected == 0.0 {
            f64::INFINITY
        } else {
            abs_diff / expected.abs()
        };
        let passes = abs_diff <= self.abs_tol || rel_diff <= self.rel_tol;

        ToleranceComparison {
            abs_diff,
            rel_diff,
            passes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::NumericTolerance;

    #[test]
    fn comparison_passes_on_either_bound() {
        let tolerance = NumericTolerance::new(1.0e-3, 1.0e-9);
        assert!(tolerance.compare(1.0, 1.0005).passes);
        assert!(tolerance.compare(1.0e7, 1.0e7 + 1.0e-3).passes);
        assert!(!tolerance.compare(1.0e7, 1.0e7 + 1.0).passes);
    }

    #[test]
    fn comparison_handles_zero_and_infinite_values() {
        let tolerance = NumericTolerance::default();
        assert!(tolerance.compare(0.0, 0.0).passes);
        assert!(tolerance.compare(f64::INFINITY, f64::INFINITY).passes);

        let against_zero = tolerance.compare(0.0, 1.0e-30);
        assert!(!against_zero.passes);
        assert!(against_zero.rel_diff.is_infinite());
        assert!(!tolerance.compare(1.0, f64::NAN).passes);
    }

    #[test]
    fn tolerance_deserializes_from_camel_case_keys() {
        let tolerance: NumericTolerance =
            serde_json::from_str(r#"{ "absTol": 1e-12, "relTol": 1e-6 }"#).expect("tolerance");
        assert_eq!(tolerance, NumericTolerance::new(1.0e-12, 1.0e-6));

        let partial: NumericTolerance =
            serde_json::from_str(r#"{ "relTol": 1e-4 }"#).expect("partial tolerance");
        assert_eq!(partial.abs_tol, 0.0);
    }
}
