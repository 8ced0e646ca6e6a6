use std::fmt::{Display, Formatter};

use super::QuantityError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Unbounded,
    Inclusive(f64),
    Exclusive(f64),
}

/// Admissible interval of a validated scalar, in the scalar's target unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    lower: Bound,
    upper: Bound,
}

impl Bounds {
    pub const UNBOUNDED: Self = Self {
        lower: Bound::Unbounded,
        upper: Bound::Unbounded,
    };

    pub fn new(lower: Bound, upper: Bound) -> Result<Self, QuantityError> {
        let (Some(lo), Some(hi)) = (bound_value(lower), bound_value(upper)) else {
            return Ok(Self { lower, upper });
        };

        let empty = match (lower, upper) {
            (Bound::Inclusive(_), Bound::Inclusive(_)) => hi < lo,
            _ => hi <= lo,
        };
        if empty || lo.is_nan() || hi.is_nan() {
            return Err(QuantityError::InvalidBounds { lower: lo, upper: hi });
        }

        Ok(Self { lower, upper })
    }

    /// `[lower, +inf]`
    pub const fn at_least(lower: f64) -> Self {
        Self {
            lower: Bound::Inclusive(lower),
            upper: Bound::Unbounded,
        }
    }

    /// `(lower, +inf]`
    pub const fn greater_than(lower: f64) -> Self {
        Self {
            lower: Bound::Exclusive(lower),
            upper: Bound::Unbounded,
        }
    }

    pub const fn lower(&self) -> Bound {
        self.lower
    }

    pub const fn upper(&self) -> Bound {
        self.upper
    }

    /// NaN is never contained.
    pub fn contains(&self, value: f64) -> bool {
        if value.is_nan() {
            return false;
        }

        let above = match self.lower {
            Bound::Unbounded => true,
            Bound::Inclusive(lo) => value >= lo,
            Bound::Exclusive(lo) => value > lo,
        };
        let below = match self.upper {
            Bound::Unbounded => true,
            Bound::Inclusive(hi) => value <= hi,
            Bound::Exclusive(hi) => value < hi,
        };
        above && below
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

impl Display for Bounds {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.lower {
            Bound::Unbounded => f.write_str("[-inf")?,
            Bound::Inclusive(lo) => write!(f, "[{lo}")?,
            Bound::Exclusive(lo) => write!(f, "({lo}")?,
        }
        match self.upper {
            Bound::Unbounded => f.write_str(", inf]"),
            Bound::Inclusive(hi) => write!(f, ", {hi}]"),
            Bound::Exclusive(hi) => write!(f, ", {hi})"),
        }
    }
}

const fn bound_value(bound: Bound) -> Option<f64> {
    match bound {
        Bound::Unbounded => None,
        Bound::Inclusive(value) | Bound::Exclusive(value) => Some(value),
    }
}
