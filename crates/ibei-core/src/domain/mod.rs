pub mod errors;

pub use errors::{IbeiError, IbeiErrorCategory, IbeiResult};

use std::fmt::{Display, Formatter};

/// Class of a construction-time validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationKind {
    /// A value lies outside its declared bounds.
    Range,
    /// A value has the wrong shape or cannot be coerced to the required type.
    Type,
    /// A unit is unknown or has the wrong physical dimension.
    Unit,
}

impl ValidationKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Range => "RANGE",
            Self::Type => "TYPE",
            Self::Unit => "UNIT",
        }
    }

    pub const fn error_code(self) -> &'static str {
        match self {
            Self::Range => "INPUT.RANGE",
            Self::Type => "INPUT.TYPE",
            Self::Unit => "INPUT.UNIT",
        }
    }
}

impl Display for ValidationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}
