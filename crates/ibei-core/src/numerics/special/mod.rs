pub mod gamma;
pub mod polylog;
pub mod zeta;

pub use gamma::{MAX_FACTORIAL_ARGUMENT, factorial, gamma};
pub use polylog::polylog;
pub use zeta::zeta;
