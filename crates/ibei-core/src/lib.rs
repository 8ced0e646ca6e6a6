//! Bose-Einstein integrals of blackbody radiation and the detailed-balance
//! solar-cell models built on them.

pub mod bei;
pub mod common;
pub mod config;
pub mod domain;
pub mod numerics;
pub mod quantity;
pub mod solarcell;

pub use bei::{Bei, BeiError, BeiParameters, FluxUnit, MAX_ORDER, SpectralFlux, uibei};
pub use domain::{IbeiError, IbeiErrorCategory, IbeiResult, ValidationKind};
pub use quantity::{RawValue, Unit};
pub use solarcell::{DeVos, ShockleyQueisser, SolarCell, stefan_boltzmann};
