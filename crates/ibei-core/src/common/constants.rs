//! Physical constants in SI units.
//!
//! The defining constants are the exact values of the 2019 SI redefinition
//! (CODATA 2018). The Stefan-Boltzmann constant is derived from them.

pub const PI: f64 = std::f64::consts::PI;
pub const PI2: f64 = 2.0 * PI;

/// Planck constant `h` [J s].
pub const PLANCK: f64 = 6.626_070_15e-34;
/// Speed of light in vacuum `c` [m s^-1].
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;
/// Boltzmann constant `k_B` [J K^-1].
pub const BOLTZMANN: f64 = 1.380_649e-23;
/// Elementary charge `e` [C].
pub const ELEMENTARY_CHARGE: f64 = 1.602_176_634e-19;
/// One electron-volt [J].
pub const ELECTRONVOLT: f64 = ELEMENTARY_CHARGE;
/// Stefan-Boltzmann constant `2 pi^5 k^4 / (15 h^3 c^2)` [W m^-2 K^-4].
pub const STEFAN_BOLTZMANN: f64 = 5.670_374_419_184_431e-8;
/// Apery's constant, `zeta(3)`.
pub const APERY: f64 = 1.202_056_903_159_594_3;

/// `h^3 c^2`, the denominator shared by every Bose-Einstein prefactor.
pub fn planck_denominator() -> f64 {
    PLANCK.powi(3) * SPEED_OF_LIGHT.powi(2)
}
