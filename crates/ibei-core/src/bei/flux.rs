use std::fmt::{Display, Formatter};
use std::ops::{Add, Mul, Sub};

use serde::Serialize;
use uom::si::energy::joule;
use uom::si::f64::{Energy, HeatFluxDensity};
use uom::si::heat_flux_density::watt_per_square_meter;

/// SI unit `J^(order-2) m^-2 s^-1` of a Bose-Einstein integral of a given order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FluxUnit {
    order: u32,
}

impl FluxUnit {
    pub const fn new(order: u32) -> Self {
        Self { order }
    }

    pub const fn order(&self) -> u32 {
        self.order
    }

    /// Power of the joule factor in the unit.
    pub const fn energy_exponent(&self) -> i64 {
        self.order as i64 - 2
    }
}

impl Display for FluxUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.energy_exponent() {
            0 => f.write_str("m^-2 s^-1"),
            1 => f.write_str("W m^-2"),
            exponent => write!(f, "J^{exponent} m^-2 s^-1"),
        }
    }
}

/// Value of a Bose-Einstein integral in SI units, tagged with its order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpectralFlux {
    value: f64,
    unit: FluxUnit,
}

impl SpectralFlux {
    pub const fn new(value: f64, order: u32) -> Self {
        Self {
            value,
            unit: FluxUnit::new(order),
        }
    }

    pub const fn zero(order: u32) -> Self {
        Self::new(0.0, order)
    }

    pub const fn value(&self) -> f64 {
        self.value
    }

    pub const fn order(&self) -> u32 {
        self.unit.order
    }

    pub const fn unit(&self) -> FluxUnit {
        self.unit
    }

    /// Multiplies by a dimensionless factor, keeping the unit.
    pub fn scale(self, factor: f64) -> Self {
        Self {
            value: self.value * factor,
            unit: self.unit,
        }
    }

    /// `Some` only for order-3 fluxes, whose unit is W m^-2.
    pub fn as_heat_flux_density(&self) -> Option<HeatFluxDensity> {
        (self.unit.order == 3).then(|| HeatFluxDensity::new::<watt_per_square_meter>(self.value))
    }
}

impl Display for SpectralFlux {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

impl Add for SpectralFlux {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        debug_assert_eq!(self.unit, rhs.unit, "adding fluxes of different order");
        Self {
            value: self.value + rhs.value,
            unit: self.unit,
        }
    }
}

impl Sub for SpectralFlux {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        debug_assert_eq!(self.unit, rhs.unit, "subtracting fluxes of different order");
        Self {
            value: self.value - rhs.value,
            unit: self.unit,
        }
    }
}

/// Energy-weighting raises the order by one: a particle flux times an energy
/// is a power flux.
impl Mul<Energy> for SpectralFlux {
    type Output = Self;

    fn mul(self, energy: Energy) -> Self {
        Self::new(self.value * energy.get::<joule>(), self.unit.order + 1)
    }
}
