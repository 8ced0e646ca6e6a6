//! Bose-Einstein integral of order `m`:
//!
//! ```text
//! F_m(E_A, T, mu) = 2 pi / (h^3 c^2) * integral_{E_A}^{inf} E^m / (exp((E - mu) / kT) - 1) dE
//! ```
//!
//! evaluated in closed form through polylogarithms. Order 2 is a photon
//! (particle) flux and order 3 an energy flux.

pub mod flux;

pub use flux::{FluxUnit, SpectralFlux};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use uom::si::energy::{electronvolt, joule};
use uom::si::f64::{Energy, ThermodynamicTemperature};
use uom::si::thermodynamic_temperature::kelvin;

use crate::common::constants::{APERY, BOLTZMANN, PI2, STEFAN_BOLTZMANN, planck_denominator};
use crate::domain::{IbeiError, ValidationKind};
use crate::numerics::{MAX_FACTORIAL_ARGUMENT, factorial, gamma, polylog};
use crate::quantity::{
    Bound, Bounds, Quantity, QuantityError, RawValue, Unit, check_bounds, coerce_order,
    validate_energy, validate_temperature,
};

/// Largest order whose factorial is finite in double precision.
pub const MAX_ORDER: u32 = MAX_FACTORIAL_ARGUMENT;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BeiError {
    #[error("invalid {field}: {source}")]
    InvalidField {
        field: &'static str,
        source: QuantityError,
    },
    #[error("order {order} exceeds the largest supported order {max}")]
    OrderTooLarge { order: u32, max: u32 },
    #[error("temperature {temperature_k} K is too small for kT to be a normal energy")]
    ThermalEnergyUnderflow { temperature_k: f64 },
}

impl BeiError {
    pub const fn kind(&self) -> ValidationKind {
        match self {
            Self::InvalidField { source, .. } => source.kind(),
            Self::OrderTooLarge { .. } | Self::ThermalEnergyUnderflow { .. } => {
                ValidationKind::Range
            }
        }
    }

    fn field(field: &'static str) -> impl FnOnce(QuantityError) -> Self {
        move |source| Self::InvalidField { field, source }
    }
}

impl From<BeiError> for IbeiError {
    fn from(error: BeiError) -> Self {
        IbeiError::input_validation(error.kind().error_code(), error.to_string())
    }
}

/// Validated parameters of one Bose-Einstein integral.
///
/// Fields are checked once at construction and never change; every
/// evaluation method is total on a constructed value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bei {
    order: u32,
    energy_bound: Energy,
    temperature: ThermodynamicTemperature,
    chemical_potential: Energy,
}

impl Bei {
    /// Builds an integral from typed quantities.
    ///
    /// `energy_bound` may be infinite. `temperature` must be finite and
    /// large enough that `kT` is a normal `f64`; below roughly `1.6e-285 K`
    /// the reduced quantities would divide by zero.
    pub fn new(
        order: u32,
        energy_bound: Energy,
        temperature: ThermodynamicTemperature,
        chemical_potential: Energy,
    ) -> Result<Self, BeiError> {
        if order > MAX_ORDER {
            return Err(BeiError::OrderTooLarge {
                order,
                max: MAX_ORDER,
            });
        }

        let non_negative = Bounds::at_least(0.0);
        check_bounds(
            Quantity::new(energy_bound.get::<electronvolt>(), Unit::Electronvolt),
            non_negative,
        )
        .map_err(BeiError::field("energy_bound"))?;
        check_bounds(
            Quantity::new(temperature.get::<kelvin>(), Unit::Kelvin),
            temperature_bounds(),
        )
        .map_err(BeiError::field("temperature"))?;
        let temperature_k = temperature.get::<kelvin>();
        if !thermal_energy(temperature_k).is_normal() {
            return Err(BeiError::ThermalEnergyUnderflow { temperature_k });
        }
        check_bounds(
            Quantity::new(chemical_potential.get::<electronvolt>(), Unit::Electronvolt),
            non_negative,
        )
        .map_err(BeiError::field("chemical_potential"))?;

        Ok(Self {
            order,
            energy_bound,
            temperature,
            chemical_potential,
        })
    }

    pub fn from_parameters(parameters: &BeiParameters) -> Result<Self, BeiError> {
        parameters.build()
    }

    pub const fn order(&self) -> u32 {
        self.order
    }

    pub const fn energy_bound(&self) -> Energy {
        self.energy_bound
    }

    pub const fn temperature(&self) -> ThermodynamicTemperature {
        self.temperature
    }

    pub const fn chemical_potential(&self) -> Energy {
        self.chemical_potential
    }

    pub fn kt(&self) -> Energy {
        Energy::new::<joule>(thermal_energy(self.temperature.get::<kelvin>()))
    }

    pub fn reduced_energy_bound(&self) -> f64 {
        self.energy_bound.get::<joule>() / self.kt().get::<joule>()
    }

    pub fn reduced_chemical_potential(&self) -> f64 {
        self.chemical_potential.get::<joule>() / self.kt().get::<joule>()
    }

    /// `2 pi kT^(m+1) / (h^3 c^2)`, shared by the full and incomplete integrals.
    pub fn prefactor(&self) -> SpectralFlux {
        let kt = self.kt().get::<joule>();
        // kT^(m+1) alone underflows long before the quotient does.
        let value = (0..=self.order).fold(PI2 / planck_denominator(), |acc, _| acc * kt);
        SpectralFlux::new(value, self.order)
    }

    /// Upper incomplete integral from the energy bound to infinity.
    pub fn upper(&self) -> SpectralFlux {
        let order = self.order;
        let reduced_energy = self.reduced_energy_bound();
        let reduced_mu = self.reduced_chemical_potential();
        let prefactor = self.prefactor();

        if reduced_mu == 0.0 && reduced_energy == 0.0 {
            debug!(order, "upper integral over the whole spectrum");
            return prefactor.scale(factorial(order) * polylog(order + 1, 1.0));
        }
        if reduced_mu >= reduced_energy {
            debug!(
                order,
                reduced_energy, reduced_mu, "chemical potential reaches the energy bound"
            );
            return SpectralFlux::zero(order);
        }

        let x = (reduced_mu - reduced_energy).exp();
        if x == 0.0 {
            debug!(order, reduced_energy, reduced_mu, "occupation underflows");
            return SpectralFlux::zero(order);
        }

        // sum_{k=1}^{m+1} r^(m+1-k) / (m+1-k)! * Li_k(x), accumulated from k = m+1
        // down so the power ratio is built incrementally without overflow.
        let mut power_ratio = 1.0;
        let mut sum = 0.0;
        for power in 0..=order {
            if power > 0 {
                power_ratio *= reduced_energy / f64::from(power);
            }
            sum += power_ratio * polylog(order + 1 - power, x);
        }

        prefactor.scale(factorial(order) * sum)
    }

    /// Complete integral from zero to infinity.
    ///
    /// Any strictly positive chemical potential yields zero.
    pub fn full(&self) -> SpectralFlux {
        let order = self.order;
        let reduced_mu = self.reduced_chemical_potential();
        if reduced_mu > 0.0 {
            debug!(order, reduced_mu, "full integral with positive chemical potential");
            return SpectralFlux::zero(order);
        }

        let coefficient = gamma(f64::from(order) + 1.0) * polylog(order + 1, reduced_mu.exp());
        self.prefactor().scale(coefficient)
    }

    /// Lower incomplete integral from zero to the energy bound.
    pub fn lower(&self) -> SpectralFlux {
        self.full() - self.upper()
    }

    /// `4 pi zeta(3) kT^3 / (h^3 c^2)`, the order-2 full integral at zero
    /// chemical potential.
    pub fn photon_flux(&self) -> SpectralFlux {
        let kt = self.kt().get::<joule>();
        SpectralFlux::new(2.0 * PI2 * APERY * kt.powi(3) / planck_denominator(), 2)
    }

    /// `sigma T^4`, the order-3 full integral at zero chemical potential.
    pub fn radiant_power_flux(&self) -> SpectralFlux {
        let temperature = self.temperature.get::<kelvin>();
        SpectralFlux::new(STEFAN_BOLTZMANN * temperature.powi(4), 3)
    }
}

fn thermal_energy(temperature_k: f64) -> f64 {
    BOLTZMANN * temperature_k
}

/// Unvalidated integral inputs, as read from JSON or the command line.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BeiParameters {
    pub order: RawValue,
    pub energy_bound: RawValue,
    pub temperature: RawValue,
    #[serde(default = "zero_chemical_potential")]
    pub chemical_potential: RawValue,
}

impl BeiParameters {
    pub fn new(
        order: impl Into<RawValue>,
        energy_bound: impl Into<RawValue>,
        temperature: impl Into<RawValue>,
    ) -> Self {
        Self {
            order: order.into(),
            energy_bound: energy_bound.into(),
            temperature: temperature.into(),
            chemical_potential: zero_chemical_potential(),
        }
    }

    pub fn with_chemical_potential(mut self, chemical_potential: impl Into<RawValue>) -> Self {
        self.chemical_potential = chemical_potential.into();
        self
    }

    /// Validates every field; numbers without units are taken as eV and K.
    pub fn build(&self) -> Result<Bei, BeiError> {
        let order = coerce_order(&self.order).map_err(BeiError::field("order"))?;
        let energy_bound = validate_energy(&self.energy_bound, Bounds::at_least(0.0))
            .map_err(BeiError::field("energy_bound"))?;
        let temperature = validate_temperature(&self.temperature, temperature_bounds())
            .map_err(BeiError::field("temperature"))?;
        let chemical_potential = validate_energy(&self.chemical_potential, Bounds::at_least(0.0))
            .map_err(BeiError::field("chemical_potential"))?;

        Bei::new(order, energy_bound, temperature, chemical_potential)
    }
}

fn zero_chemical_potential() -> RawValue {
    RawValue::Number(0.0)
}

/// `(0, inf)` in kelvin.
fn temperature_bounds() -> Bounds {
    Bounds::new(Bound::Exclusive(0.0), Bound::Exclusive(f64::INFINITY))
        .unwrap_or(Bounds::greater_than(0.0))
}

/// Upper incomplete integral in one call.
///
/// Unit-less numbers are taken as eV for energies and K for temperature.
pub fn uibei(
    order: impl Into<RawValue>,
    energy_lo: impl Into<RawValue>,
    temperature: impl Into<RawValue>,
    chemical_potential: impl Into<RawValue>,
) -> Result<SpectralFlux, BeiError> {
    let parameters = BeiParameters::new(order, energy_lo, temperature)
        .with_chemical_potential(chemical_potential);
    Ok(parameters.build()?.upper())
}
