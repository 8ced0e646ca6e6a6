//! Detailed-balance single-junction solar cells built on the Bose-Einstein
//! integral.

pub mod devos;
pub mod shockley_queisser;

pub use devos::{DeVos, DeVosParameters};
pub use shockley_queisser::{ShockleyQueisser, ShockleyQueisserParameters};

use thiserror::Error;
use uom::si::f64::{HeatFluxDensity, ThermodynamicTemperature};
use uom::si::heat_flux_density::watt_per_square_meter;
use uom::si::ratio::ratio;
use uom::si::thermodynamic_temperature::kelvin;

use crate::bei::{BeiError, SpectralFlux};
use crate::common::constants::STEFAN_BOLTZMANN;
use crate::domain::{IbeiError, ValidationKind};
use crate::quantity::QuantityError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolarCellError {
    #[error("invalid solar cell {field}: {source}")]
    InvalidParameter {
        field: &'static str,
        source: QuantityError,
    },
    #[error(transparent)]
    Integral(#[from] BeiError),
}

impl SolarCellError {
    pub const fn kind(&self) -> ValidationKind {
        match self {
            Self::InvalidParameter { source, .. } => source.kind(),
            Self::Integral(error) => error.kind(),
        }
    }

    pub(crate) fn field(field: &'static str) -> impl FnOnce(QuantityError) -> Self {
        move |source| Self::InvalidParameter { field, source }
    }
}

impl From<SolarCellError> for IbeiError {
    fn from(error: SolarCellError) -> Self {
        IbeiError::input_validation(error.kind().error_code(), error.to_string())
    }
}

/// A photovoltaic converter illuminated by a blackbody sun.
pub trait SolarCell {
    fn name(&self) -> &'static str;

    fn temp_sun(&self) -> ThermodynamicTemperature;

    /// Electrical output per unit area.
    fn power_density(&self) -> HeatFluxDensity;

    /// Radiant power per unit area emitted by the sun.
    fn incident_power_density(&self) -> HeatFluxDensity {
        stefan_boltzmann(self.temp_sun())
    }

    fn efficiency(&self) -> f64 {
        (self.power_density() / self.incident_power_density()).get::<ratio>()
    }
}

/// Blackbody radiant power density `sigma T^4`.
pub fn stefan_boltzmann(temperature: ThermodynamicTemperature) -> HeatFluxDensity {
    let temperature = temperature.get::<kelvin>();
    HeatFluxDensity::new::<watt_per_square_meter>(STEFAN_BOLTZMANN * temperature.powi(4))
}

fn power_density_from(flux: SpectralFlux) -> HeatFluxDensity {
    debug_assert_eq!(flux.order(), 3, "power density needs an energy flux");
    HeatFluxDensity::new::<watt_per_square_meter>(flux.value())
}

#[cfg(test)]
mod tests {
    use super::stefan_boltzmann;
    use uom::si::f64::ThermodynamicTemperature;
    use uom::si::heat_flux_density::watt_per_square_meter;
    use uom::si::thermodynamic_temperature::kelvin;

    #[test]
    fn solar_surface_emits_sixty_megawatts_per_square_metre() {
        let sun = stefan_boltzmann(ThermodynamicTemperature::new::<kelvin>(5_762.0));
        let expected = 5.670_374_419_184_431e-8 * 5_762.0_f64.powi(4);
        assert!((sun.get::<watt_per_square_meter>() - expected).abs() <= 1.0e-6);
        assert!(sun.get::<watt_per_square_meter>() > 6.2e7);
    }
}
