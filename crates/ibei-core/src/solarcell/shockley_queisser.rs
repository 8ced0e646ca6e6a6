use serde::{Deserialize, Serialize};
use uom::si::energy::electronvolt;
use uom::si::f64::{Energy, HeatFluxDensity, ThermodynamicTemperature};
use uom::si::heat_flux_density::watt_per_square_meter;

use super::{SolarCell, SolarCellError, power_density_from};
use crate::bei::Bei;
use crate::quantity::{
    Bounds, Quantity, RawValue, Unit, check_bounds, validate_energy, validate_temperature,
};

/// Unvalidated Shockley-Queisser inputs; unit-less numbers are eV and K.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShockleyQueisserParameters {
    pub bandgap: RawValue,
    pub temp_sun: RawValue,
}

impl ShockleyQueisserParameters {
    pub fn new(bandgap: impl Into<RawValue>, temp_sun: impl Into<RawValue>) -> Self {
        Self {
            bandgap: bandgap.into(),
            temp_sun: temp_sun.into(),
        }
    }

    pub fn build(&self) -> Result<ShockleyQueisser, SolarCellError> {
        let bandgap = validate_energy(&self.bandgap, Bounds::at_least(0.0))
            .map_err(SolarCellError::field("bandgap"))?;
        let temp_sun = validate_temperature(&self.temp_sun, Bounds::greater_than(0.0))
            .map_err(SolarCellError::field("temp_sun"))?;
        ShockleyQueisser::new(bandgap, temp_sun)
    }
}

/// Single-junction cell in which every absorbed photon above the bandgap
/// delivers exactly the bandgap energy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShockleyQueisser {
    bandgap: Energy,
    solar: Bei,
}

impl ShockleyQueisser {
    pub fn new(bandgap: Energy, temp_sun: ThermodynamicTemperature) -> Result<Self, SolarCellError> {
        check_bounds(
            Quantity::new(bandgap.get::<electronvolt>(), Unit::Electronvolt),
            Bounds::at_least(0.0),
        )
        .map_err(SolarCellError::field("bandgap"))?;

        let solar = Bei::new(2, bandgap, temp_sun, Energy::new::<electronvolt>(0.0))?;
        Ok(Self { bandgap, solar })
    }

    pub fn from_parameters(parameters: &ShockleyQueisserParameters) -> Result<Self, SolarCellError> {
        parameters.build()
    }

    pub const fn bandgap(&self) -> Energy {
        self.bandgap
    }

    /// Validated parameters, unit-tagged.
    pub fn to_parameters(&self) -> ShockleyQueisserParameters {
        ShockleyQueisserParameters::new(self.bandgap, self.solar.temperature())
    }
}

impl SolarCell for ShockleyQueisser {
    fn name(&self) -> &'static str {
        "shockley-queisser"
    }

    fn temp_sun(&self) -> ThermodynamicTemperature {
        self.solar.temperature()
    }

    fn power_density(&self) -> HeatFluxDensity {
        if self.bandgap.get::<electronvolt>() == 0.0 {
            return HeatFluxDensity::new::<watt_per_square_meter>(0.0);
        }
        power_density_from(self.solar.upper() * self.bandgap)
    }
}

#[cfg(test)]
mod tests {
    use super::{ShockleyQueisser, ShockleyQueisserParameters};
    use crate::domain::ValidationKind;
    use crate::solarcell::SolarCell;
    use uom::si::energy::electronvolt;
    use uom::si::f64::{Energy, ThermodynamicTemperature};
    use uom::si::heat_flux_density::watt_per_square_meter;
    use uom::si::thermodynamic_temperature::kelvin;

    #[test]
    fn silicon_like_cell_reaches_the_detailed_balance_limit() {
        let cell = ShockleyQueisserParameters::new(1.15, 5_762.0)
            .build()
            .expect("valid cell");
        let efficiency = cell.efficiency();
        assert!(
            (efficiency - 0.437_193_340_286_735_2).abs() <= 1.0e-10,
            "efficiency={efficiency}"
        );
        assert_eq!(cell.name(), "shockley-queisser");
    }

    #[test]
    fn zero_bandgap_produces_no_power() {
        let cell = ShockleyQueisser::new(
            Energy::new::<electronvolt>(0.0),
            ThermodynamicTemperature::new::<kelvin>(5_762.0),
        )
        .expect("zero bandgap is valid");
        assert_eq!(cell.power_density().get::<watt_per_square_meter>(), 0.0);
        assert_eq!(cell.efficiency(), 0.0);
    }

    #[test]
    fn invalid_parameters_name_the_field() {
        let error = ShockleyQueisserParameters::new(-0.1, 5_762.0)
            .build()
            .expect_err("negative bandgap");
        assert_eq!(error.kind(), ValidationKind::Range);
        assert!(error.to_string().contains("bandgap"));

        let error = ShockleyQueisserParameters::new(1.15, "5762 V")
            .build()
            .expect_err("volts as temperature");
        assert_eq!(error.kind(), ValidationKind::Unit);
    }

    #[test]
    fn parameters_round_trip_through_json() {
        let cell = ShockleyQueisserParameters::new("1.15 eV", "5762 K")
            .build()
            .expect("valid cell");
        let json = serde_json::to_value(cell.to_parameters()).expect("serialize");
        assert_eq!(json["bandgap"]["unit"], "eV");
        assert_eq!(json["tempSun"]["value"], 5_762.0);

        let parameters: ShockleyQueisserParameters =
            serde_json::from_value(json).expect("deserialize");
        let rebuilt = ShockleyQueisser::from_parameters(&parameters).expect("rebuild");
        assert!((rebuilt.efficiency() - cell.efficiency()).abs() <= 1.0e-14);
    }
}
