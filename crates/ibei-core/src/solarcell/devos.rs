use serde::{Deserialize, Serialize};
use uom::si::electric_charge::coulomb;
use uom::si::electric_potential::volt;
use uom::si::energy::electronvolt;
use uom::si::f64::{
    ElectricCharge, ElectricPotential, Energy, HeatFluxDensity, ThermodynamicTemperature,
};
use uom::si::heat_flux_density::watt_per_square_meter;

use super::{SolarCell, SolarCellError, power_density_from};
use crate::bei::Bei;
use crate::common::constants::ELEMENTARY_CHARGE;
use crate::quantity::{
    Bounds, Quantity, RawValue, Unit, check_bounds, validate_electric_potential, validate_energy,
    validate_temperature,
};

/// Unvalidated DeVos inputs; unit-less numbers are eV, K and V.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeVosParameters {
    pub bandgap: RawValue,
    pub temp_sun: RawValue,
    pub temp_planet: RawValue,
    pub voltage: RawValue,
}

impl DeVosParameters {
    pub fn new(
        bandgap: impl Into<RawValue>,
        temp_sun: impl Into<RawValue>,
        temp_planet: impl Into<RawValue>,
        voltage: impl Into<RawValue>,
    ) -> Self {
        Self {
            bandgap: bandgap.into(),
            temp_sun: temp_sun.into(),
            temp_planet: temp_planet.into(),
            voltage: voltage.into(),
        }
    }

    pub fn build(&self) -> Result<DeVos, SolarCellError> {
        let bandgap = validate_energy(&self.bandgap, Bounds::at_least(0.0))
            .map_err(SolarCellError::field("bandgap"))?;
        let temp_sun = validate_temperature(&self.temp_sun, Bounds::greater_than(0.0))
            .map_err(SolarCellError::field("temp_sun"))?;
        let temp_planet = validate_temperature(&self.temp_planet, Bounds::greater_than(0.0))
            .map_err(SolarCellError::field("temp_planet"))?;
        let voltage = validate_electric_potential(&self.voltage, Bounds::at_least(0.0))
            .map_err(SolarCellError::field("voltage"))?;
        DeVos::new(bandgap, temp_sun, temp_planet, voltage)
    }
}

/// Fully concentrated sunlight on a cell held at the planet's temperature and
/// biased at `voltage`; the cell re-emits with chemical potential `qV`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeVos {
    bandgap: Energy,
    voltage: ElectricPotential,
    solar: Bei,
    cell: Bei,
}

impl DeVos {
    pub fn new(
        bandgap: Energy,
        temp_sun: ThermodynamicTemperature,
        temp_planet: ThermodynamicTemperature,
        voltage: ElectricPotential,
    ) -> Result<Self, SolarCellError> {
        check_bounds(
            Quantity::new(bandgap.get::<electronvolt>(), Unit::Electronvolt),
            Bounds::at_least(0.0),
        )
        .map_err(SolarCellError::field("bandgap"))?;
        check_bounds(
            Quantity::new(voltage.get::<volt>(), Unit::Volt),
            Bounds::at_least(0.0),
        )
        .map_err(SolarCellError::field("voltage"))?;

        let electron_energy: Energy = voltage * ElectricCharge::new::<coulomb>(ELEMENTARY_CHARGE);
        let solar = Bei::new(2, bandgap, temp_sun, Energy::new::<electronvolt>(0.0))?;
        let cell = Bei::new(2, bandgap, temp_planet, electron_energy)?;

        Ok(Self {
            bandgap,
            voltage,
            solar,
            cell,
        })
    }

    pub fn from_parameters(parameters: &DeVosParameters) -> Result<Self, SolarCellError> {
        parameters.build()
    }

    pub const fn bandgap(&self) -> Energy {
        self.bandgap
    }

    pub const fn voltage(&self) -> ElectricPotential {
        self.voltage
    }

    pub fn temp_planet(&self) -> ThermodynamicTemperature {
        self.cell.temperature()
    }

    /// Energy `qV` delivered per extracted electron.
    pub fn electron_energy(&self) -> Energy {
        self.cell.chemical_potential()
    }

    pub fn to_parameters(&self) -> DeVosParameters {
        DeVosParameters::new(
            self.bandgap,
            self.solar.temperature(),
            self.cell.temperature(),
            self.voltage,
        )
    }
}

impl SolarCell for DeVos {
    fn name(&self) -> &'static str {
        "devos"
    }

    fn temp_sun(&self) -> ThermodynamicTemperature {
        self.solar.temperature()
    }

    fn power_density(&self) -> HeatFluxDensity {
        if self.bandgap.get::<electronvolt>() == 0.0 {
            return HeatFluxDensity::new::<watt_per_square_meter>(0.0);
        }
        let net_flux = self.solar.upper() - self.cell.upper();
        power_density_from(net_flux * self.electron_energy())
    }
}

#[cfg(test)]
mod tests {
    use super::{DeVos, DeVosParameters};
    use crate::domain::ValidationKind;
    use crate::solarcell::SolarCell;
    use uom::si::electric_potential::volt;
    use uom::si::energy::electronvolt;
    use uom::si::f64::{ElectricPotential, Energy, ThermodynamicTemperature};
    use uom::si::heat_flux_density::watt_per_square_meter;
    use uom::si::thermodynamic_temperature::kelvin;

    fn earth_cell(bandgap: f64, voltage: f64) -> DeVos {
        DeVosParameters::new(bandgap, 5_762.0, 288.0, voltage)
            .build()
            .expect("valid cell")
    }

    #[test]
    fn half_volt_bias_matches_reference_power() {
        let cell = earth_cell(1.15, 0.5);
        let power = cell.power_density().get::<watt_per_square_meter>();
        assert!(
            ((power - 1.188_093_046_659_442_6e7) / 1.188_093_046_659_442_6e7).abs() <= 1.0e-10,
            "power={power}"
        );
        assert!((cell.efficiency() - 0.190_084_060_994_049_43).abs() <= 1.0e-10);
        assert!((cell.electron_energy().get::<electronvolt>() - 0.5).abs() <= 1.0e-15);
    }

    #[test]
    fn bias_above_the_bandgap_does_not_fail() {
        for (bandgap, voltage) in [(0.1, 0.5), (1.15, 1.2), (1.15, 1.09)] {
            let cell = earth_cell(bandgap, voltage);
            let power = cell.power_density().get::<watt_per_square_meter>();
            assert!(power.is_finite() && power > 0.0, "({bandgap}, {voltage}) gave {power}");
        }
    }

    #[test]
    fn zero_bandgap_produces_no_power() {
        let cell = DeVos::new(
            Energy::new::<electronvolt>(0.0),
            ThermodynamicTemperature::new::<kelvin>(5_762.0),
            ThermodynamicTemperature::new::<kelvin>(288.0),
            ElectricPotential::new::<volt>(0.5),
        )
        .expect("zero bandgap is valid");
        assert_eq!(cell.power_density().get::<watt_per_square_meter>(), 0.0);
    }

    #[test]
    fn zero_bias_extracts_no_power() {
        assert_eq!(earth_cell(1.15, 0.0).power_density().get::<watt_per_square_meter>(), 0.0);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let negative_bias = DeVosParameters::new(1.15, 5_762.0, 288.0, -0.5)
            .build()
            .expect_err("negative voltage");
        assert_eq!(negative_bias.kind(), ValidationKind::Range);
        assert!(negative_bias.to_string().contains("voltage"));

        let frozen = DeVosParameters::new(1.15, 5_762.0, 0.0, 0.5)
            .build()
            .expect_err("zero planet temperature");
        assert!(frozen.to_string().contains("temp_planet"));

        let millivolts = DeVosParameters::new(1.15, 5_762.0, 288.0, "500 mV")
            .build()
            .expect("millivolt bias");
        assert!((millivolts.voltage().get::<volt>() - 0.5).abs() <= 1.0e-12);
    }

    #[test]
    fn parameters_serialize_with_units() {
        let cell = earth_cell(1.15, 0.5);
        let json = serde_json::to_value(cell.to_parameters()).expect("serialize");
        assert_eq!(json["tempPlanet"]["unit"], "K");
        assert_eq!(json["voltage"]["unit"], "V");
        assert_eq!(json["voltage"]["value"], 0.5);
    }
}
