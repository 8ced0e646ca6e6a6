use std::fmt::{Display, Formatter};
use std::str::FromStr;

use uom::si::electric_potential::{millivolt, volt};
use uom::si::energy::{electronvolt, joule, kiloelectronvolt, zeptojoule};
use uom::si::f64::{ElectricPotential, Energy, ThermodynamicTemperature};
use uom::si::thermodynamic_temperature::{degree_celsius, degree_fahrenheit, degree_rankine, kelvin};

use super::QuantityError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Energy,
    Temperature,
    ElectricPotential,
    Time,
    Dimensionless,
}

impl Dimension {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Energy => "energy",
            Self::Temperature => "temperature",
            Self::ElectricPotential => "electric potential",
            Self::Time => "time",
            Self::Dimensionless => "dimensionless",
        }
    }
}

impl Display for Dimension {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// Units accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Electronvolt,
    Kiloelectronvolt,
    Joule,
    Zeptojoule,
    Kelvin,
    DegreeCelsius,
    DegreeFahrenheit,
    DegreeRankine,
    Volt,
    Millivolt,
    Second,
    Dimensionless,
}

const UNIT_SYMBOLS: [(&str, Unit); 17] = [
    ("eV", Unit::Electronvolt),
    ("keV", Unit::Kiloelectronvolt),
    ("J", Unit::Joule),
    ("zJ", Unit::Zeptojoule),
    ("K", Unit::Kelvin),
    ("degC", Unit::DegreeCelsius),
    ("°C", Unit::DegreeCelsius),
    ("deg_C", Unit::DegreeCelsius),
    ("degF", Unit::DegreeFahrenheit),
    ("°F", Unit::DegreeFahrenheit),
    ("deg_F", Unit::DegreeFahrenheit),
    ("degR", Unit::DegreeRankine),
    ("°R", Unit::DegreeRankine),
    ("V", Unit::Volt),
    ("mV", Unit::Millivolt),
    ("s", Unit::Second),
    ("", Unit::Dimensionless),
];

impl Unit {
    pub const fn dimension(self) -> Dimension {
        match self {
            Self::Electronvolt | Self::Kiloelectronvolt | Self::Joule | Self::Zeptojoule => {
                Dimension::Energy
            }
            Self::Kelvin | Self::DegreeCelsius | Self::DegreeFahrenheit | Self::DegreeRankine => {
                Dimension::Temperature
            }
            Self::Volt | Self::Millivolt => Dimension::ElectricPotential,
            Self::Second => Dimension::Time,
            Self::Dimensionless => Dimension::Dimensionless,
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Electronvolt => "eV",
            Self::Kiloelectronvolt => "keV",
            Self::Joule => "J",
            Self::Zeptojoule => "zJ",
            Self::Kelvin => "K",
            Self::DegreeCelsius => "degC",
            Self::DegreeFahrenheit => "degF",
            Self::DegreeRankine => "degR",
            Self::Volt => "V",
            Self::Millivolt => "mV",
            Self::Second => "s",
            Self::Dimensionless => "",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let symbol = symbol.trim();
        UNIT_SYMBOLS
            .iter()
            .find(|(candidate, _)| *candidate == symbol)
            .map(|(_, unit)| *unit)
    }

    /// Re-expresses `value` given in `self` in the unit `target`.
    pub(crate) fn convert(self, value: f64, target: Unit) -> Result<f64, QuantityError> {
        if self.dimension() != target.dimension() {
            return Err(QuantityError::IncompatibleUnit {
                from: self,
                to: target,
            });
        }
        if self == target {
            return Ok(value);
        }

        let converted = match self.dimension() {
            Dimension::Energy => energy_value(energy_from(value, self), target),
            Dimension::Temperature => temperature_value(temperature_from(value, self), target),
            Dimension::ElectricPotential => potential_value(potential_from(value, self), target),
            Dimension::Time | Dimension::Dimensionless => value,
        };
        Ok(converted)
    }
}

impl Display for Unit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).symbol())
    }
}

impl FromStr for Unit {
    type Err = QuantityError;

    fn from_str(symbol: &str) -> Result<Self, Self::Err> {
        Self::from_symbol(symbol).ok_or_else(|| QuantityError::UnknownUnit {
            symbol: symbol.trim().to_string(),
        })
    }
}

pub(crate) fn energy_from(value: f64, unit: Unit) -> Energy {
    match unit {
        Unit::Kiloelectronvolt => Energy::new::<kiloelectronvolt>(value),
        Unit::Joule => Energy::new::<joule>(value),
        Unit::Zeptojoule => Energy::new::<zeptojoule>(value),
        _ => Energy::new::<electronvolt>(value),
    }
}

fn energy_value(energy: Energy, unit: Unit) -> f64 {
    match unit {
        Unit::Kiloelectronvolt => energy.get::<kiloelectronvolt>(),
        Unit::Joule => energy.get::<joule>(),
        Unit::Zeptojoule => energy.get::<zeptojoule>(),
        _ => energy.get::<electronvolt>(),
    }
}

pub(crate) fn temperature_from(value: f64, unit: Unit) -> ThermodynamicTemperature {
    match unit {
        Unit::DegreeCelsius => ThermodynamicTemperature::new::<degree_celsius>(value),
        Unit::DegreeFahrenheit => ThermodynamicTemperature::new::<degree_fahrenheit>(value),
        Unit::DegreeRankine => ThermodynamicTemperature::new::<degree_rankine>(value),
        _ => ThermodynamicTemperature::new::<kelvin>(value),
    }
}

fn temperature_value(temperature: ThermodynamicTemperature, unit: Unit) -> f64 {
    match unit {
        Unit::DegreeCelsius => temperature.get::<degree_celsius>(),
        Unit::DegreeFahrenheit => temperature.get::<degree_fahrenheit>(),
        Unit::DegreeRankine => temperature.get::<degree_rankine>(),
        _ => temperature.get::<kelvin>(),
    }
}

pub(crate) fn potential_from(value: f64, unit: Unit) -> ElectricPotential {
    match unit {
        Unit::Millivolt => ElectricPotential::new::<millivolt>(value),
        _ => ElectricPotential::new::<volt>(value),
    }
}

fn potential_value(potential: ElectricPotential, unit: Unit) -> f64 {
    match unit {
        Unit::Millivolt => potential.get::<millivolt>(),
        _ => potential.get::<volt>(),
    }
}

#[cfg(test)]
mod tests {
    use super::{Dimension, Unit};
    use crate::quantity::QuantityError;

    #[test]
    fn symbols_round_trip_through_lookup() {
        for unit in [
            Unit::Electronvolt,
            Unit::Kiloelectronvolt,
            Unit::Joule,
            Unit::Zeptojoule,
            Unit::Kelvin,
            Unit::DegreeCelsius,
            Unit::DegreeFahrenheit,
            Unit::DegreeRankine,
            Unit::Volt,
            Unit::Millivolt,
            Unit::Second,
            Unit::Dimensionless,
        ] {
            assert_eq!(Unit::from_symbol(unit.symbol()), Some(unit));
        }
        assert_eq!(Unit::from_symbol("°C"), Some(Unit::DegreeCelsius));
        assert_eq!(Unit::from_symbol(" eV "), Some(Unit::Electronvolt));
        assert!("furlong".parse::<Unit>().is_err());
    }

    #[test]
    fn energy_conversion_uses_electronvolt_definition() {
        let joules = Unit::Electronvolt
            .convert(1.0, Unit::Joule)
            .expect("energy conversion");
        assert!((joules - 1.602_176_634e-19).abs() <= 1.0e-33);

        let electronvolts = Unit::Joule
            .convert(3.204_353_268e-19, Unit::Electronvolt)
            .expect("energy conversion");
        assert!((electronvolts - 2.0).abs() <= 1.0e-12);

        let kev = Unit::Kiloelectronvolt
            .convert(1.0, Unit::Electronvolt)
            .expect("energy conversion");
        assert!((kev - 1.0e3).abs() <= 1.0e-9);
    }

    #[test]
    fn temperature_conversion_is_affine() {
        let kelvin = Unit::DegreeCelsius
            .convert(5_498.85, Unit::Kelvin)
            .expect("temperature conversion");
        assert!((kelvin - 5_772.0).abs() <= 1.0e-9);

        let freezing = Unit::DegreeFahrenheit
            .convert(32.0, Unit::Kelvin)
            .expect("temperature conversion");
        assert!((freezing - 273.15).abs() <= 1.0e-9);

        let celsius = Unit::Kelvin
            .convert(0.0, Unit::DegreeCelsius)
            .expect("temperature conversion");
        assert!((celsius + 273.15).abs() <= 1.0e-9);
    }

    #[test]
    fn mismatched_dimensions_are_rejected() {
        let error = Unit::Second
            .convert(1.0, Unit::Electronvolt)
            .expect_err("time is not an energy");
        assert_eq!(
            error,
            QuantityError::IncompatibleUnit {
                from: Unit::Second,
                to: Unit::Electronvolt,
            }
        );
        assert_eq!(Unit::Volt.dimension(), Dimension::ElectricPotential);
        assert_eq!(Unit::DegreeRankine.dimension(), Dimension::Temperature);
    }
}
