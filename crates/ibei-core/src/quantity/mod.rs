//! Validation of loosely typed scalar inputs into unit-checked quantities.
//!
//! Inputs arrive as bare numbers, strings such as `"1.1 eV"` or `"300K"`,
//! unit-tagged objects, or (erroneously) sequences. Each accepted value is
//! converted to a requested target unit and checked against [`Bounds`].

pub mod bounds;
pub mod unit;

pub use bounds::{Bound, Bounds};
pub use unit::{Dimension, Unit};

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uom::si::electric_potential::volt;
use uom::si::energy::electronvolt;
use uom::si::f64::{ElectricPotential, Energy, ThermodynamicTemperature};
use uom::si::thermodynamic_temperature::kelvin;

use crate::domain::{IbeiError, ValidationKind};

/// Untyped scalar input as it appears in JSON documents or on the command line.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
    Tagged { value: f64, unit: String },
    Sequence(Vec<RawValue>),
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for RawValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Quantity> for RawValue {
    fn from(quantity: Quantity) -> Self {
        Self::Tagged {
            value: quantity.value,
            unit: quantity.unit.symbol().to_string(),
        }
    }
}

impl From<Energy> for RawValue {
    fn from(energy: Energy) -> Self {
        Quantity::new(energy.get::<electronvolt>(), Unit::Electronvolt).into()
    }
}

impl From<ThermodynamicTemperature> for RawValue {
    fn from(temperature: ThermodynamicTemperature) -> Self {
        Quantity::new(temperature.get::<kelvin>(), Unit::Kelvin).into()
    }
}

impl From<ElectricPotential> for RawValue {
    fn from(potential: ElectricPotential) -> Self {
        Quantity::new(potential.get::<volt>(), Unit::Volt).into()
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuantityError {
    #[error("expected a scalar, got a sequence of {len} values")]
    NonScalar { len: usize },
    #[error("cannot parse a number from `{text}`")]
    NotNumeric { text: String },
    #[error("`{text}` is not a whole number")]
    NotInteger { text: String },
    #[error("unknown unit `{symbol}`")]
    UnknownUnit { symbol: String },
    #[error("unit `{from}` ({}) is not convertible to `{to}` ({})", .from.dimension(), .to.dimension())]
    IncompatibleUnit { from: Unit, to: Unit },
    #[error("{quantity} is outside {bounds}")]
    OutOfRange { quantity: Quantity, bounds: Bounds },
    #[error("upper bound {upper} is below lower bound {lower}")]
    InvalidBounds { lower: f64, upper: f64 },
}

impl QuantityError {
    pub const fn kind(&self) -> ValidationKind {
        match self {
            Self::NonScalar { .. } | Self::NotNumeric { .. } | Self::NotInteger { .. } => {
                ValidationKind::Type
            }
            Self::UnknownUnit { .. } | Self::IncompatibleUnit { .. } => ValidationKind::Unit,
            Self::OutOfRange { .. } | Self::InvalidBounds { .. } => ValidationKind::Range,
        }
    }
}

impl From<QuantityError> for IbeiError {
    fn from(error: QuantityError) -> Self {
        IbeiError::input_validation(error.kind().error_code(), error.to_string())
    }
}

/// A scalar value together with the unit it is expressed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantity {
    value: f64,
    unit: Unit,
}

impl Quantity {
    pub const fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    pub const fn value(&self) -> f64 {
        self.value
    }

    pub const fn unit(&self) -> Unit {
        self.unit
    }

    pub fn to(&self, target: Unit) -> Result<Self, QuantityError> {
        Ok(Self::new(self.unit.convert(self.value, target)?, target))
    }
}

impl Display for Quantity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.unit {
            Unit::Dimensionless => write!(f, "{}", self.value),
            unit => write!(f, "{} {}", self.value, unit),
        }
    }
}

impl FromStr for Quantity {
    type Err = QuantityError;

    /// A missing unit parses as dimensionless.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let (value, unit) = parse_text(text)?;
        Ok(Self::new(value, unit.unwrap_or(Unit::Dimensionless)))
    }
}

/// Converts `raw` into `target` and checks the converted value against `bounds`.
///
/// Bare numbers and unit-less text are taken to already be in `target`.
pub fn validate(raw: &RawValue, target: Unit, bounds: Bounds) -> Result<Quantity, QuantityError> {
    let (value, unit) = match raw {
        RawValue::Number(value) => (*value, None),
        RawValue::Text(text) => parse_text(text)?,
        RawValue::Tagged { value, unit } if unit.trim().is_empty() => (*value, None),
        RawValue::Tagged { value, unit } => (*value, Some(unit.parse::<Unit>()?)),
        RawValue::Sequence(values) => return Err(QuantityError::NonScalar { len: values.len() }),
    };

    let quantity = Quantity::new(value, unit.unwrap_or(target)).to(target)?;
    check_bounds(quantity, bounds)
}

/// Checks an already converted quantity; `bounds` are in the quantity's unit.
pub fn check_bounds(quantity: Quantity, bounds: Bounds) -> Result<Quantity, QuantityError> {
    if !bounds.contains(quantity.value) {
        return Err(QuantityError::OutOfRange { quantity, bounds });
    }
    Ok(quantity)
}

/// `bounds` are given in electron-volts.
pub fn validate_energy(raw: &RawValue, bounds: Bounds) -> Result<Energy, QuantityError> {
    let quantity = validate(raw, Unit::Electronvolt, bounds)?;
    Ok(Energy::new::<electronvolt>(quantity.value))
}

/// `bounds` are given in kelvin.
pub fn validate_temperature(
    raw: &RawValue,
    bounds: Bounds,
) -> Result<ThermodynamicTemperature, QuantityError> {
    let quantity = validate(raw, Unit::Kelvin, bounds)?;
    Ok(ThermodynamicTemperature::new::<kelvin>(quantity.value))
}

/// `bounds` are given in volts.
pub fn validate_electric_potential(
    raw: &RawValue,
    bounds: Bounds,
) -> Result<ElectricPotential, QuantityError> {
    let quantity = validate(raw, Unit::Volt, bounds)?;
    Ok(ElectricPotential::new::<volt>(quantity.value))
}

/// Coerces `raw` to a non-negative integer without truncation.
///
/// Numbers must carry no fractional part (`2.0` is accepted). Text must be an
/// integer literal, so `"2"` is accepted while `"2.0"` is not.
pub fn coerce_order(raw: &RawValue) -> Result<u32, QuantityError> {
    let whole = match raw {
        RawValue::Number(value) => whole_number(*value)?,
        RawValue::Tagged { value, unit } => {
            let unit = unit.parse::<Unit>()?;
            if unit != Unit::Dimensionless {
                return Err(QuantityError::IncompatibleUnit {
                    from: unit,
                    to: Unit::Dimensionless,
                });
            }
            whole_number(*value)?
        }
        RawValue::Text(text) => {
            let trimmed = text.trim();
            let parsed = trimmed
                .parse::<i64>()
                .map_err(|_| QuantityError::NotInteger {
                    text: trimmed.to_string(),
                })?;
            parsed as f64
        }
        RawValue::Sequence(values) => return Err(QuantityError::NonScalar { len: values.len() }),
    };

    let bounds = Bounds::new(Bound::Inclusive(0.0), Bound::Inclusive(f64::from(u32::MAX)))?;
    let quantity = check_bounds(Quantity::new(whole, Unit::Dimensionless), bounds)?;
    Ok(quantity.value as u32)
}

fn whole_number(value: f64) -> Result<f64, QuantityError> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(QuantityError::NotInteger {
            text: value.to_string(),
        });
    }
    Ok(value)
}

fn parse_text(text: &str) -> Result<(f64, Option<Unit>), QuantityError> {
    let trimmed = text.trim();
    let (value, rest) =
        split_numeric_prefix(trimmed).ok_or_else(|| QuantityError::NotNumeric {
            text: trimmed.to_string(),
        })?;

    let rest = rest.trim();
    if rest.is_empty() {
        return Ok((value, None));
    }
    Ok((value, Some(rest.parse::<Unit>()?)))
}

/// Longest prefix of `text` that parses as a float, and the remainder.
fn split_numeric_prefix(text: &str) -> Option<(f64, &str)> {
    let mut ends = text
        .char_indices()
        .map(|(index, _)| index)
        .skip(1)
        .collect::<Vec<_>>();
    ends.push(text.len());

    ends.into_iter().rev().find_map(|end| {
        text[..end]
            .trim_end()
            .parse::<f64>()
            .ok()
            .map(|value| (value, &text[end..]))
    })
}

#[cfg(test)]
mod tests {
    use super::{
        Bounds, Quantity, QuantityError, RawValue, Unit, coerce_order, validate, validate_energy,
        validate_temperature,
    };
    use crate::domain::{IbeiError, ValidationKind};
    use uom::si::energy::electronvolt;
    use uom::si::f64::Energy;
    use uom::si::thermodynamic_temperature::kelvin;

    #[test]
    fn text_inputs_parse_value_and_unit() {
        let cases = [
            ("1.1 eV", 1.1, Unit::Electronvolt),
            ("300K", 300.0, Unit::Kelvin),
            ("  5498.85 °C ", 5_498.85, Unit::DegreeCelsius),
            ("1e-3 keV", 1.0e-3, Unit::Kiloelectronvolt),
            ("2", 2.0, Unit::Dimensionless),
            ("1eV", 1.0, Unit::Electronvolt),
        ];

        for (text, value, unit) in cases {
            let quantity = text.parse::<Quantity>().expect("quantity text");
            assert_eq!(quantity, Quantity::new(value, unit), "{text}");
        }

        let unbounded = "inf eV".parse::<Quantity>().expect("infinite energy");
        assert!(unbounded.value().is_infinite());
        assert_eq!(unbounded.unit(), Unit::Electronvolt);
    }

    #[test]
    fn unit_less_values_take_the_target_unit() {
        let number = validate(&RawValue::from(300.0), Unit::Kelvin, Bounds::greater_than(0.0))
            .expect("number");
        assert_eq!(number, Quantity::new(300.0, Unit::Kelvin));

        let text = validate(&RawValue::from("1.1"), Unit::Electronvolt, Bounds::at_least(0.0))
            .expect("text");
        assert_eq!(text, Quantity::new(1.1, Unit::Electronvolt));

        let tagged = RawValue::Tagged {
            value: 0.5,
            unit: String::new(),
        };
        let tagged = validate(&tagged, Unit::Volt, Bounds::at_least(0.0)).expect("tagged");
        assert_eq!(tagged, Quantity::new(0.5, Unit::Volt));
    }

    #[test]
    fn temperature_scales_convert_before_bounds_are_checked() {
        let sun = validate_temperature(&RawValue::from("5498.85 degC"), Bounds::greater_than(0.0))
            .expect("celsius temperature");
        assert!((sun.get::<kelvin>() - 5_772.0).abs() <= 1.0e-9);

        let error = validate_temperature(&RawValue::from("-300 degC"), Bounds::greater_than(0.0))
            .expect_err("below absolute zero");
        assert_eq!(error.kind(), ValidationKind::Range);
    }

    #[test]
    fn typed_quantities_round_trip_through_raw_values() {
        let energy = Energy::new::<electronvolt>(1.15);
        let validated = validate_energy(&RawValue::from(energy), Bounds::at_least(0.0))
            .expect("typed energy");
        assert!((validated.get::<electronvolt>() - 1.15).abs() <= 1.0e-12);
    }

    #[test]
    fn validation_failures_are_classified() {
        let cases: [(RawValue, ValidationKind); 6] = [
            (RawValue::from(-1.0), ValidationKind::Range),
            (RawValue::from(f64::NAN), ValidationKind::Range),
            (
                RawValue::Sequence(vec![RawValue::from(1.0), RawValue::from(2.0)]),
                ValidationKind::Type,
            ),
            (RawValue::from("one eV"), ValidationKind::Type),
            (RawValue::from("1 parsec"), ValidationKind::Unit),
            (RawValue::from("1 s"), ValidationKind::Unit),
        ];

        for (raw, kind) in cases {
            let error = validate(&raw, Unit::Electronvolt, Bounds::at_least(0.0))
                .expect_err("invalid energy");
            assert_eq!(error.kind(), kind, "{raw:?}");
        }
    }

    #[test]
    fn range_errors_name_the_converted_value_and_interval() {
        let error = validate(&RawValue::from("0 K"), Unit::Kelvin, Bounds::greater_than(0.0))
            .expect_err("zero temperature");
        assert_eq!(error.to_string(), "0 K is outside (0, inf]");

        let diagnostic = IbeiError::from(error);
        assert_eq!(diagnostic.code(), "INPUT.RANGE");
        assert_eq!(diagnostic.exit_code(), 2);
    }

    #[test]
    fn orders_coerce_without_truncation() {
        assert_eq!(coerce_order(&RawValue::from(2.0)), Ok(2));
        assert_eq!(coerce_order(&RawValue::from("2")), Ok(2));
        assert_eq!(coerce_order(&RawValue::from(" 12 ")), Ok(12));
        assert_eq!(coerce_order(&RawValue::from(0u32)), Ok(0));

        for raw in [
            RawValue::from(2.3),
            RawValue::from("12.2"),
            RawValue::from("two"),
            RawValue::from(f64::INFINITY),
        ] {
            let error = coerce_order(&raw).expect_err("non-integer order");
            assert_eq!(error.kind(), ValidationKind::Type, "{raw:?}");
        }

        let negative = coerce_order(&RawValue::from(-1.0)).expect_err("negative order");
        assert_eq!(negative.kind(), ValidationKind::Range);
        let negative_text = coerce_order(&RawValue::from("-3")).expect_err("negative order");
        assert_eq!(negative_text.kind(), ValidationKind::Range);

        let sequence = coerce_order(&RawValue::Sequence(vec![RawValue::from(2.0)]))
            .expect_err("sequence order");
        assert_eq!(sequence, QuantityError::NonScalar { len: 1 });
    }

    #[test]
    fn raw_values_deserialize_untagged() {
        let values: Vec<RawValue> =
            serde_json::from_str(r#"[2, "1.1 eV", {"value": 300, "unit": "K"}, [1, 2]]"#)
                .expect("raw values");
        assert_eq!(values[0], RawValue::Number(2.0));
        assert_eq!(values[1], RawValue::Text("1.1 eV".to_string()));
        assert_eq!(
            values[2],
            RawValue::Tagged {
                value: 300.0,
                unit: "K".to_string(),
            }
        );
        assert!(matches!(values[3], RawValue::Sequence(ref items) if items.len() == 2));
    }
}
