//! JSON scenario files: batches of integrals and solar cells, each with
//! optional reference values checked against a shared tolerance.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uom::si::heat_flux_density::watt_per_square_meter;

use crate::bei::{Bei, BeiParameters};
use crate::domain::{IbeiError, IbeiResult};
use crate::numerics::{NumericTolerance, ToleranceComparison};
use crate::solarcell::{DeVosParameters, ShockleyQueisserParameters, SolarCell};

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioConfig {
    #[serde(default)]
    pub tolerance: NumericTolerance,
    #[serde(default)]
    pub integrals: Vec<IntegralCase>,
    #[serde(default)]
    pub cells: Vec<CellCase>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegralCase {
    pub id: String,
    #[serde(flatten)]
    pub parameters: BeiParameters,
    #[serde(default)]
    pub expected: IntegralExpectation,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegralExpectation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellCase {
    pub id: String,
    #[serde(flatten)]
    pub model: CellModel,
    #[serde(default)]
    pub expected: CellExpectation,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "model")]
pub enum CellModel {
    #[serde(rename = "shockley-queisser")]
    ShockleyQueisser(ShockleyQueisserParameters),
    #[serde(rename = "devos")]
    DeVos(DeVosParameters),
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellExpectation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_density: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub efficiency: Option<f64>,
}

#[derive(Debug, thiserror::Error)]
pub enum ScenarioConfigError {
    #[error("failed to read scenario '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse scenario '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl From<ScenarioConfigError> for IbeiError {
    fn from(error: ScenarioConfigError) -> Self {
        match &error {
            ScenarioConfigError::Read { .. } => {
                IbeiError::io_system("IO.SCENARIO_READ", error.to_string())
            }
            ScenarioConfigError::Parse { .. } => {
                IbeiError::input_validation("INPUT.SCENARIO_PARSE", error.to_string())
            }
        }
    }
}

pub fn load_scenario(path: impl AsRef<Path>) -> Result<ScenarioConfig, ScenarioConfigError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| ScenarioConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&source).map_err(|source| ScenarioConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioReport {
    pub tolerance: NumericTolerance,
    pub integrals: Vec<IntegralReport>,
    pub cells: Vec<CellReport>,
    pub passed: bool,
}

impl ScenarioReport {
    pub fn checks(&self) -> impl Iterator<Item = &ExpectationCheck> {
        self.integrals
            .iter()
            .flat_map(|integral| integral.checks.iter())
            .chain(self.cells.iter().flat_map(|cell| cell.checks.iter()))
    }

    pub fn failed_checks(&self) -> usize {
        self.checks()
            .filter(|check| !check.comparison.passes)
            .count()
    }

    /// Turns a report with failed checks into an expectation-mismatch error.
    pub fn ensure_passed(&self) -> IbeiResult<()> {
        let failed = self.failed_checks();
        if failed == 0 {
            return Ok(());
        }
        Err(IbeiError::expectation_mismatch(
            "RUN.EXPECTATION_MISMATCH",
            format!("{failed} of {} checks failed", self.checks().count()),
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegralReport {
    pub id: String,
    pub order: u32,
    pub unit: String,
    pub reduced_energy_bound: f64,
    pub reduced_chemical_potential: f64,
    pub upper: f64,
    pub lower: f64,
    pub full: f64,
    pub checks: Vec<ExpectationCheck>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellReport {
    pub id: String,
    pub model: String,
    pub power_density: f64,
    pub incident_power_density: f64,
    pub efficiency: f64,
    pub checks: Vec<ExpectationCheck>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectationCheck {
    pub id: String,
    pub quantity: String,
    pub expected: f64,
    pub actual: f64,
    #[serde(flatten)]
    pub comparison: ToleranceComparison,
}

/// Evaluates every entry; the first invalid entry aborts the run.
pub fn evaluate_scenario(config: &ScenarioConfig) -> IbeiResult<ScenarioReport> {
    let tolerance = config.tolerance;

    let integrals = config
        .integrals
        .iter()
        .map(|case| evaluate_integral(case, tolerance))
        .collect::<IbeiResult<Vec<_>>>()?;
    let cells = config
        .cells
        .iter()
        .map(|case| evaluate_cell(case, tolerance))
        .collect::<IbeiResult<Vec<_>>>()?;

    let mut report = ScenarioReport {
        tolerance,
        integrals,
        cells,
        passed: true,
    };
    let failed = report.failed_checks();
    report.passed = failed == 0;
    info!(
        integrals = report.integrals.len(),
        cells = report.cells.len(),
        failed,
        "scenario evaluated"
    );
    Ok(report)
}

fn evaluate_integral(case: &IntegralCase, tolerance: NumericTolerance) -> IbeiResult<IntegralReport> {
    let integral = Bei::from_parameters(&case.parameters)
        .map_err(|error| with_entry("integral", &case.id, error.into()))?;
    debug!(id = %case.id, order = integral.order(), "evaluating integral");

    let upper = integral.upper();
    let lower = integral.lower();
    let full = integral.full();

    let checks = [
        ("upper", case.expected.upper, upper.value()),
        ("lower", case.expected.lower, lower.value()),
        ("full", case.expected.full, full.value()),
    ]
    .into_iter()
    .filter_map(|(quantity, expected, actual)| {
        expected.map(|expected| check(&case.id, quantity, expected, actual, tolerance))
    })
    .collect();

    Ok(IntegralReport {
        id: case.id.clone(),
        order: integral.order(),
        unit: upper.unit().to_string(),
        reduced_energy_bound: integral.reduced_energy_bound(),
        reduced_chemical_potential: integral.reduced_chemical_potential(),
        upper: upper.value(),
        lower: lower.value(),
        full: full.value(),
        checks,
    })
}

fn evaluate_cell(case: &CellCase, tolerance: NumericTolerance) -> IbeiResult<CellReport> {
    let cell: Box<dyn SolarCell> = match &case.model {
        CellModel::ShockleyQueisser(parameters) => Box::new(
            parameters
                .build()
                .map_err(|error| with_entry("cell", &case.id, error.into()))?,
        ),
        CellModel::DeVos(parameters) => Box::new(
            parameters
                .build()
                .map_err(|error| with_entry("cell", &case.id, error.into()))?,
        ),
    };
    debug!(id = %case.id, model = cell.name(), "evaluating solar cell");

    let power_density = cell.power_density().get::<watt_per_square_meter>();
    let efficiency = cell.efficiency();

    let checks = [
        ("powerDensity", case.expected.power_density, power_density),
        ("efficiency", case.expected.efficiency, efficiency),
    ]
    .into_iter()
    .filter_map(|(quantity, expected, actual)| {
        expected.map(|expected| check(&case.id, quantity, expected, actual, tolerance))
    })
    .collect();

    Ok(CellReport {
        id: case.id.clone(),
        model: cell.name().to_string(),
        power_density,
        incident_power_density: cell
            .incident_power_density()
            .get::<watt_per_square_meter>(),
        efficiency,
        checks,
    })
}

fn check(
    id: &str,
    quantity: &str,
    expected: f64,
    actual: f64,
    tolerance: NumericTolerance,
) -> ExpectationCheck {
    let comparison = tolerance.compare(expected, actual);
    if !comparison.passes {
        debug!(id, quantity, expected, actual, "expectation mismatch");
    }
    ExpectationCheck {
        id: id.to_string(),
        quantity: quantity.to_string(),
        expected,
        actual,
        comparison,
    }
}

fn with_entry(kind: &str, id: &str, error: IbeiError) -> IbeiError {
    IbeiError::new(
        error.category(),
        error.code(),
        format!("{kind} '{id}': {}", error.message()),
    )
}
