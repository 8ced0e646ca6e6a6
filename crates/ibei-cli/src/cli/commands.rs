use super::helpers::*;
use super::{CliError, compute_error};
use ibei_core::bei::{Bei, BeiParameters};
use ibei_core::config::{evaluate_scenario, load_scenario};
use ibei_core::domain::IbeiError;
use ibei_core::solarcell::{DeVosParameters, ShockleyQueisserParameters, SolarCell};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use uom::si::energy::electronvolt;
use uom::si::heat_flux_density::watt_per_square_meter;
use uom::si::thermodynamic_temperature::kelvin;

#[derive(clap::Args)]
pub(super) struct BeiArgs {
    /// Integration order (2 = photon flux, 3 = energy flux)
    #[arg(long)]
    order: String,

    /// Lower energy bound, e.g. "1.1 eV" (bare numbers are eV; "inf" allowed)
    #[arg(long, allow_hyphen_values = true)]
    energy_bound: String,

    /// Temperature, e.g. 300K or "5498.85 degC" (bare numbers are K)
    #[arg(long, allow_hyphen_values = true)]
    temperature: String,

    /// Photon chemical potential (bare numbers are eV)
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    chemical_potential: String,
}

#[derive(clap::Args)]
pub(super) struct SqArgs {
    /// Bandgap (bare numbers are eV)
    #[arg(long, allow_hyphen_values = true)]
    bandgap: String,

    /// Solar temperature (bare numbers are K)
    #[arg(long, default_value = "5762", allow_hyphen_values = true)]
    temp_sun: String,
}

#[derive(clap::Args)]
pub(super) struct DevosArgs {
    /// Bandgap (bare numbers are eV)
    #[arg(long, allow_hyphen_values = true)]
    bandgap: String,

    /// Solar temperature (bare numbers are K)
    #[arg(long, default_value = "5762", allow_hyphen_values = true)]
    temp_sun: String,

    /// Cell (planet) temperature (bare numbers are K)
    #[arg(long, default_value = "288", allow_hyphen_values = true)]
    temp_planet: String,

    /// Operating voltage (bare numbers are V)
    #[arg(long, allow_hyphen_values = true)]
    voltage: String,
}

#[derive(clap::Args)]
pub(super) struct RunArgs {
    /// Scenario JSON path
    #[arg(long)]
    config: PathBuf,

    /// Optional JSON report output path
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IntegralSummary {
    order: u32,
    energy_bound_ev: f64,
    temperature_k: f64,
    chemical_potential_ev: f64,
    kt_ev: f64,
    reduced_energy_bound: f64,
    reduced_chemical_potential: f64,
    unit: String,
    prefactor: f64,
    upper: f64,
    lower: f64,
    full: f64,
}

impl IntegralSummary {
    fn new(integral: &Bei) -> Self {
        let upper = integral.upper();
        Self {
            order: integral.order(),
            energy_bound_ev: integral.energy_bound().get::<electronvolt>(),
            temperature_k: integral.temperature().get::<kelvin>(),
            chemical_potential_ev: integral.chemical_potential().get::<electronvolt>(),
            kt_ev: integral.kt().get::<electronvolt>(),
            reduced_energy_bound: integral.reduced_energy_bound(),
            reduced_chemical_potential: integral.reduced_chemical_potential(),
            unit: upper.unit().to_string(),
            prefactor: integral.prefactor().value(),
            upper: upper.value(),
            lower: integral.lower().value(),
            full: integral.full().value(),
        }
    }

    fn render(&self) -> String {
        render_rows(&[
            ("order", self.order.to_string()),
            ("energy bound", format!("{} eV", self.energy_bound_ev)),
            ("temperature", format!("{} K", self.temperature_k)),
            ("chemical potential", format!("{} eV", self.chemical_potential_ev)),
            ("kT", format!("{} eV", format_value(self.kt_ev))),
            ("reduced energy bound", format_value(self.reduced_energy_bound)),
            (
                "reduced chemical potential",
                format_value(self.reduced_chemical_potential),
            ),
            ("prefactor", format!("{} {}", format_value(self.prefactor), self.unit)),
            ("upper", format!("{} {}", format_value(self.upper), self.unit)),
            ("lower", format!("{} {}", format_value(self.lower), self.unit)),
            ("full", format!("{} {}", format_value(self.full), self.unit)),
        ])
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CellSummary<P: Serialize> {
    model: &'static str,
    parameters: P,
    power_density: f64,
    incident_power_density: f64,
    efficiency: f64,
}

impl<P: Serialize> CellSummary<P> {
    fn new(cell: &dyn SolarCell, parameters: P) -> Self {
        Self {
            model: cell.name(),
            parameters,
            power_density: cell.power_density().get::<watt_per_square_meter>(),
            incident_power_density: cell.incident_power_density().get::<watt_per_square_meter>(),
            efficiency: cell.efficiency(),
        }
    }

    fn render(&self) -> String {
        render_rows(&[
            ("model", self.model.to_string()),
            ("power density", format!("{} W m^-2", format_value(self.power_density))),
            (
                "incident power density",
                format!("{} W m^-2", format_value(self.incident_power_density)),
            ),
            ("efficiency", format!("{:.6}", self.efficiency)),
        ])
    }
}

pub(super) fn run_bei_command(args: BeiArgs, format: OutputFormat) -> Result<i32, CliError> {
    let integral = BeiParameters::new(
        raw_value(&args.order),
        raw_value(&args.energy_bound),
        raw_value(&args.temperature),
    )
    .with_chemical_potential(raw_value(&args.chemical_potential))
    .build()
    .map_err(compute_error)?;
    info!(order = integral.order(), "evaluating Bose-Einstein integral");

    let summary = IntegralSummary::new(&integral);
    match format {
        OutputFormat::Json => print_json(&summary)?,
        OutputFormat::Human => println!("{}", summary.render()),
    }
    Ok(0)
}

pub(super) fn run_sq_command(args: SqArgs, format: OutputFormat) -> Result<i32, CliError> {
    let cell = ShockleyQueisserParameters::new(raw_value(&args.bandgap), raw_value(&args.temp_sun))
        .build()
        .map_err(compute_error)?;
    info!(model = cell.name(), "evaluating solar cell");

    print_cell(&CellSummary::new(&cell, cell.to_parameters()), format)
}

pub(super) fn run_devos_command(args: DevosArgs, format: OutputFormat) -> Result<i32, CliError> {
    let cell = DeVosParameters::new(
        raw_value(&args.bandgap),
        raw_value(&args.temp_sun),
        raw_value(&args.temp_planet),
        raw_value(&args.voltage),
    )
    .build()
    .map_err(compute_error)?;
    info!(model = cell.name(), "evaluating solar cell");

    print_cell(&CellSummary::new(&cell, cell.to_parameters()), format)
}

pub(super) fn run_scenario_command(args: RunArgs, format: OutputFormat) -> Result<i32, CliError> {
    let config = load_scenario(&args.config).map_err(compute_error)?;
    info!(path = %args.config.display(), "running scenario");
    let report = evaluate_scenario(&config).map_err(compute_error)?;

    if let Some(path) = &args.report {
        write_json_report(path, &report).map_err(|error| {
            compute_error(IbeiError::io_system("IO.REPORT_WRITE", format!("{error:#}")))
        })?;
    }
    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Human => {
            println!("{}", render_scenario_summary(&report));
            if let Some(path) = &args.report {
                println!("JSON report: {}", path.display());
            }
        }
    }

    report.ensure_passed().map_err(compute_error)?;
    Ok(0)
}

fn print_cell<P: Serialize>(summary: &CellSummary<P>, format: OutputFormat) -> Result<i32, CliError> {
    match format {
        OutputFormat::Json => print_json(summary)?,
        OutputFormat::Human => println!("{}", summary.render()),
    }
    Ok(0)
}
