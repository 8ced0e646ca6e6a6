use ibei_core::bei::{Bei, BeiParameters, uibei};
use ibei_core::config::{evaluate_scenario, load_scenario};
use ibei_core::domain::ValidationKind;
use ibei_core::solarcell::{DeVosParameters, ShockleyQueisserParameters, SolarCell};
use std::path::Path;

const REFERENCE_FIXTURE: &str = "tests/fixtures/bei-reference.json";

fn fixture_path() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(REFERENCE_FIXTURE)
}

#[test]
fn reference_fixture_matches_within_tolerance() {
    let config = load_scenario(fixture_path()).expect("reference fixture should load");
    let report = evaluate_scenario(&config).expect("reference fixture should evaluate");

    let failures = report
        .checks()
        .filter(|check| !check.comparison.passes)
        .map(|check| {
            format!(
                "{}.{} expected={:.17e} actual={:.17e} rel_diff={:.3e}",
                check.id, check.quantity, check.expected, check.actual, check.comparison.rel_diff
            )
        })
        .collect::<Vec<_>>();
    assert!(failures.is_empty(), "reference mismatches:\n{}", failures.join("\n"));
    assert!(report.passed);
    assert_eq!(report.checks().count(), 21);
}

#[test]
fn reference_fixture_reports_units_per_order() {
    let config = load_scenario(fixture_path()).expect("reference fixture should load");
    let report = evaluate_scenario(&config).expect("reference fixture should evaluate");

    let unit_of = |id: &str| {
        report
            .integrals
            .iter()
            .find(|integral| integral.id == id)
            .map(|integral| integral.unit.clone())
    };
    assert_eq!(unit_of("silicon-300k-photons").as_deref(), Some("m^-2 s^-1"));
    assert_eq!(unit_of("silicon-300k-power").as_deref(), Some("W m^-2"));
    assert_eq!(unit_of("order-4").as_deref(), Some("J^2 m^-2 s^-1"));
}

// Upstream issue 2: a chemical potential above the bound used to fail.
#[test]
fn chemical_potential_above_bound_evaluates_to_zero() {
    let flux = uibei(2, 1.15, 5_762.0, 1.2).expect("valid arguments");
    assert_eq!(flux.value(), 0.0);
    assert_eq!(flux.order(), 2);
}

// Upstream issue 4: a chemical potential equal to the bound used to fail.
#[test]
fn chemical_potential_at_bound_evaluates_to_zero() {
    let flux = uibei(2, 1.0, 300.0, 1.0).expect("valid arguments");
    assert_eq!(flux.value(), 0.0);
}

// Upstream issue 31: a zero bound with zero chemical potential returned zero.
#[test]
fn zero_bound_and_potential_is_positive() {
    let flux = uibei(3, 0.0, 300.0, 0.0).expect("valid arguments");
    assert!(flux.value() > 0.0);
}

#[test]
fn method_and_free_function_agree() {
    for (order, energy, temperature, mu) in [
        (2, 1.1, 300.0, 0.0),
        (3, 0.5, 5_762.0, 0.1),
        (1, 2.0, 1_000.0, 1.5),
        (5, 0.0, 77.0, 0.0),
    ] {
        let parameters =
            BeiParameters::new(order, energy, temperature).with_chemical_potential(mu);
        let integral = Bei::from_parameters(&parameters).expect("valid integral");
        let flux = uibei(order, energy, temperature, mu).expect("valid integral");
        assert_eq!(integral.upper(), flux);
    }
}

#[test]
fn devos_bias_sweep_stays_finite() {
    for voltage in [0.0, 0.5, 1.09, 1.2, 2.0] {
        let cell = DeVosParameters::new(1.15, 5_762.0, 288.0, voltage)
            .build()
            .expect("valid cell");
        let efficiency = cell.efficiency();
        assert!(efficiency.is_finite(), "voltage {voltage} gave {efficiency}");
        assert!(efficiency >= 0.0);
    }
}

#[test]
fn devos_never_beats_shockley_queisser_at_the_same_gap() {
    let limit = ShockleyQueisserParameters::new(1.15, 5_762.0)
        .build()
        .expect("valid cell")
        .efficiency();
    for voltage in [0.3, 0.6, 0.9, 1.1] {
        let cell = DeVosParameters::new(1.15, 5_762.0, 288.0, voltage)
            .build()
            .expect("valid cell");
        assert!(cell.efficiency() < limit);
    }
}

#[test]
fn invalid_cells_report_range_errors() {
    let error = DeVosParameters::new(1.15, -5.0, 288.0, 0.5)
        .build()
        .expect_err("negative solar temperature");
    assert_eq!(error.kind(), ValidationKind::Range);
}
