use approx::assert_abs_diff_eq;
use machine_cost_toolbox::{
    analysis::{analyze, evaluate, Recommendation},
    machine::MachineKind,
    program::{MachineTimes, ProductionProgram, ProgramRow},
    scenario::Scenario,
    sensitivity::{break_even_curve, sensitivity_curve, sweep, SensitivityParameter},
};

fn times(processing: f64, setup: f64) -> MachineTimes {
    MachineTimes {
        processing_minutes_per_unit: processing,
        setup_minutes_per_series: setup,
    }
}

#[test]
fn doubling_factor_doubles_units() {
    let scenario = Scenario::default();
    let bases = evaluate(&scenario).unwrap().map(|_, e| e.basis());
    let points = sweep(&scenario.program, &[1.0, 2.0], &bases).unwrap();
    assert_eq!(points.len(), 2);
    assert_abs_diff_eq!(points[1].total_units, 2.0 * points[0].total_units);
}

#[test]
fn half_factor_rounds_series_counts_to_even() {
    // 5 × 0.5 = 2.5 → 2 series
    let program = ProductionProgram::new(vec![ProgramRow::new(
        "Lager",
        5,
        10,
        times(6.0, 30.0),
        times(4.0, 20.0),
    )]);
    let mut scenario = Scenario::default();
    scenario.program = program;
    let bases = evaluate(&scenario).unwrap().map(|_, e| e.basis());
    let points = sweep(&scenario.program, &[0.5], &bases).unwrap();
    assert_abs_diff_eq!(points[0].total_units, 20.0);
}

#[test]
fn crossing_lies_between_bracketing_samples() {
    let scenario = Scenario::default();
    let bases = evaluate(&scenario).unwrap().map(|_, e| e.basis());
    let factors = [0.05, 0.2, 0.5, 1.0, 2.0, 3.0];
    let curve = break_even_curve(&scenario.program, &factors, &bases).unwrap();
    for crossing in &curve.crossings {
        let first = curve.samples.first().unwrap().total_units;
        let last = curve.samples.last().unwrap().total_units;
        assert!(crossing.total_units >= first && crossing.total_units <= last);
    }
}

#[test]
fn labor_rate_sensitivity_is_monotonic_for_default_scenario() {
    let scenario = Scenario::default();
    let curve = sensitivity_curve(
        &scenario.parameters(),
        &scenario.program,
        SensitivityParameter::LaborRate,
        0.5,
        1.5,
        20,
    )
    .unwrap();
    assert_eq!(curve.points.len(), 20);
    assert_abs_diff_eq!(curve.current_value, 65.0);
    // B의 인건 소요시간이 적으므로 인건비율이 오를수록 절감액이 커진다
    assert!(curve
        .points
        .windows(2)
        .all(|w| w[1].annual_saving > w[0].annual_saving));
}

#[test]
fn every_parameter_can_be_swept() {
    let scenario = Scenario::default();
    for parameter in SensitivityParameter::ALL {
        let curve = sensitivity_curve(
            &scenario.parameters(),
            &scenario.program,
            parameter,
            0.5,
            1.5,
            5,
        )
        .unwrap();
        assert_eq!(curve.points.len(), 5, "{parameter:?}");
        assert!(curve.points.iter().all(|p| p.annual_saving.is_finite()));
    }
}

#[test]
fn full_report_for_default_scenario() {
    let scenario = Scenario::default();
    let report = analyze(&scenario, &[0.2, 1.0, 3.0]).unwrap();
    let a = report.machine(MachineKind::Manual);
    let b = report.machine(MachineKind::Automated);
    assert_abs_diff_eq!(
        report.investment.annual_saving,
        a.evaluation.program.total_cost - b.evaluation.program.total_cost,
        epsilon = 1e-9
    );
    assert_eq!(report.investment.extra_investment, 0.0);
    assert_eq!(report.investment.saving_series.len(), 20);
    match report.recommendation {
        Recommendation::Automated { economical, .. } => {
            assert!(report.investment.annual_saving > 0.0);
            assert!(economical);
        }
        Recommendation::Manual { .. } => assert!(report.investment.annual_saving <= 0.0),
    }
    let json = serde_json::to_value(&report).unwrap();
    assert!(json["investment"]["simple_payback"]["status"].is_string());
}
