use machine_cost_toolbox::{
    config::Config,
    machine::MachineKind,
    scenario::{Scenario, ScenarioError},
};

#[test]
fn scenario_survives_file_round_trip() {
    let path = std::env::temp_dir().join(format!("machine_cost_{}.toml", std::process::id()));
    let mut scenario = Scenario::default();
    scenario.automated.acquisition_cost = Some(950_000.0);
    scenario.investment.production_growth_rate = 0.03;
    scenario.save(&path).expect("save scenario");
    let loaded = Scenario::load(&path).expect("load scenario");
    std::fs::remove_file(&path).ok();
    assert_eq!(loaded, scenario);
}

#[test]
fn minimal_scenario_uses_defaults() {
    let src = r#"
[shared]
acquisition_cost = 500000.0
useful_life_years = 10
interest_rate = 0.04
labor_rate_per_hour = 60.0
electricity_price_per_kwh = 0.25
space_cost_per_m2_month = 12.0

[manual]
operating_hours_per_year = 2000.0
utilization_fraction = 0.8
maintenance_rate = 0.02
floor_space_m2 = 15.0
power_kw = 7.5
insurance_per_year = 400.0
tooling_per_year = 2000.0

[automated]
acquisition_cost = 800000.0
operating_hours_per_year = 4000.0
utilization_fraction = 0.9
operator_load_factor = 0.25
maintenance_rate = 0.04
floor_space_m2 = 30.0
power_kw = 15.0
insurance_per_year = 1000.0
tooling_per_year = 6000.0

[[program]]
name = "Bolzen"
series_per_year = 12
units_per_series = 40
manual = { processing_minutes_per_unit = 6.0, setup_minutes_per_series = 40.0 }
automated = { processing_minutes_per_unit = 4.5, setup_minutes_per_series = 25.0 }
"#;
    let scenario = Scenario::from_toml_str(src).expect("parse scenario");
    assert_eq!(scenario.investment.horizon_years, 20);
    let a = scenario.machine_parameters(MachineKind::Manual);
    let b = scenario.machine_parameters(MachineKind::Automated);
    assert_eq!(a.operator_load_factor, 1.0);
    assert_eq!(a.residual_value, 0.0);
    assert_eq!(a.acquisition_cost, 500_000.0);
    assert_eq!(b.acquisition_cost, 800_000.0);
    assert_eq!(scenario.program.rows.len(), 1);
}

#[test]
fn zero_unit_row_is_rejected_on_load() {
    let text = Scenario::default()
        .to_toml_string()
        .unwrap()
        .replacen("units_per_series = 50", "units_per_series = 0", 1);
    assert!(matches!(
        Scenario::from_toml_str(&text),
        Err(ScenarioError::Invalid(_))
    ));
}

#[test]
fn overlong_horizon_is_rejected_on_load() {
    let text = Scenario::default()
        .to_toml_string()
        .unwrap()
        .replacen("horizon_years = 20", "horizon_years = 4000000000", 1);
    assert!(matches!(
        Scenario::from_toml_str(&text),
        Err(ScenarioError::HorizonTooLong { max: 100, .. })
    ));
}

#[test]
fn default_config_serializes() {
    let text = toml::to_string_pretty(&Config::default()).unwrap();
    let back: Config = toml::from_str(&text).unwrap();
    assert_eq!(back.break_even, Config::default().break_even);
}
