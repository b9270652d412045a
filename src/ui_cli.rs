use comfy_table::{modifiers, presets, Attribute, Cell, CellAlignment, Color, Table};
use serde::Serialize;

use crate::analysis::{Advantage, ComparisonReport, Recommendation, SeriesComparison};
use crate::i18n::{keys, Translator};
use crate::investment::{DiscountedPayback, InvestmentComparison, SimplePayback};
use crate::machine::{FixedCostBreakdown, HourlyRateBreakdown, MachineKind, MachinePair};
use crate::program::{CapacityCheck, ProgramCostResult};
use crate::sensitivity::{BreakEvenCurve, SensitivityCurve, SensitivityParameter};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table
}

fn money(value: f64) -> String {
    format!("{value:.2}")
}

fn number_cell(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

fn machine_header(tr: &Translator, first: &str) -> Vec<String> {
    vec![
        first.to_string(),
        tr.t(keys::MACHINE_MANUAL).to_string(),
        tr.t(keys::MACHINE_AUTOMATED).to_string(),
    ]
}

fn pair_row(label: &str, values: MachinePair<String>) -> Vec<Cell> {
    vec![
        Cell::new(label),
        number_cell(values.manual),
        number_cell(values.automated),
    ]
}

fn heading(tr: &Translator, key: &str) {
    println!("\n== {} ==", tr.t(key));
}

pub fn format_simple_payback(tr: &Translator, payback: SimplePayback) -> String {
    match payback {
        SimplePayback::Years(y) => format!("{y:.1} {}", tr.t(keys::VALUE_YEARS)),
        SimplePayback::NotApplicable => tr.t(keys::VALUE_NOT_APPLICABLE).to_string(),
    }
}

pub fn format_discounted_payback(tr: &Translator, payback: DiscountedPayback) -> String {
    match payback {
        DiscountedPayback::Year(y) => format!("{y} {}", tr.t(keys::VALUE_YEARS)),
        DiscountedPayback::NotReached => tr.t(keys::VALUE_NOT_REACHED).to_string(),
    }
}

pub fn parameter_label(tr: &Translator, parameter: SensitivityParameter) -> &str {
    tr.t(match parameter {
        SensitivityParameter::LaborRate => keys::PARAM_LABOR_RATE,
        SensitivityParameter::ElectricityPrice => keys::PARAM_ELECTRICITY_PRICE,
        SensitivityParameter::UtilizationManual => keys::PARAM_UTILIZATION_MANUAL,
        SensitivityParameter::UtilizationAutomated => keys::PARAM_UTILIZATION_AUTOMATED,
        SensitivityParameter::OperatorLoadFactorAutomated => keys::PARAM_OPERATOR_FACTOR_AUTOMATED,
    })
}

/// 연간 원가, 가동 부하를 기계별로 나란히 보여 준다.
pub fn build_key_results_table(report: &ComparisonReport, tr: &Translator) -> Table {
    let mut table = new_table();
    table.set_header(machine_header(tr, tr.t(keys::COL_ITEM)));
    table.add_row(pair_row(
        tr.t(keys::ITEM_ANNUAL_COST),
        report.machines.map(|_, m| money(m.evaluation.program.total_cost)),
    ));
    table.add_row(pair_row(
        tr.t(keys::COL_PROCESSING_HOURS),
        report
            .machines
            .map(|_, m| format!("{:.1}", m.evaluation.program.processing_hours)),
    ));
    table.add_row(pair_row(
        tr.t(keys::COL_SETUP_HOURS),
        report
            .machines
            .map(|_, m| format!("{:.1}", m.evaluation.program.setup_hours)),
    ));
    let mut load_row = vec![Cell::new(tr.t(keys::ITEM_UTILIZATION))];
    for kind in MachineKind::ALL {
        load_row.push(utilization_cell(&report.machine(kind).evaluation.capacity));
    }
    table.add_row(load_row);
    table
}

fn utilization_cell(check: &CapacityCheck) -> Cell {
    number_cell(format!("{:.1} %", check.utilization * 100.0)).fg(if check.feasible {
        Color::Green
    } else {
        Color::Red
    })
}

/// 기계시간당 비용률 [€/h].
pub fn build_hourly_rate_table(
    hourly: &MachinePair<HourlyRateBreakdown>,
    tr: &Translator,
) -> Table {
    let mut table = new_table();
    table.set_header(machine_header(tr, tr.t(keys::COL_ITEM)));
    table.add_row(pair_row(tr.t(keys::ITEM_FIXED), hourly.map(|_, h| money(h.fixed))));
    table.add_row(pair_row(tr.t(keys::ITEM_ENERGY), hourly.map(|_, h| money(h.energy))));
    table.add_row(pair_row(
        tr.t(keys::ITEM_PERSONNEL),
        hourly.map(|_, h| money(h.personnel)),
    ));
    table.add_row(
        pair_row(tr.t(keys::ITEM_TOTAL), hourly.map(|_, h| money(h.total)))
            .into_iter()
            .map(|c| c.add_attribute(Attribute::Bold)),
    );
    table
}

/// 연간 고정비 내역 [€/년].
pub fn build_fixed_cost_table(
    fixed: &MachinePair<FixedCostBreakdown>,
    tr: &Translator,
) -> Table {
    let mut table = new_table();
    table.set_header(machine_header(tr, tr.t(keys::COL_ITEM)));
    let items = |f: &FixedCostBreakdown| {
        [
            (keys::ITEM_DEPRECIATION, f.depreciation),
            (keys::ITEM_INTEREST, f.interest),
            (keys::ITEM_MAINTENANCE, f.maintenance),
            (keys::ITEM_SPACE, f.space),
            (keys::ITEM_INSURANCE, f.insurance),
            (keys::ITEM_TOOLING, f.tooling),
        ]
    };
    for ((key, a), (_, b)) in items(&fixed.manual).into_iter().zip(items(&fixed.automated)) {
        table.add_row(pair_row(tr.t(key), MachinePair::new(money(a), money(b))));
    }
    table.add_row(
        pair_row(tr.t(keys::ITEM_TOTAL), fixed.map(|_, f| money(f.total())))
            .into_iter()
            .map(|c| c.add_attribute(Attribute::Bold)),
    );
    table
}

/// 연간 비용 구조: 고정비 / 인건비 / 에너지.
pub fn build_cost_structure_table(report: &ComparisonReport, tr: &Translator) -> Table {
    let mut table = new_table();
    table.set_header(machine_header(tr, tr.t(keys::COL_ITEM)));
    let structure = report.machines.map(|_, m| m.cost_structure);
    table.add_row(pair_row(
        tr.t(keys::ITEM_FIXED),
        structure.map(|_, s| money(s.fixed.total())),
    ));
    table.add_row(pair_row(
        tr.t(keys::ITEM_PERSONNEL),
        structure.map(|_, s| money(s.personnel)),
    ));
    table.add_row(pair_row(tr.t(keys::ITEM_ENERGY), structure.map(|_, s| money(s.energy))));
    table.add_row(pair_row(tr.t(keys::ITEM_TOTAL), structure.map(|_, s| money(s.total()))));
    table
}

/// 한 기계의 시리즈별 원가 상세.
pub fn build_series_detail_table(program: &ProgramCostResult, tr: &Translator) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        tr.t(keys::COL_SERIES),
        tr.t(keys::COL_UNITS_PER_YEAR),
        tr.t(keys::COL_PROCESSING_HOURS),
        tr.t(keys::COL_SETUP_HOURS),
        tr.t(keys::COL_PROCESSING_COST),
        tr.t(keys::COL_SETUP_COST),
        tr.t(keys::COL_TOTAL_COST),
        tr.t(keys::COL_COST_PER_UNIT),
    ]);
    for row in &program.series {
        table.add_row(vec![
            Cell::new(&row.name),
            number_cell(format!("{:.0}", row.units_per_year)),
            number_cell(format!("{:.2}", row.processing_hours)),
            number_cell(format!("{:.2}", row.setup_hours)),
            number_cell(money(row.processing_cost)),
            number_cell(money(row.setup_cost)),
            number_cell(money(row.total_cost)),
            number_cell(money(row.cost_per_unit)),
        ]);
    }
    table.add_row(vec![
        Cell::new(tr.t(keys::ITEM_TOTAL)).add_attribute(Attribute::Bold),
        number_cell(format!("{:.0}", program.total_units)),
        number_cell(format!("{:.2}", program.processing_hours)),
        number_cell(format!("{:.2}", program.setup_hours)),
        Cell::new(""),
        Cell::new(""),
        number_cell(money(program.total_cost)).add_attribute(Attribute::Bold),
        Cell::new(""),
    ]);
    table
}

/// 시리즈별 개당 원가 비교.
pub fn build_unit_cost_table(rows: &[SeriesComparison], tr: &Translator) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        tr.t(keys::COL_SERIES).to_string(),
        tr.t(keys::COL_UNITS_PER_YEAR).to_string(),
        format!("A {}", tr.t(keys::COL_COST_PER_UNIT)),
        format!("B {}", tr.t(keys::COL_COST_PER_UNIT)),
        tr.t(keys::COL_DIFFERENCE).to_string(),
        tr.t(keys::COL_ADVANTAGE).to_string(),
    ]);
    for row in rows {
        let amount = [("amount", money(row.difference.abs()))];
        let (advantage, color) = match row.advantage {
            Advantage::Automated => (tr.fill(keys::ADVANTAGE_AUTOMATED, &amount), Color::Green),
            Advantage::Manual => (tr.fill(keys::ADVANTAGE_MANUAL, &amount), Color::DarkYellow),
            Advantage::Even => (tr.t(keys::ADVANTAGE_EVEN).to_string(), Color::Reset),
        };
        table.add_row(vec![
            Cell::new(&row.name),
            number_cell(format!("{:.0}", row.units_per_year)),
            number_cell(money(row.unit_cost_manual)),
            number_cell(money(row.unit_cost_automated)),
            number_cell(money(row.difference)),
            Cell::new(advantage).fg(color),
        ]);
    }
    table
}

/// 절감액, 회수기간, NPV.
pub fn build_investment_table(investment: &InvestmentComparison, tr: &Translator) -> Table {
    let mut table = new_table();
    table.set_header(vec![tr.t(keys::COL_ITEM), tr.t(keys::COL_VALUE)]);
    let saving_color = if investment.annual_saving > 0.0 {
        Color::Green
    } else {
        Color::Red
    };
    table.add_row(vec![
        Cell::new(tr.t(keys::ITEM_ANNUAL_SAVING)),
        number_cell(money(investment.annual_saving)).fg(saving_color),
    ]);
    table.add_row(vec![
        Cell::new(tr.t(keys::ITEM_SAVING_PERCENT)),
        number_cell(format!("{:.1} %", investment.saving_percent)),
    ]);
    table.add_row(vec![
        Cell::new(tr.t(keys::ITEM_EXTRA_INVESTMENT)),
        number_cell(money(investment.extra_investment)),
    ]);
    table.add_row(vec![
        Cell::new(tr.t(keys::ITEM_SIMPLE_PAYBACK)),
        number_cell(format_simple_payback(tr, investment.simple_payback)),
    ]);
    table.add_row(vec![
        Cell::new(tr.t(keys::ITEM_DISCOUNTED_PAYBACK)),
        number_cell(format_discounted_payback(tr, investment.discounted_payback)),
    ]);
    let npv = match investment.npv {
        Some(v) => number_cell(money(v)).fg(if v >= 0.0 { Color::Green } else { Color::Red }),
        None => number_cell(tr.t(keys::VALUE_NOT_APPLICABLE).to_string()),
    };
    table.add_row(vec![Cell::new(tr.t(keys::ITEM_NPV)), npv]);
    table
}

/// 배율별 두 기계의 총원가.
pub fn build_break_even_table(curve: &BreakEvenCurve, tr: &Translator) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        tr.t(keys::COL_FACTOR).to_string(),
        tr.t(keys::COL_UNITS_PER_YEAR).to_string(),
        format!("A {}", tr.t(keys::COL_TOTAL_COST)),
        format!("B {}", tr.t(keys::COL_TOTAL_COST)),
    ]);
    for point in &curve.samples {
        let cheaper_b = point.cost_automated < point.cost_manual;
        table.add_row(vec![
            number_cell(format!("{:.2}", point.factor)),
            number_cell(format!("{:.0}", point.total_units)),
            number_cell(money(point.cost_manual)).fg(if cheaper_b {
                Color::Reset
            } else {
                Color::Green
            }),
            number_cell(money(point.cost_automated)).fg(if cheaper_b {
                Color::Green
            } else {
                Color::Reset
            }),
        ]);
    }
    table
}

pub fn build_sensitivity_table(curve: &SensitivityCurve, tr: &Translator) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        parameter_label(tr, curve.parameter),
        tr.t(keys::COL_SAVING),
    ]);
    for point in &curve.points {
        let value = number_cell(format!("{:.3}", point.value));
        let value = if (point.value - curve.current_value).abs() < 1e-9 {
            value.add_attribute(Attribute::Bold)
        } else {
            value
        };
        table.add_row(vec![
            value,
            number_cell(money(point.annual_saving)).fg(if point.annual_saving > 0.0 {
                Color::Green
            } else {
                Color::Red
            }),
        ]);
    }
    table
}

/// 용량을 넘는 기계마다 경고 문장을 만든다.
pub fn capacity_warnings(report: &ComparisonReport, tr: &Translator) -> Vec<String> {
    MachineKind::ALL
        .into_iter()
        .filter_map(|kind| {
            let check = report.machine(kind).evaluation.capacity;
            (!check.feasible).then(|| {
                let machine = match kind {
                    MachineKind::Manual => tr.t(keys::MACHINE_MANUAL),
                    MachineKind::Automated => tr.t(keys::MACHINE_AUTOMATED),
                };
                tr.fill(
                    keys::WARN_CAPACITY,
                    &[
                        ("machine", machine.to_string()),
                        ("required", format!("{:.0}", check.required_hours)),
                        ("available", format!("{:.0}", check.available_hours)),
                    ],
                )
            })
        })
        .collect()
}

/// 추천 문장과 경제성 판정.
pub fn recommendation_lines(recommendation: &Recommendation, tr: &Translator) -> Vec<String> {
    match *recommendation {
        Recommendation::Automated {
            annual_saving,
            saving_percent,
            payback,
            economical,
        } => vec![
            tr.fill(
                keys::RECOMMEND_AUTOMATED,
                &[
                    ("saving", money(annual_saving)),
                    ("percent", format!("{saving_percent:.1} %")),
                    ("payback", format_simple_payback(tr, payback)),
                ],
            ),
            tr.t(if economical {
                keys::VERDICT_ECONOMICAL
            } else {
                keys::VERDICT_REVIEW
            })
            .to_string(),
        ],
        Recommendation::Manual {
            extra_cost_per_year,
        } => vec![tr.fill(
            keys::RECOMMEND_MANUAL,
            &[("extra", money(extra_cost_per_year))],
        )],
    }
}

/// 손익분기 교차점 요약.
pub fn break_even_lines(
    curve: &BreakEvenCurve,
    current_units: f64,
    tr: &Translator,
) -> Vec<String> {
    let mut lines: Vec<String> = if curve.crossings.is_empty() {
        vec![tr.t(keys::BREAK_EVEN_NONE).to_string()]
    } else {
        curve
            .crossings
            .iter()
            .map(|c| {
                tr.fill(
                    keys::BREAK_EVEN_CROSSING,
                    &[
                        ("units", format!("{:.0}", c.total_units)),
                        ("cost", money(c.cost)),
                    ],
                )
            })
            .collect()
    };
    lines.push(tr.fill(
        keys::BREAK_EVEN_CURRENT,
        &[("units", format!("{current_units:.0}"))],
    ));
    lines
}

/// 전체 보고서를 표로 출력한다.
pub fn print_report(report: &ComparisonReport, tr: &Translator) {
    for warning in capacity_warnings(report, tr) {
        println!("{warning}");
    }

    heading(tr, keys::HEADING_KEY_RESULTS);
    println!("{}", build_key_results_table(report, tr));

    heading(tr, keys::HEADING_HOURLY_RATE);
    println!("{}", build_hourly_rate_table(&report.machines.map(|_, m| m.hourly), tr));

    heading(tr, keys::HEADING_COST_STRUCTURE);
    println!("{}", build_cost_structure_table(report, tr));

    for kind in MachineKind::ALL {
        let machine = match kind {
            MachineKind::Manual => tr.t(keys::MACHINE_MANUAL),
            MachineKind::Automated => tr.t(keys::MACHINE_AUTOMATED),
        };
        println!("\n== {} - {machine} ==", tr.t(keys::HEADING_SERIES_DETAIL));
        println!(
            "{}",
            build_series_detail_table(&report.machine(kind).evaluation.program, tr)
        );
    }

    heading(tr, keys::HEADING_UNIT_COST);
    println!("{}", build_unit_cost_table(&report.series, tr));

    heading(tr, keys::HEADING_INVESTMENT);
    println!("{}", build_investment_table(&report.investment, tr));

    heading(tr, keys::HEADING_BREAK_EVEN);
    for line in break_even_lines(&report.break_even, report.current_units, tr) {
        println!("{line}");
    }

    println!();
    for line in recommendation_lines(&report.recommendation, tr) {
        println!("{line}");
    }
}

/// 비용률과 고정비 내역만 출력한다.
pub fn print_rates(
    hourly: &MachinePair<HourlyRateBreakdown>,
    fixed: &MachinePair<FixedCostBreakdown>,
    tr: &Translator,
) {
    heading(tr, keys::HEADING_HOURLY_RATE);
    println!("{}", build_hourly_rate_table(hourly, tr));
    heading(tr, keys::HEADING_FIXED_COSTS);
    println!("{}", build_fixed_cost_table(fixed, tr));
}

pub fn print_break_even(curve: &BreakEvenCurve, current_units: f64, tr: &Translator) {
    heading(tr, keys::HEADING_BREAK_EVEN);
    println!("{}", build_break_even_table(curve, tr));
    for line in break_even_lines(curve, current_units, tr) {
        println!("{line}");
    }
}

pub fn print_sensitivity(curve: &SensitivityCurve, tr: &Translator) {
    heading(tr, keys::HEADING_SENSITIVITY);
    println!("{}", build_sensitivity_table(curve, tr));
}

/// 외부 도구용 JSON 출력.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
