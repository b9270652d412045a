use approx::assert_abs_diff_eq;
use machine_cost_toolbox::investment::{
    discounted_payback, npv, npv_constant, projected_cost_series, simple_payback,
    DiscountedPayback, SimplePayback,
};

#[test]
fn payback_for_flat_saving() {
    assert_eq!(simple_payback(350_000.0, 40_000.0), SimplePayback::Years(8.75));
}

#[test]
fn no_extra_investment_pays_back_immediately() {
    assert_eq!(simple_payback(0.0, 10_000.0), SimplePayback::Years(0.0));
    assert_eq!(
        discounted_payback(0.0, &[10_000.0; 5], 0.05),
        DiscountedPayback::Year(0)
    );
}

#[test]
fn non_positive_saving_is_not_applicable() {
    for saving in [0.0, -1.0, f64::NAN] {
        assert_eq!(simple_payback(100_000.0, saving), SimplePayback::NotApplicable);
    }
}

#[test]
fn discounted_payback_delays_with_rate() {
    let savings = [40_000.0; 20];
    let mut last = 0;
    for rate in [0.0, 0.02, 0.05, 0.08] {
        match discounted_payback(350_000.0, &savings, rate) {
            DiscountedPayback::Year(y) => {
                assert!(y >= last, "rate={rate} year={y} last={last}");
                last = y;
            }
            DiscountedPayback::NotReached => last = u32::MAX,
        }
    }
    assert_eq!(
        discounted_payback(350_000.0, &savings, 0.0),
        DiscountedPayback::Year(9)
    );
}

#[test]
fn unreachable_payback_is_reported() {
    assert_eq!(
        discounted_payback(1_000_000.0, &[10_000.0; 10], 0.05),
        DiscountedPayback::NotReached
    );
}

#[test]
fn npv_of_flat_stream() {
    // 10년 × 40000 €, 5 %: 연금현가계수 7.721735
    let value = npv_constant(40_000.0, 10, 350_000.0, 0.0, 0.0, 0.05).unwrap();
    assert_abs_diff_eq!(value, 40_000.0 * 7.721_734_9 - 350_000.0, epsilon = 0.01);
}

#[test]
fn npv_includes_residual_difference() {
    let without = npv(&[10_000.0; 3], 0.0, 0.0, 0.0, 0.1).unwrap();
    let with = npv(&[10_000.0; 3], 0.0, 0.0, 5_000.0, 0.1).unwrap();
    assert_abs_diff_eq!(with - without, 5_000.0 / 1.1f64.powi(3), epsilon = 1e-9);
}

#[test]
fn npv_rejects_rate_at_minus_one() {
    assert_eq!(npv(&[1.0], 0.0, 0.0, 0.0, -1.0), None);
}

#[test]
fn projected_costs_grow() {
    let series = projected_cost_series(1_000.0, 500.0, 3, 0.1, 0.0);
    assert_eq!(series.len(), 3);
    assert_abs_diff_eq!(series[0], 1_500.0, epsilon = 1e-9);
    assert_abs_diff_eq!(series[2], 1_500.0 * 1.21, epsilon = 1e-9);
}
