use super::payback::discount_factor;

/// 자동화 설비로 전환할 때의 순현재가치(NPV).
///
/// `-추가투자 + Σ 절감액_t/(1+r)^t + (잔존가치_B - 잔존가치_A)/(1+r)^n`.
/// `saving_series[0]`이 1년차이며 n은 시계열 길이다. 1+r이 0 이하이면 None.
pub fn npv(
    saving_series: &[f64],
    extra_investment: f64,
    residual_manual: f64,
    residual_automated: f64,
    discount_rate: f64,
) -> Option<f64> {
    let mut value = -extra_investment;
    for (year, saving) in (1u32..).zip(saving_series) {
        value += saving * discount_factor(discount_rate, year)?;
    }
    let horizon = u32::try_from(saving_series.len()).ok()?;
    value += (residual_automated - residual_manual) * discount_factor(discount_rate, horizon)?;
    Some(value)
}

/// 매년 같은 절감액을 가정한 NPV.
pub fn npv_constant(
    annual_saving: f64,
    years: u32,
    extra_investment: f64,
    residual_manual: f64,
    residual_automated: f64,
    discount_rate: f64,
) -> Option<f64> {
    let mut value = -extra_investment;
    for year in 1..=years {
        value += annual_saving * discount_factor(discount_rate, year)?;
    }
    value += (residual_automated - residual_manual) * discount_factor(discount_rate, years)?;
    Some(value)
}
