use serde::{Deserialize, Serialize};
use tracing::debug;

/// 단순 회수기간. 절감액이 없으면 계산할 수 없다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "years", rename_all = "snake_case")]
pub enum SimplePayback {
    /// 회수기간 [년]
    Years(f64),
    /// 연간 절감액이 0 이하
    NotApplicable,
}

impl SimplePayback {
    pub fn years(self) -> Option<f64> {
        match self {
            SimplePayback::Years(y) => Some(y),
            SimplePayback::NotApplicable => None,
        }
    }
}

/// 할인 회수기간. 분석 기간 안에 회수하지 못하면 `NotReached`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "year", rename_all = "snake_case")]
pub enum DiscountedPayback {
    /// 누적 할인 절감액이 추가 투자비에 도달한 연차
    Year(u32),
    NotReached,
}

impl DiscountedPayback {
    pub fn year(self) -> Option<u32> {
        match self {
            DiscountedPayback::Year(y) => Some(y),
            DiscountedPayback::NotReached => None,
        }
    }
}

/// 추가 투자비를 연간 절감액으로 나눈 단순 회수기간.
///
/// 절감액이 양수이고 추가 투자가 없으면 즉시 회수(0년)로 본다.
pub fn simple_payback(extra_investment: f64, annual_saving: f64) -> SimplePayback {
    if annual_saving.is_nan() || annual_saving <= 0.0 {
        return SimplePayback::NotApplicable;
    }
    if extra_investment > 0.0 {
        SimplePayback::Years(extra_investment / annual_saving)
    } else {
        SimplePayback::Years(0.0)
    }
}

/// t년차 할인계수 1/(1+r)^t. 1+r이 0 이하이면 None.
pub fn discount_factor(discount_rate: f64, year: u32) -> Option<f64> {
    let base = 1.0 + discount_rate;
    if base.is_nan() || base <= 0.0 {
        return None;
    }
    let exponent = i32::try_from(year).ok()?;
    Some(1.0 / base.powi(exponent))
}

/// 누적 할인 절감액이 추가 투자비 이상이 되는 최소 연차를 구한다.
///
/// `saving_series[0]`이 1년차 절감액이다.
pub fn discounted_payback(
    extra_investment: f64,
    saving_series: &[f64],
    discount_rate: f64,
) -> DiscountedPayback {
    if extra_investment <= 0.0 {
        return DiscountedPayback::Year(0);
    }
    let mut cumulative = 0.0;
    for (year, saving) in (1u32..).zip(saving_series) {
        let Some(df) = discount_factor(discount_rate, year) else {
            break;
        };
        cumulative += saving * df;
        if cumulative >= extra_investment {
            return DiscountedPayback::Year(year);
        }
    }
    debug!(
        extra_investment,
        horizon = saving_series.len(),
        "discounted payback not reached within horizon"
    );
    DiscountedPayback::NotReached
}
