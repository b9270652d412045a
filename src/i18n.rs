use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const MACHINE_MANUAL: &str = "general.machine_manual";
    pub const MACHINE_AUTOMATED: &str = "general.machine_automated";
    pub const SCENARIO_WRITTEN: &str = "general.scenario_written";

    pub const HEADING_KEY_RESULTS: &str = "heading.key_results";
    pub const HEADING_HOURLY_RATE: &str = "heading.hourly_rate";
    pub const HEADING_FIXED_COSTS: &str = "heading.fixed_costs";
    pub const HEADING_COST_STRUCTURE: &str = "heading.cost_structure";
    pub const HEADING_SERIES_DETAIL: &str = "heading.series_detail";
    pub const HEADING_UNIT_COST: &str = "heading.unit_cost";
    pub const HEADING_INVESTMENT: &str = "heading.investment";
    pub const HEADING_BREAK_EVEN: &str = "heading.break_even";
    pub const HEADING_SENSITIVITY: &str = "heading.sensitivity";

    pub const COL_ITEM: &str = "column.item";
    pub const COL_SERIES: &str = "column.series";
    pub const COL_UNITS_PER_YEAR: &str = "column.units_per_year";
    pub const COL_PROCESSING_HOURS: &str = "column.processing_hours";
    pub const COL_SETUP_HOURS: &str = "column.setup_hours";
    pub const COL_PROCESSING_COST: &str = "column.processing_cost";
    pub const COL_SETUP_COST: &str = "column.setup_cost";
    pub const COL_TOTAL_COST: &str = "column.total_cost";
    pub const COL_COST_PER_UNIT: &str = "column.cost_per_unit";
    pub const COL_DIFFERENCE: &str = "column.difference";
    pub const COL_ADVANTAGE: &str = "column.advantage";
    pub const COL_FACTOR: &str = "column.factor";
    pub const COL_VALUE: &str = "column.value";
    pub const COL_SAVING: &str = "column.saving";

    pub const ITEM_FIXED: &str = "item.fixed";
    pub const ITEM_ENERGY: &str = "item.energy";
    pub const ITEM_PERSONNEL: &str = "item.personnel";
    pub const ITEM_TOTAL: &str = "item.total";
    pub const ITEM_DEPRECIATION: &str = "item.depreciation";
    pub const ITEM_INTEREST: &str = "item.interest";
    pub const ITEM_MAINTENANCE: &str = "item.maintenance";
    pub const ITEM_SPACE: &str = "item.space";
    pub const ITEM_INSURANCE: &str = "item.insurance";
    pub const ITEM_TOOLING: &str = "item.tooling";
    pub const ITEM_ANNUAL_COST: &str = "item.annual_cost";
    pub const ITEM_UTILIZATION: &str = "item.utilization";
    pub const ITEM_ANNUAL_SAVING: &str = "item.annual_saving";
    pub const ITEM_SAVING_PERCENT: &str = "item.saving_percent";
    pub const ITEM_EXTRA_INVESTMENT: &str = "item.extra_investment";
    pub const ITEM_SIMPLE_PAYBACK: &str = "item.simple_payback";
    pub const ITEM_DISCOUNTED_PAYBACK: &str = "item.discounted_payback";
    pub const ITEM_NPV: &str = "item.npv";

    pub const VALUE_NOT_APPLICABLE: &str = "value.not_applicable";
    pub const VALUE_NOT_REACHED: &str = "value.not_reached";
    pub const VALUE_YEARS: &str = "value.years";
    pub const ADVANTAGE_MANUAL: &str = "advantage.manual";
    pub const ADVANTAGE_AUTOMATED: &str = "advantage.automated";
    pub const ADVANTAGE_EVEN: &str = "advantage.even";

    pub const WARN_CAPACITY: &str = "warning.capacity";
    pub const RECOMMEND_AUTOMATED: &str = "recommendation.automated";
    pub const RECOMMEND_MANUAL: &str = "recommendation.manual";
    pub const VERDICT_ECONOMICAL: &str = "recommendation.economical";
    pub const VERDICT_REVIEW: &str = "recommendation.review";
    pub const BREAK_EVEN_CROSSING: &str = "break_even.crossing";
    pub const BREAK_EVEN_NONE: &str = "break_even.none";
    pub const BREAK_EVEN_CURRENT: &str = "break_even.current";

    pub const PARAM_LABOR_RATE: &str = "parameter.labor_rate";
    pub const PARAM_ELECTRICITY_PRICE: &str = "parameter.electricity_price";
    pub const PARAM_UTILIZATION_MANUAL: &str = "parameter.utilization_manual";
    pub const PARAM_UTILIZATION_AUTOMATED: &str = "parameter.utilization_automated";
    pub const PARAM_OPERATOR_FACTOR_AUTOMATED: &str = "parameter.operator_factor_automated";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
    De,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else if c.starts_with("de") {
            Language::De
        } else {
            Language::Ko
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en/de)에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: built_in_pack(lang_code),
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code))
            .or_else(|| built_in_pack(lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    /// 번역을 가져온다. 언어팩 → 내장 문자열 순이며 없으면 한국어로 폴백한다.
    pub fn t(&self, key: &str) -> &str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v;
        }
        match self.lang {
            Language::En | Language::De => en(key).unwrap_or_else(|| ko(key)),
            Language::Ko => ko(key),
        }
    }

    /// `{name}` 자리표시자를 채운 번역 문자열.
    pub fn fill(&self, key: &str, vars: &[(&str, String)]) -> String {
        fill_template(self.t(key), vars)
    }
}

pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "ko" | "ko-kr" => Some("ko".into()),
        "en" | "en-us" | "en-uk" => Some("en-us".into()),
        "de" | "de-de" => Some("de-de".into()),
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        other if other.starts_with("de") => Some("de-de".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en-us".into()),
        "de" => Some("de-de".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    ["LANG", "LC_ALL"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫 맵.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) full code (e.g., de-de)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., de)
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// 내장 언어팩(파일이 없어도 동작하도록 빌드 시 포함). 한국어/영어는 코드에 내장한다.
fn built_in_pack(lang: &str) -> Option<HashMap<String, String>> {
    match lang.to_lowercase().as_str() {
        "de-de" | "de" => parse_toml_to_map(include_str!("../locales/de-de.toml")),
        _ => None,
    }
}

fn ko(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "오류",
        MACHINE_MANUAL => "기계 A (수동)",
        MACHINE_AUTOMATED => "기계 B (자동화)",
        SCENARIO_WRITTEN => "기본 시나리오를 저장했습니다: {path}",
        HEADING_KEY_RESULTS => "핵심 결과",
        HEADING_HOURLY_RATE => "기계시간당 비용률 [€/h]",
        HEADING_FIXED_COSTS => "연간 고정비 [€/년]",
        HEADING_COST_STRUCTURE => "연간 비용 구조 [€/년]",
        HEADING_SERIES_DETAIL => "시리즈별 원가 상세",
        HEADING_UNIT_COST => "시리즈별 개당 원가 비교",
        HEADING_INVESTMENT => "투자 경제성",
        HEADING_BREAK_EVEN => "손익분기 분석",
        HEADING_SENSITIVITY => "민감도 분석",
        COL_ITEM => "항목",
        COL_SERIES => "시리즈",
        COL_UNITS_PER_YEAR => "수량/년",
        COL_PROCESSING_HOURS => "가공시간 [h]",
        COL_SETUP_HOURS => "셋업시간 [h]",
        COL_PROCESSING_COST => "가공비 [€]",
        COL_SETUP_COST => "셋업비 [€]",
        COL_TOTAL_COST => "합계 [€]",
        COL_COST_PER_UNIT => "개당 원가 [€]",
        COL_DIFFERENCE => "차이 [€]",
        COL_ADVANTAGE => "유리한 쪽",
        COL_FACTOR => "배율",
        COL_VALUE => "값",
        COL_SAVING => "절감액 [€/년]",
        ITEM_FIXED => "고정비",
        ITEM_ENERGY => "에너지",
        ITEM_PERSONNEL => "인건비",
        ITEM_TOTAL => "합계",
        ITEM_DEPRECIATION => "감가상각",
        ITEM_INTEREST => "계산 이자",
        ITEM_MAINTENANCE => "정비",
        ITEM_SPACE => "공간",
        ITEM_INSURANCE => "보험",
        ITEM_TOOLING => "공구",
        ITEM_ANNUAL_COST => "연간 원가 [€]",
        ITEM_UTILIZATION => "가동 부하",
        ITEM_ANNUAL_SAVING => "연간 절감액 [€]",
        ITEM_SAVING_PERCENT => "절감률",
        ITEM_EXTRA_INVESTMENT => "추가 투자비 [€]",
        ITEM_SIMPLE_PAYBACK => "단순 회수기간",
        ITEM_DISCOUNTED_PAYBACK => "할인 회수기간",
        ITEM_NPV => "순현재가치 [€]",
        VALUE_NOT_APPLICABLE => "해당 없음",
        VALUE_NOT_REACHED => "기간 내 미회수",
        VALUE_YEARS => "년",
        ADVANTAGE_MANUAL => "A가 {amount} € 절감",
        ADVANTAGE_AUTOMATED => "B가 {amount} € 절감",
        ADVANTAGE_EVEN => "동일",
        WARN_CAPACITY => "주의: {machine}의 소요시간이 유효 가동시간을 초과합니다 ({required} / {available} h). 비교 결과를 신뢰할 수 없습니다.",
        RECOMMEND_AUTOMATED => "추천: 기계 B (자동화). 연간 {saving} € ({percent}) 절감, 회수기간 {payback}.",
        RECOMMEND_MANUAL => "추천: 기계 A (수동). 이 생산 프로그램에서는 B가 연간 {extra} € 더 비쌉니다.",
        VERDICT_ECONOMICAL => "경제성 있음 (회수기간 < 내용연수)",
        VERDICT_REVIEW => "재검토 필요 (회수기간 ≥ 내용연수)",
        BREAK_EVEN_CROSSING => "손익분기점: 약 {units} 개/년, {cost} €",
        BREAK_EVEN_NONE => "표본 범위 안에서 두 원가 곡선이 교차하지 않습니다.",
        BREAK_EVEN_CURRENT => "현재 프로그램: {units} 개/년",
        PARAM_LABOR_RATE => "인건비율 [€/h]",
        PARAM_ELECTRICITY_PRICE => "전력 단가 [€/kWh]",
        PARAM_UTILIZATION_MANUAL => "가동률 A",
        PARAM_UTILIZATION_AUTOMATED => "가동률 B",
        PARAM_OPERATOR_FACTOR_AUTOMATED => "작업자 부하율 B",
        _ => "?",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        MACHINE_MANUAL => "Machine A (manual)",
        MACHINE_AUTOMATED => "Machine B (automated)",
        SCENARIO_WRITTEN => "Default scenario written to {path}",
        HEADING_KEY_RESULTS => "Key results",
        HEADING_HOURLY_RATE => "Machine-hour rate [€/h]",
        HEADING_FIXED_COSTS => "Annual fixed costs [€/yr]",
        HEADING_COST_STRUCTURE => "Annual cost structure [€/yr]",
        HEADING_SERIES_DETAIL => "Cost detail per series",
        HEADING_UNIT_COST => "Unit cost per series",
        HEADING_INVESTMENT => "Investment appraisal",
        HEADING_BREAK_EVEN => "Break-even analysis",
        HEADING_SENSITIVITY => "Sensitivity analysis",
        COL_ITEM => "Item",
        COL_SERIES => "Series",
        COL_UNITS_PER_YEAR => "Units/yr",
        COL_PROCESSING_HOURS => "Processing [h]",
        COL_SETUP_HOURS => "Setup [h]",
        COL_PROCESSING_COST => "Processing [€]",
        COL_SETUP_COST => "Setup [€]",
        COL_TOTAL_COST => "Total [€]",
        COL_COST_PER_UNIT => "Per unit [€]",
        COL_DIFFERENCE => "Difference [€]",
        COL_ADVANTAGE => "Advantage",
        COL_FACTOR => "Factor",
        COL_VALUE => "Value",
        COL_SAVING => "Saving [€/yr]",
        ITEM_FIXED => "Fixed",
        ITEM_ENERGY => "Energy",
        ITEM_PERSONNEL => "Personnel",
        ITEM_TOTAL => "Total",
        ITEM_DEPRECIATION => "Depreciation",
        ITEM_INTEREST => "Imputed interest",
        ITEM_MAINTENANCE => "Maintenance",
        ITEM_SPACE => "Floor space",
        ITEM_INSURANCE => "Insurance",
        ITEM_TOOLING => "Tooling",
        ITEM_ANNUAL_COST => "Annual cost [€]",
        ITEM_UTILIZATION => "Capacity load",
        ITEM_ANNUAL_SAVING => "Annual saving [€]",
        ITEM_SAVING_PERCENT => "Saving",
        ITEM_EXTRA_INVESTMENT => "Extra investment [€]",
        ITEM_SIMPLE_PAYBACK => "Simple payback",
        ITEM_DISCOUNTED_PAYBACK => "Discounted payback",
        ITEM_NPV => "Net present value [€]",
        VALUE_NOT_APPLICABLE => "N/A",
        VALUE_NOT_REACHED => "not reached",
        VALUE_YEARS => "years",
        ADVANTAGE_MANUAL => "A saves {amount} €",
        ADVANTAGE_AUTOMATED => "B saves {amount} €",
        ADVANTAGE_EVEN => "even",
        WARN_CAPACITY => "Warning: {machine} needs more hours than available ({required} / {available} h). Comparison results are not reliable.",
        RECOMMEND_AUTOMATED => "Recommendation: machine B (automated), saving {saving} € per year ({percent}), payback {payback}.",
        RECOMMEND_MANUAL => "Recommendation: machine A (manual). For this program machine B costs {extra} € more per year.",
        VERDICT_ECONOMICAL => "Economical (payback < useful life)",
        VERDICT_REVIEW => "Review critically (payback ≥ useful life)",
        BREAK_EVEN_CROSSING => "Break-even at about {units} units/yr, {cost} €",
        BREAK_EVEN_NONE => "The cost curves do not cross within the sampled range.",
        BREAK_EVEN_CURRENT => "Current program: {units} units/yr",
        PARAM_LABOR_RATE => "Labor rate [€/h]",
        PARAM_ELECTRICITY_PRICE => "Electricity price [€/kWh]",
        PARAM_UTILIZATION_MANUAL => "Utilization A",
        PARAM_UTILIZATION_AUTOMATED => "Utilization B",
        PARAM_OPERATOR_FACTOR_AUTOMATED => "Operator load factor B",
        _ => return None,
    })
}
