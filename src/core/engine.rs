use super::types::{Inputs, Results};

/// Compounding periods between `rev_year3_ago` and `rev_last_year`.
const CAGR_PERIODS: f64 = 2.0;

/// Derives every valuation figure from `inputs`.
///
/// Pure: no state, no I/O, and the input is never modified. Only the
/// per-tech, per-truck, adjusted-margin and CAGR ratios are guarded against
/// a zero denominator; they fall back to `0` instead of `NaN`/`inf`.
pub fn compute_valuation(inputs: &Inputs) -> Results {
    let revenue_ttm = or_zero(inputs.rev_last_year);
    let debt = or_zero(inputs.debt);

    let total_cost_pct = inputs.tech_labor_pct
        + inputs.materials_pct
        + inputs.overhead_pct
        + inputs.marketing_pct
        + inputs.fleet_pct
        + inputs.other_cost_pct;
    let ebitda_margin_reported = 100.0 - total_cost_pct;
    let ebitda_reported = revenue_ttm * ebitda_margin_reported / 100.0;
    let owner_addbacks = revenue_ttm * inputs.owner_addback_pct / 100.0;
    let ebitda_adjusted = ebitda_reported + owner_addbacks;
    let adj_margin = if revenue_ttm > 0.0 {
        ebitda_adjusted / revenue_ttm * 100.0
    } else {
        0.0
    };
    let enterprise_value = ebitda_adjusted * inputs.multiple;

    let forward_revenue = revenue_ttm * (1.0 + inputs.growth_rate / 100.0);
    let forward_ebitda_reported = forward_revenue * ebitda_margin_reported / 100.0;
    let forward_addbacks = forward_revenue * inputs.owner_addback_pct / 100.0;
    let forward_ebitda = forward_ebitda_reported + forward_addbacks;
    let forward_ev = forward_ebitda * inputs.multiple;

    let equity_value = enterprise_value - debt;
    let value_per_tech = per_unit(equity_value, inputs.techs);
    let value_per_truck = per_unit(equity_value, inputs.trucks);

    Results {
        revenue_ttm,
        total_cost_pct,
        ebitda_margin_reported,
        ebitda_reported,
        owner_addbacks,
        ebitda_adjusted,
        adj_margin,
        enterprise_value,
        forward_revenue,
        forward_ebitda,
        forward_ev,
        equity_value,
        value_per_tech,
        value_per_truck,
        cagr: two_point_cagr(inputs.rev_year3_ago, inputs.rev_last_year),
        revenue_per_tech: per_unit(revenue_ttm, inputs.techs),
        revenue_per_truck: per_unit(revenue_ttm, inputs.trucks),
        asset_backed_value: equity_value.max(or_zero(inputs.asset_floor)),
    }
}

// Form fields that are blank or non-numeric arrive as NaN.
fn or_zero(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value }
}

fn per_unit(amount: f64, units: f64) -> f64 {
    if units > 0.0 { amount / units } else { 0.0 }
}

// Ignores the middle year: growth is measured from t-2 to t only.
fn two_point_cagr(start: f64, end: f64) -> f64 {
    if start > 0.0 && end > 0.0 {
        (end / start).powf(1.0 / CAGR_PERIODS) - 1.0
    } else {
        0.0
    }
}
