//! Text rendering for valuation results: currency, percentage and multiple
//! formatting plus the fixed-layout report printed by the CLI.

use crate::core::{Inputs, Results};

const LABEL_WIDTH: usize = 28;
const VALUE_WIDTH: usize = 14;

/// Whole US dollars with thousands separators, e.g. `$2,250,000` or
/// `-$1,234`. Missing and non-finite values render as `$0`.
pub fn format_money(value: Option<f64>) -> String {
    let Some(value) = value.filter(|v| v.is_finite()) else {
        return "$0".to_string();
    };

    let rounded = value.round();
    let grouped = group_thousands(&format!("{:.0}", rounded.abs()));
    if rounded < 0.0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

pub fn format_pct(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}%")
}

pub fn format_multiple(value: f64) -> String {
    format!("{value:.1}x")
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn push_row(out: &mut String, label: &str, value: &str) {
    out.push_str(&format!("{label:<LABEL_WIDTH$}{value:>VALUE_WIDTH$}\n"));
}

fn money(value: f64) -> String {
    format_money(Some(value))
}

pub fn render_report(inputs: &Inputs, results: &Results) -> String {
    let mut out = String::new();
    out.push_str("HVAC business valuation\n");
    out.push_str("=======================\n\n");

    let mix = format!(
        "{:.0}/{:.0}/{:.0}",
        inputs.service_mix_pct, inputs.install_mix_pct, inputs.maintenance_pct
    );
    push_row(&mut out, "Revenue mix (svc/inst/mnt)", &mix);
    push_row(&mut out, "Revenue (TTM)", &money(results.revenue_ttm));
    push_row(
        &mut out,
        "3-year CAGR (approx)",
        &format_pct(results.cagr * 100.0, 1),
    );
    push_row(&mut out, "Total costs", &format_pct(results.total_cost_pct, 1));
    push_row(
        &mut out,
        "Reported EBITDA margin",
        &format_pct(results.ebitda_margin_reported, 1),
    );
    push_row(&mut out, "Reported EBITDA", &money(results.ebitda_reported));
    push_row(&mut out, "Owner add-backs", &money(results.owner_addbacks));
    push_row(&mut out, "Adjusted EBITDA", &money(results.ebitda_adjusted));
    push_row(&mut out, "Adjusted margin", &format_pct(results.adj_margin, 1));
    push_row(&mut out, "Multiple", &format_multiple(inputs.multiple));
    push_row(&mut out, "Enterprise value", &money(results.enterprise_value));
    push_row(&mut out, "Debt", &money(inputs.debt));
    push_row(&mut out, "Equity value", &money(results.equity_value));
    push_row(&mut out, "Value per tech", &money(results.value_per_tech));
    push_row(&mut out, "Value per truck", &money(results.value_per_truck));
    push_row(&mut out, "Revenue per tech", &money(results.revenue_per_tech));
    push_row(&mut out, "Revenue per truck", &money(results.revenue_per_truck));
    push_row(
        &mut out,
        "Asset-backed value",
        &money(results.asset_backed_value),
    );

    out.push_str(&format!(
        "\nForward year ({:+.1}% growth)\n",
        inputs.growth_rate
    ));
    push_row(&mut out, "Forward revenue", &money(results.forward_revenue));
    push_row(&mut out, "Forward EBITDA", &money(results.forward_ebitda));
    push_row(&mut out, "Forward EV", &money(results.forward_ev));
    out
}
