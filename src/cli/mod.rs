use clap::{Args, Parser, ValueEnum};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::core::{Inputs, Profile, Results, ValuationSession};
use crate::report::{format_multiple, format_pct, render_report};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid --payload JSON: {0}")]
    Payload(#[source] serde_json::Error),
    #[error("failed to serialize results: {0}")]
    Output(#[source] serde_json::Error),
}

/// Per-field overrides, shared by the command-line flags and the JSON
/// payload. Only fields that are set replace the current value.
#[derive(Args, Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InputOverrides {
    #[arg(long, allow_negative_numbers = true, help = "Revenue three years ago")]
    #[serde(deserialize_with = "coerce_number")]
    pub rev_year3_ago: Option<f64>,
    #[arg(long, allow_negative_numbers = true, help = "Revenue two years ago (display only)")]
    #[serde(deserialize_with = "coerce_number")]
    pub rev_year2_ago: Option<f64>,
    #[arg(
        long,
        allow_negative_numbers = true,
        help = "Revenue for the last full year, used as TTM"
    )]
    #[serde(deserialize_with = "coerce_number")]
    pub rev_last_year: Option<f64>,

    #[arg(long, allow_negative_numbers = true, help = "Service share of revenue in percent")]
    #[serde(deserialize_with = "coerce_number")]
    pub service_mix_pct: Option<f64>,
    #[arg(long, allow_negative_numbers = true, help = "Install share of revenue in percent")]
    #[serde(deserialize_with = "coerce_number")]
    pub install_mix_pct: Option<f64>,
    #[arg(
        long,
        allow_negative_numbers = true,
        help = "Maintenance-agreement share of revenue in percent"
    )]
    #[serde(deserialize_with = "coerce_number")]
    pub maintenance_pct: Option<f64>,

    #[arg(long, allow_negative_numbers = true, help = "Technician labor as percent of revenue")]
    #[serde(deserialize_with = "coerce_number")]
    pub tech_labor_pct: Option<f64>,
    #[arg(
        long,
        allow_negative_numbers = true,
        help = "Materials and equipment as percent of revenue"
    )]
    #[serde(deserialize_with = "coerce_number")]
    pub materials_pct: Option<f64>,
    #[arg(long, allow_negative_numbers = true, help = "Overhead as percent of revenue")]
    #[serde(deserialize_with = "coerce_number")]
    pub overhead_pct: Option<f64>,
    #[arg(long, allow_negative_numbers = true, help = "Marketing as percent of revenue")]
    #[serde(deserialize_with = "coerce_number")]
    pub marketing_pct: Option<f64>,
    #[arg(long, allow_negative_numbers = true, help = "Fleet costs as percent of revenue")]
    #[serde(deserialize_with = "coerce_number")]
    pub fleet_pct: Option<f64>,
    #[arg(long, allow_negative_numbers = true, help = "Other costs as percent of revenue")]
    #[serde(deserialize_with = "coerce_number")]
    pub other_cost_pct: Option<f64>,

    #[arg(long, allow_negative_numbers = true, help = "Owner add-backs as percent of revenue")]
    #[serde(deserialize_with = "coerce_number")]
    pub owner_addback_pct: Option<f64>,

    #[arg(long, allow_negative_numbers = true, help = "Number of technicians")]
    #[serde(deserialize_with = "coerce_number")]
    pub techs: Option<f64>,
    #[arg(long, allow_negative_numbers = true, help = "Number of trucks")]
    #[serde(deserialize_with = "coerce_number")]
    pub trucks: Option<f64>,
    #[arg(long, allow_negative_numbers = true, help = "Fleet and equipment valuation floor")]
    #[serde(deserialize_with = "coerce_number")]
    pub asset_floor: Option<f64>,
    #[arg(long, allow_negative_numbers = true, help = "Outstanding debt")]
    #[serde(deserialize_with = "coerce_number")]
    pub debt: Option<f64>,

    #[arg(long, allow_negative_numbers = true, help = "EBITDA multiple")]
    #[serde(deserialize_with = "coerce_number")]
    pub multiple: Option<f64>,
    #[arg(
        long,
        allow_negative_numbers = true,
        help = "Expected revenue growth for the forward year in percent"
    )]
    #[serde(deserialize_with = "coerce_number")]
    pub growth_rate: Option<f64>,
}

impl InputOverrides {
    pub fn apply_to(&self, inputs: &mut Inputs) {
        let fields = [
            (self.rev_year3_ago, &mut inputs.rev_year3_ago),
            (self.rev_year2_ago, &mut inputs.rev_year2_ago),
            (self.rev_last_year, &mut inputs.rev_last_year),
            (self.service_mix_pct, &mut inputs.service_mix_pct),
            (self.install_mix_pct, &mut inputs.install_mix_pct),
            (self.maintenance_pct, &mut inputs.maintenance_pct),
            (self.tech_labor_pct, &mut inputs.tech_labor_pct),
            (self.materials_pct, &mut inputs.materials_pct),
            (self.overhead_pct, &mut inputs.overhead_pct),
            (self.marketing_pct, &mut inputs.marketing_pct),
            (self.fleet_pct, &mut inputs.fleet_pct),
            (self.other_cost_pct, &mut inputs.other_cost_pct),
            (self.owner_addback_pct, &mut inputs.owner_addback_pct),
            (self.techs, &mut inputs.techs),
            (self.trucks, &mut inputs.trucks),
            (self.asset_floor, &mut inputs.asset_floor),
            (self.debt, &mut inputs.debt),
            (self.multiple, &mut inputs.multiple),
            (self.growth_rate, &mut inputs.growth_rate),
        ];
        for (value, slot) in fields {
            if let Some(v) = value {
                *slot = v;
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ValuationPayload {
    profile: Option<String>,
    #[serde(flatten)]
    overrides: InputOverrides,
}

#[derive(Deserialize)]
#[serde(untagged, expecting = "expected a number or numeric string")]
enum NumberLike {
    Number(f64),
    Text(String),
}

// Form-style coercion: numeric strings parse, blank is zero, junk is NaN.
fn coerce_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumberLike>::deserialize(deserializer)?;
    Ok(raw.map(|value| match value {
        NumberLike::Number(n) => n,
        NumberLike::Text(text) => coerce_text(&text),
    }))
}

fn coerce_text(text: &str) -> f64 {
    let cleaned = text.trim().trim_end_matches('%').trim();
    if cleaned.is_empty() {
        return 0.0;
    }
    cleaned.parse::<f64>().unwrap_or(f64::NAN)
}

#[derive(Parser, Debug)]
#[command(
    name = "hvac-valuation",
    about = "HVAC business valuation estimator (adjusted EBITDA x multiple, equity and forward value)"
)]
pub struct Cli {
    #[arg(
        long,
        help = "Profile preset: balanced, serviceHeavy, installHeavy or contractRich; unknown ids use balanced"
    )]
    pub profile: Option<String>,
    #[arg(
        long,
        help = "JSON object of camelCase inputs (and optional \"profile\") applied before flag overrides"
    )]
    pub payload: Option<String>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    #[arg(long, help = "Print the available profile presets and exit")]
    pub list_profiles: bool,
    #[arg(short, long, help = "Enable debug logging")]
    pub verbose: bool,
    #[command(flatten)]
    pub overrides: InputOverrides,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValuationResponse<'a> {
    profile: Profile,
    inputs: &'a Inputs,
    results: &'a Results,
}

/// Layers the balanced defaults, `--profile`, `--payload` and the individual
/// flags, in that order.
pub fn build_session(cli: &Cli) -> Result<ValuationSession, CliError> {
    let mut session = ValuationSession::new();
    if let Some(id) = cli.profile.as_deref() {
        session.select_profile_id(id);
    }

    if let Some(json) = cli.payload.as_deref() {
        let payload = payload_from_json(json)?;
        if let Some(id) = payload.profile.as_deref() {
            session.select_profile_id(id);
        }
        session.update(|inputs| payload.overrides.apply_to(inputs));
    }

    session.update(|inputs| cli.overrides.apply_to(inputs));
    Ok(session)
}

fn payload_from_json(json: &str) -> Result<ValuationPayload, CliError> {
    serde_json::from_str::<ValuationPayload>(json).map_err(CliError::Payload)
}

pub fn run(cli: &Cli) -> Result<String, CliError> {
    if cli.list_profiles {
        return Ok(render_profiles());
    }

    let session = build_session(cli)?;
    tracing::debug!(
        profile = session.profile().id(),
        inputs = ?session.inputs(),
        "resolved inputs"
    );

    match cli.format {
        OutputFormat::Text => Ok(render_report(session.inputs(), session.results())),
        OutputFormat::Json => {
            let response = ValuationResponse {
                profile: session.profile(),
                inputs: session.inputs(),
                results: session.results(),
            };
            let json = serde_json::to_string_pretty(&response).map_err(CliError::Output)?;
            Ok(format!("{json}\n"))
        }
    }
}

fn render_profiles() -> String {
    let mut out = String::new();
    for profile in Profile::ALL {
        let o = profile.overrides();
        out.push_str(&format!(
            "{:<14}{:<15}mix {:.0}/{:.0}/{:.0}  costs {:>6}  add-back {:>5}  multiple {}\n",
            profile.id(),
            profile.label(),
            o.service_mix_pct,
            o.install_mix_pct,
            o.maintenance_pct,
            format_pct(
                o.tech_labor_pct
                    + o.materials_pct
                    + o.overhead_pct
                    + o.marketing_pct
                    + o.fleet_pct
                    + o.other_cost_pct,
                0
            ),
            format_pct(o.owner_addback_pct, 0),
            format_multiple(o.multiple),
        ));
    }
    out
}
