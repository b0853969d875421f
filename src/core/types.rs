use serde::Serialize;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Profile {
    Balanced,
    ServiceHeavy,
    InstallHeavy,
    ContractRich,
}

impl Profile {
    pub const ALL: [Profile; 4] = [
        Profile::Balanced,
        Profile::ServiceHeavy,
        Profile::InstallHeavy,
        Profile::ContractRich,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Profile::Balanced => "balanced",
            Profile::ServiceHeavy => "serviceHeavy",
            Profile::InstallHeavy => "installHeavy",
            Profile::ContractRich => "contractRich",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Profile::Balanced => "Balanced",
            Profile::ServiceHeavy => "Service-heavy",
            Profile::InstallHeavy => "Install-heavy",
            Profile::ContractRich => "Contract-rich",
        }
    }
}

/// Raw business metrics. Percentages are whole numbers (`30.0` means 30%).
///
/// No field is range-checked and the revenue-mix percentages need not sum
/// to 100.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Inputs {
    pub rev_year3_ago: f64,
    pub rev_year2_ago: f64,
    pub rev_last_year: f64,

    pub service_mix_pct: f64,
    pub install_mix_pct: f64,
    pub maintenance_pct: f64,

    pub tech_labor_pct: f64,
    pub materials_pct: f64,
    pub overhead_pct: f64,
    pub marketing_pct: f64,
    pub fleet_pct: f64,
    pub other_cost_pct: f64,

    pub owner_addback_pct: f64,

    pub techs: f64,
    pub trucks: f64,
    pub asset_floor: f64,
    pub debt: f64,

    pub multiple: f64,
    pub growth_rate: f64,
}

impl Default for Inputs {
    fn default() -> Self {
        let baseline = Inputs {
            rev_year3_ago: 1_800_000.0,
            rev_year2_ago: 2_150_000.0,
            rev_last_year: 2_500_000.0,
            service_mix_pct: 0.0,
            install_mix_pct: 0.0,
            maintenance_pct: 0.0,
            tech_labor_pct: 0.0,
            materials_pct: 0.0,
            overhead_pct: 0.0,
            marketing_pct: 0.0,
            fleet_pct: 0.0,
            other_cost_pct: 0.0,
            owner_addback_pct: 0.0,
            techs: 8.0,
            trucks: 6.0,
            asset_floor: 350_000.0,
            debt: 250_000.0,
            multiple: 0.0,
            growth_rate: 5.0,
        };
        Profile::Balanced.overrides().apply_to(&baseline)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Results {
    #[serde(rename = "revenueTTM")]
    pub revenue_ttm: f64,
    pub total_cost_pct: f64,
    pub ebitda_margin_reported: f64,
    pub ebitda_reported: f64,
    pub owner_addbacks: f64,
    pub ebitda_adjusted: f64,
    pub adj_margin: f64,
    pub enterprise_value: f64,
    pub forward_revenue: f64,
    #[serde(rename = "forwardEBITDA")]
    pub forward_ebitda: f64,
    #[serde(rename = "forwardEV")]
    pub forward_ev: f64,
    pub equity_value: f64,
    pub value_per_tech: f64,
    pub value_per_truck: f64,
    /// Fractional rate: `0.1785` means 17.85% a year.
    pub cagr: f64,

    pub revenue_per_tech: f64,
    pub revenue_per_truck: f64,
    pub asset_backed_value: f64,
}
