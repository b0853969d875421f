use super::types::{Inputs, Profile};

/// The fields a profile overwrites. Everything else in [`Inputs`] (revenue
/// history, team and assets, debt, growth rate) is left alone.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PresetOverrides {
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
    pub multiple: f64,
}

const BALANCED: PresetOverrides = PresetOverrides {
    service_mix_pct: 40.0,
    install_mix_pct: 35.0,
    maintenance_pct: 25.0,
    tech_labor_pct: 30.0,
    materials_pct: 18.0,
    overhead_pct: 15.0,
    marketing_pct: 8.0,
    fleet_pct: 6.0,
    other_cost_pct: 7.0,
    owner_addback_pct: 4.0,
    multiple: 5.0,
};

const SERVICE_HEAVY: PresetOverrides = PresetOverrides {
    service_mix_pct: 55.0,
    install_mix_pct: 20.0,
    maintenance_pct: 25.0,
    tech_labor_pct: 32.0,
    materials_pct: 16.0,
    overhead_pct: 15.0,
    marketing_pct: 7.0,
    fleet_pct: 6.0,
    other_cost_pct: 7.0,
    owner_addback_pct: 5.0,
    multiple: 5.5,
};

const INSTALL_HEAVY: PresetOverrides = PresetOverrides {
    service_mix_pct: 20.0,
    install_mix_pct: 60.0,
    maintenance_pct: 20.0,
    tech_labor_pct: 26.0,
    materials_pct: 26.0,
    overhead_pct: 14.0,
    marketing_pct: 8.0,
    fleet_pct: 6.0,
    other_cost_pct: 6.0,
    owner_addback_pct: 3.0,
    multiple: 4.3,
};

const CONTRACT_RICH: PresetOverrides = PresetOverrides {
    service_mix_pct: 35.0,
    install_mix_pct: 15.0,
    maintenance_pct: 50.0,
    tech_labor_pct: 28.0,
    materials_pct: 14.0,
    overhead_pct: 16.0,
    marketing_pct: 7.0,
    fleet_pct: 6.0,
    other_cost_pct: 6.0,
    owner_addback_pct: 4.0,
    multiple: 6.0,
};

impl Profile {
    pub fn overrides(self) -> PresetOverrides {
        match self {
            Profile::Balanced => BALANCED,
            Profile::ServiceHeavy => SERVICE_HEAVY,
            Profile::InstallHeavy => INSTALL_HEAVY,
            Profile::ContractRich => CONTRACT_RICH,
        }
    }

    /// Resolves a profile identifier. Accepts `serviceHeavy`, `service-heavy`
    /// and `service_heavy` in any case; anything unrecognised is `Balanced`.
    pub fn from_id(id: &str) -> Profile {
        let normalized: String = id
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();

        let found = Profile::ALL
            .into_iter()
            .find(|profile| profile.id().eq_ignore_ascii_case(&normalized));
        match found {
            Some(profile) => profile,
            None => {
                tracing::debug!(id, "unrecognised profile, falling back to balanced");
                Profile::Balanced
            }
        }
    }
}

impl PresetOverrides {
    pub fn apply_to(&self, current: &Inputs) -> Inputs {
        Inputs {
            service_mix_pct: self.service_mix_pct,
            install_mix_pct: self.install_mix_pct,
            maintenance_pct: self.maintenance_pct,
            tech_labor_pct: self.tech_labor_pct,
            materials_pct: self.materials_pct,
            overhead_pct: self.overhead_pct,
            marketing_pct: self.marketing_pct,
            fleet_pct: self.fleet_pct,
            other_cost_pct: self.other_cost_pct,
            owner_addback_pct: self.owner_addback_pct,
            multiple: self.multiple,
            ..*current
        }
    }
}

pub fn apply_profile(profile: Profile, current: &Inputs) -> Inputs {
    tracing::debug!(profile = profile.id(), "applying profile preset");
    profile.overrides().apply_to(current)
}

pub fn apply_profile_id(id: &str, current: &Inputs) -> Inputs {
    apply_profile(Profile::from_id(id), current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert_eq, proptest};

    fn scrambled_inputs() -> Inputs {
        Inputs {
            rev_year3_ago: 900_000.0,
            rev_year2_ago: 1_000_000.0,
            rev_last_year: 1_250_000.0,
            service_mix_pct: 1.0,
            install_mix_pct: 2.0,
            maintenance_pct: 3.0,
            tech_labor_pct: 4.0,
            materials_pct: 5.0,
            overhead_pct: 6.0,
            marketing_pct: 7.0,
            fleet_pct: 8.0,
            other_cost_pct: 9.0,
            owner_addback_pct: 10.0,
            techs: 3.0,
            trucks: 2.0,
            asset_floor: 120_000.0,
            debt: 75_000.0,
            multiple: 2.5,
            growth_rate: -4.0,
        }
    }

    #[test]
    fn from_id_resolves_every_spelling() {
        assert_eq!(Profile::from_id("balanced"), Profile::Balanced);
        assert_eq!(Profile::from_id("serviceHeavy"), Profile::ServiceHeavy);
        assert_eq!(Profile::from_id("service-heavy"), Profile::ServiceHeavy);
        assert_eq!(Profile::from_id(" INSTALL_HEAVY "), Profile::InstallHeavy);
        assert_eq!(Profile::from_id("contractrich"), Profile::ContractRich);
    }

    #[test]
    fn from_id_falls_back_to_balanced() {
        assert_eq!(Profile::from_id(""), Profile::Balanced);
        assert_eq!(Profile::from_id("residential"), Profile::Balanced);
        assert_eq!(Profile::from_id("service heavy"), Profile::Balanced);
    }

    #[test]
    fn ids_round_trip_through_from_id() {
        for profile in Profile::ALL {
            assert_eq!(Profile::from_id(profile.id()), profile);
        }
    }

    #[test]
    fn install_heavy_overwrites_mix_and_multiple_but_keeps_revenue() {
        let balanced = Inputs::default();
        let applied = apply_profile_id("installHeavy", &balanced);

        assert_eq!(applied.service_mix_pct, 20.0);
        assert_eq!(applied.install_mix_pct, 60.0);
        assert_eq!(applied.maintenance_pct, 20.0);
        assert_eq!(applied.multiple, 4.3);
        assert_eq!(applied.rev_last_year, 2_500_000.0);
    }

    #[test]
    fn apply_overwrites_only_preset_fields() {
        let current = scrambled_inputs();
        let applied = apply_profile(Profile::ContractRich, &current);

        assert_eq!(applied.service_mix_pct, 35.0);
        assert_eq!(applied.install_mix_pct, 15.0);
        assert_eq!(applied.maintenance_pct, 50.0);
        assert_eq!(applied.tech_labor_pct, 28.0);
        assert_eq!(applied.materials_pct, 14.0);
        assert_eq!(applied.overhead_pct, 16.0);
        assert_eq!(applied.marketing_pct, 7.0);
        assert_eq!(applied.fleet_pct, 6.0);
        assert_eq!(applied.other_cost_pct, 6.0);
        assert_eq!(applied.owner_addback_pct, 4.0);
        assert_eq!(applied.multiple, 6.0);

        assert_eq!(applied.rev_year3_ago, current.rev_year3_ago);
        assert_eq!(applied.rev_year2_ago, current.rev_year2_ago);
        assert_eq!(applied.rev_last_year, current.rev_last_year);
        assert_eq!(applied.techs, current.techs);
        assert_eq!(applied.trucks, current.trucks);
        assert_eq!(applied.asset_floor, current.asset_floor);
        assert_eq!(applied.debt, current.debt);
        assert_eq!(applied.growth_rate, current.growth_rate);
    }

    #[test]
    fn apply_does_not_touch_the_source() {
        let current = scrambled_inputs();
        let _ = apply_profile(Profile::ServiceHeavy, &current);
        assert_eq!(current, scrambled_inputs());
    }

    fn override_row(o: PresetOverrides) -> [f64; 11] {
        [
            o.service_mix_pct,
            o.install_mix_pct,
            o.maintenance_pct,
            o.tech_labor_pct,
            o.materials_pct,
            o.overhead_pct,
            o.marketing_pct,
            o.fleet_pct,
            o.other_cost_pct,
            o.owner_addback_pct,
            o.multiple,
        ]
    }

    #[test]
    fn preset_table_matches_published_values() {
        let expected = [
            (
                Profile::Balanced,
                [40.0, 35.0, 25.0, 30.0, 18.0, 15.0, 8.0, 6.0, 7.0, 4.0, 5.0],
            ),
            (
                Profile::ServiceHeavy,
                [55.0, 20.0, 25.0, 32.0, 16.0, 15.0, 7.0, 6.0, 7.0, 5.0, 5.5],
            ),
            (
                Profile::InstallHeavy,
                [20.0, 60.0, 20.0, 26.0, 26.0, 14.0, 8.0, 6.0, 6.0, 3.0, 4.3],
            ),
            (
                Profile::ContractRich,
                [35.0, 15.0, 50.0, 28.0, 14.0, 16.0, 7.0, 6.0, 6.0, 4.0, 6.0],
            ),
        ];

        for (profile, row) in expected {
            assert_eq!(override_row(profile.overrides()), row, "{}", profile.id());
        }
    }

    #[test]
    fn applied_inputs_carry_every_override_column() {
        for profile in Profile::ALL {
            let applied = apply_profile(profile, &scrambled_inputs());
            let carried = [
                applied.service_mix_pct,
                applied.install_mix_pct,
                applied.maintenance_pct,
                applied.tech_labor_pct,
                applied.materials_pct,
                applied.overhead_pct,
                applied.marketing_pct,
                applied.fleet_pct,
                applied.other_cost_pct,
                applied.owner_addback_pct,
                applied.multiple,
            ];
            assert_eq!(carried, override_row(profile.overrides()), "{}", profile.id());
        }
    }

    #[test]
    fn default_inputs_use_balanced_values() {
        let inputs = Inputs::default();
        assert_eq!(inputs.service_mix_pct, 40.0);
        assert_eq!(inputs.install_mix_pct, 35.0);
        assert_eq!(inputs.maintenance_pct, 25.0);
        assert_eq!(inputs.tech_labor_pct, 30.0);
        assert_eq!(inputs.materials_pct, 18.0);
        assert_eq!(inputs.overhead_pct, 15.0);
        assert_eq!(inputs.marketing_pct, 8.0);
        assert_eq!(inputs.fleet_pct, 6.0);
        assert_eq!(inputs.other_cost_pct, 7.0);
        assert_eq!(inputs.owner_addback_pct, 4.0);
        assert_eq!(inputs.multiple, 5.0);
        assert_eq!(inputs.rev_last_year, 2_500_000.0);
        assert_eq!(inputs.debt, 250_000.0);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(32))]

        #[test]
        fn prop_applying_twice_matches_applying_once(
            profile_idx in 0usize..4,
            rev_last_year in 0u32..10_000_000,
            techs in 0u32..40,
            debt in 0u32..2_000_000,
            growth_bp in -2_000i32..3_000
        ) {
            let mut current = scrambled_inputs();
            current.rev_last_year = rev_last_year as f64;
            current.techs = techs as f64;
            current.debt = debt as f64;
            current.growth_rate = growth_bp as f64 / 100.0;

            let profile = Profile::ALL[profile_idx];
            let once = apply_profile(profile, &current);
            let twice = apply_profile(profile, &once);

            prop_assert_eq!(once, twice);
            prop_assert_eq!(twice.rev_last_year, current.rev_last_year);
            prop_assert_eq!(twice.techs, current.techs);
            prop_assert_eq!(twice.debt, current.debt);
            prop_assert_eq!(twice.growth_rate, current.growth_rate);
        }
    }
}
