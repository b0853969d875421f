use super::engine::compute_valuation;
use super::presets::apply_profile;
use super::types::{Inputs, Profile, Results};

/// Holds the editable inputs together with the results derived from them.
///
/// Every mutation recomputes `results` in full before returning, so the
/// pair is always consistent.
#[derive(Debug, Clone)]
pub struct ValuationSession {
    profile: Profile,
    inputs: Inputs,
    results: Results,
}

impl Default for ValuationSession {
    fn default() -> Self {
        Self::with_inputs(Inputs::default())
    }
}

impl ValuationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_inputs(inputs: Inputs) -> Self {
        Self {
            profile: Profile::Balanced,
            inputs,
            results: compute_valuation(&inputs),
        }
    }

    /// The profile most recently selected. Field edits made afterwards do
    /// not change it.
    pub fn profile(&self) -> Profile {
        self.profile
    }

    pub fn inputs(&self) -> &Inputs {
        &self.inputs
    }

    pub fn results(&self) -> &Results {
        &self.results
    }

    pub fn update<F>(&mut self, edit: F) -> &Results
    where
        F: FnOnce(&mut Inputs),
    {
        edit(&mut self.inputs);
        self.recompute()
    }

    pub fn replace(&mut self, inputs: Inputs) -> &Results {
        self.inputs = inputs;
        self.recompute()
    }

    pub fn select_profile(&mut self, profile: Profile) -> &Results {
        self.profile = profile;
        self.inputs = apply_profile(profile, &self.inputs);
        self.recompute()
    }

    pub fn select_profile_id(&mut self, id: &str) -> &Results {
        self.select_profile(Profile::from_id(id))
    }

    fn recompute(&mut self) -> &Results {
        self.results = compute_valuation(&self.inputs);
        tracing::debug!(
            enterprise_value = self.results.enterprise_value,
            equity_value = self.results.equity_value,
            "recomputed valuation"
        );
        &self.results
    }
}
