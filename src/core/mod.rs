mod engine;
mod presets;
mod session;
mod types;

pub use engine::compute_valuation;
pub use presets::{PresetOverrides, apply_profile, apply_profile_id};
pub use session::ValuationSession;
pub use types::{Inputs, Profile, Results};
