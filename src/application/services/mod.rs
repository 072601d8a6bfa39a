//! Application services shared by the use cases.

pub mod analysis_cache;
pub mod spirit_profile_service;
pub mod upstream_health;

pub use analysis_cache::AnalysisCache;
pub use spirit_profile_service::{MoodPalette, SpiritProfileService, palette};
pub use upstream_health::UpstreamHealth;
