//! Domain layer with core entities, errors, and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;

pub use entities::{ApiKey, Mood, MoodResult, MoodScore, Rarity, SpiritProfile, Texture, TextureKey};
pub use errors::{SpiritError, TextureError, TextureResult, UpstreamError, ValidationError};
pub use ports::{ChatPort, ChatRequest, MoodClassifierPort, TextStream, TextureSourcePort};
