//! Domain entity definitions.

mod api_key;
mod mood;
mod spirit;
mod texture;

pub use api_key::ApiKey;
pub use mood::{Mood, MoodResult, MoodScore};
pub use spirit::{Rarity, SpiritProfile};
pub use texture::{Texture, TextureKey};
