//! Domain error types.

mod spirit_error;
mod texture_error;
mod upstream_error;
mod validation_error;

pub use spirit_error::SpiritError;
pub use texture_error::{TextureError, TextureResult};
pub use upstream_error::UpstreamError;
pub use validation_error::ValidationError;
