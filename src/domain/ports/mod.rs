mod chat_port;
mod mood_classifier_port;
mod texture_source_port;

pub use chat_port::{ChatPort, ChatRequest, TextStream};
#[cfg(test)]
pub use mood_classifier_port::MockMoodClassifierPort;
pub use mood_classifier_port::MoodClassifierPort;
pub use texture_source_port::TextureSourcePort;
