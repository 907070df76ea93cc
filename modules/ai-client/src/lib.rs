//! Thin client for the two opaque oracles the simulator depends on: a chat
//! completion model and a text-to-speech model. Failures surface as opaque
//! errors with the provider's message; nothing here retries.

pub mod openai;
pub mod traits;
pub mod util;

pub use openai::OpenAi;
pub use traits::{ChatOracle, GenerationParams, Message, MessageRole, SpeechOracle};
