mod client;
pub(crate) mod types;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::traits::{ChatOracle, GenerationParams, Message, MessageRole, SpeechOracle};
use client::OpenAiClient;

/// Default TTS playback speed. Slightly above 1.0 reads more like natural
/// conversation than the model's default pacing.
const SPEECH_SPEED: f32 = 1.1;

// =============================================================================
// OpenAi Agent
// =============================================================================

#[derive(Clone)]
pub struct OpenAi {
    api_key: String,
    chat_model: String,
    tts_model: String,
    base_url: Option<String>,
}

impl OpenAi {
    pub fn new(api_key: impl Into<String>, chat_model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            chat_model: chat_model.into(),
            tts_model: "tts-1".to_string(),
            base_url: None,
        }
    }

    pub fn from_env(chat_model: impl Into<String>) -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| anyhow!("OPENAI_API_KEY environment variable not set"))?;
        Ok(Self::new(api_key, chat_model))
    }

    pub fn with_tts_model(mut self, model: impl Into<String>) -> Self {
        self.tts_model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Get the chat model name.
    pub fn chat_model(&self) -> &str {
        &self.chat_model
    }

    fn client(&self) -> OpenAiClient {
        let client = OpenAiClient::new(&self.api_key);
        if let Some(ref url) = self.base_url {
            client.with_base_url(url)
        } else {
            client
        }
    }
}

// =============================================================================
// Oracle Implementations
// =============================================================================

#[async_trait]
impl ChatOracle for OpenAi {
    async fn complete(&self, messages: Vec<Message>, params: GenerationParams) -> Result<String> {
        let wire_messages = messages.into_iter().map(|msg| match msg.role {
            MessageRole::System => types::WireMessage::system(msg.content),
            MessageRole::User => types::WireMessage::user(msg.content),
            MessageRole::Assistant => types::WireMessage::assistant(msg.content),
        });

        let request = types::ChatRequest::new(&self.chat_model)
            .messages(wire_messages)
            .temperature(params.temperature)
            .top_p(params.top_p)
            .max_tokens(params.max_tokens);

        let response = self.client().chat(&request).await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| anyhow!("No response from OpenAI"))
    }
}

#[async_trait]
impl SpeechOracle for OpenAi {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>> {
        let request = types::SpeechRequest {
            model: self.tts_model.clone(),
            input: text.to_string(),
            voice: voice.to_string(),
            speed: Some(SPEECH_SPEED),
        };

        self.client().speech(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_new() {
        let ai = OpenAi::new("sk-test", "gpt-4o");
        assert_eq!(ai.chat_model, "gpt-4o");
        assert_eq!(ai.api_key, "sk-test");
        assert_eq!(ai.tts_model, "tts-1");
    }

    #[test]
    fn test_openai_with_tts_model() {
        let ai = OpenAi::new("sk-test", "gpt-4o").with_tts_model("tts-1-hd");
        assert_eq!(ai.tts_model, "tts-1-hd");
    }

    #[test]
    fn test_openai_with_base_url() {
        let ai = OpenAi::new("sk-test", "gpt-4o").with_base_url("https://custom.api.com");
        assert_eq!(ai.base_url, Some("https://custom.api.com".to_string()));
    }
}
