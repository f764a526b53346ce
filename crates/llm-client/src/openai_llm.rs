//! OpenAI implementation of [`LlmClient`]: wraps openai-client and prepends the system message.

use anyhow::Result;
use async_trait::async_trait;
use prompt::{ChatMessage, ToolSpec, DEFAULT_SYSTEM_MESSAGE};
use tracing::{debug, instrument};

use super::{
    chat_message_to_openai, response_to_chat_message, tool_spec_to_openai, LlmClient, LlmConfig,
};

/// LlmClient backed by the OpenAI chat completions API.
#[derive(Clone)]
pub struct OpenAILlmClient {
    client: openai_client::OpenAIClient,
    model: String,
    temperature: f32,
    system_prompt: Option<String>,
}

impl OpenAILlmClient {
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: openai_client::OpenAIClient::with_base_url(api_key, base_url),
            model: super::DEFAULT_MODEL.to_string(),
            temperature: 0.0,
            system_prompt: None,
        }
    }

    /// Builds a client from any [`LlmConfig`].
    pub fn from_config(config: &dyn LlmConfig) -> Self {
        Self::with_base_url(config.api_key().to_string(), config.base_url().to_string())
            .with_model(config.model().to_string())
            .with_temperature(config.temperature())
            .with_system_prompt_opt(config.system_prompt().map(String::from))
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_system_prompt_opt(mut self, prompt: Option<String>) -> Self {
        self.system_prompt = prompt;
        self
    }

    fn system_content(&self) -> &str {
        self.system_prompt
            .as_deref()
            .unwrap_or(DEFAULT_SYSTEM_MESSAGE)
    }
}

#[async_trait]
impl LlmClient for OpenAILlmClient {
    #[instrument(skip(self, messages, tools), fields(model = %self.model, message_count = messages.len()))]
    async fn get_llm_response_with_tools(
        &self,
        messages: Vec<ChatMessage>,
        tools: &[ToolSpec],
    ) -> Result<ChatMessage> {
        let mut openai_messages = Vec::with_capacity(messages.len() + 1);
        openai_messages.push(chat_message_to_openai(&ChatMessage::system(self.system_content()))?);
        for msg in &messages {
            openai_messages.push(chat_message_to_openai(msg)?);
        }
        let openai_tools = tools
            .iter()
            .map(tool_spec_to_openai)
            .collect::<Result<Vec<_>>>()?;

        let reply = self
            .client
            .chat_completion_with_tools(&self.model, openai_messages, openai_tools, self.temperature)
            .await?;
        let message = response_to_chat_message(reply);
        debug!(
            tool_calls = message.tool_calls.len(),
            content_len = message.content.len(),
            "LLM reply received"
        );
        Ok(message)
    }
}
