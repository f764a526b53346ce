//! # LLM client abstraction
//!
//! Defines the [`LlmClient`] trait and an OpenAI implementation. One call is one reasoning step:
//! the model sees the conversation and the advertised tools and answers with either tool calls
//! or a final message. Transport-agnostic; the agent loop only sees [`prompt`] types.

use anyhow::Result;
use async_trait::async_trait;
use openai_client::{
    ChatCompletionMessageToolCall, ChatCompletionRequestAssistantMessageArgs,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestToolMessageArgs, ChatCompletionRequestUserMessageArgs,
    ChatCompletionResponseMessage, ChatCompletionTool, ChatCompletionToolArgs,
    ChatCompletionToolType, FunctionCall, FunctionObjectArgs,
};
use prompt::{ChatMessage, MessageRole, ToolCall, ToolSpec};

mod config;
mod openai_llm;

pub use config::{EnvLlmConfig, LlmConfig, DEFAULT_MODEL};
pub use openai_llm::OpenAILlmClient;

/// LLM client interface: one tool-aware completion per call.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Sends `messages` with `tools` advertised and returns the assistant message.
    ///
    /// The returned message has role [`MessageRole::Assistant`]; it carries `tool_calls` when the
    /// model wants tools run, otherwise `content` is the final answer. Implementations add the
    /// system prompt.
    async fn get_llm_response_with_tools(
        &self,
        messages: Vec<ChatMessage>,
        tools: &[ToolSpec],
    ) -> Result<ChatMessage>;
}

/// Converts a single [`ChatMessage`] into OpenAI API message format.
fn chat_message_to_openai(msg: &ChatMessage) -> Result<ChatCompletionRequestMessage> {
    let content = msg.content.clone();
    let openai_msg: ChatCompletionRequestMessage = match msg.role {
        MessageRole::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::User => ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::Assistant => {
            let mut args = ChatCompletionRequestAssistantMessageArgs::default();
            if !content.is_empty() {
                args.content(content);
            }
            if msg.has_tool_calls() {
                let calls: Vec<ChatCompletionMessageToolCall> =
                    msg.tool_calls.iter().map(tool_call_to_openai).collect();
                args.tool_calls(calls);
            }
            args.build()?.into()
        }
        MessageRole::Tool => {
            let call_id = msg
                .tool_call_id
                .clone()
                .ok_or_else(|| anyhow::anyhow!("tool message without tool_call_id"))?;
            ChatCompletionRequestToolMessageArgs::default()
                .tool_call_id(call_id)
                .content(content)
                .build()?
                .into()
        }
    };
    Ok(openai_msg)
}

fn tool_call_to_openai(call: &ToolCall) -> ChatCompletionMessageToolCall {
    ChatCompletionMessageToolCall {
        id: call.id.clone(),
        r#type: ChatCompletionToolType::Function,
        function: FunctionCall {
            name: call.name.clone(),
            arguments: call.arguments.clone(),
        },
    }
}

fn tool_spec_to_openai(spec: &ToolSpec) -> Result<ChatCompletionTool> {
    let function = FunctionObjectArgs::default()
        .name(spec.name.clone())
        .description(spec.description.clone())
        .parameters(spec.parameters.clone())
        .build()?;
    Ok(ChatCompletionToolArgs::default()
        .r#type(ChatCompletionToolType::Function)
        .function(function)
        .build()?)
}

/// Converts the model's reply back into a [`ChatMessage`].
fn response_to_chat_message(message: ChatCompletionResponseMessage) -> ChatMessage {
    let content = message.content.unwrap_or_default();
    let tool_calls: Vec<ToolCall> = message
        .tool_calls
        .unwrap_or_default()
        .into_iter()
        .map(|c| ToolCall::new(c.id, c.function.name, c.function.arguments))
        .collect();
    ChatMessage::assistant_with_tool_calls(content, tool_calls)
}
