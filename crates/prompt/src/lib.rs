//! # Prompt
//!
//! Message model shared by the LLM client and the agent loop.
//!
//! ## Types
//!
//! - [`ChatMessage`]: one element of the OpenAI `messages` array. Assistant messages may carry
//!   [`ToolCall`]s; tool messages carry the id of the call they answer.
//! - [`ToolSpec`]: a tool as advertised to the model (name, purpose, JSON schema of arguments).
//!
//! ## Usage
//!
//! The agent appends messages as it goes (user → assistant → tool → assistant ...) and hands the
//! whole list to `llm_client::LlmClient` on every reasoning step. [`format_transcript`] renders the
//! visible part of a conversation for the terminal.

use serde::{Deserialize, Serialize};

/// Role of a message, one-to-one with OpenAI Chat Completions API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instruction (API `role: "system"`).
    System,
    /// User message (API `role: "user"`).
    User,
    /// Assistant message (API `role: "assistant"`), possibly requesting tool calls.
    Assistant,
    /// Result of a tool call (API `role: "tool"`).
    Tool,
}

impl MessageRole {
    /// Label used when rendering transcripts.
    pub fn label(&self) -> &'static str {
        match self {
            MessageRole::System => "System",
            MessageRole::User => "User",
            MessageRole::Assistant => "Assistant",
            MessageRole::Tool => "Tool",
        }
    }
}

/// A tool invocation requested by the model. `arguments` is the raw JSON text the model produced;
/// it is validated by whoever dispatches the call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: String,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments: arguments.into(),
        }
    }
}

/// A tool as presented to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    /// JSON schema (`{"type": "object", "properties": {...}}`) of the arguments.
    pub parameters: serde_json::Value,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl ChatMessage {
    fn plain(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::plain(MessageRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::plain(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::plain(MessageRole::Assistant, content)
    }

    /// Assistant turn that requests one or more tool calls. `content` is often empty.
    pub fn assistant_with_tool_calls(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            tool_calls,
            ..Self::plain(MessageRole::Assistant, content)
        }
    }

    /// Tool output answering the call with id `tool_call_id`.
    pub fn tool(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool_call_id: Some(tool_call_id.into()),
            ..Self::plain(MessageRole::Tool, content)
        }
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// Default system instruction for the supply-chain assistant.
pub const DEFAULT_SYSTEM_MESSAGE: &str =
    "You are a helpful assistant tasked with finding and explaining relevant information about the supply chain.";

/// Renders the user-visible part of a conversation, one `Role: content` line per message.
///
/// System and tool messages are skipped, as are assistant turns that only request tools.
pub fn format_transcript(messages: &[ChatMessage]) -> String {
    let mut out = String::new();
    for msg in messages {
        let visible = match msg.role {
            MessageRole::User => true,
            MessageRole::Assistant => !msg.content.trim().is_empty(),
            MessageRole::System | MessageRole::Tool => false,
        };
        if !visible {
            continue;
        }
        out.push_str(msg.role.label());
        out.push_str(": ");
        out.push_str(msg.content.trim());
        out.push('\n');
    }
    out
}
