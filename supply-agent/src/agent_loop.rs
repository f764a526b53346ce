//! Reason → tool → reason, bounded.

use std::sync::Arc;

use llm_client::LlmClient;
use prompt::{ChatMessage, ToolCall};
use serde_json::json;
use supply_core::{Result, SupplyError};
use supply_tools::{SupplyTool, ToolContext};
use tracing::{debug, info, instrument, warn};

/// Answer returned when the model keeps requesting tools past the step budget.
pub const GIVE_UP_ANSWER: &str = "I could not complete this request within the allowed number of steps. Please try rephrasing your question.";

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The model produced a reply with no tool calls.
    Answered,
    /// The step budget ran out while the model still wanted tools.
    IterationLimit,
}

/// Result of one [`AgentLoop::run`].
#[derive(Debug, Clone)]
pub struct AgentOutcome {
    pub answer: String,
    /// Conversation as the model saw it: user question, assistant replies and tool results.
    pub messages: Vec<ChatMessage>,
    /// Reasoning steps taken (model calls).
    pub iterations: usize,
    pub termination: Termination,
}

pub struct AgentLoop {
    llm: Arc<dyn LlmClient>,
    tools: ToolContext,
    max_iterations: usize,
}

impl AgentLoop {
    /// `max_iterations` is clamped to at least one reasoning step.
    pub fn new(llm: Arc<dyn LlmClient>, tools: ToolContext, max_iterations: usize) -> Self {
        Self {
            llm,
            tools,
            max_iterations: max_iterations.max(1),
        }
    }

    pub fn tools(&self) -> &ToolContext {
        &self.tools
    }

    /// Runs one independent query to completion.
    #[instrument(skip(self), fields(max_iterations = self.max_iterations))]
    pub async fn run(&self, question: &str) -> Result<AgentOutcome> {
        let specs = SupplyTool::specs();
        let mut messages = vec![ChatMessage::user(question)];

        for step in 1..=self.max_iterations {
            let reply = self
                .llm
                .get_llm_response_with_tools(messages.clone(), &specs)
                .await
                .map_err(SupplyError::llm)?;
            messages.push(reply.clone());

            if !reply.has_tool_calls() {
                info!(iterations = step, "agent answered");
                return Ok(AgentOutcome {
                    answer: reply.content,
                    messages,
                    iterations: step,
                    termination: Termination::Answered,
                });
            }

            if step == self.max_iterations {
                break;
            }

            for call in &reply.tool_calls {
                let content = self.execute(call).await?;
                messages.push(ChatMessage::tool(call.id.clone(), content));
            }
        }

        warn!(
            max_iterations = self.max_iterations,
            "model still requesting tools, giving up"
        );
        Ok(AgentOutcome {
            answer: GIVE_UP_ANSWER.to_string(),
            messages,
            iterations: self.max_iterations,
            termination: Termination::IterationLimit,
        })
    }

    /// Runs one tool call. Bad calls become an error payload for the model; infrastructure
    /// failures end the run.
    async fn execute(&self, call: &ToolCall) -> Result<String> {
        info!(tool = %call.name, call_id = %call.id, arguments = %call.arguments, "tool call");
        match self.tools.call(call).await {
            Ok(value) => {
                debug!(tool = %call.name, "tool result: {}", value);
                Ok(value.to_string())
            }
            Err(SupplyError::Tool(e)) => {
                warn!(tool = %call.name, error = %e, "rejected tool call");
                Ok(json!({ "error": e.to_string() }).to_string())
            }
            Err(e) => Err(e),
        }
    }
}
