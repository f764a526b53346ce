//! # supply-agent
//!
//! [`AgentLoop`] alternates model reasoning and tool execution until the model answers without
//! calling a tool, or the step budget runs out. [`SupplyChainAssistant`] owns the connections
//! and turns failures into the user-facing apology.

mod agent_loop;
mod assistant;

pub use agent_loop::{AgentLoop, AgentOutcome, Termination, GIVE_UP_ANSWER};
pub use assistant::{Answerer, SupplyChainAssistant, APOLOGY};
