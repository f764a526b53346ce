//! The closed set of tools offered to the model and their dispatch.

use std::sync::Arc;

use embedding::EmbeddingService;
use graph_store::GraphStore;
use prompt::{ToolCall, ToolSpec};
use serde::de::DeserializeOwned;
use serde_json::Value;
use supply_core::{Result, SupplyError, ToolError};
use tracing::{info, instrument};

use crate::args::{SupplierCountInput, SupplierListInput};
use crate::count::run_supplier_count_query;
use crate::list::run_supplier_list_query;

/// A tool the model may call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupplyTool {
    SupplierCount,
    SupplierList,
}

impl SupplyTool {
    pub const ALL: [SupplyTool; 2] = [SupplyTool::SupplierCount, SupplyTool::SupplierList];

    pub fn name(self) -> &'static str {
        match self {
            SupplyTool::SupplierCount => "supplier-count",
            SupplyTool::SupplierList => "supplier-list",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SupplyTool::SupplierCount => "Calculate the count of Suppliers based on particular filters",
            SupplyTool::SupplierList => "List suppliers based on particular filters",
        }
    }

    /// JSON Schema of the tool's arguments.
    pub fn parameters(self) -> Value {
        match self {
            SupplyTool::SupplierCount => SupplierCountInput::schema(),
            SupplyTool::SupplierList => SupplierListInput::schema(),
        }
    }

    pub fn spec(self) -> ToolSpec {
        ToolSpec {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters(),
        }
    }

    /// Specs of every tool, in [`SupplyTool::ALL`] order.
    pub fn specs() -> Vec<ToolSpec> {
        Self::ALL.iter().map(|tool| tool.spec()).collect()
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }
}

/// A validated tool call.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolInvocation {
    SupplierCount(SupplierCountInput),
    SupplierList(SupplierListInput),
}

impl ToolInvocation {
    /// Resolves `name` and decodes `arguments` (a JSON object; empty means `{}`).
    pub fn parse(name: &str, arguments: &str) -> std::result::Result<Self, ToolError> {
        let tool =
            SupplyTool::from_name(name).ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;

        match tool {
            SupplyTool::SupplierCount => {
                decode::<SupplierCountInput>(tool, arguments).map(ToolInvocation::SupplierCount)
            }
            SupplyTool::SupplierList => {
                let input = decode::<SupplierListInput>(tool, arguments)?;
                input.validate().map_err(|message| ToolError::InvalidArguments {
                    tool: tool.name().to_string(),
                    message,
                })?;
                Ok(ToolInvocation::SupplierList(input))
            }
        }
    }

    pub fn tool(&self) -> SupplyTool {
        match self {
            ToolInvocation::SupplierCount(_) => SupplyTool::SupplierCount,
            ToolInvocation::SupplierList(_) => SupplyTool::SupplierList,
        }
    }
}

fn decode<T: DeserializeOwned>(tool: SupplyTool, arguments: &str) -> std::result::Result<T, ToolError> {
    let arguments = match arguments.trim() {
        "" => "{}",
        trimmed => trimmed,
    };
    serde_json::from_str(arguments).map_err(|e| ToolError::InvalidArguments {
        tool: tool.name().to_string(),
        message: e.to_string(),
    })
}

/// Everything a tool needs to run.
#[derive(Clone)]
pub struct ToolContext {
    store: Arc<dyn GraphStore>,
    embedding: Arc<dyn EmbeddingService>,
    vector_index: String,
}

impl ToolContext {
    pub fn new(
        store: Arc<dyn GraphStore>,
        embedding: Arc<dyn EmbeddingService>,
        vector_index: impl Into<String>,
    ) -> Self {
        Self {
            store,
            embedding,
            vector_index: vector_index.into(),
        }
    }

    pub fn store(&self) -> &Arc<dyn GraphStore> {
        &self.store
    }

    pub fn embedding(&self) -> &Arc<dyn EmbeddingService> {
        &self.embedding
    }

    pub fn vector_index(&self) -> &str {
        &self.vector_index
    }

    /// Runs a validated invocation and returns its result as JSON.
    #[instrument(skip(self, invocation), fields(tool = invocation.tool().name()))]
    pub async fn invoke(&self, invocation: &ToolInvocation) -> Result<Value> {
        let value = match invocation {
            ToolInvocation::SupplierCount(input) => {
                let rows = run_supplier_count_query(self.store.as_ref(), input).await?;
                Value::Array(rows.into_iter().map(Value::Object).collect())
            }
            ToolInvocation::SupplierList(input) => {
                let outcome = run_supplier_list_query(
                    self.store.as_ref(),
                    self.embedding.as_ref(),
                    &self.vector_index,
                    input,
                )
                .await?;
                info!(results = outcome.len(), "supplier-list done");
                serde_json::to_value(&outcome)
                    .map_err(|e| SupplyError::Graph(format!("unserializable result: {}", e)))?
            }
        };
        Ok(value)
    }

    /// Parses and runs a model tool call.
    pub async fn call(&self, call: &ToolCall) -> Result<Value> {
        let invocation = ToolInvocation::parse(&call.name, &call.arguments)?;
        self.invoke(&invocation).await
    }
}
