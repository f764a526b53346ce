//! Shared fakes: a mockall LLM, a canned graph store and a constant embedder.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use embedding::EmbeddingService;
use graph_store::{CypherStatement, GraphStore, Record};
use llm_client::LlmClient;
use mockall::mock;
use prompt::{ChatMessage, ToolCall, ToolSpec};
use supply_tools::ToolContext;

mock! {
    pub Llm {}

    #[async_trait]
    impl LlmClient for Llm {
        async fn get_llm_response_with_tools(
            &self,
            messages: Vec<ChatMessage>,
            tools: &[ToolSpec],
        ) -> anyhow::Result<ChatMessage>;
    }
}

/// A mock that replays `replies` in order, one per call.
pub fn scripted_llm(replies: Vec<ChatMessage>) -> MockLlm {
    let expected = replies.len();
    let mut queue = VecDeque::from(replies);
    let mut llm = MockLlm::new();
    llm.expect_get_llm_response_with_tools()
        .times(expected)
        .returning(move |_, _| Ok(queue.pop_front().unwrap()));
    llm
}

pub fn tool_reply(id: &str, name: &str, arguments: &str) -> ChatMessage {
    ChatMessage::assistant_with_tool_calls("", vec![ToolCall::new(id, name, arguments)])
}

/// Answers every query with the same rows; can be switched to fail.
#[derive(Default)]
pub struct CannedStore {
    rows: Vec<Record>,
    fail: bool,
    pub statements: Mutex<Vec<CypherStatement>>,
}

impl CannedStore {
    pub fn returning(rows: serde_json::Value) -> Self {
        Self {
            rows: rows
                .as_array()
                .unwrap()
                .iter()
                .map(|r| r.as_object().unwrap().clone())
                .collect(),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn count(&self) -> usize {
        self.statements.lock().unwrap().len()
    }
}

#[async_trait]
impl GraphStore for CannedStore {
    async fn query(&self, statement: &CypherStatement) -> anyhow::Result<Vec<Record>> {
        self.statements.lock().unwrap().push(statement.clone());
        if self.fail {
            anyhow::bail!("connection refused");
        }
        Ok(self.rows.clone())
    }

    async fn run(&self, statement: &CypherStatement) -> anyhow::Result<()> {
        self.statements.lock().unwrap().push(statement.clone());
        Ok(())
    }
}

pub struct ConstEmbedding;

#[async_trait]
impl EmbeddingService for ConstEmbedding {
    async fn embed(&self, _text: &str) -> anyhow::Result<Vec<f32>> {
        Ok(vec![1.0, 0.0])
    }

    async fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|_| vec![1.0, 0.0]).collect())
    }
}

pub fn tool_context(store: Arc<CannedStore>) -> ToolContext {
    ToolContext::new(store, Arc::new(ConstEmbedding), "supply_chain")
}
