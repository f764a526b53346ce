//! Recording fakes for the graph store and embedding service.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use embedding::EmbeddingService;
use graph_store::{CypherStatement, GraphStore, Record};

/// Records every statement and answers queries from a queue of canned row sets.
#[derive(Default)]
pub struct RecordingStore {
    pub statements: Mutex<Vec<CypherStatement>>,
    responses: Mutex<VecDeque<Vec<Record>>>,
}

impl RecordingStore {
    pub fn with_responses(responses: Vec<serde_json::Value>) -> Self {
        let queue = responses
            .into_iter()
            .map(|value| {
                value
                    .as_array()
                    .unwrap()
                    .iter()
                    .map(|row| row.as_object().unwrap().clone())
                    .collect()
            })
            .collect();
        Self {
            statements: Mutex::new(Vec::new()),
            responses: Mutex::new(queue),
        }
    }

    pub fn recorded(&self) -> Vec<CypherStatement> {
        self.statements.lock().unwrap().clone()
    }
}

#[async_trait]
impl GraphStore for RecordingStore {
    async fn query(&self, statement: &CypherStatement) -> anyhow::Result<Vec<Record>> {
        self.statements.lock().unwrap().push(statement.clone());
        Ok(self.responses.lock().unwrap().pop_front().unwrap_or_default())
    }

    async fn run(&self, statement: &CypherStatement) -> anyhow::Result<()> {
        self.statements.lock().unwrap().push(statement.clone());
        Ok(())
    }
}

/// Returns a fixed vector and remembers every text it embedded.
#[derive(Default)]
pub struct FakeEmbedding {
    pub texts: Mutex<Vec<String>>,
}

impl FakeEmbedding {
    pub const VECTOR: [f32; 3] = [0.1, 0.2, 0.3];

    pub fn embedded(&self) -> Vec<String> {
        self.texts.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmbeddingService for FakeEmbedding {
    async fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        self.texts.lock().unwrap().push(text.to_string());
        Ok(Self::VECTOR.to_vec())
    }

    async fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
        self.texts.lock().unwrap().extend(texts.iter().cloned());
        Ok(texts.iter().map(|_| Self::VECTOR.to_vec()).collect())
    }
}
