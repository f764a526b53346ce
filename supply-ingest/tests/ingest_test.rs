use std::io::Write;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use embedding::EmbeddingService;
use graph_store::{CypherStatement, GraphStore, Record};
use supply_ingest::{read_nodes, Ingestor, IngestReport};
use tempfile::NamedTempFile;

const NODES: &str = "\
id:ID,name,type,location,supply_capacity,description
S1,Acme Steel,Supplier,Berlin,1200,Structural steel
S2,Lumen,Supplier,Lyon,300,LED components
W1,Depot,Warehouse,,,
";

const RELATIONSHIPS: &str = "\
:START_ID,:END_ID,:TYPE,product
S1,W1,SUPPLIES,beams
S2,W1,SUPPLIES,
";

#[derive(Default)]
struct RecordingStore {
    writes: Mutex<Vec<CypherStatement>>,
    missing: Vec<Record>,
}

#[async_trait]
impl GraphStore for RecordingStore {
    async fn query(&self, _statement: &CypherStatement) -> anyhow::Result<Vec<Record>> {
        Ok(self.missing.clone())
    }

    async fn run(&self, statement: &CypherStatement) -> anyhow::Result<()> {
        self.writes.lock().unwrap().push(statement.clone());
        Ok(())
    }
}

#[derive(Default)]
struct CountingEmbedding {
    batches: Mutex<Vec<usize>>,
}

#[async_trait]
impl EmbeddingService for CountingEmbedding {
    async fn embed(&self, _text: &str) -> anyhow::Result<Vec<f32>> {
        Ok(vec![0.0; 3])
    }

    async fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
        self.batches.lock().unwrap().push(texts.len());
        Ok(texts.iter().map(|_| vec![0.0; 3]).collect())
    }
}

fn csv_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

/// **Test: Loading writes constraints, one MERGE per node and one per relationship**
#[tokio::test]
async fn test_load_csv_counts() {
    let (nodes, rels) = (csv_file(NODES), csv_file(RELATIONSHIPS));
    let store = Arc::new(RecordingStore::default());
    let ingestor = Ingestor::new(store.clone(), Arc::new(CountingEmbedding::default()));

    let report = ingestor.load_csv(nodes.path(), rels.path()).await.unwrap();

    assert_eq!(
        report,
        IngestReport {
            constraints: 5,
            nodes: 3,
            relationships: 2,
            embedded: 0
        }
    );
    let writes = store.writes.lock().unwrap();
    assert_eq!(writes.len(), 10);
    assert!(writes[7].text().contains("MERGE (n:Entity {id:$id}) SET n.name = $name"));
}

/// **Test: Re-running ingestion issues identical idempotent statements**
#[tokio::test]
async fn test_reingest_is_idempotent() {
    let (nodes, rels) = (csv_file(NODES), csv_file(RELATIONSHIPS));
    let store = Arc::new(RecordingStore::default());
    let ingestor = Ingestor::new(store.clone(), Arc::new(CountingEmbedding::default()));

    ingestor.load_csv(nodes.path(), rels.path()).await.unwrap();
    ingestor.load_csv(nodes.path(), rels.path()).await.unwrap();

    let writes = store.writes.lock().unwrap();
    let (first, second) = writes.split_at(writes.len() / 2);
    assert_eq!(first, second);
    for statement in first {
        let text = statement.text();
        assert!(
            text.contains("IF NOT EXISTS") || text.contains("MERGE"),
            "non-idempotent write: {}",
            text
        );
        assert!(!text.contains("CREATE ("));
    }
}

/// **Test: A bad capacity aborts before any write and names the line**
#[tokio::test]
async fn test_bad_capacity_fails() {
    let nodes = csv_file(
        "id:ID,name,type,location,supply_capacity,description\nS1,A,Supplier,Oslo,many,x\n",
    );
    let rels = csv_file(RELATIONSHIPS);
    let store = Arc::new(RecordingStore::default());
    let ingestor = Ingestor::new(store.clone(), Arc::new(CountingEmbedding::default()));

    let err = ingestor.load_csv(nodes.path(), rels.path()).await.unwrap_err();

    assert!(err.to_string().contains("line 2"));
}

/// **Test: Missing embeddings are filled in batches and counted**
#[tokio::test]
async fn test_embed_supplier_descriptions() {
    let missing = (0..70)
        .map(|i| {
            serde_json::json!({ "id": format!("S{}", i), "description": "steel" })
                .as_object()
                .unwrap()
                .clone()
        })
        .collect();
    let store = Arc::new(RecordingStore {
        missing,
        ..Default::default()
    });
    let embedding = Arc::new(CountingEmbedding::default());
    let ingestor = Ingestor::new(store.clone(), embedding.clone());

    let updated = ingestor.embed_supplier_descriptions().await.unwrap();

    assert_eq!(updated, 70);
    assert_eq!(*embedding.batches.lock().unwrap(), vec![64, 6]);
    let writes = store.writes.lock().unwrap();
    assert!(writes[0].text().contains("db.create.setNodeVectorProperty"));
}

/// **Test: Nothing to embed means no embedding calls**
#[tokio::test]
async fn test_embed_nothing_pending() {
    let embedding = Arc::new(CountingEmbedding::default());
    let ingestor = Ingestor::new(Arc::new(RecordingStore::default()), embedding.clone());

    assert_eq!(ingestor.embed_supplier_descriptions().await.unwrap(), 0);
    assert!(embedding.batches.lock().unwrap().is_empty());
}

/// **Test: Full run ends with the vector index**
#[tokio::test]
async fn test_run_creates_vector_index() {
    let (nodes, rels) = (csv_file(NODES), csv_file(RELATIONSHIPS));
    let store = Arc::new(RecordingStore::default());
    let ingestor = Ingestor::new(store.clone(), Arc::new(CountingEmbedding::default()));

    ingestor
        .run(nodes.path(), rels.path(), "supply_chain", 1536)
        .await
        .unwrap();

    let writes = store.writes.lock().unwrap();
    assert!(writes
        .last()
        .unwrap()
        .text()
        .starts_with("CREATE VECTOR INDEX `supply_chain` IF NOT EXISTS"));
}

/// **Test: Node rows keep their source line numbers**
#[test]
fn test_read_nodes_lines() {
    let nodes = csv_file(NODES);
    let rows = read_nodes(nodes.path()).unwrap();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].line, 2);
    assert_eq!(rows[2].node_type, "Warehouse");
    assert!(!rows[2].has_location());
}
