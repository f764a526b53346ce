//! Write statements issued during ingestion.
//!
//! Labels come from [`NodeLabel`]; relationship types and the index name come from data or
//! config and are always quoted.

use graph_store::{quote_identifier, CypherStatement};
use supply_core::{Result, SupplyError};

use crate::records::{NodeLabel, NodeRecord, RelationshipRecord};

pub fn unique_id_constraint(label: NodeLabel) -> CypherStatement {
    CypherStatement::new(format!(
        "CREATE CONSTRAINT IF NOT EXISTS FOR (n:{}) REQUIRE n.id IS UNIQUE",
        label.as_str()
    ))
}

/// `MERGE` on id. Rows with a location set all attributes; `supply_capacity` must then be an
/// integer.
pub fn node_upsert(node: &NodeRecord) -> Result<CypherStatement> {
    let label = node.label().as_str();

    if !node.has_location() {
        return Ok(
            CypherStatement::new(format!("MERGE (n:{label} {{id:$id}}) SET n.name = $name"))
                .with_param("id", node.id.as_str())
                .with_param("name", node.name.as_str()),
        );
    }

    let supply_capacity: i64 = node.supply_capacity.trim().parse().map_err(|_| {
        SupplyError::Ingest(format!(
            "line {}: supply_capacity {:?} of node {} is not an integer",
            node.line, node.supply_capacity, node.id
        ))
    })?;

    Ok(CypherStatement::new(format!(
        "MERGE (n:{label} {{id:$id}}) \
         SET n.name = $name, n.location = $location, \
         n.description = $description, n.supply_capacity = $supply_capacity"
    ))
    .with_param("id", node.id.as_str())
    .with_param("name", node.name.as_str())
    .with_param("location", node.location.as_str())
    .with_param("description", node.description.as_str())
    .with_param("supply_capacity", supply_capacity))
}

/// `MERGE` of a typed edge between two existing nodes, keyed on `product` when there is one.
pub fn relationship_upsert(rel: &RelationshipRecord) -> Result<CypherStatement> {
    let rel_type = rel.rel_type.trim();
    if rel_type.is_empty() {
        return Err(SupplyError::Ingest(format!(
            "line {}: relationship {} -> {} has no type",
            rel.line, rel.start_id, rel.end_id
        )));
    }
    let rel_type = quote_identifier(rel_type);

    let matched = "MATCH (source {id:$start_id}) MATCH (target {id:$end_id}) ";
    let statement = match rel.product() {
        Some(product) => CypherStatement::new(format!(
            "{matched}MERGE (source)-[r:{rel_type} {{product:$product}}]->(target)"
        ))
        .with_param("product", product),
        None => CypherStatement::new(format!("{matched}MERGE (source)-[r:{rel_type}]->(target)")),
    };

    Ok(statement
        .with_param("start_id", rel.start_id.as_str())
        .with_param("end_id", rel.end_id.as_str()))
}

/// Cosine vector index over `Supplier.embedding`.
pub fn vector_index(index_name: &str, dimensions: usize) -> CypherStatement {
    CypherStatement::new(format!(
        "CREATE VECTOR INDEX {} IF NOT EXISTS FOR (t:Supplier) ON (t.embedding) \
         OPTIONS {{indexConfig: {{`vector.dimensions`: {dimensions}, \
         `vector.similarity_function`: 'cosine'}}}}",
        quote_identifier(index_name)
    ))
}

/// Suppliers that have a description but no embedding yet.
pub fn suppliers_missing_embedding() -> CypherStatement {
    CypherStatement::new(
        "MATCH (t:Supplier) \
         WHERE t.embedding IS NULL AND t.description IS NOT NULL AND trim(t.description) <> '' \
         RETURN t.id AS id, t.description AS description",
    )
    .returning(["id", "description"])
}

pub fn set_supplier_embedding(id: &str, embedding: Vec<f32>) -> CypherStatement {
    CypherStatement::new(
        "MATCH (t:Supplier {id:$id}) \
         CALL db.create.setNodeVectorProperty(t, 'embedding', $embedding)",
    )
    .with_param("id", id)
    .with_param("embedding", embedding)
}
