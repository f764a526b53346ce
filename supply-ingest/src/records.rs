//! CSV rows and the node-type to label mapping.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use supply_core::{Result, SupplyError};

/// Graph label of a node. Types outside the known five become [`NodeLabel::Entity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeLabel {
    Supplier,
    Manufacturer,
    Distributor,
    Retailer,
    Product,
    Entity,
}

impl NodeLabel {
    /// Labels that get a uniqueness constraint on `id`.
    pub const CONSTRAINED: [NodeLabel; 5] = [
        NodeLabel::Supplier,
        NodeLabel::Manufacturer,
        NodeLabel::Distributor,
        NodeLabel::Retailer,
        NodeLabel::Product,
    ];

    pub fn from_type(node_type: &str) -> Self {
        match node_type {
            "Supplier" => NodeLabel::Supplier,
            "Manufacturer" => NodeLabel::Manufacturer,
            "Distributor" => NodeLabel::Distributor,
            "Retailer" => NodeLabel::Retailer,
            "Product" => NodeLabel::Product,
            _ => NodeLabel::Entity,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeLabel::Supplier => "Supplier",
            NodeLabel::Manufacturer => "Manufacturer",
            NodeLabel::Distributor => "Distributor",
            NodeLabel::Retailer => "Retailer",
            NodeLabel::Product => "Product",
            NodeLabel::Entity => "Entity",
        }
    }
}

/// A row of the node file (`id:ID,name,type,location,supply_capacity,description`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NodeRecord {
    /// 1-based line in the source file, for error messages.
    #[serde(skip)]
    pub line: u64,
    #[serde(rename = "id:ID")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub supply_capacity: String,
    #[serde(default)]
    pub description: String,
}

impl NodeRecord {
    pub fn label(&self) -> NodeLabel {
        NodeLabel::from_type(&self.node_type)
    }

    /// Rows with a location carry the full attribute set; the rest only get a name.
    pub fn has_location(&self) -> bool {
        !self.location.trim().is_empty()
    }
}

/// A row of the relationship file (`:START_ID,:END_ID,:TYPE,product`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RelationshipRecord {
    #[serde(skip)]
    pub line: u64,
    #[serde(rename = ":START_ID")]
    pub start_id: String,
    #[serde(rename = ":END_ID")]
    pub end_id: String,
    #[serde(rename = ":TYPE")]
    pub rel_type: String,
    #[serde(default)]
    pub product: String,
}

impl RelationshipRecord {
    pub fn product(&self) -> Option<&str> {
        let product = self.product.trim();
        (!product.is_empty()).then_some(product)
    }
}

pub fn read_nodes(path: impl AsRef<Path>) -> Result<Vec<NodeRecord>> {
    read_csv(path.as_ref(), |record: &mut NodeRecord, line| record.line = line)
}

pub fn read_relationships(path: impl AsRef<Path>) -> Result<Vec<RelationshipRecord>> {
    read_csv(path.as_ref(), |record: &mut RelationshipRecord, line| {
        record.line = line
    })
}

fn read_csv<T, F>(path: &Path, mut set_line: F) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    F: FnMut(&mut T, u64),
{
    let fail = |e: csv::Error| SupplyError::Ingest(format!("{}: {}", path.display(), e));

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_path(path)
        .map_err(fail)?;
    let headers = reader.headers().map_err(fail)?.clone();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(fail)?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let mut row: T = record.deserialize(Some(&headers)).map_err(|e| {
            SupplyError::Ingest(format!("{}:{}: {}", path.display(), line, e))
        })?;
        set_line(&mut row, line);
        rows.push(row);
    }
    Ok(rows)
}
