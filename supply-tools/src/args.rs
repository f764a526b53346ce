//! Tool argument types and their JSON schemas.
//!
//! Every filter field is optional: a missing field and an explicit `null` both mean "no filter".

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Attribute a count can be grouped by. Spliced into the query text, so the set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupingKey {
    SupplyCapacity,
    Location,
}

impl GroupingKey {
    /// Property name on `Supplier`, also used as the result column name.
    pub fn as_str(self) -> &'static str {
        match self {
            GroupingKey::SupplyCapacity => "supply_capacity",
            GroupingKey::Location => "location",
        }
    }
}

/// Ordering of the filtered supplier listing. `supply_capacity` is the only supported key;
/// anything else fails deserialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    SupplyCapacity,
}

/// Arguments of `supplier-count`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierCountInput {
    /// Minimum supply amount of the suppliers (inclusive).
    pub min_supply_amount: Option<i64>,
    /// Maximum supply amount of the suppliers (inclusive).
    pub max_supply_amount: Option<i64>,
    /// The key to group the aggregation by.
    pub grouping_key: Option<GroupingKey>,
}

impl SupplierCountInput {
    pub fn schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "min_supply_amount": {
                    "type": "integer",
                    "description": "Minimum supply amount of the suppliers"
                },
                "max_supply_amount": {
                    "type": "integer",
                    "description": "Maximum supply amount of the suppliers"
                },
                "grouping_key": {
                    "type": "string",
                    "description": "The key to group by the aggregation",
                    "enum": ["supply_capacity", "location"]
                }
            }
        })
    }
}

/// Arguments of `supplier-list`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierListInput {
    /// How to sort suppliers; defaults to supply capacity.
    pub sort_by: Option<SortKey>,
    /// Number of suppliers to return from a similarity search.
    pub k: Option<usize>,
    /// Description of the suppliers, matched by embedding similarity.
    pub description: Option<String>,
    pub min_supply_amount: Option<i64>,
    pub max_supply_amount: Option<i64>,
}

impl SupplierListInput {
    pub fn sort_key(&self) -> SortKey {
        self.sort_by.unwrap_or_default()
    }

    pub fn k(&self) -> usize {
        self.k.unwrap_or(crate::list::DEFAULT_K)
    }

    /// The description, if it has any non-whitespace text.
    pub fn description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }

    pub fn has_capacity_bounds(&self) -> bool {
        self.min_supply_amount.is_some() || self.max_supply_amount.is_some()
    }

    /// Value checks serde cannot express.
    pub fn validate(&self) -> Result<(), String> {
        match self.k {
            Some(0) => Err("k must be at least 1".to_string()),
            Some(k) if k > crate::list::MAX_K => {
                Err(format!("k must be at most {}", crate::list::MAX_K))
            }
            _ => Ok(()),
        }
    }

    pub fn schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "sort_by": {
                    "type": "string",
                    "description": "How to sort Suppliers by supply capacity",
                    "enum": ["supply_capacity"]
                },
                "k": {
                    "type": "integer",
                    "description": "Number of Suppliers to return",
                    "default": crate::list::DEFAULT_K,
                    "minimum": 1,
                    "maximum": crate::list::MAX_K
                },
                "description": {
                    "type": "string",
                    "description": "Description of the Suppliers"
                },
                "min_supply_amount": {
                    "type": "integer",
                    "description": "Minimum supply amount of the suppliers"
                },
                "max_supply_amount": {
                    "type": "integer",
                    "description": "Maximum supply amount of the suppliers"
                }
            }
        })
    }
}
