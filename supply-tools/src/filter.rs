//! Supply-capacity bounds shared by both supplier queries.

use graph_store::CypherStatement;

/// Inclusive bounds on `t.supply_capacity`. A bound is present when it is `Some`, zero included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct CapacityBounds {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl CapacityBounds {
    pub fn new(min: Option<i64>, max: Option<i64>) -> Self {
        Self { min, max }
    }

    /// `WHERE ...` clause (with trailing space) or an empty string when unbounded.
    pub fn where_clause(&self) -> String {
        let mut predicates = Vec::new();
        if self.min.is_some() {
            predicates.push("t.supply_capacity >= $min_supply_amount");
        }
        if self.max.is_some() {
            predicates.push("t.supply_capacity <= $max_supply_amount");
        }
        if predicates.is_empty() {
            String::new()
        } else {
            format!("WHERE {} ", predicates.join(" AND "))
        }
    }

    /// Binds the parameters referenced by [`Self::where_clause`].
    pub fn bind(&self, mut statement: CypherStatement) -> CypherStatement {
        if let Some(min) = self.min {
            statement = statement.with_param("min_supply_amount", min);
        }
        if let Some(max) = self.max {
            statement = statement.with_param("max_supply_amount", max);
        }
        statement
    }
}
