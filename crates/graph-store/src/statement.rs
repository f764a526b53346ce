//! Parameterized Cypher statements.

use std::collections::BTreeMap;

use serde::Serialize;

/// A bound parameter value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Text(String),
    Vector(Vec<f32>),
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

impl From<Vec<f32>> for ParamValue {
    fn from(v: Vec<f32>) -> Self {
        ParamValue::Vector(v)
    }
}

/// Query text plus its parameter map and the names of the columns it returns.
///
/// Parameters are kept in a `BTreeMap` so logs and tests see a stable order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CypherStatement {
    text: String,
    params: BTreeMap<String, ParamValue>,
    columns: Vec<String>,
}

impl CypherStatement {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Binds `$name` to `value`, replacing any earlier binding.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Declares the columns read back from each row, in order.
    pub fn returning<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn params(&self) -> &BTreeMap<String, ParamValue> {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Parameters rendered for logs. Vectors are summarised by dimension.
    pub fn params_for_log(&self) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = self
            .params
            .iter()
            .map(|(k, v)| {
                let shown = match v {
                    ParamValue::Vector(vec) => {
                        serde_json::Value::String(format!("<vector dim={}>", vec.len()))
                    }
                    other => serde_json::to_value(other).unwrap_or(serde_json::Value::Null),
                };
                (k.clone(), shown)
            })
            .collect();
        serde_json::Value::Object(map)
    }
}

/// Backtick-quotes a label, relationship type or index name for splicing into Cypher text.
/// Embedded backticks are doubled, which is Cypher's escape for quoted identifiers.
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_keeps_params_and_columns() {
        let stmt = CypherStatement::new("MATCH (t:Supplier) RETURN count(t) AS supplier_count")
            .with_param("min_supply_amount", 100)
            .returning(["supplier_count"]);

        assert_eq!(stmt.param("min_supply_amount"), Some(&ParamValue::Int(100)));
        assert_eq!(stmt.columns(), ["supplier_count".to_string()]);
    }

    #[test]
    fn log_view_hides_vectors() {
        let stmt = CypherStatement::new("RETURN 1")
            .with_param("embedding", vec![0.1_f32, 0.2, 0.3])
            .with_param("limit", 100);

        let logged = stmt.params_for_log();

        assert_eq!(logged["embedding"], "<vector dim=3>");
        assert_eq!(logged["limit"], 100);
    }

    #[test]
    fn quote_identifier_escapes_backticks() {
        assert_eq!(quote_identifier("SUPPLIES"), "`SUPPLIES`");
        assert_eq!(quote_identifier("a`b"), "`a``b`");
    }
}
