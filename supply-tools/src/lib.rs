//! # supply-tools
//!
//! The two tools the assistant can call and the graph queries behind them.
//!
//! - [`count`]: `supplier-count`, an aggregate over `Supplier` nodes with optional capacity
//!   bounds and an optional grouping attribute.
//! - [`list`]: `supplier-list`, either a vector similarity search on the description or a
//!   capacity-filtered, ordered listing.
//! - [`tools`]: the closed set of tools ([`SupplyTool`]), argument parsing into
//!   [`ToolInvocation`] and execution through a [`ToolContext`].
//!
//! Builders are pure; execution logs the statement, its parameters and the response.

pub mod args;
pub mod count;
mod exec;
mod filter;
pub mod list;
pub mod tools;

pub use args::{GroupingKey, SortKey, SupplierCountInput, SupplierListInput};
pub use count::{build_count_query, run_supplier_count_query};
pub use list::{
    build_similarity_query, plan_list_query, run_supplier_list_query, ListOutcome, ListPlan,
    SimilarDocument, DEFAULT_K, FILTERED_LIMIT, MAX_K,
};
pub use tools::{SupplyTool, ToolContext, ToolInvocation};
