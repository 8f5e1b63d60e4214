//! HTTP gateway for the budget status integration.

pub mod budget_gateway;

pub use budget_gateway::*;
