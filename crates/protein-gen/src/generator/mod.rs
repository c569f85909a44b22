pub mod artifacts;
pub mod ast;
pub(crate) mod codegen;
pub mod config;
pub mod errors;
pub(crate) mod links;
pub mod metrics;
pub mod model;
pub(crate) mod naming;
pub(crate) mod normalizer;
pub mod orchestrator;
pub(crate) mod resolver;
pub mod schema;
pub mod sink;
pub mod tracking;
pub(crate) mod traversal;
