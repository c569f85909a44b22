mod document;
mod raw;

pub use document::{Dialect, RawDocument, SchemaLookup};
pub use raw::RawSchema;

#[cfg(test)]
mod tests;
