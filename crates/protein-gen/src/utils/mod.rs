pub mod loader;
pub mod source;

pub use loader::DocumentLoader;
pub use source::DocumentSource;
