pub(crate) mod identifiers;
pub(crate) mod resolver;
pub(crate) mod tables;

pub(crate) use resolver::NamingResolver;
