pub mod cleaner;
pub mod corpus;
pub mod discovery;
pub mod fixer;
pub mod walker;
