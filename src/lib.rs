pub mod formatting;
pub mod syntax;
