use checker::{CheckReport, Checker};
use parser::Parser;

pub mod checker;
pub mod lexer;
pub mod parser;
pub mod symbol_table;
pub mod type_info;

pub use symbol_table::{SymbolTable, SymbolTableEntry};
pub use type_info::{Kind, RawTypeInfo, Type, TypeInfo};

/// Lexes, parses and checks a declaration listing. Lexer and parser errors
/// abort; semantic problems are collected in the returned report.
pub fn check(input: &str) -> anyhow::Result<CheckReport> {
    let tokens = lexer::Lexer::new(input).tokenize()?;
    tracing::trace!(count = tokens.len(), "lexed listing");

    let listing = Parser::new(input, tokens).listing()?;
    tracing::trace!(items = listing.0.len(), "parsed listing");

    Ok(Checker::new().check_listing(listing))
}
