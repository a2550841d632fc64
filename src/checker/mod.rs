use ordermap::OrderMap;
use thiserror::Error;

use crate::{
    lexer::token::Token,
    parser::ast::{Item, Listing, WithToken},
    symbol_table::{SymbolTable, SymbolTableEntry},
    type_info::{Type, TypeInfo},
};

#[derive(Debug, Error, Clone, PartialEq)]
#[error("Check error at {token:?}: {kind}")]
pub struct CheckError {
    pub token: Token,
    #[source]
    pub kind: CheckErrorKind,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CheckErrorKind {
    #[error("duplicate declaration of `{name}` (first declared on line {})", .prev.line)]
    DuplicateDeclaration { name: String, prev: Token },

    #[error("use of undeclared identifier `{0}`")]
    UndeclaredIdentifier(String),

    #[error("`{name}` has type `{ty}` and cannot be called")]
    NotCallable { name: String, ty: Type },

    #[error("function `{name}` called with wrong number of arguments; expected {expected}, got {got}")]
    WrongNumberOfArgs {
        name: String,
        expected: usize,
        got: usize,
    },
}

/// Where a symbol was first declared and how often it was referenced.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolUsage {
    pub declared_at: Token,
    pub uses: usize,
}

#[derive(Debug)]
pub struct CheckReport {
    pub table: SymbolTable,
    pub diagnostics: Vec<CheckError>,
    /// Keyed in declaration order.
    pub symbols: OrderMap<String, SymbolUsage>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Records declarations into a [`SymbolTable`] and resolves references
/// against it, collecting a diagnostic for every violation.
pub struct Checker {
    symbol_table: SymbolTable,
    symbols: OrderMap<String, SymbolUsage>,
    diagnostics: Vec<CheckError>,
}

impl Default for Checker {
    fn default() -> Self {
        Self::new()
    }
}

impl Checker {
    pub fn new() -> Self {
        Self {
            symbol_table: SymbolTable::new(),
            symbols: OrderMap::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn check_listing(mut self, listing: Listing) -> CheckReport {
        for item in listing.0 {
            self.check_item(item);
        }

        tracing::debug!(
            symbols = self.symbol_table.len(),
            diagnostics = self.diagnostics.len(),
            "finished checking listing"
        );

        CheckReport {
            table: self.symbol_table,
            diagnostics: self.diagnostics,
            symbols: self.symbols,
        }
    }

    fn check_item(&mut self, item: Item) {
        match item {
            Item::Declaration { name, type_info } => self.declare(name, type_info),
            Item::Use(name) => {
                self.resolve(&name);
            }
            Item::Call { name, args } => self.check_call(name, args),
        }
    }

    fn report(&mut self, token: Token, kind: CheckErrorKind) {
        tracing::debug!(line = token.line, %kind, "diagnostic");
        self.diagnostics.push(CheckError { token, kind });
    }

    fn declare(&mut self, WithToken(name, token): WithToken<String>, type_info: TypeInfo) {
        let entry = SymbolTableEntry::new(name.clone(), type_info);

        if self.symbol_table.add_entry(entry) {
            self.symbols.insert(
                name,
                SymbolUsage {
                    declared_at: token,
                    uses: 0,
                },
            );
        } else {
            let prev = self
                .symbols
                .get(&name)
                .map(|usage| usage.declared_at.clone())
                .unwrap_or_else(|| token.clone());
            self.report(token, CheckErrorKind::DuplicateDeclaration { name, prev });
        }
    }

    /// Returns whether `name` is declared, reporting it otherwise.
    fn resolve(&mut self, name: &WithToken<String>) -> bool {
        if !self.symbol_table.find_entry(name) {
            self.report(
                name.1.clone(),
                CheckErrorKind::UndeclaredIdentifier(name.0.clone()),
            );
            return false;
        }

        if let Some(usage) = self.symbols.get_mut(name.as_str()) {
            usage.uses += 1;
        }
        true
    }

    fn check_call(&mut self, name: WithToken<String>, args: Vec<WithToken<String>>) {
        if self.resolve(&name) {
            if let Some(info) = self.symbol_table.type_info(&name) {
                let got = args.len();
                match info.ty {
                    Type::Function { num_params, .. } if usize::from(num_params) != got => {
                        self.report(
                            name.1.clone(),
                            CheckErrorKind::WrongNumberOfArgs {
                                name: name.0.clone(),
                                expected: usize::from(num_params),
                                got,
                            },
                        );
                    }
                    Type::Function { .. } => {}
                    ty => self.report(
                        name.1.clone(),
                        CheckErrorKind::NotCallable {
                            name: name.0.clone(),
                            ty,
                        },
                    ),
                }
            }
        }

        for arg in &args {
            self.resolve(arg);
        }
    }
}
