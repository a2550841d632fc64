use crate::lexer::token::Token;
use crate::type_info::TypeInfo;

/// A value paired with the token it was read from, for error reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct WithToken<T>(pub T, pub Token);

impl<T> std::ops::Deref for WithToken<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Initializer value of a declaration, with any leading `-` applied.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    String(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Listing(pub Vec<Item>);

#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Declaration {
        name: WithToken<String>,
        type_info: TypeInfo,
    },
    Use(WithToken<String>),
    Call {
        name: WithToken<String>,
        args: Vec<WithToken<String>>,
    },
}
