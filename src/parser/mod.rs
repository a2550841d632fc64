pub mod ast;

use crate::lexer::token::{Literal, Span, Token, TokenType};
use crate::type_info::{Kind, Type, TypeInfo};
use ast::*;
use multipeek::{multipeek, MultiPeek};
use thiserror::Error;

// <listing>     ::= <item>*
// <item>        ::= <declaration> | <use> | <call>
// <declaration> ::= <value-kind> <identifier> ( "=" <literal> )? ";"
//                 | "fn" <identifier> "(" <integer> ")" "->" <value-kind> ";"
// <value-kind>  ::= "int" | "str" | "int_or_str" | "undefined"
// <use>         ::= "use" <identifier> ";"
// <call>        ::= "call" <identifier> "(" ( <identifier> ( "," <identifier> )* )? ")" ";"
// <literal>     ::= "-"? <integer> | <string>

#[derive(Error, Debug)]
#[error("ParseError at {token:?}: {error}")]
pub struct ParseError {
    pub token: Token,
    #[source]
    pub error: ParseErrorType,
}

#[derive(Error, Debug, PartialEq)]
pub enum ParseErrorType {
    #[error("expected `{exp}`, got {got:?}")]
    Expected { exp: &'static str, got: String },

    #[error("function parameter count cannot be negative")]
    NegativeArity,

    #[error("function parameter count {0} exceeds the maximum of {}", u16::MAX)]
    ArityTooLarge(i64),

    #[error("integer literal does not fit in 64 bits")]
    IntegerOutOfRange,

    #[error("cannot initialize `{kind}` with a {literal} literal")]
    LiteralKindMismatch { kind: Kind, literal: &'static str },
}

pub type ParseResult<T> = Result<T, ParseError>;

pub struct Parser<'a> {
    input: &'a str,
    tokens: MultiPeek<<Vec<Token> as IntoIterator>::IntoIter>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str, tokens: Vec<Token>) -> Self {
        Self {
            input,
            tokens: multipeek(tokens.into_iter()),
        }
    }

    fn peek(&mut self) -> Option<&Token> {
        self.tokens.peek()
    }

    fn peek_token_type(&mut self) -> Option<&TokenType> {
        self.peek().map(|token| &token.tok_type)
    }

    fn peek_next_token_type(&mut self) -> Option<&TokenType> {
        self.tokens.peek_nth(1).map(|token| &token.tok_type)
    }

    fn advance(&mut self) -> Option<Token> {
        self.tokens.next()
    }

    fn match_(&mut self, tok_type: TokenType) -> bool {
        match self.peek() {
            Some(Token {
                tok_type: ttype, ..
            }) if *ttype == tok_type => {
                self.advance();
                true
            }
            _ => false,
        }
    }

    fn lexeme_at_current(&mut self) -> String {
        match self.peek() {
            Some(Token {
                tok_type: TokenType::EOF,
                ..
            })
            | None => String::from("<eof>"),
            Some(Token { span, .. }) => {
                let span = *span;
                self.input[span.0..span.1].to_string()
            }
        }
    }

    fn expected(&mut self, exp: &'static str) -> ParseError {
        let got = self.lexeme_at_current();
        self.error_at_current(ParseErrorType::Expected { exp, got })
    }

    fn consume(&mut self, tok_type: TokenType, exp: &'static str) -> ParseResult<Token> {
        match self.peek() {
            Some(Token { tok_type: tt, .. }) if *tt == tok_type => {
                Ok(self.advance().unwrap_or_else(|| unreachable!()))
            }
            _ => Err(self.expected(exp)),
        }
    }

    fn consume_identifier(&mut self) -> ParseResult<WithToken<String>> {
        match self.peek_token_type() {
            Some(TokenType::Identifier(ident)) => {
                let ident = ident.clone();
                let token = self.advance().unwrap_or_else(|| unreachable!());
                Ok(WithToken(ident, token))
            }
            _ => Err(self.expected("<identifier>")),
        }
    }

    fn error_at_current(&mut self, error: ParseErrorType) -> ParseError {
        if let Some(token) = self.advance() {
            ParseError { token, error }
        } else {
            let end = self.input.len();
            ParseError {
                token: Token {
                    span: Span(end, end),
                    line: 0,
                    tok_type: TokenType::EOF,
                },
                error,
            }
        }
    }
}

impl<'a> Parser<'a> {
    pub fn listing(&mut self) -> ParseResult<Listing> {
        let mut items = Vec::new();
        while !self.match_(TokenType::EOF) {
            if self.peek().is_none() {
                break;
            }
            items.push(self.item()?);
        }
        Ok(Listing(items))
    }

    fn item(&mut self) -> ParseResult<Item> {
        match self.peek_token_type() {
            Some(TokenType::KFn) => self.function_declaration(),
            Some(TokenType::KUse) => self.use_item(),
            Some(TokenType::KCall) => self.call_item(),
            _ => self.value_declaration(),
        }
    }

    fn value_kind(&mut self) -> ParseResult<Kind> {
        let kind = match self.peek_token_type() {
            Some(TokenType::KInt) => Kind::Int,
            Some(TokenType::KStr) => Kind::Str,
            Some(TokenType::KIntOrStr) => Kind::IntOrStr,
            Some(TokenType::KUndefined) => Kind::Undefined,
            _ => return Err(self.expected("int, str, int_or_str or undefined")),
        };
        self.advance();
        Ok(kind)
    }

    fn value_declaration(&mut self) -> ParseResult<Item> {
        let kind = self.value_kind()?;
        let name = self.consume_identifier()?;

        let ty = match kind {
            Kind::Int => Type::Int,
            Kind::Str => Type::Str,
            Kind::IntOrStr => Type::IntOrStr,
            _ => Type::Undefined,
        };
        let mut type_info = TypeInfo::new(ty);

        if self.match_(TokenType::Equal) {
            let literal = self.literal()?;
            type_info = match (kind, literal) {
                (Kind::Int | Kind::IntOrStr, WithToken(Value::Integer(n), _)) => {
                    type_info.with_int_val(n)
                }
                (Kind::Str | Kind::IntOrStr, WithToken(Value::String(s), _)) => {
                    type_info.with_string_val(s)
                }
                (kind, WithToken(value, token)) => {
                    let literal = match value {
                        Value::Integer(_) => "integer",
                        Value::String(_) => "string",
                    };
                    return Err(ParseError {
                        token,
                        error: ParseErrorType::LiteralKindMismatch { kind, literal },
                    });
                }
            };
        }

        self.consume(TokenType::Semicolon, ";")?;
        Ok(Item::Declaration { name, type_info })
    }

    fn function_declaration(&mut self) -> ParseResult<Item> {
        self.consume(TokenType::KFn, "fn")?;
        let name = self.consume_identifier()?;

        self.consume(TokenType::LParen, "(")?;
        let WithToken(arity, arity_token) = self.integer()?;
        let num_params = u16::try_from(arity).map_err(|_| ParseError {
            token: arity_token,
            error: if arity < 0 {
                ParseErrorType::NegativeArity
            } else {
                ParseErrorType::ArityTooLarge(arity)
            },
        })?;
        self.consume(TokenType::RParen, ")")?;

        self.consume(TokenType::Arrow, "->")?;
        let return_type = self.value_kind()?;
        self.consume(TokenType::Semicolon, ";")?;

        Ok(Item::Declaration {
            name,
            type_info: TypeInfo::new(Type::Function {
                num_params,
                return_type,
            }),
        })
    }

    fn use_item(&mut self) -> ParseResult<Item> {
        self.consume(TokenType::KUse, "use")?;
        let name = self.consume_identifier()?;
        self.consume(TokenType::Semicolon, ";")?;
        Ok(Item::Use(name))
    }

    fn call_item(&mut self) -> ParseResult<Item> {
        self.consume(TokenType::KCall, "call")?;
        let name = self.consume_identifier()?;
        self.consume(TokenType::LParen, "(")?;

        let mut args = Vec::new();
        if !self.match_(TokenType::RParen) {
            loop {
                args.push(self.consume_identifier()?);
                if !self.match_(TokenType::Comma) {
                    break;
                }
            }
            self.consume(TokenType::RParen, ")")?;
        }

        self.consume(TokenType::Semicolon, ";")?;
        Ok(Item::Call { name, args })
    }

    fn literal(&mut self) -> ParseResult<WithToken<Value>> {
        match self.peek_token_type() {
            Some(TokenType::Literal(Literal::String(string))) => {
                let string = string.clone();
                let token = self.advance().unwrap_or_else(|| unreachable!());
                Ok(WithToken(Value::String(string), token))
            }
            _ => self
                .integer()
                .map(|WithToken(n, token)| WithToken(Value::Integer(n), token)),
        }
    }

    /// Reads an integer literal with an optional leading `-`. The lexer only
    /// produces magnitudes, so `i64::MIN` is reachable here.
    fn integer(&mut self) -> ParseResult<WithToken<i64>> {
        let negate = matches!(self.peek_token_type(), Some(TokenType::Minus))
            && matches!(
                self.peek_next_token_type(),
                Some(TokenType::Literal(Literal::Integer(_)))
            );
        let minus = if negate { self.advance() } else { None };

        match self.peek_token_type() {
            Some(TokenType::Literal(Literal::Integer(magnitude))) => {
                let magnitude = *magnitude;
                let mut token = self.advance().unwrap_or_else(|| unreachable!());
                if let Some(minus) = minus {
                    token.span = Span(minus.span.0, token.span.1);
                }

                let value = if negate {
                    0i64.checked_sub_unsigned(magnitude)
                } else {
                    i64::try_from(magnitude).ok()
                };

                match value {
                    Some(n) => Ok(WithToken(n, token)),
                    None => Err(ParseError {
                        token,
                        error: ParseErrorType::IntegerOutOfRange,
                    }),
                }
            }
            _ => Err(self.expected("<integer>")),
        }
    }
}
