pub mod token;

use lazy_static::lazy_static;
use std::collections::HashMap;
use std::str::Chars;
use thiserror::Error;
use token::{Literal, Span, Token, TokenType};

macro_rules! hash_map {
    ( $( $key: expr => $value: expr ),* $(,)? ) => {{
        let mut m = HashMap::new();
        $(
            m.insert($key, $value);
        )*
        m
    }}
}

lazy_static! {
    static ref KEYWORDS: HashMap<&'static str, TokenType> = hash_map! {
        "call"       => TokenType::KCall,
        "fn"         => TokenType::KFn,
        "int"        => TokenType::KInt,
        "int_or_str" => TokenType::KIntOrStr,
        "str"        => TokenType::KStr,
        "undefined"  => TokenType::KUndefined,
        "use"        => TokenType::KUse,
    };
}

const PUNCTUATORS: [char; 7] = [',', '(', ')', ';', '=', '-', '>'];

#[derive(Error, Debug)]
pub enum LexerErrorType {
    #[error("unexpected EOF")]
    UnexpectedEOF,

    #[error("invalid digit in integer literal: {0:?}")]
    InvalidDigit(char),

    #[error("integer literal out of range")]
    IntegerOverflow,

    #[error("invalid escape {0:?}")]
    InvalidEscape(char),

    #[error("expected start of token, found {0:?}")]
    UnexpectedChar(char),
}

#[derive(Error, Debug)]
#[error("LexerError at {token:?}: {error}")]
pub struct LexerError {
    pub token: Token,
    #[source]
    pub error: LexerErrorType,
}

pub type LexerResult = Result<Token, LexerError>;

pub struct Lexer<'a> {
    input_str: &'a str,
    input: Chars<'a>,
    line: usize,
    start: usize,
    current: usize,
    eof: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input_str: &'a str) -> Self {
        Self {
            input_str,
            input: input_str.chars(),
            line: 1,
            start: 0,
            current: 0,
            eof: false,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.clone().next()
    }

    fn peek_next(&self) -> Option<char> {
        let mut iter = self.input.clone();
        iter.next();
        iter.next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.input.next()?;
        self.current += c.len_utf8();
        Some(c)
    }

    fn make_token(&self, tok_type: TokenType) -> Token {
        Token {
            tok_type,
            span: Span(self.start, self.current),
            line: self.line,
        }
    }

    fn make_error(&self, error: LexerErrorType) -> LexerError {
        LexerError {
            token: self.make_token(TokenType::Error),
            error,
        }
    }

    fn skip_whitespace(&mut self) {
        loop {
            match self.peek() {
                Some('\r' | '\t' | ' ') => {
                    self.advance();
                }
                Some('\n') => {
                    self.line += 1;
                    self.advance();
                }
                Some('/') if self.peek_next() == Some('/') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            };
        }
    }

    fn get_lexeme(&self) -> &'a str {
        &self.input_str[self.start..self.current]
    }

    fn number(&mut self) -> LexerResult {
        while let Some(c) = self.peek() {
            if c.is_ascii_whitespace() || PUNCTUATORS.contains(&c) {
                break;
            }
            self.advance();
            if !c.is_ascii_digit() {
                return Err(self.make_error(LexerErrorType::InvalidDigit(c)));
            }
        }

        let int = self
            .get_lexeme()
            .parse::<u64>()
            .map_err(|_| self.make_error(LexerErrorType::IntegerOverflow))?;
        Ok(self.make_token(TokenType::Literal(Literal::Integer(int))))
    }

    fn read_escape(&mut self) -> Result<char, LexerError> {
        match self.advance() {
            Some('n') => Ok('\n'),
            Some('t') => Ok('\t'),
            Some('r') => Ok('\r'),
            Some('\\') => Ok('\\'),
            Some('"') => Ok('"'),
            Some('\'') => Ok('\''),
            Some(c) => Err(self.make_error(LexerErrorType::InvalidEscape(c))),
            None => Err(self.make_error(LexerErrorType::UnexpectedEOF)),
        }
    }

    fn string(&mut self) -> LexerResult {
        let mut string = String::new();
        loop {
            match self.advance() {
                None => return Err(self.make_error(LexerErrorType::UnexpectedEOF)),
                Some('"') => break,
                Some('\\') => string.push(self.read_escape()?),
                Some(c) => {
                    if c == '\n' {
                        self.line += 1;
                    }
                    string.push(c);
                }
            };
        }
        Ok(self.make_token(TokenType::Literal(Literal::String(string))))
    }

    fn identifier(&mut self) -> LexerResult {
        while let Some(c) = self.peek() {
            if c != '_' && !c.is_ascii_alphanumeric() {
                break;
            }
            self.advance();
        }
        let lexeme = self.get_lexeme();

        if let Some(ttype) = KEYWORDS.get(lexeme) {
            Ok(self.make_token(ttype.clone()))
        } else {
            Ok(self.make_token(TokenType::Identifier(lexeme.to_string())))
        }
    }
}

impl<'a> Lexer<'a> {
    /// Lexes the whole input. The trailing `EOF` token is kept so the parser
    /// always has something to point at.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexerError> {
        let mut tokens = Vec::new();
        while !self.eof {
            tokens.push(self.next_token()?);
        }
        Ok(tokens)
    }

    pub fn next_token(&mut self) -> LexerResult {
        self.skip_whitespace();

        self.start = self.current;
        let Some(c) = self.advance() else {
            self.eof = true;
            return Ok(self.make_token(TokenType::EOF));
        };

        match c {
            ',' => Ok(self.make_token(TokenType::Comma)),
            '(' => Ok(self.make_token(TokenType::LParen)),
            ')' => Ok(self.make_token(TokenType::RParen)),
            ';' => Ok(self.make_token(TokenType::Semicolon)),
            '=' => Ok(self.make_token(TokenType::Equal)),
            '-' => {
                if self.peek() == Some('>') {
                    self.advance();
                    Ok(self.make_token(TokenType::Arrow))
                } else {
                    Ok(self.make_token(TokenType::Minus))
                }
            }
            '"' => self.string(),

            c if c.is_ascii_digit() => self.number(),
            c if c == '_' || c.is_ascii_alphabetic() => self.identifier(),
            _ => Err(self.make_error(LexerErrorType::UnexpectedChar(c))),
        }
    }
}
