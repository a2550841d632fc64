#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Unsigned magnitude; the parser applies the sign.
    Integer(u64),
    String(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenType {
    Arrow,
    Comma,
    Equal,
    LParen,
    Minus,
    RParen,
    Semicolon,

    KCall,
    KFn,
    KInt,
    KIntOrStr,
    KStr,
    KUndefined,
    KUse,

    Literal(Literal),
    Identifier(String),

    Error,
    EOF,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span(pub usize, pub usize);

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub span: Span,
    pub line: usize,
    pub tok_type: TokenType,
}
