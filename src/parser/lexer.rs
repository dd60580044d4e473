//! Lexer for placement descriptors using logos

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
pub enum Token {
    // Physical sides
    #[token("top")]
    Top,
    #[token("bottom")]
    Bottom,
    #[token("left")]
    Left,
    #[token("right")]
    Right,
    #[token("center")]
    Center,

    // Logical sides
    #[token("start")]
    Start,
    #[token("end")]
    End,

    // Origin keywords
    #[token("auto")]
    Auto,
    #[token("overlap")]
    Overlap,

    // Transform functions
    #[token("none")]
    NoTransform,
    #[token("matrix")]
    Matrix,
    #[token("matrix3d")]
    Matrix3d,

    // Units
    #[token("px")]
    Px,

    // Delimiters
    #[token("(")]
    ParenOpen,
    #[token(")")]
    ParenClose,
    #[token(",")]
    Comma,
    #[token("-")]
    Minus,
    #[token("+")]
    Plus,

    // Literals - identifiers must come after keywords
    #[regex(r"([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    #[regex(r"[a-zA-Z_%][a-zA-Z0-9_%]*", |lex| lex.slice().to_string(), priority = 1)]
    Ident(String),
}

/// Lex input string into tokens with spans
///
/// Unrecognised input is surfaced as an identifier so the grammar rejects it
/// instead of silently skipping it.
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input).spanned().map(move |(tok, span)| match tok {
        Ok(t) => (t, span),
        Err(()) => (Token::Ident(input[span.clone()].to_string()), span),
    })
}
