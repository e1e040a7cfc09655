//! Kotlin lexer for the subset the extractor reads.
//!
//! Built on [`logos`]. Whitespace and comments are skipped; everything the
//! extractor does not interpret (operators inside default values and member
//! bodies) is still tokenized so bodies can be skipped by balancing
//! delimiters.

use logos::Logos;

/// Byte-offset span within source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// Kotlin block comments nest.
fn block_comment<'s>(lex: &mut logos::Lexer<'s, Token<'s>>) -> logos::FilterResult<(), ()> {
    let bytes = lex.remainder().as_bytes();
    let mut depth: u32 = 1;
    let mut i = 0;
    while i < bytes.len() {
        if i + 1 < bytes.len() && bytes[i] == b'/' && bytes[i + 1] == b'*' {
            depth += 1;
            i += 2;
        } else if i + 1 < bytes.len() && bytes[i] == b'*' && bytes[i + 1] == b'/' {
            depth -= 1;
            if depth == 0 {
                lex.bump(i + 2);
                return logos::FilterResult::Skip;
            }
            i += 2;
        } else {
            i += 1;
        }
    }
    lex.bump(bytes.len());
    logos::FilterResult::Error(())
}

/// `"""` raw strings run to the next `"""`.
fn raw_string<'s>(lex: &mut logos::Lexer<'s, Token<'s>>) -> Option<&'s str> {
    let remainder = lex.remainder();
    let end = remainder.find("\"\"\"")?;
    lex.bump(end + 3);
    Some(&remainder[..end])
}

fn quoted_ident<'s>(lex: &mut logos::Lexer<'s, Token<'s>>) -> &'s str {
    let slice = lex.slice();
    &slice[1..slice.len() - 1]
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token<'src> {
    #[token("package")]
    Package,
    #[token("import")]
    Import,
    #[token("as")]
    As,
    #[token("interface")]
    Interface,
    #[token("class")]
    Class,
    #[token("object")]
    Object,
    #[token("fun")]
    Fun,
    #[token("val")]
    Val,
    #[token("var")]
    Var,
    #[token("vararg")]
    Vararg,
    #[token("true")]
    True,
    #[token("false")]
    False,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident(&'src str),
    #[regex(r"`[^`\n]+`", quoted_ident)]
    QuotedIdent(&'src str),

    /// A regular string literal, quotes included.
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    Str(&'src str),
    /// A raw string's content, without the quotes.
    #[token("\"\"\"", raw_string)]
    RawStr(&'src str),
    #[regex(r"'([^'\\\n]|\\.)+'")]
    Char(&'src str),
    #[regex(r"[0-9][0-9A-Za-z_]*(\.[0-9][0-9A-Za-z_]*)?")]
    Number(&'src str),

    #[token("@")]
    At,
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(";")]
    Semi,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("?")]
    Question,
    #[token("*")]
    Star,
    #[token("=")]
    Eq,
    #[token("->")]
    Arrow,
    /// Any other operator character; only meaningful inside skipped code.
    #[regex(r"[+\-/%&|!^~$#]")]
    Op(&'src str),

    #[regex(r"//[^\n]*", logos::skip)]
    #[regex(r"/\*", block_comment)]
    Comment,
}

impl std::fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Ident(s) | Token::QuotedIdent(s) => write!(f, "`{}`", s),
            Token::Str(s) => write!(f, "string {}", s),
            Token::RawStr(_) => f.write_str("raw string"),
            Token::Char(s) | Token::Number(s) | Token::Op(s) => write!(f, "`{}`", s),
            other => {
                let text = match other {
                    Token::Package => "package",
                    Token::Import => "import",
                    Token::As => "as",
                    Token::Interface => "interface",
                    Token::Class => "class",
                    Token::Object => "object",
                    Token::Fun => "fun",
                    Token::Val => "val",
                    Token::Var => "var",
                    Token::Vararg => "vararg",
                    Token::True => "true",
                    Token::False => "false",
                    Token::At => "@",
                    Token::Dot => ".",
                    Token::Comma => ",",
                    Token::Colon => ":",
                    Token::Semi => ";",
                    Token::LParen => "(",
                    Token::RParen => ")",
                    Token::LBrace => "{",
                    Token::RBrace => "}",
                    Token::LBracket => "[",
                    Token::RBracket => "]",
                    Token::Lt => "<",
                    Token::Gt => ">",
                    Token::Question => "?",
                    Token::Star => "*",
                    Token::Eq => "=",
                    Token::Arrow => "->",
                    _ => "comment",
                };
                write!(f, "`{}`", text)
            }
        }
    }
}

/// A token with its span and whether a line break precedes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spanned<'src> {
    pub token: Token<'src>,
    pub span: Span,
    pub newline_before: bool,
}

/// Lex `source`, failing at the first byte no token matches.
pub fn lex(source: &str) -> Result<Vec<Spanned<'_>>, Span> {
    let mut out = Vec::new();
    let mut last_end = 0;
    for (result, span) in Token::lexer(source).spanned() {
        let span = Span {
            start: span.start,
            end: span.end,
        };
        let token = result.map_err(|()| span)?;
        let newline_before = source[last_end..span.start].contains('\n');
        last_end = span.end;
        out.push(Spanned {
            token,
            span,
            newline_before,
        });
    }
    Ok(out)
}

/// 1-based line and column of a byte offset.
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let column = match before.rfind('\n') {
        Some(pos) => before[pos + 1..].chars().count() + 1,
        None => before.chars().count() + 1,
    };
    (line, column)
}
