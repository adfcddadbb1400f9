//! Lexer for Brewin using logos with string interning.
//!
//! Source is line-oriented: every line becomes one `Statement`, blank and
//! comment-only lines included, so statement indices equal line indices.
//! Words are split on whitespace outside double quotes and classified
//! once here.

mod lex_error;

pub use lex_error::{LexError, LexErrorKind};

use brewin_ir::{
    BinaryOp, Keyword, LineNo, Literal, Program, Statement, StringInterner, Token, TokenVec,
};
use logos::Logos;

/// Raw words from logos (before classification).
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r]+")]
enum RawWord {
    #[regex(r"#[^\n]*")]
    Comment,

    #[regex(r##""[^"\n]*""##)]
    Str,

    #[regex(r##""[^"\n]*"##)]
    UnterminatedStr,

    #[regex(r##"[^ \t\r\n"#]+"##)]
    Word,
}

/// Lex a whole program and build its function table.
#[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
pub fn lex(source: &str, interner: &StringInterner) -> Result<Program, LexError> {
    let statements = source
        .lines()
        .enumerate()
        .map(|(index, text)| lex_line(text, LineNo::new(index), interner))
        .collect::<Result<Vec<_>, _>>()?;
    let program = Program::new(statements);
    tracing::debug!(
        statements = program.len(),
        functions = program.function_count(),
        "program loaded"
    );
    Ok(program)
}

/// Lex a single source line into a statement.
pub fn lex_line(text: &str, line: LineNo, interner: &StringInterner) -> Result<Statement, LexError> {
    let mut tokens = TokenVec::new();
    let mut lexer = RawWord::lexer(text);
    // End offset of the previous word; words must be separated by whitespace.
    let mut prev_end: Option<usize> = None;

    while let Some(raw) = lexer.next() {
        let span = lexer.span();
        let slice = lexer.slice();
        let error = |kind| LexError::new(line, kind);

        if prev_end == Some(span.start) && raw != Ok(RawWord::Comment) {
            let start = text[..span.start]
                .rfind([' ', '\t'])
                .map_or(0, |pos| pos + 1);
            return Err(error(LexErrorKind::MalformedToken(
                text[start..span.end].to_owned(),
            )));
        }
        prev_end = Some(span.end);

        let token = match raw {
            Ok(RawWord::Comment) => break,
            Ok(RawWord::Str) => Token::Literal(Literal::Str(slice[1..slice.len() - 1].to_owned())),
            Ok(RawWord::UnterminatedStr) => return Err(error(LexErrorKind::UnterminatedString)),
            Ok(RawWord::Word) => classify(slice, tokens.is_empty(), interner).map_err(error)?,
            Err(()) => return Err(error(LexErrorKind::MalformedToken(slice.to_owned()))),
        };
        tokens.push(token);
    }

    Ok(Statement::new(tokens))
}

/// Classify one unquoted word.
fn classify(word: &str, head: bool, interner: &StringInterner) -> Result<Token, LexErrorKind> {
    if head {
        if let Some(kw) = Keyword::from_word(word) {
            return Ok(Token::Keyword(kw));
        }
    }
    if let Some(op) = BinaryOp::from_symbol(word) {
        return Ok(Token::Operator(op));
    }
    match word {
        "True" => return Ok(Token::Literal(Literal::Bool(true))),
        "False" => return Ok(Token::Literal(Literal::Bool(false))),
        _ => {}
    }
    if is_integer(word) {
        return word
            .parse::<i64>()
            .map(|value| Token::Literal(Literal::Int(value)))
            .map_err(|_| LexErrorKind::IntegerOutOfRange(word.to_owned()));
    }
    if let Some((name, kind)) = word.split_once(':') {
        if !is_simple_name(name) || !is_simple_name(kind) {
            return Err(LexErrorKind::MalformedToken(word.to_owned()));
        }
        return Ok(Token::Param {
            name: interner.intern(name),
            kind: interner.intern(kind),
        });
    }
    if let Some((object, member)) = word.split_once('.') {
        if !is_simple_name(object) || !is_simple_name(member) {
            return Err(LexErrorKind::MalformedToken(word.to_owned()));
        }
        return Ok(Token::Member {
            object: interner.intern(object),
            member: interner.intern(member),
        });
    }
    Ok(Token::Identifier(interner.intern(word)))
}

/// `-?[0-9]+`
fn is_integer(word: &str) -> bool {
    let digits = word.strip_prefix('-').unwrap_or(word);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Non-empty and free of the separators `.` and `:`.
fn is_simple_name(part: &str) -> bool {
    !part.is_empty() && !part.contains(['.', ':'])
}
