//! The `lex` command: show how a file splits into statements and tokens.

use brewin_ir::{Literal, Statement, StringInterner, Token};

use super::read_file;

/// Lex a file and display its statements.
pub fn lex_file(path: &str) {
    let content = read_file(path);
    let interner = StringInterner::new();
    let program = match brewin_lexer::lex(&content, &interner) {
        Ok(program) => program,
        Err(err) => {
            eprintln!("error in '{path}': {err}");
            std::process::exit(1);
        }
    };

    println!(
        "Statements for '{path}' ({} lines, {} functions):",
        program.len(),
        program.function_count()
    );
    for (line, stmt) in program.statements() {
        if !stmt.is_empty() {
            println!("  {line:>4}: {}", render_statement(stmt, &interner));
        }
    }
}

/// One bracketed entry per token, e.g. `[kw func] [id main] [id void]`.
pub fn render_statement(stmt: &Statement, interner: &StringInterner) -> String {
    stmt.tokens()
        .iter()
        .map(|token| match token {
            Token::Keyword(kw) => format!("[kw {kw}]"),
            Token::Literal(Literal::Int(n)) => format!("[int {n}]"),
            Token::Literal(Literal::Str(s)) => format!("[str {s:?}]"),
            Token::Literal(Literal::Bool(b)) => format!("[bool {b}]"),
            Token::Identifier(name) => format!("[id {}]", interner.lookup(*name)),
            Token::Member { object, member } => format!(
                "[member {}.{}]",
                interner.lookup(*object),
                interner.lookup(*member)
            ),
            Token::Operator(op) => format!("[op {op}]"),
            Token::Param { name, kind } => format!(
                "[param {}:{}]",
                interner.lookup(*name),
                interner.lookup(*kind)
            ),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
