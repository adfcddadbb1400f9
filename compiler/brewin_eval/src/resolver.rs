//! Control-flow resolution.
//!
//! Block delimiters are matched by scanning forward from the opener and
//! counting nesting depth. Nothing is precomputed: the statement table is
//! the only structure, and a scan happens each time a jump is needed.

use brewin_ir::{Keyword, LineNo, Program};

use crate::errors::{unmatched_block, EvalResult};

/// Targets of an `if` statement.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BranchTargets {
    /// The `else` of this `if`, if it has one.
    pub else_line: Option<LineNo>,
    /// The matching `endif`.
    pub end: LineNo,
}

/// Find the `endwhile` matching the `while` at `from`.
pub fn find_loop_end(program: &Program, from: LineNo) -> EvalResult<LineNo> {
    scan(program, from, Keyword::While, Keyword::EndWhile, None).map(|t| t.end)
}

/// Find the `else` (if any) and `endif` for the `if` at `from`.
///
/// Also usable from an `else`: the scan then finds the `endif` that
/// closes it.
pub fn find_branch(program: &Program, from: LineNo) -> EvalResult<BranchTargets> {
    scan(program, from, Keyword::If, Keyword::EndIf, Some(Keyword::Else))
}

/// Find the `endlambda` matching the `lambda` at `from`.
pub fn find_lambda_end(program: &Program, from: LineNo) -> EvalResult<LineNo> {
    scan(program, from, Keyword::Lambda, Keyword::EndLambda, None).map(|t| t.end)
}

fn scan(
    program: &Program,
    from: LineNo,
    open: Keyword,
    close: Keyword,
    branch: Option<Keyword>,
) -> EvalResult<BranchTargets> {
    let mut depth = 0usize;
    let mut else_line = None;
    for (line, stmt) in program.statements().skip(from.index() + 1) {
        let Some(keyword) = stmt.keyword() else {
            continue;
        };
        if keyword == open {
            depth += 1;
        } else if keyword == close {
            if depth == 0 {
                return Ok(BranchTargets {
                    else_line,
                    end: line,
                });
            }
            depth -= 1;
        } else if Some(keyword) == branch && depth == 0 && else_line.is_none() {
            else_line = Some(line);
        }
    }
    Err(unmatched_block(open))
}
