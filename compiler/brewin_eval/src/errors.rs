//! Evaluation errors.
//!
//! Every error halts the run. Errors are created by the factory functions
//! below, then located (statement line) and given a backtrace by the
//! dispatch loop on the way out.

use brewin_ir::{BinaryOp, Keyword, LineNo, ReturnType, TypeName};
use std::fmt;

/// Result of evaluation.
pub type EvalResult<T> = Result<T, EvalError>;

/// Error category reported to the user.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorType {
    /// Unknown names, redeclarations, malformed headers or statements.
    Name,
    /// Operand, assignment, argument, and return type violations.
    Type,
    /// Unmatched block delimiters.
    Syntax,
    /// Arithmetic faults and call depth exhaustion.
    Fault,
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorType::Name => "name error",
            ErrorType::Type => "type error",
            ErrorType::Syntax => "syntax error",
            ErrorType::Fault => "runtime fault",
        })
    }
}

/// Structured error kinds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Names
    UndefinedVariable { name: String },
    UndefinedFunction { name: String },
    UndefinedMember { object: String, member: String },
    AlreadyDeclared { name: String },
    InvalidVariableName { text: String },
    ArityMismatch { name: String, expected: usize, got: usize },
    MalformedParameter { text: String },
    DuplicateParameter { name: String },
    InvalidReturnType { word: String },
    InvalidParamKind { word: String },
    MissingEntryPoint,
    UnknownStatement { word: String },
    KeywordUnavailable { keyword: Keyword, level: u8 },
    MissingOperands { keyword: Keyword },

    // Types
    BinaryTypeMismatch { left: TypeName, right: TypeName },
    InvalidBinaryOp { type_name: TypeName, op: BinaryOp },
    NonBoolCondition { got: TypeName },
    AssignTypeMismatch { name: String, expected: TypeName, got: TypeName },
    ArgumentTypeMismatch { param: String, expected: TypeName, got: TypeName },
    ReturnTypeMismatch { expected: ReturnType, got: TypeName },
    ValueReturnFromEntry,
    InvalidVarType { word: String },
    NotCallable { name: String, got: TypeName },
    NotAnObject { name: String, got: TypeName },
    InvalidIntegerText { text: String },
    MalformedExpression,

    // Structure
    UnmatchedBlock { opener: Keyword },
    UnexpectedCloser { closer: Keyword },

    // Faults
    DivisionByZero,
    ModuloByZero,
    IntegerOverflow { operation: BinaryOp },
    StackOverflow { depth: usize },
}

impl EvalErrorKind {
    /// The user-facing category.
    pub fn error_type(&self) -> ErrorType {
        match self {
            Self::UndefinedVariable { .. }
            | Self::UndefinedFunction { .. }
            | Self::UndefinedMember { .. }
            | Self::AlreadyDeclared { .. }
            | Self::InvalidVariableName { .. }
            | Self::ArityMismatch { .. }
            | Self::MalformedParameter { .. }
            | Self::DuplicateParameter { .. }
            | Self::InvalidReturnType { .. }
            | Self::InvalidParamKind { .. }
            | Self::MissingEntryPoint
            | Self::UnknownStatement { .. }
            | Self::KeywordUnavailable { .. }
            | Self::MissingOperands { .. } => ErrorType::Name,

            Self::BinaryTypeMismatch { .. }
            | Self::InvalidBinaryOp { .. }
            | Self::NonBoolCondition { .. }
            | Self::AssignTypeMismatch { .. }
            | Self::ArgumentTypeMismatch { .. }
            | Self::ReturnTypeMismatch { .. }
            | Self::ValueReturnFromEntry
            | Self::InvalidVarType { .. }
            | Self::NotCallable { .. }
            | Self::NotAnObject { .. }
            | Self::InvalidIntegerText { .. }
            | Self::MalformedExpression => ErrorType::Type,

            Self::UnmatchedBlock { .. } | Self::UnexpectedCloser { .. } => ErrorType::Syntax,

            Self::DivisionByZero
            | Self::ModuloByZero
            | Self::IntegerOverflow { .. }
            | Self::StackOverflow { .. } => ErrorType::Fault,
        }
    }
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Names
            Self::UndefinedVariable { name } => write!(f, "undefined variable `{name}`"),
            Self::UndefinedFunction { name } => write!(f, "undefined function `{name}`"),
            Self::UndefinedMember { object, member } => {
                write!(f, "object `{object}` has no member `{member}`")
            }
            Self::AlreadyDeclared { name } => {
                write!(f, "`{name}` is already declared in this scope")
            }
            Self::InvalidVariableName { text } => write!(f, "`{text}` is not a valid variable name"),
            Self::ArityMismatch {
                name,
                expected,
                got,
            } => write!(
                f,
                "`{name}` takes {expected} argument{}, got {got}",
                if *expected == 1 { "" } else { "s" }
            ),
            Self::MalformedParameter { text } => {
                write!(f, "malformed parameter `{text}`, expected `name:type`")
            }
            Self::DuplicateParameter { name } => write!(f, "duplicate parameter `{name}`"),
            Self::InvalidReturnType { word } => write!(f, "invalid return type `{word}`"),
            Self::InvalidParamKind { word } => write!(f, "invalid parameter type `{word}`"),
            Self::MissingEntryPoint => write!(f, "program has no `main` function"),
            Self::UnknownStatement { word } => write!(f, "unknown statement `{word}`"),
            Self::KeywordUnavailable { keyword, level } => {
                write!(f, "`{keyword}` is not available at level {level}")
            }
            Self::MissingOperands { keyword } => write!(f, "`{keyword}` is missing operands"),

            // Types
            Self::BinaryTypeMismatch { left, right } => {
                write!(f, "operands have different types: {left} and {right}")
            }
            Self::InvalidBinaryOp { type_name, op } => {
                write!(f, "operator `{op}` cannot be applied to {type_name}")
            }
            Self::NonBoolCondition { got } => write!(f, "condition must be bool, got {got}"),
            Self::AssignTypeMismatch {
                name,
                expected,
                got,
            } => write!(f, "cannot assign {got} to `{name}` of type {expected}"),
            Self::ArgumentTypeMismatch {
                param,
                expected,
                got,
            } => write!(f, "parameter `{param}` expects {expected}, got {got}"),
            Self::ReturnTypeMismatch { expected, got } => {
                write!(f, "function returns {expected}, got {got}")
            }
            Self::ValueReturnFromEntry => write!(f, "`main` cannot return a value"),
            Self::InvalidVarType { word } => write!(f, "unknown variable type `{word}`"),
            Self::NotCallable { name, got } => write!(f, "`{name}` is {got}, not a function"),
            Self::NotAnObject { name, got } => write!(f, "`{name}` is {got}, not an object"),
            Self::InvalidIntegerText { text } => write!(f, "cannot convert \"{text}\" to int"),
            Self::MalformedExpression => write!(f, "malformed expression"),

            // Structure
            Self::UnmatchedBlock { opener } => write!(f, "`{opener}` has no matching end"),
            Self::UnexpectedCloser { closer } => write!(f, "`{closer}` without an open block"),

            // Faults
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::ModuloByZero => write!(f, "modulo by zero"),
            Self::IntegerOverflow { operation } => write!(f, "integer overflow in `{operation}`"),
            Self::StackOverflow { depth } => {
                write!(f, "maximum call depth exceeded ({depth} activations)")
            }
        }
    }
}

/// A single frame in an evaluation backtrace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    /// Function name (`lambda` for closures).
    pub name: String,
    /// Header line of the function.
    pub line: LineNo,
}

/// Snapshot of the call stack at an error site, innermost first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        writeln!(f, "stack backtrace:")?;
        for (i, frame) in self.frames.iter().enumerate() {
            writeln!(f, "  {i}: {} (defined on line {})", frame.name, frame.line)?;
        }
        Ok(())
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Human-readable message, equal to `kind.to_string()`.
    pub message: String,
    /// Statement being executed when the error was raised.
    pub line: Option<LineNo>,
    /// Call stack at the error site.
    pub backtrace: Option<EvalBacktrace>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            line: None,
            backtrace: None,
        }
    }

    #[inline]
    pub fn error_type(&self) -> ErrorType {
        self.kind.error_type()
    }

    /// Attach the offending line, unless one is already set.
    #[must_use]
    pub fn at_line(mut self, line: LineNo) -> Self {
        self.line.get_or_insert(line);
        self
    }

    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        self.backtrace = Some(backtrace);
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error_type())?;
        if let Some(line) = self.line {
            write!(f, " on line {line}")?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for EvalError {}

// Name errors

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn undefined_function(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedFunction {
        name: name.to_string(),
    })
}

#[cold]
pub fn undefined_member(object: &str, member: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedMember {
        object: object.to_string(),
        member: member.to_string(),
    })
}

#[cold]
pub fn already_declared(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::AlreadyDeclared {
        name: name.to_string(),
    })
}

#[cold]
pub fn invalid_variable_name(text: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidVariableName {
        text: text.to_string(),
    })
}

#[cold]
pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

#[cold]
pub fn malformed_parameter(text: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MalformedParameter {
        text: text.to_string(),
    })
}

#[cold]
pub fn duplicate_parameter(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DuplicateParameter {
        name: name.to_string(),
    })
}

#[cold]
pub fn invalid_return_type(word: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidReturnType {
        word: word.to_string(),
    })
}

#[cold]
pub fn invalid_param_kind(word: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidParamKind {
        word: word.to_string(),
    })
}

#[cold]
pub fn missing_entry_point() -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingEntryPoint)
}

#[cold]
pub fn unknown_statement(word: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownStatement {
        word: word.to_string(),
    })
}

#[cold]
pub fn keyword_unavailable(keyword: Keyword, level: u8) -> EvalError {
    EvalError::from_kind(EvalErrorKind::KeywordUnavailable { keyword, level })
}

#[cold]
pub fn missing_operands(keyword: Keyword) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingOperands { keyword })
}

// Type errors

#[cold]
pub fn binary_type_mismatch(left: TypeName, right: TypeName) -> EvalError {
    EvalError::from_kind(EvalErrorKind::BinaryTypeMismatch { left, right })
}

#[cold]
pub fn invalid_binary_op(type_name: TypeName, op: BinaryOp) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidBinaryOp { type_name, op })
}

#[cold]
pub fn non_bool_condition(got: TypeName) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NonBoolCondition { got })
}

#[cold]
pub fn assign_type_mismatch(name: &str, expected: TypeName, got: TypeName) -> EvalError {
    EvalError::from_kind(EvalErrorKind::AssignTypeMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

#[cold]
pub fn argument_type_mismatch(param: &str, expected: TypeName, got: TypeName) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArgumentTypeMismatch {
        param: param.to_string(),
        expected,
        got,
    })
}

#[cold]
pub fn return_type_mismatch(expected: ReturnType, got: TypeName) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ReturnTypeMismatch { expected, got })
}

#[cold]
pub fn value_return_from_entry() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ValueReturnFromEntry)
}

#[cold]
pub fn invalid_var_type(word: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidVarType {
        word: word.to_string(),
    })
}

#[cold]
pub fn not_callable(name: &str, got: TypeName) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        name: name.to_string(),
        got,
    })
}

#[cold]
pub fn not_an_object(name: &str, got: TypeName) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotAnObject {
        name: name.to_string(),
        got,
    })
}

#[cold]
pub fn invalid_integer_text(text: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidIntegerText {
        text: text.to_string(),
    })
}

#[cold]
pub fn malformed_expression() -> EvalError {
    EvalError::from_kind(EvalErrorKind::MalformedExpression)
}

// Structure

#[cold]
pub fn unmatched_block(opener: Keyword) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnmatchedBlock { opener })
}

#[cold]
pub fn unexpected_closer(closer: Keyword) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnexpectedCloser { closer })
}

// Faults

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn modulo_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ModuloByZero)
}

#[cold]
pub fn integer_overflow(operation: BinaryOp) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow { operation })
}

#[cold]
pub fn stack_overflow(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { depth })
}
