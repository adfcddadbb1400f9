//! Runtime values.
//!
//! `int`, `string` and `bool` are plain values copied on every read.
//! `func` and `object` are handles: a closure's capture snapshot and an
//! object's member record are shared by every copy of the handle.

use rustc_hash::FxHashMap;
use std::fmt;
use std::rc::Rc;

use brewin_ir::{LineNo, Literal, Name, TypeName};

use crate::environment::{AssignError, LocalScope};

/// A shared, mutable variable slot.
pub type Cell = LocalScope<TypedValue>;

impl LocalScope<TypedValue> {
    /// Copy of the current value.
    #[inline]
    pub fn read(&self) -> Value {
        self.borrow().value().clone()
    }

    #[inline]
    pub fn declared_type(&self) -> TypeName {
        self.borrow().ty()
    }
}

/// Create a cell holding `value`, typed by the value itself.
#[inline]
pub fn new_cell(value: Value) -> Cell {
    LocalScope::new(TypedValue::new(value))
}

#[derive(Clone)]
pub enum Value {
    Int(i64),
    Str(String),
    Bool(bool),
    Func(FuncValue),
    Object(ObjectRef),
}

impl Value {
    pub fn type_name(&self) -> TypeName {
        match self {
            Value::Int(_) => TypeName::Int,
            Value::Str(_) => TypeName::Str,
            Value::Bool(_) => TypeName::Bool,
            Value::Func(_) => TypeName::Func,
            Value::Object(_) => TypeName::Object,
        }
    }

    /// Initial value of a freshly declared variable.
    pub fn default_for(ty: TypeName) -> Self {
        match ty {
            TypeName::Int => Value::Int(0),
            TypeName::Str => Value::Str(String::new()),
            TypeName::Bool => Value::Bool(false),
            TypeName::Func => Value::Func(FuncValue::Unbound),
            TypeName::Object => Value::Object(ObjectRef::new()),
        }
    }

    pub fn from_literal(literal: &Literal) -> Self {
        match literal {
            Literal::Int(n) => Value::Int(*n),
            Literal::Str(s) => Value::Str(s.clone()),
            Literal::Bool(b) => Value::Bool(*b),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Func(a), Value::Func(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Func(func) => write!(f, "Func({func:?})"),
            Value::Object(obj) => write!(f, "Object({obj:?})"),
        }
    }
}

/// Output form used by `print`: strings unquoted, booleans capitalized.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Str(s) => f.write_str(s),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Func(FuncValue::Resolved { line, .. }) => write!(f, "<func line {line}>"),
            Value::Func(_) => f.write_str("<func>"),
            Value::Object(_) => f.write_str("<object>"),
        }
    }
}

/// A function value.
#[derive(Clone, Debug, PartialEq)]
pub enum FuncValue {
    /// Default of a `func` variable that was never assigned.
    Unbound,
    /// A function name not yet looked up in the function table.
    Named(Name),
    /// A header line, with a capture snapshot for closures.
    Resolved {
        line: LineNo,
        captures: Option<Captures>,
    },
}

/// Variables captured by a closure when its `lambda` statement ran.
#[derive(Clone)]
pub struct Captures(Rc<FxHashMap<Name, TypedValue>>);

impl Captures {
    pub fn new(snapshot: FxHashMap<Name, TypedValue>) -> Self {
        Captures(Rc::new(snapshot))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Name, &TypedValue)> {
        self.0.iter().map(|(name, value)| (*name, value))
    }
}

impl PartialEq for Captures {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Captures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Captures({} vars)", self.0.len())
    }
}

/// Member storage of an object.
#[derive(Default)]
pub struct ObjectRecord {
    members: FxHashMap<Name, Cell>,
}

/// Shared handle to an object record.
///
/// Copies of the handle (assignment, `object` parameters, captures) all
/// observe the same members.
#[derive(Clone)]
pub struct ObjectRef(LocalScope<ObjectRecord>);

impl ObjectRef {
    pub fn new() -> Self {
        ObjectRef(LocalScope::new(ObjectRecord::default()))
    }

    pub fn member(&self, name: Name) -> Option<Cell> {
        self.0.borrow().members.get(&name).cloned()
    }

    /// Write a member. The first write adds the member and fixes its type;
    /// later writes mutate the same cell in place.
    pub fn set_member(&self, name: Name, value: Value) -> Result<(), AssignError> {
        if let Some(cell) = self.member(name) {
            let mut slot = cell.borrow_mut();
            return slot.set(value);
        }
        self.0.borrow_mut().members.insert(name, new_cell(value));
        Ok(())
    }

    pub fn member_count(&self) -> usize {
        self.0.borrow().members.len()
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.0.ptr_eq(&other.0)
    }
}

impl Default for ObjectRef {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ObjectRef {
    // Members are not printed: records may refer to themselves.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectRef({} members)", self.member_count())
    }
}

/// A value together with the type its variable was declared with.
#[derive(Clone, Debug, PartialEq)]
pub struct TypedValue {
    value: Value,
    ty: TypeName,
}

impl TypedValue {
    /// Typed by the value's own runtime type.
    pub fn new(value: Value) -> Self {
        let ty = value.type_name();
        TypedValue { value, ty }
    }

    pub fn default_for(ty: TypeName) -> Self {
        TypedValue {
            value: Value::default_for(ty),
            ty,
        }
    }

    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    #[inline]
    pub fn ty(&self) -> TypeName {
        self.ty
    }

    /// Replace the value if its type matches the declared type. The cell
    /// is left unchanged on mismatch.
    pub fn set(&mut self, value: Value) -> Result<(), AssignError> {
        let got = value.type_name();
        if got != self.ty {
            return Err(AssignError::TypeMismatch {
                expected: self.ty,
                got,
            });
        }
        self.value = value;
        Ok(())
    }
}
