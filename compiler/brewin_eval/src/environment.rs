//! Environment for variable scoping in the interpreter.
//!
//! Each activation owns one `Environment`: a stack of block scopes whose
//! bottom entry is the activation's base scope. Scopes map names to
//! cells, so two scopes (or an object record) can hold the same cell.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use brewin_ir::{Name, TypeName};

use crate::value::{Cell, TypedValue, Value};

/// Error returned when assigning to a variable fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignError {
    /// Variable not found in any scope.
    Undefined,
    /// The cell's declared type differs from the value's type.
    TypeMismatch { expected: TypeName, got: TypeName },
}

/// Returned by [`Environment::declare`] when the innermost scope already
/// binds the name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AlreadyDeclared;

/// A single-threaded wrapper for reference-counted interior mutability.
///
/// Used for scopes, variable cells, and object records. Every shared
/// allocation in the interpreter goes through `LocalScope::new`.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    /// Whether both handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T: Default> Default for LocalScope<T> {
    fn default() -> Self {
        LocalScope::new(T::default())
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A single scope containing variable bindings.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    bindings: FxHashMap<Name, Cell>,
    /// Enclosing scope within the same activation.
    parent: Option<LocalScope<Scope>>,
}

impl Scope {
    pub fn new() -> Self {
        Scope::default()
    }

    pub fn with_parent(parent: LocalScope<Scope>) -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    /// Bind a name in this scope, replacing any existing binding.
    #[inline]
    pub fn define(&mut self, name: Name, cell: Cell) {
        self.bindings.insert(name, cell);
    }

    #[inline]
    pub fn has_local(&self, name: Name) -> bool {
        self.bindings.contains_key(&name)
    }

    /// Look up a cell, innermost scope first.
    pub fn lookup(&self, name: Name) -> Option<Cell> {
        if let Some(cell) = self.bindings.get(&name) {
            return Some(cell.clone());
        }
        self.parent.as_ref().and_then(|p| p.borrow().lookup(name))
    }
}

/// Scope stack of one activation.
pub struct Environment {
    /// Stack of scopes, with current scope at the top.
    scopes: Vec<LocalScope<Scope>>,
    /// Base scope (always at the bottom): parameters, captures, result slots.
    base: LocalScope<Scope>,
}

impl Environment {
    /// Create an environment with a fresh base scope.
    pub fn new() -> Self {
        let base = LocalScope::new(Scope::new());
        Environment {
            scopes: vec![base.clone()],
            base,
        }
    }

    /// Create an environment that shares this one's base scope.
    ///
    /// Used at the flat level, where every activation sees the same
    /// variables.
    #[must_use]
    pub fn child(&self) -> Self {
        let base = self.base.clone();
        Environment {
            scopes: vec![base.clone()],
            base,
        }
    }

    /// Enter a block scope.
    #[inline]
    pub fn push_scope(&mut self) {
        let parent = self.current_scope();
        self.scopes.push(LocalScope::new(Scope::with_parent(parent)));
    }

    /// Leave a block scope. The base scope is never popped.
    #[inline]
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    #[inline]
    fn current_scope(&self) -> LocalScope<Scope> {
        self.scopes.last().unwrap_or(&self.base).clone()
    }

    /// Declare a fresh variable in the innermost scope.
    ///
    /// Shadowing a variable from an enclosing scope is allowed.
    pub fn declare(&mut self, name: Name, value: TypedValue) -> Result<Cell, AlreadyDeclared> {
        let scope = self.current_scope();
        let mut scope = scope.borrow_mut();
        if scope.has_local(name) {
            return Err(AlreadyDeclared);
        }
        let cell = LocalScope::new(value);
        scope.define(name, cell.clone());
        Ok(cell)
    }

    /// Bind an existing cell in the base scope, replacing any prior binding.
    pub fn bind_base(&mut self, name: Name, cell: Cell) {
        self.base.borrow_mut().define(name, cell);
    }

    /// Look up a variable, innermost scope to base scope.
    #[inline]
    pub fn lookup(&self, name: Name) -> Option<Cell> {
        self.scopes
            .last()
            .unwrap_or(&self.base)
            .borrow()
            .lookup(name)
    }

    /// Assign to an existing variable, keeping its declared type.
    pub fn assign(&mut self, name: Name, value: Value) -> Result<(), AssignError> {
        let cell = self.lookup(name).ok_or(AssignError::Undefined)?;
        let mut slot = cell.borrow_mut();
        slot.set(value)
    }

    /// Assign without declarations: create the variable in the current
    /// scope if needed, and let its type follow the value.
    pub fn assign_dynamic(&mut self, name: Name, value: Value) {
        if let Some(cell) = self.lookup(name) {
            *cell.borrow_mut() = TypedValue::new(value);
        } else {
            self.current_scope()
                .borrow_mut()
                .define(name, LocalScope::new(TypedValue::new(value)));
        }
    }

    /// Snapshot every visible variable, innermost binding winning.
    ///
    /// Values are copied; object values still share their record.
    pub fn capture(&self) -> FxHashMap<Name, TypedValue> {
        fn collect(scope: &Scope, captures: &mut FxHashMap<Name, TypedValue>) {
            for (name, cell) in &scope.bindings {
                captures
                    .entry(*name)
                    .or_insert_with(|| cell.borrow().clone());
            }
            if let Some(parent) = &scope.parent {
                collect(&parent.borrow(), captures);
            }
        }
        let mut captures = FxHashMap::default();
        collect(&self.current_scope().borrow(), &mut captures);
        captures
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
