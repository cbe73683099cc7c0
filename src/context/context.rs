use std::{collections::HashMap, rc::Rc};

use tracing::trace;

use crate::{
    errors::errors::{Error, ErrorImpl},
    types::types::{FunctionType, Type},
    Position,
};

/// A declared variable. Typed expressions that read it share this `Rc`, so
/// two references denote the same variable exactly when they are `ptr_eq`.
#[derive(Debug, PartialEq)]
pub struct Variable {
    pub name: String,
    pub read_only: bool,
    pub ty: Type,
}

impl Variable {
    pub fn new(name: &str, read_only: bool, ty: Type) -> Rc<Variable> {
        Rc::new(Variable {
            name: String::from(name),
            read_only,
            ty,
        })
    }
}

#[derive(Debug, PartialEq)]
pub struct Function {
    pub name: String,
    pub ty: FunctionType,
}

impl Function {
    pub fn new(name: &str, ty: FunctionType) -> Rc<Function> {
        Rc::new(Function {
            name: String::from(name),
            ty,
        })
    }

    pub fn as_type(&self) -> Type {
        Type::Function(self.ty.clone())
    }
}

/// What a name resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Variable(Rc<Variable>),
    Function(Rc<Function>),
    Type(Type),
}

/// How a child scope relates to its parent.
#[derive(Debug, Clone)]
pub enum ScopeKind {
    /// Inherits the loop flag and enclosing function.
    Block,
    /// A loop body: `break` becomes valid.
    Loop,
    /// A function body: leaves any enclosing loop and records the function
    /// that `return` checks against.
    Function(Rc<Function>),
}

#[derive(Debug)]
pub struct Scope {
    locals: HashMap<String, Entity>,
    in_loop: bool,
    function: Option<Rc<Function>>,
}

impl Scope {
    fn root() -> Self {
        Scope {
            locals: HashMap::new(),
            in_loop: false,
            function: None,
        }
    }

    fn child(&self, kind: ScopeKind) -> Self {
        let (in_loop, function) = match kind {
            ScopeKind::Block => (self.in_loop, self.function.clone()),
            ScopeKind::Loop => (true, self.function.clone()),
            ScopeKind::Function(function) => (false, Some(function)),
        };

        Scope {
            locals: HashMap::new(),
            in_loop,
            function,
        }
    }
}

#[derive(Debug)]
pub struct Context {
    scopes: Vec<Scope>,
}

impl Default for Context {
    fn default() -> Self {
        Context::new()
    }
}

impl Context {
    pub fn new() -> Self {
        Context {
            scopes: vec![Scope::root()],
        }
    }

    fn current(&self) -> &Scope {
        // The root scope is never popped
        &self.scopes[self.scopes.len() - 1]
    }

    /// Binds `name` in the innermost scope. Shadowing an outer binding is fine.
    pub fn declare(&mut self, name: &str, entity: Entity, position: &Position) -> Result<(), Error> {
        let last = self.scopes.len() - 1;
        let scope = &mut self.scopes[last];

        if scope.locals.contains_key(name) {
            return Err(Error::new(
                ErrorImpl::DuplicateDeclaration {
                    name: String::from(name),
                },
                position.clone(),
            ));
        }

        trace!(name, depth = self.scopes.len(), "declared");
        self.scopes[last].locals.insert(String::from(name), entity);
        Ok(())
    }

    /// Binds `name` in the innermost scope, replacing any existing binding.
    /// Used to seed the root scope with the standard library.
    pub fn define(&mut self, name: &str, entity: Entity) {
        let last = self.scopes.len() - 1;
        self.scopes[last].locals.insert(String::from(name), entity);
    }

    /// Resolves `name`, searching from the innermost scope outwards.
    pub fn lookup(&self, name: &str, position: &Position) -> Result<Entity, Error> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.locals.get(name))
            .cloned()
            .ok_or_else(|| {
                Error::new(
                    ErrorImpl::UndeclaredIdentifier {
                        name: String::from(name),
                    },
                    position.clone(),
                )
            })
    }

    pub fn push(&mut self, kind: ScopeKind) {
        let child = self.current().child(kind);
        self.scopes.push(child);
        trace!(depth = self.scopes.len(), "entered scope");
    }

    pub fn pop(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
            trace!(depth = self.scopes.len(), "left scope");
        }
    }

    pub fn in_loop(&self) -> bool {
        self.current().in_loop
    }

    pub fn function(&self) -> Option<&Rc<Function>> {
        self.current().function.as_ref()
    }

    /// Number of open scopes, including the root.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}
