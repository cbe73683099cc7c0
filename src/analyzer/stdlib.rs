//! Standard library definitions.
//!
//! A [`Stdlib`] is the set of names bound in the root scope before any user
//! declaration is analyzed. The analyzer takes it as configuration, so
//! embedders can extend or replace it.

use crate::{
    context::context::{Entity, Function, Variable},
    types::types::{BasicType, FunctionType, Type},
};

#[derive(Debug, Clone, Default)]
pub struct Stdlib {
    entries: Vec<(String, Entity)>,
}

impl Stdlib {
    /// A standard library with nothing in it, not even the basic type names.
    pub fn empty() -> Self {
        Stdlib::default()
    }

    /// The basic type names plus `pi`, `print`, `sin`, `cos`, `exp`, `ln`,
    /// `hypot` and `bytes`.
    pub fn standard() -> Self {
        let float_to_float = FunctionType::new(vec![Type::FLOAT], Type::FLOAT);

        let mut stdlib = Stdlib::empty();
        for basic in BasicType::ALL {
            stdlib = stdlib.with_type(basic.name(), Type::Basic(basic));
        }

        stdlib
            .with_variable("pi", true, Type::FLOAT)
            .with_function("print", FunctionType::new(vec![Type::ANY], Type::VOID))
            .with_function("sin", float_to_float.clone())
            .with_function("cos", float_to_float.clone())
            .with_function("exp", float_to_float.clone())
            .with_function("ln", float_to_float)
            .with_function(
                "hypot",
                FunctionType::new(vec![Type::FLOAT, Type::FLOAT], Type::FLOAT),
            )
            .with_function(
                "bytes",
                FunctionType::new(vec![Type::STRING], Type::array(Type::INT)),
            )
    }

    /// Binds `name` to `entity`, replacing any earlier binding of that name.
    pub fn with(mut self, name: &str, entity: Entity) -> Self {
        self.entries.retain(|(existing, _)| existing != name);
        self.entries.push((String::from(name), entity));
        self
    }

    pub fn with_type(self, name: &str, ty: Type) -> Self {
        self.with(name, Entity::Type(ty))
    }

    pub fn with_variable(self, name: &str, read_only: bool, ty: Type) -> Self {
        self.with(name, Entity::Variable(Variable::new(name, read_only, ty)))
    }

    pub fn with_function(self, name: &str, ty: FunctionType) -> Self {
        self.with(name, Entity::Function(Function::new(name, ty)))
    }

    pub fn get(&self, name: &str) -> Option<&Entity> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, entity)| entity)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &Entity)> {
        self.entries
            .iter()
            .map(|(name, entity)| (name.as_str(), entity))
    }
}
