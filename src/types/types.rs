use std::fmt::Display;

use crate::errors::errors::ErrorImpl;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasicType {
    Int,
    Float,
    Str,
    Bool,
    Void,
    Any,
}

impl BasicType {
    /// The name the type is declared under in the root scope.
    pub fn name(&self) -> &'static str {
        match self {
            BasicType::Int => "int",
            BasicType::Float => "float",
            BasicType::Str => "string",
            BasicType::Bool => "bool",
            BasicType::Void => "void",
            BasicType::Any => "any",
        }
    }

    pub const ALL: [BasicType; 6] = [
        BasicType::Int,
        BasicType::Float,
        BasicType::Str,
        BasicType::Bool,
        BasicType::Void,
        BasicType::Any,
    ];
}

impl Display for BasicType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Index of a struct definition in a [`TypeTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StructId(pub usize);

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionType {
    pub parameters: Vec<Type>,
    pub return_type: Box<Type>,
}

impl FunctionType {
    pub fn new(parameters: Vec<Type>, return_type: Type) -> Self {
        FunctionType {
            parameters,
            return_type: Box::new(return_type),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Basic(BasicType),
    Struct(StructId),
    Array(Box<Type>),
    Function(FunctionType),
    /// Alternatives are deduplicated and keep first-seen order.
    Sum(Vec<Type>),
}

impl Type {
    pub const INT: Type = Type::Basic(BasicType::Int);
    pub const FLOAT: Type = Type::Basic(BasicType::Float);
    pub const STRING: Type = Type::Basic(BasicType::Str);
    pub const BOOL: Type = Type::Basic(BasicType::Bool);
    pub const VOID: Type = Type::Basic(BasicType::Void);
    pub const ANY: Type = Type::Basic(BasicType::Any);

    pub fn array(element: Type) -> Type {
        Type::Array(Box::new(element))
    }

    pub fn function(parameters: Vec<Type>, return_type: Type) -> Type {
        Type::Function(FunctionType::new(parameters, return_type))
    }

    /// Builds a sum type, dropping alternatives equivalent to an earlier one.
    /// Nested sums are kept as single alternatives.
    pub fn sum(alternatives: Vec<Type>) -> Type {
        let mut unique: Vec<Type> = Vec::with_capacity(alternatives.len());
        for alternative in alternatives {
            if !unique.iter().any(|seen| seen.equivalent(&alternative)) {
                unique.push(alternative);
            }
        }
        Type::Sum(unique)
    }

    /// `T?`, which is the sum `<T, void>`.
    pub fn optional(base: Type) -> Type {
        Type::sum(vec![base, Type::VOID])
    }

    /// The `T` of a `T?`: a two-alternative sum whose last alternative is void.
    pub fn optional_base(&self) -> Option<&Type> {
        match self {
            Type::Sum(alternatives) if alternatives.len() == 2 && alternatives[1] == Type::VOID => {
                Some(&alternatives[0])
            }
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Basic(BasicType::Int | BasicType::Float))
    }

    pub fn is_numeric_or_string(&self) -> bool {
        matches!(self, Type::Basic(BasicType::Int | BasicType::Float | BasicType::Str))
    }

    /// Structural sameness. Sum alternatives are compared in order.
    pub fn equivalent(&self, other: &Type) -> bool {
        match (self, other) {
            (Type::Basic(a), Type::Basic(b)) => a == b,
            (Type::Struct(a), Type::Struct(b)) => a == b,
            (Type::Array(a), Type::Array(b)) => a.equivalent(b),
            (Type::Function(a), Type::Function(b)) => {
                a.return_type.equivalent(&b.return_type)
                    && a.parameters.len() == b.parameters.len()
                    && a
                        .parameters
                        .iter()
                        .zip(&b.parameters)
                        .all(|(x, y)| x.equivalent(y))
            }
            (Type::Sum(a), Type::Sum(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.equivalent(y))
            }
            _ => false,
        }
    }

    /// Whether a value of type `self` may be stored in a slot of type `target`.
    ///
    /// The rules are tried in order:
    /// 1. anything goes into `any`
    /// 2. equivalent types
    /// 3. functions: covariant return, same arity, contravariant parameters
    /// 4. sum into sum: no more alternatives, each fitting some target alternative
    /// 5. non-sum into sum: fits some alternative
    /// 6. arrays: covariant elements
    pub fn assignable_to(&self, target: &Type) -> bool {
        if *target == Type::ANY || self.equivalent(target) {
            return true;
        }

        match (self, target) {
            (Type::Function(from), Type::Function(to)) => {
                from.return_type.assignable_to(&to.return_type)
                    && from.parameters.len() == to.parameters.len()
                    && from
                        .parameters
                        .iter()
                        .zip(&to.parameters)
                        .all(|(from_param, to_param)| to_param.assignable_to(from_param))
            }
            (Type::Sum(from), Type::Sum(to)) => {
                from.len() <= to.len()
                    && from
                        .iter()
                        .all(|alternative| to.iter().any(|slot| alternative.assignable_to(slot)))
            }
            (_, Type::Sum(to)) => to.iter().any(|slot| self.assignable_to(slot)),
            (Type::Array(from), Type::Array(to)) => from.assignable_to(to),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructDef {
    pub name: String,
    pub fields: Vec<Field>,
}

impl StructDef {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// Arena of every struct type declared in a program.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TypeTable {
    structs: Vec<StructDef>,
}

impl TypeTable {
    pub fn new() -> Self {
        TypeTable::default()
    }

    /// Registers a struct with no fields yet. Fields are filled in later by
    /// [`TypeTable::define_fields`], once the name is visible to them.
    pub fn declare_struct(&mut self, name: &str) -> StructId {
        self.structs.push(StructDef {
            name: String::from(name),
            fields: vec![],
        });
        StructId(self.structs.len() - 1)
    }

    /// Fills in a struct's fields, rejecting repeated field names and any
    /// field whose type is the struct itself.
    pub fn define_fields(&mut self, id: StructId, fields: Vec<Field>) -> Result<(), ErrorImpl> {
        let name = self.get(id).name.clone();

        for (index, field) in fields.iter().enumerate() {
            if fields[..index].iter().any(|earlier| earlier.name == field.name) {
                return Err(ErrorImpl::DuplicateField {
                    name,
                    field: field.name.clone(),
                });
            }
        }

        if fields.iter().any(|field| field.ty == Type::Struct(id)) {
            return Err(ErrorImpl::RecursiveStructType { name });
        }

        self.structs[id.0].fields = fields;
        Ok(())
    }

    pub fn get(&self, id: StructId) -> &StructDef {
        &self.structs[id.0]
    }

    pub fn len(&self) -> usize {
        self.structs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structs.is_empty()
    }

    /// Human-readable form used in error messages.
    pub fn describe(&self, ty: &Type) -> String {
        match ty {
            Type::Basic(basic) => basic.name().to_string(),
            Type::Struct(id) => self.get(*id).name.clone(),
            Type::Array(element) => format!("[{}]", self.describe(element)),
            Type::Function(function) => {
                let parameters: Vec<String> = function
                    .parameters
                    .iter()
                    .map(|parameter| self.describe(parameter))
                    .collect();
                format!(
                    "({})->{}",
                    parameters.join(","),
                    self.describe(&function.return_type)
                )
            }
            Type::Sum(alternatives) => match ty.optional_base() {
                Some(base) => format!("{}?", self.describe(base)),
                None => {
                    let alternatives: Vec<String> = alternatives
                        .iter()
                        .map(|alternative| self.describe(alternative))
                        .collect();
                    format!("<{}>", alternatives.join(","))
                }
            },
        }
    }
}
