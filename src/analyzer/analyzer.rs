use std::rc::Rc;

use tracing::{debug, instrument};

use crate::{
    ast::{
        ast::{Expr as AstExpr, Stmt as AstStmt},
        expressions::{
            ArrayExpr, BinaryExpr, BinaryOp, CallExpr, ConditionalExpr, MemberExpr, PrefixExpr,
            SubscriptExpr, SymbolExpr, UnaryOp,
        },
        statements::{
            AssignmentStmt, BlockStmt, BreakStmt, ElseBranch, FnDeclStmt, ForEachStmt,
            ForRangeStmt, IfStmt, RepeatStmt, ReturnStmt, StructDeclStmt, UpdateStmt, VarDeclStmt,
            WhileStmt,
        },
        types::TypeExpr,
    },
    context::context::{Context, Entity, Function, ScopeKind, Variable},
    errors::errors::{Error, ErrorImpl},
    types::types::{Field, FunctionType, Type, TypeTable},
    Position,
};

use super::{
    stdlib::Stdlib,
    typed_ast::{Expr, Program, Stmt},
};

fn is_bool(ty: &Type) -> bool {
    *ty == Type::BOOL
}

fn is_int(ty: &Type) -> bool {
    *ty == Type::INT
}

fn is_array(ty: &Type) -> bool {
    matches!(ty, Type::Array(_))
}

/// Checks a parse tree and builds the typed AST, failing on the first error.
///
/// An analyzer is single use: [`Analyzer::analyze`] consumes it, so every
/// program starts from a fresh scope table seeded with the standard library.
pub struct Analyzer {
    context: Context,
    types: TypeTable,
}

impl Analyzer {
    pub fn new(stdlib: Stdlib) -> Self {
        let mut context = Context::new();
        for (name, entity) in stdlib.entries() {
            context.define(name, entity.clone());
        }

        Analyzer {
            context,
            types: TypeTable::new(),
        }
    }

    #[instrument(level = "debug", skip_all, fields(statements = program.body.len()))]
    pub fn analyze(mut self, program: BlockStmt) -> Result<Program, Error> {
        let statements = self.analyze_stmts(&program.body)?;
        debug!(structs = self.types.len(), "analysis finished");

        Ok(Program {
            statements,
            types: self.types,
        })
    }

    /// Runs `analyze` in a child scope, leaving the scope on every exit path.
    fn in_scope<T>(
        &mut self,
        kind: ScopeKind,
        analyze: impl FnOnce(&mut Self) -> Result<T, Error>,
    ) -> Result<T, Error> {
        self.context.push(kind);
        let result = analyze(self);
        self.context.pop();
        result
    }

    fn describe(&self, ty: &Type) -> String {
        self.types.describe(ty)
    }

    fn expect_assignable(&self, source: &Expr, target: &Type, position: &Position) -> Result<(), Error> {
        let received = source.ty();
        if received.assignable_to(target) {
            return Ok(());
        }

        Err(Error::new(
            ErrorImpl::TypeMismatch {
                expected: self.describe(target),
                received: self.describe(&received),
            },
            position.clone(),
        ))
    }

    fn expect_class(
        &self,
        ty: &Type,
        check: fn(&Type) -> bool,
        expected: &'static str,
        position: &Position,
    ) -> Result<(), Error> {
        if check(ty) {
            return Ok(());
        }

        Err(self.class_error(expected, ty, position))
    }

    fn class_error(&self, expected: &'static str, received: &Type, position: &Position) -> Error {
        Error::new(
            ErrorImpl::ExpectedTypeClass {
                expected,
                received: self.describe(received),
            },
            position.clone(),
        )
    }

    fn expect_same(&self, left: &Type, right: &Type, position: &Position) -> Result<(), Error> {
        if left.equivalent(right) {
            return Ok(());
        }

        Err(Error::new(
            ErrorImpl::OperandMismatch {
                left: self.describe(left),
                right: self.describe(right),
            },
            position.clone(),
        ))
    }

    // STATEMENTS

    fn analyze_stmts(&mut self, stmts: &[AstStmt]) -> Result<Vec<Stmt>, Error> {
        let mut analyzed = Vec::with_capacity(stmts.len());
        for stmt in stmts {
            analyzed.push(self.analyze_stmt(stmt)?);
        }
        Ok(analyzed)
    }

    fn analyze_block(&mut self, block: &BlockStmt, kind: ScopeKind) -> Result<Vec<Stmt>, Error> {
        self.in_scope(kind, |analyzer| analyzer.analyze_stmts(&block.body))
    }

    fn analyze_stmt(&mut self, stmt: &AstStmt) -> Result<Stmt, Error> {
        match stmt {
            AstStmt::VarDecl(decl) => self.analyze_var_decl(decl),
            AstStmt::StructDecl(decl) => self.analyze_struct_decl(decl),
            AstStmt::FnDecl(decl) => self.analyze_fn_decl(decl),
            AstStmt::Assignment(stmt) => self.analyze_assignment(stmt),
            AstStmt::Increment(stmt) => Ok(Stmt::Increment(self.analyze_update(stmt)?)),
            AstStmt::Decrement(stmt) => Ok(Stmt::Decrement(self.analyze_update(stmt)?)),
            AstStmt::Break(stmt) => self.analyze_break(stmt),
            AstStmt::Return(stmt) => self.analyze_return(stmt),
            AstStmt::If(stmt) => self.analyze_if(stmt),
            AstStmt::While(stmt) => self.analyze_while(stmt),
            AstStmt::Repeat(stmt) => self.analyze_repeat(stmt),
            AstStmt::ForRange(stmt) => self.analyze_for_range(stmt),
            AstStmt::ForEach(stmt) => self.analyze_for_each(stmt),
            AstStmt::Expression(stmt) => Ok(Stmt::Call(self.analyze_expr(&stmt.expression)?)),
        }
    }

    fn analyze_var_decl(&mut self, decl: &VarDeclStmt) -> Result<Stmt, Error> {
        let initializer = self.analyze_expr(&decl.assigned_value)?;
        let variable = Variable::new(&decl.identifier, decl.is_constant, initializer.ty());

        self.context.declare(
            &decl.identifier,
            Entity::Variable(Rc::clone(&variable)),
            &decl.span.start,
        )?;
        debug!(
            name = %decl.identifier,
            ty = %self.describe(&variable.ty),
            read_only = decl.is_constant,
            "declared variable"
        );

        if decl.by_reference {
            Ok(Stmt::ReferenceDecl { variable, initializer })
        } else {
            Ok(Stmt::ValueDecl { variable, initializer })
        }
    }

    fn analyze_struct_decl(&mut self, decl: &StructDeclStmt) -> Result<Stmt, Error> {
        // Registered before the fields so they can refer back to it
        let id = self.types.declare_struct(&decl.identifier);
        self.context.declare(
            &decl.identifier,
            Entity::Type(Type::Struct(id)),
            &decl.span.start,
        )?;

        let mut fields = Vec::with_capacity(decl.fields.len());
        for field in &decl.fields {
            fields.push(Field {
                name: field.name.clone(),
                ty: self.resolve_type(&field.explicit_type)?,
            });
        }

        self.types
            .define_fields(id, fields)
            .map_err(|error| Error::new(error, decl.span.start.clone()))?;
        debug!(name = %decl.identifier, fields = decl.fields.len(), "declared struct");

        Ok(Stmt::TypeDecl(id))
    }

    fn analyze_fn_decl(&mut self, decl: &FnDeclStmt) -> Result<Stmt, Error> {
        let mut parameter_types = Vec::with_capacity(decl.parameters.len());
        for parameter in &decl.parameters {
            parameter_types.push(self.resolve_type(&parameter.explicit_type)?);
        }
        let return_type = match &decl.return_type {
            Some(return_type) => self.resolve_type(return_type)?,
            None => Type::VOID,
        };

        // Declared before the body is analyzed so recursive calls resolve
        let function = Function::new(
            &decl.identifier,
            FunctionType::new(parameter_types.clone(), return_type),
        );
        self.context.declare(
            &decl.identifier,
            Entity::Function(Rc::clone(&function)),
            &decl.span.start,
        )?;
        debug!(
            name = %decl.identifier,
            ty = %self.describe(&function.as_type()),
            "declared function"
        );

        let (parameters, body) =
            self.in_scope(ScopeKind::Function(Rc::clone(&function)), |analyzer| {
                let mut parameters = Vec::with_capacity(parameter_types.len());
                for (parameter, ty) in decl.parameters.iter().zip(parameter_types) {
                    let variable = Variable::new(&parameter.name, false, ty);
                    analyzer.context.declare(
                        &parameter.name,
                        Entity::Variable(Rc::clone(&variable)),
                        &parameter.span.start,
                    )?;
                    parameters.push(variable);
                }

                let body = analyzer.analyze_stmts(&decl.body.body)?;
                Ok((parameters, body))
            })?;

        Ok(Stmt::FunctionDecl {
            function,
            parameters,
            body,
        })
    }

    /// Analyzes the left side of an assignment, increment or decrement.
    fn analyze_target(&self, expr: &AstExpr) -> Result<Expr, Error> {
        let target = self.analyze_expr(expr)?;

        let error = match &target {
            Expr::Variable(variable) if variable.read_only => Some(ErrorImpl::ReadOnlyAssignment {
                name: variable.name.clone(),
                is_function: false,
            }),
            Expr::Function(function) => Some(ErrorImpl::ReadOnlyAssignment {
                name: function.name.clone(),
                is_function: true,
            }),
            Expr::Variable(_)
            | Expr::Subscript { .. }
            | Expr::Member {
                optional_chain: false,
                ..
            } => None,
            _ => Some(ErrorImpl::InvalidAssignmentTarget),
        };

        match error {
            Some(error) => Err(Error::new(error, expr.get_span().start.clone())),
            None => Ok(target),
        }
    }

    fn analyze_assignment(&mut self, stmt: &AssignmentStmt) -> Result<Stmt, Error> {
        let target = self.analyze_target(&stmt.assignee)?;
        let source = self.analyze_expr(&stmt.value)?;
        self.expect_assignable(&source, &target.ty(), &stmt.value.get_span().start)?;

        if stmt.by_reference {
            Ok(Stmt::AssignReference { target, source })
        } else {
            Ok(Stmt::AssignValue { target, source })
        }
    }

    fn analyze_update(&mut self, stmt: &UpdateStmt) -> Result<Expr, Error> {
        let target = self.analyze_target(&stmt.target)?;
        self.expect_class(&target.ty(), is_int, "an integer", &stmt.span.start)?;
        Ok(target)
    }

    fn analyze_break(&mut self, stmt: &BreakStmt) -> Result<Stmt, Error> {
        if !self.context.in_loop() {
            return Err(Error::new(ErrorImpl::InvalidLoopExit, stmt.span.start.clone()));
        }
        Ok(Stmt::Break)
    }

    fn analyze_return(&mut self, stmt: &ReturnStmt) -> Result<Stmt, Error> {
        let invalid = |reason: &'static str| {
            Error::new(ErrorImpl::InvalidReturn { reason }, stmt.span.start.clone())
        };

        let function = match self.context.function() {
            Some(function) => Rc::clone(function),
            None => return Err(invalid("return can only appear in a function")),
        };
        let returns_void = *function.ty.return_type == Type::VOID;

        match &stmt.value {
            Some(value) => {
                if returns_void {
                    return Err(invalid("cannot return a value from this function"));
                }
                let value_expr = self.analyze_expr(value)?;
                self.expect_assignable(&value_expr, &function.ty.return_type, &value.get_span().start)?;
                Ok(Stmt::Return(value_expr))
            }
            None => {
                if !returns_void {
                    return Err(invalid("something should be returned"));
                }
                Ok(Stmt::ShortReturn)
            }
        }
    }

    fn analyze_condition(&self, condition: &AstExpr) -> Result<Expr, Error> {
        let test = self.analyze_expr(condition)?;
        self.expect_class(&test.ty(), is_bool, "a boolean", &condition.get_span().start)?;
        Ok(test)
    }

    fn analyze_if(&mut self, stmt: &IfStmt) -> Result<Stmt, Error> {
        let test = self.analyze_condition(&stmt.condition)?;
        let consequent = self.analyze_block(&stmt.then_body, ScopeKind::Block)?;

        let alternate = match &stmt.else_body {
            None => return Ok(Stmt::ShortIf { test, consequent }),
            Some(ElseBranch::Block(block)) => self.analyze_block(block, ScopeKind::Block)?,
            Some(ElseBranch::If(nested)) => vec![self.analyze_if(nested)?],
        };

        Ok(Stmt::If {
            test,
            consequent,
            alternate,
        })
    }

    fn analyze_while(&mut self, stmt: &WhileStmt) -> Result<Stmt, Error> {
        let test = self.analyze_condition(&stmt.condition)?;
        let body = self.analyze_block(&stmt.body, ScopeKind::Loop)?;
        Ok(Stmt::While { test, body })
    }

    fn analyze_repeat(&mut self, stmt: &RepeatStmt) -> Result<Stmt, Error> {
        let count = self.analyze_expr(&stmt.count)?;
        self.expect_class(&count.ty(), is_int, "an integer", &stmt.count.get_span().start)?;

        let body = self.analyze_block(&stmt.body, ScopeKind::Loop)?;
        Ok(Stmt::Repeat { count, body })
    }

    fn analyze_for_range(&mut self, stmt: &ForRangeStmt) -> Result<Stmt, Error> {
        let low = self.analyze_expr(&stmt.low)?;
        self.expect_class(&low.ty(), is_int, "an integer", &stmt.low.get_span().start)?;
        let high = self.analyze_expr(&stmt.high)?;
        self.expect_class(&high.ty(), is_int, "an integer", &stmt.high.get_span().start)?;

        let iterator = Variable::new(&stmt.iterator, true, Type::INT);
        let body = self.in_scope(ScopeKind::Loop, |analyzer| {
            analyzer.context.declare(
                &stmt.iterator,
                Entity::Variable(Rc::clone(&iterator)),
                &stmt.span.start,
            )?;
            analyzer.analyze_stmts(&stmt.body.body)
        })?;

        Ok(Stmt::ForRange {
            iterator,
            low,
            op: stmt.operator,
            high,
            body,
        })
    }

    fn analyze_for_each(&mut self, stmt: &ForEachStmt) -> Result<Stmt, Error> {
        let collection = self.analyze_expr(&stmt.collection)?;
        let element = match collection.ty() {
            Type::Array(element) => *element,
            other => {
                return Err(self.class_error(
                    "an array",
                    &other,
                    &stmt.collection.get_span().start,
                ))
            }
        };

        let iterator = Variable::new(&stmt.iterator, true, element);
        let body = self.in_scope(ScopeKind::Loop, |analyzer| {
            analyzer.context.declare(
                &stmt.iterator,
                Entity::Variable(Rc::clone(&iterator)),
                &stmt.span.start,
            )?;
            analyzer.analyze_stmts(&stmt.body.body)
        })?;

        Ok(Stmt::ForEach {
            iterator,
            collection,
            body,
        })
    }

    // EXPRESSIONS

    fn analyze_expr(&self, expr: &AstExpr) -> Result<Expr, Error> {
        match expr {
            AstExpr::Integer(literal) => Ok(Expr::int(literal.value)),
            AstExpr::Float(literal) => Ok(Expr::float(literal.value)),
            AstExpr::String(literal) => Ok(Expr::string(&literal.value)),
            AstExpr::Boolean(literal) => Ok(Expr::boolean(literal.value)),
            AstExpr::Symbol(symbol) => self.analyze_symbol(symbol),
            AstExpr::Binary(binary) => self.analyze_binary(binary),
            AstExpr::Prefix(prefix) => self.analyze_prefix(prefix),
            AstExpr::Conditional(conditional) => self.analyze_conditional(conditional),
            AstExpr::Array(array) => self.analyze_array(array),
            AstExpr::EmptyArray(empty) => Ok(Expr::EmptyArray {
                ty: Type::array(self.resolve_type(&empty.element_type)?),
            }),
            AstExpr::EmptyOptional(empty) => Ok(Expr::EmptyOptional {
                ty: Type::optional(self.resolve_type(&empty.base_type)?),
            }),
            AstExpr::Subscript(subscript) => self.analyze_subscript(subscript),
            AstExpr::Member(member) => self.analyze_member(member),
            AstExpr::Call(call) => self.analyze_call(call),
        }
    }

    fn analyze_symbol(&self, symbol: &SymbolExpr) -> Result<Expr, Error> {
        match self.context.lookup(&symbol.value, &symbol.span.start)? {
            Entity::Variable(variable) => Ok(Expr::Variable(variable)),
            Entity::Function(function) => Ok(Expr::Function(function)),
            Entity::Type(ty) => Err(Error::new(
                ErrorImpl::ExpectedValue {
                    name: symbol.value.clone(),
                    is_struct: matches!(ty, Type::Struct(_)),
                },
                symbol.span.start.clone(),
            )),
        }
    }

    fn analyze_binary(&self, binary: &BinaryExpr) -> Result<Expr, Error> {
        let left = self.analyze_expr(&binary.left)?;
        let right = self.analyze_expr(&binary.right)?;
        let left_ty = left.ty();
        let right_ty = right.ty();
        let left_position = &binary.left.get_span().start;
        let right_position = &binary.right.get_span().start;

        let ty = match binary.operator {
            BinaryOp::Coalesce => {
                let base = left_ty
                    .optional_base()
                    .cloned()
                    .ok_or_else(|| self.class_error("an optional", &left_ty, left_position))?;
                self.expect_assignable(&right, &base, right_position)?;
                base
            }
            BinaryOp::Or | BinaryOp::And => {
                self.expect_class(&left_ty, is_bool, "a boolean", left_position)?;
                self.expect_class(&right_ty, is_bool, "a boolean", right_position)?;
                Type::BOOL
            }
            BinaryOp::BitOr
            | BinaryOp::BitXor
            | BinaryOp::BitAnd
            | BinaryOp::ShiftLeft
            | BinaryOp::ShiftRight => {
                self.expect_class(&left_ty, is_int, "an integer", left_position)?;
                self.expect_class(&right_ty, is_int, "an integer", right_position)?;
                Type::INT
            }
            BinaryOp::Less | BinaryOp::LessEquals | BinaryOp::GreaterEquals | BinaryOp::Greater => {
                self.expect_class(
                    &left_ty,
                    Type::is_numeric_or_string,
                    "a number or string",
                    left_position,
                )?;
                self.expect_same(&left_ty, &right_ty, right_position)?;
                Type::BOOL
            }
            BinaryOp::Equals | BinaryOp::NotEquals => {
                self.expect_same(&left_ty, &right_ty, right_position)?;
                Type::BOOL
            }
            BinaryOp::Add => {
                self.expect_class(
                    &left_ty,
                    Type::is_numeric_or_string,
                    "a number or string",
                    left_position,
                )?;
                self.expect_same(&left_ty, &right_ty, right_position)?;
                left_ty
            }
            BinaryOp::Subtract
            | BinaryOp::Multiply
            | BinaryOp::Divide
            | BinaryOp::Remainder
            | BinaryOp::Power => {
                self.expect_class(&left_ty, Type::is_numeric, "a number", left_position)?;
                self.expect_same(&left_ty, &right_ty, right_position)?;
                left_ty
            }
        };

        Ok(Expr::Binary {
            op: binary.operator,
            left: Box::new(left),
            right: Box::new(right),
            ty,
        })
    }

    fn analyze_prefix(&self, prefix: &PrefixExpr) -> Result<Expr, Error> {
        let operand = self.analyze_expr(&prefix.right_expr)?;
        let operand_ty = operand.ty();
        let position = &prefix.right_expr.get_span().start;

        let ty = match prefix.operator {
            UnaryOp::Negate => {
                self.expect_class(&operand_ty, Type::is_numeric, "a number", position)?;
                operand_ty
            }
            UnaryOp::Not => {
                self.expect_class(&operand_ty, is_bool, "a boolean", position)?;
                Type::BOOL
            }
            UnaryOp::Length => {
                self.expect_class(&operand_ty, is_array, "an array", position)?;
                Type::INT
            }
            UnaryOp::Some => Type::optional(operand_ty),
        };

        Ok(Expr::Unary {
            op: prefix.operator,
            operand: Box::new(operand),
            ty,
        })
    }

    fn analyze_conditional(&self, conditional: &ConditionalExpr) -> Result<Expr, Error> {
        let test = self.analyze_condition(&conditional.test)?;
        let consequent = self.analyze_expr(&conditional.consequent)?;
        let alternate = self.analyze_expr(&conditional.alternate)?;

        let ty = consequent.ty();
        self.expect_same(&ty, &alternate.ty(), &conditional.alternate.get_span().start)?;

        Ok(Expr::Conditional {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
            ty,
        })
    }

    /// Elements of differing types give an array of their sum type.
    fn analyze_array(&self, array: &ArrayExpr) -> Result<Expr, Error> {
        let mut elements = Vec::with_capacity(array.elements.len());
        for element in &array.elements {
            elements.push(self.analyze_expr(element)?);
        }

        let element_ty = match Type::sum(elements.iter().map(Expr::ty).collect()) {
            Type::Sum(mut alternatives) if alternatives.len() == 1 => alternatives.remove(0),
            sum => sum,
        };

        Ok(Expr::Array {
            elements,
            ty: Type::array(element_ty),
        })
    }

    fn analyze_subscript(&self, subscript: &SubscriptExpr) -> Result<Expr, Error> {
        let array = self.analyze_expr(&subscript.array)?;
        let element = match array.ty() {
            Type::Array(element) => *element,
            other => {
                return Err(self.class_error(
                    "an array",
                    &other,
                    &subscript.array.get_span().start,
                ))
            }
        };

        let index = self.analyze_expr(&subscript.index)?;
        self.expect_class(&index.ty(), is_int, "an integer", &subscript.index.get_span().start)?;

        Ok(Expr::Subscript {
            array: Box::new(array),
            index: Box::new(index),
            ty: element,
        })
    }

    fn analyze_member(&self, member: &MemberExpr) -> Result<Expr, Error> {
        let object = self.analyze_expr(&member.object)?;
        let object_ty = object.ty();

        let receiver = if member.optional {
            object_ty.optional_base()
        } else {
            Some(&object_ty)
        };
        let id = match receiver {
            Some(Type::Struct(id)) => *id,
            _ => {
                let expected = if member.optional { "an optional struct" } else { "a struct" };
                return Err(self.class_error(expected, &object_ty, &member.object.get_span().start));
            }
        };

        let definition = self.types.get(id);
        let field_ty = match definition.field(&member.field) {
            Some(field) => field.ty.clone(),
            None => {
                return Err(Error::new(
                    ErrorImpl::UnknownMember {
                        field: member.field.clone(),
                        type_: definition.name.clone(),
                    },
                    member.span.start.clone(),
                ))
            }
        };

        let ty = if member.optional {
            Type::optional(field_ty)
        } else {
            field_ty
        };

        Ok(Expr::Member {
            object: Box::new(object),
            field: member.field.clone(),
            optional_chain: member.optional,
            ty,
        })
    }

    fn analyze_call(&self, call: &CallExpr) -> Result<Expr, Error> {
        // A callee naming a type is a constructor call
        if let AstExpr::Symbol(symbol) = call.callee.as_ref() {
            if let Entity::Type(ty) = self.context.lookup(&symbol.value, &symbol.span.start)? {
                return self.analyze_constructor(call, symbol, ty);
            }
        }

        let callee = self.analyze_expr(&call.callee)?;
        let function = match callee.ty() {
            Type::Function(function) => function,
            other => {
                return Err(Error::new(
                    ErrorImpl::NotCallable {
                        type_: self.describe(&other),
                    },
                    call.callee.get_span().start.clone(),
                ))
            }
        };

        let arguments =
            self.analyze_arguments(&call.arguments, &function.parameters, &call.span.start)?;

        Ok(Expr::Call {
            callee: Box::new(callee),
            arguments,
            ty: *function.return_type,
        })
    }

    fn analyze_constructor(&self, call: &CallExpr, symbol: &SymbolExpr, ty: Type) -> Result<Expr, Error> {
        let id = match ty {
            Type::Struct(id) => id,
            other => {
                return Err(Error::new(
                    ErrorImpl::NotCallable {
                        type_: self.describe(&other),
                    },
                    symbol.span.start.clone(),
                ))
            }
        };

        let field_types: Vec<Type> = self
            .types
            .get(id)
            .fields
            .iter()
            .map(|field| field.ty.clone())
            .collect();
        let arguments = self.analyze_arguments(&call.arguments, &field_types, &call.span.start)?;

        Ok(Expr::Construct { id, arguments })
    }

    fn analyze_arguments(
        &self,
        arguments: &[AstExpr],
        parameters: &[Type],
        position: &Position,
    ) -> Result<Vec<Expr>, Error> {
        if arguments.len() != parameters.len() {
            return Err(Error::new(
                ErrorImpl::ArityMismatch {
                    expected: parameters.len(),
                    received: arguments.len(),
                },
                position.clone(),
            ));
        }

        let mut analyzed = Vec::with_capacity(arguments.len());
        for (argument, parameter) in arguments.iter().zip(parameters) {
            let expr = self.analyze_expr(argument)?;
            self.expect_assignable(&expr, parameter, &argument.get_span().start)?;
            analyzed.push(expr);
        }
        Ok(analyzed)
    }

    // TYPES

    fn resolve_type(&self, ty: &TypeExpr) -> Result<Type, Error> {
        match ty {
            TypeExpr::Named { name, span } => match self.context.lookup(name, &span.start)? {
                Entity::Type(ty) => Ok(ty),
                _ => Err(Error::new(
                    ErrorImpl::NotAType { name: name.clone() },
                    span.start.clone(),
                )),
            },
            TypeExpr::Array { element, .. } => Ok(Type::array(self.resolve_type(element)?)),
            TypeExpr::Optional { base, .. } => Ok(Type::optional(self.resolve_type(base)?)),
            TypeExpr::Sum { alternatives, .. } => {
                let mut resolved = Vec::with_capacity(alternatives.len());
                for alternative in alternatives {
                    resolved.push(self.resolve_type(alternative)?);
                }
                Ok(Type::sum(resolved))
            }
            TypeExpr::Function {
                parameters,
                return_type,
                ..
            } => {
                let mut resolved = Vec::with_capacity(parameters.len());
                for parameter in parameters {
                    resolved.push(self.resolve_type(parameter)?);
                }
                Ok(Type::function(resolved, self.resolve_type(return_type)?))
            }
        }
    }
}
