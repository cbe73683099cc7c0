//! Property-based tests for assignability and the optimizer.
//!
//! Types are generated over the basic types with arrays, functions, sums and
//! optionals nested a few levels deep. Programs are generated as integer
//! expressions over literals and a single variable.

use bramble::{
    analyze_source, analyzer::typed_ast::Stmt, optimizer::optimizer::optimize, types::types::Type,
};
use proptest::prelude::*;

fn leaf_type() -> impl Strategy<Value = Type> {
    prop_oneof![
        Just(Type::INT),
        Just(Type::FLOAT),
        Just(Type::STRING),
        Just(Type::BOOL),
        Just(Type::VOID),
        Just(Type::ANY),
    ]
}

fn arb_type() -> impl Strategy<Value = Type> {
    leaf_type().prop_recursive(3, 32, 3, |inner| {
        prop_oneof![
            inner.clone().prop_map(Type::array),
            inner.clone().prop_map(Type::optional),
            prop::collection::vec(inner.clone(), 1..4).prop_map(Type::sum),
            (prop::collection::vec(inner.clone(), 0..3), inner)
                .prop_map(|(parameters, return_type)| Type::function(parameters, return_type)),
        ]
    })
}

fn arb_int_expr() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        (0i64..20).prop_map(|n| n.to_string()),
        Just(String::from("y")),
    ];

    leaf.prop_recursive(4, 32, 3, |inner| {
        prop_oneof![
            (
                inner.clone(),
                prop::sample::select(vec!["+", "-", "*", "/", "%", "&", "|"]),
                inner.clone()
            )
                .prop_map(|(left, op, right)| format!("({} {} {})", left, op, right)),
            inner.clone().prop_map(|operand| format!("-({})", operand)),
            (inner.clone(), inner.clone(), inner.clone(), inner).prop_map(|(a, b, c, d)| {
                format!("({} < {} ? {} : {})", a, b, c, d)
            }),
        ]
    })
}

proptest! {
    #[test]
    fn assignability_is_reflexive(ty in arb_type()) {
        prop_assert!(ty.assignable_to(&ty));
        prop_assert!(ty.equivalent(&ty));
    }

    #[test]
    fn any_is_the_top_type(ty in arb_type()) {
        prop_assert!(ty.assignable_to(&Type::ANY));
    }

    #[test]
    fn equivalence_is_symmetric(a in arb_type(), b in arb_type()) {
        prop_assert_eq!(a.equivalent(&b), b.equivalent(&a));
    }

    #[test]
    fn equivalent_types_assign_both_ways(a in arb_type(), b in arb_type()) {
        if a.equivalent(&b) {
            prop_assert!(a.assignable_to(&b));
            prop_assert!(b.assignable_to(&a));
        }
    }

    #[test]
    fn arrays_are_covariant(a in arb_type(), b in arb_type()) {
        if a.assignable_to(&b) {
            prop_assert!(Type::array(a).assignable_to(&Type::array(b)));
        }
    }

    #[test]
    fn optimization_is_idempotent(value in arb_int_expr(), test in arb_int_expr()) {
        let source = format!(
            "let y = 3;\nlet x = {};\nif {} > 0 {{ print(x); }} else {{ y++; }}\nwhile {} == 0 {{ break; }}",
            value, test, test
        );
        let program = analyze_source(&source, None).unwrap();

        let once = optimize(program);
        let twice = optimize(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn optimization_preserves_types(value in arb_int_expr()) {
        let source = format!("let y = 3;\nlet x = {};", value);
        let program = analyze_source(&source, None).unwrap();
        let optimized = optimize(program.clone());

        let initializer_type = |statements: &[Stmt]| match &statements[1] {
            Stmt::ValueDecl { initializer, .. } => initializer.ty(),
            other => panic!("expected a declaration, got {:?}", other),
        };
        prop_assert_eq!(initializer_type(&program.statements), Type::INT);
        prop_assert_eq!(initializer_type(&optimized.statements), Type::INT);
    }
}
