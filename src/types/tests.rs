//! Unit tests for the type model.

use super::types::{BasicType, Field, StructId, Type, TypeTable};

fn all_basic() -> Vec<Type> {
    BasicType::ALL.iter().map(|basic| Type::Basic(*basic)).collect()
}

#[test]
fn test_assignability_is_reflexive() {
    let mut types = all_basic();
    types.push(Type::array(Type::INT));
    types.push(Type::function(vec![Type::BOOL], Type::STRING));
    types.push(Type::optional(Type::FLOAT));
    types.push(Type::sum(vec![Type::INT, Type::BOOL, Type::STRING]));
    types.push(Type::Struct(StructId(0)));

    for ty in &types {
        assert!(ty.assignable_to(ty), "{:?} should be assignable to itself", ty);
        assert!(ty.assignable_to(&Type::ANY), "{:?} should be assignable to any", ty);
    }
}

#[test]
fn test_any_is_not_assignable_to_narrower_types() {
    assert!(!Type::ANY.assignable_to(&Type::INT));
    assert!(!Type::ANY.assignable_to(&Type::optional(Type::INT)));
}

#[test]
fn test_distinct_basic_types() {
    assert!(!Type::INT.assignable_to(&Type::FLOAT));
    assert!(!Type::FLOAT.assignable_to(&Type::INT));
    assert!(!Type::STRING.equivalent(&Type::BOOL));
}

#[test]
fn test_function_return_is_covariant() {
    let returns_int = Type::function(vec![Type::BOOL], Type::INT);
    let returns_any = Type::function(vec![Type::BOOL], Type::ANY);

    assert!(returns_int.assignable_to(&returns_any));
    assert!(!returns_any.assignable_to(&returns_int));
}

#[test]
fn test_function_parameters_are_contravariant() {
    let takes_any = Type::function(vec![Type::ANY], Type::INT);
    let takes_bool = Type::function(vec![Type::BOOL], Type::INT);

    assert!(takes_any.assignable_to(&takes_bool));
    assert!(!takes_bool.assignable_to(&takes_any));
}

#[test]
fn test_function_arity_must_match() {
    let unary = Type::function(vec![Type::INT], Type::INT);
    let binary = Type::function(vec![Type::INT, Type::INT], Type::INT);

    assert!(!unary.assignable_to(&binary));
    assert!(!binary.assignable_to(&unary));
}

#[test]
fn test_sum_widening() {
    let int_or_bool = Type::sum(vec![Type::INT, Type::BOOL]);

    assert!(Type::INT.assignable_to(&int_or_bool));
    assert!(Type::sum(vec![Type::INT]).assignable_to(&int_or_bool));
    assert!(!Type::sum(vec![Type::INT, Type::BOOL, Type::FLOAT]).assignable_to(&int_or_bool));
    assert!(!Type::FLOAT.assignable_to(&int_or_bool));
}

#[test]
fn test_single_alternative_sum_does_not_narrow() {
    assert!(!Type::sum(vec![Type::BOOL]).assignable_to(&Type::BOOL));
    assert!(!Type::optional(Type::INT).assignable_to(&Type::INT));
}

#[test]
fn test_sum_equivalence_is_order_sensitive() {
    let int_bool = Type::sum(vec![Type::INT, Type::BOOL]);
    let bool_int = Type::sum(vec![Type::BOOL, Type::INT]);

    assert!(!int_bool.equivalent(&bool_int));
    assert!(int_bool.assignable_to(&bool_int));
    assert!(bool_int.assignable_to(&int_bool));
}

#[test]
fn test_sum_deduplicates_in_first_seen_order() {
    let sum = Type::sum(vec![
        Type::INT,
        Type::BOOL,
        Type::INT,
        Type::array(Type::INT),
        Type::array(Type::INT),
    ]);
    assert_eq!(
        sum,
        Type::Sum(vec![Type::INT, Type::BOOL, Type::array(Type::INT)])
    );
}

#[test]
fn test_sum_does_not_flatten() {
    let nested = Type::sum(vec![Type::INT, Type::sum(vec![Type::BOOL, Type::FLOAT])]);
    match nested {
        Type::Sum(alternatives) => {
            assert_eq!(alternatives.len(), 2);
            assert!(matches!(alternatives[1], Type::Sum(_)));
        }
        other => panic!("expected a sum, got {:?}", other),
    }
}

#[test]
fn test_optional_is_sum_with_void() {
    assert_eq!(Type::optional(Type::INT), Type::Sum(vec![Type::INT, Type::VOID]));
    assert_eq!(Type::optional(Type::INT).optional_base(), Some(&Type::INT));
    assert_eq!(Type::sum(vec![Type::VOID, Type::INT]).optional_base(), None);
    assert!(Type::VOID.assignable_to(&Type::optional(Type::STRING)));
}

#[test]
fn test_array_elements_are_covariant() {
    assert!(Type::array(Type::INT).assignable_to(&Type::array(Type::ANY)));
    assert!(Type::array(Type::INT).assignable_to(&Type::array(Type::optional(Type::INT))));
    assert!(!Type::array(Type::ANY).assignable_to(&Type::array(Type::INT)));
}

#[test]
fn test_assignability_is_not_symmetric() {
    assert!(Type::INT.assignable_to(&Type::optional(Type::INT)));
    assert!(!Type::optional(Type::INT).assignable_to(&Type::INT));
}

#[test]
fn test_struct_types_compare_by_identity() {
    let mut table = TypeTable::new();
    let a = table.declare_struct("A");
    let b = table.declare_struct("B");

    assert!(Type::Struct(a).equivalent(&Type::Struct(a)));
    assert!(!Type::Struct(a).equivalent(&Type::Struct(b)));
    assert!(!Type::Struct(a).assignable_to(&Type::Struct(b)));
}

#[test]
fn test_define_fields_rejects_direct_recursion() {
    let mut table = TypeTable::new();
    let node = table.declare_struct("Node");

    let error = table
        .define_fields(
            node,
            vec![Field {
                name: String::from("next"),
                ty: Type::Struct(node),
            }],
        )
        .unwrap_err();

    assert_eq!(error.to_string(), "struct type `Node` must not be recursive");
}

#[test]
fn test_define_fields_allows_recursion_through_optional() {
    let mut table = TypeTable::new();
    let node = table.declare_struct("Node");

    table
        .define_fields(
            node,
            vec![
                Field { name: String::from("value"), ty: Type::INT },
                Field { name: String::from("next"), ty: Type::optional(Type::Struct(node)) },
            ],
        )
        .unwrap();

    let def = table.get(node);
    assert_eq!(def.fields.len(), 2);
    assert_eq!(def.field("next").map(|f| f.ty.clone()), Some(Type::optional(Type::Struct(node))));
}

#[test]
fn test_define_fields_rejects_duplicates() {
    let mut table = TypeTable::new();
    let point = table.declare_struct("Point");

    let error = table
        .define_fields(
            point,
            vec![
                Field { name: String::from("x"), ty: Type::FLOAT },
                Field { name: String::from("x"), ty: Type::INT },
            ],
        )
        .unwrap_err();

    assert_eq!(error.to_string(), "field `x` declared more than once in `Point`");
}

#[test]
fn test_describe() {
    let mut table = TypeTable::new();
    let point = table.declare_struct("Point");

    assert_eq!(table.describe(&Type::STRING), "string");
    assert_eq!(table.describe(&Type::Struct(point)), "Point");
    assert_eq!(table.describe(&Type::array(Type::INT)), "[int]");
    assert_eq!(
        table.describe(&Type::function(vec![Type::INT, Type::BOOL], Type::VOID)),
        "(int,bool)->void"
    );
    assert_eq!(table.describe(&Type::optional(Type::Struct(point))), "Point?");
    assert_eq!(
        table.describe(&Type::sum(vec![Type::INT, Type::STRING, Type::BOOL])),
        "<int,string,bool>"
    );
}
