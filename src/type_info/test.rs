use super::*;

#[test]
fn test_kind_codes() {
    let kinds = [
        (Kind::Function, -5),
        (Kind::Int, -4),
        (Kind::Str, -3),
        (Kind::IntOrStr, -2),
        (Kind::Undefined, -1),
    ];

    for (kind, code) in kinds {
        assert_eq!(kind.code(), code);
        assert_eq!(Kind::from_code(code), Some(kind));
    }
    assert_eq!(Kind::from_code(0), None);
    assert_eq!(Kind::from_code(-6), None);
}

#[test]
fn test_default_is_undefined() {
    let info = TypeInfo::default();
    assert_eq!(info.ty, Type::Undefined);
    assert_eq!(info.int_val, 0);
    assert!(info.string_val.is_empty());

    let raw = RawTypeInfo::from(&info);
    assert_eq!(raw, RawTypeInfo::not_found());
}

#[test]
fn test_function_only_fields() {
    let func = Type::Function {
        num_params: 2,
        return_type: Kind::Int,
    };
    assert!(func.is_function());
    assert_eq!(func.num_params(), Some(2));
    assert_eq!(func.return_type(), Some(Kind::Int));

    for ty in [Type::Int, Type::Str, Type::IntOrStr, Type::Undefined] {
        assert!(!ty.is_function());
        assert_eq!(ty.num_params(), None);
        assert_eq!(ty.return_type(), None);
    }
}

#[test]
fn test_display() {
    let func = Type::Function {
        num_params: 3,
        return_type: Kind::IntOrStr,
    };
    assert_eq!(func.to_string(), "fn(3) -> int_or_str");
    assert_eq!(Type::Str.to_string(), "str");
    assert_eq!(Type::Undefined.to_string(), "undefined");
}

#[test]
fn test_raw_view_of_function() {
    let info = TypeInfo::new(Type::Function {
        num_params: 2,
        return_type: Kind::Int,
    });
    let raw = RawTypeInfo::from(&info);
    assert_eq!(raw.ty, -5);
    assert_eq!(raw.num_params, 2);
    assert_eq!(raw.return_type, -4);

    assert_eq!(TypeInfo::try_from(raw), Ok(info));
}

#[test]
fn test_raw_view_of_value() {
    let info = TypeInfo::new(Type::Str).with_string_val("hello");
    let raw = RawTypeInfo::from(&info);
    assert_eq!(raw.ty, -3);
    assert_eq!(raw.num_params, NOT_APPLICABLE);
    assert_eq!(raw.return_type, NOT_APPLICABLE);
    assert_eq!(raw.string_val, "hello");

    assert_eq!(TypeInfo::try_from(raw), Ok(info));
}

#[test]
fn test_raw_validation() {
    let raw = |ty, num_params, return_type| RawTypeInfo {
        ty,
        num_params,
        return_type,
        int_val: 0,
        string_val: String::new(),
    };

    assert_eq!(
        TypeInfo::try_from(raw(7, -1, -1)),
        Err(TypeInfoError::UnknownType(7))
    );
    assert_eq!(
        TypeInfo::try_from(raw(-5, NOT_APPLICABLE, -4)),
        Err(TypeInfoError::InvalidParamCount(-1))
    );
    assert_eq!(
        TypeInfo::try_from(raw(-5, 1, 3)),
        Err(TypeInfoError::UnknownReturnType(3))
    );
    assert_eq!(
        TypeInfo::try_from(raw(-4, 2, -1)),
        Err(TypeInfoError::UnexpectedFunctionData {
            kind: Kind::Int,
            num_params: 2,
            return_type: -1,
        })
    );
}

#[test]
fn test_raw_view_keeps_largest_arity() {
    let info = TypeInfo::new(Type::Function {
        num_params: u16::MAX,
        return_type: Kind::Str,
    });
    let raw = RawTypeInfo::from(&info);
    assert_eq!(raw.num_params, 65535);

    assert_eq!(TypeInfo::try_from(raw.clone()), Ok(info));
    assert_eq!(
        TypeInfo::try_from(RawTypeInfo {
            num_params: 70_000,
            ..raw
        }),
        Err(TypeInfoError::InvalidParamCount(70_000))
    );
}
