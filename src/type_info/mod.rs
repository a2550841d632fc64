use std::fmt::Display;

use thiserror::Error;

/// Legacy marker for "this field does not apply". Shares its value with the
/// `Undefined` tag, which is why the numeric view cannot tell them apart.
pub const NOT_APPLICABLE: i32 = -1;

/// The closed set of symbol kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Function,
    Int,
    Str,
    IntOrStr,
    Undefined,
}

impl Kind {
    /// Integer tag used by the numeric record format.
    pub fn code(self) -> i32 {
        match self {
            Kind::Function => -5,
            Kind::Int => -4,
            Kind::Str => -3,
            Kind::IntOrStr => -2,
            Kind::Undefined => -1,
        }
    }

    pub fn from_code(code: i32) -> Option<Kind> {
        match code {
            -5 => Some(Kind::Function),
            -4 => Some(Kind::Int),
            -3 => Some(Kind::Str),
            -2 => Some(Kind::IntOrStr),
            -1 => Some(Kind::Undefined),
            _ => None,
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Kind::Function => write!(f, "function"),
            Kind::Int => write!(f, "int"),
            Kind::Str => write!(f, "str"),
            Kind::IntOrStr => write!(f, "int_or_str"),
            Kind::Undefined => write!(f, "undefined"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Type {
    Function {
        num_params: u16,
        return_type: Kind,
    },
    Int,
    Str,
    IntOrStr,
    #[default]
    Undefined,
}

impl Type {
    pub fn kind(&self) -> Kind {
        match self {
            Type::Function { .. } => Kind::Function,
            Type::Int => Kind::Int,
            Type::Str => Kind::Str,
            Type::IntOrStr => Kind::IntOrStr,
            Type::Undefined => Kind::Undefined,
        }
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Type::Function { .. })
    }

    pub fn num_params(&self) -> Option<u16> {
        match self {
            Type::Function { num_params, .. } => Some(*num_params),
            _ => None,
        }
    }

    pub fn return_type(&self) -> Option<Kind> {
        match self {
            Type::Function { return_type, .. } => Some(*return_type),
            _ => None,
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Function {
                num_params,
                return_type,
            } => write!(f, "fn({num_params}) -> {return_type}"),
            ty => write!(f, "{}", ty.kind()),
        }
    }
}

/// Per-symbol record: its type plus the literal value it was declared with.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeInfo {
    pub ty: Type,
    pub int_val: i64,
    pub string_val: String,
}

impl TypeInfo {
    pub fn new(ty: Type) -> Self {
        Self {
            ty,
            ..Default::default()
        }
    }

    pub fn with_int_val(mut self, int_val: i64) -> Self {
        self.int_val = int_val;
        self
    }

    pub fn with_string_val(mut self, string_val: impl Into<String>) -> Self {
        self.string_val = string_val.into();
        self
    }
}

/// Flat numeric form of a [`TypeInfo`], with kinds as integer tags and
/// [`NOT_APPLICABLE`] in the function-only fields of non-functions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTypeInfo {
    pub ty: i32,
    pub num_params: i32,
    pub return_type: i32,
    pub int_val: i64,
    pub string_val: String,
}

impl RawTypeInfo {
    /// What a lookup of an absent name reports in the numeric form.
    pub fn not_found() -> Self {
        Self {
            ty: Kind::Undefined.code(),
            num_params: NOT_APPLICABLE,
            return_type: NOT_APPLICABLE,
            int_val: 0,
            string_val: String::new(),
        }
    }
}

impl From<&TypeInfo> for RawTypeInfo {
    fn from(info: &TypeInfo) -> Self {
        let (num_params, return_type) = match info.ty {
            Type::Function {
                num_params,
                return_type,
            } => (i32::from(num_params), return_type.code()),
            _ => (NOT_APPLICABLE, NOT_APPLICABLE),
        };

        Self {
            ty: info.ty.kind().code(),
            num_params,
            return_type,
            int_val: info.int_val,
            string_val: info.string_val.clone(),
        }
    }
}

impl From<TypeInfo> for RawTypeInfo {
    fn from(info: TypeInfo) -> Self {
        RawTypeInfo::from(&info)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeInfoError {
    #[error("unknown type tag {0}")]
    UnknownType(i32),

    #[error("function declared with invalid parameter count {0}")]
    InvalidParamCount(i32),

    #[error("function declared with unknown return type tag {0}")]
    UnknownReturnType(i32),

    #[error("`{kind}` symbol carries function data (num_params = {num_params}, return_type = {return_type})")]
    UnexpectedFunctionData {
        kind: Kind,
        num_params: i32,
        return_type: i32,
    },

    #[error("symbol name is empty")]
    EmptyName,
}

impl TryFrom<RawTypeInfo> for TypeInfo {
    type Error = TypeInfoError;

    fn try_from(raw: RawTypeInfo) -> Result<Self, Self::Error> {
        let kind = Kind::from_code(raw.ty).ok_or(TypeInfoError::UnknownType(raw.ty))?;

        let ty = match kind {
            Kind::Function => {
                let num_params = u16::try_from(raw.num_params)
                    .map_err(|_| TypeInfoError::InvalidParamCount(raw.num_params))?;
                let return_type = Kind::from_code(raw.return_type)
                    .ok_or(TypeInfoError::UnknownReturnType(raw.return_type))?;
                Type::Function {
                    num_params,
                    return_type,
                }
            }
            _ if raw.num_params != NOT_APPLICABLE || raw.return_type != NOT_APPLICABLE => {
                return Err(TypeInfoError::UnexpectedFunctionData {
                    kind,
                    num_params: raw.num_params,
                    return_type: raw.return_type,
                })
            }
            Kind::Int => Type::Int,
            Kind::Str => Type::Str,
            Kind::IntOrStr => Type::IntOrStr,
            Kind::Undefined => Type::Undefined,
        };

        Ok(TypeInfo {
            ty,
            int_val: raw.int_val,
            string_val: raw.string_val,
        })
    }
}

#[cfg(test)]
mod test;
