use std::{fmt::Display, rc::Rc};

use crate::{
    eval::prelude::RuntimeError,
    parser::prelude::{BlockStatement, Identifier},
};

use super::prelude::{Env, HashPairs};

pub const TRUE: Value = Value::Boolean { value: true };
pub const FALSE: Value = Value::Boolean { value: false };
pub const NULL: Value = Value::Null;

pub type BuiltinFn = fn(&[Value]) -> Result<Value, RuntimeError>;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer {
        value: i64
    },
    Float {
        value: f64,
    },
    Boolean {
        value: bool
    },
    Null,
    String {
        value: String,
    },
    Array {
        elements: Rc<Vec<Value>>,
    },
    Hash {
        pairs: Rc<HashPairs>,
    },
    Function(Rc<Function>),
    Builtin(Builtin),
    Error {
        message: String,
    },
    Return {
        value: Box<Value>,
    },
}

impl Value {
    pub fn string(value: impl Into<String>) -> Self {
        Self::String { value: value.into() }
    }

    pub fn array(elements: Vec<Value>) -> Self {
        Self::Array { elements: Rc::new(elements) }
    }

    pub fn hash(pairs: HashPairs) -> Self {
        Self::Hash { pairs: Rc::new(pairs) }
    }

    pub fn boolean(value: bool) -> Self {
        if value { TRUE } else { FALSE }
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Integer { .. } => ValueType::Integer,
            Self::Float { .. } => ValueType::Float,
            Self::Boolean { .. } => ValueType::Boolean,
            Self::Null => ValueType::Null,
            Self::String { .. } => ValueType::String,
            Self::Array { .. } => ValueType::Array,
            Self::Hash { .. } => ValueType::Hash,
            Self::Function(_) => ValueType::Function,
            Self::Builtin(_) => ValueType::Builtin,
            Self::Error { .. } => ValueType::Error,
            Self::Return { .. } => ValueType::ReturnValue,
        }
    }

    /// `null`, `false`, `0` and `0.0` are falsy, everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Boolean { value } => *value,
            Self::Integer { value } => *value != 0,
            Self::Float { value } => *value != 0.0,
            _ => true,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer { value } => write!(f, "{value}"),
            Value::Float { value } => write!(f, "{value}"),
            Value::Boolean { value } => write!(f, "{value}"),
            Value::Null => write!(f, "null"),
            Value::String { value } => write!(f, "{value}"),
            Value::Array { elements } => {
                let elements = elements.iter()
                    .map(|element| element.to_string())
                    .collect::<Vec<String>>();

                write!(f, "[{}]", elements.join(", "))
            },
            Value::Hash { pairs } => {
                let pairs = pairs.iter()
                    .map(|pair| format!("{}: {}", pair.key, pair.value))
                    .collect::<Vec<String>>();

                write!(f, "{{{}}}", pairs.join(", "))
            },
            Value::Function(function) => write!(f, "{function}"),
            Value::Builtin(_) => write!(f, "builtin function"),
            Value::Error { message } => write!(f, "ERROR: {message}"),
            Value::Return { value } => write!(f, "{value}"),
        }
    }
}

/// A closure: parameters and body shared with the tree, plus the frame it was created in.
pub struct Function {
    pub parameters: Rc<[Identifier]>,
    pub body: Rc<BlockStatement>,
    pub env: Env,
}

impl std::fmt::Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
            .field("parameters", &self.parameters)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.parameters == other.parameters
            && self.body == other.body
            && Rc::ptr_eq(&self.env, &other.env)
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parameters = self.parameters.iter()
            .map(|parameter| parameter.value.as_str())
            .collect::<Vec<&str>>();

        write!(f, "fn({}) {}", parameters.join(", "), self.body)
    }
}

#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

impl std::fmt::Debug for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Builtin({})", self.name)
    }
}

impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Integer,
    Float,
    Boolean,
    Null,
    String,
    Array,
    Hash,
    Function,
    Builtin,
    Error,
    ReturnValue,
}

impl Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ValueType::Integer => "INTEGER",
            ValueType::Float => "FLOAT",
            ValueType::Boolean => "BOOLEAN",
            ValueType::Null => "NULL",
            ValueType::String => "STRING",
            ValueType::Array => "ARRAY",
            ValueType::Hash => "HASH",
            ValueType::Function => "FUNCTION",
            ValueType::Builtin => "BUILTIN",
            ValueType::Error => "ERROR",
            ValueType::ReturnValue => "RETURN_VALUE",
        };

        write!(f, "{name}")
    }
}
