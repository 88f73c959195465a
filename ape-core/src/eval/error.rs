use thiserror::Error;

use crate::environment::prelude::ValueType;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("type mismatch: {left} {operator} {right}")]
    TypeMismatch {
        left: ValueType,
        operator: String,
        right: ValueType,
    },
    #[error("unknown operator: {left} {operator} {right}")]
    UnknownInfixOperator {
        left: ValueType,
        operator: String,
        right: ValueType,
    },
    #[error("unknown operator: {operator}{right}")]
    UnknownPrefixOperator {
        operator: String,
        right: ValueType,
    },
    #[error("identifier not found: {name}")]
    IdentifierNotFound {
        name: String,
    },
    #[error("not a function: {value_type}")]
    NotAFunction {
        value_type: ValueType,
    },
    #[error("wrong number of arguments: want={want}, got={got}")]
    WrongArgumentCount {
        want: usize,
        got: usize,
    },
    #[error("unusable as hash key: {value_type}")]
    UnusableAsHashKey {
        value_type: ValueType,
    },
    #[error("index operator not supported: {left}[{index}]")]
    IndexNotSupported {
        left: ValueType,
        index: ValueType,
    },
    #[error("division by zero: {left} {operator} {right}")]
    DivisionByZero {
        left: ValueType,
        operator: String,
        right: ValueType,
    },
    #[error("invalid assignment target: {target}")]
    InvalidAssignmentTarget {
        target: String,
    },
    #[error("negative exponent: {exponent}")]
    NegativeExponent {
        exponent: i64,
    },
    #[error("shift amount out of range: {amount}")]
    ShiftOutOfRange {
        amount: i64,
    },
    #[error("wrong number of arguments. got = {got}, want = {want}")]
    BuiltinArity {
        got: usize,
        want: usize,
    },
    #[error("index out of range: {index}")]
    IndexOutOfRange {
        index: i64,
    },
    #[error("{message}")]
    Builtin {
        message: String,
    },
}
