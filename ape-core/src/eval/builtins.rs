use crate::{
    environment::prelude::{Builtin, BuiltinFn, HashPairs, Value, ValueType, NULL},
    utils::prelude::parse_integer,
};

use super::prelude::RuntimeError;

pub static BUILTINS: &[(&str, BuiltinFn)] = &[
    ("len", len),
    ("print", print),
    ("type", type_name),
    ("is_int", is_int),
    ("is_float", is_float),
    ("is_bool", is_bool),
    ("is_string", is_string),
    ("is_array", is_array),
    ("is_hash", is_hash),
    ("is_null", is_null),
    ("is_function", is_function),
    ("int", int),
    ("float", float),
    ("string", string),
    ("array", array),
    ("bool", bool),
    ("first", first),
    ("last", last),
    ("rest", rest),
    ("init", init),
    ("at", at),
    ("set_at", set_at),
    ("push", push),
    ("pop", pop),
    ("push_front", push_front),
    ("pop_front", pop_front),
    ("insert", insert),
    ("remove", remove),
    ("reverse", reverse),
    ("keys", keys),
    ("values", values),
    ("entries", entries),
    ("has_key", has_key),
    ("set", set),
    ("delete", delete),
    ("char", char),
    ("ascii", ascii),
    ("split", split),
    ("split_once", split_once),
    ("join", join),
];

pub fn lookup_builtin(name: &str) -> Option<Value> {
    BUILTINS.iter()
        .find(|(builtin, _)| *builtin == name)
        .map(|&(name, func)| Value::Builtin(Builtin { name, func }))
}

fn fail<T>(message: String) -> Result<T, RuntimeError> {
    Err(RuntimeError::Builtin { message })
}

fn arity(args: &[Value], want: usize) -> Result<(), RuntimeError> {
    if args.len() != want {
        return Err(RuntimeError::BuiltinArity { got: args.len(), want });
    }

    Ok(())
}

fn not_a_sequence<T>(name: &str, value: &Value) -> Result<T, RuntimeError> {
    fail(format!("argument to `{name}` must be ARRAY or STRING, got {}", value.value_type()))
}

fn index_arg(name: &str, value: &Value) -> Result<i64, RuntimeError> {
    match value {
        Value::Integer { value } => Ok(*value),
        other => fail(format!("index to `{name}` must be INTEGER, got {}", other.value_type())),
    }
}

fn string_arg<'a>(name: &str, value: &'a Value) -> Result<&'a str, RuntimeError> {
    match value {
        Value::String { value } => Ok(value),
        other => fail(format!("argument to `{name}` must be STRING, got {}", other.value_type())),
    }
}

fn hash_arg<'a>(position: &str, name: &str, value: &'a Value) -> Result<&'a HashPairs, RuntimeError> {
    match value {
        Value::Hash { pairs } => Ok(pairs),
        other => fail(format!("{position}argument to `{name}` must be HASH, got {}", other.value_type())),
    }
}

fn hashable_arg(name: &str, value: &Value) -> Result<(), RuntimeError> {
    match value.hash_key() {
        Ok(_) => Ok(()),
        Err(_) => fail(format!("second argument to `{name}` must be HASHABLE, got {}", value.value_type())),
    }
}

/// Maps a possibly negative index onto `0..len`.
fn resolve(index: i64, len: usize) -> Option<usize> {
    let resolved = if index < 0 { index + len as i64 } else { index };

    (0..len as i64).contains(&resolved).then_some(resolved as usize)
}

/// Like `resolve`, but `len` itself is a valid insertion slot.
fn resolve_slot(index: i64, len: usize) -> Option<usize> {
    let resolved = if index < 0 { index + len as i64 } else { index };

    (0..=len as i64).contains(&resolved).then_some(resolved as usize)
}

fn chars(value: &str) -> Vec<char> {
    value.chars().collect()
}

fn from_chars(chars: &[char]) -> Value {
    Value::string(chars.iter().collect::<String>())
}

fn len(args: &[Value]) -> Result<Value, RuntimeError> {
    arity(args, 1)?;

    let len = match &args[0] {
        Value::String { value } => value.chars().count(),
        Value::Array { elements } => elements.len(),
        Value::Hash { pairs } => pairs.len(),
        other => return fail(format!("argument to `len` not supported, got {}", other.value_type())),
    };

    Ok(Value::Integer { value: len as i64 })
}

fn print(args: &[Value]) -> Result<Value, RuntimeError> {
    let line = args.iter()
        .map(|arg| arg.to_string())
        .collect::<String>();

    println!("{line}");

    Ok(NULL)
}

fn type_name(args: &[Value]) -> Result<Value, RuntimeError> {
    arity(args, 1)?;

    Ok(Value::string(args[0].value_type().to_string()))
}

fn is_type(args: &[Value], value_type: ValueType) -> Result<Value, RuntimeError> {
    arity(args, 1)?;

    Ok(Value::boolean(args[0].value_type() == value_type))
}

fn is_int(args: &[Value]) -> Result<Value, RuntimeError> {
    is_type(args, ValueType::Integer)
}

fn is_float(args: &[Value]) -> Result<Value, RuntimeError> {
    is_type(args, ValueType::Float)
}

fn is_bool(args: &[Value]) -> Result<Value, RuntimeError> {
    is_type(args, ValueType::Boolean)
}

fn is_string(args: &[Value]) -> Result<Value, RuntimeError> {
    is_type(args, ValueType::String)
}

fn is_array(args: &[Value]) -> Result<Value, RuntimeError> {
    is_type(args, ValueType::Array)
}

fn is_hash(args: &[Value]) -> Result<Value, RuntimeError> {
    is_type(args, ValueType::Hash)
}

fn is_null(args: &[Value]) -> Result<Value, RuntimeError> {
    is_type(args, ValueType::Null)
}

fn is_function(args: &[Value]) -> Result<Value, RuntimeError> {
    is_type(args, ValueType::Function)
}

fn int(args: &[Value]) -> Result<Value, RuntimeError> {
    arity(args, 1)?;

    let value = match &args[0] {
        Value::Integer { value } => *value,
        Value::Float { value } => *value as i64,
        Value::Boolean { value } => i64::from(*value),
        Value::String { value } => match parse_integer(value) {
            Some(integer) => integer,
            None => return fail(format!("could not convert {value:?} to integer")),
        },
        other => return fail(format!("argument to `int` not supported, got {}", other.value_type())),
    };

    Ok(Value::Integer { value })
}

fn float(args: &[Value]) -> Result<Value, RuntimeError> {
    arity(args, 1)?;

    let value = match &args[0] {
        Value::Integer { value } => *value as f64,
        Value::Float { value } => *value,
        Value::Boolean { value } => if *value { 1.0 } else { 0.0 },
        Value::String { value } => match value.parse::<f64>() {
            Ok(float) => float,
            Err(_) => return fail(format!("could not convert {value:?} to float")),
        },
        other => return fail(format!("argument to `float` not supported, got {}", other.value_type())),
    };

    Ok(Value::Float { value })
}

fn string(args: &[Value]) -> Result<Value, RuntimeError> {
    arity(args, 1)?;

    Ok(Value::string(args[0].to_string()))
}

fn array(args: &[Value]) -> Result<Value, RuntimeError> {
    arity(args, 1)?;

    match &args[0] {
        Value::Array { .. } => Ok(args[0].clone()),
        Value::String { value } => Ok(Value::array(
            value.chars().map(Value::string).collect()
        )),
        other => fail(format!("argument to `array` not supported, got {}", other.value_type())),
    }
}

fn bool(args: &[Value]) -> Result<Value, RuntimeError> {
    arity(args, 1)?;

    Ok(Value::boolean(args[0].is_truthy()))
}

fn first(args: &[Value]) -> Result<Value, RuntimeError> {
    arity(args, 1)?;

    match &args[0] {
        Value::Array { elements } => Ok(elements.first().cloned().unwrap_or(NULL)),
        Value::String { value } => Ok(value.chars().next().map(Value::string).unwrap_or(NULL)),
        other => not_a_sequence("first", other),
    }
}

fn last(args: &[Value]) -> Result<Value, RuntimeError> {
    arity(args, 1)?;

    match &args[0] {
        Value::Array { elements } => Ok(elements.last().cloned().unwrap_or(NULL)),
        Value::String { value } => Ok(value.chars().last().map(Value::string).unwrap_or(NULL)),
        other => not_a_sequence("last", other),
    }
}

fn rest(args: &[Value]) -> Result<Value, RuntimeError> {
    arity(args, 1)?;

    match &args[0] {
        Value::Array { elements } => Ok(match elements.split_first() {
            Some((_, rest)) => Value::array(rest.to_vec()),
            None => NULL,
        }),
        Value::String { value } => Ok(match chars(value).split_first() {
            Some((_, rest)) => from_chars(rest),
            None => NULL,
        }),
        other => not_a_sequence("rest", other),
    }
}

fn init(args: &[Value]) -> Result<Value, RuntimeError> {
    arity(args, 1)?;

    match &args[0] {
        Value::Array { elements } => Ok(match elements.split_last() {
            Some((_, init)) => Value::array(init.to_vec()),
            None => NULL,
        }),
        Value::String { value } => Ok(match chars(value).split_last() {
            Some((_, init)) => from_chars(init),
            None => NULL,
        }),
        other => not_a_sequence("init", other),
    }
}

fn at(args: &[Value]) -> Result<Value, RuntimeError> {
    arity(args, 2)?;

    match &args[0] {
        Value::Array { elements } => {
            let index = index_arg("at", &args[1])?;

            Ok(resolve(index, elements.len())
                .map(|index| elements[index].clone())
                .unwrap_or(NULL))
        },
        Value::String { value } => {
            let index = index_arg("at", &args[1])?;
            let chars = chars(value);

            Ok(resolve(index, chars.len())
                .map(|index| Value::string(chars[index]))
                .unwrap_or(NULL))
        },
        other => not_a_sequence("at", other),
    }
}

fn set_at(args: &[Value]) -> Result<Value, RuntimeError> {
    arity(args, 3)?;

    match &args[0] {
        Value::Array { elements } => {
            let index = index_arg("set_at", &args[1])?;
            let Some(slot) = resolve(index, elements.len()) else {
                return Err(RuntimeError::IndexOutOfRange { index });
            };

            let mut elements = elements.to_vec();
            elements[slot] = args[2].clone();

            Ok(Value::array(elements))
        },
        Value::String { value } => {
            let index = index_arg("set_at", &args[1])?;
            let replacement = chars(string_arg("set_at", &args[2])?);

            if replacement.len() != 1 {
                return fail(format!(
                    "argument to `set_at` must be single character, got {} characters",
                    replacement.len()
                ));
            }

            let mut chars = chars(value);
            let Some(slot) = resolve(index, chars.len()) else {
                return Err(RuntimeError::IndexOutOfRange { index });
            };
            chars[slot] = replacement[0];

            Ok(from_chars(&chars))
        },
        other => not_a_sequence("set_at", other),
    }
}

fn push(args: &[Value]) -> Result<Value, RuntimeError> {
    arity(args, 2)?;

    match &args[0] {
        Value::Array { elements } => {
            let mut elements = elements.to_vec();
            elements.push(args[1].clone());

            Ok(Value::array(elements))
        },
        Value::String { value } => {
            let suffix = string_arg("push", &args[1])?;

            Ok(Value::string(format!("{value}{suffix}")))
        },
        other => not_a_sequence("push", other),
    }
}

fn pop(args: &[Value]) -> Result<Value, RuntimeError> {
    arity(args, 1)?;

    match &args[0] {
        Value::Array { .. } | Value::String { .. } => init(args),
        other => not_a_sequence("pop", other),
    }
}

fn push_front(args: &[Value]) -> Result<Value, RuntimeError> {
    arity(args, 2)?;

    match &args[0] {
        Value::Array { elements } => {
            let mut elements = elements.to_vec();
            elements.insert(0, args[1].clone());

            Ok(Value::array(elements))
        },
        Value::String { value } => {
            let prefix = string_arg("push_front", &args[1])?;

            Ok(Value::string(format!("{prefix}{value}")))
        },
        other => not_a_sequence("push_front", other),
    }
}

fn pop_front(args: &[Value]) -> Result<Value, RuntimeError> {
    arity(args, 1)?;

    match &args[0] {
        Value::Array { .. } | Value::String { .. } => rest(args),
        other => not_a_sequence("pop_front", other),
    }
}

fn insert(args: &[Value]) -> Result<Value, RuntimeError> {
    arity(args, 3)?;

    match &args[0] {
        Value::Array { elements } => {
            let index = index_arg("insert", &args[1])?;
            let Some(slot) = resolve_slot(index, elements.len()) else {
                return Err(RuntimeError::IndexOutOfRange { index });
            };

            let mut elements = elements.to_vec();
            elements.insert(slot, args[2].clone());

            Ok(Value::array(elements))
        },
        Value::String { value } => {
            let index = index_arg("insert", &args[1])?;
            let inserted = string_arg("insert", &args[2])?;

            let chars = chars(value);
            let Some(slot) = resolve_slot(index, chars.len()) else {
                return Err(RuntimeError::IndexOutOfRange { index });
            };

            let (before, after) = chars.split_at(slot);

            Ok(Value::string(format!("{}{inserted}{}", before.iter().collect::<String>(), after.iter().collect::<String>())))
        },
        other => not_a_sequence("insert", other),
    }
}

fn remove(args: &[Value]) -> Result<Value, RuntimeError> {
    arity(args, 2)?;

    match &args[0] {
        Value::Array { elements } => {
            let index = index_arg("remove", &args[1])?;
            let Some(slot) = resolve(index, elements.len()) else {
                return Err(RuntimeError::IndexOutOfRange { index });
            };

            let mut elements = elements.to_vec();
            elements.remove(slot);

            Ok(Value::array(elements))
        },
        Value::String { value } => {
            let index = index_arg("remove", &args[1])?;

            let mut chars = chars(value);
            let Some(slot) = resolve(index, chars.len()) else {
                return Err(RuntimeError::IndexOutOfRange { index });
            };
            chars.remove(slot);

            Ok(from_chars(&chars))
        },
        other => not_a_sequence("remove", other),
    }
}

fn reverse(args: &[Value]) -> Result<Value, RuntimeError> {
    arity(args, 1)?;

    match &args[0] {
        Value::Array { elements } => Ok(Value::array(elements.iter().rev().cloned().collect())),
        Value::String { value } => Ok(Value::string(value.chars().rev().collect::<String>())),
        other => not_a_sequence("reverse", other),
    }
}

fn keys(args: &[Value]) -> Result<Value, RuntimeError> {
    arity(args, 1)?;

    let pairs = hash_arg("", "keys", &args[0])?;

    Ok(Value::array(pairs.iter().map(|pair| pair.key.clone()).collect()))
}

fn values(args: &[Value]) -> Result<Value, RuntimeError> {
    arity(args, 1)?;

    let pairs = hash_arg("", "values", &args[0])?;

    Ok(Value::array(pairs.iter().map(|pair| pair.value.clone()).collect()))
}

fn entries(args: &[Value]) -> Result<Value, RuntimeError> {
    arity(args, 1)?;

    let pairs = hash_arg("", "entries", &args[0])?;

    Ok(Value::array(pairs.iter()
        .map(|pair| Value::array(vec![pair.key.clone(), pair.value.clone()]))
        .collect()
    ))
}

fn has_key(args: &[Value]) -> Result<Value, RuntimeError> {
    arity(args, 2)?;

    let pairs = hash_arg("first ", "has_key", &args[0])?;
    hashable_arg("has_key", &args[1])?;

    Ok(Value::boolean(pairs.contains(&args[1])?))
}

fn set(args: &[Value]) -> Result<Value, RuntimeError> {
    arity(args, 3)?;

    let pairs = hash_arg("first ", "set", &args[0])?;
    hashable_arg("set", &args[1])?;

    let mut pairs = pairs.clone();
    pairs.insert(args[1].clone(), args[2].clone())?;

    Ok(Value::hash(pairs))
}

fn delete(args: &[Value]) -> Result<Value, RuntimeError> {
    arity(args, 2)?;

    let pairs = hash_arg("first ", "delete", &args[0])?;
    hashable_arg("delete", &args[1])?;

    let mut pairs = pairs.clone();
    pairs.remove(&args[1])?;

    Ok(Value::hash(pairs))
}

fn char(args: &[Value]) -> Result<Value, RuntimeError> {
    arity(args, 1)?;

    let Value::Integer { value } = &args[0] else {
        return fail(format!("argument to `char` must be INTEGER, got {}", args[0].value_type()));
    };

    match u8::try_from(*value) {
        Ok(byte) => Ok(Value::string(char::from(byte))),
        Err(_) => fail(format!("argument to `char` must be between 0 and 255, got {value}")),
    }
}

fn ascii(args: &[Value]) -> Result<Value, RuntimeError> {
    arity(args, 1)?;

    let value = string_arg("ascii", &args[0])?;
    let mut chars = value.chars();

    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(Value::Integer { value: ch as i64 }),
        _ => fail(format!("argument to `ascii` must be a single character, got {value}")),
    }
}

fn split_args<'a>(name: &str, args: &'a [Value]) -> Result<(&'a str, &'a str), RuntimeError> {
    arity(args, 2)?;

    let Value::String { value } = &args[0] else {
        return fail(format!("first argument to `{name}` must be STRING, got {}", args[0].value_type()));
    };
    let Value::String { value: separator } = &args[1] else {
        return fail(format!("second argument to `{name}` must be STRING, got {}", args[1].value_type()));
    };

    Ok((value, separator))
}

fn split(args: &[Value]) -> Result<Value, RuntimeError> {
    let (value, separator) = split_args("split", args)?;

    let parts = if separator.is_empty() {
        value.chars().map(Value::string).collect()
    } else {
        value.split(separator).map(Value::string).collect()
    };

    Ok(Value::array(parts))
}

fn split_once(args: &[Value]) -> Result<Value, RuntimeError> {
    let (value, separator) = split_args("split_once", args)?;

    let parts = if separator.is_empty() {
        let mut chars = value.chars();

        match chars.next() {
            Some(first) => vec![Value::string(first), Value::string(chars.as_str())],
            None => vec![],
        }
    } else {
        value.splitn(2, separator).map(Value::string).collect()
    };

    Ok(Value::array(parts))
}

fn join(args: &[Value]) -> Result<Value, RuntimeError> {
    arity(args, 2)?;

    let Value::Array { elements } = &args[0] else {
        return fail(format!("first argument to `join` must be ARRAY, got {}", args[0].value_type()));
    };
    let Value::String { value: separator } = &args[1] else {
        return fail(format!("second argument to `join` must be STRING, got {}", args[1].value_type()));
    };

    let parts = elements.iter()
        .map(|element| match element {
            Value::String { value } => Ok(value.as_str()),
            other => fail(format!(
                "elements of array passed to `join` must be STRING, got {}",
                other.value_type()
            )),
        })
        .collect::<Result<Vec<&str>, RuntimeError>>()?;

    Ok(Value::string(parts.join(separator)))
}
