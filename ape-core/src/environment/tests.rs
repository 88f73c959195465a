use std::rc::Rc;

use pretty_assertions::assert_eq;

use crate::eval::prelude::RuntimeError;

use super::prelude::{Environment, HashPairs, Value, ValueType, FALSE, NULL, TRUE};

fn int(value: i64) -> Value {
    Value::Integer { value }
}

#[test]
fn test_get_walks_outward() {
    let root = Environment::new();
    root.borrow_mut().set("a", int(1));

    let inner = Environment::new_enclosed(&root);
    inner.borrow_mut().set("b", int(2));

    assert_eq!(Some(int(1)), inner.borrow().get("a"));
    assert_eq!(Some(int(2)), inner.borrow().get("b"));
    assert_eq!(None, root.borrow().get("b"));
    assert_eq!(None, inner.borrow().get("c"));
}

#[test]
fn test_set_shadows() {
    let root = Environment::new();
    root.borrow_mut().set("a", int(1));

    let inner = Environment::new_enclosed(&root);
    inner.borrow_mut().set("a", int(2));

    assert_eq!(Some(int(2)), inner.borrow().get("a"));
    assert_eq!(Some(int(1)), root.borrow().get("a"));
}

#[test]
fn test_set_if_exists() {
    let root = Environment::new();
    root.borrow_mut().set("a", int(1));

    let middle = Environment::new_enclosed(&root);
    middle.borrow_mut().set("a", int(2));

    let inner = Environment::new_enclosed(&middle);

    assert!(inner.borrow_mut().set_if_exists("a", int(3)));
    assert_eq!(Some(int(3)), middle.borrow().get("a"));
    assert_eq!(Some(int(1)), root.borrow().get("a"));
    assert!(inner.borrow().store.is_empty());

    assert!(!inner.borrow_mut().set_if_exists("missing", int(4)));
    assert_eq!(None, root.borrow().get("missing"));
}

#[test]
fn test_truthiness() {
    let falsy = [NULL, FALSE, int(0), Value::Float { value: 0.0 }];
    let truthy = [
        TRUE,
        int(-1),
        Value::Float { value: 0.5 },
        Value::string(""),
        Value::array(vec![]),
        Value::hash(HashPairs::new()),
    ];

    for value in falsy {
        assert!(!value.is_truthy(), "{value:?} should be falsy");
    }

    for value in truthy {
        assert!(value.is_truthy(), "{value:?} should be truthy");
    }
}

#[test]
fn test_rendering() -> Result<(), RuntimeError> {
    let mut pairs = HashPairs::new();
    pairs.insert(Value::string("one"), int(1))?;
    pairs.insert(TRUE, Value::string("yes"))?;

    let cases = vec![
        (int(-7), "-7"),
        (Value::Float { value: 1.0 }, "1"),
        (Value::Float { value: 2.5 }, "2.5"),
        (TRUE, "true"),
        (NULL, "null"),
        (Value::string("raw \"text\""), "raw \"text\""),
        (Value::array(vec![int(1), Value::string("a"), NULL]), "[1, a, null]"),
        (Value::hash(pairs), "{one: 1, true: yes}"),
        (Value::Error { message: "boom".to_string() }, "ERROR: boom"),
        (Value::Return { value: Box::new(int(3)) }, "3"),
    ];

    for (value, expected) in cases {
        assert_eq!(expected, value.to_string());
    }

    Ok(())
}

#[test]
fn test_type_names() {
    let cases = vec![
        (int(1), "INTEGER"),
        (Value::Float { value: 1.5 }, "FLOAT"),
        (FALSE, "BOOLEAN"),
        (NULL, "NULL"),
        (Value::string("s"), "STRING"),
        (Value::array(vec![]), "ARRAY"),
        (Value::hash(HashPairs::new()), "HASH"),
        (Value::Error { message: String::new() }, "ERROR"),
        (Value::Return { value: Box::new(NULL) }, "RETURN_VALUE"),
    ];

    for (value, expected) in cases {
        assert_eq!(expected, value.value_type().to_string());
    }
}

#[test]
fn test_hash_keys() -> Result<(), RuntimeError> {
    assert_eq!(Value::string("name").hash_key()?, Value::string("name").hash_key()?);
    assert_eq!(int(1).hash_key()?, int(1).hash_key()?);
    assert!(Value::string("name").hash_key()? != Value::string("other").hash_key()?);
    assert!(int(1).hash_key()? != TRUE.hash_key()?);
    assert!(int(0).hash_key()? != FALSE.hash_key()?);

    assert_eq!(
        Err(RuntimeError::UnusableAsHashKey { value_type: ValueType::Array }),
        Value::array(vec![]).hash_key()
    );

    Ok(())
}

#[test]
fn test_hash_pairs_keep_order() -> Result<(), RuntimeError> {
    let mut pairs = HashPairs::new();
    pairs.insert(Value::string("a"), int(1))?;
    pairs.insert(Value::string("b"), int(2))?;
    pairs.insert(Value::string("c"), int(3))?;
    pairs.insert(Value::string("a"), int(10))?;

    assert_eq!(3, pairs.len());
    assert_eq!("{a: 10, b: 2, c: 3}", Value::hash(pairs.clone()).to_string());

    let removed = pairs.remove(&Value::string("b"))?;
    assert_eq!(Some(int(2)), removed.map(|pair| pair.value));
    assert_eq!(None, pairs.remove(&Value::string("b"))?);

    assert_eq!(Some(&int(3)), pairs.get(&Value::string("c"))?.map(|pair| &pair.value));
    assert!(pairs.contains(&Value::string("a"))?);
    assert!(!pairs.contains(&Value::string("b"))?);
    assert_eq!("{a: 10, c: 3}", Value::hash(pairs).to_string());

    Ok(())
}

#[test]
fn test_function_equality_uses_env_identity() {
    use crate::parser::prelude::parse_program;
    use crate::parser::prelude::{Expression, Statement};
    use super::prelude::Function;

    let (program, errors) = parse_program("fn(x) { x + 1 }");
    assert!(errors.is_empty());

    let Some(Statement::Expression(statement)) = program.statements.first() else {
        panic!("expected an expression statement");
    };
    let Expression::Function(literal) = &statement.expression else {
        panic!("expected a function literal");
    };

    let env = Environment::new();
    let make = |env| Function {
        parameters: literal.parameters.clone(),
        body: literal.body.clone(),
        env,
    };

    assert_eq!(make(env.clone()), make(env.clone()));
    assert!(make(env) != make(Environment::new()));
    assert_eq!("fn(x) { (x + 1) }", Value::Function(Rc::new(make(Environment::new()))).to_string());
}
