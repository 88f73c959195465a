use std::rc::Rc;

use crate::{
    environment::prelude::{Env, Environment, Function, HashPairs, Value, ValueType, FALSE, NULL, TRUE},
    parser::prelude::{
        BlockStatement, CallExpression, Expression, IfExpression, IndexExpression,
        InfixExpression, InfixOperator, PrefixExpression, PrefixOperator, Program,
        Statement, WhileExpression
    },
};

use super::prelude::{lookup_builtin, RuntimeError};

/// Why evaluation of a statement sequence stopped early.
#[derive(Debug, Clone, PartialEq)]
pub enum Unwind {
    Return(Value),
    Error(RuntimeError),
}

impl From<RuntimeError> for Unwind {
    fn from(error: RuntimeError) -> Self {
        Self::Error(error)
    }
}

type EvalResult = Result<Value, Unwind>;

#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Program(&'a Program),
    Statement(&'a Statement),
    Expression(&'a Expression),
}

/// Evaluates any node. A `return` that is not inside a function comes back as
/// `Value::Return`, a failure as `Value::Error`.
#[tracing::instrument(level = "trace", skip_all)]
pub fn eval(node: Node, env: &Env) -> Value {
    let result = match node {
        Node::Program(program) => eval_statements(&program.statements, env),
        Node::Statement(statement) => eval_statement(statement, env),
        Node::Expression(expression) => eval_expression(expression, env),
    };

    match result {
        Ok(value) => value,
        Err(Unwind::Return(value)) => Value::Return { value: Box::new(value) },
        Err(Unwind::Error(error)) => Value::Error { message: error.to_string() },
    }
}

/// Runs a whole program, unwrapping a top-level `return`.
pub fn execute(program: &Program, env: &Env) -> Result<Value, RuntimeError> {
    match eval_statements(&program.statements, env) {
        Ok(value) | Err(Unwind::Return(value)) => Ok(value),
        Err(Unwind::Error(error)) => Err(error),
    }
}

pub fn eval_program(program: &Program, env: &Env) -> Value {
    execute(program, env).unwrap_or_else(|error| Value::Error { message: error.to_string() })
}

fn eval_statements(statements: &[Statement], env: &Env) -> EvalResult {
    let mut result = NULL;

    for statement in statements {
        if let Statement::Empty(_) = statement {
            continue;
        }

        result = eval_statement(statement, env)?;
    }

    Ok(result)
}

fn eval_statement(statement: &Statement, env: &Env) -> EvalResult {
    match statement {
        Statement::Let(let_statement) => {
            let value = eval_expression(&let_statement.value, env)?;
            env.borrow_mut().set(let_statement.name.value.clone(), value);

            Ok(NULL)
        },
        Statement::Return(return_statement) => {
            let value = eval_expression(&return_statement.return_value, env)?;

            Err(Unwind::Return(value))
        },
        Statement::Expression(statement) => eval_expression(&statement.expression, env),
        Statement::Block(block) => eval_block(block, env),
        Statement::Empty(_) => Ok(NULL),
    }
}

fn eval_block(block: &BlockStatement, env: &Env) -> EvalResult {
    let scope = Environment::new_enclosed(env);

    eval_statements(&block.statements, &scope)
}

fn eval_expression(expression: &Expression, env: &Env) -> EvalResult {
    match expression {
        Expression::Identifier(identifier) => Ok(eval_identifier(&identifier.value, env)?),
        Expression::Integer(integer) => Ok(Value::Integer { value: integer.value }),
        Expression::Float(float) => Ok(Value::Float { value: float.value }),
        Expression::Boolean(boolean) => Ok(Value::boolean(boolean.value)),
        Expression::String(string) => Ok(Value::string(string.value.clone())),
        Expression::Array(array) => {
            let elements = array.elements.iter()
                .map(|element| eval_expression(element, env))
                .collect::<Result<Vec<Value>, Unwind>>()?;

            Ok(Value::array(elements))
        },
        Expression::Hash(hash) => {
            let mut pairs = HashPairs::new();

            for pair in &hash.pairs {
                let key = eval_expression(&pair.key, env)?;
                let value = eval_expression(&pair.value, env)?;

                pairs.insert(key, value)?;
            }

            Ok(Value::hash(pairs))
        },
        Expression::Prefix(prefix) => eval_prefix(prefix, env),
        Expression::Infix(infix) => eval_infix(infix, env),
        Expression::If(if_expression) => eval_if(if_expression, env),
        Expression::While(while_expression) => eval_while(while_expression, env),
        Expression::Function(function) => Ok(Value::Function(Rc::new(Function {
            parameters: function.parameters.clone(),
            body: function.body.clone(),
            env: env.clone(),
        }))),
        Expression::Call(call) => eval_call(call, env),
        Expression::Index(index) => eval_index(index, env),
    }
}

fn eval_identifier(name: &str, env: &Env) -> Result<Value, RuntimeError> {
    if let Some(value) = env.borrow().get(name) {
        return Ok(value);
    }

    lookup_builtin(name).ok_or_else(|| RuntimeError::IdentifierNotFound {
        name: name.to_string()
    })
}

fn eval_prefix(prefix: &PrefixExpression, env: &Env) -> EvalResult {
    let right = eval_expression(&prefix.right, env)?;

    match prefix.operator {
        PrefixOperator::Bang => Ok(Value::boolean(!right.is_truthy())),
        PrefixOperator::Minus => match right {
            Value::Integer { value } => Ok(Value::Integer { value: value.wrapping_neg() }),
            Value::Float { value } => Ok(Value::Float { value: -value }),
            other => Err(RuntimeError::UnknownPrefixOperator {
                operator: prefix.operator.to_string(),
                right: other.value_type(),
            }.into()),
        },
    }
}

fn eval_infix(infix: &InfixExpression, env: &Env) -> EvalResult {
    match infix.operator {
        InfixOperator::Assign => return eval_assignment(&infix.left, &infix.right, env),
        InfixOperator::And => {
            if !eval_expression(&infix.left, env)?.is_truthy() {
                return Ok(FALSE);
            }

            return Ok(Value::boolean(eval_expression(&infix.right, env)?.is_truthy()));
        },
        InfixOperator::Or => {
            if eval_expression(&infix.left, env)?.is_truthy() {
                return Ok(TRUE);
            }

            return Ok(Value::boolean(eval_expression(&infix.right, env)?.is_truthy()));
        },
        _ => {}
    }

    let left = eval_expression(&infix.left, env)?;
    let right = eval_expression(&infix.right, env)?;

    Ok(apply_infix(infix.operator, &left, &right)?)
}

fn eval_assignment(target: &Expression, value: &Expression, env: &Env) -> EvalResult {
    let Expression::Identifier(identifier) = target else {
        return Err(RuntimeError::InvalidAssignmentTarget {
            target: target.to_string()
        }.into());
    };

    let value = eval_expression(value, env)?;

    if env.borrow_mut().set_if_exists(&identifier.value, value.clone()) {
        return Ok(value);
    }

    Err(RuntimeError::IdentifierNotFound { name: identifier.value.clone() }.into())
}

pub fn apply_infix(operator: InfixOperator, left: &Value, right: &Value) -> Result<Value, RuntimeError> {
    match (left, right) {
        (Value::Integer { value: l }, Value::Integer { value: r }) => {
            integer_infix(operator, *l, *r)
        },
        (
            Value::Integer { .. } | Value::Float { .. },
            Value::Integer { .. } | Value::Float { .. }
        ) => {
            match float_infix(operator, as_float(left), as_float(right)) {
                Some(value) => Ok(value),
                None => Err(unknown_operator(operator, left, right)),
            }
        },
        (Value::String { value: l }, Value::String { value: r }) => match operator {
            InfixOperator::Plus => Ok(Value::string(format!("{l}{r}"))),
            InfixOperator::Equal => Ok(Value::boolean(l == r)),
            InfixOperator::NotEqual => Ok(Value::boolean(l != r)),
            _ => Err(unknown_operator(operator, left, right)),
        },
        _ => match operator {
            InfixOperator::Equal => Ok(Value::boolean(same_value(left, right))),
            InfixOperator::NotEqual => Ok(Value::boolean(!same_value(left, right))),
            _ if left.value_type() != right.value_type() => Err(RuntimeError::TypeMismatch {
                left: left.value_type(),
                operator: operator.to_string(),
                right: right.value_type(),
            }),
            _ => Err(unknown_operator(operator, left, right)),
        },
    }
}

fn unknown_operator(operator: InfixOperator, left: &Value, right: &Value) -> RuntimeError {
    RuntimeError::UnknownInfixOperator {
        left: left.value_type(),
        operator: operator.to_string(),
        right: right.value_type(),
    }
}

fn as_float(value: &Value) -> f64 {
    match value {
        Value::Integer { value } => *value as f64,
        Value::Float { value } => *value,
        _ => f64::NAN,
    }
}

/// In-language `==` for values that are not both numbers or both strings.
fn same_value(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Boolean { value: l }, Value::Boolean { value: r }) => l == r,
        (Value::Array { elements: l }, Value::Array { elements: r }) => Rc::ptr_eq(l, r),
        (Value::Hash { pairs: l }, Value::Hash { pairs: r }) => Rc::ptr_eq(l, r),
        (Value::Function(l), Value::Function(r)) => Rc::ptr_eq(l, r),
        (Value::Builtin(l), Value::Builtin(r)) => l.name == r.name,
        _ => false,
    }
}

fn integer_infix(operator: InfixOperator, l: i64, r: i64) -> Result<Value, RuntimeError> {
    let integer = |value: i64| -> Result<Value, RuntimeError> { Ok(Value::Integer { value }) };

    match operator {
        InfixOperator::Plus => integer(l.wrapping_add(r)),
        InfixOperator::Minus => integer(l.wrapping_sub(r)),
        InfixOperator::Asterisk => integer(l.wrapping_mul(r)),
        InfixOperator::Slash | InfixOperator::DoubleSlash | InfixOperator::Percent if r == 0 => {
            Err(RuntimeError::DivisionByZero {
                left: ValueType::Integer,
                operator: operator.to_string(),
                right: ValueType::Integer,
            })
        },
        InfixOperator::Slash => integer(l.wrapping_div(r)),
        InfixOperator::DoubleSlash => {
            let quotient = l.wrapping_div(r);
            let remainder = l.wrapping_rem(r);

            if remainder != 0 && (remainder < 0) != (r < 0) {
                integer(quotient.wrapping_sub(1))
            } else {
                integer(quotient)
            }
        },
        InfixOperator::Percent => integer(l.wrapping_rem(r)),
        InfixOperator::Exponent if r < 0 => Err(RuntimeError::NegativeExponent { exponent: r }),
        InfixOperator::Exponent => integer(wrapping_pow(l, r as u64)),
        InfixOperator::LeftShift | InfixOperator::RightShift if !(0..64).contains(&r) => {
            Err(RuntimeError::ShiftOutOfRange { amount: r })
        },
        InfixOperator::LeftShift => integer(l.wrapping_shl(r as u32)),
        InfixOperator::RightShift => integer(l.wrapping_shr(r as u32)),
        InfixOperator::BitXor => integer(l ^ r),
        InfixOperator::LessThan => Ok(Value::boolean(l < r)),
        InfixOperator::LessThanOrEqual => Ok(Value::boolean(l <= r)),
        InfixOperator::GreaterThan => Ok(Value::boolean(l > r)),
        InfixOperator::GreaterThanOrEqual => Ok(Value::boolean(l >= r)),
        InfixOperator::Equal => Ok(Value::boolean(l == r)),
        InfixOperator::NotEqual => Ok(Value::boolean(l != r)),
        InfixOperator::Assign | InfixOperator::And | InfixOperator::Or => {
            Err(RuntimeError::UnknownInfixOperator {
                left: ValueType::Integer,
                operator: operator.to_string(),
                right: ValueType::Integer,
            })
        },
    }
}

fn wrapping_pow(mut base: i64, mut exponent: u64) -> i64 {
    let mut result: i64 = 1;

    while exponent > 0 {
        if exponent & 1 == 1 {
            result = result.wrapping_mul(base);
        }

        base = base.wrapping_mul(base);
        exponent >>= 1;
    }

    result
}

fn float_infix(operator: InfixOperator, l: f64, r: f64) -> Option<Value> {
    let float = |value| Some(Value::Float { value });

    match operator {
        InfixOperator::Plus => float(l + r),
        InfixOperator::Minus => float(l - r),
        InfixOperator::Asterisk => float(l * r),
        InfixOperator::Slash => float(l / r),
        InfixOperator::DoubleSlash => float((l / r).floor()),
        InfixOperator::Percent => float(l % r),
        InfixOperator::Exponent => float(l.powf(r)),
        InfixOperator::LessThan => Some(Value::boolean(l < r)),
        InfixOperator::LessThanOrEqual => Some(Value::boolean(l <= r)),
        InfixOperator::GreaterThan => Some(Value::boolean(l > r)),
        InfixOperator::GreaterThanOrEqual => Some(Value::boolean(l >= r)),
        InfixOperator::Equal => Some(Value::boolean(l == r)),
        InfixOperator::NotEqual => Some(Value::boolean(l != r)),
        _ => None,
    }
}

fn eval_if(if_expression: &IfExpression, env: &Env) -> EvalResult {
    let condition = eval_expression(&if_expression.condition, env)?;

    if condition.is_truthy() {
        return eval_block(&if_expression.consequence, env);
    }

    match &if_expression.alternative {
        Some(alternative) => eval_block(alternative, env),
        None => Ok(NULL),
    }
}

fn eval_while(while_expression: &WhileExpression, env: &Env) -> EvalResult {
    while eval_expression(&while_expression.condition, env)?.is_truthy() {
        eval_block(&while_expression.body, env)?;
    }

    Ok(NULL)
}

fn eval_call(call: &CallExpression, env: &Env) -> EvalResult {
    let function = eval_expression(&call.function, env)?;

    let arguments = call.arguments.iter()
        .map(|argument| eval_expression(argument, env))
        .collect::<Result<Vec<Value>, Unwind>>()?;

    Ok(apply_function(&function, arguments)?)
}

pub fn apply_function(function: &Value, arguments: Vec<Value>) -> Result<Value, RuntimeError> {
    match function {
        Value::Function(function) => {
            if function.parameters.len() != arguments.len() {
                return Err(RuntimeError::WrongArgumentCount {
                    want: function.parameters.len(),
                    got: arguments.len(),
                });
            }

            tracing::debug!(arguments = arguments.len(), "applying {function}");

            let frame = Environment::new_enclosed(&function.env);

            for (parameter, argument) in function.parameters.iter().zip(arguments) {
                frame.borrow_mut().set(parameter.value.clone(), argument);
            }

            match eval_statements(&function.body.statements, &frame) {
                Ok(value) | Err(Unwind::Return(value)) => Ok(value),
                Err(Unwind::Error(error)) => Err(error),
            }
        },
        Value::Builtin(builtin) => {
            tracing::debug!(arguments = arguments.len(), "applying builtin `{}`", builtin.name);

            (builtin.func)(&arguments)
        },
        other => Err(RuntimeError::NotAFunction { value_type: other.value_type() }),
    }
}

fn eval_index(index: &IndexExpression, env: &Env) -> EvalResult {
    let left = eval_expression(&index.left, env)?;
    let index = eval_expression(&index.index, env)?;

    match (&left, &index) {
        (Value::Array { elements }, Value::Integer { value }) => {
            let len = elements.len() as i64;
            let position = if *value < 0 { value + len } else { *value };

            if (0..len).contains(&position) {
                Ok(elements[position as usize].clone())
            } else {
                Ok(NULL)
            }
        },
        (Value::Hash { pairs }, _) => Ok(pairs.get(&index)?
            .map(|pair| pair.value.clone())
            .unwrap_or(NULL)),
        _ => Err(RuntimeError::IndexNotSupported {
            left: left.value_type(),
            index: index.value_type(),
        }.into()),
    }
}
