use crate::parser::prelude::{
    quote, BlockStatement, Expression, InfixExpression, InfixOperator, Program, Statement
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatterConfig {
    pub indent_char: char,
    pub indent_size: usize,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            indent_char: ' ',
            indent_size: 2,
        }
    }
}

/// Pretty-printer: one statement per line, blocks indented, blank lines kept.
#[derive(Debug, Default)]
pub struct Formatter {
    config: FormatterConfig,
    indentation: usize,
    buffer: String,
}

impl Formatter {
    pub fn new(config: FormatterConfig) -> Self {
        Self {
            config,
            indentation: 0,
            buffer: String::new(),
        }
    }

    pub fn format(mut self, program: &Program) -> String {
        self.write_statements(&program.statements);
        self.buffer
    }

    fn write_indent(&mut self) {
        let width = self.indentation * self.config.indent_size;
        self.buffer.extend(std::iter::repeat(self.config.indent_char).take(width));
    }

    fn write_statements(&mut self, statements: &[Statement]) {
        let is_code = |statement: &Statement| !matches!(statement, Statement::Empty(_));

        // blank lines right after `{` or right before `}` are dropped
        let Some(first) = statements.iter().position(is_code) else {
            return;
        };
        let last = statements.iter().rposition(is_code).unwrap_or(first);

        for statement in &statements[first..=last] {
            match statement {
                Statement::Empty(_) => {
                    if !self.buffer.ends_with("\n\n") {
                        self.buffer.push('\n');
                    }
                },
                statement => {
                    self.write_indent();
                    self.write_statement(statement);
                    self.buffer.push_str(";\n");
                }
            }
        }
    }

    fn write_statement(&mut self, statement: &Statement) {
        match statement {
            Statement::Let(let_statement) => {
                self.buffer.push_str("let ");
                self.buffer.push_str(&let_statement.name.value);
                self.buffer.push_str(" = ");
                self.write_expression(&let_statement.value);
            },
            Statement::Return(return_statement) => {
                self.buffer.push_str("return ");
                self.write_expression(&return_statement.return_value);
            },
            Statement::Expression(statement) => {
                // `{` at the start of a statement would open a block
                if starts_with_hash(&statement.expression) {
                    self.buffer.push('(');
                    self.write_expression(&statement.expression);
                    self.buffer.push(')');
                } else {
                    self.write_expression(&statement.expression);
                }
            },
            Statement::Block(block) => self.write_block(block),
            Statement::Empty(_) => {},
        }
    }

    fn write_block(&mut self, block: &BlockStatement) {
        if block.statements.iter().all(|statement| matches!(statement, Statement::Empty(_))) {
            self.buffer.push_str("{}");
            return;
        }

        self.buffer.push_str("{\n");
        self.indentation += 1;
        self.write_statements(&block.statements);
        self.indentation -= 1;
        self.write_indent();
        self.buffer.push('}');
    }

    fn write_expression(&mut self, expression: &Expression) {
        match expression {
            Expression::Identifier(identifier) => self.buffer.push_str(&identifier.value),
            Expression::Integer(integer) => self.buffer.push_str(&integer.literal),
            Expression::Float(float) => self.buffer.push_str(&float.literal),
            Expression::Boolean(boolean) => self.buffer.push_str(if boolean.value { "true" } else { "false" }),
            Expression::String(string) => self.buffer.push_str(&quote(&string.value)),
            Expression::Array(array) => {
                self.buffer.push('[');
                self.write_list(&array.elements);
                self.buffer.push(']');
            },
            Expression::Hash(hash) => {
                self.buffer.push('{');

                for (i, pair) in hash.pairs.iter().enumerate() {
                    if i > 0 {
                        self.buffer.push_str(", ");
                    }

                    self.write_expression(&pair.key);
                    self.buffer.push_str(": ");
                    self.write_expression(&pair.value);
                }

                self.buffer.push('}');
            },
            Expression::Prefix(prefix) => {
                self.buffer.push_str(prefix.operator.as_str());
                self.write_wrapped(&prefix.right, matches!(*prefix.right, Expression::Infix(_)));
            },
            Expression::Infix(infix) => self.write_infix(infix),
            Expression::If(if_expression) => {
                self.buffer.push_str("if (");
                self.write_expression(&if_expression.condition);
                self.buffer.push_str(") ");
                self.write_block(&if_expression.consequence);

                if let Some(alternative) = &if_expression.alternative {
                    self.buffer.push_str(" else ");
                    self.write_block(alternative);
                }
            },
            Expression::While(while_expression) => {
                self.buffer.push_str("while (");
                self.write_expression(&while_expression.condition);
                self.buffer.push_str(") ");
                self.write_block(&while_expression.body);
            },
            Expression::Function(function) => {
                let parameters = function.parameters.iter()
                    .map(|parameter| parameter.value.as_str())
                    .collect::<Vec<&str>>();

                self.buffer.push_str("fn(");
                self.buffer.push_str(&parameters.join(", "));
                self.buffer.push_str(") ");
                self.write_block(&function.body);
            },
            Expression::Call(call) => {
                self.write_wrapped(&call.function, is_operation(&call.function));
                self.buffer.push('(');
                self.write_list(&call.arguments);
                self.buffer.push(')');
            },
            Expression::Index(index) => {
                self.write_wrapped(&index.left, is_operation(&index.left));
                self.buffer.push('[');
                self.write_expression(&index.index);
                self.buffer.push(']');
            },
        }
    }

    fn write_list(&mut self, expressions: &[Expression]) {
        for (i, expression) in expressions.iter().enumerate() {
            if i > 0 {
                self.buffer.push_str(", ");
            }

            self.write_expression(expression);
        }
    }

    fn write_wrapped(&mut self, expression: &Expression, wrap: bool) {
        if wrap {
            self.buffer.push('(');
        }

        self.write_expression(expression);

        if wrap {
            self.buffer.push(')');
        }
    }

    fn write_infix(&mut self, infix: &InfixExpression) {
        let operator = infix.operator;

        self.write_wrapped(&infix.left, needs_parens(&infix.left, operator, false));
        self.buffer.push(' ');
        self.buffer.push_str(operator.as_str());
        self.buffer.push(' ');
        self.write_wrapped(&infix.right, needs_parens(&infix.right, operator, true));
    }
}

/// Whether an operand of `parent` has to keep its parentheses to parse back the same.
fn needs_parens(operand: &Expression, parent: InfixOperator, right_side: bool) -> bool {
    let Expression::Infix(inner) = operand else {
        return false;
    };

    let (inner, outer) = (inner.operator.precedence(), parent.precedence());

    inner < outer || (inner == outer && right_side != parent.is_right_associative())
}

fn is_operation(expression: &Expression) -> bool {
    matches!(expression, Expression::Infix(_) | Expression::Prefix(_))
}

fn starts_with_hash(expression: &Expression) -> bool {
    match expression {
        Expression::Hash(_) => true,
        Expression::Infix(infix) => starts_with_hash(&infix.left),
        Expression::Call(call) => starts_with_hash(&call.function),
        Expression::Index(index) => starts_with_hash(&index.left),
        _ => false,
    }
}
