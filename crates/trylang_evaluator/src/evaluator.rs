//! The evaluator.
//!
//! Executes a lowered block statement by statement with an instruction
//! cursor. Labels are indexed once up front; gotos move the cursor.
//!
//! Writes made by the statement being executed are journaled. If that
//! statement faults, the journal is replayed in reverse so the store is
//! left exactly as it was before the statement started.

use crate::error::{ArithmeticFault, InternalError, RuntimeError};
use crate::store::VariableStore;
use rustc_hash::FxHashMap;
use trylang_binder::*;
use trylang_core::value::{TypeSymbol, Value};
use trylang_options::CompilerOptions;

/// Evaluate `program` against `store`.
///
/// Returns the value of the last expression statement executed, or `None`
/// if no expression statement ran.
pub fn evaluate(
    program: &BoundBlockStatement,
    store: &mut VariableStore,
    options: &CompilerOptions,
) -> Result<Option<Value>, RuntimeError> {
    Evaluator::new(program, store, options).run()
}

/// What to do after a statement completes.
enum Step {
    Next,
    Produced(Value),
    Jump(usize),
}

pub struct Evaluator<'a> {
    program: &'a BoundBlockStatement,
    store: &'a mut VariableStore,
    checked_arithmetic: bool,
    /// Previous values of the slots written by the current statement.
    journal: Vec<(String, TypeSymbol, Option<Value>)>,
}

impl<'a> Evaluator<'a> {
    pub fn new(
        program: &'a BoundBlockStatement,
        store: &'a mut VariableStore,
        options: &CompilerOptions,
    ) -> Self {
        Self {
            program,
            store,
            checked_arithmetic: options.checked_arithmetic(),
            journal: Vec::new(),
        }
    }

    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(statements = self.program.statements.len(), checked = self.checked_arithmetic)
    )]
    pub fn run(mut self) -> Result<Option<Value>, RuntimeError> {
        let program = self.program;
        let labels = index_labels(program)?;

        let mut last_value = None;
        let mut index = 0;
        while let Some(statement) = program.statements.get(index) {
            self.journal.clear();
            let step = match self.execute(statement, &labels) {
                Ok(step) => step,
                Err(error) => {
                    self.rollback();
                    tracing::debug!(index, %error, "evaluation faulted");
                    return Err(error);
                }
            };
            index = match step {
                Step::Next => index + 1,
                Step::Produced(value) => {
                    last_value = Some(value);
                    index + 1
                }
                Step::Jump(target) => {
                    tracing::trace!(from = index, to = target, "jump");
                    target
                }
            };
        }

        tracing::debug!(variables = self.store.len(), "evaluation complete");
        Ok(last_value)
    }

    fn execute(
        &mut self,
        statement: &BoundStatement,
        labels: &FxHashMap<BoundLabel, usize>,
    ) -> Result<Step, RuntimeError> {
        match statement {
            BoundStatement::Expression(s) => {
                let value = self.evaluate_expression(&s.expression)?;
                Ok(Step::Produced(value))
            }
            BoundStatement::VariableDeclaration(s) => {
                let value = self.evaluate_expression(&s.initializer)?;
                self.write(&s.variable, value);
                Ok(Step::Next)
            }
            BoundStatement::Label(_) => Ok(Step::Next),
            BoundStatement::Goto(s) => Ok(Step::Jump(resolve(labels, s.label)?)),
            BoundStatement::ConditionalGoto(s) => {
                let condition = self.evaluate_expression(&s.condition)?;
                if expect_bool(condition)? == s.jump_if_true {
                    Ok(Step::Jump(resolve(labels, s.label)?))
                } else {
                    Ok(Step::Next)
                }
            }
            BoundStatement::Block(_)
            | BoundStatement::If(_)
            | BoundStatement::While(_)
            | BoundStatement::For(_) => {
                Err(InternalError::UnloweredStatement(statement.kind()).into())
            }
        }
    }

    /// Store `value` into `variable`'s slot. The slot is chosen by the
    /// value's tag, which the evaluator has already checked against the
    /// variable's type.
    fn write(&mut self, variable: &VariableSymbol, value: Value) {
        let previous = self.store.set(&variable.name, value);
        self.journal
            .push((variable.name.clone(), value.type_symbol(), previous));
    }

    fn rollback(&mut self) {
        while let Some((name, ty, previous)) = self.journal.pop() {
            match previous {
                Some(value) => {
                    self.store.set(&name, value);
                }
                None => {
                    self.store.remove(&name, ty);
                }
            }
        }
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn evaluate_expression(&mut self, expression: &BoundExpression) -> Result<Value, RuntimeError> {
        let value = match expression {
            BoundExpression::Literal(e) => e.value,
            BoundExpression::Variable(e) => self
                .store
                .get(&e.variable.name, e.variable.ty)
                .ok_or_else(|| InternalError::UndefinedVariable(e.variable.name.clone()))?,
            BoundExpression::Assignment(e) => {
                let value = self.evaluate_expression(&e.expression)?;
                self.write(&e.variable, value);
                value
            }
            BoundExpression::Unary(e) => self.evaluate_unary(e)?,
            BoundExpression::Binary(e) => self.evaluate_binary(e)?,
            BoundExpression::Error(_) => return Err(InternalError::ErrorExpression.into()),
        };

        let expected = expression.ty();
        let got = value.type_symbol();
        if got != expected {
            return Err(InternalError::TypeMismatch { expected, got }.into());
        }
        Ok(value)
    }

    fn evaluate_unary(&mut self, node: &BoundUnaryExpression) -> Result<Value, RuntimeError> {
        let operand = self.evaluate_expression(&node.operand)?;
        let value = match node.op.kind {
            BoundUnaryOperatorKind::Identity => Value::Int(expect_int(operand)?),
            BoundUnaryOperatorKind::Negation => {
                let v = expect_int(operand)?;
                if self.checked_arithmetic {
                    Value::Int(v.checked_neg().ok_or(ArithmeticFault::Overflow {
                        operator: node.op.text(),
                    })?)
                } else {
                    Value::Int(v.wrapping_neg())
                }
            }
            BoundUnaryOperatorKind::LogicalNegation => Value::Bool(!expect_bool(operand)?),
        };
        Ok(value)
    }

    /// Evaluate the left operand, then the right one unless `&&` or `||`
    /// is already decided by the left.
    fn evaluate_binary(&mut self, node: &BoundBinaryExpression) -> Result<Value, RuntimeError> {
        use BoundBinaryOperatorKind as K;

        let left = self.evaluate_expression(&node.left)?;
        let rhs = &node.right;
        let operator = node.op.text();
        let value = match node.op.kind {
            K::LogicalAnd => Value::Bool(expect_bool(left)? && self.evaluate_bool(rhs)?),
            K::LogicalOr => Value::Bool(expect_bool(left)? || self.evaluate_bool(rhs)?),
            K::Equals => Value::Bool(left == self.evaluate_expression(rhs)?),
            K::NotEquals => Value::Bool(left != self.evaluate_expression(rhs)?),
            K::Less => Value::Bool(expect_int(left)? < self.evaluate_int(rhs)?),
            K::LessOrEquals => Value::Bool(expect_int(left)? <= self.evaluate_int(rhs)?),
            K::Greater => Value::Bool(expect_int(left)? > self.evaluate_int(rhs)?),
            K::GreaterOrEquals => Value::Bool(expect_int(left)? >= self.evaluate_int(rhs)?),
            K::Addition => {
                let r = self.evaluate_expression(rhs)?;
                self.integer_op(left, r, operator, i64::checked_add, i64::wrapping_add)?
            }
            K::Subtraction => {
                let r = self.evaluate_expression(rhs)?;
                self.integer_op(left, r, operator, i64::checked_sub, i64::wrapping_sub)?
            }
            K::Multiplication => {
                let r = self.evaluate_expression(rhs)?;
                self.integer_op(left, r, operator, i64::checked_mul, i64::wrapping_mul)?
            }
            K::Division => {
                let r = check_divisor(self.evaluate_expression(rhs)?)?;
                self.integer_op(left, r, operator, i64::checked_div, i64::wrapping_div)?
            }
            K::Modulo => {
                let r = check_divisor(self.evaluate_expression(rhs)?)?;
                self.integer_op(left, r, operator, i64::checked_rem, i64::wrapping_rem)?
            }
        };
        Ok(value)
    }

    fn evaluate_int(&mut self, expression: &BoundExpression) -> Result<i64, RuntimeError> {
        let value = self.evaluate_expression(expression)?;
        Ok(expect_int(value)?)
    }

    fn evaluate_bool(&mut self, expression: &BoundExpression) -> Result<bool, RuntimeError> {
        let value = self.evaluate_expression(expression)?;
        Ok(expect_bool(value)?)
    }

    fn integer_op(
        &self,
        left: Value,
        right: Value,
        operator: &'static str,
        checked: fn(i64, i64) -> Option<i64>,
        wrapping: fn(i64, i64) -> i64,
    ) -> Result<Value, RuntimeError> {
        let (l, r) = (expect_int(left)?, expect_int(right)?);
        if self.checked_arithmetic {
            let result = checked(l, r).ok_or(ArithmeticFault::Overflow { operator })?;
            Ok(Value::Int(result))
        } else {
            Ok(Value::Int(wrapping(l, r)))
        }
    }
}

/// Map every label to the index of its statement.
fn index_labels(program: &BoundBlockStatement) -> Result<FxHashMap<BoundLabel, usize>, InternalError> {
    let mut labels = FxHashMap::default();
    for (index, statement) in program.statements.iter().enumerate() {
        if let BoundStatement::Label(s) = statement {
            if labels.insert(s.label, index).is_some() {
                return Err(InternalError::DuplicateLabel(s.label));
            }
        }
    }
    Ok(labels)
}

fn resolve(labels: &FxHashMap<BoundLabel, usize>, label: BoundLabel) -> Result<usize, InternalError> {
    labels
        .get(&label)
        .copied()
        .ok_or(InternalError::UnresolvedLabel(label))
}

/// Pass `divisor` through unless it is zero.
fn check_divisor(divisor: Value) -> Result<Value, RuntimeError> {
    if expect_int(divisor)? == 0 {
        return Err(ArithmeticFault::DivisionByZero.into());
    }
    Ok(divisor)
}

fn expect_int(value: Value) -> Result<i64, InternalError> {
    value.as_int().ok_or(InternalError::TypeMismatch {
        expected: TypeSymbol::Int,
        got: value.type_symbol(),
    })
}

fn expect_bool(value: Value) -> Result<bool, InternalError> {
    value.as_bool().ok_or(InternalError::TypeMismatch {
        expected: TypeSymbol::Bool,
        got: value.type_symbol(),
    })
}
