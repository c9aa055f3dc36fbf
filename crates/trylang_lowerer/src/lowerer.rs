//! The lowering pass.
//!
//! Shapes produced, where `check`, `else` and `end` are freshly minted labels:
//!
//! ```text
//! if C S            if C S else T           while C B
//!
//! goto end unless C goto else unless C     check:
//! S                 S                       goto end unless C
//! end:              goto end                B
//!                   else:                   goto check
//!                   T                       end:
//!                   end:
//! ```
//!
//! `for v = lo to hi B` becomes `{ let v = lo; while v <= hi { B; v = v + 1 } }`
//! before the `while` is lowered, so `hi` is re-evaluated on every
//! iteration.

use trylang_binder::*;

/// Lower `statement` into a flat block. Labels are numbered from 1 and
/// are unique within the returned block.
#[tracing::instrument(level = "debug", skip_all)]
pub fn lower(statement: BoundStatement) -> BoundBlockStatement {
    let mut lowerer = Lowerer::new();
    let lowered = lowerer.lower_statement(statement);
    let mut statements = Vec::new();
    flatten(lowered, &mut statements);
    tracing::debug!(
        labels = lowerer.label_count,
        statements = statements.len(),
        "lowering complete"
    );
    BoundBlockStatement::new(statements)
}

/// Lower the top-level block produced by the binder.
pub fn lower_program(block: BoundBlockStatement) -> BoundBlockStatement {
    lower(BoundStatement::Block(block))
}

/// Per-pass state. Each call to [`lower`] starts a fresh counter.
struct Lowerer {
    label_count: u32,
}

impl Lowerer {
    fn new() -> Self {
        Self { label_count: 0 }
    }

    fn new_label(&mut self) -> BoundLabel {
        self.label_count += 1;
        BoundLabel::new(self.label_count)
    }

    /// Children are lowered before the parent mints its own labels.
    fn lower_statement(&mut self, statement: BoundStatement) -> BoundStatement {
        match statement {
            BoundStatement::Block(block) => BoundStatement::block(
                block
                    .statements
                    .into_iter()
                    .map(|s| self.lower_statement(s))
                    .collect(),
            ),
            BoundStatement::If(s) => self.lower_if(s),
            BoundStatement::While(s) => {
                let body = self.lower_statement(*s.body);
                self.lower_while(s.condition, body)
            }
            BoundStatement::For(s) => self.lower_for(s),
            other => other,
        }
    }

    fn lower_if(&mut self, node: BoundIfStatement) -> BoundStatement {
        let then_statement = self.lower_statement(*node.then_statement);
        match node.else_statement {
            None => {
                let end = self.new_label();
                BoundStatement::block(vec![
                    BoundStatement::conditional_goto(end, node.condition, false),
                    then_statement,
                    BoundStatement::label(end),
                ])
            }
            Some(else_statement) => {
                let else_statement = self.lower_statement(*else_statement);
                let else_label = self.new_label();
                let end = self.new_label();
                BoundStatement::block(vec![
                    BoundStatement::conditional_goto(else_label, node.condition, false),
                    then_statement,
                    BoundStatement::goto(end),
                    BoundStatement::label(else_label),
                    else_statement,
                    BoundStatement::label(end),
                ])
            }
        }
    }

    /// `body` must already be lowered.
    fn lower_while(&mut self, condition: BoundExpression, body: BoundStatement) -> BoundStatement {
        let check = self.new_label();
        let end = self.new_label();
        BoundStatement::block(vec![
            BoundStatement::label(check),
            BoundStatement::conditional_goto(end, condition, false),
            body,
            BoundStatement::goto(check),
            BoundStatement::label(end),
        ])
    }

    fn lower_for(&mut self, node: BoundForStatement) -> BoundStatement {
        let body = self.lower_statement(*node.body);
        let variable = node.variable;

        let condition = BoundExpression::binary(
            BoundExpression::variable(variable.clone()),
            BoundBinaryOperator::int_less_or_equals(),
            node.upper_bound,
        );
        let increment = BoundStatement::expression(BoundExpression::assignment(
            variable.clone(),
            BoundExpression::binary(
                BoundExpression::variable(variable.clone()),
                BoundBinaryOperator::int_addition(),
                BoundExpression::literal(1i64),
            ),
        ));

        let loop_body = BoundStatement::block(vec![body, increment]);
        BoundStatement::block(vec![
            BoundStatement::variable_declaration(variable, node.lower_bound),
            self.lower_while(condition, loop_body),
        ])
    }
}

/// Splice nested blocks into `out`, preserving order.
fn flatten(statement: BoundStatement, out: &mut Vec<BoundStatement>) {
    match statement {
        BoundStatement::Block(block) => {
            for s in block.statements {
                flatten(s, out);
            }
        }
        other => out.push(other),
    }
}
