//! Code-like rendering of bound trees.
//!
//! Lowered programs print one statement per line:
//!
//! ```text
//! var i = 0
//! Label1:
//! goto Label2 unless i < 3
//! i = i + 1
//! goto Label1
//! Label2:
//! ```

use crate::bound_tree::*;
use std::fmt::{self, Write};

const INDENT: &str = "    ";

fn needs_parens(expression: &BoundExpression) -> bool {
    matches!(
        expression,
        BoundExpression::Binary(_) | BoundExpression::Assignment(_)
    )
}

fn write_operand(f: &mut impl Write, operand: &BoundExpression) -> fmt::Result {
    if needs_parens(operand) {
        write!(f, "({})", operand)
    } else {
        write!(f, "{}", operand)
    }
}

impl fmt::Display for BoundExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundExpression::Literal(e) => write!(f, "{}", e.value),
            BoundExpression::Variable(e) => f.write_str(&e.variable.name),
            BoundExpression::Assignment(e) => {
                write!(f, "{} = {}", e.variable.name, e.expression)
            }
            BoundExpression::Unary(e) => {
                f.write_str(e.op.text())?;
                write_operand(f, &e.operand)
            }
            BoundExpression::Binary(e) => {
                write_operand(f, &e.left)?;
                write!(f, " {} ", e.op.text())?;
                write_operand(f, &e.right)
            }
            BoundExpression::Error(_) => f.write_str("?"),
        }
    }
}

fn write_indent(f: &mut impl Write, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str(INDENT)?;
    }
    Ok(())
}

fn write_statement(f: &mut impl Write, statement: &BoundStatement, depth: usize) -> fmt::Result {
    match statement {
        BoundStatement::Block(block) => {
            write_indent(f, depth)?;
            f.write_str("{\n")?;
            for s in &block.statements {
                write_statement(f, s, depth + 1)?;
            }
            write_indent(f, depth)?;
            f.write_str("}\n")
        }
        BoundStatement::Expression(s) => {
            write_indent(f, depth)?;
            writeln!(f, "{}", s.expression)
        }
        BoundStatement::VariableDeclaration(s) => {
            write_indent(f, depth)?;
            let keyword = if s.variable.is_read_only { "let" } else { "var" };
            writeln!(f, "{} {} = {}", keyword, s.variable.name, s.initializer)
        }
        BoundStatement::If(s) => {
            write_indent(f, depth)?;
            writeln!(f, "if {}", s.condition)?;
            write_statement(f, &s.then_statement, depth + 1)?;
            if let Some(else_statement) = &s.else_statement {
                write_indent(f, depth)?;
                f.write_str("else\n")?;
                write_statement(f, else_statement, depth + 1)?;
            }
            Ok(())
        }
        BoundStatement::While(s) => {
            write_indent(f, depth)?;
            writeln!(f, "while {}", s.condition)?;
            write_statement(f, &s.body, depth + 1)
        }
        BoundStatement::For(s) => {
            write_indent(f, depth)?;
            writeln!(
                f,
                "for {} = {} to {}",
                s.variable.name, s.lower_bound, s.upper_bound
            )?;
            write_statement(f, &s.body, depth + 1)
        }
        BoundStatement::Goto(s) => {
            write_indent(f, depth)?;
            writeln!(f, "goto {}", s.label)
        }
        BoundStatement::ConditionalGoto(s) => {
            write_indent(f, depth)?;
            let keyword = if s.jump_if_true { "if" } else { "unless" };
            writeln!(f, "goto {} {} {}", s.label, keyword, s.condition)
        }
        BoundStatement::Label(s) => {
            write_indent(f, depth)?;
            writeln!(f, "{}:", s.label)
        }
    }
}

impl fmt::Display for BoundStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_statement(f, self, 0)
    }
}

/// A block prints its statements without surrounding braces, which is
/// the natural listing for a lowered program.
impl fmt::Display for BoundBlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            write_statement(f, statement, 0)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::BoundBinaryOperator;
    use crate::symbol::VariableSymbol;
    use pretty_assertions::assert_eq;
    use trylang_core::value::TypeSymbol;
    use trylang_syntax::SyntaxKind;

    #[test]
    fn test_nested_binary_gets_parens() {
        let plus = BoundBinaryOperator::bind(SyntaxKind::PlusToken, TypeSymbol::Int, TypeSymbol::Int);
        let star = BoundBinaryOperator::bind(SyntaxKind::StarToken, TypeSymbol::Int, TypeSymbol::Int);
        let (Some(plus), Some(star)) = (plus, star) else {
            panic!("int arithmetic must be in the operator table");
        };
        let sum = BoundExpression::binary(BoundExpression::literal(1i64), plus, BoundExpression::literal(2i64));
        let product = BoundExpression::binary(sum, star, BoundExpression::literal(3i64));
        assert_eq!(product.to_string(), "(1 + 2) * 3");
    }

    #[test]
    fn test_structured_listing() {
        let x = VariableSymbol::mutable("x", TypeSymbol::Bool);
        let program = BoundBlockStatement::new(vec![
            BoundStatement::variable_declaration(x.clone(), BoundExpression::literal(true)),
            BoundStatement::If(BoundIfStatement {
                condition: BoundExpression::variable(x.clone()),
                then_statement: Box::new(BoundStatement::block(vec![BoundStatement::expression(
                    BoundExpression::assignment(x, BoundExpression::literal(false)),
                )])),
                else_statement: None,
            }),
            BoundStatement::goto(BoundLabel::new(1)),
            BoundStatement::label(BoundLabel::new(1)),
        ]);
        let expected = "\
var x = true
if x
    {
        x = false
    }
goto Label1
Label1:
";
        assert_eq!(program.to_string(), expected);
    }
}
