//! The syntax tree: an immutable arena of nodes plus the interner that
//! resolves its identifiers.

use crate::node::{NodeId, SyntaxNode};
use std::fmt::Write;
use trylang_core::intern::{InternedString, StringInterner};

#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<SyntaxNode>,
    root: NodeId,
    interner: StringInterner,
}

impl SyntaxTree {
    /// Assemble a tree from an arena whose `root` is a compilation unit.
    /// Every `NodeId` stored in a node must index into `nodes`.
    pub fn new(nodes: Vec<SyntaxNode>, root: NodeId, interner: StringInterner) -> Self {
        debug_assert!(matches!(
            nodes.get(root.index()),
            Some(SyntaxNode::CompilationUnit(_))
        ));
        Self {
            nodes,
            root,
            interner,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &SyntaxNode {
        &self.nodes[id.index()]
    }

    /// The top-level statements of the compilation unit.
    pub fn statements(&self) -> &[NodeId] {
        match self.node(self.root) {
            SyntaxNode::CompilationUnit(unit) => &unit.statements,
            _ => &[],
        }
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    #[inline]
    pub fn resolve(&self, name: InternedString) -> &str {
        self.interner.resolve(name)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Render the tree as one node kind per line, children indented under
    /// their parent. Literals, names and operators show their text.
    pub fn pretty_print(&self) -> String {
        let mut out = String::new();
        self.print_node(self.root, "", &mut out);
        out
    }

    fn print_node(&self, id: NodeId, indent: &str, out: &mut String) {
        let node = self.node(id);
        out.push_str(indent);
        out.push_str(node.kind().name());
        match node {
            SyntaxNode::LiteralExpression(n) => {
                let _ = write!(out, " {}", n.value);
            }
            SyntaxNode::NameExpression(n) => {
                let _ = write!(out, " {}", self.resolve(n.identifier.name));
            }
            SyntaxNode::AssignmentExpression(n) => {
                let _ = write!(out, " {}", self.resolve(n.identifier.name));
            }
            SyntaxNode::UnaryExpression(n) => {
                let _ = write!(out, " {}", n.operator.kind.text().unwrap_or("?"));
            }
            SyntaxNode::BinaryExpression(n) => {
                let _ = write!(out, " {}", n.operator.kind.text().unwrap_or("?"));
            }
            SyntaxNode::VariableDeclaration(n) => {
                let _ = write!(
                    out,
                    " {} {}",
                    n.keyword.kind.text().unwrap_or("?"),
                    self.resolve(n.identifier.name)
                );
                if let Some(ty) = n.type_clause {
                    let _ = write!(out, ": {}", self.resolve(ty.name));
                }
            }
            SyntaxNode::ForStatement(n) => {
                let _ = write!(out, " {}", self.resolve(n.identifier.name));
            }
            _ => {}
        }
        out.push('\n');

        let child_indent = format!("{}    ", indent);
        for child in node.children().into_iter().flatten() {
            self.print_node(child, &child_indent, out);
        }
    }
}
