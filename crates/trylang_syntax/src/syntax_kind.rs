//! SyntaxKind enum - token and node kinds in the trylang syntax tree.

/// The kind of a syntax token or node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    // ========================================================================
    // Tokens
    // ========================================================================
    NumberToken,
    IdentifierToken,

    // Operators
    PlusToken,
    MinusToken,
    StarToken,
    SlashToken,
    PercentToken,
    BangToken,
    AmpersandAmpersandToken,
    PipePipeToken,
    EqualsEqualsToken,
    BangEqualsToken,
    LessToken,
    LessEqualsToken,
    GreaterToken,
    GreaterEqualsToken,
    EqualsToken,

    // Keywords
    TrueKeyword,
    FalseKeyword,
    VarKeyword,
    LetKeyword,

    // ========================================================================
    // Nodes
    // ========================================================================
    CompilationUnit,

    // Expressions
    LiteralExpression,
    NameExpression,
    UnaryExpression,
    BinaryExpression,
    ParenthesizedExpression,
    AssignmentExpression,

    // Statements
    BlockStatement,
    ExpressionStatement,
    VariableDeclaration,
    IfStatement,
    WhileStatement,
    ForStatement,
}

/// Kind names indexed by `SyntaxKind` ordinal.
static SYNTAX_KIND_NAMES: [&str; 34] = [
    "NumberToken",
    "IdentifierToken",
    "PlusToken",
    "MinusToken",
    "StarToken",
    "SlashToken",
    "PercentToken",
    "BangToken",
    "AmpersandAmpersandToken",
    "PipePipeToken",
    "EqualsEqualsToken",
    "BangEqualsToken",
    "LessToken",
    "LessEqualsToken",
    "GreaterToken",
    "GreaterEqualsToken",
    "EqualsToken",
    "TrueKeyword",
    "FalseKeyword",
    "VarKeyword",
    "LetKeyword",
    "CompilationUnit",
    "LiteralExpression",
    "NameExpression",
    "UnaryExpression",
    "BinaryExpression",
    "ParenthesizedExpression",
    "AssignmentExpression",
    "BlockStatement",
    "ExpressionStatement",
    "VariableDeclaration",
    "IfStatement",
    "WhileStatement",
    "ForStatement",
];

impl SyntaxKind {
    /// The name of this kind, e.g. `"BinaryExpression"`.
    pub fn name(self) -> &'static str {
        SYNTAX_KIND_NAMES[self as usize]
    }

    /// The fixed source text of a token kind, if it has one.
    pub fn text(self) -> Option<&'static str> {
        let text = match self {
            SyntaxKind::PlusToken => "+",
            SyntaxKind::MinusToken => "-",
            SyntaxKind::StarToken => "*",
            SyntaxKind::SlashToken => "/",
            SyntaxKind::PercentToken => "%",
            SyntaxKind::BangToken => "!",
            SyntaxKind::AmpersandAmpersandToken => "&&",
            SyntaxKind::PipePipeToken => "||",
            SyntaxKind::EqualsEqualsToken => "==",
            SyntaxKind::BangEqualsToken => "!=",
            SyntaxKind::LessToken => "<",
            SyntaxKind::LessEqualsToken => "<=",
            SyntaxKind::GreaterToken => ">",
            SyntaxKind::GreaterEqualsToken => ">=",
            SyntaxKind::EqualsToken => "=",
            SyntaxKind::TrueKeyword => "true",
            SyntaxKind::FalseKeyword => "false",
            SyntaxKind::VarKeyword => "var",
            SyntaxKind::LetKeyword => "let",
            _ => return None,
        };
        Some(text)
    }

    pub fn is_token(self) -> bool {
        self < SyntaxKind::CompilationUnit
    }

    pub fn is_expression(self) -> bool {
        (SyntaxKind::LiteralExpression..=SyntaxKind::AssignmentExpression).contains(&self)
    }

    pub fn is_statement(self) -> bool {
        self >= SyntaxKind::BlockStatement
    }
}

impl std::fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
