use std::rc::Rc;

use crate::interpreter::value::kind::ValueKind;

/// Represents a literal value in the language.
///
/// `LiteralValue` covers the constants that can appear directly in source
/// code. Evaluating a literal always produces a fresh runtime value, so a
/// string literal inside a loop yields a new string on every iteration.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// `null`
    Null,
    /// A boolean literal value: `true` or `false`.
    Bool(bool),
    /// A 64-bit signed integer literal.
    Integer(i64),
    /// A 64-bit floating-point literal.
    Real(f64),
    /// A string literal with escapes already resolved.
    String(String),
    /// A type name such as `number` used as a value.
    Type(ValueKind),
}

/// An abstract syntax tree (AST) node representing an expression in the
/// language.
///
/// Every construct that yields a value is an expression, including blocks,
/// conditionals and function literals. Nodes are never mutated after parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value (number, string, boolean, etc.).
    Literal {
        /// The constant value.
        value: LiteralValue,
        /// Line number in the source code.
        line:  usize,
    },
    /// Reference to a variable by name.
    Variable {
        /// Name of the variable.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// Property access such as `text.length`.
    Dot {
        /// The value whose property is read.
        object: Box<Self>,
        /// The property name.
        name:   String,
        /// Line number in the source code.
        line:   usize,
    },
    /// Subscript access such as `t["key"]` or `s[0]`.
    Subscript {
        /// The indexed value.
        object: Box<Self>,
        /// The index or key.
        index:  Box<Self>,
        /// Line number in the source code.
        line:   usize,
    },
    /// A cast such as `x as string`.
    Cast {
        /// The value being converted.
        expr:   Box<Self>,
        /// An expression evaluating to the target type.
        target: Box<Self>,
        /// Line number in the source code.
        line:   usize,
    },
    /// Call expression (e.g. `f(x)`, `number()`).
    Call {
        /// The called expression.
        callee:    Box<Self>,
        /// Arguments to the call.
        arguments: Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// A unary operation (e.g. negation).
    UnaryOp {
        /// The unary operator to apply.
        op:   UnaryOperator,
        /// The operand expression.
        expr: Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// A binary operation, including assignments.
    BinaryOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// A short-circuiting `and` / `or`.
    LogicalOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    LogicalOperator,
        /// Right operand, evaluated only when needed.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// A block of statements with an optional trailing value.
    Block(Block),
    /// Conditional ("if-else") expression.
    IfExpr {
        /// The condition expression.
        condition:   Box<Self>,
        /// Block evaluated if the condition is true.
        then_branch: Block,
        /// Block evaluated if the condition is false.
        else_branch: Option<Block>,
        /// Line number in the source code.
        line:        usize,
    },
    /// A function literal, named or anonymous.
    Function(Rc<FunctionDef>),
    /// A table literal such as `table { name: "x", 1: true }`.
    TableLiteral {
        /// Key and value expressions in source order.
        entries: Vec<(Self, Self)>,
        /// Line number in the source code.
        line:    usize,
    },
}

impl Expr {
    /// Gets the line number from `self`.
    /// ## Example
    /// ```
    /// use tern::ast::Expr;
    ///
    /// let expr = Expr::Variable { name: "x".to_string(),
    ///                             line: 5, };
    ///
    /// assert_eq!(expr.line_number(), 5);
    /// ```
    #[must_use]
    pub fn line_number(&self) -> usize {
        match self {
            Self::Literal { line, .. }
            | Self::Variable { line, .. }
            | Self::Dot { line, .. }
            | Self::Subscript { line, .. }
            | Self::Cast { line, .. }
            | Self::Call { line, .. }
            | Self::UnaryOp { line, .. }
            | Self::BinaryOp { line, .. }
            | Self::LogicalOp { line, .. }
            | Self::IfExpr { line, .. }
            | Self::TableLiteral { line, .. } => *line,
            Self::Block(block) => block.line,
            Self::Function(def) => def.line,
        }
    }

    /// Returns `true` for expressions that may appear on the left of `=`.
    #[must_use]
    pub const fn is_lvalue(&self) -> bool {
        matches!(self, Self::Variable { .. } | Self::Dot { .. } | Self::Subscript { .. })
    }
}

/// A brace-delimited sequence of statements.
///
/// If the last item before `}` is a bare expression without a `;`, it becomes
/// the block's value; otherwise the block evaluates to null.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Statements in source order.
    pub statements: Vec<Statement>,
    /// The trailing expression, if any.
    pub value:      Option<Box<Expr>>,
    /// Line of the opening brace.
    pub line:       usize,
}

/// Represents a function definition.
///
/// Function values created from the same definition share it through an
/// `Rc`, and two functions are equal only if they share the same body.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// The name of the function, if it has one.
    pub name:   Option<String>,
    /// The parameter names.
    pub params: Vec<String>,
    /// The body evaluated when the function is called.
    pub body:   Block,
    /// Line number in the source code.
    pub line:   usize,
}

/// Represents a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A variable declaration using `let`.
    Let {
        /// The name of the variable.
        name:  String,
        /// The initial value; `null` when omitted.
        value: Option<Expr>,
        /// Line number in the source code.
        line:  usize,
    },
    /// A standalone expression evaluated for its effects.
    Expression {
        /// The expression to evaluate.
        expr: Expr,
        /// Line number in the source code.
        line: usize,
    },
    /// A `while` loop.
    While {
        /// Checked before every iteration.
        condition: Expr,
        /// The loop body.
        body:      Block,
        /// Line number in the source code.
        line:      usize,
    },
    /// A counting `for` loop.
    For(ForLoop),
    /// `return` with an optional value.
    Return {
        /// The returned value; `null` when omitted.
        value: Option<Expr>,
        /// Line number in the source code.
        line:  usize,
    },
    /// `break`
    Break {
        /// Line number in the source code.
        line: usize,
    },
    /// `continue`
    Continue {
        /// Line number in the source code.
        line: usize,
    },
    /// A named function declaration.
    Function(Rc<FunctionDef>),
    /// A lone `;`.
    Empty,
}

/// A `for [let] target in start .. end { ... }` loop.
#[derive(Debug, Clone, PartialEq)]
pub struct ForLoop {
    /// The assigned lvalue.
    pub target:  Expr,
    /// Whether `let` declares the target in the loop frame.
    pub declare: bool,
    /// Evaluated once, before the first iteration.
    pub start:   Expr,
    /// Re-evaluated at every comparison.
    pub end:     Expr,
    /// The loop body.
    pub body:    Block,
    /// Line number in the source code.
    pub line:    usize,
}

/// Represents a binary operator.
///
/// Compound assignments are their own operators; the evaluator maps them back
/// to the arithmetic operator with [`BinaryOperator::compound_base`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// True division (`/`), always real.
    Div,
    /// Floor division (`//`)
    FloorDiv,
    /// Modulo (`%`), with the sign of the divisor.
    Mod,
    /// Left shift (`<<`)
    ShiftLeft,
    /// Right shift (`>>`)
    ShiftRight,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Assignment (`=`)
    Assign,
    /// `+=`
    AddAssign,
    /// `-=`
    SubAssign,
    /// `*=`
    MulAssign,
    /// `/=`
    DivAssign,
    /// `//=`
    FloorDivAssign,
    /// `%=`
    ModAssign,
    /// `<<=`
    ShiftLeftAssign,
    /// `>>=`
    ShiftRightAssign,
}

impl BinaryOperator {
    /// Returns `true` for `=` and every compound assignment.
    #[must_use]
    pub const fn is_assignment(self) -> bool {
        matches!(self, Self::Assign) || self.compound_base().is_some()
    }

    /// Maps a compound assignment to the operator it applies, e.g. `+=` to
    /// `+`.
    #[must_use]
    pub const fn compound_base(self) -> Option<Self> {
        match self {
            Self::AddAssign => Some(Self::Add),
            Self::SubAssign => Some(Self::Sub),
            Self::MulAssign => Some(Self::Mul),
            Self::DivAssign => Some(Self::Div),
            Self::FloorDivAssign => Some(Self::FloorDiv),
            Self::ModAssign => Some(Self::Mod),
            Self::ShiftLeftAssign => Some(Self::ShiftLeft),
            Self::ShiftRightAssign => Some(Self::ShiftRight),
            _ => None,
        }
    }
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
    /// Logical NOT (e.g. `not x`).
    Not,
}

/// The short-circuiting boolean operators.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LogicalOperator {
    /// `and`
    And,
    /// `or`
    Or,
}
