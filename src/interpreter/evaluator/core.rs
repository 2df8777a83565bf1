use tracing::debug;

use crate::{
    ast::{Block, Expr, Statement},
    error::RuntimeError,
    interpreter::{
        environment::{Env, Scope},
        evaluator::utils::{LoopFlow, loop_flow},
        value::{core::Value, function::Function, table::Table},
    },
    util::stack::ensure_sufficient_stack,
};

/// Result type used by the value protocol and the evaluator's public API.
///
/// All operations return either a value of type `T` or a `RuntimeError`
/// describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Result type used while walking the tree.
///
/// Besides errors, evaluation can end early because of `return`, `break` or
/// `continue`; those travel through the `Err` side as [`Unwind`] signals until
/// the construct that handles them.
pub type ExecResult<T> = Result<T, Unwind>;

/// Default limit on nested user function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 10_000;

/// A non-normal outcome of evaluating a node.
#[derive(Debug)]
pub enum Unwind {
    /// `return`, carrying the returned value up to the enclosing call.
    Return {
        /// The returned value.
        value: Value,
        /// Line of the `return` statement.
        line:  usize,
    },
    /// `break`, handled by the innermost loop.
    Break {
        /// Line of the `break` statement.
        line: usize,
    },
    /// `continue`, handled by the innermost loop.
    Continue {
        /// Line of the `continue` statement.
        line: usize,
    },
    /// A fatal runtime error.
    Error(RuntimeError),
}

impl From<RuntimeError> for Unwind {
    fn from(error: RuntimeError) -> Self {
        Self::Error(error)
    }
}

impl Unwind {
    /// Converts a signal that escaped every construct able to handle it into
    /// an error.
    #[must_use]
    pub fn into_error(self) -> RuntimeError {
        match self {
            Self::Return { line, .. } => RuntimeError::UncaughtControlFlow { keyword: "return",
                                                                             line },
            Self::Break { line } => RuntimeError::UncaughtControlFlow { keyword: "break",
                                                                        line },
            Self::Continue { line } => RuntimeError::UncaughtControlFlow { keyword: "continue",
                                                                           line },
            Self::Error(error) => error,
        }
    }
}

/// Stores the runtime evaluation context.
///
/// The context holds no variables: the active frame is always passed
/// explicitly, so one context can run programs against any environment. It
/// only tracks how deeply user functions are nested.
///
/// ## Usage
///
/// ```
/// use tern::{
///     interpreter::{environment::Scope, evaluator::core::Context},
///     parse, tokenize,
/// };
///
/// let env = Scope::root();
/// let program = parse(&tokenize("function f(n) { f(n + 1) } f(0);").unwrap()).unwrap();
///
/// let error = Context::with_max_call_depth(50).execute(&program, &env).unwrap_err();
/// assert!(error.to_string().contains("Stack overflow"));
/// ```
#[derive(Debug)]
pub struct Context {
    pub(in crate::interpreter::evaluator) call_depth:     usize,
    pub(in crate::interpreter::evaluator) max_call_depth: usize,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Creates a context with the default call depth limit.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_max_call_depth(DEFAULT_MAX_CALL_DEPTH)
    }

    /// Creates a context that fails with `RuntimeError::StackOverflow` once
    /// more than `max_call_depth` user function calls are active.
    #[must_use]
    pub const fn with_max_call_depth(max_call_depth: usize) -> Self {
        Self { call_depth: 0,
               max_call_depth }
    }

    /// Runs `statements` in order against `env`.
    ///
    /// # Errors
    /// Returns the first runtime error. A `return`, `break` or `continue` that
    /// reaches the top level is reported as
    /// `RuntimeError::UncaughtControlFlow`.
    pub fn execute(&mut self, statements: &[Statement], env: &Env) -> EvalResult<()> {
        for statement in statements {
            debug!(?statement, "executing statement");
            self.exec_statement(statement, env).map_err(Unwind::into_error)?;
        }
        Ok(())
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. The evaluator
    /// dispatches based on expression variant and grows the native stack when
    /// nesting gets deep.
    pub fn eval(&mut self, expr: &Expr, env: &Env) -> ExecResult<Value> {
        ensure_sufficient_stack(|| self.eval_expr(expr, env))
    }

    fn eval_expr(&mut self, expr: &Expr, env: &Env) -> ExecResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Value::from(value)),
            Expr::Variable { name, line } => Ok(env.read(name, *line)?),
            Expr::Dot { object, name, line } => Ok(self.eval(object, env)?.dot(name, *line)?),
            Expr::Subscript { object, index, line } => {
                let object = self.eval(object, env)?;
                let index = self.eval(index, env)?;
                Ok(object.subscript(&index, *line)?)
            },
            Expr::Cast { expr, target, line } => self.eval_cast(expr, target, *line, env),
            Expr::Call { callee,
                         arguments,
                         line, } => self.eval_call(callee, arguments, *line, env),
            Expr::UnaryOp { op, expr, line } => self.eval_unary_op(*op, expr, *line, env),
            Expr::BinaryOp { left,
                             op,
                             right,
                             line, } => {
                if op.is_assignment() {
                    self.eval_assignment(left, *op, right, *line, env)
                } else {
                    self.eval_binary_op(left, *op, right, *line, env)
                }
            },
            Expr::LogicalOp { left, op, right, .. } => self.eval_logical_op(left, *op, right, env),
            Expr::Block(block) => self.eval_block(block, env),
            Expr::IfExpr { condition,
                           then_branch,
                           else_branch,
                           .. } => {
                if self.eval(condition, env)?.truthy() {
                    self.eval_block(then_branch, env)
                } else if let Some(else_branch) = else_branch {
                    self.eval_block(else_branch, env)
                } else {
                    Ok(Value::Null)
                }
            },
            Expr::Function(def) => Ok(Value::Function(Function::closure(def, env))),
            Expr::TableLiteral { entries, line } => {
                let table = Table::new().into_ref();
                for (key, value) in entries {
                    let key = self.eval(key, env)?;
                    let value = self.eval(value, env)?;
                    table.borrow_mut().insert(&key, &value, *line)?;
                }
                Ok(Value::Table(table))
            },
        }
    }

    /// Evaluates a block in a fresh child frame of `env`.
    ///
    /// Statements run in order; the trailing expression, if any, gives the
    /// block's value. The frame is released on every exit path, including
    /// errors and control flow signals.
    pub fn eval_block(&mut self, block: &Block, env: &Env) -> ExecResult<Value> {
        let frame = Scope::child(env);
        for statement in &block.statements {
            self.exec_statement(statement, &frame)?;
        }
        match &block.value {
            Some(value) => self.eval(value, &frame),
            None => Ok(Value::Null),
        }
    }

    /// Executes a single statement.
    pub fn exec_statement(&mut self, statement: &Statement, env: &Env) -> ExecResult<()> {
        match statement {
            Statement::Let { name, value, line } => {
                let value = match value {
                    Some(expr) => self.eval(expr, env)?,
                    None => Value::Null,
                };
                env.declare(name, &value, *line)?;
            },
            Statement::Expression { expr, .. } => {
                self.eval(expr, env)?;
            },
            Statement::While { condition, body, .. } => {
                while self.eval(condition, env)?.truthy() {
                    if let LoopFlow::Exit = loop_flow(self.eval_block(body, env))? {
                        break;
                    }
                }
            },
            Statement::For(for_loop) => self.exec_for(for_loop, env)?,
            Statement::Return { value, line } => {
                let value = match value {
                    Some(expr) => self.eval(expr, env)?,
                    None => Value::Null,
                };
                return Err(Unwind::Return { value,
                                            line: *line });
            },
            Statement::Break { line } => return Err(Unwind::Break { line: *line }),
            Statement::Continue { line } => return Err(Unwind::Continue { line: *line }),
            Statement::Function(def) => {
                if let Some(name) = &def.name {
                    env.declare(name, &Value::Function(Function::closure(def, env)), def.line)?;
                }
            },
            Statement::Empty => {},
        }
        Ok(())
    }

    fn eval_cast(&mut self, expr: &Expr, target: &Expr, line: usize, env: &Env) -> ExecResult<Value> {
        let value = self.eval(expr, env)?;
        match self.eval(target, env)? {
            Value::Type(kind) => Ok(value.cast(kind, line)?),
            other => Err(RuntimeError::InvalidArgument { details: format!("cast target must be a type, found {}",
                                                                         other.kind()),
                                                         line }.into()),
        }
    }
}
