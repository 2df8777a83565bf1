use std::{
    cell::RefCell,
    io::{self, BufRead, Write},
    rc::Rc,
};

use crate::{
    error::RuntimeError,
    interpreter::{
        environment::Env,
        evaluator::core::EvalResult,
        value::{core::Value, function::Function, table::Table},
    },
};

/// Where `print` writes to.
pub type Output = Rc<RefCell<dyn Write>>;

/// Where `input` reads from.
pub type Input = Rc<RefCell<dyn BufRead>>;

/// Declares the built-in functions in `env`, wired to the process's standard
/// output and input.
///
/// | name    | arity | effect                                            |
/// |---------|-------|---------------------------------------------------|
/// | `print` | 1     | writes the argument cast to string and a newline  |
/// | `input` | 0     | reads one line, without its line terminator       |
/// | `table` | 0     | returns a new empty table                         |
///
/// # Errors
/// Fails with `RuntimeError::Redeclaration` if `env` already binds one of the
/// names.
pub fn seed(env: &Env) -> EvalResult<()> {
    seed_with(env,
              Rc::new(RefCell::new(io::stdout())),
              Rc::new(RefCell::new(io::stdin().lock())))
}

/// Declares the built-in functions in `env` using the given streams.
///
/// # Errors
/// Fails with `RuntimeError::Redeclaration` if `env` already binds one of the
/// names.
///
/// # Example
/// ```
/// use std::{cell::RefCell, io::Cursor, rc::Rc};
///
/// use tern::{
///     interpreter::{environment::Scope, evaluator::function::builtin::seed_with},
///     run,
/// };
///
/// let output = Rc::new(RefCell::new(Vec::<u8>::new()));
/// let input = Rc::new(RefCell::new(Cursor::new(b"world\n".to_vec())));
///
/// let env = Scope::root();
/// seed_with(&env, output.clone(), input).unwrap();
/// run("print('hello ' + input());", &env).unwrap();
///
/// assert_eq!(String::from_utf8(output.borrow().clone()).unwrap(), "hello world\n");
/// ```
pub fn seed_with(env: &Env, output: Output, input: Input) -> EvalResult<()> {
    let print = Function::native("print", 1, move |args, line| {
        let text = args[0].to_display(line)?;
        let mut output = output.borrow_mut();
        writeln!(output, "{text}").and_then(|()| output.flush())
                                  .map_err(|e| io_error(&e, line))?;
        Ok(Value::Null)
    });

    let input = Function::native("input", 0, move |_, line| {
        let mut buffer = String::new();
        let read = input.borrow_mut()
                        .read_line(&mut buffer)
                        .map_err(|e| io_error(&e, line))?;
        if read == 0 {
            return Err(RuntimeError::Io { details: "unexpected end of input".to_string(),
                                          line });
        }
        let text = buffer.strip_suffix('\n')
                         .map_or(buffer.as_str(), |s| s.strip_suffix('\r').unwrap_or(s));
        Ok(Value::from(text))
    });

    let table = Function::native("table", 0, |_, _| Ok(Value::from(Table::new())));

    for function in [print, input, table] {
        let name = function.name().unwrap_or_default().to_string();
        env.declare(&name, &Value::Function(function), 0)?;
    }
    Ok(())
}

fn io_error(error: &io::Error, line: usize) -> RuntimeError {
    RuntimeError::Io { details: error.to_string(),
                       line }
}
