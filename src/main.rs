use std::{
    cell::RefCell,
    fs,
    io::{self, Write},
    path::PathBuf,
    process,
    rc::Rc,
};

use clap::Parser;
use tern::{
    error::Error,
    interpreter::{
        environment::{Env, Scope},
        evaluator::{
            core::{Context, DEFAULT_MAX_CALL_DEPTH},
            function::builtin::{Input, seed_with},
        },
    },
    parse, tokenize,
};
use tracing_subscriber::EnvFilter;

/// tern is a small, dynamically typed scripting language.
///
/// Without a file, tern starts an interactive session that runs one line at a
/// time. Type `exit` or send end of input to leave it.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The script to run.
    file: Option<PathBuf>,

    /// Prints the tokens of each program before running it.
    #[arg(long)]
    dump_tokens: bool,

    /// Prints the syntax tree of each program before running it.
    #[arg(long)]
    dump_ast: bool,

    /// Maximum number of nested function calls.
    #[arg(long, env = "TERN_MAX_CALL_DEPTH", default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    max_call_depth: usize,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter)
                             .with_writer(io::stderr)
                             .init();

    let args = Args::parse();

    let stdin: Input = Rc::new(RefCell::new(io::stdin().lock()));
    let env = Scope::root();
    if let Err(e) = seed_with(&env, Rc::new(RefCell::new(io::stdout())), Rc::clone(&stdin)) {
        eprintln!("{e}");
        process::exit(1);
    }

    match &args.file {
        Some(path) => {
            let script = fs::read_to_string(path).unwrap_or_else(|_| {
                eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                          path.display());
                process::exit(1);
            });
            if let Err(e) = run(&script, &env, &args) {
                eprintln!("{e}");
                process::exit(1);
            }
        },
        None => repl(&env, &stdin, &args),
    }
}

/// Reads and runs one line at a time until `exit` or end of input.
///
/// The prompt reads from the same handle as the `input` built-in, so scripts
/// and the session never compete for standard input.
fn repl(env: &Env, stdin: &Input, args: &Args) {
    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            return;
        }

        let mut line = String::new();
        match stdin.borrow_mut().read_line(&mut line) {
            Ok(0) => return,
            Ok(_) => {},
            Err(e) => {
                eprintln!("{e}");
                return;
            },
        }

        let line = line.trim();
        if line == "exit" {
            return;
        }
        if let Err(e) = run(line, env, args) {
            eprintln!("{e}");
        }
    }
}

fn run(source: &str, env: &Env, args: &Args) -> Result<(), Error> {
    let tokens = tokenize(source)?;
    if args.dump_tokens {
        for (token, line) in &tokens {
            println!("{line:>4} {token:?}");
        }
    }

    let statements = parse(&tokens)?;
    if args.dump_ast {
        println!("{statements:#?}");
    }

    Context::with_max_call_depth(args.max_call_depth).execute(&statements, env)?;
    Ok(())
}
