use clap::Parser as ClapParser;
use colored::*;
use std::{
    fs,
    io::{self, Write},
    process::ExitCode,
};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

extern crate frontend;
extern crate runtime;
extern crate tools;

use frontend::lexer::{Lexer, LexerError};
use frontend::parser::{Parser, ParserError};
use runtime::{
    environment::Env,
    interpreter::{Interpreter, InterpreterError},
};
use tools::errors::CodeErr;

// --------
//   CLI
// --------

#[derive(ClapParser)]
#[command(version)]
#[command(about = "Interpreter for the emoji language")]
struct CLI {
    /// Path to the file to run
    #[arg(short, long)]
    file: Option<String>,

    /// Interactive mode after interpreting a file
    #[arg(short, long)]
    inter: bool,

    /// Prints the AST tree
    #[arg(short, long)]
    ast_print: bool,

    /// Program given inline instead of a file
    #[arg(short, long, conflicts_with = "file")]
    eval: Option<String>,
}

#[derive(Error, Debug)]
enum CliError {
    #[error("{} opening script file -{0}-: {1}", "Error".red().bold())]
    OpenFile(String, io::Error),

    #[error("{0}")]
    Lexer(#[from] CodeErr<LexerError>),

    #[error("{0}")]
    Parser(#[from] CodeErr<ParserError>),

    #[error("{0}")]
    Interpreter(#[from] CodeErr<InterpreterError>),
}

fn report(err: &CliError) {
    eprintln!("{err}");

    if let CliError::Interpreter(e) = err {
        if e.err.is_defect() {
            eprintln!("{}", "The program was accepted but can't be run, please report it.".yellow());
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn interpret_file(
    file_name: &str,
    interp: &mut Interpreter,
    env: &mut Env,
    cli: &CLI,
) -> Result<(), CliError> {
    tracing::info!(file = file_name, "reading source file");

    let source_code =
        fs::read_to_string(file_name).map_err(|e| CliError::OpenFile(file_name.into(), e))?;

    interpretation_sequence(source_code, interp, env, cli)
}

fn interpretation_sequence(
    code: String,
    interp: &mut Interpreter,
    env: &mut Env,
    cli: &CLI,
) -> Result<(), CliError> {
    let mut lexer: Lexer = Default::default();
    let mut parser: Parser = Default::default();

    lexer.tokenize(code)?;
    parser.build_ast(std::mem::take(&mut lexer.tokens))?;

    if cli.ast_print {
        println!("{:#?}", parser.ast_nodes);
    }

    interp.execute_program(&parser.ast_nodes, env)?;

    Ok(())
}

// REPL
fn repl(interp: &mut Interpreter, env: &mut Env, cli: &CLI) -> io::Result<()> {
    println!("\n       --- {} language v0.1 ---", "Emoji".cyan().bold());
    println!("{} mode started, type 'quit' to leave", "Interactive".yellow().bold());

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    let mut input = String::new();

    loop {
        input.clear();
        print!("\n> ");
        stdout.flush()?;

        // End of input closes the session like 'quit'
        if stdin.read_line(&mut input)? == 0 {
            return Ok(());
        }

        let trimmed_input = input.trim();

        if trimmed_input == "quit" {
            return Ok(());
        }

        // Errors end the line, not the session
        if let Err(e) = interpretation_sequence(trimmed_input.to_string(), interp, env, cli) {
            report(&e);
        }
    }
}

fn main() -> ExitCode {
    let cli = CLI::parse();
    init_logging();

    let mut env = Env::new();
    let mut interp = Interpreter::new();

    let res = match (&cli.file, &cli.eval) {
        (Some(file_name), _) => interpret_file(file_name, &mut interp, &mut env, &cli),
        (None, Some(code)) => interpretation_sequence(code.clone(), &mut interp, &mut env, &cli),
        // Nothing to run, the session starts at once
        (None, None) => Ok(()),
    };

    let mut failed = false;

    if let Err(e) = res {
        report(&e);
        failed = true;
    }

    // The REPL reuses the environment of the program run before it
    let interactive = cli.inter || (cli.file.is_none() && cli.eval.is_none());

    if interactive {
        if let Err(e) = repl(&mut interp, &mut env, &cli) {
            eprintln!("{} reading from terminal: {e}", "Error".red().bold());
            failed = true;
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
