//! lumen: Evaluate lumen programs.
//!
//! Usage:
//!   lumen [options] [FILE]
//!
//! With a file, the program is evaluated once. Without one, an interactive
//! session starts where each submission sees the variables of the ones
//! before it.

mod render;
mod repl;

use clap::{Parser as ClapParser, ValueEnum};
use lumen_compiler::{Compilation, SyntaxTree, Variables};
use lumen_printer::TreePrinter;
use render::DiagnosticRenderer;
use repl::{Repl, ReplOptions};
use std::io::IsTerminal;
use std::process;
use std::sync::Once;

#[derive(ClapParser, Debug)]
#[command(name = "lumen", about = "lumen - bind, lower and evaluate small imperative programs")]
struct Cli {
    /// Program to evaluate. Starts an interactive session when omitted.
    #[arg(value_name = "FILE")]
    file: Option<String>,

    /// Print the syntax tree of each submission.
    #[arg(long = "show-tree")]
    show_tree: bool,

    /// Print the lowered program of each submission.
    #[arg(long = "show-program")]
    show_program: bool,

    /// When to use colors and graphical diagnostics.
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    fn enabled(self) -> bool {
        match self {
            ColorChoice::Auto => std::io::stderr().is_terminal(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_DIAGNOSTICS: i32 = 1;
const EXIT_FAILURE: i32 = 2;

// ANSI color codes
const RED: &str = "\x1b[31m";
const MAGENTA: &str = "\x1b[35m";
const GRAY: &str = "\x1b[90m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber when `RUST_LOG` is set.
///
/// Enable with `RUST_LOG=lumen_compiler=debug` or `RUST_LOG=trace`.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr).with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let options = ReplOptions {
        show_tree: cli.show_tree,
        show_program: cli.show_program,
        color: cli.color.enabled(),
    };

    let exit_code = match cli.file {
        Some(ref path) => run_file(path, &options),
        None => match Repl::new(options).run() {
            Ok(()) => EXIT_SUCCESS,
            Err(e) => {
                print_error(&format!("Failed to read input: {}", e), cli.color.enabled());
                EXIT_FAILURE
            }
        },
    };
    process::exit(exit_code);
}

fn run_file(path: &str, options: &ReplOptions) -> i32 {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            print_error(&format!("Failed to read '{}': {}", path, e), options.color);
            return EXIT_FAILURE;
        }
    };

    let compilation = Compilation::new(SyntaxTree::parse(text));
    print_dumps(&compilation, options);

    let mut variables = Variables::default();
    match compilation.evaluate(&mut variables) {
        Ok(result) if !result.diagnostics.is_empty() => {
            let renderer = DiagnosticRenderer::new(path, compilation.syntax_tree(), options.color);
            for diagnostic in &result.diagnostics {
                eprintln!("{}", renderer.render(diagnostic));
            }
            print_summary(result.diagnostics.len(), options.color);
            EXIT_DIAGNOSTICS
        }
        Ok(result) => {
            if let Some(value) = result.value {
                print_value(&value, options.color);
            }
            EXIT_SUCCESS
        }
        Err(e) => {
            print_error(&e.to_string(), options.color);
            EXIT_FAILURE
        }
    }
}

/// Print the requested tree dumps of a submission to stdout.
fn print_dumps(compilation: &Compilation, options: &ReplOptions) {
    let mut printer = TreePrinter::new();
    if options.show_tree {
        print_dump(&printer.print_syntax(compilation.syntax_tree().root()), options.color);
    }
    if options.show_program {
        print_dump(&printer.print_program(&compilation.lowered_program()), options.color);
    }
}

fn print_dump(dump: &str, use_color: bool) {
    if use_color {
        print!("{}{}{}", GRAY, dump, RESET);
    } else {
        print!("{}", dump);
    }
}

fn print_value(value: &lumen_compiler::Value, use_color: bool) {
    if use_color {
        println!("{}{}{}", MAGENTA, value, RESET);
    } else {
        println!("{}", value);
    }
}

fn print_summary(count: usize, use_color: bool) {
    let plural = if count == 1 { "" } else { "s" };
    if use_color {
        eprintln!("\n{}Found {} error{}.{}", RED, count, plural, RESET);
    } else {
        eprintln!("\nFound {} error{}.", count, plural);
    }
}

fn print_error(msg: &str, use_color: bool) {
    if use_color {
        eprintln!("{}{}error{}: {}", BOLD, RED, RESET, msg);
    } else {
        eprintln!("error: {}", msg);
    }
}
