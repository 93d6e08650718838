//! The interactive session.

use crate::render::DiagnosticRenderer;
use crate::{print_dumps, print_error, print_value};
use lumen_compiler::{Compilation, SyntaxTree, Variables};
use std::io::{self, BufRead, Write};
use std::sync::Arc;

/// Display settings, seeded from the command line and toggled by
/// meta-commands.
#[derive(Debug, Clone, Default)]
pub struct ReplOptions {
    pub show_tree: bool,
    pub show_program: bool,
    pub color: bool,
}

/// What a `#` line asks the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MetaCommand {
    ShowTree,
    ShowProgram,
    Clear,
    Reset,
    Exit,
}

impl MetaCommand {
    fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "#showTree" => Some(MetaCommand::ShowTree),
            "#showProgram" => Some(MetaCommand::ShowProgram),
            "#cls" => Some(MetaCommand::Clear),
            "#reset" => Some(MetaCommand::Reset),
            "#exit" => Some(MetaCommand::Exit),
            _ => None,
        }
    }
}

/// Result of feeding one line to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Exit,
}

pub struct Repl {
    options: ReplOptions,
    /// The last submission that compiled without diagnostics.
    previous: Option<Arc<Compilation>>,
    variables: Variables,
    /// Lines of the submission being entered.
    buffer: String,
}

impl Repl {
    pub fn new(options: ReplOptions) -> Self {
        Self {
            options,
            previous: None,
            variables: Variables::default(),
            buffer: String::new(),
        }
    }

    /// Read submissions from stdin until `#exit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut line = String::new();

        loop {
            self.prompt()?;
            line.clear();
            if input.read_line(&mut line)? == 0 {
                return Ok(());
            }
            let line = line.trim_end_matches(['\r', '\n']);
            if self.feed(line) == Step::Exit {
                return Ok(());
            }
        }
    }

    fn prompt(&self) -> io::Result<()> {
        let mut stdout = io::stdout();
        if self.buffer.is_empty() {
            write!(stdout, "» ")?;
        } else {
            write!(stdout, "· ")?;
        }
        stdout.flush()
    }

    fn feed(&mut self, line: &str) -> Step {
        let is_blank = line.trim().is_empty();

        if self.buffer.is_empty() {
            if is_blank {
                return Step::Continue;
            }
            if line.starts_with('#') {
                return self.run_meta_command(line);
            }
        }

        self.buffer.push_str(line);
        self.buffer.push('\n');

        let tree = SyntaxTree::parse(self.buffer.as_str());
        // keep reading until the text parses or the user submits a blank line
        if !is_blank && !tree.diagnostics().is_empty() {
            return Step::Continue;
        }

        self.buffer.clear();
        self.submit(tree);
        Step::Continue
    }

    fn run_meta_command(&mut self, line: &str) -> Step {
        match MetaCommand::parse(line) {
            Some(MetaCommand::ShowTree) => {
                self.options.show_tree = !self.options.show_tree;
                println!("{}", if self.options.show_tree { "Showing parse trees." } else { "Not showing parse trees." });
            }
            Some(MetaCommand::ShowProgram) => {
                self.options.show_program = !self.options.show_program;
                println!("{}", if self.options.show_program { "Showing bound tree." } else { "Not showing bound tree." });
            }
            Some(MetaCommand::Clear) => {
                print!("\x1b[2J\x1b[H");
                let _ = io::stdout().flush();
            }
            Some(MetaCommand::Reset) => {
                self.previous = None;
                self.variables.clear();
            }
            Some(MetaCommand::Exit) => return Step::Exit,
            None => print_error(&format!("Invalid command {}.", line.trim()), self.options.color),
        }
        Step::Continue
    }

    fn submit(&mut self, tree: SyntaxTree) {
        let compilation = match self.previous {
            Some(ref previous) => previous.continue_with(tree),
            None => Compilation::new(tree),
        };
        print_dumps(&compilation, &self.options);

        match compilation.evaluate(&mut self.variables) {
            Ok(result) if result.diagnostics.is_empty() => {
                if let Some(value) = result.value {
                    print_value(&value, self.options.color);
                }
                self.previous = Some(Arc::new(compilation));
            }
            Ok(result) => {
                let renderer = DiagnosticRenderer::new("", compilation.syntax_tree(), self.options.color);
                for diagnostic in &result.diagnostics {
                    eprintln!("{}", renderer.render(diagnostic));
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, "submission aborted");
                print_error(&e.to_string(), self.options.color);
            }
        }
    }
}
