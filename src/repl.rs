//! Interactive read-eval-print loop: buffers input across lines until
//! brackets balance, then lexes, parses and evaluates once as a unit.
use std::io::{self, BufRead, Write};

use crate::evaluator::{eval_program, Environment};
use crate::parser::Parser;

const PROMPT: &str = ">> ";

/// Tracks how many `{`/`(`/`[` are still open across buffered lines so the
/// prompt knows when a logical statement is complete. An unmatched closer is
/// silently ignored rather than treated as an error — the parser will report
/// it once the statement is submitted.
#[derive(Default)]
struct BracketStack {
    depth: i32,
}

impl BracketStack {
    fn track(&mut self, line: &str) {
        for ch in line.chars() {
            match ch {
                '{' | '(' | '[' => self.depth += 1,
                '}' | ')' | ']' => self.depth = (self.depth - 1).max(0),
                _ => {}
            }
        }
    }

    fn is_balanced(&self) -> bool {
        self.depth == 0
    }
}

pub fn start<R: BufRead, W: Write>(mut input: R, mut output: W) -> io::Result<()> {
    let env = Environment::new();
    let mut buffer = String::new();
    let mut brackets = BracketStack::default();

    loop {
        write!(output, "{}", if buffer.is_empty() { PROMPT } else { "  " })?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }

        brackets.track(&line);
        buffer.push_str(&line);

        if !brackets.is_balanced() {
            continue;
        }

        let source = std::mem::take(&mut buffer);
        let mut parser = Parser::from_source(&source);
        let program = parser.parse_program();

        if !parser.errors().is_empty() {
            writeln!(output, "Error while parsing:")?;
            for error in parser.errors() {
                writeln!(output, "\t{error}")?;
            }
            continue;
        }

        let result = eval_program(&program, &env);
        writeln!(output, "{result}")?;
    }
}
