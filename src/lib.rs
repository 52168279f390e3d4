//! Library surface for the Pebble tree-walking interpreter: lexing,
//! parsing, and evaluation are each usable independently of the CLI.
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod repl;
