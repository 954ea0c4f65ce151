//! Core functionality for the vakt structural pattern engine
//!
//! This crate provides a generic structural pattern-matching and rewrite
//! engine for syntax trees:
//! - Pattern compilation (`pattern`) over a small expression front-end
//!   (`lexer`, `parser`)
//! - Structural matching with metavariable bindings and backtracking
//!   (`matcher`, `bindings`)
//! - Side-condition evaluation against an external semantic facts
//!   provider (`condition`, `facts`)
//! - Rule declaration, compilation and application (`rule`, `engine`)
//! - Finding generation and reporting (`finding`, `output_format`)

pub mod args;
pub mod bindings;
pub mod check;
pub mod condition;
pub mod config;
pub mod engine;
pub mod error;
pub mod facts;
pub mod finding;
pub mod lexer;
pub mod location;
pub mod logging;
pub mod matcher;
pub mod output_format;
pub mod parser;
pub mod pattern;
pub mod render;
pub mod rule;
pub mod rule_table;
pub mod rules;
pub mod template;
pub mod tree;

#[cfg(test)]
pub mod utils_test;
