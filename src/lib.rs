// Pedantic lint configuration for the crate.
// Most of these are reasonable but too strict for this codebase:
// - cast_precision_loss: Acceptable for year/month arithmetic
// - missing_errors_doc: Error handling is self-evident from Result types
// - missing_panics_doc: Panics are rare and documented inline
// - items_after_statements: Output structs are clearer near their usage
// - too_many_lines: Complex extractors need cohesive logic
// - similar_names: Variable naming is contextually clear
// - option_if_let_else: if-let is often clearer
// - match_same_arms: Combined arms can reduce readability
// - single_match_else: match is clearer than if-let for pattern matching
// - manual_let_else: if-let with early return is often clearer in context
#![allow(
    clippy::cast_precision_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::items_after_statements,
    clippy::too_many_lines,
    clippy::similar_names,
    clippy::option_if_let_else,
    clippy::match_same_arms,
    clippy::single_match_else,
    clippy::manual_let_else
)]

pub mod cli;
pub mod error;
pub mod extract;
pub mod models;
