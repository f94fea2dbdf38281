//! Console feedback for the interactive shell and one-shot execution.
//!
//! Colors follow one scheme: red for errors, green for success, blue for
//! headers and bright_black for usage text. Every message is surrounded by
//! blank lines so consecutive commands stay readable.

use colored::*;

/// Prints an error. Lines after the first carry the command usage and are
/// muted.
///
/// ```text
///
/// ✕ Error: <first line>
/// <usage lines>
///
/// ```
pub fn print_error(message: &str) {
    let mut lines = message.lines();
    let first = lines.next().unwrap_or_default();
    println!("\n{} {}", "✕ Error:".red(), first.white());
    for line in lines {
        println!("{}", line.bright_black());
    }
    println!();
}

/// Prints feedback of a successful command
pub fn print_success(message: &str) {
    println!("\n{} {}", "✓".green(), message.white());
}

pub fn print_info(message: &str) {
    println!("\n{}\n", message.white());
}

/// Prints `<header>:` above a rendered table
pub fn print_section_header(header: &str) {
    println!("\n{}:\n", header.blue());
}
