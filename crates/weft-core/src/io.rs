//! Console output helpers.
//!
//! Thin wrappers over stdout so ranges, domains, tuples, and arrays print
//! through their display forms without format-string boilerplate.

use std::fmt::Display;

/// Prints `value` to stdout.
pub fn write<V: Display>(value: V) {
    print!("{value}");
}

/// Prints `value` to stdout followed by a newline.
pub fn writeln<V: Display>(value: V) {
    println!("{value}");
}
