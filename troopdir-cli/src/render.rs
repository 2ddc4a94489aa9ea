//! Shared terminal output helpers.

use chrono::NaiveDate;
use owo_colors::OwoColorize;

/// "Tue, Jan 07" style date label for grouped listings.
pub fn date_label(date: NaiveDate) -> String {
    date.format("%a, %b %d").to_string()
}

pub fn success(message: &str) {
    println!("{}", message.green());
}

pub fn warn(message: &str) {
    println!("{}", message.yellow());
}

pub fn empty(message: &str) {
    println!("{}", message.dimmed());
}
