use colored::Colorize;
use plancmp_core::question::PRESET_QUESTIONS;

pub fn run() {
    print_presets();
}

/// Prints the preset menu with its 1-based indices.
pub fn print_presets() {
    for (index, question) in PRESET_QUESTIONS.iter().enumerate() {
        println!("{} {}", format!("{:>2}.", index + 1).bright_cyan(), question);
    }
}
