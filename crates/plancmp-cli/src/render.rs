//! Terminal output for comparison results.

use colored::Colorize;
use plancmp_application::{ComparisonOutcome, InputWarning};
use serde_json::Value;

pub const BANNER_TITLE: &str = "AI21 JambaCare | Healthcare Plan Comparison Assistant";

pub const BANNER_TEXT: &str = "Compare up to two healthcare plans side by side. Pick the plans, \
ask a question (or choose a preset), and the Jamba-1.5-Large model answers using the full \
text of each plan.";

pub const FOOTER_NOTE: &str = "Note: This app uses the Jamba-1.5-Large model to analyze insurance \
plans. The app makes a single call to Jamba with concatenated plan details for efficient comparison.";

pub const ANALYSIS_HEADER: &str = "### Analysis:";

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Print the raw API response after the answer
    pub raw: bool,
    /// Print the answer as returned instead of markdown-escaped
    pub plain: bool,
}

pub fn print_banner() {
    println!("{}", BANNER_TITLE.bright_magenta().bold());
    println!("{}", BANNER_TEXT.bright_black());
    println!();
}

pub fn print_footer() {
    println!("{}", "---".bright_black());
    println!("{}", FOOTER_NOTE.bright_black());
}

pub fn print_warning(warning: &InputWarning) {
    println!("{}", warning.to_string().yellow());
}

pub fn print_raw_response(raw: &Value) {
    println!("{}", "View API Response".bright_black().bold());
    match serde_json::to_string_pretty(raw) {
        Ok(pretty) => println!("{pretty}"),
        Err(_) => println!("{raw}"),
    }
}

/// Prints an outcome. Returns `true` only for an answered comparison.
pub fn print_outcome(outcome: &ComparisonOutcome, options: RenderOptions) -> bool {
    match outcome {
        ComparisonOutcome::Answered(analysis) => {
            println!("{}", ANALYSIS_HEADER.bright_green().bold());
            let text = if options.plain {
                &analysis.answer
            } else {
                &analysis.display
            };
            for line in text.lines() {
                println!("{}", line.bright_blue());
            }
        }
        ComparisonOutcome::Rejected(warning) => print_warning(warning),
        ComparisonOutcome::Failed(err) => {
            eprintln!("{}", format!("Error reading plan documents: {err}").red());
        }
        ComparisonOutcome::RequestFailed(err) => {
            eprintln!("{}", format!("Error calling AI21 API: {err}").red());
        }
        ComparisonOutcome::AnalysisFailed { error, .. } => {
            eprintln!(
                "{}",
                format!("An error occurred while analyzing the plans: {error}").red()
            );
        }
    }

    // A failed extraction always shows the response, as there is nothing else to go on.
    let show_raw = options.raw || matches!(outcome, ComparisonOutcome::AnalysisFailed { .. });
    if show_raw {
        if let Some(raw) = outcome.raw_response() {
            println!();
            print_raw_response(raw);
        }
    }

    outcome.is_answered()
}
