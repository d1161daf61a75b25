//! Interactive comparison shell.

use std::borrow::Cow::{self, Borrowed, Owned};
use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use serde_json::Value;

use plancmp_application::{ComparisonRequest, ComparisonUseCase, InputWarning};
use plancmp_core::document::{DOCUMENT_EXTENSION, DocumentId, DocumentRepository, PlanSelection};
use plancmp_core::question::QuestionState;

use super::parse_plan_id;
use super::questions::print_presets;
use crate::context::AppContext;
use crate::render::{self, RenderOptions};

const COMMANDS: [&str; 8] = [
    "/plans",
    "/select",
    "/questions",
    "/preset",
    "/ask",
    "/compare",
    "/raw",
    "/help",
];

/// rustyline helper: completes commands and plan names, hints command
/// names, highlights commands.
struct ShellHelper {
    plans: Vec<String>,
}

impl ShellHelper {
    fn new(plans: Vec<String>) -> Self {
        Self { plans }
    }
}

impl Helper for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with("/select ") {
            let (start, names) = complete_plan(&self.plans, line);
            let candidates = names
                .into_iter()
                .map(|name| Pair {
                    display: name.clone(),
                    replacement: name,
                })
                .collect();
            return Ok((start, candidates));
        }

        if line.starts_with('/') && !line.contains(' ') {
            let candidates = COMMANDS
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.to_string(),
                    replacement: cmd.to_string(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

/// Completes the plan name under the cursor of a `/select` line. Names with
/// spaces are offered quoted so [`split_plan_args`] reads them back whole.
fn complete_plan(plans: &[String], line: &str) -> (usize, Vec<String>) {
    let open_quote = line.matches('"').count() % 2 == 1;
    let start = if open_quote {
        line.rfind('"').unwrap_or(line.len())
    } else {
        line.rfind(' ').map_or(0, |i| i + 1)
    };
    let typed = line[start..].trim_start_matches('"');

    let names = plans
        .iter()
        .filter(|plan| plan.starts_with(typed))
        .map(|plan| {
            if plan.contains(' ') {
                format!("\"{plan}\"")
            } else {
                plan.clone()
            }
        })
        .collect();
    (start, names)
}

/// Splits `/select` arguments into plan names.
///
/// Double quotes group a name. Unquoted words run together up to one ending
/// in `.txt`, so `Blue Care Elect.txt` stays a single name; trailing words
/// without that ending are separate names.
fn split_plan_args(args: &str) -> Vec<String> {
    let suffix = format!(".{DOCUMENT_EXTENSION}");
    let mut names = Vec::new();
    let mut pending: Vec<String> = Vec::new();
    let mut rest = args.trim_start();

    while !rest.is_empty() {
        if let Some(quoted) = rest.strip_prefix('"') {
            names.append(&mut pending);
            let (name, after) = quoted.split_once('"').unwrap_or((quoted, ""));
            if !name.trim().is_empty() {
                names.push(name.trim().to_string());
            }
            rest = after.trim_start();
            continue;
        }

        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let word = &rest[..end];
        rest = rest[end..].trim_start();
        pending.push(word.to_string());
        if word.ends_with(&suffix) {
            names.push(pending.join(" "));
            pending.clear();
        }
    }

    names.append(&mut pending);
    names
}

/// Turns `/select` names into a deduplicated selection. No names clears it.
fn resolve_selection(names: &[String], max: usize) -> Result<Vec<DocumentId>, String> {
    let ids = names
        .iter()
        .map(|name| parse_plan_id(name).map_err(|err| format!("Invalid plan '{name}': {err}")))
        .collect::<Result<Vec<_>, _>>()?;
    if ids.is_empty() {
        return Ok(ids);
    }

    PlanSelection::new(ids, max)
        .map(|selection| selection.ids().to_vec())
        .map_err(|err| InputWarning::from(err).to_string())
}

impl Highlighter for ShellHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for ShellHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            COMMANDS
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for ShellHelper {}

/// One line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ShellCommand {
    Empty,
    Quit,
    Help,
    Plans,
    Questions,
    Select(Vec<String>),
    Preset(Option<usize>),
    Ask(String),
    Compare,
    Raw,
    SetQuestion(String),
    Unknown(String),
}

impl ShellCommand {
    fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return ShellCommand::Empty;
        }
        if trimmed == "quit" || trimmed == "exit" {
            return ShellCommand::Quit;
        }
        if !trimmed.starts_with('/') {
            return ShellCommand::SetQuestion(trimmed.to_string());
        }

        let (command, rest) = trimmed.split_once(' ').unwrap_or((trimmed, ""));
        let rest = rest.trim();
        match command {
            "/help" => ShellCommand::Help,
            "/plans" => ShellCommand::Plans,
            "/questions" => ShellCommand::Questions,
            "/select" => ShellCommand::Select(split_plan_args(rest)),
            "/preset" => ShellCommand::Preset(rest.parse().ok()),
            "/ask" => ShellCommand::Ask(rest.to_string()),
            "/compare" => ShellCommand::Compare,
            "/raw" => ShellCommand::Raw,
            other => ShellCommand::Unknown(other.to_string()),
        }
    }
}

/// Mutable state of one shell session.
struct Session<'a> {
    context: &'a AppContext,
    use_case: Option<ComparisonUseCase>,
    selected: Vec<DocumentId>,
    question: QuestionState,
    last_raw: Option<Value>,
}

impl<'a> Session<'a> {
    fn new(context: &'a AppContext) -> Self {
        Self {
            context,
            use_case: None,
            selected: Vec::new(),
            question: QuestionState::new(),
            last_raw: None,
        }
    }

    async fn list_plans(&self) {
        match self.context.documents().list().await {
            Ok(plans) if plans.is_empty() => {
                println!("{}", "No .txt plans found.".yellow());
            }
            Ok(plans) => {
                for plan in plans {
                    let marker = if self.selected.contains(&plan) { "*" } else { " " };
                    println!("{} {}", marker.bright_green(), plan.as_str());
                }
            }
            Err(err) => eprintln!("{}", format!("Failed to list plans: {err}").red()),
        }
    }

    fn select(&mut self, names: &[String]) {
        let max = self.context.config.documents.max_selected;
        let selected = match resolve_selection(names, max) {
            Ok(selected) => selected,
            Err(message) => {
                println!("{}", message.yellow());
                return;
            }
        };

        self.selected = selected;
        if self.selected.is_empty() {
            println!("{}", "Selection cleared.".bright_black());
        } else {
            let names: Vec<_> = self.selected.iter().map(DocumentId::as_str).collect();
            println!("{}", format!("Selected: {}", names.join(", ")).green());
        }
    }

    fn choose_preset(&mut self, index: Option<usize>) {
        match index {
            Some(index) if self.question.choose_preset(index) => self.show_question(),
            _ => {
                println!("{}", "Choose a preset by number:".yellow());
                print_presets();
            }
        }
    }

    fn set_question(&mut self, text: &str) {
        self.question.set(text);
        self.show_question();
    }

    fn show_question(&self) {
        println!("{} {}", "Question:".bright_black(), self.question.current().green());
    }

    async fn compare(&mut self) {
        let max = self.context.config.documents.max_selected;
        let request = match ComparisonRequest::new(&self.selected, self.question.current(), max) {
            Ok(request) => request,
            Err(warning) => {
                render::print_warning(&warning);
                return;
            }
        };

        if self.use_case.is_none() {
            match self.context.comparison().await {
                Ok(use_case) => self.use_case = Some(use_case),
                Err(err) => {
                    eprintln!("{}", format!("Error: {err:#}").red());
                    return;
                }
            }
        }
        let Some(use_case) = self.use_case.as_ref() else {
            return;
        };

        println!("{}", "Analyzing plans...".bright_black());
        let outcome = use_case.execute(&request).await;
        render::print_outcome(&outcome, RenderOptions::default());
        if let Some(raw) = outcome.raw_response() {
            self.last_raw = Some(raw.clone());
        }
    }

    fn show_raw(&self) {
        match &self.last_raw {
            Some(raw) => render::print_raw_response(raw),
            None => println!("{}", "No API response yet.".bright_black()),
        }
    }
}

fn print_help() {
    println!("{}", "Commands:".bright_black().bold());
    for (command, text) in [
        ("/plans", "list available plans (* = selected)"),
        ("/select A [B]", "choose up to two plans"),
        ("/questions", "list preset questions"),
        ("/preset N", "use preset question N"),
        ("/ask <text>", "set the question and compare"),
        ("/compare", "compare the selected plans"),
        ("/raw", "show the last API response"),
        ("quit", "leave the shell"),
    ] {
        println!("  {:<16}{}", command.bright_cyan(), text.bright_black());
    }
    println!("{}", "Any other text becomes the current question.".bright_black());
}

pub async fn run(context: &AppContext) -> Result<ExitCode> {
    let plan_names: Vec<String> = match context.documents().list().await {
        Ok(plans) => plans.into_iter().map(String::from).collect(),
        Err(err) => {
            tracing::warn!(error = %err, "Could not list plans for completion");
            Vec::new()
        }
    };

    let mut rl = Editor::<ShellHelper, DefaultHistory>::new()?;
    rl.set_helper(Some(ShellHelper::new(plan_names)));

    render::print_banner();
    println!("{}", "Type '/help' for commands or 'quit' to exit.".bright_black());
    println!();

    let mut session = Session::new(context);

    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let command = ShellCommand::parse(&line);
                if command != ShellCommand::Empty {
                    let _ = rl.add_history_entry(line.trim());
                }

                match command {
                    ShellCommand::Empty => continue,
                    ShellCommand::Quit => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    ShellCommand::Help => print_help(),
                    ShellCommand::Plans => session.list_plans().await,
                    ShellCommand::Questions => print_presets(),
                    ShellCommand::Select(names) => session.select(&names),
                    ShellCommand::Preset(index) => session.choose_preset(index),
                    ShellCommand::Ask(text) => {
                        session.set_question(&text);
                        session.compare().await;
                    }
                    ShellCommand::Compare => session.compare().await,
                    ShellCommand::Raw => session.show_raw(),
                    ShellCommand::SetQuestion(text) => session.set_question(&text),
                    ShellCommand::Unknown(command) => {
                        println!("{}", format!("Unknown command {command}; try /help").bright_black());
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {err:?}").red());
                break;
            }
        }
    }

    render::print_footer();
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(ShellCommand::parse("   "), ShellCommand::Empty);
        assert_eq!(ShellCommand::parse("quit"), ShellCommand::Quit);
        assert_eq!(ShellCommand::parse("/plans"), ShellCommand::Plans);
        assert_eq!(
            ShellCommand::parse("/select PlanA  PlanB.txt"),
            ShellCommand::Select(vec!["PlanA".to_string(), "PlanB.txt".to_string()])
        );
        assert_eq!(ShellCommand::parse("/select"), ShellCommand::Select(vec![]));
        assert_eq!(ShellCommand::parse("/preset 2"), ShellCommand::Preset(Some(2)));
        assert_eq!(ShellCommand::parse("/preset two"), ShellCommand::Preset(None));
        assert_eq!(
            ShellCommand::parse("/ask Which is cheaper?"),
            ShellCommand::Ask("Which is cheaper?".to_string())
        );
        assert_eq!(ShellCommand::parse("/bogus x"), ShellCommand::Unknown("/bogus".to_string()));
    }

    #[test]
    fn test_select_keeps_names_with_spaces() {
        assert_eq!(
            ShellCommand::parse("/select Blue Care Elect.txt"),
            ShellCommand::Select(vec!["Blue Care Elect.txt".to_string()])
        );
        assert_eq!(
            ShellCommand::parse(r#"/select "Blue Care Elect.txt" PlanA"#),
            ShellCommand::Select(vec!["Blue Care Elect.txt".to_string(), "PlanA".to_string()])
        );
        assert_eq!(
            ShellCommand::parse(r#"/select "Blue Care Elect" PlanB.txt"#),
            ShellCommand::Select(vec!["Blue Care Elect".to_string(), "PlanB.txt".to_string()])
        );
        assert_eq!(
            ShellCommand::parse("/select PlanA.txt Blue Care Elect.txt"),
            ShellCommand::Select(vec!["PlanA.txt".to_string(), "Blue Care Elect.txt".to_string()])
        );

        let ids = resolve_selection(&split_plan_args("Blue Care Elect.txt"), 2).unwrap();
        assert_eq!(ids.len(), 1);
        assert_eq!(ids[0].as_str(), "Blue Care Elect.txt");
    }

    #[test]
    fn test_completion_quotes_names_with_spaces() {
        let plans = vec!["Blue Care Elect.txt".to_string(), "PlanA.txt".to_string()];

        let (start, names) = complete_plan(&plans, "/select Bl");
        assert_eq!(start, "/select ".len());
        assert_eq!(names, vec![r#""Blue Care Elect.txt""#.to_string()]);

        let (start, names) = complete_plan(&plans, r#"/select PlanA.txt "Blue C"#);
        assert_eq!(start, "/select PlanA.txt ".len());
        assert_eq!(names, vec![r#""Blue Care Elect.txt""#.to_string()]);

        let completed = format!("/select {}", names[0]);
        assert_eq!(
            ShellCommand::parse(&completed),
            ShellCommand::Select(vec!["Blue Care Elect.txt".to_string()])
        );
    }

    #[test]
    fn test_duplicate_names_count_once() {
        let names = ["PlanA", "PlanA.txt", "PlanB"].map(String::from);
        let ids = resolve_selection(&names, 2).unwrap();
        let ids: Vec<_> = ids.iter().map(DocumentId::as_str).collect();
        assert_eq!(ids, vec!["PlanA.txt", "PlanB.txt"]);

        let too_many = ["PlanA", "PlanB", "PlanC"].map(String::from);
        assert_eq!(
            resolve_selection(&too_many, 2).unwrap_err(),
            "Please select at most 2 healthcare plans (3 selected)."
        );
        assert!(resolve_selection(&[], 2).unwrap().is_empty());
    }

    #[test]
    fn test_plain_text_becomes_question() {
        assert_eq!(
            ShellCommand::parse("  How do the costs compare?  "),
            ShellCommand::SetQuestion("How do the costs compare?".to_string())
        );
    }
}
