use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use plancmp_core::document::DocumentRepository;

use crate::context::AppContext;

pub async fn run(context: &AppContext) -> Result<ExitCode> {
    let repository = context.documents();
    let plans = repository
        .list()
        .await
        .with_context(|| format!("Failed to list plans in {}", repository.data_dir().display()))?;

    if plans.is_empty() {
        println!(
            "{}",
            format!("No .txt plans found in {}", repository.data_dir().display()).yellow()
        );
        return Ok(ExitCode::SUCCESS);
    }

    for id in plans {
        println!("{}", id.as_str());
    }
    Ok(ExitCode::SUCCESS)
}
