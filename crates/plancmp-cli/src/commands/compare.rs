use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;

use super::RequestArgs;
use crate::context::AppContext;
use crate::render::{self, RenderOptions};

pub async fn run(context: &AppContext, args: &RequestArgs, options: RenderOptions) -> Result<ExitCode> {
    // Input problems are reported before the credential is looked up.
    let request = match args.request(context.config.documents.max_selected)? {
        Ok(request) => request,
        Err(warning) => {
            render::print_warning(&warning);
            return Ok(ExitCode::FAILURE);
        }
    };
    let use_case = context.comparison().await?;

    eprintln!("{}", "Analyzing plans...".bright_black());
    let outcome = use_case.execute(&request).await;
    let answered = render::print_outcome(&outcome, options);
    render::print_footer();

    Ok(if answered {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
