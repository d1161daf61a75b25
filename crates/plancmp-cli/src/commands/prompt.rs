use std::process::ExitCode;

use anyhow::Result;

use super::RequestArgs;
use crate::context::AppContext;
use crate::render;

pub async fn run(context: &AppContext, args: &RequestArgs) -> Result<ExitCode> {
    let request = match args.request(context.config.documents.max_selected)? {
        Ok(request) => request,
        Err(warning) => {
            render::print_warning(&warning);
            return Ok(ExitCode::FAILURE);
        }
    };

    let prompt = request.render_prompt(context.documents()).await?;
    println!("{prompt}");
    Ok(ExitCode::SUCCESS)
}
