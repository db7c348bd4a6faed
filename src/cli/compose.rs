use super::{EnhanceArgs, RunContext, render};
use anyhow::{Context, Result};
use console::style;
use promptcraft_core::prepare_prompt;
use promptcraft_core::prompts::sections;

/// Handle the compose command: show the document that would be sent
pub async fn handle_compose_command(ctx: &RunContext, args: &EnhanceArgs) -> Result<()> {
    let mut session = ctx.new_session();
    ctx.apply_args(&mut session, args)?;
    let request = ctx.build_request(&session, args);

    let prepared = prepare_prompt(&request, ctx.config.input.max_length).await?;

    render::print_input_stats(&prepared.task);
    render::print_active_techniques(&request.config);
    render::print_warnings(&prepared.warnings);
    let included: Vec<&str> = sections(&request.config, &prepared.context_text)
        .into_iter()
        .map(|section| section.label())
        .collect();
    eprintln!("{} {}", style("Sections:").cyan(), included.join(" > "));
    eprintln!();

    println!("{}", prepared.document);

    if let Some(path) = &args.output {
        std::fs::write(path, &prepared.document)
            .with_context(|| format!("Failed to write document to {}", path.display()))?;
        eprintln!("{} {}", style("Saved to").green(), path.display());
    }
    Ok(())
}
