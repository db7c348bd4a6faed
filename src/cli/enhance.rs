use super::{EnhanceArgs, RunContext, render};
use anyhow::Result;
use console::style;

/// Handle the enhance command: one generation
pub async fn handle_enhance_command(
    ctx: &RunContext,
    api_key: String,
    args: &EnhanceArgs,
) -> Result<()> {
    let enhancer = ctx.build_enhancer(api_key)?;
    let mut session = ctx.new_session();
    ctx.apply_args(&mut session, args)?;
    let request = ctx.build_request(&session, args);

    render::print_input_stats(&request.raw_task);
    render::print_active_techniques(&request.config);
    let pb = render::spinner("Enhancing your prompt with Gemini...");
    let result = enhancer.generate(&mut session, &request).await;
    pb.finish_and_clear();

    let generated = result?;
    render::print_generated(&generated);

    if let Some(path) = &args.output {
        session.download_latest(path)?;
        eprintln!("{} {}", style("Saved to").green(), path.display());
    }
    Ok(())
}
