use super::{EnhanceArgs, RunContext, render};
use anyhow::{Context, Result, bail};
use console::style;
use promptcraft_core::VariationOutcome;

/// Markdown document holding every successful variation
pub fn variations_markdown(outcomes: &[VariationOutcome]) -> String {
    outcomes
        .iter()
        .enumerate()
        .filter_map(|(index, outcome)| {
            outcome.result.as_ref().ok().map(|generated| {
                format!(
                    "## Variation {} (temperature {})\n\n{}\n",
                    index + 1,
                    outcome.temperature,
                    generated.text
                )
            })
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn print_outcomes(outcomes: &[VariationOutcome]) {
    for (index, outcome) in outcomes.iter().enumerate() {
        println!(
            "{}",
            style(format!(
                "=== Variation {} (temperature {}) ===",
                index + 1,
                outcome.temperature
            ))
            .cyan()
            .bold()
        );
        match &outcome.result {
            Ok(generated) => {
                render::print_warnings(&generated.warnings);
                println!("{}\n", generated.text);
            }
            Err(err) => render::print_generation_error(err),
        }
    }
}

/// Handle the variations command: three generations at fixed temperatures
pub async fn handle_variations_command(
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
    let pb = render::spinner("Generating 3 variations...");
    let result = enhancer.generate_variations(&mut session, &request).await;
    pb.finish_and_clear();

    let outcomes = result?;
    print_outcomes(&outcomes);

    if outcomes.iter().all(|outcome| outcome.result.is_err()) {
        bail!("All variations failed");
    }

    if let Some(path) = &args.output {
        std::fs::write(path, variations_markdown(&outcomes))
            .with_context(|| format!("Failed to write variations to {}", path.display()))?;
        eprintln!("{} {}", style("Saved to").green(), path.display());
    }
    Ok(())
}
