use super::{RunContext, history, render, variations};
use anyhow::Result;
use console::style;
use promptcraft_core::config::constants::{defaults, model_helpers};
use promptcraft_core::{
    ContextSource, EnhanceRequest, GenerationError, PromptEnhancer, Selection, Session,
    Technique,
};
use std::io::{self, Write};
use std::path::PathBuf;

/// One line of REPL input
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    Generate(String),
    Variations(Option<String>),
    Preset(String),
    Save(String),
    Toggle(Technique),
    Set(Setting),
    Context(Option<PathBuf>),
    History,
    Clear,
    Export(Option<PathBuf>),
    Download(Option<PathBuf>),
    Status,
    Help,
    Quit,
}

/// Values changed with `/set`
#[derive(Debug, Clone, PartialEq)]
pub enum Setting {
    FormatDetails(String),
    IterateInstructions(String),
    NegativeDetails(String),
    Persona(String),
    Tone(String),
    Model(String),
    Temperature(f32),
}

pub const HELP: &str = "\
Type a task to enhance it, or use a command:
  /preset <name>        select a preset, or `manual` for your own switches
  /save <name>          save your manual switches as a custom preset
  /toggle <technique>   flip role, cot, format, context, iterate or negative
  /set <field> <value>  format, iterate, exclude, persona, tone, model, temperature
  /context <path>       use a UTF-8 file as context (`/context clear` removes it)
  /variations [task]    three variations of the task (or of the last task)
  /history              show recent prompts
  /clear                clear history
  /export [path]        write history as JSON
  /download [path]      write the latest output as markdown
  /status               show current settings
  /help                 show this help
  /quit                 leave";

impl ReplCommand {
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let Some(command) = line.strip_prefix('/') else {
            return Ok(Some(Self::Generate(line.to_string())));
        };

        let (name, rest) = match command.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (command, ""),
        };
        let optional_path = || (!rest.is_empty()).then(|| PathBuf::from(rest));

        let parsed = match name.to_ascii_lowercase().as_str() {
            "preset" if !rest.is_empty() => Self::Preset(rest.to_string()),
            "preset" => return Err("usage: /preset <name>".into()),
            "save" if !rest.is_empty() => Self::Save(rest.to_string()),
            "save" => return Err("Please enter a preset name".into()),
            "toggle" => Self::Toggle(
                Technique::parse(rest).ok_or_else(|| format!("unknown technique '{rest}'"))?,
            ),
            "set" => Self::Set(parse_setting(rest)?),
            "context" if rest.eq_ignore_ascii_case("clear") => Self::Context(None),
            "context" if !rest.is_empty() => Self::Context(Some(PathBuf::from(rest))),
            "context" => return Err("usage: /context <path> | /context clear".into()),
            "variations" => Self::Variations((!rest.is_empty()).then(|| rest.to_string())),
            "history" => Self::History,
            "clear" => Self::Clear,
            "export" => Self::Export(optional_path()),
            "download" => Self::Download(optional_path()),
            "status" => Self::Status,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(format!("unknown command '/{other}', try /help")),
        };
        Ok(Some(parsed))
    }
}

fn parse_setting(rest: &str) -> Result<Setting, String> {
    let (field, value) = rest
        .split_once(char::is_whitespace)
        .map(|(field, value)| (field, value.trim()))
        .unwrap_or((rest, ""));

    let setting = match field.to_ascii_lowercase().as_str() {
        "format" => Setting::FormatDetails(value.to_string()),
        "iterate" => Setting::IterateInstructions(value.to_string()),
        "exclude" | "negative" => Setting::NegativeDetails(value.to_string()),
        "persona" | "role" => Setting::Persona(value.to_string()),
        "tone" => Setting::Tone(value.to_string()),
        "model" if !value.is_empty() => Setting::Model(value.to_string()),
        "temperature" => {
            let temperature: f32 = value
                .parse()
                .map_err(|_| format!("'{value}' is not a number"))?;
            if !(defaults::MIN_TEMPERATURE..=defaults::MAX_TEMPERATURE).contains(&temperature) {
                return Err(format!(
                    "temperature must be between {} and {}",
                    defaults::MIN_TEMPERATURE,
                    defaults::MAX_TEMPERATURE
                ));
            }
            Setting::Temperature(temperature)
        }
        _ => return Err("usage: /set <format|iterate|exclude|persona|tone|model|temperature> <value>".into()),
    };
    Ok(setting)
}

/// Save the manual switches as a custom preset. Only allowed in manual mode.
fn save_manual_preset(session: &mut Session, name: &str) -> Result<(), GenerationError> {
    if let Selection::Preset { name: active, .. } = &session.selection {
        return Err(GenerationError::validation(format!(
            "Preset '{active}' is active; switch to /preset manual before saving"
        )));
    }
    let flags = session.live.flags;
    session.presets.save_custom(name, flags)
}

/// State of one interactive session
struct Repl {
    ctx: RunContext,
    enhancer: PromptEnhancer,
    session: Session,
    persona: String,
    tone: String,
    context: ContextSource,
    last_task: Option<String>,
}

impl Repl {
    fn request(&self, task: String) -> EnhanceRequest {
        EnhanceRequest {
            raw_task: task,
            config: self.session.active_config(),
            role_persona: self.persona.clone(),
            tone_style: self.tone.clone(),
            context: self.context.clone(),
            model: self.ctx.model.clone(),
            temperature: self.ctx.temperature,
        }
    }

    async fn generate(&mut self, task: String) {
        let request = self.request(task.clone());
        render::print_input_stats(&request.raw_task);
        render::print_active_techniques(&request.config);
        self.last_task = Some(task);

        let pb = render::spinner("Enhancing your prompt with Gemini...");
        let result = self.enhancer.generate(&mut self.session, &request).await;
        pb.finish_and_clear();

        match result {
            Ok(generated) => render::print_generated(&generated),
            Err(err) => render::print_generation_error(&err),
        }
    }

    async fn variations(&mut self, task: Option<String>) {
        let Some(task) = task.or_else(|| self.last_task.clone()) else {
            render::print_generation_error(&GenerationError::validation(
                "Please enter some raw input to enhance.",
            ));
            return;
        };
        let request = self.request(task.clone());
        self.last_task = Some(task);

        let pb = render::spinner("Generating 3 variations...");
        let result = self
            .enhancer
            .generate_variations(&mut self.session, &request)
            .await;
        pb.finish_and_clear();

        match result {
            Ok(outcomes) => variations::print_outcomes(&outcomes),
            Err(err) => render::print_generation_error(&err),
        }
    }

    fn apply_setting(&mut self, setting: Setting) {
        match setting {
            Setting::FormatDetails(value) => self.session.live.format_details = value,
            Setting::IterateInstructions(value) => self.session.live.iterate_instructions = value,
            Setting::NegativeDetails(value) => self.session.live.negative_details = value,
            Setting::Persona(value) => self.persona = value,
            Setting::Tone(value) => self.tone = value,
            Setting::Model(value) => {
                if !model_helpers::is_supported(&value) {
                    println!(
                        "{} '{value}' is not one of the curated models",
                        style("Note:").yellow()
                    );
                }
                self.ctx.model = value;
            }
            Setting::Temperature(value) => self.ctx.temperature = value,
        }
        println!("{}", style("Updated.").green());
    }

    fn print_status(&self) {
        println!("{} {}", style("Model:").bold(), render::model_label(&self.ctx.model));
        println!("{} {}", style("Temperature:").bold(), self.ctx.temperature);
        println!(
            "{} {} ms between calls",
            style("Rate limit:").bold(),
            self.session.rate_limiter.min_interval().as_millis()
        );
        println!("{} {}", style("Preset:").bold(), self.session.selection.name());
        println!(
            "{} {}",
            style("Techniques:").bold(),
            render::active_techniques_line(&self.session.active_config())
        );
        println!("{} {}", style("Persona:").bold(), self.persona);
        println!("{} {}", style("Tone:").bold(), self.tone);
        let context = match &self.context {
            ContextSource::File(path) => path.display().to_string(),
            _ => "none".to_string(),
        };
        println!("{} {context}", style("Context:").bold());
    }

    /// Returns false when the loop should stop
    async fn dispatch(&mut self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Generate(task) => self.generate(task).await,
            ReplCommand::Variations(task) => self.variations(task).await,
            ReplCommand::Preset(name) => match self.session.presets.select(&name) {
                Some(selection) => {
                    println!("{} {}", style("Preset:").green(), selection.name());
                    self.session.selection = selection;
                }
                None => println!("{} unknown preset '{name}'", style("Error:").red()),
            },
            ReplCommand::Save(name) => {
                match save_manual_preset(&mut self.session, &name) {
                    Ok(()) => println!("{} saved preset '{}'", style("OK").green(), name.trim()),
                    Err(err) => render::print_generation_error(&err),
                }
            }
            ReplCommand::Toggle(technique) => {
                let enabled = !self.session.live.flags.is_enabled(technique);
                self.session.live.flags.set(technique, enabled);
                println!(
                    "{} {}",
                    style(technique.label()).bold(),
                    if enabled { "on" } else { "off" }
                );
                if let Selection::Preset { name, .. } = &self.session.selection {
                    println!(
                        "{}",
                        style(format!(
                            "Preset '{name}' fixes the switches; use /preset manual to apply yours."
                        ))
                        .dim()
                    );
                }
            }
            ReplCommand::Set(setting) => self.apply_setting(setting),
            ReplCommand::Context(path) => {
                self.context = ContextSource::from_path(path);
                println!("{}", style("Context updated.").green());
            }
            ReplCommand::History => history::print_history(&self.session.history),
            ReplCommand::Clear => {
                self.session.clear_history();
                println!("{}", style("History cleared.").green());
            }
            ReplCommand::Export(path) => {
                let path = path.unwrap_or_else(|| PathBuf::from(defaults::HISTORY_EXPORT_FILE));
                match self.session.export_history(&path) {
                    Ok(()) => println!("{} {}", style("Exported to").green(), path.display()),
                    Err(err) => println!("{} {err:#}", style("Error:").red()),
                }
            }
            ReplCommand::Download(path) => {
                let path = path.unwrap_or_else(|| PathBuf::from(defaults::OUTPUT_DOWNLOAD_FILE));
                match self.session.download_latest(&path) {
                    Ok(()) => println!("{} {}", style("Saved to").green(), path.display()),
                    Err(err) => println!("{} {err:#}", style("Error:").red()),
                }
            }
            ReplCommand::Status => self.print_status(),
            ReplCommand::Help => println!("{HELP}"),
            ReplCommand::Quit => return false,
        }
        true
    }
}

/// Handle the interactive command
pub async fn handle_interactive_command(ctx: RunContext, api_key: String) -> Result<()> {
    let enhancer = ctx.build_enhancer(api_key)?;
    let mut repl = Repl {
        session: ctx.new_session(),
        persona: ctx.config.persona.role.clone(),
        tone: ctx.config.persona.tone.clone(),
        context: ContextSource::None,
        last_task: None,
        enhancer,
        ctx,
    };

    println!("{}", style("PromptCraft interactive session").blue().bold());
    println!("Model: {}", render::model_label(&repl.ctx.model));
    println!("{}", style("Type /help for commands, /quit to leave\n").dim());

    loop {
        print!("{} ", style(">").cyan().bold());
        io::stdout().flush().ok();

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                println!("{} failed to read input: {err}", style("Error:").red());
                break;
            }
        }

        match ReplCommand::parse(&input) {
            Ok(Some(command)) => {
                if !repl.dispatch(command).await {
                    break;
                }
            }
            Ok(None) => continue,
            Err(message) => println!("{} {message}", style("Error:").red()),
        }
    }

    Ok(())
}
