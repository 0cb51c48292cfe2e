use clap::ValueEnum;
use constellation_cli::Color;

use crate::command::Cli;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::upper_case_acronyms)]
pub(crate) enum Output {
    JSON,
    YAML,
    None,
}

pub enum CommandOutput {
    Plain(String),
    Object(Box<dyn erased_serde::Serialize>),
}
pub type CommandResult = color_eyre::eyre::Result<CommandOutput>;

impl From<&str> for CommandOutput {
    fn from(text: &str) -> Self {
        CommandOutput::Plain(text.to_owned())
    }
}
impl From<String> for CommandOutput {
    fn from(text: String) -> Self {
        CommandOutput::Plain(text)
    }
}

pub struct RenderConfig {
    pub output: Output,
    pub color: Color,
    pub quiet: bool,
}

impl RenderConfig {
    pub fn new(cli: &Cli) -> Self {
        Self {
            output: cli.output,
            color: cli.color,
            quiet: cli.quiet,
        }
    }

    pub fn render_result(&self, result: CommandResult) -> color_eyre::eyre::Result<()> {
        // Errors are returned even when output is suppressed
        let output = result?;
        if self.quiet || self.output == Output::None {
            return Ok(());
        }

        match output {
            CommandOutput::Plain(text) => {
                println!("{text}");
            }
            CommandOutput::Object(obj) => match self.output {
                Output::JSON => {
                    let mut json = serde_json::to_string_pretty(&*obj)?;
                    // serde_yaml ends with a newline, match it
                    json.push('\n');
                    pretty_print("json", &json, self.color)?;
                }
                Output::YAML => {
                    let yaml = serde_yaml::to_string(&*obj)?;
                    pretty_print("yaml", &yaml, self.color)?;
                }
                Output::None => {}
            },
        }
        Ok(())
    }
}

fn pretty_print(language: &str, data: &str, color: Color) -> color_eyre::eyre::Result<()> {
    if color.is_enabled() {
        bat::PrettyPrinter::new()
            .input_from_bytes(data.as_bytes())
            .language(language)
            .print()
            .map_err(|e| color_eyre::eyre::eyre!("{e}"))?;
    } else {
        print!("{data}");
    }
    Ok(())
}
