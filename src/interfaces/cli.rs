use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "lingo")]
#[command(about = "A multi-provider command-line translator.")]
#[command(version)]
pub struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Choose color theme
    #[arg(short = 'T', long, global = true)]
    pub theme: Option<String>,

    /// Override the active provider for this invocation
    #[arg(short = 'p', long, global = true)]
    pub provider: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Translate text
    Translate {
        /// Source language code, or "auto" to detect
        #[arg(short, long, default_value = "auto")]
        from: String,

        /// Target language code
        #[arg(short, long)]
        to: String,

        /// Text to translate
        #[arg(num_args = 1..)]
        text: Vec<String>,
    },

    /// Detect the language of text
    Detect {
        /// Text to analyze
        #[arg(num_args = 1..)]
        text: Vec<String>,
    },

    /// Check the active provider's credentials
    Validate,

    /// List the active provider's supported languages
    Languages,

    /// Translate stdin line by line until EOF or ctrl-c
    Watch {
        /// Source language code, or "auto" to detect
        #[arg(short, long, default_value = "auto")]
        from: String,

        /// Target language code
        #[arg(short, long)]
        to: String,
    },

    /// Show provider and settings status
    Status,

    /// Change a setting, e.g. `set deepl.api_key XXX` or `set provider deepl`
    Set {
        field: String,
        value: String,
    },

    /// Generate a settings sample
    GenerateConfig,

    /// Edit the settings file
    EditConfig,
}
