use clap::Subcommand;

/// Template utilities.
#[derive(Clone, Debug, Subcommand)]
pub enum TemplateCommands {
    /// Render a template file with the given variables.
    Render {
        file: String,
        /// Variable as key=value; repeatable.
        #[arg(long = "var")]
        vars: Vec<String>,
        /// Fallback value as key=value, used when no variable is set; repeatable.
        #[arg(long = "default")]
        defaults: Vec<String>,
        /// Conditional name to switch on; repeatable.
        #[arg(long = "enable")]
        enabled: Vec<String>,
    },
    /// List the variables a template file references.
    Vars { file: String },
}
