//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name    = "hexgen",
    bin_name = "hexgen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Hexagonal boilerplate generator",
    long_about = "hexgen generates entities, command/query handlers and controllers \
                  for a hexagonal project, and registers them in the project's \
                  YAML configuration.",
    after_help = "EXAMPLES:\n\
        \x20 hexgen entity Billing Invoice -p 'number:string(3,20):unique,total:decimal(0,)' --register\n\
        \x20 hexgen command Billing CreateInvoice --register\n\
        \x20 hexgen classify AttachTagToArticle\n\
        \x20 hexgen doctor Billing --entity Invoice",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate an entity with its repository interface and implementation.
    #[command(
        visible_alias = "e",
        after_help = "EXAMPLES:\n\
            \x20 hexgen entity Billing Invoice -p 'number:string(3,20):unique,paidAt:datetime:nullable'\n\
            \x20 hexgen entity Billing Invoice -i --register"
    )]
    Entity(EntityArgs),

    /// Generate a command message and its handler.
    #[command(
        visible_alias = "cmd",
        after_help = "EXAMPLES:\n\
            \x20 hexgen command Billing CreateInvoice\n\
            \x20 hexgen command Blog AttachTagToArticle --register\n\
            \x20 hexgen command Shop Checkout -e Cart,Order"
    )]
    Command(MessageArgs),

    /// Generate a query message and its handler.
    #[command(visible_alias = "q")]
    Query(MessageArgs),

    /// Generate an HTTP controller and the module's route group.
    #[command(visible_alias = "ctl")]
    Controller(ControllerArgs),

    /// Parse a property specification and print the descriptors.
    #[command(after_help = "EXAMPLES:\n\
            \x20 hexgen props 'nom:string(3,100):unique,age:int(0,150)'")]
    Props(PropsArgs),

    /// Classify an operation name and print the handler skeleton.
    #[command(after_help = "EXAMPLES:\n\
            \x20 hexgen classify ActivateUser\n\
            \x20 hexgen classify AttribuerCadeaux --context Utilisateur")]
    Classify(ClassifyArgs),

    /// Check that a module is registered in every registry.
    #[command(visible_alias = "check")]
    Doctor(DoctorArgs),

    /// Write a default hexgen.toml.
    #[command(after_help = "EXAMPLES:\n\
            \x20 hexgen init           # ./hexgen.toml\n\
            \x20 hexgen init --global  # user configuration directory")]
    Init(InitArgs),

    /// Inspect the effective configuration.
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completion scripts.
    #[command(after_help = "EXAMPLES:\n\
            \x20 hexgen completions bash > ~/.local/share/bash-completion/completions/hexgen\n\
            \x20 hexgen completions zsh  > ~/.zfunc/_hexgen")]
    Completions(CompletionsArgs),
}

// ── generation ────────────────────────────────────────────────────────────────

/// Flags shared by every generator.
#[derive(Debug, Clone, Copy, Args)]
pub struct GenerateFlags {
    /// Add the new artifact to the configured registries.
    #[arg(long = "register", help = "Register in the project configuration")]
    pub register: bool,

    #[arg(long = "force", help = "Overwrite existing files")]
    pub force: bool,

    #[arg(long = "dry-run", help = "Show what would be written without writing")]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct EntityArgs {
    #[arg(value_name = "MODULE", help = "Module (bounded context) name")]
    pub module: String,

    #[arg(value_name = "NAME", help = "Entity name")]
    pub name: String,

    #[arg(
        short = 'p',
        long = "properties",
        value_name = "SPEC",
        conflicts_with = "interactive",
        help = "Properties, e.g. 'nom:string(3,100):unique,age:int(0,150)'"
    )]
    pub properties: Option<String>,

    #[arg(
        short = 'i',
        long = "interactive",
        help = "Enter properties one per line"
    )]
    pub interactive: bool,

    #[command(flatten)]
    pub flags: GenerateFlags,
}

#[derive(Debug, Args)]
pub struct MessageArgs {
    #[arg(value_name = "MODULE", help = "Module (bounded context) name")]
    pub module: String,

    #[arg(value_name = "NAME", help = "Operation name, e.g. CreateInvoice")]
    pub name: String,

    /// Replaces the entities inferred from the name.
    #[arg(
        short = 'e',
        long = "entities",
        value_name = "ENTITY",
        value_delimiter = ',',
        help = "Entities the handler works on (comma separated)"
    )]
    pub entities: Vec<String>,

    #[command(flatten)]
    pub flags: GenerateFlags,
}

#[derive(Debug, Args)]
pub struct ControllerArgs {
    #[arg(value_name = "MODULE", help = "Module (bounded context) name")]
    pub module: String,

    #[arg(value_name = "NAME", help = "Controller name, without the suffix")]
    pub name: String,

    #[command(flatten)]
    pub flags: GenerateFlags,
}

// ── inspection ────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PropsArgs {
    #[arg(value_name = "SPEC", help = "Property specification")]
    pub spec: String,
}

#[derive(Debug, Args)]
pub struct ClassifyArgs {
    #[arg(value_name = "NAME", help = "Operation name")]
    pub name: String,

    #[arg(
        short = 'e',
        long = "entities",
        value_name = "ENTITY",
        value_delimiter = ',',
        help = "Explicit entities (comma separated)"
    )]
    pub entities: Vec<String>,

    /// Used when a relation verb names a single entity.
    #[arg(long = "context", value_name = "ENTITY", help = "Context entity")]
    pub context: Option<String>,
}

#[derive(Debug, Args)]
pub struct DoctorArgs {
    #[arg(value_name = "MODULE", help = "Module to check")]
    pub module: String,

    #[arg(long = "entity", value_name = "NAME", help = "Also check this entity's entries")]
    pub entity: Option<String>,
}

// ── init ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InitArgs {
    #[arg(long = "global", help = "Write to the user configuration directory")]
    pub global: bool,

    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `generation.command_bus`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path of the configuration file in use.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
