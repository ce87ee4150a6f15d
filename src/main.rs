use clap::{Parser, Subcommand};
use serde_json::Value;
use shprompt::commands::*;
use shprompt::core::{config::Options, output::print_error, shell::Shell};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "shprompt")]
#[command(about = "Render a shell prompt from a template of status providers")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Configuration file (default: <config dir>/shprompt/config.json)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Named template to render
    #[arg(short = 't', long, value_name = "NAME")]
    template: Option<String>,

    /// Template string to render instead of a named template
    #[arg(short = 'c', long, value_name = "TEMPLATE")]
    custom_template: Option<String>,

    /// Disable colors
    #[arg(long)]
    no_color: bool,

    /// Shell to format escape sequences for: bash, zsh, fish or none (default: detect)
    #[arg(long, value_name = "SHELL")]
    shell: Option<Shell>,

    /// Provider option, e.g. path.fullpath=2 (repeatable)
    #[arg(short = 'o', long = "option", value_name = "KEY=VALUE", value_parser = parse_option)]
    options: Vec<(String, Value)>,

    /// Evaluate providers one after another
    #[arg(long)]
    sequential: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the providers and their options
    Providers,
    /// List the named templates and explain the template syntax
    Templates,
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "error" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let result = match cli.command {
        Some(Commands::Providers) => execute_providers(),
        Some(Commands::Templates) => execute_templates(cli.config),
        None => execute_render(RenderOptions {
            template: cli.template,
            custom_template: cli.custom_template,
            options: cli.options.into_iter().collect::<Options>(),
            color: !cli.no_color,
            shell: cli.shell,
            config: cli.config,
            sequential: cli.sequential,
        }),
    };

    if let Err(e) = result {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
