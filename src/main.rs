//! search-filters CLI entry point
//!
//! Manages named include/exclude filters for file search and runs searches
//! with them.
//!
//! # Usage
//!
//! ```bash
//! # Pick a filter and print its patterns (default command)
//! search-filters
//!
//! # Create filters
//! search-filters add Frontend -i "src/**,web/**" -e "**/*.snap" --scope workspace
//! search-filters add-folder packages/api
//! search-filters add-file-type rs toml --name Rust
//!
//! # Run a search through a command template
//! search-filters search Frontend -x "rg -g '{include}' TODO"
//!
//! # Quiet mode (only output results)
//! search-filters -q list
//!
//! # Store a default search command
//! search-filters config set "search_command=rg -g {include} -g !{exclude} TODO"
//! ```
//!
//! # Configuration
//!
//! Configuration is read from the user's config directory
//! (`~/.config/search-filters/config.toml` on Linux). Global filters live in
//! `settings.json` next to it unless `settings_path` says otherwise.

use colored::Colorize;
use search_filters::{
    cli::{self, Cli, Commands, ConfigCommands},
    commands::{self, Context, Outcome},
    config::AppConfig,
    filters::FilterRegistry,
    launch::{CommandLauncher, PrintLauncher, SearchLauncher},
    settings::JsonFileSettings,
    ui::{DialoguerInput, OutputWriter, StdoutWriter},
    Result,
};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Install the stderr log subscriber
fn init_tracing(level: Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to initialize logging: {e}");
    }
}

/// Level from `--verbose`, then the config file, then warnings only
fn log_level(cli: &Cli, config: &AppConfig) -> Level {
    cli.verbosity()
        .or_else(|| config.log_level.as_deref().and_then(|l| l.parse().ok()))
        .unwrap_or(Level::WARN)
}

fn launcher(exec: Option<String>, config: &AppConfig, root: &Path) -> Box<dyn SearchLauncher> {
    match exec.or_else(|| config.search_command.clone()) {
        Some(template) => Box::new(CommandLauncher::new(template).in_dir(root.to_path_buf())),
        None => Box::new(PrintLauncher),
    }
}

fn dispatch(ctx: &Context<'_>, command: Commands, config: &AppConfig, root: &Path) -> Result<Outcome> {
    match command {
        Commands::Search { name, scope, exec } => {
            let launcher = launcher(exec, config, root);
            commands::search(ctx, name.as_deref(), cli::scope(scope), launcher.as_ref())
        }
        Commands::Add {
            name,
            include,
            exclude,
            scope,
        } => commands::add(
            ctx,
            name.as_deref(),
            include.as_deref(),
            exclude.as_deref(),
            cli::scope(scope),
        ),
        Commands::AddFolder {
            folder,
            name,
            scope,
        } => {
            let folder = if folder.is_absolute() {
                folder
            } else {
                root.join(folder)
            };
            commands::add_folder(ctx, &folder, name.as_deref(), cli::scope(scope))
        }
        Commands::AddFileType {
            extensions,
            into,
            name,
            scope,
        } => commands::add_file_type(
            ctx,
            &extensions,
            into.as_deref(),
            name.as_deref(),
            cli::scope(scope),
        ),
        Commands::Append {
            target,
            folders,
            extensions,
            exclude,
            scope,
        } => {
            let folders: Vec<_> = folders
                .into_iter()
                .map(|f| if f.is_absolute() { f } else { root.join(f) })
                .collect();
            commands::append(
                ctx,
                target.as_deref(),
                cli::scope(scope),
                &folders,
                &extensions,
                exclude,
            )
        }
        Commands::Combine {
            filters,
            name,
            scope,
        } => commands::combine(ctx, &filters, name.as_deref(), cli::scope(scope)),
        Commands::Edit {
            name,
            scope,
            new_name,
            include,
            exclude,
        } => commands::edit(
            ctx,
            &name,
            cli::scope(scope),
            new_name.as_deref(),
            include.as_deref(),
            exclude.as_deref(),
        ),
        Commands::Delete { name, scope, force } => {
            commands::delete(ctx, &name, cli::scope(scope), force)
        }
        Commands::Enable { name } => commands::set_enabled(ctx, &name, true),
        Commands::Disable { name } => commands::set_enabled(ctx, &name, false),
        Commands::List { all } => commands::list(ctx, all),
        Commands::Show { name, scope } => commands::show(ctx, &name, cli::scope(scope)),
        Commands::Migrate => commands::migrate(ctx),
        Commands::Config { command } => handle_config_command(config, command, ctx.output),
    }
}

fn handle_config_command(config: &AppConfig, command: ConfigCommands, output: &dyn OutputWriter) -> Result<Outcome> {
    match command {
        ConfigCommands::Set { setting } => commands::config_set(&AppConfig::config_path()?, &setting, output),
        ConfigCommands::Get { key } => commands::config_get(config, &key, output),
    }
}

fn run() -> Result<Outcome> {
    let cli = Cli::parse_args();
    let config = AppConfig::load()?;
    init_tracing(log_level(&cli, &config));

    let quiet = cli.quiet || config.quiet;
    let output = if quiet {
        StdoutWriter::quiet()
    } else {
        StdoutWriter::new()
    };

    let command = match cli.get_command() {
        Commands::Config { command } => return handle_config_command(&config, command, &output),
        command => command,
    };

    let root = match &cli.workspace {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };

    let settings_path = config.resolved_settings_path()?;
    debug!(settings = %settings_path.display(), workspace = %root.display(), "Opening filter stores");
    let mut settings = JsonFileSettings::new(settings_path);
    settings.set_auto_backup(config.auto_backup);
    let registry = FilterRegistry::new(Arc::new(settings), Some(root.clone()));

    if !matches!(command, Commands::Migrate) {
        let migrated = registry.migrate_legacy();
        if migrated > 0 {
            info!(count = migrated, "Migrated legacy filters");
        }
    }

    let input = DialoguerInput::new();
    let ctx = Context::new(&registry, &input, &output);

    dispatch(&ctx, command, &config, &root)
}

fn main() -> ExitCode {
    match run() {
        Ok(outcome) if outcome.is_failure() => ExitCode::FAILURE,
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "Error:".red());
            ExitCode::FAILURE
        }
    }
}
