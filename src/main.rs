//! aoc-scaffold: creates per-day input files and stub modules, then prints the
//! dispatch table wiring them together.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use log::{LevelFilter, debug, info};
use serde::Serialize;

use aoc_scaffold::paths::write_default_config;
use aoc_scaffold::{
    APP_NAME, AppConfig, AppPaths, REPO_URL, Scaffolder, generate_example_config,
    generate_schema,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let ctx = RuntimeContext::new(cli.global)?;
    ctx.init_logging()?;
    debug!("resolved paths: {}", ctx.paths);

    match cli.command.unwrap_or_default() {
        Command::Run => handle_run(&ctx),
        Command::Table(cmd) => handle_table(&ctx, cmd),
        Command::Init(cmd) => write_config(&ctx, cmd.force),
        Command::Config { command } => handle_config(&ctx, command),
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, APP_NAME, &mut io::stdout());
            Ok(())
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Scaffold puzzle-day input files and stub modules.",
    propagate_version = true
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,
    #[command(subcommand)]
    command: Option<Command>,
}

/// Options accepted by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct GlobalOpts {
    /// Read configuration from this file (or `config.toml` in this directory)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
    /// Log more (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
    /// Print reports and config as JSON
    #[arg(long, global = true, conflicts_with = "yaml")]
    pub json: bool,
    /// Print reports and config as YAML
    #[arg(long, global = true)]
    pub yaml: bool,
    /// Log the files that would be written without writing them
    #[arg(long = "dry-run", global = true)]
    pub dry_run: bool,
}

#[derive(Debug, Default, Subcommand)]
enum Command {
    /// Create input files and stubs, then print the registration table (default)
    #[default]
    Run,
    /// Print the registration table without touching disk
    Table(TableCommand),
    /// Write the default config file
    Init(InitCommand),
    /// Inspect and manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Clone, Copy, Args)]
struct TableCommand {
    /// Also print the `mod dayNN;` declarations
    #[arg(long)]
    modules: bool,
}

#[derive(Debug, Clone, Copy, Args)]
struct InitCommand {
    /// Replace an existing config file
    #[arg(long)]
    force: bool,
}

#[derive(Debug, Clone, Copy, Subcommand)]
enum ConfigCommand {
    /// Print the effective configuration (TOML unless --json/--yaml)
    Show,
    /// Print the config file path
    Path,
    /// Print the config file, input and source directories
    Paths,
    /// Print the JSON schema for the config file
    Schema,
    /// Print an example config file with all defaults
    Example,
    /// Overwrite the config file with defaults
    Reset,
}

#[derive(Debug)]
struct RuntimeContext {
    global: GlobalOpts,
    paths: AppPaths,
    config: AppConfig,
}

impl RuntimeContext {
    fn new(global: GlobalOpts) -> Result<Self> {
        let paths = AppPaths::discover(global.config.clone())?;
        // read-only: a missing file means defaults, nothing is written here
        let config = AppConfig::load_from_path(&paths.config_file)
            .with_context(|| format!("loading config {}", paths.config_file.display()))?;
        let paths = paths.apply_overrides(&config)?;
        Ok(Self {
            global,
            paths,
            config,
        })
    }

    const fn log_level(&self) -> LevelFilter {
        if self.global.quiet {
            return LevelFilter::Error;
        }
        match self.global.verbose {
            0 => self.config.logging.level.to_level_filter(),
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    fn init_logging(&self) -> Result<()> {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(self.log_level()).format_timestamp(None);

        if let Some(file) = self.config.logging.file.as_deref() {
            if self.global.dry_run {
                builder.try_init().context("installing logger")?;
                info!("dry-run: logging to stderr instead of {file}");
                return Ok(());
            }
            let sink = OpenOptions::new()
                .create(true)
                .append(true)
                .open(file)
                .with_context(|| format!("opening log file {file}"))?;
            builder
                .format_timestamp_secs()
                .write_style(env_logger::WriteStyle::Never)
                .target(env_logger::Target::Pipe(Box::new(sink)));
        }

        builder.try_init().context("installing logger")
    }

    fn scaffolder(&self) -> Result<Scaffolder> {
        let scaffolder = Scaffolder::new(
            self.paths.input_dir.clone(),
            self.paths.src_dir.clone(),
            &self.config.scaffold,
        )?;
        Ok(scaffolder.with_dry_run(self.global.dry_run))
    }

    /// Serialized `value` when `--json` or `--yaml` was given.
    fn structured<T: Serialize>(&self, value: &T) -> Result<Option<String>> {
        if self.global.json {
            serde_json::to_string_pretty(value)
                .map(Some)
                .context("serializing to JSON")
        } else if self.global.yaml {
            serde_yaml::to_string(value)
                .map(Some)
                .context("serializing to YAML")
        } else {
            Ok(None)
        }
    }
}

fn handle_run(ctx: &RuntimeContext) -> Result<()> {
    let scaffolder = ctx.scaffolder()?;
    let mut stdout = io::stdout().lock();

    if ctx.global.json || ctx.global.yaml {
        let report = scaffolder.scaffold()?;
        if let Some(output) = ctx.structured(&report)? {
            writeln!(stdout, "{output}").context("writing report")?;
        }
    } else {
        scaffolder.run(&mut stdout)?;
    }
    stdout.flush().context("flushing stdout")
}

fn handle_table(ctx: &RuntimeContext, cmd: TableCommand) -> Result<()> {
    let scaffolder = ctx.scaffolder()?;
    let mut stdout = io::stdout().lock();

    if cmd.modules {
        scaffolder.write_module_declarations(&mut stdout)?;
        writeln!(stdout).context("writing to stdout")?;
    }
    scaffolder.write_registration_table(&mut stdout)?;
    stdout.flush().context("flushing stdout")
}

fn write_config(ctx: &RuntimeContext, force: bool) -> Result<()> {
    let path = &ctx.paths.config_file;
    if path.exists() && !force {
        bail!(
            "{} already exists; pass --force or run `config reset` to replace it",
            path.display()
        );
    }

    if ctx.global.dry_run {
        info!("dry-run: would write default config to {}", path.display());
        return Ok(());
    }

    write_default_config(path)?;
    info!("wrote default config to {}", path.display());
    Ok(())
}

fn handle_config(ctx: &RuntimeContext, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            let output = match ctx.structured(&ctx.config)? {
                Some(output) => output,
                None => toml::to_string_pretty(&ctx.config).context("serializing config to TOML")?,
            };
            print!("{output}");
        }
        ConfigCommand::Path => println!("{}", ctx.paths.config_file.display()),
        ConfigCommand::Paths => {
            println!("config: {}", ctx.paths.config_file.display());
            println!("input:  {}", ctx.paths.input_dir.display());
            println!("src:    {}", ctx.paths.src_dir.display());
        }
        ConfigCommand::Schema => println!("{}", generate_schema(APP_NAME, REPO_URL)?),
        ConfigCommand::Example => print!("{}", generate_example_config(APP_NAME)?),
        ConfigCommand::Reset => write_config(ctx, true)?,
    }
    Ok(())
}
