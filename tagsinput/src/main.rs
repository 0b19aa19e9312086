use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use tagsinput::{
    format_values, parse_line, parse_script, Command, HarnessConfig, Played, Preset, Session,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tagsinput")]
#[command(about = "Drive a tags input widget from the command line")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Harness configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Base preset: default, emails, hashtags or csv
    #[arg(short, long, global = true)]
    preset: Option<Preset>,

    /// Print the final collection as JSON
    #[arg(long, global = true)]
    json: bool,

    /// More logging (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive mode: one script command per line on stdin
    Repl,
    /// Play a script file
    Run {
        /// Script file
        script: PathBuf,
    },
    /// Validate a harness configuration file and print the resolved widget config
    Check {
        /// Harness configuration file
        file: PathBuf,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_harness(config: Option<&Path>, preset: Option<Preset>) -> Result<HarnessConfig> {
    match config {
        Some(path) => HarnessConfig::load(path, preset),
        None => HarnessConfig::from_preset(preset.unwrap_or_default()),
    }
}

fn print_tags(session: &Session, json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(session.tags()).context("serializing tags")?;
        println!("{}", out);
    } else {
        println!("{}", format_values(session.tags()));
    }
    Ok(())
}

fn print_played(played: Played<'_>) {
    match played {
        Played::Step(step) => println!("{}", step),
        Played::Tags(tags) => println!("{}", format_values(tags)),
    }
}

fn run_repl(mut session: Session, json: bool) -> Result<()> {
    println!("tagsinput REPL: type, cursor, key, paste, focus, blur, add, clear, remove, tags, quit");
    println!("Ctrl-D to exit.");

    let stdin = io::stdin();
    for (n, line) in stdin.lock().lines().enumerate() {
        let line = line.context("reading stdin")?;
        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("line {}: {:#}", n + 1, e);
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        session.run([command], print_played);
    }
    print_tags(&session, json)
}

fn run_script(mut session: Session, path: &Path, json: bool) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let commands = parse_script(&text).with_context(|| format!("parsing {}", path.display()))?;

    if json {
        session.run(commands, |_| {});
    } else {
        session.run(commands, print_played);
    }
    print_tags(&session, json)
}

fn check_config(path: &Path, preset: Option<Preset>, json: bool) -> Result<()> {
    let harness = HarnessConfig::load(path, preset)?;
    if json {
        let out = serde_json::to_string_pretty(&harness.widget).context("serializing config")?;
        println!("{}", out);
    } else {
        println!("# preset: {}", harness.preset);
        println!("# initial tags: {}", harness.initial_tags.len());
        print!("{}", harness.widget.to_toml_string()?);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Check { file }) => check_config(&file, cli.preset, cli.json),
        Some(Commands::Run { script }) => {
            let session = Session::new(load_harness(cli.config.as_deref(), cli.preset)?);
            run_script(session, &script, cli.json)
        }
        Some(Commands::Repl) | None => {
            let session = Session::new(load_harness(cli.config.as_deref(), cli.preset)?);
            run_repl(session, cli.json)
        }
    }
}
