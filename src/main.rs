use anyhow::Context;
use clap::{Parser, Subcommand};
use log::{debug, warn};
use serenity::commands::{CommandResult, UiAction};
use serenity::core::{print_error, print_info, print_section_header, print_success, AppConfig, JsonStorage};
use serenity::logic::Logic;
use serenity::roster::CsvRoster;
use serenity::ui::render_for;
use std::env;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "serenity")]
#[command(about = "Track attendance, participation and questions of tutorial groups")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Data file to use instead of the configured one
    #[arg(long, global = true, value_name = "FILE")]
    data: Option<PathBuf>,

    /// Directory for exported sheets
    #[arg(long, global = true, value_name = "DIR")]
    export_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read commands from standard input until `exit` (default)
    Shell,
    /// Execute a single command line, e.g. `serenity exec viewatt grp/G01`
    Exec {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        line: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load_or_create();

    // Configure logging based on --debug flag, then the configured level
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else if env::var_os("RUST_LOG").is_none() {
        let level = config.as_ref().map_or("info", |config| config.log_level.as_str());
        env::set_var("RUST_LOG", level);
    }
    env_logger::init();

    let mut config = config.unwrap_or_else(|e| {
        warn!("Using built-in settings: {e}");
        AppConfig::with_data_dir(Path::new("data"))
    });
    config.touch();
    if let Err(e) = config.save() {
        warn!("Could not record session start: {e}");
    }

    let data_file = cli.data.unwrap_or_else(|| config.data_file.clone());
    let export_dir = cli.export_dir.unwrap_or_else(|| config.export_dir.clone());
    debug!("Data file {}, exports to {}", data_file.display(), export_dir.display());

    let mut logic = Logic::load(JsonStorage::new(data_file), Box::new(CsvRoster::new(export_dir)));

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => run_shell(&mut logic).context("Failed to read from standard input"),
        Commands::Exec { line } => {
            let line = line.join(" ");
            match logic.execute(&line) {
                Ok(result) => {
                    show(&logic, &result);
                    Ok(())
                }
                Err(e) => {
                    print_error(&e.to_string());
                    std::process::exit(1);
                }
            }
        }
    }
}

fn run_shell(logic: &mut Logic) -> io::Result<()> {
    print_info("Welcome to Serenity! Type `help` to list the commands.");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next().transpose()? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        match logic.execute(&line) {
            Ok(result) => {
                show(logic, &result);
                if result.ui_action == UiAction::Exit {
                    break;
                }
            }
            Err(e) => print_error(&e.to_string()),
        }
    }
    Ok(())
}

fn show(logic: &Logic, result: &CommandResult) {
    match result.ui_action {
        UiAction::Help => print_info(&result.feedback),
        _ => print_success(&result.feedback),
    }
    if let Some(view) = render_for(result.ui_action, logic.model()) {
        print_section_header(section_title(result.ui_action));
        print!("{view}");
    }
}

fn section_title(action: UiAction) -> &'static str {
    match action {
        UiAction::AddGrp | UiAction::ViewAtt => "Attendance",
        UiAction::ViewScore => "Participation",
        UiAction::DelGrp => "Tutorial groups",
        UiAction::RefreshQuestions => "Questions",
        _ => "Lesson",
    }
}
