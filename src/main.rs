//! tasks CLI - personal task tracking backed by SQLite.

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use tasks::config::APP_DIR;
use tasks::view::{format_status, render_json, render_tasks};
use tasks::{Config, Filter, Store, TaskPatch};

mod cli;

use cli::{Cli, Command};

fn setup_logging() -> Result<()> {
    let log_dir = Config::log_dir();

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join(format!("{}.log", APP_DIR));

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn open_store(cli: &Cli, config: &Config) -> Result<Store> {
    let data_dir = config.resolve_data_dir(cli.dir.as_deref());
    let db_path = config.prepare_db_path(&data_dir)?;
    Store::open(&db_path).context("Failed to open task store")
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load().context("Failed to load config")?;

    match &cli.command {
        Command::Add { name, project } => {
            let mut store = open_store(&cli, &config)?;
            let task = store.add(name, project).context("Failed to add task")?;
            store.close()?;

            println!("{} Added: {} {}", "✓".green(), task.id.to_string().cyan(), task.name);
        }

        Command::List { status, project, json } => {
            // Reject conflicting selectors before touching storage
            let filter = Filter::from_options(*status, project.clone())?;

            let store = open_store(&cli, &config)?;
            let tasks = store.list(&filter).context("Failed to list tasks")?;
            store.close()?;

            if *json {
                println!("{}", render_json(&tasks)?);
            } else {
                println!("{}", render_tasks(&tasks, &config.date_format));
            }
        }

        Command::Get { id, json } => {
            let store = open_store(&cli, &config)?;
            let task = store.get(*id).context("Failed to get task")?;
            store.close()?;

            if *json {
                println!("{}", render_json(&task)?);
            } else {
                println!("{}: {}", "ID".bold(), task.id.to_string().cyan());
                println!("{}: {}", "Name".bold(), task.name);
                if !task.project.is_empty() {
                    println!("{}: {}", "Project".bold(), task.project);
                }
                println!("{}: {}", "Status".bold(), format_status(&task.status));
                println!("{}: {}", "Created".bold(), task.created.format(&config.date_format));
            }
        }

        Command::Update {
            id,
            name,
            project,
            status,
        } => {
            let patch = TaskPatch {
                id: *id,
                name: name.clone(),
                project: project.clone(),
                status: *status,
            };
            if patch.is_empty() {
                println!("{} Nothing to update for {}", "!".yellow(), id);
                return Ok(());
            }

            let mut store = open_store(&cli, &config)?;
            let task = store.update(&patch).context("Failed to update task")?;
            store.close()?;

            println!(
                "{} Updated: {} {} [{}]",
                "✓".green(),
                task.id.to_string().cyan(),
                task.name,
                format_status(&task.status)
            );
        }

        Command::Delete { id } => {
            let mut store = open_store(&cli, &config)?;
            let removed = store.delete(*id).context("Failed to delete task")?;
            store.close()?;

            if removed {
                println!("{} Deleted: {}", "✓".green(), id.to_string().cyan());
            } else {
                println!("{} No task with id {}", "!".yellow(), id);
            }
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    info!("Command: {:?}", std::env::args().collect::<Vec<_>>());

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
