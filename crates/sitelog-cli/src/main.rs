use anyhow::{Context, Result};
use clap::Parser;
use sitelog_config::{Config, GeminiSettings};
use sitelog_engine::{Assistant, DirBackend, KvStore, Models};
use sitelog_gemini::{GeminiClient, GeminiOptions};
use std::io::{self, Write};
use time::OffsetDateTime;

mod browse;
mod cli;
mod commands;
mod styling;

use cli::{Cli, Commands, ConfigCommand, DocCommand, EntryCommand, ReportCommand};

fn build_assistant(settings: &GeminiSettings) -> Result<Assistant<GeminiClient>> {
    let options = GeminiOptions {
        base_url: settings.base_url.clone(),
        timeout_secs: settings.timeout_secs,
        ..GeminiOptions::from_env_key(&settings.api_key_env)?
    };
    let client = GeminiClient::new(options)?;
    let models = Models {
        report: settings.report_model.clone(),
        extraction: settings.extraction_model.clone(),
    };
    Ok(Assistant::new(client, models))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if let Commands::Config(command) = &cli.command {
        let path = Config::config_path();
        let mut out = io::stdout().lock();
        match command {
            ConfigCommand::Init { force } => commands::init_config(&path, *force, &mut out)?,
            ConfigCommand::Path => writeln!(out, "{}", path.display())?,
        }
        return Ok(());
    }

    let config = Config::load_or_default().with_context(|| {
        format!(
            "Failed to load config file {}",
            Config::config_path().display()
        )
    })?;
    let data_dir = cli.data_dir.unwrap_or(config.data_dir);
    log::debug!("Using data directory {}", data_dir.display());
    let mut store = KvStore::new(DirBackend::new(data_dir));

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Entry(command) => match command {
            EntryCommand::Add(args) => {
                let entry = commands::add_entry(&mut store, args, OffsetDateTime::now_utc())?;
                writeln!(out, "已保存 {} ({})", entry.week_range, entry.id)?;
            }
            EntryCommand::Edit { id, fields } => {
                let entry = commands::edit_entry(&mut store, id, fields)?;
                writeln!(out, "已更新 {} ({})", entry.week_range, entry.id)?;
            }
            EntryCommand::Delete { id } => commands::delete_entry(&mut store, id)?,
            EntryCommand::List { limit, html } => {
                commands::list_entries(&store, limit, html, &mut out)?
            }
        },
        Commands::Doc(command) => match command {
            DocCommand::Ingest { files } => {
                let assistant = build_assistant(&config.gemini)?;
                commands::ingest_documents(&assistant, &mut store, &files, &mut out)?;
            }
            DocCommand::List => commands::list_documents(&store, &mut out)?,
            DocCommand::Delete { id } => commands::delete_document(&mut store, id)?,
        },
        Commands::Report(command) => match command {
            ReportCommand::Generate => {
                let assistant = build_assistant(&config.gemini)?;
                commands::generate_report(&assistant, &mut store, &mut out)?;
            }
            ReportCommand::List => commands::list_reports(&store, &mut out)?,
            ReportCommand::Show { id, html } => commands::show_report(&store, id, html, &mut out)?,
        },
        Commands::Dashboard => commands::show_dashboard(&store, &mut out)?,
        Commands::Config(_) => {}
        Commands::Browse => {
            drop(out);
            browse::run(&store)?;
        }
    }

    Ok(())
}
