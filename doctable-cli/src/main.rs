mod args;
mod error;
mod paths;

use std::fs::File;
use std::io::{IsTerminal, Write};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use crossterm::style::Stylize;
use doctable::prelude::*;
use doctable::row::rows_from_json;
use simplelog::{Config, LevelFilter, WriteLogger};
use tabledom::TextLayout;

use args::{Action, Args, USAGE};
use error::CliError;

fn init_logging() {
    let path = paths::log_file();
    match File::create(&path) {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(LevelFilter::Debug, Config::default(), file) {
                eprintln!("Failed to initialize logger: {}", e);
            }
        }
        Err(e) => eprintln!("Failed to create log file {}: {}", path.display(), e),
    }
}

fn read(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn build_table(args: &Args) -> Result<TableAssembler, CliError> {
    let mut config = match &args.config {
        Some(path) => TableConfig::from_json_str(&read(path)?)?,
        None => TableConfig::default(),
    };
    if let Some(columns) = &args.columns {
        config = config.with_columns(columns.iter().cloned());
    }
    if let Some(timefield) = &args.timefield {
        config = config.with_timefield(timefield.as_str());
    }
    if let Some(max_length) = args.max_length {
        config = config.with_max_length(max_length);
    }

    let mapping = match &args.mapping {
        Some(path) => Mapping::from_json_str(&read(path)?)?,
        None => Mapping::new(),
    };
    log::info!(
        "[cli] {} mapped fields, columns={:?}, timefield={:?}",
        mapping.len(),
        config.columns,
        config.timefield
    );

    let rows = rows_from_json(&read(&args.rows)?, &DefaultFormatter)?;
    let mut table = TableAssembler::new(config, Arc::new(mapping))?;
    table.set_rows(rows)?;
    Ok(table)
}

fn apply(table: &mut TableAssembler, action: &Action) -> Result<(), CliError> {
    log::debug!("[cli] apply {:?}", action);
    let applied = match action {
        Action::Sort(field) => table.cycle_sort(field)?.is_some(),
        Action::More(batches) => {
            let mut any = false;
            for _ in 0..*batches {
                any |= table.add_rows()?;
            }
            any
        }
        Action::Expand(index) => table.toggle_row(*index),
        Action::MoveLeft(field) => table.move_left(field)?,
        Action::MoveRight(field) => table.move_right(field)?,
        Action::Remove(field) => table.remove_column(field)?,
    };
    if !applied {
        log::warn!("[cli] {:?} had no effect", action);
    }
    Ok(())
}

fn print(table: &TableAssembler) -> Result<(), CliError> {
    let styled = std::io::stdout().is_terminal();
    let lines = table.render_text(&TextLayout::default());
    let mut out = std::io::stdout().lock();

    for (i, line) in lines.iter().enumerate() {
        if styled && i == 0 {
            writeln!(out, "{}", line.as_str().bold())?;
        } else {
            writeln!(out, "{}", line)?;
        }
    }

    let sorting = match table.sorting() {
        Some(spec) => format!("{} {:?}", spec.field, spec.direction).to_lowercase(),
        None => "none".to_string(),
    };
    let footer = format!(
        "showing {} of {} rows, sort: {}",
        table.reveal_count(),
        table.row_count(),
        sorting
    );
    if styled {
        writeln!(out, "{}", footer.dim())?;
    } else {
        writeln!(out, "{}", footer)?;
    }
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let mut table = build_table(&args)?;
    for action in &args.actions {
        apply(&mut table, action)?;
    }
    print(&table)?;

    if args.events {
        for event in table.drain_events() {
            match serde_json::to_string(&event) {
                Ok(json) => eprintln!("{}", json),
                Err(e) => log::error!("[cli] failed to serialize event: {}", e),
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}\n\n{}", e, USAGE);
            return ExitCode::FAILURE;
        }
    };
    if args.help {
        println!("{}", USAGE);
        return ExitCode::SUCCESS;
    }

    init_logging();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("[cli] {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
