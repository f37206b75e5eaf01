//! Command-line arguments.

use std::path::PathBuf;

use crate::error::CliError;

pub const USAGE: &str = "\
Usage: doctable <rows.json> [options]

Options:
  --mapping FILE      field mapping (JSON object of name -> {indexed, type})
  --config FILE       table config (JSON)
  --columns a,b,c     selected columns
  --time FIELD        time field shown after the toggle column
  --max-length N      rows revealed per batch
  --sort FIELD        cycle the sort on FIELD
  --more N            reveal N more batches
  --expand I          expand visible row I
  --move-left FIELD   move FIELD one position left
  --move-right FIELD  move FIELD one position right
  --remove FIELD      remove FIELD from the columns
  --events            print queued table events to stderr
  -h, --help          print this help";

/// A table action, applied in command-line order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Sort(String),
    More(usize),
    Expand(usize),
    MoveLeft(String),
    MoveRight(String),
    Remove(String),
}

#[derive(Debug, Default)]
pub struct Args {
    pub rows: PathBuf,
    pub mapping: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub columns: Option<Vec<String>>,
    pub timefield: Option<String>,
    pub max_length: Option<usize>,
    pub actions: Vec<Action>,
    pub events: bool,
    pub help: bool,
}

impl Args {
    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, CliError> {
        let mut parsed = Args::default();
        let mut rows = None;
        let mut iter = args.into_iter();

        while let Some(arg) = iter.next() {
            let mut value = |flag: &str| {
                iter.next()
                    .ok_or_else(|| CliError::Usage(format!("{flag} requires a value")))
            };
            match arg.as_str() {
                "-h" | "--help" => parsed.help = true,
                "--events" => parsed.events = true,
                "--mapping" => parsed.mapping = Some(value("--mapping")?.into()),
                "--config" => parsed.config = Some(value("--config")?.into()),
                "--columns" => {
                    let list = value("--columns")?;
                    parsed.columns = Some(
                        list.split(',')
                            .map(str::trim)
                            .filter(|c| !c.is_empty())
                            .map(str::to_string)
                            .collect(),
                    );
                }
                "--time" => parsed.timefield = Some(value("--time")?),
                "--max-length" => parsed.max_length = Some(number("--max-length", &value("--max-length")?)?),
                "--sort" => parsed.actions.push(Action::Sort(value("--sort")?)),
                "--more" => parsed.actions.push(Action::More(number("--more", &value("--more")?)?)),
                "--expand" => parsed.actions.push(Action::Expand(number("--expand", &value("--expand")?)?)),
                "--move-left" => parsed.actions.push(Action::MoveLeft(value("--move-left")?)),
                "--move-right" => parsed.actions.push(Action::MoveRight(value("--move-right")?)),
                "--remove" => parsed.actions.push(Action::Remove(value("--remove")?)),
                flag if flag.starts_with("--") => {
                    return Err(CliError::Usage(format!("unknown option {flag}")));
                }
                path => {
                    if rows.is_some() {
                        return Err(CliError::Usage(format!("unexpected argument {path}")));
                    }
                    rows = Some(PathBuf::from(path));
                }
            }
        }

        match rows {
            Some(rows) => parsed.rows = rows,
            None if parsed.help => {}
            None => return Err(CliError::Usage("missing rows file".to_string())),
        }
        Ok(parsed)
    }
}

fn number(flag: &str, value: &str) -> Result<usize, CliError> {
    value
        .parse()
        .map_err(|_| CliError::Usage(format!("{flag} expects a number, got {value:?}")))
}
