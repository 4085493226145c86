use std::ffi::OsString;
use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::anyhow;
use checklist_shared::SortMode;
use clap::{
  ArgAction,
  Parser,
  Subcommand
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct PreprocessedArgs {
  pub cleaned_args: Vec<OsString>,
  pub rc_overrides: Vec<(String, String)>
}

#[derive(Debug, Clone)]
pub struct KeyVal {
  pub key:   String,
  pub value: String
}

impl std::str::FromStr for KeyVal {
  type Err = anyhow::Error;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    let (k, v) =
      s.split_once('=').ok_or_else(|| {
        anyhow!(
          "expected KEY=VALUE, got: {s}"
        )
      })?;
    Ok(Self {
      key:   k.trim().to_string(),
      value: v.trim().to_string()
    })
  }
}

#[derive(Parser, Debug, Clone)]
#[command(
  name = "checklist",
  version,
  about = "A small to-do list kept in a \
           local key-value store",
  disable_help_subcommand = true
)]
pub struct GlobalCli {
  #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
  pub verbose: u8,

  #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
  pub quiet: u8,

  #[arg(
    long = "rc",
    value_parser = clap::builder::ValueParser::new(|s: &str| s.parse::<KeyVal>()),
    action = ArgAction::Append
  )]
  pub rc_overrides: Vec<KeyVal>,

  #[arg(long = "checklistrc")]
  pub checklistrc: Option<PathBuf>,

  #[arg(long = "data")]
  pub data: Option<PathBuf>,

  /// Display order: date (oldest first)
  /// or alphabetical.
  #[arg(long = "sort", value_parser = clap::builder::ValueParser::new(|s: &str| s.parse::<SortMode>()))]
  pub sort: Option<SortMode>,

  #[command(subcommand)]
  pub command: Option<Command>
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
  /// Add a task; words are joined with
  /// single spaces.
  Add {
    #[arg(
      trailing_var_arg = true,
      allow_hyphen_values = true
    )]
    text: Vec<String>
  },
  /// Show tasks in display order.
  List,
  /// Toggle completion of the task at a
  /// displayed position.
  Done { position: usize },
  /// Remove the task at a displayed
  /// position.
  Remove { position: usize },
  Version
}

pub fn init_tracing(
  verbose: u8,
  quiet: u8
) -> anyhow::Result<()> {
  let default_level = match (quiet, verbose)
  {
    | (2.., _) => "error",
    | (1, _) => "warn",
    | (0, 3..) => "trace",
    | (0, 2) => "debug",
    | (0, 1) => "info",
    | _ => "warn"
  };

  let env_filter =
    EnvFilter::try_from_default_env()
      .or_else(|_| {
        EnvFilter::try_new(default_level)
      })
      .map_err(|e| {
        anyhow!(
          "invalid RUST_LOG / log \
           filter: {e}"
        )
      })?;

  let init_result =
    tracing_subscriber::fmt()
      .with_env_filter(env_filter)
      .with_target(true)
      .with_level(true)
      .with_writer(std::io::stderr)
      .with_ansi(
        std::io::stderr().is_terminal()
      )
      .try_init();

  if let Err(err) = init_result {
    debug!(error = %err, "tracing subscriber already set, continuing");
  }

  Ok(())
}

/// Pulls bare `rc.KEY=VALUE` and
/// `rc.KEY:VALUE` arguments out before clap
/// sees them. Everything after `add` is
/// task text and passes through untouched.
#[tracing::instrument(skip_all)]
pub fn preprocess_args(
  raw: &[OsString]
) -> PreprocessedArgs {
  let mut cleaned =
    Vec::with_capacity(raw.len());
  let mut overrides = Vec::new();

  let mut iter = raw.iter().cloned();
  if let Some(bin) = iter.next() {
    cleaned.push(bin);
  }

  let mut in_task_text = false;
  for arg in iter {
    if in_task_text {
      cleaned.push(arg);
      continue;
    }
    if arg == "add" {
      in_task_text = true;
      cleaned.push(arg);
      continue;
    }

    let parsed = arg
      .to_str()
      .and_then(|s| s.strip_prefix("rc."))
      .and_then(|rest| {
        rest
          .split_once('=')
          .or_else(|| rest.split_once(':'))
      })
      .map(|(k, v)| {
        (format!("rc.{k}"), v.to_string())
      });

    if let Some((k, v)) = parsed {
      debug!(key = %k, value = %v, "captured positional rc override");
      overrides.push((k, v));
      continue;
    }

    cleaned.push(arg);
  }

  PreprocessedArgs {
    cleaned_args: cleaned,
    rc_overrides: overrides
  }
}

#[cfg(test)]
mod tests {
  use std::ffi::OsString;

  use checklist_shared::SortMode;
  use clap::Parser;

  use super::{
    Command,
    GlobalCli,
    preprocess_args
  };

  fn os(args: &[&str]) -> Vec<OsString> {
    args.iter().map(OsString::from).collect()
  }

  #[test]
  fn rc_arguments_become_overrides() {
    let pre = preprocess_args(&os(&[
      "checklist",
      "rc.sort:alphabetical",
      "list",
      "rc.color=off",
    ]));

    assert_eq!(
      pre.cleaned_args,
      os(&["checklist", "list"])
    );
    assert_eq!(
      pre.rc_overrides,
      vec![
        (
          "rc.sort".to_string(),
          "alphabetical".to_string()
        ),
        (
          "rc.color".to_string(),
          "off".to_string()
        ),
      ]
    );
  }

  #[test]
  fn task_text_keeps_rc_words() {
    let pre = preprocess_args(&os(&[
      "checklist",
      "rc.sort=az",
      "add",
      "rc.notes:done",
      "today",
    ]));

    assert_eq!(
      pre.cleaned_args,
      os(&[
        "checklist",
        "add",
        "rc.notes:done",
        "today"
      ])
    );
    assert_eq!(
      pre.rc_overrides,
      vec![(
        "rc.sort".to_string(),
        "az".to_string()
      )]
    );
  }

  #[test]
  fn add_collects_words() {
    let cli = GlobalCli::parse_from([
      "checklist", "--sort", "a-z", "add",
      "Walk", "the", "dog",
    ]);

    assert_eq!(
      cli.sort,
      Some(SortMode::Alphabetical)
    );
    assert_eq!(
      cli.command,
      Some(Command::Add {
        text: vec![
          "Walk".to_string(),
          "the".to_string(),
          "dog".to_string()
        ]
      })
    );
  }

  #[test]
  fn positions_are_numeric() {
    assert!(
      GlobalCli::try_parse_from([
        "checklist", "done", "two"
      ])
      .is_err()
    );
    let cli = GlobalCli::parse_from([
      "checklist", "remove", "2"
    ]);
    assert_eq!(
      cli.command,
      Some(Command::Remove { position: 2 })
    );
  }
}
