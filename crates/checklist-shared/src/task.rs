use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use chrono::{
  DateTime,
  Utc
};
use serde::{
  Deserialize,
  Serialize
};
use uuid::Uuid;

/// Opaque identity of a task, assigned once
/// at creation.
#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
  pub fn generate() -> Self {
    Self(Uuid::new_v4())
  }
}

impl fmt::Display for TaskId {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// One to-do item.
///
/// Field aliases accept snapshots written
/// with the Portuguese key names
/// (`texto`, `concluida`, `data`).
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct Task {
  #[serde(default = "TaskId::generate")]
  pub id:         TaskId,
  #[serde(alias = "texto")]
  pub text:       String,
  #[serde(default, alias = "concluida")]
  pub done:       bool,
  #[serde(
    rename = "createdAt",
    alias = "data"
  )]
  pub created_at: DateTime<Utc>
}

impl Task {
  pub fn new(
    text: String,
    now: DateTime<Utc>
  ) -> Self {
    Self {
      id: TaskId::generate(),
      text,
      done: false,
      created_at: now
    }
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
  #[default]
  Date,
  Alphabetical
}

impl SortMode {
  pub const ALL: [SortMode; 2] = [
    SortMode::Alphabetical,
    SortMode::Date
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      | SortMode::Date => "date",
      | SortMode::Alphabetical => {
        "alphabetical"
      }
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      | SortMode::Date => "Sort by date",
      | SortMode::Alphabetical => {
        "Sort A-Z"
      }
    }
  }
}

impl fmt::Display for SortMode {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for SortMode {
  type Err = anyhow::Error;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    match s
      .trim()
      .to_ascii_lowercase()
      .as_str()
    {
      | "date" | "data" | "created" => {
        Ok(SortMode::Date)
      }
      | "alphabetical" | "alfabetica"
      | "alpha" | "az" | "a-z" => {
        Ok(SortMode::Alphabetical)
      }
      | other => Err(anyhow!(
        "invalid sort mode: {other} \
         (expected date or \
         alphabetical)"
      ))
    }
  }
}
