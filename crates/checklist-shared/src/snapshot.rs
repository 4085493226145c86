use std::collections::HashSet;

use anyhow::Context;
use tracing::{
  debug,
  warn
};

use crate::task::{
  Task,
  TaskId
};

/// Serializes the store as a JSON array in
/// insertion order.
pub fn encode(
  tasks: &[Task]
) -> anyhow::Result<String> {
  serde_json::to_string(tasks)
    .context("failed to encode task snapshot")
}

/// Parses a snapshot. A record whose id was
/// already seen gets a fresh one, so ids stay
/// unique within the store.
pub fn decode(
  raw: &str
) -> anyhow::Result<Vec<Task>> {
  let mut tasks: Vec<Task> =
    serde_json::from_str(raw).context(
      "failed to decode task snapshot"
    )?;

  let mut seen =
    HashSet::with_capacity(tasks.len());
  for task in &mut tasks {
    if !seen.insert(task.id) {
      let fresh = TaskId::generate();
      warn!(
        duplicate = %task.id,
        %fresh,
        "duplicate task id in snapshot"
      );
      task.id = fresh;
      seen.insert(fresh);
    }
  }

  Ok(tasks)
}

/// Absent or malformed snapshots both read
/// as an empty list.
pub fn decode_or_empty(
  raw: Option<&str>
) -> Vec<Task> {
  let Some(raw) = raw else {
    debug!("no persisted snapshot");
    return vec![];
  };

  match decode(raw) {
    | Ok(tasks) => {
      debug!(
        count = tasks.len(),
        "decoded persisted snapshot"
      );
      tasks
    }
    | Err(error) => {
      warn!(
        error = %format!("{error:#}"),
        bytes = raw.len(),
        "malformed task snapshot; \
         starting empty"
      );
      vec![]
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::{
    TimeZone,
    Utc
  };

  use super::{
    decode,
    decode_or_empty,
    encode
  };
  use crate::task::Task;

  #[test]
  fn encodes_camel_case_created_at() {
    let now = Utc
      .with_ymd_and_hms(
        2026, 3, 1, 9, 30, 0
      )
      .unwrap();
    let task =
      Task::new("Buy milk".to_string(), now);

    let raw = encode(&[task.clone()])
      .expect("encode");
    let value: serde_json::Value =
      serde_json::from_str(&raw)
        .expect("valid json");

    assert_eq!(
      value[0]["text"],
      "Buy milk"
    );
    assert_eq!(value[0]["done"], false);
    assert_eq!(
      value[0]["createdAt"],
      "2026-03-01T09:30:00Z"
    );
    assert_eq!(
      value[0]["id"],
      task.id.to_string()
    );
  }

  #[test]
  fn reads_legacy_portuguese_records() {
    let raw = r#"[
      {"texto":"Comprar pão","concluida":true,"data":"2024-05-02T13:45:10.123Z"},
      {"texto":"Lavar louça","concluida":false,"data":"2024-05-02T13:46:00.000Z"}
    ]"#;

    let tasks = decode(raw).expect("decode");

    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].text, "Comprar pão");
    assert!(tasks[0].done);
    assert!(!tasks[1].done);
    assert!(
      tasks[0].created_at
        < tasks[1].created_at
    );
    assert_ne!(tasks[0].id, tasks[1].id);
  }

  #[test]
  fn duplicate_ids_are_reassigned() {
    let raw = r#"[
      {"id":"6f1c2a7e-1d1b-4a53-9c43-5b0f3c1e9a10","text":"first","done":false,"createdAt":"2026-01-01T00:00:00Z"},
      {"id":"6f1c2a7e-1d1b-4a53-9c43-5b0f3c1e9a10","text":"second","done":false,"createdAt":"2026-01-01T00:00:01Z"}
    ]"#;

    let tasks = decode(raw).expect("decode");

    assert_eq!(
      tasks[0].id.to_string(),
      "6f1c2a7e-1d1b-4a53-9c43-5b0f3c1e9a10"
    );
    assert_ne!(tasks[0].id, tasks[1].id);
    assert_eq!(tasks[1].text, "second");
  }

  #[test]
  fn missing_done_defaults_to_false() {
    let raw = r#"[{"text":"x","createdAt":"2026-01-01T00:00:00Z"}]"#;
    let tasks = decode(raw).expect("decode");
    assert!(!tasks[0].done);
  }

  #[test]
  fn malformed_or_absent_reads_empty() {
    assert!(decode_or_empty(None).is_empty());
    assert!(
      decode_or_empty(Some("not json"))
        .is_empty()
    );
    assert!(
      decode_or_empty(Some(r#"{"text":"x"}"#))
        .is_empty()
    );
    assert!(
      decode_or_empty(Some(r#"[{"done":true}]"#))
        .is_empty()
    );
    assert!(
      decode_or_empty(Some("[]")).is_empty()
    );
  }
}
