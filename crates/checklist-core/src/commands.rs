use std::io::Write;

use checklist_shared::{
  KeyValueStorage,
  TaskListView
};
use chrono::{
  DateTime,
  Utc
};
use tracing::{
  debug,
  info,
  instrument
};

use crate::cli::Command;
use crate::render::Renderer;

/// Runs one command against `view`, writing
/// user-facing output to `out`.
#[instrument(skip(view, renderer, out, now))]
pub fn dispatch<S, W>(
  view: &mut TaskListView<S>,
  renderer: &Renderer,
  out: &mut W,
  command: Command,
  now: DateTime<Utc>
) -> anyhow::Result<()>
where
  S: KeyValueStorage,
  W: Write
{
  debug!(
    sort = %view.sort_mode(),
    tasks = view.store().len(),
    "dispatching command"
  );

  match command {
    | Command::Add { text } => {
      cmd_add(view, out, &text, now)
    }
    | Command::List => {
      renderer.write_task_table(
        out,
        &view.rows()
      )
    }
    | Command::Done { position } => {
      cmd_done(view, out, position)
    }
    | Command::Remove { position } => {
      cmd_remove(view, out, position)
    }
    | Command::Version => {
      writeln!(
        out,
        "{}",
        env!("CARGO_PKG_VERSION")
      )?;
      Ok(())
    }
  }
}

fn cmd_add<S, W>(
  view: &mut TaskListView<S>,
  out: &mut W,
  words: &[String],
  now: DateTime<Utc>
) -> anyhow::Result<()>
where
  S: KeyValueStorage,
  W: Write
{
  info!("command add");

  view.set_input(words.join(" "));
  match view.submit_input(now)? {
    | Some(id) => {
      let position = view
        .rows()
        .iter()
        .find(|row| row.id == id)
        .map(|row| row.position + 1)
        .unwrap_or(view.store().len());
      writeln!(
        out,
        "Created task {position}."
      )?;
    }
    | None => {
      debug!(
        "blank task text; nothing \
         added"
      );
    }
  }
  Ok(())
}

fn cmd_done<S, W>(
  view: &mut TaskListView<S>,
  out: &mut W,
  position: usize
) -> anyhow::Result<()>
where
  S: KeyValueStorage,
  W: Write
{
  info!(position, "command done");

  let Some(idx) = position.checked_sub(1)
  else {
    return no_task_at(out, position);
  };
  match view.toggle_at(idx)? {
    | Some(true) => writeln!(
      out,
      "Completed task {position}."
    )?,
    | Some(false) => writeln!(
      out,
      "Reopened task {position}."
    )?,
    | None => {
      return no_task_at(out, position);
    }
  }
  Ok(())
}

fn cmd_remove<S, W>(
  view: &mut TaskListView<S>,
  out: &mut W,
  position: usize
) -> anyhow::Result<()>
where
  S: KeyValueStorage,
  W: Write
{
  info!(position, "command remove");

  let removed = match position
    .checked_sub(1)
  {
    | Some(idx) => view.remove_at(idx)?,
    | None => None
  };
  match removed {
    | Some(task) => writeln!(
      out,
      "Removed task {position} '{}'.",
      task.text
    )?,
    | None => {
      return no_task_at(out, position);
    }
  }
  Ok(())
}

fn no_task_at<W: Write>(
  out: &mut W,
  position: usize
) -> anyhow::Result<()> {
  writeln!(
    out,
    "No task at position {position}."
  )?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use checklist_shared::{
    DEFAULT_STORAGE_KEY,
    MemoryStorage,
    SortMode,
    TaskListView
  };
  use chrono::{
    Duration,
    TimeZone,
    Utc
  };

  use super::dispatch;
  use crate::cli::Command;
  use crate::render::Renderer;

  fn run(
    view: &mut TaskListView<MemoryStorage>,
    command: Command,
    offset_secs: i64
  ) -> String {
    let now = Utc
      .with_ymd_and_hms(
        2026, 3, 1, 9, 0, 0
      )
      .unwrap()
      + Duration::seconds(offset_secs);
    let mut out = Vec::new();
    dispatch(
      view,
      &Renderer::plain(),
      &mut out,
      command,
      now
    )
    .expect("dispatch");
    String::from_utf8(out).expect("utf8")
  }

  fn add(text: &str) -> Command {
    Command::Add {
      text: text
        .split(' ')
        .map(str::to_string)
        .collect()
    }
  }

  fn view() -> TaskListView<MemoryStorage> {
    TaskListView::initialize(
      MemoryStorage::new(),
      DEFAULT_STORAGE_KEY
    )
  }

  #[test]
  fn add_reports_display_position() {
    let mut view = view();
    view.set_sort_mode(SortMode::Alphabetical);

    assert_eq!(
      run(&mut view, add("Walk dog"), 0),
      "Created task 1.\n"
    );
    assert_eq!(
      run(&mut view, add("Buy milk"), 1),
      "Created task 1.\n"
    );
    assert_eq!(view.store().len(), 2);
  }

  #[test]
  fn blank_add_prints_nothing() {
    let mut view = view();
    assert_eq!(
      run(
        &mut view,
        Command::Add { text: vec![] },
        0
      ),
      ""
    );
    assert!(view.store().is_empty());
  }

  #[test]
  fn done_toggles_by_display_position() {
    let mut view = view();
    run(&mut view, add("Banana"), 0);
    run(&mut view, add("Apple"), 1);
    view.set_sort_mode(SortMode::Alphabetical);

    assert_eq!(
      run(
        &mut view,
        Command::Done { position: 1 },
        2
      ),
      "Completed task 1.\n"
    );
    assert!(view.store().tasks()[1].done);
    assert_eq!(
      run(
        &mut view,
        Command::Done { position: 1 },
        3
      ),
      "Reopened task 1.\n"
    );
  }

  #[test]
  fn bad_positions_are_reported_not_fatal()
  {
    let mut view = view();
    run(&mut view, add("only"), 0);

    for position in [0, 2] {
      assert_eq!(
        run(
          &mut view,
          Command::Remove { position },
          1
        ),
        format!(
          "No task at position {position}.\n"
        )
      );
      assert_eq!(
        run(
          &mut view,
          Command::Done { position },
          1
        ),
        format!(
          "No task at position {position}.\n"
        )
      );
    }
    assert_eq!(view.store().len(), 1);
    assert_eq!(view.storage().writes(), 1);
  }

  #[test]
  fn remove_names_the_task() {
    let mut view = view();
    run(&mut view, add("Walk dog"), 0);

    assert_eq!(
      run(
        &mut view,
        Command::Remove { position: 1 },
        1
      ),
      "Removed task 1 'Walk dog'.\n"
    );
    assert_eq!(
      run(&mut view, Command::List, 2),
      "No tasks.\n"
    );
  }
}
