use chrono::{
  DateTime,
  Utc
};
use tracing::{
  debug,
  info,
  warn
};

use crate::order::display_order;
use crate::snapshot;
use crate::storage::KeyValueStorage;
use crate::store::TaskStore;
use crate::task::{
  SortMode,
  Task,
  TaskId
};

/// One rendered line of the list, in display
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
  pub position:   usize,
  pub id:         TaskId,
  pub text:       String,
  pub done:       bool,
  pub created_at: DateTime<Utc>
}

/// The to-do list component: task store,
/// input buffer and sort mode, mirrored to
/// `storage` under `key` after every change.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskListView<S> {
  storage:   S,
  key:       String,
  store:     TaskStore,
  input:     String,
  sort_mode: SortMode
}

impl<S: KeyValueStorage> TaskListView<S> {
  /// Loads the persisted snapshot. Missing,
  /// unreadable or malformed data all start
  /// an empty list.
  #[tracing::instrument(skip(storage))]
  pub fn initialize(
    storage: S,
    key: &str
  ) -> Self {
    let raw = match storage.get(key) {
      | Ok(raw) => raw,
      | Err(error) => {
        warn!(
          error = %format!("{error:#}"),
          key,
          "failed reading task snapshot; \
           starting empty"
        );
        None
      }
    };

    let tasks =
      snapshot::decode_or_empty(
        raw.as_deref()
      );
    info!(
      key,
      count = tasks.len(),
      "task list initialized"
    );

    Self {
      storage,
      key: key.to_string(),
      store: TaskStore::from_tasks(tasks),
      input: String::new(),
      sort_mode: SortMode::default()
    }
  }

  /// Writes the whole store under the fixed
  /// key, replacing the previous snapshot.
  #[tracing::instrument(
    skip(self),
    fields(
      key = %self.key,
      count = self.store.len()
    )
  )]
  pub fn persist(
    &mut self
  ) -> anyhow::Result<()> {
    let raw =
      snapshot::encode(self.store.tasks())?;
    self.storage.set(&self.key, &raw)?;
    debug!(
      bytes = raw.len(),
      "persisted tasks"
    );
    Ok(())
  }

  /// Appends a task unless `text` is blank.
  /// Returns the new id, or `None` when the
  /// input was rejected.
  #[tracing::instrument(skip(self, text, now))]
  pub fn add_task(
    &mut self,
    text: &str,
    now: DateTime<Utc>
  ) -> anyhow::Result<Option<TaskId>> {
    if text.trim().is_empty() {
      debug!("ignoring blank task text");
      return Ok(None);
    }

    let task =
      Task::new(text.to_string(), now);
    let id = task.id;
    self.store.push(task);
    self.input.clear();
    debug!(
      %id,
      count = self.store.len(),
      "task added"
    );

    self.persist()?;
    Ok(Some(id))
  }

  /// Adds whatever is in the input buffer.
  pub fn submit_input(
    &mut self,
    now: DateTime<Utc>
  ) -> anyhow::Result<Option<TaskId>> {
    let text = self.input.clone();
    self.add_task(&text, now)
  }

  #[tracing::instrument(skip(self))]
  pub fn remove_task(
    &mut self,
    id: TaskId
  ) -> anyhow::Result<Option<Task>> {
    let Some(removed) =
      self.store.remove(id)
    else {
      debug!(%id, "remove: no such task");
      return Ok(None);
    };
    debug!(
      %id,
      count = self.store.len(),
      "task removed"
    );

    self.persist()?;
    Ok(Some(removed))
  }

  #[tracing::instrument(skip(self))]
  pub fn toggle_task(
    &mut self,
    id: TaskId
  ) -> anyhow::Result<Option<bool>> {
    let Some(done) = self.store.toggle(id)
    else {
      debug!(%id, "toggle: no such task");
      return Ok(None);
    };
    debug!(%id, done, "task toggled");

    self.persist()?;
    Ok(Some(done))
  }

  /// Removes the task shown at `position` in
  /// the current display order.
  pub fn remove_at(
    &mut self,
    position: usize
  ) -> anyhow::Result<Option<Task>> {
    match self.id_at(position) {
      | Some(id) => self.remove_task(id),
      | None => {
        debug!(
          position,
          "remove: position out of range"
        );
        Ok(None)
      }
    }
  }

  /// Toggles the task shown at `position` in
  /// the current display order.
  pub fn toggle_at(
    &mut self,
    position: usize
  ) -> anyhow::Result<Option<bool>> {
    match self.id_at(position) {
      | Some(id) => self.toggle_task(id),
      | None => {
        debug!(
          position,
          "toggle: position out of range"
        );
        Ok(None)
      }
    }
  }

  /// Resolves a display position to the id of
  /// the task rendered there.
  pub fn id_at(
    &self,
    position: usize
  ) -> Option<TaskId> {
    display_order(
      self.store.tasks(),
      self.sort_mode
    )
    .get(position)
    .map(|task| task.id)
  }
}

impl<S> TaskListView<S> {
  pub fn set_sort_mode(
    &mut self,
    mode: SortMode
  ) {
    debug!(%mode, "sort mode changed");
    self.sort_mode = mode;
  }

  pub fn sort_mode(&self) -> SortMode {
    self.sort_mode
  }

  pub fn set_input(
    &mut self,
    text: impl Into<String>
  ) {
    self.input = text.into();
  }

  pub fn input(&self) -> &str {
    &self.input
  }

  pub fn store(&self) -> &TaskStore {
    &self.store
  }

  pub fn storage(&self) -> &S {
    &self.storage
  }

  /// Tasks in display order.
  fn displayed(&self) -> Vec<&Task> {
    display_order(
      self.store.tasks(),
      self.sort_mode
    )
  }

  pub fn rows(&self) -> Vec<TaskRow> {
    self
      .displayed()
      .into_iter()
      .enumerate()
      .map(|(position, task)| TaskRow {
        position,
        id: task.id,
        text: task.text.clone(),
        done: task.done,
        created_at: task.created_at
      })
      .collect()
  }
}
