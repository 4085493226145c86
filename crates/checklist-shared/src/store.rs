use crate::task::{
  Task,
  TaskId
};

/// Insertion-ordered task list.
///
/// Every mutation here is in-memory only;
/// persistence is the caller's job.
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct TaskStore {
  tasks: Vec<Task>
}

impl TaskStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn from_tasks(
    tasks: Vec<Task>
  ) -> Self {
    Self { tasks }
  }

  pub fn tasks(&self) -> &[Task] {
    &self.tasks
  }

  pub fn len(&self) -> usize {
    self.tasks.len()
  }

  pub fn is_empty(&self) -> bool {
    self.tasks.is_empty()
  }

  pub fn get(
    &self,
    id: TaskId
  ) -> Option<&Task> {
    self
      .tasks
      .iter()
      .find(|task| task.id == id)
  }

  pub fn push(&mut self, task: Task) {
    self.tasks.push(task);
  }

  /// Removes the task with `id`, keeping the
  /// relative order of everything else.
  pub fn remove(
    &mut self,
    id: TaskId
  ) -> Option<Task> {
    let idx = self.position(id)?;
    Some(self.tasks.remove(idx))
  }

  /// Flips `done` and returns the new value.
  pub fn toggle(
    &mut self,
    id: TaskId
  ) -> Option<bool> {
    let idx = self.position(id)?;
    let task = &mut self.tasks[idx];
    task.done = !task.done;
    Some(task.done)
  }

  fn position(
    &self,
    id: TaskId
  ) -> Option<usize> {
    self
      .tasks
      .iter()
      .position(|task| task.id == id)
  }
}

#[cfg(test)]
mod tests {
  use chrono::{
    Duration,
    TimeZone,
    Utc
  };

  use super::TaskStore;
  use crate::task::{
    Task,
    TaskId
  };

  fn three() -> TaskStore {
    let base = Utc
      .with_ymd_and_hms(
        2026, 3, 1, 9, 0, 0
      )
      .unwrap();
    TaskStore::from_tasks(
      ["one", "two", "three"]
        .iter()
        .enumerate()
        .map(|(idx, text)| {
          Task::new(
            (*text).to_string(),
            base
              + Duration::minutes(
                idx as i64
              )
          )
        })
        .collect()
    )
  }

  #[test]
  fn remove_keeps_remaining_order() {
    let mut store = three();
    let middle = store.tasks()[1].id;

    let removed = store
      .remove(middle)
      .expect("middle task exists");

    assert_eq!(removed.text, "two");
    let left: Vec<&str> = store
      .tasks()
      .iter()
      .map(|task| task.text.as_str())
      .collect();
    assert_eq!(left, vec!["one", "three"]);
  }

  #[test]
  fn toggle_flips_only_done() {
    let mut store = three();
    let before = store.tasks()[2].clone();

    assert_eq!(
      store.toggle(before.id),
      Some(true)
    );
    let after = store
      .get(before.id)
      .expect("still present");
    assert!(after.done);
    assert_eq!(after.text, before.text);
    assert_eq!(
      after.created_at,
      before.created_at
    );
    assert_eq!(store.tasks()[2].id, before.id);
  }

  #[test]
  fn unknown_id_is_a_no_op() {
    let mut store = three();
    let snapshot = store.clone();
    let stranger = TaskId::generate();

    assert!(store.remove(stranger).is_none());
    assert!(store.toggle(stranger).is_none());
    assert_eq!(store, snapshot);
  }
}
