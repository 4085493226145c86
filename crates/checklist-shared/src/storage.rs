use std::collections::BTreeMap;

/// Key under which the task snapshot is
/// stored.
pub const DEFAULT_STORAGE_KEY: &str =
  "tarefas";

/// Durable string key-value store.
pub trait KeyValueStorage {
  fn get(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>>;

  fn set(
    &mut self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()>;
}

/// In-process storage, mainly for tests.
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct MemoryStorage {
  entries: BTreeMap<String, String>,
  writes:  u64
}

impl MemoryStorage {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_entry(
    key: &str,
    value: &str
  ) -> Self {
    let mut storage = Self::default();
    storage
      .entries
      .insert(key.to_string(), value.to_string());
    storage
  }

  /// Number of `set` calls seen so far.
  pub fn writes(&self) -> u64 {
    self.writes
  }

  pub fn raw(
    &self,
    key: &str
  ) -> Option<&str> {
    self.entries.get(key).map(String::as_str)
  }
}

impl KeyValueStorage for MemoryStorage {
  fn get(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>> {
    Ok(self.entries.get(key).cloned())
  }

  fn set(
    &mut self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    self
      .entries
      .insert(key.to_string(), value.to_string());
    self.writes += 1;
    Ok(())
  }
}
