use std::fs;
use std::io::{
  ErrorKind,
  Write
};
use std::path::{
  Path,
  PathBuf
};

use anyhow::{
  Context,
  anyhow
};
use checklist_shared::KeyValueStorage;
use tempfile::NamedTempFile;
use tracing::{
  debug,
  info
};

/// Key-value storage backed by one
/// `<key>.json` file per key inside
/// `data_dir`.
#[derive(Debug, Clone)]
pub struct FileStorage {
  pub data_dir: PathBuf
}

impl FileStorage {
  #[tracing::instrument(skip(data_dir))]
  pub fn open(
    data_dir: &Path
  ) -> anyhow::Result<Self> {
    let data_dir = data_dir.to_path_buf();
    fs::create_dir_all(&data_dir)
      .with_context(|| {
        format!(
          "failed to create {}",
          data_dir.display()
        )
      })?;

    info!(
      data_dir = %data_dir.display(),
      "opened file storage"
    );

    Ok(Self { data_dir })
  }

  fn path_for(
    &self,
    key: &str
  ) -> anyhow::Result<PathBuf> {
    validate_key(key)?;
    Ok(
      self
        .data_dir
        .join(format!("{key}.json"))
    )
  }
}

impl KeyValueStorage for FileStorage {
  #[tracing::instrument(skip(self))]
  fn get(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>> {
    let path = self.path_for(key)?;
    match fs::read_to_string(&path) {
      | Ok(raw) => {
        debug!(file = %path.display(), bytes = raw.len(), "read value");
        Ok(Some(raw))
      }
      | Err(err)
        if err.kind()
          == ErrorKind::NotFound =>
      {
        debug!(file = %path.display(), "no stored value");
        Ok(None)
      }
      | Err(err) => Err(err).with_context(
        || {
          format!(
            "failed reading {}",
            path.display()
          )
        }
      )
    }
  }

  #[tracing::instrument(skip(self, value))]
  fn set(
    &mut self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    let path = self.path_for(key)?;
    write_atomic(&path, value)
      .with_context(|| {
        format!(
          "failed to save {}",
          path.display()
        )
      })
  }
}

fn validate_key(
  key: &str
) -> anyhow::Result<()> {
  let valid = !key.is_empty()
    && key.chars().all(|ch| {
      ch.is_ascii_alphanumeric()
        || matches!(ch, '-' | '_' | '.')
    })
    && !key.starts_with('.');
  if valid {
    Ok(())
  } else {
    Err(anyhow!(
      "invalid storage key: {key:?}"
    ))
  }
}

#[tracing::instrument(skip(path, value))]
fn write_atomic(
  path: &Path,
  value: &str
) -> anyhow::Result<()> {
  debug!(file = %path.display(), bytes = value.len(), "saving atomically");

  let dir = path
    .parent()
    .unwrap_or_else(|| Path::new("."));
  let mut temp =
    NamedTempFile::new_in(dir)?;
  temp.write_all(value.as_bytes())?;
  temp.flush()?;

  temp.persist(path).map_err(|err| {
    anyhow!(
      "failed to persist {}: {}",
      path.display(),
      err
    )
  })?;

  Ok(())
}

#[cfg(test)]
mod tests {
  use checklist_shared::KeyValueStorage;
  use tempfile::tempdir;

  use super::FileStorage;

  #[test]
  fn missing_key_reads_none() {
    let temp = tempdir().expect("tempdir");
    let storage = FileStorage::open(temp.path())
      .expect("open");
    assert!(
      storage.get("tarefas").unwrap().is_none()
    );
  }

  #[test]
  fn open_creates_missing_data_dir() {
    let temp = tempdir().expect("tempdir");
    let dir = temp.path().join("a").join("b");

    FileStorage::open(&dir).expect("open");
    assert!(dir.is_dir());
  }

  #[test]
  fn set_overwrites_previous_value() {
    let temp = tempdir().expect("tempdir");
    let mut storage =
      FileStorage::open(temp.path())
        .expect("open");

    storage.set("tarefas", "[1]").unwrap();
    storage.set("tarefas", "[]").unwrap();

    assert_eq!(
      storage.get("tarefas").unwrap().as_deref(),
      Some("[]")
    );
    assert!(
      temp.path().join("tarefas.json").exists()
    );
  }

  #[test]
  fn keys_cannot_escape_data_dir() {
    let temp = tempdir().expect("tempdir");
    let mut storage =
      FileStorage::open(temp.path())
        .expect("open");

    assert!(storage.set("../x", "[]").is_err());
    assert!(storage.get("a/b").is_err());
    assert!(storage.get("").is_err());
  }
}
