use anyhow::anyhow;
use checklist_shared::KeyValueStorage;

/// `window.localStorage` as a
/// `KeyValueStorage`.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq,
)]
pub struct LocalStorage;

fn local_storage()
-> anyhow::Result<web_sys::Storage> {
  let window = web_sys::window()
    .ok_or_else(|| anyhow!("no window"))?;
  window
    .local_storage()
    .map_err(|error| {
      anyhow!(
        "localStorage unavailable: \
         {error:?}"
      )
    })?
    .ok_or_else(|| {
      anyhow!("localStorage is disabled")
    })
}

impl KeyValueStorage for LocalStorage {
  fn get(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>> {
    local_storage()?
      .get_item(key)
      .map_err(|error| {
        anyhow!(
          "failed reading {key}: \
           {error:?}"
        )
      })
  }

  fn set(
    &mut self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    local_storage()?
      .set_item(key, value)
      .map_err(|error| {
        anyhow!(
          "failed writing {key}: \
           {error:?}"
        )
      })
  }
}
