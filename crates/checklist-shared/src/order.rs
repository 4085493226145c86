use deunicode::deunicode;

use crate::task::{
  SortMode,
  Task
};

/// Derives the display order of `tasks`
/// without touching the stored order.
///
/// Both modes use a stable sort, so tasks
/// that compare equal keep their insertion
/// order.
pub fn display_order(
  tasks: &[Task],
  mode: SortMode
) -> Vec<&Task> {
  let mut ordered: Vec<&Task> =
    tasks.iter().collect();

  match mode {
    | SortMode::Date => {
      ordered.sort_by_key(|task| {
        task.created_at
      });
    }
    | SortMode::Alphabetical => {
      ordered.sort_by_cached_key(|task| {
        (
          collation_key(&task.text),
          invert_case(&task.text)
        )
      });
    }
  }

  ordered
}

/// Case- and accent-insensitive key:
/// "Éclair" folds to "eclair".
fn collation_key(text: &str) -> String {
  deunicode(text).to_lowercase()
}

/// Tie-break for keys that fold equal:
/// lowercase sorts before uppercase, so
/// "a" lands ahead of "A".
fn invert_case(text: &str) -> String {
  text
    .chars()
    .flat_map(|ch| {
      if ch.is_lowercase() {
        ch.to_uppercase().collect::<Vec<_>>()
      } else {
        ch.to_lowercase().collect::<Vec<_>>()
      }
    })
    .collect()
}
