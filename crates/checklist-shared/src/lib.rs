pub mod order;
pub mod snapshot;
pub mod storage;
pub mod store;
pub mod task;
pub mod view;

pub use order::display_order;
pub use storage::{
  DEFAULT_STORAGE_KEY,
  KeyValueStorage,
  MemoryStorage
};
pub use store::TaskStore;
pub use task::{
  SortMode,
  Task,
  TaskId
};
pub use view::{
  TaskListView,
  TaskRow
};
