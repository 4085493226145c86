mod sort_actions;
mod task_composer;
mod task_list;
mod task_list_row;

pub use sort_actions::SortActions;
pub use task_composer::TaskComposer;
pub use task_list::TaskList;
pub use task_list_row::TaskListRow;
