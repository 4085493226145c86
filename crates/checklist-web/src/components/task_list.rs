use checklist_shared::{
  TaskId,
  TaskRow
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::TaskListRow;

#[derive(Properties, PartialEq)]
pub struct TaskListProps {
  pub rows:      Vec<TaskRow>,
  pub on_toggle: Callback<TaskId>,
  pub on_remove: Callback<TaskId>
}

#[function_component(TaskList)]
pub fn task_list(
  props: &TaskListProps
) -> Html {
  if props.rows.is_empty() {
    return html! {
        <div class="empty">{ "Nothing to do yet." }</div>
    };
  }

  html! {
      <ul class="tasks">
          {
              for props.rows.iter().cloned().map(|row| {
                  let key = row.id.to_string();
                  html! {
                      <TaskListRow
                          key={key}
                          {row}
                          on_toggle={props.on_toggle.clone()}
                          on_remove={props.on_remove.clone()}
                      />
                  }
              })
          }
      </ul>
  }
}
