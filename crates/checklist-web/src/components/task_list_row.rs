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

#[derive(Properties, PartialEq)]
pub struct TaskListRowProps {
  pub row:       TaskRow,
  pub on_toggle: Callback<TaskId>,
  pub on_remove: Callback<TaskId>
}

fn row_class(done: bool) -> &'static str {
  if done { "row done" } else { "row pending" }
}

#[function_component(TaskListRow)]
pub fn task_list_row(
  props: &TaskListRowProps
) -> Html {
  let id = props.row.id;
  let on_toggle =
    props.on_toggle.clone();
  let on_remove =
    props.on_remove.clone();
  let created = props
    .row
    .created_at
    .format("%Y-%m-%d %H:%M UTC")
    .to_string();

  html! {
      <li class={row_class(props.row.done)} title={created}>
          <input
              type="checkbox"
              checked={props.row.done}
              onchange={move |_| on_toggle.emit(id)}
          />
          <span class="text">{ &props.row.text }</span>
          <button class="btn" onclick={move |_| on_remove.emit(id)}>
              { "Remove" }
          </button>
      </li>
  }
}
