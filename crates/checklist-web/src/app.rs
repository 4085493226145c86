use checklist_shared::{
  DEFAULT_STORAGE_KEY,
  SortMode,
  TaskId,
  TaskListView
};
use chrono::Utc;
use yew::{
  Callback,
  Html,
  UseStateHandle,
  function_component,
  html,
  use_state
};

use crate::components::{
  SortActions,
  TaskComposer,
  TaskList
};
use crate::storage::LocalStorage;

type View = TaskListView<LocalStorage>;

/// Applies `mutate` to a copy of the view
/// and swaps it in. A failed write is logged
/// and the in-memory change is kept.
fn update(
  view: &UseStateHandle<View>,
  action: &'static str,
  mutate: impl FnOnce(
    &mut View
  ) -> anyhow::Result<()>
) {
  let mut next = (**view).clone();
  if let Err(error) = mutate(&mut next) {
    tracing::error!(
      action,
      error = %format!("{error:#}"),
      "failed persisting tasks"
    );
  }
  view.set(next);
}

#[function_component(App)]
pub fn app() -> Html {
  let view = use_state(|| {
    TaskListView::initialize(
      LocalStorage,
      DEFAULT_STORAGE_KEY
    )
  });

  let on_input = {
    let view = view.clone();
    Callback::from(move |text: String| {
      update(&view, "input", |next| {
        next.set_input(text);
        Ok(())
      });
    })
  };

  let on_add = {
    let view = view.clone();
    Callback::from(move |()| {
      update(&view, "add", |next| {
        next
          .submit_input(Utc::now())
          .map(|_| ())
      });
    })
  };

  let on_sort = {
    let view = view.clone();
    Callback::from(move |mode: SortMode| {
      update(&view, "sort", |next| {
        next.set_sort_mode(mode);
        Ok(())
      });
    })
  };

  let on_toggle = {
    let view = view.clone();
    Callback::from(move |id: TaskId| {
      update(&view, "toggle", |next| {
        next.toggle_task(id).map(|_| ())
      });
    })
  };

  let on_remove = {
    let view = view.clone();
    Callback::from(move |id: TaskId| {
      update(&view, "remove", |next| {
        next.remove_task(id).map(|_| ())
      });
    })
  };

  html! {
      <div class="checklist">
          <h2>{ "To-do list" }</h2>
          <TaskComposer
              value={view.input().to_string()}
              on_input={on_input}
              on_add={on_add}
          />
          <SortActions
              active={view.sort_mode()}
              on_sort={on_sort}
          />
          <TaskList
              rows={view.rows()}
              on_toggle={on_toggle}
              on_remove={on_remove}
          />
      </div>
  }
}
