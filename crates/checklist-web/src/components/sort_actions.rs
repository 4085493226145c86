use checklist_shared::SortMode;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct SortActionsProps {
  pub active:  SortMode,
  pub on_sort: Callback<SortMode>
}

#[function_component(SortActions)]
pub fn sort_actions(
  props: &SortActionsProps
) -> Html {
  html! {
      <div class="sort-actions">
          {
              for SortMode::ALL.into_iter().map(|mode| {
                  let on_sort = props.on_sort.clone();
                  let class = if props.active == mode {
                      "btn active"
                  } else {
                      "btn"
                  };
                  html! {
                      <button class={class} onclick={move |_| on_sort.emit(mode)}>
                          { mode.label() }
                      </button>
                  }
              })
          }
      </div>
  }
}
