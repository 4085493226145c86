use web_sys::HtmlInputElement;
use yew::{
  Callback,
  Html,
  InputEvent,
  KeyboardEvent,
  Properties,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskComposerProps {
  pub value:    String,
  pub on_input: Callback<String>,
  pub on_add:   Callback<()>
}

#[function_component(TaskComposer)]
pub fn task_composer(
  props: &TaskComposerProps
) -> Html {
  let oninput = {
    let on_input = props.on_input.clone();
    move |e: InputEvent| {
      let input: HtmlInputElement =
        e.target_unchecked_into();
      on_input.emit(input.value());
    }
  };
  let onkeydown = {
    let on_add = props.on_add.clone();
    move |e: KeyboardEvent| {
      if e.key() == "Enter" {
        on_add.emit(());
      }
    }
  };
  let onclick = {
    let on_add = props.on_add.clone();
    move |_| on_add.emit(())
  };

  html! {
      <div class="composer">
          <input
              type="text"
              class="input"
              placeholder="Type a new task"
              value={props.value.clone()}
              {oninput}
              {onkeydown}
          />
          <button class="btn" {onclick}>{ "Add" }</button>
      </div>
  }
}
