use std::process::ExitCode;

fn main() -> ExitCode {
  let args = std::env::args_os().collect();
  match checklist_core::run(args) {
    | Ok(()) => ExitCode::SUCCESS,
    | Err(err) => {
      eprintln!("error: {err:#}");
      ExitCode::FAILURE
    }
  }
}
