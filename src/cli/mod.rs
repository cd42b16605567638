use anyhow::Result;

mod args;
mod exit_status;
mod progress;
mod report;
mod run;

pub use args::{Arguments, Command, CommonArgs, FindCommand, TypesCommand};
pub use exit_status::ExitStatus;
pub use progress::ConsoleProgress;
pub use report::{print_labels_to, print_matches_to};

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    run::run(args)
}
