use std::process::ExitCode;

fn main() -> ExitCode {
    canteen_cli::run()
}
