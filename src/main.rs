use std::process::ExitCode;

fn main() -> ExitCode {
    ticketscrub_lib::run()
}
