use clap::Parser;
use std::process::ExitCode;
use tfview::{Cli, run};

fn main() -> ExitCode {
    // Reset SIGPIPE to default behavior to prevent panic on broken pipe
    // (e.g., when piping JSON records to `head`)
    #[cfg(unix)]
    reset_sigpipe();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(unix)]
fn reset_sigpipe() {
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}
