use colored::Colorize;
use prodmon_oauth_setup::cli::Cli;
use prodmon_oauth_setup::logging::init_logger;
use prodmon_oauth_setup::prompt::{render_banner, stdio_prompter};
use prodmon_oauth_setup::{render_summary, run_setup, SetupConfig, SetupError};
use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let _cli = Cli::parse_command();

    if let Err(err) = init_logger(None) {
        eprintln!("Failed to initialize logging: {}", err);
    }

    let config = SetupConfig::default();
    println!("{}", render_banner());

    let mut prompter = stdio_prompter();

    let mut stdout = io::stdout();
    match run_setup(&config, &config.token_command, prompter.as_mut(), &mut stdout) {
        Ok(report) => {
            println!("{}", render_summary(&report));
            ExitCode::SUCCESS
        }
        Err(SetupError::MissingCredentials) => {
            if let Err(err) = stdout.flush() {
                tracing::debug!(error = %err, "Failed to flush stdout");
            }
            eprintln!("{}", SetupError::MissingCredentials.user_message().red());
            eprintln!("Setup incomplete. Please run the script again.");
            ExitCode::from(SetupError::MissingCredentials.exit_code())
        }
        Err(err) => {
            tracing::debug!(category = ?err.category(), error = %err, "Setup failed");
            eprintln!("❌ {}", err.user_message().red());
            ExitCode::from(err.exit_code())
        }
    }
}
