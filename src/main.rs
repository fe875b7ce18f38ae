//! cchistory: browse Claude Code conversation history from the terminal.

use std::io::IsTerminal;
use std::process::ExitCode;

use cchistory::cli::App;
use cchistory::menu::Theme;

fn main() -> ExitCode {
    // Logging is initialized here based on --log-level and --log-format
    let app = App::from_args();

    match app.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let theme = if std::io::stderr().is_terminal() {
                app.theme()
            } else {
                Theme::plain()
            };
            eprintln!("{}", theme.error(&format!("Error: {e}")));

            if std::env::var("RUST_BACKTRACE").is_ok() {
                if let Some(source) = std::error::Error::source(&e) {
                    eprintln!("Caused by: {source}");
                }
            }

            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
        }
    }
}
