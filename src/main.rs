use anyhow::Result;
use console::style;

use roster::config::Config;
use roster::prompt::TerminalPrompter;
use roster::session::Session;
use roster::store::Store;
use roster::ui::icons::CROSS;

fn run() -> Result<()> {
    let config = Config::from_env()?;
    roster::logging::init(&config);

    let store = Store::open(&config.database)?;
    tracing::info!(database = %config.database.display(), "session started");

    let stdout = std::io::stdout();
    let mut session = Session::new(&store, TerminalPrompter::new(), stdout.lock());
    session.run()?;
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        // Each error message already carries its cause, so print only the top.
        tracing::debug!(error = ?e, "session failed");
        eprintln!("{}{} {}", CROSS, style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}
