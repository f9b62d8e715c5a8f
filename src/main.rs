// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};

fn main() -> Result<()> {
    let config = money_manager::config::load().context("failed to load configuration")?;

    money_manager::init_tracing(&config.log_level, config.log_file.as_deref())
        .context("failed to open log file")?;

    run_ui_mode(&config)
}

#[cfg(feature = "tui")]
fn run_ui_mode(config: &money_manager::AppConfig) -> Result<()> {
    tracing::info!(currency = %config.currency_symbol, "starting session");

    let mut app = ui::App::new(config);
    ui::run_ui(&mut app)?;

    let summary = app.ledger.summary();
    tracing::info!(
        entries = app.ledger.entry_count(),
        total = %summary.total_amount,
        remaining = %summary.remaining_income,
        "session closed"
    );

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_config: &money_manager::AppConfig) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    std::process::exit(1);
}
