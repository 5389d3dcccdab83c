use anyhow::Context;
use tokio::io::BufReader;

use mail_triage::TriageSession;
use mail_triage::cli;
use mail_triage::config::TriageConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the results.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = TriageConfig::from_env().context("invalid configuration")?;
    let mut session = TriageSession::from_config(&config).context("failed to create session")?;

    eprintln!("📨 mail-triage v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Endpoint: {}", config.endpoint);
    match config.request_timeout {
        Some(timeout) => eprintln!("   Request timeout: {}s", timeout.as_secs()),
        None => eprintln!("   Request timeout: none"),
    }
    eprintln!("{}\n", cli::HELP);

    let stdin = BufReader::new(tokio::io::stdin());
    cli::run(&mut session, stdin, tokio::io::stdout()).await?;

    Ok(())
}
