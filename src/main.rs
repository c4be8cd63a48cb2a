use std::fs::File;
use std::sync::Mutex;

use anyhow::{Context, Result, bail};
use clap::Parser;
use fipi::{
    api::FeedRegistry,
    app::{App, Session, report::render_summary},
    auth::Credentials,
    config::{Cli, Settings},
    store::SourceCatalog,
};
use reqwest::Client;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let settings = Settings::from_cli(Cli::parse())?;
    init_logging(&settings)?;

    authenticate(&settings)?;

    let catalog = SourceCatalog::load(settings.data_dir())
        .with_context(|| format!("Failed to open {}", settings.data_dir().display()))?;

    let client = Client::builder()
        .user_agent(concat!("fipi/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let registry = FeedRegistry::with_defaults(
        client,
        settings.data_dir().clone(),
        settings.alpha_vantage_api_key().clone(),
    );

    let mut session = Session::new(catalog, registry, *settings.as_of());

    if *settings.print() {
        return print_sources(&mut session, settings.source().as_deref()).await;
    }

    let initial = match settings.source() {
        Some(label) => label.clone(),
        None => session
            .catalog()
            .first()
            .map(|source| source.label().clone())
            .with_context(|| "No portfolio source to open")?,
    };
    // a failed first load still opens the dashboard with the error shown
    let _ = session.select(&initial).await;

    let mut app = App::new(session);
    app.run().await?;

    Ok(())
}

fn init_logging(settings: &Settings) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if *settings.print() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        let file = File::create(settings.log_file()).with_context(|| {
            format!("Failed to create log file {}", settings.log_file().display())
        })?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }

    Ok(())
}

fn authenticate(settings: &Settings) -> Result<()> {
    let Some(path) = settings.credentials() else {
        return Ok(());
    };

    let credentials = Credentials::from_path(path)?;
    let user = settings
        .user()
        .as_deref()
        .with_context(|| "--user is required when credentials are configured")?;
    let password = settings
        .password()
        .as_deref()
        .with_context(|| "FIPI_PASSWORD is required when credentials are configured")?;

    if !credentials.verify(user, password) {
        bail!("Invalid username or password");
    }

    info!(user, "Authenticated");
    Ok(())
}

async fn print_sources(session: &mut Session, only: Option<&str>) -> Result<()> {
    let labels: Vec<String> = match only {
        Some(label) => vec![label.to_string()],
        None => session
            .catalog()
            .labels()
            .into_iter()
            .map(String::from)
            .collect(),
    };

    for label in labels {
        session
            .select(&label)
            .await
            .with_context(|| format!("Failed to load portfolio '{}'", label))?;

        if let Some(portfolio) = session.portfolio() {
            println!("{} (as of {})", portfolio.source(), portfolio.as_of());
            println!("{}", render_summary(portfolio.summary()));
        }
    }

    Ok(())
}
