pub mod blog;
pub mod catalog;
pub mod config;
pub mod lead;
pub mod listings;

use std::time::Duration;

use anyhow::{Context, Result};
use restomod_client::{ApiClient, ClientOptions, Endpoints};
use restomod_config::Config;
use serde::Serialize;

use crate::cli::Commands;

/// Everything a command needs, built once in `main`
pub struct AppContext {
    pub client: ApiClient,
    pub config: Config,
    pub json: bool,
}

impl AppContext {
    /// `api_url` comes from `--api-url` or `RESTOMOD_API_URL` and wins over
    /// the config file
    pub fn new(config: Config, api_url: Option<String>, json: bool) -> Result<Self> {
        let options = client_options(&config, api_url);
        let client = ApiClient::new(options).context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            config,
            json,
        })
    }

    /// Print `value` as pretty JSON on stdout
    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

fn client_options(config: &Config, api_url: Option<String>) -> ClientOptions {
    let mut options = ClientOptions::new(api_url.unwrap_or_else(|| config.api.base_url.clone()));
    options.timeout = Duration::from_secs(config.api.timeout_secs);
    if let Some(user_agent) = &config.api.user_agent {
        options.user_agent = user_agent.clone();
    }

    let paths = &config.endpoints;
    options.endpoints = Endpoints {
        contact: paths.contact.clone(),
        newsletter: paths.newsletter.clone(),
        custom_request: paths.custom_request.clone(),
        job_application: paths.job_application.clone(),
        test_drive: paths.test_drive.clone(),
    };
    options
}

pub async fn run(ctx: &AppContext, command: Commands) -> Result<()> {
    match command {
        Commands::Catalog(args) => catalog::handle(ctx, args).await,
        Commands::Blog(args) => blog::handle(ctx, args).await,
        Commands::Brands => listings::brands(ctx).await,
        Commands::Jobs { all } => listings::jobs(ctx, all).await,
        Commands::Packages => listings::packages(ctx).await,
        Commands::Lead(cmd) => lead::handle(ctx, cmd).await,
        Commands::Config(cmd) => config::handle(cmd),
    }
}

/// `80000` -> `€ 80.000`
pub fn format_price(price: Option<f64>) -> String {
    let Some(price) = price else {
        return "price on request".to_string();
    };

    let whole = price.round() as u64;
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("€ {}", grouped)
}
