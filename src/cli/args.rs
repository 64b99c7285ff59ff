use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use listing_viewer::{Config, FilterField, PageSize};
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "listing-viewer",
    version,
    about = "Browse property listings served by a remote JSON API",
    long_about = "Browse property listings served by a remote JSON API.\n\nExamples:\n  listing-viewer -u http://localhost:8080/api/properties\n  listing-viewer -q sol --city lima --page-size 10\n  listing-viewer --interactive\n\nThe API URL falls back to the LISTINGS_API_URL environment variable."
)]
pub struct CliArgs {
    #[arg(
        short = 'u',
        long = "api-url",
        value_name = "URL",
        help_heading = "Source",
        help = "Base endpoint of the listing API (default: $LISTINGS_API_URL)."
    )]
    pub api_url: Option<String>,

    #[arg(
        long,
        value_name = "SECS",
        help_heading = "Source",
        help = "Request timeout in seconds (default: none)."
    )]
    pub timeout: Option<u64>,

    #[arg(
        short = 'q',
        long,
        value_name = "TEXT",
        help_heading = "Source",
        help = "Server-side search text, sent as /filtered?name=TEXT."
    )]
    pub query: Option<String>,

    #[arg(long, value_name = "TEXT", help_heading = "Filters")]
    pub name: Option<String>,

    #[arg(long, value_name = "TEXT", help_heading = "Filters")]
    pub description: Option<String>,

    #[arg(long, value_name = "TEXT", help_heading = "Filters")]
    pub price: Option<String>,

    #[arg(long, value_name = "TEXT", help_heading = "Filters")]
    pub country: Option<String>,

    #[arg(long, value_name = "TEXT", help_heading = "Filters")]
    pub city: Option<String>,

    #[arg(long, value_name = "TEXT", help_heading = "Filters")]
    pub address: Option<String>,

    #[arg(
        short = 'p',
        long,
        default_value_t = 1,
        help_heading = "Pagination",
        help = "Page to show."
    )]
    pub page: usize,

    #[arg(
        short = 's',
        long = "page-size",
        default_value = "5",
        value_parser = parse_page_size,
        help_heading = "Pagination",
        help = "Rows per page: 5, 10, 16, 25 or 50."
    )]
    pub page_size: PageSize,

    #[arg(
        long,
        value_name = "ID",
        help_heading = "Output",
        help = "Show the detail view of one listing."
    )]
    pub show: Option<String>,

    #[arg(
        short = 'i',
        long,
        help_heading = "Output",
        help = "Keep reading commands from stdin."
    )]
    pub interactive: bool,

    #[arg(
        short = 'v',
        long,
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase log verbosity (-v, -vv)."
    )]
    pub verbose: u8,
}

impl CliArgs {
    /// Explicit `--api-url` wins, otherwise the environment is consulted
    pub fn config(&self) -> Result<Config> {
        let mut config = match &self.api_url {
            Some(url) => Config::new(url.clone()),
            None => Config::from_env().context("No API URL given, pass --api-url")?,
        };
        if let Some(secs) = self.timeout {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }

    pub fn filters(&self) -> Vec<(FilterField, &str)> {
        [
            (FilterField::Name, &self.name),
            (FilterField::Description, &self.description),
            (FilterField::Price, &self.price),
            (FilterField::Country, &self.country),
            (FilterField::City, &self.city),
            (FilterField::Address, &self.address),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
        .collect()
    }
}

pub fn parse_page_size(raw: &str) -> Result<PageSize, String> {
    let value: usize = raw
        .trim()
        .parse()
        .map_err(|_| format!("{raw:?} is not a number"))?;
    PageSize::try_from(value)
}
