use std::num::NonZeroU32;

use clap::{Args, Parser, Subcommand};
use restomod_core::{ItemStatus, Selector, SortKey};

#[derive(Parser)]
#[command(name = "restomod")]
#[command(about = "Browse the restomod catalog and send leads", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Backend base URL (overrides api.base_url from the config file)
    #[arg(long, global = true, env = "RESTOMOD_API_URL")]
    pub api_url: Option<String>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Filter and sort the restomod catalog
    Catalog(CatalogArgs),

    /// Read the blog, one page at a time
    Blog(BlogArgs),

    /// List brands
    Brands,

    /// List open positions
    Jobs {
        /// Include postings that are no longer active
        #[arg(long)]
        all: bool,
    },

    /// List service packages
    Packages,

    /// Send a lead to the workshop
    #[command(subcommand)]
    Lead(LeadCommands),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Args)]
pub struct CatalogArgs {
    /// Case-insensitive text matched against name, brand and description
    #[arg(long, short)]
    pub search: Option<String>,

    /// Exact brand name, or "all"
    #[arg(long, default_value = "all")]
    pub brand: Selector<String>,

    /// available, reserved, sold, or "all"
    #[arg(long, default_value = "all")]
    pub status: Selector<ItemStatus>,

    #[arg(long)]
    pub min_price: Option<f64>,

    /// Defaults to the highest price in the catalog
    #[arg(long)]
    pub max_price: Option<f64>,

    /// featured, price-asc, price-desc or name (default from config)
    #[arg(long)]
    pub sort: Option<SortKey>,
}

#[derive(Args)]
pub struct BlogArgs {
    /// 1-based page number
    #[arg(long, short, default_value = "1")]
    pub page: NonZeroU32,

    /// Exact category, or "all"
    #[arg(long, short, default_value = "all")]
    pub category: Selector<String>,

    /// Posts per page (default from config: 9)
    #[arg(long)]
    pub page_size: Option<NonZeroU32>,
}

#[derive(Subcommand)]
pub enum LeadCommands {
    /// Send a message through the contact form
    Contact {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        subject: Option<String>,

        #[arg(long)]
        message: String,
    },

    /// Subscribe to the newsletter
    Newsletter {
        #[arg(long)]
        email: String,
    },

    /// Ask for a custom build
    CustomRequest {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        phone: Option<String>,

        /// Car the build starts from
        #[arg(long)]
        base_model: String,

        #[arg(long)]
        budget: Option<f64>,

        #[arg(long)]
        details: String,
    },

    /// Apply for an open position
    Apply {
        /// Job posting ID
        job_id: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        cover_letter: Option<String>,

        /// Link to a hosted CV
        #[arg(long)]
        cv_url: Option<String>,
    },

    /// Book a test drive
    TestDrive {
        /// Restomod ID
        item_id: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        phone: String,

        /// YYYY-MM-DD
        #[arg(long)]
        date: String,

        /// e.g. "10:00-11:00"
        #[arg(long)]
        time_slot: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Print the config file location
    Path,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
