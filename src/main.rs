//! gh-user-search command-line entry point

use anyhow::{Context, Result};
use clap::Parser;
use gh_user_search::{
    config::{self, SortField, SortOrder},
    GitHubTransport, PaginatedSearcher, Query, ResultSet, SearchCriteria, SearchTransport,
};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gh-user-search")]
#[command(version)]
#[command(about = "Search GitHub users by followers, repositories and language")]
#[command(after_long_help = r#"EXAMPLES
    Top 1000 users with at least 1000 followers:
        $ gh-user-search --min-followers 1000 -n 1000

    Rust developers with 50+ repositories, as JSON:
        $ gh-user-search --min-repos 50 --language rust --json

ENVIRONMENT VARIABLES
    GH_USER_SEARCH_SETTINGS_PATH   Path to settings.yml
    GH_USER_SEARCH_API_URL         Search API base URL (default: https://api.github.com)
    GH_USER_SEARCH_MAX_PAGE_SIZE   Largest page to request (1-100, default: 100)
    GH_USER_SEARCH_TIMEOUT         Request timeout in seconds (default: 10)
    RUST_LOG                       Log filter (default: info)
"#)]
struct Cli {
    /// Minimum follower count
    #[arg(long)]
    min_followers: Option<u64>,

    /// Minimum number of public repositories
    #[arg(long)]
    min_repos: Option<u64>,

    /// Language used in the user's repositories
    #[arg(long)]
    language: Option<String>,

    /// Total number of users to return
    #[arg(short = 'n', long, default_value_t = gh_user_search::DEFAULT_NUM_RESULTS)]
    num_results: u32,

    /// Largest page to request from the API (1-100)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
    max_page_size: Option<u32>,

    /// Sort field (default: best match)
    #[arg(long, value_enum)]
    sort: Option<SortField>,

    /// Sort order, used with --sort
    #[arg(long, value_enum, requires = "sort")]
    order: Option<SortOrder>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print results as a JSON array
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only results
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    debug!("Starting gh-user-search v{}", gh_user_search::VERSION);

    let mut settings = config::load_settings(cli.config.as_deref())?;
    if let Some(size) = cli.max_page_size {
        settings.search.max_page_size = size;
    }
    if cli.sort.is_some() {
        settings.search.sort = cli.sort;
        settings.search.order = cli.order;
    }

    let criteria = SearchCriteria::new(cli.min_followers, cli.min_repos, cli.language)?;
    let query = Query::from_criteria(&criteria);

    let transport = GitHubTransport::with_settings(&settings)
        .context("Failed to initialize GitHub transport")?;
    let searcher = PaginatedSearcher::from_settings(transport, &settings.search);

    let plan = searcher.plan(cli.num_results);
    info!(
        "Searching {} for '{}': {} users across {} pages",
        searcher.transport().name(),
        query,
        plan.num_results(),
        plan.page_count()
    );

    let results = searcher
        .search(&query, cli.num_results)
        .await
        .context("User search failed")?;

    info!("Found {} users", results.len());
    print_results(&results, cli.json)
}

/// Print one `username<TAB>url` line per user, or a JSON array
fn print_results(results: &ResultSet, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(results)?);
        return Ok(());
    }

    for item in results {
        println!("{}\t{}", item.username, item.profile_url);
    }
    Ok(())
}
