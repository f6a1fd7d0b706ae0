use clap::Parser;
use pr_report::config::{load_config, resolve_credentials};
use pr_report::error::Result;
use pr_report::fetch;
use pr_report::github::GithubClient;
use pr_report::host::Host;
use pr_report::options::{ItemState, ItemType, ReportOptions, RepoType};
use pr_report::render::{Renderer, TemplateSource};
use pr_report::{display, report::OrgReport};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pr-report",
    version,
    about = "Report open pull requests and issues across GitHub organizations"
)]
struct Cli {
    /// Organizations to report on (repeatable or comma-separated)
    #[arg(short = 'o', long = "org", value_delimiter = ',', required = true)]
    orgs: Vec<String>,

    /// Only include items authored by or assigned to these users
    #[arg(short = 'u', long = "user", value_delimiter = ',')]
    users: Vec<String>,

    /// State of items to report
    #[arg(short = 's', long, value_enum, default_value = "open")]
    state: ItemState,

    /// Item types to fetch
    #[arg(
        short = 'T',
        long = "item-type",
        value_enum,
        value_delimiter = ',',
        default_value = "pull-request"
    )]
    item_types: Vec<ItemType>,

    /// Repository visibility to list
    #[arg(short = 'r', long, value_enum, default_value = "all")]
    repo_type: RepoType,

    /// GitHub Enterprise host
    #[arg(long)]
    host: Option<String>,

    /// Allow unauthorized TLS (for proxies)
    #[arg(long)]
    insecure: bool,

    /// Render the built-in HTML template
    #[arg(long)]
    html: bool,

    /// Path to a custom Handlebars template
    #[arg(short = 't', long, conflicts_with = "html")]
    tmpl: Option<PathBuf>,

    /// Include item URLs in the report
    #[arg(long)]
    item_url: bool,

    /// GitHub personal access token
    #[arg(long)]
    token: Option<String>,

    /// GitHub username (with --password)
    #[arg(long, requires = "password")]
    username: Option<String>,

    /// GitHub password (with --username)
    #[arg(long, requires = "username")]
    password: Option<String>,

    /// Show rate-limit diagnostics on stderr
    #[arg(long)]
    verbose: bool,
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config()?;
    let credentials = resolve_credentials(
        cli.token.as_deref(),
        cli.username.as_deref(),
        cli.password.as_deref(),
        &config,
    )?;
    let host = Host::parse(cli.host.as_deref())?;

    let opts = ReportOptions {
        orgs: cli.orgs,
        users: cli.users,
        state: cli.state,
        item_types: cli.item_types,
        repo_type: cli.repo_type,
        host,
        include_urls: cli.item_url,
        verbose: cli.verbose,
    }
    .normalized()?;

    if cli.insecure {
        display::warn(
            "--insecure requested; the TLS stack keeps certificate verification enabled",
        );
    }

    // Compile the template before any network call so a bad template fails
    // without spending API quota.
    let template = match (cli.tmpl, cli.html) {
        (Some(path), _) => TemplateSource::Path(path),
        (None, true) => TemplateSource::Html,
        (None, false) => TemplateSource::Text,
    };
    let renderer = Renderer::new(&template)?;

    let client = GithubClient::new(&credentials, &opts.host.api_base(), opts.verbose)?;
    client.warn_if_rate_limited().await.ok();

    // Organizations fetch concurrently; the first failure aborts the batch
    // and nothing is printed. Output keeps the caller-supplied order.
    let reports: Vec<OrgReport> = futures::future::try_join_all(
        opts.orgs
            .iter()
            .map(|org| fetch::org_report(&client, org, &opts)),
    )
    .await?;

    print!("{}", renderer.render(&reports)?);

    client.check_rate_limit_if_verbose().await;

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        display::error(&e.to_string());
        std::process::exit(1);
    }
}
