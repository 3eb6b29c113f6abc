//! Catalog admin command line client

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

use anyhow::{Context, Result, bail};
use catalog_admin::App;
use catalog_admin::auth::{GuardError, LoginError, LoginForm, RouteGuard};
use catalog_admin::render::{render_field_errors, render_products};
use catalog_admin::shell::{HELP, Reply, Shell, ShellCommand};
use catalog_core::{Config, SortField};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::io::BufReader;
use tracing::{debug, info};

/// Command line interface for the catalog admin client
#[derive(Parser)]
#[command(
    name = "catalog-admin",
    version = env!("CARGO_PKG_VERSION"),
    about = "Terminal admin panel for a product catalog"
)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error), overrides the config file
    #[arg(short, long)]
    log_level: Option<String>,

    /// Enable structured JSON logging
    #[arg(long)]
    json: bool,

    /// Subcommand, defaults to the interactive shell
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
enum Commands {
    /// Log in and store the access token
    Login {
        /// Account name
        #[arg(short, long)]
        username: String,

        /// Account password
        #[arg(short, long, env = "CATALOG_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,

        /// Keep the token after this command exits
        #[arg(short, long)]
        remember: bool,
    },

    /// Forget the stored token
    Logout,

    /// Report whether a token is stored
    Whoami,

    /// Print one page of the product table
    Products {
        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Search term
        #[arg(short, long)]
        search: Option<String>,

        /// Sort column (title, brand, sku, rating, price)
        #[arg(long)]
        sort: Option<SortField>,

        /// Sort descending
        #[arg(long, requires = "sort")]
        desc: bool,
    },

    /// Start an interactive session
    Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Note: .env file not loaded: {e}");
    }

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    catalog_core::init_logging(&config.logging)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = %config.api.base_url,
        "Catalog admin starting"
    );

    let app = App::new(config).context("Failed to build HTTP clients")?;

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Login {
            username,
            password,
            remember,
        } => login(&app, LoginForm::new(username, password, remember)).await,
        Commands::Logout => {
            app.login_flow().logout()?;
            println!("Logged out");
            Ok(())
        }
        Commands::Whoami => whoami(&app),
        Commands::Products {
            page,
            search,
            sort,
            desc,
        } => products(&app, page, search, sort, desc).await,
        Commands::Shell => shell(&app).await,
    }
}

/// Load configuration and apply command line overrides
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load_from(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(level) = &cli.log_level {
        config.logging.level.clone_from(level);
    }
    if cli.json {
        config.logging.format = "json".to_string();
    }
    Ok(config)
}

async fn login(app: &App, form: LoginForm) -> Result<()> {
    match app.login_flow().submit(&form).await {
        Ok(_) => {
            if form.remember {
                println!("Logged in as {}", form.username);
            } else {
                println!(
                    "Logged in as {} for this command only, use --remember to keep the token",
                    form.username
                );
            }
            Ok(())
        }
        Err(LoginError::Invalid(errors)) => bail!("Invalid input:\n{}", render_field_errors(&errors)),
        Err(e) => Err(e.into()),
    }
}

fn whoami(app: &App) -> Result<()> {
    if app.tokens.has_token()? {
        println!("Logged in");
    } else {
        println!("Not logged in");
    }
    Ok(())
}

async fn products(
    app: &App,
    page: u32,
    search: Option<String>,
    sort: Option<SortField>,
    desc: bool,
) -> Result<()> {
    match RouteGuard::require(&app.tokens) {
        Ok(_) => {}
        Err(GuardError::NotAuthenticated) => {
            bail!("Not logged in, run `catalog-admin login --remember` first")
        }
        Err(e) => return Err(e.into()),
    }

    let mut list = app.product_list();
    if let Some(term) = search {
        list.set_search(term);
        list.flush_search();
    }
    if let Some(field) = sort {
        list.toggle_sort(field);
        if desc {
            list.toggle_sort(field);
        }
    }
    list.set_page(page);
    list.fetch_page().await;

    // Past the end: clamp now that the page count is known
    if list.set_page(page) != page {
        debug!(requested = page, page = list.query().page(), "Page clamped");
        list.fetch_page().await;
    }

    if let Some(message) = list.state().error() {
        bail!("{message}");
    }
    print!("{}", render_products(&list.view()));
    Ok(())
}

async fn shell(app: &App) -> Result<()> {
    let mut shell = Shell::new(app.product_list(), app.login_flow());
    println!("{HELP}");

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    if let Reply::Text(text) = shell.execute(ShellCommand::Open("/products".to_string())).await {
        println!("{text}");
    }

    shell.run(stdin, &mut stdout).await?;
    info!("Shell closed");
    Ok(())
}
