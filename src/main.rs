use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use github_user_search::recipes::load_recipes;
use github_user_search::search::{DEFAULT_PAGE_SIZE, PAGE_SIZES};
use github_user_search::{
    render, search, Config, GitHubClient, Navigation, RecipeStore, SearchForm, SearchView,
    SortMode, UserApi,
};

#[derive(Parser)]
#[command(name = "github-user-search", version, about)]
struct Cli {
    /// GitHub API base URL (overrides GITHUB_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Request timeout in seconds (overrides GITHUB_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Advanced user search with pagination
    Search(SearchArgs),
    /// Look up a single user
    User {
        login: String,
        /// Open the profile in the browser
        #[arg(long = "open")]
        open_profile: bool,
        #[arg(long)]
        json: bool,
    },
    /// Show the remaining API quota
    RateLimit,
    /// Browse a recipe collection with favorites and recommendations
    Recipes(RecipeArgs),
}

#[derive(Args)]
struct SearchArgs {
    #[arg(long, short, default_value = "")]
    username: String,
    #[arg(long, short, default_value = "")]
    location: String,
    /// Minimum number of public repositories
    #[arg(long, default_value = "")]
    min_repos: String,
    #[arg(long, value_enum, default_value_t = SortMode::Relevance)]
    sort: SortMode,
    #[arg(long, default_value_t = 1)]
    page: u32,
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, value_parser = parse_page_size)]
    per_page: u32,
    /// Search every user when no criteria are given
    #[arg(long)]
    all: bool,
    #[arg(long)]
    json: bool,
    /// Keep prompting for pages after the first one
    #[arg(long, short)]
    interactive: bool,
}

impl SearchArgs {
    fn form(&self) -> SearchForm {
        SearchForm {
            username: self.username.clone(),
            location: self.location.clone(),
            min_repos: self.min_repos.clone(),
            sort: self.sort,
        }
    }
}

#[derive(Args)]
struct RecipeArgs {
    /// JSON file holding an array of recipes
    #[arg(long, short)]
    file: PathBuf,
    /// Only show recipes whose title contains this
    #[arg(long, short)]
    search: Option<String>,
    /// Mark a recipe as favorite (repeatable)
    #[arg(long = "favorite")]
    favorites: Vec<u64>,
    #[arg(long)]
    json: bool,
}

fn parse_page_size(raw: &str) -> Result<u32, String> {
    let size: u32 = raw
        .parse()
        .map_err(|_| format!("{raw:?} is not a number"))?;
    if PAGE_SIZES.contains(&size) {
        Ok(size)
    } else {
        Err(format!("page size must be one of {PAGE_SIZES:?}"))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = Config::load()
        .with_api_url(cli.api_url)
        .with_timeout(cli.timeout);

    match cli.command {
        Command::Search(args) => {
            let client = Arc::new(GitHubClient::new(&config)?);
            run_search(client, args).await
        }
        Command::User {
            login,
            open_profile,
            json,
        } => {
            let client = GitHubClient::new(&config)?;
            let user = client.fetch_user(&login).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&user)?);
            } else {
                println!("{}", render::user_detail(&user));
            }

            if open_profile {
                open::that(&user.html_url)
                    .with_context(|| format!("Failed to open {}", user.html_url))?;
            }
            Ok(())
        }
        Command::RateLimit => {
            let client = GitHubClient::new(&config)?;
            match client.rate_limit().await {
                Some(status) => println!("{}", render::rate_limit(&status)),
                None => println!("Rate limit information is unavailable"),
            }
            Ok(())
        }
        Command::Recipes(args) => run_recipes(args),
    }
}

async fn run_search(client: Arc<GitHubClient>, args: SearchArgs) -> Result<()> {
    let form = args.form();
    let mut view = SearchView::new();
    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let mut page = args.page;

    loop {
        let criteria = if args.all {
            form.to_criteria_unchecked(page, args.per_page)?
        } else {
            form.to_criteria(page, args.per_page)?
        };

        view.begin();
        let outcome = search(Arc::clone(&client), &criteria).await;
        view.apply(outcome);
        ensure_succeeded(&view)?;

        if args.json {
            println!("{}", serde_json::to_string_pretty(view.results())?);
        } else {
            println!("{}", render::results(&view, &form));
        }

        if !args.interactive {
            return Ok(());
        }

        match prompt_page(&view, &mut stdin).await? {
            Some(next) => page = next,
            None => return Ok(()),
        }
    }
}

/// A failed search ends the session with its error.
fn ensure_succeeded(view: &SearchView) -> Result<()> {
    match view.error() {
        Some(error) => anyhow::bail!("{error}"),
        None => Ok(()),
    }
}

/// Reads pager input until it names a reachable page or asks to stop.
async fn prompt_page(view: &SearchView, stdin: &mut Lines<BufReader<Stdin>>) -> Result<Option<u32>> {
    loop {
        eprint!("{} ", "page (n/p/<number>/q)>".dimmed());
        std::io::stderr().flush().ok();

        let Some(line) = stdin.next_line().await.context("Failed to read input")? else {
            return Ok(None);
        };

        match view.navigate(&line) {
            Navigation::Quit => return Ok(None),
            Navigation::Page(page) => return Ok(Some(page)),
            Navigation::Ignored => {
                eprintln!("No such page, results have {} pages", view.results().total_pages);
            }
        }
    }
}

fn run_recipes(args: RecipeArgs) -> Result<()> {
    let recipes = load_recipes(&args.file)?;
    let mut store = RecipeStore::new()
        .set_recipes(recipes)
        .set_search_term(args.search.unwrap_or_default());

    for id in args.favorites {
        if store.get(id).is_none() {
            warn!(id, "No recipe with this id, not marking as favorite");
            continue;
        }
        store = store.add_favorite(id);
    }

    if args.json {
        let out = serde_json::json!({
            "visible": store.visible(),
            "favorites": store.favorite_recipes(),
            "recommendations": store.recommendations(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let sections = [
        ("Recipes", store.visible()),
        ("Favorites", store.favorite_recipes()),
        ("Recommendations", store.recommendations()),
    ];
    for (title, recipes) in sections {
        println!("{}", title.bold());
        if recipes.is_empty() {
            println!("  {}", "none".dimmed());
        }
        for recipe in recipes {
            println!("{}", render::recipe_line(recipe, store.is_favorite(recipe.id)));
        }
        println!();
    }
    Ok(())
}
