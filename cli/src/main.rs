mod pages;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cuisine_core::{
    ApiClient, ApiConfig, AuthContext, FileTokenStore, IngredientList, RegisterOutcome,
    RegisterRequest, ReqwestClient,
};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::load_test::{Flow, LoadTestOptions};
use crate::pages::{FilterEdits, SuggestField};

#[derive(Parser)]
#[command(name = "cuisine")]
#[command(about = "Recipe discovery from the terminal", long_about = None)]
struct Cli {
    /// Backend URL (default: $CUISINE_API_URL or http://localhost:5000)
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Log in and store the session token
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Log out and forget the session token
    Logout,
    /// Show the logged-in user
    Whoami,
    /// List all recipes
    Recipes,
    /// Search recipes by name
    Search {
        /// Search text
        text: String,
    },
    /// Filter recipes by time, cuisine, taste and ingredients
    Filter {
        /// Current filter query string to start from, e.g. "time=30&cuisine=Italian"
        #[arg(long, default_value = "")]
        query: String,
        /// Maximum cooking time in minutes
        #[arg(long)]
        time: Option<u32>,
        #[arg(long)]
        cuisine: Option<String>,
        #[arg(long)]
        taste: Option<String>,
        /// Required ingredient (repeatable)
        #[arg(long = "ingredient")]
        ingredients: Vec<String>,
        /// Drop an ingredient from the starting query (repeatable)
        #[arg(long = "without")]
        remove_ingredients: Vec<String>,
        /// Remove one applied filter (time, cuisine, taste or ingredients)
        #[arg(long, conflicts_with = "clear")]
        remove: Option<String>,
        /// Remove one applied ingredient pill
        #[arg(long, conflicts_with_all = ["clear", "remove"])]
        remove_ingredient: Option<String>,
        /// Clear every filter
        #[arg(long)]
        clear: bool,
    },
    /// Show one recipe
    Recipe {
        id: i64,
    },
    /// Manage favorites (requires login)
    Favorites {
        #[command(subcommand)]
        command: FavoritesCommand,
    },
    /// Filter form choices matching partial input
    Suggest {
        #[arg(default_value = "")]
        input: String,
        #[arg(long, value_enum, default_value = "ingredient")]
        field: SuggestField,
        /// Ingredients already selected (comma-separated)
        #[arg(long, default_value = "")]
        selected: String,
    },
    /// Run concurrent virtual users against the backend
    LoadTest {
        /// Number of virtual users
        #[arg(long, default_value = "10")]
        users: usize,
        /// Maximum number of users running at once
        #[arg(long, default_value = "5")]
        concurrency: usize,
        /// Flow iterations per user
        #[arg(long, default_value = "1")]
        iterations: usize,
        #[arg(long, value_enum, default_value = "user")]
        flow: Flow,
        /// Seed for generated usernames and recipes
        #[arg(long, default_value = "0")]
        seed: u64,
        /// Pause between iterations, in milliseconds
        #[arg(long, default_value = "0")]
        think_ms: u64,
    },
}

#[derive(Subcommand)]
enum FavoritesCommand {
    /// List favorite recipes
    List,
    /// Add a recipe to favorites
    Add { recipe_id: i64 },
    /// Remove a recipe from favorites
    Remove { recipe_id: i64 },
}

fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = ApiConfig::from_env().context("Invalid configuration")?;
    if let Some(server) = &cli.server {
        config = config.with_base_url(server)?;
    }

    let http = ReqwestClient::builder()
        .timeout(config.timeout)
        .build()
        .context("Failed to build HTTP client")?;

    let auth = AuthContext::new(Arc::new(FileTokenStore::new(config.home_dir.clone())));
    let api = ApiClient::new(http, &config.base_url, auth);

    match cli.command {
        Commands::Register {
            username,
            email,
            password,
        } => {
            let request = RegisterRequest {
                username,
                email,
                password,
            };
            match api.register(&request).await.context("Registration failed")? {
                RegisterOutcome::Created => println!("Registered {}", request.username),
                RegisterOutcome::AlreadyExists { message } => println!("{}", message),
            }
        }
        Commands::Login { username, password } => {
            api.login(&username, &password)
                .await
                .context("Login failed")?;
            println!("Logged in as {}", username);
        }
        Commands::Logout => {
            api.logout().await.context("Failed to clear session")?;
            println!("Logged out");
        }
        Commands::Whoami => {
            let me = api.me().await.context("Failed to load profile")?;
            println!("{} <{}> (id {})", me.username, me.email, me.id);
        }
        Commands::Recipes => pages::recipes(&api).await?,
        Commands::Search { text } => pages::search(&api, &text).await?,
        Commands::Filter {
            query,
            time,
            cuisine,
            taste,
            ingredients,
            remove_ingredients,
            remove,
            remove_ingredient,
            clear,
        } => {
            let edits = FilterEdits {
                time,
                cuisine,
                taste,
                ingredients,
                remove_ingredients,
                remove_filter: remove,
                remove_applied_ingredient: remove_ingredient,
                clear,
            };
            pages::filter(&api, &query, edits).await?;
        }
        Commands::Recipe { id } => pages::recipe(&api, id).await?,
        Commands::Favorites { command } => match command {
            FavoritesCommand::List => pages::favorites(&api).await?,
            FavoritesCommand::Add { recipe_id } => pages::add_favorite(&api, recipe_id).await?,
            FavoritesCommand::Remove { recipe_id } => {
                pages::remove_favorite(&api, recipe_id).await?
            }
        },
        Commands::Suggest {
            input,
            field,
            selected,
        } => {
            let selected = IngredientList::from_csv(&selected);
            for suggestion in pages::suggest(field, &input, &selected) {
                println!("{}", suggestion);
            }
        }
        Commands::LoadTest {
            users,
            concurrency,
            iterations,
            flow,
            seed,
            think_ms,
        } => {
            let options = LoadTestOptions {
                users,
                concurrency,
                iterations,
                flow,
                seed,
                think_time: Duration::from_millis(think_ms),
            };
            load_test::load_test(api.http().clone(), api.base_url(), options).await?;
        }
    }

    Ok(())
}
