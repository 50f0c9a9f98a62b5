use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::{Input, MultiSelect, Password};
use dotenvy::dotenv;
use scpl_cli::seeder;
use scpl_config::{DatabaseConfig, SeedConfig};
use scpl_core::roles::Role;
use scpl_db::{Stores, init_db_pool, run_migrations};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "scpl-cli")]
#[command(about = "scpl CLI - Seeding and account administration for the signage API", long_about = None)]
struct Cli {
    /// bcrypt cost used when hashing passwords
    #[arg(long, env = "TOKEN_HASH_COST", default_value_t = 12, global = true)]
    hash_cost: u32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the admin account, demo screens and demo playlists
    Seed,
    /// Create a user account
    CreateUser {
        /// Display name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// Roles, comma separated (ADMIN, EDITOR, VIEWER)
        #[arg(short = 'r', long, value_delimiter = ',')]
        roles: Option<Vec<Role>>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .compact()
        .init();

    let cli = Cli::parse();

    let database_config = DatabaseConfig::from_env()?;
    let pool = init_db_pool(&database_config)
        .await
        .context("Failed to connect to database")?;
    run_migrations(&pool).await?;
    let stores = Stores::postgres(pool);

    match cli.command {
        Commands::Seed => handle_seed(&stores, cli.hash_cost).await,
        Commands::CreateUser {
            name,
            email,
            password,
            roles,
        } => handle_create_user(&stores, name, email, password, roles, cli.hash_cost).await,
    }
}

async fn handle_seed(stores: &Stores, hash_cost: u32) -> anyhow::Result<()> {
    println!("🌱 Seeding database...");

    let summary = seeder::seed_all(stores, &SeedConfig::from_env(), hash_cost).await?;

    if summary.is_empty() {
        println!("   ✓ Nothing to do, data already present");
    } else {
        println!("   ✓ Admin created: {}", summary.admin_created);
        println!("   ✓ Screens created: {}", summary.screens_created);
        println!("   ✓ Playlists created: {}", summary.playlists_created);
    }

    Ok(())
}

async fn handle_create_user(
    stores: &Stores,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    roles: Option<Vec<Role>>,
    hash_cost: u32,
) -> anyhow::Result<()> {
    let name = match name {
        Some(name) => name,
        None => Input::new().with_prompt("Name").interact_text()?,
    };

    let email = match email {
        Some(email) => email,
        None => Input::new()
            .with_prompt("Email address")
            .validate_with(|input: &String| {
                if input.contains('@') {
                    Ok(())
                } else {
                    Err("Not an email address")
                }
            })
            .interact_text()?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    let roles = match roles {
        Some(roles) => roles,
        None => MultiSelect::new()
            .with_prompt("Roles (space to select, none means VIEWER)")
            .items(&Role::ALL[..])
            .interact()?
            .into_iter()
            .map(|index| Role::ALL[index])
            .collect(),
    };

    let user =
        seeder::create_user(stores, &name, &email, &password, roles, hash_cost).await?;

    let roles: Vec<&str> = user.roles.iter().map(|r| r.as_str()).collect();
    println!("\n✅ User created successfully!");
    println!("   Email: {}", user.email);
    println!("   Name: {}", user.name);
    println!("   Roles: {}", roles.join(", "));

    Ok(())
}
