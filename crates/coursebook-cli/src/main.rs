use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use coursebook_cli::create_teacher;
use coursebook_cli::seeder::{SeedConfig, seed_database};
use coursebook_config::{DatabaseConfig, StorageBackend};
use coursebook_db::{Gateway, PgStore, init_db_pool};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "coursebook-cli")]
#[command(about = "Coursebook CLI - Administrative tools for Coursebook", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a teacher account
    CreateTeacher {
        #[arg(short = 'u', long)]
        username: Option<String>,

        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake courses and students
    Seed {
        #[arg(short = 'c', long, default_value = "20")]
        courses: usize,

        #[arg(short = 's', long, default_value = "50")]
        students: usize,
    },
    /// Print the course catalog
    ListCourses,
    /// Delete all users and courses
    Clear {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\n❌ {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = DatabaseConfig::from_env()?;
    // The in-memory backend would vanish when the CLI exits.
    config.backend = StorageBackend::Postgres;
    let pool = init_db_pool(&config).await?;
    let store = PgStore::new(pool);

    match cli.command {
        Commands::CreateTeacher {
            username,
            email,
            password,
        } => handle_create_teacher(&store, username, email, password).await,
        Commands::Seed { courses, students } => {
            let gateway = Gateway::from_store(store);
            let summary = seed_database(&gateway, SeedConfig::new(courses, students)).await?;
            if summary.skipped_students > 0 {
                println!(
                    "   {} students skipped (username or email taken)",
                    summary.skipped_students
                );
            }
            Ok(())
        }
        Commands::ListCourses => handle_list_courses(&store).await,
        Commands::Clear { yes } => handle_clear(&store, yes).await,
    }
}

async fn handle_create_teacher(
    store: &PgStore,
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let username = match username {
        Some(username) => username,
        None => Input::new()
            .with_prompt("Username")
            .interact_text()
            .context("Failed to read username")?,
    };

    let email = match email {
        Some(email) => email,
        None => Input::new()
            .with_prompt("Email address")
            .interact_text()
            .context("Failed to read email")?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .context("Failed to read password")?,
    };

    let user = create_teacher(store, &username, &email, &password).await?;
    println!("\n✅ Teacher created successfully!");
    println!("   Username: {}", user.username);
    println!("   Email: {}", user.email);
    Ok(())
}

async fn handle_list_courses(store: &PgStore) -> anyhow::Result<()> {
    use coursebook_db::CourseStore;

    let courses = store.find_all().await?;
    if courses.is_empty() {
        println!("No courses.");
        return Ok(());
    }

    for course in courses {
        println!(
            "{:<10} {:<40} {} cr  {}",
            course.code(),
            course.name,
            course.credits,
            course.id
        );
    }
    Ok(())
}

async fn handle_clear(store: &PgStore, yes: bool) -> anyhow::Result<()> {
    let confirmed = yes
        || dialoguer::Confirm::new()
            .with_prompt("Delete ALL users and courses?")
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;

    if !confirmed {
        println!("Aborted.");
        return Ok(());
    }

    store.clear().await?;
    println!("✅ All users and courses deleted");
    Ok(())
}
