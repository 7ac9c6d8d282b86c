use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Result, bail};
use client::{
    ApiClient, ClientConfig, FileStore, Guard, GuardDecision, RedisConfig, RedisStore, Session,
    SessionStore,
};
use common::{LoginRequest, NewsletterSubscriptionRequest, Post};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod command;

use command::Command;

/// Session file used when none is configured
const DEFAULT_SESSION_FILE: &str = ".portal-session.json";

fn session_store(config: &ClientConfig) -> Result<Arc<dyn SessionStore>> {
    if let Some(url) = &config.redis_url {
        info!("Keeping the session in Redis");
        return Ok(Arc::new(RedisStore::new(&RedisConfig::new(url.clone()))?));
    }

    let path = config
        .session_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE));
    info!("Keeping the session in {}", path.display());
    Ok(Arc::new(FileStore::new(path)))
}

async fn require(guard: Guard, session: &Session) -> Result<()> {
    match guard.check(session).await? {
        GuardDecision::Allow => Ok(()),
        GuardDecision::RedirectToLogin => bail!("Not signed in. Run `portal-console login` first."),
        GuardDecision::RedirectToDashboard => bail!("This command is reserved to super admins."),
    }
}

fn print_posts(posts: &[Post]) {
    if posts.is_empty() {
        println!("No publications.");
    }
    for post in posts {
        println!(
            "{}  [{}] {} ({}, by {}, {} likes, {} to {})",
            post.id,
            post.status,
            post.title,
            post.category,
            post.author_name(),
            post.likes,
            post.valid_from.format("%Y-%m-%d"),
            post.valid_to.format("%Y-%m-%d"),
        );
    }
}

async fn run(api: &ApiClient, command: Command) -> Result<()> {
    let session = api.session();

    match command {
        Command::Login { email, password } => {
            let response = api.auth().login(&LoginRequest::new(email, password)).await?;
            println!(
                "Signed in as {} ({})",
                response.user.name(),
                response.user.role
            );
        }
        Command::Logout => {
            api.auth().logout().await?;
            println!("Signed out.");
        }
        Command::WhoAmI => {
            let user = if session.is_authenticated().await? {
                api.auth().current_user().await?
            } else {
                None
            };
            match user {
                Some(user) => {
                    println!("{} <{}> {} {}", user.name(), user.email, user.role, user.status)
                }
                None => println!("Not signed in."),
            }
        }
        Command::Publications => {
            require(Guard::Authenticated, session).await?;
            print_posts(&api.publications().all().await?);
        }
        Command::Active => print_posts(&api.publications().active().await?),
        Command::Pending => {
            require(Guard::Authenticated, session).await?;
            print_posts(&api.publications().pending().await?);
        }
        Command::Approve(id) => {
            require(Guard::Authenticated, session).await?;
            let post = api.publications().approve(&id).await?;
            println!("Approved \"{}\".", post.title);
        }
        Command::Reject(id) => {
            require(Guard::Authenticated, session).await?;
            api.publications().reject(&id).await?;
            println!("Rejected {}.", id);
        }
        Command::Like(id) => {
            let post = api.publications().like(&id).await?;
            println!("\"{}\" now has {} likes.", post.title, post.likes);
        }
        Command::Users => {
            require(Guard::SuperAdmin, session).await?;
            for user in api.users().all().await? {
                println!("{}  {} {} {}", user.id, user.email, user.role, user.status);
            }
        }
        Command::UserStatus { id, status } => {
            require(Guard::SuperAdmin, session).await?;
            let user = api.users().update_status(&id, status).await?;
            println!("{} is now {}.", user.email, user.status);
        }
        Command::Subscribers => {
            require(Guard::Authenticated, session).await?;
            for subscriber in api.newsletter().subscribers().await? {
                println!(
                    "{}  {} {} {}",
                    subscriber.id,
                    subscriber.email,
                    subscriber.full_name().unwrap_or_default(),
                    if subscriber.confirmed {
                        "confirmed"
                    } else {
                        "unconfirmed"
                    }
                );
            }
        }
        Command::Subscribe(email) => {
            let subscriber = api
                .newsletter()
                .subscribe(&NewsletterSubscriptionRequest::new(email))
                .await?;
            println!("Subscribed {}.", subscriber.email);
        }
        Command::Unsubscribe(email) => {
            api.newsletter().unsubscribe(&email).await?;
            println!("Unsubscribed {}.", email);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so command output stays scriptable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = Command::parse(&args)?;

    let config = ClientConfig::from_env()?;
    let session = Session::new(session_store(&config)?);
    let api = ApiClient::new(&config, session)?;

    run(&api, command).await
}
