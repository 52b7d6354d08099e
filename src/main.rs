// src/main.rs
mod cli;
mod config;
mod db;
mod error;
mod handlers;
mod models;
mod poll;
mod routes;
mod store;
mod views;

use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use validator::Validate;

use crate::cli::{Cli, Command, ManageCommand};
use crate::config::Config;
use crate::db::PgStore;
use crate::handlers::AppState;
use crate::models::{NewChoice, NewQuestion};
use crate::store::PollStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok(); // Load environment variables from .env file

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("polls=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&config).await,
        Command::Manage(command) => manage(&config, command).await,
    }
}

async fn connect(config: &Config) -> anyhow::Result<PgStore> {
    let pool = db::create_pool(config.require_database_url()?, config)
        .await
        .context("Failed to connect to the database")?;
    Ok(PgStore::new(pool))
}

async fn serve(config: &Config) -> anyhow::Result<()> {
    let store: Arc<dyn PollStore> = Arc::new(connect(config).await?);

    let state = AppState::new(store)?;
    let routes = routes::create_routes(state);

    let addr = config.addr();
    info!("Serving polls at http://{addr}{}", routes::index_url());
    axum_server::bind(addr)
        .serve(routes.into_make_service())
        .await
        .context("Server error")
}

async fn manage(config: &Config, command: ManageCommand) -> anyhow::Result<()> {
    let store = connect(config).await?;

    match command {
        ManageCommand::AddQuestion { text, days, pub_date } => {
            let new = NewQuestion::new(text, cli::resolve_pub_date(days, pub_date, Utc::now()));
            new.validate()?;
            let question = store.create_question(new).await?;
            println!("Created question {}: {}", question.id, question);
        }
        ManageCommand::AddChoice { question, text, votes } => {
            let new = NewChoice::new(question, text).with_votes(votes);
            new.validate()?;
            let choice = store.create_choice(new).await?;
            println!("Created choice {} for question {}: {}", choice.id, question, choice);
        }
        ManageCommand::DeleteQuestion { id } => {
            if store.delete_question(id).await? {
                println!("Deleted question {id}");
            } else {
                anyhow::bail!("Question {id} does not exist");
            }
        }
        ManageCommand::List => {
            let now = Utc::now();
            let mut questions = store.questions().await?;
            questions.sort_by_key(|question| question.id);
            for question in questions {
                let status = if question.is_published(now) { "published" } else { "scheduled" };
                println!("{} [{}] {} ({})", question.id, question.pub_date.to_rfc3339(), question, status);
                for choice in store.choices(question.id).await? {
                    println!("    {}: {} -- {} votes", choice.id, choice, choice.votes);
                }
            }
        }
    }
    Ok(())
}
