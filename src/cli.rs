// src/cli.rs
use chrono::{DateTime, Duration, Utc};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "polls")]
#[command(about = "Poll questions, choices and votes")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Run the web server (default)
    Serve,
    #[command(flatten)]
    Manage(ManageCommand),
}

/// Commands that edit the poll database directly.
#[derive(Subcommand, Debug, PartialEq)]
pub enum ManageCommand {
    /// Create a question
    AddQuestion {
        #[arg(long)]
        text: String,
        /// Publish this many days from now; negative values backdate
        #[arg(long, allow_negative_numbers = true, conflicts_with = "pub_date")]
        days: Option<i64>,
        /// Exact publication time, RFC 3339
        #[arg(long)]
        pub_date: Option<DateTime<Utc>>,
    },
    /// Add a choice to an existing question
    AddChoice {
        #[arg(long)]
        question: i64,
        #[arg(long)]
        text: String,
        #[arg(long, default_value_t = 0)]
        votes: i32,
    },
    /// Delete a question together with its choices
    DeleteQuestion { id: i64 },
    /// Print every question, including unpublished ones
    List,
}

/// Publication time for `add-question`, defaulting to `now`.
pub fn resolve_pub_date(days: Option<i64>, pub_date: Option<DateTime<Utc>>, now: DateTime<Utc>) -> DateTime<Utc> {
    match (pub_date, days) {
        (Some(at), _) => at,
        (None, Some(days)) => now + Duration::days(days),
        (None, None) => now,
    }
}
