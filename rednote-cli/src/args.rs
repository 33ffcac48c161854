use clap::{Args, Parser, Subcommand};
use rednote_api::AtUser;
use std::path::PathBuf;

fn parse_at_user(value: &str) -> Result<AtUser, String> {
    let (user_id, nickname) = value
        .split_once('=')
        .ok_or_else(|| format!("expected <USER_ID>=<NICKNAME>, got `{value}`"))?;

    if user_id.is_empty() || nickname.is_empty() {
        return Err(format!("user ID and nickname must not be empty, got `{value}`"));
    }

    Ok(AtUser {
        user_id: user_id.to_owned(),
        nickname: nickname.to_owned(),
    })
}

#[derive(Args)]
pub struct PostCommentArgs {
    /// ID of the note to comment on
    #[arg(long)]
    pub note_id: String,

    /// Text of the comment
    #[arg(long)]
    pub content: String,

    /// Mention a user (`<USER_ID>=<NICKNAME>`), can be repeated
    #[arg(long = "at-user", value_parser = parse_at_user)]
    pub at_users: Vec<AtUser>,
}

#[derive(Subcommand)]
pub enum CommentSubcommand {
    /// Post a comment to a note
    Post(PostCommentArgs),
}

#[derive(Subcommand)]
pub enum CookieSubcommand {
    /// Print the cookie list the signer gets to see
    Inspect,
}

#[derive(Subcommand)]
pub enum AppSubcommand {
    /// Interact with the comments of a note
    #[clap(subcommand)]
    Comment(CommentSubcommand),

    /// Debug the session cookie read from `REDNOTE_COOKIE`
    #[clap(subcommand)]
    Cookie(CookieSubcommand),
}

/// CLI for the RedNote web API
#[derive(Parser)]
#[command(about, author, version)]
pub struct App {
    /// Path to the TOML configuration file
    #[arg(long, short, global = true, env = "REDNOTE_CONFIG")]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub subcommand: AppSubcommand,
}
