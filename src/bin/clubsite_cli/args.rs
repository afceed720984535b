//! Command-line surface for `clubsite-cli`.

#![deny(clippy::all, clippy::pedantic)]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clubsite::application::binding::ResourceKind;
use clubsite::config::ClientOverrides;

#[derive(Parser, Debug)]
#[command(name = "clubsite-cli", version, about = "Club website REST client", long_about = None)]
pub struct Cli {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "CLUBSITE_CONFIG_FILE", value_name = "PATH", global = true)]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: ClientOverrides,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Public forum: categories, discussions, replies
    Forum(ForumArgs),
    /// Public blog
    Blog(BlogArgs),
    /// Administration (requires admin credentials)
    Admin(AdminArgs),
}

#[derive(Parser, Debug)]
pub struct ForumArgs {
    #[command(subcommand)]
    pub action: ForumCmd,
}

#[derive(Subcommand, Debug)]
pub enum ForumCmd {
    /// List forum categories
    Categories,
    /// List discussions, optionally restricted to one category
    List {
        #[arg(long, value_name = "ID")]
        category: Option<i64>,
    },
    /// Show one discussion with its replies
    Show { id: i64 },
    /// Start a discussion
    Post {
        #[arg(long)]
        title: String,
        #[arg(long, conflicts_with = "content_file")]
        content: Option<String>,
        #[arg(long, value_name = "PATH")]
        content_file: Option<PathBuf>,
        #[arg(long)]
        author: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long, value_name = "ID")]
        category: Option<i64>,
    },
    /// Reply to a discussion (when replies are enabled)
    Reply {
        post_id: i64,
        #[arg(long, conflicts_with = "content_file")]
        content: Option<String>,
        #[arg(long, value_name = "PATH")]
        content_file: Option<PathBuf>,
        #[arg(long)]
        author: String,
        #[arg(long)]
        email: Option<String>,
    },
}

#[derive(Parser, Debug)]
pub struct BlogArgs {
    #[command(subcommand)]
    pub action: BlogCmd,
}

#[derive(Subcommand, Debug)]
pub enum BlogCmd {
    /// List published posts
    List,
    /// Show one post
    Show { id: i64 },
}

#[derive(Args, Debug, Default, Clone)]
pub struct CredentialArgs {
    /// Admin username
    #[arg(long, env = "CLUBSITE_ADMIN_USERNAME", global = true)]
    pub username: Option<String>,

    /// Path to file containing the admin password (takes precedence over env)
    #[arg(long, env = "CLUBSITE_ADMIN_PASSWORD_FILE", value_name = "PATH", global = true)]
    pub password_file: Option<PathBuf>,

    /// Admin password from env; the flag stays out of help to keep it out of shell history
    #[arg(long = "password-env", hide = true, env = "CLUBSITE_ADMIN_PASSWORD")]
    pub password_env: Option<String>,
}

#[derive(Parser, Debug)]
pub struct AdminArgs {
    #[command(flatten)]
    pub credentials: CredentialArgs,

    #[command(subcommand)]
    pub action: AdminCmd,
}

#[derive(Subcommand, Debug)]
pub enum AdminCmd {
    /// Check the backend session without logging in
    Check,
    /// Verify the admin credentials
    LoginTest,
    /// Change the admin password
    ChangePassword {
        /// File holding the new password
        #[arg(long, value_name = "PATH")]
        new_password_file: PathBuf,
    },
    /// Populate the backend with sample data (not safe to repeat)
    Seed {
        #[arg(long)]
        yes: bool,
    },
    Achievements(ResourceArgs),
    Initiatives(ResourceArgs),
    Workshops(ResourceArgs),
    Alumni(ResourceArgs),
    Projects(ResourceArgs),
    /// Blog posts, drafts included
    Blog(ResourceArgs),
    /// Forum moderation
    Forum(ModerationArgs),
}

impl AdminCmd {
    pub fn resource(&self) -> Option<ResourceKind> {
        match self {
            AdminCmd::Achievements(_) => Some(ResourceKind::Achievements),
            AdminCmd::Initiatives(_) => Some(ResourceKind::Initiatives),
            AdminCmd::Workshops(_) => Some(ResourceKind::Workshops),
            AdminCmd::Alumni(_) => Some(ResourceKind::Alumni),
            AdminCmd::Projects(_) => Some(ResourceKind::Projects),
            AdminCmd::Blog(_) => Some(ResourceKind::Blog),
            _ => None,
        }
    }
}

#[derive(Parser, Debug)]
pub struct ResourceArgs {
    #[command(subcommand)]
    pub action: ResourceCmd,
}

#[derive(Subcommand, Debug)]
pub enum ResourceCmd {
    /// List items
    List {
        /// Print the raw records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the form fields
    Schema,
    /// Create an item from `--set name=value` assignments
    Create {
        #[arg(long = "set", value_name = "NAME=VALUE")]
        set: Vec<String>,
    },
    /// Update an item; unassigned fields keep their current values
    Update {
        id: i64,
        #[arg(long = "set", value_name = "NAME=VALUE")]
        set: Vec<String>,
    },
    /// Delete an item
    Delete {
        id: i64,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Parser, Debug)]
pub struct ModerationArgs {
    #[command(subcommand)]
    pub action: ModerationCmd,
}

#[derive(Subcommand, Debug)]
pub enum ModerationCmd {
    /// List every discussion
    List,
    /// Delete a discussion and all of its replies
    DeletePost {
        id: i64,
        #[arg(long)]
        yes: bool,
    },
    /// Delete a single reply
    DeleteReply {
        id: i64,
        #[arg(long)]
        yes: bool,
    },
    /// Create a forum category
    AddCategory {
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        order: Option<i64>,
    },
}
