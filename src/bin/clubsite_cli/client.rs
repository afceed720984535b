#![deny(clippy::all, clippy::pedantic)]

use std::fmt;
use std::fs;
use std::sync::Arc;

use clubsite::application::auth::{AuthError, AuthGate};
use clubsite::application::binding::{ResourceBinding, ResourceKind};
use clubsite::application::blog::PublicBlog;
use clubsite::application::crud::CrudController;
use clubsite::application::error::AppError;
use clubsite::application::forum::{ForumBoard, ForumModeration, ForumThread};
use clubsite::application::shell::AdminShell;
use clubsite::config::{self, LoadError, Settings};
use clubsite::infra::error::InfraError;
use clubsite::infra::http::RestClient;
use thiserror::Error;

use crate::args::{Cli, CredentialArgs};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("admin username is required (use --username or CLUBSITE_ADMIN_USERNAME)")]
    MissingUsername,
    #[error("admin password is required (use --password-file or CLUBSITE_ADMIN_PASSWORD)")]
    MissingPassword,
    #[error("failed to read password file: {0}")]
    PasswordFile(std::io::Error),
    #[error("failed to read input file {path}: {source}")]
    InputFile {
        path: String,
        source: std::io::Error,
    },
    #[error("configuration error: {0}")]
    Config(#[from] LoadError),
    #[error("client setup failed: {0}")]
    Infra(#[from] InfraError),
    #[error("{}", .0.presentation_message())]
    App(#[from] AppError),
    #[error("session is not authenticated; log in again")]
    LoginRequired,
    #[error("replies are disabled (set forum.replies_enabled)")]
    RepliesDisabled,
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },
    #[error("backend unavailable")]
    Unavailable,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to render output: {0}")]
    Output(String),
}

impl From<AuthError> for CliError {
    fn from(err: AuthError) -> Self {
        Self::App(AppError::Auth(err))
    }
}

#[derive(Clone, Debug)]
pub struct Ctx {
    pub settings: Settings,
    pub rest: RestClient,
}

impl Ctx {
    pub fn new(settings: Settings) -> Result<Self, CliError> {
        let rest = RestClient::new(&settings.api)?;
        Ok(Self { settings, rest })
    }

    pub fn forum_board(&self) -> ForumBoard {
        ForumBoard::new(Arc::new(self.rest.clone()))
    }

    pub fn forum_thread(&self) -> ForumThread {
        ForumThread::new(Arc::new(self.rest.clone()))
    }

    pub fn blog(&self) -> PublicBlog {
        PublicBlog::new(Arc::new(self.rest.clone()))
    }

    /// Every part of the shell shares one cookie jar.
    pub fn admin_shell(&self) -> Result<AdminShell, CliError> {
        let backend = Arc::new(self.rest.clone());
        let controllers = ResourceKind::ALL
            .into_iter()
            .map(|kind| {
                ResourceBinding::new(kind, Arc::new(self.rest.resource(kind)))
                    .map(CrudController::new)
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(AppError::from)?;
        Ok(AdminShell::new(
            AuthGate::new(backend.clone()),
            controllers,
            ForumModeration::new(backend.clone()),
            backend,
        ))
    }
}

pub fn build_ctx_from_cli(cli: &Cli) -> Result<Ctx, CliError> {
    let settings = config::load(cli.config_file.as_deref(), &cli.overrides)?;
    Ctx::new(settings)
}

/// Held in memory for one invocation only.
pub struct Credentials {
    pub username: String,
    password: String,
}

impl Credentials {
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

pub fn resolve_credentials(args: &CredentialArgs) -> Result<Credentials, CliError> {
    let username = args
        .username
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or(CliError::MissingUsername)?
        .to_string();

    let password = if let Some(path) = &args.password_file {
        fs::read_to_string(path)
            .map_err(CliError::PasswordFile)?
            .trim_end_matches(['\r', '\n'])
            .to_string()
    } else {
        args.password_env.clone().ok_or(CliError::MissingPassword)?
    };
    if password.is_empty() {
        return Err(CliError::MissingPassword);
    }

    Ok(Credentials { username, password })
}
