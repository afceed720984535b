use clap::{Args, builder::BoolishValueParser};

/// Per-invocation setting overrides; these beat both files and environment.
#[derive(Debug, Args, Default, Clone)]
pub struct ClientOverrides {
    /// Override the REST API base URL, e.g. <http://localhost:5000/api>.
    #[arg(long = "api-url", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Override the per-request timeout.
    #[arg(long = "api-timeout-seconds", value_name = "SECONDS", global = true)]
    pub api_timeout_seconds: Option<u64>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,

    /// Expose forum reply submission.
    #[arg(
        long = "forum-replies-enabled",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub forum_replies_enabled: Option<bool>,
}
