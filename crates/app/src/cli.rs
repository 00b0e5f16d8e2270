use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use courier_domain::{Header, Headers, HttpMethod, StatusClass};
use courier_application::RequestComposer;

#[derive(Parser)]
#[command(name = "courier", version)]
#[command(about = "Courier - compose, send and replay HTTP requests")]
pub struct Cli {
    /// Use a custom data directory
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Environment ID to use for variable substitution
    #[arg(long, short, global = true, visible_alias = "env")]
    pub environment: Option<String>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send a request
    Send(SendArgs),

    /// Environment commands
    Env(EnvironmentArgs),

    /// Template commands
    Template(TemplateArgs),

    /// History commands
    History(HistoryArgs),
}

/// The editable fields of a request.
#[derive(Args, Debug, Clone)]
pub struct RequestArgs {
    /// HTTP method (GET, POST, PUT, PATCH, DELETE, HEAD, OPTIONS)
    pub method: HttpMethod,

    /// URL, may contain {{variables}}
    pub url: String,

    /// Header as "Key: value" (repeatable)
    #[arg(short = 'H', long = "header", value_name = "KEY: VALUE")]
    pub headers: Vec<Header>,

    /// JSON body, used for POST, PUT and PATCH
    #[arg(short = 'd', long = "data", value_name = "JSON")]
    pub body: Option<String>,
}

impl RequestArgs {
    /// Loads these fields into the composer, replacing what was there.
    pub fn apply(self, composer: &mut RequestComposer) {
        composer.set_method(self.method);
        composer.set_url(self.url);
        composer.set_headers(Headers::from_iter(self.headers));
        composer.set_body(self.body.unwrap_or_default());
    }
}

#[derive(Args)]
pub struct SendArgs {
    #[command(flatten)]
    pub request: RequestArgs,

    /// Print response headers
    #[arg(short, long)]
    pub include: bool,
}

#[derive(Args)]
pub struct EnvironmentArgs {
    #[command(subcommand)]
    pub command: EnvironmentCommands,
}

#[derive(Subcommand)]
pub enum EnvironmentCommands {
    /// List environments
    List,

    /// Show an environment as JSON
    Show {
        /// Environment ID
        environment_id: String,
    },

    /// Create an empty environment
    Add {
        /// Environment name
        name: String,
    },

    /// Rename an environment
    Rename {
        /// Environment ID
        environment_id: String,
        /// New name
        name: String,
    },

    /// Set a variable, adding it if missing
    Set {
        /// Environment ID
        environment_id: String,
        /// Variable name
        key: String,
        /// Variable value
        value: String,
    },

    /// Remove a variable
    Unset {
        /// Environment ID
        environment_id: String,
        /// Variable name
        key: String,
    },

    /// Delete an environment
    Delete {
        /// Environment ID
        environment_id: String,
    },

    /// Print an environment as shareable JSON
    Export {
        /// Environment ID
        environment_id: String,
    },
}

#[derive(Args)]
pub struct TemplateArgs {
    #[command(subcommand)]
    pub command: TemplateCommands,
}

#[derive(Subcommand)]
pub enum TemplateCommands {
    /// List templates, newest first
    List {
        /// Only templates whose name or URL contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Save a request as a template
    Save {
        /// Template name
        #[arg(short, long)]
        name: String,

        #[command(flatten)]
        request: RequestArgs,
    },

    /// Show a template as JSON
    Show {
        /// Template ID
        template_id: String,
    },

    /// Send a template
    Send {
        /// Template ID
        template_id: String,

        /// Print response headers
        #[arg(short, long)]
        include: bool,
    },

    /// Delete a template
    Delete {
        /// Template ID
        template_id: String,
    },
}

#[derive(Args)]
pub struct HistoryArgs {
    #[command(subcommand)]
    pub command: HistoryCommands,
}

#[derive(Subcommand)]
pub enum HistoryCommands {
    /// List sent requests, newest first
    List {
        /// Only entries whose URL contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Only entries with this status family
        #[arg(long, value_enum, default_value_t = StatusFilter::All)]
        status: StatusFilter,

        /// Only entries with this method
        #[arg(short, long)]
        method: Option<HttpMethod>,
    },

    /// List the methods present in history
    Methods,

    /// Show an entry as JSON
    Show {
        /// History entry ID
        entry_id: String,
    },

    /// Send an entry's request again
    Send {
        /// History entry ID
        entry_id: String,

        /// Print response headers
        #[arg(short, long)]
        include: bool,
    },

    /// Delete every entry
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusFilter {
    All,
    Success,
    Redirect,
    ClientError,
    ServerError,
}

impl StatusFilter {
    pub const fn status_class(self) -> Option<StatusClass> {
        match self {
            Self::All => None,
            Self::Success => Some(StatusClass::Success),
            Self::Redirect => Some(StatusClass::Redirect),
            Self::ClientError => Some(StatusClass::ClientError),
            Self::ServerError => Some(StatusClass::ServerError),
        }
    }
}
