//! restnest-sync - Prepares Postman globals for RESTNEST workspace sync.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use restnest_sync::cli::output;
use restnest_sync::cli::{execute, Cli};
use restnest_sync::error::{ConfigError, ContextError, CredentialError, Error, WorkspaceError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("RESTNEST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("restnest_sync=debug")
        } else {
            EnvFilter::new("restnest_sync=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli) {
        let suggestion = match &e {
            Error::Context(ContextError::InvalidRepository { .. }) => {
                Some("run inside a fork of restnest-openapi-<domain> with an origin remote")
            }
            Error::Context(ContextError::InvalidTaskIdentifier { .. }) => {
                Some("switch to a feature branch or pass --gitFeatureOverride")
            }
            Error::Credential(CredentialError::MissingAdmin { .. }) => Some(
                "set postman-api-key-admin-local in restnest-secrets.postman_globals.json",
            ),
            Error::Credential(CredentialError::MissingCloudScope) => {
                Some("pass --cloudSecretId <project>")
            }
            Error::Workspace(WorkspaceError::Naming { .. }) => {
                Some("rename the repository to restnest-openapi-<domain>")
            }
            Error::Config(ConfigError::Parse(_)) => Some("fix restnest.toml"),
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
