use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, info, warn};

use crate::application::RuntimeConfig;
use crate::application::shell::Shell;
use crate::cli::Cli;
use crate::commands::Session;
use crate::config::{ShellConfig, ShellConfigError};
use crate::filesystem::{SCHEMA_VERSION, SnapshotError, VirtualFileTree};
use crate::persistence::{MigrationError, SnapshotStore, StoreError, default_tree, upgrade};

pub struct Application;

impl Application {
    pub async fn run(cli: Cli) -> Result<(), ApplicationError> {
        let shell_config = ShellConfig::read(&cli.config)
            .await
            .context(ConfigSnafu)?
            .with_overrides(cli.user.clone(), cli.state_file.clone())
            .context(ConfigSnafu)?;
        debug!("Loaded config: {:?}", shell_config);

        let runtime_config = RuntimeConfig::new(shell_config, cli);
        let store = runtime_config.state_file.as_ref().map(SnapshotStore::new);

        let tree = load_tree(store.as_ref(), &runtime_config.user).await?;
        let session = Session::new(tree, runtime_config.user.as_str());
        let mut shell = Shell::new(session, store, runtime_config.autosave);

        if runtime_config.is_interactive() {
            shell.interactive().await?;
        } else {
            shell.run_lines(&runtime_config.commands).await;
        }

        shell.finish().await
    }
}

/// Restores the saved tree, migrating and re-saving older snapshots.
///
/// Without a store, or when nothing was saved yet, the default tree is used.
/// A snapshot that cannot be decoded is discarded with a warning; one from a
/// newer schema stops the program so it is not overwritten.
pub async fn load_tree(
    store: Option<&SnapshotStore>,
    user: &str,
) -> Result<VirtualFileTree, ApplicationError> {
    let Some(store) = store else {
        debug!("Persistence disabled, starting from the default file system");
        return default_tree(user).context(SeedSnafu);
    };

    let snapshot = match store.load().await {
        Ok(Some(snapshot)) => snapshot,
        Ok(None) => return default_tree(user).context(SeedSnafu),
        Err(err @ StoreError::ReadError { .. }) => return Err(err).context(LoadSnafu),
        Err(err) => {
            warn!(
                "Discarding unreadable saved file system: {}",
                snafu::Report::from_error(err)
            );
            return default_tree(user).context(SeedSnafu);
        }
    };

    let version = snapshot.version;
    let tree = match upgrade(snapshot, user) {
        Ok(tree) => tree,
        Err(err @ MigrationError::InvalidSnapshot { .. }) => {
            warn!(
                "Discarding malformed saved file system: {}",
                snafu::Report::from_error(err)
            );
            return default_tree(user).context(SeedSnafu);
        }
        Err(err) => return Err(err).context(MigrationSnafu),
    };

    if version < SCHEMA_VERSION {
        store.save(&tree.snapshot()).await.context(SaveSnafu)?;
        info!("Saved migrated file system to {}", store.path().display());
    }

    Ok(tree)
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(super)))]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered during configuration stage"))]
    ConfigError { source: ShellConfigError },
    #[snafu(display("Failed to load the saved file system"))]
    LoadError { source: StoreError },
    #[snafu(display("Failed to upgrade the saved file system"))]
    MigrationError { source: MigrationError },
    #[snafu(display("Failed to build the default file system"))]
    SeedError { source: SnapshotError },
    #[snafu(display("Failed to save the file system"))]
    SaveError { source: StoreError },
    #[snafu(display("Failed to talk to the terminal"))]
    TerminalError { source: std::io::Error },
}
