//! CLI for formfill.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use formfill_core::catalog::SemanticField;
use formfill_core::config::{self, FormfillConfig};
use formfill_core::store::FileStore;
use std::path::PathBuf;

use commands::{
    run_completions, run_detect, run_fields, run_fill, run_man, run_profile, run_resolve,
    run_toggle, run_watch,
};

/// Top-level CLI for formfill.
#[derive(Debug, Parser)]
#[command(name = "formfill")]
#[command(about = "formfill: auto-fill job application forms from a saved profile", long_about = None)]
pub struct Cli {
    /// Profile store file (overrides `profile_path` in config.toml).
    #[arg(long, global = true, value_name = "PATH")]
    pub profile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Auto-fill every form in a page snapshot from the saved profile.
    Fill {
        /// Page snapshot JSON.
        page: PathBuf,
        /// Write the filled snapshot here.
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
    },

    /// Show which control a profile field resolves to in each form.
    Resolve {
        /// Page snapshot JSON.
        page: PathBuf,
        /// Field key, e.g. firstName or zipCode.
        field: SemanticField,
    },

    /// Run form detection on a snapshot and print the session state.
    Detect {
        /// Page snapshot JSON.
        page: PathBuf,
    },

    /// Re-scan a snapshot file on the rescan schedule until stopped.
    Watch {
        /// Page snapshot JSON; rewritten by the page side as it changes.
        page: PathBuf,
        /// Stop after N scans.
        #[arg(long, value_name = "N")]
        max_scans: Option<usize>,
    },

    /// List profile fields and the tokens used to find them.
    Fields,

    /// Manage the saved profile.
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Turn auto-fill and form monitoring on.
    Enable,

    /// Turn auto-fill and form monitoring off.
    Disable,

    /// Print shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },

    /// Print the man page.
    Man,
}

#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// Write the empty profile structure if nothing is saved yet.
    Init,
    /// Print the saved profile as JSON.
    Show,
    /// Set one profile field (first education/experience entry for list groups).
    Set {
        /// Field key, e.g. firstName or zipCode.
        field: SemanticField,
        /// New value.
        value: String,
    },
    /// Export the saved profile to a JSON file.
    Export {
        /// Destination file.
        path: PathBuf,
    },
    /// Import a profile JSON file (as written by export).
    Import {
        /// Source file.
        path: PathBuf,
    },
}

/// Store from `--profile`, else config, else the XDG default.
fn open_store(flag: Option<PathBuf>, cfg: &FormfillConfig) -> Result<FileStore> {
    match flag.or_else(|| cfg.profile_path.clone()) {
        Some(path) => Ok(FileStore::open(path)),
        None => FileStore::open_default(),
    }
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        // Generated output needs neither config nor store.
        match &cli.command {
            CliCommand::Completions { shell } => return run_completions(*shell),
            CliCommand::Man => return run_man(),
            CliCommand::Fields => return run_fields(),
            CliCommand::Resolve { page, field } => return run_resolve(page, *field),
            _ => {}
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let mut store = open_store(cli.profile, &cfg)?;
        tracing::debug!(path = %store.path().display(), "profile store");

        match cli.command {
            CliCommand::Fill { page, out } => run_fill(store, &cfg, &page, out.as_deref())?,
            CliCommand::Detect { page } => run_detect(store, &cfg, &page)?,
            CliCommand::Watch { page, max_scans } => run_watch(store, &cfg, page, max_scans).await?,
            CliCommand::Profile { action } => run_profile(&mut store, action)?,
            CliCommand::Enable => run_toggle(&mut store, true)?,
            CliCommand::Disable => run_toggle(&mut store, false)?,
            CliCommand::Completions { .. }
            | CliCommand::Man
            | CliCommand::Fields
            | CliCommand::Resolve { .. } => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
