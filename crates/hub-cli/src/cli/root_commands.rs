use std::path::PathBuf;

use clap::{Args, Subcommand};

use super::subcommands::{AuthCommands, ExportFormat};

/// Top-level commands.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Sign in, sign out, and inspect the current session.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// List links, optionally filtered.
    List(ListArgs),
    /// Show the distinct categories, locations and tags.
    Facets,
    /// Add a link (admin).
    Add(AddArgs),
    /// Edit a link; omitted fields keep their current values (admin).
    Edit(EditArgs),
    /// Toggle the favorite flag of a link.
    Favorite(IdArgs),
    /// Delete a link (admin).
    Delete(DeleteArgs),
    /// Open a link in the browser and count the click.
    Open(IdArgs),
    /// Print the url to share for a link.
    Share(IdArgs),
    /// Import links from a CSV file (admin).
    Import(ImportArgs),
    /// Export the full list as CSV or JSON (admin).
    Export(ExportArgs),
}

#[derive(Clone, Debug, Default, Args)]
pub struct ListArgs {
    /// Free-text search over title, url, description, category, location and tags.
    #[arg(short, long)]
    pub search: Option<String>,
    /// Only favorites.
    #[arg(long)]
    pub favorites: bool,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub tag: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub url: String,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    /// Comma-separated tags.
    #[arg(long)]
    pub tags: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct EditArgs {
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub url: Option<String>,
    /// Pass an empty string to clear.
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    /// Comma-separated tags; replaces the current list.
    #[arg(long)]
    pub tags: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct IdArgs {
    pub id: String,
}

#[derive(Clone, Debug, Args)]
pub struct DeleteArgs {
    pub id: String,
    /// Skip the confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ImportArgs {
    /// CSV file with a header row.
    pub file: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct ExportArgs {
    #[arg(value_enum, value_name = "FORMAT")]
    pub kind: ExportFormat,
    /// Directory to write into (defaults to `general.export_dir`).
    #[arg(long)]
    pub out: Option<PathBuf>,
}
