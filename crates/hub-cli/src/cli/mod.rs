use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `linkhub` binary.
#[derive(Debug, Parser)]
#[command(
    name = "linkhub",
    version,
    about = "Link Hub - the shared warehouse link list"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::subcommands::{AuthCommands, ExportFormat};
    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "linkhub", "--format", "table", "--limit", "10", "--verbose", "facets",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.limit, Some(10));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Facets));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["linkhub", "facets", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["linkhub", "--format", "xml", "facets"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn list_filters_parse() {
        let cli = Cli::try_parse_from([
            "linkhub",
            "list",
            "--search",
            "stok",
            "--favorites",
            "--category",
            "Inbound",
            "--tag",
            "harian",
        ])
        .expect("cli should parse");

        let Commands::List(args) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.search.as_deref(), Some("stok"));
        assert!(args.favorites);
        assert_eq!(args.category.as_deref(), Some("Inbound"));
        assert_eq!(args.location, None);
        assert_eq!(args.tag.as_deref(), Some("harian"));
    }

    #[test]
    fn add_requires_title_and_url() {
        assert!(Cli::try_parse_from(["linkhub", "add", "--title", "Stok"]).is_err());
        assert!(
            Cli::try_parse_from(["linkhub", "add", "--title", "Stok", "--url", "https://x"])
                .is_ok()
        );
    }

    #[test]
    fn edit_keeps_unset_fields_as_none() {
        let cli = Cli::try_parse_from(["linkhub", "edit", "lnk-1", "--description", ""])
            .expect("cli should parse");
        let Commands::Edit(args) = cli.command else {
            panic!("expected edit");
        };
        assert_eq!(args.id, "lnk-1");
        assert_eq!(args.title, None);
        assert_eq!(args.description.as_deref(), Some(""));
    }

    #[test]
    fn export_format_and_out_parse() {
        let cli = Cli::try_parse_from(["linkhub", "export", "json", "--out", "/tmp/out"])
            .expect("cli should parse");
        let Commands::Export(args) = cli.command else {
            panic!("expected export");
        };
        assert_eq!(args.kind, ExportFormat::Json);
        assert_eq!(args.out, Some(std::path::PathBuf::from("/tmp/out")));
    }

    #[test]
    fn auth_verify_takes_email_and_code() {
        let cli = Cli::try_parse_from(["linkhub", "auth", "verify", "a@b.co", "123456"])
            .expect("cli should parse");
        let Commands::Auth {
            action: AuthCommands::Verify(args),
        } = cli.command
        else {
            panic!("expected auth verify");
        };
        assert_eq!(args.email, "a@b.co");
        assert_eq!(args.code, "123456");
    }

    #[test]
    fn delete_yes_flag() {
        let cli = Cli::try_parse_from(["linkhub", "delete", "lnk-1", "--yes"])
            .expect("cli should parse");
        assert!(matches!(cli.command, Commands::Delete(args) if args.yes));
    }
}
