use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `kbw` binary.
#[derive(Debug, Parser)]
#[command(
    name = "kbw",
    version,
    about = "Knowledge workbench - datapoints, regex filtering and ontology triples"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
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
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use kb_core::enums::OntologyKind;
    use pretty_assertions::assert_eq;

    use super::{Cli, Commands, OutputFormat};
    use crate::cli::subcommands::{FilesCommands, RegexCommands, TripleCommands};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["kbw", "--format", "raw", "--verbose", "status"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Status));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["kbw", "datapoints", "--quiet"]).expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Datapoints));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["kbw", "--format", "xml", "status"]).is_err());
    }

    #[test]
    fn files_upload_takes_many_paths() {
        let cli = Cli::try_parse_from(["kbw", "files", "upload", "a.csv", "b.xlsx"])
            .expect("cli should parse");
        let Commands::Files { action: FilesCommands::Upload { paths } } = cli.command else {
            panic!("expected files upload");
        };
        assert_eq!(paths.len(), 2);
    }

    #[test]
    fn files_column_allows_clearing() {
        let cli = Cli::try_parse_from(["kbw", "files", "column", "fil-1", ""])
            .expect("cli should parse");
        let Commands::Files { action: FilesCommands::Column { id, column } } = cli.command else {
            panic!("expected files column");
        };
        assert_eq!((id.as_str(), column.as_str()), ("fil-1", ""));
    }

    #[test]
    fn regex_set_accepts_leading_caret() {
        let cli = Cli::try_parse_from(["kbw", "regex", "set", "^temp_"]).expect("cli should parse");
        let Commands::Regex { action: RegexCommands::Set { pattern } } = cli.command else {
            panic!("expected regex set");
        };
        assert_eq!(pattern, "^temp_");
    }

    #[test]
    fn search_parses_kind_query_and_page() {
        let cli = Cli::try_parse_from(["kbw", "search", "properties", "has", "--page", "3"])
            .expect("cli should parse");
        let Commands::Search(args) = cli.command else {
            panic!("expected search");
        };
        assert_eq!(args.kind, OntologyKind::Properties);
        assert_eq!(args.query.as_deref(), Some("has"));
        assert_eq!(args.page, 3);
    }

    #[test]
    fn search_rejects_unknown_kind() {
        assert!(Cli::try_parse_from(["kbw", "search", "widgets"]).is_err());
    }

    #[test]
    fn triple_field_takes_value_or_search() {
        let cli = Cli::try_parse_from(["kbw", "triple", "subject", "Pump1"])
            .expect("cli should parse");
        let Commands::Triple { action: TripleCommands::Subject(args) } = cli.command else {
            panic!("expected triple subject");
        };
        assert_eq!(args.value.as_deref(), Some("Pump1"));

        let cli = Cli::try_parse_from(["kbw", "triple", "object", "--search", "sens", "--pick", "2"])
            .expect("cli should parse");
        let Commands::Triple { action: TripleCommands::Object(args) } = cli.command else {
            panic!("expected triple object");
        };
        assert_eq!(args.search.as_deref(), Some("sens"));
        assert_eq!(args.pick, 2);

        assert!(
            Cli::try_parse_from(["kbw", "triple", "subject", "A", "--search", "x"]).is_err(),
            "value and search conflict"
        );
    }
}
