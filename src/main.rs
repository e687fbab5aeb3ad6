//! Command line entry point.

use std::path::{
    Path,
    PathBuf,
};
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{
    Args,
    CommandFactory,
    Parser,
    Subcommand,
};
use plan_i18n::config::{
    ConfigError,
    ConfigManager,
};
use plan_i18n::input::ContentError;
use plan_i18n::messages::MessageResolver;
use plan_i18n::path::LocalePathBuilder;
use plan_i18n::translate::LookupError;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

/// Resolve localized plan content from the command line.
#[derive(Parser, Debug)]
#[command(
    name = "plan-i18n",
    version,
    about = "Resolve localized business plan content",
    args_conflicts_with_subcommands = true,
    subcommand_negates_reqs = true
)]
struct Cli {
    /// Optional subcommand; without one the merged messages are printed.
    #[command(subcommand)]
    command: Option<Command>,

    /// Arguments of the default messages command.
    #[command(flatten)]
    messages: MessagesArgs,
}

/// `plan-i18n <content-root> <locale> [key]`
#[derive(Args, Debug)]
struct MessagesArgs {
    /// Directory holding `.plan-i18n.json` and the content files
    #[arg(required = true)]
    content_root: Option<PathBuf>,

    /// Locale to resolve; unsupported codes fall back to the default locale
    #[arg(required = true)]
    locale: Option<String>,

    /// Dotted key to print instead of the whole tree
    key: Option<String>,
}

/// Subcommands besides the default messages command.
#[derive(Subcommand, Debug)]
enum Command {
    /// Print the locale-prefixed URL path
    Path {
        /// Locale of the page
        locale: String,

        /// Unprefixed path, e.g. `/chapters/1`
        path: String,

        /// Directory whose `.plan-i18n.json` names the default locale
        #[arg(long, default_value = ".")]
        content_root: PathBuf,
    },
}

/// Failures reported to the user before exiting with status 1.
#[derive(Debug, thiserror::Error)]
enum CliError {
    /// Settings could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Content files could not be loaded.
    #[error(transparent)]
    Content(#[from] ContentError),

    /// The requested key does not exist.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// The selected value could not be serialized.
    #[error("Failed to render JSON: {0}")]
    Render(#[from] serde_json::Error),
}

/// Parses arguments, runs the command and maps failures to exit status 1.
#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Some(Command::Path { locale, path, content_root }) => {
            print_path(&content_root, &locale, &path)
        }
        None => {
            let MessagesArgs { content_root: Some(root), locale: Some(locale), key } = cli.messages
            else {
                Cli::command()
                    .error(ErrorKind::MissingRequiredArgument, "<CONTENT_ROOT> <LOCALE> are required")
                    .exit();
            };
            print_messages(root, &locale, key.as_deref()).await
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Prints the path of `path` for `locale` under the site's default locale.
#[allow(clippy::print_stdout)]
fn print_path(content_root: &Path, locale: &str, path: &str) -> Result<(), CliError> {
    let mut config_manager = ConfigManager::new();
    config_manager.load_settings(Some(content_root))?;

    println!("{}", LocalePathBuilder::new(config_manager.locale_set()).build(locale, path));
    Ok(())
}

/// Prints the merged tree of `locale`, or the value at `key`.
#[allow(clippy::print_stdout)]
async fn print_messages(
    content_root: PathBuf,
    locale: &str,
    key: Option<&str>,
) -> Result<(), CliError> {
    let mut config_manager = ConfigManager::new();
    config_manager.load_settings(Some(&content_root))?;
    let settings = config_manager.get_settings().clone();
    let separator = settings.key_separator.clone();

    let resolver = MessageResolver::new(settings, content_root);
    let messages = resolver.get_messages(locale).await?;

    let value = match key {
        Some(key) => messages.translator(&separator).lookup(key)?,
        None => messages.tree(),
    };

    match value {
        Value::String(text) => println!("{text}"),
        other => println!("{}", serde_json::to_string_pretty(other)?),
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn parses_default_messages_arguments() {
        let cli = Cli::try_parse_from(["plan-i18n", "./site", "en", "nav.home"]).unwrap();

        assert!(cli.command.is_none());
        assert_eq!(cli.messages.content_root, Some(PathBuf::from("./site")));
        assert_eq!(cli.messages.locale.as_deref(), Some("en"));
        assert_eq!(cli.messages.key.as_deref(), Some("nav.home"));
    }

    #[rstest]
    fn parses_path_subcommand() {
        let cli = Cli::try_parse_from(["plan-i18n", "path", "en", "/chapters/1"]).unwrap();

        let Some(Command::Path { locale, path, content_root }) = cli.command else {
            panic!("expected the path subcommand");
        };
        assert_eq!(locale, "en");
        assert_eq!(path, "/chapters/1");
        assert_eq!(content_root, PathBuf::from("."));
    }

    #[rstest]
    fn path_subcommand_takes_content_root_option() {
        let cli = Cli::try_parse_from([
            "plan-i18n",
            "path",
            "de",
            "/",
            "--content-root",
            "./site",
        ])
        .unwrap();

        assert!(matches!(
            cli.command,
            Some(Command::Path { content_root, .. }) if content_root == Path::new("./site")
        ));
    }

    #[rstest]
    #[case::nothing(&["plan-i18n"])]
    #[case::locale_missing(&["plan-i18n", "./site"])]
    fn rejects_missing_messages_arguments(#[case] args: &[&str]) {
        let err = Cli::try_parse_from(args).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[rstest]
    fn rejects_unknown_flag() {
        assert!(Cli::try_parse_from(["plan-i18n", "--bogus"]).is_err());
    }
}
