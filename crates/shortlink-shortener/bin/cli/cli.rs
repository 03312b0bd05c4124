use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const SITE_ENV: &str = "SHORTLINK_SITE";
pub const SOURCE_ENV: &str = "SHORTLINK_SOURCE";
pub const METHOD_ENV: &str = "SHORTLINK_METHOD";
pub const SHORTURL_ENV: &str = "SHORTLINK_SHORTURL";
pub const CACHE_FOLDER_ENV: &str = "SHORTLINK_CACHE_FOLDER";

pub const DEFAULT_SITE: &str = "site.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[value(name = "text")]
    Text,
    #[value(name = "json")]
    Json,
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "shortlink", about = "Assign stable short URLs to the pages of a site")]
pub struct CLI {
    /// Site manifest: `url`, `pages`, `collections` and a `[shortener]` table.
    #[arg(long, env = SITE_ENV, default_value = DEFAULT_SITE)]
    pub site: PathBuf,

    /// Directory relative cache folders are resolved against.
    /// Defaults to the directory holding the manifest.
    #[arg(long, env = SOURCE_ENV)]
    pub source: Option<PathBuf>,

    /// Overrides `shortener.method`.
    #[arg(long, env = METHOD_ENV)]
    pub method: Option<String>,

    /// Overrides `shortener.shorturl`.
    #[arg(long, env = SHORTURL_ENV)]
    pub shorturl: Option<String>,

    /// Overrides `shortener.cache_folder`.
    #[arg(long, env = CACHE_FOLDER_ENV)]
    pub cache_folder: Option<PathBuf>,

    /// Registers an external provider as `id=command args...`; the page URL
    /// is appended to the arguments. May be repeated.
    #[arg(long = "provider", value_name = "ID=COMMAND")]
    pub providers: Vec<String>,

    /// Enables `shortener.debug`.
    #[arg(long)]
    pub debug: bool,

    /// Reads the cache but never writes it.
    #[arg(long)]
    pub dry_run: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}
