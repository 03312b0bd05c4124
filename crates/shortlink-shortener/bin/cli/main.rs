mod cli;
mod manifest;

use crate::cli::{OutputFormat, CLI};
use crate::manifest::Manifest;
use anyhow::Result;
use clap::Parser;
use shortlink_cache::{ReadOnlyStore, YamlFileStore};
use shortlink_generator::{CommandProvider, ProviderRegistry};
use shortlink_shortener::{generate, generate_with, RunReport};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = CLI::parse();

    let (mut site, mut config) = Manifest::load(&cli.site)?.into_parts();
    if let Some(method) = cli.method {
        config.method = Some(method);
    }
    if let Some(shorturl) = cli.shorturl {
        config.shorturl = Some(shorturl);
    }
    if let Some(cache_folder) = cli.cache_folder {
        config.cache_folder = cache_folder;
    }
    config.debug |= cli.debug;

    let mut registry = ProviderRegistry::new();
    for definition in &cli.providers {
        registry.register(CommandProvider::parse(definition)?);
    }

    let source_dir = cli.source.unwrap_or_else(|| manifest_dir(&cli.site));

    debug!(
        site = %cli.site.display(),
        source = %source_dir.display(),
        dry_run = cli.dry_run,
        format = %cli.format,
        "starting shortlink run"
    );

    let report = if cli.dry_run {
        generate_with(&config, &mut site, &registry, &source_dir, |settings| {
            ReadOnlyStore::new(YamlFileStore::new(&settings.cache_dir))
        })?
    } else {
        generate(&config, &mut site, &registry, &source_dir)?
    };

    print_report(&report, cli.format)
}

fn manifest_dir(site: &Path) -> PathBuf {
    site.parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn print_report(report: &RunReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for (key, url) in report.assigned() {
                println!("{key}\t{url}");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report.outputs())?);
        }
    }
    Ok(())
}
