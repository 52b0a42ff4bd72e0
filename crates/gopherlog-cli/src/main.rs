use anyhow::{Context, Result};
use clap::Parser;
use gopherlog_config::Config;
use gopherlog_engine::{
    FootnoteTargets, TemplateRenderer, build_phlog, render::RenderError, sync_repository,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gopherlog")]
#[command(version, about = "Render a kitchen log repository as monthly phlog pages", long_about = None)]
struct Cli {
    /// Config file (default: ~/.config/gopherlog/config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory for checking out the log repository
    #[arg(short, long, value_name = "DIR")]
    repo_dir: Option<PathBuf>,

    /// Directory for the generated gopher content
    #[arg(short, long, value_name = "DIR")]
    gopher_dir: Option<PathBuf>,

    /// URL of the log repository
    #[arg(short = 'u', long, value_name = "URL")]
    repo_url: Option<String>,

    /// Base URL of the raw image files
    #[arg(short, long, value_name = "URL")]
    image_url: Option<String>,

    /// Template for the month pages
    #[arg(short, long, value_name = "FILE")]
    template: Option<PathBuf>,

    /// Wiki page script for namespace links
    #[arg(long, value_name = "URL")]
    wiki_url: Option<String>,

    /// Gopher host written into link lines
    #[arg(long)]
    host: Option<String>,

    /// Gopher port written into link lines
    #[arg(long)]
    port: Option<u16>,

    /// Use the existing checkout without fetching
    #[arg(long)]
    no_sync: bool,
}

impl Cli {
    /// Command-line values take precedence over the config file.
    fn apply(self, mut config: Config) -> Config {
        if let Some(dir) = self.repo_dir {
            config.repo_path = dir;
        }
        if let Some(dir) = self.gopher_dir {
            config.gopher_path = dir;
        }
        if let Some(url) = self.repo_url {
            config.repo_url = url;
        }
        if let Some(url) = self.image_url {
            config.media_url = url;
        }
        if let Some(template) = self.template {
            config.template_path = Some(template);
        }
        if let Some(url) = self.wiki_url {
            config.wiki_url = url;
        }
        if let Some(host) = self.host {
            config.gopher_host = host;
        }
        if let Some(port) = self.port {
            config.gopher_port = port;
        }
        if self.no_sync {
            config.sync = false;
        }
        config
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load_from_path(path)?
            .with_context(|| format!("Config file {} not found", path.display()))?,
        None => Config::load()?.unwrap_or_default(),
    };
    Ok(config)
}

fn renderer_for(config: &Config) -> Result<TemplateRenderer, RenderError> {
    match &config.template_path {
        Some(path) => TemplateRenderer::from_path(path),
        None => TemplateRenderer::bundled(),
    }
}

fn run(config: &Config) -> Result<()> {
    if config.sync {
        log::info!("Getting repository");
        sync_repository(&config.repo_path, &config.repo_url).context("Error getting repo")?;
    }

    let renderer = renderer_for(config).context("Error loading template")?;
    let targets = FootnoteTargets {
        wiki_url: config.wiki_url.clone(),
        media_url: config.media_url.clone(),
        host: config.gopher_host.clone(),
        port: config.gopher_port,
    };

    log::info!("Writing gopher pages to {}", config.gopher_path.display());
    let written = build_phlog(
        &config.repo_path,
        &config.gopher_path,
        &renderer,
        &targets,
    )
    .context("Error creating gopher files")?;

    log::info!("Done, {} pages written", written.len());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    let config = cli.apply(config);

    run(&config)
}
