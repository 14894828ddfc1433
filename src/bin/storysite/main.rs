use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use spdlog::{error, info, warn};

use storysite::build::story_site::build_story_site;
use storysite::build::post_site::build_post_site;
use storysite::build::{build_all, BuildSummary};
use storysite::config::Config;
use storysite::logger::configure_logger;

use crate::config::open_config;

mod config;

const CFG_FILE_NAME: &str = "storysite.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Index and category pages from the stories folder, story files wrapped in place
    Stories,
    /// Post pages, index and label pages from the posts folder, plus the JSON dump
    Posts,
    /// Stories, then posts
    All,
}

fn log_summary(mode: &str, summary: &BuildSummary) {
    info!("{}: {} records, {} listing pages, {} article pages, {} skipped",
        mode,
        summary.records,
        summary.listing_pages.len(),
        summary.article_pages.len(),
        summary.skipped_articles.len());
}

fn run(config: &Config, command: &Command) -> Result<()> {
    match command {
        Command::Stories => log_summary("Stories", &build_story_site(config)?),
        Command::Posts => log_summary("Posts", &build_post_site(config)?),
        Command::All => {
            let (stories, posts) = build_all(config)?;
            log_summary("Stories", &stories);
            log_summary("Posts", &posts);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    let config_path = args.config_path.map(PathBuf::from);

    let config = match open_config(config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("Please run storysite --help");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    info!("Starting storysite =-=-=-=-=-=-=-=-=-=-=-=-=-=-=-");
    info!("Site root is {}", config.paths.root_dir.display());

    match run(&config, &args.command) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Build failed: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
