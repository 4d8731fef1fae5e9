use clap::{Parser, Subcommand};
use colored::*;
use log::{debug, warn};
use routedoc::{
    error::FatalReport,
    pipeline::{analyze_file, DocumentationPipeline},
    Config, ContentSource, GitHubSource, LocalSource, OfflineGenerator, OpenAiClient,
    RepositoryId, Result, RunStats, TextGenerator,
};
use serde::Serialize;
use std::{path::Path, path::PathBuf, process, sync::Arc};

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

#[derive(Parser)]
#[command(name = "routedoc")]
#[command(version, about = "Documents the HTTP endpoints of a JS/TS repository")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Write the result here instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Skip text generation; every endpoint gets placeholder prose
    #[arg(long, global = true)]
    offline: bool,

    #[arg(long, global = true)]
    max_files: Option<usize>,

    #[arg(long, global = true)]
    branch: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Document a GitHub repository (URL or owner/repo)
    Repo { url: String },
    /// Document a checkout on disk
    Dir { path: PathBuf },
    /// Print the analysis of a single file, without text generation
    File { path: PathBuf },
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    }
    .apply_env();

    if let Some(max_files) = cli.max_files {
        config.max_files = max_files;
    }
    if let Some(branch) = &cli.branch {
        config.branch = branch.clone();
    }
    config.validate()?;
    Ok(config)
}

fn generator(cli: &Cli, config: &Config) -> Result<(Arc<dyn TextGenerator>, bool)> {
    if cli.offline {
        return Ok((Arc::new(OfflineGenerator), false));
    }
    if !config.has_text_generation() {
        warn!("No OpenAI API key configured, running offline");
        return Ok((Arc::new(OfflineGenerator), false));
    }
    Ok((Arc::new(OpenAiClient::new(config)?), true))
}

fn write_json(value: &impl Serialize, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            eprintln!("{} {}", "Wrote".green().bold(), path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn print_stats(stats: &RunStats) {
    eprintln!(
        "{} {} listed, {} selected, {} documented, {} skipped",
        "Files:".bold(),
        stats.files_listed,
        stats.files_selected,
        stats.files_documented.to_string().green(),
        stats.files_skipped.to_string().yellow()
    );
    eprintln!(
        "{} {} documented, {} with placeholder prose",
        "Endpoints:".bold(),
        stats.endpoints_documented.to_string().green(),
        stats.endpoints_fallback.to_string().yellow()
    );
}

async fn document(
    cli: &Cli,
    config: Config,
    source: Arc<dyn ContentSource>,
    repo: RepositoryId,
) -> Result<()> {
    let (generator, ai_powered) = generator(cli, &config)?;
    eprintln!("{} {}", "Documenting".green().bold(), repo);

    let pipeline =
        DocumentationPipeline::new(source, generator, config).with_ai_powered(ai_powered);
    let outcome = pipeline.run(&repo).await?;

    write_json(&outcome.documentation, cli.output.as_deref())?;
    print_stats(&outcome.stats);
    Ok(())
}

async fn run(cli: &Cli, config: Config) -> Result<()> {
    match &cli.command {
        Commands::Repo { url } => {
            let repo = RepositoryId::parse(url)?;
            let source = Arc::new(GitHubSource::new(&config)?);
            document(cli, config, source, repo).await
        }
        Commands::Dir { path } => {
            let source = LocalSource::new(path);
            let repo = RepositoryId::new("local", source.name());
            document(cli, config, Arc::new(source), repo).await
        }
        Commands::File { path } => {
            let content = tokio::fs::read_to_string(path).await?;
            let display = path.to_string_lossy().replace('\\', "/");
            let analysis = analyze_file(&display, &content)?;
            write_json(&analysis, cli.output.as_deref())
        }
    }
}

#[tokio::main]
async fn main() {
    routedoc::init_logging();
    debug!("{}", BUILD_INFO);

    let cli = Cli::parse();
    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}: {}", "error".red().bold(), err);
            process::exit(2);
        }
    };

    let with_trace = !config.is_production();
    if let Err(err) = run(&cli, config).await {
        let report = FatalReport::new(&err, with_trace);
        eprintln!("{}: {}", "error".red().bold(), report);
        process::exit(1);
    }
}
