//! QuizForge CLI - Turn a document into an interactive quiz.

use clap::Parser;
use quizforge_cli::{interactive, Cli, Config, EditorPrompter, Formatter, RunOptions};
use quizforge_content::SourceFile;
use quizforge_generator::Pipeline;
use quizforge_session::QuizSession;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> quizforge_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(color_enabled);

    let generator = config
        .generator
        .clone()
        .with_api_key(cli.resolve_api_key(config.generator.api_key.clone()));
    let pipeline = Pipeline::from_config(&generator)?;

    let options = RunOptions {
        settings: cli.apply_to(config.settings.quiz_settings()),
        skip_profile: cli.skip_profile,
    };

    let file = SourceFile::open(&cli.file).await?;
    let mut session = QuizSession::new(pipeline);
    let mut prompter = EditorPrompter::new()?;
    let mut stdout = std::io::stdout();

    interactive::run(&mut session, file, &options, &mut prompter, &mut stdout, &formatter).await
}
