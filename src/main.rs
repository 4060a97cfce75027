use std::path::PathBuf;

use ai_quiz::Quiz;
use ai_quiz::generation::{
    DEFAULT_BASE_URL, DEFAULT_MAX_ATTEMPTS, DEFAULT_MODEL, GeminiClient, GeminiConfig,
    QuizGenerator,
};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// API key for the Gemini text generation service
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Model used for questions and feedback
    #[arg(short, long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Base URL of the Generative Language API
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// How many times quiz generation is attempted before giving up
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,

    /// File that receives log output
    #[arg(long, default_value = "ai-quiz.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    if let Err(e) = ai_quiz::logging::init(&args.log_file) {
        eprintln!("Could not open log file {}: {}", args.log_file.display(), e);
        std::process::exit(1);
    }
    tracing::info!(model = %args.model, max_attempts = args.max_attempts, "starting");

    let config = GeminiConfig {
        api_key: args.api_key,
        base_url: args.base_url,
    };
    let generator =
        QuizGenerator::new(GeminiClient::new(config), args.model).with_max_attempts(args.max_attempts);

    if let Err(e) = Quiz::new(generator).run().await {
        tracing::error!(error = %e, "quiz exited with an error");
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}
