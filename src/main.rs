use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use sheet_analyst::config::{AppConfig, CredentialSource};
use sheet_analyst::llm::OpenAiClient;
use sheet_analyst::pipeline::AnalysisPipeline;
use sheet_analyst::routes::configure_routes;
use sheet_analyst::sheets::{ServiceAccountAuth, SheetsClient};

const DEFAULT_LOG_FILTER: &str = "sheet_analyst=info,warp=info";

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

fn build_pipeline(config: &AppConfig) -> Result<AnalysisPipeline, Box<dyn std::error::Error>> {
    let auth = match &config.credentials {
        CredentialSource::File(path) => ServiceAccountAuth::from_file(path)?,
        CredentialSource::Inline(json) => ServiceAccountAuth::from_json(json)?,
    };
    let sheets = SheetsClient::with_base_url(auth, &config.sheets_base_url)?;
    let openai = OpenAiClient::new(config.openai.clone())?;

    Ok(AnalysisPipeline::new(
        Arc::new(sheets),
        Arc::new(openai),
        config.mode.composer(),
        config.generation(),
    )
    .with_missing_sheet_policy(config.missing_sheet))
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_logging();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let pipeline = match build_pipeline(&config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            tracing::error!(error = %e, "failed to initialize clients");
            return ExitCode::FAILURE;
        }
    };

    let routes = configure_routes(Arc::new(pipeline));

    tracing::info!(
        addr = %config.listen_addr,
        model = %config.model,
        mode = ?config.mode,
        "starting server"
    );
    warp::serve(routes).run(config.listen_addr).await;

    ExitCode::SUCCESS
}
