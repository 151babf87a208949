//! Process configuration, read once from the environment at startup

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use crate::llm::core::config::DEFAULT_MODEL;
use crate::llm::{openai, GenerationConfig, OpenAiConfig};
use crate::pipeline::MissingSheetPolicy;
use crate::prompt::{ColumnRef, MetricColumn, MetricsProjection, PromptComposer};
use crate::sheets;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_CREDENTIALS_PATH: &str = "./google-credentials.json";

/// Errors that prevent the server from starting
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Where the service-account key comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Key file on disk
    File(PathBuf),
    /// Key JSON passed directly
    Inline(String),
}

/// Which prompt the pipeline builds
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisMode {
    /// Every sheet, header-keyed, with the general analyst prompt
    General,
    /// Every sheet as a raw cell grid, with the general analyst prompt
    Grid,
    /// One sheet reduced to a date and two metrics
    Metrics(MetricsProjection),
}

impl AnalysisMode {
    pub fn composer(&self) -> PromptComposer {
        match self {
            AnalysisMode::General => PromptComposer::general(),
            AnalysisMode::Grid => PromptComposer::grid(),
            AnalysisMode::Metrics(projection) => PromptComposer::metrics(projection.clone()),
        }
    }

    pub fn generation(&self, model: &str) -> GenerationConfig {
        match self {
            AnalysisMode::General | AnalysisMode::Grid => GenerationConfig::general(model),
            AnalysisMode::Metrics(_) => GenerationConfig::metrics(model),
        }
    }
}

/// Everything the server needs, built once and passed down explicitly
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub listen_addr: SocketAddr,
    pub openai: OpenAiConfig,
    pub model: String,
    pub credentials: CredentialSource,
    pub sheets_base_url: String,
    pub mode: AnalysisMode,
    pub missing_sheet: MissingSheetPolicy,
}

impl AppConfig {
    /// Read the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_key = get("OPENAI_API_KEY").ok_or(ConfigError::Missing("OPENAI_API_KEY"))?;
        let openai = OpenAiConfig::new(api_key).with_base_url(
            get("OPENAI_BASE_URL").unwrap_or_else(|| openai::client::DEFAULT_BASE_URL.to_string()),
        );

        let host: IpAddr = match get("HOST") {
            Some(host) => host.trim().parse::<IpAddr>().map_err(|e| ConfigError::Invalid {
                name: "HOST",
                reason: format!("{}", e),
            })?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };
        let port: u16 = match get("PORT") {
            Some(port) => port.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
                name: "PORT",
                reason: format!("{}", e),
            })?,
            None => DEFAULT_PORT,
        };

        let credentials = match get("GOOGLE_CREDENTIALS_JSON") {
            Some(json) => CredentialSource::Inline(json),
            None => CredentialSource::File(PathBuf::from(
                get("GOOGLE_CREDENTIALS_PATH")
                    .unwrap_or_else(|| DEFAULT_CREDENTIALS_PATH.to_string()),
            )),
        };

        let mode = match get("ANALYSIS_MODE").as_deref().map(str::trim) {
            None | Some("general") => AnalysisMode::General,
            Some("grid") => AnalysisMode::Grid,
            Some("metrics") => AnalysisMode::Metrics(metrics_projection(&get)),
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "ANALYSIS_MODE",
                    reason: format!("expected 'general', 'grid' or 'metrics', got '{}'", other),
                })
            }
        };

        let missing_sheet = match get("MISSING_SHEET_POLICY") {
            Some(policy) => policy.parse::<MissingSheetPolicy>().map_err(|reason| ConfigError::Invalid {
                name: "MISSING_SHEET_POLICY",
                reason,
            })?,
            None => MissingSheetPolicy::default(),
        };

        Ok(Self {
            listen_addr: SocketAddr::new(host, port),
            openai,
            model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            credentials,
            sheets_base_url: get("SHEETS_API_BASE_URL")
                .unwrap_or_else(|| sheets::client::DEFAULT_BASE_URL.to_string()),
            mode,
            missing_sheet,
        })
    }

    pub fn generation(&self) -> GenerationConfig {
        self.mode.generation(&self.model)
    }
}

fn metrics_projection(get: &impl Fn(&str) -> Option<String>) -> MetricsProjection {
    let column = |key: &str, default: &str| {
        ColumnRef::parse(&get(key).unwrap_or_else(|| default.to_string()))
    };
    let label = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

    MetricsProjection::new(
        get("METRICS_SHEET").unwrap_or_else(|| "Metrics".to_string()),
        column("METRICS_DATE_COLUMN", "0"),
        MetricColumn::new(
            label("METRICS_FIRST_LABEL", "metricA"),
            column("METRICS_FIRST_COLUMN", "3"),
        ),
        MetricColumn::new(
            label("METRICS_SECOND_LABEL", "metricB"),
            column("METRICS_SECOND_COLUMN", "5"),
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::core::config::{GENERAL_MAX_TOKENS, METRICS_MAX_TOKENS};
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[("OPENAI_API_KEY", "sk-test")]).unwrap();

        assert_eq!(config.listen_addr.port(), DEFAULT_PORT);
        assert!(config.listen_addr.ip().is_unspecified());
        assert_eq!(config.openai.api_key, "sk-test");
        assert_eq!(config.openai.base_url, "https://api.openai.com/v1");
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert_eq!(
            config.credentials,
            CredentialSource::File(PathBuf::from("./google-credentials.json"))
        );
        assert_eq!(config.mode, AnalysisMode::General);
        assert_eq!(config.missing_sheet, MissingSheetPolicy::Ignore);
        assert_eq!(config.generation().max_tokens, GENERAL_MAX_TOKENS);
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let err = config(&[("PORT", "9000")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("OPENAI_API_KEY")));

        let err = config(&[("OPENAI_API_KEY", "  ")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("OPENAI_API_KEY")));
    }

    #[test]
    fn test_invalid_port() {
        let err = config(&[("OPENAI_API_KEY", "k"), ("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_inline_credentials_take_precedence() {
        let config = config(&[
            ("OPENAI_API_KEY", "k"),
            ("GOOGLE_CREDENTIALS_JSON", "{\"type\":\"service_account\"}"),
            ("GOOGLE_CREDENTIALS_PATH", "/etc/key.json"),
        ])
        .unwrap();
        assert!(matches!(config.credentials, CredentialSource::Inline(_)));
    }

    #[test]
    fn test_metrics_mode() {
        let config = config(&[
            ("OPENAI_API_KEY", "k"),
            ("ANALYSIS_MODE", "metrics"),
            ("METRICS_SHEET", "Daily"),
            ("METRICS_FIRST_COLUMN", "CTR"),
            ("METRICS_FIRST_LABEL", "ctr"),
            ("MISSING_SHEET_POLICY", "answer"),
        ])
        .unwrap();

        let AnalysisMode::Metrics(projection) = &config.mode else {
            panic!("Expected metrics mode");
        };
        assert_eq!(projection.sheet_title, "Daily");
        assert_eq!(projection.date, ColumnRef::Index(0));
        assert_eq!(projection.first.column, ColumnRef::Header("CTR".to_string()));
        assert_eq!(projection.first.label, "ctr");
        assert_eq!(projection.second.column, ColumnRef::Index(5));
        assert_eq!(config.missing_sheet, MissingSheetPolicy::Answer);
        assert_eq!(config.generation().max_tokens, METRICS_MAX_TOKENS);
    }

    #[test]
    fn test_grid_mode() {
        let config = config(&[("OPENAI_API_KEY", "k"), ("ANALYSIS_MODE", "grid")]).unwrap();
        assert_eq!(config.mode, AnalysisMode::Grid);
        assert_eq!(config.generation().max_tokens, GENERAL_MAX_TOKENS);
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let err = config(&[("OPENAI_API_KEY", "k"), ("ANALYSIS_MODE", "poetry")]).unwrap_err();
        assert!(err.to_string().contains("ANALYSIS_MODE"));
    }
}
