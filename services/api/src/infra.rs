use metrics_exporter_prometheus::PrometheusHandle;
use oriento::config::AppConfig;
use oriento::error::AppError;
use oriento::explore::{CareerCatalogue, FormationCatalogue};
use oriento::riasec::{BankKind, ProfileCatalogue, ProfileResolver, QuestionBank};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) resolver: ProfileResolver,
    pub(crate) profiles: Arc<ProfileCatalogue>,
    pub(crate) careers: Arc<CareerCatalogue>,
    pub(crate) formations: Arc<FormationCatalogue>,
}

impl AppState {
    pub(crate) fn new(metrics: PrometheusHandle, resolver: ProfileResolver) -> Self {
        Self {
            readiness: Arc::new(AtomicBool::new(false)),
            metrics: Arc::new(metrics),
            resolver,
            profiles: Arc::new(ProfileCatalogue::french()),
            careers: Arc::new(CareerCatalogue::standard()),
            formations: Arc::new(FormationCatalogue::default()),
        }
    }

    pub(crate) fn with_formations(mut self, formations: FormationCatalogue) -> Self {
        self.formations = Arc::new(formations);
        self
    }
}

/// Loads the configured formations file; the API still starts without one.
pub(crate) fn load_formations(config: &AppConfig) -> Result<FormationCatalogue, AppError> {
    match &config.data.formations_path {
        Some(path) => Ok(FormationCatalogue::from_path(path)?),
        None => {
            warn!("ORIENTO_FORMATIONS_PATH not set; formations endpoint will be empty");
            Ok(FormationCatalogue::default())
        }
    }
}

pub(crate) fn parse_bank(raw: &str) -> Result<BankKind, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "standard" => Ok(BankKind::Standard),
        "short" => Ok(BankKind::Short),
        other => Err(format!(
            "unknown question bank '{other}' (expected standard or short)"
        )),
    }
}

pub(crate) fn built_in_bank(kind: BankKind) -> Result<QuestionBank, AppError> {
    QuestionBank::built_in(kind)
        .ok_or_else(|| AppError::NotFound(format!("question bank '{}'", kind.label())))
}

/// Answers passed on the command line as `5,4,3,...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AnswerList(pub(crate) Vec<u8>);

/// Range checks are left to scoring.
pub(crate) fn parse_answers(raw: &str) -> Result<AnswerList, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| {
            value
                .parse::<u8>()
                .map_err(|err| format!("failed to parse answer '{value}' ({err})"))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(AnswerList)
}
