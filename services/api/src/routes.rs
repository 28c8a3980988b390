use crate::infra::{built_in_bank, parse_bank, AppState};
use axum::extract::{Path, Query};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use oriento::assistant::{Assistant, AssistantReply};
use oriento::error::AppError;
use oriento::explore::{Career, Formation, SectorFilter};
use oriento::riasec::{
    score, BankKind, Category, CategoryScore, InvalidInput, ProfileCard, ProfileInput,
    ProfileResolution, Question, ResultsView, ScoreTable,
};
use oriento::student::StudentProfile;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct BankQuery {
    pub(crate) bank: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct QuestionsResponse {
    pub(crate) bank: BankKind,
    pub(crate) total: usize,
    pub(crate) questions: Vec<Question>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScoreRequest {
    #[serde(default)]
    pub(crate) bank: Option<String>,
    pub(crate) answers: Vec<u8>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScoreResponse {
    pub(crate) bank: BankKind,
    pub(crate) scores: ScoreTable,
    pub(crate) normalized: Vec<CategoryScore>,
    pub(crate) resolution: ProfileResolution,
    pub(crate) view: ResultsView,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ResolveRequest {
    #[serde(default)]
    pub(crate) scores: Option<BTreeMap<String, Value>>,
    #[serde(default)]
    pub(crate) ranked: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ResolveResponse {
    pub(crate) resolution: ProfileResolution,
    pub(crate) view: ResultsView,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchQuery {
    #[serde(default)]
    pub(crate) q: Option<String>,
    #[serde(default)]
    pub(crate) sector: Option<String>,
}

impl SearchQuery {
    fn text(&self) -> &str {
        self.q.as_deref().unwrap_or_default()
    }

    fn sector(&self) -> SectorFilter {
        SectorFilter::from_query(self.sector.as_deref())
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CareersResponse {
    pub(crate) sectors: Vec<String>,
    pub(crate) careers: Vec<Career>,
}

#[derive(Debug, Serialize)]
pub(crate) struct FormationsResponse {
    pub(crate) total: usize,
    pub(crate) sectors: Vec<String>,
    pub(crate) formations: Vec<Formation>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AssistantRequest {
    #[serde(default)]
    pub(crate) profile: StudentProfile,
    pub(crate) message: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct AssistantResponse {
    /// Set when the student asked to start over; `reply` is then the greeting.
    pub(crate) reset: bool,
    pub(crate) reply: AssistantReply,
}

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/questions", get(questions_endpoint))
        .route("/api/v1/quiz/score", post(score_endpoint))
        .route("/api/v1/profile/resolve", post(resolve_endpoint))
        .route("/api/v1/profiles", get(profiles_endpoint))
        .route("/api/v1/careers", get(careers_endpoint))
        .route("/api/v1/careers/:id", get(career_endpoint))
        .route("/api/v1/formations", get(formations_endpoint))
        .route("/api/v1/assistant", post(assistant_endpoint))
        .layer(Extension(state))
}

pub(crate) async fn healthcheck() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

fn requested_bank(raw: Option<&str>) -> Result<BankKind, AppError> {
    match raw {
        None => Ok(BankKind::Standard),
        Some(name) => {
            parse_bank(name).map_err(|_| AppError::NotFound(format!("question bank '{name}'")))
        }
    }
}

pub(crate) async fn questions_endpoint(
    Query(query): Query<BankQuery>,
) -> Result<Json<QuestionsResponse>, AppError> {
    let kind = requested_bank(query.bank.as_deref())?;
    let bank = built_in_bank(kind)?;

    Ok(Json(QuestionsResponse {
        bank: kind,
        total: bank.len(),
        questions: bank.questions().to_vec(),
    }))
}

pub(crate) async fn score_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    let kind = requested_bank(payload.bank.as_deref())?;
    let bank = built_in_bank(kind)?;

    let scores = score(&payload.answers, bank.questions())?;
    let resolution = state.resolver.resolve_scores(&scores);
    debug!(bank = kind.label(), profile = %resolution.summary_code(), "scored quiz submission");

    Ok(Json(ScoreResponse {
        bank: kind,
        normalized: scores.normalized(&bank.category_counts()),
        view: state.profiles.present(&resolution),
        scores,
        resolution,
    }))
}

pub(crate) async fn resolve_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<ResolveRequest>,
) -> Result<Json<ResolveResponse>, AppError> {
    let resolution = match (payload.scores, payload.ranked) {
        (Some(raw), _) => state.resolver.resolve_raw(&raw)?,
        (None, Some(codes)) => {
            let ranked = codes
                .iter()
                .map(|code| code.parse::<Category>())
                .collect::<Result<Vec<_>, InvalidInput>>()?;
            state.resolver.resolve(&ProfileInput::RankedOnly(ranked))?
        }
        (None, None) => return Err(InvalidInput::EmptyRanking.into()),
    };

    Ok(Json(ResolveResponse {
        view: state.profiles.present(&resolution),
        resolution,
    }))
}

pub(crate) async fn profiles_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<Vec<ProfileCard>> {
    let cards = state
        .profiles
        .entries()
        .map(|(code, profile)| ProfileCard {
            code,
            profile: profile.clone(),
        })
        .collect();
    Json(cards)
}

pub(crate) async fn careers_endpoint(
    Extension(state): Extension<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<CareersResponse> {
    let careers = state
        .careers
        .search(query.text(), &query.sector())
        .into_iter()
        .cloned()
        .collect();

    Json(CareersResponse {
        sectors: state.careers.sectors().into_iter().map(String::from).collect(),
        careers,
    })
}

pub(crate) async fn career_endpoint(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Career>, AppError> {
    state
        .careers
        .find(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("career '{id}'")))
}

pub(crate) async fn formations_endpoint(
    Extension(state): Extension<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<FormationsResponse> {
    let formations: Vec<Formation> = state
        .formations
        .search(query.text(), &query.sector())
        .into_iter()
        .cloned()
        .collect();

    Json(FormationsResponse {
        total: formations.len(),
        sectors: state
            .formations
            .sectors()
            .into_iter()
            .map(String::from)
            .collect(),
        formations,
    })
}

pub(crate) async fn assistant_endpoint(
    Json(payload): Json<AssistantRequest>,
) -> Json<AssistantResponse> {
    let response = match Assistant::reply(&payload.profile, &payload.message) {
        Some(reply) => AssistantResponse {
            reset: false,
            reply,
        },
        None => AssistantResponse {
            reset: true,
            reply: Assistant::greeting(),
        },
    };
    Json(response)
}
