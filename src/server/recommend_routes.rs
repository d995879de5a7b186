//! Recommendation API routes

use crate::catalog::AUDIO_FEATURES_COUNT;
use crate::recommend::{RecommendError, SimilarityOutcome};

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Instant;
use tracing::{debug, error};

use super::metrics::record_recommendation;
use super::state::{GuardedRecommender, ServerState};

#[derive(Deserialize)]
struct RecommendBody {
    pub song_name: String,
}

#[derive(Deserialize)]
struct RecommendByValuesBody {
    pub danceability: f64,
    pub energy: f64,
    pub loudness: f64,
    pub speechiness: f64,
    pub acousticness: f64,
    pub instrumentalness: f64,
    pub liveness: f64,
    pub valence: f64,
}

impl RecommendByValuesBody {
    fn to_features(&self) -> [f64; AUDIO_FEATURES_COUNT] {
        [
            self.danceability,
            self.energy,
            self.loudness,
            self.speechiness,
            self.acousticness,
            self.instrumentalness,
            self.liveness,
            self.valence,
        ]
    }
}

#[derive(Deserialize)]
struct GenreBody {
    pub genre_list: Vec<String>,
}

#[derive(Serialize, Debug, PartialEq)]
struct GenreResponseItem {
    pub genre: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub songs: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Error body shared by every recommendation route: `{"error": "..."}`.
#[derive(Debug)]
pub(super) struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn internal() -> ApiError {
        ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Internal server error".to_string(),
        }
    }
}

impl From<RecommendError> for ApiError {
    fn from(err: RecommendError) -> Self {
        let status = match err {
            RecommendError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            RecommendError::InsufficientData { .. } => StatusCode::NOT_FOUND,
        };
        ApiError {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Runs a CPU bound engine call off the async workers.
async fn run_blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|err| {
        error!("Recommendation task failed: {}", err);
        ApiError::internal()
    })
}

async fn recommend(
    State(recommender): State<GuardedRecommender>,
    Json(body): Json<RecommendBody>,
) -> Result<Json<Vec<String>>, ApiError> {
    let start = Instant::now();
    let result =
        run_blocking(move || recommender.recommend(&body.song_name, &mut rand::rng())).await?;

    let outcome = match &result {
        Ok(r) => match r.outcome {
            SimilarityOutcome::Matched { .. } => "matched",
            SimilarityOutcome::Fallback { .. } => "fallback",
        },
        Err(_) => "invalid",
    };
    record_recommendation("similarity", outcome, start.elapsed());

    Ok(Json(result?.songs))
}

async fn recommend_by_values(
    State(recommender): State<GuardedRecommender>,
    Json(body): Json<RecommendByValuesBody>,
) -> Result<Json<Vec<String>>, ApiError> {
    let start = Instant::now();
    let features = body.to_features();
    let result = run_blocking(move || recommender.recommend_by_vector(&features)).await?;

    let outcome = if result.is_ok() { "ok" } else { "invalid" };
    record_recommendation("neighbor", outcome, start.elapsed());

    Ok(Json(result?))
}

async fn recommend_by_genres(
    State(recommender): State<GuardedRecommender>,
    Json(body): Json<GenreBody>,
) -> Result<Json<Vec<GenreResponseItem>>, ApiError> {
    let start = Instant::now();
    let result = run_blocking(move || {
        recommender.recommend_by_genres(&body.genre_list, &mut rand::rng())
    })
    .await?;

    let samples = match result {
        Ok(samples) => samples,
        Err(err) => {
            record_recommendation("genre", "invalid", start.elapsed());
            return Err(err.into());
        }
    };

    let items: Vec<GenreResponseItem> = samples
        .into_iter()
        .map(|sample| match sample.result {
            Ok(songs) => {
                record_recommendation("genre", "ok", start.elapsed());
                GenreResponseItem {
                    genre: sample.genre,
                    songs: Some(songs),
                    error: None,
                }
            }
            Err(err) => {
                debug!("{}", err);
                record_recommendation("genre", "insufficient", start.elapsed());
                GenreResponseItem {
                    genre: sample.genre,
                    songs: None,
                    error: Some(err.to_string()),
                }
            }
        })
        .collect();

    Ok(Json(items))
}

async fn list_genres(State(recommender): State<GuardedRecommender>) -> Json<Vec<String>> {
    Json(recommender.catalog().genres())
}

pub fn make_recommend_routes(state: ServerState) -> Router {
    Router::new()
        .route("/recommend", post(recommend))
        .route("/recommend_by_values", post(recommend_by_values))
        .route("/genre", post(recommend_by_genres))
        .route("/genres", get(list_genres))
        .with_state(state)
}
