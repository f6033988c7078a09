//! HTTP surface of the recommender
//!
//! Requests are validated here; the engine itself never rejects input.

use actix_web::{web, HttpResponse, Responder};
use cinematch_core::CineMatchError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::types::{GenreWeights, HybridRecommendation, ManualRatings, UserId};
use crate::{RecommenderEngine, MAX_LIMIT};

const MAX_GENRE_WEIGHT: f32 = 100.0;
const MIN_MANUAL_RATING: f32 = 1.0;
const MAX_MANUAL_RATING: f32 = 10.0;

/// Application state shared across all handlers
pub struct AppState {
    pub engine: Arc<RecommenderEngine>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    service: String,
    version: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Deserialize)]
pub struct HybridRequest {
    pub user_id: UserId,
    #[serde(default)]
    pub genre_weights: GenreWeights,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HybridResponse {
    pub recommendations: Vec<HybridRecommendation>,
}

#[derive(Debug, Deserialize)]
pub struct ManualRequest {
    #[serde(default)]
    pub ratings: ManualRatings,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ManualResponse {
    pub titles: Vec<String>,
}

/// GET /health
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        service: "cinematch-service".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/v1/stats - Dataset statistics
pub async fn get_stats(state: web::Data<AppState>) -> impl Responder {
    info!("Computing dataset statistics");
    HttpResponse::Ok().json(state.engine.stats())
}

/// POST /api/v1/recommendations/hybrid - Blended recommendations for a user
pub async fn hybrid_recommendations(
    state: web::Data<AppState>,
    body: web::Json<HybridRequest>,
) -> impl Responder {
    let request = body.into_inner();

    let limit = match validate_genre_weights(&request.genre_weights)
        .and_then(|_| resolve_limit(request.limit, &state))
    {
        Ok(limit) => limit,
        Err(e) => return bad_request(e),
    };

    info!(
        user_id = request.user_id,
        genres = request.genre_weights.len(),
        limit,
        "Generating hybrid recommendations"
    );

    let recommendations = state
        .engine
        .hybrid_recommend(request.user_id, &request.genre_weights, limit);

    HttpResponse::Ok().json(HybridResponse { recommendations })
}

/// POST /api/v1/recommendations/manual - Cold-start recommendations
pub async fn manual_recommendations(
    state: web::Data<AppState>,
    body: web::Json<ManualRequest>,
) -> impl Responder {
    let request = body.into_inner();

    let limit = match validate_manual_ratings(&request.ratings)
        .and_then(|_| resolve_limit(request.limit, &state))
    {
        Ok(limit) => limit,
        Err(e) => return bad_request(e),
    };

    info!(
        rated_titles = request.ratings.len(),
        limit,
        "Generating cold-start recommendations"
    );

    let titles = state
        .engine
        .recommend_from_manual_ratings(&request.ratings, limit);

    HttpResponse::Ok().json(ManualResponse { titles })
}

/// Configure application routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health)).service(
        web::scope("/api/v1")
            .route("/stats", web::get().to(get_stats))
            .service(
                web::scope("/recommendations")
                    .route("/hybrid", web::post().to(hybrid_recommendations))
                    .route("/manual", web::post().to(manual_recommendations)),
            ),
    );
}

fn validate_genre_weights(weights: &GenreWeights) -> Result<(), CineMatchError> {
    for (genre, &weight) in weights {
        if !(0.0..=MAX_GENRE_WEIGHT).contains(&weight) {
            return Err(CineMatchError::validation_field(
                format!("weight for '{}' must be between 0 and 100, got {}", genre, weight),
                "genre_weights",
            ));
        }
    }
    Ok(())
}

fn validate_manual_ratings(ratings: &ManualRatings) -> Result<(), CineMatchError> {
    for (title, &rating) in ratings {
        if !(MIN_MANUAL_RATING..=MAX_MANUAL_RATING).contains(&rating) {
            return Err(CineMatchError::validation_field(
                format!("rating for '{}' must be between 1 and 10, got {}", title, rating),
                "ratings",
            ));
        }
    }
    Ok(())
}

fn resolve_limit(limit: Option<usize>, state: &AppState) -> Result<usize, CineMatchError> {
    let limit = limit.unwrap_or(state.engine.config().default_limit);
    if limit == 0 || limit > MAX_LIMIT {
        return Err(CineMatchError::validation_field(
            format!("limit must be between 1 and {}, got {}", MAX_LIMIT, limit),
            "limit",
        ));
    }
    Ok(limit)
}

fn bad_request(e: CineMatchError) -> HttpResponse {
    warn!(error = %e, "Rejected request");
    HttpResponse::BadRequest().json(ErrorResponse {
        error: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::types::{Genre, Movie, RatingEvent};
    use actix_web::{http::StatusCode, test, App};
    use serde_json::json;

    fn state() -> web::Data<AppState> {
        let dataset = Dataset::new(
            vec![
                Movie::new(1, "A", &[Genre::Action]),
                Movie::new(2, "B", &[Genre::Comedy]),
                Movie::new(3, "C", &[Genre::Action, Genre::Comedy]),
            ],
            vec![
                RatingEvent::new(1, 1, 5.0),
                RatingEvent::new(2, 2, 5.0),
                RatingEvent::new(3, 1, 4.0),
                RatingEvent::new(3, 3, 5.0),
            ],
        );
        web::Data::new(AppState {
            engine: Arc::new(RecommenderEngine::with_default_config(dataset)),
        })
    }

    #[actix_web::test]
    async fn test_health_endpoint() {
        let app = test::init_service(App::new().configure(configure_routes)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp["status"], "healthy");
        assert_eq!(resp["service"], "cinematch-service");
    }

    #[actix_web::test]
    async fn test_stats_endpoint() {
        let app =
            test::init_service(App::new().app_data(state()).configure(configure_routes)).await;

        let req = test::TestRequest::get().uri("/api/v1/stats").to_request();
        let resp: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp["total_users"], 3);
        assert_eq!(resp["total_movies"], 3);
        assert_eq!(resp["total_ratings"], 4);
    }

    #[actix_web::test]
    async fn test_hybrid_endpoint() {
        let app =
            test::init_service(App::new().app_data(state()).configure(configure_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/recommendations/hybrid")
            .set_json(json!({
                "user_id": 3,
                "genre_weights": {"Action": 100, "Comedy": 0},
                "limit": 2
            }))
            .to_request();
        let resp: HybridResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp.recommendations.len(), 2);
        assert_eq!(resp.recommendations[0].title, "A");
        assert_eq!(resp.recommendations[0].score, 4.0);
        assert_eq!(resp.recommendations[1].title, "C");
    }

    #[actix_web::test]
    async fn test_hybrid_rejects_out_of_range_weight() {
        let app =
            test::init_service(App::new().app_data(state()).configure(configure_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/recommendations/hybrid")
            .set_json(json!({"user_id": 3, "genre_weights": {"Action": 150}}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_hybrid_rejects_zero_limit() {
        let app =
            test::init_service(App::new().app_data(state()).configure(configure_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/recommendations/hybrid")
            .set_json(json!({"user_id": 3, "genre_weights": {}, "limit": 0}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_manual_endpoint() {
        let app =
            test::init_service(App::new().app_data(state()).configure(configure_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/recommendations/manual")
            .set_json(json!({"ratings": {"B": 9}}))
            .to_request();
        let resp: ManualResponse = test::call_and_read_body_json(&app, req).await;

        assert!(!resp.titles.contains(&"B".to_string()));
        assert_eq!(resp.titles, vec!["A".to_string(), "C".to_string()]);
    }

    #[actix_web::test]
    async fn test_manual_empty_ratings() {
        let app =
            test::init_service(App::new().app_data(state()).configure(configure_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/recommendations/manual")
            .set_json(json!({"ratings": {}}))
            .to_request();
        let resp: ManualResponse = test::call_and_read_body_json(&app, req).await;

        assert!(resp.titles.is_empty());
    }

    #[actix_web::test]
    async fn test_manual_rejects_out_of_range_rating() {
        let app =
            test::init_service(App::new().app_data(state()).configure(configure_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/recommendations/manual")
            .set_json(json!({"ratings": {"B": 0}}))
            .to_request();
        let resp: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert!(resp["error"].as_str().unwrap().contains("between 1 and 10"));
    }

    #[actix_web::test]
    async fn test_validate_genre_weights_bounds() {
        let ok: GenreWeights = [("Action".to_string(), 0.0), ("Drama".to_string(), 100.0)]
            .into_iter()
            .collect();
        assert!(validate_genre_weights(&ok).is_ok());

        let negative: GenreWeights = [("Action".to_string(), -1.0)].into_iter().collect();
        assert!(validate_genre_weights(&negative).is_err());
    }
}
