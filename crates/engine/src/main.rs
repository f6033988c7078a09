//! CineMatch Service - Hybrid Movie Recommendations
//!
//! Port: 8082

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use cinematch_core::{
    init_logging, load_dotenv, ConfigLoader, DataConfig, LogConfig, ServiceConfig,
};
use cinematch_engine::server::{configure_routes, AppState};
use cinematch_engine::{Dataset, EngineConfig, RecommenderEngine};
use std::sync::Arc;
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    let service_config = ServiceConfig::from_env()?;
    let data_config = DataConfig::from_env()?;
    let engine_config = EngineConfig::from_env()?;

    service_config.validate()?;
    data_config.validate()?;
    engine_config.validate()?;

    init_logging(&LogConfig {
        service_name: "cinematch-service".to_string(),
        level: service_config.log_level.clone(),
        format: service_config.log_format,
    })?;

    let dataset = Dataset::load_movielens(&data_config.data_dir).with_context(|| {
        format!(
            "Failed to load MovieLens data from {}",
            data_config.data_dir.display()
        )
    })?;

    let engine = Arc::new(RecommenderEngine::new(dataset, engine_config));
    let state = web::Data::new(AppState { engine });

    info!(
        host = %service_config.host,
        port = service_config.port,
        workers = service_config.workers,
        "Starting CineMatch service"
    );

    HttpServer::new(move || App::new().app_data(state.clone()).configure(configure_routes))
        .workers(service_config.workers)
        .bind((service_config.host.as_str(), service_config.port))?
        .run()
        .await?;

    Ok(())
}
