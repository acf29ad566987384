//! Backend entry-point: loads settings, prepares persistence and serves the
//! catalogue REST API with OpenAPI docs.

mod server;

use std::sync::Arc;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use course_catalogue::CatalogueSettings;
use course_catalogue::domain::ports::{CourseCache, NoOpCourseCache};
use course_catalogue::inbound::http::health::HealthState;
use course_catalogue::outbound::cache::InMemoryCourseCache;
use course_catalogue::outbound::persistence::{DbPool, run_migrations};
use ortho_config::OrthoConfig;
use server::{ServerConfig, create_server};

/// Build Prometheus metrics, logging and discarding a failed build.
#[cfg(feature = "metrics")]
fn initialize_metrics<F, E>(make_metrics: F) -> Option<PrometheusMetrics>
where
    F: FnOnce() -> Result<PrometheusMetrics, E>,
    E: std::fmt::Display,
{
    match make_metrics() {
        Ok(metrics) => Some(metrics),
        Err(error) => {
            warn!(error = %error, "failed to initialise Prometheus metrics; continuing without them");
            None
        }
    }
}

fn build_cache(settings: &CatalogueSettings) -> Arc<dyn CourseCache> {
    if settings.cache_enabled {
        Arc::new(InMemoryCourseCache::new(settings.cache_capacity))
    } else {
        Arc::new(NoOpCourseCache)
    }
}

async fn build_server_config(settings: &CatalogueSettings) -> std::io::Result<ServerConfig> {
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    info!(addr = %bind_addr, cache = settings.cache_enabled, "configuring server");
    let config = ServerConfig::new(bind_addr).with_cache(build_cache(settings));

    let Some(pool_config) = settings.pool_config() else {
        info!("no database configured; using the in-memory store");
        return Ok(config);
    };

    run_migrations(pool_config.database_url())
        .await
        .map_err(std::io::Error::other)?;
    let pool = DbPool::new(pool_config)
        .await
        .map_err(std::io::Error::other)?;
    Ok(config.with_db_pool(pool))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        CatalogueSettings::load().map_err(|e| std::io::Error::other(e.to_string()))?;
    let config = build_server_config(&settings).await?;

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(initialize_metrics(|| {
        PrometheusMetricsBuilder::new("catalogue")
            .endpoint("/metrics")
            .build()
    }));

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
