use anyhow::Result;
use kb_core::application::ports::{
    jobs::JobScheduler,
    notifications::{AnnounceChannel, SubscriberNotifier},
    time::Clock,
};
use kb_core::application::services::{
    ApplicationServices, Collaborators, Repositories, ServiceSettings,
};
use kb_core::config::AppConfig;
use kb_core::infrastructure::{
    database,
    outbound::{TracingAnnounceChannel, TracingJobScheduler, TracingSubscriberNotifier},
    repositories::{
        PostgresArticleReadRepository, PostgresArticleWriteRepository,
        PostgresRelationshipRepository, PostgresSearchEngine, PostgresTagRepository,
    },
    time::SystemClock,
};
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool =
        database::init_pool(config.database_url(), config.database_max_connections()).await?;
    database::run_migrations(&pool).await?;

    let repos = Repositories {
        article_write: Arc::new(PostgresArticleWriteRepository::new(pool.clone())),
        article_read: Arc::new(PostgresArticleReadRepository::new(pool.clone())),
        tags: Arc::new(PostgresTagRepository::new(pool.clone())),
        relationships: Arc::new(PostgresRelationshipRepository::new(pool.clone())),
        search: Arc::new(PostgresSearchEngine::new(pool.clone())),
    };

    let announcer: Arc<dyn AnnounceChannel> = Arc::new(TracingAnnounceChannel);
    let notifier: Arc<dyn SubscriberNotifier> = Arc::new(TracingSubscriberNotifier);
    let jobs: Arc<dyn JobScheduler> = Arc::new(TracingJobScheduler);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let services = ApplicationServices::new(
        repos,
        Collaborators {
            announcer,
            notifier,
            jobs,
            clock,
        },
        ServiceSettings {
            trigram_threshold: config.search_trigram_threshold(),
            staleness_sweep_limit: config.staleness_sweep_limit(),
        },
    );

    let maintenance = Arc::clone(&services.maintenance);
    let run = async move {
        let sweep = maintenance.sweep_stale_articles().await?;
        let tags = maintenance.reset_tag_counts().await?;
        anyhow::Ok((sweep, tags))
    };

    tokio::select! {
        outcome = run => {
            let (sweep, tags) = outcome?;
            tracing::info!(
                examined = sweep.examined,
                reminded = sweep.reminded,
                skipped = sweep.skipped_recently_notified,
                failed = sweep.failed,
                tag_counts_corrected = tags.corrected,
                "maintenance run complete"
            );
        }
        () = shutdown_signal() => {
            tracing::warn!("maintenance run interrupted");
        }
    }

    pool.close().await;
    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for CTRL+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
