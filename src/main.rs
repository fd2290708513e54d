use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use lexitutor::application::ports::{ConfigStore, FileLoader, SessionRepository, StagingStore};
use lexitutor::application::services::{
    CallBudget, ChatPipeline, ChunkProcessor, ContentModerator, GatewaySettings,
    LanguageModelGateway, RuntimeConfigCache, SessionStore, UploadPipeline,
};
use lexitutor::infrastructure::llm::OpenAiClient;
use lexitutor::infrastructure::observability::{TracingConfig, init_tracing};
use lexitutor::infrastructure::persistence::{
    InMemoryConfigStore, InMemorySessionRepository, PgConfigStore, PgSessionRepository,
    create_pool, run_migrations,
};
use lexitutor::infrastructure::storage::LocalStagingStore;
use lexitutor::infrastructure::text_processing::{
    CompositeFileLoader, DocxAdapter, PdfAdapter, PlainTextAdapter, SentenceSplitter,
    TesseractOcrAdapter,
};
use lexitutor::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(&TracingConfig::from_settings(environment, &settings.logging));

    let (session_repository, config_store): (Arc<dyn SessionRepository>, Arc<dyn ConfigStore>) =
        match settings.database.url.as_deref().filter(|u| !u.is_empty()) {
            Some(url) => {
                let pool = create_pool(url, settings.database.max_connections).await?;
                run_migrations(&pool).await?;
                (
                    Arc::new(PgSessionRepository::new(pool.clone())),
                    Arc::new(PgConfigStore::new(pool)),
                )
            }
            None => {
                tracing::warn!("No database url configured, sessions are kept in memory");
                (
                    Arc::new(InMemorySessionRepository::new()),
                    Arc::new(InMemoryConfigStore::new()),
                )
            }
        };

    let runtime_config = Arc::new(RuntimeConfigCache::new(
        config_store,
        settings.runtime_config.cache_ttl(),
    ));
    if let Err(e) = runtime_config.seed_defaults().await {
        tracing::warn!(error = %e, "Could not seed runtime configuration defaults");
    }

    let llm = &settings.llm;
    let gateway = Arc::new(LanguageModelGateway::new(
        Arc::new(OpenAiClient::from_settings(llm)?),
        GatewaySettings {
            chat: CallBudget {
                temperature: llm.chat_temperature,
                max_tokens: llm.chat_max_tokens,
            },
            task: CallBudget {
                temperature: llm.task_temperature,
                max_tokens: llm.task_max_tokens,
            },
            explain: CallBudget {
                temperature: llm.explain_temperature,
                max_tokens: llm.explain_max_tokens,
            },
            request_timeout: llm.request_timeout(),
        },
    ));

    let extraction_timeout = settings.upload.extraction_timeout();
    let file_loader: Arc<dyn FileLoader> = Arc::new(CompositeFileLoader::new(
        Arc::new(TesseractOcrAdapter::new(
            settings.upload.ocr_binary.clone(),
            settings.upload.ocr_languages.clone(),
            extraction_timeout,
        )),
        Arc::new(PdfAdapter::new(extraction_timeout)),
        Arc::new(DocxAdapter::new(extraction_timeout)),
        Arc::new(PlainTextAdapter),
    ));
    let staging_store: Arc<dyn StagingStore> =
        Arc::new(LocalStagingStore::new(settings.upload.directory.clone())?);

    let sessions = Arc::new(SessionStore::new(session_repository));
    let chat_pipeline = Arc::new(ChatPipeline::new(
        ContentModerator::new(),
        runtime_config,
        Arc::clone(&gateway),
        Arc::clone(&sessions),
    ));
    let upload_pipeline = Arc::new(UploadPipeline::new(
        file_loader,
        Arc::new(SentenceSplitter::new(settings.chunking.max_chunk_length)?),
        Arc::new(ChunkProcessor::new(gateway, settings.chunking.max_chunks)),
        Arc::clone(&sessions),
        Arc::clone(&staging_store),
    ));

    let state = AppState {
        chat_pipeline,
        upload_pipeline,
        sessions,
        staging_store,
        max_upload_bytes: settings.upload.max_file_size_bytes(),
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!(%addr, environment = %environment, "Listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
