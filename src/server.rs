//! MCP server initialization for stdio and Streamable HTTP transports.
//!
//! Provides [`serve_stdio`] and [`serve_sse`] entry points that wire up the
//! database, the knowledge store, its autosave task and the model client into a
//! running server.

use crate::tools::AlmanacTools;
use almanac::config::AlmanacConfig;
use almanac::db;
use almanac::extraction::{self, Extractor, Generator};
use almanac::knowledge::autosave::{spawn_autosave, AutosaveGuard};
use almanac::knowledge::seed::default_articles;
use almanac::knowledge::{KnowledgeStore, SharedStore};
use almanac::substrate::SqliteSubstrate;
use anyhow::Result;
use rmcp::ServiceExt;
use std::sync::Arc;

/// Everything a tool handler instance needs, shared between sessions.
struct SharedState {
    store: SharedStore,
    extractor: Arc<dyn Extractor>,
    generator: Arc<dyn Generator>,
    config: Arc<AlmanacConfig>,
    autosave: AutosaveGuard,
}

impl SharedState {
    fn tools(&self) -> AlmanacTools {
        AlmanacTools::new(
            self.store.clone(),
            self.extractor.clone(),
            self.generator.clone(),
            self.config.clone(),
        )
    }
}

/// Shared setup: open DB, load the store, start autosave, create the model client.
fn setup_shared_state(config: AlmanacConfig) -> Result<SharedState> {
    let db_path = config.resolved_db_path();
    let conn = db::open_database(&db_path)?;
    tracing::info!(db = %db_path.display(), "database ready");

    let store = KnowledgeStore::load(
        Box::new(SqliteSubstrate::new(conn)),
        config.storage.storage_key.clone(),
        default_articles(),
    )
    .into_shared();

    let autosave = spawn_autosave(store.clone(), config.storage.autosave_interval());

    let client = Arc::new(extraction::create_client(&config.extraction)?);
    tracing::info!(provider = %config.extraction.provider, "model client ready");

    Ok(SharedState {
        store,
        extractor: client.clone(),
        generator: client,
        config: Arc::new(config),
        autosave,
    })
}

/// Start the MCP server over stdio transport.
pub async fn serve_stdio(config: AlmanacConfig) -> Result<()> {
    tracing::info!("starting Almanac MCP server on stdio");

    let state = setup_shared_state(config)?;

    let transport = rmcp::transport::stdio();
    let server = state.tools().serve(transport).await?;
    tracing::info!("MCP server running, waiting for client");

    let result = server.waiting().await;
    state.autosave.shutdown().await;
    tracing::info!("MCP server shut down");

    result?;
    Ok(())
}

/// Start the MCP server over Streamable HTTP (SSE) transport.
pub async fn serve_sse(config: AlmanacConfig) -> Result<()> {
    let host = config.server.host.clone();
    let port = config.server.port;
    let bind_addr = format!("{host}:{port}");

    tracing::info!(addr = %bind_addr, "starting Almanac MCP server on SSE/HTTP");

    let state = setup_shared_state(config)?;
    let SharedState {
        store,
        extractor,
        generator,
        config,
        autosave,
    } = state;

    let service = rmcp::transport::streamable_http_server::StreamableHttpService::new(
        move || {
            Ok(AlmanacTools::new(
                store.clone(),
                extractor.clone(),
                generator.clone(),
                config.clone(),
            ))
        },
        rmcp::transport::streamable_http_server::session::local::LocalSessionManager::default()
            .into(),
        Default::default(),
    );

    let router = axum::Router::new().nest_service("/mcp", service);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "MCP server listening at http://{bind_addr}/mcp");

    let result = axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!(error = %e, "failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("shutting down SSE server");
        })
        .await;

    autosave.shutdown().await;
    result?;
    Ok(())
}
