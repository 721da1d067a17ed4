pub mod ask_knowledge;
pub mod get_article;
pub mod import_knowledge;
pub mod ingest_document;
pub mod search_knowledge;

use ask_knowledge::AskKnowledgeParams;
use get_article::GetArticleParams;
use import_knowledge::ImportKnowledgeParams;
use ingest_document::IngestDocumentParams;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{tool, tool_handler, tool_router, ServerHandler};
use search_knowledge::SearchKnowledgeParams;
use std::sync::Arc;

use almanac::config::AlmanacConfig;
use almanac::extraction::{Extractor, Generator};
use almanac::knowledge::search::rank;
use almanac::knowledge::{ingest, lock_store, query, transfer, SharedStore};

/// The Almanac MCP tool handler. Holds the shared store, the model client and
/// config, and exposes all MCP tools via the `#[tool_router]` macro.
#[derive(Clone)]
pub struct AlmanacTools {
    tool_router: ToolRouter<Self>,
    store: SharedStore,
    extractor: Arc<dyn Extractor>,
    generator: Arc<dyn Generator>,
    config: Arc<AlmanacConfig>,
}

#[tool_router]
impl AlmanacTools {
    pub fn new(
        store: SharedStore,
        extractor: Arc<dyn Extractor>,
        generator: Arc<dyn Generator>,
        config: Arc<AlmanacConfig>,
    ) -> Self {
        Self {
            tool_router: Self::tool_router(),
            store,
            extractor,
            generator,
            config,
        }
    }

    /// Rank articles by keyword overlap with the query.
    #[tool(description = "Search the knowledge base by keywords. Returns matching articles (id, title, content) ranked by keyword and title overlap.")]
    async fn search_knowledge(
        &self,
        Parameters(params): Parameters<SearchKnowledgeParams>,
    ) -> Result<String, String> {
        let max_results = params
            .max_results
            .unwrap_or(self.config.retrieval.default_max_results);

        tracing::info!(query = %params.query, max_results, "search_knowledge called");

        let (results, total) = {
            let store = lock_store(&self.store);
            let ranked = rank(store.articles(), &params.query);
            let total = ranked.len();
            let results: Vec<_> = ranked
                .iter()
                .take(max_results)
                .map(|hit| hit.article.summary())
                .collect();
            (results, total)
        };

        Ok(serde_json::json!({
            "results": results,
            "total_matched": total,
        })
        .to_string())
    }

    /// Fetch one article by id.
    #[tool(description = "Get a single knowledge base article by ID, including its keywords.")]
    async fn get_article(
        &self,
        Parameters(params): Parameters<GetArticleParams>,
    ) -> Result<String, String> {
        let article = lock_store(&self.store)
            .get(&params.id)
            .ok_or_else(|| format!("article not found: {}", params.id))?;

        serde_json::to_string(&article).map_err(|e| format!("serialization failed: {e}"))
    }

    /// Turn a document into a new article using the model.
    #[tool(description = "Add a document to the knowledge base. The AI extracts a title, a 100-150 word summary and 5-7 keywords, and stores them as a new article.")]
    async fn ingest_document(
        &self,
        Parameters(params): Parameters<IngestDocumentParams>,
    ) -> Result<String, String> {
        if params.content.trim().is_empty() {
            return Err("content must not be empty".into());
        }

        let ingested = ingest::ingest(
            &self.store,
            self.extractor.as_ref(),
            &params.source_name,
            &params.content,
            self.config.extraction.max_input_chars,
        )
        .await
        .map_err(|e| e.to_string())?;

        let warning = (!ingested.saved).then_some("article kept in memory but not saved to disk");

        Ok(serde_json::json!({
            "article": ingested.article,
            "saved": ingested.saved,
            "warning": warning,
        })
        .to_string())
    }

    /// Answer a question from one article's content.
    #[tool(description = "Answer a question using a knowledge base article as context. Uses the given article_id, or the best keyword match for the question.")]
    async fn ask_knowledge(
        &self,
        Parameters(params): Parameters<AskKnowledgeParams>,
    ) -> Result<String, String> {
        let article = {
            let store = lock_store(&self.store);
            let found = match &params.article_id {
                Some(id) => store.get(id),
                None => rank(store.articles(), &params.question)
                    .first()
                    .map(|hit| hit.article.clone()),
            };
            found
        };

        let Some(article) = article else {
            return Err("no matching article; pass article_id".into());
        };

        tracing::info!(article = %article.id, "ask_knowledge called");

        let answer = query::answer(self.generator.as_ref(), &params.question, &article.content)
            .await
            .map_err(|e| e.to_string())?;

        Ok(serde_json::json!({
            "answer": answer,
            "article": article.summary(),
        })
        .to_string())
    }

    /// Export the whole knowledge base.
    #[tool(description = "Export the entire knowledge base as a pretty-printed JSON array of articles (id, title, content, keywords).")]
    async fn export_knowledge(&self) -> Result<String, String> {
        let store = lock_store(&self.store);
        tracing::info!(count = store.len(), "export_knowledge called");
        transfer::export_json(store.articles()).map_err(|e| format!("export failed: {e}"))
    }

    /// Replace the whole knowledge base.
    #[tool(description = "Replace the entire knowledge base with a JSON array of articles. Fails without changing anything if the payload is malformed.")]
    async fn import_knowledge(
        &self,
        Parameters(params): Parameters<ImportKnowledgeParams>,
    ) -> Result<String, String> {
        let mode = self.config.transfer.validation;
        let mut store = lock_store(&self.store);

        let count = transfer::import_json(&mut store, &params.payload, mode)
            .map_err(|e| e.to_string())?;

        Ok(serde_json::json!({
            "imported": count,
            "validation": mode,
            "saved": store.last_persist_error().is_none(),
        })
        .to_string())
    }
}

#[tool_handler]
impl ServerHandler for AlmanacTools {
    fn get_info(&self) -> rmcp::model::ServerInfo {
        rmcp::model::ServerInfo {
            instructions: Some(
                "Almanac is a personal knowledge base. Use search_knowledge to find articles, \
                 get_article to read one, ask_knowledge to answer from an article, and \
                 ingest_document to add new documents."
                    .into(),
            ),
            capabilities: rmcp::model::ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}
