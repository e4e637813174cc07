//! MCP Server for bookshelf-mcp
//!
//! MCP Protocol (stdio) <-> application::LibraryService
//!
//! 5 tools: books, book_add, book_remove, book_toggle_read, books_sort

use std::sync::{Arc, Mutex};

use rmcp::{
    handler::server::{tool::ToolCallContext, tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolRequestParams, CallToolResult, Content, Implementation, ListToolsResult,
        PaginatedRequestParams, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
    transport::stdio,
    ErrorData as McpError, ServerHandler, ServiceExt,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::application::error::AppError;
use crate::application::service::LibraryService;
use crate::application::view::{self, BookForm, DUPLICATE_MESSAGE};
use crate::config::Config;
use crate::domain::error::DomainError;
use crate::domain::model::library::Library;
use crate::domain::model::sort::SortField;
use crate::infra::json_store::JsonFileStore;
use crate::infra::local_storage::LocalStorageRepository;

type Service = LibraryService<LocalStorageRepository<JsonFileStore>>;

// =============================================================================
// Public entry point
// =============================================================================

/// 保存済みLibraryを読み込んでからMCP Serverを起動する。
/// 保存値が壊れていれば起動せずにエラーを返す。
pub async fn run(config: Config) -> anyhow::Result<()> {
    let repo = LocalStorageRepository::new(JsonFileStore::new(&config.store_path));
    let service = LibraryService::open(repo)?;
    tracing::info!(path = %config.store_path.display(), "serving bookshelf over stdio");

    let server = BookshelfMcpServer::new(service);
    let running = server.serve(stdio()).await?;
    running.waiting().await?;
    Ok(())
}

// =============================================================================
// MCP Server
// =============================================================================

#[derive(Clone)]
struct BookshelfMcpServer {
    service: Arc<Mutex<Service>>,
    tool_router: ToolRouter<Self>,
}

impl BookshelfMcpServer {
    fn new(service: Service) -> Self {
        Self {
            service: Arc::new(Mutex::new(service)),
            tool_router: Self::tool_router(),
        }
    }

    /// ロックを取ってServiceを操作する。
    fn with_service<T>(
        &self,
        f: impl FnOnce(&mut Service) -> Result<T, AppError>,
    ) -> Result<T, McpError> {
        let mut guard = self
            .service
            .lock()
            .map_err(|_| McpError::internal_error("Lock poisoned", None))?;
        f(&mut *guard).map_err(Self::to_mcp_error)
    }

    fn to_mcp_error(e: AppError) -> McpError {
        match e {
            AppError::Domain(DomainError::DuplicateTitle(title)) => {
                McpError::invalid_params(format!("{DUPLICATE_MESSAGE}: '{title}'"), None)
            }
            AppError::Domain(DomainError::BookNotFound(title)) => McpError::invalid_params(
                format!("No book titled '{title}'. Run `books` to see the current list."),
                None,
            ),
            AppError::Domain(e @ DomainError::UnknownSortField(_)) => {
                McpError::invalid_params(e.to_string(), None)
            }
            e @ AppError::Storage(_) => McpError::internal_error(e.to_string(), None),
        }
    }

    // --- text builders (tool本体。テストから直接呼べるようにString返し) ---

    fn books_text(&self) -> Result<String, McpError> {
        self.with_service(|svc| Ok(render_library(svc.library())))
    }

    fn add_text(&self, req: McpBookAddRequest) -> Result<String, McpError> {
        let form = BookForm {
            title: req.title,
            author: req.author,
            pages: req.pages,
            is_read: req.is_read.unwrap_or(false),
        };
        let title = form.title.clone();
        self.with_service(|svc| {
            svc.add_book(form.into_record())?;
            Ok(format!("Added: {title}\n\n{}", render_library(svc.library())))
        })
    }

    fn remove_text(&self, req: McpTitleRequest) -> Result<String, McpError> {
        self.with_service(|svc| {
            let removed = svc.remove_book(&req.title)?;
            let head = if removed {
                format!("Removed: {}", req.title)
            } else {
                format!("Nothing to remove: '{}' is not in the library", req.title)
            };
            Ok(format!("{head}\n\n{}", render_library(svc.library())))
        })
    }

    fn toggle_text(&self, req: McpTitleRequest) -> Result<String, McpError> {
        self.with_service(|svc| {
            let is_read = svc.toggle_read(&req.title)?;
            let label = if is_read { "Read" } else { "Not Read" };
            Ok(format!(
                "{} → {label}\n\n{}",
                req.title,
                render_library(svc.library())
            ))
        })
    }

    fn sort_text(&self, req: McpSortRequest) -> Result<String, McpError> {
        let field: SortField = req
            .field
            .parse()
            .map_err(|e: DomainError| Self::to_mcp_error(e.into()))?;
        self.with_service(|svc| {
            svc.sort_by(field)?;
            Ok(format!(
                "Sorted by {field}\n\n{}",
                render_library(svc.library())
            ))
        })
    }
}

fn render_library(library: &Library) -> String {
    if library.is_empty() {
        return "Library is empty. Use `book_add` to add books.".to_string();
    }
    view::render_text(library)
}

// =============================================================================
// ServerHandler impl
// =============================================================================

impl ServerHandler for BookshelfMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "bookshelf-mcp".to_string(),
                title: Some("Bookshelf MCP — Personal Book Catalog".to_string()),
                description: Some(
                    "Record books (title, author, pages, read status), sort and remove them. \
                     Titles are unique and identify each book."
                        .to_string(),
                ),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Keep a personal reading list.\n\
                 \n\
                 Tools: `books` to list → `book_add` / `book_remove` / `book_toggle_read` / `books_sort`. \
                 Pass a book's title exactly as shown by `books`. Every change is saved immediately."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tool_router.list_all(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let tool_ctx = ToolCallContext::new(self, request, context);
        self.tool_router.call(tool_ctx).await
    }
}

// =============================================================================
// Request types
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpBooksRequest {}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpBookAddRequest {
    #[schemars(description = "Book title (unique, case-sensitive)")]
    pub title: String,
    #[schemars(description = "Author name")]
    pub author: String,
    #[schemars(description = "Page count as typed (e.g. '412'). Stored verbatim.")]
    pub pages: String,
    #[schemars(description = "Already read? (default: false)")]
    pub is_read: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpTitleRequest {
    #[schemars(description = "Exact book title as shown by `books`")]
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpSortRequest {
    #[schemars(description = "Sort key: title, author, or pages (pages sort numerically)")]
    pub field: String,
}

// =============================================================================
// Tool implementations
// =============================================================================

#[tool_router]
impl BookshelfMcpServer {
    #[tool(
        name = "books",
        description = "List every book in the library in its current order, with author, page count, and read status.",
        annotations(
            read_only_hint = true,
            destructive_hint = false,
            open_world_hint = false
        )
    )]
    async fn books(
        &self,
        #[allow(unused_variables)] Parameters(_req): Parameters<McpBooksRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(
            self.books_text()?,
        )]))
    }

    #[tool(
        name = "book_add",
        description = "Add a book to the end of the library. Fails if a book with the same title already exists.",
        annotations(
            read_only_hint = false,
            destructive_hint = false,
            idempotent_hint = false,
            open_world_hint = false
        )
    )]
    async fn book_add(
        &self,
        Parameters(req): Parameters<McpBookAddRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(
            self.add_text(req)?,
        )]))
    }

    #[tool(
        name = "book_remove",
        description = "Remove the book with exactly this title. Removing a missing title does nothing.",
        annotations(
            read_only_hint = false,
            destructive_hint = true,
            idempotent_hint = true,
            open_world_hint = false
        )
    )]
    async fn book_remove(
        &self,
        Parameters(req): Parameters<McpTitleRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(
            self.remove_text(req)?,
        )]))
    }

    #[tool(
        name = "book_toggle_read",
        description = "Flip the read status of the book with exactly this title.",
        annotations(
            read_only_hint = false,
            destructive_hint = false,
            idempotent_hint = false,
            open_world_hint = false
        )
    )]
    async fn book_toggle_read(
        &self,
        Parameters(req): Parameters<McpTitleRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(
            self.toggle_text(req)?,
        )]))
    }

    #[tool(
        name = "books_sort",
        description = "Reorder the library by title, author, or pages. The new order is saved.",
        annotations(
            read_only_hint = false,
            destructive_hint = false,
            idempotent_hint = true,
            open_world_hint = false
        )
    )]
    async fn books_sort(
        &self,
        Parameters(req): Parameters<McpSortRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(
            self.sort_text(req)?,
        )]))
    }
}

// =============================================================================
// Tests
// =============================================================================
