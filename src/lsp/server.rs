//! Language Server Protocol server for stylua-ls.
//!
//! Registers document and range formatting providers backed by the external
//! StyLua binary, a `stylua.reinstall` workspace command, and re-runs binary
//! reconciliation whenever the client pushes new configuration.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result as JsonRpcResult;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use crate::config::{self, Settings};
use crate::ignore_filter;
use crate::invoke::{self, FormatRange, FormatRequest};
use crate::lsp::types::{full_document_range, position_to_byte_offset, settings_from_value};
use crate::reconcile::{self, ResolvedBinary, UpdateStatus};
use crate::install;
use crate::release::ReleaseClient;

/// Workspace command forcing a fresh download of the binary.
pub const REINSTALL_COMMAND: &str = "stylua.reinstall";

/// Main LSP server for stylua-ls.
pub struct StyluaLanguageServer {
    client: Client,
    /// Configuration pushed by the editor.
    settings: Arc<RwLock<Settings>>,
    /// Document store for open files.
    documents: Arc<RwLock<HashMap<Url, String>>>,
    /// Session context: the binary formatting requests run against.
    /// Refreshed only by reconciliation and the reinstall command.
    session: Arc<RwLock<Option<ResolvedBinary>>>,
    /// First workspace folder reported by the client.
    workspace_root: Arc<RwLock<Option<PathBuf>>>,
    storage: PathBuf,
}

impl StyluaLanguageServer {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            settings: Arc::new(RwLock::new(Settings::default())),
            documents: Arc::new(RwLock::new(HashMap::new())),
            session: Arc::new(RwLock::new(None)),
            workspace_root: Arc::new(RwLock::new(None)),
            storage: config::storage_dir(),
        }
    }

    /// Resolve the binary for this session, optionally forcing a fresh
    /// download first, then run the update check if enabled.
    async fn reconcile(&self, force_install: bool) {
        let settings = self.settings.read().await.clone();

        let release_client = match ReleaseClient::new() {
            Ok(release_client) => release_client,
            Err(e) => {
                self.client
                    .show_message(MessageType::ERROR, format!("stylua: {e}"))
                    .await;
                return;
            }
        };

        if force_install {
            if let Err(e) =
                install::install(&release_client, &self.storage, settings.desired_version()).await
            {
                self.client
                    .show_message(MessageType::ERROR, format!("stylua install failed: {e}"))
                    .await;
                return;
            }
            self.client
                .show_message(MessageType::INFO, "stylua has been reinstalled")
                .await;
        }

        let resolved =
            match reconcile::resolve_binary(&settings, &self.storage, &release_client).await {
                Ok(resolved) => resolved,
                Err(e) => {
                    *self.session.write().await = None;
                    self.client
                        .show_message(MessageType::ERROR, format!("stylua: {e}"))
                        .await;
                    return;
                }
            };
        log::info!("using stylua at {}", resolved.path.display());
        *self.session.write().await = Some(resolved.clone());

        if settings.check_update && !force_install {
            match reconcile::check_for_update(&resolved, &settings, &release_client).await {
                UpdateStatus::UpToDate { current } => {
                    log::info!("stylua {current} is up to date");
                }
                UpdateStatus::Unknown { warning } => {
                    self.client
                        .show_message(MessageType::WARNING, format!("stylua: {warning}"))
                        .await;
                }
                UpdateStatus::UpdateAvailable { current, tag } => {
                    self.prompt_reinstall(&release_client, &settings, &current, &tag)
                        .await;
                }
            }
        }
    }

    /// Offer the user an install of `tag`, replacing `current`.
    async fn prompt_reinstall(
        &self,
        release_client: &ReleaseClient,
        settings: &Settings,
        current: &str,
        tag: &str,
    ) {
        let actions = vec![
            MessageActionItem {
                title: "Install".to_string(),
                properties: Default::default(),
            },
            MessageActionItem {
                title: "Later".to_string(),
                properties: Default::default(),
            },
        ];
        let choice = self
            .client
            .show_message_request(
                MessageType::INFO,
                format!("stylua {tag} is available (installed: {current}). Install it?"),
                Some(actions),
            )
            .await;

        if let Ok(Some(action)) = choice {
            if action.title == "Install" {
                match install::install(release_client, &self.storage, settings.desired_version())
                    .await
                {
                    Ok(binary) => {
                        *self.session.write().await = Some(ResolvedBinary {
                            path: binary.path,
                            source: reconcile::BinarySource::Downloaded,
                        });
                        self.client
                            .show_message(
                                MessageType::INFO,
                                format!("stylua {} installed", binary.tag),
                            )
                            .await;
                    }
                    Err(e) => {
                        self.client
                            .show_message(MessageType::ERROR, format!("stylua install failed: {e}"))
                            .await;
                    }
                }
            }
        }
    }

    /// Workspace root for a document: the client's first workspace folder,
    /// else the directory holding the file.
    async fn workspace_root_for(&self, uri: &Url) -> Option<PathBuf> {
        if let Some(root) = self.workspace_root.read().await.clone() {
            return Some(root);
        }
        uri.to_file_path()
            .ok()
            .and_then(|path| path.parent().map(Path::to_path_buf))
    }

    /// Shared path for both formatting entry points. Returns a single edit
    /// replacing the whole document, or `None` when the file is ignored or
    /// the request failed (failures are shown to the user, never thrown).
    async fn format_range_edits(&self, uri: &Url, range: Range) -> Option<Vec<TextEdit>> {
        let text = self.documents.read().await.get(uri)?.clone();

        let binary = match self.session.read().await.clone() {
            Some(binary) => binary,
            None => {
                self.client
                    .show_message(
                        MessageType::ERROR,
                        "stylua is not available; run the stylua.reinstall command",
                    )
                    .await;
                return None;
            }
        };

        let workspace_root = self.workspace_root_for(uri).await;
        if let (Some(root), Ok(file)) = (workspace_root.as_deref(), uri.to_file_path()) {
            if ignore_filter::is_ignored(root, &file) {
                log::debug!("{} is ignored by {}", file.display(), ignore_filter::IGNORE_FILE);
                return None;
            }
        }

        let settings = self.settings.read().await.clone();
        let mut request = FormatRequest::new(binary.path, text.clone());
        request.cwd = workspace_root;
        request.config_path = settings.config_path.map(PathBuf::from);
        request.range = Some(FormatRange {
            start: position_to_byte_offset(&text, range.start),
            end: position_to_byte_offset(&text, range.end),
        });

        match invoke::format_text(&request).await {
            Ok(formatted) => Some(vec![TextEdit {
                range: full_document_range(&text),
                new_text: formatted,
            }]),
            Err(e) => {
                self.client
                    .show_message(MessageType::ERROR, format!("stylua failed to format: {e}"))
                    .await;
                None
            }
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for StyluaLanguageServer {
    async fn initialize(&self, params: InitializeParams) -> JsonRpcResult<InitializeResult> {
        log::info!("initializing stylua language server");

        if let Some(options) = params.initialization_options {
            if let Some(settings) = settings_from_value(options) {
                *self.settings.write().await = settings;
            }
        }

        let root = params
            .workspace_folders
            .as_ref()
            .and_then(|folders| folders.first())
            .and_then(|folder| folder.uri.to_file_path().ok());
        *self.workspace_root.write().await = root;

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                document_formatting_provider: Some(OneOf::Left(true)),
                document_range_formatting_provider: Some(OneOf::Left(true)),
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: vec![REINSTALL_COMMAND.to_string()],
                    work_done_progress_options: WorkDoneProgressOptions::default(),
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "stylua-ls".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "stylua language server started")
            .await;

        // Resolve (and if necessary install) the binary up front so the
        // first formatting request doesn't pay for it.
        self.reconcile(false).await;
    }

    async fn shutdown(&self) -> JsonRpcResult<()> {
        log::info!("shutting down stylua language server");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        self.documents
            .write()
            .await
            .insert(params.text_document.uri, params.text_document.text);
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        // FULL sync: the last change carries the whole document.
        if let Some(change) = params.content_changes.into_iter().next_back() {
            self.documents
                .write()
                .await
                .insert(params.text_document.uri, change.text);
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.documents
            .write()
            .await
            .remove(&params.text_document.uri);
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        if let Some(settings) = settings_from_value(params.settings) {
            *self.settings.write().await = settings;
        }
        // The binary path may have changed with the settings.
        self.reconcile(false).await;
    }

    async fn formatting(
        &self,
        params: DocumentFormattingParams,
    ) -> JsonRpcResult<Option<Vec<TextEdit>>> {
        let uri = params.text_document.uri;
        // Whole-document formatting is range formatting over the full span.
        let range = match self.documents.read().await.get(&uri) {
            Some(text) => full_document_range(text),
            None => return Ok(None),
        };
        Ok(self.format_range_edits(&uri, range).await)
    }

    async fn range_formatting(
        &self,
        params: DocumentRangeFormattingParams,
    ) -> JsonRpcResult<Option<Vec<TextEdit>>> {
        let uri = params.text_document.uri;
        Ok(self.format_range_edits(&uri, params.range).await)
    }

    async fn execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> JsonRpcResult<Option<serde_json::Value>> {
        if params.command == REINSTALL_COMMAND {
            self.reconcile(true).await;
        } else {
            log::warn!("unknown command: {}", params.command);
        }
        Ok(None)
    }
}
