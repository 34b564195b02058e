//! Language Server Protocol integration for stylua-ls.
//!
//! The server is built into the main binary and started with
//! `stylua-ls server`, speaking LSP over stdio (or TCP for debugging).

pub mod server;
pub mod types;

pub use server::{StyluaLanguageServer, REINSTALL_COMMAND};

use anyhow::Result;
use tokio::net::TcpListener;
use tower_lsp::{LspService, Server};

/// Start the LSP server over stdio. This is the entry point for
/// `stylua-ls server`.
pub async fn start_server() -> Result<()> {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(StyluaLanguageServer::new);

    log::info!("starting stylua language server over stdio");

    Server::new(stdin, stdout, socket).serve(service).await;

    Ok(())
}

/// Start the LSP server over TCP (useful for debugging).
pub async fn start_tcp_server(port: u16) -> Result<()> {
    let listener = TcpListener::bind(format!("127.0.0.1:{port}")).await?;
    log::info!("stylua language server listening on 127.0.0.1:{port}");

    loop {
        let (stream, _) = listener.accept().await?;
        let (service, socket) = LspService::new(StyluaLanguageServer::new);

        tokio::spawn(async move {
            let (read, write) = tokio::io::split(stream);
            Server::new(read, write, socket).serve(service).await;
        });
    }
}
