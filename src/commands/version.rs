//! Handler for the `version` command.

use colored::*;

use stylua_ls_lib::config::{self, Settings};
use stylua_ls_lib::exit_codes::exit;
use stylua_ls_lib::invoke;
use stylua_ls_lib::reconcile::{self, UpdateStatus};
use stylua_ls_lib::release::ReleaseClient;

/// Handle the version command: report the resolved binary, its version,
/// and whether the desired release differs.
pub fn handle_version(stylua_path: Option<String>, stylua_version: Option<String>) {
    let settings = Settings {
        stylua_path,
        stylua_version,
        ..Default::default()
    };
    let storage = config::storage_dir();

    let resolved = match reconcile::locate_existing(&settings, &storage) {
        Ok(Some(resolved)) => resolved,
        Ok(None) => {
            println!(
                "stylua is not installed (run {} first)",
                "stylua-ls install".cyan()
            );
            return;
        }
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            exit::tool_error();
        }
    };

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!(
            "{}: Failed to create Tokio runtime: {}",
            "Error".red().bold(),
            e
        );
        exit::tool_error();
    });

    runtime.block_on(async {
        println!("binary: {}", resolved.path.display());

        match invoke::query_version(&resolved.path).await {
            Ok(current) => println!("version: {current}"),
            Err(e) => {
                eprintln!("{}: {}", "Error".red().bold(), e);
                exit::tool_error();
            }
        }

        let client = match ReleaseClient::new() {
            Ok(client) => client,
            Err(e) => {
                eprintln!("{}: {}", "Warning".yellow().bold(), e);
                return;
            }
        };
        match reconcile::check_for_update(&resolved, &settings, &client).await {
            UpdateStatus::UpToDate { .. } => {
                println!("{} up to date", "Status:".green().bold());
            }
            UpdateStatus::UpdateAvailable { tag, .. } => {
                println!(
                    "{} {} is available (run {})",
                    "Status:".yellow().bold(),
                    tag,
                    "stylua-ls install --force".cyan()
                );
            }
            UpdateStatus::Unknown { warning } => {
                println!("{} {}", "Warning:".yellow().bold(), warning);
            }
        }
    });
}
