//! Handler for the `install` command.

use colored::*;

use stylua_ls_lib::exit_codes::exit;
use stylua_ls_lib::release::ReleaseClient;
use stylua_ls_lib::{config, install, platform};

/// Handle the install command: download the StyLua binary into local
/// storage.
pub fn handle_install(version: Option<String>, force: bool) {
    let storage = config::storage_dir();
    let version_token = version.unwrap_or_else(|| "latest".to_string());

    let platform = match platform::current() {
        Ok(platform) => platform,
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            exit::tool_error();
        }
    };

    let installed = install::installed_path(&storage, &platform);
    if installed.is_file() && !force {
        println!(
            "stylua is already installed at {} (use {} to replace it)",
            installed.display(),
            "--force".cyan()
        );
        return;
    }

    let client = match ReleaseClient::new() {
        Ok(client) => client,
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

    println!("Downloading stylua ({version_token})...");
    match runtime.block_on(install::install(&client, &storage, &version_token)) {
        Ok(binary) => {
            println!(
                "{} Installed stylua {} at {}",
                "Success:".green().bold(),
                binary.tag,
                binary.path.display()
            );
        }
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            exit::tool_error();
        }
    }
}
