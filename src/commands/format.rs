//! Handler for the `format` command.
//!
//! Pipes stdin through the resolved binary, mirroring the editor flow:
//! `.styluaignore` is honored when a filename is supplied, and range flags
//! are forwarded as byte offsets.

use std::io::Read;
use std::path::PathBuf;

use colored::*;

use stylua_ls_lib::config::{self, Settings};
use stylua_ls_lib::exit_codes::exit;
use stylua_ls_lib::ignore_filter;
use stylua_ls_lib::invoke::{self, FormatRange, FormatRequest};
use stylua_ls_lib::reconcile;
use stylua_ls_lib::release::ReleaseClient;

pub struct FormatOptions {
    pub range_start: Option<usize>,
    pub range_end: Option<usize>,
    /// Filename the stdin content notionally has, for ignore matching.
    pub stdin_filepath: Option<String>,
    pub config_path: Option<String>,
    pub stylua_path: Option<String>,
}

/// Handle the format command: read stdin, format it, write stdout.
pub fn handle_format(options: FormatOptions) {
    let mut content = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut content) {
        eprintln!("{}: failed to read stdin: {}", "Error".red().bold(), e);
        exit::tool_error();
    }

    let workspace_root = std::env::current_dir().unwrap_or_else(|e| {
        eprintln!("{}: {}", "Error".red().bold(), e);
        exit::tool_error();
    });

    // An ignored file passes through unchanged.
    if let Some(filepath) = &options.stdin_filepath {
        if ignore_filter::is_ignored(&workspace_root, &PathBuf::from(filepath)) {
            print!("{content}");
            return;
        }
    }

    let settings = Settings {
        stylua_path: options.stylua_path,
        config_path: options.config_path,
        check_update: false,
        ..Default::default()
    };
    let storage = config::storage_dir();

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

    runtime.block_on(async {
        let resolved = match reconcile::resolve_binary(&settings, &storage, &client).await {
            Ok(resolved) => resolved,
            Err(e) => {
                eprintln!("{}: {}", "Error".red().bold(), e);
                exit::tool_error();
            }
        };

        let mut request = FormatRequest::new(resolved.path, content);
        request.cwd = Some(workspace_root);
        request.config_path = settings.config_path.as_deref().map(PathBuf::from);
        if let (Some(start), Some(end)) = (options.range_start, options.range_end) {
            request.range = Some(FormatRange { start, end });
        }

        match invoke::format_text(&request).await {
            Ok(formatted) => println!("{formatted}"),
            Err(e) => {
                eprintln!("{}: {}", "Error".red().bold(), e);
                exit::tool_error();
            }
        }
    });
}
