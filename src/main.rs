use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "stylua-ls", author, version, about, long_about = None)]
struct Cli {
    /// Command to run
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the Language Server Protocol server
    Server {
        /// Listen on a TCP port instead of stdio (for debugging)
        #[arg(long)]
        port: Option<u16>,

        /// Use stdio transport (the default)
        #[arg(long, default_value = "false")]
        stdio: bool,

        /// Show detailed output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Download the StyLua binary into local storage
    Install {
        /// Release version to install ("latest" or an exact version)
        #[arg(long)]
        version: Option<String>,

        /// Replace an existing installation
        #[arg(short, long)]
        force: bool,
    },

    /// Show the resolved binary, its version, and update status
    Version {
        /// Explicit path to a stylua binary
        #[arg(long)]
        stylua_path: Option<String>,

        /// Desired release version to compare against
        #[arg(long)]
        stylua_version: Option<String>,
    },

    /// Format Lua source from stdin to stdout
    Format {
        /// Byte offset where formatting starts
        #[arg(long, requires = "range_end")]
        range_start: Option<usize>,

        /// Byte offset where formatting ends
        #[arg(long, requires = "range_start")]
        range_end: Option<usize>,

        /// Filename to use for .styluaignore matching
        #[arg(long)]
        stdin_filepath: Option<String>,

        /// Path to a stylua.toml passed through to the binary
        #[arg(long)]
        config_path: Option<String>,

        /// Explicit path to a stylua binary
        #[arg(long)]
        stylua_path: Option<String>,
    },
}

fn main() {
    // Logging goes to stderr, which stays out of the LSP stdio channel.
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Server {
            port,
            stdio,
            verbose,
        } => commands::server::handle_server(port, stdio, verbose),
        Commands::Install { version, force } => commands::install::handle_install(version, force),
        Commands::Version {
            stylua_path,
            stylua_version,
        } => commands::version::handle_version(stylua_path, stylua_version),
        Commands::Format {
            range_start,
            range_end,
            stdin_filepath,
            config_path,
            stylua_path,
        } => commands::format::handle_format(commands::format::FormatOptions {
            range_start,
            range_end,
            stdin_filepath,
            config_path,
            stylua_path,
        }),
    }
}
