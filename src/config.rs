//! Command line configuration.

use std::path::PathBuf;

use clap::Parser;

/// 既定の保存先ファイル
pub const DEFAULT_STORE_PATH: &str = "library.json";

#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "bookshelf-mcp")]
#[command(about = "Personal book catalog served over MCP (stdio)", version)]
pub struct Config {
    /// Library を保存する JSON ファイル
    #[arg(default_value = DEFAULT_STORE_PATH)]
    pub store_path: PathBuf,

    #[arg(short, long, help = "Enable debug logging")]
    pub verbose: bool,
}
