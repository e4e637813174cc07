use bookshelf_mcp::config::Config;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    bookshelf_mcp::logging::init_logger(config.verbose);

    bookshelf_mcp::interface::mcp::run(config).await
}
