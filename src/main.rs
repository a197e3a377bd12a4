mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // 默认只输出警告，需要排查时用 RUST_LOG=debug
    restpad::logger::init_logger("warn");

    let cli = Cli::parse();
    cli::run(cli).await
}
