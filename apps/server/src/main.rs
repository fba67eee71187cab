use anyhow::Context;
use lct::kernel::config::load_config;
use lct::kernel::prelude::ApiConfig;
use lct_server::{Server, init_logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg: ApiConfig = load_config(None::<&str>).context("Critical: Configuration is malformed")?;

    let _log = init_logging(&cfg)?;

    Server::builder().config(cfg).build()?.run().await
}
