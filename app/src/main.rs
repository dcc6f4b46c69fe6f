use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pool_watch::init_tracing()?;

    // Config file from the first argument or POOL_CONFIG
    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("POOL_CONFIG").map(PathBuf::from));

    pool_watch::run(config_path.as_deref()).await
}
