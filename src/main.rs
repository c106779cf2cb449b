use bbq2026::app;
use bbq2026::config::SiteConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = SiteConfig::load();
    app::run(config).await?;

    Ok(())
}
