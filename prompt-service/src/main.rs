use prompt_service::config::PromptConfig;
use prompt_service::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = PromptConfig::load()?;

    let directives = format!("{},prompt_service=debug", config.common.log_level);
    init_tracing("prompt-service", &directives);

    let application = Application::build(config).await?;
    application.run_until_stopped().await?;

    Ok(())
}
