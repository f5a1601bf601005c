mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "cambio={level},server={level}",
            level = settings.app.level
        ))
        .init();

    let addr = format!("{}:{}", settings.server.bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    server::run_with_listener(listener).await?;
    Ok(())
}
