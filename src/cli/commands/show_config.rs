use crate::config::AppConfig;

/// Secrets and the connection string are `skip_serializing` on the config
/// types, so nothing sensitive reaches stdout.
pub fn handle(config: &AppConfig, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }

    println!("environment:        {:?}", config.environment);
    println!("port:               {}", config.port);
    println!("max connections:    {}", config.database.max_connections);
    println!("acquire timeout:    {}s", config.database.connection_timeout);
    println!("statement timeout:  {}ms", config.database.statement_timeout_ms);
    println!("page size:          {}", config.api.page_size);
    println!("request logging:    {}", config.api.enable_request_logging);
    println!("token lifetime:     {}h", config.security.jwt_expiry_hours);
    println!("cors:               {}", config.security.enable_cors);
    Ok(())
}
