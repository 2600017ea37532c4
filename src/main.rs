use clap::{Args, Parser, Subcommand};
use std::sync::Arc;
use stock_forecast_api::handler::lambda_handler;
use stock_forecast_api::{create_router, AlpacaClient, AppConfig, AppState, ForecastEvent};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Stock Forecast CLI
#[derive(Parser)]
#[command(name = "stock-forecast-api")]
#[command(about = "Fetch historical stock bars and produce a close-price forecast")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the forecast HTTP server
    Serve(ServeArgs),
    /// Run one forecast and print the response envelope as JSON
    Forecast(ForecastArgs),
}

#[derive(Args)]
struct ServeArgs {
    /// Bind address (overrides BIND_ADDR)
    #[arg(long)]
    bind: Option<String>,
}

#[derive(Args)]
struct ForecastArgs {
    /// Trading symbol
    #[arg(long, default_value = "AAPL")]
    symbol: String,

    /// Range start (YYYY-MM-DD)
    #[arg(long, default_value = "2022-12-02")]
    start: String,

    /// Range end (YYYY-MM-DD)
    #[arg(long, default_value = "2023-12-07")]
    end: String,

    /// Bar granularity: Minute, Hour, Day, Week or Month
    #[arg(long, default_value = "Hour")]
    timeframe: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if present)
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stock_forecast_api=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env();

    match cli.command {
        Commands::Serve(args) => serve(config, args).await,
        Commands::Forecast(args) => forecast_once(config, args).await,
    }
}

async fn serve(config: AppConfig, args: ServeArgs) -> anyhow::Result<()> {
    let client = AlpacaClient::new(config.alpaca_settings()?)?;
    let state = Arc::new(AppState {
        source: Arc::new(client),
        search: config.search.clone(),
    });

    let app = create_router(state);

    let addr = args.bind.unwrap_or(config.bind);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("🚀 Stock Forecast API server running on http://{}", addr);
    tracing::info!("📊 Health check: http://{}/health", addr);
    tracing::info!("📚 Swagger UI: http://{}/swagger-ui", addr);
    tracing::info!("📈 Forecast: POST http://{}/api/v1/forecast", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

async fn forecast_once(config: AppConfig, args: ForecastArgs) -> anyhow::Result<()> {
    let client = AlpacaClient::new(config.alpaca_settings()?)?;

    let event = ForecastEvent {
        symbol: args.symbol,
        start: args.start,
        end: args.end,
        timeframe: args.timeframe,
    };

    let response = lambda_handler(&event, &client, &config.search).await;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
