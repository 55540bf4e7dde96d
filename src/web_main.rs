//! 翻译网关 Web 服务主程序入口

use clap::Parser;
use tracing_subscriber::EnvFilter;

use translation_gateway::env::{self as gateway_env, EnvVar};
use translation_gateway::translation::config::{load_translation_config, ConfigManager};
use translation_gateway::web::{WebConfig, WebServer};

#[derive(Parser, Debug)]
#[command(name = "translation-gateway", version, about = "Caching translation gateway")]
struct Args {
    /// Bind address [default: 127.0.0.1]
    #[arg(short, long)]
    bind: Option<String>,

    /// Port number [default: 7080]
    #[arg(short, long)]
    port: Option<u16>,

    /// Path to a TOML or JSON configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Print the supported environment variables and exit
    #[arg(long)]
    print_env_docs: bool,

    /// Write an example TOML configuration file to the given path and exit
    #[arg(long, value_name = "PATH")]
    init_config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.print_env_docs {
        print!("{}", gateway_env::generate_env_docs());
        return Ok(());
    }

    if let Some(path) = args.init_config.as_deref() {
        ConfigManager::generate_example_config(path)?;
        println!("Example configuration written to {}", path);
        return Ok(());
    }

    let log_level = gateway_env::core::LogLevel::get_or_default("info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .init();

    let translation_config = match args.config.as_deref() {
        Some(path) => ConfigManager::from_path(path)?.into_config(),
        None => load_translation_config(),
    };

    let mut web_config = WebConfig::default();
    if let Some(bind) = args.bind {
        web_config.bind_addr = bind;
    }
    if let Some(port) = args.port {
        web_config.port = port;
    }

    let server = WebServer::new(web_config, translation_config);
    server.start().await?;

    Ok(())
}
