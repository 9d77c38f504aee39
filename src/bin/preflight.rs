use todo_service::infra::config::{Backend, Config};
use todo_service::infra::telemetry;
use todo_service::storage::{self, TodoStore};
use tracing::info;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight\n\
         \n\
         Reads env vars (or .env):\n\
           TODO_BACKEND (memory | postgres), DATABASE_URL, DB_MAX_CONNECTIONS, BIND_ADDR\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    telemetry::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }

    let config = Config::from_env()?;
    info!(
        backend = ?config.backend,
        bind_addr = %config.bind_addr,
        max_connections = config.max_connections,
        "preflight"
    );
    if config.backend == Backend::Memory {
        info!("memory backend needs no external services");
    }

    let store = storage::connect(&config).await?;
    store.ping().await?;
    let count = store.list().await?.len();
    info!(backend = store.backend(), todos = count, "preflight OK");
    Ok(())
}
