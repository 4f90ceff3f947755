use clap::Parser;
use configs::{AppConfig, ServiceKind};
use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

/// Counter service: a single integer behind /get, /post, /set and /clear.
#[derive(Parser, Debug)]
#[command(name = "counter", version, about, long_about = None)]
struct Args {
    /// Address to listen on, e.g. 127.0.0.1:8083
    #[arg(long)]
    address: Option<String>,

    /// Path to configuration file (defaults to CONFIG_PATH or config.toml when present)
    #[arg(short, long)]
    config: Option<String>,
}

fn main() -> std::process::ExitCode {
    let args = Args::parse();
    // 提前加载 .env，使得 RUST_LOG / DATABASE_URL 等环境变量生效
    dotenv().ok();
    common::utils::logging::init_logging_from_env();

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(service = "counter", event = "panic", %service_id, pid, message = %info, "unhandled panic occurred");
    }));

    let mut cfg = match AppConfig::load_and_validate(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "counter", event = "config_invalid", error = %e, "cannot load configuration");
            return std::process::ExitCode::FAILURE;
        }
    };
    if let Some(address) = args.address {
        cfg.counter.address = Some(address);
    }
    let addr = match cfg.bind_addr(ServiceKind::Counter) {
        Ok(addr) => addr,
        Err(e) => {
            error!(service = "counter", event = "config_invalid", error = %e, "invalid --address");
            return std::process::ExitCode::FAILURE;
        }
    };
    let worker_threads = cfg.counter.worker_threads;

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads { builder.worker_threads(w); }
    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "counter", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(service = "counter", event = "start", %service_id, pid, version, %addr, "counter service starting");

    match rt.block_on(server::run_counter(cfg, addr)) {
        Ok(()) => {
            info!(service = "counter", event = "stop", %service_id, pid, "counter service stopped");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            let reason = format!("{e:#}");
            error!(service = "counter", event = "run_failed", %service_id, error = %reason, "counter service failed");
            std::process::ExitCode::FAILURE
        }
    }
}
