use std::process;

use actix_web::{web, App, HttpServer};
use db_infra::{DbSettings, StartupPolicy};
use inventory_service::config::ServerConfig;
use inventory_service::infra::state::build_state;
use inventory_service::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use inventory_service::routes;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Configuration comes from the process environment only.
    let (server, settings, policy) = match load_config() {
        Ok(config) => config,
        Err(e) => {
            error!("startup=config_error error={e}");
            process::exit(1);
        }
    };

    // Blocks until the store is reachable and provisioned, or gives up.
    let app_state = match build_state()
        .with_db(settings)
        .with_startup_policy(policy)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!("startup=aborted error={e}");
            process::exit(1);
        }
    };

    let data = web::Data::new(app_state);

    info!("server=listening host={} port={}", server.host, server.port);

    HttpServer::new(move || {
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind(server.bind_addr())?
    .run()
    .await
}

fn load_config() -> Result<(ServerConfig, DbSettings, StartupPolicy), String> {
    let server = ServerConfig::from_env().map_err(|e| e.to_string())?;
    let settings = DbSettings::from_env().map_err(|e| e.to_string())?;
    let policy = StartupPolicy::from_env().map_err(|e| e.to_string())?;
    Ok((server, settings, policy))
}
