use actix_web::web;

pub mod health;
pub mod items;

/// Register every route. Shared by `main` and the integration tests so both
/// serve the same paths.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check: /health
    cfg.configure(health::configure_routes);

    // Inventory items: /api/inventory/**
    cfg.service(web::scope("/api/inventory").configure(items::configure_routes));
}
