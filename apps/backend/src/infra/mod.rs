//! Infrastructure layer: store error mapping, schema provisioning, state building.

pub mod db_errors;
pub mod schema;
pub mod state;
