pub mod client;
pub mod config;
pub mod controllers;
pub mod dto;
pub mod entity;
pub mod error;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod utils;

#[cfg(test)]
mod test_support;

use crate::{client::db::DatabaseClient, config::ServiceConfig};
use std::sync::Arc;

#[derive(Clone)]
pub struct ServiceState {
    pub config: Arc<ServiceConfig>,
    pub db: Arc<DatabaseClient>,
}
