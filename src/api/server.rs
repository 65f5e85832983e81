// API server implementation
// Author: Gabriel Demetrios Lafis

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use log::info;

use crate::report::{DashboardService, DEFAULT_EXPORT_NAME};
use super::{routes, ApiState};

/// API server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    pub enable_cors: bool,
    pub default_export_name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            workers: num_cpus::get(),
            enable_cors: false,
            default_export_name: DEFAULT_EXPORT_NAME.to_string(),
        }
    }
}

/// API server
pub struct Server {
    config: ServerConfig,
    service: DashboardService,
}

impl Server {
    /// Create a new API server
    pub fn new(service: DashboardService, config: ServerConfig) -> Self {
        Server { config, service }
    }
    
    /// Run the API server
    pub async fn run(&self) -> std::io::Result<()> {
        let state = ApiState {
            service: self.service.clone(),
            default_export_name: self.config.default_export_name.clone(),
        };
        let enable_cors = self.config.enable_cors;
        
        info!(
            "Starting server at http://{}:{} (source: {})",
            self.config.host,
            self.config.port,
            self.service.source_name()
        );
        
        HttpServer::new(move || {
            let cors = if enable_cors {
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600)
            } else {
                Cors::default()
            };
            
            App::new()
                .app_data(web::Data::new(state.clone()))
                .wrap(cors)
                .configure(routes::configure)
        })
        .workers(self.config.workers)
        .bind((self.config.host.as_str(), self.config.port))?
        .run()
        .await
    }
}
