use thiserror::Error;

use crate::core::io::bvh::BvhError;
use crate::core::io::config::ConfigError;
use crate::core::io::export::ExportError;
use crate::core::models::error::QueryError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to parse motion capture: {0}")]
    Parse(#[from] BvhError),

    #[error("Motion query failed: {0}")]
    Query(#[from] QueryError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to export motion table: {0}")]
    Export(#[from] ExportError),
}
