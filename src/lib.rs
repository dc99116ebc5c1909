pub mod cache;
pub mod executive;
pub mod export;
pub mod generator;
pub mod metrics;
pub mod models;
pub mod report;
pub mod sampling;
