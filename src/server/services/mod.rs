pub mod app_services;
pub mod embed_services;
pub mod match_services;
pub mod upstream_services;

pub use embed_services::DynEmbedService;
pub use match_services::DynMatchService;
