pub mod health_controller;
pub mod match_controller;
pub mod vidsrc_controller;
