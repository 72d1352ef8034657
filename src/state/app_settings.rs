use log::LevelFilter;

#[derive(Debug, Default, Clone)]
pub struct AppSettings {
    pub log_level: Option<LevelFilter>,
}

impl AppSettings {
    pub fn load() -> Self {
        // Simple defaults — log level can be overridden via env var RUST_LOG in the future.
        Self { log_level: None }
    }
}
