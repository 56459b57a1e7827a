use tracing::warn;

pub struct Config {
    pub data_dir: String,
    pub warnings: bool,
}

impl Config {
    const DEFAULT_DATA_DIR: &str = "./data";

    pub fn from_env() -> Self {
        let data_dir = std::env::var("AMBER_DATA_DIR").unwrap_or_else(|_| {
            warn!(
                "AMBER_DATA_DIR not set, using default data directory '{}'",
                Self::DEFAULT_DATA_DIR
            );
            Self::DEFAULT_DATA_DIR.to_string()
        });
        let warnings = std::env::var("AMBER_WARNINGS")
            .map(|v| matches!(v.trim(), "1" | "true" | "yes" | "on"))
            .unwrap_or(false);
        Self { data_dir, warnings }
    }

    /// Applies the configured diagnostics toggle process-wide.
    pub fn apply(&self) {
        crate::enable_warnings(self.warnings);
    }
}
