use std::env;
use std::path::PathBuf;

/// Environment variable naming the dataset to open at startup.
pub const DATA_PATH_ENV: &str = "RUSTY_NAVEL_DATA";
/// Dataset opened when neither a CLI argument nor the env var is given.
pub const DEFAULT_DATA_PATH: &str = "samples.json";

/// Startup configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            window_size: [1400.0, 900.0],
            min_window_size: [800.0, 500.0],
        }
    }
}

impl DashboardConfig {
    /// First CLI argument, then `RUSTY_NAVEL_DATA`, then `samples.json`.
    pub fn from_env() -> Self {
        Self::resolve(env::args().nth(1), env::var(DATA_PATH_ENV).ok())
    }

    fn resolve(arg: Option<String>, env_path: Option<String>) -> Self {
        let non_blank = |p: &String| !p.trim().is_empty();
        let data_path = arg
            .filter(non_blank)
            .or(env_path.filter(non_blank))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        Self {
            data_path,
            ..Default::default()
        }
    }
}
