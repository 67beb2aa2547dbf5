// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tool configuration loaded from environment variables.

/// Environment configuration. Command-line flags override it.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of worker threads for parallel sector processing.
    pub worker_threads: usize,
    /// Fail sectors whose ear clipping runs out of attempts.
    pub strict_clip: bool,
    /// Collect and print per-stage timings.
    pub timings: bool,
    /// Log filter directive.
    pub log_filter: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            worker_threads: std::env::var("SECTOR_TESS_WORKER_THREADS")
                .unwrap_or_else(|_| num_cpus::get().to_string())
                .parse()
                .unwrap_or_else(|_| num_cpus::get()),
            strict_clip: env_flag("SECTOR_TESS_STRICT_CLIP"),
            timings: env_flag("SECTOR_TESS_TIMINGS"),
            log_filter: std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,sector_tess_geometry=warn".into()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| parse_flag(&v))
        .unwrap_or(false)
}

/// "1", "true", "yes" and "on" (any case) are set; everything else is not.
fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
