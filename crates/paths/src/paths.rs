//! Where the banner keeps its settings and log files.

use std::path::{Path, PathBuf};
use std::sync::Arc;

/// How the binary was launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnvironment {
    /// `cargo run` or a binary inside a `target/` directory
    Development,
    /// Installed binary
    Production,
}

/// Resolves the on-disk layout `<base>/<owner>/<app_id>/...`.
#[derive(Debug, Clone)]
pub struct PathContext {
    environment: RuntimeEnvironment,
    base_path: Arc<Path>,
    owner: String,
    app_id: &'static str,
}

impl PathContext {
    /// Detects the runtime environment and picks the matching base directory.
    pub fn new(owner: impl Into<String>, app_id: &'static str) -> Self {
        let environment = Self::detect_environment();
        Self {
            environment,
            base_path: Self::default_base_path(environment).into(),
            owner: owner.into(),
            app_id,
        }
    }

    /// Uses an explicit base directory (debug builds and tests).
    pub fn with_base_path(
        base_path: impl Into<PathBuf>,
        owner: impl Into<String>,
        app_id: &'static str,
    ) -> Self {
        Self {
            environment: Self::detect_environment(),
            base_path: base_path.into().into(),
            owner: owner.into(),
            app_id,
        }
    }

    fn detect_environment() -> RuntimeEnvironment {
        let in_target_dir = std::env::current_exe()
            .map(|exe| exe.components().any(|c| c.as_os_str() == "target"))
            .unwrap_or(false);

        if in_target_dir || std::env::var_os("CARGO_MANIFEST_DIR").is_some() {
            RuntimeEnvironment::Development
        } else {
            RuntimeEnvironment::Production
        }
    }

    fn default_base_path(environment: RuntimeEnvironment) -> PathBuf {
        match environment {
            RuntimeEnvironment::Development => std::env::var_os("CARGO_MANIFEST_DIR")
                .map(PathBuf::from)
                .or_else(|| std::env::current_dir().ok())
                .unwrap_or_else(|| PathBuf::from(".")),
            // XDG_DATA_HOME / Application Support / LocalAppData
            RuntimeEnvironment::Production => dirs::data_local_dir()
                .map(|dir| dir.join("HeroBanner"))
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }

    pub fn environment(&self) -> RuntimeEnvironment {
        self.environment
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn app_id(&self) -> &str {
        self.app_id
    }

    /// `<base>/<owner>/<app_id>`
    pub fn app_root(&self) -> PathBuf {
        self.base_path.join(&self.owner).join(self.app_id)
    }

    /// `<app_root>/<app_id>.settings.ron`
    pub fn settings_file(&self) -> PathBuf {
        self.app_root()
            .join(format!("{}.settings.ron", self.app_id))
    }

    /// `<app_root>/logs/`
    pub fn logs_dir(&self) -> PathBuf {
        self.app_root().join("logs")
    }

    /// `<app_root>/logs/<app_id>.<timestamp>.log`
    pub fn log_file(&self, timestamp: &str) -> PathBuf {
        self.logs_dir()
            .join(format!("{}.{}.log", self.app_id, timestamp))
    }

    pub fn log_file_now(&self) -> PathBuf {
        let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S").to_string();
        self.log_file(&timestamp)
    }

    /// Creates the app root and the log directory.
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        for dir in [self.app_root(), self.logs_dir()] {
            if !dir.exists() {
                std::fs::create_dir_all(&dir)?;
            }
        }
        Ok(())
    }
}
