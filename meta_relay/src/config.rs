use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use overlay_common::frame_file::{FrameFileNaming, DEFAULT_EXTENSION, DEFAULT_PREFIX};
use serde::{Deserialize, Serialize};

/// Looked up in the working directory when no file is given explicitly.
pub const DEFAULT_CONFIG_FILE: &str = "relay";
pub const ENV_PREFIX: &str = "RELAY";

/// Configuration for the relay server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelayConfig {
    pub host: String,
    pub port: u16,
    /// Directory frame files are written to.
    pub meta_dir: PathBuf,
    pub file_prefix: String,
    pub file_extension: String,
    /// Optional directory served for any other GET path.
    pub static_dir: Option<PathBuf>,
    /// File under `static_dir` served at `/`.
    pub index_file: String,
    pub body_limit_bytes: usize,
    pub cors: bool,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            meta_dir: PathBuf::from("TestTraffic"),
            file_prefix: DEFAULT_PREFIX.to_string(),
            file_extension: DEFAULT_EXTENSION.to_string(),
            static_dir: None,
            index_file: "game.html".to_string(),
            body_limit_bytes: 1024 * 1024,
            cors: true,
        }
    }
}

impl RelayConfig {
    /// Layered load: defaults, then the config file, then `RELAY_*`
    /// environment variables, then `PORT`.
    ///
    /// An explicitly given file must exist; the default `relay.*` file is
    /// optional.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let defaults = config::Config::try_from(&Self::default())
            .context("Failed to build default configuration")?;

        let mut builder = config::Config::builder().add_source(defaults);
        builder = match file {
            Some(path) => builder.add_source(config::File::from(path.to_path_buf()).required(true)),
            None => builder.add_source(config::File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };
        builder = builder.add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        if let Ok(port) = std::env::var("PORT") {
            let port: i64 = port
                .trim()
                .parse()
                .with_context(|| format!("PORT is not a number: {port:?}"))?;
            builder = builder.set_override("port", port)?;
        }

        let config: Self = builder
            .build()
            .context("Failed to load configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.file_extension.is_empty() {
            bail!("file_extension must not be empty");
        }
        for (key, value) in [
            ("file_prefix", &self.file_prefix),
            ("file_extension", &self.file_extension),
        ] {
            if value.contains(|c: char| c == '/' || c == '\\') || value.contains("..") {
                bail!("{key} must be a plain file name fragment, got {value:?}");
            }
        }
        if self.body_limit_bytes == 0 {
            bail!("body_limit_bytes must be positive");
        }
        Ok(())
    }

    pub fn naming(&self) -> FrameFileNaming {
        FrameFileNaming::new(&self.file_prefix, &self.file_extension)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
