use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_NAME: &str = "devswap.toml";
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../config/default_devswap.toml");

pub const DEFAULT_BINARY: &str = "docker";
pub const DEFAULT_NAME_SUFFIX: &str = "-dev";
pub const DEFAULT_SWAP_TARGET: &str = "/dev-swap";
pub const DEFAULT_INJECT: &str = "echo 'Dev container is ready for development!'";
pub const DEFAULT_DEBUGGER_PORT: u16 = 2345;
pub const DEFAULT_DEBUGGER_INSTALL: [&str; 3] =
    ["go", "install", "github.com/go-delve/delve/cmd/dlv@latest"];
pub const DEFAULT_READY_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_READY_INTERVAL: Duration = Duration::from_millis(500);

pub fn default_config_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/root"))
        .join(".config/devswap")
}

pub fn ensure_config_dir(config_dir: &Path) -> Result<()> {
    fs::create_dir_all(config_dir).with_context(|| format!("criando {:?}", config_dir))
}

#[derive(Deserialize, Debug, Default)]
pub struct RuntimeConfig {
    pub binary: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct DevConfig {
    pub name_suffix: Option<String>,
    pub swap_target: Option<String>,
    pub inject: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct DebuggerConfig {
    pub enabled: Option<bool>,
    pub port: Option<u16>,
    pub install: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Default)]
pub struct ReadinessConfig {
    pub timeout: Option<String>,
    pub interval: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub runtime: RuntimeConfig,
    #[serde(default)]
    pub dev: DevConfig,
    #[serde(default)]
    pub debugger: DebuggerConfig,
    #[serde(default)]
    pub readiness: ReadinessConfig,
}

impl AppConfig {
    /// Merges another AppConfig into self.
    /// Values from `other` overwrite values in `self` if present.
    pub fn merge(&mut self, other: AppConfig) {
        if let Some(binary) = other.runtime.binary {
            self.runtime.binary = Some(binary);
        }
        if let Some(suffix) = other.dev.name_suffix {
            self.dev.name_suffix = Some(suffix);
        }
        if let Some(target) = other.dev.swap_target {
            self.dev.swap_target = Some(target);
        }
        if let Some(inject) = other.dev.inject {
            self.dev.inject = Some(inject);
        }
        if let Some(enabled) = other.debugger.enabled {
            self.debugger.enabled = Some(enabled);
        }
        if let Some(port) = other.debugger.port {
            self.debugger.port = Some(port);
        }
        if let Some(install) = other.debugger.install {
            self.debugger.install = Some(install);
        }
        if let Some(timeout) = other.readiness.timeout {
            self.readiness.timeout = Some(timeout);
        }
        if let Some(interval) = other.readiness.interval {
            self.readiness.interval = Some(interval);
        }
    }

    /// Fills in defaults and validates values.
    pub fn resolve(self) -> Result<Settings> {
        let timeout = match self.readiness.timeout.as_deref() {
            Some(raw) => parse_duration(raw).context("readiness.timeout")?,
            None => DEFAULT_READY_TIMEOUT,
        };
        let interval = match self.readiness.interval.as_deref() {
            Some(raw) => parse_duration(raw).context("readiness.interval")?,
            None => DEFAULT_READY_INTERVAL,
        };

        if interval.is_zero() {
            bail!("readiness.interval precisa ser maior que zero");
        }

        let debugger_install = self
            .debugger
            .install
            .unwrap_or_else(default_debugger_install);
        if debugger_install.is_empty() {
            bail!("debugger.install não pode ser vazio");
        }

        Ok(Settings {
            binary: self
                .runtime
                .binary
                .unwrap_or_else(|| DEFAULT_BINARY.to_string()),
            name_suffix: self
                .dev
                .name_suffix
                .unwrap_or_else(|| DEFAULT_NAME_SUFFIX.to_string()),
            swap_target: self
                .dev
                .swap_target
                .unwrap_or_else(|| DEFAULT_SWAP_TARGET.to_string()),
            inject: match self.dev.inject {
                Some(cmd) if cmd.trim().is_empty() => None,
                Some(cmd) => Some(cmd),
                None => Some(DEFAULT_INJECT.to_string()),
            },
            debugger_enabled: self.debugger.enabled.unwrap_or(true),
            debugger_port: self.debugger.port.unwrap_or(DEFAULT_DEBUGGER_PORT),
            debugger_install,
            ready_timeout: timeout,
            ready_interval: interval,
        })
    }
}

/// Effective configuration after merging files and applying defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub binary: String,
    pub name_suffix: String,
    /// Mount point of the swap directory inside the dev container
    pub swap_target: String,
    /// Post-start command, `None` disables it
    pub inject: Option<String>,
    pub debugger_enabled: bool,
    pub debugger_port: u16,
    pub debugger_install: Vec<String>,
    pub ready_timeout: Duration,
    pub ready_interval: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            binary: DEFAULT_BINARY.to_string(),
            name_suffix: DEFAULT_NAME_SUFFIX.to_string(),
            swap_target: DEFAULT_SWAP_TARGET.to_string(),
            inject: Some(DEFAULT_INJECT.to_string()),
            debugger_enabled: true,
            debugger_port: DEFAULT_DEBUGGER_PORT,
            debugger_install: default_debugger_install(),
            ready_timeout: DEFAULT_READY_TIMEOUT,
            ready_interval: DEFAULT_READY_INTERVAL,
        }
    }
}

fn default_debugger_install() -> Vec<String> {
    DEFAULT_DEBUGGER_INSTALL.into_iter().map(String::from).collect()
}

pub fn install_default_config(target_dir: &Path) -> Result<bool> {
    ensure_config_dir(target_dir)?;

    let target = target_dir.join(DEFAULT_CONFIG_NAME);
    if target.exists() {
        return Ok(false);
    }

    fs::write(&target, DEFAULT_CONFIG_TOML)
        .with_context(|| format!("escrevendo template em {:?}", target))?;

    Ok(true)
}

fn read_config_file(path: &Path) -> Result<Option<AppConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path).with_context(|| format!("lendo {:?}", path))?;
    let config: AppConfig =
        toml::from_str(&content).with_context(|| format!("parse de {:?}", path))?;

    Ok(Some(config))
}

/// Loads `devswap.toml` from the config dir, then overlays `./devswap.toml` if present.
pub fn load_app_config(config_dir: &Path) -> Result<AppConfig> {
    load_app_config_from(config_dir, Path::new("."))
}

pub fn load_app_config_from(config_dir: &Path, working_dir: &Path) -> Result<AppConfig> {
    let mut app_config =
        read_config_file(&config_dir.join(DEFAULT_CONFIG_NAME))?.unwrap_or_default();

    let local_path = working_dir.join(DEFAULT_CONFIG_NAME);
    if local_path != config_dir.join(DEFAULT_CONFIG_NAME) {
        if let Some(local) = read_config_file(&local_path)? {
            app_config.merge(local);
        }
    }

    Ok(app_config)
}

pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();
    if let Some(stripped) = s.strip_suffix("ms") {
        let millis: u64 = stripped.trim().parse()?;
        Ok(Duration::from_millis(millis))
    } else if let Some(stripped) = s.strip_suffix('s') {
        let secs: u64 = stripped.trim().parse()?;
        Ok(Duration::from_secs(secs))
    } else if let Some(stripped) = s.strip_suffix('m') {
        let mins: u64 = stripped.trim().parse()?;
        Ok(Duration::from_secs(mins * 60))
    } else {
        Err(anyhow::anyhow!("Formato de duração inválido: {}", s))
    }
}
