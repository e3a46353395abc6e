//! User configuration.
//!
//! Sources, later ones overriding earlier ones:
//! 1. built-in defaults
//! 2. `<config_dir>/bugledger/config.toml` (optional)
//! 3. `BUGLEDGER_*` environment variables (a `.env` file is honoured)

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use bugledger_store::rpc::{
    DEFAULT_GAS_LIMIT, DEFAULT_RECEIPT_MAX_ATTEMPTS, DEFAULT_RECEIPT_POLL_INTERVAL_MS,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_RPC_URL,
};
use bugledger_store::{Address, BugStore, MemoryBugStore, RpcBugStore, RpcConfig};
use color_eyre::eyre::{WrapErr, eyre};
use serde::{Deserialize, Serialize};
use url::Url;

pub const ENV_PREFIX: &str = "BUGLEDGER";

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Contract on a JSON-RPC node.
    #[default]
    Rpc,
    /// Throwaway in-process store, nothing is persisted.
    Memory,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct UserConfig {
    pub store: StoreBackend,
    pub rpc_url: String,
    /// Address of the deployed bug tracker contract. Required for the rpc store.
    pub contract_address: Option<String>,
    /// Which of the node's accounts signs calls.
    pub account_index: usize,
    pub gas_limit: u64,
    pub request_timeout_secs: u64,
    pub receipt_poll_interval_ms: u64,
    pub receipt_max_attempts: u32,
    /// Reset the form after a successful submit instead of keeping its values.
    pub clear_form_on_submit: bool,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            store: StoreBackend::default(),
            rpc_url: DEFAULT_RPC_URL.to_string(),
            contract_address: None,
            account_index: 0,
            gas_limit: DEFAULT_GAS_LIMIT,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            receipt_poll_interval_ms: DEFAULT_RECEIPT_POLL_INTERVAL_MS,
            receipt_max_attempts: DEFAULT_RECEIPT_MAX_ATTEMPTS,
            clear_form_on_submit: false,
        }
    }
}

impl UserConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("bugledger").join("config.toml"))
    }

    /// Loads from the default config file (if any) and the environment.
    pub fn load() -> Result<Self, config::ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Self::from_builder(config::Config::builder()),
        }
    }

    /// Loads from `path` (which may not exist) and the environment.
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::File::from(path.to_path_buf())
                .format(config::FileFormat::Toml)
                .required(false),
        );
        Self::from_builder(builder)
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, config::ConfigError> {
        builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize::<UserConfig>()
    }

    pub fn rpc_config(&self) -> color_eyre::Result<RpcConfig> {
        let url = Url::parse(&self.rpc_url)
            .wrap_err_with(|| format!("invalid rpc_url {:?}", self.rpc_url))?;
        let contract: Address = self
            .contract_address
            .as_deref()
            .ok_or_else(|| {
                eyre!("contract_address is not set (config file or {ENV_PREFIX}_CONTRACT_ADDRESS)")
            })?
            .parse()?;
        let mut rpc = RpcConfig::new(url, contract);
        rpc.account_index = self.account_index;
        rpc.gas_limit = self.gas_limit;
        rpc.request_timeout = Duration::from_secs(self.request_timeout_secs);
        rpc.receipt_poll_interval = Duration::from_millis(self.receipt_poll_interval_ms);
        rpc.receipt_max_attempts = self.receipt_max_attempts;
        Ok(rpc)
    }

    pub fn build_store(&self) -> color_eyre::Result<Arc<dyn BugStore>> {
        match self.store {
            StoreBackend::Rpc => {
                let rpc = self.rpc_config()?;
                tracing::info!(url = %rpc.url, contract = %rpc.contract, "using rpc bug store");
                Ok(Arc::new(RpcBugStore::new(rpc)?))
            }
            StoreBackend::Memory => {
                tracing::info!("using in-memory bug store");
                Ok(Arc::new(MemoryBugStore::new()))
            }
        }
    }
}
