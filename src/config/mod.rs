// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration for holderscan runs
//!
//! A run is one [`Job`] over one log file. Configuration normally comes from
//! `HOLDERSCAN_*` environment variables (a `.env` file is honoured), but every
//! field can also be set through [`HolderscanConfigBuilder`].
//!
//! # Example: From the environment
//!
//! ```rust,ignore
//! use holderscan::HolderscanConfig;
//!
//! // HOLDERSCAN_JOB=holders HOLDERSCAN_INPUT=lux_transfers.json
//! let config = HolderscanConfig::from_env()?;
//! ```
//!
//! # Example: Builder
//!
//! ```rust
//! use holderscan::{HolderscanConfigBuilder, Job};
//!
//! let config = HolderscanConfigBuilder::new(Job::Holders, "lux_transfers.json")
//!     .output_dir("exports/lux")
//!     .snapshot_block(21_000_000)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.file_stem(), "holders");
//! ```

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use alloy_primitives::{Address, BlockNumber, U256};

use crate::errors::ConfigError;
use crate::types::address::parse_address_list;
use crate::types::amount::MAX_DECIMALS;
use crate::types::burn::BurnAddresses;

pub mod constants;

use constants::{DEAD_ADDRESS, DEFAULT_DECIMALS, DEFAULT_OUTPUT_DIR};

/// What a run computes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Job {
    /// NFT holder snapshot
    Holders,
    /// ERC-20 burn totals
    Burns,
    /// Payments versus NFT holdings
    Purchases,
    /// Allocation plan from known and scanned holders
    Allocations,
}

impl Job {
    /// Name used in `HOLDERSCAN_JOB` and as the default file stem
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Holders => "holders",
            Self::Burns => "burns",
            Self::Purchases => "purchases",
            Self::Allocations => "allocations",
        }
    }

    /// Burn sinks used when none are configured
    ///
    /// NFT replay only treats the zero address as a burn; token burns
    /// conventionally also go to `0x...dEaD`.
    pub fn default_burn_addresses(&self) -> BurnAddresses {
        match self {
            Self::Burns => BurnAddresses::zero_only().with(DEAD_ADDRESS),
            _ => BurnAddresses::zero_only(),
        }
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Job {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "holders" => Ok(Self::Holders),
            "burns" => Ok(Self::Burns),
            "purchases" => Ok(Self::Purchases),
            "allocations" => Ok(Self::Allocations),
            other => Err(format!(
                "unknown job {other:?}, expected holders, burns, purchases or allocations"
            )),
        }
    }
}

/// Configuration for a single holderscan run
///
/// Use [`HolderscanConfigBuilder`] or [`HolderscanConfig::from_env`] to
/// construct instances; both validate the per-job requirements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolderscanConfig {
    /// Job to run
    pub job: Job,

    /// Log file the job reads. NFT transfers for `holders` and `allocations`,
    /// ERC-20 transfers for `burns` and `purchases`.
    pub input: PathBuf,

    /// Directory reports are written to
    /// Default: `exports`
    pub output_dir: PathBuf,

    /// File stem for the written reports
    /// Default: the job name
    pub prefix: Option<String>,

    /// Collection contract, stamped onto holder reports
    pub contract: Option<Address>,

    /// Block the snapshot is valid at, stamped onto holder reports
    pub snapshot_block: Option<BlockNumber>,

    /// Burn sinks. Always contains the zero address.
    pub burn_addresses: BurnAddresses,

    /// Decimals of the ERC-20 token
    /// Default: 18
    pub decimals: u8,

    /// NFT transfer log used to build holdings for `purchases`, and for
    /// `allocations` in place of `input` when set
    pub holders_input: Option<PathBuf>,

    /// Address payments are sent to (`purchases`)
    pub purchase_address: Option<Address>,

    /// Raw payment amount per NFT (`purchases`)
    pub unit_price: Option<U256>,

    /// Known holders file (`allocations`)
    pub known_holders: Option<PathBuf>,

    /// Holders left out of the allocation plan
    pub excluded: Vec<Address>,

    /// Raw amount allocated per token (`allocations`)
    pub amount_per_token: Option<U256>,
}

impl HolderscanConfig {
    /// Load configuration from `HOLDERSCAN_*` environment variables
    ///
    /// A `.env` file in the working directory is loaded first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|var| dotenvy::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &'static str| {
            lookup(var)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let require = |var: &'static str| get(var).ok_or_else(|| ConfigError::missing(var));

        let job: Job = parse_var("HOLDERSCAN_JOB", &require("HOLDERSCAN_JOB")?)?;
        let mut builder = HolderscanConfigBuilder::new(job, require("HOLDERSCAN_INPUT")?);

        if let Some(dir) = get("HOLDERSCAN_OUTPUT_DIR") {
            builder = builder.output_dir(dir);
        }
        if let Some(prefix) = get("HOLDERSCAN_PREFIX") {
            builder = builder.prefix(prefix);
        }
        if let Some(contract) = get("HOLDERSCAN_CONTRACT") {
            builder = builder.contract(parse_var("HOLDERSCAN_CONTRACT", &contract)?);
        }
        if let Some(block) = get("HOLDERSCAN_SNAPSHOT_BLOCK") {
            builder = builder.snapshot_block(parse_var("HOLDERSCAN_SNAPSHOT_BLOCK", &block)?);
        }
        if let Some(list) = get("HOLDERSCAN_BURN_ADDRESSES") {
            let addresses = parse_address_list(&list)
                .map_err(|e| ConfigError::invalid("HOLDERSCAN_BURN_ADDRESSES", e))?;
            builder = builder.burn_addresses(addresses);
        }
        if let Some(decimals) = get("HOLDERSCAN_DECIMALS") {
            builder = builder.decimals(parse_var("HOLDERSCAN_DECIMALS", &decimals)?);
        }
        if let Some(path) = get("HOLDERSCAN_HOLDERS_INPUT") {
            builder = builder.holders_input(path);
        }
        if let Some(address) = get("HOLDERSCAN_PURCHASE_ADDRESS") {
            builder = builder.purchase_address(parse_var("HOLDERSCAN_PURCHASE_ADDRESS", &address)?);
        }
        if let Some(price) = get("HOLDERSCAN_UNIT_PRICE") {
            builder = builder.unit_price(parse_var("HOLDERSCAN_UNIT_PRICE", &price)?);
        }
        if let Some(path) = get("HOLDERSCAN_KNOWN_HOLDERS") {
            builder = builder.known_holders(path);
        }
        if let Some(list) = get("HOLDERSCAN_EXCLUDED") {
            let addresses = parse_address_list(&list)
                .map_err(|e| ConfigError::invalid("HOLDERSCAN_EXCLUDED", e))?;
            builder = builder.excluded(addresses);
        }
        if let Some(amount) = get("HOLDERSCAN_AMOUNT_PER_TOKEN") {
            builder = builder.amount_per_token(parse_var("HOLDERSCAN_AMOUNT_PER_TOKEN", &amount)?);
        }

        builder.build()
    }

    /// File stem for this run's reports
    pub fn file_stem(&self) -> &str {
        self.prefix.as_deref().unwrap_or(self.job.as_str())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.decimals > MAX_DECIMALS {
            return Err(ConfigError::invalid(
                "HOLDERSCAN_DECIMALS",
                format!("{} exceeds the maximum of {MAX_DECIMALS}", self.decimals),
            ));
        }

        match self.job {
            Job::Holders | Job::Burns => {}
            Job::Purchases => {
                self.require(self.holders_input.is_some(), "HOLDERSCAN_HOLDERS_INPUT")?;
                self.require(self.purchase_address.is_some(), "HOLDERSCAN_PURCHASE_ADDRESS")?;
                match self.unit_price {
                    None => return Err(ConfigError::missing("HOLDERSCAN_UNIT_PRICE")),
                    Some(price) if price.is_zero() => {
                        return Err(ConfigError::invalid(
                            "HOLDERSCAN_UNIT_PRICE",
                            "must be greater than zero",
                        ))
                    }
                    Some(_) => {}
                }
            }
            Job::Allocations => {
                self.require(self.amount_per_token.is_some(), "HOLDERSCAN_AMOUNT_PER_TOKEN")?;
            }
        }
        Ok(())
    }

    fn require(&self, present: bool, var: &'static str) -> Result<(), ConfigError> {
        if present {
            Ok(())
        } else {
            Err(ConfigError::missing(var))
        }
    }
}

fn parse_var<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value
        .parse()
        .map_err(|e: T::Err| ConfigError::invalid(var, e.to_string()))
}

/// Builder for [`HolderscanConfig`] with a fluent API
///
/// # Example
///
/// ```rust
/// use holderscan::constants::tokens::{egg_unit_price, EGG_PURCHASE_ADDRESS};
/// use holderscan::{HolderscanConfigBuilder, Job};
///
/// let config = HolderscanConfigBuilder::new(Job::Purchases, "zoo_transfers.json")
///     .holders_input("egg_transfers.json")
///     .purchase_address(EGG_PURCHASE_ADDRESS)
///     .unit_price(egg_unit_price(18).unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(config.decimals, 18);
/// ```
#[derive(Debug, Clone)]
pub struct HolderscanConfigBuilder {
    config: HolderscanConfig,
}

impl HolderscanConfigBuilder {
    /// Start a configuration for `job` reading `input`, with defaults elsewhere
    pub fn new(job: Job, input: impl Into<PathBuf>) -> Self {
        Self {
            config: HolderscanConfig {
                job,
                input: input.into(),
                output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
                prefix: None,
                contract: None,
                snapshot_block: None,
                burn_addresses: job.default_burn_addresses(),
                decimals: DEFAULT_DECIMALS,
                holders_input: None,
                purchase_address: None,
                unit_price: None,
                known_holders: None,
                excluded: Vec::new(),
                amount_per_token: None,
            },
        }
    }

    /// Directory reports are written to
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    /// Output file stem; defaults to the job name
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.prefix = Some(prefix.into());
        self
    }

    /// Collection contract recorded in holder reports
    pub fn contract(mut self, contract: Address) -> Self {
        self.config.contract = Some(contract);
        self
    }

    /// Block the snapshot is taken at, for report metadata only
    pub fn snapshot_block(mut self, block: BlockNumber) -> Self {
        self.config.snapshot_block = Some(block);
        self
    }

    /// Add burn sinks on top of the job's defaults
    pub fn burn_addresses(mut self, addresses: impl IntoIterator<Item = Address>) -> Self {
        self.config.burn_addresses.extend(addresses);
        self
    }

    /// Decimals used to render burn totals
    pub fn decimals(mut self, decimals: u8) -> Self {
        self.config.decimals = decimals;
        self
    }

    /// NFT transfer logs replayed for the purchases and allocations jobs
    pub fn holders_input(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.holders_input = Some(path.into());
        self
    }

    /// Sale address payments are sent to
    pub fn purchase_address(mut self, address: Address) -> Self {
        self.config.purchase_address = Some(address);
        self
    }

    /// Raw payment amount per unit, not whole tokens
    pub fn unit_price(mut self, price: U256) -> Self {
        self.config.unit_price = Some(price);
        self
    }

    /// JSON file of holders that take precedence over the scan
    pub fn known_holders(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.known_holders = Some(path.into());
        self
    }

    /// Holders left out of the allocation; their tokens are reserved
    pub fn excluded(mut self, addresses: impl IntoIterator<Item = Address>) -> Self {
        self.config.excluded.extend(addresses);
        self
    }

    /// Raw amount allocated per held token
    pub fn amount_per_token(mut self, amount: U256) -> Self {
        self.config.amount_per_token = Some(amount);
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<HolderscanConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
