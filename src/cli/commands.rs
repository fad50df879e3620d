//! CLI commands for the token ledger
//!
//! Implements all command handlers for the CLI interface.

use crate::cli::script::{parse_script, required_accounts, ScriptStep};
use crate::config::{ConfigError, DeployConfig};
use crate::core::{format_units, Address};
use crate::crypto::{dev_accounts, KeyPair};
use crate::runtime::{Deployment, Receipt, Runtime};
use std::fs;
use std::path::Path;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Runtime with one freshly deployed token
pub struct AppState {
    pub runtime: Runtime,
    pub deployment: Deployment,
    pub accounts: Vec<KeyPair>,
}

impl AppState {
    /// Deploy the configured token with at least `account_count` dev accounts
    pub fn new(config: &DeployConfig, account_count: u32) -> CliResult<Self> {
        let deployer_index = config.deployer_index()?;
        let accounts = dev_accounts(account_count.max(deployer_index + 1));
        let deployer = accounts
            .get(deployer_index as usize)
            .map(KeyPair::address)
            .ok_or_else(|| ConfigError::DeployerOutOfRange(deployer_index))?;

        let mut runtime = Runtime::new(config.runtime.clone());
        let deployment = runtime.deploy(deployer, &config.deploy_params())?;

        Ok(Self {
            runtime,
            deployment,
            accounts,
        })
    }

    /// Sign and submit each step in order, returning every receipt
    pub fn run_steps(&mut self, steps: &[ScriptStep]) -> CliResult<Vec<Receipt>> {
        let token = self.deployment.address;
        let mut receipts = Vec::with_capacity(steps.len());

        for (index, step) in steps.iter().enumerate() {
            let call = step.resolve(index, &self.accounts)?;
            let signer = step.signer(index, &self.accounts)?;
            receipts.push(self.runtime.execute(signer, token, call)?);
        }

        Ok(receipts)
    }

    fn balance(&self, account: &Address) -> CliResult<String> {
        let balance = self.runtime.balance_of(&self.deployment.address, account)?;
        Ok(format_units(balance, self.deployment.metadata.decimals))
    }
}

/// Deploy the configured token and report where it landed
pub fn cmd_deploy(config: &DeployConfig) -> CliResult<()> {
    println!("Preparing for launch...");

    let state = AppState::new(config, 1)?;
    let metadata = &state.deployment.metadata;

    println!("🌕 Deployed at: {}", state.deployment.address);
    println!("   ├─ Name: {}", metadata.name);
    println!("   ├─ Symbol: {}", metadata.symbol);
    println!("   ├─ Decimals: {}", metadata.decimals);
    println!(
        "   ├─ Total supply: {} ({} base units)",
        format_units(metadata.total_supply, metadata.decimals),
        metadata.total_supply
    );
    println!("   └─ Deployer: {}", metadata.deployer);

    Ok(())
}

/// List deterministic dev accounts
pub fn cmd_accounts(count: u32) -> CliResult<()> {
    println!("🔑 Dev accounts:");
    for (index, account) in dev_accounts(count).iter().enumerate() {
        println!("   #{} {}", index, account.address());
    }
    Ok(())
}

/// Deploy, then apply every step of a script and print the receipts
pub fn cmd_run(config: &DeployConfig, script_path: &Path) -> CliResult<()> {
    let steps = parse_script(&fs::read_to_string(script_path)?)?;
    let mut state = AppState::new(config, required_accounts(&steps)?)?;
    let token = state.deployment.address;

    log::info!(
        "Running {} step(s) against {} at {}",
        steps.len(),
        state.deployment.metadata.symbol,
        token
    );

    let receipts = state.run_steps(&steps)?;
    for receipt in &receipts {
        println!("{}", serde_json::to_string_pretty(receipt)?);
    }
    let reverted = receipts.iter().filter(|r| !r.is_success()).count();

    println!(
        "\n📒 Balances after {} step(s), {} reverted:",
        steps.len(),
        reverted
    );
    let holders = state
        .runtime
        .token(&token)
        .map(|t| t.holders())
        .unwrap_or_default();
    for (account, _) in holders {
        let label = state
            .accounts
            .iter()
            .position(|kp| kp.address() == account)
            .map(|i| format!("#{}", i))
            .unwrap_or_else(|| "-".to_string());
        println!("   {} ({}) - {}", account, label, state.balance(&account)?);
    }

    Ok(())
}
