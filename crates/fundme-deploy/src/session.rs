use fundme_ledger::MemoryChain;
use fundme_oracle::{FeedRegistry, PriceOracle};
use fundme_types::{Address, PriceData, Wei};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::FundMeConfig;
use crate::deploy::{deploy_fund_me, Deployed, DeployedFundMe, Deployment};
use crate::error::{DeployError, Result};

/// Pre-funded accounts on a development chain
pub const DEV_ACCOUNTS: u32 = 10;
pub const DEV_ACCOUNT_BALANCE: Wei = Wei::from_ether(10_000);

/// Sequence of actions to run against a freshly deployed ledger
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Script {
    /// Extra native balances credited before the first step
    pub accounts: BTreeMap<Address, Wei>,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Fund {
        from: Address,
        value: Wei,
    },
    Withdraw {
        /// Defaults to the owner
        #[serde(default)]
        caller: Option<Address>,
    },
    SetPrice {
        answer: i64,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepOutcome {
    pub index: usize,
    pub step: Step,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Final state of a session run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    pub deployment: Deployment,
    pub price: PriceData,
    pub contract_balance: Wei,
    pub funders: Vec<Address>,
    pub amount_funded: BTreeMap<Address, Wei>,
    pub balances: BTreeMap<Address, Wei>,
    pub steps: Vec<StepOutcome>,
}

/// A deployed ledger on an in-memory chain.
///
/// `fund` moves the attached value out of the sender's native balance, so the
/// chain's total supply plus the ledger balance stays constant.
pub struct Session {
    chain: MemoryChain,
    deployed: Deployed,
}

impl Session {
    pub fn new(deployed: Deployed, chain: MemoryChain) -> Self {
        Session { chain, deployed }
    }

    /// Deploy as development account 0. Development chains start with
    /// `DEV_ACCOUNTS` accounts holding `DEV_ACCOUNT_BALANCE` each.
    pub fn start(config: &FundMeConfig, network: &str, feeds: &FeedRegistry) -> Result<Self> {
        let deployed = deploy_fund_me(config, network, Address::dev_account(0), feeds)?;

        let mut chain = MemoryChain::new();
        if config.is_development(network) {
            for index in 0..DEV_ACCOUNTS {
                chain.credit(&Address::dev_account(index), DEV_ACCOUNT_BALANCE)?;
            }
        }
        Ok(Session::new(deployed, chain))
    }

    /// Send `value` from `from` into the ledger
    pub fn fund(&mut self, from: &Address, value: Wei) -> Result<()> {
        let checkpoint = self.chain.snapshot();
        self.chain.debit(from, value)?;

        if let Err(err) = self.deployed.fund_me.fund(from, value) {
            self.chain.restore(&checkpoint);
            return Err(err.into());
        }
        Ok(())
    }

    pub fn withdraw(&mut self, caller: &Address) -> Result<Wei> {
        let swept = self.deployed.fund_me.withdraw(caller, &mut self.chain)?;
        Ok(swept)
    }

    /// Move the mock feed; only possible on development chains
    pub fn set_price(&mut self, answer: i128) -> Result<PriceData> {
        let mock = self.deployed.mock.as_ref().ok_or_else(|| {
            DeployError::Script(format!(
                "network {} has a live price feed",
                self.deployed.deployment.network
            ))
        })?;
        Ok(mock.update_answer(answer))
    }

    /// Run every step of `script`. A failing step is recorded, not fatal.
    pub fn run(&mut self, script: &Script) -> Result<SessionReport> {
        for (account, amount) in &script.accounts {
            self.chain.credit(account, *amount)?;
        }

        let mut outcomes = Vec::with_capacity(script.steps.len());
        for (index, step) in script.steps.iter().enumerate() {
            let result = match step {
                Step::Fund { from, value } => self.fund(from, *value),
                Step::Withdraw { caller } => {
                    let caller = caller.unwrap_or_else(|| self.owner());
                    self.withdraw(&caller).map(|_| ())
                }
                Step::SetPrice { answer } => self.set_price(*answer as i128).map(|_| ()),
            };

            if let Err(err) = &result {
                tracing::warn!(index, error = %err, "script step failed");
            }
            outcomes.push(StepOutcome {
                index,
                step: step.clone(),
                ok: result.is_ok(),
                error: result.err().map(|e| e.to_string()),
            });
        }

        self.report(outcomes)
    }

    pub fn report(&self, steps: Vec<StepOutcome>) -> Result<SessionReport> {
        let fund_me = &self.deployed.fund_me;
        let amount_funded = fund_me
            .funders()
            .iter()
            .map(|funder| (*funder, fund_me.address_to_amount_funded(funder)))
            .collect();
        let balances = self
            .chain
            .accounts()
            .into_iter()
            .map(|account| (account, self.chain.balance_of(&account)))
            .collect();

        Ok(SessionReport {
            deployment: self.deployed.deployment.clone(),
            price: fund_me.oracle().latest_price()?,
            contract_balance: fund_me.balance(),
            funders: fund_me.funders().to_vec(),
            amount_funded,
            balances,
            steps,
        })
    }

    pub fn owner(&self) -> Address {
        self.deployed.fund_me.owner()
    }

    pub fn fund_me(&self) -> &DeployedFundMe {
        &self.deployed.fund_me
    }

    pub fn chain(&self) -> &MemoryChain {
        &self.chain
    }

    pub fn deployment(&self) -> &Deployment {
        &self.deployed.deployment
    }

    /// Native supply on the chain plus value held by the ledger
    pub fn total_value(&self) -> Result<Wei> {
        let supply = self.chain.total_supply()?;
        Ok(supply.checked_add(self.deployed.fund_me.balance())?)
    }
}

/// Fund from development accounts `1..=funders`, then withdraw as owner
pub fn simulate(config: &FundMeConfig, network: &str, funders: u32, value: Wei) -> Result<SessionReport> {
    if funders >= DEV_ACCOUNTS {
        return Err(DeployError::Script(format!(
            "at most {} funders available, asked for {}",
            DEV_ACCOUNTS - 1,
            funders
        )));
    }

    let mut session = Session::start(config, network, &FeedRegistry::new())?;
    let mut steps: Vec<Step> = (1..=funders)
        .map(|index| Step::Fund {
            from: Address::dev_account(index),
            value,
        })
        .collect();
    steps.push(Step::Withdraw { caller: None });

    session.run(&Script {
        accounts: BTreeMap::new(),
        steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_json_format() {
        let json = r#"[
            { "action": "fund", "from": "0x694aa1769357215de4fac081bf1f309adc325306", "value": "0.1" },
            { "action": "withdraw" },
            { "action": "set_price", "answer": 300000000000 }
        ]"#;
        let steps: Vec<Step> = serde_json::from_str(json).unwrap();

        assert!(matches!(steps[0], Step::Fund { .. }));
        assert_eq!(steps[1], Step::Withdraw { caller: None });
        assert_eq!(steps[2], Step::SetPrice { answer: 3000_00000000 });
    }

    #[test]
    fn test_failed_fund_refunds_sender() {
        let config = FundMeConfig::default();
        let mut session = Session::start(&config, "hardhat", &FeedRegistry::new()).unwrap();
        let alice = Address::dev_account(1);

        let result = session.fund(&alice, Wei::from_wei(1));

        assert!(matches!(result, Err(DeployError::Ledger(_))));
        assert_eq!(session.chain().balance_of(&alice), DEV_ACCOUNT_BALANCE);
    }

    #[test]
    fn test_fund_without_native_balance() {
        let config = FundMeConfig::default();
        let mut session = Session::start(&config, "localhost", &FeedRegistry::new()).unwrap();
        let stranger = Address::from_label("stranger");

        let result = session.fund(&stranger, Wei::from_ether(1));

        assert!(result.is_err());
        assert_eq!(session.fund_me().balance(), Wei::ZERO);
    }

    #[test]
    fn test_simulate_rejects_too_many_funders() {
        let config = FundMeConfig::default();
        assert!(simulate(&config, "hardhat", DEV_ACCOUNTS, Wei::from_ether(1)).is_err());
    }
}
