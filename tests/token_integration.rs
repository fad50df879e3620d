//! End-to-end token behaviour through the settlement runtime:
//! deployment, sending, approving and delegated transfers.

use token_ledger::core::{tokens, Address, Balance, Call};
use token_ledger::crypto::{dev_accounts, KeyPair};
use token_ledger::runtime::{Receipt, Runtime};
use token_ledger::token::{ApprovalEvent, DeployParams, Event, TokenError, TransferEvent};

const NAME: &str = "Lambo Moon Trillionaire";
const SYMBOL: &str = "LMT";
const SUPPLY: &str = "1000000000000";

struct Fixture {
    runtime: Runtime,
    token: Address,
    deployer: KeyPair,
    receiver: KeyPair,
    exchange: KeyPair,
}

impl Fixture {
    fn new() -> Self {
        let mut accounts = dev_accounts(3).into_iter();
        let deployer = accounts.next().unwrap();
        let receiver = accounts.next().unwrap();
        let exchange = accounts.next().unwrap();

        let mut runtime = Runtime::default();
        let token = runtime
            .deploy(deployer.address(), &DeployParams::new(NAME, SYMBOL, SUPPLY))
            .unwrap()
            .address;

        Self {
            runtime,
            token,
            deployer,
            receiver,
            exchange,
        }
    }

    fn execute(&mut self, signer: &KeyPair, call: Call) -> Receipt {
        self.runtime.execute(signer, self.token, call).unwrap()
    }

    fn transfer(&mut self, to: Address, amount: Balance) -> Receipt {
        let deployer = self.deployer.clone();
        self.execute(&deployer, Call::Transfer { to, amount })
    }

    fn approve_exchange(&mut self, amount: Balance) -> Receipt {
        let deployer = self.deployer.clone();
        let spender = self.exchange.address();
        self.execute(&deployer, Call::Approve { spender, amount })
    }

    fn exchange_transfer_from(&mut self, amount: Balance) -> Receipt {
        let exchange = self.exchange.clone();
        let call = Call::TransferFrom {
            from: self.deployer.address(),
            to: self.receiver.address(),
            amount,
        };
        self.execute(&exchange, call)
    }

    fn balance(&self, account: &KeyPair) -> Balance {
        self.runtime
            .balance_of(&self.token, &account.address())
            .unwrap()
    }

    fn exchange_allowance(&self) -> Balance {
        self.runtime
            .allowance(
                &self.token,
                &self.deployer.address(),
                &self.exchange.address(),
            )
            .unwrap()
    }

    fn assert_conserved(&self) {
        let token = self.runtime.token(&self.token).unwrap();
        assert_eq!(token.circulating_supply(), token.total_supply());
    }
}

// =============================================================================
// Deployment
// =============================================================================

#[test]
fn deployment_has_correct_metadata() {
    let fx = Fixture::new();
    let token = fx.runtime.token(&fx.token).unwrap();

    assert_eq!(token.name(), NAME);
    assert_eq!(token.symbol(), SYMBOL);
    assert_eq!(token.decimals(), 18);
    assert_eq!(token.total_supply(), tokens(1_000_000_000_000));
}

#[test]
fn deployment_assigns_total_supply_to_deployer() {
    let fx = Fixture::new();
    let token = fx.runtime.token(&fx.token).unwrap();

    assert_eq!(fx.balance(&fx.deployer), token.total_supply());
    assert_eq!(fx.balance(&fx.receiver), 0);
    assert_eq!(fx.balance(&fx.exchange), 0);
    assert_eq!(token.holder_count(), 1);
}

// =============================================================================
// Sending tokens
// =============================================================================

#[test]
fn transfer_moves_balances() {
    let mut fx = Fixture::new();
    let receipt = fx.transfer(fx.receiver.address(), tokens(100));

    assert!(receipt.is_success());
    assert_eq!(fx.balance(&fx.deployer), tokens(999_999_999_900));
    assert_eq!(fx.balance(&fx.receiver), tokens(100));
    fx.assert_conserved();
}

#[test]
fn transfer_emits_transfer_event() {
    let mut fx = Fixture::new();
    let receipt = fx.transfer(fx.receiver.address(), tokens(100));

    assert_eq!(receipt.events.len(), 1);
    assert_eq!(receipt.events[0].name(), "Transfer");
    assert_eq!(
        receipt.events[0],
        Event::Transfer(TransferEvent {
            from: fx.deployer.address(),
            to: fx.receiver.address(),
            value: tokens(100),
        })
    );
}

#[test]
fn transfer_rejects_insufficient_balance() {
    let mut fx = Fixture::new();
    let receipt = fx.transfer(fx.receiver.address(), tokens(1_000_000_000_001));

    assert!(!receipt.is_success());
    assert!(matches!(
        receipt.revert_reason(),
        Some(TokenError::InsufficientBalance { .. })
    ));
    assert!(receipt.events.is_empty());
    assert_eq!(fx.balance(&fx.deployer), tokens(1_000_000_000_000));
    assert_eq!(fx.balance(&fx.receiver), 0);
}

#[test]
fn transfer_rejects_invalid_recipient() {
    let mut fx = Fixture::new();
    let null: Address = "0x0000000000000000000000000000000000000000".parse().unwrap();
    let receipt = fx.transfer(null, tokens(100));

    assert_eq!(receipt.revert_reason(), Some(&TokenError::InvalidRecipient));
    assert_eq!(fx.balance(&fx.deployer), tokens(1_000_000_000_000));
    fx.assert_conserved();
}

// =============================================================================
// Approving tokens
// =============================================================================

#[test]
fn approve_allocates_allowance() {
    let mut fx = Fixture::new();
    let receipt = fx.approve_exchange(tokens(100));

    assert!(receipt.is_success());
    assert_eq!(fx.exchange_allowance(), tokens(100));
}

#[test]
fn approve_emits_approval_event() {
    let mut fx = Fixture::new();
    let receipt = fx.approve_exchange(tokens(100));

    assert_eq!(receipt.events[0].name(), "Approval");
    assert_eq!(
        receipt.events[0],
        Event::Approval(ApprovalEvent {
            owner: fx.deployer.address(),
            spender: fx.exchange.address(),
            value: tokens(100),
        })
    );
}

#[test]
fn approve_is_last_write_wins() {
    let mut fx = Fixture::new();
    fx.approve_exchange(tokens(100));
    fx.approve_exchange(tokens(40));

    assert_eq!(fx.exchange_allowance(), tokens(40));
}

#[test]
fn approve_rejects_invalid_spender() {
    let mut fx = Fixture::new();
    let deployer = fx.deployer.clone();
    let receipt = fx.execute(
        &deployer,
        Call::Approve {
            spender: Address::NULL,
            amount: tokens(100),
        },
    );

    assert_eq!(receipt.revert_reason(), Some(&TokenError::InvalidSpender));
    assert_eq!(
        fx.runtime
            .allowance(&fx.token, &deployer.address(), &Address::NULL)
            .unwrap(),
        0
    );
}

// =============================================================================
// Delegated token transfers
// =============================================================================

#[test]
fn transfer_from_moves_balances() {
    let mut fx = Fixture::new();
    fx.approve_exchange(tokens(100));
    let receipt = fx.exchange_transfer_from(tokens(100));

    assert!(receipt.is_success());
    assert_eq!(fx.balance(&fx.deployer), tokens(999_999_999_900));
    assert_eq!(fx.balance(&fx.receiver), tokens(100));
    assert_eq!(fx.balance(&fx.exchange), 0);
    fx.assert_conserved();
}

#[test]
fn transfer_from_resets_allowance() {
    let mut fx = Fixture::new();
    fx.approve_exchange(tokens(100));
    fx.exchange_transfer_from(tokens(100));

    assert_eq!(fx.exchange_allowance(), 0);
}

#[test]
fn transfer_from_emits_transfer_event_from_owner() {
    let mut fx = Fixture::new();
    fx.approve_exchange(tokens(100));
    let receipt = fx.exchange_transfer_from(tokens(100));

    assert_eq!(receipt.from, fx.exchange.address());
    assert_eq!(
        receipt.events,
        vec![Event::Transfer(TransferEvent {
            from: fx.deployer.address(),
            to: fx.receiver.address(),
            value: tokens(100),
        })]
    );
}

#[test]
fn transfer_from_rejects_amount_above_allowance() {
    let mut fx = Fixture::new();
    fx.approve_exchange(tokens(100));
    let receipt = fx.exchange_transfer_from(tokens(1_000_000_000_001));

    assert!(matches!(
        receipt.revert_reason(),
        Some(TokenError::InsufficientAllowance { .. })
    ));
    assert_eq!(fx.exchange_allowance(), tokens(100));
    assert_eq!(fx.balance(&fx.receiver), 0);
}

#[test]
fn transfer_from_rejects_allowance_shortfall_even_with_balance() {
    let mut fx = Fixture::new();
    fx.approve_exchange(tokens(100));
    let receipt = fx.exchange_transfer_from(tokens(101));

    assert!(!receipt.is_success());
    assert_eq!(fx.exchange_allowance(), tokens(100));
    assert_eq!(fx.balance(&fx.deployer), tokens(1_000_000_000_000));
}

// =============================================================================
// Ordering
// =============================================================================

#[test]
fn receipts_follow_submission_order() {
    let mut fx = Fixture::new();
    fx.approve_exchange(tokens(100));
    fx.exchange_transfer_from(tokens(60));
    fx.transfer(Address::NULL, 1);
    fx.exchange_transfer_from(tokens(60));

    let summary: Vec<(u64, String, bool)> = fx
        .runtime
        .receipts()
        .map(|r| (r.sequence, r.method.clone(), r.is_success()))
        .collect();

    assert_eq!(
        summary,
        vec![
            (1, "approve".to_string(), true),
            (2, "transferFrom".to_string(), true),
            (3, "transfer".to_string(), false),
            (4, "transferFrom".to_string(), false),
        ]
    );
    assert_eq!(fx.runtime.next_nonce(&fx.deployer.address()), 2);
    assert_eq!(fx.runtime.next_nonce(&fx.exchange.address()), 2);
    assert_eq!(fx.exchange_allowance(), tokens(40));
    fx.assert_conserved();
}

#[test]
fn receipt_serializes_to_json() {
    let mut fx = Fixture::new();
    let receipt = fx.transfer(fx.receiver.address(), tokens(100));

    let json: serde_json::Value =
        serde_json::from_str(&serde_json::to_string(&receipt).unwrap()).unwrap();
    assert_eq!(json["status"]["status"], "success");
    assert_eq!(json["events"][0]["event"], "Transfer");
    assert_eq!(json["events"][0]["value"], "100000000000000000000");
    assert_eq!(json["token"], fx.token.to_string());
}
