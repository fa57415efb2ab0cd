//! Attestation lifecycle.
//!
//! A row starts [`AttestStatus::Idle`] (or `Attested` when the cache already
//! lists its edition), moves to `Pending` while the wallet signs and the
//! transaction confirms, and settles as `Attested` or `Failed`.
//!
//! Wallet errors are classified into [`AttestErrorKind`]:
//!
//! | Signal                                         | Kind           | Label             |
//! |------------------------------------------------|----------------|-------------------|
//! | code `4001`, or message has `User denied`      | `UserRejected` | `User denied tx.` |
//! | `Vote_AlreadyVoted()` revert, or in message    | `AlreadyVoted` | `Already voted.`  |
//! | anything else                                  | `Unknown`      | `Unknown error.`  |

use serde::{Deserialize, Serialize};

use crate::cache::{AttestationCache, KeyValueStore};
use crate::vault::{is_already_voted_revert, VoteTransaction};

/// EIP-1193 "user rejected request" code.
pub const USER_REJECTED_CODE: i64 = 4001;

// =============================================================================
// Transaction Errors
// =============================================================================

/// Error reported by the wallet or the chain for a write call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxError {
    /// Provider error code, if any
    pub code: Option<i64>,
    /// Human-readable message
    pub message: String,
    /// Hex revert data, if any
    pub data: Option<String>,
}

impl TxError {
    /// Error carrying only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }
}

impl std::fmt::Display for TxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.code {
            Some(code) => write!(f, "{} (code {})", self.message, code),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for TxError {}

/// Why an attestation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttestErrorKind {
    /// The vault already holds a vote from this account.
    AlreadyVoted,
    /// The user rejected the signature request.
    UserRejected,
    /// Anything else.
    Unknown,
}

impl AttestErrorKind {
    /// Classify a wallet error. Structured fields win over the message text.
    pub fn classify(err: &TxError) -> Self {
        if err.code == Some(USER_REJECTED_CODE) {
            return AttestErrorKind::UserRejected;
        }
        if err.data.as_deref().is_some_and(is_already_voted_revert) {
            return AttestErrorKind::AlreadyVoted;
        }

        if err.message.contains("Vote_AlreadyVoted") {
            AttestErrorKind::AlreadyVoted
        } else if err.message.contains("User denied") {
            AttestErrorKind::UserRejected
        } else {
            AttestErrorKind::Unknown
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AttestErrorKind::AlreadyVoted => "Already voted.",
            AttestErrorKind::UserRejected => "User denied tx.",
            AttestErrorKind::Unknown => "Unknown error.",
        }
    }
}

// =============================================================================
// Status
// =============================================================================

/// Lifecycle of one row's attestation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AttestStatus {
    #[default]
    Idle,
    Pending,
    Attested,
    Failed(AttestErrorKind),
}

impl AttestStatus {
    /// Starting state for a row.
    pub fn initial(already_attested: bool) -> Self {
        if already_attested {
            AttestStatus::Attested
        } else {
            AttestStatus::Idle
        }
    }

    /// Button text.
    pub fn label(&self) -> &'static str {
        match self {
            AttestStatus::Idle => "Attest",
            AttestStatus::Pending => "Attesting...",
            AttestStatus::Attested => "Attested!",
            AttestStatus::Failed(kind) => kind.label(),
        }
    }

    /// Button background class.
    pub fn css_class(&self) -> &'static str {
        match self {
            AttestStatus::Failed(_) => "bg-red-400",
            AttestStatus::Attested => "bg-green-300",
            AttestStatus::Idle | AttestStatus::Pending => "bg-slate-200",
        }
    }

    /// Whether the button may submit a new transaction.
    pub fn can_submit(&self) -> bool {
        matches!(self, AttestStatus::Idle | AttestStatus::Failed(_))
    }

    pub fn is_attested(&self) -> bool {
        matches!(self, AttestStatus::Attested)
    }

    /// Status shown once another row of the same edition may have attested.
    ///
    /// A vote already in flight keeps its own outcome.
    pub fn with_edition_attested(self, edition_attested: bool) -> Self {
        match self {
            AttestStatus::Pending => self,
            _ if edition_attested => AttestStatus::Attested,
            _ => self,
        }
    }
}

// =============================================================================
// Contract Writer
// =============================================================================

/// Sends a vote transaction and waits for its confirmation.
///
/// Returns the transaction hash on a successful receipt.
#[allow(async_fn_in_trait)]
pub trait ContractWriter {
    async fn send_vote(&self, tx: &VoteTransaction) -> Result<String, TxError>;
}

/// Everything needed to attest one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteRequest {
    pub edition_address: String,
    pub token_id: String,
    pub vault: String,
    pub voter: String,
}

/// Submit a vote and settle the row status, caching the edition on success.
pub async fn attest<W, S>(writer: &W, cache: &AttestationCache<S>, request: &VoteRequest) -> AttestStatus
where
    W: ContractWriter,
    S: KeyValueStore,
{
    let tx = match VoteTransaction::new(&request.vault, &request.voter, &request.token_id) {
        Ok(tx) => tx,
        Err(e) => {
            log::error!("Cannot build vote for {}: {}", request.edition_address, e);
            return AttestStatus::Failed(AttestErrorKind::Unknown);
        }
    };

    log::info!(
        "Attesting {} #{} via vault {}",
        request.edition_address,
        request.token_id,
        request.vault
    );
    let outcome = writer.send_vote(&tx).await;
    settle(cache, &request.edition_address, outcome)
}

/// Turn a write outcome into a status. A cache failure is logged and does
/// not demote a confirmed attestation.
pub fn settle<S: KeyValueStore>(
    cache: &AttestationCache<S>,
    edition_address: &str,
    outcome: Result<String, TxError>,
) -> AttestStatus {
    match outcome {
        Ok(hash) => {
            log::info!("Attestation confirmed for {}: {}", edition_address, hash);
            if let Err(e) = cache.record_attested(edition_address) {
                log::error!("Failed to cache attestation for {}: {}", edition_address, e);
            }
            AttestStatus::Attested
        }
        Err(err) => {
            let kind = AttestErrorKind::classify(&err);
            log::warn!("Attestation failed for {} ({:?}): {}", edition_address, kind, err);
            AttestStatus::Failed(kind)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;
    use futures::executor::block_on;
    use std::cell::Cell;

    struct FakeWriter {
        outcome: Result<String, TxError>,
        calls: Cell<usize>,
    }

    impl FakeWriter {
        fn new(outcome: Result<String, TxError>) -> Self {
            Self {
                outcome,
                calls: Cell::new(0),
            }
        }
    }

    impl ContractWriter for FakeWriter {
        async fn send_vote(&self, _tx: &VoteTransaction) -> Result<String, TxError> {
            self.calls.set(self.calls.get() + 1);
            self.outcome.clone()
        }
    }

    fn request() -> VoteRequest {
        VoteRequest {
            edition_address: "0xEd17100000000000000000000000000000000001".into(),
            token_id: "3".into(),
            vault: "0x1111111111111111111111111111111111111111".into(),
            voter: "0x2222222222222222222222222222222222222222".into(),
        }
    }

    #[test]
    fn test_classify_by_message() {
        let cases = [
            ("MetaMask Tx Signature: User denied transaction signature.", "User denied tx."),
            ("execution reverted: Vote_AlreadyVoted()", "Already voted."),
            ("insufficient funds for gas", "Unknown error."),
        ];
        for (message, label) in cases {
            let kind = AttestErrorKind::classify(&TxError::message(message));
            assert_eq!(kind.label(), label, "message: {}", message);
        }
    }

    #[test]
    fn test_classify_by_code_and_data() {
        let rejected = TxError {
            code: Some(USER_REJECTED_CODE),
            message: "rejected".into(),
            data: None,
        };
        assert_eq!(AttestErrorKind::classify(&rejected), AttestErrorKind::UserRejected);

        let selector = alloy_primitives::keccak256(b"Vote_AlreadyVoted()");
        let reverted = TxError {
            code: Some(3),
            message: "execution reverted".into(),
            data: Some(format!("0x{}", hex::encode(&selector[..4]))),
        };
        assert_eq!(AttestErrorKind::classify(&reverted), AttestErrorKind::AlreadyVoted);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(AttestStatus::Idle.label(), "Attest");
        assert_eq!(AttestStatus::Pending.label(), "Attesting...");
        assert_eq!(AttestStatus::Attested.label(), "Attested!");
        assert_eq!(AttestStatus::Failed(AttestErrorKind::AlreadyVoted).css_class(), "bg-red-400");
        assert_eq!(AttestStatus::initial(true), AttestStatus::Attested);
        assert!(!AttestStatus::Pending.can_submit());
        assert!(AttestStatus::Failed(AttestErrorKind::Unknown).can_submit());
    }

    #[test]
    fn test_sibling_attestation_settles_row() {
        assert_eq!(AttestStatus::Idle.with_edition_attested(true), AttestStatus::Attested);
        assert_eq!(
            AttestStatus::Failed(AttestErrorKind::AlreadyVoted).with_edition_attested(true),
            AttestStatus::Attested
        );
        assert_eq!(AttestStatus::Pending.with_edition_attested(true), AttestStatus::Pending);
        assert_eq!(AttestStatus::Idle.with_edition_attested(false), AttestStatus::Idle);
    }

    #[test]
    fn test_success_caches_once() {
        let cache = AttestationCache::new(MemoryStore::new());
        let writer = FakeWriter::new(Ok("0xhash".into()));
        let req = request();

        let status = block_on(attest(&writer, &cache, &req));
        assert_eq!(status.label(), "Attested!");

        let status = block_on(attest(&writer, &cache, &req));
        assert!(status.is_attested());

        assert_eq!(cache.attested().unwrap(), vec![req.edition_address.clone()]);
        assert_eq!(writer.calls.get(), 2);
    }

    #[test]
    fn test_failure_does_not_cache() {
        let cache = AttestationCache::new(MemoryStore::new());
        let writer = FakeWriter::new(Err(TxError::message("User denied transaction")));

        let status = block_on(attest(&writer, &cache, &request()));
        assert_eq!(status, AttestStatus::Failed(AttestErrorKind::UserRejected));
        assert!(cache.attested().unwrap().is_empty());
    }

    #[test]
    fn test_bad_token_id_skips_wallet() {
        let cache = AttestationCache::new(MemoryStore::new());
        let writer = FakeWriter::new(Ok("0xhash".into()));
        let mut req = request();
        req.token_id = "not-a-number".into();

        let status = block_on(attest(&writer, &cache, &req));
        assert_eq!(status, AttestStatus::Failed(AttestErrorKind::Unknown));
        assert_eq!(writer.calls.get(), 0);
    }
}
