//! Vault contract interface.
//!
//! Each collection has a vault that receives `vote` transactions. Call data
//! is ABI-encoded here so the wallet only has to sign and send it.

use alloy_primitives::{Address, U256};
use alloy_sol_types::{sol, SolCall, SolError};
use serde::{Deserialize, Serialize};

use crate::error::{VaultError, VaultResult};

/// Review text sent with every attestation.
pub const ATTESTATION_REVIEW: &str = "Very Good Collection!";

sol! {
    function vote(uint256 token_id, string review, bool approved, address voter);

    error Vote_AlreadyVoted();
}

/// A ready-to-send `vote` transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTransaction {
    /// Voter (sender)
    pub from: String,
    /// Vault contract
    pub to: String,
    /// 0x-prefixed call data
    pub data: String,
}

impl VoteTransaction {
    /// Build the `vote(tokenId, review, true, voter)` call for a vault.
    pub fn new(vault: &str, voter: &str, token_id: &str) -> VaultResult<Self> {
        let vault_address = parse_address(vault)?;
        let voter_address = parse_address(voter)?;
        let data = encode_vote(token_id, voter_address)?;

        Ok(Self {
            from: voter_address.to_string(),
            to: vault_address.to_string(),
            data: format!("0x{}", hex::encode(data)),
        })
    }
}

/// ABI-encode `vote` with the fixed review and approval.
pub fn encode_vote(token_id: &str, voter: Address) -> VaultResult<Vec<u8>> {
    let call = voteCall {
        token_id: parse_token_id(token_id)?,
        review: ATTESTATION_REVIEW.to_string(),
        approved: true,
        voter,
    };
    Ok(call.abi_encode())
}

/// Solidity signature of the vote function.
pub fn vote_signature() -> &'static str {
    voteCall::SIGNATURE
}

/// Whether revert data carries the `Vote_AlreadyVoted()` custom error.
pub fn is_already_voted_revert(data: &str) -> bool {
    let hex_part = data.trim().trim_start_matches("0x");
    hex_part
        .get(..8)
        .and_then(|prefix| hex::decode(prefix).ok())
        .is_some_and(|selector| selector == Vote_AlreadyVoted::SELECTOR)
}

/// Parse a base-10 token id.
pub fn parse_token_id(token_id: &str) -> VaultResult<U256> {
    let trimmed = token_id.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(VaultError::InvalidTokenId(token_id.to_string()));
    }
    U256::from_str_radix(trimmed, 10).map_err(|_| VaultError::InvalidTokenId(token_id.to_string()))
}

fn parse_address(address: &str) -> VaultResult<Address> {
    address
        .trim()
        .parse::<Address>()
        .map_err(|_| VaultError::InvalidAddress(address.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::keccak256;

    const VAULT: &str = "0x1111111111111111111111111111111111111111";
    const VOTER: &str = "0x2222222222222222222222222222222222222222";

    #[test]
    fn test_selector_matches_signature() {
        let data = encode_vote("5", VOTER.parse().unwrap()).unwrap();
        let expected = keccak256(b"vote(uint256,string,bool,address)");
        assert_eq!(&data[..4], &expected[..4]);
        assert_eq!(vote_signature(), "vote(uint256,string,bool,address)");
    }

    #[test]
    fn test_arguments_are_encoded() {
        let data = encode_vote("5", VOTER.parse().unwrap()).unwrap();
        let decoded = voteCall::abi_decode(&data, true).unwrap();
        assert_eq!(decoded.token_id, U256::from(5u64));
        assert_eq!(decoded.review, ATTESTATION_REVIEW);
        assert!(decoded.approved);
        assert_eq!(decoded.voter, VOTER.parse::<Address>().unwrap());
    }

    #[test]
    fn test_transaction_fields() {
        let tx = VoteTransaction::new(VAULT, VOTER, "12").unwrap();
        assert_eq!(tx.to.to_lowercase(), VAULT);
        assert_eq!(tx.from.to_lowercase(), VOTER);
        assert!(tx.data.starts_with("0x"));
    }

    #[test]
    fn test_invalid_token_id() {
        assert_eq!(
            parse_token_id("12abc"),
            Err(VaultError::InvalidTokenId("12abc".into()))
        );
        assert!(parse_token_id("").is_err());
        assert!(parse_token_id("-1").is_err());
        assert_eq!(parse_token_id(" 7 ").unwrap(), U256::from(7u64));
    }

    #[test]
    fn test_invalid_vault_address() {
        let err = VoteTransaction::new("0xnotanaddress", VOTER, "1").unwrap_err();
        assert_eq!(err, VaultError::InvalidAddress("0xnotanaddress".into()));
    }

    #[test]
    fn test_already_voted_revert() {
        let selector = keccak256(b"Vote_AlreadyVoted()");
        let data = format!("0x{}", hex::encode(&selector[..4]));
        assert!(is_already_voted_revert(&data));
        assert!(!is_already_voted_revert("0x08c379a0"));
        assert!(!is_already_voted_revert("0x"));
    }
}
