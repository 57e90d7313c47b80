//! Signed transfer authorizations and their verification.
//!
//! An authorization is a time-limited, nonce-bound approval signed by the
//! sending account's assigned sponsor. It is constructed outside the ledger
//! core and exists here only for the duration of one verify+consume call;
//! the ledger never persists it. Verification is stateless and fail-fast:
//! the first failing check is the reported reason. Nonce consumption is the
//! transfer engine's job, never the verifier's.

use crate::account::{AccountId, SponsorId};
use crate::crypto::{verify_with_pubkey_hex, KeyPair};
use crate::encoding::CanonicalSerialize;
use crate::error::LedgerError;
use crate::sponsor::SponsorRegistry;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::io::{self, Write};

/// Who an authorization permits funds to be sent to.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum RecipientScope {
    /// Exactly one recipient account.
    Single(AccountId),
    /// Any member of a named recipient group in the sponsor registry.
    Group(String),
}

impl RecipientScope {
    /// Whether this scope includes `recipient`. Group membership resolves
    /// against the registry at verification time, not issuance time.
    pub fn covers(&self, recipient: &str, registry: &SponsorRegistry) -> bool {
        match self {
            RecipientScope::Single(id) => id == recipient,
            RecipientScope::Group(tag) => registry.group_contains(tag, recipient),
        }
    }
}

impl CanonicalSerialize for RecipientScope {
    fn canonical_serialize<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        match self {
            RecipientScope::Single(id) => {
                0u8.canonical_serialize(writer)?;
                id.canonical_serialize(writer)
            }
            RecipientScope::Group(tag) => {
                1u8.canonical_serialize(writer)?;
                tag.canonical_serialize(writer)
            }
        }
    }
}

/// A sponsor-signed approval covering one transfer. Single-use: consuming
/// the sender nonce invalidates the payload permanently, so the
/// nonce-equality check is the sole replay guard.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SignedAuthorization {
    pub sender: AccountId,
    pub recipient: RecipientScope,
    /// Upper bound on the transfer this authorization may cover.
    pub amount: u128,
    /// Second cap on the requested amount. Retained from the issuing
    /// protocol; with single-use authorizations there is no cumulative
    /// spend to track, so it acts as another per-call bound.
    pub spending_limit: u128,
    /// Must equal the sender account's current nonce at verification time.
    pub nonce: u64,
    /// Unix seconds; invalid strictly after this instant.
    pub expiration: i64,
    /// Ed25519 signature (hex) over the SHA-256 digest of the canonical
    /// payload encoding, produced by the sender's assigned sponsor.
    pub signature_hex: String,
}

impl SignedAuthorization {
    /// Canonical signing payload. The signature field itself is excluded.
    fn signing_payload(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.sender
            .canonical_serialize(&mut buf)
            .expect("memory write failed");
        self.recipient
            .canonical_serialize(&mut buf)
            .expect("memory write failed");
        self.amount
            .canonical_serialize(&mut buf)
            .expect("memory write failed");
        self.spending_limit
            .canonical_serialize(&mut buf)
            .expect("memory write failed");
        self.nonce
            .canonical_serialize(&mut buf)
            .expect("memory write failed");
        self.expiration
            .canonical_serialize(&mut buf)
            .expect("memory write failed");
        buf
    }

    /// SHA-256 digest the sponsor signs.
    pub fn payload_digest(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(self.signing_payload());
        hasher.finalize().into()
    }

    /// Build and sign an authorization with a sponsor keypair. The real
    /// issuing service lives outside the ledger; this constructor backs
    /// operator tooling and tests.
    #[allow(clippy::too_many_arguments)]
    pub fn issue(
        sender: AccountId,
        recipient: RecipientScope,
        amount: u128,
        spending_limit: u128,
        nonce: u64,
        expiration: i64,
        sponsor_keypair: &KeyPair,
    ) -> Self {
        let mut auth = Self {
            sender,
            recipient,
            amount,
            spending_limit,
            nonce,
            expiration,
            signature_hex: String::new(),
        };
        auth.signature_hex = sponsor_keypair.sign_hex(&auth.payload_digest());
        auth
    }
}

/// Validate `auth` against a transfer request and the sender's registered
/// authority. Checks run in a fixed order and the first failure is returned:
/// expiration, scope, limits, nonce, then signature. Never mutates state.
#[allow(clippy::too_many_arguments)]
pub fn verify(
    auth: &SignedAuthorization,
    expected_sender: &str,
    expected_recipient: &str,
    requested_amount: u128,
    account_nonce: u64,
    assigned_sponsor: &SponsorId,
    registry: &SponsorRegistry,
    now: i64,
) -> Result<(), LedgerError> {
    // 1. Time window
    if now > auth.expiration {
        return Err(LedgerError::Expired);
    }

    // 2. Party scope
    if auth.sender != expected_sender || !auth.recipient.covers(expected_recipient, registry) {
        return Err(LedgerError::ScopeMismatch);
    }

    // 3. Amount caps
    if requested_amount > auth.amount || requested_amount > auth.spending_limit {
        return Err(LedgerError::LimitExceeded);
    }

    // 4. Replay guard: covers both stale and already-consumed authorizations
    if auth.nonce != account_nonce {
        return Err(LedgerError::NonceMismatch {
            expected: account_nonce,
            got: auth.nonce,
        });
    }

    // 5. Signer authority. Ed25519 has no signer recovery, so the two-stage
    // check runs as: resolve the assigned sponsor's key in the legal set
    // (a dangling assignment fails closed here), then verify the signature
    // under that key.
    let pubkey_hex = registry
        .pubkey_of(assigned_sponsor)
        .ok_or(LedgerError::UnauthorizedSigner)?;
    if !verify_with_pubkey_hex(&auth.payload_digest(), &auth.signature_hex, pubkey_hex) {
        return Err(LedgerError::BadSignature);
    }

    Ok(())
}
