//! The Environment Verifier / Oracle interface.
//!
//! This is the one genuinely external collaborator in the engine: an
//! attestation service that proves a caller-supplied [`Environment`] is
//! authentic given an opaque proof. The trait is defined here (rather
//! than inside `abac_engine`) so both the orchestrator contract and any
//! verifier contract — including [`mock_env_verifier`](../../mock_env_verifier)
//! — can depend on the same definition without depending on each other.

use crate::environment::Environment;
use ink::prelude::vec::Vec;

/// Called exactly once per `request_access` when a verifier is
/// installed. Must not mutate observable engine state; the verifier may
/// maintain its own state (e.g. a set of accepted proof digests).
#[ink::trait_definition]
pub trait EnvironmentVerifier {
    /// Returns `true` iff `proof` authenticates `env`.
    #[ink(message)]
    fn verify(&self, env: Environment, proof: Vec<u8>) -> bool;
}
