#![cfg_attr(not(feature = "std"), no_std, no_main)]

//! Minimal stand-in for the external attestation service the ABAC
//! engine's Decision Orchestrator consults before honoring
//! `request_access`. Accepts a proof only after an admin has explicitly
//! whitelisted its Keccak-256 digest — enough to exercise the verifier
//! gate without implementing real attestation.

#[ink::contract]
mod mock_env_verifier {
    use abac_core::{Environment, EnvironmentVerifier};
    use ink::prelude::vec::Vec;
    use ink::storage::Mapping;
    use sha3::{Digest, Keccak256};

    #[ink(storage)]
    pub struct MockEnvVerifier {
        admin: Address,
        /// Keccak-256 digests of proofs this verifier currently accepts.
        accepted: Mapping<[u8; 32], bool>,
    }

    #[ink(event)]
    pub struct ProofWhitelisted {
        #[ink(topic)]
        proof_digest: [u8; 32],
    }

    #[ink(event)]
    pub struct ProofRevoked {
        #[ink(topic)]
        proof_digest: [u8; 32],
    }

    #[derive(Debug, PartialEq, Eq, Clone, scale::Encode, scale::Decode)]
    #[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
    pub enum Error {
        /// Caller is not the admin.
        NotAuthorized,
    }

    pub type Result<T> = core::result::Result<T, Error>;

    impl Default for MockEnvVerifier {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockEnvVerifier {
        #[ink(constructor)]
        pub fn new() -> Self {
            Self {
                admin: Self::env().caller(),
                accepted: Mapping::default(),
            }
        }

        #[ink(message)]
        pub fn admin(&self) -> Address {
            self.admin
        }

        #[ink(message)]
        pub fn set_admin(&mut self, new_admin: Address) -> Result<()> {
            self.require_admin()?;
            self.admin = new_admin;
            Ok(())
        }

        /// Admit a specific proof (by its Keccak-256 digest) as valid
        /// evidence from now on.
        #[ink(message)]
        pub fn whitelist_proof(&mut self, proof: Vec<u8>) -> Result<()> {
            self.require_admin()?;
            let digest = Self::digest(&proof);
            self.accepted.insert(digest, &true);
            self.env().emit_event(ProofWhitelisted { proof_digest: digest });
            Ok(())
        }

        #[ink(message)]
        pub fn revoke_proof(&mut self, proof: Vec<u8>) -> Result<()> {
            self.require_admin()?;
            let digest = Self::digest(&proof);
            self.accepted.remove(digest);
            self.env().emit_event(ProofRevoked { proof_digest: digest });
            Ok(())
        }

        #[ink(message)]
        pub fn is_whitelisted(&self, proof: Vec<u8>) -> bool {
            self.accepted.get(Self::digest(&proof)).unwrap_or(false)
        }

        fn digest(proof: &[u8]) -> [u8; 32] {
            let mut hasher = Keccak256::new();
            hasher.update(proof);
            let out = hasher.finalize();
            let mut bytes = [0u8; 32];
            bytes.copy_from_slice(&out);
            bytes
        }

        fn require_admin(&self) -> Result<()> {
            if self.env().caller() != self.admin {
                return Err(Error::NotAuthorized);
            }
            Ok(())
        }
    }

    impl EnvironmentVerifier for MockEnvVerifier {
        /// `env` is accepted sight-unseen: this mock authenticates the
        /// *proof*, not the environment payload, so only the proof's
        /// whitelist status changes the verdict between two calls with
        /// identical `env`.
        #[ink(message)]
        fn verify(&self, _env: Environment, proof: Vec<u8>) -> bool {
            self.accepted.get(Self::digest(&proof)).unwrap_or(false)
        }
    }

}
