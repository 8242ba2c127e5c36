#![cfg_attr(not(feature = "std"), no_std, no_main)]

mod catalog;
mod registry;

#[ink::contract]
mod abac_engine {
    use crate::catalog::PolicyCatalog;
    use crate::registry::AttributeRegistry;
    use abac_core::{
        evaluate_policy, Action, AttributeKey, AttributeSource, AttributeValue, Condition,
        Environment, EnvironmentVerifier, PolicyRule,
    };
    use ink::prelude::vec::Vec;

    /// Attribute Registry + Policy Catalog + Decision Orchestrator, kept
    /// as one contract for the reasons laid out in `SPEC_FULL.md` §4: the
    /// teacher's own `policy_engine` contract already keeps these
    /// concerns together rather than pay a cross-contract call on every
    /// condition read, and the spec's single-threaded, serialized state
    /// machine (§5) holds trivially for one contract's storage.
    #[ink(storage)]
    pub struct AbacEngine {
        registry: AttributeRegistry,
        catalog: PolicyCatalog,
        admin: Address,
        /// Installed Environment Verifier, if any (spec §4.4, §6).
        oracle: Option<Address>,
    }

    impl AttributeSource for AttributeRegistry {
        fn subject_attr(&self, subject: Address, key: AttributeKey) -> AttributeValue {
            AttributeRegistry::subject_attr(self, subject, key)
        }

        fn object_attr(&self, object: Address, key: AttributeKey) -> AttributeValue {
            AttributeRegistry::object_attr(self, object, key)
        }
    }

    // ---- Events -----------------------------------------------------

    #[ink(event)]
    pub struct AttributeSet {
        #[ink(topic)]
        identifier: Address,
        #[ink(topic)]
        key: AttributeKey,
        value: AttributeValue,
        is_subject: bool,
    }

    #[ink(event)]
    pub struct PolicyCreated {
        #[ink(topic)]
        policy_id: u32,
        #[ink(topic)]
        resource: Address,
        action: Action,
    }

    #[ink(event)]
    pub struct PolicyEnabledChanged {
        #[ink(topic)]
        policy_id: u32,
        enabled: bool,
    }

    #[ink(event)]
    pub struct PolicyDeleted {
        #[ink(topic)]
        policy_id: u32,
    }

    #[ink(event)]
    pub struct EnvOracleChanged {
        oracle: Option<Address>,
    }

    /// The audit record emitted once per `request_access` call (spec
    /// §4.4 "Audit event shape"). `check_access` emits nothing.
    #[ink(event)]
    pub struct DecisionMade {
        #[ink(topic)]
        subject: Address,
        #[ink(topic)]
        resource: Address,
        action: Action,
        permit: bool,
        matched_policy_id: u32,
    }

    // ---- Errors -------------------------------------------------------

    #[derive(Debug, PartialEq, Eq, Clone, scale::Encode, scale::Decode)]
    #[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
    pub enum Error {
        /// Caller is neither the subject (self-attribute write) nor the admin.
        NotAuthorized,
        /// Parallel key/value arrays of unequal length in a batch write.
        LengthMismatch,
        /// Zero conditions, more than 16 conditions, or an `InSet` with
        /// more than 8 members.
        BadPolicyShape,
        /// `get_policy` / `set_policy_enabled` / `delete_policy` on a
        /// nonexistent id.
        UnknownPolicy,
        /// The configured environment verifier rejected the supplied
        /// proof; no decision is emitted for this request.
        EnvVerificationFailed,
    }

    pub type Result<T> = core::result::Result<T, Error>;

    impl Default for AbacEngine {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AbacEngine {
        /// Constructor. The deploying caller becomes admin; no verifier
        /// is installed (environment verification is a no-op until
        /// `set_env_oracle` is called).
        #[ink(constructor)]
        pub fn new() -> Self {
            Self {
                registry: AttributeRegistry::default(),
                catalog: PolicyCatalog::default(),
                admin: Self::env().caller(),
                oracle: None,
            }
        }

        // ---- Administrative surface (spec §6) ------------------------

        /// Ownership transfer, per component (spec §6). Any existing
        /// admin may hand the role to a new address.
        #[ink(message)]
        pub fn set_admin(&mut self, new_admin: Address) -> Result<()> {
            self.require_admin()?;
            self.admin = new_admin;
            Ok(())
        }

        #[ink(message)]
        pub fn admin(&self) -> Address {
            self.admin
        }

        /// Install or clear the Environment Verifier. `None` disables
        /// verification entirely; `Some(addr)` enables it (spec §4.4).
        #[ink(message)]
        pub fn set_env_oracle(&mut self, oracle: Option<Address>) -> Result<()> {
            self.require_admin()?;
            self.oracle = oracle;
            self.env().emit_event(EnvOracleChanged { oracle });
            Ok(())
        }

        #[ink(message)]
        pub fn env_oracle(&self) -> Option<Address> {
            self.oracle
        }

        // ---- Attribute Registry (spec §4.1) --------------------------

        #[ink(message)]
        pub fn subject_attr(&self, subject: Address, key: AttributeKey) -> AttributeValue {
            self.registry.subject_attr(subject, key)
        }

        #[ink(message)]
        pub fn object_attr(&self, object: Address, key: AttributeKey) -> AttributeValue {
            self.registry.object_attr(object, key)
        }

        #[ink(message)]
        pub fn is_subject_registered(&self, subject: Address) -> bool {
            self.registry.is_subject_registered(subject)
        }

        #[ink(message)]
        pub fn is_object_registered(&self, object: Address) -> bool {
            self.registry.is_object_registered(object)
        }

        /// Write one subject attribute. Permitted if the caller *is* the
        /// subject, or the caller is admin (spec §4.1 "Authorization").
        #[ink(message)]
        pub fn set_subject_attribute(
            &mut self,
            subject: Address,
            key: AttributeKey,
            value: AttributeValue,
        ) -> Result<()> {
            let caller = self.env().caller();
            if caller != subject && caller != self.admin {
                return Err(Error::NotAuthorized);
            }
            self.registry.set_subject_attribute(subject, key, value);
            self.env().emit_event(AttributeSet {
                identifier: subject,
                key,
                value,
                is_subject: true,
            });
            Ok(())
        }

        /// Write one object attribute. Admin-only (spec §4.1
        /// "Authorization") — object writes, unlike subject writes, are
        /// never self-service.
        #[ink(message)]
        pub fn set_object_attribute(
            &mut self,
            object: Address,
            key: AttributeKey,
            value: AttributeValue,
        ) -> Result<()> {
            self.require_admin()?;
            self.registry.set_object_attribute(object, key, value);
            self.env().emit_event(AttributeSet {
                identifier: object,
                key,
                value,
                is_subject: false,
            });
            Ok(())
        }

        /// Batch subject-attribute write. Either every key/value pair
        /// applies, or (on length mismatch) none do (spec §4.1
        /// "Guarantees").
        #[ink(message)]
        pub fn set_subject_attributes(
            &mut self,
            subject: Address,
            keys: Vec<AttributeKey>,
            values: Vec<AttributeValue>,
        ) -> Result<()> {
            let caller = self.env().caller();
            if caller != subject && caller != self.admin {
                return Err(Error::NotAuthorized);
            }
            if keys.len() != values.len() {
                return Err(Error::LengthMismatch);
            }
            self.registry.set_subject_attributes(subject, &keys, &values);
            for (key, value) in keys.iter().zip(values.iter()) {
                self.env().emit_event(AttributeSet {
                    identifier: subject,
                    key: *key,
                    value: *value,
                    is_subject: true,
                });
            }
            Ok(())
        }

        #[ink(message)]
        pub fn set_object_attributes(
            &mut self,
            object: Address,
            keys: Vec<AttributeKey>,
            values: Vec<AttributeValue>,
        ) -> Result<()> {
            self.require_admin()?;
            if keys.len() != values.len() {
                return Err(Error::LengthMismatch);
            }
            self.registry.set_object_attributes(object, &keys, &values);
            for (key, value) in keys.iter().zip(values.iter()) {
                self.env().emit_event(AttributeSet {
                    identifier: object,
                    key: *key,
                    value: *value,
                    is_subject: false,
                });
            }
            Ok(())
        }

        // ---- Policy Catalog (spec §4.2) ------------------------------

        #[ink(message)]
        pub fn get_policy(&self, id: u32) -> Result<PolicyRule> {
            self.catalog.get_policy(id).ok_or(Error::UnknownPolicy)
        }

        #[ink(message)]
        pub fn get_policy_ids(&self, resource: Address, action: Action) -> Vec<u32> {
            self.catalog.get_policy_ids(resource, action)
        }

        /// Create a new, initially-enabled policy. Admin-only. Validated
        /// shape: `1 <= conditions.len() <= 16`, every `InSet` condition
        /// capped at 8 members (spec §4.2 "Validation on creation") — no
        /// partial state is written on failure.
        #[ink(message)]
        pub fn create_policy(
            &mut self,
            resource: Address,
            action: Action,
            conditions: Vec<Condition>,
        ) -> Result<u32> {
            self.require_admin()?;
            let len = conditions.len();
            if len < abac_core::MIN_CONDITIONS || len > abac_core::MAX_CONDITIONS {
                return Err(Error::BadPolicyShape);
            }
            if !conditions.iter().all(|cond| cond.is_well_formed()) {
                return Err(Error::BadPolicyShape);
            }
            let id = self.catalog.create_policy(resource, action, conditions);
            self.env().emit_event(PolicyCreated {
                policy_id: id,
                resource,
                action,
            });
            Ok(id)
        }

        #[ink(message)]
        pub fn set_policy_enabled(&mut self, id: u32, enabled: bool) -> Result<()> {
            self.require_admin()?;
            self.catalog
                .set_policy_enabled(id, enabled)
                .ok_or(Error::UnknownPolicy)?;
            self.env()
                .emit_event(PolicyEnabledChanged { policy_id: id, enabled });
            Ok(())
        }

        /// Remove `id` from its index bucket; idempotent if it was
        /// already absent (spec §9 open question (a)). Fails only if the
        /// rule id itself is unknown.
        #[ink(message)]
        pub fn delete_policy(&mut self, id: u32) -> Result<()> {
            self.require_admin()?;
            self.catalog.delete_policy(id).ok_or(Error::UnknownPolicy)?;
            self.env().emit_event(PolicyDeleted { policy_id: id });
            Ok(())
        }

        // ---- Decision Orchestrator (spec §4.4) -----------------------

        /// Read-only decision: no environment verification, no audit
        /// emission. The first rule in index order that matches wins.
        #[ink(message)]
        pub fn check_access(
            &self,
            subject: Address,
            resource: Address,
            action: Action,
            env: Environment,
        ) -> (bool, u32) {
            self.decide(subject, resource, action, &env)
        }

        /// Authoritative decision: verifies the environment (if a
        /// verifier is installed), then decides, then emits exactly one
        /// [`DecisionMade`] audit event (spec §4.4 "Algorithm").
        #[ink(message)]
        pub fn request_access(
            &mut self,
            subject: Address,
            resource: Address,
            action: Action,
            env: Environment,
            env_proof: Vec<u8>,
        ) -> Result<bool> {
            if let Some(oracle_addr) = self.oracle {
                let mut verifier: ink::contract_ref!(EnvironmentVerifier) = oracle_addr.into();
                if !verifier.verify(env, env_proof) {
                    return Err(Error::EnvVerificationFailed);
                }
            }
            let (permit, matched_policy_id) = self.decide(subject, resource, action, &env);
            self.env().emit_event(DecisionMade {
                subject,
                resource,
                action,
                permit,
                matched_policy_id,
            });
            Ok(permit)
        }

        /// Shared decision algorithm for `check_access`/`request_access`
        /// (after environment verification, if any, has already
        /// happened). Deny-by-default: an empty or all-non-matching id
        /// list returns `(false, 0)` (spec §4.4 step 3/5, §8 invariant 1).
        fn decide(&self, subject: Address, resource: Address, action: Action, env: &Environment) -> (bool, u32) {
            let ids = self.catalog.get_policy_ids(resource, action);
            for id in ids {
                if let Some(rule) = self.catalog.get_policy(id) {
                    if evaluate_policy(&rule, subject, resource, env, &self.registry) {
                        return (true, id);
                    }
                }
            }
            (false, 0)
        }

        fn require_admin(&self) -> Result<()> {
            if self.env().caller() != self.admin {
                return Err(Error::NotAuthorized);
            }
            Ok(())
        }
    }

}
