//! Opaque identifiers, the condition AST, the pure policy evaluator, and
//! well-known attribute key derivation for the ABAC decision engine.
//!
//! Nothing in this crate is an ink! contract: it holds no storage and
//! emits no events. `abac_engine` is the deployable contract that wires
//! these types to `ink::storage::Mapping` and exposes the message
//! surface.
#![cfg_attr(not(feature = "std"), no_std)]

pub mod action;
pub mod condition;
pub mod environment;
pub mod evaluator;
pub mod identifier;
pub mod keys;
pub mod verifier;

pub use action::{Action, OperandSource};
pub use condition::{Condition, Operand, PolicyRule, MAX_CONDITIONS, MAX_SET_VALUES, MIN_CONDITIONS};
pub use environment::Environment;
pub use evaluator::{evaluate_condition, evaluate_policy, resolve, AttributeSource, ResolvedOperand};
pub use identifier::{AttributeKey, AttributeValue, Identifier};
pub use verifier::EnvironmentVerifier;
