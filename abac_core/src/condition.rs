use crate::action::{Action, OperandSource};
use crate::identifier::{AttributeKey, AttributeValue};
use ink::prelude::vec::Vec;
use primitive_types::U256;

/// Maximum members of an `InSet` condition's value set.
pub const MAX_SET_VALUES: usize = 8;
/// Bounds on a policy rule's condition list.
pub const MIN_CONDITIONS: usize = 1;
pub const MAX_CONDITIONS: usize = 16;

/// A single named operand: where to read it from, and which key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct Operand {
    pub source: OperandSource,
    pub key: AttributeKey,
}

impl Operand {
    pub fn new(source: OperandSource, key: AttributeKey) -> Self {
        Self { source, key }
    }
}

/// A single condition within a policy rule, one variant per operator.
/// Each variant carries exactly the operands its operator reads, rather
/// than a single wide record with most fields unused by any given
/// operator.
#[derive(Debug, Clone, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub enum Condition {
    Eq { left: Operand, value: AttributeValue },
    Neq { left: Operand, value: AttributeValue },
    Le { left: Operand, num: U256 },
    Lt { left: Operand, num: U256 },
    Ge { left: Operand, num: U256 },
    Gt { left: Operand, num: U256 },
    InSet { left: Operand, values: Vec<AttributeValue> },
    EqField { left: Operand, right: Operand },
}

impl Condition {
    /// Validate shape invariants that creation must enforce: an `InSet`
    /// condition's value set has at most [`MAX_SET_VALUES`] members. All
    /// other variants are shape-valid by construction.
    pub fn is_well_formed(&self) -> bool {
        match self {
            Condition::InSet { values, .. } => values.len() <= MAX_SET_VALUES,
            _ => true,
        }
    }
}

/// An administrator-authored access rule: target resource + action, an
/// AND'd list of conditions, and an enable/disable flag. Conditions are
/// declared `[1, 16]` long.
#[derive(Debug, Clone, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct PolicyRule {
    pub id: u32,
    pub resource: crate::identifier::Identifier,
    pub action: Action,
    pub conditions: Vec<Condition>,
    pub enabled: bool,
}

impl PolicyRule {
    /// Validate the shape invariants `create_policy` must enforce:
    /// `1 <= conditions.len() <= 16`, and every condition is individually
    /// well-formed (`InSet` sets capped at 8 members).
    pub fn is_well_formed(&self) -> bool {
        let len = self.conditions.len();
        len >= MIN_CONDITIONS
            && len <= MAX_CONDITIONS
            && self.conditions.iter().all(Condition::is_well_formed)
    }
}
