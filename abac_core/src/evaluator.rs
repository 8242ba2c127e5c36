//! Pure, side-effect-free rule evaluation.
//!
//! Nothing in this module touches contract storage directly: callers
//! supply an [`AttributeSource`] (the Attribute Registry, in
//! `abac_engine`) to resolve `SUBJECT`/`OBJECT` operands. `ENV` operands
//! are resolved from the [`Environment`] value passed in, never from
//! storage. This keeps the decision of whether a rule matches reusable
//! and unit-testable independent of any chain environment.

use crate::action::OperandSource;
use crate::condition::{Condition, Operand, PolicyRule};
use crate::environment::Environment;
use crate::identifier::{AttributeKey, AttributeValue, Identifier};
use crate::keys;
use primitive_types::U256;

/// Supplies subject/object attribute reads to the evaluator. A missing
/// attribute must read as [`AttributeValue::ZERO`], never an
/// error — implementations satisfy this trivially since
/// `ink::storage::Mapping::get` already returns `Option`.
pub trait AttributeSource {
    fn subject_attr(&self, subject: Identifier, key: AttributeKey) -> AttributeValue;
    fn object_attr(&self, object: Identifier, key: AttributeKey) -> AttributeValue;
}

/// The two views of a resolved operand, produced together so numeric and
/// opaque-identifier semantics never drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedOperand {
    pub bytes: AttributeValue,
    pub num: U256,
}

impl ResolvedOperand {
    fn from_value(value: AttributeValue) -> Self {
        let num = value.as_u256();
        Self { bytes: value, num }
    }
}

/// Resolve a single operand against `(subject, object, env)` using
/// `attrs` for `SUBJECT`/`OBJECT` sources. `ENV` resolves the three
/// recognized keys (`timeWindow`, `emergencyMode`, `systemLoad`); any
/// other `ENV` key is an open extension slot and resolves to zero.
pub fn resolve<A: AttributeSource>(
    operand: &Operand,
    subject: Identifier,
    object: Identifier,
    env: &Environment,
    attrs: &A,
) -> ResolvedOperand {
    match operand.source {
        OperandSource::Subject => {
            ResolvedOperand::from_value(attrs.subject_attr(subject, operand.key))
        }
        OperandSource::Object => {
            ResolvedOperand::from_value(attrs.object_attr(object, operand.key))
        }
        OperandSource::Env => resolve_env(operand.key, env),
    }
}

/// The `ENV` resolver table. Kept as a small, explicit comparison chain
/// so that adding a recognized environment field is a table-only change.
pub fn resolve_env(key: AttributeKey, env: &Environment) -> ResolvedOperand {
    if key == keys::env_time_window() {
        let num = U256::from(env.time_window);
        return ResolvedOperand {
            bytes: AttributeValue::from_u256(num),
            num,
        };
    }
    if key == keys::env_emergency_mode() {
        let num = if env.emergency_mode {
            U256::one()
        } else {
            U256::zero()
        };
        return ResolvedOperand {
            bytes: AttributeValue::from_u256(num),
            num,
        };
    }
    if key == keys::env_system_load() {
        return ResolvedOperand {
            bytes: AttributeValue::from_u256(env.system_load),
            num: env.system_load,
        };
    }
    ResolvedOperand {
        bytes: AttributeValue::ZERO,
        num: U256::zero(),
    }
}

/// Decide whether a single condition holds for `(subject, object, env)`.
/// All integer comparisons are unsigned 256-bit; opaque comparisons never
/// coerce to numeric.
pub fn evaluate_condition<A: AttributeSource>(
    cond: &Condition,
    subject: Identifier,
    object: Identifier,
    env: &Environment,
    attrs: &A,
) -> bool {
    match cond {
        Condition::Eq { left, value } => {
            resolve(left, subject, object, env, attrs).bytes == *value
        }
        Condition::Neq { left, value } => {
            resolve(left, subject, object, env, attrs).bytes != *value
        }
        Condition::Le { left, num } => resolve(left, subject, object, env, attrs).num <= *num,
        Condition::Lt { left, num } => resolve(left, subject, object, env, attrs).num < *num,
        Condition::Ge { left, num } => resolve(left, subject, object, env, attrs).num >= *num,
        Condition::Gt { left, num } => resolve(left, subject, object, env, attrs).num > *num,
        Condition::InSet { left, values } => {
            let resolved = resolve(left, subject, object, env, attrs).bytes;
            values.iter().any(|candidate| *candidate == resolved)
        }
        Condition::EqField { left, right } => {
            let left = resolve(left, subject, object, env, attrs).bytes;
            let right = resolve(right, subject, object, env, attrs).bytes;
            left == right
        }
    }
}

/// Decide whether an entire rule matches: `enabled` AND every condition
/// holds. Short-circuits on the first false condition; the result never
/// depends on evaluation order since conditions have no side effects.
pub fn evaluate_policy<A: AttributeSource>(
    rule: &PolicyRule,
    subject: Identifier,
    object: Identifier,
    env: &Environment,
    attrs: &A,
) -> bool {
    rule.enabled
        && rule
            .conditions
            .iter()
            .all(|cond| evaluate_condition(cond, subject, object, env, attrs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::condition::Condition;
    use ink::prelude::vec;
    use std::collections::BTreeMap;

    struct FakeStore {
        subject: BTreeMap<(Identifier, AttributeKey), AttributeValue>,
        object: BTreeMap<(Identifier, AttributeKey), AttributeValue>,
    }

    impl FakeStore {
        fn new() -> Self {
            Self {
                subject: BTreeMap::new(),
                object: BTreeMap::new(),
            }
        }

        fn set_subject(&mut self, id: Identifier, key: AttributeKey, value: AttributeValue) {
            self.subject.insert((id, key), value);
        }

        fn set_object(&mut self, id: Identifier, key: AttributeKey, value: AttributeValue) {
            self.object.insert((id, key), value);
        }
    }

    impl AttributeSource for FakeStore {
        fn subject_attr(&self, subject: Identifier, key: AttributeKey) -> AttributeValue {
            self.subject
                .get(&(subject, key))
                .copied()
                .unwrap_or(AttributeValue::ZERO)
        }

        fn object_attr(&self, object: Identifier, key: AttributeKey) -> AttributeValue {
            self.object
                .get(&(object, key))
                .copied()
                .unwrap_or(AttributeValue::ZERO)
        }
    }

    fn id(byte: u8) -> Identifier {
        Identifier::from([byte; 20])
    }

    fn value(name: &str) -> AttributeValue {
        let key = keys::named(name);
        AttributeValue(key.0)
    }

    #[test]
    fn missing_attribute_resolves_to_zero() {
        let store = FakeStore::new();
        let env = Environment::default();
        let op = Operand::new(OperandSource::Subject, keys::sub_role());
        let resolved = resolve(&op, id(1), id(2), &env, &store);
        assert_eq!(resolved.bytes, AttributeValue::ZERO);
        assert_eq!(resolved.num, U256::zero());
    }

    #[test]
    fn env_unrecognized_key_resolves_to_zero_and_eq_zero_is_true() {
        let env = Environment::default();
        let store = FakeStore::new();
        let cond = Condition::Eq {
            left: Operand::new(OperandSource::Env, keys::named("unrecognized")),
            value: AttributeValue::ZERO,
        };
        assert!(evaluate_condition(&cond, id(1), id(2), &env, &store));
    }

    #[test]
    fn system_load_boundary_is_inclusive_on_le_ge() {
        let store = FakeStore::new();
        let env = Environment::new(0, false, U256::from(80u64));
        let le = Condition::Le {
            left: Operand::new(OperandSource::Env, keys::env_system_load()),
            num: U256::from(80u64),
        };
        let lt = Condition::Lt {
            left: Operand::new(OperandSource::Env, keys::env_system_load()),
            num: U256::from(80u64),
        };
        let ge = Condition::Ge {
            left: Operand::new(OperandSource::Env, keys::env_system_load()),
            num: U256::from(80u64),
        };
        let gt = Condition::Gt {
            left: Operand::new(OperandSource::Env, keys::env_system_load()),
            num: U256::from(80u64),
        };
        assert!(evaluate_condition(&le, id(1), id(2), &env, &store));
        assert!(!evaluate_condition(&lt, id(1), id(2), &env, &store));
        assert!(evaluate_condition(&ge, id(1), id(2), &env, &store));
        assert!(!evaluate_condition(&gt, id(1), id(2), &env, &store));
    }

    #[test]
    fn in_set_empty_is_always_false() {
        let store = FakeStore::new();
        let env = Environment::default();
        let cond = Condition::InSet {
            left: Operand::new(OperandSource::Env, keys::env_time_window()),
            values: vec![],
        };
        assert!(!evaluate_condition(&cond, id(1), id(2), &env, &store));
    }

    #[test]
    fn in_set_hits_any_member() {
        let store = FakeStore::new();
        let env0 = Environment::new(0, false, U256::zero());
        let env1 = Environment::new(1, false, U256::zero());
        let env2 = Environment::new(2, false, U256::zero());
        let cond = Condition::InSet {
            left: Operand::new(OperandSource::Env, keys::env_time_window()),
            values: vec![AttributeValue::from_u256(U256::zero()), AttributeValue::from_u256(U256::one())],
        };
        assert!(evaluate_condition(&cond, id(1), id(2), &env0, &store));
        assert!(evaluate_condition(&cond, id(1), id(2), &env1, &store));
        assert!(!evaluate_condition(&cond, id(1), id(2), &env2, &store));
    }

    #[test]
    fn eq_field_missing_both_sides_is_true() {
        let store = FakeStore::new();
        let env = Environment::default();
        let cond = Condition::EqField {
            left: Operand::new(OperandSource::Subject, keys::sub_location()),
            right: Operand::new(OperandSource::Object, keys::obj_location()),
        };
        assert!(evaluate_condition(&cond, id(1), id(2), &env, &store));
    }

    #[test]
    fn neq_is_the_negation_of_eq() {
        let mut store = FakeStore::new();
        store.set_subject(id(1), keys::sub_role(), value("employee"));
        let env = Environment::default();
        let op = Operand::new(OperandSource::Subject, keys::sub_role());
        let eq = Condition::Eq { left: op, value: value("contractor") };
        let neq = Condition::Neq { left: op, value: value("contractor") };
        assert!(!evaluate_condition(&eq, id(1), id(2), &env, &store));
        assert!(evaluate_condition(&neq, id(1), id(2), &env, &store));
    }

    #[test]
    fn eq_field_mismatched_sides_is_false() {
        let mut store = FakeStore::new();
        store.set_subject(id(1), keys::sub_location(), value("locationA"));
        store.set_object(id(2), keys::obj_location(), value("locationB"));
        let env = Environment::default();
        let cond = Condition::EqField {
            left: Operand::new(OperandSource::Subject, keys::sub_location()),
            right: Operand::new(OperandSource::Object, keys::obj_location()),
        };
        assert!(!evaluate_condition(&cond, id(1), id(2), &env, &store));
    }

    #[test]
    fn disabled_rule_never_matches() {
        let mut store = FakeStore::new();
        store.set_subject(id(1), keys::sub_role(), value("employee"));
        let env = Environment::default();
        let rule = PolicyRule {
            id: 1,
            resource: id(2),
            action: Action::Execute,
            conditions: vec![Condition::Eq {
                left: Operand::new(OperandSource::Subject, keys::sub_role()),
                value: value("employee"),
            }],
            enabled: false,
        };
        assert!(!evaluate_policy(&rule, id(1), id(2), &env, &store));
    }

    #[test]
    fn all_match_permits_end_to_end_scenario() {
        let mut store = FakeStore::new();
        let subject = id(0x10);
        let object = id(0x20);
        store.set_subject(subject, keys::sub_role(), value("employee"));
        store.set_subject(subject, keys::sub_location(), value("locationA"));
        store.set_object(object, keys::obj_resource_type(), value("doorLock"));
        store.set_object(object, keys::obj_location(), value("locationA"));

        let env = Environment::new(0, false, U256::from(50u64));
        let rule = PolicyRule {
            id: 7,
            resource: object,
            action: Action::Execute,
            conditions: vec![
                Condition::Eq {
                    left: Operand::new(OperandSource::Subject, keys::sub_role()),
                    value: value("employee"),
                },
                Condition::Eq {
                    left: Operand::new(OperandSource::Object, keys::obj_resource_type()),
                    value: value("doorLock"),
                },
                Condition::EqField {
                    left: Operand::new(OperandSource::Subject, keys::sub_location()),
                    right: Operand::new(OperandSource::Object, keys::obj_location()),
                },
                Condition::Eq {
                    left: Operand::new(OperandSource::Env, keys::env_time_window()),
                    value: AttributeValue::from_u256(U256::zero()),
                },
            ],
            enabled: true,
        };
        assert!(evaluate_policy(&rule, subject, object, &env, &store));

        // Field mismatch -> deny.
        let mut mismatched = store;
        mismatched.set_subject(subject, keys::sub_location(), value("locationB"));
        assert!(!evaluate_policy(&rule, subject, object, &env, &mismatched));

        // Env mismatch -> deny.
        let off_hours = Environment::new(1, false, U256::from(50u64));
        assert!(!evaluate_policy(&rule, subject, object, &off_hours, &mismatched));
    }

    #[test]
    fn idempotent_evaluation() {
        let mut store = FakeStore::new();
        let subject = id(1);
        let object = id(2);
        store.set_subject(subject, keys::sub_role(), value("employee"));
        let env = Environment::new(0, false, U256::from(50u64));
        let rule = PolicyRule {
            id: 1,
            resource: object,
            action: Action::Read,
            conditions: vec![Condition::Eq {
                left: Operand::new(OperandSource::Subject, keys::sub_role()),
                value: value("employee"),
            }],
            enabled: true,
        };
        let first = evaluate_policy(&rule, subject, object, &env, &store);
        let second = evaluate_policy(&rule, subject, object, &env, &store);
        assert_eq!(first, second);
    }
}
