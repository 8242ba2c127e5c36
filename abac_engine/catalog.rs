//! The Policy Catalog: rule storage plus the
//! `(resource, action) -> rule ids` index.

use abac_core::{Action, Identifier, PolicyRule};
use ink::prelude::vec::Vec;
use ink::storage::Mapping;

#[ink::storage_item]
#[derive(Debug)]
pub struct PolicyCatalog {
    rules: Mapping<u32, PolicyRule>,
    index: Mapping<(Identifier, Action), Vec<u32>>,
    next_policy_id: u32,
}

impl Default for PolicyCatalog {
    fn default() -> Self {
        Self {
            rules: Mapping::default(),
            index: Mapping::default(),
            // id 0 is reserved to mean "no rule".
            next_policy_id: 1,
        }
    }
}

impl PolicyCatalog {
    pub fn get_policy(&self, id: u32) -> Option<PolicyRule> {
        self.rules.get(id)
    }

    pub fn get_policy_ids(&self, resource: Identifier, action: Action) -> Vec<u32> {
        self.index.get((resource, action)).unwrap_or_default()
    }

    /// Insert a new rule and append it to its `(resource, action)` index
    /// bucket. The caller is responsible for shape validation before
    /// calling this. Returns the newly assigned, strictly-increasing id.
    pub fn create_policy(&mut self, resource: Identifier, action: Action, conditions: Vec<abac_core::Condition>) -> u32 {
        let id = self.next_policy_id;
        let rule = PolicyRule {
            id,
            resource,
            action,
            conditions,
            enabled: true,
        };
        self.rules.insert(id, &rule);

        let mut ids = self.index.get((resource, action)).unwrap_or_default();
        ids.push(id);
        self.index.insert((resource, action), &ids);

        self.next_policy_id = id.saturating_add(1);
        id
    }

    pub fn set_policy_enabled(&mut self, id: u32, enabled: bool) -> Option<()> {
        let mut rule = self.rules.get(id)?;
        rule.enabled = enabled;
        self.rules.insert(id, &rule);
        Some(())
    }

    /// Remove `id` from its `(resource, action)` index bucket via
    /// swap-remove (order of the remaining ids is not preserved beyond
    /// that), and clear `enabled`. Idempotent: a missing index entry is
    /// not an error. The rule record itself is retained for audit.
    pub fn delete_policy(&mut self, id: u32) -> Option<()> {
        let mut rule = self.rules.get(id)?;
        let key = (rule.resource, rule.action);
        if let Some(mut ids) = self.index.get(key) {
            if let Some(pos) = ids.iter().position(|existing| *existing == id) {
                ids.swap_remove(pos);
                self.index.insert(key, &ids);
            }
        }
        rule.enabled = false;
        self.rules.insert(id, &rule);
        Some(())
    }
}
