use primitive_types::U256;

/// Opaque stable identifier for a subject or object. Realized as ink's
/// 20-byte account-style `Address`.
pub type Identifier = ink::Address;

/// A 32-byte opaque attribute key. Reference keys are the Keccak-256
/// digest of a well-known name (see [`crate::keys`]); equality is always
/// byte-exact, names are never compared at evaluation time.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct AttributeKey(pub [u8; 32]);

impl From<[u8; 32]> for AttributeKey {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// A 32-byte opaque attribute value. Reinterpreted as an unsigned 256-bit
/// integer by numeric operators; otherwise compared byte-exact as an
/// opaque identifier. A missing attribute reads as [`AttributeValue::ZERO`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct AttributeValue(pub [u8; 32]);

impl AttributeValue {
    pub const ZERO: AttributeValue = AttributeValue([0u8; 32]);

    /// Reinterpret the opaque bytes as an unsigned 256-bit integer,
    /// big-endian (the most significant byte is `bytes[0]`).
    pub fn as_u256(&self) -> U256 {
        U256::from_big_endian(&self.0)
    }

    /// Build an opaque value from a `u256` view, for constructing
    /// `ENV`-sourced operands (`timeWindow`, `emergencyMode`, `systemLoad`).
    pub fn from_u256(value: U256) -> Self {
        let mut bytes = [0u8; 32];
        value.to_big_endian(&mut bytes);
        Self(bytes)
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl From<[u8; 32]> for AttributeValue {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_value_round_trips_through_u256() {
        assert_eq!(AttributeValue::ZERO.as_u256(), U256::zero());
        assert!(AttributeValue::ZERO.is_zero());
    }

    #[test]
    fn u256_round_trip_preserves_bytes() {
        let value = AttributeValue::from_u256(U256::from(90u64));
        assert_eq!(value.as_u256(), U256::from(90u64));
        assert_eq!(value.0[31], 90);
    }
}
