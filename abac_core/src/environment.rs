use primitive_types::U256;

/// Ambient attributes supplied at decision time. A fixed record with
/// exactly three fields at the boundary; the `ENV` operand source is
/// otherwise an open extension slot (unrecognized keys resolve to zero,
/// see [`crate::evaluator::resolve_env`]).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct Environment {
    /// `0 = WORKING_HOURS`, `1 = OFF_HOURS` by convention; other values
    /// carry no predefined meaning but are accepted.
    pub time_window: u8,
    pub emergency_mode: bool,
    /// Recommended range 0-100; not enforced by the engine.
    pub system_load: U256,
}

impl Environment {
    pub fn new(time_window: u8, emergency_mode: bool, system_load: U256) -> Self {
        Self {
            time_window,
            emergency_mode,
            system_load,
        }
    }
}
