//! Interface name-policy string tables.
//!
//! Policies are pure enum↔string mappings consumed by rule parsing and
//! diagnostics elsewhere in the naming subsystem. Two tables exist: the full
//! set, and the alternative-names subset, which drops the policies that only
//! make sense for a device's primary name.

use std::fmt;

/// Strategy by which an interface name is assigned.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum NamePolicy {
    /// Keep the name the kernel assigned.
    Kernel,
    /// Keep whatever name the device already carries.
    Keep,
    /// Use a name from the hardware database.
    Database,
    /// Name by onboard index.
    Onboard,
    /// Name by hotplug slot.
    Slot,
    /// Name by bus path.
    Path,
    /// Name by MAC address.
    Mac,
}

/// Every policy, in table order.
pub const NAME_POLICIES: &[NamePolicy] = &[
    NamePolicy::Kernel,
    NamePolicy::Keep,
    NamePolicy::Database,
    NamePolicy::Onboard,
    NamePolicy::Slot,
    NamePolicy::Path,
    NamePolicy::Mac,
];

/// Policies eligible for alternative interface names.
///
/// `kernel` and `keep` describe what happens to the primary name rather
/// than how a name is derived, so they are excluded here.
pub const ALTERNATIVE_NAME_POLICIES: &[NamePolicy] = &[
    NamePolicy::Database,
    NamePolicy::Onboard,
    NamePolicy::Slot,
    NamePolicy::Path,
    NamePolicy::Mac,
];

impl NamePolicy {
    /// Returns the table name of this policy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kernel => "kernel",
            Self::Keep => "keep",
            Self::Database => "database",
            Self::Onboard => "onboard",
            Self::Slot => "slot",
            Self::Path => "path",
            Self::Mac => "mac",
        }
    }

    /// Looks up a policy by its exact table name.
    ///
    /// ```
    /// use netname::NamePolicy;
    ///
    /// assert_eq!(NamePolicy::from_name("slot"), Some(NamePolicy::Slot));
    /// assert_eq!(NamePolicy::from_name("Slot"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        NAME_POLICIES
            .iter()
            .copied()
            .find(|policy| policy.as_str() == name)
    }

    /// Returns this policy's name within the alternative-names subset, when
    /// it belongs to that subset.
    #[must_use]
    pub fn alternative_name(self) -> Option<&'static str> {
        ALTERNATIVE_NAME_POLICIES
            .contains(&self)
            .then(|| self.as_str())
    }

    /// Looks up a policy by name within the alternative-names subset.
    #[must_use]
    pub fn from_alternative_name(name: &str) -> Option<Self> {
        ALTERNATIVE_NAME_POLICIES
            .iter()
            .copied()
            .find(|policy| policy.as_str() == name)
    }
}

impl fmt::Display for NamePolicy {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
