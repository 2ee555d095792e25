//! Contract with the device property store.
//!
//! The naming core never owns a device; it reads udev-style properties and
//! sysfs attributes through [`DeviceProperties`] and leaves storage,
//! enumeration, and caching to the host. The one demand the core places on
//! the accessor's error surface is that absence stays distinguishable from
//! real failures, which [`PropertyError::NotFound`] encodes.

use std::io;

use thiserror::Error;

/// Errors surfaced by the device property accessor.
#[derive(Debug, Error)]
pub enum PropertyError {
    /// The requested property or attribute does not exist on the device.
    #[error("property `{key}` not found")]
    NotFound {
        /// Key that was looked up.
        key: String,
    },

    /// The property exists but its value cannot be read as the requested type.
    #[error("property `{key}` has invalid value `{value}`")]
    InvalidValue {
        /// Key that was looked up.
        key: String,
        /// Raw value as stored on the device.
        value: String,
    },

    /// The underlying read failed.
    #[error("failed to read property `{key}`")]
    Read {
        /// Key that was looked up.
        key: String,
        /// The underlying error.
        #[source]
        source: io::Error,
    },
}

impl PropertyError {
    /// Builds the absence error for `key`.
    #[must_use]
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// Whether this error represents absence rather than a failure.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Typed read access to a device's udev properties and sysfs attributes.
///
/// Every method reports a missing key as [`PropertyError::NotFound`]; other
/// variants signal genuine failures and are propagated verbatim by the
/// filtering layer.
#[cfg_attr(test, mockall::automock)]
pub trait DeviceProperties {
    /// Reads a udev property as a boolean.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::NotFound`] when the property is absent and
    /// [`PropertyError::InvalidValue`] when it cannot be parsed as a boolean.
    fn property_bool(&self, key: &str) -> Result<bool, PropertyError>;

    /// Reads a sysfs attribute as a signed integer.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::NotFound`] when the attribute is absent and
    /// [`PropertyError::InvalidValue`] when it does not parse.
    fn sysattr_int(&self, sysattr: &str) -> Result<i64, PropertyError>;

    /// Reads a sysfs attribute as an unsigned integer.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::NotFound`] when the attribute is absent and
    /// [`PropertyError::InvalidValue`] when it does not parse.
    fn sysattr_unsigned(&self, sysattr: &str) -> Result<u64, PropertyError>;

    /// Reads a sysfs attribute as a boolean.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::NotFound`] when the attribute is absent and
    /// [`PropertyError::InvalidValue`] when it does not parse.
    fn sysattr_bool(&self, sysattr: &str) -> Result<bool, PropertyError>;

    /// Reads a sysfs attribute's raw string value.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::NotFound`] when the attribute is absent.
    fn sysattr_value(&self, sysattr: &str) -> Result<String, PropertyError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn not_found_is_distinguishable() {
        let absent = PropertyError::not_found("ID_NET_NAME_ALLOW");
        assert!(absent.is_not_found());

        let failure = PropertyError::Read {
            key: "speed".to_owned(),
            source: io::Error::other("sysfs read failed"),
        };
        assert!(!failure.is_not_found());
    }

    #[rstest]
    fn messages_name_the_key() {
        let error = PropertyError::InvalidValue {
            key: "ID_NET_NAME_ALLOW_SPEED".to_owned(),
            value: "maybe".to_owned(),
        };
        let message = error.to_string();
        assert!(message.contains("ID_NET_NAME_ALLOW_SPEED"));
        assert!(message.contains("maybe"));
    }

    #[rstest]
    fn read_preserves_the_source_error() {
        let error = PropertyError::Read {
            key: "speed".to_owned(),
            source: io::Error::other("device vanished"),
        };
        assert!(std::error::Error::source(&error).is_some());
    }
}
