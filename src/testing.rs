//! Test doubles for the device property store.
//!
//! [`StubDevice`] backs the crate's own suites and gives embedders a canned
//! device for exercising the visibility filter without a real udev database.

use std::collections::HashMap;

use crate::device::{DeviceProperties, PropertyError};

/// In-memory device exposing canned udev properties and sysfs attributes.
#[derive(Clone, Debug, Default)]
pub struct StubDevice {
    properties: HashMap<String, String>,
    sysattrs: HashMap<String, String>,
}

impl StubDevice {
    /// Creates a device with no properties and no attributes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a udev property.
    #[must_use]
    pub fn with_property(mut self, key: &str, value: &str) -> Self {
        self.properties.insert(key.to_owned(), value.to_owned());
        self
    }

    /// Sets a sysfs attribute value.
    #[must_use]
    pub fn with_sysattr(mut self, sysattr: &str, value: &str) -> Self {
        self.sysattrs.insert(sysattr.to_owned(), value.to_owned());
        self
    }

    fn sysattr(&self, sysattr: &str) -> Result<&str, PropertyError> {
        self.sysattrs
            .get(sysattr)
            .map(String::as_str)
            .ok_or_else(|| PropertyError::not_found(sysattr))
    }
}

/// Parses the boolean spellings udev accepts for property values.
fn parse_bool(key: &str, value: &str) -> Result<bool, PropertyError> {
    match value {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(PropertyError::InvalidValue {
            key: key.to_owned(),
            value: other.to_owned(),
        }),
    }
}

impl DeviceProperties for StubDevice {
    fn property_bool(&self, key: &str) -> Result<bool, PropertyError> {
        let value = self
            .properties
            .get(key)
            .ok_or_else(|| PropertyError::not_found(key))?;
        parse_bool(key, value)
    }

    fn sysattr_int(&self, sysattr: &str) -> Result<i64, PropertyError> {
        let value = self.sysattr(sysattr)?;
        value
            .trim()
            .parse()
            .map_err(|_| PropertyError::InvalidValue {
                key: sysattr.to_owned(),
                value: value.to_owned(),
            })
    }

    fn sysattr_unsigned(&self, sysattr: &str) -> Result<u64, PropertyError> {
        let value = self.sysattr(sysattr)?;
        value
            .trim()
            .parse()
            .map_err(|_| PropertyError::InvalidValue {
                key: sysattr.to_owned(),
                value: value.to_owned(),
            })
    }

    fn sysattr_bool(&self, sysattr: &str) -> Result<bool, PropertyError> {
        let value = self.sysattr(sysattr)?;
        parse_bool(sysattr, value.trim())
    }

    fn sysattr_value(&self, sysattr: &str) -> Result<String, PropertyError> {
        self.sysattr(sysattr).map(str::to_owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn missing_entries_read_as_not_found() {
        let device = StubDevice::new();

        let error = device
            .property_bool("ID_NET_NAME_ALLOW")
            .expect_err("empty device has no properties");
        assert!(error.is_not_found());

        let error = device
            .sysattr_value("speed")
            .expect_err("empty device has no attributes");
        assert!(error.is_not_found());
    }

    #[rstest]
    #[case("yes", true)]
    #[case("on", true)]
    #[case("false", false)]
    #[case("0", false)]
    fn accepts_udev_boolean_spellings(#[case] value: &str, #[case] expected: bool) {
        let device = StubDevice::new().with_property("ID_NET_NAME_ALLOW", value);
        let parsed = device
            .property_bool("ID_NET_NAME_ALLOW")
            .unwrap_or_else(|error| panic!("`{value}` should parse: {error}"));
        assert_eq!(parsed, expected);
    }

    #[rstest]
    fn typed_reads_parse_stored_text() {
        let device = StubDevice::new()
            .with_sysattr("ifindex", "-3")
            .with_sysattr("mtu", "1500\n")
            .with_sysattr("carrier", "1");

        assert_eq!(
            device.sysattr_int("ifindex").expect("ifindex should parse"),
            -3
        );
        assert_eq!(device.sysattr_unsigned("mtu").expect("mtu should parse"), 1500);
        assert!(device.sysattr_bool("carrier").expect("carrier should parse"));
    }

    #[rstest]
    fn unparsable_values_surface_as_invalid() {
        let device = StubDevice::new().with_sysattr("mtu", "jumbo");

        let error = device
            .sysattr_unsigned("mtu")
            .expect_err("non-numeric text must not parse");
        assert!(matches!(error, PropertyError::InvalidValue { .. }));
    }
}
