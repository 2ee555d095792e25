//! Visibility filtering for device attributes.
//!
//! Administrators can hide attributes from the naming logic through udev
//! properties: `ID_NET_NAME_ALLOW` sets the device-wide default and
//! `ID_NET_NAME_ALLOW_<ATTR>` overrides it per attribute. A hidden attribute
//! reads as missing through the filtered accessors, so callers cannot probe
//! for the existence of attributes an administrator chose to conceal.

use crate::device::{DeviceProperties, PropertyError};

/// Property holding the device-wide visibility default.
pub const ALLOW_PROPERTY: &str = "ID_NET_NAME_ALLOW";

/// Prefix of the per-attribute override properties.
pub const ALLOW_PROPERTY_PREFIX: &str = "ID_NET_NAME_ALLOW_";

/// Whether attributes without a specific override may be read on `device`.
///
/// Absence of [`ALLOW_PROPERTY`] means allow.
///
/// # Errors
///
/// Propagates property-store failures other than absence.
pub fn allowed_by_default(device: &dyn DeviceProperties) -> Result<bool, PropertyError> {
    match device.property_bool(ALLOW_PROPERTY) {
        Err(error) if error.is_not_found() => Ok(true),
        outcome => outcome,
    }
}

/// Whether `sysattr` may be read on `device`.
///
/// A per-attribute override beats the device-wide default in either
/// direction; without one the decision defers to [`allowed_by_default`].
/// The decision is recomputed on every call, never cached.
///
/// # Errors
///
/// Propagates property-store failures other than absence.
pub fn allowed(device: &dyn DeviceProperties, sysattr: &str) -> Result<bool, PropertyError> {
    match device.property_bool(&allow_property_key(sysattr)) {
        Err(error) if error.is_not_found() => allowed_by_default(device),
        outcome => outcome,
    }
}

/// Builds the override key for an attribute: `speed` ⇒ `ID_NET_NAME_ALLOW_SPEED`.
fn allow_property_key(sysattr: &str) -> String {
    let mut key = String::with_capacity(ALLOW_PROPERTY_PREFIX.len() + sysattr.len());
    key.push_str(ALLOW_PROPERTY_PREFIX);
    key.extend(sysattr.chars().map(|character| character.to_ascii_uppercase()));
    key
}

/// Converts a deny decision into the same error an absent attribute yields.
fn ensure_visible(device: &dyn DeviceProperties, sysattr: &str) -> Result<(), PropertyError> {
    if allowed(device, sysattr)? {
        Ok(())
    } else {
        Err(PropertyError::not_found(sysattr))
    }
}

/// Reads `sysattr` as a signed integer, honouring visibility filtering.
///
/// # Errors
///
/// Returns [`PropertyError::NotFound`] when the attribute is hidden or
/// absent; other property-store errors propagate verbatim.
pub fn sysattr_int_filtered(
    device: &dyn DeviceProperties,
    sysattr: &str,
) -> Result<i64, PropertyError> {
    ensure_visible(device, sysattr)?;
    device.sysattr_int(sysattr)
}

/// Reads `sysattr` as an unsigned integer, honouring visibility filtering.
///
/// # Errors
///
/// Returns [`PropertyError::NotFound`] when the attribute is hidden or
/// absent; other property-store errors propagate verbatim.
pub fn sysattr_unsigned_filtered(
    device: &dyn DeviceProperties,
    sysattr: &str,
) -> Result<u64, PropertyError> {
    ensure_visible(device, sysattr)?;
    device.sysattr_unsigned(sysattr)
}

/// Reads `sysattr` as a boolean, honouring visibility filtering.
///
/// # Errors
///
/// Returns [`PropertyError::NotFound`] when the attribute is hidden or
/// absent; other property-store errors propagate verbatim.
pub fn sysattr_bool_filtered(
    device: &dyn DeviceProperties,
    sysattr: &str,
) -> Result<bool, PropertyError> {
    ensure_visible(device, sysattr)?;
    device.sysattr_bool(sysattr)
}

/// Reads `sysattr`'s raw string value, honouring visibility filtering.
///
/// # Errors
///
/// Returns [`PropertyError::NotFound`] when the attribute is hidden or
/// absent; other property-store errors propagate verbatim.
pub fn sysattr_value_filtered(
    device: &dyn DeviceProperties,
    sysattr: &str,
) -> Result<String, PropertyError> {
    ensure_visible(device, sysattr)?;
    device.sysattr_value(sysattr)
}
