//! Policy core for network interface naming.
//!
//! The crate answers two questions for the rest of a naming subsystem: which
//! versioned naming scheme governs this process, and whether a given device
//! attribute may be consulted at all. The scheme is resolved once per process
//! from the boot command line and the environment ([`naming_scheme`]); the
//! visibility filter is recomputed per attribute access
//! ([`sysattr::allowed`] and the filtered accessors).
//!
//! Device properties, the boot command line, and the environment are reached
//! only through the narrow traits in [`device`] and [`cmdline`], so hosts can
//! substitute their own property store.

pub mod cmdline;
pub mod device;
pub mod policy;
pub mod scheme;
pub mod sysattr;
pub mod testing;

pub use cmdline::{BootParams, Environment, ProcCmdline, ProcessEnvironment};
pub use device::{DeviceProperties, PropertyError};
pub use policy::{ALTERNATIVE_NAME_POLICIES, NAME_POLICIES, NamePolicy};
pub use scheme::{
    DEFAULT_NAMING_SCHEME, NAMING_SCHEME_CMDLINE_KEY, NAMING_SCHEME_ENV_VAR, NamingScheme,
    SchemeFlags, SchemeSource, find_scheme, naming_scheme, resolve_with, schemes,
};
pub use sysattr::{
    allowed, allowed_by_default, sysattr_bool_filtered, sysattr_int_filtered,
    sysattr_unsigned_filtered, sysattr_value_filtered,
};
