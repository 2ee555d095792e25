//! Versioned naming-scheme registry and process-wide resolution.
//!
//! Interface naming behaviour is versioned: every release that changed how
//! names are derived gets a scheme entry pairing its version tag with the
//! behaviours it enables. [`resolve_with`] picks the governing scheme from
//! the boot command line and the environment, falling back to the compiled
//! default; [`naming_scheme`] memoises that decision for the process
//! lifetime so every caller converges on one entry.

use std::fmt;

use bitflags::bitflags;
use log::{info, warn};
use once_cell::sync::OnceCell;

use crate::cmdline::{BootParams, Environment, ProcCmdline, ProcessEnvironment};

/// Boot command-line parameter consulted during resolution.
pub const NAMING_SCHEME_CMDLINE_KEY: &str = "net.naming-scheme";

/// Environment variable consulted during resolution.
///
/// A value prefixed with `:` defers to the boot command line when the boot
/// parameter is set, which lets an early boot stage hand the decision to a
/// later one instead of overriding it.
pub const NAMING_SCHEME_ENV_VAR: &str = "NET_NAMING_SCHEME";

/// Compiled-in default scheme name. Guaranteed to exist in the registry.
pub const DEFAULT_NAMING_SCHEME: &str = "v252";

const LOG_TARGET: &str = "netname::scheme";

bitflags! {
    /// Individual naming behaviours a scheme version may enable.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct SchemeFlags: u32 {
        /// Use the `v` suffix for SR-IOV virtual functions.
        const SRIOV_V = 1 << 0;
        /// Derive NPAR partition slots from ARI information.
        const NPAR_ARI = 1 << 1;
        /// Name InfiniBand interfaces.
        const INFINIBAND = 1 << 2;
        /// Treat an ACPI index of zero as valid onboard information.
        const ZERO_ACPI_INDEX = 1 << 3;
        /// Allow devices to be renamed more than once.
        const ALLOW_RERENAMES = 1 << 4;
        /// Generate stable MAC addresses for virtual machine interfaces.
        const STABLE_VIRTUAL_MACS = 1 << 5;
        /// Name netdevsim devices.
        const NETDEVSIM = 1 << 6;
        /// Accept interface labels that carry no port prefix.
        const LABEL_NOPREFIX = 1 << 7;
        /// Use the long hash for nspawn interface names.
        const NSPAWN_LONG_HASH = 1 << 8;
        /// Ignore slot numbers reported for bridge devices.
        const BRIDGE_NO_SLOT = 1 << 9;
        /// Derive slot numbers from the PCI function identifier.
        const SLOT_FUNCTION_ID = 1 << 10;
        /// Accept 16-bit interface indexes.
        const SIXTEEN_BIT_INDEX = 1 << 11;
        /// Substitute unsafe characters strictly when building names.
        const REPLACE_STRICTLY = 1 << 12;
        /// Name Xen virtual interfaces.
        const XEN_VIF = 1 << 13;
        /// Consider multifunction slots when naming bridged devices.
        const BRIDGE_MULTIFUNCTION_SLOT = 1 << 14;
        /// Use devicetree alias names.
        const DEVICETREE_ALIASES = 1 << 15;

        /// Behaviour set of the `v238` scheme.
        const V238 = 0;
        /// Behaviour set of the `v239` scheme.
        const V239 = Self::V238.bits() | Self::SRIOV_V.bits() | Self::NPAR_ARI.bits();
        /// Behaviour set of the `v240` scheme.
        const V240 = Self::V239.bits()
            | Self::INFINIBAND.bits()
            | Self::ZERO_ACPI_INDEX.bits()
            | Self::ALLOW_RERENAMES.bits();
        /// Behaviour set of the `v241` scheme.
        const V241 = Self::V240.bits() | Self::STABLE_VIRTUAL_MACS.bits();
        /// Behaviour set of the `v243` scheme.
        const V243 = Self::V241.bits() | Self::NETDEVSIM.bits() | Self::LABEL_NOPREFIX.bits();
        /// Behaviour set of the `v245` scheme.
        const V245 = Self::V243.bits() | Self::NSPAWN_LONG_HASH.bits();
        /// Behaviour set of the `v247` scheme.
        const V247 = Self::V245.bits() | Self::BRIDGE_NO_SLOT.bits();
        /// Behaviour set of the `v249` scheme.
        const V249 = Self::V247.bits()
            | Self::SLOT_FUNCTION_ID.bits()
            | Self::SIXTEEN_BIT_INDEX.bits()
            | Self::REPLACE_STRICTLY.bits();
        /// Behaviour set of the `v250` scheme.
        const V250 = Self::V249.bits() | Self::XEN_VIF.bits();
        /// Behaviour set of the `v251` scheme.
        const V251 = Self::V250.bits() | Self::BRIDGE_MULTIFUNCTION_SLOT.bits();
        /// Behaviour set of the `v252` scheme.
        const V252 = Self::V251.bits() | Self::DEVICETREE_ALIASES.bits();

        /// Behaviour set of the `rhel-8.x` schemes up to 8.3.
        const RHEL_8_0 = Self::V239.bits();
        /// Behaviour set of the `rhel-8.x` schemes from 8.4 on.
        const RHEL_8_4 = Self::V239.bits() | Self::BRIDGE_NO_SLOT.bits();
        /// Behaviour set of the `rhel-9.x` schemes.
        const RHEL_9_0 = Self::V250.bits();
    }
}

/// A versioned naming scheme: an identifier plus the behaviours it enables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NamingScheme {
    name: &'static str,
    flags: SchemeFlags,
}

impl NamingScheme {
    /// Returns the scheme identifier.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the behaviour set enabled by this scheme.
    #[must_use]
    pub const fn flags(&self) -> SchemeFlags {
        self.flags
    }

    /// Whether this scheme enables every behaviour in `flags`.
    #[must_use]
    pub const fn has(&self, flags: SchemeFlags) -> bool {
        self.flags.contains(flags)
    }
}

impl fmt::Display for NamingScheme {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name)
    }
}

/// Ordered registry of known schemes. Order matters: the final entry backs
/// the `latest` alias.
static SCHEMES: &[NamingScheme] = &[
    NamingScheme { name: "v238", flags: SchemeFlags::V238 },
    NamingScheme { name: "v239", flags: SchemeFlags::V239 },
    NamingScheme { name: "v240", flags: SchemeFlags::V240 },
    NamingScheme { name: "v241", flags: SchemeFlags::V241 },
    NamingScheme { name: "v243", flags: SchemeFlags::V243 },
    NamingScheme { name: "v245", flags: SchemeFlags::V245 },
    NamingScheme { name: "v247", flags: SchemeFlags::V247 },
    NamingScheme { name: "v249", flags: SchemeFlags::V249 },
    NamingScheme { name: "v250", flags: SchemeFlags::V250 },
    NamingScheme { name: "v251", flags: SchemeFlags::V251 },
    NamingScheme { name: "v252", flags: SchemeFlags::V252 },
    NamingScheme { name: "rhel-8.0", flags: SchemeFlags::RHEL_8_0 },
    NamingScheme { name: "rhel-8.1", flags: SchemeFlags::RHEL_8_0 },
    NamingScheme { name: "rhel-8.2", flags: SchemeFlags::RHEL_8_0 },
    NamingScheme { name: "rhel-8.3", flags: SchemeFlags::RHEL_8_0 },
    NamingScheme { name: "rhel-8.4", flags: SchemeFlags::RHEL_8_4 },
    NamingScheme { name: "rhel-8.5", flags: SchemeFlags::RHEL_8_4 },
    NamingScheme { name: "rhel-8.6", flags: SchemeFlags::RHEL_8_4 },
    NamingScheme { name: "rhel-8.7", flags: SchemeFlags::RHEL_8_4 },
    NamingScheme { name: "rhel-8.8", flags: SchemeFlags::RHEL_8_4 },
    NamingScheme { name: "rhel-8.9", flags: SchemeFlags::RHEL_8_4 },
    NamingScheme { name: "rhel-8.10", flags: SchemeFlags::RHEL_8_4 },
    NamingScheme { name: "rhel-9.0", flags: SchemeFlags::RHEL_9_0 },
    NamingScheme { name: "rhel-9.1", flags: SchemeFlags::RHEL_9_0 },
    NamingScheme { name: "rhel-9.2", flags: SchemeFlags::RHEL_9_0 },
];

/// Returns the full scheme registry in table order.
#[must_use]
pub fn schemes() -> &'static [NamingScheme] {
    SCHEMES
}

/// Looks up a scheme by exact name.
///
/// `latest` may be defined explicitly in the registry, in which case the
/// table scan finds it like any other name. Only when no entry carries the
/// name does `latest` fall back to the final table entry, so the two-step
/// order here is load-bearing.
///
/// ```
/// use netname::find_scheme;
///
/// let scheme = find_scheme("v249").expect("v249 is registered");
/// assert_eq!(scheme.name(), "v249");
/// assert!(find_scheme("v9999").is_none());
/// ```
#[must_use]
pub fn find_scheme(name: &str) -> Option<&'static NamingScheme> {
    if let Some(scheme) = SCHEMES.iter().find(|scheme| scheme.name == name) {
        return Some(scheme);
    }

    if name == "latest" {
        return SCHEMES.last();
    }

    None
}

/// Source a scheme candidate was drawn from during resolution.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SchemeSource {
    /// The `net.naming-scheme` boot command-line parameter.
    BootCommandLine,
    /// The `NET_NAMING_SCHEME` environment variable.
    EnvironmentVariable,
    /// The compiled-in default.
    Default,
}

impl fmt::Display for SchemeSource {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BootCommandLine => formatter.write_str("the kernel command line"),
            Self::EnvironmentVariable => formatter.write_str(NAMING_SCHEME_ENV_VAR),
            Self::Default => formatter.write_str("the compiled-in default"),
        }
    }
}

/// Discards empty candidates so an unset and an empty source read the same.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|candidate| !candidate.is_empty())
}

/// Applies the boot-vs-environment precedence rules to the raw source values.
fn select_candidate(
    boot: Option<String>,
    environment: Option<String>,
) -> Option<(String, SchemeSource)> {
    let boot = non_empty(boot);

    match environment {
        Some(value) => match value.strip_prefix(':') {
            // With a `:` prefix the environment only supplies a fallback;
            // a boot parameter, when set, wins.
            Some(rest) => boot
                .map(|parameter| (parameter, SchemeSource::BootCommandLine))
                .or_else(|| {
                    non_empty(Some(rest.to_owned()))
                        .map(|fallback| (fallback, SchemeSource::EnvironmentVariable))
                }),
            None => non_empty(Some(value))
                .map(|override_value| (override_value, SchemeSource::EnvironmentVariable)),
        },
        None => boot.map(|parameter| (parameter, SchemeSource::BootCommandLine)),
    }
}

/// Resolves the governing naming scheme from explicit collaborators.
///
/// This is the un-memoised resolution path; [`naming_scheme`] wraps it with
/// the process-wide cache. An unknown requested scheme degrades to the
/// compiled default with a warning rather than failing.
///
/// # Panics
///
/// Panics when [`DEFAULT_NAMING_SCHEME`] is missing from the registry. That
/// is a defect in the registry table itself, not a runtime condition, and
/// there is no safe fallback below the default tier.
#[must_use]
pub fn resolve_with(
    boot: &dyn BootParams,
    environment: &dyn Environment,
) -> &'static NamingScheme {
    let requested = select_candidate(
        boot.get_key(NAMING_SCHEME_CMDLINE_KEY),
        environment.get(NAMING_SCHEME_ENV_VAR),
    );

    if let Some((name, source)) = requested {
        if let Some(scheme) = find_scheme(&name) {
            info!(
                target: LOG_TARGET,
                "using interface naming scheme `{scheme}` from {source}",
            );
            return scheme;
        }

        warn!(
            target: LOG_TARGET,
            "unknown interface naming scheme `{name}` requested via {source}, ignoring",
        );
    }

    let scheme = find_scheme(DEFAULT_NAMING_SCHEME).unwrap_or_else(|| {
        panic!("default naming scheme `{DEFAULT_NAMING_SCHEME}` is missing from the registry")
    });
    info!(
        target: LOG_TARGET,
        "using default interface naming scheme `{scheme}`",
    );
    scheme
}

/// Resolves the naming scheme governing this process, at most once.
///
/// The first call reads the boot command line and the process environment
/// and commits the outcome; every later call returns the committed entry
/// without re-reading either source, so concurrent callers converge on one
/// value for the process lifetime.
#[must_use]
pub fn naming_scheme() -> &'static NamingScheme {
    static RESOLVED: OnceCell<&'static NamingScheme> = OnceCell::new();

    *RESOLVED.get_or_init(|| resolve_with(&ProcCmdline::new(), &ProcessEnvironment))
}
