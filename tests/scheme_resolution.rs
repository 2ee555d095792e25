//! Integration coverage for naming-scheme resolution precedence and caching.

use netname::{
    BootParams, DEFAULT_NAMING_SCHEME, Environment, NAMING_SCHEME_CMDLINE_KEY,
    NAMING_SCHEME_ENV_VAR, ProcessEnvironment, find_scheme, naming_scheme, resolve_with, schemes,
};
use rstest::rstest;

struct FixedBoot(Option<&'static str>);

impl BootParams for FixedBoot {
    fn get_key(&self, key: &str) -> Option<String> {
        assert_eq!(key, NAMING_SCHEME_CMDLINE_KEY);
        self.0.map(str::to_owned)
    }
}

struct FixedEnvironment(Option<&'static str>);

impl Environment for FixedEnvironment {
    fn get(&self, name: &str) -> Option<String> {
        assert_eq!(name, NAMING_SCHEME_ENV_VAR);
        self.0.map(str::to_owned)
    }
}

#[rstest]
#[case(Some("v243"), None, "v243")]
#[case(Some("v243"), Some("v249"), "v249")]
#[case(Some("v243"), Some(":v249"), "v243")]
#[case(None, Some(":v249"), "v249")]
#[case(Some("bogus"), None, DEFAULT_NAMING_SCHEME)]
#[case(None, None, DEFAULT_NAMING_SCHEME)]
fn boot_and_environment_precedence(
    #[case] boot: Option<&'static str>,
    #[case] environment: Option<&'static str>,
    #[case] expected: &str,
) {
    let resolved = resolve_with(&FixedBoot(boot), &FixedEnvironment(environment));
    assert_eq!(resolved.name(), expected);
}

#[rstest]
fn environment_variable_reaches_resolution_through_the_process_seam() {
    let resolved = temp_env::with_var(NAMING_SCHEME_ENV_VAR, Some("v247"), || {
        resolve_with(&FixedBoot(None), &ProcessEnvironment)
    });
    assert_eq!(resolved.name(), "v247");
}

#[rstest]
fn deferring_environment_value_lets_the_boot_parameter_win() {
    let resolved = temp_env::with_var(NAMING_SCHEME_ENV_VAR, Some(":v247"), || {
        resolve_with(&FixedBoot(Some("v245")), &ProcessEnvironment)
    });
    assert_eq!(resolved.name(), "v245");
}

#[rstest]
fn latest_points_at_the_newest_registry_entry() {
    let latest = find_scheme("latest").expect("a non-empty registry backs `latest`");
    let newest = schemes().last().expect("the registry is not empty");
    assert_eq!(latest.name(), newest.name());
}

#[rstest]
fn process_wide_resolution_is_memoised() {
    let first = naming_scheme();
    // A configuration change after the first resolution must not be observed.
    let second = temp_env::with_var(NAMING_SCHEME_ENV_VAR, Some("v238"), naming_scheme);
    assert!(std::ptr::eq(first, second));
}
