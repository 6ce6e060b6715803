//! Interest construction from config defaults.

use ndnkit_core::Interest;

use crate::config::InterestDefaults;

/// Build an Interest for `name_uri` with the configured selectors applied.
pub fn build_interest(defaults: &InterestDefaults, name_uri: &str) -> Interest {
    let mut interest = Interest::new(name_uri);
    interest
        .set_min_suffix_components(defaults.min_suffix_components)
        .set_max_suffix_components(defaults.max_suffix_components)
        .set_child_selector(defaults.child_selector)
        .set_must_be_fresh(defaults.must_be_fresh)
        .set_scope(defaults.scope)
        .set_interest_lifetime_milliseconds(defaults.lifetime_ms.map(|ms| ms as f64));
    interest
}
