//! Change counting and nonce invalidation.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use ndnkit_core::{Blob, ChangeCount, ChangeCounter, Exclude, Interest, KeyLocator, Name};

#[test]
fn change_counter_poll_is_consuming() {
    let mut tracked = ChangeCounter::new(Name::from_uri("/a"));
    assert!(!tracked.check_changed());

    tracked.get_mut().append("b");
    assert!(tracked.check_changed());
    assert!(!tracked.check_changed(), "second poll must not report the same change");
}

#[test]
fn change_counter_set_is_seen_unless_value_is_a_clone() {
    let mut tracked = ChangeCounter::new(Name::from_uri("/a"));

    let same = tracked.get().clone();
    tracked.set(same);
    assert!(!tracked.check_changed());

    // Separately built values never share a stamp, even when they were
    // built the same way.
    tracked.set(Name::from_uri("/a"));
    assert!(tracked.check_changed());

    tracked.set(Name::from_uri("/x/y"));
    assert!(tracked.check_changed());
    assert_eq!(tracked.get().to_uri(), "/x/y");
}

#[test]
fn fresh_values_get_distinct_stamps() {
    assert_ne!(Name::new().change_count(), Name::new().change_count());
    assert_ne!(
        Name::from_uri("/a").change_count(),
        Name::from_uri("/b").change_count()
    );
    assert_ne!(Exclude::new().change_count(), Exclude::default().change_count());
    assert_ne!(KeyLocator::new().change_count(), KeyLocator::default().change_count());
}

#[test]
fn change_count_is_idempotent_without_mutation() {
    let interest = Interest::new("/a/b");
    let first = interest.get_change_count();
    assert_eq!(interest.get_change_count(), first);
    assert_eq!(interest.get_change_count(), first);
}

#[test]
fn every_setter_bumps_change_count() {
    let mut interest = Interest::new("/a");
    let mut last = interest.get_change_count();

    let steps: Vec<Box<dyn Fn(&mut Interest)>> = vec![
        Box::new(|i: &mut Interest| {
            i.set_name("/b");
        }),
        Box::new(|i: &mut Interest| {
            i.set_min_suffix_components(Some(1));
        }),
        Box::new(|i: &mut Interest| {
            i.set_max_suffix_components(Some(2));
        }),
        Box::new(|i: &mut Interest| {
            i.set_key_locator(KeyLocator::with_key_name("/key"));
        }),
        Box::new(|i: &mut Interest| {
            i.set_exclude(Exclude::new());
        }),
        Box::new(|i: &mut Interest| {
            i.set_child_selector(Some(1));
        }),
        Box::new(|i: &mut Interest| {
            i.set_must_be_fresh(false);
        }),
        Box::new(|i: &mut Interest| {
            i.set_scope(None);
        }),
        Box::new(|i: &mut Interest| {
            i.set_interest_lifetime_milliseconds(Some(1000.0));
        }),
        Box::new(|i: &mut Interest| {
            i.set_nonce(vec![1, 2, 3, 4]);
        }),
    ];

    for step in steps {
        step(&mut interest);
        let now = interest.get_change_count();
        assert!(now > last, "setter did not bump change count");
        last = now;
    }
}

#[test]
fn direct_name_mutation_is_detected_exactly_once() {
    let mut interest = Interest::new("/a");
    let before = interest.get_change_count();

    interest.name_mut().append("b");
    assert_eq!(interest.get_change_count(), before + 1);
    assert_eq!(interest.get_change_count(), before + 1);
    assert_eq!(interest.name().to_uri(), "/a/b");
}

#[test]
fn several_sub_object_changes_count_once_and_all_snapshots_refresh() {
    let mut interest = Interest::new("/a");
    let before = interest.get_change_count();

    interest.name_mut().append("b");
    interest.key_locator_mut().set_key_data(vec![9]);
    interest.exclude_mut().append_any();

    assert_eq!(interest.get_change_count(), before + 1);
    // Had any wrapper been skipped, this poll would bump again.
    assert_eq!(interest.get_change_count(), before + 1);
}

#[test]
fn nested_key_name_mutation_propagates() {
    let mut interest = Interest::new("/a");
    interest.set_key_locator(KeyLocator::with_key_name("/owner/KEY"));
    let before = interest.get_change_count();

    interest.key_locator_mut().key_name_mut().append("v1");
    assert_eq!(interest.get_change_count(), before + 1);
    assert_eq!(interest.key_locator().key_name().to_uri(), "/owner/KEY/v1");
}

#[test]
fn key_locator_set_key_name_counts_once() {
    let mut locator = KeyLocator::new();
    let c0 = locator.change_count();

    locator.set_key_name("/owner/KEY");
    let c1 = locator.change_count();
    assert!(c1 > c0);
    // The nested replacement was already counted by the setter.
    assert_eq!(locator.change_count(), c1);

    locator.clear();
    let c2 = locator.change_count();
    assert!(c2 > c1);
    assert_eq!(locator.change_count(), c2);
    assert!(locator.key_name().is_empty());
}

#[test]
fn key_locator_counts_its_own_setters() {
    let mut locator = KeyLocator::new();
    let c0 = locator.change_count();
    locator.set_key_data(vec![1]);
    let c1 = locator.change_count();
    assert!(c1 > c0);
    assert_eq!(locator.change_count(), c1);
}

#[test]
fn nonce_survives_until_next_change() {
    let mut interest = Interest::new("/a/b");
    interest.set_nonce(vec![1, 2, 3, 4]);
    assert_eq!(interest.get_nonce(), Blob::from(vec![1, 2, 3, 4]));
    assert_eq!(interest.get_nonce(), Blob::from(vec![1, 2, 3, 4]));
}

#[test]
fn nonce_cleared_by_setter() {
    let mut interest = Interest::new("/a/b");
    interest.set_nonce(vec![1, 2, 3, 4]);
    interest.set_must_be_fresh(true);
    assert!(interest.get_nonce().is_empty());
}

#[test]
fn nonce_cleared_by_direct_sub_object_mutation() {
    let mut interest = Interest::new("/a/b");
    interest.set_nonce(vec![1, 2, 3, 4]);
    interest.exclude_mut().append_component("x");
    assert!(interest.get_nonce().is_empty());
}

#[test]
fn nonce_stays_cleared_after_invalidation() {
    let mut interest = Interest::new("/a");
    interest.set_nonce(vec![5, 6, 7, 8]);
    interest.set_scope(Some(1));
    assert!(interest.get_nonce().is_empty());
    // Observation point was refreshed; the old value must not come back.
    assert!(interest.get_nonce().is_empty());
}

#[test]
fn set_nonce_absorbs_pending_sub_object_change() {
    let mut interest = Interest::new("/a");
    interest.name_mut().append("b");
    interest.set_nonce(vec![1, 1, 1, 1]);
    assert_eq!(interest.get_nonce().buf(), &[1, 1, 1, 1]);
}

#[test]
fn clone_carries_valid_nonce() {
    let mut interest = Interest::new("/a");
    interest.set_nonce(vec![4, 3, 2, 1]);
    let copy = interest.clone();
    assert_eq!(copy.get_nonce().buf(), &[4, 3, 2, 1]);
    assert!(copy.same_content(&interest));
}

#[test]
fn assigning_a_new_name_clears_nonce() {
    let mut interest = Interest::new("/a");
    interest.set_nonce(vec![1, 2, 3, 4]);
    let before = interest.get_change_count();

    // Built the same way as the Interest's own name, on a different URI.
    *interest.name_mut() = Name::from_uri("/b");

    assert_eq!(interest.get_change_count(), before + 1);
    assert!(interest.get_nonce().is_empty());
    assert_eq!(interest.to_uri(), "/b");
}

#[test]
fn assigning_a_new_exclude_clears_nonce() {
    let mut interest = Interest::new("/a");
    interest.set_nonce(vec![1, 2, 3, 4]);

    let mut exclude = Exclude::new();
    exclude.append_any();
    *interest.exclude_mut() = exclude;

    assert!(interest.get_nonce().is_empty());
    assert_eq!(interest.exclude().size(), 1);
}

#[test]
fn assigning_a_new_key_locator_clears_nonce() {
    let mut interest = Interest::new("/a");
    interest.set_nonce(vec![1, 2, 3, 4]);

    *interest.key_locator_mut() = KeyLocator::with_digest(vec![7, 7]);

    assert!(interest.get_nonce().is_empty());
    assert_eq!(interest.key_locator().key_data().buf(), &[7, 7]);
}

#[test]
fn assigning_a_nested_key_name_clears_nonce() {
    let mut interest = Interest::new("/a");
    interest.set_key_locator(KeyLocator::with_key_name("/k"));
    interest.set_nonce(vec![1, 2, 3, 4]);

    *interest.key_locator_mut().key_name_mut() = Name::from_uri("/j");

    assert!(interest.get_nonce().is_empty());
    assert_eq!(interest.key_locator().key_name().to_uri(), "/j");
}

#[test]
fn swapping_names_between_interests_clears_both_nonces() {
    let mut first = Interest::new("/a");
    let mut second = Interest::new("/b");
    first.set_nonce(vec![1, 1, 1, 1]);
    second.set_nonce(vec![2, 2, 2, 2]);

    std::mem::swap(first.name_mut(), second.name_mut());

    assert!(first.get_nonce().is_empty());
    assert!(second.get_nonce().is_empty());
    assert_eq!(first.name().to_uri(), "/b");
    assert_eq!(second.name().to_uri(), "/a");
}

#[test]
fn swapping_in_a_standalone_value_clears_nonce() {
    let mut interest = Interest::new("/a");
    interest.set_nonce(vec![1, 2, 3, 4]);

    let mut other = Exclude::new();
    other.append_component("x");
    std::mem::swap(interest.exclude_mut(), &mut other);
    assert!(interest.get_nonce().is_empty());

    interest.set_nonce(vec![5, 6, 7, 8]);
    let mut replacement = KeyLocator::with_key_name("/k");
    std::mem::swap(interest.key_locator_mut(), &mut replacement);
    assert!(interest.get_nonce().is_empty());
}

#[test]
fn restoring_an_unpolled_clone_keeps_nonce() {
    let mut interest = Interest::new("/a");
    interest.set_nonce(vec![1, 2, 3, 4]);

    // Content ends up identical to what the nonce was set for.
    let saved = interest.name().clone();
    interest.name_mut().append("tmp");
    *interest.name_mut() = saved;

    assert_eq!(interest.get_nonce().buf(), &[1, 2, 3, 4]);
}
