use super::*;

#[test]
fn large_threshold_is_inclusive() {
    assert_eq!(select_layout(250, 180), LayoutVariant::Large);
    assert_eq!(select_layout(400, 400), LayoutVariant::Large);
}

#[test]
fn just_below_large_falls_to_medium() {
    assert_eq!(select_layout(249, 180), LayoutVariant::Medium);
    assert_eq!(select_layout(250, 179), LayoutVariant::Medium);
}

#[test]
fn medium_threshold_is_inclusive() {
    assert_eq!(select_layout(180, 110), LayoutVariant::Medium);
    assert_eq!(select_layout(179, 110), LayoutVariant::Small);
    assert_eq!(select_layout(180, 109), LayoutVariant::Small);
}

#[test]
fn wide_but_short_widgets_are_small() {
    assert_eq!(select_layout(1000, 40), LayoutVariant::Small);
    assert_eq!(select_layout(40, 1000), LayoutVariant::Small);
}

#[test]
fn non_positive_sizes_are_small() {
    assert_eq!(select_layout(0, 0), LayoutVariant::Small);
    assert_eq!(select_layout(-300, -300), LayoutVariant::Small);
}

#[test]
fn policy_table_matches_layouts() {
    assert_eq!(LayoutVariant::Small.policy().list, None);
    assert!(!LayoutVariant::Small.policy().placeholder);

    let medium = LayoutVariant::Medium.policy();
    assert_eq!(medium.list.and_then(|l| l.visible_cap), Some(MEDIUM_VISIBLE_ROWS));
    assert!(!medium.placeholder);

    let large = LayoutVariant::Large.policy();
    assert_eq!(large.list.and_then(|l| l.visible_cap), None);
    assert!(large.placeholder);
}

#[test]
fn hidden_count_only_past_the_cap() {
    let list = LayoutVariant::Medium.policy().list.unwrap();
    assert_eq!(list.hidden_count(0), None);
    assert_eq!(list.hidden_count(3), None);
    assert_eq!(list.hidden_count(4), Some(1));
    assert_eq!(list.hidden_count(5), Some(2));

    let large = LayoutVariant::Large.policy().list.unwrap();
    assert_eq!(large.hidden_count(50), None);
}
