use super::*;

fn snap(meal_type: &str, items: &[&str]) -> WidgetData {
    WidgetData::Populated(
        Snapshot::new(meal_type, "2024-03-15")
            .with_city("İstanbul")
            .with_items(items.iter().copied()),
    )
}

#[test]
fn empty_state_uses_static_labels_for_every_variant() {
    let cfg = WidgetConfig::default();
    for variant in [LayoutVariant::Small, LayoutVariant::Medium, LayoutVariant::Large] {
        let state = populate(variant, &WidgetData::NoData, &cfg);
        assert_eq!(state.text(ViewElement::MealType), Some("KYK Yemek"));
        assert_eq!(state.text(ViewElement::Date), Some("Veri yok"));
        assert_eq!(state.visibility(ViewElement::Location), Some(false));
    }
}

#[test]
fn empty_state_list_elements_per_variant() {
    let cfg = WidgetConfig::default();

    let small = populate(LayoutVariant::Small, &WidgetData::NoData, &cfg);
    assert_eq!(small.visibility(ViewElement::MenuList), None);
    assert_eq!(small.visibility(ViewElement::NoData), None);

    let medium = populate(LayoutVariant::Medium, &WidgetData::NoData, &cfg);
    assert_eq!(medium.visibility(ViewElement::MenuList), Some(false));
    assert_eq!(medium.visibility(ViewElement::MoreItems), Some(false));
    assert_eq!(medium.visibility(ViewElement::NoData), None);

    let large = populate(LayoutVariant::Large, &WidgetData::NoData, &cfg);
    assert_eq!(large.visibility(ViewElement::MenuList), Some(false));
    assert_eq!(large.visibility(ViewElement::NoData), Some(true));
    assert_eq!(large.visibility(ViewElement::MoreItems), None);
}

#[test]
fn malformed_renders_like_no_data() {
    let cfg = WidgetConfig::default();
    let malformed = WidgetData::Malformed(crate::parse::SnapshotError::Empty);
    for variant in [LayoutVariant::Small, LayoutVariant::Medium, LayoutVariant::Large] {
        assert_eq!(
            populate(variant, &malformed, &cfg),
            populate(variant, &WidgetData::NoData, &cfg)
        );
    }
}

#[test]
fn meal_type_labels_and_dinner_fallback() {
    let cfg = WidgetConfig::default();
    let breakfast = populate(LayoutVariant::Small, &snap("BREAKFAST", &[]), &cfg);
    assert_eq!(breakfast.text(ViewElement::MealType), Some("Kahvaltı"));

    for raw in ["DINNER", "LUNCH", "breakfast", ""] {
        let state = populate(LayoutVariant::Small, &snap(raw, &[]), &cfg);
        assert_eq!(state.text(ViewElement::MealType), Some("Akşam Yemeği"), "{}", raw);
    }
}

#[test]
fn populated_fields() {
    let cfg = WidgetConfig::default();
    let state = populate(LayoutVariant::Small, &snap("DINNER", &["a"]), &cfg);
    assert_eq!(state.text(ViewElement::Date), Some("15 Mart 2024"));
    assert_eq!(state.visibility(ViewElement::Location), Some(true));
    assert_eq!(state.text(ViewElement::Location), Some("İstanbul"));
    assert_eq!(state.list, None);
    assert_eq!(state.visibility(ViewElement::MenuList), None);
}

#[test]
fn location_hidden_without_city() {
    let cfg = WidgetConfig::default();
    let data = WidgetData::Populated(Snapshot::new("DINNER", "2024-03-15"));
    let state = populate(LayoutVariant::Medium, &data, &cfg);
    assert_eq!(state.visibility(ViewElement::Location), Some(false));
    assert_eq!(state.text(ViewElement::Location), None);
}

#[test]
fn bad_date_falls_back_to_raw_text() {
    let cfg = WidgetConfig::default();
    let data = WidgetData::Populated(Snapshot::new("DINNER", "15/03/2024"));
    let state = populate(LayoutVariant::Large, &data, &cfg);
    assert_eq!(state.text(ViewElement::Date), Some("15/03/2024"));
}

#[test]
fn medium_shows_more_items_past_three() {
    let cfg = WidgetConfig::default();
    let state = populate(LayoutVariant::Medium, &snap("DINNER", &["a", "b", "c", "d", "e"]), &cfg);
    assert_eq!(state.visibility(ViewElement::MenuList), Some(true));
    assert_eq!(state.visibility(ViewElement::MoreItems), Some(true));
    assert_eq!(state.text(ViewElement::MoreItems), Some("+2 daha"));
    assert_eq!(
        state.list,
        Some(ListBinding {
            empty_view: ViewElement::MoreItems,
            visible_cap: Some(3),
        })
    );
}

#[test]
fn medium_with_three_items_hides_more_items() {
    let cfg = WidgetConfig::default();
    let state = populate(LayoutVariant::Medium, &snap("DINNER", &["a", "b", "c"]), &cfg);
    assert_eq!(state.visibility(ViewElement::MenuList), Some(true));
    assert_eq!(state.visibility(ViewElement::MoreItems), Some(false));
}

#[test]
fn medium_without_items_hides_list() {
    let cfg = WidgetConfig::default();
    let state = populate(LayoutVariant::Medium, &snap("DINNER", &[]), &cfg);
    assert_eq!(state.visibility(ViewElement::MenuList), Some(false));
    assert_eq!(state.visibility(ViewElement::MoreItems), Some(false));
    assert_eq!(state.list, None);
}

#[test]
fn large_placeholder_tracks_item_count() {
    let cfg = WidgetConfig::default();

    let empty = populate(LayoutVariant::Large, &snap("DINNER", &[]), &cfg);
    assert_eq!(empty.visibility(ViewElement::MenuList), Some(false));
    assert_eq!(empty.visibility(ViewElement::NoData), Some(true));

    let one = populate(LayoutVariant::Large, &snap("DINNER", &["a"]), &cfg);
    assert_eq!(one.visibility(ViewElement::MenuList), Some(true));
    assert_eq!(one.visibility(ViewElement::NoData), Some(false));
    assert_eq!(one.visibility(ViewElement::MoreItems), None);
    assert_eq!(one.list.map(|l| l.empty_view), Some(ViewElement::NoData));
}

#[test]
fn launch_action_follows_config() {
    let mut cfg = WidgetConfig::default();
    let state = populate(LayoutVariant::Small, &WidgetData::NoData, &cfg);
    assert_eq!(
        state.launch.map(|l| l.target),
        Some("kykyemek://home".to_string())
    );

    cfg.launch_target = None;
    let state = populate(LayoutVariant::Large, &snap("DINNER", &["a"]), &cfg);
    assert_eq!(state.launch, None);
}

#[test]
fn custom_labels_are_used() {
    let mut cfg = WidgetConfig::default();
    cfg.labels.more_items = "{count} more".to_string();
    cfg.labels.dinner = "Dinner".to_string();
    let state = populate(LayoutVariant::Medium, &snap("X", &["a", "b", "c", "d"]), &cfg);
    assert_eq!(state.text(ViewElement::MealType), Some("Dinner"));
    assert_eq!(state.text(ViewElement::MoreItems), Some("1 more"));
}
