use super::*;
use crate::LayoutVariant;
use crate::model::WidgetConfig;
use crate::populate::{ViewElement, populate};

#[test]
fn absent_snapshot_is_no_data() {
    assert_eq!(parse_snapshot(None), WidgetData::NoData);
}

#[test]
fn empty_string_is_malformed() {
    assert_eq!(
        parse_snapshot(Some("")),
        WidgetData::Malformed(SnapshotError::Empty)
    );
}

#[test]
fn minimal_snapshot_decodes() {
    let data = parse_snapshot(Some(
        r#"{"mealType":"DINNER","mealDate":"2024-03-15","items":[]}"#,
    ));
    let WidgetData::Populated(snap) = data else {
        panic!("expected populated, got {:?}", data);
    };
    assert_eq!(snap.meal_type, "DINNER");
    assert_eq!(snap.meal_date, "2024-03-15");
    assert_eq!(snap.city_name, None);
    assert!(snap.items.is_empty());
}

#[test]
fn city_name_null_or_empty_is_absent() {
    for city in [r#""cityName":null,"#, r#""cityName":"","#] {
        let raw = format!(
            r#"{{"mealType":"BREAKFAST","mealDate":"2024-03-15",{}"items":["Çorba"]}}"#,
            city
        );
        let snap = parse_snapshot(Some(raw.as_str()));
        assert!(matches!(snap, WidgetData::Populated(_)), "{}", raw);
        assert_eq!(snap.snapshot().and_then(|s| s.city_name.clone()), None);
    }
}

#[test]
fn missing_required_fields_are_malformed() {
    let cases = [
        (r#"{"mealDate":"2024-03-15","items":[]}"#, "mealType"),
        (r#"{"mealType":"DINNER","items":[]}"#, "mealDate"),
        (r#"{"mealType":"DINNER","mealDate":"2024-03-15"}"#, "items"),
        (
            r#"{"mealType":"DINNER","mealDate":"2024-03-15","items":null}"#,
            "items",
        ),
    ];
    for (raw, field) in cases {
        assert_eq!(
            parse_snapshot(Some(raw)),
            WidgetData::Malformed(SnapshotError::MissingField(field)),
            "{}",
            raw
        );
    }
}

#[test]
fn non_json_and_non_objects_are_malformed() {
    assert!(matches!(
        parse_snapshot(Some("not json")),
        WidgetData::Malformed(SnapshotError::InvalidJson(_))
    ));
    assert_eq!(
        parse_snapshot(Some("[1,2]")),
        WidgetData::Malformed(SnapshotError::NotAnObject)
    );
    assert_eq!(
        parse_snapshot(Some(r#"{"mealType":"DINNER","mealDate":"2024-03-15","items":"x"}"#)),
        WidgetData::Malformed(SnapshotError::WrongType("items"))
    );
}

#[test]
fn scalar_items_are_shown_as_text() {
    let data = parse_snapshot(Some(
        r#"{"mealType":"DINNER","mealDate":"2024-03-15","items":["Pilav",2,true]}"#,
    ));
    assert_eq!(
        data.snapshot().map(|s| s.items.clone()),
        Some(vec!["Pilav".to_string(), "2".to_string(), "true".to_string()])
    );
}

#[test]
fn odd_items_degrade_without_dropping_the_snapshot() {
    let data = parse_snapshot(Some(
        r#"{"mealType":"DINNER","mealDate":"2024-03-15","items":["Pilav",null,["a"],{"b":1}]}"#,
    ));
    assert_eq!(
        data.snapshot().map(|s| s.items.clone()),
        Some(vec![
            "Pilav".to_string(),
            r#"["a"]"#.to_string(),
            r#"{"b":1}"#.to_string()
        ])
    );
}

#[test]
fn wrong_typed_city_name_keeps_the_rest_of_the_snapshot() {
    let numeric = parse_snapshot(Some(
        r#"{"mealType":"BREAKFAST","mealDate":"2024-03-15","cityName":34,"items":["a"]}"#,
    ));
    assert!(matches!(numeric, WidgetData::Populated(_)), "{:?}", numeric);
    assert_eq!(
        numeric.snapshot().and_then(|s| s.city_name.clone()),
        Some("34".to_string())
    );

    let state = populate(LayoutVariant::Large, &numeric, &WidgetConfig::default());
    assert_eq!(state.text(ViewElement::MealType), Some("Kahvaltı"));
    assert_eq!(state.text(ViewElement::Date), Some("15 Mart 2024"));

    let nested = parse_snapshot(Some(
        r#"{"mealType":"BREAKFAST","mealDate":"2024-03-15","cityName":{"x":1},"items":["a"]}"#,
    ));
    assert!(matches!(nested, WidgetData::Populated(_)), "{:?}", nested);
    assert_eq!(nested.snapshot().and_then(|s| s.city_name.clone()), None);
}

#[test]
fn serialized_snapshot_reads_back_equal() {
    let snap = Snapshot::new("BREAKFAST", "2024-01-02")
        .with_city("Ankara")
        .with_items(["Peynir", "Zeytin", "Çay"]);
    let json = serde_json::to_string(&snap).unwrap();
    assert_eq!(parse_snapshot(Some(json.as_str())), WidgetData::Populated(snap));
}

#[test]
fn dates_format_as_long_turkish_dates() {
    assert_eq!(format_meal_date("2024-03-15", DateLocale::Tr), "15 Mart 2024");
    assert_eq!(format_meal_date("2024-08-05", DateLocale::Tr), "05 Ağustos 2024");
    assert_eq!(format_meal_date("2024-12-31", DateLocale::En), "31 December 2024");
}

#[test]
fn unparseable_dates_are_returned_unchanged() {
    assert_eq!(format_meal_date("yarın", DateLocale::Tr), "yarın");
    assert_eq!(format_meal_date("2024-02-30", DateLocale::Tr), "2024-02-30");
    assert_eq!(format_meal_date("", DateLocale::Tr), "");
}
