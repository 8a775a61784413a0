use seqdep_plot::columns::{self, ColumnTag, TagLayout, MIDPOINT_TAG, TAG_RANGE};
use seqdep_plot::error::PlotError;
use seqdep_plot::types::Side;

fn pin_names() -> Vec<String> {
    let mut names = vec!["frame".to_string()];
    names.extend(TAG_RANGE.map(|n| format!("t{}", n)));
    names
}

#[test]
fn test_parse_column_tag() {
    assert_eq!(
        ColumnTag::parse("t26"),
        Some(ColumnTag {
            tag: 26,
            repeat: None
        })
    );
    assert_eq!(
        ColumnTag::parse("t33r2"),
        Some(ColumnTag {
            tag: 33,
            repeat: Some(2)
        })
    );

    // names that merely contain a tag are not tags
    assert_eq!(ColumnTag::parse("frame"), None);
    assert_eq!(ColumnTag::parse("t26_old"), None);
    assert_eq!(ColumnTag::parse("t26r"), None);
    assert_eq!(ColumnTag::parse("at26"), None);
    assert_eq!(ColumnTag::parse("t"), None);
}

#[test]
fn test_tag_side() {
    let side = |tag| ColumnTag { tag, repeat: None }.side();
    assert_eq!(side(26), Some(Side::Negative));
    assert_eq!(side(31), Some(Side::Negative));
    assert_eq!(side(MIDPOINT_TAG), None);
    assert_eq!(side(33), Some(Side::Positive));
    assert_eq!(side(38), Some(Side::Positive));
}

#[test]
fn test_groups_are_disjoint_and_exhaustive() {
    let names = pin_names();
    let groups = columns::group_columns("pin", &names, TagLayout::Mixed).unwrap();

    assert_eq!(groups.negative, ["t26", "t27", "t28", "t29", "t30", "t31"]);
    assert_eq!(groups.positive, ["t33", "t34", "t35", "t36", "t37", "t38"]);

    for n in TAG_RANGE.filter(|&n| n != MIDPOINT_TAG) {
        let name = format!("t{}", n);
        let in_neg = groups.negative.contains(&name);
        let in_pos = groups.positive.contains(&name);
        assert!(in_neg ^ in_pos, "{} must be in exactly one group", name);
    }
    assert!(!groups.negative.contains(&"t32".to_string()));
    assert!(!groups.positive.contains(&"t32".to_string()));
}

#[test]
fn test_repeat_layout_ignores_single_columns() {
    let names = ["t26", "t26r1", "t26r2", "t32r1", "t33r3", "t33r4", "t40r1"];
    let groups = columns::group_columns("bend", &names, TagLayout::Repeats).unwrap();

    assert_eq!(groups.negative, ["t26r1", "t26r2"]);
    // repeat 4 and tag 40 are out of range
    assert_eq!(groups.positive, ["t33r3"]);
}

#[test]
fn test_groups_sorted_by_tag() {
    let names = ["t38", "t27", "t34", "t26"];
    let groups = columns::group_columns("pin", &names, TagLayout::Mixed).unwrap();
    assert_eq!(groups.negative, ["t26", "t27"]);
    assert_eq!(groups.positive, ["t34", "t38"]);
}

#[test]
fn test_ambiguous_columns() {
    let names = ["t30", "t030", "t33"];
    let result = columns::group_columns("pin", &names, TagLayout::Mixed);
    assert!(matches!(result, Err(PlotError::AmbiguousColumn { .. })));
}

#[test]
fn test_missing_side() {
    // only the midpoint and negative tags
    let names = ["t26", "t32"];
    let result = columns::group_columns("pin", &names, TagLayout::Mixed);
    match result {
        Err(PlotError::MissingColumns { side, .. }) => assert_eq!(side, "positive"),
        other => panic!("expected missing columns, got {:?}", other),
    }
}

#[test]
fn test_mixed_layout_accepts_both_forms() {
    let names = ["frame", "t26", "t26r1", "t27r2", "t32r1", "t33r1", "t33r4"];
    let groups = columns::group_columns("pin", &names, TagLayout::Mixed).unwrap();

    // a bare tag and its repeats are distinct keys
    assert_eq!(groups.negative, ["t26", "t26r1", "t27r2"]);
    assert_eq!(groups.positive, ["t33r1"]);

    let result = columns::group_columns("pin", &["t26r1", "t26r01", "t33"], TagLayout::Mixed);
    assert!(matches!(result, Err(PlotError::AmbiguousColumn { .. })));
}
