use super::*;
use serde_json::json;

fn entry(title: &str, home: Value, away: Value) -> Value {
    json!({ "title": title, "stats": [home, away] })
}

fn feed(entries: Vec<Value>) -> Value {
    json!({ "content": { "stats": { "Periods": { "All": { "stats": entries } } } } })
}

fn titles(stats: &[MatchStat]) -> Vec<&str> {
    stats.iter().map(|s| s.title.as_str()).collect()
}

#[test]
fn default_returns_first_eight_valid_in_source_order() {
    let entries = (0..10)
        .map(|i| entry(&format!("Stat {i}"), json!(i), json!(10 - i)))
        .collect();
    let stats = parse_stats(&feed(entries), None);
    assert_eq!(stats.len(), 8);
    assert_eq!(stats[0].title, "Stat 0");
    assert_eq!(stats[7].title, "Stat 7");
    assert_eq!(stats[3].home_value, "3");
    assert_eq!(stats[3].away_value, "7");
}

#[test]
fn invalid_entries_are_dropped_before_the_limit() {
    let stats = parse_stats(
        &feed(vec![
            entry("", json!(1), json!(2)),
            json!({ "title": "One value", "stats": [1] }),
            json!({ "title": "Three values", "stats": [1, 2, 3] }),
            json!({ "title": "No values" }),
            entry("Null side", json!(null), json!(2)),
            entry("Shots", json!(12), json!(7)),
        ]),
        None,
    );
    assert_eq!(titles(&stats), vec!["Shots"]);
}

#[test]
fn percentage_type_is_case_insensitive() {
    let stats = parse_stats(
        &feed(vec![
            json!({ "title": "Possession", "type": "Percentage", "stats": [55, 45] }),
            json!({ "title": "Shots", "type": "graph", "stats": [9, 4] }),
            json!({ "title": "Corners", "stats": [3, 2] }),
        ]),
        None,
    );
    assert!(stats[0].is_percentage);
    assert!(!stats[1].is_percentage);
    assert!(!stats[2].is_percentage);
}

#[test]
fn desired_titles_follow_caller_order() {
    let raw = feed(vec![
        entry("Ball possession", json!(58), json!(42)),
        entry("Total shots", json!(14), json!(6)),
        entry("Corners", json!(5), json!(3)),
        entry("Expected goals (xG)", json!("1.84"), json!("0.62")),
        entry("xG", json!(1.84), json!(0.62)),
        entry("Possession", json!(58), json!(42)),
    ]);
    let wanted = vec!["xG".to_string(), "Possession".to_string()];
    let stats = parse_stats(&raw, Some(&wanted));
    assert_eq!(titles(&stats), vec!["xG", "Possession"]);
    assert_eq!(stats[0].home_value, "1.84");
}

#[test]
fn desired_titles_match_case_insensitively_and_omit_missing() {
    let raw = feed(vec![
        entry("Corners", json!(5), json!(3)),
        entry("Total shots", json!(14), json!(6)),
    ]);
    let wanted = vec![
        "TOTAL SHOTS".to_string(),
        "Big chances".to_string(),
        "corners".to_string(),
        "Corners".to_string(),
    ];
    let stats = parse_stats(&raw, Some(&wanted));
    assert_eq!(titles(&stats), vec!["Total shots", "Corners"]);
}

#[test]
fn repeated_feed_title_takes_the_first_entry() {
    // grouped feeds repeat titles across groups, e.g. a summary row and a detail row
    let raw = feed(vec![
        json!({ "title": "Top stats", "stats": [entry("Corners", json!(5), json!(3))] }),
        json!({ "title": "Set pieces", "stats": [entry("corners", json!(7), json!(4))] }),
    ]);
    let wanted = vec!["Corners".to_string()];
    let stats = parse_stats(&raw, Some(&wanted));
    assert_eq!(stats.len(), 1);
    assert_eq!((stats[0].home_value.as_str(), stats[0].away_value.as_str()), ("5", "3"));

    let all = parse_stats(&raw, None);
    assert_eq!(titles(&all), vec!["Corners", "corners"]);
}

#[test]
fn empty_desired_list_behaves_like_default() {
    let raw = feed(vec![entry("Corners", json!(5), json!(3))]);
    assert_eq!(parse_stats(&raw, Some(&[])), parse_stats(&raw, None));
}

#[test]
fn grouped_feeds_are_flattened_in_order() {
    let raw = json!({
        "content": { "stats": { "Periods": { "All": { "stats": [
            { "title": "Top stats", "stats": [
                { "title": "Ball possession", "type": "percentage", "stats": [61, 39] },
                { "title": "Expected goals (xG)", "stats": ["2.10", "0.40"] }
            ]},
            { "title": "Shots", "stats": [
                { "title": "Total shots", "stats": [18, 5] }
            ]}
        ] } } } }
    });
    let stats = parse_stats(&raw, None);
    assert_eq!(
        titles(&stats),
        vec!["Ball possession", "Expected goals (xG)", "Total shots"]
    );
    assert!(stats[0].is_percentage);
}

#[test]
fn falls_back_to_flat_stats_list() {
    let raw = json!({ "content": { "stats": { "stats": [
        { "title": "Fouls", "stats": [11, 14] }
    ] } } });
    assert_eq!(titles(&parse_stats(&raw, None)), vec!["Fouls"]);
}

#[test]
fn missing_feed_yields_no_stats() {
    assert!(parse_stats(&json!({}), None).is_empty());
    assert!(parse_stats(&json!({ "content": { "stats": null } }), None).is_empty());
}

#[test]
fn match_facts_feed_with_wrapped_values() {
    let raw = json!({ "content": { "matchFacts": { "stats": [
        { "title": "Ball possession", "type": "percentage",
          "stats": [{ "value": 61 }, { "value": "39" }] },
        { "title": "Big chances", "stats": [{ "value": null }, { "value": 1 }] }
    ] } } });
    let stats = parse_stats(&raw, None);
    assert_eq!(titles(&stats), vec!["Ball possession"]);
    assert_eq!(stats[0].home_value, "61");
    assert_eq!(stats[0].away_value, "39");
}
