use serde_json::{Value, json};

use super::fields::{
    CANDIDATE_ID_ALIASES, SIMILARITY_SCORE_ALIASES, resolve_id, resolve_score, resolve_text,
};
use super::*;

fn attrs(value: Value) -> Attributes {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

#[test]
fn test_scenario_country_and_industries_with_prompt() {
    let profile = attrs(json!({
        "country": "Switzerland",
        "industries": ["Fintech"],
    }));

    let text = build_embedding_text(
        &profile,
        Role::Organizer.attribute_schema(),
        "AI keynote speaker for fintech conference",
    );

    assert_eq!(
        text,
        "country: Switzerland, industries: Fintech, user_prompt: AI keynote speaker for fintech conference"
    );
}

#[test]
fn test_schema_order_wins_over_map_order() {
    let profile = attrs(json!({
        "topics": ["AI"],
        "city": "Zurich",
        "organization_name": "FinConf",
    }));

    let text = build_embedding_text(&profile, Role::Organizer.attribute_schema(), "");

    assert_eq!(text, "organization_name: FinConf, city: Zurich, topics: AI");
}

#[test]
fn test_empty_values_are_omitted() {
    let profile = attrs(json!({
        "full_name": "   ",
        "headline": null,
        "country": "",
        "industries": [],
        "topics": [null, ""],
        "languages": ["English", "German"],
    }));

    let text = build_embedding_text(&profile, Role::Speaker.attribute_schema(), "");

    assert_eq!(text, "languages: English, German");
    for key in ["full_name", "headline", "country", "industries", "topics"] {
        assert!(!text.contains(&format!("{key}: ")), "{key} leaked: {text}");
    }
}

#[test]
fn test_null_where_list_expected_does_not_panic() {
    let profile = attrs(json!({ "industries": null, "topics": null }));
    let text = build_embedding_text(&profile, Role::Speaker.attribute_schema(), "keynote");
    assert_eq!(text, "user_prompt: keynote");
}

#[test]
fn test_prompt_appended_only_when_non_blank() {
    let profile = attrs(json!({ "country": "Spain" }));
    let schema = Role::Speaker.attribute_schema();

    assert_eq!(build_embedding_text(&profile, schema, ""), "country: Spain");
    assert_eq!(build_embedding_text(&profile, schema, "   "), "country: Spain");
    assert!(build_embedding_text(&profile, schema, "panel").ends_with("user_prompt: panel"));
}

#[test]
fn test_empty_profile_and_prompt_is_empty_text() {
    let text = build_embedding_text(&Attributes::new(), Role::Organizer.attribute_schema(), "");
    assert!(text.is_empty());
}

#[test]
fn test_scalars_render_plainly() {
    assert_eq!(format_attribute(&json!(12)), Some("12".to_string()));
    assert_eq!(format_attribute(&json!(true)), Some("true".to_string()));
    assert_eq!(format_attribute(&json!(" Berlin ")), Some("Berlin".to_string()));
    assert_eq!(format_attribute(&json!([1, "two"])), Some("1, two".to_string()));
    assert_eq!(format_attribute(&json!({})), None);
}

#[test]
fn test_unknown_keys_are_ignored() {
    let profile = attrs(json!({ "favorite_color": "teal", "country": "Peru" }));
    let text = build_embedding_text(&profile, Role::Speaker.attribute_schema(), "");
    assert_eq!(text, "country: Peru");
}

#[test]
fn test_role_pairs_are_symmetric() {
    assert_eq!(Role::Organizer.opposite(), Role::Speaker);
    assert_eq!(Role::Speaker.opposite(), Role::Organizer);

    assert_eq!(Role::Organizer.match_procedure(), "match_speakers");
    assert_eq!(Role::Speaker.match_procedure(), "match_organizers");
    assert_eq!(Role::Organizer.opposite().table(), "speakers");
    assert_eq!(Role::Speaker.opposite().table(), "organizers");
}

#[test]
fn test_role_from_str() {
    assert_eq!("organizer".parse::<Role>(), Ok(Role::Organizer));
    assert_eq!(" Speaker ".parse::<Role>(), Ok(Role::Speaker));
    assert_eq!(
        "sponsor".parse::<Role>(),
        Err(UnknownRole("sponsor".to_string()))
    );
}

#[test]
fn test_role_serde_lowercase() {
    assert_eq!(serde_json::to_value(Role::Speaker).unwrap(), json!("speaker"));
    let role: Role = serde_json::from_value(json!("organizer")).unwrap();
    assert_eq!(role, Role::Organizer);
}

#[test]
fn test_profile_from_row_drops_embedding_and_id() {
    let profile = Profile::from_row(json!({
        "id": "abc",
        "country": "Chile",
        "embedding": [0.1, 0.2],
    }))
    .expect("row has id");

    assert_eq!(profile.id, "abc");
    assert!(!profile.attributes.contains_key("embedding"));
    assert!(!profile.attributes.contains_key("id"));

    let serialized = serde_json::to_value(&profile).unwrap();
    assert_eq!(serialized, json!({ "id": "abc", "country": "Chile" }));
}

#[test]
fn test_profile_from_row_without_id() {
    assert!(Profile::from_row(json!({ "country": "Chile" })).is_none());
    assert!(Profile::from_row(json!(["not", "an", "object"])).is_none());
}

#[test]
fn test_profile_summary_uses_role_schema() {
    let profile = Profile::from_row(json!({
        "id": "s1",
        "full_name": "Ada",
        "event_name": "ignored for speakers",
    }))
    .unwrap();

    assert_eq!(profile.summary(Role::Speaker), "full_name: Ada");
}

#[test]
fn test_resolve_id_first_present_alias_wins() {
    let row = attrs(json!({ "id": null, "profile_id": "p-1", "speaker_id": "s-1" }));
    assert_eq!(resolve_id(&row, CANDIDATE_ID_ALIASES), Some("p-1".to_string()));
}

#[test]
fn test_resolve_id_accepts_integers() {
    let row = attrs(json!({ "id": 42 }));
    assert_eq!(resolve_id(&row, CANDIDATE_ID_ALIASES), Some("42".to_string()));
}

#[test]
fn test_resolve_id_unusable_first_value_is_not_skipped() {
    let row = attrs(json!({ "id": { "nested": true }, "profile_id": "p-1" }));
    assert_eq!(resolve_id(&row, CANDIDATE_ID_ALIASES), None);

    let row = attrs(json!({ "id": "  " }));
    assert_eq!(resolve_id(&row, CANDIDATE_ID_ALIASES), None);
}

#[test]
fn test_resolve_score() {
    let row = attrs(json!({ "score": 0.42, "similarity": null }));
    assert_eq!(resolve_score(&row, SIMILARITY_SCORE_ALIASES), Some(0.42));

    let row = attrs(json!({ "similarity": "high" }));
    assert_eq!(resolve_score(&row, SIMILARITY_SCORE_ALIASES), None);

    let row = attrs(json!({}));
    assert_eq!(resolve_score(&row, SIMILARITY_SCORE_ALIASES), None);
}

#[test]
fn test_resolve_text() {
    let row = attrs(json!({ "reason": "fits" }));
    assert_eq!(
        resolve_text(&row, &["explanation", "reason"]),
        Some("fits".to_string())
    );
    assert_eq!(resolve_text(&row, &["explanation"]), None);
}
