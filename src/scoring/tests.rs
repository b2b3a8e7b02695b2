use serde_json::json;

use super::*;
use crate::hydration::HydratedCandidate;
use crate::profile::Profile;
use crate::rerank::LlmScore;
use crate::testing::object;
use crate::vectordb::MatchCandidate;

fn hydrated(id: &str, similarity: f64, has_profile: bool) -> HydratedCandidate {
    HydratedCandidate {
        candidate: MatchCandidate::new(id, Some(similarity)),
        profile: has_profile.then(|| Profile::new(id, object(json!({ "full_name": id })))),
    }
}

fn llm(id: &str, score: f32) -> LlmScore {
    LlmScore {
        candidate_id: id.to_string(),
        score,
        explanation: format!("because {id}"),
    }
}

fn ids(results: &[MatchResult]) -> Vec<&str> {
    results.iter().map(|r| r.id.as_str()).collect()
}

#[test]
fn test_rank_scenario_ten_retrieved_eight_hydrated_five_pass() {
    let candidates: Vec<HydratedCandidate> = (0..10)
        .map(|i| hydrated(&format!("c{i}"), 0.9 - i as f64 * 0.05, i < 8))
        .collect();
    let scores = vec![
        llm("c0", 0.2),
        llm("c1", 0.95),
        llm("c2", 0.5),
        llm("c3", 0.49),
        llm("c4", 0.7),
        llm("c5", 0.1),
        llm("c6", 0.8),
        llm("c7", 0.6),
    ];

    let results = rank_candidates(candidates, scores);

    assert_eq!(ids(&results), vec!["c1", "c6", "c4", "c7", "c2"]);
    assert!(results.iter().all(|r| r.llm_score >= 0.5));
    assert!(results.windows(2).all(|w| w[0].llm_score >= w[1].llm_score));
}

#[test]
fn test_rank_ties_keep_retrieval_order() {
    let candidates = vec![
        hydrated("first", 0.9, true),
        hydrated("second", 0.8, true),
        hydrated("third", 0.7, true),
    ];
    let scores = vec![llm("third", 0.8), llm("second", 0.8), llm("first", 0.8)];

    let results = rank_candidates(candidates, scores);
    assert_eq!(ids(&results), vec!["first", "second", "third"]);
}

#[test]
fn test_rank_drops_unscored_and_unhydrated() {
    let candidates = vec![
        hydrated("scored", 0.9, true),
        hydrated("unscored", 0.8, true),
        hydrated("ghost", 0.7, false),
    ];
    let scores = vec![llm("scored", 0.9), llm("ghost", 1.0), llm("stranger", 1.0)];

    let results = rank_candidates(candidates, scores);
    assert_eq!(ids(&results), vec!["scored"]);
}

#[test]
fn test_rank_carries_vector_score_and_explanation() {
    let results = rank_candidates(vec![hydrated("a", 0.42, true)], vec![llm("a", 0.75)]);

    let result = &results[0];
    assert_eq!(result.vector_score, Some(0.42));
    assert_eq!(result.llm_score, 0.75);
    assert_eq!(result.llm_explanation, "because a");
    assert_eq!(result.profile.id, "a");
}

#[test]
fn test_rank_empty_inputs() {
    assert!(rank_candidates(Vec::new(), Vec::new()).is_empty());
    assert!(rank_candidates(vec![hydrated("a", 0.5, true)], Vec::new()).is_empty());
}

#[test]
fn test_match_result_serializes_response_field_names() {
    let results = rank_candidates(vec![hydrated("a", 0.42, true)], vec![llm("a", 0.75)]);
    let value = serde_json::to_value(&results[0]).unwrap();

    assert_eq!(
        value,
        json!({
            "id": "a",
            "score": 0.42,
            "profile": { "id": "a", "full_name": "a" },
            "llmScore": 0.75,
            "llmScoreExplanation": "because a",
        })
    );
}
