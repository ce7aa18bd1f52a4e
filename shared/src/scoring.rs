//! Additive point scoring for the rule-based recommender
//!
//! Each candidate crop checks five threshold predicates worth 30, 25, 20, 15
//! and 10 points (temperature, humidity, rainfall, pH, one nutrient), so a
//! perfect match scores 100. Rainfall thresholds are annual totals in mm.

use serde::Serialize;

use crate::models::{AgronomicFeatures, Trend};

/// Highest score a candidate can reach
pub const MAX_RULE_SCORE: u32 = 100;

/// Raw score of one candidate crop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CandidateScore {
    pub crop: &'static str,
    pub score: u32,
    pub trend: Trend,
}

struct RuleCandidate {
    crop: &'static str,
    trend: Trend,
    score: fn(&AgronomicFeatures) -> u32,
}

/// Candidates in declaration order; ties keep this order
const RULE_CANDIDATES: [RuleCandidate; 4] = [
    RuleCandidate { crop: "rice", trend: Trend::Up, score: rice_score },
    RuleCandidate { crop: "maize", trend: Trend::Stable, score: maize_score },
    RuleCandidate { crop: "cotton", trend: Trend::Up, score: cotton_score },
    RuleCandidate { crop: "chickpea", trend: Trend::Stable, score: chickpea_score },
];

fn points(satisfied: bool, value: u32) -> u32 {
    if satisfied {
        value
    } else {
        0
    }
}

fn rice_score(f: &AgronomicFeatures) -> u32 {
    points((20.0..=35.0).contains(&f.temperature), 30)
        + points(f.humidity > 70.0, 25)
        + points(f.rainfall > 1500.0, 20)
        + points((5.5..=7.0).contains(&f.ph), 15)
        + points(f.nitrogen > 80.0, 10)
}

fn maize_score(f: &AgronomicFeatures) -> u32 {
    points((18.0..=26.0).contains(&f.temperature), 30)
        + points((50.0..=75.0).contains(&f.humidity), 25)
        + points((500.0..=1200.0).contains(&f.rainfall), 20)
        + points((5.7..=6.8).contains(&f.ph), 15)
        + points(f.nitrogen > 70.0, 10)
}

fn cotton_score(f: &AgronomicFeatures) -> u32 {
    points((22.0..=26.0).contains(&f.temperature), 30)
        + points(f.humidity < 85.0, 25)
        + points(f.rainfall < 1000.0, 20)
        + points((5.8..=8.0).contains(&f.ph), 15)
        + points(f.potassium > 150.0, 10)
}

fn chickpea_score(f: &AgronomicFeatures) -> u32 {
    points((17.0..=21.0).contains(&f.temperature), 30)
        + points(f.humidity < 25.0, 25)
        + points(f.rainfall < 700.0, 20)
        + points((6.2..=8.9).contains(&f.ph), 15)
        + points(f.phosphorus > 50.0, 10)
}

/// Score every candidate, in declaration order
pub fn score_candidates(features: &AgronomicFeatures) -> Vec<CandidateScore> {
    RULE_CANDIDATES
        .iter()
        .map(|c| CandidateScore {
            crop: c.crop,
            score: (c.score)(features),
            trend: c.trend,
        })
        .collect()
}

/// Score every candidate and sort by score, highest first.
/// Equal scores keep declaration order.
pub fn rank_candidates(features: &AgronomicFeatures) -> Vec<CandidateScore> {
    let mut scores = score_candidates(features);
    scores.sort_by(|a, b| b.score.cmp(&a.score));
    scores
}
