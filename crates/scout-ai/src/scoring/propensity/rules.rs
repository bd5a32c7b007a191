use super::super::domain::{round_to, Confidence, ScoreFactor, ScoreResult, ScoringMethod};
use super::super::features::{FeatureKind, FeatureMap};
use super::weights::PropensityWeights;

pub(crate) const MIN_SCORE: f64 = 0.0;
pub(crate) const MAX_SCORE: f64 = 100.0;
const CONFIDENT_BELOW: f64 = 30.0;
const CONFIDENT_ABOVE: f64 = 70.0;

/// One tier of a category; only the first matching tier of a category applies.
struct Tier {
    feature: FeatureKind,
    label: &'static str,
    weight: f64,
}

fn age_tiers(weights: &PropensityWeights) -> [Tier; 2] {
    [
        Tier {
            feature: FeatureKind::AgeBucket18To22,
            label: "Age 18-22",
            weight: weights.age_18_22,
        },
        Tier {
            feature: FeatureKind::AgeBucket22To25,
            label: "Age 22-25",
            weight: weights.age_22_25,
        },
    ]
}

fn education_tiers(weights: &PropensityWeights) -> [Tier; 5] {
    [
        Tier {
            feature: FeatureKind::EduGraduate,
            label: "Graduate",
            weight: weights.education_graduate,
        },
        Tier {
            feature: FeatureKind::EduDiploma,
            label: "Diploma",
            weight: weights.education_diploma,
        },
        Tier {
            feature: FeatureKind::EduIti,
            label: "ITI",
            weight: weights.education_iti,
        },
        Tier {
            feature: FeatureKind::Edu12th,
            label: "12th Pass",
            weight: weights.education_12th,
        },
        Tier {
            feature: FeatureKind::Edu10th,
            label: "10th Pass",
            weight: weights.education_10th,
        },
    ]
}

fn channel_tiers(weights: &PropensityWeights) -> [Tier; 3] {
    [
        Tier {
            feature: FeatureKind::ChannelReferral,
            label: "Referral channel",
            weight: weights.channel_referral,
        },
        Tier {
            feature: FeatureKind::ChannelCommunity,
            label: "Community event",
            weight: weights.channel_community_event,
        },
        Tier {
            feature: FeatureKind::ChannelWhatsapp,
            label: "WhatsApp channel",
            weight: weights.channel_whatsapp,
        },
    ]
}

fn income_tiers(weights: &PropensityWeights) -> [Tier; 2] {
    [
        Tier {
            feature: FeatureKind::IncomeLow,
            label: "Low income bracket",
            weight: weights.income_low,
        },
        Tier {
            feature: FeatureKind::IncomeMiddleLow,
            label: "Middle-low income",
            weight: weights.income_middle_low,
        },
    ]
}

fn impact(weight: f64) -> String {
    format!("{weight:+}")
}

/// Additive rule scoring over extracted features.
pub(crate) fn score_features(features: &FeatureMap, weights: &PropensityWeights) -> ScoreResult {
    let mut score = weights.base_score;
    let mut factors = Vec::new();

    let age = age_tiers(weights);
    let education = education_tiers(weights);
    let channel = channel_tiers(weights);
    let income = income_tiers(weights);
    let categories: [&[Tier]; 4] = [&age, &education, &channel, &income];
    for tiers in categories {
        if let Some(tier) = tiers.iter().find(|tier| features.flag(tier.feature)) {
            score += tier.weight;
            factors.push(ScoreFactor::new(tier.label, impact(tier.weight)));
        }
    }

    let flat_bonuses = [
        (
            features.flag(FeatureKind::HasSkills),
            "Has skills listed",
            weights.has_skills,
        ),
        (
            features.flag(FeatureKind::ProfileCompleted),
            "Profile completed",
            weights.profile_complete,
        ),
        (
            features.flag(FeatureKind::DocumentsUploaded),
            "Documents uploaded",
            weights.documents_uploaded,
        ),
        (
            features.value(FeatureKind::NotificationOpenRate)
                > weights.notification_responsive_rate,
            "Responsive to notifications",
            weights.notification_responsive,
        ),
    ];
    for (fired, label, weight) in flat_bonuses {
        if fired {
            score += weight;
            factors.push(ScoreFactor::new(label, impact(weight)));
        }
    }

    let score = score.clamp(MIN_SCORE, MAX_SCORE);

    ScoreResult {
        score: round_to(score, 2),
        probability: round_to(score / 100.0, 4),
        method: ScoringMethod::RuleBased,
        confidence: Confidence::from_extremes(score, CONFIDENT_BELOW, CONFIDENT_ABOVE),
        factors,
    }
}
