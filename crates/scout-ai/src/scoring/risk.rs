use super::domain::{round_to, EngagementMetrics, RiskLevel, RiskResult};

const MAX_RISK: f64 = 100.0;

/// Two-tier penalty on a single engagement metric; the worse tier is checked first.
struct MetricRule {
    severe_below: f64,
    severe_points: f64,
    severe_label: &'static str,
    mild: Option<(f64, f64, &'static str)>,
}

impl MetricRule {
    fn apply(&self, value: f64) -> Option<(f64, &'static str)> {
        if value < self.severe_below {
            return Some((self.severe_points, self.severe_label));
        }
        match self.mild {
            Some((below, points, label)) if value < below => Some((points, label)),
            _ => None,
        }
    }
}

const ATTENDANCE: MetricRule = MetricRule {
    severe_below: 0.5,
    severe_points: 30.0,
    severe_label: "Low attendance (<50%)",
    mild: Some((0.7, 15.0, "Below average attendance")),
};

const COMPLETION: MetricRule = MetricRule {
    severe_below: 0.5,
    severe_points: 25.0,
    severe_label: "Low assignment completion",
    mild: Some((0.7, 10.0, "Below average completion")),
};

const SENTIMENT: MetricRule = MetricRule {
    severe_below: 0.3,
    severe_points: 25.0,
    severe_label: "Negative sentiment detected",
    mild: Some((0.5, 10.0, "Low engagement sentiment")),
};

const SESSIONS: MetricRule = MetricRule {
    severe_below: 3.0,
    severe_points: 15.0,
    severe_label: "Low session count",
    mild: None,
};

const NOTIFICATIONS: MetricRule = MetricRule {
    severe_below: 0.2,
    severe_points: 10.0,
    severe_label: "Not responding to notifications",
    mild: None,
};

/// Score dropout risk from engagement metrics. Factors follow rule order.
pub fn calculate_dropout_risk(metrics: &EngagementMetrics) -> RiskResult {
    let checks = [
        (&ATTENDANCE, metrics.attendance_rate),
        (&COMPLETION, metrics.assignment_completion),
        (&SENTIMENT, metrics.sentiment_score),
        (&SESSIONS, metrics.total_sessions),
        (&NOTIFICATIONS, metrics.notification_open_rate),
    ];

    let mut risk_score = 0.0;
    let mut risk_factors = Vec::new();
    for (rule, value) in checks {
        if let Some((points, label)) = rule.apply(value) {
            risk_score += points;
            risk_factors.push(label.to_string());
        }
    }

    let risk_score = f64::min(risk_score, MAX_RISK);
    let risk_level = RiskLevel::from_score(risk_score);

    RiskResult {
        risk_score: round_to(risk_score, 2),
        risk_level,
        risk_factors,
        recommended_intervention: risk_level.intervention().to_string(),
    }
}
