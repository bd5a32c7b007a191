use std::collections::BTreeMap;

use super::domain::CandidateProfile;

/// Education keywords, matched against the lower-cased free-text education level.
pub const EDUCATION_10TH_KEYWORDS: &[&str] = &["10th", "ssc"];
pub const EDUCATION_12TH_KEYWORDS: &[&str] = &["12th", "hsc"];
pub const EDUCATION_GRADUATE_KEYWORDS: &[&str] = &["graduate", "degree"];
pub const EDUCATION_DIPLOMA_KEYWORDS: &[&str] = &["diploma"];
pub const EDUCATION_ITI_KEYWORDS: &[&str] = &["iti"];

/// Source-channel keywords, one per channel flag.
pub const CHANNEL_WHATSAPP_KEYWORD: &str = "whatsapp";
pub const CHANNEL_REFERRAL_KEYWORD: &str = "referral";
pub const CHANNEL_COMMUNITY_KEYWORD: &str = "community";
pub const CHANNEL_SOCIAL_KEYWORD: &str = "social";
pub const CHANNEL_SMS_KEYWORD: &str = "sms";
pub const CHANNEL_SCHOOL_KEYWORD: &str = "school";
pub const CHANNEL_SELF_KEYWORD: &str = "self";

pub const INCOME_LOW_KEYWORD: &str = "low";
pub const INCOME_MIDDLE_KEYWORD: &str = "middle";
pub const INCOME_MIDDLE_LOW_KEYWORDS: &[&str] = &["middle-low", "middle_low"];

/// Named features derived from a [`CandidateProfile`].
///
/// The snake_case names are the contract with persisted model artifacts, which list the
/// features they were trained on by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FeatureKind {
    Age,
    AgeBucket18To22,
    AgeBucket22To25,
    AgeBucket25Plus,
    Edu10th,
    Edu12th,
    EduGraduate,
    EduDiploma,
    EduIti,
    ChannelWhatsapp,
    ChannelReferral,
    ChannelCommunity,
    ChannelSocial,
    ChannelSms,
    ChannelSchool,
    ChannelSelf,
    IncomeLow,
    IncomeMiddleLow,
    IncomeMiddle,
    NumSkills,
    HasSkills,
    NumInterests,
    HasInterests,
    ProfileCompleted,
    DocumentsUploaded,
    TotalSessions,
    AvgSessionDuration,
    TotalNotifications,
    NotificationsOpened,
    NotificationOpenRate,
}

impl FeatureKind {
    pub const ALL: [FeatureKind; 30] = [
        FeatureKind::Age,
        FeatureKind::AgeBucket18To22,
        FeatureKind::AgeBucket22To25,
        FeatureKind::AgeBucket25Plus,
        FeatureKind::Edu10th,
        FeatureKind::Edu12th,
        FeatureKind::EduGraduate,
        FeatureKind::EduDiploma,
        FeatureKind::EduIti,
        FeatureKind::ChannelWhatsapp,
        FeatureKind::ChannelReferral,
        FeatureKind::ChannelCommunity,
        FeatureKind::ChannelSocial,
        FeatureKind::ChannelSms,
        FeatureKind::ChannelSchool,
        FeatureKind::ChannelSelf,
        FeatureKind::IncomeLow,
        FeatureKind::IncomeMiddleLow,
        FeatureKind::IncomeMiddle,
        FeatureKind::NumSkills,
        FeatureKind::HasSkills,
        FeatureKind::NumInterests,
        FeatureKind::HasInterests,
        FeatureKind::ProfileCompleted,
        FeatureKind::DocumentsUploaded,
        FeatureKind::TotalSessions,
        FeatureKind::AvgSessionDuration,
        FeatureKind::TotalNotifications,
        FeatureKind::NotificationsOpened,
        FeatureKind::NotificationOpenRate,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            FeatureKind::Age => "age",
            FeatureKind::AgeBucket18To22 => "age_bucket_18_22",
            FeatureKind::AgeBucket22To25 => "age_bucket_22_25",
            FeatureKind::AgeBucket25Plus => "age_bucket_25_plus",
            FeatureKind::Edu10th => "edu_10th",
            FeatureKind::Edu12th => "edu_12th",
            FeatureKind::EduGraduate => "edu_graduate",
            FeatureKind::EduDiploma => "edu_diploma",
            FeatureKind::EduIti => "edu_iti",
            FeatureKind::ChannelWhatsapp => "channel_whatsapp",
            FeatureKind::ChannelReferral => "channel_referral",
            FeatureKind::ChannelCommunity => "channel_community",
            FeatureKind::ChannelSocial => "channel_social",
            FeatureKind::ChannelSms => "channel_sms",
            FeatureKind::ChannelSchool => "channel_school",
            FeatureKind::ChannelSelf => "channel_self",
            FeatureKind::IncomeLow => "income_low",
            FeatureKind::IncomeMiddleLow => "income_middle_low",
            FeatureKind::IncomeMiddle => "income_middle",
            FeatureKind::NumSkills => "num_skills",
            FeatureKind::HasSkills => "has_skills",
            FeatureKind::NumInterests => "num_interests",
            FeatureKind::HasInterests => "has_interests",
            FeatureKind::ProfileCompleted => "profile_completed",
            FeatureKind::DocumentsUploaded => "documents_uploaded",
            FeatureKind::TotalSessions => "total_sessions",
            FeatureKind::AvgSessionDuration => "avg_session_duration",
            FeatureKind::TotalNotifications => "total_notifications",
            FeatureKind::NotificationsOpened => "notifications_opened",
            FeatureKind::NotificationOpenRate => "notification_open_rate",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

/// Flat feature mapping; absent entries read as `0.0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureMap(BTreeMap<FeatureKind, f64>);

impl FeatureMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: FeatureKind, value: f64) {
        self.0.insert(kind, value);
    }

    pub fn set_flag(&mut self, kind: FeatureKind, on: bool) {
        self.insert(kind, if on { 1.0 } else { 0.0 });
    }

    pub fn value(&self, kind: FeatureKind) -> f64 {
        self.0.get(&kind).copied().unwrap_or(0.0)
    }

    pub fn flag(&self, kind: FeatureKind) -> bool {
        self.value(kind) != 0.0
    }

    /// Lookup by artifact feature name. Names this crate does not produce read as `0.0`.
    pub fn value_by_name(&self, name: &str) -> f64 {
        FeatureKind::from_name(name)
            .map(|kind| self.value(kind))
            .unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FeatureKind, f64)> + '_ {
        self.0.iter().map(|(kind, value)| (*kind, *value))
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Map a profile to named features. Never fails; unknown or empty text sets no flags.
pub fn extract_features(profile: &CandidateProfile) -> FeatureMap {
    let mut features = FeatureMap::new();

    let age = profile.age;
    features.insert(FeatureKind::Age, f64::from(age));
    features.set_flag(FeatureKind::AgeBucket18To22, (18..=22).contains(&age));
    features.set_flag(FeatureKind::AgeBucket22To25, age > 22 && age <= 25);
    features.set_flag(FeatureKind::AgeBucket25Plus, age > 25);

    let education = profile.education_level.to_lowercase();
    features.set_flag(
        FeatureKind::Edu10th,
        contains_any(&education, EDUCATION_10TH_KEYWORDS),
    );
    features.set_flag(
        FeatureKind::Edu12th,
        contains_any(&education, EDUCATION_12TH_KEYWORDS),
    );
    features.set_flag(
        FeatureKind::EduGraduate,
        contains_any(&education, EDUCATION_GRADUATE_KEYWORDS),
    );
    features.set_flag(
        FeatureKind::EduDiploma,
        contains_any(&education, EDUCATION_DIPLOMA_KEYWORDS),
    );
    features.set_flag(
        FeatureKind::EduIti,
        contains_any(&education, EDUCATION_ITI_KEYWORDS),
    );

    let channel = profile.source_channel.to_lowercase();
    for (kind, keyword) in [
        (FeatureKind::ChannelWhatsapp, CHANNEL_WHATSAPP_KEYWORD),
        (FeatureKind::ChannelReferral, CHANNEL_REFERRAL_KEYWORD),
        (FeatureKind::ChannelCommunity, CHANNEL_COMMUNITY_KEYWORD),
        (FeatureKind::ChannelSocial, CHANNEL_SOCIAL_KEYWORD),
        (FeatureKind::ChannelSms, CHANNEL_SMS_KEYWORD),
        (FeatureKind::ChannelSchool, CHANNEL_SCHOOL_KEYWORD),
        (FeatureKind::ChannelSelf, CHANNEL_SELF_KEYWORD),
    ] {
        features.set_flag(kind, channel.contains(keyword));
    }

    let income = profile.income_bracket.to_lowercase();
    features.set_flag(
        FeatureKind::IncomeLow,
        income.contains(INCOME_LOW_KEYWORD) && !income.contains(INCOME_MIDDLE_KEYWORD),
    );
    features.set_flag(
        FeatureKind::IncomeMiddleLow,
        contains_any(&income, INCOME_MIDDLE_LOW_KEYWORDS),
    );
    features.set_flag(FeatureKind::IncomeMiddle, income == INCOME_MIDDLE_KEYWORD);

    features.insert(FeatureKind::NumSkills, profile.skills.len() as f64);
    features.set_flag(FeatureKind::HasSkills, !profile.skills.is_empty());
    features.insert(FeatureKind::NumInterests, profile.interests.len() as f64);
    features.set_flag(FeatureKind::HasInterests, !profile.interests.is_empty());

    features.set_flag(FeatureKind::ProfileCompleted, profile.profile_completed);
    features.set_flag(FeatureKind::DocumentsUploaded, profile.documents_uploaded);

    features.insert(FeatureKind::TotalSessions, profile.total_sessions);
    features.insert(FeatureKind::AvgSessionDuration, profile.avg_session_duration);
    features.insert(FeatureKind::TotalNotifications, profile.total_notifications);
    features.insert(FeatureKind::NotificationsOpened, profile.notifications_opened);
    features.insert(
        FeatureKind::NotificationOpenRate,
        profile.notification_open_rate(),
    );

    features
}
