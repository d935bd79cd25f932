use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A closed vocabulary shared by the catalog, the filter panel and label parsing.
///
/// `ALL` lists every value in display order; it is the only place the
/// vocabulary is enumerated.
pub trait Tag: Copy + Ord + fmt::Debug + 'static {
    const ALL: &'static [Self];

    /// Display label, as shown on cards and in the filter panel.
    fn label(self) -> &'static str;

    /// ASCII key accepted by the terminal driver.
    fn key(self) -> &'static str;

    /// Resolve a label or key. Unknown input yields `None`.
    fn from_label(input: &str) -> Option<Self> {
        let input = input.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|tag| tag.label() == input || tag.key().eq_ignore_ascii_case(input))
    }
}

/// How a coordinator takes on clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ServiceType {
    Spot,
    FixedAssignee,
    Both,
}

impl Tag for ServiceType {
    const ALL: &'static [Self] = &[Self::Spot, Self::FixedAssignee, Self::Both];

    fn label(self) -> &'static str {
        match self {
            Self::Spot => "スポット型",
            Self::FixedAssignee => "担当者固定型",
            Self::Both => "両方対応",
        }
    }

    fn key(self) -> &'static str {
        match self {
            Self::Spot => "spot",
            Self::FixedAssignee => "fixed",
            Self::Both => "both",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SupportMenu {
    Shopping,
    TrainEscort,
    OutingEscort,
    OneOffConsultation,
    OngoingConsultation,
    CarePlanConsultation,
}

impl Tag for SupportMenu {
    const ALL: &'static [Self] = &[
        Self::Shopping,
        Self::TrainEscort,
        Self::OutingEscort,
        Self::OneOffConsultation,
        Self::OngoingConsultation,
        Self::CarePlanConsultation,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Shopping => "買い物支援",
            Self::TrainEscort => "電車同行",
            Self::OutingEscort => "外出同行",
            Self::OneOffConsultation => "単発相談",
            Self::OngoingConsultation => "継続的相談",
            Self::CarePlanConsultation => "ケアプラン相談",
        }
    }

    fn key(self) -> &'static str {
        match self {
            Self::Shopping => "shopping",
            Self::TrainEscort => "train",
            Self::OutingEscort => "outing",
            Self::OneOffConsultation => "oneoff",
            Self::OngoingConsultation => "ongoing",
            Self::CarePlanConsultation => "careplan",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AvailableTime {
    WeekdayDaytime,
    WeekdayEvening,
    SaturdayDaytime,
    WeekendAndHolidays,
    Holidays,
}

impl Tag for AvailableTime {
    const ALL: &'static [Self] = &[
        Self::WeekdayDaytime,
        Self::WeekdayEvening,
        Self::SaturdayDaytime,
        Self::WeekendAndHolidays,
        Self::Holidays,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::WeekdayDaytime => "平日9-17時",
            Self::WeekdayEvening => "平日18-21時",
            Self::SaturdayDaytime => "土曜9-15時",
            Self::WeekendAndHolidays => "土日祝10-16時",
            Self::Holidays => "休日10-18時",
        }
    }

    fn key(self) -> &'static str {
        match self {
            Self::WeekdayDaytime => "weekday-day",
            Self::WeekdayEvening => "weekday-evening",
            Self::SaturdayDaytime => "saturday",
            Self::WeekendAndHolidays => "weekend",
            Self::Holidays => "holiday",
        }
    }
}

macro_rules! impl_tag_text {
    ($($tag:ty),+) => {
        $(
            impl fmt::Display for $tag {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }

            impl FromStr for $tag {
                type Err = UnknownTag;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    <$tag as Tag>::from_label(s).ok_or_else(|| UnknownTag(s.to_string()))
                }
            }

            impl Serialize for $tag {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.serialize_str(self.label())
                }
            }

            impl<'de> Deserialize<'de> for $tag {
                fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                    let text = String::deserialize(deserializer)?;
                    text.parse().map_err(de::Error::custom)
                }
            }
        )+
    };
}

impl_tag_text!(ServiceType, SupportMenu, AvailableTime, UserRole);

/// A label that is not part of any closed vocabulary
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tag: {0}")]
pub struct UnknownTag(pub String);

/// An availability window as listed on a coordinator's card
///
/// Windows outside the filter vocabulary are kept verbatim. They are
/// displayed but no time filter ever selects them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TimeSlot {
    Listed(AvailableTime),
    Other(String),
}

impl TimeSlot {
    pub fn label(&self) -> &str {
        match self {
            Self::Listed(time) => time.label(),
            Self::Other(text) => text,
        }
    }

    pub fn listed(&self) -> Option<AvailableTime> {
        match self {
            Self::Listed(time) => Some(*time),
            Self::Other(_) => None,
        }
    }
}

impl From<AvailableTime> for TimeSlot {
    fn from(time: AvailableTime) -> Self {
        Self::Listed(time)
    }
}

impl From<&str> for TimeSlot {
    fn from(text: &str) -> Self {
        match AvailableTime::from_label(text) {
            Some(time) => Self::Listed(time),
            None => Self::Other(text.trim().to_string()),
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for TimeSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for TimeSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(Self::from(text.as_str()))
    }
}

/// Caregiving coordinator profile shown as a swipeable card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinatorRecord {
    pub id: String,
    pub name: String,
    pub age: u8,
    pub avatar: String,
    #[serde(default)]
    pub hobbies: Vec<String>,
    #[serde(rename = "serviceType")]
    pub service_type: ServiceType,
    #[serde(rename = "supportMenus", default)]
    pub support_menus: Vec<SupportMenu>,
    #[serde(rename = "availableTimes", default)]
    pub available_times: Vec<TimeSlot>,
    pub experience: String,
    pub description: String,
    pub location: String,
}

impl CoordinatorRecord {
    /// Availability windows that a time filter can select
    pub fn listed_times(&self) -> impl Iterator<Item = AvailableTime> + '_ {
        self.available_times.iter().filter_map(TimeSlot::listed)
    }
}

/// Outcome of a single swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    /// Skip
    Left,
    /// Match request
    Right,
}

impl SwipeDirection {
    pub fn is_match(self) -> bool {
        matches!(self, Self::Right)
    }
}

/// Where a coordinator stands in the current session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionState {
    Undecided,
    Skipped,
    Matched,
}

/// Entry in the match history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: Uuid,
    #[serde(rename = "coordinatorId")]
    pub coordinator_id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "matchedAt")]
    pub matched_at: DateTime<Utc>,
}

impl MatchRecord {
    pub fn new(coordinator_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            coordinator_id: coordinator_id.into(),
            user_id: user_id.into(),
            matched_at: Utc::now(),
        }
    }
}

/// One-shot payload emitted when a right swipe is recorded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEvent {
    #[serde(rename = "match")]
    pub record: MatchRecord,
    pub coordinator: CoordinatorRecord,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UserRole {
    #[default]
    CareRecipient,
    Family,
}

impl Tag for UserRole {
    const ALL: &'static [Self] = &[Self::CareRecipient, Self::Family];

    fn label(self) -> &'static str {
        match self {
            Self::CareRecipient => "当事者",
            Self::Family => "家族",
        }
    }

    fn key(self) -> &'static str {
        match self {
            Self::CareRecipient => "self",
            Self::Family => "family",
        }
    }
}

/// Id used for match records when none is configured
pub const DEFAULT_USER_ID: &str = "local-user";

/// Profile of the person using the app, edited on the settings screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    #[serde(default = "default_user_id")]
    pub id: String,
    pub name: String,
    pub role: UserRole,
}

fn default_user_id() -> String {
    DEFAULT_USER_ID.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip_through_from_label() {
        for menu in SupportMenu::ALL {
            assert_eq!(SupportMenu::from_label(menu.label()), Some(*menu));
        }
        for time in AvailableTime::ALL {
            assert_eq!(time.label().parse::<AvailableTime>().ok(), Some(*time));
        }
    }

    #[test]
    fn test_keys_are_accepted() {
        assert_eq!(ServiceType::from_label("spot"), Some(ServiceType::Spot));
        assert_eq!(ServiceType::from_label("BOTH"), Some(ServiceType::Both));
        assert_eq!(SupportMenu::from_label(" careplan "), Some(SupportMenu::CarePlanConsultation));
    }

    #[test]
    fn test_unknown_label() {
        assert_eq!(SupportMenu::from_label("散歩同行"), None);
        assert_eq!(
            "散歩同行".parse::<SupportMenu>(),
            Err(UnknownTag("散歩同行".to_string()))
        );
    }

    #[test]
    fn test_vocabulary_sizes() {
        assert_eq!(ServiceType::ALL.len(), 3);
        assert_eq!(SupportMenu::ALL.len(), 6);
        assert_eq!(AvailableTime::ALL.len(), 5);
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&ServiceType::FixedAssignee).unwrap();
        assert_eq!(json, "\"担当者固定型\"");

        let parsed: SupportMenu = serde_json::from_str("\"train\"").unwrap();
        assert_eq!(parsed, SupportMenu::TrainEscort);

        let role: UserRole = serde_json::from_str("\"家族\"").unwrap();
        assert_eq!(role, UserRole::Family);
        assert!(serde_json::from_str::<ServiceType>("\"訪問型\"").is_err());
    }

    #[test]
    fn test_serde_agrees_with_tag_labels() {
        for menu in SupportMenu::ALL {
            let json = serde_json::to_string(menu).unwrap();
            assert_eq!(json, format!("\"{}\"", menu.label()));

            let by_key: SupportMenu = serde_json::from_str(&format!("\"{}\"", menu.key())).unwrap();
            assert_eq!(by_key, *menu);
        }
        for time in AvailableTime::ALL {
            let json = serde_json::to_string(time).unwrap();
            assert_eq!(serde_json::from_str::<AvailableTime>(&json).unwrap(), *time);
        }
        for role in UserRole::ALL {
            assert_eq!(serde_json::to_string(role).unwrap(), format!("\"{}\"", role.label()));
        }
    }

    #[test]
    fn test_time_slots_keep_unlisted_windows() {
        let slots: Vec<TimeSlot> = serde_json::from_str(r#"["平日9-17時", "平日10-16時"]"#).unwrap();

        assert_eq!(slots[0], TimeSlot::Listed(AvailableTime::WeekdayDaytime));
        assert_eq!(slots[1], TimeSlot::Other("平日10-16時".to_string()));
        assert_eq!(
            serde_json::to_string(&slots).unwrap(),
            r#"["平日9-17時","平日10-16時"]"#
        );
    }

    #[test]
    fn test_match_record_carries_user() {
        let record = MatchRecord::new("3", "user-7");
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["coordinatorId"], "3");
        assert_eq!(json["userId"], "user-7");
        assert!(json["matchedAt"].is_string());
    }
}
