use std::collections::HashMap;
use thiserror::Error;

use crate::models::{CoordinatorRecord, ServiceType, SupportMenu, TimeSlot};

/// Errors raised while building a catalog
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Duplicate coordinator id: {0}")]
    DuplicateId(String),

    #[error("Coordinator at position {0} has an empty id")]
    EmptyId(usize),
}

/// Immutable, ordered coordinator catalog
///
/// Built once at start-up and shared read-only. Ids are unique.
#[derive(Debug, Clone)]
pub struct CoordinatorDirectory {
    records: Vec<CoordinatorRecord>,
    positions: HashMap<String, usize>,
}

impl CoordinatorDirectory {
    /// Build a catalog, rejecting empty or repeated ids
    pub fn new(records: Vec<CoordinatorRecord>) -> Result<Self, CatalogError> {
        let mut positions = HashMap::with_capacity(records.len());

        for (position, record) in records.iter().enumerate() {
            if record.id.trim().is_empty() {
                return Err(CatalogError::EmptyId(position));
            }
            if positions.insert(record.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateId(record.id.clone()));
            }
        }

        tracing::debug!("Coordinator directory built with {} records", records.len());

        Ok(Self { records, positions })
    }

    /// The compiled-in catalog
    pub fn builtin() -> Self {
        let records = builtin_records();
        let positions = records
            .iter()
            .enumerate()
            .map(|(position, record)| (record.id.clone(), position))
            .collect();

        Self { records, positions }
    }

    pub fn records(&self) -> &[CoordinatorRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CoordinatorRecord> {
        self.position_of(id).map(|position| &self.records[position])
    }

    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    pub fn at(&self, position: usize) -> Option<&CoordinatorRecord> {
        self.records.get(position)
    }
}

#[allow(clippy::too_many_arguments)]
fn coordinator(
    id: &str,
    name: &str,
    age: u8,
    avatar: &str,
    hobbies: [&str; 3],
    service_type: ServiceType,
    support_menus: &[SupportMenu],
    available_times: &[&str],
    experience: &str,
    description: &str,
    location: &str,
) -> CoordinatorRecord {
    CoordinatorRecord {
        id: id.to_string(),
        name: name.to_string(),
        age,
        avatar: avatar.to_string(),
        hobbies: hobbies.iter().map(|h| h.to_string()).collect(),
        service_type,
        support_menus: support_menus.to_vec(),
        available_times: available_times.iter().map(|&t| TimeSlot::from(t)).collect(),
        experience: experience.to_string(),
        description: description.to_string(),
        location: location.to_string(),
    }
}

fn builtin_records() -> Vec<CoordinatorRecord> {
    use SupportMenu::*;

    vec![
        coordinator(
            "1",
            "田中 さやか",
            34,
            "👩‍⚕️",
            ["読書", "ヨガ", "カフェ巡り"],
            ServiceType::Both,
            &[Shopping, OutingEscort, OngoingConsultation, CarePlanConsultation],
            &["平日9-17時", "土曜9-15時"],
            "介護福祉士 8年",
            "認知症ケアの専門家として、お一人お一人に寄り添った支援を心がけています。",
            "東京都渋谷区",
        ),
        coordinator(
            "2",
            "佐藤 健太",
            28,
            "👨‍💼",
            ["スポーツ観戦", "料理", "音楽"],
            ServiceType::Spot,
            &[TrainEscort, OneOffConsultation, Shopping],
            &["平日18-21時", "休日10-18時"],
            "ソーシャルワーカー 5年",
            "仕事帰りや休日の急な相談にも対応可能です。気軽にお声かけください。",
            "東京都新宿区",
        ),
        coordinator(
            "3",
            "山田 美智子",
            45,
            "👩‍🏫",
            ["ガーデニング", "映画鑑賞", "お菓子作り"],
            ServiceType::FixedAssignee,
            &[OngoingConsultation, CarePlanConsultation, OutingEscort],
            &["平日10-16時"],
            "ケアマネジャー 12年",
            "長期的なサポートを通じて、ご本人とご家族の生活の質向上をお手伝いします。",
            "東京都世田谷区",
        ),
        coordinator(
            "4",
            "鈴木 太郎",
            39,
            "👨‍⚕️",
            ["ランニング", "写真", "温泉巡り"],
            ServiceType::Both,
            &[OneOffConsultation, OngoingConsultation, Shopping, TrainEscort],
            &["平日14-20時", "土日祝10-16時"],
            "作業療法士 10年",
            "リハビリの専門知識を活かし、日常生活の自立をサポートします。",
            "東京都品川区",
        ),
        coordinator(
            "5",
            "高橋 ゆかり",
            31,
            "👩‍💼",
            ["旅行", "ボランティア", "手芸"],
            ServiceType::Spot,
            &[OutingEscort, Shopping, OneOffConsultation],
            &["平日9-15時", "土曜9-12時"],
            "精神保健福祉士 6年",
            "心理的なサポートも含めて、安心してお過ごしいただけるよう支援します。",
            "東京都杉並区",
        ),
        coordinator(
            "6",
            "中村 隆",
            52,
            "👨‍🎓",
            ["将棋", "読書", "散歩"],
            ServiceType::FixedAssignee,
            &[CarePlanConsultation, OngoingConsultation, OutingEscort],
            &["平日9-17時"],
            "社会福祉士 20年",
            "豊富な経験を活かし、包括的な支援プランを提案いたします。",
            "東京都練馬区",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AvailableTime;

    fn record(id: &str) -> CoordinatorRecord {
        coordinator(
            id,
            "テスト",
            30,
            "🙂",
            ["a", "b", "c"],
            ServiceType::Spot,
            &[SupportMenu::Shopping],
            &["休日10-18時"],
            "",
            "",
            "",
        )
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let builtin = CoordinatorDirectory::builtin();
        let validated = CoordinatorDirectory::new(builtin.records().to_vec()).unwrap();

        assert_eq!(validated.len(), 6);
        assert_eq!(builtin.get("3").map(|c| c.name.as_str()), Some("山田 美智子"));
        assert_eq!(builtin.position_of("6"), Some(5));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err =
            CoordinatorDirectory::new(vec![record("a"), record("b"), record("a")]).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateId("a".to_string()));
    }

    #[test]
    fn test_empty_id_rejected() {
        let err = CoordinatorDirectory::new(vec![record("a"), record(" ")]).unwrap_err();
        assert_eq!(err, CatalogError::EmptyId(1));
    }

    #[test]
    fn test_builtin_times_outside_vocabulary_are_kept() {
        let directory = CoordinatorDirectory::builtin();
        let labels = |id: &str| -> Vec<String> {
            directory.get(id).unwrap().available_times.iter().map(|t| t.to_string()).collect()
        };

        assert_eq!(labels("3"), vec!["平日10-16時"]);
        assert_eq!(labels("5"), vec!["平日9-15時", "土曜9-12時"]);
        assert_eq!(directory.get("5").unwrap().listed_times().count(), 0);
        assert_eq!(
            directory.get("4").unwrap().listed_times().collect::<Vec<_>>(),
            vec![AvailableTime::WeekendAndHolidays]
        );
    }

    #[test]
    fn test_unknown_id_lookup() {
        let directory = CoordinatorDirectory::builtin();
        assert!(directory.get("99").is_none());
        assert!(directory.at(6).is_none());
    }
}
