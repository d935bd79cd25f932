use serde::{Deserialize, Serialize};
use validator::Validate;

use super::criteria::{Criterion, FilterCriteria};
use super::domain::UserRole;

/// Filter panel submission. Labels are free text; anything outside the
/// vocabularies simply matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ApplyFilterRequest {
    #[validate(length(max = 32))]
    #[serde(default, alias = "service_type", rename = "serviceType")]
    pub service_types: Vec<String>,
    #[validate(length(max = 32))]
    #[serde(default, alias = "support_menus", rename = "supportMenus")]
    pub support_menus: Vec<String>,
    #[validate(length(max = 32))]
    #[serde(default, alias = "available_times", rename = "availableTimes")]
    pub available_times: Vec<String>,
}

impl ApplyFilterRequest {
    pub fn to_criteria(&self) -> FilterCriteria {
        FilterCriteria {
            service_types: Criterion::from_labels(&self.service_types),
            support_menus: Criterion::from_labels(&self.support_menus),
            available_times: Criterion::from_labels(&self.available_times),
        }
    }
}

/// Settings form submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct UpdateSettingsRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    pub role: UserRole,
}

impl UpdateSettingsRequest {
    /// Copy with surrounding whitespace removed from the name
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            role: self.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::{ServiceType, SupportMenu};

    #[test]
    fn test_filter_request_from_json() {
        let req: ApplyFilterRequest = serde_json::from_str(
            r#"{"serviceType": ["スポット型"], "supportMenus": ["買い物支援", "train"]}"#,
        )
        .unwrap();

        assert!(req.validate().is_ok());
        let criteria = req.to_criteria();
        assert_eq!(criteria.service_types.wanted().collect::<Vec<_>>(), vec![ServiceType::Spot]);
        assert_eq!(
            criteria.support_menus.wanted().collect::<Vec<_>>(),
            vec![SupportMenu::Shopping, SupportMenu::TrainEscort]
        );
        assert!(!criteria.available_times.is_set());
    }

    #[test]
    fn test_empty_filter_request_is_no_constraint() {
        let req = ApplyFilterRequest::default();
        assert!(!req.to_criteria().is_active());
    }

    #[test]
    fn test_settings_name_required() {
        let req = UpdateSettingsRequest {
            name: "   ".to_string(),
            role: UserRole::Family,
        }
        .normalized();

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_settings_name_too_long() {
        let req = UpdateSettingsRequest {
            name: "あ".repeat(51),
            role: UserRole::CareRecipient,
        };

        assert!(req.validate().is_err());
    }
}
