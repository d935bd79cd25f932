use serde::{Deserialize, Serialize};

use crate::models::{ServiceType, SupportMenu, SwipeDirection, UserRole};

/// Badge palette used on cards and the settings screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeColor {
    Blue,
    Green,
    Orange,
}

impl BadgeColor {
    pub fn css_classes(self) -> &'static str {
        match self {
            Self::Blue => "bg-blue-100 text-blue-800",
            Self::Green => "bg-green-100 text-green-800",
            Self::Orange => "bg-orange-100 text-orange-800",
        }
    }
}

pub fn service_type_badge(service_type: ServiceType) -> BadgeColor {
    match service_type {
        ServiceType::Spot => BadgeColor::Blue,
        ServiceType::FixedAssignee => BadgeColor::Green,
        ServiceType::Both => BadgeColor::Orange,
    }
}

pub fn support_menu_glyph(menu: SupportMenu) -> &'static str {
    match menu {
        SupportMenu::Shopping => "🛒",
        SupportMenu::TrainEscort => "🚃",
        SupportMenu::OutingEscort => "🚶‍♀️",
        SupportMenu::OneOffConsultation => "💬",
        SupportMenu::OngoingConsultation => "📋",
        SupportMenu::CarePlanConsultation => "📝",
    }
}

pub fn user_role_badge(role: UserRole) -> BadgeColor {
    match role {
        UserRole::CareRecipient => BadgeColor::Blue,
        UserRole::Family => BadgeColor::Green,
    }
}

/// Label shown while a drag hints at a direction
pub fn swipe_hint_label(direction: SwipeDirection) -> &'static str {
    match direction {
        SwipeDirection::Right => "👍 マッチング申請",
        SwipeDirection::Left => "👎 スキップ",
    }
}
