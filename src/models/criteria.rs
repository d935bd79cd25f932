use std::collections::BTreeSet;

use super::domain::{AvailableTime, CoordinatorRecord, ServiceType, SupportMenu, Tag};
use super::responses::FilterSummary;

/// One filter dimension.
///
/// Unset (both sets empty) imposes no constraint. Labels outside the
/// vocabulary are kept so that a dimension made only of unknown labels
/// matches nothing instead of silently becoming unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criterion<T: Tag> {
    wanted: BTreeSet<T>,
    unrecognized: Vec<String>,
}

impl<T: Tag> Default for Criterion<T> {
    fn default() -> Self {
        Self::any()
    }
}

impl<T: Tag> Criterion<T> {
    /// No constraint on this dimension
    pub fn any() -> Self {
        Self {
            wanted: BTreeSet::new(),
            unrecognized: Vec::new(),
        }
    }

    pub fn of<I: IntoIterator<Item = T>>(tags: I) -> Self {
        Self {
            wanted: tags.into_iter().collect(),
            unrecognized: Vec::new(),
        }
    }

    /// Build from raw labels or keys. Blank entries are ignored.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut criterion = Self::any();
        for label in labels {
            let label = label.as_ref().trim();
            if label.is_empty() {
                continue;
            }
            match T::from_label(label) {
                Some(tag) => {
                    criterion.wanted.insert(tag);
                }
                None => {
                    if !criterion.unrecognized.iter().any(|l| l == label) {
                        criterion.unrecognized.push(label.to_string());
                    }
                }
            }
        }
        criterion
    }

    pub fn is_set(&self) -> bool {
        !self.wanted.is_empty() || !self.unrecognized.is_empty()
    }

    pub fn wanted(&self) -> impl Iterator<Item = T> + '_ {
        self.wanted.iter().copied()
    }

    pub fn unrecognized(&self) -> &[String] {
        &self.unrecognized
    }

    /// Single-valued attribute: exact membership
    #[inline]
    pub fn accepts(&self, value: T) -> bool {
        !self.is_set() || self.wanted.contains(&value)
    }

    /// Multi-valued attribute: at least one requested tag present
    #[inline]
    pub fn accepts_any<I: IntoIterator<Item = T>>(&self, values: I) -> bool {
        !self.is_set() || values.into_iter().any(|value| self.wanted.contains(&value))
    }

    /// Selected labels in vocabulary order, unknown labels last
    pub fn labels(&self) -> Vec<String> {
        self.wanted
            .iter()
            .map(|tag| tag.label().to_string())
            .chain(self.unrecognized.iter().cloned())
            .collect()
    }
}

/// User-selected constraints on the coordinator queue
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub service_types: Criterion<ServiceType>,
    pub support_menus: Criterion<SupportMenu>,
    pub available_times: Criterion<AvailableTime>,
}

impl FilterCriteria {
    /// All dimensions unset
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_service_types<I: IntoIterator<Item = ServiceType>>(mut self, tags: I) -> Self {
        self.service_types = Criterion::of(tags);
        self
    }

    pub fn with_support_menus<I: IntoIterator<Item = SupportMenu>>(mut self, tags: I) -> Self {
        self.support_menus = Criterion::of(tags);
        self
    }

    pub fn with_available_times<I: IntoIterator<Item = AvailableTime>>(mut self, tags: I) -> Self {
        self.available_times = Criterion::of(tags);
        self
    }

    pub fn is_active(&self) -> bool {
        self.service_types.is_set() || self.support_menus.is_set() || self.available_times.is_set()
    }

    /// Whether a record satisfies every set dimension
    #[inline]
    pub fn matches(&self, record: &CoordinatorRecord) -> bool {
        self.service_types.accepts(record.service_type)
            && self.support_menus.accepts_any(record.support_menus.iter().copied())
            && self.available_times.accepts_any(record.listed_times())
    }

    pub fn summary(&self) -> FilterSummary {
        FilterSummary {
            service_types: self.service_types.labels(),
            support_menus: self.support_menus.labels(),
            available_times: self.available_times.labels(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_criterion_accepts_everything() {
        let criterion: Criterion<SupportMenu> = Criterion::any();
        assert!(!criterion.is_set());
        assert!(criterion.accepts_any([]));
        assert!(criterion.accepts(SupportMenu::Shopping));
    }

    #[test]
    fn test_from_labels_keeps_unknown_labels() {
        let criterion: Criterion<SupportMenu> =
            Criterion::from_labels(["買い物支援", "散歩同行", "", "散歩同行"]);

        assert!(criterion.is_set());
        assert_eq!(criterion.wanted().collect::<Vec<_>>(), vec![SupportMenu::Shopping]);
        assert_eq!(criterion.unrecognized(), &["散歩同行".to_string()]);
    }

    #[test]
    fn test_only_unknown_labels_match_nothing() {
        let criterion: Criterion<AvailableTime> = Criterion::from_labels(["深夜"]);
        assert!(!criterion.accepts_any(AvailableTime::ALL.iter().copied()));
    }

    #[test]
    fn test_blank_labels_leave_dimension_unset() {
        let criterion: Criterion<ServiceType> = Criterion::from_labels(["  ", ""]);
        assert!(!criterion.is_set());
    }

    #[test]
    fn test_labels_follow_vocabulary_order() {
        let criterion = Criterion::of([SupportMenu::CarePlanConsultation, SupportMenu::Shopping]);
        assert_eq!(criterion.labels(), vec!["買い物支援", "ケアプラン相談"]);
    }

    #[test]
    fn test_is_active() {
        assert!(!FilterCriteria::none().is_active());
        assert!(FilterCriteria::none()
            .with_service_types([ServiceType::Spot])
            .is_active());
    }
}
