use std::collections::HashSet;

use crate::models::{CoordinatorRecord, FilterCriteria};

/// Check whether a coordinator belongs in the visible queue
///
/// Decided coordinators never come back; every set criteria dimension
/// must match.
#[inline]
pub fn is_visible(
    record: &CoordinatorRecord,
    decided: &HashSet<String>,
    criteria: &FilterCriteria,
) -> bool {
    !decided.contains(&record.id) && criteria.matches(record)
}

/// Catalog positions of the visible coordinators, in catalog order
pub fn queue_positions(
    catalog: &[CoordinatorRecord],
    decided: &HashSet<String>,
    criteria: &FilterCriteria,
) -> Vec<usize> {
    catalog
        .iter()
        .enumerate()
        .filter(|(_, record)| is_visible(record, decided, criteria))
        .map(|(position, _)| position)
        .collect()
}

/// Ordered subsequence of the catalog still to be shown
pub fn filter_catalog<'a>(
    catalog: &'a [CoordinatorRecord],
    decided: &HashSet<String>,
    criteria: &FilterCriteria,
) -> Vec<&'a CoordinatorRecord> {
    catalog
        .iter()
        .filter(|record| is_visible(record, decided, criteria))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AvailableTime, Criterion, ServiceType, SupportMenu, Tag, TimeSlot};

    fn create_test_record(
        id: &str,
        service_type: ServiceType,
        menus: &[SupportMenu],
        times: &[AvailableTime],
    ) -> CoordinatorRecord {
        CoordinatorRecord {
            id: id.to_string(),
            name: format!("Coordinator {}", id),
            age: 40,
            avatar: "🧑".to_string(),
            hobbies: vec![],
            service_type,
            support_menus: menus.to_vec(),
            available_times: times.iter().map(|&t| t.into()).collect(),
            experience: String::new(),
            description: String::new(),
            location: String::new(),
        }
    }

    fn ids(records: &[&CoordinatorRecord]) -> Vec<String> {
        records.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_service_type_is_exact_membership() {
        let catalog = vec![
            create_test_record("1", ServiceType::Spot, &[], &[]),
            create_test_record("2", ServiceType::Both, &[], &[]),
            create_test_record("3", ServiceType::FixedAssignee, &[], &[]),
        ];
        let criteria = FilterCriteria::none()
            .with_service_types([ServiceType::Spot, ServiceType::FixedAssignee]);

        let visible = filter_catalog(&catalog, &HashSet::new(), &criteria);

        assert_eq!(ids(&visible), vec!["1", "3"]);
    }

    #[test]
    fn test_available_time_needs_one_overlap() {
        let catalog = vec![
            create_test_record("1", ServiceType::Spot, &[], &[AvailableTime::WeekdayDaytime]),
            create_test_record(
                "2",
                ServiceType::Spot,
                &[],
                &[AvailableTime::WeekdayEvening, AvailableTime::Holidays],
            ),
            create_test_record("3", ServiceType::Spot, &[], &[]),
        ];
        let criteria = FilterCriteria::none()
            .with_available_times([AvailableTime::Holidays, AvailableTime::SaturdayDaytime]);

        let visible = filter_catalog(&catalog, &HashSet::new(), &criteria);

        assert_eq!(ids(&visible), vec!["2"]);
    }

    #[test]
    fn test_unlisted_time_window_never_selected() {
        let mut record = create_test_record("1", ServiceType::Spot, &[], &[]);
        record.available_times = vec![TimeSlot::from("平日10-16時")];
        let catalog = vec![record];

        for time in AvailableTime::ALL {
            let criteria = FilterCriteria::none().with_available_times([*time]);
            assert!(filter_catalog(&catalog, &HashSet::new(), &criteria).is_empty());
        }
        assert_eq!(filter_catalog(&catalog, &HashSet::new(), &FilterCriteria::none()).len(), 1);
    }

    #[test]
    fn test_all_dimensions_must_match() {
        let catalog = vec![
            create_test_record(
                "1",
                ServiceType::Spot,
                &[SupportMenu::Shopping],
                &[AvailableTime::Holidays],
            ),
            create_test_record(
                "2",
                ServiceType::Both,
                &[SupportMenu::Shopping],
                &[AvailableTime::Holidays],
            ),
        ];
        let criteria = FilterCriteria::none()
            .with_service_types([ServiceType::Both])
            .with_support_menus([SupportMenu::Shopping]);

        let visible = filter_catalog(&catalog, &HashSet::new(), &criteria);

        assert_eq!(ids(&visible), vec!["2"]);
    }

    #[test]
    fn test_decided_are_excluded() {
        let catalog = vec![
            create_test_record("1", ServiceType::Spot, &[], &[]),
            create_test_record("2", ServiceType::Spot, &[], &[]),
        ];
        let decided: HashSet<String> = ["1".to_string()].into_iter().collect();

        assert_eq!(queue_positions(&catalog, &decided, &FilterCriteria::none()), vec![1]);
    }

    #[test]
    fn test_unknown_service_type_label_matches_nothing() {
        let catalog = vec![create_test_record("1", ServiceType::Spot, &[], &[])];
        let criteria = FilterCriteria {
            service_types: Criterion::from_labels(["訪問型"]),
            ..FilterCriteria::none()
        };

        assert!(filter_catalog(&catalog, &HashSet::new(), &criteria).is_empty());
    }
}
