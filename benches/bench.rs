// Criterion benchmarks for Orange Connect

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use orange_connect::core::{filter_catalog, GestureInterpreter, PointerEvent, SwipeSession};
use orange_connect::models::{
    AvailableTime, CoordinatorRecord, FilterCriteria, ServiceType, SupportMenu, SwipeDirection, Tag,
};
use orange_connect::services::CoordinatorDirectory;
use std::collections::HashSet;
use std::sync::Arc;

fn create_coordinator(id: usize) -> CoordinatorRecord {
    let menus = SupportMenu::ALL;
    let times = AvailableTime::ALL;

    CoordinatorRecord {
        id: id.to_string(),
        name: format!("Coordinator {}", id),
        age: 25 + (id % 40) as u8,
        avatar: "🧑‍⚕️".to_string(),
        hobbies: vec![],
        service_type: ServiceType::ALL[id % ServiceType::ALL.len()],
        support_menus: vec![menus[id % menus.len()], menus[(id / 3) % menus.len()]],
        available_times: vec![times[id % times.len()].into()],
        experience: String::new(),
        description: String::new(),
        location: String::new(),
    }
}

fn create_criteria() -> FilterCriteria {
    FilterCriteria::none()
        .with_service_types([ServiceType::Spot, ServiceType::Both])
        .with_support_menus([SupportMenu::Shopping, SupportMenu::OutingEscort])
        .with_available_times([AvailableTime::WeekdayDaytime, AvailableTime::Holidays])
}

fn bench_filter_catalog(c: &mut Criterion) {
    let criteria = create_criteria();
    let mut group = c.benchmark_group("filter_catalog");

    for catalog_size in [6, 100, 1000, 10000].iter() {
        let catalog: Vec<CoordinatorRecord> = (0..*catalog_size).map(create_coordinator).collect();
        let decided: HashSet<String> = (0..*catalog_size)
            .step_by(4)
            .map(|i| i.to_string())
            .collect();

        group.bench_with_input(
            BenchmarkId::new("filter", catalog_size),
            catalog_size,
            |b, _| {
                b.iter(|| {
                    filter_catalog(
                        black_box(&catalog),
                        black_box(&decided),
                        black_box(&criteria),
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_swipe_through_catalog(c: &mut Criterion) {
    let records = (0..500).map(create_coordinator).collect();
    let directory = Arc::new(CoordinatorDirectory::new(records).unwrap());

    c.bench_function("swipe_through_500_coordinators", |b| {
        b.iter(|| {
            let mut session = SwipeSession::new(directory.clone());
            let mut direction = SwipeDirection::Left;
            while session.decide_current(direction).is_ok() {
                direction = match direction {
                    SwipeDirection::Left => SwipeDirection::Right,
                    SwipeDirection::Right => SwipeDirection::Left,
                };
            }
            black_box(session.matches().len())
        });
    });
}

fn bench_gesture(c: &mut Criterion) {
    c.bench_function("gesture_drag_sequence", |b| {
        let mut interpreter = GestureInterpreter::default();
        b.iter(|| {
            interpreter.handle(PointerEvent::Down { x: 0.0 });
            for step in 1..=20 {
                interpreter.handle(PointerEvent::Move { x: black_box(step as f64 * 8.0) });
            }
            black_box(interpreter.handle(PointerEvent::Up))
        });
    });
}

criterion_group!(benches, bench_filter_catalog, bench_swipe_through_catalog, bench_gesture);

criterion_main!(benches);
