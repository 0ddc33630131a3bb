// Criterion benchmarks for the MentorLink engine

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mentorlink_engine::core::{GestureClassifier, GestureThresholds, MatchingSession};
use mentorlink_engine::models::{Candidate, Facet, FilterState, Role};

fn create_candidate(id: usize) -> Candidate {
    let industries = ["Technology", "Finance", "Healthcare", "Education"];
    let expertise = ["Leadership", "Systems", "Product", "Data"];

    Candidate {
        user_id: id.to_string(),
        name: format!("Mentor {}", id),
        title: "Staff Engineer".to_string(),
        company: "Acme".to_string(),
        bio: "Helps engineers navigate career growth".to_string(),
        role: Role::Mentor,
        industries: vec![industries[id % industries.len()].to_string()],
        expertise: vec![expertise[id % expertise.len()].to_string()],
        experience: "10+ years".to_string(),
        location: "Remote".to_string(),
        availability: if id % 3 == 0 { "Limited" } else { "Available" }.to_string(),
        is_active: true,
        created_at: None,
    }
}

fn bench_filter_predicate(c: &mut Criterion) {
    let mut filters = FilterState::default();
    filters.toggle(Facet::Industry, "Technology");
    filters.toggle(Facet::Expertise, "Leadership");
    filters.search_query = "career".to_string();

    let candidate = create_candidate(0);

    c.bench_function("filter_predicate", |b| {
        b.iter(|| filters.matches(black_box(&candidate)));
    });
}

fn bench_gesture_classification(c: &mut Criterion) {
    c.bench_function("gesture_classification", |b| {
        let mut classifier = GestureClassifier::new(GestureThresholds::default());
        b.iter(|| {
            classifier.on_start(black_box(200.0), black_box(300.0), black_box(1_000));
            classifier.on_move(black_box(150.0), black_box(300.0));
            classifier.on_end(black_box(110.0), black_box(300.0), black_box(1_400), false)
        });
    });
}

fn bench_filter_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_apply");

    for pool_size in [10, 50, 100, 500, 1000].iter() {
        let pool: Vec<Candidate> = (0..*pool_size).map(create_candidate).collect();

        let mut filters = FilterState::default();
        filters.toggle(Facet::Industry, "Technology");

        group.bench_with_input(BenchmarkId::from_parameter(pool_size), &pool, |b, pool| {
            b.iter(|| filters.apply(black_box(pool)));
        });
    }

    group.finish();
}

fn bench_session_swipe_through(c: &mut Criterion) {
    let pool: Vec<Candidate> = (0..100).map(create_candidate).collect();

    c.bench_function("session_swipe_through_100", |b| {
        b.iter(|| {
            let mut session = MatchingSession::new(
                "viewer".to_string(),
                Role::Mentor,
                pool.clone(),
                GestureThresholds::default(),
            );

            let mut t = 0;
            while !session.is_exhausted() {
                session.gesture_start(300.0, 200.0, t);
                if let Some((_, effect)) = session.gesture_end(200.0, 200.0, t + 400) {
                    if let mentorlink_engine::core::GestureEffect::Pass { seq, .. } = effect {
                        session.settle(seq);
                    }
                }
                t += 1_000;
            }
            session.position()
        });
    });
}

criterion_group!(
    benches,
    bench_filter_predicate,
    bench_gesture_classification,
    bench_filter_apply,
    bench_session_swipe_through
);
criterion_main!(benches);
