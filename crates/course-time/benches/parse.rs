use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use course_time::{check_schedule_conflict, parse_time_spec, ScheduleEntry};

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_24h", |b| {
        b.iter(|| parse_time_spec(black_box("Mon/Wed/Fri 10:00-11:30")))
    });
    c.bench_function("parse_12h", |b| {
        b.iter(|| parse_time_spec(black_box("Tue/Thu 2:00PM-3:15pm")))
    });
}

fn bench_check(c: &mut Criterion) {
    let schedule: Vec<ScheduleEntry> = (0..40)
        .map(|i| {
            let hour = 8 + i % 10;
            ScheduleEntry::new(
                format!("Course {}", i),
                Some(format!("Mon/Wed {:02}:00-{:02}:50", hour, hour).as_str()),
            )
        })
        .collect();
    let candidate = parse_time_spec("Fri 12:00-13:00");

    c.bench_function("check_40_clear", |b| {
        b.iter(|| check_schedule_conflict(black_box(candidate.as_ref()), black_box(&schedule)))
    });
}

criterion_group!(benches, bench_parse, bench_check);
criterion_main!(benches);
