// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use std::time::Duration;
use understory_zoom::{ManualDriver, Zoomable};
use understory_zoom_geometry::{Offset, Size};

const CONTAINER: Size = Size::new(1080.0, 1656.0);
const CONTENT: Size = Size::new(551.0, 1038.0);

fn engine() -> Zoomable {
    let mut zoomable = Zoomable::new(ManualDriver::new());
    zoomable.set_container_size(CONTAINER).unwrap();
    zoomable.set_content_size(CONTENT).unwrap();
    zoomable
}

fn bench_gestures(c: &mut Criterion) {
    let mut group = c.benchmark_group("zoomable");
    let center = CONTAINER.center();

    // One pinch: 60 frames zooming in past the maximum, then the rollback.
    group.bench_function("pinch_and_rollback", |b| {
        b.iter_batched(
            engine,
            |mut zoomable| {
                for _ in 0..60 {
                    zoomable
                        .gesture_transform(center, Offset::new(1.5, -2.0), 1.08, 0.0)
                        .unwrap();
                }
                zoomable.end_gesture();
                while !zoomable.driver().is_idle() {
                    zoomable.advance_animations(Duration::from_millis(16));
                }
                black_box(zoomable.transform());
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("fling", |b| {
        b.iter_batched(
            || {
                let mut zoomable = engine();
                let medium = zoomable.medium_scale();
                zoomable.scale(medium, None, false).unwrap();
                zoomable
            },
            |mut zoomable| {
                zoomable.fling(Offset::new(-4_000.0, 2_500.0)).unwrap();
                while !zoomable.driver().is_idle() {
                    zoomable.advance_animations(Duration::from_millis(16));
                }
                black_box(zoomable.transform());
            },
            BatchSize::SmallInput,
        );
    });

    // Container resizes that restore the visible center.
    group.bench_function("resize_restore_center", |b| {
        let sizes = [
            Size::new(1656.0, 1080.0),
            Size::new(800.0, 800.0),
            Size::new(1200.0, 2000.0),
            CONTAINER,
        ];
        b.iter_batched(
            || {
                let mut zoomable = engine();
                let medium = zoomable.medium_scale();
                zoomable
                    .locate(Offset::new(200.0, 400.0), Some(medium), false)
                    .unwrap();
                zoomable
            },
            |mut zoomable| {
                for size in sizes {
                    zoomable.set_container_size(size).unwrap();
                }
                black_box(zoomable.transform());
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_gestures);
criterion_main!(benches);
