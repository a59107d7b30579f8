// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use understory_zoom::{
    Alignment, FitMode, LayoutDirection, OffsetPolicy, Placement, ScaleBounds, ScalesPolicy,
};
use understory_zoom_geometry::{Rotation, Size};

const CONTAINER: Size = Size::new(1080.0, 1656.0);

fn grid(content: Size) -> Vec<Placement> {
    let mut placements = Vec::new();
    for fit_mode in FitMode::ALL {
        for alignment in Alignment::ALL {
            for rotation in Rotation::ALL {
                for direction in [LayoutDirection::Ltr, LayoutDirection::Rtl] {
                    placements.push(
                        Placement::new(CONTAINER, content)
                            .with_fit_mode(fit_mode)
                            .with_alignment(alignment)
                            .with_rotation(rotation)
                            .with_layout_direction(direction),
                    );
                }
            }
        }
    }
    placements
}

fn bench_base_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement/grid");

    // 7 fit modes x 9 alignments x 4 rotations x 2 directions per iteration.
    for (name, content) in [
        ("portrait", Size::new(551.0, 1038.0)),
        ("long", Size::new(1000.0, 10_000.0)),
        ("wide", Size::new(7_500.0, 232.0)),
    ] {
        let placements = grid(content);
        group.bench_with_input(
            BenchmarkId::new("base_transform", name),
            &placements,
            |b, placements| {
                b.iter(|| {
                    for placement in placements {
                        black_box(placement.base_transform());
                        black_box(placement.base_display_rect());
                    }
                });
            },
        );
        group.bench_with_input(
            BenchmarkId::new("scale_bounds", name),
            &placements,
            |b, placements| {
                b.iter(|| {
                    for placement in placements {
                        black_box(ScaleBounds::calculate(
                            ScalesPolicy::DYNAMIC,
                            placement,
                            Size::ZERO,
                            placement.fit_scale(),
                        ));
                    }
                });
            },
        );
        group.bench_with_input(
            BenchmarkId::new("offset_bounds", name),
            &placements,
            |b, placements| {
                let policy = OffsetPolicy::default();
                b.iter(|| {
                    for placement in placements {
                        black_box(policy.user_offset_bounds(placement, 3.0));
                    }
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_base_transform);
criterion_main!(benches);
