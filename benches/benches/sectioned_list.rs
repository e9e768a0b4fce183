// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use understory_sectioned_list::{PositionManager, SectionCounts};

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }

    fn gen_range_usize(&mut self, upper_exclusive: usize) -> usize {
        if upper_exclusive == 0 {
            return 0;
        }
        (self.next_u32() as usize) % upper_exclusive
    }
}

/// Sections with 0..max_items items each; roughly one in `max_items` is empty.
fn random_counts(sections: usize, max_items: usize, seed: u64) -> SectionCounts {
    let mut rng = Lcg::new(seed);
    SectionCounts::new((0..sections).map(|_| rng.gen_range_usize(max_items)))
}

fn collapsed_manager(source: &SectionCounts, every: usize) -> PositionManager {
    let mut positions = PositionManager::new();
    positions.invalidate(source);
    for section in (0..source.counts().len()).step_by(every) {
        let _ = positions.collapse_section(section);
    }
    positions.invalidate(source);
    positions
}

fn bench_sectioned_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_sectioned_list");
    group.sample_size(50);

    for &(sections, max_items) in &[(16_usize, 64_usize), (1_024, 16), (16_384, 8)] {
        let source = random_counts(sections, max_items, 0x5EC7_0000_0000_0001);

        group.bench_function(
            format!("invalidate(s={sections},i={max_items})"),
            |b| {
                let mut positions = collapsed_manager(&source, 7);
                b.iter(|| black_box(positions.invalidate(&source)));
            },
        );

        let positions = collapsed_manager(&source, 7);
        let len = positions.len();

        group.bench_function(
            format!("relative_position_scan(s={sections},i={max_items})"),
            |b| {
                b.iter(|| {
                    let mut headers = 0_usize;
                    for position in 0..len {
                        if let Some(coord) = positions.relative_position(position) {
                            headers += usize::from(coord.is_header());
                        }
                    }
                    black_box(headers);
                });
            },
        );

        group.bench_function(
            format!("absolute_position_random(s={sections},i={max_items})"),
            |b| {
                let mut rng = Lcg::new(0x5EC7_0000_0000_0002);
                b.iter(|| {
                    let section = rng.gen_range_usize(sections);
                    let relative = rng.gen_range_usize(max_items);
                    black_box(positions.absolute_position(section, relative));
                });
            },
        );

        group.bench_function(
            format!("section_header_index_all(s={sections},i={max_items})"),
            |b| {
                b.iter(|| {
                    let visible = (0..sections)
                        .filter_map(|section| positions.section_header_index(section))
                        .count();
                    black_box(visible);
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_sectioned_list);
criterion_main!(benches);
