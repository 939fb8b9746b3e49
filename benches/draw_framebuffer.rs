// Run with:  cargo bench --bench draw_framebuffer

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use embedded_graphics::pixelcolor::RgbColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use hub75_scan::framebuffer::FrameBuffer;
use hub75_scan::{Color, COLUMNS, ROWS};
use std::hint::black_box;
use std::time::Duration;

// Number of iterations to target ~1-5ms per measurement
const ITERATIONS: usize = 100;

fn configure_criterion() -> Criterion {
    Criterion::default()
        .sample_size(100)
        .measurement_time(Duration::from_secs(10)) // Longer measurement time
        .warm_up_time(Duration::from_secs(3))
        .confidence_level(0.95)
        .significance_level(0.05)
}

fn draw_framebuffer(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw_framebuffer");
    group.throughput(Throughput::Elements((ROWS * COLUMNS * ITERATIONS) as u64));

    group.bench_function("set_pixel", |b| {
        let mut fb = FrameBuffer::new();

        b.iter(|| {
            for _ in 0..ITERATIONS {
                for y in 0..ROWS {
                    for x in 0..COLUMNS {
                        black_box(&mut fb).set_pixel(
                            black_box(Point::new(x as i32, y as i32)),
                            black_box(Color::RED),
                        );
                    }
                }
            }
        });
    });

    group.bench_function("fill_rect", |b| {
        let mut fb = FrameBuffer::new();
        let rect = Rectangle::new(Point::zero(), Size::new(COLUMNS as u32, ROWS as u32))
            .into_styled(PrimitiveStyle::with_fill(Color::BLUE));

        b.iter(|| {
            for _ in 0..ITERATIONS {
                rect.draw(black_box(&mut fb)).unwrap();
            }
        });
    });

    group.finish();
}

criterion_group!(name = benches; config = configure_criterion(); targets = draw_framebuffer);
criterion_main!(benches);
