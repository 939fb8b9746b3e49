// Run with:  cargo bench --bench full_refresh

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use embedded_graphics::pixelcolor::RgbColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle};
use hub75_scan::config::Config;
use hub75_scan::framebuffer::FrameBuffer;
use hub75_scan::hub75::{Hub75, Outputs};
use hub75_scan::Color;
use std::convert::Infallible;
use std::hint::black_box;
use std::time::Duration;

/// Port that throws the levels away.
struct NullPort;

impl Outputs for NullPort {
    type Error = Infallible;

    fn write(&mut self, levels: u16) -> Result<(), Infallible> {
        black_box(levels);
        Ok(())
    }

    fn write_address(&mut self, levels: u16) -> Result<(), Infallible> {
        black_box(levels);
        Ok(())
    }
}

fn configure_criterion() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(10))
        .warm_up_time(Duration::from_secs(3))
        .confidence_level(0.95)
        .significance_level(0.05)
}

fn full_refresh(c: &mut Criterion) {
    let ticks = hub75_scan::refresh_period_ticks();
    let mut group = c.benchmark_group("full_refresh");
    group.throughput(Throughput::Elements(u64::from(ticks)));

    group.bench_function("framebuffer_refresh", |b| {
        let mut fb = FrameBuffer::new();
        Circle::new(Point::new(8, 8), 48)
            .into_styled(PrimitiveStyle::with_fill(Color::new(200, 90, 30)))
            .draw(&mut fb)
            .unwrap();
        fb.set_pixel(Point::new(0, 0), Color::WHITE);
        let mut hub75 = Hub75::new(NullPort, fb, Config::default());

        b.iter(|| {
            black_box(&mut hub75).run(ticks).unwrap();
        });
    });

    group.finish();
}

criterion_group!(name = benches; config = configure_criterion(); targets = full_refresh);
criterion_main!(benches);
