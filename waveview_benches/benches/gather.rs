// Copyright 2026 the Waveview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Size;
use waveview_gather::{GatherFrame, MonospaceMeasure, Palette, SegmentGatherer};
use waveview_render::RasterBuilder;
use waveview_signal::{Event, Level, Signal, SignalId, SignalOrder};
use waveview_viewport::Viewport;

/// A clock toggling every `period` ticks over `total` ticks.
fn clock(id: u32, period: u64, total: u64) -> Signal {
    let events: Vec<Event> = (0..total / period)
        .map(|i| Event::new(i * period, if i % 2 == 0 { Level::L } else { Level::H }))
        .collect();
    Signal::new(SignalId(id), format!("clk{id}"), events)
}

/// A bus counting up every `period` ticks.
fn counter(id: u32, period: u64, total: u64) -> Signal {
    let events: Vec<Event> = (0..total / period).map(|i| Event::new(i * period, i)).collect();
    Signal::new(SignalId(id), format!("count{id}"), events)
}

fn bench_gather_row(c: &mut Criterion) {
    let mut group = c.benchmark_group("gather/row");
    let total = 10_000_000;
    let mut view = Viewport::new(Size::new(1_600.0, 900.0));
    view.set_content(total, 1);
    // Scroll to the middle of the run so the left scan starts mid-list.
    view.set_scroll(view.scroll_max().0 / 2, 0);
    let (measure, palette) = (MonospaceMeasure::default(), Palette::default());
    let frame = GatherFrame::from_viewport(&view, true);
    let gatherer = SegmentGatherer::new(frame, &measure, &palette);
    let y_low = view.row_low_rail_y(0);

    for period in [10_000u64, 1_000, 100] {
        let events = total / period;
        group.throughput(Throughput::Elements(events));
        let signal = clock(0, period, total);
        group.bench_with_input(BenchmarkId::new("clock", events), &signal, |b, signal| {
            b.iter(|| black_box(gatherer.gather(signal, y_low, None)));
        });
        let signal = counter(1, period, total);
        group.bench_with_input(BenchmarkId::new("bus", events), &signal, |b, signal| {
            b.iter(|| black_box(gatherer.gather(signal, y_low, None)));
        });
    }
    group.finish();
}

fn bench_build_raster(c: &mut Criterion) {
    let mut group = c.benchmark_group("gather/raster");
    let total = 100_000;
    let (measure, palette) = (MonospaceMeasure::default(), Palette::default());

    // The displayed row count grows, the window does not.
    for rows in [64u32, 1_024, 16_384] {
        let order = SignalOrder::from_signals((0..rows).map(|i| {
            if i % 2 == 0 {
                clock(i, 1_000 + u64::from(i), total)
            } else {
                counter(i, 5_000, total)
            }
        }));
        let mut view = Viewport::new(Size::new(1_600.0, 900.0));
        view.set_content(total, order.displayed_len());
        group.bench_with_input(BenchmarkId::from_parameter(rows), &order, |b, order| {
            b.iter(|| black_box(RasterBuilder::new(&view, order, &measure, &palette).build()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_gather_row, bench_build_raster);
criterion_main!(benches);
