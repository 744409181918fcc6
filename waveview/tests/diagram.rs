// Copyright 2026 the Waveview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the diagram context: snapshot handoff, commands, and painting.

use std::fs;

use kurbo::{Point, Rect, Size};
use waveview::cursor::{Effect, InputEvent, PointerButton, ScrollTarget};
use waveview::render::{DisplayList, PaintOp, RebuildReason, SnapPolicy};
use waveview::signal::{BitRange, Event, FindFlags, Level, Signal, SignalId, Snapshot, SourceRef};
use waveview::{Command, CommandOutcome, Diagram, DiagramConfig, FindOutcome};

const WINDOW: Size = Size::new(800.0, 300.0);

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn named(names: &[&str]) -> Snapshot {
    let signals = names
        .iter()
        .zip(0..)
        .map(|(name, id)| Signal::new(SignalId(id), *name, vec![Event::new(0, Level::L)]))
        .collect();
    Snapshot::new(signals, 2_000, None).unwrap()
}

fn displayed(diagram: &Diagram) -> Vec<&str> {
    diagram.order().displayed_names().collect()
}

fn find(diagram: &mut Diagram, text: &str, from_top: bool) -> FindOutcome {
    diagram.find(text, FindFlags::empty(), from_top)
}

fn snap_markers(frame: &DisplayList) -> Vec<Rect> {
    frame
        .ops()
        .iter()
        .filter_map(|op| match op {
            PaintOp::StrokeRect { rect, .. } => Some(*rect),
            _ => None,
        })
        .collect()
}

#[test]
fn snapshot_handoff_restores_order_file_and_scroll() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("order.txt");
    fs::write(&path, "c\nmissing\na\n").unwrap();

    let names: Vec<String> = (0..60).map(|i| format!("s{i}")).collect();
    let mut all: Vec<&str> = vec!["a", "b", "c"];
    all.extend(names.iter().map(String::as_str));

    let config = DiagramConfig {
        order_file: Some(path),
        scroll_y: 5,
        ..DiagramConfig::default()
    };
    let mut diagram = Diagram::new(config, WINDOW);
    let report = diagram.load_snapshot(named(&all)).unwrap().unwrap();

    assert_eq!(report.matched, 2);
    assert_eq!(report.not_found, ["missing"]);
    assert_eq!(&displayed(&diagram)[..3], ["c", "a", "b"]);
    assert_eq!(diagram.viewport().scroll().1, 5);

    // The configured scroll applies to the first snapshot only.
    diagram.execute(&Command::ScrollTo(ScrollTarget::Top)).unwrap();
    diagram.load_snapshot(named(&all)).unwrap();
    assert_eq!(diagram.viewport().scroll().1, 0);
}

#[test]
fn cut_and_paste_move_rows_and_save_the_order() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("order.txt");
    let config = DiagramConfig {
        order_file: Some(path.clone()),
        ..DiagramConfig::default()
    };
    let mut diagram = Diagram::new(config, WINDOW);
    assert_eq!(diagram.load_snapshot(named(&["a", "b", "c", "d"])).unwrap(), None);

    assert_eq!(find(&mut diagram, "c", true), FindOutcome::Found(2));
    assert_eq!(diagram.execute(&Command::Cut).unwrap(), CommandOutcome::Redraw);
    assert_eq!(displayed(&diagram), ["a", "b", "d"]);
    assert_eq!(diagram.viewport().rows(), 3);

    find(&mut diagram, "a", true);
    assert_eq!(diagram.execute(&Command::Paste).unwrap(), CommandOutcome::Redraw);
    assert_eq!(displayed(&diagram), ["c", "a", "b", "d"]);
    assert_eq!(diagram.cursor().name_selection(), Some(0..1));

    assert_eq!(
        diagram.execute(&Command::SaveOrder).unwrap(),
        CommandOutcome::Unchanged
    );
    assert_eq!(fs::read_to_string(&path).unwrap(), "c\na\nb\nd\n");
}

#[test]
fn find_again_continues_after_the_cursor() {
    let mut diagram = Diagram::new(DiagramConfig::default(), WINDOW);
    diagram.load_snapshot(named(&["add0", "sub", "ADD1"])).unwrap();

    assert_eq!(find(&mut diagram, "add", true), FindOutcome::Found(0));
    assert_eq!(find(&mut diagram, "add", false), FindOutcome::Found(2));
    assert_eq!(find(&mut diagram, "add", false), FindOutcome::NotFound);
    assert_eq!(diagram.cursor().name_selection(), Some(0..0));

    let outcome = diagram.find("add", FindFlags::MATCH_CASE | FindFlags::WHOLE_WORD, true);
    assert_eq!(outcome, FindOutcome::NotFound);
}

#[test]
fn found_row_is_scrolled_into_view() {
    let names: Vec<String> = (0..60).map(|i| format!("s{i}")).collect();
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    let mut diagram = Diagram::new(DiagramConfig::default(), WINDOW);
    diagram.load_snapshot(named(&names)).unwrap();

    let outcome = diagram.find("s40", FindFlags::WHOLE_WORD, true);
    assert_eq!(outcome, FindOutcome::Found(40));
    assert!(diagram.viewport().scroll().1 > 0);
    assert!(diagram.viewport().visible_rows().contains(&40));
}

#[test]
fn paint_reuses_the_raster_until_the_view_changes() {
    init_logger();
    let mut diagram = Diagram::new(DiagramConfig::default(), WINDOW);
    diagram.load_snapshot(named(&["a", "b", "c"])).unwrap();

    let mut frame = DisplayList::new();
    diagram.paint(&mut frame);
    diagram.paint(&mut frame);
    assert_eq!(diagram.cache_stats().rebuilds, 1);
    assert_eq!(diagram.cache_stats().hits, 1);

    diagram.execute(&Command::ZoomIn).unwrap();
    diagram.paint(&mut frame);
    assert_eq!(diagram.cache_stats().last_reason, Some(RebuildReason::KeyChanged));

    find(&mut diagram, "b", true);
    diagram.execute(&Command::Cut).unwrap();
    diagram.paint(&mut frame);
    assert_eq!(diagram.cache_stats().last_reason, Some(RebuildReason::Invalidated));
    assert_eq!(diagram.cache_stats().rebuilds, 3);
}

fn clock_diagram(policy: SnapPolicy) -> Diagram {
    let config = DiagramConfig {
        snap_to_edge: true,
        snap_policy: policy,
        ..DiagramConfig::default()
    };
    let clk = Signal::new(
        SignalId(0),
        "clk",
        vec![
            Event::new(0, Level::L),
            Event::new(400, Level::H),
            Event::new(800, Level::L),
        ],
    );
    let mut diagram = Diagram::new(config, WINDOW);
    diagram
        .load_snapshot(Snapshot::new(vec![clk], 2_000, None).unwrap())
        .unwrap();
    diagram
}

#[test]
fn snap_marker_is_the_same_under_both_policies() {
    // Tick 380 on row 0, 20 ticks before the rising edge.
    let press = InputEvent::PointerDown {
        pos: Point::new(140.0 + 380.0 * 0.5, 21.0),
        button: PointerButton::Primary,
    };
    // Edge at x 340, halfway between the rails of row 0.
    let marker = Rect::new(337.0, 20.0, 343.0, 26.0);

    let mut rebuild = clock_diagram(SnapPolicy::RebuildEveryFrame);
    rebuild.handle_input(press);
    for _ in 0..2 {
        let mut frame = DisplayList::new();
        rebuild.paint(&mut frame);
        assert_eq!(snap_markers(&frame), [marker]);
    }
    assert_eq!(rebuild.cache_stats().rebuilds, 2);
    assert_eq!(rebuild.cache_stats().last_reason, Some(RebuildReason::SnapTracking));

    let mut reuse = clock_diagram(SnapPolicy::ReuseCache);
    reuse.handle_input(press);
    for _ in 0..2 {
        let mut frame = DisplayList::new();
        reuse.paint(&mut frame);
        assert_eq!(snap_markers(&frame), [marker]);
    }
    assert_eq!(reuse.cache_stats().rebuilds, 1);
    assert_eq!(reuse.cursor().pointer_tick(), Some(400));
}

#[test]
fn bus_expansion_selects_the_bits() {
    let bus = Signal::bus(
        SignalId(0),
        "data",
        vec![Event::new(0, 2_u64)],
        BitRange::new(1, 0),
    )
    .with_bit_signals([SignalId(1), SignalId(2)]);
    let bit = |id, name| Signal::new(SignalId(id), name, vec![Event::new(0, Level::L)]).hidden();
    let rst = Signal::new(SignalId(3), "rst", vec![Event::new(0, Level::H)]);
    let snapshot =
        Snapshot::new(vec![bus, bit(1, "data[1]"), bit(2, "data[0]"), rst], 100, None).unwrap();

    let mut diagram = Diagram::new(DiagramConfig::default(), WINDOW);
    diagram.load_snapshot(snapshot).unwrap();
    assert_eq!(displayed(&diagram), ["data", "rst"]);

    let effect = diagram.handle_input(InputEvent::PointerDown {
        pos: Point::new(20.0, 21.0),
        button: PointerButton::Secondary,
    });
    assert_eq!(effect, Some(Effect::ExpandBus { row: 0 }));
    assert_eq!(displayed(&diagram), ["data", "data[1]", "data[0]", "rst"]);
    assert_eq!(diagram.cursor().name_selection(), Some(1..3));
    assert_eq!(diagram.viewport().rows(), 4);
}

#[test]
fn double_click_reports_the_source_location() {
    let clk = Signal::new(SignalId(7), "clk", vec![Event::new(0, Level::L)])
        .with_source(SourceRef::new("top.v", 42));
    let mut diagram = Diagram::new(DiagramConfig::default(), WINDOW);
    diagram
        .load_snapshot(Snapshot::new(vec![clk], 100, None).unwrap())
        .unwrap();

    let effect = diagram.handle_input(InputEvent::DoubleClick {
        pos: Point::new(20.0, 21.0),
    });
    assert_eq!(
        effect,
        Some(Effect::GoToSource {
            row: 0,
            signal: SignalId(7),
        })
    );
    let source = diagram.order().get(SignalId(7)).and_then(Signal::source);
    assert_eq!(source, Some(&SourceRef::new("top.v", 42)));
}

#[test]
fn live_config_round_trips_through_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("waveview.toml");
    let mut diagram = Diagram::new(DiagramConfig::default(), WINDOW);
    diagram.load_snapshot(named(&["a"])).unwrap();
    diagram.execute(&Command::ZoomIn).unwrap();
    diagram.execute(&Command::ScrollTo(ScrollTarget::End)).unwrap();

    let config = diagram.config();
    assert_eq!(config.tick_width, 1.0);
    assert_eq!(config.scroll_x, diagram.viewport().scroll_max().0);

    config.save(&path).unwrap();
    assert_eq!(DiagramConfig::load(&path).unwrap(), config);
    assert_eq!(
        DiagramConfig::load(&dir.path().join("absent.toml")).unwrap(),
        DiagramConfig::default()
    );
}
