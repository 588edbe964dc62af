//! Scroll performance benchmarks.
//!
//! Measures a single line scroll plus redraw at several depths of a large
//! trail, and the cost of the first (unwindowed) layout.
//!
//! Run with: cargo bench --bench scroll_benchmark

#![allow(missing_docs)] // criterion macros generate undocumented items

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use crumbtrail::source::{InputSource, LoadedTrail, StdinSource};
use crumbtrail::view::{CliArgs, TuiApp};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::io::{Cursor, Read};

const TRAIL_LEN: usize = 20_000;

/// Scroll position in the trail.
#[derive(Debug, Clone, Copy)]
enum ScrollPosition {
    Start,
    Middle,
    End,
}

impl ScrollPosition {
    fn name(&self) -> &'static str {
        match self {
            ScrollPosition::Start => "start",
            ScrollPosition::Middle => "middle",
            ScrollPosition::End => "end",
        }
    }
}

/// Synthetic trail mixing short rows with rows that wrap.
fn trail_text(n: usize) -> String {
    (0..n)
        .map(|i| {
            let message = if i % 17 == 0 {
                "request failed after retry, giving up on upstream ".repeat(3)
            } else {
                format!("clicked button #{i}")
            };
            format!(
                r#"{{"type":"{}","category":"ui.click","message":"{}","level":"info","timestamp":{}}}"#,
                if i % 5 == 0 { "http" } else { "ui" },
                message,
                1_700_000_000 + i
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn load(text: &str) -> (InputSource, LoadedTrail) {
    let reader: Box<dyn Read + Send> = Box::new(Cursor::new(text.as_bytes().to_vec()));
    let mut source = InputSource::Stdin(StdinSource::from_reader(reader));
    let trail = source.load().unwrap();
    (source, trail)
}

fn new_app(text: &str) -> TuiApp<TestBackend> {
    let (source, trail) = load(text);
    let terminal = Terminal::new(TestBackend::new(160, 50)).unwrap();
    TuiApp::with_terminal(terminal, source, trail, CliArgs::default())
}

/// Benchmark single line scroll + redraw once the list is virtualized.
fn benchmark_line_scroll_down(c: &mut Criterion) {
    let text = trail_text(TRAIL_LEN);
    let mut group = c.benchmark_group("line_scroll_down");

    for position in [ScrollPosition::Start, ScrollPosition::Middle, ScrollPosition::End] {
        group.bench_with_input(
            BenchmarkId::new("position", position.name()),
            &position,
            |b, &pos| {
                b.iter_batched(
                    || {
                        // SETUP (outside timing): build, settle, move to position
                        let mut app = new_app(&text);
                        app.draw().unwrap();
                        match pos {
                            ScrollPosition::Start => {}
                            ScrollPosition::Middle => {
                                for _ in 0..TRAIL_LEN / 100 {
                                    app.handle_key(KeyEvent::new(KeyCode::PageDown, KeyModifiers::NONE));
                                }
                            }
                            ScrollPosition::End => {
                                app.handle_key(KeyEvent::new(KeyCode::End, KeyModifiers::NONE));
                            }
                        }
                        app.draw().unwrap();
                        app
                    },
                    |mut app| {
                        app.handle_key(KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE));
                        app.draw().unwrap();
                        black_box(app.terminal().backend().buffer().clone())
                    },
                    BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
}

/// Benchmark the first draw, which lays out every row to probe widths.
fn benchmark_first_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("first_layout");
    group.sample_size(10);

    for len in [1_000usize, 5_000, TRAIL_LEN] {
        let text = trail_text(len);
        group.bench_with_input(BenchmarkId::new("rows", len), &text, |b, text| {
            b.iter_batched(
                || new_app(text),
                |mut app| {
                    app.draw().unwrap();
                    black_box(app.controller().total_height())
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

/// Benchmark switching the time format, which invalidates every measurement.
fn benchmark_time_format_switch(c: &mut Criterion) {
    let text = trail_text(TRAIL_LEN);
    c.bench_function("time_format_switch", |b| {
        b.iter_batched(
            || {
                let mut app = new_app(&text);
                app.draw().unwrap();
                app
            },
            |mut app| {
                app.handle_key(KeyEvent::new(KeyCode::Char('t'), KeyModifiers::NONE));
                app.draw().unwrap();
                black_box(app.time_mode())
            },
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(
    benches,
    benchmark_line_scroll_down,
    benchmark_first_layout,
    benchmark_time_format_switch
);
criterion_main!(benches);
