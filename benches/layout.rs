//! Line layout and hit-testing benchmarks.

#![allow(clippy::semicolon_if_nothing_returned)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use textedit::layout::{
    Font, LayoutEngine, LayoutParams, LayoutStrategy, MonospaceMeasurer, WrapMode, layout_line,
};
use textedit::{Direction, Editor, Point, Rect, TextBuffer};

const LATIN: &str = "The quick brown fox jumps over the lazy dog, again and again. ";
const MIXED: &str = "Order שלום עולם 123 then مرحبا بالعالم and back again. ";

fn params(mode: WrapMode, width: u32) -> LayoutParams {
    LayoutParams {
        strategy: LayoutStrategy::from_wrap(mode),
        wrap_width: width,
        ..LayoutParams::default()
    }
}

fn single_line(c: &mut Criterion) {
    let measurer = MonospaceMeasurer::default();
    let font = Font::default();
    let mut group = c.benchmark_group("layout_line");

    for (name, sample) in [("latin", LATIN), ("mixed_bidi", MIXED)] {
        let text = sample.repeat(8);
        for mode in [WrapMode::None, WrapMode::Char, WrapMode::Word] {
            let p = params(mode, 320);
            group.bench_with_input(
                BenchmarkId::new(name, format!("{mode:?}")),
                &text,
                |b, text| b.iter(|| layout_line(black_box(text), &p, &measurer, &font)),
            );
        }
    }

    let rtl = LayoutParams {
        direction: Direction::Rtl,
        ..params(WrapMode::Word, 320)
    };
    let text = MIXED.repeat(8);
    group.bench_function("mixed_bidi_rtl_base", |b| {
        b.iter(|| layout_line(black_box(&text), &rtl, &measurer, &font))
    });

    group.finish();
}

fn document(c: &mut Criterion) {
    let text: String = (0..2_000)
        .map(|i| if i % 3 == 0 { MIXED } else { LATIN })
        .collect::<Vec<_>>()
        .join("\n");
    let buffer = TextBuffer::with_text(&text);
    let mut group = c.benchmark_group("layout_document");

    group.bench_function("total_rows_cold_2k_lines", |b| {
        b.iter(|| {
            let mut engine = LayoutEngine::default();
            engine.set_wrap_mode(WrapMode::Word);
            engine.set_wrap_width(240);
            black_box(engine.total_rows(&buffer))
        })
    });

    let mut warm = LayoutEngine::default();
    warm.set_wrap_mode(WrapMode::Word);
    warm.set_wrap_width(240);
    warm.total_rows(&buffer);
    group.bench_function("total_rows_cached_2k_lines", |b| {
        b.iter(|| black_box(warm.total_rows(&buffer)))
    });

    group.bench_function("row_at_middle", |b| {
        b.iter(|| black_box(warm.row_at(&buffer, black_box(2_500))))
    });

    group.finish();
}

fn hit_testing(c: &mut Criterion) {
    let text = MIXED.repeat(4);
    let mut editor = Editor::new(Rect::new(0, 0, 646, 406));
    editor.set_text(&[text.as_str(); 40].join("\n"));
    editor.set_wrap(WrapMode::Word);

    c.bench_function("hit_test_grid", |b| {
        b.iter(|| {
            for y in (0..400).step_by(16) {
                for x in (0..640).step_by(40) {
                    black_box(editor.hit_test(Point::new(x, y)));
                }
            }
        })
    });

    let long = layout_line(
        &MIXED.repeat(400),
        &LayoutParams::default(),
        &MonospaceMeasurer::default(),
        &Font::default(),
    );
    let right = i32::try_from(long.width()).unwrap_or(i32::MAX);
    c.bench_function("hit_col_long_line", |b| {
        b.iter(|| black_box(long.hit_col(0, black_box(right / 2))))
    });
}

criterion_group!(benches, single_line, document, hit_testing);
criterion_main!(benches);
