//! End-to-end conversion throughput benchmarks
//!
//! Measures note conversion with varying stroke counts, split into:
//! - full conversion (zip + plist + geometry + markup)
//! - markup rendering alone
//!
//! Run benchmarks: `cargo bench --bench conversion_throughput`
//!
//! Compare parallel path building:
//! ```
//! cargo bench --bench conversion_throughput --features parallel-render
//! ```

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use noteink::PipelineBuilder;
use noteink::core::blob::encode;
use noteink::core::extract_drawing;
use noteink::plist::{Dictionary, DocumentValue, to_bytes};
use rand::prelude::*;
use rand::rngs::StdRng;
use std::io::{Cursor, Write};
use zip::ZipWriter;
use zip::write::FileOptions;

const POINTS_PER_STROKE: usize = 40;

/// Generate a session document with `strokes` random strokes
fn generate_session(strokes: usize) -> DocumentValue {
    let mut rng = StdRng::from_seed(Default::default());
    let points: Vec<f32> = (0..strokes * POINTS_PER_STROKE * 2)
        .map(|_| rng.random_range(0.0..800.0))
        .collect();
    let counts = vec![POINTS_PER_STROKE as i32; strokes];
    let widths: Vec<f32> = (0..strokes).map(|_| rng.random_range(0.5..4.0)).collect();

    let mut curves = Dictionary::new();
    curves.insert("curvespoints".into(), DocumentValue::Data(encode(&points)));
    curves.insert("curvesnumpoints".into(), DocumentValue::Data(encode(&counts)));
    curves.insert("curveswidth".into(), DocumentValue::Data(encode(&widths)));

    let mut root = Dictionary::new();
    root.insert(
        "$objects".into(),
        DocumentValue::Array(vec![DocumentValue::from("$null"), DocumentValue::Dictionary(curves)]),
    );
    DocumentValue::Dictionary(root)
}

fn generate_note(session: &DocumentValue) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("Note/Session.plist", FileOptions::default())
        .expect("Failed to start zip entry");
    writer
        .write_all(&to_bytes(session))
        .expect("Failed to write zip entry");
    writer.finish().expect("Failed to finish zip").into_inner()
}

/// Benchmark full conversion with varying stroke counts
fn benchmark_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("conversion_throughput");
    let pipeline = PipelineBuilder::new().build().expect("Failed to build pipeline");

    for strokes in [10, 100, 1000] {
        group.throughput(Throughput::Elements(strokes as u64));
        let note = generate_note(&generate_session(strokes));

        group.bench_with_input(BenchmarkId::new("strokes", strokes), &note, |b, note| {
            b.iter(|| {
                pipeline
                    .convert_bytes(note.clone())
                    .expect("Conversion failed")
            });
        });
    }
    group.finish();
}

/// Benchmark markup rendering on pre-assembled geometry
fn benchmark_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_markup");
    let pipeline = PipelineBuilder::new().build().expect("Failed to build pipeline");

    for strokes in [100, 1000] {
        group.throughput(Throughput::Elements(strokes as u64));
        let drawing = extract_drawing(&generate_session(strokes)).expect("Invalid geometry");

        group.bench_with_input(BenchmarkId::new("strokes", strokes), &drawing, |b, drawing| {
            b.iter(|| pipeline.render(drawing).expect("Render failed"));
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_conversion, benchmark_render);
criterion_main!(benches);
