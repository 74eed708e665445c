//! Performance benchmarks for mapping inference.
//!
//! Workloads are generated: wide types with many fields, units with many
//! functions, and conversion-heavy types where every field needs a converter
//! or element mapping.
//!
//! ## Profiling with Puffin
//!
//! Run with the `profile-with-puffin` feature to collect per-phase timings:
//!
//! ```bash
//! cargo bench --features profile-with-puffin -- "mapping/wide" --test
//! ```

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use kewt::{FunctionDecl, MapperContext, MapperUnitDecl, TypeRef, TypeSchema};
use std::hint::black_box;

#[cfg(feature = "profile-with-puffin")]
use std::collections::HashMap;

#[cfg(feature = "profile-with-puffin")]
static FRAME_VIEW: std::sync::OnceLock<puffin::GlobalFrameView> = std::sync::OnceLock::new();

#[cfg(feature = "profile-with-puffin")]
fn setup_profiler() {
    puffin::set_scopes_on(true);
    FRAME_VIEW.get_or_init(puffin::GlobalFrameView::default);
}

#[cfg(not(feature = "profile-with-puffin"))]
fn setup_profiler() {}

#[cfg(feature = "profile-with-puffin")]
fn end_profiling_frame() {
    puffin::GlobalProfiler::lock().new_frame();
}

#[cfg(not(feature = "profile-with-puffin"))]
fn end_profiling_frame() {}

#[cfg(feature = "profile-with-puffin")]
fn collect_scopes_recursive(
    stream: &puffin::Stream,
    scope: &puffin::Scope,
    scope_collection: &puffin::ScopeCollection,
    scope_timings: &mut HashMap<String, i64>,
) {
    use puffin::Reader;

    if let Some(details) = scope_collection.fetch_by_id(&scope.id) {
        *scope_timings.entry(details.name().to_string()).or_insert(0) +=
            scope.record.duration_ns;
    }

    if scope.child_begin_position < scope.child_end_position
        && let Ok(reader) = Reader::with_offset(stream, scope.child_begin_position)
        && let Ok(children) = reader.read_top_scopes()
    {
        for child in children {
            collect_scopes_recursive(stream, &child, scope_collection, scope_timings);
        }
    }
}

#[cfg(feature = "profile-with-puffin")]
fn print_profiling_stats() {
    use puffin::Reader;

    let Some(frame_view) = FRAME_VIEW.get() else {
        println!("Profiler not initialized");
        return;
    };

    let view = frame_view.lock();
    let scope_collection = view.scope_collection();
    let mut scope_timings: HashMap<String, i64> = HashMap::new();
    let mut frame_count = 0i64;

    for frame in view.recent_frames() {
        frame_count += 1;
        let Ok(unpacked) = frame.unpacked() else {
            continue;
        };
        for (_thread_info, stream_info) in unpacked.thread_streams.iter() {
            let reader = Reader::from_start(&stream_info.stream);
            if let Ok(scopes) = reader.read_top_scopes() {
                for scope in scopes {
                    collect_scopes_recursive(
                        &stream_info.stream,
                        &scope,
                        scope_collection,
                        &mut scope_timings,
                    );
                }
            }
        }
    }

    println!("\n=== Profiling Summary ({frame_count} frames) ===");
    if scope_timings.is_empty() {
        println!("  No scopes recorded. Build with the profiling feature.");
    } else {
        let mut entries: Vec<_> = scope_timings.into_iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        for (name, ns) in entries {
            let avg_ns = ns / frame_count.max(1);
            println!(
                "  {:40} {:>10.2?} avg",
                name,
                std::time::Duration::from_nanos(avg_ns as u64)
            );
        }
    }
    println!("=====================================\n");
}

#[cfg(not(feature = "profile-with-puffin"))]
fn print_profiling_stats() {}

fn string() -> TypeRef {
    TypeRef::new("kotlin.String")
}

fn uuid() -> TypeRef {
    TypeRef::new("java.util.UUID")
}

fn list(element: TypeRef) -> TypeRef {
    TypeRef::new("kotlin.collections.List").with_params(vec![element])
}

/// Source and target types with `width` same-named fields, plus a unit
/// mapping one into the other.
///
/// Every third target field is renamed so that it has to be matched by
/// type. Every fifth of the remaining fields needs a converter.
fn wide_workload(width: usize) -> (MapperContext, MapperUnitDecl) {
    let mut source = TypeSchema::new();
    let mut target = TypeSchema::new();
    for i in 0..width {
        let (source_ty, target_ty) = if i % 5 == 0 && i % 3 != 0 {
            (uuid(), string())
        } else {
            // Distinct leaf types keep type matching unambiguous.
            let ty = TypeRef::new(&format!("com.bench.Leaf{i}"));
            (ty.clone(), ty)
        };
        source = source.property(format!("field{i}"), source_ty);
        let target_name = if i % 3 == 0 {
            format!("renamed{i}")
        } else {
            format!("field{i}")
        };
        target = target.property(target_name, target_ty);
    }

    let mut ctx = MapperContext::default();
    ctx.register_type("com.bench.Source", source)
        .expect("register source");
    ctx.register_type("com.bench.Target", target)
        .expect("register target");
    ctx.seal();

    let unit = MapperUnitDecl::new("com.bench.WideMapper")
        .function(
            FunctionDecl::new("map", TypeRef::new("com.bench.Target"))
                .param("source", TypeRef::new("com.bench.Source")),
        )
        .function(
            FunctionDecl::new("uuidToString", string())
                .param("uuid", uuid())
                .concrete(),
        );
    (ctx, unit)
}

/// A unit with `count` independent functions over small types.
fn many_functions_workload(count: usize) -> (MapperContext, MapperUnitDecl) {
    let mut ctx = MapperContext::default();
    let mut unit = MapperUnitDecl::new("com.bench.ManyMapper");
    for i in 0..count {
        let from = format!("com.bench.From{i}");
        let to = format!("com.bench.To{i}");
        ctx.register_type(
            &from,
            TypeSchema::new()
                .property("id", uuid())
                .property("name", string())
                .property("tags", list(string())),
        )
        .expect("register source");
        ctx.register_type(
            &to,
            TypeSchema::new()
                .property("id", uuid())
                .property("title", string())
                .property("tags", list(string())),
        )
        .expect("register target");
        unit = unit.function(
            FunctionDecl::new(format!("map{i}"), TypeRef::new(&to)).param("from", TypeRef::new(&from)),
        );
    }
    ctx.seal();
    (ctx, unit)
}

/// Collections of convertible elements, nullable or not.
fn conversion_workload(width: usize) -> (MapperContext, MapperUnitDecl) {
    let mut source = TypeSchema::new();
    let mut target = TypeSchema::new();
    for i in 0..width {
        if i % 2 == 0 {
            source = source.property(format!("ids{i}"), list(uuid()));
            target = target.property(format!("ids{i}"), list(string()));
        } else {
            source = source.property(format!("id{i}"), uuid().nullable());
            target = target.property(format!("id{i}"), string().nullable());
        }
    }

    let mut ctx = MapperContext::default();
    ctx.register_type("com.bench.Source", source)
        .expect("register source");
    ctx.register_type("com.bench.Target", target)
        .expect("register target");
    ctx.seal();

    let unit = MapperUnitDecl::new("com.bench.ConvertingMapper")
        .function(
            FunctionDecl::new("map", TypeRef::new("com.bench.Target"))
                .param("source", TypeRef::new("com.bench.Source")),
        )
        .function(
            FunctionDecl::new("uuidToString", string())
                .param("uuid", uuid())
                .concrete(),
        );
    (ctx, unit)
}

fn run(ctx: &MapperContext, unit: &MapperUnitDecl) -> usize {
    let outcome = ctx.process_unit(black_box(unit)).expect("sealed context");
    let report = outcome.report().expect("unit not skipped");
    assert!(report.is_success(), "failures: {:?}", report.failures);
    report.mapped.iter().map(|f| f.mappings.len()).sum()
}

/// Benchmark inference across type widths.
fn wide_type_benchmarks(c: &mut Criterion) {
    setup_profiler();

    let mut group = c.benchmark_group("mapping/wide");
    for width in [10, 50, 200] {
        let (ctx, unit) = wide_workload(width);
        group.throughput(Throughput::Elements(width as u64));
        group.bench_with_input(BenchmarkId::new("wide", width), &width, |b, _| {
            b.iter(|| {
                let count = run(&ctx, &unit);
                end_profiling_frame();
                black_box(count)
            });
        });
    }
    group.finish();

    print_profiling_stats();
}

/// Benchmark units with many small functions.
fn many_function_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("mapping/functions");
    for count in [10, 100] {
        let (ctx, unit) = many_functions_workload(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("functions", count), &count, |b, _| {
            b.iter(|| black_box(run(&ctx, &unit)));
        });
    }
    group.finish();
}

/// Benchmark converter, unwrap and element-mapping lookups.
fn conversion_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("mapping/conversions");
    for width in [10, 100] {
        let (ctx, unit) = conversion_workload(width);
        group.throughput(Throughput::Elements(width as u64));
        group.bench_with_input(BenchmarkId::new("convert", width), &width, |b, _| {
            b.iter(|| black_box(run(&ctx, &unit)));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    wide_type_benchmarks,
    many_function_benchmarks,
    conversion_benchmarks
);
criterion_main!(benches);
