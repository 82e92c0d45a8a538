use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use polysql::{Dialect, Expr, PlaceholderScheme, compile, finalize_with, join, raw, sql, tuple};

/// SELECT col0, col1, ... FROM t WHERE col0 = ? AND col1 = ? ...
fn build_select(n: usize) -> Expr {
    let columns = join(", ", (0..n).map(|i| sql(format!("col{i}"))));
    let filters = join(
        " AND ",
        (0..n).map(|i| raw(format!("col{i} = ?"), [i as i64])),
    );
    compile("SELECT ? FROM t WHERE ?", [columns, filters])
}

/// INSERT INTO t (a, b, c) VALUES (?, ?, ?), ... with `rows` tuples.
fn build_insert(rows: usize) -> Expr {
    compile(
        "INSERT INTO t (a, b, c) VALUES ?",
        [join(
            ", ",
            (0..rows).map(|i| tuple([i as i64, i as i64 + 1, i as i64 + 2])),
        )],
    )
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("finalize/render");
    let dialect = Dialect::new("postgres");

    for n in [1, 5, 10, 50, 100] {
        let expr = build_select(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &expr, |b, expr| {
            b.iter(|| black_box(expr.render(&dialect).unwrap()));
        });
    }

    group.finish();
}

fn bench_finalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("finalize/positional");
    let dialect = Dialect::new("postgres");
    let scheme = PlaceholderScheme::parse("$%d").unwrap();

    for n in [1, 5, 10, 50, 100] {
        let expr = build_select(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &expr, |b, expr| {
            b.iter(|| black_box(finalize_with(&scheme, &dialect, expr).unwrap()));
        });
    }

    group.finish();
}

fn bench_insert_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("finalize/insert_rows");
    let dialect = Dialect::new("sqlite");
    let scheme = PlaceholderScheme::parse("?").unwrap();

    for rows in [5, 20, 100, 500] {
        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, &rows| {
            b.iter(|| {
                let expr = build_insert(rows);
                black_box(finalize_with(&scheme, &dialect, &expr).unwrap());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_render, bench_finalize, bench_insert_rows);
criterion_main!(benches);
