use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::cell::RefCell;
use std::hint::black_box;
use std::rc::Rc;

use chrono::Utc;
use ecoshop::store::{CartLine, Snapshot};
use ecoshop::view::{render_app, ViewContext, ViewOptions};
use ecoshop::{App, AppConfig, Catalog, Route, StateKey, Store, WriterSurface};

fn store_read_benchmark(c: &mut Criterion) {
    let store = Store::new();
    store.write(StateKey::SearchQuery, "bamboo").unwrap();

    c.bench_function("store_read", |b| {
        b.iter(|| {
            black_box(store.read(black_box(StateKey::SearchQuery)));
        });
    });
}

fn store_write_benchmark(c: &mut Criterion) {
    let store = Store::new();

    c.bench_function("store_write", |b| {
        let mut flag = false;
        b.iter(|| {
            store.write(StateKey::ShowCart, black_box(flag)).unwrap();
            flag = !flag;
        });
    });
}

fn store_subscribe_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_write_fanout");

    for subscriber_count in [1, 10, 100].iter() {
        let store = Store::new();

        for _ in 0..*subscriber_count {
            store.subscribe(StateKey::ShowCart, |_| {
                // Empty subscriber
                Ok(())
            });
        }

        group.bench_with_input(
            BenchmarkId::from_parameter(subscriber_count),
            subscriber_count,
            |b, _| {
                let mut flag = false;
                b.iter(|| {
                    store.write(StateKey::ShowCart, black_box(flag)).unwrap();
                    flag = !flag;
                });
            },
        );
    }
    group.finish();
}

fn render_benchmark(c: &mut Criterion) {
    let catalog = Catalog::builtin();
    let mut group = c.benchmark_group("render_app");

    for route in Route::ALL {
        let state = Snapshot {
            route,
            cart: vec![CartLine::new("p1", 2), CartLine::new("p2", 1)],
            show_cart: true,
            ..Snapshot::default()
        };

        group.bench_with_input(BenchmarkId::from_parameter(route), &state, |b, state| {
            b.iter(|| {
                let ctx = ViewContext {
                    state,
                    catalog: &catalog,
                    options: ViewOptions::default(),
                    now: Utc::now(),
                };
                black_box(render_app(&ctx).unwrap());
            });
        });
    }
    group.finish();
}

fn navigation_benchmark(c: &mut Criterion) {
    let surface = Rc::new(RefCell::new(WriterSurface::new(std::io::sink(), false)));
    let app = App::new(&AppConfig::default(), surface).unwrap();

    c.bench_function("navigate_and_render", |b| {
        let mut i = 0;
        b.iter(|| {
            app.navigate(Route::ALL[i % Route::ALL.len()]).unwrap();
            i += 1;
        });
    });
}

criterion_group!(
    benches,
    store_read_benchmark,
    store_write_benchmark,
    store_subscribe_benchmark,
    render_benchmark,
    navigation_benchmark,
);
criterion_main!(benches);
