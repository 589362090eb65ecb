use century::{
    AirTemperature, Century, FrameStore, HourWindow, MemoryStore, Observation,
};
use chrono::Duration;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;

fn synthetic_observations(stations: usize) -> Vec<Observation> {
    let window = HourWindow::from_ymd_h(1978, 10, 1, 10).unwrap();
    (0..stations * 4)
        .map(|i| Observation {
            ts: window.start() + Duration::minutes((i % 60) as i64),
            st: format!("st{:05}", i % stations),
            position: Some(json!({
                "type": "Point",
                "coordinates": [(i % 360) as f64 - 180.0, (i % 180) as f64 - 90.0]
            })),
            air_temperature: Some(AirTemperature {
                value: Some((i % 40) as f64),
                quality: Some(if i % 7 == 0 { "2" } else { "1" }.to_string()),
            }),
        })
        .collect()
}

fn bench_stations(c: &mut Criterion) {
    let window = HourWindow::from_ymd_h(1978, 10, 1, 10).unwrap();
    let observations = synthetic_observations(2_000);
    let memory_store = MemoryStore::from_documents(observations.clone());
    let frame_store = FrameStore::from_observations(&observations).unwrap();

    c.bench_function("stations_memory_store", |b| {
        b.iter(|| {
            Century::without_triangles(&memory_store)
                .stations()
                .window(black_box(window))
                .icon_href("temps.png")
                .call()
        })
    });
    c.bench_function("stations_frame_store", |b| {
        b.iter(|| {
            Century::without_triangles(&frame_store)
                .stations()
                .window(black_box(window))
                .icon_href("temps.png")
                .call()
        })
    });
}

criterion_group!(benches, bench_stations);
criterion_main!(benches);
