use criterion::{black_box, criterion_group, criterion_main, Criterion};
use feature_engine::FeatureTable;
use inference_engine::{FittedPipeline, PredictionService};
use ndarray::{Array1, Array2};
use sensor_schema::{sensor_columns, SensorReading, SENSOR_COUNT};

fn service() -> PredictionService {
    let x = Array2::from_shape_fn((256, SENSOR_COUNT), |(r, c)| {
        let v = ((r * SENSOR_COUNT + c + 1) as f64 * 12.9898).sin() * 43758.5453;
        v - v.floor()
    });
    let y: Array1<f64> = x.rows().into_iter().map(|row| 200.0 - 150.0 * row[3]).collect();
    let table = FeatureTable::new(sensor_columns(), x).expect("table");
    PredictionService::from_pipeline(FittedPipeline::fit(&table, y.view()).expect("fit"))
}

fn bench_predict(c: &mut Criterion) {
    let service = service();
    let reading = SensorReading::from_values([0.4; SENSOR_COUNT]).expect("reading");

    c.bench_function("predict_single_reading", |b| {
        b.iter(|| service.predict(black_box(&reading)))
    });
}

criterion_group!(benches, bench_predict);
criterion_main!(benches);
