// Same data + same seeds => bit-identical weights; each seed, changed
// alone, moves them.
//
// The backend seed is process-global, so this lives in its own
// integration binary instead of next to the unit tests. Weights are
// compared as tensor values: the stored record also carries burn's
// per-parameter ids, which are fresh on every run.

use std::path::Path;

use burn::nn::Linear;
use surrogate_mlp::application::train_use_case::{TrainConfig, TrainUseCase};
use surrogate_mlp::data::{generator::generate_dataset, loader::save_csv};
use surrogate_mlp::infra::model_store::ModelStore;
use surrogate_mlp::ml::{seed::Seeds, CpuBackend};
use tempfile::tempdir;

fn linear_values(layer: &Linear<CpuBackend>) -> Vec<f32> {
    let mut v = layer.weight.val().into_data().to_vec::<f32>().unwrap();
    if let Some(bias) = &layer.bias {
        v.extend(bias.val().into_data().to_vec::<f32>().unwrap());
    }
    v
}

fn train(data: &Path, model: &Path, seeds: Seeds) -> Vec<Vec<f32>> {
    let cfg = TrainConfig {
        data_path: data.display().to_string(),
        output_path: model.display().to_string(),
        epochs: 20,
        batch_size: 16,
        seeds,
        ..Default::default()
    };
    TrainUseCase::new(cfg).execute().unwrap();

    let (net, _) = ModelStore::new(model).load::<CpuBackend>(&Default::default()).unwrap();
    let mut layers: Vec<Vec<f32>> = net.hidden.iter().map(linear_values).collect();
    layers.push(linear_values(&net.output));
    layers
}

#[test]
fn identical_seeds_give_identical_weights() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("data.csv");
    save_csv(&generate_dataset(64, 6, 2, 46).unwrap(), &data).unwrap();

    let first = train(&data, &dir.path().join("a.json"), Seeds::default());
    let second = train(&data, &dir.path().join("b.json"), Seeds::default());
    assert_eq!(first.len(), 2);
    assert_eq!(first, second);

    let backend = train(
        &data,
        &dir.path().join("c.json"),
        Seeds { backend: 63, ..Seeds::default() },
    );
    assert_ne!(first, backend, "backend seed had no effect");

    let numeric = train(
        &data,
        &dir.path().join("d.json"),
        Seeds { numeric: 999_999, ..Seeds::default() },
    );
    assert_ne!(first, numeric, "numeric seed had no effect");

    let hash = train(
        &data,
        &dir.path().join("e.json"),
        Seeds { hash: 7, ..Seeds::default() },
    );
    assert_ne!(first, hash, "hash seed had no effect");
}
