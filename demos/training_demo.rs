//! Training Demo - Synthetic Sentiment Task
//!
//! Trains a QRNN classifier on random "embeddings" whose label is the sign of
//! the first feature at the final token. Run with `RUST_LOG=info` to see the
//! step and eval reports.

use burn::backend::{Autodiff, NdArray};
use burn::tensor::backend::Backend as BurnBackend;
use burn::tensor::{Distribution, Int, Tensor};
use qrnn::prelude::*;

type Backend = NdArray<f32>;
type TrainBackend = Autodiff<Backend>;

const INP_DIM: usize = 16;
const SEQ_LEN: usize = 12;
const BATCH_SIZE: usize = 8;

fn synthetic_batch<B: BurnBackend>(device: &B::Device) -> Batch<B> {
    let inputs = Tensor::<B, 3>::random(
        [BATCH_SIZE, SEQ_LEN, INP_DIM],
        Distribution::Uniform(-1.0, 1.0),
        device,
    );
    let last_first_feature = inputs
        .clone()
        .narrow(1, SEQ_LEN - 1, 1)
        .narrow(2, 0, 1)
        .reshape([BATCH_SIZE]);
    let labels: Tensor<B, 1, Int> = last_first_feature.greater_elem(0.0).int();
    Batch::new(inputs, labels)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("qrnn=info".parse().expect("valid directive")),
        )
        .init();

    let device = Default::default();

    let train: Vec<Batch<TrainBackend>> = (0..32).map(|_| synthetic_batch(&device)).collect();
    let eval: Vec<Batch<Backend>> = (0..8).map(|_| synthetic_batch(&device)).collect();

    let model = QrnnConfig::new(INP_DIM, 32, 2, 64, 2)
        .with_kernel_size(2)
        .with_dropout_rate(0.1)
        .init::<TrainBackend>(&device)?;

    let config = TrainingConfig::new()
        .with_training_steps(400)
        .with_statistics_interval_steps(50)
        .with_eval_interval_steps(100);

    let outcome = Trainer::new(config)?.fit(model, &train, &eval)?;

    println!("Finished {} steps over {} epochs", outcome.steps, outcome.epoch + 1);
    if let Some(last) = outcome.eval_reports.last() {
        println!("Final eval accuracy: {:.3}", last.accuracy);
    }
    Ok(())
}
