//! Integration tests for the training loop and its statistics

use burn::backend::{Autodiff, NdArray};
use burn::tensor::backend::Backend as BurnBackend;
use burn::tensor::{Int, Tensor};
use qrnn::models::{CbowConfig, QrnnConfig};
use qrnn::training::{accuracy, evaluate, Batch, TrailingStats, Trainer, TrainingConfig};

type Backend = NdArray<f32>;
type TrainBackend = Autodiff<Backend>;

/// Positive sequences are all +1, negative ones all -1
fn separable_batch<B: BurnBackend>(device: &B::Device) -> Batch<B> {
    let positive = Tensor::<B, 3>::ones([2, 4, 3], device);
    let negative = positive.clone().neg();
    let inputs = Tensor::cat(vec![positive, negative], 0);
    let labels = Tensor::<B, 1, Int>::from_ints([1, 1, 0, 0], device);
    Batch::new(inputs, labels)
}

#[test]
fn test_trailing_stats_update() {
    let mut stats = TrailingStats::new(0.9);

    stats.update(1.0, 2.0);
    assert!((stats.accuracy() - 0.1).abs() < 1e-12);
    assert!((stats.time_per_token() - 0.2).abs() < 1e-12);

    stats.update(1.0, 2.0);
    assert!((stats.accuracy() - 0.19).abs() < 1e-12);
    assert!((stats.time_per_token() - 0.38).abs() < 1e-12);
}

#[test]
fn test_accuracy_from_logits() {
    let device = Default::default();
    let logits = Tensor::<Backend, 2>::from_floats([[2.0, 1.0], [0.0, 3.0], [5.0, -1.0]], &device);
    let labels = Tensor::<Backend, 1, Int>::from_ints([0, 1, 1], &device);

    let acc = accuracy(logits, labels).unwrap();
    assert!((acc - 2.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_accuracy_label_mismatch() {
    let device = Default::default();
    let logits = Tensor::<Backend, 2>::zeros([3, 2], &device);
    let labels = Tensor::<Backend, 1, Int>::from_ints([0, 1], &device);

    assert!(accuracy(logits, labels).unwrap_err().is_shape());
}

#[test]
fn test_trainer_config_validation() {
    assert!(Trainer::new(TrainingConfig::new().with_training_steps(0)).is_err());
    assert!(Trainer::new(TrainingConfig::new().with_eval_interval_steps(0)).is_err());
    assert!(Trainer::new(TrainingConfig::new().with_trailing_decay(1.0)).is_err());
    assert!(Trainer::new(TrainingConfig::new()).is_ok());
}

#[test]
fn test_trainer_requires_batches() {
    let device = Default::default();
    let model = CbowConfig::new(3, 8, 2).init::<TrainBackend>(&device).unwrap();
    let trainer = Trainer::new(TrainingConfig::new().with_training_steps(5)).unwrap();

    let err = trainer.fit::<TrainBackend, _>(model, &[], &[]).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn test_evaluate_requires_batches() {
    let device = Default::default();
    let model = CbowConfig::new(3, 8, 2).init::<Backend>(&device).unwrap();

    assert!(evaluate::<Backend, _>(&model, &[]).unwrap_err().is_configuration());
}

#[test]
fn test_trainer_reports_at_intervals() {
    let device = Default::default();
    let model = QrnnConfig::new(3, 4, 1, 8, 2)
        .with_kernel_size(2)
        .init::<TrainBackend>(&device)
        .unwrap();

    let train = vec![
        separable_batch::<TrainBackend>(&device),
        separable_batch::<TrainBackend>(&device),
    ];
    let eval = vec![separable_batch::<Backend>(&device)];

    let config = TrainingConfig::new()
        .with_training_steps(25)
        .with_statistics_interval_steps(10)
        .with_eval_interval_steps(10);
    let outcome = Trainer::new(config).unwrap().fit(model, &train, &eval).unwrap();

    assert_eq!(outcome.steps, 25);
    // 2 batches per epoch: step 24 runs in epoch 12
    assert_eq!(outcome.epoch, 12);

    let steps: Vec<usize> = outcome.step_reports.iter().map(|r| r.step).collect();
    assert_eq!(steps, vec![0, 10, 20]);

    let evals: Vec<usize> = outcome.eval_reports.iter().map(|r| r.step).collect();
    assert_eq!(evals, vec![10, 20]);

    for report in &outcome.eval_reports {
        assert!((0.0..=1.0).contains(&report.accuracy));
        assert!(report.time_per_token >= 0.0);
    }
    for report in &outcome.step_reports {
        assert!(report.loss.is_finite());
    }
}

#[test]
fn test_trainer_learns_separable_data() {
    let device = Default::default();
    let model = CbowConfig::new(3, 16, 2)
        .with_dropout_rate(0.0)
        .init::<TrainBackend>(&device)
        .unwrap();

    let train = vec![separable_batch::<TrainBackend>(&device)];
    let eval = vec![separable_batch::<Backend>(&device)];

    let config = TrainingConfig::new()
        .with_training_steps(150)
        .with_learning_rate(1e-2)
        .with_statistics_interval_steps(50)
        .with_eval_interval_steps(1000);
    let outcome = Trainer::new(config).unwrap().fit(model, &train, &eval).unwrap();

    use burn::module::AutodiffModule;
    let (acc, _) = evaluate(&outcome.model.valid(), &eval).unwrap();
    assert!((acc - 1.0).abs() < 1e-9, "accuracy {}", acc);
}
