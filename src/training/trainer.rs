//! Train / evaluate loop
//!
//! Mirrors the sentiment harness the QRNN models come from: Adam on
//! log-softmax + NLL, trailing accuracy and time-per-token statistics printed
//! every few steps, and a full pass over the evaluation batches at a fixed
//! interval. Batches arrive already embedded.

use super::stats::{accuracy, correct_count, TrailingStats};
use crate::error::{QrnnError, Result as QrnnResult};
use crate::layers::Mode;
use crate::models::Classifier;
use burn::config::Config;
use burn::module::AutodiffModule;
use burn::nn::loss::CrossEntropyLossConfig;
use burn::optim::{AdamConfig, GradientsParams, Optimizer};
use burn::tensor::backend::{AutodiffBackend, Backend};
use burn::tensor::{ElementConversion, Int, Tensor};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::time::Instant;

#[derive(Config, Debug)]
pub struct TrainingConfig {
    /// Number of optimizer updates to run
    #[config(default = 10000)]
    pub training_steps: usize,
    #[config(default = 100)]
    pub statistics_interval_steps: usize,
    #[config(default = 100)]
    pub eval_interval_steps: usize,
    #[config(default = 1e-3)]
    pub learning_rate: f64,
    /// Decay of the trailing accuracy / time averages
    #[config(default = 0.9)]
    pub trailing_decay: f64,
    /// Seed for the per-epoch batch shuffle
    #[config(default = 42)]
    pub seed: u64,
}

/// One embedded batch with its labels
#[derive(Debug, Clone)]
pub struct Batch<B: Backend> {
    /// `[batch, seq_len, inp_dim]`
    pub inputs: Tensor<B, 3>,
    /// `[batch]` class indices
    pub labels: Tensor<B, 1, Int>,
}

impl<B: Backend> Batch<B> {
    pub fn new(inputs: Tensor<B, 3>, labels: Tensor<B, 1, Int>) -> Self {
        Self { inputs, labels }
    }

    pub fn batch_size(&self) -> usize {
        self.inputs.dims()[0]
    }

    pub fn num_tokens(&self) -> usize {
        let [batch_size, seq_len, _] = self.inputs.dims();
        batch_size * seq_len
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    pub step: usize,
    pub epoch: usize,
    pub loss: f64,
    pub trailing_accuracy: f64,
    pub trailing_time_per_token: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvalReport {
    pub step: usize,
    pub epoch: usize,
    pub accuracy: f64,
    pub time_per_token: f64,
}

/// What [`Trainer::fit`] hands back
#[derive(Debug)]
pub struct TrainingOutcome<M> {
    pub model: M,
    pub steps: usize,
    /// Epoch index the last step ran in
    pub epoch: usize,
    pub step_reports: Vec<StepReport>,
    pub eval_reports: Vec<EvalReport>,
}

pub struct Trainer {
    config: TrainingConfig,
}

impl Trainer {
    /// # Errors
    /// [`QrnnError::Configuration`] for zero steps or intervals, or a decay
    /// outside `[0, 1)`.
    pub fn new(config: TrainingConfig) -> QrnnResult<Self> {
        if config.training_steps == 0 {
            return Err(QrnnError::config("training_steps must be >= 1"));
        }
        if config.statistics_interval_steps == 0 || config.eval_interval_steps == 0 {
            return Err(QrnnError::config("reporting intervals must be >= 1"));
        }
        if !(0.0..1.0).contains(&config.trailing_decay) {
            return Err(QrnnError::config(format!(
                "trailing_decay must be in [0, 1), got {}",
                config.trailing_decay
            )));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Train `model` for `training_steps` updates
    ///
    /// Cycles over `train` in a freshly shuffled order each epoch. Evaluation
    /// runs on the inner (non-autodiff) backend through `model.valid()` and is
    /// skipped when `eval` is empty.
    pub fn fit<B, M>(
        &self,
        mut model: M,
        train: &[Batch<B>],
        eval: &[Batch<B::InnerBackend>],
    ) -> QrnnResult<TrainingOutcome<M>>
    where
        B: AutodiffBackend,
        M: AutodiffModule<B> + Classifier<B>,
        M::InnerModule: Classifier<B::InnerBackend>,
    {
        if train.is_empty() {
            return Err(QrnnError::config("no training batches"));
        }
        if eval.is_empty() {
            tracing::warn!("No evaluation batches; periodic evaluation disabled");
        }

        let cfg = &self.config;
        tracing::info!(
            "Training {} parameters for {} steps",
            model.num_params(),
            cfg.training_steps
        );

        let mut optim = AdamConfig::new().init::<B, M>();
        let mut rng = StdRng::seed_from_u64(cfg.seed);
        let mut order: Vec<usize> = (0..train.len()).collect();
        let mut stats = TrailingStats::new(cfg.trailing_decay);

        let mut step_reports = Vec::new();
        let mut eval_reports = Vec::new();
        let mut step = 0usize;
        let mut epoch = 0usize;

        'training: loop {
            order.shuffle(&mut rng);

            for &idx in &order {
                if step >= cfg.training_steps {
                    break 'training;
                }
                let batch = &train[idx];
                let start = Instant::now();

                let logits = model.forward(batch.inputs.clone(), Mode::Train)?;
                let loss = CrossEntropyLossConfig::new()
                    .init(&logits.device())
                    .forward(logits.clone(), batch.labels.clone());
                let loss_value = loss.clone().into_scalar().elem::<f64>();

                let grads = GradientsParams::from_grads(loss.backward(), &model);
                model = optim.step(cfg.learning_rate, model, grads);

                let batch_accuracy = accuracy(logits, batch.labels.clone())?;
                let time_per_token =
                    start.elapsed().as_secs_f64() / batch.num_tokens().max(1) as f64;
                stats.update(batch_accuracy, time_per_token);

                if step % cfg.statistics_interval_steps == 0 {
                    let report = StepReport {
                        step,
                        epoch,
                        loss: loss_value,
                        trailing_accuracy: stats.accuracy(),
                        trailing_time_per_token: stats.time_per_token(),
                    };
                    tracing::info!(
                        "Step: {} [{}] Loss: {:.6} Acc: {:.4} Time: {:.10}",
                        report.step,
                        report.epoch,
                        report.loss,
                        report.trailing_accuracy,
                        report.trailing_time_per_token
                    );
                    step_reports.push(report);
                }

                if step > 0 && step % cfg.eval_interval_steps == 0 && !eval.is_empty() {
                    let (eval_accuracy, eval_time) = evaluate(&model.valid(), eval)?;
                    let report = EvalReport {
                        step,
                        epoch,
                        accuracy: eval_accuracy,
                        time_per_token: eval_time,
                    };
                    tracing::info!(
                        "Eval Step: {} [{}] Acc: {:.4} Time: {:.10}",
                        report.step,
                        report.epoch,
                        report.accuracy,
                        report.time_per_token
                    );
                    eval_reports.push(report);
                }

                step += 1;
            }

            epoch += 1;
            tracing::debug!("Finished epoch {}", epoch);
        }

        Ok(TrainingOutcome {
            model,
            steps: step,
            epoch,
            step_reports,
            eval_reports,
        })
    }
}

/// Accuracy and time per token of `model` over `batches`, in [`Mode::Eval`]
///
/// # Errors
/// [`QrnnError::Configuration`] when `batches` is empty.
pub fn evaluate<B, M>(model: &M, batches: &[Batch<B>]) -> QrnnResult<(f64, f64)>
where
    B: Backend,
    M: Classifier<B>,
{
    if batches.is_empty() {
        return Err(QrnnError::config("no evaluation batches"));
    }

    let start = Instant::now();
    let mut total_correct = 0usize;
    let mut total = 0usize;
    let mut total_tokens = 0usize;

    for batch in batches {
        let logits = model.forward(batch.inputs.clone(), Mode::Eval)?;
        total_correct += correct_count(logits, batch.labels.clone())?;
        total += batch.batch_size();
        total_tokens += batch.num_tokens();
    }

    let elapsed = start.elapsed().as_secs_f64();
    let accuracy = if total > 0 {
        total_correct as f64 / total as f64
    } else {
        0.0
    };
    Ok((accuracy, elapsed / total_tokens.max(1) as f64))
}
