//! Basic usage of the QRNN layers and classifier
//!
//! Builds one layer per pre-activation mode, then a stacked classifier, and
//! prints the shapes that come out.

use burn::backend::NdArray;
use burn::tensor::{Distribution, Tensor};
use qrnn::prelude::*;

fn main() -> Result<()> {
    println!("=== QRNN Basic Example ===\n");

    // Use the NdArray backend (CPU)
    type Backend = NdArray<f32>;
    let device = Default::default();

    // Input shape: [batch=4, seq=10, features=50]
    let input =
        Tensor::<Backend, 3>::random([4, 10, 50], Distribution::Uniform(-1.0, 1.0), &device);

    // Example 1: the three pre-activation families
    println!("Example 1: QRNN layers");
    for kernel_size in [1, 2, 3] {
        let layer = QrnnLayer::<Backend>::new(50, 32, kernel_size, &device)?;
        let pre = layer.pre_activation(input.clone())?;
        let hidden = layer.forward(input.clone())?;

        println!("  kernel_size={}", kernel_size);
        println!("    Pre-activation shape: {:?}", pre.dims());
        println!("    Hidden shape:         {:?}", hidden.dims());
    }
    println!();

    // Example 2: canonical gating, scanning right-to-left
    println!("Example 2: Canonical gating, reverse scan");
    let reverse = QrnnLayer::<Backend>::new(50, 32, 2, &device)?
        .with_gating(Gating::Canonical)
        .with_direction(Direction::Reverse);
    println!("  Hidden shape: {:?}", reverse.forward(input.clone())?.dims());
    println!();

    // Example 3: full classifier
    println!("Example 3: Stacked QRNN classifier");
    let model = QrnnConfig::new(50, 100, 2, 256, 2)
        .with_kernel_size(3)
        .init::<Backend>(&device)?;

    let logits = model.forward(input, Mode::Eval)?;
    println!("  Layers:       {}", model.num_layers());
    println!("  Logits shape: {:?}", logits.dims());
    println!();

    // Example 4: shape errors are reported, not broadcast
    println!("Example 4: Shape checking");
    let wrong = Tensor::<Backend, 3>::zeros([4, 10, 49], &device);
    match model.forward(wrong, Mode::Eval) {
        Ok(_) => println!("  unexpected success"),
        Err(err) => println!("  {}", err),
    }

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
