// ============================================================
// Layer 1 - CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// clap and hands every command to Layer 2 (application).
//
//   1. `train`    - CSV → normalized data → trained model file
//   2. `predict`  - model file + raw inputs → raw outputs
//   3. `summary`  - layer table, labels and bounds of a model
//   4. `generate` - seeded synthetic dataset for experiments

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, GenerateArgs, PredictArgs, SummaryArgs, TrainArgs};

use crate::domain::dataset::Dataset;

#[derive(Parser, Debug)]
#[command(
    name = "surrogate",
    version,
    about = "Train and run small MLP surrogate models on tabular CSV data."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Route to the matching use case. Nothing is computed here.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)    => run_train(args),
            Commands::Predict(args)  => run_predict(args),
            Commands::Summary(args)  => run_summary(args),
            Commands::Generate(args) => run_generate(args),
        }
    }
}

fn run_train(args: TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    let config = args.into_config()?;
    tracing::info!("Starting training on '{}'", config.data_path);

    let report = TrainUseCase::new(config).execute()?;

    println!("Training complete.");
    println!("  rows:       {}", report.rows);
    println!("  parameters: {}", report.parameters);
    if let Some(m) = &report.final_metrics {
        println!("  final loss: {:.6} (mae {:.6})", m.loss, m.mae);
    }
    if let Some(m) = &report.best_metrics {
        println!("  best loss:  {:.6} at epoch {}", m.loss, m.epoch);
    }
    println!("  model:      {}", report.output_path);
    Ok(())
}

fn run_predict(args: PredictArgs) -> Result<()> {
    use crate::application::predict_use_case::PredictUseCase;

    let use_case = PredictUseCase::new(args.model, args.data, args.output.clone())?;
    let predictions = use_case.execute()?;

    match args.output {
        Some(path) => println!("Wrote {} predictions to {}", predictions.n_rows(), path.display()),
        None => print_table(&predictions),
    }
    Ok(())
}

fn run_summary(args: SummaryArgs) -> Result<()> {
    let text = crate::application::inspect_use_case::describe_model(&args.model)?;
    print!("{text}");
    Ok(())
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    crate::application::inspect_use_case::generate_to_csv(
        &args.output,
        args.rows,
        args.n_inputs,
        args.n_outputs,
        args.seed,
    )?;
    println!("Wrote {} rows to {}", args.rows, args.output.display());
    Ok(())
}

fn print_table(data: &Dataset) {
    println!("{}", data.columns().join(","));
    for row in data.rows() {
        let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        println!("{}", line.join(","));
    }
}
