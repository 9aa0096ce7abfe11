//! One-shot prediction CLI
//!
//! Runs a single classification against local model artifacts without the
//! HTTP server, for smoke-testing exported models.

use anyhow::Result;
use clap::Parser;
use fraud_detector::models::dispatcher::Dispatcher;
use fraud_detector::registry::ModelKind;
use fraud_detector::types::transaction::{TransactionRecord, TransactionType};

#[derive(Parser, Debug)]
#[command(name = "predict-cli", about = "Classify one transaction with a local model artifact")]
struct Args {
    /// Model id (lr, dt, rf, et, lightgbm, svm, nb)
    #[arg(long)]
    model: ModelKindArg,

    /// Directory containing the .onnx artifacts
    #[arg(long, default_value = "models")]
    artifacts_dir: String,

    #[arg(long, default_value_t = 0)]
    step: u32,

    /// CASH_OUT, PAYMENT, DEBIT, TRANSFER or CASH_IN
    #[arg(long, default_value = "CASH_OUT")]
    r#type: String,

    #[arg(long, default_value_t = 0.0)]
    amount: f64,

    #[arg(long, default_value = "")]
    name_orig: String,

    #[arg(long, default_value_t = 0.0)]
    oldbalance_org: f64,

    #[arg(long, default_value_t = 0.0)]
    newbalance_orig: f64,

    #[arg(long, default_value = "")]
    name_dest: String,

    #[arg(long, default_value_t = 0.0)]
    oldbalance_dest: f64,

    #[arg(long, default_value_t = 0.0)]
    newbalance_dest: f64,
}

/// Newtype so clap can parse a ModelKind with the registry's own parser.
#[derive(Clone, Debug)]
struct ModelKindArg(ModelKind);

impl std::str::FromStr for ModelKindArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<ModelKind>()
            .map(ModelKindArg)
            .map_err(|e| e.to_string())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fraud_detector=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let tx_type = args
        .r#type
        .parse::<TransactionType>()
        .map_err(anyhow::Error::msg)?;

    let record = TransactionRecord {
        step: args.step,
        tx_type,
        amount: args.amount,
        name_orig: args.name_orig,
        oldbalance_org: args.oldbalance_org,
        newbalance_orig: args.newbalance_orig,
        name_dest: args.name_dest,
        oldbalance_dest: args.oldbalance_dest,
        newbalance_dest: args.newbalance_dest,
    };

    let dispatcher = Dispatcher::new(&args.artifacts_dir, 1);
    let prediction = dispatcher.predict(args.model.0, &record)?;

    println!(
        "{} ({}): {}",
        prediction.model.display_name(),
        prediction.model,
        prediction.verdict
    );
    if let Some(prob) = prediction.probability {
        println!("class-1 probability: {prob:.4}");
    }

    Ok(())
}
