use std::io::Read;

use clap::Args;

use crate::analysis::AnalysisPipeline;
use crate::backend::lifecycle::{self, ConfiguredModel};
use crate::cli::{BackendArgs, OutputFormat};
use crate::core::result::{AnalysisRequest, AnalysisResult};
use crate::core::types::AnalysisType;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Nucleotide sequence to analyze, or '-' to read it from stdin
    #[arg(required = true)]
    pub sequence: String,

    /// Kind of analysis to request from the backend
    #[arg(short = 't', long = "type", default_value = "score")]
    pub analysis_type: AnalysisType,

    #[command(flatten)]
    pub backend: BackendArgs,
}

pub fn run(args: AnalyzeArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let raw = read_sequence(&args.sequence)?;
    let request = AnalysisRequest::new(raw, args.analysis_type);

    if verbose {
        eprintln!(
            "Input: {} characters, analysis type {}",
            request.sequence.len(),
            request.analysis_type
        );
    }

    let config = args.backend.to_config();
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let result = rt.block_on(async {
        let loader = ConfiguredModel::new(config.model.clone());
        let backend = lifecycle::initialize(&loader, &config).await?;

        if verbose {
            eprintln!("Scoring backend: {}", backend.state());
        }

        let result = AnalysisPipeline::new(backend)
            .run(&request)
            .await
            .map_err(|err| anyhow::anyhow!(err.public_message()))?;
        anyhow::Ok(result)
    })?;

    match format {
        OutputFormat::Text => print_text_result(&result),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Tsv => print_tsv_result(&result),
    }

    Ok(())
}

/// Resolve the positional argument, reading stdin for `-`
fn read_sequence(arg: &str) -> anyhow::Result<String> {
    if arg == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer.trim().to_string())
    } else {
        Ok(arg.to_string())
    }
}

fn print_text_result(result: &AnalysisResult) {
    let composition = result.sequence.composition();

    println!("Analysis Result");
    println!("{}", "=".repeat(60));

    println!("\nSequence: {}", abbreviate(result.sequence.as_str(), 50));
    println!("  Length: {} bp", result.length);
    println!("  GC content: {:.2}%", result.gc_content);
    println!(
        "  Composition: A={} C={} G={} T={}",
        composition.a, composition.c, composition.g, composition.t
    );

    println!("\nPredictions ({}):", result.analysis_type);
    println!("  Likelihood score: {:.4}", result.predictions.likelihood_score);
    println!(
        "  Functional prediction: {}",
        result.predictions.functional_prediction
    );
    println!(
        "  Conservation score: {:.4}",
        result.predictions.conservation_score
    );
    println!(
        "  Mutations detected: {}",
        result.predictions.mutations_detected
    );

    println!(
        "\nProcessing time: {:.3}s",
        result.processing_time_seconds
    );
}

fn print_tsv_result(result: &AnalysisResult) {
    println!(
        "length\tanalysis_type\tgc_content\tscore\tfunctional_prediction\tconservation_score\tmutations_detected\tprocessing_time_seconds"
    );
    println!(
        "{}\t{}\t{:.4}\t{:.4}\t{}\t{:.4}\t{}\t{:.4}",
        result.length,
        result.analysis_type,
        result.gc_content,
        result.score,
        result.predictions.functional_prediction,
        result.predictions.conservation_score,
        result.predictions.mutations_detected,
        result.processing_time_seconds,
    );
}

/// Shorten long sequences for display
fn abbreviate(sequence: &str, max: usize) -> String {
    if sequence.len() <= max {
        sequence.to_string()
    } else {
        format!("{}... ({} more)", &sequence[..max], sequence.len() - max)
    }
}
