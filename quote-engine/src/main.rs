use anyhow::bail;
use quote_engine::{
    ApiResponse, AppError, AppResult, QuoteInput, build_client_quote, build_report,
    setup_environment,
};
use std::path::{Path, PathBuf};

const USAGE: &str = "usage: quote-engine <quote.json> [--client]";

fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, config, logging)
    let config = setup_environment();

    // 2. Arguments
    let mut path: Option<PathBuf> = None;
    let mut client_view = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--client" => client_view = true,
            "-h" | "--help" => {
                println!("{}", USAGE);
                return Ok(());
            }
            _ if path.is_none() => path = Some(PathBuf::from(arg)),
            other => bail!("unexpected argument: {}\n{}", other, USAGE),
        }
    }
    let Some(path) = path else {
        bail!("missing quote file\n{}", USAGE);
    };

    // 3. Input
    let input = match load_input(&path).and_then(|input| input.validate().map(|_| input)) {
        Ok(input) => input,
        Err(e) => {
            tracing::warn!(code = %e.code, error = %e.message, "Quote input rejected");
            println!("{}", serde_json::to_string_pretty(&ApiResponse::error(&e))?);
            std::process::exit(1);
        }
    };

    tracing::info!(
        path = %path.display(),
        items = input.items.len(),
        client_view,
        "Computing quote"
    );

    // 4. Output
    let options = config.schedule_options();
    let output = if client_view {
        let quote = build_client_quote(
            &input.items,
            input.global_discount_percentage,
            input.global_tax_percentage,
            input.start_date_or_today(),
            &options,
        );
        serde_json::to_string_pretty(&ApiResponse::success(quote))?
    } else {
        let report = build_report(&input, &options, &config.currency_format());
        serde_json::to_string_pretty(&ApiResponse::success(report))?
    };
    println!("{}", output);

    Ok(())
}

/// Read and parse a quote file; io errors map to `IoError`, bad JSON to `InvalidFormat`
fn load_input(path: &Path) -> AppResult<QuoteInput> {
    let with_path = |e: AppError| e.with_detail("path", path.display().to_string());
    let raw = std::fs::read_to_string(path).map_err(|e| with_path(e.into()))?;
    serde_json::from_str(&raw).map_err(|e| with_path(e.into()))
}

