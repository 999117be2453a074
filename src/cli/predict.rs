use anyhow::{Context, Result};
use std::str::FromStr;
use tracing::info;

use super::load_config_and_catalog;
use crate::llm::client::Variant;
use crate::pipeline::{PredictionPipeline, PredictionRequest};

pub struct PredictArgs {
    pub name: String,
    pub country: String,
    pub year: i32,
    pub variant: String,
    pub config: Option<String>,
    pub catalog: Option<String>,
    pub model: Option<String>,
    pub json: bool,
    pub show_prompt: bool,
}

pub async fn run(args: PredictArgs) -> Result<()> {
    let variant = Variant::from_str(&args.variant)?;
    let (mut config, catalog) = load_config_and_catalog(args.config, args.catalog)?;

    if let Some(model) = args.model {
        info!("CLI override: model = {}", model);
        config.llm.model = model;
    }

    let pipeline = PredictionPipeline::new(catalog, config.llm);
    let request = PredictionRequest::new(args.name, args.country, args.year);

    let result = pipeline
        .predict(&request, variant)
        .await
        .with_context(|| format!("prediction failed ({} model)", variant))?;

    if args.json {
        let json = serde_json::to_string_pretty(&result).context("failed to encode result")?;
        println!("{}", json);
        return Ok(());
    }

    if args.show_prompt {
        println!("--- prompt ---\n{}\n", result.prompt_sent);
        println!("--- raw output ---\n{}\n", result.raw_output);
    }
    println!("{}", result);
    Ok(())
}
