use anyhow::Result;
use chrono::Utc;
use tracing::debug;

use survey_model::{FlattenStrategy, Sheet};
use survey_cli::pipeline::{self, build_codebook, load_store, parse_export_date};
use survey_cli::types::{ExportOutcome, ExportRequest};

use crate::cli::{CodebookArgs, ExportArgs, ListArgs};
use crate::summary::print_survey_list;

pub fn run_export(args: &ExportArgs) -> Result<ExportOutcome> {
    let export_date = match &args.date {
        Some(text) => parse_export_date(text)?,
        None => Utc::now(),
    };
    let request = ExportRequest {
        store: args.store.clone(),
        survey_id: args.survey.clone(),
        kind: args.format.into(),
        output_dir: args.output_dir.clone(),
        export_date,
    };
    debug!(?request, "resolved export request");
    pipeline::run_export(&request)
}

pub fn run_list(args: &ListArgs) -> Result<()> {
    let store = load_store(&args.store)?;
    if store.is_empty() {
        println!("No surveys in {}", args.store.display());
        return Ok(());
    }
    print_survey_list(&store);
    Ok(())
}

pub fn run_codebook(args: &CodebookArgs) -> Result<Sheet> {
    let strategy = if args.raw {
        FlattenStrategy::Raw
    } else {
        FlattenStrategy::Definition
    };
    build_codebook(&args.store, &args.survey, strategy)
}
