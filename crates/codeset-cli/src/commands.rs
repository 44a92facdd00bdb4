use std::fs;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use codeset_cli::config::transformer_options;
use codeset_cli::pipeline::{export_transformer, prepare, stage_diff};

use crate::cli::{ClassifyArgs, DiffArgs, MappingArgs, TransformerArgs};
use crate::summary::{print_diff, print_mapping, print_roles};

pub fn run_classify(args: &ClassifyArgs) -> Result<()> {
    let prepared = prepare(&args.workbook)?;
    print_roles(&prepared.workbook, &prepared.roles);
    Ok(())
}

pub fn run_mapping(args: &MappingArgs) -> Result<()> {
    let prepared = prepare(&args.workbook)?;
    if let Some(sheet) = &args.sheet {
        if prepared.workbook.sheet(sheet).is_none() {
            bail!("unknown sheet: {sheet}");
        }
        match prepared.resolutions.get(sheet) {
            Some(resolution) => print_mapping(sheet, resolution),
            None => println!("Sheet {sheet} has no mappable columns."),
        }
        return Ok(());
    }
    for (sheet, resolution) in &prepared.resolutions {
        print_mapping(sheet, resolution);
        println!();
    }
    Ok(())
}

pub fn run_diff(args: &DiffArgs) -> Result<()> {
    let span = info_span!("diff", base = %args.base.display(), incoming = %args.incoming.display());
    let _guard = span.enter();
    let diff = stage_diff(&args.base, &args.incoming)?;
    print_diff(&diff);
    if let Some(path) = &args.json {
        let json = serde_json::to_string_pretty(&diff).context("serialize diff")?;
        fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
        info!(path = %path.display(), "diff written");
    }
    Ok(())
}

pub fn run_transformer(args: &TransformerArgs) -> Result<()> {
    let options = transformer_options(args.config.as_deref(), &args.free_text, args.no_fields)?;
    let prepared = prepare(&args.workbook)?;
    let xml = export_transformer(&prepared, &options)?;
    match &args.output {
        Some(path) => {
            fs::write(path, &xml).with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), bytes = xml.len(), "transformer written");
            println!("Transformer: {}", path.display());
        }
        None => print!("{xml}"),
    }
    Ok(())
}
