use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use ddi_cli::request::{OutputFormat, Request, Response, handle};
use ddi_model::{Kind, ResolutionLevel};
use ddi_store::{DataStore, Defaults, ResourceQuery, StoreConfig};

use crate::cli::{FormatArg, GetArgs, ListArgs, OutputArgs};

pub fn run_list(store: &DataStore, defaults: &Defaults, args: &ListArgs) -> Result<Response> {
    let query = ResourceQuery {
        urn: args.urn.clone(),
        agency_ids: args.agency_ids.clone(),
        ids: args.ids.clone(),
        versions: args.versions.clone(),
        concept_references: args.concept_references.clone(),
        search: args.search.clone(),
        offset: args.offset,
        limit: args.limit,
    };
    let request = Request::list(args.resource)
        .with_query(query)
        .with_level(resolution_level(&args.output, defaults))
        .with_format(output_format(&args.output, defaults)?);
    Ok(handle(store, &request))
}

pub fn run_get(store: &DataStore, defaults: &Defaults, args: &GetArgs) -> Result<Response> {
    let request = Request::item(args.resource, args.id.as_str())
        .with_level(resolution_level(&args.output, defaults))
        .with_format(output_format(&args.output, defaults)?);
    Ok(handle(store, &request))
}

pub fn run_kinds(store: &DataStore, config: &StoreConfig, root: &Path) {
    let mut table = Table::new();
    table.set_header(vec!["Resource", "Kind", "File", "Loaded"]);
    apply_table_style(&mut table);
    for kind in Kind::RESOURCES {
        table.add_row(vec![
            kind.resource_path().unwrap_or_default().to_string(),
            kind.to_string(),
            config.collection_file(kind).unwrap_or_default(),
            store.len(kind).to_string(),
        ]);
    }
    println!("Data directory: {}", root.display());
    println!("{table}");
}

/// Load the store and its config from `root`.
pub fn load_store(root: &Path) -> Result<(DataStore, StoreConfig)> {
    let config = StoreConfig::load(root)
        .with_context(|| format!("load configuration from {}", root.display()))?;
    let store = DataStore::load_with_config(root, &config)
        .with_context(|| format!("load collections from {}", root.display()))?;
    Ok((store, config))
}

fn resolution_level(args: &OutputArgs, defaults: &Defaults) -> ResolutionLevel {
    args.references.unwrap_or(defaults.references)
}

/// `--format` wins over `--accept`, which wins over the configured default.
fn output_format(args: &OutputArgs, defaults: &Defaults) -> Result<OutputFormat> {
    if let Some(format) = args.format {
        return Ok(match format {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Xml => OutputFormat::Xml,
        });
    }
    if let Some(accept) = &args.accept {
        return Ok(OutputFormat::negotiate(Some(accept)));
    }
    match &defaults.format {
        Some(name) => name
            .parse()
            .map_err(anyhow::Error::msg)
            .context("invalid default format in ddi.toml"),
        None => Ok(OutputFormat::default()),
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}
