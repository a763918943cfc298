//! Subcommand implementations.

use anyhow::{anyhow, bail, Context};
use esorm_client::SearchClient;
use esorm_codegen::utils::write_source;
use esorm_codegen::{generate_rust, GeneratorConfig};
use esorm_query::{Document, QueryBuilder, QueryOutput, SearchService, SortDirection};
use serde_json::Value as JsonValue;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct MetaArgs {
    pub index: String,
    pub type_name: Option<String>,
    pub array_fields: Vec<String>,
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct SearchArgs {
    pub index: String,
    pub filters: Vec<String>,
    pub select: Vec<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub sort: Vec<String>,
    pub group_by: Option<String>,
    pub group_size: usize,
    pub dry_run: bool,
}

/// Generate a document struct from the live mapping of `args.index`.
pub async fn meta(client: &SearchClient, args: MetaArgs) -> anyhow::Result<()> {
    let properties = client
        .get_mapping(&args.index)
        .await
        .with_context(|| format!("fetching mapping for {}", args.index))?;

    let array_fields: BTreeSet<String> = args.array_fields.into_iter().collect();
    let config = GeneratorConfig {
        type_name: args.type_name,
        ..GeneratorConfig::default()
    };
    let output = generate_rust(&args.index, &properties, &array_fields, config)
        .context("generating document type")?;

    match args.output {
        Some(path) => {
            write_source(&path, &output.code)?;
            tracing::info!(
                path = %path.display(),
                type_name = %output.type_name,
                "wrote document type"
            );
            eprintln!("Wrote {} to {}", output.type_name, path.display());
        }
        None => print!("{}", output.code),
    }
    Ok(())
}

/// Build the query described by `args`, then print either the compiled
/// request (`--dry-run`) or the engine's answer.
pub async fn search(service: Arc<dyn SearchService>, args: SearchArgs) -> anyhow::Result<()> {
    let mut query = build_search(service, &args)?;

    if args.dry_run {
        let request = query.to_request()?;
        println!("{}", serde_json::to_string_pretty(&request)?);
        return Ok(());
    }

    match query.get().await? {
        QueryOutput::Documents(documents) => print_json(&documents),
        QueryOutput::Buckets(buckets) => print_json(&buckets),
    }
}

pub async fn count(
    service: Arc<dyn SearchService>,
    index: &str,
    filters: &[String],
) -> anyhow::Result<()> {
    let mut query = QueryBuilder::for_index(service, index);
    apply_filters(&mut query, filters)?;
    println!("{}", query.count().await?);
    Ok(())
}

/// One id goes through a single get, several through one multi-get. Only
/// found documents are printed.
pub async fn find(
    service: Arc<dyn SearchService>,
    index: &str,
    ids: &[String],
) -> anyhow::Result<()> {
    let mut query = QueryBuilder::for_index(service, index);

    let documents: Vec<Document> = match ids {
        [] => bail!("at least one id is required"),
        [id] => query.find(id).await?.into_iter().collect(),
        _ => query
            .find_many(ids)
            .await?
            .into_iter()
            .filter(Document::is_found)
            .collect(),
    };

    if documents.len() < ids.len() {
        tracing::warn!(
            index,
            requested = ids.len(),
            found = documents.len(),
            "some ids were not found"
        );
    }
    print_json(&documents)
}

pub fn build_search(
    service: Arc<dyn SearchService>,
    args: &SearchArgs,
) -> anyhow::Result<QueryBuilder> {
    let mut query = QueryBuilder::for_index(service, args.index.as_str());
    apply_filters(&mut query, &args.filters)?;

    if !args.select.is_empty() {
        query.select(args.select.iter().cloned());
    }
    if let Some(limit) = args.limit {
        query.limit(limit);
    }
    if let Some(offset) = args.offset {
        query.offset(offset);
    }
    for sort in &args.sort {
        let (field, direction) = parse_sort(sort)?;
        query.order_by(field, direction);
    }
    if let Some(field) = &args.group_by {
        query.group_by(field.as_str(), args.group_size);
    }

    Ok(query)
}

fn apply_filters(query: &mut QueryBuilder, filters: &[String]) -> anyhow::Result<()> {
    for filter in filters {
        let (field, value) = parse_filter(filter)?;
        query.where_eq(field, value);
    }
    Ok(())
}

/// `field=value`; the value is read as JSON when it parses (numbers,
/// booleans, quoted strings) and as a plain string otherwise.
pub fn parse_filter(raw: &str) -> anyhow::Result<(String, JsonValue)> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("filter '{raw}' must look like field=value"))?;
    if field.is_empty() {
        bail!("filter '{raw}' has an empty field name");
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| JsonValue::String(value.into()));
    Ok((field.to_string(), value))
}

/// `field` or `field:asc|desc`.
pub fn parse_sort(raw: &str) -> anyhow::Result<(String, SortDirection)> {
    let (field, direction) = match raw.split_once(':') {
        Some((field, "asc")) => (field, SortDirection::Asc),
        Some((field, "desc")) => (field, SortDirection::Desc),
        Some((_, other)) => bail!("unknown sort direction '{other}' in '{raw}'"),
        None => (raw, SortDirection::Asc),
    };
    if field.is_empty() {
        bail!("sort '{raw}' has an empty field name");
    }
    Ok((field.to_string(), direction))
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
