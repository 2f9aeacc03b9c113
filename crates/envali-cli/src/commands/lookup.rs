//! `envali lookup`: show the content row a field resolves to.
//!
//! Uses the same query the validator issues, so the output is exactly what
//! range, affix and pattern directives on that field will read.

use tracing::{debug, instrument};

use envali_adapters::FilesystemContentLoader;
use envali_core::application::{ContentLoader, ContentQuery, ContentRow, ResourceId};

use crate::{
    cli::LookupArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(args: LookupArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    if args.mapping.trim().is_empty() || args.field.trim().is_empty() {
        return Err(CliError::InvalidInput {
            message: "mapping and field must not be empty".into(),
        });
    }

    let root = args.root.unwrap_or(config.content.root);
    let loader = FilesystemContentLoader::new(root);
    let resource = ResourceId::for_mapping(&args.mapping);

    let (row, matches) = lookup(&loader, &resource, &args.mapping, &args.field)?;
    if matches > 1 {
        output.warning(&format!(
            "{matches} nodes select '{}'; the first one is used",
            args.field
        ))?;
    }

    if output.is_json() {
        return output.json(&row);
    }

    output.header(&format!("{resource} \u{2192} {}", args.field))?;
    if row.is_empty() {
        output.info("The node has no directive attributes")?;
    }
    for (key, value) in row.iter() {
        output.data(&format!("  {key} = {value}"))?;
    }
    Ok(())
}

/// First row selecting `field`, and how many rows did.
#[instrument(skip(loader, resource), fields(resource = %resource))]
fn lookup(
    loader: &dyn ContentLoader,
    resource: &ResourceId,
    mapping: &str,
    field: &str,
) -> CliResult<(ContentRow, usize)> {
    let rows = loader.load(&ContentQuery::for_field(resource.clone(), field))?;
    debug!(rows = rows.len(), "content rows selected");

    let matches = rows.len();
    let row = rows
        .into_iter()
        .next()
        .ok_or_else(|| CliError::RowNotFound {
            mapping: mapping.to_owned(),
            field: field.to_owned(),
        })?;
    Ok((row, matches))
}

#[cfg(test)]
mod tests {
    use super::*;
    use envali_adapters::InMemoryContentLoader;

    const USER: &str = r#"{
        "selectionNodes": [
            { "node": { "variableName": "age", "rangeFrom": 18, "rangeTo": 130, "note": "adults" } },
            { "node": { "variableName": "age", "rangeFrom": 21 } }
        ]
    }"#;

    #[test]
    fn first_matching_row_is_projected() {
        let loader = InMemoryContentLoader::from_json("user", USER).unwrap();
        let (row, matches) =
            lookup(&loader, &ResourceId::for_mapping("user"), "user", "age").unwrap();

        assert_eq!(matches, 2);
        assert_eq!(row.get("rangeFrom"), Some("18"));
        assert_eq!(row.get("note"), None);
    }

    #[test]
    fn unknown_field_is_row_not_found() {
        let loader = InMemoryContentLoader::from_json("user", USER).unwrap();
        let err = lookup(&loader, &ResourceId::for_mapping("user"), "user", "name").unwrap_err();
        assert!(matches!(err, CliError::RowNotFound { field, .. } if field == "name"));
    }

    #[test]
    fn unknown_mapping_is_a_core_error() {
        let loader = InMemoryContentLoader::new();
        let err = lookup(&loader, &ResourceId::for_mapping("user"), "user", "age").unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
