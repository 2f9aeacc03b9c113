//! `envali check`: lint every content resource under the content root.
//!
//! A resource that cannot be parsed is reported and the walk continues, so
//! one broken file never hides problems in the others.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use envali_adapters::{ContentIssue, FilesystemContentLoader, lint};
use envali_core::application::ResourceId;

use crate::{
    cli::CheckArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Outcome for one resource.
#[derive(Debug, Serialize)]
struct ResourceReport {
    resource: ResourceId,
    /// Set when the resource could not be read or parsed at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    issues: Vec<ContentIssue>,
}

impl ResourceReport {
    fn problems(&self) -> usize {
        self.issues.len() + usize::from(self.error.is_some())
    }
}

#[derive(Debug, Serialize)]
struct CheckReport {
    root: PathBuf,
    resources: Vec<ResourceReport>,
}

impl CheckReport {
    fn problems(&self) -> usize {
        self.resources.iter().map(ResourceReport::problems).sum()
    }

    fn failing(&self) -> usize {
        self.resources.iter().filter(|r| r.problems() > 0).count()
    }
}

pub fn execute(args: CheckArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let root = args.root.unwrap_or(config.content.root);
    let report = check(&root)?;

    if output.is_json() {
        output.json(&report)?;
    } else {
        render(&report, &output)?;
    }

    match report.problems() {
        0 => Ok(()),
        issues => Err(CliError::ContentCheckFailed {
            issues,
            resources: report.failing(),
        }),
    }
}

#[instrument(fields(root = %root.display()))]
fn check(root: &Path) -> CliResult<CheckReport> {
    let loader = FilesystemContentLoader::new(root);
    let resources = loader.discover()?;
    info!(count = resources.len(), "checking content resources");

    let resources = resources
        .into_iter()
        .map(|resource| {
            let rows = loader
                .document(&resource)
                .and_then(|document| document.rows(&resource));
            match rows {
                Ok(rows) => {
                    let issues = lint(&rows);
                    debug!(%resource, rows = rows.len(), issues = issues.len(), "linted");
                    ResourceReport {
                        resource,
                        error: None,
                        issues,
                    }
                }
                Err(err) => ResourceReport {
                    resource,
                    error: Some(err.to_string()),
                    issues: Vec::new(),
                },
            }
        })
        .collect();

    Ok(CheckReport {
        root: root.to_path_buf(),
        resources,
    })
}

fn render(report: &CheckReport, output: &OutputManager) -> CliResult<()> {
    output.header(&format!("Checking content in {}", report.root.display()))?;

    if report.resources.is_empty() {
        output.info("No content resources found")?;
        return Ok(());
    }

    for resource in &report.resources {
        if resource.problems() == 0 {
            output.success(resource.resource.as_str())?;
            continue;
        }
        output.error(resource.resource.as_str())?;
        if let Some(error) = &resource.error {
            output.data(&format!("    {error}"))?;
        }
        for issue in &resource.issues {
            output.data(&format!("    {issue}"))?;
        }
    }

    if report.problems() == 0 {
        output.success(&format!(
            "{} resource(s) checked, no issues",
            report.resources.len()
        ))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use envali_core::application::ports::CONTENT_ROOT;
    use std::fs;
    use tempfile::TempDir;

    fn root_with(files: &[(&str, &str)]) -> TempDir {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(CONTENT_ROOT);
        fs::create_dir_all(&dir).unwrap();
        for (name, body) in files {
            fs::write(dir.join(name), body).unwrap();
        }
        temp
    }

    const CLEAN: &str = r#"{ "selectionNodes": [ { "node": { "variableName": "age", "rangeFrom": 1, "rangeTo": 9 } } ] }"#;
    const INVERTED: &str = r#"{ "selectionNodes": [ { "node": { "variableName": "age", "rangeFrom": 9, "rangeTo": 1 } } ] }"#;

    #[test]
    fn clean_content_has_no_problems() {
        let temp = root_with(&[("user.json", CLEAN)]);
        let report = check(temp.path()).unwrap();

        assert_eq!(report.resources.len(), 1);
        assert_eq!(report.problems(), 0);
    }

    #[test]
    fn broken_files_do_not_stop_the_walk() {
        let temp = root_with(&[
            ("a.json", "{ nope"),
            ("b.json", INVERTED),
            ("c.json", CLEAN),
        ]);
        let report = check(temp.path()).unwrap();

        assert_eq!(report.resources.len(), 3);
        assert!(report.resources[0].error.is_some());
        assert_eq!(report.resources[1].issues.len(), 1);
        assert_eq!(report.problems(), 2);
        assert_eq!(report.failing(), 2);
    }

    #[test]
    fn missing_content_directory_is_not_found() {
        let temp = TempDir::new().unwrap();
        let err = check(temp.path()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn json_report_omits_absent_errors() {
        let temp = root_with(&[("user.json", CLEAN)]);
        let json = serde_json::to_value(check(temp.path()).unwrap()).unwrap();

        let resource = &json["resources"][0];
        assert_eq!(resource["resource"], "content/envali/user.json");
        assert!(resource.get("error").is_none());
        assert_eq!(resource["issues"], serde_json::json!([]));
    }
}
