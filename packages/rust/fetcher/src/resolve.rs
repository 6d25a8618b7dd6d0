//! Manifest URL resolution.
//!
//! Rewrites a template's source repository URL into the raw-content URL of
//! its `azure.yaml`, picking the branch the manifest actually lives on.

/// Branch used unless a repo is listed in [`BRANCH_OVERRIDES`].
const DEFAULT_BRANCH: &str = "main";

/// Repos whose manifest is not on `main`, keyed by source URL suffix.
/// A lookup table, not a general mechanism.
// TODO: drive these overrides from config instead of hard-coding repo names
const BRANCH_OVERRIDES: &[(&str, &str)] = &[
    ("ASA-Samples-Web-Application", "quickstart"),
    ("simple-flask-azd", "master"),
    ("simple-streamlit-azd", "master"),
];

/// The raw-content URL of the `azure.yaml` manifest for a source repo.
pub fn azure_yaml_url(source: &str) -> String {
    let branch = BRANCH_OVERRIDES
        .iter()
        .find(|(suffix, _)| source.ends_with(suffix))
        .map_or(DEFAULT_BRANCH, |(_, branch)| branch);

    let raw = source.replace("https://github.com/", "https://raw.githubusercontent.com/");

    format!("{raw}/{branch}/azure.yaml")
}
