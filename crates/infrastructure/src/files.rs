//! Plain-text list files: domain lists, resolver lists, CDN suffix lists
//! and the two result files.

use cdnscope_domain::{BatchReport, CdnSuffixSet, DomainError, ResolverEndpoint};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

pub const USES_CDN_FILE: &str = "useCdnDomains.txt";
pub const NO_CDN_FILE: &str = "noCdnDomains.txt";

/// Reads one entry per line, trimming whitespace and skipping blank lines
/// and `#` comments.
pub fn load_lines(path: impl AsRef<Path>) -> Result<Vec<String>, DomainError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| {
        DomainError::IoError(format!("Failed to open file {}: {}", path.display(), e))
    })?;
    Ok(parse_lines(&contents))
}

pub fn parse_lines(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Splits a `-d a.com,b.com` style argument.
pub fn split_domain_arg(arg: &str) -> Vec<String> {
    arg.split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn load_resolvers(path: impl AsRef<Path>) -> Result<Vec<ResolverEndpoint>, DomainError> {
    let path = path.as_ref();
    let mut endpoints = Vec::new();
    for line in load_lines(path)? {
        match line.parse::<ResolverEndpoint>() {
            Ok(endpoint) => endpoints.push(endpoint),
            Err(e) => warn!(file = %path.display(), entry = %line, error = %e, "Skipping resolver entry"),
        }
    }
    info!(file = %path.display(), resolvers = endpoints.len(), "Resolver list loaded");
    Ok(endpoints)
}

pub fn load_cdn_suffixes(path: impl AsRef<Path>) -> Result<CdnSuffixSet, DomainError> {
    let path = path.as_ref();
    let suffixes = CdnSuffixSet::new(load_lines(path)?);
    info!(file = %path.display(), suffixes = suffixes.len(), "CDN suffix list loaded");
    Ok(suffixes)
}

pub fn write_lines(path: impl AsRef<Path>, items: &[Arc<str>]) -> Result<(), DomainError> {
    let path = path.as_ref();
    let mut contents = String::with_capacity(items.iter().map(|i| i.len() + 1).sum());
    for item in items {
        contents.push_str(item);
        contents.push('\n');
    }
    fs::write(path, contents).map_err(|e| {
        DomainError::IoError(format!("Failed to write {}: {}", path.display(), e))
    })
}

/// Writes both verdict collections into `dir`, creating it if needed.
/// Returns the paths written.
pub fn write_report(
    dir: impl AsRef<Path>,
    report: &BatchReport,
) -> Result<(PathBuf, PathBuf), DomainError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| {
        DomainError::IoError(format!("Failed to create {}: {}", dir.display(), e))
    })?;

    let uses = dir.join(USES_CDN_FILE);
    let none = dir.join(NO_CDN_FILE);
    write_lines(&uses, &report.uses_cdn)?;
    write_lines(&none, &report.no_cdn)?;
    Ok((uses, none))
}
