//! Immutable run configuration built from the command line.

use crate::error::DocletError;
use crate::model::ClassDoc;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub output_dir: PathBuf,
    /// Explicit documented packages; empty means "whatever the model includes".
    pub packages: Vec<String>,
    /// `--link` roots.
    pub links: Vec<String>,
    /// `--link-offline` (root, package-list directory) pairs.
    pub links_offline: Vec<(String, String)>,
    pub tab_width: usize,
    pub no_comment: bool,
    pub no_deprecated: bool,
    pub no_qualifier: Vec<String>,
    pub docroot: Option<String>,
    pub docroot_parent: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            output_dir: PathBuf::from("."),
            packages: Vec::new(),
            links: Vec::new(),
            links_offline: Vec::new(),
            tab_width: 8,
            no_comment: false,
            no_deprecated: false,
            no_qualifier: Vec::new(),
            docroot: None,
            docroot_parent: None,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), DocletError> {
        if self.tab_width == 0 {
            return Err(DocletError::InvalidOption(
                "--tab-width must be a positive number".to_string(),
            ));
        }
        if let Some(ref parent) = self.docroot_parent {
            if !parent.contains("://") {
                return Err(DocletError::InvalidOption(format!(
                    "--docroot-parent must be an absolute URL: {}",
                    parent
                )));
            }
        }
        Ok(())
    }

    /// Whether labels in `package` drop their qualifier.
    ///
    /// Entries are exact names, `all`, or `prefix.*` matching the package and
    /// every package below it.
    pub fn should_exclude_qualifier(&self, package: &str) -> bool {
        let listed = |name: &str| self.no_qualifier.iter().any(|q| q == name);
        if listed("all") || listed(package) || listed(&format!("{}.*", package)) {
            return true;
        }
        package
            .match_indices('.')
            .any(|(i, _)| listed(&format!("{}*", &package[..=i])))
    }

    /// Label for a class: qualified unless its package is excluded.
    pub fn class_name<'a>(&self, class: &'a ClassDoc) -> &'a str {
        if self.should_exclude_qualifier(&class.package) {
            &class.name
        } else {
            &class.qualified_name
        }
    }

    /// Label for a qualified name that is not in the model.
    pub fn qualified_name<'a>(&self, qualified_name: &'a str) -> &'a str {
        match qualified_name.rsplit_once('.') {
            Some((package, simple)) if self.should_exclude_qualifier(package) => simple,
            _ => qualified_name,
        }
    }

    /// Package-name prefix (`com.acme.`) for pre-qualified links, elided per
    /// `--no-qualifier`.
    pub fn package_qualifier(&self, package: &str) -> String {
        if package.is_empty() || self.should_exclude_qualifier(package) {
            String::new()
        } else {
            format!("{}.", package)
        }
    }
}
