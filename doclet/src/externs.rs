//! External documentation sets, known through their `package-list` files.

use crate::config::Config;
use crate::doc_path::{DocLink, DocPath, PACKAGE_LIST};
use crate::error::DocletError;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
struct ExternItem {
    /// Documentation root without trailing slash.
    base: String,
    /// Relative roots are resolved against the current page.
    relative: bool,
}

/// Package name -> external documentation root. Frozen before rendering.
#[derive(Debug, Default)]
pub struct ExternalDocs {
    packages: HashMap<String, ExternItem>,
}

impl ExternalDocs {
    /// Read every `--link` and `--link-offline` package list. An unreadable
    /// list is fatal.
    pub fn load(config: &Config) -> Result<ExternalDocs, DocletError> {
        let mut externs = ExternalDocs::default();
        for url in &config.links {
            let content = read_package_list(url)?;
            externs.add_package_list(url, &content);
        }
        for (url, list_dir) in &config.links_offline {
            let content = read_package_list(list_dir)?;
            externs.add_package_list(url, &content);
        }
        Ok(externs)
    }

    /// Register the packages of one list. Earlier roots keep their packages.
    pub fn add_package_list(&mut self, base: &str, content: &str) {
        let base = base.trim_end_matches('/');
        let relative = !is_absolute_root(base);
        let mut added = 0;
        for line in content.lines() {
            let package = line.trim();
            if package.is_empty() || self.packages.contains_key(package) {
                continue;
            }
            self.packages.insert(
                package.to_string(),
                ExternItem {
                    base: base.to_string(),
                    relative,
                },
            );
            added += 1;
        }
        tracing::debug!("{} external packages from {}", added, base);
    }

    pub fn is_external_package(&self, package: &str) -> bool {
        self.packages.contains_key(package)
    }

    /// Link to `filename` in `package`'s external documentation, marked with
    /// the `is-external=true` query.
    pub fn external_link(
        &self,
        package: &str,
        path_to_root: &DocPath,
        filename: &str,
        fragment: Option<&str>,
    ) -> Option<DocLink> {
        let item = self.packages.get(package)?;
        let target = DocPath::for_package(package).resolve(filename);
        let path = if item.relative {
            path_to_root.resolve(&item.base).resolve(target.as_str())
        } else {
            DocPath::new(item.base.as_str()).resolve(target.as_str())
        };
        Some(
            DocLink::new(path.as_str())
                .query("is-external=true")
                .fragment(fragment),
        )
    }
}

fn is_absolute_root(base: &str) -> bool {
    base.contains("://") || base.starts_with('/')
}

/// `location` is a documentation root (URL or directory) holding a
/// `package-list` file.
fn read_package_list(location: &str) -> Result<String, DocletError> {
    let location = location.trim_end_matches('/');
    let url = format!("{}/{}", location, PACKAGE_LIST);
    if location.starts_with("http://") || location.starts_with("https://") {
        tracing::info!("Fetching {}", url);
        let response = ureq::get(&url)
            .call()
            .map_err(|e| DocletError::FetchPackageList {
                url: url.clone(),
                reason: e.to_string(),
            })?;
        return response
            .into_string()
            .map_err(|e| DocletError::FetchPackageList {
                url,
                reason: e.to_string(),
            });
    }
    let dir = location.strip_prefix("file:").unwrap_or(location);
    let path = Path::new(dir).join(PACKAGE_LIST);
    fs::read_to_string(&path).map_err(|e| DocletError::FetchPackageList {
        url: path.display().to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn absolute_root_ignores_page_depth() {
        let mut externs = ExternalDocs::default();
        externs.add_package_list("https://docs.example.org/api/", "java.util\njava.lang\n");
        let link = externs
            .external_link("java.util", &DocPath::new("../.."), "List.html", None)
            .unwrap();
        assert_eq!(
            link.to_string(),
            "https://docs.example.org/api/java/util/List.html?is-external=true"
        );
    }

    #[test]
    fn relative_root_is_resolved_from_page() {
        let mut externs = ExternalDocs::default();
        externs.add_package_list("../other", "org.other\n");
        let link = externs
            .external_link("org.other", &DocPath::new(".."), "Thing.html", Some("run--"))
            .unwrap();
        assert_eq!(
            link.to_string(),
            "../../other/org/other/Thing.html?is-external=true#run--"
        );
    }

    #[test]
    fn first_list_wins() {
        let mut externs = ExternalDocs::default();
        externs.add_package_list("https://a.example/api", "p\n");
        externs.add_package_list("https://b.example/api", "p\nq\n");
        let link = externs
            .external_link("p", &DocPath::empty(), "X.html", None)
            .unwrap();
        assert!(link.path.starts_with("https://a.example/"));
        assert!(externs.is_external_package("q"));
        assert!(externs.external_link("r", &DocPath::empty(), "X.html", None).is_none());
    }

    #[test]
    fn load_offline_list_from_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package-list"), "java.util\n").unwrap();
        let config = Config {
            links_offline: vec![(
                "https://docs.example.org/api".to_string(),
                dir.path().display().to_string(),
            )],
            ..Config::default()
        };
        let externs = ExternalDocs::load(&config).unwrap();
        assert!(externs.is_external_package("java.util"));
    }

    #[test]
    fn missing_list_is_fatal() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            links: vec![dir.path().join("nothing").display().to_string()],
            ..Config::default()
        };
        let err = ExternalDocs::load(&config).unwrap_err();
        assert!(matches!(err, DocletError::FetchPackageList { .. }));
    }
}
