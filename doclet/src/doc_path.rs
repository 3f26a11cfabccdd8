//! Relative paths inside the generated documentation tree.

use crate::model::ClassDoc;
use std::fmt;

pub const PACKAGE_SUMMARY: &str = "package-summary.html";
pub const INDEX_ALL: &str = "index-all.html";
pub const ALL_CLASSES: &str = "allclasses.html";
pub const PACKAGE_LIST: &str = "package-list";
pub const STYLESHEET: &str = "stylesheet.css";

/// A `/`-separated path relative to the documentation root (or to another
/// page). The empty path is the root itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DocPath(String);

impl DocPath {
    pub fn new(path: impl Into<String>) -> DocPath {
        DocPath(path.into())
    }

    pub fn empty() -> DocPath {
        DocPath(String::new())
    }

    /// `com.acme.util` -> `com/acme/util`; the unnamed package is the root.
    pub fn for_package(name: &str) -> DocPath {
        DocPath(name.replace('.', "/"))
    }

    /// Page of a class, e.g. `com/acme/Widget.html`.
    pub fn for_class(class: &ClassDoc) -> DocPath {
        DocPath::for_package(&class.package).resolve(format!("{}.html", class.name))
    }

    pub fn parent(&self) -> DocPath {
        match self.0.rfind('/') {
            Some(i) => DocPath(self.0[..i].to_string()),
            None => DocPath::empty(),
        }
    }

    /// One `..` per segment: the path back up to where this one starts.
    pub fn invert(&self) -> DocPath {
        if self.0.is_empty() {
            return DocPath::empty();
        }
        let ups: Vec<&str> = self.0.split('/').map(|_| "..").collect();
        DocPath(ups.join("/"))
    }

    pub fn resolve(&self, other: impl AsRef<str>) -> DocPath {
        let other = other.as_ref();
        if other.is_empty() {
            self.clone()
        } else if self.0.is_empty() {
            DocPath(other.to_string())
        } else {
            DocPath(format!("{}/{}", self.0, other))
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A link target: path, optional query and fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocLink {
    pub path: String,
    pub query: Option<String>,
    pub fragment: Option<String>,
}

impl DocLink {
    pub fn new(path: impl Into<String>) -> DocLink {
        DocLink {
            path: path.into(),
            query: None,
            fragment: None,
        }
    }

    pub fn query(mut self, query: &str) -> DocLink {
        self.query = Some(query.to_string());
        self
    }

    pub fn fragment(mut self, fragment: Option<&str>) -> DocLink {
        self.fragment = fragment.filter(|f| !f.is_empty()).map(str::to_string);
        self
    }
}

impl fmt::Display for DocLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        if let Some(ref q) = self.query {
            write!(f, "?{}", q)?;
        }
        if let Some(ref frag) = self.fragment {
            write!(f, "#{}", frag)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_paths() {
        assert_eq!(DocPath::for_package("com.acme.util").as_str(), "com/acme/util");
        assert!(DocPath::for_package("").is_empty());
    }

    #[test]
    fn invert_counts_segments() {
        let page = DocPath::new("com/acme/Widget.html");
        assert_eq!(page.parent().as_str(), "com/acme");
        assert_eq!(page.parent().invert().as_str(), "../..");
        assert!(DocPath::new("index-all.html").parent().invert().is_empty());
    }

    #[test]
    fn resolve_against_empty_root() {
        let root = DocPath::empty();
        assert_eq!(root.resolve("com/acme").as_str(), "com/acme");
        assert_eq!(
            DocPath::new("..").resolve("com/acme").resolve(PACKAGE_SUMMARY).as_str(),
            "../com/acme/package-summary.html"
        );
    }

    #[test]
    fn link_display() {
        let link = DocLink::new("List.html")
            .query("is-external=true")
            .fragment(Some("size--"));
        assert_eq!(link.to_string(), "List.html?is-external=true#size--");
        assert_eq!(DocLink::new("A.html").fragment(Some("")).to_string(), "A.html");
    }
}
