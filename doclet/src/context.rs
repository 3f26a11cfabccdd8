//! What is being documented, and where on the output tree we are.

use crate::config::Config;
use crate::diagnostics::Reporter;
use crate::doc_path::DocPath;
use crate::externs::ExternalDocs;
use crate::model::{ClassDoc, MemberDoc, Model, Visibility};
use std::collections::BTreeSet;

/// Model plus the run's documented-package set and external links.
pub struct DocumentedSet<'a> {
    pub model: &'a Model,
    pub config: &'a Config,
    pub externs: &'a ExternalDocs,
    packages: BTreeSet<String>,
}

impl<'a> DocumentedSet<'a> {
    pub fn new(model: &'a Model, config: &'a Config, externs: &'a ExternalDocs) -> Self {
        let packages = if config.packages.is_empty() {
            model
                .packages
                .iter()
                .filter(|p| p.included)
                .map(|p| p.name.clone())
                .collect()
        } else {
            config.packages.iter().cloned().collect()
        };
        DocumentedSet {
            model,
            config,
            externs,
            packages,
        }
    }

    /// Documented package names, sorted.
    pub fn packages(&self) -> impl Iterator<Item = &str> {
        self.packages.iter().map(String::as_str)
    }

    pub fn is_package_included(&self, name: &str) -> bool {
        self.packages.contains(name)
    }

    pub fn is_included(&self, class: &ClassDoc) -> bool {
        class.included && self.is_package_included(&class.package)
    }

    /// Deprecated classes get no page under `--no-deprecated`.
    pub fn is_generated(&self, class: &ClassDoc) -> bool {
        if !self.config.no_deprecated {
            return true;
        }
        let package_deprecated = self
            .model
            .package(&class.package)
            .is_some_and(|p| p.deprecated);
        !(class.deprecated || package_deprecated)
    }

    /// Included classes in documented packages that get a page this run.
    pub fn documented_classes(&self) -> impl Iterator<Item = &'a ClassDoc> + '_ {
        self.model
            .classes
            .iter()
            .filter(|c| self.is_included(c) && self.is_generated(c))
    }

    pub fn is_external(&self, class: &ClassDoc) -> bool {
        self.externs.is_external_package(&class.package)
    }

    /// A page exists for the class here, or an externally documented
    /// public/protected class.
    pub fn is_linkable(&self, class: &ClassDoc) -> bool {
        (self.is_included(class) && self.is_generated(class))
            || (self.is_external(class)
                && matches!(class.visibility, Visibility::Public | Visibility::Protected))
    }

    pub fn is_member_included(&self, class: &ClassDoc, member: &MemberDoc) -> bool {
        member.included && self.is_included(class)
    }
}

/// Page families. Each decides what happens to relative links copied from
/// comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Class,
    AnnotationType,
    PackageSummary,
    Index,
    AllClasses,
}

impl PageKind {
    /// Comments rendered on pages outside their own package directory get
    /// their relative `href`s rewritten.
    pub fn redirects_relative_links(self) -> bool {
        !matches!(
            self,
            PageKind::Class | PageKind::AnnotationType | PageKind::PackageSummary
        )
    }

    pub fn is_class_page(self) -> bool {
        matches!(self, PageKind::Class | PageKind::AnnotationType)
    }
}

#[derive(Debug, Clone)]
pub struct Page<'a> {
    pub kind: PageKind,
    /// Path of the page from the documentation root.
    pub path: DocPath,
    pub path_to_root: DocPath,
    /// Class documented by this page, if any.
    pub class: Option<&'a ClassDoc>,
}

impl<'a> Page<'a> {
    pub fn new(kind: PageKind, path: DocPath) -> Page<'a> {
        let path_to_root = path.parent().invert();
        Page {
            kind,
            path,
            path_to_root,
            class: None,
        }
    }

    pub fn for_class(class: &'a ClassDoc) -> Page<'a> {
        let kind = if class.kind == crate::model::ClassKind::Annotation {
            PageKind::AnnotationType
        } else {
            PageKind::Class
        };
        Page {
            class: Some(class),
            ..Page::new(kind, DocPath::for_class(class))
        }
    }

    pub fn is_current_class(&self, class: &ClassDoc) -> bool {
        self.class
            .is_some_and(|c| c.qualified_name == class.qualified_name)
    }
}

/// Everything a core function needs to render into one page.
pub struct DocContext<'a> {
    pub docs: &'a DocumentedSet<'a>,
    pub reporter: &'a Reporter,
    pub page: Page<'a>,
}

impl<'a> DocContext<'a> {
    pub fn new(docs: &'a DocumentedSet<'a>, reporter: &'a Reporter, page: Page<'a>) -> Self {
        DocContext {
            docs,
            reporter,
            page,
        }
    }

    pub fn model(&self) -> &'a Model {
        self.docs.model
    }

    pub fn config(&self) -> &'a Config {
        self.docs.config
    }

    pub fn path_to_root(&self) -> &DocPath {
        &self.page.path_to_root
    }
}
