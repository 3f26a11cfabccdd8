//! Page writers: splice link, annotation and comment fragments into the
//! literal markup of each page, then write the tree under `--output`.

pub mod class;
pub mod index;
pub mod package;

use crate::context::{DocContext, DocumentedSet, Page, PageKind};
use crate::diagnostics::Reporter;
use crate::doc_path::{DocPath, ALL_CLASSES, INDEX_ALL, PACKAGE_LIST, PACKAGE_SUMMARY, STYLESHEET};
use crate::error::DocletError;
use crate::html::html_escape;
use std::fs;
use std::path::Path;
use tracing::info;

const STYLESHEET_CSS: &str = "\
body { font-family: system-ui, sans-serif; margin: 0 2em; }
a:link, a:visited { color: #4a6782; text-decoration: none; }
a[href]:hover { color: #bb7a2a; }
code, pre { font-family: 'DejaVu Sans Mono', monospace; font-size: 0.95em; }
pre { background: #f4f4f4; padding: 0.5em; }
.header .subTitle { margin: 0.5em 0 0; }
.title { color: #2c4557; }
.block { margin: 0.4em 0 0.8em; }
.deprecatedLabel { font-weight: bold; }
table.memberSummary { border-collapse: collapse; width: 100%; }
table.memberSummary th, table.memberSummary td { text-align: left; padding: 0.2em 0.6em; vertical-align: top; }
table.memberSummary tr:nth-child(even) { background: #eeeeef; }
dl.index dt { margin-top: 0.6em; }
";

/// Write every page of the run. Returns the number of files written.
pub fn generate(docs: &DocumentedSet<'_>, reporter: &Reporter) -> Result<usize, DocletError> {
    let root = docs.config.output_dir.as_path();
    let mut written = 0;

    for class in docs.documented_classes() {
        let cx = DocContext::new(docs, reporter, Page::for_class(class));
        write_page(root, &cx.page.path, &class::render(&cx, class))?;
        written += 1;
    }

    for package in docs.packages() {
        let path = DocPath::for_package(package).resolve(PACKAGE_SUMMARY);
        let cx = DocContext::new(docs, reporter, Page::new(PageKind::PackageSummary, path));
        write_page(root, &cx.page.path, &package::render(&cx, package))?;
        written += 1;
    }

    let cx = DocContext::new(
        docs,
        reporter,
        Page::new(PageKind::Index, DocPath::new(INDEX_ALL)),
    );
    write_page(root, &cx.page.path, &index::index_all(&cx))?;

    let cx = DocContext::new(
        docs,
        reporter,
        Page::new(PageKind::AllClasses, DocPath::new(ALL_CLASSES)),
    );
    write_page(root, &cx.page.path, &index::all_classes(&cx))?;

    write_page(root, &DocPath::new(PACKAGE_LIST), &package_list(docs))?;
    write_page(root, &DocPath::new(STYLESHEET), STYLESHEET_CSS)?;
    Ok(written + 4)
}

/// Documented packages, one per line.
pub fn package_list(docs: &DocumentedSet<'_>) -> String {
    let mut out = String::new();
    for package in docs.packages() {
        out.push_str(package);
        out.push('\n');
    }
    out
}

fn write_page(root: &Path, path: &DocPath, content: &str) -> Result<(), DocletError> {
    let target = root.join(path.as_str());
    info!("Generating {}", target.display());
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|source| DocletError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(&target, content).map_err(|source| DocletError::Write {
        path: target.clone(),
        source,
    })
}

/// Standard page head and body wrapper.
fn page_shell(cx: &DocContext<'_>, title: &str, body: &str) -> String {
    let stylesheet = cx.path_to_root().resolve(STYLESHEET);
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", html_escape(title)));
    out.push_str(&format!(
        "<link rel=\"stylesheet\" type=\"text/css\" href=\"{}\" title=\"Style\">\n",
        stylesheet
    ));
    out.push_str("</head>\n<body>\n");
    out.push_str(body);
    out.push_str("</body>\n</html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::testing::Fixture;

    #[test]
    fn package_list_is_sorted() {
        let fx = Fixture::new();
        let docs = fx.docs();
        assert_eq!(package_list(&docs), "com.acme\ncom.acme.util\n");
    }

    #[test]
    fn shell_links_stylesheet_from_page_depth() {
        let fx = Fixture::new();
        let docs = fx.docs();
        let cx = fx.on_class(&docs, "com.acme.Widget");
        let page = page_shell(&cx, "Widget <T>", "<p>x</p>\n");
        assert!(page.contains("<title>Widget &lt;T&gt;</title>"));
        assert!(page.contains("href=\"../../stylesheet.css\""));
        assert!(page.ends_with("<p>x</p>\n</body>\n</html>\n"));
    }

    #[test]
    fn generate_writes_the_tree() {
        let dir = tempfile::tempdir().unwrap();
        let fx = Fixture::with_config(Config {
            output_dir: dir.path().to_path_buf(),
            ..Config::default()
        });
        let docs = fx.docs();
        let written = generate(&docs, &fx.reporter).unwrap();
        for file in [
            "com/acme/Widget.html",
            "com/acme/Hidden.html",
            "com/acme/util/Helper.html",
            "com/acme/package-summary.html",
            "index-all.html",
            "allclasses.html",
            "package-list",
            "stylesheet.css",
        ] {
            assert!(dir.path().join(file).is_file(), "{}", file);
        }
        // Secret is not included, java.* is not documented
        assert!(!dir.path().join("com/acme/Secret.html").exists());
        assert!(!dir.path().join("java").exists());
        // 8 classes, 2 packages, 4 shared files
        assert_eq!(written, 14);
    }
}
