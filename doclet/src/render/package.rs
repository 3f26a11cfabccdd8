//! `package-summary.html`.

use super::page_shell;
use crate::annotation::annotation_info;
use crate::comment::comment_block;
use crate::context::DocContext;
use crate::html::html_escape;
use crate::link::{resolve, LinkContext, LinkRequest, LinkTarget};
use crate::model::{first_sentence, ClassDoc, ClassKind, Holder};

const TABLES: [(ClassKind, &str); 4] = [
    (ClassKind::Interface, "Interface Summary"),
    (ClassKind::Class, "Class Summary"),
    (ClassKind::Enum, "Enum Summary"),
    (ClassKind::Annotation, "Annotation Types Summary"),
];

pub fn render(cx: &DocContext<'_>, package: &str) -> String {
    let doc = cx.model().package(package);
    let mut body = String::new();

    body.push_str("<div class=\"header\">\n");
    if let Some(annotations) = doc.and_then(|d| annotation_info(cx, &d.annotations, 0, true)) {
        body.push_str(&format!("<div class=\"packageAnnotations\">{}</div>\n", annotations));
    }
    body.push_str(&format!(
        "<h1 title=\"Package\" class=\"title\">Package {}</h1>\n",
        html_escape(package)
    ));
    if let Some(doc) = doc {
        let summary = first_sentence(&doc.comment);
        if let Some(block) = comment_block(cx, Holder::Package(doc), &summary, true) {
            body.push_str(&format!("<div class=\"docSummary\">{}</div>\n", block));
        }
    }
    body.push_str("</div>\n<div class=\"contentContainer\">\n");

    for (kind, heading) in TABLES {
        let mut classes: Vec<&ClassDoc> = cx
            .docs
            .documented_classes()
            .filter(|c| c.package == package && c.kind == kind)
            .collect();
        if classes.is_empty() {
            continue;
        }
        classes.sort_by(|a, b| a.name.cmp(&b.name));
        body.push_str(&format!(
            "<table class=\"typeSummary\">\n<caption><span>{}</span></caption>\n",
            heading
        ));
        for class in classes {
            let link = resolve(
                cx,
                &LinkRequest::new(LinkContext::Package, LinkTarget::Class(class)),
            );
            let mut desc = String::new();
            if class.deprecated {
                desc.push_str("<span class=\"deprecatedLabel\">Deprecated.</span>");
            }
            let summary = class.summary();
            if let Some(block) = comment_block(cx, Holder::Class(class), &summary, true) {
                desc.push_str(block.as_str());
            }
            body.push_str(&format!(
                "<tr><td class=\"colFirst\">{}</td><td class=\"colLast\">{}</td></tr>\n",
                link, desc
            ));
        }
        body.push_str("</table>\n");
    }

    if let Some(doc) = doc {
        if let Some(block) = comment_block(cx, Holder::Package(doc), &doc.comment, false) {
            body.push_str("<a id=\"package.description\"></a>\n");
            body.push_str(block.as_str());
            body.push('\n');
        }
    }
    body.push_str("</div>\n");

    page_shell(cx, package, &body)
}
