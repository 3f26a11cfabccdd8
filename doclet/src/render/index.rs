//! `index-all.html` and `allclasses.html`.
//!
//! Both pages live at the documentation root and show comment text from
//! every package, so relative links in that text are redirected.

use super::page_shell;
use crate::comment::comment_block;
use crate::context::DocContext;
use crate::html::Rendered;
use crate::link::{
    package_link, pre_qualified_class_link, resolve, LinkContext, LinkRequest, LinkTarget,
};
use crate::model::{first_sentence, ClassDoc, ClassKind, Holder, MemberDoc, MemberKind};
use std::cmp::Ordering;

enum Entry<'a> {
    Package(&'a str),
    Class(&'a ClassDoc),
    Member(&'a ClassDoc, &'a MemberDoc),
}

impl Entry<'_> {
    fn name(&self) -> &str {
        match self {
            Entry::Package(name) => name,
            Entry::Class(class) => &class.name,
            Entry::Member(_, member) => &member.name,
        }
    }

    fn qualifier(&self) -> &str {
        match self {
            Entry::Package(name) => name,
            Entry::Class(class) | Entry::Member(class, _) => &class.qualified_name,
        }
    }

    fn letter(&self) -> char {
        self.name()
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('_')
    }
}

fn compare(a: &Entry<'_>, b: &Entry<'_>) -> Ordering {
    a.name()
        .to_lowercase()
        .cmp(&b.name().to_lowercase())
        .then_with(|| a.qualifier().cmp(b.qualifier()))
}

pub fn index_all(cx: &DocContext<'_>) -> String {
    let mut entries: Vec<Entry> = cx.docs.packages().map(Entry::Package).collect();
    for class in cx.docs.documented_classes() {
        entries.push(Entry::Class(class));
        entries.extend(
            class
                .members
                .iter()
                .filter(|m| cx.docs.is_member_included(class, m))
                .map(|m| Entry::Member(class, m)),
        );
    }
    entries.sort_by(compare);

    let mut letters: Vec<char> = entries.iter().map(Entry::letter).collect();
    letters.dedup();

    let mut body = String::new();
    body.push_str("<div class=\"contentContainer\">\n");
    for letter in &letters {
        body.push_str(&format!("<a href=\"#I:{0}\">{0}</a> ", letter));
    }
    body.push('\n');

    let mut current = None;
    for entry in &entries {
        let letter = entry.letter();
        if current != Some(letter) {
            if current.is_some() {
                body.push_str("</dl>\n");
            }
            body.push_str(&format!(
                "<a id=\"I:{0}\"></a>\n<h2 class=\"title\">{0}</h2>\n<dl class=\"index\">\n",
                letter
            ));
            current = Some(letter);
        }
        body.push_str(&index_entry(cx, entry));
    }
    if current.is_some() {
        body.push_str("</dl>\n");
    }
    body.push_str("</div>\n");

    page_shell(cx, "Index", &body)
}

fn index_entry(cx: &DocContext<'_>, entry: &Entry<'_>) -> String {
    let (term, desc) = match *entry {
        Entry::Package(name) => {
            let link = package_link(cx, name, None).strong();
            let desc = cx.model().package(name).and_then(|doc| {
                let summary = first_sentence(&doc.comment);
                comment_block(cx, Holder::Package(doc), &summary, true)
            });
            (link + Rendered::text(" - package ") + Rendered::text(name), desc)
        }
        Entry::Class(class) => {
            let link = resolve(
                cx,
                &LinkRequest::new(LinkContext::Index, LinkTarget::Class(class)).strong(true),
            );
            let kind = class.kind.title().to_lowercase();
            let summary = class.summary();
            let desc = comment_block(cx, Holder::Class(class), &summary, true);
            let term = link
                + Rendered::text(&format!(" - {} in ", kind))
                + package_link(cx, &class.package, None);
            (term, desc)
        }
        Entry::Member(class, member) => {
            let label = if member.is_executable() {
                let params: Vec<String> = member
                    .parameters
                    .iter()
                    .map(|p| format!("{}{}", p.ty.type_name(), p.ty.dimension()))
                    .collect();
                format!("{}({})", member.name, params.join(", "))
            } else {
                member.name.clone()
            };
            let link = resolve(
                cx,
                &LinkRequest::new(LinkContext::Index, LinkTarget::Member(class, member))
                    .label(Rendered::text(&label))
                    .strong(true),
            );
            let summary = member.summary();
            let desc = comment_block(cx, Holder::Member(class, member), &summary, true);
            let term = link
                + Rendered::text(&format!(" - {} ", member_description(class, member)))
                + pre_qualified_class_link(cx, LinkContext::Index, class, false);
            (term, desc)
        }
    };
    format!(
        "<dt>{}</dt>\n<dd>{}</dd>\n",
        term,
        desc.unwrap_or_default()
    )
}

/// "Static method in class", "Constructor for class" and the like.
fn member_description(class: &ClassDoc, member: &MemberDoc) -> String {
    let owner = match class.kind {
        ClassKind::Annotation => "annotation type",
        ClassKind::Interface => "interface",
        ClassKind::Enum => "enum",
        ClassKind::Class => "class",
    };
    let what = match member.kind {
        MemberKind::Constructor => return format!("Constructor for {}", owner),
        MemberKind::EnumConstant => "Enum constant",
        MemberKind::AnnotationElement => "Element",
        MemberKind::Method => "method",
        MemberKind::Field => "variable",
    };
    match member.kind {
        MemberKind::Method | MemberKind::Field if member.is_static => {
            format!("Static {} in {}", what, owner)
        }
        MemberKind::Method => format!("Method in {}", owner),
        MemberKind::Field => format!("Variable in {}", owner),
        _ => format!("{} in {}", what, owner),
    }
}

pub fn all_classes(cx: &DocContext<'_>) -> String {
    let mut classes: Vec<&ClassDoc> = cx.docs.documented_classes().collect();
    classes.sort_by(|a, b| {
        a.name
            .cmp(&b.name)
            .then_with(|| a.qualified_name.cmp(&b.qualified_name))
    });

    let mut body = String::new();
    body.push_str("<h1 class=\"bar\">All Classes</h1>\n<div class=\"indexContainer\">\n<ul>\n");
    for class in classes {
        let link = resolve(
            cx,
            &LinkRequest::new(LinkContext::AllClassesFrame, LinkTarget::Class(class)),
        );
        let link = if class.is_interface() {
            link.wrap("<span class=\"interfaceName\">", "</span>")
        } else {
            link
        };
        body.push_str(&format!("<li>{}</li>\n", link));
    }
    body.push_str("</ul>\n</div>\n");

    page_shell(cx, "All Classes", &body)
}
