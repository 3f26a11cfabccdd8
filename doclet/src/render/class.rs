//! Class, interface, enum and annotation type pages.

use super::page_shell;
use crate::anchor::{anchor_for, legacy_anchor_for};
use crate::annotation::annotation_info;
use crate::comment::comment_block;
use crate::context::DocContext;
use crate::html::{html_escape, Rendered};
use crate::link::{resolve, LinkContext, LinkRequest, LinkTarget};
use crate::model::{ClassDoc, ClassKind, Holder, MemberDoc, MemberKind};

/// Member sections in page order.
const SECTIONS: [MemberKind; 5] = [
    MemberKind::EnumConstant,
    MemberKind::Field,
    MemberKind::AnnotationElement,
    MemberKind::Constructor,
    MemberKind::Method,
];

const DEPRECATED: &str = "<div class=\"block\"><span class=\"deprecatedLabel\">Deprecated.</span></div>\n";

pub fn render(cx: &DocContext<'_>, class: &ClassDoc) -> String {
    let title = class.kind.title();
    let mut body = String::new();

    body.push_str("<div class=\"header\">\n");
    if !class.package.is_empty() {
        body.push_str(&format!(
            "<div class=\"subTitle\">{}</div>\n",
            html_escape(&class.package)
        ));
    }
    let heading = resolve(
        cx,
        &LinkRequest::new(LinkContext::ClassHeader, LinkTarget::Class(class)).link_to_self(false),
    );
    body.push_str(&format!(
        "<h2 title=\"{} {}\" class=\"title\">{} {}</h2>\n</div>\n",
        title,
        html_escape(&class.name),
        title,
        heading
    ));

    body.push_str("<div class=\"contentContainer\">\n<div class=\"description\">\n");
    body.push_str(&format!("<pre>{}</pre>\n", signature(cx, class)));
    if class.deprecated {
        body.push_str(DEPRECATED);
    }
    if let Some(block) = comment_block(cx, Holder::Class(class), &class.comment, false) {
        body.push_str(block.as_str());
        body.push('\n');
    }
    body.push_str("</div>\n");

    for kind in SECTIONS {
        let members = members_of(cx, class, kind);
        if !members.is_empty() {
            body.push_str(&summary_table(cx, class, kind, &members));
        }
    }
    for kind in SECTIONS {
        let members = members_of(cx, class, kind);
        if members.is_empty() {
            continue;
        }
        body.push_str(&format!("<h3>{} Detail</h3>\n", kind.title()));
        for member in members {
            body.push_str(&member_detail(cx, class, member));
        }
    }
    body.push_str("</div>\n");

    page_shell(cx, &format!("{} ({})", class.name, class.package), &body)
}

fn members_of<'a>(cx: &DocContext<'_>, class: &'a ClassDoc, kind: MemberKind) -> Vec<&'a MemberDoc> {
    class
        .members
        .iter()
        .filter(|m| m.kind == kind && cx.docs.is_member_included(class, m))
        .collect()
}

/// `@Marker public class Widget<T>\nextends Base\nimplements Shape`
fn signature(cx: &DocContext<'_>, class: &ClassDoc) -> Rendered {
    let mut sig = annotation_info(cx, &class.annotations, 0, true).unwrap_or_default();
    let modifiers: Vec<&str> = [class.visibility.keyword(), class.kind.keyword()]
        .into_iter()
        .filter(|m| !m.is_empty())
        .collect();
    sig = sig + Rendered::text(&format!("{} ", modifiers.join(" ")));

    let name = resolve(
        cx,
        &LinkRequest::new(LinkContext::ClassSignature, LinkTarget::Class(class)).link_to_self(false),
    );
    sig = sig + name.wrap("<span class=\"typeNameLabel\">", "</span>");

    if class.kind == ClassKind::Class {
        if let Some(ref superclass) = class.superclass {
            let req = LinkRequest::new(
                LinkContext::ClassSignatureParentName,
                LinkTarget::Type(superclass),
            );
            sig = sig + Rendered::text("\nextends ") + resolve(cx, &req);
        }
    }
    if !class.interfaces.is_empty() {
        let keyword = if class.is_interface() {
            "\nextends "
        } else {
            "\nimplements "
        };
        let links = class.interfaces.iter().map(|ty| {
            resolve(
                cx,
                &LinkRequest::new(LinkContext::ImplementedInterfaces, LinkTarget::Type(ty)),
            )
        });
        sig = sig + Rendered::text(keyword) + Rendered::join(links, ", ");
    }
    sig
}

fn summary_table(
    cx: &DocContext<'_>,
    class: &ClassDoc,
    kind: MemberKind,
    members: &[&MemberDoc],
) -> String {
    let mut out = format!(
        "<h3>{} Summary</h3>\n<table class=\"memberSummary\">\n",
        kind.title()
    );
    for &member in members {
        let name = resolve(
            cx,
            &LinkRequest::new(LinkContext::Member, LinkTarget::Member(class, member))
                .label(Rendered::text(&member.name)),
        )
        .wrap("<span class=\"memberNameLink\">", "</span>");
        let params = if member.is_executable() {
            parameters(cx, member, None)
        } else {
            Rendered::empty()
        };
        let summary = member.summary();
        let desc = comment_block(cx, Holder::Member(class, member), &summary, true);
        out.push_str(&format!(
            "<tr><td><code>{}</code></td><th><code>{}{}</code>\n{}</th></tr>\n",
            member_type(cx, member, LinkContext::SummaryReturnType),
            name,
            params,
            desc.unwrap_or_default()
        ));
    }
    out.push_str("</table>\n");
    out
}

/// Modifiers, method type parameters and the field or return type.
fn member_type(cx: &DocContext<'_>, member: &MemberDoc, context: LinkContext) -> Rendered {
    let mut out = Rendered::empty();
    if member.is_static {
        out = Rendered::text("static ");
    }
    if !member.type_params.is_empty() {
        let vars: Vec<_> = member.type_params.iter().map(|p| p.as_type_var(None)).collect();
        let links = vars.iter().map(|var| {
            resolve(
                cx,
                &LinkRequest::new(LinkContext::MemberTypeParams, LinkTarget::Type(var)),
            )
        });
        out = out
            + Rendered::raw("&lt;")
            + Rendered::join(links, ",")
            + Rendered::raw("&gt;")
            + Rendered::text(" ");
    }
    if let Some(ref ty) = member.ty {
        out = out + resolve(cx, &LinkRequest::new(context, LinkTarget::Type(ty)));
    }
    out
}

/// Parameter list; with `indent`, each parameter after the first starts a
/// new line aligned under the first.
fn parameters(cx: &DocContext<'_>, member: &MemberDoc, indent: Option<usize>) -> Rendered {
    let params = member.parameters.iter().map(|p| {
        let annotations = annotation_info(cx, &p.annotations, 0, false)
            .map(|a| a + Rendered::text(" "))
            .unwrap_or_default();
        let ty = resolve(
            cx,
            &LinkRequest::new(LinkContext::ExecutableMemberParam, LinkTarget::Type(&p.ty)),
        );
        annotations + ty + Rendered::text(" ") + Rendered::text(&p.name)
    });
    let sep = match indent {
        Some(width) => format!(",\n{}", " ".repeat(width + 1)),
        None => ", ".to_string(),
    };
    Rendered::text("(") + Rendered::join(params, &sep) + Rendered::text(")")
}

fn member_detail(cx: &DocContext<'_>, class: &ClassDoc, member: &MemberDoc) -> String {
    let mut out = format!("<a id=\"{}\"></a>\n", anchor_for(member));
    if let Some(legacy) = legacy_anchor_for(member) {
        out.push_str(&format!("<a id=\"{}\"></a>\n", legacy));
    }
    out.push_str("<ul class=\"blockList\">\n<li class=\"blockList\">\n");
    out.push_str(&format!("<h4>{}</h4>\n", html_escape(&member.name)));

    let annotations = annotation_info(cx, &member.annotations, 0, true).unwrap_or_default();
    let mut sig = Rendered::empty();
    let visibility = member.visibility.keyword();
    if !visibility.is_empty() {
        sig = sig + Rendered::text(visibility) + Rendered::text(" ");
    }
    let ty = member_type(cx, member, LinkContext::ReturnType);
    if !ty.is_empty() {
        sig = sig + ty + Rendered::text(" ");
    }
    sig = sig + Rendered::text(&member.name).wrap("<span class=\"memberNameLabel\">", "</span>");
    if member.is_executable() {
        let width = sig.len();
        sig = sig + parameters(cx, member, Some(width));
    }
    out.push_str(&format!("<pre>{}{}</pre>\n", annotations, sig));

    if member.deprecated {
        out.push_str(DEPRECATED);
    }
    if let Some(block) = comment_block(cx, Holder::Member(class, member), &member.comment, false) {
        out.push_str(block.as_str());
        out.push('\n');
    }
    if let Some(ref value) = member.constant_value {
        out.push_str(&format!(
            "<dl>\n<dt><span class=\"seeLabel\">Constant value:</span></dt>\n<dd><code>{}</code></dd>\n</dl>\n",
            html_escape(value)
        ));
    }
    out.push_str("</li>\n</ul>\n");
    out
}
