//! Link resolution: turn a reference to a class, type, member or package
//! into markup relative to the current page.
//!
//! Resolution never fails. A target that has no page here and no external
//! documentation renders as its plain label; callers decide whether that
//! deserves a warning.

pub mod policy;

pub use policy::{policy_for, LinkContext, LinkPolicy};

use crate::anchor::anchor_for;
use crate::context::DocContext;
use crate::doc_path::{DocLink, DocPath, PACKAGE_SUMMARY};
use crate::html::Rendered;
use crate::model::{ClassDoc, ClassKind, MemberDoc, TypeRef};

#[derive(Debug, Clone, Copy)]
pub enum LinkTarget<'a> {
    Class(&'a ClassDoc),
    Type(&'a TypeRef),
    Member(&'a ClassDoc, &'a MemberDoc),
    Package(&'a str),
}

/// One link to render. Built with [`LinkRequest::new`] and the chained
/// setters; the policy comes from the context unless overridden.
#[derive(Debug, Clone)]
pub struct LinkRequest<'a> {
    pub context: LinkContext,
    pub target: LinkTarget<'a>,
    pub policy: LinkPolicy,
    pub label: Option<Rendered>,
    pub fragment: Option<String>,
    pub strong: bool,
    pub link_to_self: bool,
}

impl<'a> LinkRequest<'a> {
    pub fn new(context: LinkContext, target: LinkTarget<'a>) -> Self {
        let policy = policy_for(context);
        LinkRequest {
            context,
            target,
            policy,
            label: None,
            fragment: None,
            strong: policy.strong_by_default,
            link_to_self: true,
        }
    }

    pub fn label(mut self, label: Rendered) -> Self {
        self.label = Some(label);
        self
    }

    pub fn fragment(mut self, fragment: impl Into<String>) -> Self {
        self.fragment = Some(fragment.into());
        self
    }

    pub fn strong(mut self, strong: bool) -> Self {
        self.strong = strong;
        self
    }

    pub fn link_to_self(mut self, link_to_self: bool) -> Self {
        self.link_to_self = link_to_self;
        self
    }

    pub fn policy(mut self, policy: LinkPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Request for a type nested in this one (argument or bound).
    fn nested<'b>(&self, target: LinkTarget<'b>) -> LinkRequest<'b> {
        LinkRequest {
            context: self.context,
            target,
            policy: self.policy,
            label: None,
            fragment: None,
            strong: false,
            link_to_self: self.link_to_self,
        }
    }
}

#[derive(Clone, Copy)]
enum ClassRef<'a> {
    Known(&'a ClassDoc),
    /// Qualified name of a class the model does not describe.
    Named(&'a str),
}

pub fn resolve(cx: &DocContext<'_>, req: &LinkRequest<'_>) -> Rendered {
    match req.target {
        LinkTarget::Package(name) => package_link(cx, name, req.label.clone()),
        LinkTarget::Member(class, member) => member_link(cx, req, class, member),
        LinkTarget::Class(class) => {
            let params: Vec<TypeRef> = class
                .type_params
                .iter()
                .map(|p| p.as_type_var(Some(&class.qualified_name)))
                .collect();
            class_link(cx, req, ClassRef::Known(class), &params)
        }
        LinkTarget::Type(ty) => type_link(cx, req, ty),
    }
}

fn type_link(cx: &DocContext<'_>, req: &LinkRequest<'_>, ty: &TypeRef) -> Rendered {
    match ty {
        TypeRef::Primitive { name, dimension } => {
            let label = req.label.clone().unwrap_or_else(|| Rendered::text(name));
            label + Rendered::text(dimension)
        }
        TypeRef::Wildcard {
            extends,
            super_bounds,
        } => {
            let mut out = Rendered::text("?");
            for (i, bound) in extends.iter().enumerate() {
                out = out + Rendered::text(if i > 0 { ", " } else { " extends " });
                out = out + type_link(cx, &req.nested(LinkTarget::Type(bound)), bound);
            }
            for (i, bound) in super_bounds.iter().enumerate() {
                out = out + Rendered::text(if i > 0 { ", " } else { " super " });
                out = out + type_link(cx, &req.nested(LinkTarget::Type(bound)), bound);
            }
            out
        }
        TypeRef::TypeVar {
            name,
            bounds,
            owner,
            dimension,
        } => {
            let owner = owner.as_deref().and_then(|o| cx.model().class(o));
            let mut out = match owner {
                Some(class) if req.policy.include_type_params => {
                    let label = req.label.clone().unwrap_or_else(|| Rendered::text(name));
                    let link_req = LinkRequest {
                        label: Some(label),
                        ..req.clone()
                    };
                    type_var_link(cx, &link_req, class)
                }
                // method type parameters have no page of their own
                _ => req.label.clone().unwrap_or_else(|| Rendered::text(name)),
            };
            if !req.policy.exclude_bounds && !bounds.is_empty() {
                let mut bound_req = req.nested(LinkTarget::Type(ty));
                bound_req.policy.exclude_bounds = true;
                for (i, bound) in bounds.iter().enumerate() {
                    out = out + Rendered::text(if i > 0 { " & " } else { " extends " });
                    let bound_req = LinkRequest {
                        target: LinkTarget::Type(bound),
                        ..bound_req.clone()
                    };
                    out = out + type_link(cx, &bound_req, bound);
                }
            }
            out + Rendered::text(dimension)
        }
        TypeRef::Class {
            qualified_name,
            type_args,
            dimension,
        } => {
            let class = match cx.model().class(qualified_name) {
                Some(c) => ClassRef::Known(c),
                None => ClassRef::Named(qualified_name),
            };
            class_link(cx, req, class, type_args) + Rendered::text(dimension)
        }
    }
}

/// A type variable links to the page of the class declaring it.
fn type_var_link(cx: &DocContext<'_>, req: &LinkRequest<'_>, owner: &ClassDoc) -> Rendered {
    let label = req.label.clone().unwrap_or_default();
    let label = if req.strong { label.strong() } else { label };
    match class_href(cx, req, owner) {
        Some(href) => Rendered::hyperlink(
            &href,
            label,
            &format!("type parameter in {}", owner.name),
        ),
        None => label,
    }
}

/// Where a link to `class` points from the current page, if anywhere.
fn class_href(cx: &DocContext<'_>, req: &LinkRequest<'_>, class: &ClassDoc) -> Option<String> {
    let docs = cx.docs;
    let fragment = req.fragment.as_deref();
    if docs.is_included(class) {
        if !docs.is_generated(class) {
            return None;
        }
        let path = DocPath::for_class(class);
        if !req.link_to_self && path == cx.page.path {
            return None;
        }
        let link = DocLink::new(cx.path_to_root().resolve(path.as_str()).as_str()).fragment(fragment);
        return Some(link.to_string());
    }
    docs.externs
        .external_link(
            &class.package,
            cx.path_to_root(),
            &format!("{}.html", class.name),
            fragment,
        )
        .map(|link| link.to_string())
}

fn class_link(
    cx: &DocContext<'_>,
    req: &LinkRequest<'_>,
    class: ClassRef<'_>,
    type_params: &[TypeRef],
) -> Rendered {
    let no_label = req.label.is_none();
    let label = match (&req.label, class) {
        (Some(label), _) => label.clone(),
        (None, ClassRef::Known(c)) if cx.docs.is_linkable(c) => Rendered::text(&c.name),
        (None, ClassRef::Known(c)) => Rendered::text(cx.config().class_name(c)),
        (None, ClassRef::Named(qn)) => Rendered::text(cx.config().qualified_name(qn)),
    };
    let label = if req.strong { label.strong() } else { label };

    let link = match class {
        ClassRef::Known(c) => match class_href(cx, req, c) {
            Some(href) => {
                let title = if req.fragment.is_none() {
                    class_title(c)
                } else {
                    String::new()
                };
                Rendered::hyperlink(&href, label, &title)
            }
            None => label,
        },
        ClassRef::Named(qn) => match external_class(cx, qn, req.fragment.as_deref()) {
            Some((link, package, class_name)) => {
                let label = match req.label {
                    Some(_) => label,
                    None if req.strong => Rendered::text(class_name).strong(),
                    None => Rendered::text(class_name),
                };
                let title = format!("class or interface in {}", package);
                Rendered::hyperlink(&link.to_string(), label, &title)
            }
            None => label,
        },
    };

    let mut out = link;
    if no_label && req.policy.include_type_params {
        out = out + type_parameter_links(cx, req, type_params, true);
    }
    if req.policy.include_type_as_separate_link {
        out = out + type_parameter_links(cx, req, type_params, false);
    }
    out
}

fn class_title(class: &ClassDoc) -> String {
    let kind = match class.kind {
        ClassKind::Annotation => "annotation",
        ClassKind::Interface => "interface",
        ClassKind::Enum => "enum",
        ClassKind::Class => "class",
    };
    format!("{} in {}", kind, class.package)
}

/// `&lt;A,B&gt;` for the given parameters, when the policy places them
/// inside the label (`as_class_label`) or after the link.
fn type_parameter_links(
    cx: &DocContext<'_>,
    req: &LinkRequest<'_>,
    params: &[TypeRef],
    as_class_label: bool,
) -> Rendered {
    let wanted = (req.policy.include_type_in_label && as_class_label)
        || (req.policy.include_type_as_separate_link && !as_class_label);
    if !wanted || params.is_empty() {
        return Rendered::empty();
    }
    let links = params
        .iter()
        .map(|p| type_link(cx, &req.nested(LinkTarget::Type(p)), p));
    Rendered::raw("&lt;") + Rendered::join(links, ",") + Rendered::raw("&gt;")
}

fn member_link(
    cx: &DocContext<'_>,
    req: &LinkRequest<'_>,
    class: &ClassDoc,
    member: &MemberDoc,
) -> Rendered {
    let label = req
        .label
        .clone()
        .unwrap_or_else(|| Rendered::text(&member.name));
    if !(cx.docs.is_member_included(class, member) || cx.docs.is_linkable(class)) {
        return if req.strong { label.strong() } else { label };
    }
    let fragment = req
        .fragment
        .clone()
        .unwrap_or_else(|| anchor_for(member));
    let class_req = LinkRequest {
        target: LinkTarget::Class(class),
        label: Some(label),
        fragment: Some(fragment),
        ..req.clone()
    };
    class_link(cx, &class_req, ClassRef::Known(class), &[])
}

/// Link to a package summary, here or in external documentation.
pub fn package_link(cx: &DocContext<'_>, name: &str, label: Option<Rendered>) -> Rendered {
    let label = label.unwrap_or_else(|| Rendered::text(name));
    if cx.docs.is_package_included(name) {
        let path = cx
            .path_to_root()
            .resolve(DocPath::for_package(name).resolve(PACKAGE_SUMMARY).as_str());
        return Rendered::hyperlink(path.as_str(), label, "");
    }
    match cross_package_link(cx, name) {
        Some(link) => Rendered::hyperlink(&link.to_string(), label, ""),
        None => label,
    }
}

pub fn cross_package_link(cx: &DocContext<'_>, name: &str) -> Option<DocLink> {
    cx.docs
        .externs
        .external_link(name, cx.path_to_root(), PACKAGE_SUMMARY, None)
}

/// Link to a class known only by qualified name. Package prefixes are tried
/// from the longest down, so `java.util.Map.Entry` finds `java.util`.
/// Without `label` the class part of the name is used, in `<code>` when
/// `code` is set.
pub fn cross_class_link(
    cx: &DocContext<'_>,
    qualified_name: &str,
    fragment: Option<&str>,
    label: Option<Rendered>,
    code: bool,
) -> Option<Rendered> {
    let (link, package, class_name) = external_class(cx, qualified_name, fragment)?;
    let label = label.unwrap_or_else(|| {
        let text = Rendered::text(class_name);
        if code {
            text.code()
        } else {
            text
        }
    });
    let title = format!("class or interface in {}", package);
    Some(Rendered::hyperlink(&link.to_string(), label, &title))
}

/// External link for a qualified class name, with the package and class
/// parts it was split into.
fn external_class<'n>(
    cx: &DocContext<'_>,
    qualified_name: &'n str,
    fragment: Option<&str>,
) -> Option<(DocLink, &'n str, &'n str)> {
    let mut package = qualified_name;
    while let Some(dot) = package.rfind('.') {
        let class_name = &qualified_name[dot + 1..];
        package = &qualified_name[..dot];
        let link = cx.docs.externs.external_link(
            package,
            cx.path_to_root(),
            &format!("{}.html", class_name),
            fragment,
        );
        if let Some(link) = link {
            return Some((link, package, class_name));
        }
    }
    None
}

/// `com.acme.` in plain text followed by the linked simple name.
pub fn pre_qualified_class_link(
    cx: &DocContext<'_>,
    context: LinkContext,
    class: &ClassDoc,
    strong: bool,
) -> Rendered {
    let qualifier = Rendered::text(&cx.config().package_qualifier(&class.package));
    let req = LinkRequest::new(context, LinkTarget::Class(class))
        .label(Rendered::text(&class.name))
        .strong(strong);
    qualifier + resolve(cx, &req)
}
