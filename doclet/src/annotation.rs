//! Annotation rendering for declarations and parameters.

use crate::context::DocContext;
use crate::html::Rendered;
use crate::link::{resolve, LinkContext, LinkRequest, LinkTarget};
use crate::model::{AnnotationDesc, AnnotationValue, MemberRef, TypeRef};
use std::slice;

/// All documented annotations in `descs`, space separated, or `None` when
/// nothing is shown.
pub fn annotation_info(
    cx: &DocContext<'_>,
    descs: &[AnnotationDesc],
    indent: usize,
    line_break: bool,
) -> Option<Rendered> {
    let parts = annotations(cx, descs, indent, line_break);
    if parts.is_empty() {
        None
    } else {
        Some(Rendered::join(parts, " "))
    }
}

/// One fragment per shown annotation. With `line_break` each fragment ends
/// in a newline and element pairs after the first are put on their own line,
/// aligned `indent` columns past the opening parenthesis.
pub fn annotations(
    cx: &DocContext<'_>,
    descs: &[AnnotationDesc],
    indent: usize,
    line_break: bool,
) -> Vec<Rendered> {
    descs
        .iter()
        .filter_map(|desc| annotation(cx, desc, indent, line_break))
        .collect()
}

fn annotation(
    cx: &DocContext<'_>,
    desc: &AnnotationDesc,
    indent: usize,
    line_break: bool,
) -> Option<Rendered> {
    let repeated = repeated_annotation(desc);
    let contained_documented = repeated.is_some_and(|a| a.documented);
    if !desc.documented && !contained_documented {
        return None;
    }

    let out = if desc.synthesized {
        // compiler-made container: show only what it holds
        let values = desc.elements.iter().flat_map(|e| element_values(&e.value));
        Rendered::join(values.map(|v| value(cx, v)), " ")
    } else if repeated.is_some() {
        if desc.elements.len() == 1 && contained_documented {
            let values = element_values(&desc.elements[0].value);
            Rendered::join(values.into_iter().map(|v| value(cx, v)), " ")
        } else {
            element_pairs(cx, desc, indent, false)
        }
    } else {
        element_pairs(cx, desc, indent, line_break)
    };

    Some(if line_break {
        out + Rendered::raw("\n")
    } else {
        out
    })
}

/// The first annotation held by an element whose value is an array of
/// several annotations, i.e. the contents of a repeatable-annotation
/// container.
fn repeated_annotation(desc: &AnnotationDesc) -> Option<&AnnotationDesc> {
    desc.elements.iter().find_map(|e| match e.value {
        AnnotationValue::Array { ref values } if values.len() > 1 => match values[0] {
            AnnotationValue::Annotation(ref inner) => Some(inner),
            _ => None,
        },
        _ => None,
    })
}

fn element_values(v: &AnnotationValue) -> Vec<&AnnotationValue> {
    match v {
        AnnotationValue::Array { values } => values.iter().collect(),
        other => vec![other],
    }
}

/// `@Name(a=1,b={x,y})`, each part linked where possible.
fn element_pairs(
    cx: &DocContext<'_>,
    desc: &AnnotationDesc,
    indent: usize,
    line_break: bool,
) -> Rendered {
    let known = cx.model().class(&desc.annotation_type);
    let fallback = TypeRef::class(&desc.annotation_type);
    let simple_name = match known {
        Some(c) => c.name.as_str(),
        None => fallback.type_name(),
    };
    let target = match known {
        Some(c) => LinkTarget::Class(c),
        None => LinkTarget::Type(&fallback),
    };
    let req = LinkRequest::new(LinkContext::Annotation, target)
        .label(Rendered::text(&format!("@{}", simple_name)));
    let mut out = resolve(cx, &req);
    if desc.elements.is_empty() {
        return out;
    }

    out = out + Rendered::text("(");
    for (j, pair) in desc.elements.iter().enumerate() {
        if j > 0 {
            out = out + Rendered::text(",");
            if line_break {
                let spaces = simple_name.len() + 2 + indent;
                out = out + Rendered::raw("\n") + Rendered::text(&" ".repeat(spaces));
            }
        }
        out = out + element_link(cx, desc, &pair.name) + Rendered::text("=");
        let values = element_values(&pair.value);
        let braces = values.len() != 1;
        if braces {
            out = out + Rendered::text("{");
        }
        out = out + Rendered::join(values.into_iter().map(|v| value(cx, v)), ",");
        if braces {
            out = out + Rendered::text("}");
        }
    }
    out + Rendered::text(")")
}

fn element_link(cx: &DocContext<'_>, desc: &AnnotationDesc, name: &str) -> Rendered {
    let element = cx
        .model()
        .class(&desc.annotation_type)
        .and_then(|c| c.member(name).map(|m| (c, m)));
    match element {
        Some((class, member)) => {
            let req = LinkRequest::new(LinkContext::Annotation, LinkTarget::Member(class, member))
                .label(Rendered::text(name));
            resolve(cx, &req)
        }
        None => Rendered::text(name),
    }
}

fn value(cx: &DocContext<'_>, v: &AnnotationValue) -> Rendered {
    match v {
        AnnotationValue::Literal { text } => Rendered::text(text),
        AnnotationValue::Class { ty } => class_value(cx, ty),
        AnnotationValue::Annotation(inner) => {
            Rendered::concat(annotations(cx, slice::from_ref(inner), 0, false))
        }
        AnnotationValue::Enum { class, name } => {
            let reference = MemberRef {
                class: class.clone(),
                name: name.clone(),
                signature: None,
            };
            match cx.model().find_member(&reference) {
                Some((class, member)) => {
                    let req =
                        LinkRequest::new(LinkContext::Annotation, LinkTarget::Member(class, member))
                            .label(Rendered::text(name));
                    resolve(cx, &req)
                }
                None => Rendered::text(name),
            }
        }
        AnnotationValue::Array { values } => {
            Rendered::text("{")
                + Rendered::join(values.iter().map(|v| value(cx, v)), ",")
                + Rendered::text("}")
        }
    }
}

/// `Widget.class`, linked; unqualified only when the class is documented here.
fn class_value(cx: &DocContext<'_>, ty: &TypeRef) -> Rendered {
    match ty {
        TypeRef::Class {
            qualified_name,
            dimension,
            ..
        } => {
            let name = match cx.model().class(qualified_name) {
                Some(c) if cx.docs.is_included(c) => c.name.as_str(),
                _ => qualified_name.as_str(),
            };
            let raw = TypeRef::class(qualified_name);
            let req = LinkRequest::new(LinkContext::Annotation, LinkTarget::Type(&raw))
                .label(Rendered::text(&format!("{}{}.class", name, dimension)));
            resolve(cx, &req)
        }
        other => Rendered::text(&format!("{}{}.class", other.type_name(), other.dimension())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Fixture, JDK_API};

    fn descs(json: &str) -> Vec<AnnotationDesc> {
        serde_json::from_str(json).unwrap()
    }

    const MARKER_LINK: &str =
        "<a href=\"../../com/acme/Marker.html\" title=\"annotation in com.acme\">@Marker</a>";

    #[test]
    fn declaration_annotation_with_line_break() {
        let fx = Fixture::new();
        let docs = fx.docs();
        let cx = fx.on_class(&docs, "com.acme.Widget");
        let widget = fx.class("com.acme.Widget");
        let out = annotations(&cx, &widget.annotations, 0, true);
        assert_eq!(out.len(), 1);
        assert_eq!(
            out[0].as_str(),
            format!(
                "{}(<a href=\"../../com/acme/Marker.html#value--\">value</a>=&quot;main&quot;)\n",
                MARKER_LINK
            )
        );
    }

    #[test]
    fn undocumented_annotations_are_skipped() {
        let fx = Fixture::new();
        let docs = fx.docs();
        let cx = fx.on_class(&docs, "com.acme.Widget");
        let list = descs(r#"[{"annotation_type": "java.lang.SuppressWarnings"}]"#);
        assert!(annotations(&cx, &list, 0, false).is_empty());
        assert!(annotation_info(&cx, &list, 0, false).is_none());
    }

    #[test]
    fn no_elements_no_parentheses() {
        let fx = Fixture::new();
        let docs = fx.docs();
        let cx = fx.on_class(&docs, "com.acme.Widget");
        let list = descs(r#"[{"annotation_type": "com.acme.Marker", "documented": true}]"#);
        let out = annotation_info(&cx, &list, 0, false).unwrap();
        assert_eq!(out.as_str(), MARKER_LINK);
        assert_eq!(out.len(), "@Marker".len());
    }

    #[test]
    fn later_pairs_are_indented() {
        let fx = Fixture::new();
        let docs = fx.docs();
        let cx = fx.on_class(&docs, "com.acme.Widget");
        let list = descs(
            r#"[{"annotation_type": "com.acme.Marker", "documented": true, "elements": [
                 {"name": "a", "value": {"kind": "literal", "text": "1"}},
                 {"name": "b", "value": {"kind": "literal", "text": "2"}}]}]"#,
        );
        let out = annotations(&cx, &list, 4, true);
        let expected = format!("{}(a=1,\n{}b=2)\n", MARKER_LINK, " ".repeat(12));
        assert_eq!(out[0].as_str(), expected);

        let flat = annotations(&cx, &list, 4, false);
        assert_eq!(flat[0].as_str(), format!("{}(a=1,b=2)", MARKER_LINK));
    }

    #[test]
    fn arrays_get_braces_unless_single() {
        let fx = Fixture::new();
        let docs = fx.docs();
        let cx = fx.on_class(&docs, "com.acme.Widget");
        let list = descs(
            r#"[{"annotation_type": "org.x.Names", "documented": true, "elements": [
                 {"name": "one", "value": {"kind": "array", "values": [{"kind": "literal", "text": "\"a\""}]}},
                 {"name": "many", "value": {"kind": "array", "values": [
                    {"kind": "literal", "text": "1"}, {"kind": "literal", "text": "2"}]}},
                 {"name": "none", "value": {"kind": "array", "values": []}}]}]"#,
        );
        let out = annotation_info(&cx, &list, 0, false).unwrap();
        assert_eq!(out.as_str(), "@Names(one=&quot;a&quot;,many={1,2},none={})");
    }

    #[test]
    fn class_and_enum_values() {
        let fx = Fixture::new();
        let docs = fx.docs();
        let cx = fx.on_class(&docs, "com.acme.Widget");
        let list = descs(
            r#"[{"annotation_type": "org.x.Config", "documented": true, "elements": [
                 {"name": "type", "value": {"kind": "class", "type": {"kind": "class", "qualified_name": "java.lang.String"}}},
                 {"name": "local", "value": {"kind": "class", "type": {"kind": "class", "qualified_name": "com.acme.Base", "dimension": "[]"}}},
                 {"name": "raw", "value": {"kind": "class", "type": {"kind": "primitive", "name": "int", "dimension": "[]"}}},
                 {"name": "color", "value": {"kind": "enum", "class": "com.acme.Color", "name": "RED"}}]}]"#,
        );
        let out = annotation_info(&cx, &list, 0, false).unwrap();
        let html = out.as_str();
        assert!(html.contains(&format!(
            "type=<a href=\"{}/java/lang/String.html?is-external=true\" title=\"class in java.lang\">java.lang.String.class</a>",
            JDK_API
        )));
        assert!(html.contains("local=<a href=\"../../com/acme/Base.html\" title=\"class in com.acme\">Base[].class</a>"));
        assert!(html.contains("raw=int[].class"));
        assert!(html.contains("color=<a href=\"../../com/acme/Color.html#RED\">RED</a>"));
    }

    #[test]
    fn nested_annotation_value() {
        let fx = Fixture::new();
        let docs = fx.docs();
        let cx = fx.on_class(&docs, "com.acme.Widget");
        let list = descs(
            r#"[{"annotation_type": "org.x.Outer", "documented": true, "elements": [
                 {"name": "inner", "value": {"kind": "annotation", "annotation_type": "com.acme.Marker",
                   "documented": true, "elements": [
                     {"name": "value", "value": {"kind": "literal", "text": "1"}},
                     {"name": "other", "value": {"kind": "literal", "text": "2"}}]}}]}]"#,
        );
        let out = annotation_info(&cx, &list, 0, true).unwrap();
        // nested annotations never break lines
        assert_eq!(out.as_str().matches('\n').count(), 1);
        assert!(out.as_str().starts_with("@Outer(inner=<a href=\"../../com/acme/Marker.html\""));
    }

    const TWO_TAGS: &str = r#"[
        {"kind": "annotation", "annotation_type": "org.x.Tag", "documented": true,
         "elements": [{"name": "value", "value": {"kind": "literal", "text": "\"a\""}}]},
        {"kind": "annotation", "annotation_type": "org.x.Tag", "documented": true,
         "elements": [{"name": "value", "value": {"kind": "literal", "text": "\"b\""}}]}]"#;

    #[test]
    fn synthesized_container_shows_contents() {
        let fx = Fixture::new();
        let docs = fx.docs();
        let cx = fx.on_class(&docs, "com.acme.Widget");
        let json = format!(
            r#"[{{"annotation_type": "org.x.Tags", "synthesized": true, "elements": [
                 {{"name": "value", "value": {{"kind": "array", "values": {}}}}}]}}]"#,
            TWO_TAGS
        );
        let out = annotations(&cx, &descs(&json), 0, true);
        assert_eq!(out.len(), 1);
        assert_eq!(
            out[0].as_str(),
            "@Tag(value=&quot;a&quot;) @Tag(value=&quot;b&quot;)\n"
        );
    }

    #[test]
    fn explicit_container_unwraps_documented_contents() {
        let fx = Fixture::new();
        let docs = fx.docs();
        let cx = fx.on_class(&docs, "com.acme.Widget");
        let json = format!(
            r#"[{{"annotation_type": "org.x.Tags", "elements": [
                 {{"name": "value", "value": {{"kind": "array", "values": {}}}}}]}}]"#,
            TWO_TAGS
        );
        let out = annotations(&cx, &descs(&json), 0, false);
        assert_eq!(out[0].as_str(), "@Tag(value=&quot;a&quot;) @Tag(value=&quot;b&quot;)");
    }

    #[test]
    fn documented_container_of_undocumented_annotations() {
        let fx = Fixture::new();
        let docs = fx.docs();
        let cx = fx.on_class(&docs, "com.acme.Widget");
        let json = r#"[{"annotation_type": "org.x.Tags", "documented": true, "elements": [
             {"name": "value", "value": {"kind": "array", "values": [
               {"kind": "annotation", "annotation_type": "org.x.Tag"},
               {"kind": "annotation", "annotation_type": "org.x.Tag"}]}},
             {"name": "extra", "value": {"kind": "literal", "text": "1"}}]}]"#;
        let out = annotations(&cx, &descs(json), 0, true);
        // container printed on one line; its undocumented contents vanish
        assert_eq!(out[0].as_str(), "@Tags(value={,},extra=1)\n");
    }
}
