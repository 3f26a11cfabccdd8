//! Stable fragment identifiers for members.
//!
//! Anchors depend only on the declared name and signature, so every page
//! that links to a member computes the same id the member's own page
//! declares.

use crate::model::MemberDoc;

/// Primary anchor: `render(java.util.List<java.lang.String>)` becomes
/// `render-java.util.List-`. Fields and enum constants anchor on their name.
pub fn anchor_for(member: &MemberDoc) -> String {
    if !member.is_executable() {
        return html_name(&member.name);
    }
    let signature = member.signature();
    html_name(&format!(
        "{}{}",
        member.name,
        strip_type_arguments(&signature)
    ))
}

/// Secondary anchor built from erased parameter types, emitted only when a
/// parameter is a type variable. Old links into generic members use it.
pub fn legacy_anchor_for(member: &MemberDoc) -> Option<String> {
    if !member.is_executable() {
        return None;
    }
    let mut has_type_var = false;
    let params: Vec<String> = member
        .parameters
        .iter()
        .map(|p| {
            has_type_var |= p.ty.is_type_var();
            format!("{}{}", p.ty.erasure_name(), p.ty.dimension())
        })
        .collect();
    if !has_type_var {
        return None;
    }
    Some(html_name(&format!("{}({})", member.name, params.join(","))))
}

/// Drop everything inside `<...>`, including nested brackets.
pub fn strip_type_arguments(signature: &str) -> String {
    let mut depth = 0usize;
    let mut out = String::with_capacity(signature.len());
    for c in signature.chars() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

/// Turn a member name or signature into a valid HTML id.
pub fn html_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 3);
    if name.starts_with('$') || name.starts_with('_') {
        out.push_str("Z:Z");
    }
    for c in name.chars() {
        match c {
            '(' | ')' | '<' | '>' | ',' => out.push('-'),
            ' ' | '[' => {}
            ']' => out.push_str(":A"),
            '$' => out.push_str(":D"),
            c => out.push(c),
        }
    }
    out
}
