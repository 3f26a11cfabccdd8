//! Doc comment expansion: text spans and inline tags to HTML.
//!
//! Text spans are copied as HTML after a fixed series of rewrites. Inline
//! tags resolve through the link resolver. Nothing here fails; problems are
//! reported as warnings and the best available text is emitted.

use crate::anchor::{html_name, strip_type_arguments};
use crate::context::DocContext;
use crate::doc_path::DocPath;
use crate::html::Rendered;
use crate::link::{
    cross_class_link, cross_package_link, package_link, resolve, LinkContext, LinkRequest,
    LinkTarget,
};
use crate::model::{Holder, MemberKind, MemberRef, Position, SeeTag, Tag};
use regex::Regex;
use std::borrow::Cow;
use std::ops::Range;
use std::sync::LazyLock;

static RE_DOC_ROOT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\{@docroot\}").unwrap());
static RE_ABSOLUTE_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(mailto|https?|file):").unwrap());

/// Block-level elements dropped from first sentences so summaries stay
/// inline.
const BLOCK_TAGS: &[&str] = &[
    "address", "blockquote", "body", "caption", "center", "dd", "dir", "div", "dl", "dt",
    "frame", "frameset", "h1", "h2", "h3", "h4", "h5", "h6", "head", "hr", "html", "li",
    "menu", "noframes", "noscript", "ol", "p", "pre", "script", "table", "tbody", "td",
    "tfoot", "th", "thead", "title", "tr", "ul",
];

/// Expand a tag sequence. `holder_tag` names the block tag the sequence
/// belongs to (`@return`, `@param`), if any; `holder` is the documented
/// symbol. In first-sentence mode block-level markup is stripped.
pub fn expand(
    cx: &DocContext<'_>,
    holder_tag: Option<&str>,
    holder: Option<Holder<'_>>,
    tags: &[Tag],
    first_sentence: bool,
) -> Rendered {
    let mut out = Rendered::empty();
    let mut strip_parent = false;
    for (i, tag) in tags.iter().enumerate() {
        match tag {
            Tag::Text { text } => {
                let text = if std::mem::take(&mut strip_parent) {
                    Cow::Owned(text.replacen("/..", "", 1))
                } else {
                    Cow::Borrowed(text.as_str())
                };
                out = out + Rendered::raw(expand_text(cx, holder, &text, first_sentence));
            }
            Tag::See(see) => out = out + see_tag(cx, holder, see),
            Tag::DocRoot => {
                let before_parent =
                    matches!(tags.get(i + 1), Some(Tag::Text { text }) if text.starts_with("/.."));
                match cx.config().docroot_parent {
                    Some(ref parent) if before_parent => {
                        strip_parent = true;
                        out = out + Rendered::raw(parent.as_str());
                    }
                    _ => out = out + doc_root_output(cx),
                }
            }
            Tag::Code { text } => out = out + Rendered::text(text).code(),
            Tag::Literal { text } => out = out + Rendered::text(text),
            Tag::Value {
                reference,
                text,
                position,
            } => {
                let pos = position.as_ref().or(holder.and_then(|h| h.position()));
                out = out + value_tag(cx, holder, reference.as_ref(), text, pos);
            }
            Tag::InheritDoc { tags: inherited } => {
                if inherited.is_empty() {
                    cx.reporter.warning(
                        holder.and_then(|h| h.position()),
                        format!(
                            "{{@inheritDoc}} in {} has nothing to inherit",
                            holder_tag.unwrap_or("comment")
                        ),
                    );
                    continue;
                }
                let was_empty = out.is_empty();
                let expanded = expand(cx, holder_tag, holder, inherited, first_sentence);
                let done = first_sentence && was_empty && !expanded.is_empty();
                out = out + expanded;
                if done {
                    break;
                }
            }
            Tag::Unknown {
                name,
                text,
                position,
            } => {
                cx.reporter.warning(
                    position.as_ref().or(holder.and_then(|h| h.position())),
                    format!("unknown inline tag: {{@{}}}", name),
                );
                let literal = if text.is_empty() {
                    format!("{{@{}}}", name)
                } else {
                    format!("{{@{} {}}}", name, text)
                };
                out = out + Rendered::text(&literal);
            }
        }
    }
    out
}

/// Expanded comment wrapped as a description block. Empty under
/// `--no-comment`.
pub fn comment_block(
    cx: &DocContext<'_>,
    holder: Holder<'_>,
    tags: &[Tag],
    first_sentence: bool,
) -> Option<Rendered> {
    if cx.config().no_comment || tags.is_empty() {
        return None;
    }
    let body = expand(cx, None, Some(holder), tags, first_sentence);
    if body.is_empty() {
        None
    } else {
        Some(body.wrap("<div class=\"block\">", "</div>"))
    }
}

fn expand_text(
    cx: &DocContext<'_>,
    holder: Option<Holder<'_>>,
    text: &str,
    first_sentence: bool,
) -> String {
    let text = redirect_relative_links(cx, holder, text);
    let text = replace_doc_root_dir(cx, &text);
    let text = if first_sentence {
        Cow::Owned(remove_non_inline_html_tags(&text).into_owned())
    } else {
        text
    };
    let text = replace_tabs(cx.config().tab_width, &text);
    normalize_newlines(&text).into_owned()
}

/// Output of the `{@docRoot}` inline tag.
pub fn doc_root_output(cx: &DocContext<'_>) -> Rendered {
    if let Some(ref docroot) = cx.config().docroot {
        return Rendered::raw(docroot.as_str());
    }
    Rendered::raw(root_text(cx))
}

fn root_text<'a>(cx: &'a DocContext<'_>) -> &'a str {
    let root = cx.path_to_root();
    if root.is_empty() {
        "."
    } else {
        root.as_str()
    }
}

/// Replace `{@docRoot}` (any case) occurring inside plain text with the
/// relative path to the documentation root. A `/` is inserted when the
/// placeholder runs straight into a name. With `--docroot-parent`,
/// `{@docRoot}/..` becomes that URL.
pub fn replace_doc_root_dir<'t>(cx: &DocContext<'_>, text: &'t str) -> Cow<'t, str> {
    if !RE_DOC_ROOT.is_match(text) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    let mut last = 0;
    for m in RE_DOC_ROOT.find_iter(text) {
        out.push_str(&text[last..m.start()]);
        let rest = &text[m.end()..];
        last = m.end();
        match cx.config().docroot_parent {
            Some(ref parent) if rest.starts_with("/..") => {
                out.push_str(parent);
                last += 3;
            }
            _ => {
                out.push_str(root_text(cx));
                if rest.chars().next().is_some_and(|c| c != '/') {
                    out.push('/');
                }
            }
        }
    }
    out.push_str(&text[last..]);
    Cow::Owned(out)
}

/// Outcome of scanning one `<a ...>` start tag.
enum AnchorScan {
    Href { value: Range<usize>, end: usize },
    NoHref { end: usize },
    /// Closed tag without a single `name=value` attribute.
    NoValue { end: usize },
    /// A quoted value runs past the tag end.
    UnclosedQuote,
    /// Text ends inside the tag; an inline tag probably split it.
    Unterminated,
}

/// Scan the attributes of an anchor start tag from byte `i` (just past `<a`).
fn scan_anchor(text: &str, mut i: usize) -> AnchorScan {
    let bytes = text.as_bytes();
    let len = bytes.len();
    let mut href = None;
    let mut has_value = false;
    loop {
        while i < len && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= len {
            return AnchorScan::Unterminated;
        }
        match bytes[i] {
            b'>' => break,
            b'/' => {
                i += 1;
                continue;
            }
            _ => {}
        }
        let name_start = i;
        while i < len && !bytes[i].is_ascii_whitespace() && !matches!(bytes[i], b'=' | b'>') {
            i += 1;
        }
        let name = &text[name_start..i];
        while i < len && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= len || bytes[i] != b'=' {
            continue;
        }
        i += 1;
        while i < len && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= len {
            return AnchorScan::Unterminated;
        }
        let value = match bytes[i] {
            quote @ (b'"' | b'\'') => {
                let start = i + 1;
                match text[start..].find(quote as char) {
                    Some(k) => {
                        i = start + k + 1;
                        start..start + k
                    }
                    None if text[start..].contains('>') => return AnchorScan::UnclosedQuote,
                    None => return AnchorScan::Unterminated,
                }
            }
            _ => {
                let start = i;
                while i < len && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                    i += 1;
                }
                start..i
            }
        };
        has_value = true;
        if href.is_none() && name.eq_ignore_ascii_case("href") {
            href = Some(value);
        }
    }
    let end = i + 1;
    match href {
        Some(value) => AnchorScan::Href { value, end },
        None if has_value => AnchorScan::NoHref { end },
        None => AnchorScan::NoValue { end },
    }
}

/// Rewrite relative `href`s in comment text so they still resolve when the
/// comment is shown outside its package directory (index pages and the
/// like). The result uses the `{@docRoot}` placeholder, replaced next.
pub fn redirect_relative_links<'t>(
    cx: &DocContext<'_>,
    holder: Option<Holder<'_>>,
    text: &'t str,
) -> Cow<'t, str> {
    let Some(holder) = holder else {
        return Cow::Borrowed(text);
    };
    if !cx.page.kind.redirects_relative_links() || !text.contains('<') {
        return Cow::Borrowed(text);
    }
    let base = DocPath::for_package(holder.package_name());
    let lower = text.to_ascii_lowercase();
    let bytes = text.as_bytes();
    let mut out = String::new();
    let mut copied = 0;
    let mut search = 0;
    while let Some(found) = lower[search..].find("<a") {
        let start = search + found;
        let after = start + 2;
        if !bytes.get(after).is_some_and(|b| b.is_ascii_whitespace()) {
            search = after;
            continue;
        }
        match scan_anchor(text, after) {
            AnchorScan::Href { value, end } => {
                let href = &text[value.clone()];
                if !RE_ABSOLUTE_LINK.is_match(href) && !href.starts_with("{@") {
                    out.push_str(&text[copied..value.start]);
                    out.push_str("{@docRoot}/");
                    out.push_str(base.resolve(href).as_str());
                    copied = value.end;
                }
                search = end;
            }
            AnchorScan::NoHref { end } => search = end,
            AnchorScan::NoValue { end } => {
                malformed_link(cx, holder, &text[start..end]);
                break;
            }
            AnchorScan::UnclosedQuote => {
                malformed_link(cx, holder, &text[start..]);
                break;
            }
            AnchorScan::Unterminated => break,
        }
    }
    if copied == 0 {
        return Cow::Borrowed(text);
    }
    out.push_str(&text[copied..]);
    Cow::Owned(out)
}

fn malformed_link(cx: &DocContext<'_>, holder: Holder<'_>, tag: &str) {
    cx.reporter.warning(
        holder.position(),
        format!("<a> tag is malformed:\n\"{}\"", tag),
    );
}

/// Drop bare block-level start and end tags (`<p>`, `</ul>`); tags with
/// attributes and inline tags stay.
pub fn remove_non_inline_html_tags(text: &str) -> Cow<'_, str> {
    let Some(mut lt) = text.find('<') else {
        return Cow::Borrowed(text);
    };
    let bytes = text.as_bytes();
    let len = bytes.len();
    let mut out = String::with_capacity(len);
    let mut start = 0;
    'scan: loop {
        let mut pos = lt + 1;
        if pos == len {
            break;
        }
        if bytes[pos] == b'/' {
            pos += 1;
            if pos == len {
                break;
            }
        }
        let name_start = pos;
        while is_tag_char(bytes[pos]) {
            pos += 1;
            if pos == len {
                break 'scan;
            }
        }
        if bytes[pos] == b'>' && is_block_tag(&text[name_start..pos]) {
            out.push_str(&text[start..lt]);
            start = pos + 1;
        }
        match text[pos..].find('<') {
            Some(next) => lt = pos + next,
            None => break,
        }
    }
    if start == 0 {
        return Cow::Borrowed(text);
    }
    out.push_str(&text[start..]);
    Cow::Owned(out)
}

fn is_tag_char(b: u8) -> bool {
    b.is_ascii_alphabetic() || (b'1'..=b'6').contains(&b)
}

fn is_block_tag(name: &str) -> bool {
    !name.is_empty() && BLOCK_TAGS.iter().any(|t| t.eq_ignore_ascii_case(name))
}

/// Expand tabs to the next multiple of `width` columns.
pub fn replace_tabs(width: usize, text: &str) -> Cow<'_, str> {
    if !text.contains('\t') || width == 0 {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + width);
    let mut col = 0;
    for c in text.chars() {
        match c {
            '\t' => {
                let n = width - col % width;
                out.extend(std::iter::repeat(' ').take(n));
                col += n;
            }
            '\n' | '\r' => {
                out.push(c);
                col = 0;
            }
            _ => {
                out.push(c);
                col += 1;
            }
        }
    }
    Cow::Owned(out)
}

/// `\r\n` and lone `\r` become `\n`.
pub fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if !text.contains('\r') {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
}

fn label_or(label: &Rendered, text: &Rendered) -> Rendered {
    if label.is_empty() {
        text.clone()
    } else {
        label.clone()
    }
}

fn plain_or_code(plain: bool, body: Rendered) -> Rendered {
    if plain || body.is_empty() {
        body
    } else {
        body.code()
    }
}

/// `@see` and the `{@link...}` family. Any other tag renders nothing.
pub fn see_tag(cx: &DocContext<'_>, holder: Option<Holder<'_>>, see: &SeeTag) -> Rendered {
    let tag_name = see.name.as_str();
    if !(tag_name == "@see" || tag_name.starts_with("@link")) {
        return Rendered::empty();
    }
    let position = see.position.as_ref().or(holder.and_then(|h| h.position()));
    let seetext = normalize_newlines(&see.text);
    let seetext = replace_doc_root_dir(cx, &seetext).into_owned();

    // a quoted string or literal markup
    if seetext.starts_with('<') || seetext.starts_with('"') {
        return Rendered::raw(seetext);
    }

    let plain = tag_name == "@linkplain";
    let label = plain_or_code(plain, Rendered::raw(see.label.as_str()));
    let text = plain_or_code(plain, Rendered::raw(seetext.as_str()));

    let reference = &see.reference;
    let (written_class, written_member) = match see.text.split_once('#') {
        Some((class, member)) => (class.trim(), Some(member.trim())),
        None => (see.text.trim(), None),
    };
    let ref_class_name = reference.class_name.as_deref().unwrap_or(written_class);
    let ref_member_name = reference.member_name.as_deref().or(written_member);
    let ref_class = reference
        .class
        .as_deref()
        .and_then(|qn| cx.model().class(qn));

    let Some(ref_class) = ref_class else {
        if let Some(package) = reference.package.as_deref() {
            if cx.docs.is_package_included(package) {
                let label = if label.is_empty() {
                    plain_or_code(plain, Rendered::text(package))
                } else {
                    label
                };
                return package_link(cx, package, Some(label));
            }
        }
        if let Some(link) = cross_package_link(cx, ref_class_name) {
            return Rendered::hyperlink(&link.to_string(), label_or(&label, &text), "");
        }
        let fragment = ref_member_name.map(|m| html_name(&strip_type_arguments(m)));
        let given = if label.is_empty() { None } else { Some(label.clone()) };
        if let Some(link) = cross_class_link(cx, ref_class_name, fragment.as_deref(), given, !plain) {
            return link;
        }
        cx.reporter.warning(
            position,
            format!("Tag {}: reference not found: {}", tag_name, seetext),
        );
        return label_or(&label, &text);
    };

    let Some(member_name) = ref_member_name.filter(|m| !m.is_empty()) else {
        let label = if label.is_empty() {
            plain_or_code(plain, Rendered::text(&ref_class.name))
        } else {
            label
        };
        let req = LinkRequest::new(LinkContext::Default, LinkTarget::Class(ref_class)).label(label);
        return resolve(cx, &req);
    };

    let found = reference
        .member
        .as_ref()
        .and_then(|m| cx.model().find_member(m));
    let Some((declaring, member)) = found else {
        cx.reporter.warning(
            position,
            format!("Tag {}: reference not found: {}", tag_name, seetext),
        );
        return label_or(&label, &text);
    };

    let mut containing = declaring;
    if see.text.trim().starts_with('#')
        && !(containing.is_public() || cx.docs.is_linkable(containing))
    {
        // inherited from a class without a page: point at the current one
        match cx.page.class {
            Some(current) if cx.page.kind.is_class_page() => containing = current,
            _ if !containing.is_public() => cx.reporter.warning(
                position,
                format!(
                    "Tag {}: reference not accessible: {}",
                    tag_name, containing.qualified_name
                ),
            ),
            _ => cx.reporter.warning(
                position,
                format!("Tag {}: reference not found: {}", tag_name, seetext),
            ),
        }
    }

    let unqualified =
        cx.page.is_current_class(containing) || member.kind == MemberKind::Constructor;
    let mut shown = if unqualified {
        member_name.to_string()
    } else {
        format!("{}.{}", containing.name, member_name)
    };
    if member.is_executable() && !shown.contains('(') {
        shown.push_str(&member.signature());
    }
    let text = plain_or_code(plain, Rendered::text(&shown));
    let label = if label.is_empty() { text } else { label };
    let req = LinkRequest::new(LinkContext::SeeTag, LinkTarget::Member(containing, member))
        .label(label);
    resolve(cx, &req)
}

/// `{@value}`: the constant value of the referenced field, or of the holder
/// when no reference is given.
fn value_tag(
    cx: &DocContext<'_>,
    holder: Option<Holder<'_>>,
    reference: Option<&MemberRef>,
    text: &str,
    position: Option<&Position>,
) -> Rendered {
    let field = match reference {
        Some(r) => cx.model().find_member(r),
        None => match holder {
            Some(Holder::Member(class, member)) => Some((class, member)),
            _ => None,
        },
    };
    let Some((class, member)) = field else {
        let shown = if text.is_empty() { "{@value}" } else { text };
        cx.reporter.warning(
            position,
            format!("{} (referenced by @value tag) is an unknown reference.", shown),
        );
        return Rendered::empty();
    };
    let Some(ref constant) = member.constant_value else {
        cx.reporter.warning(
            position,
            format!(
                "@value tag (which references {}.{}) can only be used in constants.",
                class.qualified_name, member.name
            ),
        );
        return Rendered::empty();
    };
    if holder.is_some_and(|h| h.is_member(member)) {
        return Rendered::text(constant);
    }
    let req = LinkRequest::new(LinkContext::ValueTag, LinkTarget::Member(class, member))
        .label(Rendered::text(constant));
    resolve(cx, &req)
}
