//! Program model consumed from the front end. Read-only after load.
//!
//! The front end (parser + type resolver) serializes packages, classes,
//! members, annotations and doc comment tag sequences as JSON. Nothing in
//! here mutates the model once [`Model::from_json`] / [`Model::merge`]
//! have built the lookup indices.

use crate::diagnostics::Reporter;
use crate::error::DocletError;
use serde::Deserialize;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

fn yes() -> bool {
    true
}

/// Complete program model, possibly merged from several JSON files.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Model {
    pub packages: Vec<PackageDoc>,
    pub classes: Vec<ClassDoc>,
    #[serde(skip)]
    class_index: HashMap<String, usize>,
    #[serde(skip)]
    package_index: HashMap<String, usize>,
}

/// Source position of a symbol or tag, when the front end knows it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Position {
    pub file: String,
    #[serde(default)]
    pub line: u32,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line > 0 {
            write!(f, "{}:{}", self.file, self.line)
        } else {
            write!(f, "{}", self.file)
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Package,
    Private,
}

impl Visibility {
    /// Source keyword, empty for package-private.
    pub fn keyword(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Package => "",
            Visibility::Private => "private",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    #[default]
    Class,
    Interface,
    Enum,
    Annotation,
}

impl ClassKind {
    pub fn keyword(self) -> &'static str {
        match self {
            ClassKind::Class => "class",
            ClassKind::Interface => "interface",
            ClassKind::Enum => "enum",
            ClassKind::Annotation => "@interface",
        }
    }

    /// Heading word used on pages and in the index.
    pub fn title(self) -> &'static str {
        match self {
            ClassKind::Class => "Class",
            ClassKind::Interface => "Interface",
            ClassKind::Enum => "Enum",
            ClassKind::Annotation => "Annotation Type",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PackageDoc {
    pub name: String,
    #[serde(default = "yes")]
    pub included: bool,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub annotations: Vec<AnnotationDesc>,
    #[serde(default)]
    pub comment: Vec<Tag>,
    #[serde(default)]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassDoc {
    pub qualified_name: String,
    /// Simple name; nested classes carry the outer name too ("Outer.Inner").
    pub name: String,
    #[serde(default)]
    pub package: String,
    #[serde(default)]
    pub kind: ClassKind,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default = "yes")]
    pub included: bool,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub type_params: Vec<TypeParam>,
    #[serde(default)]
    pub superclass: Option<TypeRef>,
    #[serde(default)]
    pub interfaces: Vec<TypeRef>,
    #[serde(default)]
    pub annotations: Vec<AnnotationDesc>,
    #[serde(default)]
    pub members: Vec<MemberDoc>,
    #[serde(default)]
    pub comment: Vec<Tag>,
    #[serde(default)]
    pub first_sentence: Option<Vec<Tag>>,
    #[serde(default)]
    pub position: Option<Position>,
}

impl ClassDoc {
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    pub fn is_interface(&self) -> bool {
        matches!(self.kind, ClassKind::Interface | ClassKind::Annotation)
    }

    /// Summary tags: supplied by the front end, or cut from the comment.
    pub fn summary(&self) -> Cow<'_, [Tag]> {
        match self.first_sentence {
            Some(ref tags) => Cow::Borrowed(tags),
            None => Cow::Owned(first_sentence(&self.comment)),
        }
    }

    pub fn member(&self, name: &str) -> Option<&MemberDoc> {
        self.members.iter().find(|m| m.name == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Field,
    Method,
    Constructor,
    EnumConstant,
    AnnotationElement,
}

impl MemberKind {
    pub fn title(self) -> &'static str {
        match self {
            MemberKind::Field => "Field",
            MemberKind::Method => "Method",
            MemberKind::Constructor => "Constructor",
            MemberKind::EnumConstant => "Enum Constant",
            MemberKind::AnnotationElement => "Element",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MemberDoc {
    pub name: String,
    pub kind: MemberKind,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default = "yes")]
    pub included: bool,
    /// Field type or method return type.
    #[serde(default, rename = "type")]
    pub ty: Option<TypeRef>,
    #[serde(default)]
    pub type_params: Vec<TypeParam>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Raw declared signature, e.g. `(java.util.List<java.lang.String>)`.
    #[serde(default)]
    pub signature: Option<String>,
    /// Constant expression for compile-time constant fields (`"text"`, `42`).
    #[serde(default)]
    pub constant_value: Option<String>,
    #[serde(default)]
    pub annotations: Vec<AnnotationDesc>,
    #[serde(default)]
    pub comment: Vec<Tag>,
    #[serde(default)]
    pub first_sentence: Option<Vec<Tag>>,
    #[serde(default)]
    pub position: Option<Position>,
}

impl MemberDoc {
    /// Methods, constructors and annotation elements carry a parameter list.
    pub fn is_executable(&self) -> bool {
        matches!(
            self.kind,
            MemberKind::Method | MemberKind::Constructor | MemberKind::AnnotationElement
        )
    }

    /// Declared signature, computed from the parameters when the front end
    /// did not supply the raw text.
    pub fn signature(&self) -> Cow<'_, str> {
        match self.signature {
            Some(ref sig) => Cow::Borrowed(sig),
            None => {
                let params: Vec<String> = self
                    .parameters
                    .iter()
                    .map(|p| p.ty.signature_text())
                    .collect();
                Cow::Owned(format!("({})", params.join(", ")))
            }
        }
    }

    pub fn summary(&self) -> Cow<'_, [Tag]> {
        match self.first_sentence {
            Some(ref tags) => Cow::Borrowed(tags),
            None => Cow::Owned(first_sentence(&self.comment)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub annotations: Vec<AnnotationDesc>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TypeParam {
    pub name: String,
    #[serde(default)]
    pub bounds: Vec<TypeRef>,
}

impl TypeParam {
    /// The type variable this declaration introduces, owned by `owner`.
    pub fn as_type_var(&self, owner: Option<&str>) -> TypeRef {
        TypeRef::TypeVar {
            name: self.name.clone(),
            bounds: self.bounds.clone(),
            owner: owner.map(str::to_string),
            dimension: String::new(),
        }
    }
}

/// A use of a type in a signature.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeRef {
    Primitive {
        name: String,
        #[serde(default)]
        dimension: String,
    },
    Class {
        qualified_name: String,
        #[serde(default)]
        type_args: Vec<TypeRef>,
        #[serde(default)]
        dimension: String,
    },
    TypeVar {
        name: String,
        #[serde(default)]
        bounds: Vec<TypeRef>,
        /// Declaring class; `None` when declared by a method or constructor.
        #[serde(default)]
        owner: Option<String>,
        #[serde(default)]
        dimension: String,
    },
    Wildcard {
        #[serde(default)]
        extends: Vec<TypeRef>,
        #[serde(default, rename = "super")]
        super_bounds: Vec<TypeRef>,
    },
}

const OBJECT: &str = "java.lang.Object";

impl TypeRef {
    /// A raw class type with no arguments.
    pub fn class(qualified_name: &str) -> TypeRef {
        TypeRef::Class {
            qualified_name: qualified_name.to_string(),
            type_args: Vec::new(),
            dimension: String::new(),
        }
    }

    pub fn dimension(&self) -> &str {
        match self {
            TypeRef::Primitive { dimension, .. }
            | TypeRef::Class { dimension, .. }
            | TypeRef::TypeVar { dimension, .. } => dimension,
            TypeRef::Wildcard { .. } => "",
        }
    }

    pub fn is_type_var(&self) -> bool {
        matches!(self, TypeRef::TypeVar { .. })
    }

    /// Unqualified name without dimension. For class types not present in
    /// the model this is the last dotted segment.
    pub fn type_name(&self) -> &str {
        match self {
            TypeRef::Primitive { name, .. } | TypeRef::TypeVar { name, .. } => name,
            TypeRef::Class { qualified_name, .. } => {
                qualified_name.rsplit('.').next().unwrap_or(qualified_name)
            }
            TypeRef::Wildcard { .. } => "?",
        }
    }

    /// Qualified name of the erasure, without dimension.
    pub fn erasure_name(&self) -> Cow<'_, str> {
        match self {
            TypeRef::Primitive { name, .. } => Cow::Borrowed(name),
            TypeRef::Class { qualified_name, .. } => Cow::Borrowed(qualified_name),
            TypeRef::TypeVar { bounds, .. } => match bounds.first() {
                Some(bound) => bound.erasure_name(),
                None => Cow::Borrowed(OBJECT),
            },
            TypeRef::Wildcard { extends, .. } => match extends.first() {
                Some(bound) => bound.erasure_name(),
                None => Cow::Borrowed(OBJECT),
            },
        }
    }

    /// Declared text as it appears in a raw member signature.
    pub fn signature_text(&self) -> String {
        match self {
            TypeRef::Primitive { name, dimension } => format!("{}{}", name, dimension),
            TypeRef::Class {
                qualified_name,
                type_args,
                dimension,
            } => {
                if type_args.is_empty() {
                    format!("{}{}", qualified_name, dimension)
                } else {
                    let args: Vec<String> = type_args.iter().map(|a| a.signature_text()).collect();
                    format!("{}<{}>{}", qualified_name, args.join(","), dimension)
                }
            }
            TypeRef::TypeVar {
                name, dimension, ..
            } => format!("{}{}", name, dimension),
            TypeRef::Wildcard {
                extends,
                super_bounds,
            } => {
                if let Some(bound) = extends.first() {
                    format!("? extends {}", bound.signature_text())
                } else if let Some(bound) = super_bounds.first() {
                    format!("? super {}", bound.signature_text())
                } else {
                    "?".to_string()
                }
            }
        }
    }
}

/// An annotation use: type plus ordered element/value pairs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnnotationDesc {
    pub annotation_type: String,
    /// Whether the annotation type is itself marked as documented.
    #[serde(default)]
    pub documented: bool,
    /// Container synthesized by the compiler for repeated annotations.
    #[serde(default)]
    pub synthesized: bool,
    #[serde(default)]
    pub elements: Vec<ElementValue>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ElementValue {
    pub name: String,
    pub value: AnnotationValue,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnnotationValue {
    /// Already-formatted literal (`"text"`, `42`, `'c'`).
    Literal { text: String },
    Class {
        #[serde(rename = "type")]
        ty: TypeRef,
    },
    Annotation(AnnotationDesc),
    /// Enum constant (or other member) value.
    Enum { class: String, name: String },
    Array { values: Vec<AnnotationValue> },
}

/// One entry of a doc comment: a text span or an inline tag.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Tag {
    Text {
        text: String,
    },
    See(SeeTag),
    DocRoot,
    Value {
        #[serde(default)]
        reference: Option<MemberRef>,
        #[serde(default)]
        text: String,
        #[serde(default)]
        position: Option<Position>,
    },
    Code {
        text: String,
    },
    Literal {
        text: String,
    },
    InheritDoc {
        /// Tags of the overridden member's comment, as resolved by the front end.
        #[serde(default)]
        tags: Vec<Tag>,
    },
    Unknown {
        name: String,
        #[serde(default)]
        text: String,
        #[serde(default)]
        position: Option<Position>,
    },
}

impl Tag {
    pub fn text(text: impl Into<String>) -> Tag {
        Tag::Text { text: text.into() }
    }
}

/// `@see`, `{@link}` or `{@linkplain}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeeTag {
    /// Tag name including the `@`.
    pub name: String,
    /// Reference text as written, e.g. `Widget#render(java.util.List)`.
    pub text: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub reference: SeeReference,
    #[serde(default)]
    pub position: Option<Position>,
}

/// What the front end resolved a see-tag reference to. Every field may be
/// absent when resolution failed at the model level.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SeeReference {
    pub package: Option<String>,
    /// Qualified name of the resolved class.
    pub class: Option<String>,
    /// Class name as referenced, resolved or not.
    pub class_name: Option<String>,
    pub member: Option<MemberRef>,
    /// Member part as written (`render(java.util.List)`).
    pub member_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MemberRef {
    pub class: String,
    pub name: String,
    #[serde(default)]
    pub signature: Option<String>,
}

/// The symbol whose comment is being expanded.
#[derive(Debug, Clone, Copy)]
pub enum Holder<'a> {
    Package(&'a PackageDoc),
    Class(&'a ClassDoc),
    Member(&'a ClassDoc, &'a MemberDoc),
}

impl<'a> Holder<'a> {
    pub fn package_name(&self) -> &'a str {
        match self {
            Holder::Package(p) => &p.name,
            Holder::Class(c) | Holder::Member(c, _) => &c.package,
        }
    }

    pub fn position(&self) -> Option<&'a Position> {
        match self {
            Holder::Package(p) => p.position.as_ref(),
            Holder::Class(c) => c.position.as_ref(),
            Holder::Member(c, m) => m.position.as_ref().or(c.position.as_ref()),
        }
    }

    pub fn is_member(&self, member: &MemberDoc) -> bool {
        matches!(self, Holder::Member(_, m) if std::ptr::eq(*m, member))
    }
}

impl Model {
    /// Read and parse one model file.
    pub fn load(path: &Path) -> Result<Model, DocletError> {
        let source = fs::read_to_string(path).map_err(|source| DocletError::ReadModel {
            path: path.to_path_buf(),
            source,
        })?;
        Model::from_json(&source, path)
    }

    /// Parse one model file.
    pub fn from_json(source: &str, origin: &Path) -> Result<Model, DocletError> {
        let mut model: Model =
            serde_json::from_str(source).map_err(|source| DocletError::ParseModel {
                path: origin.to_path_buf(),
                source,
            })?;
        model.reindex();
        Ok(model)
    }

    /// Combine several model files. The first definition of a name wins.
    pub fn merge(models: Vec<Model>) -> Model {
        let mut merged = Model::default();
        for model in models {
            for pkg in model.packages {
                if !merged.packages.iter().any(|p| p.name == pkg.name) {
                    merged.packages.push(pkg);
                }
            }
            for class in model.classes {
                if !merged
                    .classes
                    .iter()
                    .any(|c| c.qualified_name == class.qualified_name)
                {
                    merged.classes.push(class);
                }
            }
        }
        merged.reindex();
        merged
    }

    fn reindex(&mut self) {
        // Packages only implied by their classes still need an entry.
        let mut implied: Vec<PackageDoc> = Vec::new();
        for class in &self.classes {
            let known = self.packages.iter().any(|p| p.name == class.package)
                || implied.iter().any(|p| p.name == class.package);
            if !known {
                implied.push(PackageDoc {
                    name: class.package.clone(),
                    included: class.included,
                    deprecated: false,
                    annotations: Vec::new(),
                    comment: Vec::new(),
                    position: None,
                });
            }
        }
        self.packages.extend(implied);

        self.class_index = self
            .classes
            .iter()
            .enumerate()
            .map(|(i, c)| (c.qualified_name.clone(), i))
            .collect();
        self.package_index = self
            .packages
            .iter()
            .enumerate()
            .map(|(i, p)| (p.name.clone(), i))
            .collect();
    }

    pub fn class(&self, qualified_name: &str) -> Option<&ClassDoc> {
        self.class_index
            .get(qualified_name)
            .map(|&i| &self.classes[i])
    }

    pub fn package(&self, name: &str) -> Option<&PackageDoc> {
        self.package_index.get(name).map(|&i| &self.packages[i])
    }

    /// Look up a referenced member. Signatures are compared after dropping
    /// type arguments and whitespace; a simple parameter type name matches
    /// a qualified one ending in it.
    pub fn find_member(&self, reference: &MemberRef) -> Option<(&ClassDoc, &MemberDoc)> {
        let class = self.class(&reference.class)?;
        let mut candidates = class.members.iter().filter(|m| m.name == reference.name);
        let member = match reference.signature {
            None => candidates.next(),
            Some(ref wanted) => {
                candidates.find(|m| !m.is_executable() || signature_matches(&m.signature(), wanted))
            }
        }?;
        Some((class, member))
    }

    /// Report classes whose declared package disagrees with their name.
    pub fn check(&self, reporter: &Reporter) {
        for class in &self.classes {
            let expected = if class.package.is_empty() {
                class.name.clone()
            } else {
                format!("{}.{}", class.package, class.name)
            };
            if expected != class.qualified_name {
                reporter.warning(
                    class.position.as_ref(),
                    format!(
                        "internal error: class {} is listed in package '{}'",
                        class.qualified_name, class.package
                    ),
                );
            }
        }
    }
}

fn erased_params(signature: &str) -> Vec<String> {
    let stripped = crate::anchor::strip_type_arguments(signature);
    let inner = stripped
        .trim()
        .trim_start_matches('(')
        .trim_end_matches(')');
    inner
        .split(',')
        .map(|p| p.chars().filter(|c| !c.is_whitespace()).collect::<String>())
        .filter(|p| !p.is_empty())
        .collect()
}

fn signature_matches(declared: &str, wanted: &str) -> bool {
    let declared = erased_params(declared);
    let wanted = erased_params(wanted);
    declared.len() == wanted.len()
        && declared.iter().zip(&wanted).all(|(d, w)| {
            d == w || d.ends_with(&format!(".{}", w))
        })
}

/// Cut the first sentence out of a tag sequence: everything up to the
/// first `.` followed by whitespace (or ending the comment).
pub fn first_sentence(tags: &[Tag]) -> Vec<Tag> {
    let mut out = Vec::new();
    for (i, tag) in tags.iter().enumerate() {
        if let Tag::Text { text } = tag {
            let last = i + 1 == tags.len();
            if let Some(end) = sentence_end(text, last) {
                out.push(Tag::text(&text[..end]));
                return out;
            }
        }
        out.push(tag.clone());
    }
    out
}

fn sentence_end(text: &str, last: bool) -> Option<usize> {
    let bytes = text.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b != b'.' {
            continue;
        }
        match bytes.get(i + 1) {
            Some(next) if next.is_ascii_whitespace() => return Some(i + 1),
            None if last => return Some(i + 1),
            _ => {}
        }
    }
    None
}
