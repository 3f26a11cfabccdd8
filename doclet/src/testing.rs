//! Shared fixture model for unit tests.

use crate::config::Config;
use crate::context::{DocContext, DocumentedSet, Page, PageKind};
use crate::diagnostics::Reporter;
use crate::doc_path::DocPath;
use crate::externs::ExternalDocs;
use crate::model::{ClassDoc, Model};
use std::path::Path;

const MODEL: &str = r#"{
  "packages": [
    {"name": "com.acme",
     "comment": [{"kind": "text", "text": "Core widgets. See <a href=\"doc-files/guide.html\">the guide</a>."}]},
    {"name": "com.acme.util"}
  ],
  "classes": [
    {"qualified_name": "com.acme.Widget", "name": "Widget", "package": "com.acme",
     "type_params": [{"name": "T"}],
     "superclass": {"kind": "class", "qualified_name": "com.acme.Base"},
     "interfaces": [{"kind": "class", "qualified_name": "com.acme.Shape"}],
     "annotations": [{"annotation_type": "com.acme.Marker", "documented": true,
                      "elements": [{"name": "value", "value": {"kind": "literal", "text": "\"main\""}}]}],
     "comment": [{"kind": "text", "text": "A drawable widget. Renders itself."}],
     "position": {"file": "com/acme/Widget.java", "line": 3},
     "members": [
       {"name": "render", "kind": "method", "type": {"kind": "primitive", "name": "void"},
        "parameters": [{"name": "items", "type": {"kind": "class", "qualified_name": "java.util.List",
                        "type_args": [{"kind": "class", "qualified_name": "java.lang.String"}]}}],
        "comment": [{"kind": "text", "text": "Renders all items."}]},
       {"name": "render", "kind": "method", "type": {"kind": "primitive", "name": "void"},
        "parameters": [{"name": "item", "type": {"kind": "class", "qualified_name": "java.lang.String"}}]},
       {"name": "add", "kind": "method", "type": {"kind": "primitive", "name": "boolean"},
        "parameters": [{"name": "item", "type": {"kind": "type_var", "name": "T", "owner": "com.acme.Widget"}}]},
       {"name": "NAME", "kind": "field", "static": true,
        "type": {"kind": "class", "qualified_name": "java.lang.String"}, "constant_value": "\"widget\""},
       {"name": "size", "kind": "field", "type": {"kind": "primitive", "name": "int"}}
     ]},
    {"qualified_name": "com.acme.Base", "name": "Base", "package": "com.acme"},
    {"qualified_name": "com.acme.Shape", "name": "Shape", "package": "com.acme", "kind": "interface"},
    {"qualified_name": "com.acme.Color", "name": "Color", "package": "com.acme", "kind": "enum",
     "members": [{"name": "RED", "kind": "enum_constant", "static": true}]},
    {"qualified_name": "com.acme.Marker", "name": "Marker", "package": "com.acme", "kind": "annotation",
     "members": [{"name": "value", "kind": "annotation_element",
                  "type": {"kind": "class", "qualified_name": "java.lang.String"}}]},
    {"qualified_name": "com.acme.Hidden", "name": "Hidden", "package": "com.acme", "visibility": "package"},
    {"qualified_name": "com.acme.Secret", "name": "Secret", "package": "com.acme",
     "visibility": "package", "included": false,
     "members": [{"name": "peek", "kind": "method", "type": {"kind": "primitive", "name": "void"}}]},
    {"qualified_name": "com.acme.Old", "name": "Old", "package": "com.acme", "deprecated": true},
    {"qualified_name": "com.acme.util.Helper", "name": "Helper", "package": "com.acme.util",
     "members": [{"name": "help", "kind": "method", "static": true, "type": {"kind": "primitive", "name": "void"}}]},
    {"qualified_name": "java.util.List", "name": "List", "package": "java.util", "kind": "interface",
     "included": false, "type_params": [{"name": "E"}],
     "members": [{"name": "size", "kind": "method", "type": {"kind": "primitive", "name": "int"}}]},
    {"qualified_name": "java.lang.String", "name": "String", "package": "java.lang", "included": false}
  ]
}"#;

pub const JDK_API: &str = "https://docs.oracle.com/javase/8/docs/api";

pub fn model() -> Model {
    Model::from_json(MODEL, Path::new("fixture.json")).unwrap()
}

pub struct Fixture {
    pub model: Model,
    pub config: Config,
    pub externs: ExternalDocs,
    pub reporter: Reporter,
}

impl Fixture {
    pub fn new() -> Fixture {
        Fixture::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Fixture {
        let mut externs = ExternalDocs::default();
        externs.add_package_list(JDK_API, "java.lang\njava.util\njava.io\n");
        Fixture {
            model: model(),
            config,
            externs,
            reporter: Reporter::default(),
        }
    }

    pub fn docs(&self) -> DocumentedSet<'_> {
        DocumentedSet::new(&self.model, &self.config, &self.externs)
    }

    pub fn class(&self, qualified_name: &str) -> &ClassDoc {
        self.model.class(qualified_name).unwrap()
    }

    /// Context for the page of `qualified_name`.
    pub fn on_class<'a>(&'a self, docs: &'a DocumentedSet<'a>, qualified_name: &str) -> DocContext<'a> {
        let page = Page::for_class(self.class(qualified_name));
        DocContext::new(docs, &self.reporter, page)
    }

    pub fn on_page<'a>(&'a self, docs: &'a DocumentedSet<'a>, kind: PageKind, path: &str) -> DocContext<'a> {
        DocContext::new(docs, &self.reporter, Page::new(kind, DocPath::new(path)))
    }
}
