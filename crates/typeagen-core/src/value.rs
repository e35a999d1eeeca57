//! Document model produced by the parser.
//!
//! Every node remembers the property key it was found under. Array elements and
//! the document root carry an empty key until the caller names the root with
//! [`Object::set_key`].

use indexmap::IndexMap;

use crate::naming::normalize;

/// The primitive kinds the parser distinguishes.
///
/// Kind is decided by the first significant character only, so any bare letter
/// run other than `null` is classified as [`PrimitiveKind::Boolean`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    String,
    Number,
    Boolean,
    Null,
}

impl PrimitiveKind {
    /// TypeScript type name for this kind.
    pub fn type_name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Null => "null",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Primitive {
    pub key: String,
    /// Source text of the value, with string quotes stripped and placeholders
    /// already substituted.
    pub raw: String,
    pub kind: PrimitiveKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Object {
    pub key: String,
    /// Members in document order. A repeated key keeps its first position and
    /// its last value.
    pub members: IndexMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Array {
    pub key: String,
    pub elements: Vec<Value>,
}

/// A parsed JSON node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Primitive(Primitive),
    Object(Object),
    Array(Array),
}

impl Object {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            members: IndexMap::new(),
        }
    }

    /// Rename this object. Used once on the root before synthesis.
    pub fn set_key(&mut self, key: impl Into<String>) {
        self.key = key.into();
    }

    /// Type identifier derived from the key.
    pub fn type_name(&self) -> String {
        normalize(&self.key)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.members.get(name)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Number of `key: value` pairs in this object and everything below it.
    pub fn member_count(&self) -> usize {
        self.members
            .values()
            .map(|v| 1 + v.nested_member_count())
            .sum()
    }
}

impl Array {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            elements: Vec::new(),
        }
    }

    /// The element that decides this array's element type.
    pub fn first(&self) -> Option<&Value> {
        self.elements.first()
    }
}

impl Value {
    pub fn key(&self) -> &str {
        match self {
            Value::Primitive(p) => &p.key,
            Value::Object(o) => &o.key,
            Value::Array(a) => &a.key,
        }
    }

    /// Short description of the variant, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Primitive(p) => p.kind.type_name(),
            Value::Object(_) => "object",
            Value::Array(_) => "array",
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Raw text of a string primitive.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Primitive(Primitive {
                raw,
                kind: PrimitiveKind::String,
                ..
            }) => Some(raw),
            _ => None,
        }
    }

    fn nested_member_count(&self) -> usize {
        match self {
            Value::Primitive(_) => 0,
            Value::Object(o) => o.member_count(),
            Value::Array(a) => a.elements.iter().map(Value::nested_member_count).sum(),
        }
    }

    /// Convert into a `serde_json::Value`.
    ///
    /// Numbers that do not fit a `u64` and letter runs other than
    /// `true`/`false` are kept as strings.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;

        match self {
            Value::Primitive(p) => match p.kind {
                PrimitiveKind::Null => Json::Null,
                PrimitiveKind::String => Json::String(p.raw.clone()),
                PrimitiveKind::Number => p
                    .raw
                    .parse::<u64>()
                    .map_or_else(|_| Json::String(p.raw.clone()), Json::from),
                PrimitiveKind::Boolean => match p.raw.as_str() {
                    "true" => Json::Bool(true),
                    "false" => Json::Bool(false),
                    other => Json::String(other.to_string()),
                },
            },
            Value::Object(o) => Json::Object(
                o.members
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            Value::Array(a) => Json::Array(a.elements.iter().map(Value::to_json).collect()),
        }
    }

    /// Indented, human-readable dump of the tree.
    ///
    /// ```
    /// let doc = typeagen_core::parse(r#"{"id": 1, "tags": ["a"]}"#, None).unwrap();
    /// assert_eq!(
    ///     doc.outline(),
    ///     "(Root) {\n  id: (number) 1,\n  tags: (string[]) [\n    (string) a,\n  ],\n},\n"
    /// );
    /// ```
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.write_outline(0, "", &mut out);
        out
    }

    fn write_outline(&self, level: usize, inherited: &str, out: &mut String) {
        let padding = "  ".repeat(level);
        out.push_str(&padding);
        if !self.key().is_empty() {
            out.push_str(self.key());
            out.push_str(": ");
        }
        out.push('(');
        out.push_str(&self.outline_type(inherited));
        out.push_str(") ");

        match self {
            Value::Primitive(p) => {
                out.push_str(&p.raw);
                out.push_str(",\n");
            }
            Value::Object(o) => {
                out.push_str("{\n");
                for member in o.members.values() {
                    member.write_outline(level + 1, "", out);
                }
                out.push_str(&padding);
                out.push_str("},\n");
            }
            Value::Array(a) => {
                out.push_str("[\n");
                for element in &a.elements {
                    element.write_outline(level + 1, &a.key, out);
                }
                out.push_str(&padding);
                out.push_str("],\n");
            }
        }
    }

    /// Array elements have no key of their own, so they are named after the
    /// array that holds them.
    fn outline_type(&self, inherited: &str) -> String {
        match self {
            Value::Primitive(p) => p.kind.type_name().to_string(),
            Value::Object(o) if o.key.is_empty() => normalize(inherited),
            Value::Object(o) => o.type_name(),
            Value::Array(a) => {
                let name = if a.key.is_empty() { inherited } else { a.key.as_str() };
                match a.first() {
                    Some(first) => format!("{}[]", first.outline_type(name)),
                    None => "unknown[]".to_string(),
                }
            }
        }
    }
}
