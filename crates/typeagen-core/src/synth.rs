//! Interface synthesis: walks a parsed [`Object`] and emits one TypeScript
//! `interface` block per nested object.
//!
//! The root block is emitted first. Nested objects found while emitting a
//! block are pushed onto a worklist and emitted afterwards; by default the
//! most recently discovered object goes next (LIFO), [`WorklistOrder::Fifo`]
//! gives breadth-first order instead. Members keep document order.
//!
//! Objects that share a shape but sit under different keys get separate
//! blocks unless [`SynthOptions::dedupe`] is set.
//!
//! # Example
//! ```
//! use typeagen_core::{parse, synth, Value};
//!
//! let Value::Object(root) = parse(r#"{"id": 1, "geo": {"lat": "1"}}"#, None).unwrap() else {
//!     panic!("expected object");
//! };
//! let mut out = Vec::new();
//! synth::generate(root, "Place", &mut out).unwrap();
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "interface Place {\n  id: number,\n  geo: Geo,\n}\ninterface Geo {\n  lat: string,\n}\n"
//! );
//! ```

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::io::Write;

use tracing::debug;

use crate::error::{Result, TypeagenError};
use crate::naming::{is_identifier, normalize};
use crate::value::{Object, PrimitiveKind, Value};

/// Which pending object is emitted next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorklistOrder {
    /// Most recently discovered first (depth-first).
    #[default]
    Lifo,
    /// Oldest discovered first (breadth-first).
    Fifo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SynthOptions {
    pub order: WorklistOrder,
    /// Reuse the first name given to a shape for every later object with the
    /// same members and member types.
    pub dedupe: bool,
}

/// One `name: Type` line of an interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub name: String,
    pub type_name: String,
}

/// A rendered-on-demand `interface Name { ... }` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceBlock {
    pub name: String,
    pub members: Vec<Member>,
}

impl fmt::Display for InterfaceBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "interface {} {{", self.name)?;
        for member in &self.members {
            if is_identifier(&member.name) {
                writeln!(f, "  {}: {},", member.name, member.type_name)?;
            } else {
                writeln!(f, "  \"{}\": {},", member.name, member.type_name)?;
            }
        }
        writeln!(f, "}}")
    }
}

/// Name `root` after `root_name` and stream its interfaces into `sink` with
/// default options.
pub fn generate<W: Write>(mut root: Object, root_name: &str, sink: &mut W) -> Result<()> {
    root.set_key(root_name);
    Synthesizer::default().generate(&root, sink)?;
    Ok(())
}

/// Pick the object to synthesize from a parsed document.
///
/// A root array contributes its first element when that is an object.
pub fn root_object(value: Value) -> Result<Object> {
    match value {
        Value::Object(object) => Ok(object),
        Value::Array(array) => match array.elements.into_iter().next() {
            Some(Value::Object(object)) => Ok(object),
            Some(other) => Err(TypeagenError::RootNotObject {
                found: format!("array of {}", other.kind_name()),
            }),
            None => Err(TypeagenError::RootNotObject {
                found: "empty array".to_string(),
            }),
        },
        Value::Primitive(p) => Err(TypeagenError::RootNotObject {
            found: p.kind.type_name().to_string(),
        }),
    }
}

/// Interface generator configured with [`SynthOptions`].
#[derive(Debug, Clone, Default)]
pub struct Synthesizer {
    options: SynthOptions,
}

impl Synthesizer {
    pub fn new(options: SynthOptions) -> Self {
        Self { options }
    }

    /// Write every block for `root` into `sink` as soon as it is built.
    /// Returns the number of blocks written.
    pub fn generate<W: Write>(&self, root: &Object, sink: &mut W) -> Result<usize> {
        let mut count = 0;
        self.walk(root, |block| {
            write!(sink, "{block}")?;
            count += 1;
            Ok(())
        })?;
        Ok(count)
    }

    /// Collect every block for `root` in emission order.
    pub fn blocks(&self, root: &Object) -> Result<Vec<InterfaceBlock>> {
        let mut blocks = Vec::new();
        self.walk(root, |block| {
            blocks.push(block);
            Ok(())
        })?;
        Ok(blocks)
    }

    fn walk<'a>(
        &self,
        root: &'a Object,
        mut emit: impl FnMut(InterfaceBlock) -> Result<()>,
    ) -> Result<()> {
        let mut walk = Walk {
            options: self.options,
            pending: VecDeque::new(),
            shapes: ShapeTable::default(),
            names: HashMap::new(),
        };

        let root_name = root.type_name();
        if root_name.is_empty() {
            return Err(TypeagenError::EmptyTypeName {
                key: root.key.clone(),
                path: root.key.clone(),
            });
        }
        emit(walk.block(root_name.clone(), root, &root_name)?)?;

        while let Some(next) = walk.next() {
            emit(walk.block(next.name, next.object, &next.path)?)?;
        }
        Ok(())
    }
}

/// A discovered object waiting for its block.
struct Pending<'a> {
    name: String,
    object: &'a Object,
    /// Dotted location used in error messages.
    path: String,
}

/// Worklist and dedupe state for one synthesis run.
struct Walk<'a> {
    options: SynthOptions,
    pending: VecDeque<Pending<'a>>,
    shapes: ShapeTable,
    /// Shape → interface name, only filled when deduping.
    names: HashMap<ShapeId, String>,
}

impl<'a> Walk<'a> {
    fn next(&mut self) -> Option<Pending<'a>> {
        match self.options.order {
            WorklistOrder::Lifo => self.pending.pop_back(),
            WorklistOrder::Fifo => self.pending.pop_front(),
        }
    }

    fn block(&mut self, name: String, object: &'a Object, path: &str) -> Result<InterfaceBlock> {
        let mut members = Vec::with_capacity(object.len());
        for (key, value) in &object.members {
            let member_path = format!("{path}.{key}");
            let type_name = self.type_of(value, key, &member_path)?;
            members.push(Member {
                name: key.clone(),
                type_name,
            });
        }
        debug!(name = %name, members = members.len(), pending = self.pending.len(), "built interface");
        Ok(InterfaceBlock { name, members })
    }

    /// Type expression for `value`. Objects are named after `naming_key`,
    /// which for array elements is the key of the enclosing array.
    fn type_of(&mut self, value: &'a Value, naming_key: &str, path: &str) -> Result<String> {
        match value {
            Value::Primitive(p) => Ok(p.kind.type_name().to_string()),
            Value::Object(object) => self.name_object(object, naming_key, path),
            Value::Array(array) => match array.first() {
                Some(first) => {
                    let element = self.type_of(first, naming_key, &format!("{path}[0]"))?;
                    Ok(format!("{element}[]"))
                }
                None => Err(TypeagenError::EmptyArray {
                    path: path.to_string(),
                }),
            },
        }
    }

    fn name_object(&mut self, object: &'a Object, naming_key: &str, path: &str) -> Result<String> {
        let name = normalize(naming_key);
        if name.is_empty() {
            return Err(TypeagenError::EmptyTypeName {
                key: naming_key.to_string(),
                path: path.to_string(),
            });
        }

        if self.options.dedupe {
            let shape = self.shapes.of_object(object);
            if let Some(existing) = self.names.get(&shape) {
                debug!(path, reused = %existing, "deduplicated object shape");
                return Ok(existing.clone());
            }
            self.names.insert(shape, name.clone());
        }

        self.pending.push_back(Pending {
            name: name.clone(),
            object,
            path: path.to_string(),
        });
        Ok(name)
    }
}

/// Index of an interned [`Shape`]. Equal ids mean equal structure.
type ShapeId = usize;

/// Structure of a value with the data stripped out. Children are referred to
/// by their interned id, so comparing two shapes never recurses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Shape {
    Primitive(PrimitiveKind),
    Object(Vec<(String, ShapeId)>),
    /// Shape of the first element, `None` for an empty array.
    Array(Option<ShapeId>),
}

/// Interned shapes, computed bottom-up and memoized per object so every
/// subtree is visited once per run.
#[derive(Debug, Default)]
struct ShapeTable {
    ids: HashMap<Shape, ShapeId>,
    objects: HashMap<*const Object, ShapeId>,
}

impl ShapeTable {
    fn intern(&mut self, shape: Shape) -> ShapeId {
        let next = self.ids.len();
        *self.ids.entry(shape).or_insert(next)
    }

    fn of_value(&mut self, value: &Value) -> ShapeId {
        match value {
            Value::Primitive(p) => self.intern(Shape::Primitive(p.kind)),
            Value::Object(object) => self.of_object(object),
            Value::Array(array) => {
                let element = array.first().map(|first| self.of_value(first));
                self.intern(Shape::Array(element))
            }
        }
    }

    fn of_object(&mut self, object: &Object) -> ShapeId {
        let addr: *const Object = object;
        if let Some(&id) = self.objects.get(&addr) {
            return id;
        }
        let members = object
            .members
            .iter()
            .map(|(key, member)| (key.clone(), self.of_value(member)))
            .collect();
        let id = self.intern(Shape::Object(members));
        self.objects.insert(addr, id);
        id
    }
}
