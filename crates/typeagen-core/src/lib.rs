//! # typeagen-core
//!
//! Turns a JSON document into TypeScript `interface` declarations describing
//! its shape.
//!
//! Two engines do the work: a small hand-written JSON [`parser`] that builds a
//! [`Value`] tree (optionally filling `${NAME}` placeholders from an
//! [`env`] mapping), and the [`synth`] module that walks the tree and emits one
//! interface per nested object.
//!
//! ## Quick start
//!
//! ```rust
//! use typeagen_core::synthesize;
//!
//! let ts = synthesize(r#"{"a": 1, "b": "x", "c": {"d": true}}"#, "Root").unwrap();
//! assert_eq!(
//!     ts,
//!     "interface Root {\n  a: number,\n  b: string,\n  c: C,\n}\n\
//!      interface C {\n  d: boolean,\n}\n"
//! );
//! ```
//!
//! ## Modules
//!
//! - [`parser`]: JSON text → [`Value`]
//! - [`value`]: the document model
//! - [`synth`]: [`Object`] → interface blocks
//! - [`naming`]: property key → type identifier
//! - [`env`]: `NAME=VALUE` text → interpolation mapping
//! - [`error`]: error types

pub mod env;
pub mod error;
pub mod naming;
pub mod parser;
pub mod synth;
pub mod value;

pub use env::EnvMap;
pub use error::{EnvError, ParseError, ParseErrorKind, Result, TypeagenError};
pub use naming::normalize;
pub use parser::parse;
pub use synth::{InterfaceBlock, Member, SynthOptions, Synthesizer, WorklistOrder};
pub use value::{Array, Object, Primitive, PrimitiveKind, Value};

/// Parse `json` and render all of its interfaces into a string, naming the
/// root `root_name`.
pub fn synthesize(json: &str, root_name: &str) -> Result<String> {
    synthesize_with(json, root_name, None, SynthOptions::default())
}

/// [`synthesize`] with an interpolation mapping and explicit options.
pub fn synthesize_with(
    json: &str,
    root_name: &str,
    env: Option<&EnvMap>,
    options: SynthOptions,
) -> Result<String> {
    let mut root = synth::root_object(parse(json, env)?)?;
    root.set_key(root_name);

    let mut out = Vec::new();
    Synthesizer::new(options).generate(&root, &mut out)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}
