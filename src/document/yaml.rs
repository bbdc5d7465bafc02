use std::borrow::Cow;
use std::collections::HashMap;

use hashlink::LinkedHashMap;
use saphyr::Scalar;
use saphyr_parser::{Event, EventReceiver, Parser, ScalarStyle, ScanError, Tag};
use snafu::prelude::*;
use tracing::{debug, trace};

use super::Value;

/// Suffix of the core `!!set` tag.
const SET_TAG_SUFFIX: &str = "set";

impl Value {
    /// Loads the first document of `contents`. An empty input yields `Null`.
    ///
    /// Aliases are expanded into a copy of their anchored node.
    pub fn from_yaml_str(contents: &str) -> Result<Value, DocumentError> {
        let mut builder = DocumentBuilder::default();
        Parser::new_from_str(contents)
            .load(&mut builder, false)
            .context(ParseSnafu)?;
        builder.finish()
    }
}

/// `!!set`, not a local `!set`.
fn is_set_tag(tag: &Tag) -> bool {
    tag.is_yaml_core_schema() && tag.suffix == SET_TAG_SUFFIX
}

enum Frame {
    Sequence {
        anchor: usize,
        items: Vec<Value>,
    },
    Mapping {
        anchor: usize,
        is_set: bool,
        key: Option<Value>,
        entries: Vec<(Value, Value)>,
    },
}

/// Builds a [`Value`] from parser events. saphyr's own loader discards core
/// tags on collections, which would lose `!!set`.
#[derive(Default)]
struct DocumentBuilder {
    stack: Vec<Frame>,
    anchors: HashMap<usize, Value>,
    document: Option<Value>,
    error: Option<DocumentError>,
}

impl<'input> EventReceiver<'input> for DocumentBuilder {
    fn on_event(&mut self, event: Event<'input>) {
        if self.error.is_some() {
            return;
        }
        if let Err(error) = self.handle(event) {
            self.error = Some(error);
        }
    }
}

impl DocumentBuilder {
    fn handle(&mut self, event: Event<'_>) -> Result<(), DocumentError> {
        match event {
            Event::Scalar(raw, style, anchor, tag) => {
                ensure!(!tag.as_deref().is_some_and(is_set_tag), MalformedSetSnafu);
                let value = scalar(raw, style, tag.as_ref())?;
                self.insert(value, anchor);
            }
            Event::SequenceStart(anchor, tag) => {
                ensure!(!tag.as_deref().is_some_and(is_set_tag), MalformedSetSnafu);
                self.stack.push(Frame::Sequence {
                    anchor,
                    items: Vec::new(),
                });
            }
            Event::MappingStart(anchor, tag) => {
                let is_set = tag.as_deref().is_some_and(is_set_tag);
                if is_set {
                    trace!("Reading a tagged set");
                }
                self.stack.push(Frame::Mapping {
                    anchor,
                    is_set,
                    key: None,
                    entries: Vec::new(),
                });
            }
            Event::SequenceEnd | Event::MappingEnd => {
                let (value, anchor) = match self.stack.pop() {
                    Some(Frame::Sequence { anchor, items }) => (Value::Seq(items), anchor),
                    Some(Frame::Mapping {
                        anchor,
                        is_set,
                        entries,
                        ..
                    }) => (finish_mapping(entries, is_set)?, anchor),
                    None => return UnbalancedSnafu.fail(),
                };
                self.insert(value, anchor);
            }
            Event::Alias(anchor) => {
                let value = self
                    .anchors
                    .get(&anchor)
                    .cloned()
                    .context(UnknownAliasSnafu { anchor })?;
                self.insert(value, 0);
            }
            Event::Nothing
            | Event::StreamStart
            | Event::StreamEnd
            | Event::DocumentStart(_)
            | Event::DocumentEnd => {}
        }
        Ok(())
    }

    /// Attaches a finished node to the open collection, or makes it the
    /// document. Anchor ids start at 1.
    fn insert(&mut self, value: Value, anchor: usize) {
        if anchor > 0 {
            self.anchors.insert(anchor, value.clone());
        }

        match self.stack.last_mut() {
            Some(Frame::Sequence { items, .. }) => items.push(value),
            Some(Frame::Mapping { key, entries, .. }) => match key.take() {
                Some(key) => entries.push((key, value)),
                None => *key = Some(value),
            },
            None => self.document = Some(value),
        }
    }

    fn finish(self) -> Result<Value, DocumentError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        debug!("Loaded YAML document with {} anchor(s)", self.anchors.len());
        Ok(self.document.unwrap_or(Value::Null))
    }
}

fn scalar<'input>(
    raw: Cow<'input, str>,
    style: ScalarStyle,
    tag: Option<&Cow<'input, Tag>>,
) -> Result<Value, DocumentError> {
    match Scalar::parse_from_cow_and_metadata(raw.clone(), style, tag) {
        Some(scalar) => Ok(convert_scalar(&scalar)),
        None => InvalidScalarSnafu {
            value: raw.into_owned(),
            tag: tag.map(|tag| tag.to_string()).unwrap_or_default(),
        }
        .fail(),
    }
}

fn convert_scalar(scalar: &Scalar) -> Value {
    match scalar {
        Scalar::Null => Value::Null,
        Scalar::Boolean(b) => Value::Bool(*b),
        Scalar::Integer(i) => Value::Int(*i),
        Scalar::FloatingPoint(x) => Value::Float(x.into_inner()),
        Scalar::String(s) => Value::Str(s.to_string()),
    }
}

/// A set keeps its keys as members, which all have to map to null.
fn finish_mapping(entries: Vec<(Value, Value)>, is_set: bool) -> Result<Value, DocumentError> {
    if is_set {
        ensure!(
            entries.iter().all(|(_, value)| *value == Value::Null),
            MalformedSetSnafu
        );
        return Ok(Value::set_from(entries.into_iter().map(|(member, _)| member)));
    }

    let mut map = LinkedHashMap::with_capacity(entries.len());
    for (key, value) in entries {
        let key = mapping_key(key)?;
        if map.contains_key(&key) {
            return DuplicateKeySnafu { key }.fail();
        }
        map.insert(key, value);
    }

    Ok(Value::Map(map))
}

/// Non-string scalar keys are stringified; collection keys are rejected.
fn mapping_key(key: Value) -> Result<String, DocumentError> {
    match key {
        Value::Str(s) => Ok(s),
        other if !other.is_container() => Ok(other.to_string()),
        other => UnsupportedKeySnafu {
            key: other.to_string(),
        }
        .fail(),
    }
}

#[derive(Debug, Snafu)]
pub enum DocumentError {
    #[snafu(display("Failed to parse the document"))]
    ParseError { source: ScanError },
    #[snafu(display("Key '{}' appears more than once in a mapping", key))]
    DuplicateKey { key: String },
    #[snafu(display("Mapping key {} is not a scalar", key))]
    UnsupportedKey { key: String },
    #[snafu(display("A !!set must be a mapping whose values are all null"))]
    MalformedSet,
    #[snafu(display("Scalar '{}' does not match its tag {}", value, tag))]
    InvalidScalar { value: String, tag: String },
    #[snafu(display("Alias refers to unknown anchor {}", anchor))]
    UnknownAlias { anchor: usize },
    #[snafu(display("Collection closed without being opened"))]
    Unbalanced,
}
