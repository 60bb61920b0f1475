//! JSON bridge between `serde_json::Value` documents and [`SchemaGraph`].
//!
//! Only the keywords that shape the graph, plus `title`, `description` and
//! `type`, are interpreted. Everything else is carried verbatim in
//! [`Schema::extra`]. `$ref` is never resolved.

use jst_core::errors::SchemaError;
use serde_json::{Map, Value};

use super::graph::{NodeId, SchemaGraph};
use super::node::{Items, Schema};

const ROOT_POINTER: &str = "#";

impl SchemaGraph {
    /// Parse a JSON document and add its nodes, returning the root.
    pub fn read_str(&mut self, text: &str) -> Result<NodeId, SchemaError> {
        let value: Value = serde_json::from_str(text)?;
        self.read_value(&value)
    }

    /// Add the nodes of `value` to this graph, returning the root.
    ///
    /// Every call allocates fresh nodes: reading the same document twice
    /// yields two equivalent but distinct subgraphs.
    pub fn read_value(&mut self, value: &Value) -> Result<NodeId, SchemaError> {
        self.read_at(value, ROOT_POINTER)
    }

    /// Write the subgraph rooted at `root` as canonical JSON.
    ///
    /// Keys are sorted and empty fields omitted. Fails on cycles, which have
    /// no tree form.
    pub fn to_value(&self, root: NodeId) -> Result<Value, SchemaError> {
        let mut ancestors = Vec::new();
        self.write_at(root, &mut ancestors)
    }

    /// Compact canonical JSON text for the subgraph rooted at `root`.
    pub fn write_string(&self, root: NodeId) -> Result<String, SchemaError> {
        Ok(serde_json::to_string(&self.to_value(root)?)?)
    }

    fn read_at(&mut self, value: &Value, pointer: &str) -> Result<NodeId, SchemaError> {
        let object = value.as_object().ok_or_else(|| SchemaError::NotAnObject {
            pointer: pointer.to_string(),
        })?;

        let mut schema = Schema::default();
        for (keyword, v) in object {
            let at = child_pointer(pointer, keyword);
            match keyword.as_str() {
                "title" => schema.title = Some(expect_str(v, pointer, keyword)?),
                "description" => schema.description = Some(expect_str(v, pointer, keyword)?),
                "type" => schema.types = read_types(v, pointer)?,
                "properties" => {
                    let members = v.as_object().ok_or_else(|| {
                        invalid(pointer, keyword, "an object of schemas")
                    })?;
                    for (name, child) in members {
                        let id = self.read_at(child, &child_pointer(&at, name))?;
                        schema.properties.insert(name.clone(), id);
                    }
                }
                "items" => {
                    schema.items = Some(match v {
                        Value::Object(_) => Items::Single(self.read_at(v, &at)?),
                        Value::Array(members) => Items::Tuple(self.read_list(members, &at)?),
                        _ => return Err(invalid(pointer, keyword, "a schema or an array of schemas")),
                    });
                }
                "anyOf" | "allOf" | "oneOf" => {
                    let members = v
                        .as_array()
                        .ok_or_else(|| invalid(pointer, keyword, "an array of schemas"))?;
                    let ids = self.read_list(members, &at)?;
                    match keyword.as_str() {
                        "anyOf" => schema.any_of = ids,
                        "allOf" => schema.all_of = ids,
                        _ => schema.one_of = ids,
                    }
                }
                _ => {
                    schema.extra.insert(keyword.clone(), v.clone());
                }
            }
        }
        Ok(self.add(schema))
    }

    fn read_list(&mut self, members: &[Value], pointer: &str) -> Result<Vec<NodeId>, SchemaError> {
        members
            .iter()
            .enumerate()
            .map(|(i, member)| self.read_at(member, &format!("{pointer}/{i}")))
            .collect()
    }

    fn write_at(&self, id: NodeId, ancestors: &mut Vec<NodeId>) -> Result<Value, SchemaError> {
        if ancestors.contains(&id) {
            return Err(SchemaError::Cyclic { node: id.raw() });
        }
        let schema = self
            .get(id)
            .ok_or(SchemaError::UnknownNode { node: id.raw() })?;
        ancestors.push(id);

        let mut object: Map<String, Value> = schema
            .extra
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        if let Some(title) = schema.title.as_deref().filter(|t| !t.is_empty()) {
            object.insert("title".into(), Value::String(title.to_string()));
        }
        if let Some(description) = schema.description.as_deref().filter(|d| !d.is_empty()) {
            object.insert("description".into(), Value::String(description.to_string()));
        }
        match schema.types.as_slice() {
            [] => {}
            [single] => {
                object.insert("type".into(), Value::String(single.clone()));
            }
            many => {
                object.insert(
                    "type".into(),
                    Value::Array(many.iter().cloned().map(Value::String).collect()),
                );
            }
        }
        if !schema.properties.is_empty() {
            let mut members = Map::new();
            for (name, &child) in &schema.properties {
                members.insert(name.clone(), self.write_at(child, ancestors)?);
            }
            object.insert("properties".into(), Value::Object(members));
        }
        match &schema.items {
            Some(Items::Single(child)) => {
                object.insert("items".into(), self.write_at(*child, ancestors)?);
            }
            Some(Items::Tuple(members)) if !members.is_empty() => {
                object.insert("items".into(), self.write_list(members, ancestors)?);
            }
            _ => {}
        }
        for (keyword, members) in [
            ("anyOf", &schema.any_of),
            ("allOf", &schema.all_of),
            ("oneOf", &schema.one_of),
        ] {
            if !members.is_empty() {
                object.insert(keyword.into(), self.write_list(members, ancestors)?);
            }
        }

        ancestors.pop();
        Ok(Value::Object(object))
    }

    fn write_list(&self, members: &[NodeId], ancestors: &mut Vec<NodeId>) -> Result<Value, SchemaError> {
        members
            .iter()
            .map(|&member| self.write_at(member, ancestors))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    }
}

fn child_pointer(pointer: &str, segment: &str) -> String {
    format!("{pointer}/{}", segment.replace('~', "~0").replace('/', "~1"))
}

fn invalid(pointer: &str, keyword: &str, expected: &'static str) -> SchemaError {
    SchemaError::InvalidKeyword {
        pointer: pointer.to_string(),
        keyword: keyword.to_string(),
        expected,
    }
}

fn expect_str(value: &Value, pointer: &str, keyword: &str) -> Result<String, SchemaError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid(pointer, keyword, "a string"))
}

fn read_types(value: &Value, pointer: &str) -> Result<Vec<String>, SchemaError> {
    match value {
        Value::String(single) => Ok(vec![single.clone()]),
        Value::Array(many) => many
            .iter()
            .map(|v| expect_str(v, pointer, "type"))
            .collect(),
        _ => Err(invalid(pointer, "type", "a string or an array of strings")),
    }
}
