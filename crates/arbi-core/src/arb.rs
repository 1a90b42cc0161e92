use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// A JSON object plus an ordered list of binary-safe arguments.
///
/// `json` is always an object; `{}` after construction. Arguments are
/// positional and keep insertion order. Signed indices count from the end when
/// negative (`-1` is the last argument).
#[derive(Debug, Clone, PartialEq)]
pub struct ArbData {
    json: Value,
    args: Vec<Vec<u8>>,
}

impl Default for ArbData {
    fn default() -> Self {
        ArbData {
            json: Value::Object(Map::new()),
            args: Vec::new(),
        }
    }
}

impl ArbData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(json: Value, args: Vec<Vec<u8>>) -> Result<Self> {
        let mut data = ArbData {
            args,
            ..ArbData::default()
        };
        data.set_json(json)?;
        Ok(data)
    }

    pub fn json(&self) -> &Value {
        &self.json
    }

    pub fn set_json(&mut self, json: Value) -> Result<()> {
        if !json.is_object() {
            return Err(Error::Parse(
                "top-level JSON value must be an object".to_string(),
            ));
        }
        self.json = json;
        Ok(())
    }

    /// Replaces the JSON document with the one parsed from `text`. The
    /// container is unchanged on failure.
    pub fn set_json_str(&mut self, text: &str) -> Result<()> {
        let json: Value = serde_json::from_str(text)?;
        self.set_json(json)
    }

    /// Compact serialization of the JSON document.
    pub fn json_str(&self) -> String {
        self.json.to_string()
    }

    pub fn args(&self) -> &[Vec<u8>] {
        &self.args
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn push_arg(&mut self, arg: impl Into<Vec<u8>>) {
        self.args.push(arg.into());
    }

    pub fn pop_arg(&mut self) -> Result<Vec<u8>> {
        self.args
            .pop()
            .ok_or_else(|| Error::out_of_range("pop from empty argument list"))
    }

    pub fn arg(&self, index: isize) -> Result<&[u8]> {
        let i = self.resolve_index(index, false)?;
        Ok(&self.args[i])
    }

    pub fn set_arg(&mut self, index: isize, arg: impl Into<Vec<u8>>) -> Result<()> {
        let i = self.resolve_index(index, false)?;
        self.args[i] = arg.into();
        Ok(())
    }

    /// Inserts before `index`. `len()` and `-1` both append.
    pub fn insert_arg(&mut self, index: isize, arg: impl Into<Vec<u8>>) -> Result<()> {
        let i = self.resolve_index(index, true)?;
        self.args.insert(i, arg.into());
        Ok(())
    }

    pub fn remove_arg(&mut self, index: isize) -> Result<Vec<u8>> {
        let i = self.resolve_index(index, false)?;
        Ok(self.args.remove(i))
    }

    pub fn clear_args(&mut self) {
        self.args.clear();
    }

    /// Deep copy of `src` into `self`.
    pub fn assign(&mut self, src: &ArbData) {
        self.clone_from(src);
    }

    fn resolve_index(&self, index: isize, insert: bool) -> Result<usize> {
        let len = self.args.len();
        let limit = if insert { len + 1 } else { len };
        let resolved = if index < 0 {
            (limit as isize).checked_add(index)
        } else {
            Some(index)
        };
        match resolved {
            Some(i) if i >= 0 && (i as usize) < limit => Ok(i as usize),
            _ => Err(Error::out_of_range(format!(
                "index {index} is out of range for {len} argument(s)"
            ))),
        }
    }
}

/// Access to the [`ArbData`] carried by an object.
///
/// Both bare containers and commands implement this, so every argument/JSON
/// operation works on either kind of handle.
pub trait ArbAccess {
    fn arb(&self) -> &ArbData;
    fn arb_mut(&mut self) -> &mut ArbData;
}

impl ArbAccess for ArbData {
    fn arb(&self) -> &ArbData {
        self
    }

    fn arb_mut(&mut self) -> &mut ArbData {
        self
    }
}
