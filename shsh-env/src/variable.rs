//! Variables as first-class scalars or arrays (the supplemented redesign
//! from the expanded spec), plus the lossless flattened `name[i]`/`name`
//! view some callers still want to inspect as a plain string map.

use std::collections::HashMap;

use bitflags::bitflags;

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Attr: u8 {
        const EXPORTED = 1 << 0;
        const READONLY = 1 << 1;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Scalar(String),
    Array(Vec<String>),
}

impl Value {
    /// The scalar view bash exposes for a bare `$name`/`${name}` reference:
    /// the whole string for a scalar, or element 0 for an array.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Value::Scalar(s) => Some(s),
            Value::Array(a) => a.first().map(|s| s.as_str()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Variable {
    pub value: Value,
    pub attr: Attr,
}

impl Variable {
    pub fn scalar(value: impl Into<String>) -> Self {
        Variable {
            value: Value::Scalar(value.into()),
            attr: Attr::empty(),
        }
    }

    pub fn array(values: Vec<String>) -> Self {
        Variable {
            value: Value::Array(values),
            attr: Attr::empty(),
        }
    }

    pub fn exported(mut self) -> Self {
        self.attr |= Attr::EXPORTED;
        self
    }

    pub fn is_exported(&self) -> bool {
        self.attr.contains(Attr::EXPORTED)
    }

    pub fn is_readonly(&self) -> bool {
        self.attr.contains(Attr::READONLY)
    }
}

/// An ordered variable table: insertion order is preserved so `export -p`/
/// `declare -p`/bare `set` reconstruction (§2.2) is deterministic.
#[derive(Clone, Debug, Default)]
pub struct VarTable {
    order: Vec<String>,
    vars: HashMap<String, Variable>,
}

impl VarTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.vars.get(name)
    }

    pub fn get_scalar(&self, name: &str) -> Option<&str> {
        self.vars.get(name).and_then(|v| v.value.as_scalar())
    }

    pub fn set_scalar(&mut self, name: &str, value: impl Into<String>) -> Result<(), String> {
        self.set(name, Variable::scalar(value))
    }

    pub fn set(&mut self, name: &str, variable: Variable) -> Result<(), String> {
        if let Some(existing) = self.vars.get(name) {
            if existing.is_readonly() {
                return Err(format!("{name}: readonly variable"));
            }
        }
        if !self.vars.contains_key(name) {
            self.order.push(name.to_string());
        }
        self.vars.insert(name.to_string(), variable);
        Ok(())
    }

    pub fn unset(&mut self, name: &str) -> Result<(), String> {
        if let Some(existing) = self.vars.get(name) {
            if existing.is_readonly() {
                return Err(format!("{name}: readonly variable"));
            }
        }
        self.vars.remove(name);
        self.order.retain(|n| n != name);
        Ok(())
    }

    pub fn mark_exported(&mut self, name: &str) {
        if let Some(v) = self.vars.get_mut(name) {
            v.attr |= Attr::EXPORTED;
        } else {
            self.vars.insert(name.to_string(), Variable::scalar("").exported());
            self.order.push(name.to_string());
        }
    }

    pub fn mark_readonly(&mut self, name: &str) {
        if let Some(v) = self.vars.get_mut(name) {
            v.attr |= Attr::READONLY;
        } else {
            let mut v = Variable::scalar("");
            v.attr |= Attr::READONLY;
            self.vars.insert(name.to_string(), v);
            self.order.push(name.to_string());
        }
    }

    /// Iterates in insertion order, the order `export -p`/bare `set` must
    /// reproduce.
    pub fn iter_in_order(&self) -> impl Iterator<Item = (&str, &Variable)> {
        self.order
            .iter()
            .filter_map(move |n| self.vars.get(n.as_str()).map(|v| (n.as_str(), v)))
    }

    pub fn exported_iter(&self) -> impl Iterator<Item = (&str, &Variable)> {
        self.iter_in_order().filter(|(_, v)| v.is_exported())
    }

    /// The flattened `name[i]` + scalar-`name`-as-index-0 view described in
    /// §3, for callers that want a plain `HashMap<String, String>` of the
    /// current variable table.
    pub fn flatten(&self) -> HashMap<String, String> {
        let mut out = HashMap::new();
        for (name, var) in self.iter_in_order() {
            match &var.value {
                Value::Scalar(s) => {
                    out.insert(name.to_string(), s.clone());
                }
                Value::Array(items) => {
                    for (i, item) in items.iter().enumerate() {
                        out.insert(format!("{name}[{i}]"), item.clone());
                    }
                    if let Some(first) = items.first() {
                        out.insert(name.to_string(), first.clone());
                    }
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readonly_rejects_overwrite() {
        let mut table = VarTable::new();
        table.set_scalar("X", "1").unwrap();
        table.mark_readonly("X");
        assert!(table.set_scalar("X", "2").is_err());
        assert_eq!(table.get_scalar("X"), Some("1"));
    }

    #[test]
    fn array_scalar_view_is_index_zero() {
        let mut table = VarTable::new();
        table
            .set("arr", Variable::array(vec!["a".into(), "b".into()]))
            .unwrap();
        assert_eq!(table.get_scalar("arr"), Some("a"));
    }

    #[test]
    fn flatten_matches_name_i_encoding() {
        let mut table = VarTable::new();
        table
            .set("arr", Variable::array(vec!["a".into(), "b".into()]))
            .unwrap();
        let flat = table.flatten();
        assert_eq!(flat.get("arr[0]").map(String::as_str), Some("a"));
        assert_eq!(flat.get("arr[1]").map(String::as_str), Some("b"));
        assert_eq!(flat.get("arr").map(String::as_str), Some("a"));
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut table = VarTable::new();
        table.set_scalar("z", "1").unwrap();
        table.set_scalar("a", "2").unwrap();
        let names: Vec<&str> = table.iter_in_order().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["z", "a"]);
    }
}
