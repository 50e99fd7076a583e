//! Indented field-tree rendering
//!
//! Models derive [`ToTree`](crate::ToTree) to get a per-type rendering function that
//! walks their known fields. Field types plug in through [`TreeValue`].

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::{self, Write};

const INDENT: &str = "    ";

/// Accumulates the lines of a rendered tree
#[derive(Debug, Default)]
pub struct TreeWriter {
    buf: String,
    depth: usize,
}

impl TreeWriter {
    /// Create an empty writer at depth zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a scalar line: `name (kind) = value`
    pub fn leaf(&mut self, name: &str, kind: &str, value: impl fmt::Display) {
        self.indent();
        // Writing into a String cannot fail
        let _ = writeln!(self.buf, "{name} ({kind}) = {value}");
    }

    /// Write a heading line and render `children` one level deeper
    pub fn branch(&mut self, name: &str, kind: &str, children: impl FnOnce(&mut TreeWriter)) {
        self.indent();
        let _ = writeln!(self.buf, "{name} ({kind}):");
        self.depth += 1;
        children(self);
        self.depth -= 1;
    }

    /// Consume the writer and return the rendered lines
    pub fn finish(self) -> String {
        self.buf
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.buf.push_str(INDENT);
        }
    }
}

/// A model that renders as a tree of its fields
pub trait ToTree {
    /// Write every field of `self` into `out`
    fn write_tree(&self, out: &mut TreeWriter);

    /// Render the whole tree as a string, one field per line
    fn to_tree(&self) -> String {
        let mut out = TreeWriter::new();
        self.write_tree(&mut out);
        out.finish()
    }
}

/// A value that can appear as a named field in a tree
pub trait TreeValue {
    /// Write `self` under the label `name`
    fn write_value(&self, name: &str, out: &mut TreeWriter);
}

macro_rules! display_leaf {
    ($($ty:ty => $kind:literal),* $(,)?) => {
        $(
            impl TreeValue for $ty {
                fn write_value(&self, name: &str, out: &mut TreeWriter) {
                    out.leaf(name, $kind, self);
                }
            }
        )*
    };
}

display_leaf! {
    i64 => "int",
    u32 => "int",
    usize => "int",
    f64 => "float",
    bool => "bool",
    NaiveDateTime => "datetime",
    DateTime<Utc> => "datetime",
    Value => "json",
}

impl TreeValue for String {
    fn write_value(&self, name: &str, out: &mut TreeWriter) {
        out.leaf(name, "str", format_args!("{self:?}"));
    }
}

impl<T: TreeValue> TreeValue for Option<T> {
    fn write_value(&self, name: &str, out: &mut TreeWriter) {
        match self {
            Some(value) => value.write_value(name, out),
            None => out.leaf(name, "None", "None"),
        }
    }
}

impl<T: TreeValue> TreeValue for Vec<T> {
    fn write_value(&self, name: &str, out: &mut TreeWriter) {
        out.branch(name, "list", |out| {
            for (index, item) in self.iter().enumerate() {
                item.write_value(&format!("[{index}]"), out);
            }
        });
    }
}

impl<T: TreeValue> TreeValue for BTreeMap<String, T> {
    fn write_value(&self, name: &str, out: &mut TreeWriter) {
        out.branch(name, "map", |out| {
            for (key, value) in self {
                value.write_value(&format!("{key:?}"), out);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ToTree;

    #[derive(ToTree)]
    struct Inner {
        amount: Option<f64>,
        unit: Option<String>,
    }

    #[derive(ToTree)]
    struct Outer {
        id: String,
        level: Option<i64>,
        inner: Inner,
        tags: Vec<String>,
        #[tree(skip)]
        #[allow(dead_code)]
        hidden: bool,
    }

    #[test]
    fn test_derived_tree_layout() {
        let outer = Outer {
            id: "abc".to_string(),
            level: None,
            inner: Inner {
                amount: Some(1.5),
                unit: Some("km".to_string()),
            },
            tags: vec!["x".to_string()],
            hidden: true,
        };

        let expected = [
            r#"id (str) = "abc""#,
            "level (None) = None",
            "inner (Inner):",
            "    amount (float) = 1.5",
            r#"    unit (str) = "km""#,
            "tags (list):",
            r#"    [0] (str) = "x""#,
        ]
        .join("\n");

        assert_eq!(outer.to_tree().trim_end(), expected);
        assert_eq!(outer.to_string(), expected);
    }

    #[test]
    fn test_map_values_render_with_quoted_keys() {
        let mut map = BTreeMap::new();
        map.insert("p1".to_string(), vec![1i64, 2]);
        let mut out = TreeWriter::new();
        map.write_value("replays", &mut out);
        assert_eq!(
            out.finish(),
            "replays (map):\n    \"p1\" (list):\n        [0] (int) = 1\n        [1] (int) = 2\n"
        );
    }
}
