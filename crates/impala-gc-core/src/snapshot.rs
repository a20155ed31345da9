//! Raw JMX snapshot decoding and bean lookup.
//!
//! A node's `/jmx` response is an unordered list of bean records with
//! arbitrary field sets. The only structural requirement imposed here is a
//! string `name` field per bean; everything else stays untyped until the
//! decoder runs on the single bean of interest.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Wire shape of a node's `/jmx` response body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JmxSnapshot {
    /// Bean records. A missing key decodes to an empty list.
    #[serde(default)]
    pub beans: Vec<Value>,
}

/// Index of a snapshot's beans keyed by their `name` field.
#[derive(Debug, Default)]
pub struct BeanIndex {
    beans: HashMap<String, Value>,
}

impl BeanIndex {
    /// Builds the index from a decoded snapshot.
    ///
    /// Beans without a string `name` field are skipped. Duplicate names are
    /// not expected from a JMX servlet, but must not break the pipeline:
    /// the last occurrence wins.
    pub fn build(snapshot: JmxSnapshot) -> Self {
        let mut beans = HashMap::with_capacity(snapshot.beans.len());
        for bean in snapshot.beans {
            let name = bean.get("name").and_then(Value::as_str).map(str::to_owned);
            match name {
                Some(name) => {
                    beans.insert(name, bean);
                }
                None => debug!("skipping bean without a string name field"),
            }
        }
        Self { beans }
    }

    /// Looks up a bean by exact name. Absence is a normal outcome — the
    /// remote JVM may not have emitted the requested category yet.
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.beans.get(name)
    }

    pub fn len(&self) -> usize {
        self.beans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beans.is_empty()
    }
}
