use std::collections::BTreeMap;

/// String-keyed view of a document's leading `---` delimited block.
///
/// Parsing is best-effort: scalars are stringified, nested values are
/// ignored, and a block that fails YAML parsing yields an empty record.
/// Callers treat absence and malformation identically.
#[derive(Debug, Default, Clone)]
pub struct FrontMatter {
    fields: BTreeMap<String, String>,
}

impl FrontMatter {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(|s| s.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }
}

/// Extract the raw front-matter block, if the document starts with one.
fn front_matter_block(text: &str) -> Option<&str> {
    let rest = text.strip_prefix("---")?;
    let rest = rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))?;
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some(&rest[..offset]);
        }
        offset += line.len();
    }
    None
}

pub fn parse(text: &str) -> FrontMatter {
    let Some(block) = front_matter_block(text) else {
        return FrontMatter::default();
    };
    let Ok(value) = serde_yaml::from_str::<serde_yaml::Value>(block) else {
        return FrontMatter::default();
    };
    let Some(map) = value.as_mapping() else {
        return FrontMatter::default();
    };

    let mut fields = BTreeMap::new();
    for (k, v) in map {
        let Some(key) = k.as_str() else { continue };
        let rendered = match v {
            serde_yaml::Value::String(s) => s.clone(),
            serde_yaml::Value::Bool(b) => b.to_string(),
            serde_yaml::Value::Number(n) => n.to_string(),
            _ => continue,
        };
        fields.insert(key.to_string(), rendered);
    }
    FrontMatter { fields }
}
