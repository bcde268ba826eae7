use serde::Deserialize;
use serde_json::Value;

/// One product as the upstream catalog service sends it. Most fields come in
/// several shapes depending on which CMS export produced the record.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    #[serde(default, alias = "product_id", alias = "productId")]
    pub id: Option<ScalarValue>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "short_name")]
    pub short_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Upstream brand tag, mapped to a product line.
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, alias = "industries")]
    pub industry: Option<StringOrList>,
    #[serde(default)]
    pub chemistry: Option<String>,
    #[serde(default, alias = "technical_data")]
    pub technical_data: Option<RawTechnicalData>,
    #[serde(default, alias = "packaging")]
    pub sizes: Option<RawSizes>,
    #[serde(default, alias = "image_url")]
    pub image_url: Option<String>,
    /// Older exports carry a bare filename here instead of `imageUrl`.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, alias = "is_active")]
    pub is_active: Option<bool>,
    #[serde(default, alias = "created_at")]
    pub created_at: Option<String>,
    #[serde(default, alias = "updated_at")]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub version: Option<ScalarValue>,
}

/// A JSON scalar that should be treated as text.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

impl ScalarValue {
    pub fn into_text(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    One(String),
    Many(Vec<String>),
}

/// Technical data arrives either as `[{property, value}]` or as an object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawTechnicalData {
    Pairs(Vec<TechnicalPair>),
    Map(serde_json::Map<String, Value>),
}

#[derive(Debug, Clone, Deserialize)]
pub struct TechnicalPair {
    #[serde(alias = "name", alias = "label")]
    pub property: String,
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawSizes {
    Text(String),
    List(Vec<RawSize>),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawSize {
    Scalar(ScalarValue),
    Entry(RawSizeEntry),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSizeEntry {
    #[serde(default)]
    pub size: Option<ScalarValue>,
    #[serde(default)]
    pub label: Option<ScalarValue>,
    #[serde(default)]
    pub value: Option<ScalarValue>,
    #[serde(default)]
    pub name: Option<ScalarValue>,
}

impl RawSizeEntry {
    /// The first populated field, in order of preference.
    pub fn into_text(self) -> Option<String> {
        self.size
            .or(self.label)
            .or(self.value)
            .or(self.name)
            .map(ScalarValue::into_text)
    }
}
