//! Raw shape of a model export document.
//!
//! These types mirror the TOML layout one to one. Identifiers and references
//! keep their source spans so validation can point at them.

use serde::Deserialize;
use toml::Spanned;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelDocument {
    #[serde(default)]
    pub packages: Vec<PackageDef>,
    #[serde(default)]
    pub connectors: Vec<ConnectorDef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageDef {
    pub name: String,
    #[serde(default)]
    pub stereotype: Option<String>,
    #[serde(default)]
    pub packages: Vec<PackageDef>,
    #[serde(default)]
    pub elements: Vec<ElementDef>,
    #[serde(default)]
    pub diagrams: Vec<DiagramDef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElementDef {
    pub id: Spanned<u32>,
    pub name: String,
    #[serde(rename = "type", default)]
    pub element_type: Option<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub base_classes: Vec<Spanned<u32>>,
    #[serde(default)]
    pub run_state: String,
    #[serde(default)]
    pub attributes: Vec<AttributeDef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttributeDef {
    pub name: String,
    #[serde(rename = "type", default)]
    pub attribute_type: String,
    #[serde(default)]
    pub default: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiagramDef {
    pub name: Spanned<String>,
    #[serde(rename = "type", default)]
    pub diagram_type: String,
    #[serde(default)]
    pub objects: Vec<Spanned<u32>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectorDef {
    #[serde(rename = "type")]
    pub connector_type: String,
    pub client: Spanned<u32>,
    pub supplier: Spanned<u32>,
    #[serde(default)]
    pub client_end: Option<ConnectorEndDef>,
    #[serde(default)]
    pub supplier_end: Option<ConnectorEndDef>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectorEndDef {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub cardinality: String,
}
