use super::error::LoadError;
use super::types::{Info, Middleware, Route, ServiceDescriptor};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Wire shape of a descriptor. It is only ever turned into a
/// [`ServiceDescriptor`] by replaying its entries through the mutation API.
#[derive(Deserialize)]
struct RawDescriptor {
    #[serde(flatten)]
    info: Info,
    #[serde(rename = "Routes", default)]
    routes: Vec<Route>,
    #[serde(rename = "Middlewares", default)]
    middlewares: Vec<Middleware>,
}

impl RawDescriptor {
    fn validate(self) -> Result<ServiceDescriptor, LoadError> {
        let mut desc = ServiceDescriptor::base(self.info);
        for route in self.routes {
            desc.add_route(route)?;
        }
        for mw in self.middlewares {
            desc.add_middleware(mw)?;
        }
        Ok(desc)
    }
}

/// Serialization format of a descriptor file, picked from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorFormat {
    Yaml,
    Json,
}

impl DescriptorFormat {
    /// `.json` selects JSON; anything else (`.yml`, `.yaml`, none) is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DescriptorFormat::Json,
            _ => DescriptorFormat::Yaml,
        }
    }
}

impl ServiceDescriptor {
    pub fn to_yaml(&self) -> Result<String, LoadError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn from_yaml(content: &str) -> Result<Self, LoadError> {
        let raw: RawDescriptor = serde_yaml::from_str(content)?;
        raw.validate()
    }

    pub fn to_json(&self) -> Result<String, LoadError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(content: &str) -> Result<Self, LoadError> {
        let raw: RawDescriptor = serde_json::from_str(content)?;
        raw.validate()
    }

    /// Reads a descriptor file. Every route and middleware is re-added through
    /// `add_route` / `add_middleware`, so a file violating the descriptor
    /// invariants is rejected rather than loaded.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match DescriptorFormat::from_path(path) {
            DescriptorFormat::Yaml => Self::from_yaml(&content),
            DescriptorFormat::Json => Self::from_json(&content),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), LoadError> {
        let content = match DescriptorFormat::from_path(path) {
            DescriptorFormat::Yaml => self.to_yaml()?,
            DescriptorFormat::Json => self.to_json()?,
        };
        fs::write(path, content).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
