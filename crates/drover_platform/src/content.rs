//! Content catalog and per-screen content scopes.
//!
//! The catalog is the shared, immutable description of every loadable asset.
//! Each screen owns a private `ContentScope` over it: assets loaded through a
//! scope belong to that scope alone, and unloading a scope invalidates only
//! its own assets. Scopes are never shared between screens.
//!
//! `ManifestCatalog` is the headless catalog backing: a JSON manifest naming
//! each texture and the dimensions a real loader would discover from pixel
//! data.

use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use drover_render::Texture;

/// Name-keyed asset description shared by every screen's content scope.
pub trait ContentCatalog {
    /// Describe a texture by name, or None when the catalog has no entry.
    fn describe(&self, name: &str) -> Option<Texture>;
}

/// Catalog built from a JSON manifest.
#[derive(Debug)]
pub struct ManifestCatalog {
    entries: HashMap<String, (u32, u32)>,
}

impl ManifestCatalog {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ContentCatalog for ManifestCatalog {
    fn describe(&self, name: &str) -> Option<Texture> {
        self.entries
            .get(name)
            .map(|&(width, height)| Texture::new(name, width, height))
    }
}

// --- JSON deserialization types (private) ---

#[derive(Debug, Deserialize)]
struct ManifestJson {
    version: String,
    textures: Vec<ManifestEntryJson>,
}

#[derive(Debug, Deserialize)]
struct ManifestEntryJson {
    name: String,
    width: u32,
    height: u32,
}

/// Load a content manifest from disk.
pub fn load_manifest(path: &Path) -> Result<ManifestCatalog, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read content manifest {}: {e}", path.display()))?;
    parse_manifest(&raw).map_err(|e| format!("{} in {}", e, path.display()))
}

/// Parse a content manifest from an in-memory JSON string.
pub fn parse_manifest(raw: &str) -> Result<ManifestCatalog, String> {
    let json: ManifestJson = serde_json::from_str(raw)
        .map_err(|e| format!("Failed to parse content manifest JSON: {e}"))?;
    validate_manifest(&json)?;

    let entries = json
        .textures
        .into_iter()
        .map(|t| (t.name, (t.width, t.height)))
        .collect();
    Ok(ManifestCatalog { entries })
}

fn validate_manifest(json: &ManifestJson) -> Result<(), String> {
    if json.version != "0.1" {
        return Err(format!(
            "Manifest validation failed: unsupported version '{}'",
            json.version
        ));
    }
    if json.textures.is_empty() {
        return Err("Manifest validation failed: textures array is empty".to_string());
    }

    let mut names = HashSet::new();
    for entry in &json.textures {
        if entry.name.is_empty() {
            return Err("Manifest validation failed: texture with empty name".to_string());
        }
        if !names.insert(entry.name.clone()) {
            return Err(format!(
                "Manifest validation failed: duplicate texture name '{}'",
                entry.name
            ));
        }
        if entry.width == 0 || entry.height == 0 {
            return Err(format!(
                "Manifest validation failed: texture '{}' has zero dimensions",
                entry.name
            ));
        }
    }
    Ok(())
}

/// A screen-owned asset namespace over the shared catalog. Loads are cached
/// per scope; `unload` drops everything this scope ever loaded without
/// touching any other scope.
pub struct ContentScope {
    catalog: Arc<dyn ContentCatalog>,
    textures: HashMap<String, Texture>,
}

impl ContentScope {
    pub fn new(catalog: Arc<dyn ContentCatalog>) -> Self {
        Self {
            catalog,
            textures: HashMap::new(),
        }
    }

    /// Load a texture by name, returning the cached handle on repeat loads.
    pub fn load_texture(&mut self, name: &str) -> Result<Texture, String> {
        if let Some(texture) = self.textures.get(name) {
            return Ok(texture.clone());
        }
        let texture = self
            .catalog
            .describe(name)
            .ok_or_else(|| format!("Texture '{name}' is not in the content catalog"))?;
        self.textures.insert(name.to_string(), texture.clone());
        Ok(texture)
    }

    /// Drop every asset loaded through this scope.
    pub fn unload(&mut self) {
        if !self.textures.is_empty() {
            log::debug!("Unloading {} texture(s) from content scope", self.textures.len());
        }
        self.textures.clear();
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.textures.contains_key(name)
    }

    pub fn loaded_count(&self) -> usize {
        self.textures.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Arc<dyn ContentCatalog> {
        Arc::new(
            parse_manifest(
                r#"{
                  "version": "0.1",
                  "textures": [
                    { "name": "cow_walk", "width": 256, "height": 64 },
                    { "name": "pasture", "width": 800, "height": 480 }
                  ]
                }"#,
            )
            .expect("manifest should parse"),
        )
    }

    #[test]
    fn parse_manifest_accepts_valid_json() {
        let catalog = catalog();
        let texture = catalog.describe("cow_walk").expect("entry should exist");
        assert_eq!(texture.width(), 256);
        assert_eq!(texture.height(), 64);
        assert!(catalog.describe("missing").is_none());
    }

    #[test]
    fn parse_manifest_rejects_duplicate_names() {
        let err = parse_manifest(
            r#"{
              "version": "0.1",
              "textures": [
                { "name": "a", "width": 8, "height": 8 },
                { "name": "a", "width": 16, "height": 16 }
              ]
            }"#,
        )
        .expect_err("duplicates should fail");
        assert!(err.contains("duplicate texture name"));
    }

    #[test]
    fn parse_manifest_rejects_zero_dimensions() {
        let err = parse_manifest(
            r#"{
              "version": "0.1",
              "textures": [ { "name": "a", "width": 0, "height": 8 } ]
            }"#,
        )
        .expect_err("zero dimensions should fail");
        assert!(err.contains("zero dimensions"));
    }

    #[test]
    fn parse_manifest_rejects_bad_version() {
        let err = parse_manifest(r#"{ "version": "2.0", "textures": [] }"#)
            .expect_err("bad version should fail");
        assert!(err.contains("unsupported version"));
    }

    #[test]
    fn scope_loads_and_caches() {
        let mut scope = ContentScope::new(catalog());
        let first = scope.load_texture("cow_walk").expect("should load");
        let second = scope.load_texture("cow_walk").expect("should load again");
        assert_eq!(first, second);
        assert_eq!(scope.loaded_count(), 1);
    }

    #[test]
    fn scope_load_unknown_name_errors() {
        let mut scope = ContentScope::new(catalog());
        let err = scope
            .load_texture("barn")
            .expect_err("unknown texture should fail");
        assert!(err.contains("not in the content catalog"));
    }

    #[test]
    fn unload_empties_only_this_scope() {
        let catalog = catalog();
        let mut scope_a = ContentScope::new(catalog.clone());
        let mut scope_b = ContentScope::new(catalog);

        scope_a.load_texture("cow_walk").expect("load a");
        scope_b.load_texture("pasture").expect("load b");

        scope_a.unload();
        assert_eq!(scope_a.loaded_count(), 0);
        assert!(scope_b.is_loaded("pasture"));
    }
}
