//! Data-driven scene files.
//!
//! A scene is a JSON document of the form
//!
//! ```json
//! { "entities": [ { "components": { "Transform": { "translation": [0, 1, 0] } } } ] }
//! ```
//!
//! Each entity object becomes a registry entity; each named component is
//! created through [`Registry::create_component`] and then populated from its
//! field object by the matching [`LoadComponent`] implementation.

use std::any::Any;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::components::{
    Geometry, Lake, Level, LoadComponent, Mesh, Point, Track, Transform, Triangle, Velocity,
};
use crate::ecs::{Entity, Registry};
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// File schema
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SceneData {
    pub entities: Vec<SceneEntity>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SceneEntity {
    pub components: serde_json::Map<String, serde_json::Value>,
}

impl SceneData {
    pub fn parse(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }
}

// ---------------------------------------------------------------------------
// SceneLoader
// ---------------------------------------------------------------------------

type Populate = fn(&mut dyn Any, &serde_json::Value) -> Result<(), serde_json::Error>;

fn populate<T: LoadComponent>(
    component: &mut dyn Any,
    data: &serde_json::Value,
) -> Result<(), serde_json::Error> {
    match component.downcast_mut::<T>() {
        Some(component) => component.load(data),
        None => Ok(()),
    }
}

/// Turns scene files into registry entities.
///
/// The loader owns the name → populate table; the [`Registry`] it loads into
/// must have the same names registered for the components to be created.
#[derive(Default)]
pub struct SceneLoader {
    populators: HashMap<String, Populate>,
}

impl SceneLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// A loader for every component in [`crate::components`].
    pub fn builtin() -> Self {
        let mut loader = Self::new();
        loader.register::<Point>(Point::NAME);
        loader.register::<Triangle>(Triangle::NAME);
        loader.register::<Geometry>(Geometry::NAME);
        loader.register::<Transform>(Transform::NAME);
        loader.register::<Velocity>(Velocity::NAME);
        loader.register::<Track>(Track::NAME);
        loader.register::<Lake>(Lake::NAME);
        loader.register::<Mesh>(Mesh::NAME);
        loader.register::<Level>(Level::NAME);
        loader
    }

    pub fn register<T: LoadComponent>(&mut self, name: &str) {
        self.populators
            .insert(name.to_string(), populate::<T> as Populate);
    }

    pub fn knows(&self, name: &str) -> bool {
        self.populators.contains_key(name)
    }

    /// Read and parse a scene file.
    ///
    /// A missing, unreadable or blank file is not an error: it yields
    /// `Ok(None)` and nothing should be loaded.
    pub fn read(&self, path: &Path) -> Result<Option<SceneData>, LoadError> {
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(err) => {
                log::warn!("scene {}: cannot read file ({err}), nothing loaded", path.display());
                return Ok(None);
            }
        };
        if source.trim().is_empty() {
            log::warn!("scene {}: file is empty, nothing loaded", path.display());
            return Ok(None);
        }
        SceneData::parse(&source)
            .map(Some)
            .map_err(|source| LoadError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Create the entities described by `scene`.
    ///
    /// Names unknown to the registry or to this loader are skipped. A
    /// component whose field data fails to decode aborts the load: entities
    /// and components created up to that point are left in the registry.
    pub fn instantiate(
        &self,
        registry: &mut Registry,
        scene: &SceneData,
    ) -> Result<Vec<Entity>, LoadError> {
        let mut created = Vec::with_capacity(scene.entities.len());

        for description in &scene.entities {
            let entity = registry.create_entity();
            created.push(entity);

            for (name, data) in &description.components {
                let Some(populate) = self.populators.get(name) else {
                    log::warn!("scene: no loader for component '{name}', skipped");
                    continue;
                };
                if !registry.create_component(entity, name) {
                    log::warn!("scene: component '{name}' is not registered, skipped");
                    continue;
                }

                let mut result = Ok(());
                registry.with_component(entity, name, |component| {
                    result = populate(component, data);
                });
                result.map_err(|source| LoadError::Component {
                    name: name.clone(),
                    source,
                })?;
            }
        }

        Ok(created)
    }

    /// [`read`](Self::read) then [`instantiate`](Self::instantiate). The
    /// registry is not cleared first.
    pub fn load_file(
        &self,
        registry: &mut Registry,
        path: impl AsRef<Path>,
    ) -> Result<Vec<Entity>, LoadError> {
        let path = path.as_ref();
        let Some(scene) = self.read(path)? else {
            return Ok(Vec::new());
        };
        let entities = self.instantiate(registry, &scene)?;
        log::debug!("scene {}: {} entities", path.display(), entities.len());
        Ok(entities)
    }

    /// Load a scene held in memory. Blank input loads nothing.
    pub fn load_str(&self, registry: &mut Registry, source: &str) -> Result<Vec<Entity>, LoadError> {
        if source.trim().is_empty() {
            return Ok(Vec::new());
        }
        let scene = SceneData::parse(source).map_err(|source| LoadError::Parse {
            path: PathBuf::from("<memory>"),
            source,
        })?;
        self.instantiate(registry, &scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::register_builtin;

    fn setup() -> (Registry, SceneLoader) {
        let mut registry = Registry::new();
        register_builtin(&mut registry);
        (registry, SceneLoader::builtin())
    }

    #[test]
    fn missing_keys_mean_empty() {
        let scene = SceneData::parse(r#"{ "entities": [ {} ] }"#).unwrap();
        assert_eq!(scene.entity_count(), 1);
        assert!(scene.entities[0].components.is_empty());
        assert_eq!(SceneData::parse("{}").unwrap(), SceneData::default());
    }

    #[test]
    fn populates_fields_through_the_registry() {
        let (mut registry, loader) = setup();
        let entities = loader
            .load_str(
                &mut registry,
                r#"{ "entities": [ { "components": { "Velocity": { "speed": [1, 2, 3] } } } ] }"#,
            )
            .unwrap();
        let velocity = registry
            .world()
            .get_component::<Velocity>(entities[0])
            .unwrap();
        assert_eq!(velocity.speed, glam::Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn name_without_loader_is_skipped() {
        let mut registry = Registry::new();
        registry.register::<Point>(Point::NAME);
        let loader = SceneLoader::new();
        let entities = loader
            .load_str(&mut registry, r#"{ "entities": [ { "components": { "Point": {} } } ] }"#)
            .unwrap();
        assert_eq!(entities.len(), 1);
        assert!(!registry.world().has_component::<Point>(entities[0]));
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let (mut registry, loader) = setup();
        let err = loader.load_str(&mut registry, "{ not json").unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
        assert_eq!(registry.entity_count(), 0);
    }

    #[test]
    fn blank_source_loads_nothing() {
        let (mut registry, loader) = setup();
        assert!(loader.load_str(&mut registry, "  \n").unwrap().is_empty());
        assert_eq!(registry.world().entity_count(), 0);
    }
}
