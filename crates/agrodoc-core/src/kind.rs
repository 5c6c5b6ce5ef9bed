//! Document kinds and the field-ownership registry that gates mutation.

use std::collections::HashMap;

/// The semantic category of a document buffer.
///
/// Concrete dataset flavors are configuration over the same core: a kind tag
/// plus entries in the [`KindRegistry`], not separate wrapper types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocKind {
    Experiment,
    Weather,
    Soil,
    InitialConditions,
    Observed,
    Event,
    /// A sibling record extracted from an array field.
    Record,
    /// Fallback for buffers and keys with no registered owner.
    Generic,
}

/// Identity fields writable on any component regardless of kind:
/// world id, scenario id, experiment id.
pub const IDENTITY_KEYS: [&str; 3] = ["wid", "sid", "eid"];

/// Maps top-level field names to the document kind that owns them.
///
/// Resolution is total: unrecognized keys fall back to [`DocKind::Generic`].
/// The default table carries the built-in dataset vocabulary; callers with
/// extra variables extend it via [`KindRegistry::register`].
#[derive(Debug, Clone)]
pub struct KindRegistry {
    owners: HashMap<String, DocKind>,
}

impl Default for KindRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        for key in [
            "exname",
            "crid",
            "rotation",
            "trt_name",
            "institution",
            "planting_date",
            "harvest_date",
            "irrig_tot",
            "fert_tot",
        ] {
            registry.register(key, DocKind::Experiment);
        }
        for key in [
            "weather", "wst_id", "wst_name", "wst_lat", "wst_long", "wst_elev", "tav", "tamp",
            "co2y", "refht", "wndht",
        ] {
            registry.register(key, DocKind::Weather);
        }
        for key in [
            "soil",
            "soil_id",
            "sl_source",
            "classification",
            "sltx",
            "sldp",
            "salb",
        ] {
            registry.register(key, DocKind::Soil);
        }
        for key in ["initial_conditions", "icdat", "icpcr", "icrag", "icrn"] {
            registry.register(key, DocKind::InitialConditions);
        }
        for key in ["observed", "adat", "mdat", "hwah", "cwah"] {
            registry.register(key, DocKind::Observed);
        }
        for key in [
            "event", "date", "pl_name", "irval", "irop", "fecd", "feacd", "feamn", "tiimp",
            "tidep",
        ] {
            registry.register(key, DocKind::Event);
        }
        registry
    }
}

impl KindRegistry {
    /// A registry with no vocabulary at all; every key resolves `Generic`.
    pub fn empty() -> Self {
        Self {
            owners: HashMap::new(),
        }
    }

    pub fn register(&mut self, key: impl Into<String>, kind: DocKind) {
        self.owners.insert(key.into(), kind);
    }

    /// The kind owning `key`, or [`DocKind::Generic`] when unregistered.
    pub fn resolve(&self, key: &str) -> DocKind {
        self.owners.get(key).copied().unwrap_or(DocKind::Generic)
    }

    /// Whether a component of kind `own` may write `key`. Identity keys are
    /// always writable; everything else must resolve to the component's own
    /// kind.
    pub fn can_mutate(&self, own: DocKind, key: &str) -> bool {
        IDENTITY_KEYS.contains(&key) || self.resolve(key) == own
    }
}
