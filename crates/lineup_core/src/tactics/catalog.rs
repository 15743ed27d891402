//! Formation catalog
//!
//! The built-in catalog ships as an embedded, versioned YAML document. It is
//! parsed and validated once per process and never mutated afterwards.

use crate::error::{LineupError, Result};
use crate::models::RoleCategory;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::info;

const FORMATIONS_YAML: &str = include_str!("formations_v1.yaml");
static BUILTIN: OnceLock<Result<FormationCatalog>> = OnceLock::new();

/// Catalog schema version understood by this build.
pub const CATALOG_VERSION: u8 = 1;

/// Outfield players every template must declare.
pub const OUTFIELD_SLOTS: usize = 10;

/// Registered formations, one variant per template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FormationKind {
    #[serde(rename = "4-3-3")]
    T433,
    #[serde(rename = "4-4-2")]
    T442,
    #[serde(rename = "3-5-2")]
    T352,
    #[serde(rename = "3-4-3")]
    T343,
    #[serde(rename = "4-5-1")]
    T451,
    #[serde(rename = "4-2-3-1")]
    T4231,
}

impl FormationKind {
    pub const ALL: [FormationKind; 6] = [
        FormationKind::T433,
        FormationKind::T442,
        FormationKind::T352,
        FormationKind::T343,
        FormationKind::T451,
        FormationKind::T4231,
    ];

    /// Display name, e.g. `4-3-3`.
    pub fn name(&self) -> &'static str {
        match self {
            FormationKind::T433 => "4-3-3",
            FormationKind::T442 => "4-4-2",
            FormationKind::T352 => "3-5-2",
            FormationKind::T343 => "3-4-3",
            FormationKind::T451 => "4-5-1",
            FormationKind::T4231 => "4-2-3-1",
        }
    }
}

impl fmt::Display for FormationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormationKind {
    type Err = LineupError;

    /// Accepts `4-3-3`, `433` and `T433`, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        let digits: String = s
            .trim()
            .trim_start_matches(['T', 't'])
            .chars()
            .filter(|c| !matches!(c, '-' | ' '))
            .collect();

        FormationKind::ALL
            .into_iter()
            .find(|kind| kind.name().replace('-', "") == digits)
            .ok_or_else(|| LineupError::UnknownFormation(s.to_string()))
    }
}

/// Broad tactical character of a formation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TacticalStyle {
    Attacking,
    Defensive,
    Balanced,
    Possession,
    WingPlay,
    Counterattack,
}

/// A single position within a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub label: String,
    pub x: f32, // 0.0 = left touchline, 1.0 = right touchline
    pub y: f32, // 0.0 = own goal, 1.0 = opponent goal
}

impl Slot {
    pub fn new(label: impl Into<String>, x: f32, y: f32) -> Self {
        Self { label: label.into(), x, y }
    }

    fn validate(&self, formation: FormationKind, role: RoleCategory) -> Result<()> {
        if self.label.trim().is_empty() {
            return Err(LineupError::MalformedTemplate(format!(
                "{}: {} slot without a label",
                formation, role
            )));
        }
        let in_range = |v: f32| (0.0..=1.0).contains(&v);
        if !in_range(self.x) || !in_range(self.y) {
            return Err(LineupError::MalformedTemplate(format!(
                "{}: slot {} at ({}, {}) is off the pitch",
                formation, self.label, self.x, self.y
            )));
        }
        Ok(())
    }
}

/// Descriptive metadata shown alongside a formation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormationMetadata {
    pub style: TacticalStyle,
    pub description: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A named tactical shape with fixed slots per role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormationTemplate {
    pub kind: FormationKind,
    pub goalkeeper: Slot,
    pub defenders: Vec<Slot>,
    pub midfielders: Vec<Slot>,
    pub forwards: Vec<Slot>,
    #[serde(flatten)]
    pub metadata: FormationMetadata,
}

impl FormationTemplate {
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Declared slots for a role, in assignment order.
    pub fn slots(&self, role: RoleCategory) -> &[Slot] {
        match role {
            RoleCategory::Goalkeeper => std::slice::from_ref(&self.goalkeeper),
            RoleCategory::Defender => &self.defenders,
            RoleCategory::Midfielder => &self.midfielders,
            RoleCategory::Forward => &self.forwards,
        }
    }

    pub fn slot_count(&self, role: RoleCategory) -> usize {
        self.slots(role).len()
    }

    pub fn outfield_count(&self) -> usize {
        RoleCategory::OUTFIELD.iter().map(|role| self.slot_count(*role)).sum()
    }

    pub fn total_slots(&self) -> usize {
        self.outfield_count() + 1
    }

    /// Structural checks: ten outfield slots, labelled, on the pitch.
    pub fn validate(&self) -> Result<()> {
        if self.outfield_count() != OUTFIELD_SLOTS {
            return Err(LineupError::MalformedTemplate(format!(
                "{} declares {} outfield slots, expected {}",
                self.kind,
                self.outfield_count(),
                OUTFIELD_SLOTS
            )));
        }
        self.goalkeeper.validate(self.kind, RoleCategory::Goalkeeper)?;
        for role in RoleCategory::OUTFIELD {
            for slot in self.slots(role) {
                slot.validate(self.kind, role)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
struct CatalogFile {
    version: u8,
    formations: Vec<FormationTemplate>,
}

/// Load-once registry of formation templates.
#[derive(Debug, Clone, PartialEq)]
pub struct FormationCatalog {
    version: u8,
    templates: Vec<FormationTemplate>,
}

impl FormationCatalog {
    /// The embedded catalog, parsed on first use.
    pub fn builtin() -> Result<&'static FormationCatalog> {
        BUILTIN
            .get_or_init(|| {
                let catalog = Self::from_yaml(FORMATIONS_YAML)?;
                info!(
                    version = catalog.version,
                    formations = catalog.templates.len(),
                    "formation catalog loaded"
                );
                Ok(catalog)
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let file: CatalogFile = serde_yaml::from_str(yaml)
            .map_err(|e| LineupError::MalformedTemplate(format!("catalog YAML: {}", e)))?;
        Self::try_from(file)
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    /// Resolve a template by its name.
    pub fn get_template(&self, name: &str) -> Result<&FormationTemplate> {
        let kind: FormationKind = name.parse()?;
        self.get(kind).ok_or_else(|| LineupError::UnknownFormation(name.to_string()))
    }

    pub fn get(&self, kind: FormationKind) -> Option<&FormationTemplate> {
        self.templates.iter().find(|t| t.kind == kind)
    }

    /// Registered formation names in catalog order.
    pub fn list_formations(&self) -> Vec<&'static str> {
        self.templates.iter().map(|t| t.name()).collect()
    }

    pub fn templates(&self) -> &[FormationTemplate] {
        &self.templates
    }
}

impl TryFrom<CatalogFile> for FormationCatalog {
    type Error = LineupError;

    fn try_from(file: CatalogFile) -> Result<Self> {
        if file.version != CATALOG_VERSION {
            return Err(LineupError::MalformedTemplate(format!(
                "catalog version {} unsupported, expected {}",
                file.version, CATALOG_VERSION
            )));
        }

        let mut seen = HashSet::new();
        for template in &file.formations {
            if !seen.insert(template.kind) {
                return Err(LineupError::MalformedTemplate(format!(
                    "{} registered twice",
                    template.kind
                )));
            }
            template.validate()?;
        }

        if let Some(missing) = FormationKind::ALL.iter().find(|kind| !seen.contains(*kind)) {
            return Err(LineupError::MalformedTemplate(format!("{} has no template", missing)));
        }

        Ok(Self { version: file.version, templates: file.formations })
    }
}
