use log::{info, warn};
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use super::attributes::is_known_attribute;
use crate::errors::{ConfigError, SelectionError};

/// A positional role and the attribute weights that define it
#[derive(Debug, Clone, PartialEq)]
pub struct RoleDefinition {
    pub role_abbr: String,
    pub role: String,
    pub category: String,
    pub weights: BTreeMap<String, f64>,
}

impl RoleDefinition {
    pub fn new<I, S>(role_abbr: &str, role: &str, category: &str, weights: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            role_abbr: role_abbr.to_string(),
            role: role.to_string(),
            category: category.to_string(),
            weights: weights.into_iter().map(|(k, w)| (k.into(), w)).collect(),
        }
    }

    /// Sum of the explicit weights, the divisor for normalized scores
    pub fn total_multiplier(&self) -> f64 {
        self.weights.values().sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoleGroup {
    pub name: String,
    pub roles: Vec<RoleDefinition>,
}

/// Read-only role catalog, grouped by category in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleCatalog {
    groups: Vec<RoleGroup>,
}

#[derive(Debug, Deserialize)]
struct RawRole {
    role: String,
    role_abbr: String,
    #[serde(flatten)]
    weights: BTreeMap<String, f64>,
}

impl RoleCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a catalog from already-constructed groups, validating every role
    pub fn from_groups(groups: Vec<RoleGroup>) -> Result<Self, ConfigError> {
        let catalog = Self { groups };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load and validate the catalog file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::parse(&json, path)?;
        info!(
            "Loaded role catalog {} ({} categories, {} roles)",
            path.display(),
            catalog.groups.len(),
            catalog.len()
        );
        Ok(catalog)
    }

    /// Load the catalog, substituting an empty one when it is missing or invalid.
    ///
    /// The returned error is the warning to surface to the user.
    pub fn load_or_empty(path: &Path) -> (Self, Option<ConfigError>) {
        match Self::load(path) {
            Ok(catalog) => (catalog, None),
            Err(e) => {
                warn!("{}; continuing with an empty role catalog", e);
                (Self::empty(), Some(e))
            }
        }
    }

    pub fn parse(json: &str, path: &Path) -> Result<Self, ConfigError> {
        let root: Value = serde_json::from_str(json).map_err(|source| ConfigError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;
        let Value::Object(categories) = root else {
            return Err(ConfigError::Shape(
                "top level must map category names to role lists".to_string(),
            ));
        };

        let groups = categories
            .into_iter()
            .map(|(name, roles)| parse_group(name, roles))
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_groups(groups)
    }

    // --- Queries ---

    pub fn groups(&self) -> &[RoleGroup] {
        &self.groups
    }

    /// Every role in catalog order
    pub fn roles(&self) -> impl Iterator<Item = &RoleDefinition> {
        self.groups.iter().flat_map(|g| g.roles.iter())
    }

    pub fn find(&self, role_abbr: &str) -> Option<&RoleDefinition> {
        self.roles().find(|r| r.role_abbr == role_abbr)
    }

    /// Map selected identifiers to definitions, preserving selection order
    pub fn resolve(&self, selected: &[String]) -> Result<Vec<&RoleDefinition>, SelectionError> {
        if selected.is_empty() {
            return Err(SelectionError::Empty);
        }
        selected
            .iter()
            .map(|id| self.find(id).ok_or_else(|| SelectionError::UnknownRole(id.clone())))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.roles.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // --- Validation ---

    fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for role in self.roles() {
            if !seen.insert(role.role_abbr.as_str()) {
                return Err(ConfigError::DuplicateRole(role.role_abbr.clone()));
            }
            validate_weights(role)?;
        }
        Ok(())
    }
}

fn parse_group(name: String, roles: Value) -> Result<RoleGroup, ConfigError> {
    let Value::Array(entries) = roles else {
        return Err(ConfigError::Shape(format!(
            "category \"{}\" must hold a list of roles",
            name
        )));
    };

    let roles = entries
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| {
            let raw: RawRole = serde_json::from_value(entry).map_err(|e| {
                ConfigError::Shape(format!("role #{} in \"{}\": {}", idx + 1, name, e))
            })?;
            Ok(RoleDefinition {
                role_abbr: raw.role_abbr,
                role: raw.role,
                category: name.clone(),
                weights: raw.weights,
            })
        })
        .collect::<Result<Vec<_>, ConfigError>>()?;

    Ok(RoleGroup { name, roles })
}

fn validate_weights(role: &RoleDefinition) -> Result<(), ConfigError> {
    for (attribute, &weight) in &role.weights {
        if !is_known_attribute(attribute) {
            return Err(ConfigError::UnknownAttribute {
                role_abbr: role.role_abbr.clone(),
                attribute: attribute.clone(),
            });
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(ConfigError::InvalidWeight {
                role_abbr: role.role_abbr.clone(),
                attribute: attribute.clone(),
                weight,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"{
        "Goalkeepers": [
            { "role": "Goalkeeper - Defend", "role_abbr": "gkd_defend", "Handling": 3, "Reflexes": 3, "Kicking": 1 }
        ],
        "Central Defenders": [
            { "role": "Ball Playing Defender - Defend", "role_abbr": "bpdd_defend", "Acceleration": 2, "Marking": 3 },
            { "role": "Central Defender - Cover", "role_abbr": "cdc_cover", "Pace": 2.5, "Positioning": 3 }
        ]
    }"#;

    fn parse(json: &str) -> Result<RoleCatalog, ConfigError> {
        RoleCatalog::parse(json, Path::new("player_roles.json"))
    }

    #[test]
    fn test_parse_keeps_file_order() {
        let catalog = parse(CATALOG).unwrap();

        let names: Vec<&str> = catalog.groups().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Goalkeepers", "Central Defenders"]);

        let ids: Vec<&str> = catalog.roles().map(|r| r.role_abbr.as_str()).collect();
        assert_eq!(ids, vec!["gkd_defend", "bpdd_defend", "cdc_cover"]);

        let bpd = catalog.find("bpdd_defend").unwrap();
        assert_eq!(bpd.category, "Central Defenders");
        assert_eq!(bpd.total_multiplier(), 5.0);
    }

    #[test]
    fn test_unknown_attribute_is_rejected() {
        let json = r#"{ "X": [ { "role": "R", "role_abbr": "cdd_defend", "Marknig": 3 } ] }"#;
        assert!(matches!(parse(json), Err(ConfigError::UnknownAttribute { .. })));
    }

    #[test]
    fn test_negative_weight_is_rejected() {
        let json = r#"{ "X": [ { "role": "R", "role_abbr": "cdd_defend", "Marking": -1 } ] }"#;
        assert!(matches!(parse(json), Err(ConfigError::InvalidWeight { .. })));
    }

    #[test]
    fn test_duplicate_identifier_is_rejected() {
        let json = r#"{
            "A": [ { "role": "R1", "role_abbr": "cdd_defend", "Marking": 1 } ],
            "B": [ { "role": "R2", "role_abbr": "cdd_defend", "Marking": 2 } ]
        }"#;
        assert!(matches!(parse(json), Err(ConfigError::DuplicateRole(_))));
    }

    #[test]
    fn test_wrong_shape_is_rejected() {
        assert!(matches!(parse("[1, 2]"), Err(ConfigError::Shape(_))));
        assert!(matches!(parse(r#"{ "A": 3 }"#), Err(ConfigError::Shape(_))));
        assert!(matches!(parse("{ not json"), Err(ConfigError::Malformed { .. })));
    }

    #[test]
    fn test_load_or_empty_degrades() {
        let (catalog, warning) = RoleCatalog::load_or_empty(Path::new("missing/player_roles.json"));
        assert!(catalog.is_empty());
        assert!(matches!(warning, Some(ConfigError::Unreadable { .. })));
    }

    #[test]
    fn test_resolve_selection() {
        let catalog = parse(CATALOG).unwrap();

        let selected = vec!["cdc_cover".to_string(), "gkd_defend".to_string()];
        let roles = catalog.resolve(&selected).unwrap();
        assert_eq!(roles[0].role_abbr, "cdc_cover");
        assert_eq!(roles[1].role_abbr, "gkd_defend");

        assert!(matches!(
            catalog.resolve(&["nope".to_string()]),
            Err(SelectionError::UnknownRole(_))
        ));
        assert!(matches!(catalog.resolve(&[]), Err(SelectionError::Empty)));
    }
}
