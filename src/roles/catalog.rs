use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::info;

use crate::error::DefinitionError;

/// Upper bound on roles accepted from one catalog file
pub const MAX_ROLES: usize = 1000;

/// Largest weight accepted for a single attribute
pub const MAX_WEIGHT: f64 = 1000.0;

const NAME_KEY: &str = "role";
const ABBR_KEY: &str = "role_abbr";

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeWeight {
    pub attribute: String,
    pub weight: f64,
}

/// A named scoring template.
///
/// Weights keep the order they had in the definition file. Attribute names are
/// unique within a role.
#[derive(Debug, Clone, PartialEq)]
pub struct Role {
    pub name: String,
    pub abbreviation: String,
    pub category: String,
    pub weights: Vec<AttributeWeight>,
}

impl Role {
    pub fn weight(&self, attribute: &str) -> Option<f64> {
        self.weights
            .iter()
            .find(|w| w.attribute == attribute)
            .map(|w| w.weight)
    }

    pub fn total_weight(&self) -> f64 {
        self.weights.iter().map(|w| w.weight).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoleCategory {
    pub name: String,
    pub roles: Vec<Role>,
}

/// Every role category from one definition file, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleCatalog {
    categories: Vec<RoleCategory>,
}

impl RoleCatalog {
    /// Parse and validate a catalog document.
    ///
    /// Expected shape:
    /// ```json
    /// {
    ///   "Strikers": [
    ///     { "role": "Target Man", "role_abbr": "tm", "Str": 3, "Jum": 2 }
    ///   ]
    /// }
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, DefinitionError> {
        let document: Value = serde_json::from_str(json)?;
        let Value::Object(document) = document else {
            return Err(DefinitionError::Malformed(
                "top level must be an object of categories".to_string(),
            ));
        };

        let mut seen: HashMap<String, String> = HashMap::new();
        let mut categories = Vec::with_capacity(document.len());
        let mut total = 0;

        for (category, entries) in document {
            let Value::Array(entries) = entries else {
                return Err(DefinitionError::Malformed(format!(
                    "category '{}' must be a list of roles",
                    category
                )));
            };

            let mut roles = Vec::with_capacity(entries.len());
            for (i, entry) in entries.into_iter().enumerate() {
                let Value::Object(fields) = entry else {
                    return Err(DefinitionError::Malformed(format!(
                        "category '{}', role #{} must be an object",
                        category,
                        i + 1
                    )));
                };

                let role = parse_role(&category, i + 1, &fields)?;

                if let Some(first) = seen.get(&role.abbreviation) {
                    return Err(DefinitionError::DuplicateAbbreviation {
                        abbreviation: role.abbreviation,
                        first: first.clone(),
                        second: role.name,
                    });
                }
                seen.insert(role.abbreviation.clone(), role.name.clone());

                total += 1;
                if total > MAX_ROLES {
                    return Err(DefinitionError::TooLarge { limit: MAX_ROLES });
                }
                roles.push(role);
            }

            categories.push(RoleCategory {
                name: category,
                roles,
            });
        }

        Ok(Self { categories })
    }

    pub fn all_categories(&self) -> &[RoleCategory] {
        &self.categories
    }

    /// All roles in catalog order
    pub fn roles(&self) -> impl Iterator<Item = &Role> {
        self.categories.iter().flat_map(|c| c.roles.iter())
    }

    pub fn role(&self, abbreviation: &str) -> Option<&Role> {
        self.roles().find(|r| r.abbreviation == abbreviation)
    }

    /// Roles whose abbreviation is in `abbreviations`, in catalog order.
    /// Unknown abbreviations are ignored.
    pub fn roles_by_abbreviation<S: AsRef<str>>(&self, abbreviations: &[S]) -> Vec<&Role> {
        self.roles()
            .filter(|r| abbreviations.iter().any(|a| a.as_ref() == r.abbreviation))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.categories.iter().map(|c| c.roles.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn parse_role(
    category: &str,
    index: usize,
    fields: &Map<String, Value>,
) -> Result<Role, DefinitionError> {
    let text = |field: &'static str| {
        fields
            .get(field)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .ok_or_else(|| DefinitionError::MissingField {
                category: category.to_string(),
                index,
                field,
            })
    };

    let name = text(NAME_KEY)?;
    let abbreviation = text(ABBR_KEY)?;

    let mut weights = Vec::new();
    for (attribute, value) in fields {
        if attribute == NAME_KEY || attribute == ABBR_KEY {
            continue;
        }
        let Some(weight) = value.as_f64() else {
            return Err(DefinitionError::NonNumericWeight {
                role: name,
                attribute: attribute.clone(),
            });
        };
        if !(0.0..=MAX_WEIGHT).contains(&weight) {
            return Err(DefinitionError::InvalidWeight {
                role: name,
                attribute: attribute.clone(),
                weight,
            });
        }
        weights.push(AttributeWeight {
            attribute: attribute.clone(),
            weight,
        });
    }

    let role = Role {
        name,
        abbreviation,
        category: category.to_string(),
        weights,
    };

    if role.weights.is_empty() || role.total_weight() <= 0.0 {
        return Err(DefinitionError::NoWeights { role: role.name });
    }

    Ok(role)
}

/// Read and parse a catalog file
pub fn load_catalog(path: &Path) -> Result<RoleCatalog, DefinitionError> {
    let content = fs::read_to_string(path).map_err(|source| DefinitionError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let catalog = RoleCatalog::from_json_str(&content)?;
    info!(
        "loaded {} roles in {} categories from {}",
        catalog.len(),
        catalog.all_categories().len(),
        path.display()
    );
    Ok(catalog)
}
