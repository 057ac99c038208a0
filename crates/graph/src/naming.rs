use std::collections::HashSet;

/// Components kept upper-case when decoding transliterated entity names
pub const DEFAULT_ABBREVIATIONS: &[&str] = &["tas", "tkg", "tmc", "aws", "gcp", "azure", "vm", "bosh"];

/// Naming rules the upstream schema uses for entity and relationship types.
///
/// An entity type looks like `Entity_Tanzu_TAS_Space_Type`; relationship container types refer
/// to it by the transliterated field name `tanzu_tas_space`.
#[derive(Debug, Clone)]
pub struct NamingConvention {
    /// Leading component of every entity type name
    pub type_prefix: String,
    /// Prefix an entity type name must start with to be picked up by the graph builder
    pub entity_prefix: String,
    pub type_suffix: String,
    pub incoming_field: String,
    pub outgoing_field: String,
    abbreviations: HashSet<String>,
}

impl Default for NamingConvention {
    fn default() -> Self {
        Self {
            type_prefix: "Entity".to_string(),
            entity_prefix: "Entity_Tanzu_".to_string(),
            type_suffix: "_Type".to_string(),
            incoming_field: "relationshipsIn".to_string(),
            outgoing_field: "relationshipsOut".to_string(),
            abbreviations: DEFAULT_ABBREVIATIONS
                .iter()
                .map(|a| (*a).to_string())
                .collect(),
        }
    }
}

impl NamingConvention {
    /// Replace the abbreviation table. Entries are matched case-insensitively.
    #[must_use]
    pub fn with_abbreviations<I, S>(mut self, abbreviations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.abbreviations = abbreviations
            .into_iter()
            .map(|a| a.as_ref().to_ascii_lowercase())
            .collect();
        self
    }

    #[must_use]
    pub fn is_entity_type(&self, name: &str) -> bool {
        name.starts_with(&self.entity_prefix) && name.ends_with(&self.type_suffix)
    }

    #[must_use]
    pub fn is_abbreviation(&self, component: &str) -> bool {
        self.abbreviations
            .contains(component.to_ascii_lowercase().as_str())
    }

    /// Decode a transliterated field name into an entity type name.
    ///
    /// `tanzu_tas_space` becomes `Entity_Tanzu_TAS_Space_Type`. Empty components are ignored;
    /// `None` when nothing is left. The result is not checked against any schema.
    #[must_use]
    pub fn normalized_name_to_entity_name(&self, normalized: &str) -> Option<String> {
        let components: Vec<String> = normalized
            .split('_')
            .filter(|part| !part.is_empty())
            .map(|part| {
                if self.is_abbreviation(part) {
                    part.to_uppercase()
                } else {
                    title_case(part)
                }
            })
            .collect();

        if components.is_empty() {
            return None;
        }

        let mut name = self.type_prefix.clone();
        for component in components {
            name.push('_');
            name.push_str(&component);
        }
        name.push_str(&self.type_suffix);
        Some(name)
    }
}

fn title_case(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_abbreviations_and_title_case() {
        let naming = NamingConvention::default();
        assert_eq!(
            naming.normalized_name_to_entity_name("tanzu_tas_space").as_deref(),
            Some("Entity_Tanzu_TAS_Space_Type")
        );
        assert_eq!(
            naming
                .normalized_name_to_entity_name("tanzu_tas_bosh_director")
                .as_deref(),
            Some("Entity_Tanzu_TAS_BOSH_Director_Type")
        );
        assert_eq!(
            naming
                .normalized_name_to_entity_name("TANZU_spring_APPLICATION")
                .as_deref(),
            Some("Entity_Tanzu_Spring_Application_Type")
        );
    }

    #[test]
    fn test_skips_empty_components() {
        let naming = NamingConvention::default();
        assert_eq!(
            naming
                .normalized_name_to_entity_name("__tanzu__tas_space_")
                .as_deref(),
            Some("Entity_Tanzu_TAS_Space_Type")
        );
        assert_eq!(naming.normalized_name_to_entity_name("___"), None);
        assert_eq!(naming.normalized_name_to_entity_name(""), None);
    }

    #[test]
    fn test_custom_abbreviation_table() {
        let naming = NamingConvention::default().with_abbreviations(["K8S", "tas"]);
        assert_eq!(
            naming
                .normalized_name_to_entity_name("tanzu_k8s_cluster")
                .as_deref(),
            Some("Entity_Tanzu_K8S_Cluster_Type")
        );
        assert_eq!(
            naming.normalized_name_to_entity_name("tanzu_aws_vm").as_deref(),
            Some("Entity_Tanzu_Aws_Vm_Type")
        );
    }

    #[test]
    fn test_entity_type_detection() {
        let naming = NamingConvention::default();
        assert!(naming.is_entity_type("Entity_Tanzu_TAS_Space_Type"));
        assert!(!naming.is_entity_type("Entity_Tanzu_TAS_Space"));
        assert!(!naming.is_entity_type("Entity_Other_Space_Type"));
    }
}
