use hub_graph::EntityRelationship;
use hub_schema::TypeDefinition;

pub(crate) const NON_STANDARD_ENTITY: &str =
    "# Non-standard entity type - consult schema documentation";

const ENTITY_PREFIX: &str = "Entity_Tanzu_";
const ENTITY_SUFFIX: &str = "_Type";

/// Query path segments for an entity type: `Entity_Tanzu_TAS_ServiceInstance_Type` maps to
/// `("tas", "serviceInstance")`
fn entity_segments(type_name: &str) -> Option<(String, String)> {
    let middle = type_name
        .strip_prefix(ENTITY_PREFIX)?
        .strip_suffix(ENTITY_SUFFIX)?;
    let mut parts = middle.split('_').filter(|p| !p.is_empty());
    let domain = parts.next()?.to_ascii_lowercase();

    let mut entity = String::new();
    for part in parts {
        if entity.is_empty() {
            let mut chars = part.chars();
            if let Some(first) = chars.next() {
                entity.extend(first.to_lowercase());
                entity.push_str(chars.as_str());
            }
        } else {
            entity.push_str(part);
        }
    }
    if entity.is_empty() {
        return None;
    }
    Some((domain, entity))
}

struct Writer {
    out: String,
    depth: usize,
}

impl Writer {
    fn new() -> Self {
        Self {
            out: String::new(),
            depth: 0,
        }
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn open(&mut self, head: &str) {
        self.line(&format!("{head} {{"));
        self.depth += 1;
    }

    fn close_all(mut self) -> String {
        while self.depth > 0 {
            self.depth -= 1;
            self.line("}");
        }
        self.out.truncate(self.out.trim_end().len());
        self.out
    }

    /// Opens everything down to the `node` selection of the entity connection
    fn open_entity_root(&mut self, domain: &str, entity: &str) {
        self.open("query");
        self.open("entityQuery");
        self.open("typed");
        self.open("tanzu");
        self.open(domain);
        self.open(entity);
        self.open("query(first: 10)");
        self.open("edges");
        self.open("node");
    }
}

/// Starter query listing the first page of an entity type
pub(crate) fn example_query(ty: &TypeDefinition) -> String {
    let Some((domain, entity)) = entity_segments(&ty.name) else {
        return NON_STANDARD_ENTITY.to_string();
    };

    let mut w = Writer::new();
    w.open_entity_root(&domain, &entity);
    w.line("id");
    if ty.field("properties").is_some() {
        w.line("properties { name }");
    }
    // back out of node/edges to add paging info next to them
    w.depth -= 1;
    w.line("}");
    w.depth -= 1;
    w.line("}");
    w.line("pageInfo { hasNextPage endCursor }");
    w.close_all()
}

/// Nested query following `path` from `from_type`, one connection per hop
pub(crate) fn path_query_template(from_type: &str, path: &[EntityRelationship]) -> String {
    let Some((domain, entity)) = entity_segments(from_type) else {
        return NON_STANDARD_ENTITY.to_string();
    };

    let mut w = Writer::new();
    w.open_entity_root(&domain, &entity);
    w.line("id");
    w.line("properties { name }");
    for hop in path {
        for segment in hop.field_name.split('.') {
            w.open(segment);
        }
        w.open("edges");
        w.open("node");
        w.open(&format!("... on {}", hop.target_entity));
        w.line("id");
        w.line("properties { name }");
    }
    w.close_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hub_graph::Direction;
    use hub_schema::{TypeKind, TypeReference};
    use hub_validator::QueryValidator;
    use pretty_assertions::assert_eq;

    fn hop(source: &str, kind: &str, target: &str) -> EntityRelationship {
        EntityRelationship {
            source_entity: source.to_string(),
            target_entity: target.to_string(),
            relationship_type: kind.to_string(),
            direction: Direction::Out,
            field_name: format!("relationshipsOut.{kind}"),
        }
    }

    #[test]
    fn test_entity_segments() {
        assert_eq!(
            entity_segments("Entity_Tanzu_TAS_Application_Type"),
            Some(("tas".to_string(), "application".to_string()))
        );
        assert_eq!(
            entity_segments("Entity_Tanzu_TAS_Service_Instance_Type"),
            Some(("tas".to_string(), "serviceInstance".to_string()))
        );
        assert_eq!(entity_segments("Entity_Tanzu_TAS_Type"), None);
        assert_eq!(entity_segments("Query"), None);
    }

    #[test]
    fn test_example_query() {
        let ty = TypeDefinition::new("Entity_Tanzu_TAS_Space_Type", TypeKind::Object)
            .with_field("id", TypeReference::named(TypeKind::Scalar, "ID"))
            .with_field(
                "properties",
                TypeReference::named(TypeKind::Object, "SpaceProperties"),
            );

        let expected = "\
query {
  entityQuery {
    typed {
      tanzu {
        tas {
          space {
            query(first: 10) {
              edges {
                node {
                  id
                  properties { name }
                }
              }
              pageInfo { hasNextPage endCursor }
            }
          }
        }
      }
    }
  }
}";
        assert_eq!(example_query(&ty), expected);
    }

    #[test]
    fn test_example_query_for_non_entity() {
        let ty = TypeDefinition::new("Query", TypeKind::Object);
        assert_eq!(example_query(&ty), NON_STANDARD_ENTITY);
    }

    #[test]
    fn test_path_template_nests_each_hop() {
        let path = [
            hop(
                "Entity_Tanzu_TAS_Application_Type",
                "isContainedIn",
                "Entity_Tanzu_TAS_Space_Type",
            ),
            hop(
                "Entity_Tanzu_TAS_Space_Type",
                "isContainedIn",
                "Entity_Tanzu_TAS_Organization_Type",
            ),
        ];
        let template = path_query_template("Entity_Tanzu_TAS_Application_Type", &path);

        assert!(template.contains("          application {"));
        assert!(template.contains("... on Entity_Tanzu_TAS_Space_Type {"));
        assert!(template.contains("... on Entity_Tanzu_TAS_Organization_Type {"));
        assert_eq!(template.matches("relationshipsOut {").count(), 2);

        let checked = QueryValidator::default().validate(&template, None);
        assert!(checked.valid, "{:?}", checked.errors);
    }

    #[test]
    fn test_path_template_for_non_entity() {
        assert_eq!(path_query_template("Query", &[]), NON_STANDARD_ENTITY);
    }
}
