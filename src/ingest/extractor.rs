//! Pattern-based entity and relation extraction (regex, not NLP).

use std::collections::BTreeSet;

use regex::Regex;

use crate::graph::RelationMap;

/// Header pattern for the dependencies section of a document.
pub const DEPENDENCIES_HEADER: &str = r"## Dependencies";
/// Header pattern for the reverse-relation ("used by") section.
pub const USED_BY_HEADER: &str = r"## Used By";

/// Surface patterns recognizing entity names, tested in this order.
const ENTITY_PATTERNS: [&str; 7] = [
    r"[A-Z][a-zA-Z]+Service",
    r"[A-Z][a-zA-Z]+Module",
    r"[A-Z][a-zA-Z]+Engine",
    r"[A-Z][a-zA-Z]+Validator",
    r"[A-Z][a-zA-Z]+Generator",
    r"Project\s?[A-Z]",
    r"[A-Z][a-zA-Z]+Database",
];

/// Normalize an entity name by removing all whitespace
/// ("Authentication Service" -> "AuthenticationService"). Idempotent.
pub fn normalize(name: &str) -> String {
    name.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Extract entity names from document text using the fixed pattern list.
/// Matches are normalized and deduplicated; the returned set iterates in
/// lexicographic order, which carries no semantic meaning.
pub fn extract_entities(text: &str) -> BTreeSet<String> {
    let mut entities = BTreeSet::new();

    for pattern in ENTITY_PATTERNS {
        let re = Regex::new(pattern).expect("Invalid entity pattern");
        for m in re.find_iter(text) {
            entities.insert(normalize(m.as_str()));
        }
    }

    entities
}

/// Extract the text between the first occurrence of `header_pattern` (a regex
/// fragment, e.g. `## Dependencies`) and the next header-like line or end of
/// text. Returns an empty string if the header is absent. Only the first
/// occurrence counts; later duplicate sections are ignored.
pub fn extract_section(text: &str, header_pattern: &str) -> String {
    let pattern = format!(r"(?s){}(.*?)(?:##|\z)", header_pattern);
    let re = Regex::new(&pattern).expect("Invalid section pattern");

    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Parse a section body into dependencies, one per bullet line:
///
/// ```text
/// - UserDatabase
/// - EmailService
/// ```
///
/// The bullet marker and surrounding whitespace are stripped and each name is
/// normalized. Duplicates are kept at this stage; merging dedupes later.
pub fn extract_section_dependencies(section_text: &str) -> Vec<String> {
    let mut deps = Vec::new();

    for line in section_text.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix('-') {
            deps.push(normalize(rest.trim()));
        }
    }

    deps
}

/// Build the per-document relation map.
///
/// Every extracted entity gets the document's dependency list; every entity
/// named in the "Used By" section is recorded as depending on all extracted
/// entities (reverse relation). A name appearing in both sets gets both
/// effects. Each map entry owns an independent copy of its dependency list so
/// a later mutation of one entry can never leak into another.
pub fn build_entity_relation(text: &str) -> RelationMap {
    let entities = extract_entities(text);

    let dep_section = extract_section(text, DEPENDENCIES_HEADER);
    let deps = extract_section_dependencies(&dep_section);

    let used_by_section = extract_section(text, USED_BY_HEADER);
    let used_by = extract_section_dependencies(&used_by_section);

    let mut relations = RelationMap::new();

    for entity in &entities {
        relations.insert(entity.clone(), deps.clone());
    }

    for user in &used_by {
        let entry = relations.entry(user.clone()).or_default();
        entry.extend(entities.iter().cloned());
    }

    relations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_removes_whitespace() {
        assert_eq!(normalize("Authentication Service"), "AuthenticationService");
        assert_eq!(normalize("  Payment\tService\n"), "PaymentService");
    }

    #[test]
    fn test_normalize_idempotent() {
        let once = normalize("User  Data base");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_extract_entities_patterns() {
        let text = "The PaymentService talks to UserDatabase via the AuthModule. \
                    A ReportGenerator and SchemaValidator run inside QueryEngine. \
                    All of this is Project X.";
        let entities = extract_entities(text);

        assert!(entities.contains("PaymentService"));
        assert!(entities.contains("UserDatabase"));
        assert!(entities.contains("AuthModule"));
        assert!(entities.contains("ReportGenerator"));
        assert!(entities.contains("SchemaValidator"));
        assert!(entities.contains("QueryEngine"));
        assert!(entities.contains("ProjectX"));
    }

    #[test]
    fn test_extract_entities_deduplicates() {
        let text = "PaymentService calls PaymentService again.";
        let entities = extract_entities(text);
        assert_eq!(entities.len(), 1);
    }

    #[test]
    fn test_extract_entities_none() {
        let entities = extract_entities("nothing capitalized here");
        assert!(entities.is_empty());
    }

    #[test]
    fn test_extract_section_basic() {
        let text = "# PaymentService\n\n## Dependencies\n- UserDatabase\n- EmailService\n\n## Used By\n- Frontend\n";
        let section = extract_section(text, DEPENDENCIES_HEADER);
        assert!(section.contains("UserDatabase"));
        assert!(section.contains("EmailService"));
        assert!(!section.contains("Frontend"));
    }

    #[test]
    fn test_extract_section_absent_header() {
        let section = extract_section("no headers at all", DEPENDENCIES_HEADER);
        assert_eq!(section, "");
    }

    #[test]
    fn test_extract_section_runs_to_end_of_text() {
        let text = "## Dependencies\n- UserDatabase";
        let section = extract_section(text, DEPENDENCIES_HEADER);
        assert!(section.contains("UserDatabase"));
    }

    #[test]
    fn test_extract_section_first_occurrence_only() {
        let text = "## Dependencies\n- First\n\n## Other\n\n## Dependencies\n- Second\n";
        let section = extract_section(text, DEPENDENCIES_HEADER);
        assert!(section.contains("First"));
        assert!(!section.contains("Second"));
    }

    #[test]
    fn test_extract_section_dependencies_bullets() {
        let section = "- UserDatabase\n- Email Service\nnot a bullet\n  - TokenValidator";
        let deps = extract_section_dependencies(section);
        assert_eq!(deps, vec!["UserDatabase", "EmailService", "TokenValidator"]);
    }

    #[test]
    fn test_extract_section_dependencies_keeps_duplicates() {
        let deps = extract_section_dependencies("- UserDatabase\n- UserDatabase");
        assert_eq!(deps.len(), 2);
    }

    #[test]
    fn test_build_entity_relation_basic() {
        let text = "# PaymentService\n\n## Dependencies\n- UserDatabase\n";
        let relations = build_entity_relation(text);

        assert_eq!(
            relations.get("PaymentService"),
            Some(&vec!["UserDatabase".to_string()])
        );
        // UserDatabase is mentioned in text, so it is extracted too and gets
        // the same dependency list
        assert_eq!(
            relations.get("UserDatabase"),
            Some(&vec!["UserDatabase".to_string()])
        );
    }

    #[test]
    fn test_build_entity_relation_used_by_reverse() {
        let text = "# UserDatabase stores users.\n\n## Used By\n- PaymentService\n";
        let relations = build_entity_relation(text);

        // PaymentService is only in Used By, so it was created with an empty
        // list and then every extracted entity appended
        let deps = relations.get("PaymentService").unwrap();
        assert!(deps.contains(&"UserDatabase".to_string()));
    }

    #[test]
    fn test_build_entity_relation_entity_in_both_sets() {
        // PaymentService is extracted AND listed under Used By: it keeps its
        // own dependency list plus all extracted entities appended
        let text = "PaymentService and UserDatabase.\n\n## Dependencies\n- EmailService\n\n## Used By\n- PaymentService\n";
        let relations = build_entity_relation(text);

        let deps = relations.get("PaymentService").unwrap();
        assert!(deps.contains(&"EmailService".to_string()));
        assert!(deps.contains(&"UserDatabase".to_string()));
        assert!(deps.contains(&"PaymentService".to_string())); // may include itself
    }

    #[test]
    fn test_build_entity_relation_lists_are_independent() {
        // Two extracted entities share the same declared dependencies; a
        // used-by append to one must not show up in the other
        let text = "PaymentService and OrderService.\n\n## Dependencies\n- UserDatabase\n\n## Used By\n- PaymentService\n";
        let relations = build_entity_relation(text);

        let order_deps = relations.get("OrderService").unwrap();
        assert_eq!(order_deps, &vec!["UserDatabase".to_string()]);

        let payment_deps = relations.get("PaymentService").unwrap();
        assert!(payment_deps.len() > order_deps.len());
    }

    #[test]
    fn test_build_entity_relation_malformed_document() {
        // No recognizable entities or headers: silently empty, never an error
        let relations = build_entity_relation("just some prose with no structure");
        assert!(relations.is_empty());
    }
}
