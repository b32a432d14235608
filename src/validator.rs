//! Attribute validation against the catalog
//!
//! Guarantees that every attribute name referenced by a candidate AST has
//! a definition in the attribute catalog before the owning rule is
//! persisted. Unknown names are auto-registered with a guessed data type;
//! this is the one place, besides rule insertion, where the engine writes
//! to a collaborator.

use ahash::AHashSet;
use tracing::info;

use crate::error::{Result, RuleEngineError};
use crate::expr::Node;
use crate::model::{Attribute, DataType};
use crate::store::AttributeCatalog;

/// Guess a data type from the attribute name alone.
///
/// A heuristic on the name, never an inference over the operand's value:
/// names containing "age" or "salary" (case-insensitively) default to
/// `Number`, everything else to `String`.
pub fn guess_data_type(attribute: &str) -> DataType {
    let lower = attribute.to_lowercase();
    if lower.contains("age") || lower.contains("salary") {
        DataType::Number
    } else {
        DataType::String
    }
}

/// Attribute names referenced by the tree, deduplicated, first-seen order
fn referenced_attributes(ast: &Node) -> Vec<String> {
    let mut seen = AHashSet::new();
    let mut names = Vec::new();

    for attribute in ast.attributes() {
        if seen.insert(attribute) {
            names.push(attribute.to_string());
        }
    }

    names
}

/// Reconcile the attributes referenced by `ast` against the catalog,
/// auto-registering any that are missing.
///
/// After registration the catalog is queried again; a name that is still
/// absent (the write failed or is not visible) fails the rule-creation
/// use case with an unknown-attribute error naming it.
pub fn validate_attributes(ast: &Node, catalog: &dyn AttributeCatalog) -> Result<()> {
    let names = referenced_attributes(ast);
    let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();

    let existing = catalog.find_by_names(&name_refs)?;
    let known: AHashSet<&str> = existing.iter().map(|a| a.attribute_name.as_str()).collect();

    let missing: Vec<&str> = name_refs
        .iter()
        .copied()
        .filter(|name| !known.contains(name))
        .collect();

    if !missing.is_empty() {
        info!(attributes = ?missing, "registering attributes missing from the catalog");

        let new_attributes = missing
            .iter()
            .map(|name| Attribute::new(*name, guess_data_type(name)))
            .collect();
        catalog.insert_many(new_attributes)?;
    }

    // Re-fetch so a failed or invisible registration cannot slip through
    let all = catalog.find_by_names(&name_refs)?;
    let visible: AHashSet<&str> = all.iter().map(|a| a.attribute_name.as_str()).collect();

    for name in &name_refs {
        if !visible.contains(name) {
            return Err(RuleEngineError::UnknownAttribute(name.to_string()));
        }
    }

    Ok(())
}
