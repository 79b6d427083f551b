//! Input classification and routing.
//!
//! Free-typed text is matched against two ordered keyword rule tables to
//! pick an extraction strategy; file and image inputs always go through AI
//! structuring. Matching is case-insensitive substring containment and the
//! first rule in declared order wins — the order below is a behavioral
//! contract, not an implementation detail.

use serde::{Deserialize, Serialize};

use crate::types::TransformInput;

/// Phrases implying an entity-extraction request, checked first.
pub const ENTITY_RULES: [(&str, &str); 9] = [
    ("extract contacts", "people"),
    ("extract people", "people"),
    ("extract companies", "companies"),
    ("extract organizations", "companies"),
    ("extract products", "products"),
    ("extract locations", "locations"),
    ("extract addresses", "locations"),
    ("extract dates", "dates"),
    ("extract events", "events"),
];

/// Keywords implying a typed structured table, checked second.
pub const TABLE_TYPE_RULES: [(&str, &str); 7] = [
    ("sales", "sales"),
    ("inventory", "inventory"),
    ("customer", "customer"),
    ("product", "product"),
    ("expense", "expense"),
    ("finance", "finance"),
    ("report", "report"),
];

/// The extraction strategy chosen for a piece of raw input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "kebab-case")]
pub enum Strategy {
    /// Extract entities of a known kind into a table.
    EntityExtraction { entity_type: String },
    /// Generate a table of a known domain shape.
    TypedTable { table_type: String },
    /// General free-text to table transformation.
    GenericTransform,
    /// File or image content: always AI structuring, no keyword routing.
    AiStructuring,
}

/// Classify raw input into an extraction strategy.
pub fn classify(input: &TransformInput) -> Strategy {
    let text = match input {
        TransformInput::Text(text) => text,
        TransformInput::File { .. } | TransformInput::Image { .. } => {
            return Strategy::AiStructuring;
        }
    };

    let lowered = text.to_lowercase();

    for (keyword, entity_type) in ENTITY_RULES {
        if lowered.contains(keyword) {
            return Strategy::EntityExtraction {
                entity_type: entity_type.to_string(),
            };
        }
    }

    for (keyword, table_type) in TABLE_TYPE_RULES {
        if lowered.contains(keyword) {
            return Strategy::TypedTable {
                table_type: table_type.to_string(),
            };
        }
    }

    Strategy::GenericTransform
}

// ============================================================================
// Tests
// ============================================================================
