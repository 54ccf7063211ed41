//! Splitting `"(CODE) Name"` collection strings.

use crate::error::ExtractionError;

/// Code and name of a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionName {
    pub code: String,
    pub name: String,
}

/// Parse a collection string such as `"(ERR) Jeu de Paume Collection"`.
///
/// The code is the first balanced parenthesized group, so nested
/// parentheses stay inside it: `"(A(1)) Name"` has code `A(1)`. Everything
/// after the group is the name, parentheses included.
pub fn parse_collection_string(text: &str) -> Result<CollectionName, ExtractionError> {
    let unbalanced = || ExtractionError::UnbalancedCollection(text.to_string());

    let mut depth = 0usize;
    let mut open = None;

    for (index, character) in text.char_indices() {
        match character {
            '(' => {
                if depth == 0 {
                    open = Some(index);
                }
                depth += 1;
            }
            ')' => {
                let start = open.ok_or_else(unbalanced)?;
                depth -= 1;

                if depth == 0 {
                    return Ok(CollectionName {
                        code: text[start + 1..index].trim().to_string(),
                        name: text[index + 1..].trim().to_string(),
                    });
                }
            }
            _ => {}
        }
    }

    Err(unbalanced())
}
