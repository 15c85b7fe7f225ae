use super::split_by_case;

/// Splits names of one naming convention into parts and joins them back.
pub trait FieldNameTransformer: Send + Sync {
    fn decode(&self, name: &str) -> Vec<String>;

    fn encode(&self, parts: &[String]) -> String;
}

// -----------------------------------------------------------------------------
// CamelCase

/// `lowerCamelCase` names.
///
/// Encoding keeps the first part unchanged and capitalizes the others,
/// lower casing the rest of each part.
///
/// ```
/// use battery_map::naming::{CamelCase, FieldNameTransformer};
///
/// let parts = CamelCase.decode("displayName");
/// assert_eq!(parts, ["display", "Name"]);
/// assert_eq!(CamelCase.encode(&["user".into(), "ID".into()]), "userId");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct CamelCase;

fn capitalize(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

impl FieldNameTransformer for CamelCase {
    #[inline]
    fn decode(&self, name: &str) -> Vec<String> {
        split_by_case(name)
    }

    fn encode(&self, parts: &[String]) -> String {
        let mut parts = parts.iter().filter(|p| !p.is_empty());
        let mut name = match parts.next() {
            Some(first) => first.clone(),
            None => return String::new(),
        };
        for part in parts {
            name.push_str(&capitalize(part));
        }
        name
    }
}

// -----------------------------------------------------------------------------
// SnakeCase

/// `snake_case` names.
///
/// ```
/// use battery_map::naming::{FieldNameTransformer, SnakeCase};
///
/// assert_eq!(SnakeCase.decode("_created__at"), ["created", "at"]);
/// assert_eq!(SnakeCase.encode(&["User".into(), "Name".into()]), "user_name");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct SnakeCase;

impl FieldNameTransformer for SnakeCase {
    fn decode(&self, name: &str) -> Vec<String> {
        name.split('_')
            .filter(|p| !p.is_empty())
            .map(str::to_owned)
            .collect()
    }

    fn encode(&self, parts: &[String]) -> String {
        let parts: Vec<String> = parts
            .iter()
            .filter(|p| !p.is_empty())
            .map(|p| p.to_lowercase())
            .collect();
        parts.join("_")
    }
}
