//! Document key resolution for members.

use alloc::borrow::Cow;
use core::fmt;

use crate::info::MemberInfo;
use crate::naming::NamingPolicy;
use crate::node::Node;

// -----------------------------------------------------------------------------
// Lookup

/// The result of looking a member up in an object node.
///
/// A key present with a null value is `Found` with a null node.
#[derive(Clone, Copy)]
pub enum Lookup<'a> {
    Found(&'a dyn Node),
    Absent,
}

impl<'a> Lookup<'a> {
    #[inline]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    #[inline]
    pub fn node(&self) -> Option<&'a dyn Node> {
        match self {
            Self::Found(node) => Some(*node),
            Self::Absent => None,
        }
    }

    /// Returns `true` if the key is present with a null value.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.node().is_some_and(|node| node.is_null())
    }
}

impl fmt::Debug for Lookup<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found(node) => write!(f, "Found({})", node.describe()),
            Self::Absent => f.write_str("Absent"),
        }
    }
}

#[inline]
fn lookup_child<'a>(node: &'a dyn Node, key: &str) -> Lookup<'a> {
    if node.contains_child(key)
        && let Some(child) = node.query_child(key)
    {
        Lookup::Found(child)
    } else {
        Lookup::Absent
    }
}

// -----------------------------------------------------------------------------
// Paths

/// Looks up a dotted path such as `a.b.c`.
///
/// A child whose key is literally the whole path wins. Otherwise the path
/// is walked one fragment at a time; a missing or null intermediate
/// fragment makes the result absent.
///
/// # Examples
///
/// ```
/// use battery_map::{Lookup, lookup_path};
/// use serde_json::json;
///
/// let doc = json!({"a": {"b": {"c": 42}}, "x.y": 1});
///
/// assert_eq!(lookup_path(&doc, "a.b.c").node().unwrap().describe(), "42");
/// assert!(lookup_path(&doc, "a.b.x").is_absent());
/// assert!(lookup_path(&doc, "a.b.c.d").is_absent());
/// assert_eq!(lookup_path(&doc, "x.y").node().unwrap().describe(), "1");
/// ```
pub fn lookup_path<'a>(node: &'a dyn Node, path: &str) -> Lookup<'a> {
    if let found @ Lookup::Found(_) = lookup_child(node, path) {
        return found;
    }

    let mut current = node;
    let mut fragments = path.split('.').peekable();
    while let Some(fragment) = fragments.next() {
        let Lookup::Found(child) = lookup_child(current, fragment) else {
            return Lookup::Absent;
        };
        if fragments.peek().is_none() {
            return Lookup::Found(child);
        }
        if child.is_null() {
            return Lookup::Absent;
        }
        current = child;
    }
    Lookup::Absent
}

// -----------------------------------------------------------------------------
// Members

/// The document key tried first for `member`.
///
/// The explicit name of its directive, or its name translated by `naming`.
pub fn document_key(member: &MemberInfo, naming: &dyn NamingPolicy) -> Cow<'static, str> {
    match member.explicit_name() {
        Some(name) => Cow::Borrowed(name),
        None => Cow::Owned(naming.local_to_remote(member.name())),
    }
}

/// Looks `member` up in an object node.
///
/// 1. An explicit name containing `.` is a path, see [`lookup_path`].
/// 2. Any other explicit name is a direct child key, without fallback.
/// 3. Without an explicit name, the name translated by `naming` is tried,
///    then the raw member name.
pub fn lookup_member<'a>(
    node: &'a dyn Node,
    member: &MemberInfo,
    naming: &dyn NamingPolicy,
) -> Lookup<'a> {
    match member.explicit_name() {
        Some(name) if name.contains('.') => lookup_path(node, name),
        Some(name) => lookup_child(node, name),
        None => {
            let translated = naming.local_to_remote(member.name());
            match lookup_child(node, &translated) {
                Lookup::Absent if translated != member.name() => {
                    lookup_child(node, member.name())
                }
                found => found,
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::{Directive, MemberInfo};
    use crate::naming::{CamelCase, FieldNameTranslator, Identity, SnakeCase};
    use serde_json::json;

    fn text(lookup: Lookup<'_>) -> Option<String> {
        lookup.node().map(|n| n.describe())
    }

    #[test]
    fn literal_dotted_key_wins() {
        let doc = json!({"a.b": 7, "a": {"b": 1}});
        assert_eq!(text(lookup_path(&doc, "a.b")).as_deref(), Some("7"));
    }

    #[test]
    fn null_intermediate_is_absent() {
        let doc = json!({"a": null, "b": {"c": null}});
        assert!(lookup_path(&doc, "a.c").is_absent());

        let last = lookup_path(&doc, "b.c");
        assert!(!last.is_absent());
        assert!(last.is_null());
    }

    #[test]
    fn scalar_intermediate_is_absent() {
        let doc = json!({"a": 5});
        assert!(lookup_path(&doc, "a.b").is_absent());
        assert!(lookup_path(&doc, "").is_absent());
    }

    #[test]
    fn translated_then_raw_name() {
        // Local names are camel case, the document uses snake case.
        let naming = FieldNameTranslator::new(CamelCase, SnakeCase);
        let member = MemberInfo::new::<String>("userName").with_directive(Directive::new());

        let doc = json!({"user_name": "x"});
        assert_eq!(text(lookup_member(&doc, &member, &naming)).as_deref(), Some("x"));

        let doc = json!({"userName": "y"});
        assert_eq!(text(lookup_member(&doc, &member, &naming)).as_deref(), Some("y"));

        let doc = json!({"user_name": "x", "userName": "y"});
        assert_eq!(text(lookup_member(&doc, &member, &naming)).as_deref(), Some("x"));

        assert_eq!(document_key(&member, &naming), "user_name");
    }

    #[test]
    fn explicit_name_has_no_fallback() {
        let member = MemberInfo::new::<String>("userName")
            .with_directive(Directive::new().named("login"));
        let doc = json!({"userName": "y"});

        assert!(lookup_member(&doc, &member, &Identity).is_absent());
        assert_eq!(document_key(&member, &Identity), "login");
    }

    #[test]
    fn explicit_path() {
        let member = MemberInfo::new::<i64>("count")
            .with_directive(Directive::new().named("meta.page.count"));
        let doc = json!({"meta": {"page": {"count": 3}}});

        assert_eq!(text(lookup_member(&doc, &member, &Identity)).as_deref(), Some("3"));
    }

    #[test]
    fn empty_explicit_name_uses_naming() {
        let member = MemberInfo::new::<i64>("count").with_directive(Directive::new().named(""));
        let doc = json!({"count": 3});

        assert_eq!(text(lookup_member(&doc, &member, &Identity)).as_deref(), Some("3"));
    }
}
