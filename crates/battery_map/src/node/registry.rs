use alloc::sync::Arc;
use std::sync::{LazyLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use battery_utils::hash::HashMap;

use super::Navigator;

// -----------------------------------------------------------------------------
// MIME

/// Returns the MIME type of a `Content-Type` value.
///
/// Parameters after the first `;` are dropped and the rest is trimmed.
///
/// # Examples
///
/// ```
/// use battery_map::node::extract_mime;
///
/// assert_eq!(extract_mime("application/json; charset=utf-8"), "application/json");
/// assert_eq!(extract_mime(" text/xml "), "text/xml");
/// ```
#[inline]
pub fn extract_mime(content_type: &str) -> &str {
    content_type
        .split_once(';')
        .map_or(content_type, |(mime, _)| mime)
        .trim()
}

#[inline]
fn normalize(content_type: &str) -> Box<str> {
    extract_mime(content_type).to_ascii_lowercase().into_boxed_str()
}

// -----------------------------------------------------------------------------
// NavigatorPlugin

/// A navigator constructor collected by `submit_navigator!`.
#[derive(Clone, Copy)]
pub struct NavigatorPlugin {
    create: fn() -> Box<dyn Navigator>,
}

impl NavigatorPlugin {
    #[inline]
    pub const fn new(create: fn() -> Box<dyn Navigator>) -> Self {
        Self { create }
    }
}

#[cfg(feature = "auto_register")]
inventory::collect!(NavigatorPlugin);

/// Submits a navigator constructor to the global registry.
///
/// The constructor runs when the process-wide [`Navigators`] is first used.
///
/// ```
/// use battery_map::ParseError;
/// use battery_map::node::{Navigator, Navigators, Node};
///
/// struct Csv;
///
/// impl Navigator for Csv {
///     fn content_type(&self) -> &str {
///         "text/csv"
///     }
///
///     fn parse(&self, raw: &str) -> Result<Box<dyn Node>, ParseError> {
///         let cells = raw.split(',').map(|c| serde_json::Value::from(c.trim())).collect();
///         Ok(Box::new(serde_json::Value::Array(cells)))
///     }
/// }
///
/// battery_map::submit_navigator!(|| Box::new(Csv));
///
/// fn main() {
///     assert!(Navigators::read_global().contains("text/csv"));
/// }
/// ```
#[cfg(feature = "auto_register")]
#[macro_export]
macro_rules! submit_navigator {
    ($create:expr) => {
        $crate::__macro_exports::inventory::submit! {
            $crate::node::NavigatorPlugin::new($create)
        }
    };
}

// -----------------------------------------------------------------------------
// Navigators

/// Content-type keyed navigator registry.
///
/// Keys are MIME types without parameters, compared case-insensitively.
///
/// # Global registry
///
/// [`Navigators::global`] is the registry used by [`build`](crate::build).
/// It is created on first use with [`Navigators::new`]. Additional
/// navigators must be registered before the first concurrent mapping call;
/// the lock keeps late registration memory-safe but mapping calls that
/// already resolved their navigator do not see it.
///
/// # Examples
///
/// ```
/// use battery_map::node::Navigators;
///
/// let navigators = Navigators::new();
/// assert!(navigators.contains("application/json; charset=utf-8"));
/// assert!(navigators.get("application/xml").is_none());
/// ```
pub struct Navigators {
    table: HashMap<Box<str>, Arc<dyn Navigator>>,
}

impl Navigators {
    /// Creates a registry without any navigator.
    #[inline]
    pub fn empty() -> Self {
        Self {
            table: HashMap::default(),
        }
    }

    /// Creates a registry with the built-in navigators and,
    /// with feature `auto_register`, every submitted one.
    pub fn new() -> Self {
        let mut navigators = Self::empty();
        #[cfg(feature = "json")]
        navigators.register(super::JsonNavigator);
        navigators.auto_register();
        navigators
    }

    /// Registers `navigator` under its content type, returning the replaced one.
    pub fn register(&mut self, navigator: impl Navigator) -> Option<Arc<dyn Navigator>> {
        self.register_arc(Arc::new(navigator))
    }

    /// Registers a shared navigator under its content type, returning the replaced one.
    pub fn register_arc(&mut self, navigator: Arc<dyn Navigator>) -> Option<Arc<dyn Navigator>> {
        let key = normalize(navigator.content_type());
        let replaced = self.table.insert(key, navigator);
        if let Some(old) = &replaced {
            log::warn!("navigator for `{}` replaced", old.content_type());
        }
        replaced
    }

    /// Registers every navigator submitted through `submit_navigator!`.
    ///
    /// Returns `false` when the `auto_register` feature is disabled.
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            for plugin in inventory::iter::<NavigatorPlugin> {
                let navigator = (plugin.create)();
                self.table
                    .insert(normalize(navigator.content_type()), Arc::from(navigator));
            }
            true
        }
        #[cfg(not(feature = "auto_register"))]
        {
            false
        }
    }

    /// Returns the navigator for `content_type`; parameters are ignored.
    #[inline]
    pub fn get(&self, content_type: &str) -> Option<&Arc<dyn Navigator>> {
        self.table.get(&normalize(content_type))
    }

    #[inline]
    pub fn contains(&self, content_type: &str) -> bool {
        self.get(content_type).is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Iterates over the registered MIME types in arbitrary order.
    pub fn content_types(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(|k| &**k)
    }

    /// The process-wide registry.
    pub fn global() -> &'static RwLock<Navigators> {
        static GLOBAL: LazyLock<RwLock<Navigators>> =
            LazyLock::new(|| RwLock::new(Navigators::new()));
        &GLOBAL
    }

    /// Locks the process-wide registry for reading.
    ///
    /// A poisoned lock is recovered, registration never leaves the table
    /// half-written.
    #[inline]
    pub fn read_global() -> RwLockReadGuard<'static, Navigators> {
        Self::global().read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Locks the process-wide registry for registration.
    #[inline]
    pub fn write_global() -> RwLockWriteGuard<'static, Navigators> {
        Self::global().write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Navigators {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::Navigators;
    use crate::ParseError;
    use crate::node::{Navigator, Node};

    struct Fixed(&'static str);

    impl Navigator for Fixed {
        fn content_type(&self) -> &str {
            self.0
        }

        fn parse(&self, _: &str) -> Result<Box<dyn Node>, ParseError> {
            Err(ParseError::new(self.0, "fixed"))
        }
    }

    #[test]
    fn lookup_ignores_parameters_and_case() {
        let mut navigators = Navigators::empty();
        assert!(navigators.register(Fixed("Application/Vnd.Test")).is_none());

        assert!(navigators.contains("application/vnd.test"));
        assert!(navigators.contains(" APPLICATION/VND.TEST ; q=1"));
        assert!(!navigators.contains("application/vnd.other"));
        assert_eq!(navigators.len(), 1);
    }

    #[test]
    fn register_replaces() {
        let mut navigators = Navigators::empty();
        navigators.register(Fixed("text/a"));
        let old = navigators.register(Fixed("text/a")).unwrap();

        assert_eq!(old.content_type(), "text/a");
        assert_eq!(navigators.content_types().collect::<Vec<_>>(), ["text/a"]);
    }

    #[cfg(feature = "json")]
    #[test]
    fn global_has_json() {
        assert!(Navigators::read_global().contains("application/json"));
    }
}
