use alloc::sync::Arc;
use core::fmt;

use crate::adapter::{TypeAdapter, TypeAdapters};
use crate::naming::{FieldNameTransformer, FieldNameTranslator, Identity, NamingPolicy};
use crate::node::Navigators;
use crate::{DeserializeError, ObjectBuilder, Response};

/// Mapping configuration shared by many calls.
///
/// Holds the naming policy, the type adapters and, optionally, a navigator
/// registry replacing the global one. A context is cheap to clone.
///
/// # Examples
///
/// ```
/// use battery_map::Context;
/// use battery_map::derive::Response;
/// use battery_map::naming::{CamelCase, SnakeCase};
///
/// #[derive(Response, Default)]
/// struct Page {
///     #[response]
///     next_cursor: Option<String>,
///     #[response]
///     total_count: i64,
/// }
///
/// let context = Context::new()
///     .with_field_name_transformer(SnakeCase, CamelCase)
///     .with_adapter(battery_map::adapter::FnAdapter::new(|text: &str| {
///         Ok(text.replace('_', "").parse::<i64>()?)
///     }));
///
/// let mut page = Page::default();
/// context.build("application/json", r#"{"nextCursor": "c2", "totalCount": "1_024"}"#, &mut page)?;
///
/// assert_eq!(page.next_cursor.as_deref(), Some("c2"));
/// assert_eq!(page.total_count, 1024);
/// # Ok::<(), battery_map::DeserializeError>(())
/// ```
#[derive(Clone)]
pub struct Context {
    naming: Arc<dyn NamingPolicy>,
    adapters: TypeAdapters,
    navigators: Option<Arc<Navigators>>,
}

impl Context {
    /// A context with [`Identity`] naming, no adapter and the global navigators.
    pub fn new() -> Self {
        Self {
            naming: Arc::new(Identity),
            adapters: TypeAdapters::new(),
            navigators: None,
        }
    }

    pub fn with_naming(mut self, naming: impl NamingPolicy + 'static) -> Self {
        self.naming = Arc::new(naming);
        self
    }

    /// Uses a [`FieldNameTranslator`] from the `local` member naming
    /// convention to the `remote` document naming convention.
    pub fn with_field_name_transformer(
        self,
        local: impl FieldNameTransformer + 'static,
        remote: impl FieldNameTransformer + 'static,
    ) -> Self {
        self.with_naming(FieldNameTranslator::new(local, remote))
    }

    /// Replaces the adapter set.
    pub fn with_adapters(mut self, adapters: TypeAdapters) -> Self {
        self.adapters = adapters;
        self
    }

    /// Registers one more adapter.
    pub fn with_adapter<A: TypeAdapter>(mut self, adapter: A) -> Self {
        self.adapters.register(adapter);
        self
    }

    /// Uses `navigators` instead of the global registry.
    pub fn with_navigators(mut self, navigators: Navigators) -> Self {
        self.navigators = Some(Arc::new(navigators));
        self
    }

    #[inline]
    pub fn naming(&self) -> &dyn NamingPolicy {
        &*self.naming
    }

    #[inline]
    pub fn adapters(&self) -> &TypeAdapters {
        &self.adapters
    }

    #[inline]
    pub fn adapters_mut(&mut self) -> &mut TypeAdapters {
        &mut self.adapters
    }

    #[inline]
    pub fn navigators(&self) -> Option<&Navigators> {
        self.navigators.as_deref()
    }

    /// Maps a raw document onto `dest`, see [`build`](crate::build).
    pub fn build<O: Response>(
        &self,
        content_type: &str,
        raw: &str,
        dest: &mut O,
    ) -> Result<(), DeserializeError> {
        match &self.navigators {
            Some(navigators) => ObjectBuilder::new(navigators).build(
                content_type,
                raw,
                dest,
                &*self.naming,
                &self.adapters,
            ),
            None => crate::build(content_type, raw, dest, &*self.naming, &self.adapters),
        }
    }
}

impl Default for Context {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("adapters", &self.adapters)
            .field(
                "navigators",
                &self
                    .navigators
                    .as_ref()
                    .map(|n| n.content_types().collect::<Vec<_>>()),
            )
            .finish_non_exhaustive()
    }
}
