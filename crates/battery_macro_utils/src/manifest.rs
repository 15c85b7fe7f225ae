use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use proc_macro2::Span;
use toml_edit::{Document, Item, Table};

/// Locate an accessible [`syn::Path`] for another crate as seen from the
/// caller's Cargo.toml.
///
/// The emitted path must be valid from the crate that invokes the derive,
/// which may depend on `battery_map` directly or only on the `battery` facade.
///
/// # Example
///
/// ```rust
/// # use battery_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("battery_map"));
/// ```
///
/// Reading the manifest is not cheap, call it once per macro invocation
/// and pass the resulting path around.
///
/// # Resolution rules
///
/// 1. If the requested crate is listed in `dependencies`, return `::crate_name`.
/// 2. If the requested crate name begins with `battery_` and the caller depends
///    on the facade crate `battery`, return `::battery::short_name`
///    (e.g. `battery_map` -> `::battery::map`).
/// 3. Repeat step 1-2 in `dev-dependencies`.
/// 4. Otherwise, fall back to the absolute path `::crate_name`.
///
/// A missing or unreadable manifest also resolves through step 4.
///
/// ## Note
///
/// A crate that derives on its own types should add
/// `extern crate self as battery_map;` so the fallback path resolves.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Option<Document<Box<str>>>,
    pub modified_time: Option<SystemTime>,
}

const FACADE_NAME: &str = "battery";
const FACADE_PREFIX: &str = "battery_";

impl Manifest {
    const MISSING: Self = Self {
        manifest: None,
        modified_time: None,
    };

    fn get_manifest_path() -> Option<PathBuf> {
        let mut path = PathBuf::from(env::var_os("CARGO_MANIFEST_DIR")?);
        path.push("Cargo.toml");
        path.exists().then_some(path)
    }

    fn get_manifest_modified_time(path: &Path) -> Option<SystemTime> {
        std::fs::metadata(path).and_then(|m| m.modified()).ok()
    }

    fn read_manifest(path: &Path) -> Option<Document<Box<str>>> {
        let manifest = std::fs::read_to_string(path).ok()?.into_boxed_str();
        Document::parse(manifest).ok()
    }

    fn absolute(segments: &[&str]) -> syn::Path {
        let mut path = syn::Path {
            leading_colon: Some(Default::default()),
            segments: Default::default(),
        };
        for segment in segments {
            path.segments.push(syn::PathSegment::from(syn::Ident::new(
                segment,
                Span::call_site(),
            )));
        }
        path
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::absolute(&[name]));
        }
        let module = name.strip_prefix(FACADE_PREFIX)?;
        deps.contains_key(FACADE_NAME)
            .then(|| Self::absolute(&[FACADE_NAME, module]))
    }

    /// Return a [`syn::Path`] for the package named `name` as resolved from
    /// the caller's Cargo.toml. See the type documentation for the rules.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        if let Some(manifest) = &self.manifest {
            for table in ["dependencies", "dev-dependencies"] {
                if let Some(Item::Table(deps)) = manifest.get(table)
                    && let Some(path) = Self::find_in_deps(deps, name)
                {
                    return path;
                }
            }
        }
        Self::absolute(&[name])
    }

    /// Run `func` against the [`Manifest`] of the caller's Cargo.toml.
    ///
    /// Parsed manifests are cached per path and refreshed when the file's
    /// modified time changes.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static CACHE: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let Some(path) = Self::get_manifest_path() else {
            return func(&Self::MISSING);
        };
        let modified_time = Self::get_manifest_modified_time(&path);

        // Without a modified time the cached entry cannot be validated.
        if modified_time.is_some() {
            let cache = CACHE.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(cached) = cache.get(&path).filter(|m| m.modified_time == modified_time) {
                return func(cached);
            }
        }

        let loaded = Self {
            manifest: Self::read_manifest(&path),
            modified_time,
        };
        let result = func(&loaded);
        CACHE
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, loaded);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::Manifest;
    use toml_edit::Document;

    fn resolve(toml: &str, name: &str) -> String {
        let manifest = Manifest {
            manifest: Some(Document::parse(Box::<str>::from(toml)).unwrap()),
            modified_time: None,
        };
        let path = manifest.get_crate_path(name);
        assert!(path.leading_colon.is_some());
        path.segments
            .iter()
            .map(|s| s.ident.to_string())
            .collect::<Vec<_>>()
            .join("::")
    }

    #[test]
    fn direct_dependency_wins() {
        let toml = "[dependencies]\nbattery_map = \"0.0.1\"\nbattery = \"0.0.1\"\n";
        assert_eq!(resolve(toml, "battery_map"), "battery_map");
    }

    #[test]
    fn facade_dependency() {
        let toml = "[dependencies]\nbattery = \"0.0.1\"\n";
        assert_eq!(resolve(toml, "battery_map"), "battery::map");

        let toml = "[dev-dependencies]\nbattery = \"0.0.1\"\n";
        assert_eq!(resolve(toml, "battery_map"), "battery::map");
    }

    #[test]
    fn fallback_to_absolute_name() {
        assert_eq!(resolve("[package]\nname = \"app\"\n", "battery_map"), "battery_map");

        assert_eq!(Manifest::MISSING.get_crate_path("battery_map").segments.len(), 1);
    }
}
