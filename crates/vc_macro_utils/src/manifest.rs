use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// The caller's parsed `Cargo.toml`, used to find how another crate is
/// reachable from the code a proc macro emits.
///
/// # Example
///
/// ```rust
/// # use vc_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("vc_reflect"));
/// ```
///
/// # Resolution rules
///
/// 1. If the requested crate is listed in `dependencies`, return `::crate_name`.
/// 2. If the requested crate name begins with `vc_` and the caller depends on
///    the facade crate `vc_meta`, return `::vc_meta::short_name`
///    (e.g. `vc_reflect` -> `::vc_meta::reflect`).
/// 3. Repeat 1-2 in `dev-dependencies`.
/// 4. Otherwise fall back to `::crate_name`.
///
/// A crate that needs to name itself from its own doctests should add
/// `extern crate self as crate_name;` at its root.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: SystemTime,
}

const FACADE_NAME: &str = "vc_meta";
const CRATE_PREFIX: &str = "vc_";

impl Manifest {
    #[inline(never)]
    fn manifest_path() -> PathBuf {
        let dir = env::var_os("CARGO_MANIFEST_DIR")
            .unwrap_or_else(|| panic!("CARGO_MANIFEST_DIR should be defined by cargo."));
        let path = PathBuf::from(dir).join("Cargo.toml");
        assert!(
            path.exists(),
            "Cargo manifest does not exist at path {}",
            path.display(),
        );
        path
    }

    #[inline(never)]
    fn load(path: &PathBuf, modified_time: SystemTime) -> Self {
        let text = std::fs::read_to_string(path)
            .unwrap_or_else(|_| panic!("Unable to read cargo manifest: {}", path.display()));
        let manifest = Document::parse(text.into_boxed_str())
            .unwrap_or_else(|_| panic!("Failed to parse cargo manifest: {}", path.display()));
        Self {
            manifest,
            modified_time,
        }
    }

    fn absolute(segments: &[&str]) -> syn::Path {
        let text = format!("::{}", segments.join("::"));
        syn::parse_str(&text).unwrap_or_else(|_| panic!("`{text}` is not a valid path"))
    }

    fn find_in(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::absolute(&[name]));
        }
        let short = name.strip_prefix(CRATE_PREFIX)?;
        deps.contains_key(FACADE_NAME)
            .then(|| Self::absolute(&[FACADE_NAME, short]))
    }

    /// Returns the [`syn::Path`] under which `name` is reachable from the caller.
    ///
    /// See the type-level documentation for the resolution order.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        ["dependencies", "dev-dependencies"]
            .into_iter()
            .find_map(|section| match self.manifest.get(section) {
                Some(Item::Table(deps)) => Self::find_in(deps, name),
                _ => None,
            })
            .unwrap_or_else(|| Self::absolute(&[name]))
    }

    /// Runs `func` with the caller's manifest.
    ///
    /// Manifests are cached per path and re-read when the file's modified time
    /// changes. Reading is still not free, so call this once per macro invocation.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let path = Self::manifest_path();
        let modified_time = std::fs::metadata(&path)
            .and_then(|metadata| metadata.modified())
            .unwrap_or_else(|_| panic!("The Cargo.toml should have a modified time."));

        {
            let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(manifest) = manifests.get(&path)
                && manifest.modified_time == modified_time
            {
                return func(manifest);
            }
        }

        let manifest = Self::load(&path, modified_time);
        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);

        result
    }
}
