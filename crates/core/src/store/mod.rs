//! File-backed model store: persists compiled books with a title-keyed
//! version counter and answers catalog queries over what was stored.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::compile::MODEL_VERSION;
use crate::config::CompileConfig;
use crate::error::{Error, Result};
use crate::model::{BookModel, LayoutElement};

/// Title reported for a stored book that has none.
const UNTITLED: &str = "Book Title";

/// One row of the book catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub title: String,
    pub version: String,
    pub image: String,
}

/// A single stored model at a fixed path.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stamp `model` with its title, cover and version, then write it.
    ///
    /// The version continues from the stored model when that model has the
    /// same title, and restarts at `1.0` otherwise (including when the
    /// stored file is missing or unreadable).
    pub fn save(&self, mut model: BookModel) -> Result<BookModel> {
        let title = derive_title(&model).unwrap_or_default().to_string();
        let cover = derive_cover(&model).unwrap_or_default().to_string();

        let version = match self.load() {
            Ok(previous) if previous.book_name.as_deref() == Some(title.as_str()) => {
                bump_version(&previous.version)
            }
            Ok(_) => MODEL_VERSION.to_string(),
            Err(Error::NotFound(_)) => MODEL_VERSION.to_string(),
            Err(e) => {
                log::warn!("ignoring unreadable model at {}: {}", self.path.display(), e);
                MODEL_VERSION.to_string()
            }
        };

        model.version = version;
        model.book_name = Some(title);
        model.book_image = Some(cover);

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(&model)?;
        std::fs::write(&self.path, json)?;

        log::info!(
            "stored {:?} v{} at {}",
            model.book_name.as_deref().unwrap_or_default(),
            model.version,
            self.path.display()
        );
        Ok(model)
    }

    /// Read the stored model back.
    pub fn load(&self) -> Result<BookModel> {
        let source = match std::fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::NotFound(self.path.clone()))
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&source)?)
    }

    /// Catalog summary of the stored book.
    pub fn catalog(&self, config: &CompileConfig) -> Result<Vec<CatalogEntry>> {
        let model = self.load()?;

        let title = match model.book_name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => UNTITLED.to_string(),
        };
        let image = model
            .book
            .pages
            .iter()
            .find_map(|page| find_first_image(page.elements()))
            .unwrap_or(config.placeholder_image.as_str())
            .to_string();

        Ok(vec![CatalogEntry {
            title,
            version: model.version,
            image,
        }])
    }
}

/// First text value among top-level elements and their direct children.
pub fn derive_title(model: &BookModel) -> Option<&str> {
    shallow_find(model, LayoutElement::text)
}

/// First image source among top-level elements and their direct children.
pub fn derive_cover(model: &BookModel) -> Option<&str> {
    shallow_find(model, LayoutElement::image_src)
}

/// Visits each top-level element, then its direct children, before moving
/// on to the next top-level element. Deeper descendants are not searched.
fn shallow_find<'m>(
    model: &'m BookModel,
    probe: impl Fn(&'m LayoutElement) -> Option<&'m str>,
) -> Option<&'m str> {
    model
        .book
        .pages
        .iter()
        .flat_map(|page| page.elements())
        .find_map(|el| probe(el).or_else(|| el.children().iter().find_map(&probe)))
}

/// Depth-first search, at any depth, for the first image with a source.
pub fn find_first_image<'m>(
    elements: impl IntoIterator<Item = &'m LayoutElement>,
) -> Option<&'m str> {
    elements
        .into_iter()
        .find_map(|el| el.image_src().or_else(|| find_first_image(el.children())))
}

/// `major.minor` → next version: minor counts up to 9, then rolls into the
/// next major. Anything unparseable restarts at `1.0`.
pub fn bump_version(version: &str) -> String {
    let parsed = version
        .trim()
        .split_once('.')
        .and_then(|(major, minor)| Some((major.parse::<u32>().ok()?, minor.parse::<u32>().ok()?)));

    match parsed {
        Some((major, minor)) if minor < 9 => format!("{}.{}", major, minor + 1),
        Some((major, _)) => match major.checked_add(1) {
            Some(next) => format!("{}.0", next),
            None => MODEL_VERSION.to_string(),
        },
        None => MODEL_VERSION.to_string(),
    }
}
