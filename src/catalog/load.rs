use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::CatalogError;

use super::model::{Album, Catalog, Track};
use super::slug::slugify;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    albums: Vec<AlbumRecord>,
}

#[derive(Debug, Deserialize)]
struct AlbumRecord {
    slug: Option<String>,
    title: String,
    #[serde(default)]
    artist: String,
    cover: Option<PathBuf>,
    #[serde(default)]
    release_info: String,
    #[serde(default)]
    tracks: Vec<Track>,
}

impl Catalog {
    /// Load a TOML catalog from disk. Relative `source`/`cover` paths are
    /// resolved against the catalog file's directory.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        let catalog = Self::from_toml_str(&text, base)?;
        debug!(path = %path.display(), albums = catalog.albums.len(), "catalog loaded");
        Ok(catalog)
    }

    /// Parse a TOML catalog, resolving relative paths against `base`.
    pub fn from_toml_str(text: &str, base: &Path) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(text)?;

        let albums = file
            .albums
            .into_iter()
            .map(|rec| {
                let slug = rec
                    .slug
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| slugify(&rec.title));
                let tracks = rec
                    .tracks
                    .into_iter()
                    .map(|t| Track {
                        title: t.title,
                        duration: t.duration,
                        source: resolve(base, t.source),
                    })
                    .collect();
                Album {
                    slug,
                    title: rec.title,
                    artist: rec.artist,
                    cover: rec.cover.map(|c| resolve(base, c)),
                    release_info: rec.release_info,
                    tracks,
                }
            })
            .collect();

        Self::from_albums(albums)
    }

    /// Build a catalog from already assembled albums, enforcing unique slugs
    /// and non-empty track lists.
    pub fn from_albums(albums: Vec<Album>) -> Result<Self, CatalogError> {
        let mut seen: HashSet<&str> = HashSet::new();
        for album in &albums {
            if album.is_empty() {
                return Err(CatalogError::EmptyAlbum(album.slug.clone()));
            }
            if !seen.insert(album.slug.as_str()) {
                return Err(CatalogError::DuplicateSlug(album.slug.clone()));
            }
        }
        Ok(Self { albums })
    }
}

/// Look up an album by its slug.
pub fn find_album_by_slug<'a>(catalog: &'a Catalog, slug: &str) -> Result<&'a Album, CatalogError> {
    catalog
        .albums
        .iter()
        .find(|a| a.slug == slug)
        .ok_or_else(|| CatalogError::NotFound(slug.to_string()))
}

fn resolve(base: &Path, p: PathBuf) -> PathBuf {
    if p.is_absolute() { p } else { base.join(p) }
}
