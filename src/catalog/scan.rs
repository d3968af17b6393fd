use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use lofty::prelude::*;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::CatalogSettings;
use crate::error::CatalogError;

use super::model::{Album, Catalog, Track};
use super::slug::slugify;

fn is_audio_file(path: &Path, settings: &CatalogSettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

const COVER_NAMES: [&str; 4] = ["cover.jpg", "cover.png", "folder.jpg", "folder.png"];

/// One scanned file before grouping.
struct ScannedTrack {
    path: PathBuf,
    title: String,
    artist: Option<String>,
    album: Option<String>,
    number: Option<u32>,
    duration: f64,
}

fn read_track(path: &Path) -> ScannedTrack {
    let mut track = ScannedTrack {
        path: path.to_path_buf(),
        title: path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("UNKNOWN")
            .to_string(),
        artist: None,
        album: None,
        number: None,
        duration: 0.0,
    };

    match lofty::read_from_path(path) {
        Ok(tagged) => {
            track.duration = tagged.properties().duration().as_secs_f64();

            if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                if let Some(v) = tag.title().filter(|v| !v.trim().is_empty()) {
                    track.title = v.trim().to_string();
                }
                track.artist = tag
                    .artist()
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty());
                track.album = tag
                    .album()
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty());
                track.number = tag.track();
            }
        }
        Err(e) => debug!(path = %path.display(), error = %e, "no readable tags"),
    }

    track
}

/// Grouping key: the album tag when present, else the parent directory.
fn album_key(track: &ScannedTrack) -> String {
    if let Some(album) = &track.album {
        return album.clone();
    }
    track
        .path
        .parent()
        .and_then(|p| p.file_name())
        .and_then(|s| s.to_str())
        .unwrap_or("Unknown Album")
        .to_string()
}

/// `base`, or `base-2`, `base-3`, ... for the first one not yet taken.
/// Titles that differ only in case or punctuation slugify alike.
fn unique_slug(base: String, taken: &mut BTreeSet<String>) -> String {
    let mut slug = base.clone();
    let mut n = 1;
    while taken.contains(&slug) {
        n += 1;
        slug = format!("{base}-{n}");
    }
    taken.insert(slug.clone());
    slug
}

/// Walk `dir` and build a catalog, one album per album tag (or parent
/// directory when untagged). Tracks are ordered by track number, then path.
pub fn scan(dir: &Path, settings: &CatalogSettings) -> Result<Catalog, CatalogError> {
    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);
    if let Some(d) = settings.max_depth {
        walker = walker.max_depth(d);
    }

    let mut groups: BTreeMap<String, Vec<ScannedTrack>> = BTreeMap::new();

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(|e| match e {
            Ok(e) => Some(e),
            Err(err) => {
                warn!(error = %err, "skipping unreadable entry");
                None
            }
        })
    {
        let path = entry.path();
        if path.is_file() && is_audio_file(path, settings) {
            let track = read_track(path);
            groups.entry(album_key(&track)).or_default().push(track);
        }
    }

    let mut albums: Vec<Album> = Vec::with_capacity(groups.len());
    let mut taken: BTreeSet<String> = BTreeSet::new();

    for (title, mut tracks) in groups {
        tracks.sort_by(|a, b| {
            a.number
                .unwrap_or(u32::MAX)
                .cmp(&b.number.unwrap_or(u32::MAX))
                .then_with(|| a.path.cmp(&b.path))
        });

        let artist = tracks
            .iter()
            .find_map(|t| t.artist.clone())
            .unwrap_or_default();
        let cover = tracks[0].path.parent().and_then(|dir| {
            COVER_NAMES
                .iter()
                .map(|n| dir.join(n))
                .find(|p| p.is_file())
        });

        let slug = unique_slug(slugify(&title), &mut taken);

        albums.push(Album {
            slug,
            title,
            artist,
            cover,
            release_info: String::new(),
            tracks: tracks
                .into_iter()
                .map(|t| Track {
                    title: t.title,
                    duration: t.duration,
                    source: t.path,
                })
                .collect(),
        });
    }

    debug!(dir = %dir.display(), albums = albums.len(), "music directory scanned");
    Catalog::from_albums(albums)
}
