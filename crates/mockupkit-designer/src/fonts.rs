//! Font lookup through the system font database.

use async_trait::async_trait;
use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use mockupkit_core::{AssetError, FontProvider};
use rusttype::Font;
use std::{
    collections::HashMap,
    fs,
    sync::{Mutex, OnceLock},
};

#[derive(Clone, Eq, PartialEq, Hash)]
struct FontKey {
    family: String,
    weight: u16,
    italic: bool,
}

fn db() -> &'static Database {
    static DB: OnceLock<Database> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        tracing::debug!("Font database holds {} faces", db.len());
        db
    })
}

fn families_for(family: &str) -> Vec<Family<'_>> {
    match family.trim() {
        "" | "sans-serif" | "Sans" => vec![Family::SansSerif],
        "serif" | "Serif" => vec![Family::Serif],
        "monospace" | "Monospace" => vec![Family::Monospace],
        "cursive" => vec![Family::Cursive],
        "fantasy" => vec![Family::Fantasy],
        other => vec![Family::Name(other)],
    }
}

fn query_face(family: &str, weight: u16, italic: bool) -> Option<fontdb::ID> {
    let families = families_for(family);
    let query = Query {
        families: &families,
        weight: Weight(weight),
        stretch: Stretch::Normal,
        style: if italic { Style::Italic } else { Style::Normal },
    };
    db().query(&query)
}

/// Whether the database can satisfy `family` at all.
pub fn is_available(family: &str, weight: u16, italic: bool) -> bool {
    query_face(family, weight, italic).is_some()
}

/// Glyph source for `family`, cached for the lifetime of the process.
pub fn font_for(family: &str, weight: u16, italic: bool) -> Option<&'static Font<'static>> {
    static CACHE: OnceLock<Mutex<HashMap<FontKey, &'static Font<'static>>>> = OnceLock::new();
    let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));

    let key = FontKey {
        family: family.to_string(),
        weight,
        italic,
    };

    if let Some(font) = cache.lock().unwrap_or_else(|p| p.into_inner()).get(&key) {
        return Some(font);
    }

    let font = load_font(family, weight, italic)?;
    let font_ref: &'static Font<'static> = Box::leak(Box::new(font));
    cache
        .lock()
        .unwrap_or_else(|p| p.into_inner())
        .insert(key, font_ref);
    Some(font_ref)
}

fn load_font(family: &str, weight: u16, italic: bool) -> Option<Font<'static>> {
    let id = query_face(family, weight, italic)?;
    let face = db().face(id)?;

    match &face.source {
        fontdb::Source::File(path) => Font::try_from_vec(fs::read(path).ok()?),
        fontdb::Source::SharedFile(path, _) => Font::try_from_vec(fs::read(path).ok()?),
        fontdb::Source::Binary(bytes) => Font::try_from_vec(bytes.as_ref().as_ref().to_vec()),
    }
}

/// Reports families from the system font database as ready.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemFontProvider;

#[async_trait]
impl FontProvider for SystemFontProvider {
    async fn ensure_ready(&self, family: &str, weight: u16, italic: bool) -> Result<(), AssetError> {
        let requested = family.to_string();
        let found = tokio::task::spawn_blocking(move || is_available(&requested, weight, italic))
            .await
            .unwrap_or(false);
        if found {
            Ok(())
        } else {
            Err(AssetError::FontUnavailable {
                family: family.to_string(),
            })
        }
    }
}
