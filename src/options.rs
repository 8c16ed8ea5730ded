//! Maps persisted settings onto the editor's runtime parameters.

use std::time::Duration;

use mockupkit_designer::{
    EditorOptions, FontStyle, IdentityParams, ProjectionParams, TextAlign, TextContent,
};
use mockupkit_settings::Config;

pub fn projection_params(config: &Config) -> ProjectionParams {
    let p = &config.projection;
    ProjectionParams {
        editor_fill_ratio: p.editor_fill_ratio,
        preview_fill_ratio: p.preview_fill_ratio,
        reference_size: p.reference_size,
        legacy_reference_size: p.legacy_reference_size,
    }
}

pub fn identity_params(config: &Config) -> IdentityParams {
    IdentityParams {
        editable_imposter_ratio: config.identity.editable_imposter_ratio,
        locked_imposter_ratio: config.identity.locked_imposter_ratio,
    }
}

/// Session options for `config`, with text defaults from the editor section.
pub fn editor_options(config: &Config) -> EditorOptions {
    let e = &config.editor;
    EditorOptions {
        history_depth: e.history_depth,
        change_debounce: Duration::from_millis(e.change_debounce_ms),
        font_load_timeout: Duration::from_millis(e.font_load_timeout_ms),
        fallback_font: e.fallback_font.clone(),
        duplicate_offset: e.duplicate_offset,
        default_text: TextContent {
            content: e.default_text.clone(),
            font_family: e.default_font_family.clone(),
            font_size: e.default_font_size,
            font_weight: 400,
            font_style: FontStyle::Normal,
            fill_color: e.default_text_fill.clone(),
            text_align: TextAlign::Center,
        },
        upload_max_dimension: e.upload_max_dimension,
        upload_target_dimension: e.upload_target_dimension,
        projection: projection_params(config),
        identity: identity_params(config),
    }
}
