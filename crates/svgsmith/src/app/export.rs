//! Rendering sprite markup and writing export artifacts.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use minijinja::Environment;
use serde::Serialize;

use crate::domain::model::Fragment;

/// Media type for exported sprite files, for hosts that offer downloads.
pub const SVG_MEDIA_TYPE: &str = "image/svg+xml";

/// Runtime options controlling export behavior.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Where to write the rendered markup. `None` renders without touching
    /// the filesystem, leaving the write to an external collaborator.
    pub output_path: Option<PathBuf>,
}

/// Result of an export operation.
#[derive(Debug, Clone)]
pub struct ExportResult {
    pub rendered: String,
    /// File name the artifact should be offered under.
    pub file_name: String,
    pub output_path: Option<PathBuf>,
}

/// Renders groups and single fragments into downloadable SVG markup.
pub struct Exporter {
    env: Environment<'static>,
}

impl Exporter {
    /// Create a new exporter with built-in templates loaded.
    pub fn new() -> Result<Self> {
        Ok(Self {
            env: default_environment()?,
        })
    }

    /// Render a group's fragments as one sprite sheet.
    ///
    /// Fragments are sorted by identifier (ordinal, ascending) on a copy, so
    /// the caller's sequence is left untouched and any permutation of the
    /// same fragment set renders to byte-identical output. Duplicate
    /// identifiers keep their relative order through the stable sort.
    pub fn render_group(&self, fragments: &[Fragment]) -> Result<String> {
        let context = SpriteContext {
            symbols: sorted_by_id(fragments)
                .into_iter()
                .map(SymbolContext::from)
                .collect(),
        };
        self.render_with_template("sprite_sheet", &context)
    }

    /// Render one fragment as a standalone icon document.
    pub fn render_fragment(&self, fragment: &Fragment) -> Result<String> {
        let context = IconContext {
            symbol: SymbolContext::from(fragment.clone()),
        };
        self.render_with_template("standalone_icon", &context)
    }

    /// Render a group and hand the markup off per the options.
    pub fn export_group(
        &self,
        name: &str,
        fragments: &[Fragment],
        options: &ExportOptions,
    ) -> Result<ExportResult> {
        let rendered = self.render_group(fragments)?;
        self.finish(rendered, suggested_file_name(name), options)
    }

    /// Render one fragment and hand the markup off per the options.
    pub fn export_fragment(
        &self,
        fragment: &Fragment,
        options: &ExportOptions,
    ) -> Result<ExportResult> {
        let rendered = self.render_fragment(fragment)?;
        self.finish(rendered, suggested_file_name(&fragment.id), options)
    }

    fn finish(
        &self,
        rendered: String,
        file_name: String,
        options: &ExportOptions,
    ) -> Result<ExportResult> {
        if let Some(path) = &options.output_path {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create export directory: {}", parent.display())
                })?;
            }
            fs::write(path, &rendered)
                .with_context(|| format!("failed to write export output to {}", path.display()))?;
        }

        Ok(ExportResult {
            rendered,
            file_name,
            output_path: options.output_path.clone(),
        })
    }

    fn render_with_template<C: Serialize>(&self, template_name: &str, context: &C) -> Result<String> {
        let template = self
            .env
            .get_template(template_name)
            .map_err(|err| anyhow!("template '{template_name}' not registered: {err}"))?;
        template
            .render(context)
            .map_err(|err| anyhow!("failed to render template '{template_name}': {err}"))
    }
}

/// Copy of the input sorted by identifier using code-point order.
pub fn sorted_by_id(fragments: &[Fragment]) -> Vec<Fragment> {
    let mut sorted = fragments.to_vec();
    sorted.sort_by(|a, b| a.id.cmp(&b.id));
    sorted
}

/// Derived download name for a group or fragment.
pub fn suggested_file_name(name: &str) -> String {
    format!("{name}.svg")
}

fn default_environment() -> Result<Environment<'static>> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.add_template("sprite_sheet", SPRITE_SHEET_TEMPLATE)
        .map_err(|err| anyhow!("failed to register sprite sheet template: {err}"))?;
    env.add_template("standalone_icon", STANDALONE_ICON_TEMPLATE)
        .map_err(|err| anyhow!("failed to register standalone icon template: {err}"))?;
    Ok(env)
}

#[derive(Serialize)]
struct SpriteContext {
    symbols: Vec<SymbolContext>,
}

#[derive(Serialize)]
struct IconContext {
    symbol: SymbolContext,
}

#[derive(Serialize)]
struct SymbolContext {
    id: String,
    view_box: String,
    body: String,
}

impl From<Fragment> for SymbolContext {
    fn from(fragment: Fragment) -> Self {
        Self {
            id: fragment.id,
            view_box: fragment.view_box,
            body: fragment.body,
        }
    }
}

// The sheet root is hidden via style so it can be inlined into a host
// document without painting anything itself.
const SPRITE_SHEET_TEMPLATE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" style="display:none">
<defs>
{% for symbol in symbols %}
<symbol id="{{ symbol.id }}" viewBox="{{ symbol.view_box }}">
{{ symbol.body }}
</symbol>
{% endfor %}
</defs>
</svg>"#;

const STANDALONE_ICON_TEMPLATE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{{ symbol.view_box }}">
{{ symbol.body }}
</svg>"#;
