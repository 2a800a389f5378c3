use tera::Tera;

use crate::config::{TemplateConfig, INDEX_TEMPLATE};
use crate::error::AppError;

/// Landing page compiled into the binary
const BUILTIN_INDEX: &str = include_str!("../templates/index.html");

/// Initialize the Tera template engine.
///
/// Uses the built-in landing page unless an override directory is configured.
/// An override directory must provide `index.html`.
pub fn init_templates(config: &TemplateConfig) -> Result<Tera, AppError> {
    let tera = match config.glob() {
        Some(glob) => {
            let tera = Tera::new(&glob)?;
            if !tera.get_template_names().any(|name| name == INDEX_TEMPLATE) {
                return Err(AppError::Internal(format!(
                    "Template directory '{}' has no {}",
                    config.dir.as_deref().unwrap_or_default(),
                    INDEX_TEMPLATE
                )));
            }
            tera
        }
        None => {
            let mut tera = Tera::default();
            tera.add_raw_template(INDEX_TEMPLATE, BUILTIN_INDEX)?;
            tera
        }
    };

    Ok(tera)
}

/// Render the landing page. It takes no variables.
pub fn render_index(tera: &Tera) -> Result<String, AppError> {
    Ok(tera.render(INDEX_TEMPLATE, &tera::Context::new())?)
}
