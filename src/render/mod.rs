use std::fs;
use std::path::{Path, PathBuf};

use tera::Tera;
use thiserror::Error;

pub mod html;
pub mod preview;
pub mod typst;

// Page scaffolds are embedded at compile time and materialized into the
// user's data directory on first use, where they can be customized.
const DEFAULT_TYPST_TEMPLATE: &str = include_str!("../../templates/contract.typ.tera");
const DEFAULT_HTML_TEMPLATE: &str = include_str!("../../templates/contract.html.tera");

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("template error: {0}")]
    Template(#[from] tera::Error),
    #[error("'typst' is not installed. Please install it (brew install typst).")]
    TypstMissing,
    #[error("typst compilation failed for {0}")]
    CompileFailed(PathBuf),
}

/// Writes the default templates next to the data root when missing and
/// loads them all with one glob over `<root>/templates`.
pub fn load_templates(root: &Path) -> Result<Tera, RenderError> {
    let template_dir = root.join("templates");
    if !template_dir.exists() {
        fs::create_dir_all(&template_dir)?;
    }
    let typ_path = template_dir.join("contract.typ.tera");
    if !typ_path.exists() {
        println!("✨ Initializing default PDF template...");
        fs::write(&typ_path, DEFAULT_TYPST_TEMPLATE)?;
    }
    let html_path = template_dir.join("contract.html.tera");
    if !html_path.exists() {
        println!("✨ Initializing default document template...");
        fs::write(&html_path, DEFAULT_HTML_TEMPLATE)?;
    }

    let glob = template_dir.join("*.tera");
    let tera = Tera::new(glob.to_str().unwrap_or("templates/*.tera"))?;
    Ok(tera)
}

/// Footer line shared by every output format.
pub fn footer_line(company: &crate::config::Company) -> String {
    format!("{} ● {} ● {}", company.legal_name, company.email, company.phone)
}
