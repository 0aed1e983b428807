use std::fs;
use std::path::PathBuf;

use directories::{BaseDirs, ProjectDirs};
use inquire::Text;
use serde::{Deserialize, Serialize};

/// Pricing is injected into the engine and the document builder so alternate
/// price lists can be exercised in tests without touching any logic. All
/// amounts are USD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    pub deposit_music_booth: f64,
    pub deposit_dj_percent: f64,
    pub sound_upgrade: f64,
    pub addon_speaker: f64,
    pub addon_early_setup: f64,
    pub addon_branding: f64,
    pub same_day_change_fee: f64,
    pub date_change_fee: f64,
    pub outdoor_tent_fee: f64,
}

impl Default for Pricing {
    fn default() -> Pricing {
        Pricing {
            deposit_music_booth: 125.0,
            deposit_dj_percent: 0.5,
            sound_upgrade: 150.0,
            addon_speaker: 25.0,
            addon_early_setup: 50.0,
            addon_branding: 75.0,
            same_day_change_fee: 100.0,
            date_change_fee: 50.0,
            outdoor_tent_fee: 150.0,
        }
    }
}

/// Provider identity printed on contracts and invoices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub display_name: String,
    pub legal_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub socials: String,
    pub ath_movil: String,
    pub checks_payable_to: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub data_root: String,
    #[serde(default)]
    pub webhook_music: String,
    #[serde(default)]
    pub webhook_booth: String,
    #[serde(default)]
    pub webhook_dj: String,
    #[serde(default)]
    pub ai_endpoint: String,
}

pub const HISTORY_MAX: usize = 50;

const DEFAULT_COMPANY_TEMPLATE: &str = include_str!("../company.toml");

fn get_config_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("com", "contract-maker", "app") {
        let config_dir = proj_dirs.config_dir();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).ok();
        }
        return config_dir.join("settings.toml");
    }
    PathBuf::from("settings.toml")
}

pub fn load_settings() -> Option<Settings> {
    let path = get_config_path();
    if !path.exists() {
        return None;
    }
    let content = fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

pub fn load_company(root: &std::path::Path) -> Company {
    let path = root.join("company.toml");
    if path.exists() {
        match fs::read_to_string(&path).ok().and_then(|c| toml::from_str(&c).ok()) {
            Some(company) => return company,
            None => tracing::warn!("company.toml is unreadable, falling back to defaults"),
        }
    } else {
        println!("✨ Initializing default company configuration...");
        if let Err(e) = fs::write(&path, DEFAULT_COMPANY_TEMPLATE) {
            tracing::warn!("failed to write company.toml: {e}");
        }
    }
    toml::from_str(DEFAULT_COMPANY_TEMPLATE).expect("embedded company.toml is valid")
}

pub fn setup_config_wizard() -> Settings {
    println!("\n⚙️  --- Configuration Setup ---");
    let current = load_settings();
    let default_root = current
        .as_ref()
        .map(|s| s.data_root.clone())
        .unwrap_or_else(|| "~/Documents/Contracts".to_string());

    println!("📂 Opening folder picker...");
    let picked_path = rfd::FileDialog::new()
        .set_title("Select Root Data Directory")
        .pick_folder();

    let new_root = if let Some(path) = picked_path {
        path.to_string_lossy().to_string()
    } else {
        println!("❌ No folder selected. Falling back to manual input.");
        Text::new("Enter Root Data Directory:")
            .with_default(&default_root)
            .prompt()
            .unwrap_or(default_root)
    };

    let webhook_default = |v: Option<&str>| v.unwrap_or("").to_string();
    let webhook_music = Text::new("Workflow webhook URL (music, optional):")
        .with_default(&webhook_default(current.as_ref().map(|s| s.webhook_music.as_str())))
        .prompt()
        .unwrap_or_default();
    let webhook_booth = Text::new("Workflow webhook URL (booth, optional):")
        .with_default(&webhook_default(current.as_ref().map(|s| s.webhook_booth.as_str())))
        .prompt()
        .unwrap_or_default();
    let webhook_dj = Text::new("Workflow webhook URL (dj, optional):")
        .with_default(&webhook_default(current.as_ref().map(|s| s.webhook_dj.as_str())))
        .prompt()
        .unwrap_or_default();
    let ai_endpoint = Text::new("AI suggestion endpoint (optional):")
        .with_default(&webhook_default(current.as_ref().map(|s| s.ai_endpoint.as_str())))
        .prompt()
        .unwrap_or_default();

    let settings = Settings {
        data_root: new_root,
        webhook_music,
        webhook_booth,
        webhook_dj,
        ai_endpoint,
    };

    let path = get_config_path();
    match toml::to_string_pretty(&settings) {
        Ok(toml_str) => {
            if let Err(e) = fs::write(&path, toml_str) {
                eprintln!("❌ Failed to save settings: {e}");
            } else {
                println!("✅ Settings saved.");
            }
        }
        Err(e) => eprintln!("❌ Failed to serialize settings: {e}"),
    }
    settings
}

pub fn expand_home_dir(path: &str) -> String {
    if path.starts_with("~") {
        if let Some(base_dirs) = BaseDirs::new() {
            let home = base_dirs.home_dir().to_string_lossy();
            return path.replacen("~", &home, 1);
        }
    }
    path.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pricing_matches_price_list() {
        let pricing = Pricing::default();
        assert_eq!(pricing.deposit_music_booth, 125.0);
        assert_eq!(pricing.deposit_dj_percent, 0.5);
        assert_eq!(pricing.sound_upgrade, 150.0);
    }

    #[test]
    fn embedded_company_template_parses() {
        let company: Company = toml::from_str(DEFAULT_COMPANY_TEMPLATE).unwrap();
        assert!(!company.legal_name.is_empty());
        assert!(company.email.contains('@'));
    }

    #[test]
    fn expand_home_leaves_absolute_paths_alone() {
        assert_eq!(expand_home_dir("/srv/data"), "/srv/data");
    }
}
