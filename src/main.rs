mod ai;
mod config;
mod document;
mod engine;
mod locale;
mod model;
mod render;
mod store;
mod validate;
mod webhook;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Context as _;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use comfy_table::{Attribute, Cell, Table};
use inquire::{Confirm, DateSelect, Select, Text};
use slug::slugify;

use crate::config::{Company, Pricing, Settings};
use crate::locale::{FormStrings, Locale, MONTHS_ES, catalog};
use crate::model::{
    AddonChoice, BoothLocation, Electrical, Order, OrderDetails, OrderKind, SetupColor, SetupType,
    SoundOption,
};
use crate::store::Store;

// ==========================================
// CLI
// ==========================================

#[derive(Parser)]
#[command(name = "contract-maker")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum ExportFormat {
    Pdf,
    Doc,
    Both,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill out a service order (continues the saved draft if one exists)
    New { kind: OrderKind },
    /// Preview the contract and invoice in the terminal
    Preview { kind: OrderKind },
    /// Export the contract + invoice (PDF via typst, word-processor document)
    Export {
        kind: OrderKind,
        #[arg(long, value_enum, default_value = "pdf")]
        format: ExportFormat,
    },
    /// Submit the order to the document workflow
    Send { kind: OrderKind },
    /// List generated contracts
    History,
    /// Remove one entry from the history
    Remove,
    /// Clear the whole contract history
    ClearHistory,
    /// Discard the saved draft for a kind
    Clear { kind: OrderKind },
    /// Ask the AI proxy for wording help
    Suggest { prompt: Vec<String> },
    /// Configure data directory, webhooks and AI endpoint
    Config,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    // 1. Initialize configuration
    let settings = config::load_settings().unwrap_or_else(config::setup_config_wizard);
    let root = PathBuf::from(config::expand_home_dir(&settings.data_root));
    fs::create_dir_all(&root).context("failed to create data directory")?;

    let store = Store::open(&root).context("failed to open the data store")?;
    let company = config::load_company(&root);
    let pricing = Pricing::default();

    let Some(command) = cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help().ok();
        return Ok(());
    };

    match command {
        Commands::New { kind } => {
            if let Some(order) = order_wizard(kind, &store, &pricing) {
                println!("\n✅ Draft saved for the {kind} contract.");
                let errors = validate::validate_order(&order);
                if errors.is_empty() {
                    println!("✅ The order is complete and ready to preview, export or send.");
                } else {
                    print_validation_errors(&errors);
                }
            }
        }
        Commands::Preview { kind } => {
            let Some(order) = load_ready_order(kind, &store, &pricing) else {
                return Ok(());
            };
            let docs = document::build(&order, &pricing, &company, business_today());
            println!("{}", render::preview::render(&docs.contract, &order, &company));
            println!("{}", render::preview::render(&docs.invoice, &order, &company));
        }
        Commands::Export { kind, format } => {
            let Some(order) = load_ready_order(kind, &store, &pricing) else {
                return Ok(());
            };
            let errors = validate::validate_order(&order);
            if !errors.is_empty() {
                print_validation_errors(&errors);
            }
            export_order(&order, &pricing, &company, &root, format)?;
        }
        Commands::Send { kind } => {
            let Some(order) = load_ready_order(kind, &store, &pricing) else {
                return Ok(());
            };
            send_order(&order, &settings, &store);
        }
        Commands::History => {
            show_history(&store);
        }
        Commands::Remove => {
            remove_history_entry(&store);
        }
        Commands::ClearHistory => {
            let confirmed = Confirm::new("Clear the whole contract history?")
                .with_default(false)
                .prompt()
                .unwrap_or(false);
            if confirmed {
                store.clear_history();
                println!("✅ History cleared.");
            }
        }
        Commands::Clear { kind } => {
            let confirmed = Confirm::new(&format!("Discard the saved {kind} draft?"))
                .with_default(false)
                .prompt()
                .unwrap_or(false);
            if confirmed {
                store.clear_draft(kind);
                println!("✅ Draft discarded.");
            }
        }
        Commands::Suggest { prompt } => {
            let prompt = prompt.join(" ");
            match ai::suggest(&settings.ai_endpoint, &prompt) {
                Ok(suggestion) => println!("💡 {suggestion}"),
                Err(e) => eprintln!("❌ {e}"),
            }
        }
        Commands::Config => {
            config::setup_config_wizard();
        }
    }

    Ok(())
}

fn business_today() -> NaiveDate {
    validate::business_now().date()
}

// ==========================================
// 1. Order wizard
// ==========================================

fn prompt_text(label: &str, default: &str) -> String {
    Text::new(label)
        .with_default(default)
        .prompt()
        .unwrap_or_else(|_| default.to_string())
}

fn prompt_text_hint(label: &str, placeholder: &str, default: &str) -> String {
    Text::new(label)
        .with_placeholder(placeholder)
        .with_default(default)
        .prompt()
        .unwrap_or_else(|_| default.to_string())
}

fn prompt_digits(label: &str, default: &str) -> String {
    let value = prompt_text(label, default);
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn prompt_confirm(label: &str, default: bool) -> bool {
    Confirm::new(label).with_default(default).prompt().unwrap_or(default)
}

fn prompt_addon(label: &str, cost: f64, t: &FormStrings, current: AddonChoice) -> AddonChoice {
    let label = format!("{label} (${cost:.2})");
    let options = vec![t.addon_hire, t.addon_no_hire, t.addon_pending];
    match Select::new(&label, options).prompt() {
        Ok(choice) if choice == t.addon_hire => AddonChoice::Hire,
        Ok(choice) if choice == t.addon_no_hire => AddonChoice::NoHire,
        Ok(_) => AddonChoice::Pending,
        Err(_) => current,
    }
}

fn order_wizard(kind: OrderKind, store: &Store, pricing: &Pricing) -> Option<Order> {
    let mut order = match store.load_draft(kind) {
        Some(draft) if prompt_confirm("📄 Continue the saved draft?", true) => draft,
        _ => Order::new(kind),
    };

    // Language first: the rest of the wizard speaks it.
    println!("\n--- {} ---", catalog(Locale::Es).form.language_title);
    let language = Select::new("Español / English:", vec!["Español", "English"]).prompt();
    order.locale = match language {
        Ok("English") => Locale::En,
        Ok(_) => Locale::Es,
        Err(_) => return None,
    };
    let t = &catalog(order.locale).form;

    println!("\n--- {} ---", t.client_info_title);
    order.contract_number = prompt_digits(t.contract_number, &order.contract_number);
    order.client_name = prompt_text_hint(t.client_name, t.client_name_placeholder, &order.client_name);
    order.client_email = prompt_text(t.email, &order.client_email);
    let phone = prompt_text(t.phone, &order.client_phone);
    order.client_phone = if validate::is_valid_phone(&phone) {
        validate::normalize_phone(&phone)
    } else {
        phone
    };

    println!("\n--- {} ---", t.event_details_title);
    order.activity_type =
        prompt_text_hint(t.activity_type, t.activity_type_placeholder, &order.activity_type);
    order.address = prompt_text(t.event_address, &order.address);

    match kind {
        OrderKind::Music | OrderKind::Booth => {
            order.event_day = prompt_digits(t.day, &order.event_day);
            let month_default = if order.event_month.is_empty() {
                None
            } else {
                MONTHS_ES.iter().position(|m| *m == order.event_month)
            };
            let mut month_select = Select::new(t.month, MONTHS_ES.to_vec());
            if let Some(index) = month_default {
                month_select = month_select.with_starting_cursor(index);
            }
            if let Ok(month) = month_select.prompt() {
                order.event_month = month.to_string();
            }
            order.event_year = prompt_digits(t.year, &order.event_year);
        }
        OrderKind::Dj => {}
    }

    match &mut order.details {
        OrderDetails::Music(music) => {
            music.service_time = prompt_text(t.service_time, &music.service_time);

            println!("\n--- {} ---", t.service_details_title);
            music.service_description = prompt_text(t.service_description, &music.service_description);
            let sound_options = vec![t.sound_pending, t.sound_client, t.sound_basic, t.sound_upgrade];
            music.sound_option = match Select::new(t.sound_title, sound_options).prompt() {
                Ok(choice) if choice == t.sound_client => SoundOption::Client,
                Ok(choice) if choice == t.sound_basic => SoundOption::Basic,
                Ok(choice) if choice == t.sound_upgrade => SoundOption::Upgrade,
                Ok(_) => SoundOption::Pending,
                Err(_) => music.sound_option,
            };
        }
        OrderDetails::Booth(booth) => {
            println!("\n--- {} ---", t.booth_service_title);
            booth.photo_booth = prompt_confirm(t.photo_booth_label, booth.photo_booth);
            booth.video_360 = prompt_confirm(t.video_360_label, booth.video_360);
            booth.service_time = prompt_text(t.service_time, &booth.service_time);
            booth.service_hours = prompt_text(t.service_hours, &booth.service_hours);
            booth.speaker_addon =
                prompt_addon(t.addon_speaker, pricing.addon_speaker, t, booth.speaker_addon);
            booth.early_setup_addon = prompt_addon(
                t.addon_early_setup,
                pricing.addon_early_setup,
                t,
                booth.early_setup_addon,
            );
            booth.branding_addon =
                prompt_addon(t.addon_branding, pricing.addon_branding, t, booth.branding_addon);
            let location_options = vec![t.location_indoor, t.location_outdoor];
            booth.location = match Select::new(t.event_location, location_options).prompt() {
                Ok(choice) if choice == t.location_indoor => Some(BoothLocation::Indoor),
                Ok(_) => Some(BoothLocation::Outdoor),
                Err(_) => booth.location,
            };
        }
        OrderDetails::Dj(dj) => {
            let default_date = NaiveDate::parse_from_str(&dj.event_date_iso, "%Y-%m-%d")
                .unwrap_or_else(|_| business_today());
            if let Ok(date) = DateSelect::new(t.event_date).with_default(default_date).prompt() {
                dj.event_date_iso = date.format("%Y-%m-%d").to_string();
            }
            dj.start_time = prompt_text(t.start_time, &dj.start_time);
            dj.end_time = prompt_text(t.end_time, &dj.end_time);
            dj.guest_count = prompt_digits(t.guest_count, &dj.guest_count);

            println!("\n--- {} ---", t.venue_info_title);
            dj.venue_name = prompt_text(t.venue_name, &dj.venue_name);
            dj.venue_floor = prompt_text(t.event_floor, &dj.venue_floor);
            dj.venue_contact = prompt_text(t.venue_contact, &dj.venue_contact);
            dj.venue_phone = prompt_text(t.venue_phone, &dj.venue_phone);
            dj.schedule_restrictions = prompt_text(t.setup_restrictions, &dj.schedule_restrictions);

            let setup_options = vec![t.setup_premium, t.setup_deluxe];
            dj.setup_type = match Select::new(t.setup_type, setup_options).prompt() {
                Ok(choice) if choice == t.setup_premium => Some(SetupType::Premium),
                Ok(_) => Some(SetupType::Deluxe),
                Err(_) => dj.setup_type,
            };
            dj.electrical = match Select::new(t.electrical, vec!["110v", "240v"]).prompt() {
                Ok("110v") => Some(Electrical::V110),
                Ok(_) => Some(Electrical::V240),
                Err(_) => dj.electrical,
            };
            let color_options = vec![t.color_black, t.color_white];
            dj.setup_color = match Select::new(t.setup_color, color_options).prompt() {
                Ok(choice) if choice == t.color_black => Some(SetupColor::Black),
                Ok(_) => Some(SetupColor::White),
                Err(_) => dj.setup_color,
            };

            dj.outdoor = match Select::new(t.is_outdoor, vec![t.no, t.yes]).prompt() {
                Ok(choice) => choice == t.yes,
                Err(_) => dj.outdoor,
            };
            if dj.outdoor {
                dj.surface_type = prompt_text(t.surface_type, &dj.surface_type);
                println!("{}", t.protection_title);
                dj.protection.client_tent =
                    prompt_confirm(t.protection_tent, dj.protection.client_tent);
                dj.protection.permanent_structure =
                    prompt_confirm(t.protection_structure, dj.protection.permanent_structure);
                dj.protection.no_protection =
                    prompt_confirm(t.protection_none, dj.protection.no_protection);
                dj.protection.level_area =
                    prompt_confirm(t.protection_level_area, dj.protection.level_area);
                dj.protection.vehicle_access =
                    prompt_confirm(t.protection_vehicle_access, dj.protection.vehicle_access);
            }
        }
    }

    println!("\n--- {} ---", t.financial_title);
    order.total_cost = prompt_text(t.total_cost, &order.total_cost);
    order.deposit_applies = prompt_confirm(t.deposit_checkbox, order.deposit_applies);
    order.parking_spaces = prompt_digits(t.parking_spaces, &order.parking_spaces);
    order.notes = prompt_text(t.contract_notes, &order.notes);
    order.invoice_notes = prompt_text(t.invoice_notes, &order.invoice_notes);

    // Derived fields: one engine pass owns balances, descriptions and
    // durations. The wizard never writes them.
    let result = engine::recompute(&order, pricing);
    if !result.is_noop() {
        println!("🧮 Derived fields updated: {}", result.changed.join(", "));
    }
    let order = result.order;
    match &order.details {
        OrderDetails::Dj(dj) => {
            println!("   {} {}", t.total_duration, dj.duration_text);
            println!("   {} ${} / ${}", t.remaining_balance, dj.deposit_50, dj.balance_50);
        }
        _ => println!("   {} ${}", t.remaining_balance, order.remaining_balance),
    }

    if let Err(e) = store.save_draft(&order) {
        tracing::warn!("draft not persisted: {e}");
        println!("⚠️  Could not save the draft; continuing in memory.");
    }

    Some(order)
}

fn print_validation_errors(errors: &std::collections::BTreeMap<&'static str, String>) {
    println!("\n⚠️  The order has {} field error(s):", errors.len());
    for (field, message) in errors {
        println!("   • {field}: {message}");
    }
}

/// Loads the draft for a kind and runs the engine over it so every derived
/// field is current before preview, export or submission.
fn load_ready_order(kind: OrderKind, store: &Store, pricing: &Pricing) -> Option<Order> {
    let Some(order) = store.load_draft(kind) else {
        println!("❌ No saved {kind} draft. Run `contract-maker new {kind}` first.");
        return None;
    };
    let result = engine::recompute(&order, pricing);
    if !result.is_noop() {
        if let Err(e) = store.save_draft(&result.order) {
            tracing::warn!("derived draft not persisted: {e}");
        }
    }
    Some(result.order)
}

// ==========================================
// 2. Export
// ==========================================

fn export_order(
    order: &Order,
    pricing: &Pricing,
    company: &Company,
    root: &Path,
    format: ExportFormat,
) -> anyhow::Result<()> {
    let today = business_today();
    let docs = document::build(order, pricing, company, today);
    let tera = render::load_templates(root)?;

    let client_slug = if order.client_name.is_empty() {
        "cliente".to_string()
    } else {
        slugify(&order.client_name)
    };
    let output_dir = root
        .join("output")
        .join(order.event_year.clone())
        .join(&client_slug);
    let file_stem = format!("contrato-{}-{}", order.kind(), order.contract_number);

    if matches!(format, ExportFormat::Pdf | ExportFormat::Both) {
        println!("\n🔨 Compiling PDF...");
        match render::typst::export_pdf(&docs, order, company, &tera, &output_dir, &file_stem) {
            Ok(pdf_path) => {
                println!("✅ PDF Generated: {pdf_path:?}");
                open_and_reveal(&pdf_path);
            }
            Err(e) => eprintln!("❌ {e}"),
        }
    }
    if matches!(format, ExportFormat::Doc | ExportFormat::Both) {
        match render::html::export_document(&docs, order, company, &tera, &output_dir, &file_stem) {
            Ok(doc_path) => {
                println!("✅ Document Generated: {doc_path:?}");
                open_and_reveal(&doc_path);
            }
            Err(e) => eprintln!("❌ {e}"),
        }
    }
    Ok(())
}

// ==========================================
// 3. Workflow submission
// ==========================================

fn send_order(order: &Order, settings: &Settings, store: &Store) {
    let errors = validate::validate_order(order);
    if !errors.is_empty() {
        print_validation_errors(&errors);
        println!("\n⚠️  Please fix the form errors before submitting.");
        return;
    }

    if !prompt_confirm("Submit the order to the document workflow?", true) {
        return;
    }

    println!("📤 Submitting...");
    match webhook::submit(order, settings, business_today()) {
        Ok(links) => {
            println!("✅ Contract generated successfully!");
            if let Some(file_name) = &links.file_name {
                println!("   Archivo: {file_name}");
            }
            println!("   Editar: {}", links.doc_url);
            if !links.pdf_url.is_empty() {
                println!("   Ver PDF: {}", links.pdf_url);
            }
            if !links.pdf_download_url.is_empty() {
                println!("   Descargar PDF: {}", links.pdf_download_url);
            }

            let event_date = if !order.event_day.is_empty()
                && !order.event_month.is_empty()
                && !order.event_year.is_empty()
            {
                format!(
                    "{} de {} del {}",
                    order.event_day, order.event_month, order.event_year
                )
            } else {
                "Fecha no especificada".to_string()
            };
            let client_name = if order.client_name.is_empty() {
                "Cliente sin nombre"
            } else {
                order.client_name.as_str()
            };
            if let Err(e) = store.add_history(
                &order.contract_number,
                order.kind(),
                client_name,
                &event_date,
                links,
            ) {
                tracing::warn!("history not persisted: {e}");
            }
        }
        Err(e) => {
            eprintln!("\n❌ Error generating the contract.\n");
            eprintln!("Detalle: {e}\n");
            eprintln!("Por favor verifica:");
            eprintln!("• La URL del webhook es correcta y devuelve un JSON.");
            eprintln!("• El scenario del workflow está activado.");
            eprintln!("• Todos los campos requeridos del formulario están llenos.");
            eprintln!("• Tienes conexión a internet.");
        }
    }
}

// ==========================================
// 4. History
// ==========================================

fn show_history(store: &Store) {
    let history = store.history();
    if history.is_empty() {
        println!("(No contracts generated yet)");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Contract").add_attribute(Attribute::Bold),
        Cell::new("Kind").add_attribute(Attribute::Bold),
        Cell::new("Client").add_attribute(Attribute::Bold),
        Cell::new("Event date").add_attribute(Attribute::Bold),
        Cell::new("Created").add_attribute(Attribute::Bold),
        Cell::new("Document").add_attribute(Attribute::Bold),
    ]);
    for entry in &history {
        table.add_row(vec![
            Cell::new(&entry.contract_number),
            Cell::new(entry.kind.as_str()),
            Cell::new(&entry.client_name),
            Cell::new(&entry.event_date),
            Cell::new(&entry.created_at),
            Cell::new(&entry.links.doc_url),
        ]);
    }
    println!("\n--- Contract History ({} of max {}) ---", history.len(), config::HISTORY_MAX);
    println!("{table}");
}

fn remove_history_entry(store: &Store) {
    let history = store.history();
    if history.is_empty() {
        println!("(No contracts to remove)");
        return;
    }

    let options: Vec<String> = history
        .iter()
        .map(|e| format!("#{} | {} | {} | {}", e.contract_number, e.kind, e.client_name, e.event_date))
        .collect();

    match Select::new("Select entry to remove:", options.clone()).prompt() {
        Ok(choice) => {
            let index = options.iter().position(|o| *o == choice).unwrap_or(0);
            let id = history[index].id.clone();
            match store.remove_history(&id) {
                Ok(true) => println!("✅ Entry removed."),
                Ok(false) => println!("❌ Entry not found."),
                Err(e) => eprintln!("❌ Failed to update history: {e}"),
            }
        }
        Err(_) => println!("Cancelled"),
    }
}

// ==========================================
// 5. Utilities
// ==========================================

// Helper: Open file and reveal in Finder/Explorer
fn open_and_reveal(path: &Path) {
    #[cfg(target_os = "macos")]
    Command::new("open").arg("-R").arg(path).spawn().ok();

    #[cfg(target_os = "windows")]
    Command::new("explorer")
        .arg(format!("/select,{}", path.to_string_lossy()))
        .spawn()
        .ok();

    #[cfg(target_os = "linux")]
    Command::new("xdg-open").arg(path.parent().unwrap_or(path)).spawn().ok();

    #[cfg(target_os = "macos")]
    Command::new("open").arg(path).spawn().ok();
}
