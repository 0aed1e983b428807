use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};

use crate::locale::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OrderKind {
    Music,
    Booth,
    Dj,
}

impl OrderKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderKind::Music => "music",
            OrderKind::Booth => "booth",
            OrderKind::Dj => "dj",
        }
    }
}

impl std::fmt::Display for OrderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundOption {
    #[serde(rename = "cliente")]
    Client,
    #[serde(rename = "basico")]
    Basic,
    #[serde(rename = "upgrade")]
    Upgrade,
    #[serde(rename = "pendiente")]
    Pending,
}

impl SoundOption {
    /// Canonical wire token, shared with the workflow payloads.
    pub fn token(self) -> &'static str {
        match self {
            SoundOption::Client => "cliente",
            SoundOption::Basic => "basico",
            SoundOption::Upgrade => "upgrade",
            SoundOption::Pending => "pendiente",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddonChoice {
    #[serde(rename = "contratar")]
    Hire,
    #[serde(rename = "no_contratar")]
    NoHire,
    #[serde(rename = "pendiente")]
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoothLocation {
    Indoor,
    Outdoor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetupType {
    Premium,
    Deluxe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Electrical {
    #[serde(rename = "110v")]
    V110,
    #[serde(rename = "240v")]
    V240,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetupColor {
    Black,
    White,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MusicDetails {
    pub sound_option: SoundOption,
    pub service_description: String,
    pub service_time: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProtectionFlags {
    pub client_tent: bool,
    pub permanent_structure: bool,
    pub no_protection: bool,
    pub level_area: bool,
    pub vehicle_access: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoothDetails {
    pub photo_booth: bool,
    pub video_360: bool,
    pub speaker_addon: AddonChoice,
    pub early_setup_addon: AddonChoice,
    pub branding_addon: AddonChoice,
    pub location: Option<BoothLocation>,
    pub service_time: String,
    pub service_hours: String,
    /// Derived from the selected services and addons, never hand-edited.
    pub service_description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DjDetails {
    /// Composite event date, `YYYY-MM-DD`. The split day/month/year fields
    /// on the order are kept in sync with this by the engine.
    pub event_date_iso: String,
    pub start_time: String,
    pub end_time: String,
    pub duration_text: String,
    pub guest_count: String,
    pub venue_name: String,
    pub venue_floor: String,
    pub venue_contact: String,
    pub venue_phone: String,
    pub schedule_restrictions: String,
    pub setup_type: Option<SetupType>,
    pub electrical: Option<Electrical>,
    pub outdoor: bool,
    pub surface_type: String,
    pub protection: ProtectionFlags,
    pub package_name: String,
    pub setup_color: Option<SetupColor>,
    pub deposit_50: String,
    pub balance_50: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OrderDetails {
    Music(MusicDetails),
    Booth(BoothDetails),
    Dj(DjDetails),
}

/// One service engagement to be contracted. Common fields apply to every
/// kind; `details` carries the kind-specific ones. Money fields are
/// 2-decimal strings, times are `H:MM AM|PM`, and the event month is stored
/// as its canonical Spanish lowercase token regardless of locale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub contract_number: String,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub event_day: String,
    pub event_month: String,
    pub event_year: String,
    pub total_cost: String,
    /// Derived, never user-set.
    pub remaining_balance: String,
    pub address: String,
    pub activity_type: String,
    pub notes: String,
    pub invoice_notes: String,
    pub deposit_applies: bool,
    pub locale: Locale,
    pub parking_spaces: String,
    pub details: OrderDetails,
}

impl Order {
    pub fn kind(&self) -> OrderKind {
        match self.details {
            OrderDetails::Music(_) => OrderKind::Music,
            OrderDetails::Booth(_) => OrderKind::Booth,
            OrderDetails::Dj(_) => OrderKind::Dj,
        }
    }

    /// A fresh order of the given kind with the business defaults. Changing
    /// kind always goes through here: the old order is superseded, not
    /// migrated.
    pub fn new(kind: OrderKind) -> Order {
        let current_year = Local::now().year().to_string();
        let common = Order {
            contract_number: "001".to_string(),
            client_name: String::new(),
            client_email: String::new(),
            client_phone: String::new(),
            event_day: String::new(),
            event_month: String::new(),
            event_year: current_year,
            total_cost: String::new(),
            remaining_balance: "0.00".to_string(),
            address: String::new(),
            activity_type: String::new(),
            notes: String::new(),
            invoice_notes: String::new(),
            deposit_applies: true,
            locale: Locale::Es,
            parking_spaces: "5".to_string(),
            details: OrderDetails::Music(MusicDetails {
                sound_option: SoundOption::Pending,
                service_description: String::new(),
                service_time: String::new(),
            }),
        };

        match kind {
            OrderKind::Music => common,
            OrderKind::Booth => Order {
                total_cost: "0.00".to_string(),
                parking_spaces: "2".to_string(),
                details: OrderDetails::Booth(BoothDetails {
                    photo_booth: false,
                    video_360: false,
                    speaker_addon: AddonChoice::NoHire,
                    early_setup_addon: AddonChoice::NoHire,
                    branding_addon: AddonChoice::NoHire,
                    location: None,
                    service_time: String::new(),
                    service_hours: "2 horas".to_string(),
                    service_description: String::new(),
                }),
                ..common
            },
            OrderKind::Dj => Order {
                total_cost: "0.00".to_string(),
                parking_spaces: "2".to_string(),
                details: OrderDetails::Dj(DjDetails {
                    event_date_iso: String::new(),
                    start_time: String::new(),
                    end_time: String::new(),
                    duration_text: "0 horas".to_string(),
                    guest_count: String::new(),
                    venue_name: String::new(),
                    venue_floor: String::new(),
                    venue_contact: String::new(),
                    venue_phone: String::new(),
                    schedule_restrictions: String::new(),
                    setup_type: None,
                    electrical: None,
                    outdoor: false,
                    surface_type: String::new(),
                    protection: ProtectionFlags::default(),
                    package_name: String::new(),
                    setup_color: None,
                    deposit_50: "0.00".to_string(),
                    balance_50: "0.00".to_string(),
                }),
                ..common
            },
        }
    }

    pub fn music(&self) -> Option<&MusicDetails> {
        match &self.details {
            OrderDetails::Music(m) => Some(m),
            _ => None,
        }
    }

    pub fn booth(&self) -> Option<&BoothDetails> {
        match &self.details {
            OrderDetails::Booth(b) => Some(b),
            _ => None,
        }
    }

    pub fn dj(&self) -> Option<&DjDetails> {
        match &self.details {
            OrderDetails::Dj(d) => Some(d),
            _ => None,
        }
    }
}

/// Links returned by the workflow endpoint after a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedLinks {
    pub doc_url: String,
    pub pdf_url: String,
    pub pdf_download_url: String,
    #[serde(default)]
    pub file_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_follows_details() {
        assert_eq!(Order::new(OrderKind::Music).kind(), OrderKind::Music);
        assert_eq!(Order::new(OrderKind::Booth).kind(), OrderKind::Booth);
        assert_eq!(Order::new(OrderKind::Dj).kind(), OrderKind::Dj);
    }

    #[test]
    fn booth_defaults_match_business_rules() {
        let order = Order::new(OrderKind::Booth);
        let booth = order.booth().unwrap();
        assert_eq!(order.parking_spaces, "2");
        assert_eq!(order.total_cost, "0.00");
        assert_eq!(booth.service_hours, "2 horas");
        assert!(order.deposit_applies);
    }

    #[test]
    fn details_round_trip_through_json() {
        let order = Order::new(OrderKind::Dj);
        let json = serde_json::to_string(&order).unwrap();
        let back: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(order, back);
        assert!(json.contains("\"kind\":\"dj\""));
    }

    #[test]
    fn sound_option_uses_canonical_tokens() {
        assert_eq!(
            serde_json::to_string(&SoundOption::Pending).unwrap(),
            "\"pendiente\""
        );
        assert_eq!(SoundOption::Upgrade.token(), "upgrade");
    }
}
