use std::collections::BTreeMap;

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;

use crate::locale::{catalog, month_number};
use crate::model::{Order, OrderDetails};

/// The business operates on Atlantic Standard Time (UTC-4, no daylight
/// saving). Every "is this in the future" check uses this clock, not the
/// machine's local timezone.
const BUSINESS_UTC_OFFSET_HOURS: i32 = -4;

pub fn business_now() -> NaiveDateTime {
    let offset = FixedOffset::east_opt(BUSINESS_UTC_OFFSET_HOURS * 3600).unwrap();
    Utc::now().with_timezone(&offset).naive_local()
}

fn phone_regex() -> Regex {
    Regex::new(r"^\+?1?\D?(\d{3})\D?(\d{3})\D?(\d{4})$").unwrap()
}

/// PR/USA phone shapes: 10 digits with optional `+1` and punctuation.
pub fn is_valid_phone(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && phone_regex().is_match(trimmed)
}

/// Canonical E.164 form (`+1XXXXXXXXXX`), or the empty string when the
/// input is not a valid phone.
pub fn normalize_phone(value: &str) -> String {
    let trimmed = value.trim();
    match phone_regex().captures(trimmed) {
        Some(caps) => format!("+1{}{}{}", &caps[1], &caps[2], &caps[3]),
        None => String::new(),
    }
}

pub fn is_valid_email(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return false;
    }
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]{2,}$").unwrap().is_match(trimmed)
}

/// `YYYY-MM-DD`, on or after today in the business timezone.
pub fn is_valid_date(value: &str) -> bool {
    is_valid_date_at(value, business_now())
}

fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    if !Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap().is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

fn is_valid_date_at(value: &str, now: NaiveDateTime) -> bool {
    match parse_iso_date(value) {
        Some(date) => date >= now.date(),
        None => false,
    }
}

/// `H:MM AM|PM` with minutes on the quarter hour. Returns 24-hour parts.
pub fn parse_time_12h(value: &str) -> Option<(u32, u32)> {
    let caps = Regex::new(r"(\d+):(\d+)\s(AM|PM)").unwrap().captures(value)?;
    let mut hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = caps[2].parse().ok()?;
    if hour > 12 || minute > 59 {
        return None;
    }
    match &caps[3] {
        "PM" if hour != 12 => hour += 12,
        "AM" if hour == 12 => hour = 0,
        _ => {}
    }
    Some((hour, minute))
}

/// A slot is valid when its date is valid and the time parses on a quarter
/// hour. Same-day slots must also still be ahead of the business clock.
pub fn is_valid_time_slot(date_value: &str, time_value: &str) -> bool {
    is_valid_time_slot_at(date_value, time_value, business_now())
}

fn is_valid_time_slot_at(date_value: &str, time_value: &str, now: NaiveDateTime) -> bool {
    if !is_valid_date_at(date_value, now) {
        return false;
    }
    let Some((hour, minute)) = parse_time_12h(time_value) else {
        return false;
    };
    if ![0, 15, 30, 45].contains(&minute) {
        return false;
    }

    let selected = match parse_iso_date(date_value) {
        Some(date) => date,
        None => return false,
    };
    if selected > now.date() {
        return true;
    }
    match selected.and_hms_opt(hour, minute, 0) {
        Some(selected_time) => selected_time > now,
        None => false,
    }
}

/// Rebuilds a `YYYY-MM-DD` date from the split day / month-token / year
/// fields used by music and booth orders.
pub fn composite_event_date(day: &str, month_token: &str, year: &str) -> Option<String> {
    if day.is_empty() || month_token.is_empty() || year.is_empty() {
        return None;
    }
    let month = month_number(month_token)?;
    let day_num: u32 = day.parse().ok()?;
    Some(format!("{year}-{month:02}-{day_num:02}"))
}

/// Field-keyed pre-submission validation. An empty map means the order can
/// be sent. Errors never touch the order itself.
pub fn validate_order(order: &Order) -> BTreeMap<&'static str, String> {
    validate_order_at(order, business_now())
}

fn require(
    errors: &mut BTreeMap<&'static str, String>,
    field: &'static str,
    value: &str,
    message: &str,
) {
    if value.trim().is_empty() {
        errors.insert(field, message.to_string());
    }
}

fn validate_order_at(order: &Order, now: NaiveDateTime) -> BTreeMap<&'static str, String> {
    let t = &catalog(order.locale).form;
    let mut errors: BTreeMap<&'static str, String> = BTreeMap::new();

    require(&mut errors, "client_name", &order.client_name, t.err_required);
    require(&mut errors, "activity_type", &order.activity_type, t.err_required);
    require(&mut errors, "contract_number", &order.contract_number, t.err_required);
    if !is_valid_email(&order.client_email) {
        errors.insert("client_email", t.err_email.to_string());
    }
    if !is_valid_phone(&order.client_phone) {
        errors.insert("client_phone", t.err_phone.to_string());
    }

    match &order.details {
        OrderDetails::Music(music) => {
            require(&mut errors, "address", &order.address, t.err_required);
            require(
                &mut errors,
                "service_description",
                &music.service_description,
                t.err_required,
            );
            let composite =
                composite_event_date(&order.event_day, &order.event_month, &order.event_year)
                    .unwrap_or_default();
            if !is_valid_date_at(&composite, now) {
                errors.insert("event_date", t.err_date_past.to_string());
            } else if !is_valid_time_slot_at(&composite, &music.service_time, now) {
                errors.insert("service_time", t.err_time_slot.to_string());
            }
        }
        OrderDetails::Booth(booth) => {
            require(&mut errors, "address", &order.address, t.err_required);
            if !booth.photo_booth && !booth.video_360 {
                errors.insert("booth_service", t.err_booth_service.to_string());
            }
            let composite =
                composite_event_date(&order.event_day, &order.event_month, &order.event_year)
                    .unwrap_or_default();
            if !is_valid_date_at(&composite, now) {
                errors.insert("event_date", t.err_date_past.to_string());
            } else if !is_valid_time_slot_at(&composite, &booth.service_time, now) {
                errors.insert("service_time", t.err_time_slot.to_string());
            }
        }
        OrderDetails::Dj(dj) => {
            require(&mut errors, "venue_name", &dj.venue_name, t.err_required);
            require(&mut errors, "address", &order.address, t.err_required);
            if dj.setup_type.is_none() {
                errors.insert("setup_type", t.err_required.to_string());
            }
            if !is_valid_date_at(&dj.event_date_iso, now) {
                errors.insert("event_date", t.err_date_past.to_string());
            } else {
                if !is_valid_time_slot_at(&dj.event_date_iso, &dj.start_time, now) {
                    errors.insert("start_time", t.err_time_slot.to_string());
                }
                if !is_valid_time_slot_at(&dj.event_date_iso, &dj.end_time, now) {
                    errors.insert("end_time", t.err_time_slot.to_string());
                }
            }
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OrderKind;

    fn noon(date: &str) -> NaiveDateTime {
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn phone_accepts_pr_usa_shapes() {
        assert!(is_valid_phone("7875551234"));
        assert!(is_valid_phone("+1 787 555 1234"));
        assert!(is_valid_phone("787-555-1234"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone(""));
    }

    #[test]
    fn phone_normalizes_to_e164() {
        assert_eq!(normalize_phone("787-555-1234"), "+17875551234");
        assert_eq!(normalize_phone("+1 787 555 1234"), "+17875551234");
        assert_eq!(normalize_phone("12345"), "");
    }

    #[test]
    fn email_requires_domain_and_tld() {
        assert!(is_valid_email("test@example.com"));
        assert!(!is_valid_email("test@example"));
        assert!(!is_valid_email("test example@x.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn date_validity_is_day_granular() {
        assert!(is_valid_date("2099-01-01"));
        assert!(!is_valid_date("1999-01-01"));
        assert!(!is_valid_date("not-a-date"));
        // Same day still counts.
        assert!(is_valid_date_at("2026-03-10", noon("2026-03-10")));
        assert!(!is_valid_date_at("2026-03-09", noon("2026-03-10")));
    }

    #[test]
    fn time_slots_require_quarter_hours() {
        let now = noon("2026-03-10");
        assert!(is_valid_time_slot_at("2026-03-11", "9:15 AM", now));
        assert!(!is_valid_time_slot_at("2026-03-11", "9:10 AM", now));
        assert!(!is_valid_time_slot_at("2026-03-11", "half past", now));
    }

    #[test]
    fn same_day_slots_must_be_in_the_future() {
        let now = noon("2026-03-10");
        assert!(is_valid_time_slot_at("2026-03-10", "1:00 PM", now));
        assert!(!is_valid_time_slot_at("2026-03-10", "11:00 AM", now));
        assert!(!is_valid_time_slot_at("2026-03-10", "12:00 PM", now));
    }

    #[test]
    fn twelve_hour_parsing_handles_noon_and_midnight() {
        assert_eq!(parse_time_12h("12:00 PM"), Some((12, 0)));
        assert_eq!(parse_time_12h("12:00 AM"), Some((0, 0)));
        assert_eq!(parse_time_12h("10:45 PM"), Some((22, 45)));
        assert_eq!(parse_time_12h("garbage"), None);
    }

    #[test]
    fn composite_date_uses_month_tokens() {
        assert_eq!(
            composite_event_date("5", "marzo", "2026"),
            Some("2026-03-05".to_string())
        );
        assert_eq!(composite_event_date("5", "smarch", "2026"), None);
        assert_eq!(composite_event_date("", "marzo", "2026"), None);
    }

    #[test]
    fn validate_order_flags_missing_common_fields() {
        let order = Order::new(OrderKind::Music);
        let errors = validate_order_at(&order, noon("2026-03-10"));
        assert!(errors.contains_key("client_name"));
        assert!(errors.contains_key("client_email"));
        assert!(errors.contains_key("client_phone"));
        assert!(errors.contains_key("event_date"));
    }

    #[test]
    fn validate_order_passes_a_complete_music_order() {
        let mut order = Order::new(OrderKind::Music);
        order.client_name = "Juan Pérez".to_string();
        order.client_email = "juan@example.com".to_string();
        order.client_phone = "+17875551234".to_string();
        order.activity_type = "Boda".to_string();
        order.address = "Salón Real, Bayamón".to_string();
        order.event_day = "20".to_string();
        order.event_month = "junio".to_string();
        order.event_year = "2026".to_string();
        if let OrderDetails::Music(music) = &mut order.details {
            music.service_description = "Trío en vivo".to_string();
            music.service_time = "6:00 PM".to_string();
        }
        let errors = validate_order_at(&order, noon("2026-03-10"));
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn validate_order_requires_a_booth_service() {
        let mut order = Order::new(OrderKind::Booth);
        order.client_name = "Ana".to_string();
        let errors = validate_order_at(&order, noon("2026-03-10"));
        assert!(errors.contains_key("booth_service"));
    }
}
