use chrono::{Datelike, NaiveDate};

use crate::config::Pricing;
use crate::locale::MONTHS_ES;
use crate::model::{AddonChoice, Order, OrderDetails, SetupType, SoundOption};
use crate::validate::parse_time_12h;

/// Result of one recomputation pass: the normalized order plus the names of
/// the derived fields that actually changed. An empty `changed` list means
/// the order was already consistent.
#[derive(Debug, Clone)]
pub struct Recompute {
    pub order: Order,
    pub changed: Vec<&'static str>,
}

impl Recompute {
    pub fn is_noop(&self) -> bool {
        self.changed.is_empty()
    }
}

/// Recomputes every derived field from the user-entered ones. Pure and
/// idempotent: the engine only writes fields it owns, writes each at most
/// once per pass, and running it on its own output changes nothing. Numeric
/// parse failures default to zero; the engine never rejects an order.
pub fn recompute(order: &Order, pricing: &Pricing) -> Recompute {
    let mut next = order.clone();
    let mut changed: Vec<&'static str> = Vec::new();

    match &mut next.details {
        OrderDetails::Music(music) => {
            // One-way migration of legacy hyphenated contract numbers
            // ("2025-001" becomes "001"). Music orders only.
            if next.contract_number.contains('-') {
                let migrated = next
                    .contract_number
                    .rsplit('-')
                    .next()
                    .unwrap_or("")
                    .to_string();
                apply(&mut next.contract_number, migrated, "contract_number", &mut changed);
            }

            let surcharge = if music.sound_option == SoundOption::Upgrade {
                pricing.sound_upgrade
            } else {
                0.0
            };
            let balance = derive_balance(
                &next.total_cost,
                surcharge,
                next.deposit_applies,
                pricing.deposit_music_booth,
            );
            apply(&mut next.remaining_balance, balance, "remaining_balance", &mut changed);
        }
        OrderDetails::Booth(booth) => {
            let description = booth_description(
                booth.photo_booth,
                booth.video_360,
                &booth.service_hours,
                booth.speaker_addon,
                booth.early_setup_addon,
                booth.branding_addon,
            );
            apply(
                &mut booth.service_description,
                description,
                "service_description",
                &mut changed,
            );

            let balance = derive_balance(
                &next.total_cost,
                0.0,
                next.deposit_applies,
                pricing.deposit_music_booth,
            );
            apply(&mut next.remaining_balance, balance, "remaining_balance", &mut changed);
        }
        OrderDetails::Dj(dj) => {
            // Keep the split date fields in sync with the composite date.
            if let Ok(date) = NaiveDate::parse_from_str(&dj.event_date_iso, "%Y-%m-%d") {
                apply(&mut next.event_day, date.day().to_string(), "event_day", &mut changed);
                apply(
                    &mut next.event_month,
                    MONTHS_ES[date.month0() as usize].to_string(),
                    "event_month",
                    &mut changed,
                );
                apply(&mut next.event_year, date.year().to_string(), "event_year", &mut changed);
            }

            let duration = duration_text(&dj.start_time, &dj.end_time);
            apply(&mut dj.duration_text, duration, "duration_text", &mut changed);

            let total = parse_money(&next.total_cost);
            let (deposit, balance) = if next.deposit_applies {
                (
                    money(total * pricing.deposit_dj_percent),
                    money(total * (1.0 - pricing.deposit_dj_percent)),
                )
            } else {
                ("0.00".to_string(), money(total))
            };
            apply(&mut dj.deposit_50, deposit, "deposit_50", &mut changed);
            apply(&mut dj.balance_50, balance, "balance_50", &mut changed);

            let package = match dj.setup_type {
                Some(SetupType::Premium) => "Paquete Premium",
                Some(SetupType::Deluxe) => "Paquete Deluxe",
                None => "",
            };
            apply(&mut dj.package_name, package.to_string(), "package_name", &mut changed);
        }
    }

    Recompute { order: next, changed }
}

fn apply(target: &mut String, value: String, name: &'static str, changed: &mut Vec<&'static str>) {
    if *target != value {
        *target = value;
        changed.push(name);
    }
}

pub fn parse_money(value: &str) -> f64 {
    value.trim().parse().unwrap_or(0.0)
}

pub fn money(value: f64) -> String {
    format!("{value:.2}")
}

fn derive_balance(total_cost: &str, surcharge: f64, deposit_applies: bool, deposit: f64) -> String {
    let total = parse_money(total_cost) + surcharge;
    if total <= 0.0 {
        return "0.00".to_string();
    }
    let paid = if deposit_applies { deposit } else { 0.0 };
    money((total - paid).max(0.0))
}

fn booth_description(
    photo_booth: bool,
    video_360: bool,
    service_hours: &str,
    speaker: AddonChoice,
    early_setup: AddonChoice,
    branding: AddonChoice,
) -> String {
    let mut services = Vec::new();
    if photo_booth {
        services.push("PHOTO BOOTH");
    }
    if video_360 {
        services.push("VIDEO BOOTH 360");
    }
    let mut description = services.join(" + ");

    if !description.is_empty() && !service_hours.is_empty() {
        description.push_str(" - ");
        description.push_str(service_hours);
    }

    let mut addons = Vec::new();
    if speaker == AddonChoice::Hire {
        addons.push("Bocina");
    }
    if early_setup == AddonChoice::Hire {
        addons.push("Early Setup");
    }
    if branding == AddonChoice::Hire {
        addons.push("Full Branding");
    }
    if !addons.is_empty() {
        description.push_str(" + ");
        description.push_str(&addons.join(" + "));
    }

    description
}

/// Duration between two 12-hour clock values, in hours with a single
/// decimal and a trailing ".0" stripped. An end at or before the start
/// rolls over to the next day (overnight events).
fn duration_text(start: &str, end: &str) -> String {
    let (Some((start_h, start_m)), Some((end_h, end_m))) =
        (parse_time_12h(start), parse_time_12h(end))
    else {
        return "0 horas".to_string();
    };

    let start_minutes = start_h * 60 + start_m;
    let mut end_minutes = end_h * 60 + end_m;
    if end_minutes <= start_minutes {
        end_minutes += 24 * 60;
    }
    let hours = (end_minutes - start_minutes) as f64 / 60.0;

    let mut text = format!("{hours:.1}");
    if let Some(stripped) = text.strip_suffix(".0") {
        text = stripped.to_string();
    }
    format!("{text} horas")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OrderKind;

    fn pricing() -> Pricing {
        Pricing::default()
    }

    fn recomputed(order: Order) -> Order {
        recompute(&order, &pricing()).order
    }

    #[test]
    fn music_balance_subtracts_the_deposit() {
        let mut order = Order::new(OrderKind::Music);
        order.total_cost = "500.00".to_string();
        let order = recomputed(order);
        assert_eq!(order.remaining_balance, "375.00");
    }

    #[test]
    fn music_upgrade_adds_the_surcharge_before_the_deposit() {
        let mut order = Order::new(OrderKind::Music);
        order.total_cost = "500.00".to_string();
        if let OrderDetails::Music(music) = &mut order.details {
            music.sound_option = SoundOption::Upgrade;
        }
        let order = recomputed(order);
        assert_eq!(order.remaining_balance, "525.00");
    }

    #[test]
    fn zero_or_unparseable_totals_yield_a_zero_balance() {
        let mut order = Order::new(OrderKind::Music);
        order.total_cost = "not a number".to_string();
        let order = recomputed(order);
        assert_eq!(order.remaining_balance, "0.00");

        let mut order = Order::new(OrderKind::Booth);
        order.total_cost = "0.00".to_string();
        let order = recomputed(order);
        assert_eq!(order.remaining_balance, "0.00");
    }

    #[test]
    fn balance_never_goes_negative() {
        let mut order = Order::new(OrderKind::Booth);
        order.total_cost = "100.00".to_string();
        let order = recomputed(order);
        // 100 - 125 clamps to zero.
        assert_eq!(order.remaining_balance, "0.00");
    }

    #[test]
    fn recompute_is_idempotent() {
        let mut order = Order::new(OrderKind::Music);
        order.total_cost = "842.50".to_string();
        order.contract_number = "2025-017".to_string();
        let first = recompute(&order, &pricing());
        assert!(!first.is_noop());
        let second = recompute(&first.order, &pricing());
        assert!(second.is_noop(), "second pass changed: {:?}", second.changed);
        assert_eq!(first.order, second.order);
    }

    #[test]
    fn booth_description_round_trip() {
        let mut order = Order::new(OrderKind::Booth);
        if let OrderDetails::Booth(booth) = &mut order.details {
            booth.photo_booth = true;
            booth.video_360 = true;
            booth.service_hours = "2 horas".to_string();
            booth.speaker_addon = AddonChoice::Hire;
        }
        let order = recomputed(order);
        assert_eq!(
            order.booth().unwrap().service_description,
            "PHOTO BOOTH + VIDEO BOOTH 360 - 2 horas + Bocina"
        );
    }

    #[test]
    fn booth_description_empty_when_nothing_selected() {
        let order = recomputed(Order::new(OrderKind::Booth));
        assert_eq!(order.booth().unwrap().service_description, "");
    }

    #[test]
    fn booth_hours_are_skipped_without_a_service() {
        let mut order = Order::new(OrderKind::Booth);
        if let OrderDetails::Booth(booth) = &mut order.details {
            booth.photo_booth = true;
            booth.service_hours = String::new();
        }
        let order = recomputed(order);
        assert_eq!(order.booth().unwrap().service_description, "PHOTO BOOTH");
    }

    #[test]
    fn dj_split_follows_the_deposit_toggle() {
        let mut order = Order::new(OrderKind::Dj);
        order.total_cost = "1000.00".to_string();
        order.deposit_applies = true;
        let order = recomputed(order);
        let dj = order.dj().unwrap();
        assert_eq!(dj.deposit_50, "500.00");
        assert_eq!(dj.balance_50, "500.00");

        let mut order = order;
        order.deposit_applies = false;
        let order = recomputed(order);
        let dj = order.dj().unwrap();
        assert_eq!(dj.deposit_50, "0.00");
        assert_eq!(dj.balance_50, "1000.00");
    }

    #[test]
    fn dj_duration_handles_overnight_events() {
        assert_eq!(duration_text("10:00 PM", "2:00 AM"), "4 horas");
        assert_eq!(duration_text("9:00 PM", "1:30 AM"), "4.5 horas");
        assert_eq!(duration_text("6:00 PM", "6:00 PM"), "24 horas");
        assert_eq!(duration_text("", "2:00 AM"), "0 horas");
        assert_eq!(duration_text("nope", "2:00 AM"), "0 horas");
    }

    #[test]
    fn dj_duration_is_non_negative_for_all_pairs() {
        let times = ["12:00 AM", "6:15 AM", "12:00 PM", "5:45 PM", "11:30 PM"];
        for start in times {
            for end in times {
                let text = duration_text(start, end);
                let hours: f64 = text.trim_end_matches(" horas").parse().unwrap();
                assert!(hours > 0.0, "{start} -> {end} gave {text}");
            }
        }
    }

    #[test]
    fn dj_package_name_follows_setup_type() {
        let mut order = Order::new(OrderKind::Dj);
        if let OrderDetails::Dj(dj) = &mut order.details {
            dj.setup_type = Some(SetupType::Premium);
        }
        let order = recomputed(order);
        assert_eq!(order.dj().unwrap().package_name, "Paquete Premium");

        let mut order = order;
        if let OrderDetails::Dj(dj) = &mut order.details {
            dj.setup_type = None;
        }
        let order = recomputed(order);
        assert_eq!(order.dj().unwrap().package_name, "");
    }

    #[test]
    fn dj_date_parts_sync_from_the_composite_date() {
        let mut order = Order::new(OrderKind::Dj);
        if let OrderDetails::Dj(dj) = &mut order.details {
            dj.event_date_iso = "2026-06-05".to_string();
        }
        let order = recomputed(order);
        assert_eq!(order.event_day, "5");
        assert_eq!(order.event_month, "junio");
        assert_eq!(order.event_year, "2026");
    }

    #[test]
    fn contract_number_migration_is_music_only() {
        let mut order = Order::new(OrderKind::Music);
        order.contract_number = "2025-001".to_string();
        let order = recomputed(order);
        assert_eq!(order.contract_number, "001");

        let mut order = Order::new(OrderKind::Booth);
        order.contract_number = "2025-001".to_string();
        let order = recomputed(order);
        assert_eq!(order.contract_number, "2025-001");
    }

    #[test]
    fn changed_list_names_only_what_moved() {
        let mut order = Order::new(OrderKind::Music);
        order.total_cost = "300.00".to_string();
        let result = recompute(&order, &pricing());
        assert_eq!(result.changed, vec!["remaining_balance"]);
    }

    #[test]
    fn alternate_pricing_flows_through() {
        let custom = Pricing {
            deposit_music_booth: 200.0,
            sound_upgrade: 300.0,
            ..Pricing::default()
        };
        let mut order = Order::new(OrderKind::Music);
        order.total_cost = "500.00".to_string();
        if let OrderDetails::Music(music) = &mut order.details {
            music.sound_option = SoundOption::Upgrade;
        }
        let result = recompute(&order, &custom);
        assert_eq!(result.order.remaining_balance, "600.00");
    }
}
