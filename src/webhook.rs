use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Settings;
use crate::engine::{money, parse_money};
use crate::locale::{Locale, format_event_date, format_long_date};
use crate::model::{
    AddonChoice, BoothDetails, BoothLocation, DjDetails, Electrical, GeneratedLinks, MusicDetails,
    Order, OrderDetails, SetupType,
};
use crate::validate::parse_time_12h;

/// Network or endpoint failure, already aggregated into one user-facing
/// message. Submissions are never retried automatically; re-running the
/// command retries.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{0}")]
    Failed(String),
}

const BLANK_FIELD: &str = "___________________";

fn locale_token(locale: Locale) -> &'static str {
    match locale {
        Locale::Es => "es",
        Locale::En => "en",
    }
}

fn mark(selected: bool) -> String {
    if selected { "X".to_string() } else { String::new() }
}

fn or_blank(value: &str) -> String {
    if value.is_empty() { BLANK_FIELD.to_string() } else { value.to_string() }
}

/// Booth crews arrive two hours before the service starts.
fn setup_time(service_time: &str) -> String {
    if service_time.is_empty() {
        return "---".to_string();
    }
    let Some((hour, minute)) = parse_time_12h(service_time) else {
        return "Hora invalida".to_string();
    };
    let total = (hour * 60 + minute + 22 * 60) % (24 * 60);
    let hour24 = total / 60;
    let period = if hour24 >= 12 { "PM" } else { "AM" };
    let hour12 = match hour24 % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", hour12, total % 60, period)
}

#[derive(Debug, Serialize)]
struct MusicPayload {
    contract_type: &'static str,
    nombre_cliente: String,
    email_cliente: String,
    telefono_cliente: String,
    dia_evento: String,
    mes_evento: String,
    ano_evento: String,
    direccion_evento: String,
    tipo_actividad: String,
    hora_servicio: String,
    notas_contrato: String,
    notas_factura: String,
    total_servicios: String,
    balance_restante: String,
    aplica_deposito: bool,
    idioma: &'static str,
    numero_contrato: String,
    ano_contrato: String,
    servicio_contratado: String,
    opcion_sonido: &'static str,
    cantidad_estacionamientos: String,
}

fn music_payload(order: &Order, music: &MusicDetails, today: NaiveDate) -> MusicPayload {
    use chrono::Datelike;
    MusicPayload {
        contract_type: "music",
        nombre_cliente: order.client_name.clone(),
        email_cliente: order.client_email.clone(),
        telefono_cliente: order.client_phone.clone(),
        dia_evento: order.event_day.clone(),
        mes_evento: order.event_month.clone(),
        ano_evento: order.event_year.clone(),
        direccion_evento: order.address.clone(),
        tipo_actividad: order.activity_type.clone(),
        hora_servicio: music.service_time.clone(),
        notas_contrato: order.notes.clone(),
        notas_factura: order.invoice_notes.clone(),
        total_servicios: money(parse_money(&order.total_cost)),
        balance_restante: money(parse_money(&order.remaining_balance)),
        aplica_deposito: order.deposit_applies,
        idioma: locale_token(order.locale),
        numero_contrato: order.contract_number.clone(),
        ano_contrato: today.year().to_string(),
        servicio_contratado: music.service_description.clone(),
        opcion_sonido: music.sound_option.token(),
        cantidad_estacionamientos: order.parking_spaces.clone(),
    }
}

#[derive(Debug, Serialize)]
struct BoothPayload {
    ano_contrato: String,
    numero_contrato: String,
    fecha_emision: String,
    fecha_evento: String,
    nombre_cliente: String,
    email_cliente: String,
    telefono_cliente: String,
    dia_evento: String,
    mes_evento: String,
    ano_evento: String,
    servicio_contratado: String,
    hora_montaje: String,
    hora_servicio: String,
    duracion_servicio: String,
    servicio_photo_booth: String,
    servicio_video_booth_360: String,
    bocina_photo: String,
    early_setup_video: String,
    branding_photo: String,
    ubicacion_interior: String,
    ubicacion_exterior: String,
    direccion_evento: String,
    tipo_actividad: String,
    cantidad_estacionamientos: String,
    total_servicios: String,
    balance_restante: String,
    notas_contrato: String,
    notas_factura: String,
    aplica_deposito: bool,
    idioma: &'static str,
}

fn booth_payload(order: &Order, booth: &BoothDetails, today: NaiveDate) -> BoothPayload {
    use chrono::Datelike;
    BoothPayload {
        ano_contrato: today.year().to_string(),
        numero_contrato: order.contract_number.clone(),
        fecha_emision: today.format("%-d/%-m/%Y").to_string(),
        fecha_evento: format_event_date(
            order.locale,
            &order.event_day,
            &order.event_month,
            &order.event_year,
        ),
        nombre_cliente: order.client_name.clone(),
        email_cliente: order.client_email.clone(),
        telefono_cliente: order.client_phone.clone(),
        dia_evento: order.event_day.clone(),
        mes_evento: order.event_month.clone(),
        ano_evento: order.event_year.clone(),
        servicio_contratado: booth.service_description.clone(),
        hora_montaje: setup_time(&booth.service_time),
        hora_servicio: booth.service_time.clone(),
        duracion_servicio: booth.service_hours.clone(),
        servicio_photo_booth: mark(booth.photo_booth),
        servicio_video_booth_360: mark(booth.video_360),
        bocina_photo: mark(booth.speaker_addon == AddonChoice::Hire),
        early_setup_video: mark(booth.early_setup_addon == AddonChoice::Hire),
        branding_photo: mark(booth.branding_addon == AddonChoice::Hire),
        ubicacion_interior: mark(booth.location == Some(BoothLocation::Indoor)),
        ubicacion_exterior: mark(booth.location == Some(BoothLocation::Outdoor)),
        direccion_evento: order.address.clone(),
        tipo_actividad: order.activity_type.clone(),
        cantidad_estacionamientos: order.parking_spaces.clone(),
        total_servicios: money(parse_money(&order.total_cost)),
        balance_restante: money(parse_money(&order.remaining_balance)),
        notas_contrato: order.notes.clone(),
        notas_factura: order.invoice_notes.clone(),
        aplica_deposito: order.deposit_applies,
        idioma: locale_token(order.locale),
    }
}

#[derive(Debug, Serialize)]
struct DjPlaceholders {
    ano_contrato: String,
    numero_contrato: String,
    fecha_contrato: String,
    nombre_cliente: String,
    telefono_cliente: String,
    tipo_evento: String,
    fecha_evento: String,
    dia_evento: String,
    mes_evento: String,
    ano_evento: String,
    hora_inicio: String,
    hora_fin: String,
    duracion_total: String,
    numero_invitados: String,
    venue_nombre: String,
    venue_direccion: String,
    piso_evento: String,
    contacto_venue: String,
    telefono_venue: String,
    restricciones_horario: String,
    montaje_premium: String,
    montaje_deluxe: String,
    electrico_110v: String,
    electrico_240v: String,
    tipo_superficie: String,
    carpa_cliente: String,
    estructura_permanente: String,
    sin_proteccion: String,
    area_nivelada: String,
    acceso_vehiculos: String,
    nombre_paquete: String,
    color_setup: String,
    cantidad_estacionamientos: String,
    aplica_deposito: bool,
    honorarios_total: String,
    deposito_50: String,
    balance_50: String,
    notas_factura: String,
    notas_adicionales_contrato: String,
}

#[derive(Debug, Serialize)]
struct DjPayload {
    formulario: &'static str,
    idioma: &'static str,
    placeholders: DjPlaceholders,
}

fn dj_payload(order: &Order, dj: &DjDetails, today: NaiveDate) -> DjPayload {
    use chrono::Datelike;
    let color = match dj.setup_color {
        Some(crate::model::SetupColor::Black) => "black",
        Some(crate::model::SetupColor::White) => "white",
        None => "",
    };
    DjPayload {
        formulario: "contrato_dj",
        idioma: locale_token(order.locale),
        placeholders: DjPlaceholders {
            ano_contrato: today.year().to_string(),
            numero_contrato: order.contract_number.clone(),
            fecha_contrato: format_long_date(order.locale, today),
            nombre_cliente: order.client_name.clone(),
            telefono_cliente: order.client_phone.clone(),
            tipo_evento: order.activity_type.clone(),
            fecha_evento: format_event_date(
                order.locale,
                &order.event_day,
                &order.event_month,
                &order.event_year,
            ),
            dia_evento: order.event_day.clone(),
            mes_evento: order.event_month.clone(),
            ano_evento: order.event_year.clone(),
            hora_inicio: dj.start_time.clone(),
            hora_fin: dj.end_time.clone(),
            duracion_total: dj.duration_text.clone(),
            numero_invitados: dj.guest_count.clone(),
            venue_nombre: dj.venue_name.clone(),
            venue_direccion: order.address.clone(),
            piso_evento: or_blank(&dj.venue_floor),
            contacto_venue: or_blank(&dj.venue_contact),
            telefono_venue: or_blank(&dj.venue_phone),
            restricciones_horario: or_blank(&dj.schedule_restrictions),
            montaje_premium: mark(dj.setup_type == Some(SetupType::Premium)),
            montaje_deluxe: mark(dj.setup_type == Some(SetupType::Deluxe)),
            electrico_110v: mark(dj.electrical == Some(Electrical::V110)),
            electrico_240v: mark(dj.electrical == Some(Electrical::V240)),
            tipo_superficie: if dj.outdoor { dj.surface_type.clone() } else { String::new() },
            carpa_cliente: mark(dj.outdoor && dj.protection.client_tent),
            estructura_permanente: mark(dj.outdoor && dj.protection.permanent_structure),
            sin_proteccion: mark(dj.outdoor && dj.protection.no_protection),
            area_nivelada: mark(dj.outdoor && dj.protection.level_area),
            acceso_vehiculos: mark(dj.outdoor && dj.protection.vehicle_access),
            nombre_paquete: dj.package_name.clone(),
            color_setup: color.to_string(),
            cantidad_estacionamientos: order.parking_spaces.clone(),
            aplica_deposito: order.deposit_applies,
            honorarios_total: money(parse_money(&order.total_cost)),
            deposito_50: dj.deposit_50.clone(),
            balance_50: dj.balance_50.clone(),
            notas_factura: order.invoice_notes.clone(),
            notas_adicionales_contrato: order.notes.clone(),
        },
    }
}

/// Flattened payload in the workflow's vocabulary for any kind of order.
pub fn payload_json(order: &Order, today: NaiveDate) -> serde_json::Value {
    match &order.details {
        OrderDetails::Music(music) => {
            serde_json::to_value(music_payload(order, music, today)).unwrap_or_default()
        }
        OrderDetails::Booth(booth) => {
            serde_json::to_value(booth_payload(order, booth, today)).unwrap_or_default()
        }
        OrderDetails::Dj(dj) => {
            serde_json::to_value(dj_payload(order, dj, today)).unwrap_or_default()
        }
    }
}

#[derive(Debug, Deserialize)]
struct WebhookResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    doc_url: Option<String>,
    #[serde(default)]
    pdf_url: Option<String>,
    #[serde(default)]
    pdf_download_url: Option<String>,
    #[serde(default)]
    file_name: Option<String>,
}

/// Posts a fully-derived, validated order to the configured workflow
/// endpoint and returns the generated document links.
pub fn submit(
    order: &Order,
    settings: &Settings,
    today: NaiveDate,
) -> Result<GeneratedLinks, TransportError> {
    let url = match order.kind() {
        crate::model::OrderKind::Music => &settings.webhook_music,
        crate::model::OrderKind::Booth => &settings.webhook_booth,
        crate::model::OrderKind::Dj => &settings.webhook_dj,
    };
    if url.is_empty() {
        return Err(TransportError::Failed(format!(
            "No webhook configured for {} contracts. Run `contract-maker config` first.",
            order.kind()
        )));
    }

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| TransportError::Failed(format!("HTTP client error: {e}")))?;

    let response = client
        .post(url)
        .json(&payload_json(order, today))
        .send()
        .map_err(|e| TransportError::Failed(format!("Request failed: {e}")))?;

    let status = response.status();
    let body = response
        .text()
        .map_err(|e| TransportError::Failed(format!("Unreadable response: {e}")))?;

    if !status.is_success() {
        return Err(TransportError::Failed(format!(
            "Server error {status}. Response: {body}"
        )));
    }

    let parsed: WebhookResponse = serde_json::from_str(&body).map_err(|_| {
        TransportError::Failed(format!("The webhook response is not valid JSON: \"{body}\""))
    })?;

    match (parsed.success, parsed.doc_url) {
        (true, Some(doc_url)) => Ok(GeneratedLinks {
            doc_url,
            pdf_url: parsed.pdf_url.unwrap_or_default(),
            pdf_download_url: parsed.pdf_download_url.unwrap_or_default(),
            file_name: parsed.file_name,
        }),
        _ => Err(TransportError::Failed(parsed.message.unwrap_or_else(|| {
            "The webhook response was not successful or carried no links.".to_string()
        }))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Pricing;
    use crate::engine::recompute;
    use crate::model::{OrderKind, SoundOption};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    #[test]
    fn setup_time_is_two_hours_before_service() {
        assert_eq!(setup_time("6:00 PM"), "4:00 PM");
        assert_eq!(setup_time("1:00 AM"), "11:00 PM");
        assert_eq!(setup_time("1:30 PM"), "11:30 AM");
        assert_eq!(setup_time(""), "---");
        assert_eq!(setup_time("soon"), "Hora invalida");
    }

    #[test]
    fn music_payload_speaks_the_business_vocabulary() {
        let mut order = Order::new(OrderKind::Music);
        order.client_name = "Juan".to_string();
        order.total_cost = "500.00".to_string();
        if let OrderDetails::Music(music) = &mut order.details {
            music.sound_option = SoundOption::Upgrade;
            music.service_time = "6:00 PM".to_string();
        }
        let order = recompute(&order, &Pricing::default()).order;

        let json = payload_json(&order, today());
        assert_eq!(json["contract_type"], "music");
        assert_eq!(json["nombre_cliente"], "Juan");
        assert_eq!(json["opcion_sonido"], "upgrade");
        assert_eq!(json["total_servicios"], "500.00");
        assert_eq!(json["balance_restante"], "525.00");
        assert_eq!(json["ano_contrato"], "2026");
    }

    #[test]
    fn booth_payload_uses_x_markers_and_setup_time() {
        let mut order = Order::new(OrderKind::Booth);
        if let OrderDetails::Booth(booth) = &mut order.details {
            booth.photo_booth = true;
            booth.speaker_addon = AddonChoice::Hire;
            booth.location = Some(BoothLocation::Indoor);
            booth.service_time = "6:00 PM".to_string();
        }
        let order = recompute(&order, &Pricing::default()).order;

        let json = payload_json(&order, today());
        assert_eq!(json["servicio_photo_booth"], "X");
        assert_eq!(json["servicio_video_booth_360"], "");
        assert_eq!(json["bocina_photo"], "X");
        assert_eq!(json["ubicacion_interior"], "X");
        assert_eq!(json["ubicacion_exterior"], "");
        assert_eq!(json["hora_montaje"], "4:00 PM");
        assert_eq!(json["fecha_emision"], "10/3/2026");
    }

    #[test]
    fn dj_payload_nests_placeholders_and_gates_outdoor_fields() {
        let mut order = Order::new(OrderKind::Dj);
        order.total_cost = "1000.00".to_string();
        if let OrderDetails::Dj(dj) = &mut order.details {
            dj.setup_type = Some(SetupType::Premium);
            dj.surface_type = "césped".to_string();
            dj.protection.client_tent = true;
            dj.outdoor = false;
        }
        let order = recompute(&order, &Pricing::default()).order;

        let json = payload_json(&order, today());
        assert_eq!(json["formulario"], "contrato_dj");
        let p = &json["placeholders"];
        assert_eq!(p["montaje_premium"], "X");
        assert_eq!(p["montaje_deluxe"], "");
        assert_eq!(p["nombre_paquete"], "Paquete Premium");
        assert_eq!(p["deposito_50"], "500.00");
        assert_eq!(p["balance_50"], "500.00");
        // Indoor events never report surface or protection details.
        assert_eq!(p["tipo_superficie"], "");
        assert_eq!(p["carpa_cliente"], "");
        // Optional venue fields fall back to fill-in blanks.
        assert_eq!(p["piso_evento"], BLANK_FIELD);
    }

    #[test]
    fn submit_without_a_configured_webhook_fails_fast() {
        let order = Order::new(OrderKind::Music);
        let settings = Settings {
            data_root: String::new(),
            webhook_music: String::new(),
            webhook_booth: String::new(),
            webhook_dj: String::new(),
            ai_endpoint: String::new(),
        };
        let err = submit(&order, &settings, today()).unwrap_err();
        assert!(err.to_string().contains("No webhook configured"));
    }
}
