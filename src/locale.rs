use serde::{Deserialize, Serialize};

/// The two supported contract languages. Locale only affects rendering:
/// stored order data stays canonical (Spanish month tokens, option tokens).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Es,
    En,
}

pub const MONTHS_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

const MONTHS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// 1-based month for a canonical Spanish token.
pub fn month_number(token: &str) -> Option<u32> {
    let lowered = token.to_lowercase();
    MONTHS_ES
        .iter()
        .position(|m| *m == lowered)
        .map(|i| (i + 1) as u32)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn day_suffix_en(day: u32) -> &'static str {
    match day {
        1 | 21 | 31 => "st",
        2 | 22 => "nd",
        3 | 23 => "rd",
        _ => "th",
    }
}

/// Long-form localized event date from the split day / month-token / year
/// fields. Incomplete input renders the locale's placeholder pattern.
pub fn format_event_date(locale: Locale, day: &str, month_token: &str, year: &str) -> String {
    if day.is_empty() || month_token.is_empty() || year.is_empty() {
        return match locale {
            Locale::Es => "DD de Mes de AAAA".to_string(),
            Locale::En => "Month DDth, YYYY".to_string(),
        };
    }
    match locale {
        Locale::Es => format!("{} de {} del {}", day, capitalize(month_token), year),
        Locale::En => {
            let month = month_number(month_token)
                .map(|m| MONTHS_EN[(m - 1) as usize])
                .unwrap_or("Month");
            match day.parse::<u32>() {
                Ok(d) => format!("{} {}{}, {}", month, d, day_suffix_en(d), year),
                Err(_) => format!("{month} DD, {year}"),
            }
        }
    }
}

/// Localized long date for issue-date lines ("6 de agosto de 2026").
pub fn format_long_date(locale: Locale, date: chrono::NaiveDate) -> String {
    use chrono::Datelike;
    let month0 = date.month0() as usize;
    match locale {
        Locale::Es => format!("{} de {} de {}", date.day(), MONTHS_ES[month0], date.year()),
        Locale::En => format!("{} {}, {}", MONTHS_EN[month0], date.day(), date.year()),
    }
}

pub struct FormStrings {
    pub language_title: &'static str,
    pub client_info_title: &'static str,
    pub client_name: &'static str,
    pub client_name_placeholder: &'static str,
    pub contract_number: &'static str,
    pub email: &'static str,
    pub phone: &'static str,
    pub event_details_title: &'static str,
    pub activity_type: &'static str,
    pub activity_type_placeholder: &'static str,
    pub service_time: &'static str,
    pub day: &'static str,
    pub month: &'static str,
    pub year: &'static str,
    pub event_address: &'static str,
    pub service_details_title: &'static str,
    pub parking_spaces: &'static str,
    pub service_description: &'static str,
    pub contract_notes: &'static str,
    pub invoice_notes: &'static str,
    pub financial_title: &'static str,
    pub total_cost: &'static str,
    pub remaining_balance: &'static str,
    pub deposit_checkbox: &'static str,
    pub sound_title: &'static str,
    pub sound_pending: &'static str,
    pub sound_client: &'static str,
    pub sound_basic: &'static str,
    pub sound_upgrade: &'static str,
    pub booth_service_title: &'static str,
    pub photo_booth_label: &'static str,
    pub video_360_label: &'static str,
    pub addon_speaker: &'static str,
    pub addon_early_setup: &'static str,
    pub addon_branding: &'static str,
    pub addon_hire: &'static str,
    pub addon_no_hire: &'static str,
    pub addon_pending: &'static str,
    pub event_location: &'static str,
    pub location_indoor: &'static str,
    pub location_outdoor: &'static str,
    pub service_hours: &'static str,
    pub event_date: &'static str,
    pub start_time: &'static str,
    pub end_time: &'static str,
    pub total_duration: &'static str,
    pub guest_count: &'static str,
    pub venue_name: &'static str,
    pub venue_info_title: &'static str,
    pub event_floor: &'static str,
    pub venue_contact: &'static str,
    pub venue_phone: &'static str,
    pub setup_restrictions: &'static str,
    pub setup_type: &'static str,
    pub setup_premium: &'static str,
    pub setup_deluxe: &'static str,
    pub electrical: &'static str,
    pub is_outdoor: &'static str,
    pub yes: &'static str,
    pub no: &'static str,
    pub surface_type: &'static str,
    pub protection_title: &'static str,
    pub protection_tent: &'static str,
    pub protection_structure: &'static str,
    pub protection_none: &'static str,
    pub protection_level_area: &'static str,
    pub protection_vehicle_access: &'static str,
    pub setup_color: &'static str,
    pub color_black: &'static str,
    pub color_white: &'static str,
    pub err_required: &'static str,
    pub err_email: &'static str,
    pub err_phone: &'static str,
    pub err_date_past: &'static str,
    pub err_time_slot: &'static str,
    pub err_booth_service: &'static str,
}

pub struct DocStrings {
    pub contract_title: &'static str,
    pub client_name_placeholder: &'static str,
    pub intro1: &'static str,
    pub intro2: &'static str,
    pub not_provided: &'static str,
    pub phone: &'static str,
    pub no_notes: &'static str,

    pub deposit_title: &'static str,
    pub deposit_p1_with: &'static str,
    pub deposit_p2_with: &'static str,
    pub deposit_p3_with: &'static str,
    pub deposit_b1_with: &'static str,
    pub deposit_b2_with: &'static str,
    pub deposit_p4_with: &'static str,
    pub deposit_p1_no: &'static str,
    pub deposit_p2_no: &'static str,
    pub deposit_p3_no: &'static str,
    pub deposit_b1_no: &'static str,
    pub deposit_b2_no: &'static str,
    pub deposit_p4_no: &'static str,

    pub punctuality_title: &'static str,
    pub punctuality_p1: &'static str,
    pub punctuality_p2: &'static str,

    pub sound_title: &'static str,
    pub sound_opt_client: &'static str,
    pub sound_opt_basic: &'static str,
    pub sound_opt_upgrade: &'static str,
    pub sound_pending_p1: &'static str,
    pub sound_pending_b1: &'static str,
    pub sound_pending_b2: &'static str,
    pub sound_pending_b3: &'static str,
    pub sound_p2: &'static str,

    pub access_title: &'static str,
    pub access_p1_1: &'static str,
    pub access_p1_2: &'static str,

    pub reschedule_title: &'static str,
    pub reschedule_p1: &'static str,
    pub reschedule_p2: &'static str,

    pub staff_images_title: &'static str,
    pub staff_images_p1: &'static str,

    pub safety_title: &'static str,
    pub safety_p1: &'static str,

    pub comms_title: &'static str,
    pub comms_provider: &'static str,
    pub comms_client: &'static str,
    pub comms_last: &'static str,

    pub client_content_title: &'static str,
    pub client_content_p1: &'static str,
    pub client_content_p2: &'static str,

    pub liability_title: &'static str,
    pub liability_p1: &'static str,

    pub indemnification_title: &'static str,
    pub indemnification_p1: &'static str,

    pub force_majeure_title: &'static str,
    pub force_majeure_p1: &'static str,

    pub jurisdiction_title: &'static str,
    pub jurisdiction_p1: &'static str,

    pub summary_details_title: &'static str,
    pub summary_service: &'static str,
    pub summary_time: &'static str,
    pub summary_total_cost: &'static str,
    pub summary_balance: &'static str,
    pub summary_address: &'static str,
    pub summary_activity: &'static str,
    pub summary_notes: &'static str,
    pub summary_payment_title: &'static str,
    pub summary_deposit: &'static str,
    pub summary_parking: &'static str,
    pub summary_checks: &'static str,
    pub summary_duration: &'static str,
    pub summary_package: &'static str,
    pub summary_venue: &'static str,
    pub summary_guests: &'static str,

    pub confirmation_title: &'static str,
    pub confirmation_lead: &'static str,

    pub signature_client_prefix: &'static str,
    pub signature_client_suffix: &'static str,
    pub signature_provider: &'static str,

    pub invoice_title: &'static str,
    pub invoice_subtitle_prefix: &'static str,
    pub invoice_bill_to: &'static str,
    pub invoice_from: &'static str,
    pub invoice_number: &'static str,
    pub invoice_issue_date: &'static str,
    pub invoice_event_date: &'static str,
    pub invoice_table_desc: &'static str,
    pub invoice_table_total: &'static str,
    pub invoice_service_desc: &'static str,
    pub invoice_service_desc_placeholder: &'static str,
    pub invoice_sound_upgrade: &'static str,
    pub invoice_subtotal: &'static str,
    pub invoice_deposit_paid: &'static str,
    pub invoice_balance_due: &'static str,
    pub invoice_notes: &'static str,
    pub invoice_notes_placeholder: &'static str,
    pub invoice_thank_you: &'static str,
    pub invoice_footer: &'static str,

    pub parking_suffix: &'static str,
}

impl DocStrings {
    pub fn confirmation(&self, date: &str) -> String {
        format!("{}{}.", self.confirmation_lead, date)
    }

    pub fn signature_client(&self, name: &str) -> String {
        format!(
            "{}{}{}",
            self.signature_client_prefix, name, self.signature_client_suffix
        )
    }

    pub fn invoice_subtitle(&self, number: &str) -> String {
        format!("{}{}", self.invoice_subtitle_prefix, number)
    }
}

/// Pluralized parking phrase ("5 espacios" / "5 spaces").
pub fn parking_phrase(locale: Locale, count: &str) -> String {
    format!("{}{}", count, catalog(locale).doc.parking_suffix)
}

pub struct Catalog {
    pub form: FormStrings,
    pub doc: DocStrings,
}

/// Typed catalog lookup: the closed `Locale` enum guarantees a missing
/// locale or string is a compile-time error, never a runtime gap.
pub fn catalog(locale: Locale) -> &'static Catalog {
    match locale {
        Locale::Es => &ES,
        Locale::En => &EN,
    }
}

static ES: Catalog = Catalog {
    form: FormStrings {
        language_title: "Idioma del Contrato",
        client_info_title: "Información del Cliente",
        client_name: "Nombre Completo",
        client_name_placeholder: "Ej: Juan Pérez",
        contract_number: "No. de Contrato",
        email: "Email",
        phone: "Teléfono",
        event_details_title: "Detalles del Evento",
        activity_type: "Tipo de Actividad",
        activity_type_placeholder: "Boda, Cumpleaños, Corporativo",
        service_time: "Hora del Servicio",
        day: "Día",
        month: "Mes",
        year: "Año",
        event_address: "Dirección del Evento",
        service_details_title: "Detalles del Servicio Contratado",
        parking_spaces: "Espacios de Estacionamiento",
        service_description: "Descripción del Servicio",
        contract_notes: "Notas (Contrato)",
        invoice_notes: "Notas Adicionales para la Factura",
        financial_title: "Información Financiera",
        total_cost: "Costo Total (USD)",
        remaining_balance: "Balance Restante (USD)",
        deposit_checkbox: "Aplica Depósito para reservar",
        sound_title: "Sonido",
        sound_pending: "Pendiente (Cliente decide)",
        sound_client: "Sonido provisto por el cliente",
        sound_basic: "Sonido básico (Incluido)",
        sound_upgrade: "Upgrade a sonido profesional grande (+$150 USD)",
        booth_service_title: "Tipo de Servicio Contratado",
        photo_booth_label: "PHOTO BOOTH - Cabina de fotos digitales",
        video_360_label: "VIDEO BOOTH 360 - Plataforma giratoria",
        addon_speaker: "Bocina para poner música en el área del Booth",
        addon_early_setup: "\"Early Setup\" - Montaje temprano",
        addon_branding: "\"Full Branding\" del Booth con la marca del cliente",
        addon_hire: "Contratar",
        addon_no_hire: "No contratar",
        addon_pending: "Pendiente - Cliente decide",
        event_location: "Ubicación del Evento",
        location_indoor: "Interior",
        location_outdoor: "Exterior",
        service_hours: "Horas de Servicio (Duración)",
        event_date: "Fecha del Evento",
        start_time: "Hora de Inicio",
        end_time: "Hora de Finalización",
        total_duration: "Duración Total",
        guest_count: "Número de Invitados",
        venue_name: "Nombre del Venue",
        venue_info_title: "Información del Venue",
        event_floor: "Piso del Evento",
        venue_contact: "Contacto del Venue",
        venue_phone: "Teléfono de Emergencia del Venue",
        setup_restrictions: "Restricciones de Horario para Montaje",
        setup_type: "Tipo de Montaje Requerido",
        setup_premium: "Paquete Premium (hasta 150 personas)",
        setup_deluxe: "Paquete Deluxe (más de 150 personas)",
        electrical: "Requisitos Eléctricos",
        is_outdoor: "¿El evento es al aire libre?",
        yes: "Sí",
        no: "No",
        surface_type: "Tipo de Superficie",
        protection_title: "Protección Disponible (opcional)",
        protection_tent: "Carpa/toldo proporcionado por cliente",
        protection_structure: "Estructura permanente (gazebo/pérgola)",
        protection_none: "Sin protección (+$150 carpa D Show)",
        protection_level_area: "Área nivelada y con drenaje adecuado",
        protection_vehicle_access: "Acceso para vehículos de instalación",
        setup_color: "Color del Setup",
        color_black: "Negro",
        color_white: "Blanco",
        err_required: "Este campo es requerido.",
        err_email: "Introduce un correo electrónico válido.",
        err_phone: "Introduce un número válido de Puerto Rico/USA (10 dígitos o +1).",
        err_date_past: "La fecha no puede ser en el pasado.",
        err_time_slot: "Selecciona un horario válido en el futuro y en intervalos de 15 minutos.",
        err_booth_service: "Debe seleccionar al menos un Tipo de Servicio.",
    },
    doc: DocStrings {
        contract_title: "CONTRATO DE SERVICIOS",
        client_name_placeholder: "Nombre del Cliente",
        intro1: "Por una parte, ",
        intro2: ", de ahora en adelante denominado \"CLIENTE\", y contratando los servicios de D' Show Events, de ahora en adelante el \"PROVEEDOR\", acuerdan los siguientes términos:",
        not_provided: "No provisto",
        phone: "Teléfono",
        no_notes: "Sin notas adicionales.",

        deposit_title: "DEPÓSITO Y PAGO FINAL",
        deposit_p1_with: "El cliente acuerda realizar un depósito de $125.00 para reservar los servicios de D' Show Events. Este depósito no es reembolsable.",
        deposit_p2_with: "El balance restante se pagará en su totalidad ANTES de comenzar los servicios contratados en la fecha del evento.",
        deposit_p3_with: "En caso de cancelación por parte del cliente, se aplicarán los siguientes cargos:",
        deposit_b1_with: "Menos de 5 días calendario antes del evento: se facturará un 50% del costo total (acreditando el depósito).",
        deposit_b2_with: "48 horas o menos antes del evento: se facturará un 75% del costo total (acreditando el depósito).",
        deposit_p4_with: "Si el proveedor cancela por cualquier razón, se devolverá al cliente el 100% del depósito.",
        deposit_p1_no: "No se requiere depósito para reservar. La firma de este contrato formaliza la reserva de la fecha y los servicios.",
        deposit_p2_no: "El pago del 100% del costo total se realizará en su totalidad ANTES de comenzar los servicios contratados en la fecha del evento.",
        deposit_p3_no: "En caso de cancelación por parte del cliente, se aplicarán los siguientes cargos administrativos:",
        deposit_b1_no: "Menos de 5 días calendario antes del evento: cargo del 50% del costo total.",
        deposit_b2_no: "48 horas o menos antes del evento: cargo del 75% del costo total.",
        deposit_p4_no: "Si el PROVEEDOR cancela, este contrato quedará sin efecto y el cliente no incurrirá en ningún cargo.",

        punctuality_title: "PUNTUALIDAD Y CAMBIOS DE HORARIO",
        punctuality_p1: "La puntualidad del cliente es esencial. Si el cliente no cumple con la hora estipulada, el servicio podrá verse reducido. Si el retraso impide completamente la prestación, el cliente estará obligado al pago completo. Cambios de horario el mismo día del evento conllevan un cargo administrativo de $100.00.",
        punctuality_p2: "D' Show Events no ofrecerá reembolsos por servicios no prestados debido a retrasos del cliente, ni por causas externas inevitables (tránsito, condiciones imprevistas). No obstante, el proveedor hará esfuerzos razonables por adaptarse.",

        sound_title: "SONIDO",
        sound_opt_client: "Opción seleccionada: Sonido provisto por el cliente. El cliente suple el sistema de sonido, incluyendo dos (2) micrófonos con stands, garantizando su óptimo funcionamiento.",
        sound_opt_basic: "Opción seleccionada: Sonido básico provisto por D' Show Events. Sistema compacto profesional para hasta 25 personas. Incluido sin costo adicional.",
        sound_opt_upgrade: "Opción seleccionada: Upgrade a sonido profesional grande. Sistema de mayor potencia para eventos grandes. Cargo adicional de $150.00 USD.",
        sound_pending_p1: "ACCIÓN REQUERIDA: Por favor, marque con una (X) la opción de sonido de su preferencia:",
        sound_pending_b1: "[__] Opción 1: Sonido provisto por el cliente. El cliente suple el sistema de sonido, incluyendo dos (2) micrófonos con stands.",
        sound_pending_b2: "[__] Opción 2: Sonido básico (incluido). Sistema compacto profesional para hasta 25 personas.",
        sound_pending_b3: "[__] Opción 3: Upgrade a sonido profesional (+$150.00 USD). Sistema de mayor potencia para eventos grandes.",
        sound_p2: "El proveedor no se hace responsable por fallas técnicas o eléctricas fuera de su control. Si el daño es causado por negligencia directa del proveedor, este asumirá los costos.",

        access_title: "ACCESO Y ESTACIONAMIENTO",
        access_p1_1: "El cliente cubrirá los gastos de estacionamiento del personal del proveedor (",
        access_p1_2: " espacios) y gestionará los permisos de acceso. Si no se realizan estas gestiones, los retrasos o limitaciones que resulten no serán responsabilidad del proveedor.",

        reschedule_title: "CAMBIOS DE FECHA",
        reschedule_p1: "El cliente podrá realizar un (1) cambio de fecha sin costo adicional, sujeto a la disponibilidad del PROVEEDOR, siempre que se notifique por escrito con más de 30 días de antelación a la fecha original del evento. Cambios adicionales o solicitados con menos de 30 días de antelación conllevan un cargo administrativo de $50.00.",
        reschedule_p2: "Toda cancelación o solicitud de cambio de fecha debe realizarse por escrito (email o mensaje confirmado) para ser válida.",

        staff_images_title: "DERECHO DE USO DE IMÁGENES DEL PERSONAL",
        staff_images_p1: "El proveedor podrá utilizar fotografías o videos que incluyan exclusivamente a su personal (músicos, talentos, artistas) para promoción y redes, garantizando la privacidad del cliente.",

        safety_title: "SEGURIDAD DEL PERSONAL",
        safety_p1: "La seguridad del personal de D' Show Events es prioritaria. Ante cualquier situación de acoso, hostilidad o peligro, el personal podrá retirarse sin penalidad ni reembolso.",

        comms_title: "COMUNICACIONES OFICIALES",
        comms_provider: "Contacto del Proveedor",
        comms_client: "Contacto del Cliente",
        comms_last: "Las notificaciones serán válidas una vez confirmada su recepción por cualquiera de las partes.",

        client_content_title: "CONTENIDO GENERADO POR EL CLIENTE",
        client_content_p1: "El cliente y sus invitados pueden grabar o compartir libremente durante el evento. Se agradece (pero no se requiere) etiquetar a @dshowevents al publicar contenido en redes.",
        client_content_p2: "Nuestras Redes:",

        liability_title: "LIMITACIÓN DE RESPONSABILIDAD",
        liability_p1: "La responsabilidad total del proveedor no excederá el monto pagado por el cliente. No se responderá por daños indirectos, pérdida de ganancias, o problemas técnicos del venue o terceros.",

        indemnification_title: "INDEMNIZACIÓN",
        indemnification_p1: "El cliente mantendrá indemne a D' Show Events LLC frente a cualquier reclamo o daño derivado de actos, omisiones o incumplimientos del cliente o sus invitados.",

        force_majeure_title: "FUERZA MAYOR",
        force_majeure_p1: "Ninguna parte será responsable si el incumplimiento resulta de causas fuera de su control razonable (huracanes, apagones, pandemias, disturbios, restricciones gubernamentales, etc.). La parte afectada notificará dentro de 48 horas. Podrán reprogramar dentro de 30 días o, si no es posible, el proveedor reembolsará el depósito menos los gastos incurridos (máx. 25%).",

        jurisdiction_title: "JURISDICCIÓN Y LEGISLACIÓN APLICABLE",
        jurisdiction_p1: "Este contrato se regirá por las leyes del Estado Libre Asociado de Puerto Rico. Cualquier disputa será tratada primero mediante comunicación directa, luego mediación, y finalmente ante los tribunales de San Juan o Bayamón.",

        summary_details_title: "RESUMEN DE DETALLES DEL SERVICIO",
        summary_service: "Servicio contratado:",
        summary_time: "Hora de los servicios:",
        summary_total_cost: "Costo total:",
        summary_balance: "Balance restante:",
        summary_address: "Dirección del evento:",
        summary_activity: "Tipo de actividad:",
        summary_notes: "Notas:",
        summary_payment_title: "RESUMEN DE DEPÓSITO Y PAGO",
        summary_deposit: "Depósito:",
        summary_parking: "Estacionamientos requeridos:",
        summary_checks: "Cheques a nombre de:",
        summary_duration: "Duración total:",
        summary_package: "Paquete:",
        summary_venue: "Venue:",
        summary_guests: "Número de invitados:",

        confirmation_title: "CONFIRMACIÓN Y FIRMAS",
        confirmation_lead: "Yo, ______________________, certifico en la fecha de hoy ____________ que entiendo y acepto los términos y condiciones establecidos en este documento, formalizando la contratación de los servicios para el día ",

        signature_client_prefix: "Firma de ",
        signature_client_suffix: " / Representante",
        signature_provider: "Representante Autorizado",

        invoice_title: "FACTURA",
        invoice_subtitle_prefix: "Anexo al Contrato #",
        invoice_bill_to: "FACTURAR A",
        invoice_from: "DE",
        invoice_number: "No. Factura",
        invoice_issue_date: "Fecha de Emisión",
        invoice_event_date: "Fecha del Evento",
        invoice_table_desc: "Descripción",
        invoice_table_total: "Total",
        invoice_service_desc: "Servicios Artísticos y Técnicos",
        invoice_service_desc_placeholder: "Según descrito en contrato.",
        invoice_sound_upgrade: "Upgrade de Sonido Profesional",
        invoice_subtotal: "Subtotal",
        invoice_deposit_paid: "Depósito Pagado",
        invoice_balance_due: "Balance Restante",
        invoice_notes: "Notas Adicionales",
        invoice_notes_placeholder: "El balance restante debe ser saldado en su totalidad antes del comienzo del servicio en la fecha del evento.",
        invoice_thank_you: "¡Gracias por elegir a D' Show Events!",
        invoice_footer: "Para preguntas sobre esta factura, contáctenos en info@dshowevents.com",

        parking_suffix: " espacios",
    },
};

static EN: Catalog = Catalog {
    form: FormStrings {
        language_title: "Contract Language",
        client_info_title: "Client Information",
        client_name: "Full Name",
        client_name_placeholder: "Ex: John Doe",
        contract_number: "Contract No.",
        email: "Email",
        phone: "Phone",
        event_details_title: "Event Details",
        activity_type: "Activity Type",
        activity_type_placeholder: "Wedding, Birthday, Corporate",
        service_time: "Service Time",
        day: "Day",
        month: "Month",
        year: "Year",
        event_address: "Event Address",
        service_details_title: "Contracted Service Details",
        parking_spaces: "Parking Spaces",
        service_description: "Service Description",
        contract_notes: "Notes (Contract)",
        invoice_notes: "Additional Notes for Invoice",
        financial_title: "Financial Information",
        total_cost: "Total Cost (USD)",
        remaining_balance: "Remaining Balance (USD)",
        deposit_checkbox: "Deposit Required to Book",
        sound_title: "Sound System",
        sound_pending: "Pending (Client decides)",
        sound_client: "Sound provided by client",
        sound_basic: "Basic Sound (Included)",
        sound_upgrade: "Upgrade to Large Professional Sound (+$150 USD)",
        booth_service_title: "Contracted Service Type",
        photo_booth_label: "PHOTO BOOTH - Digital photo booth",
        video_360_label: "VIDEO BOOTH 360 - Revolving platform",
        addon_speaker: "Speaker to play music in the Booth area",
        addon_early_setup: "\"Early Setup\"",
        addon_branding: "\"Full Branding\" of the Booth with the client's brand",
        addon_hire: "Hire",
        addon_no_hire: "Do not hire",
        addon_pending: "Pending - Client decides",
        event_location: "Event Location",
        location_indoor: "Indoor",
        location_outdoor: "Outdoor",
        service_hours: "Service Hours (Duration)",
        event_date: "Event Date",
        start_time: "Start Time",
        end_time: "End Time",
        total_duration: "Total Duration",
        guest_count: "Number of Guests",
        venue_name: "Venue Name",
        venue_info_title: "Venue Information",
        event_floor: "Event Floor",
        venue_contact: "Venue Contact",
        venue_phone: "Venue Emergency Phone",
        setup_restrictions: "Setup Time Restrictions",
        setup_type: "Required Setup Type",
        setup_premium: "Premium Package (up to 150 guests)",
        setup_deluxe: "Deluxe Package (over 150 guests)",
        electrical: "Electrical Requirements",
        is_outdoor: "Is the event outdoors?",
        yes: "Yes",
        no: "No",
        surface_type: "Surface Type",
        protection_title: "Available Protection (optional)",
        protection_tent: "Tent/canopy provided by client",
        protection_structure: "Permanent structure (gazebo/pergola)",
        protection_none: "No protection (+$150 D Show tent)",
        protection_level_area: "Level area with proper drainage",
        protection_vehicle_access: "Access for setup vehicles",
        setup_color: "Setup Color",
        color_black: "Black",
        color_white: "White",
        err_required: "This field is required.",
        err_email: "Enter a valid email address.",
        err_phone: "Enter a valid Puerto Rico/USA number (10 digits or +1).",
        err_date_past: "The date cannot be in the past.",
        err_time_slot: "Select a valid future time in 15-minute intervals.",
        err_booth_service: "Select at least one Service Type.",
    },
    doc: DocStrings {
        contract_title: "SERVICE AGREEMENT",
        client_name_placeholder: "Client Name",
        intro1: "This agreement is made between ",
        intro2: ", hereinafter referred to as the \"CLIENT\", and D' Show Events, hereinafter referred to as the \"PROVIDER\". Both parties agree to the following terms:",
        not_provided: "Not provided",
        phone: "Phone",
        no_notes: "No additional notes.",

        deposit_title: "DEPOSIT AND FINAL PAYMENT",
        deposit_p1_with: "The CLIENT agrees to make a non-refundable deposit of $125.00 to reserve the services of D' Show Events.",
        deposit_p2_with: "The remaining balance must be paid in full BEFORE the contracted services begin on the event date.",
        deposit_p3_with: "In case of cancellation by the CLIENT, the following charges will apply:",
        deposit_b1_with: "Less than 5 calendar days before the event: 50% of the total cost will be billed (deposit credited).",
        deposit_b2_with: "48 hours or less before the event: 75% of the total cost will be billed (deposit credited).",
        deposit_p4_with: "If the PROVIDER cancels for any reason, 100% of the deposit will be returned to the CLIENT.",
        deposit_p1_no: "No deposit is required to book. Signing this contract formalizes the reservation of the date and services.",
        deposit_p2_no: "100% of the total cost must be paid in full BEFORE the contracted services begin on the event date.",
        deposit_p3_no: "In case of cancellation by the CLIENT, the following administrative charges will apply:",
        deposit_b1_no: "Less than 5 calendar days before the event: a charge of 50% of the total cost.",
        deposit_b2_no: "48 hours or less before the event: a charge of 75% of the total cost.",
        deposit_p4_no: "If the PROVIDER cancels, this contract will be void, and the CLIENT will incur no charges.",

        punctuality_title: "PUNCTUALITY AND SCHEDULE CHANGES",
        punctuality_p1: "CLIENT's punctuality is essential. If the CLIENT fails to adhere to the stipulated time, the service may be shortened. If the delay completely prevents service delivery, the CLIENT is obligated to pay in full. Same-day schedule changes incur a $100.00 administrative fee.",
        punctuality_p2: "D' Show Events will not offer refunds for services not rendered due to CLIENT delays or unavoidable external causes (traffic, unforeseen conditions). However, the PROVIDER will make reasonable efforts to adapt.",

        sound_title: "SOUND SYSTEM",
        sound_opt_client: "Selected option: Sound provided by the client. The client supplies the sound system, including two (2) microphones with stands, ensuring their optimal functionality.",
        sound_opt_basic: "Selected option: Basic sound provided by D' Show Events. A compact professional system for up to 25 people. Included at no extra cost.",
        sound_opt_upgrade: "Selected option: Upgrade to large professional sound. A higher power system for large events. An additional charge of $150.00 USD applies.",
        sound_pending_p1: "ACTION REQUIRED: Please mark your preferred sound option with an (X):",
        sound_pending_b1: "[__] Option 1: Sound provided by the client. The client supplies the sound system, including two (2) microphones with stands, ensuring optimal functionality.",
        sound_pending_b2: "[__] Option 2: Basic sound (included). Compact professional system for up to 25 people. Included at no extra cost.",
        sound_pending_b3: "[__] Option 3: Upgrade to professional sound (+$150.00 USD). Higher power system for large events. The additional charge will be added to the remaining balance.",
        sound_p2: "The PROVIDER is not responsible for technical or electrical failures beyond its control. If damage is caused by the PROVIDER's direct negligence, the PROVIDER will assume the costs.",

        access_title: "ACCESS AND PARKING",
        access_p1_1: "The CLIENT will cover parking costs for the PROVIDER's staff (",
        access_p1_2: " spaces) and will arrange any necessary access permits. Failure to do so may result in delays or limitations for which the PROVIDER is not responsible.",

        reschedule_title: "DATE CHANGES",
        reschedule_p1: "The CLIENT may make one (1) date change at no additional cost, subject to the PROVIDER's availability, provided it is requested in writing more than 30 days before the original event date. Additional changes or those requested with less than 30 days' notice will incur a $50.00 administrative fee.",
        reschedule_p2: "All cancellations or date change requests must be made in writing (confirmed email or message) to be valid.",

        staff_images_title: "USE OF STAFF IMAGERY",
        staff_images_p1: "The PROVIDER may use photographs or videos that exclusively feature its personnel (musicians, talents, artists) for promotion and social media, ensuring the CLIENT's privacy.",

        safety_title: "STAFF SAFETY",
        safety_p1: "The safety of D' Show Events staff is a priority. In any situation of harassment, hostility, or danger, the staff may withdraw without penalty or refund.",

        comms_title: "OFFICIAL COMMUNICATIONS",
        comms_provider: "Provider's Contact",
        comms_client: "Client's Contact",
        comms_last: "Notifications are considered valid once receipt is confirmed by either party.",

        client_content_title: "CLIENT-GENERATED CONTENT",
        client_content_p1: "The CLIENT and their guests are free to record and share content during the event. Tagging @dshowevents on social media is appreciated but not required.",
        client_content_p2: "Our Socials:",

        liability_title: "LIMITATION OF LIABILITY",
        liability_p1: "The PROVIDER's total liability shall not exceed the amount paid by the CLIENT. The PROVIDER is not liable for indirect damages, loss of profits, or technical issues from the venue or third parties.",

        indemnification_title: "INDEMNIFICATION",
        indemnification_p1: "The CLIENT will hold D' Show Events LLC harmless from any claim or damage arising from the acts, omissions, or breaches of the CLIENT or their guests.",

        force_majeure_title: "FORCE MAJEURE",
        force_majeure_p1: "Neither party shall be liable for failure to perform due to causes beyond their reasonable control (hurricanes, blackouts, pandemics, riots, government restrictions, etc.). The affected party will notify within 48 hours. They may reschedule within 30 days or, if not possible, the PROVIDER will refund the deposit minus incurred expenses (max. 25%).",

        jurisdiction_title: "JURISDICTION AND APPLICABLE LAW",
        jurisdiction_p1: "This agreement shall be governed by the laws of the Commonwealth of Puerto Rico. Any dispute will first be addressed through direct communication, then mediation, and finally in the courts of San Juan or Bayamón.",

        summary_details_title: "SUMMARY OF SERVICE DETAILS",
        summary_service: "Service contracted:",
        summary_time: "Service time:",
        summary_total_cost: "Total cost:",
        summary_balance: "Remaining balance:",
        summary_address: "Event address:",
        summary_activity: "Activity type:",
        summary_notes: "Notes:",
        summary_payment_title: "DEPOSIT AND PAYMENT SUMMARY",
        summary_deposit: "Deposit:",
        summary_parking: "Parking spaces required:",
        summary_checks: "Checks payable to:",
        summary_duration: "Total duration:",
        summary_package: "Package:",
        summary_venue: "Venue:",
        summary_guests: "Number of guests:",

        confirmation_title: "CONFIRMATION AND SIGNATURES",
        confirmation_lead: "I, ______________________, certify on this day ____________ that I understand and accept the terms and conditions set forth in this document, formalizing the hiring of services for the day ",

        signature_client_prefix: "Signature of ",
        signature_client_suffix: " / Representative",
        signature_provider: "Authorized Representative",

        invoice_title: "INVOICE",
        invoice_subtitle_prefix: "Addendum to Agreement #",
        invoice_bill_to: "BILL TO",
        invoice_from: "FROM",
        invoice_number: "Invoice No.",
        invoice_issue_date: "Issue Date",
        invoice_event_date: "Event Date",
        invoice_table_desc: "Description",
        invoice_table_total: "Total",
        invoice_service_desc: "Artistic and Technical Services",
        invoice_service_desc_placeholder: "As described in the contract.",
        invoice_sound_upgrade: "Professional Sound Upgrade",
        invoice_subtotal: "Subtotal",
        invoice_deposit_paid: "Deposit Paid",
        invoice_balance_due: "Balance Due",
        invoice_notes: "Additional Notes",
        invoice_notes_placeholder: "The remaining balance must be paid in full before the service begins on the event date.",
        invoice_thank_you: "Thank you for choosing D' Show Events!",
        invoice_footer: "For questions about this invoice, please contact us at info@dshowevents.com",

        parking_suffix: " spaces",
    },
};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn month_tokens_map_to_numbers() {
        assert_eq!(month_number("enero"), Some(1));
        assert_eq!(month_number("Diciembre"), Some(12));
        assert_eq!(month_number("smarch"), None);
    }

    #[test]
    fn spanish_dates_capitalize_the_month() {
        assert_eq!(
            format_event_date(Locale::Es, "5", "junio", "2026"),
            "5 de Junio del 2026"
        );
        assert_eq!(
            format_event_date(Locale::Es, "", "junio", "2026"),
            "DD de Mes de AAAA"
        );
    }

    #[test]
    fn english_dates_translate_and_get_ordinals() {
        assert_eq!(
            format_event_date(Locale::En, "1", "junio", "2026"),
            "June 1st, 2026"
        );
        assert_eq!(
            format_event_date(Locale::En, "22", "marzo", "2026"),
            "March 22nd, 2026"
        );
        assert_eq!(
            format_event_date(Locale::En, "23", "agosto", "2026"),
            "August 23rd, 2026"
        );
        assert_eq!(
            format_event_date(Locale::En, "15", "octubre", "2026"),
            "October 15th, 2026"
        );
        assert_eq!(
            format_event_date(Locale::En, "", "junio", "2026"),
            "Month DDth, YYYY"
        );
    }

    #[test]
    fn parking_phrase_is_localized() {
        assert_eq!(parking_phrase(Locale::Es, "5"), "5 espacios");
        assert_eq!(parking_phrase(Locale::En, "2"), "2 spaces");
    }

    #[test]
    fn long_dates_are_localized() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        assert_eq!(format_long_date(Locale::Es, date), "6 de agosto de 2026");
        assert_eq!(format_long_date(Locale::En, date), "August 6, 2026");
    }

    #[test]
    fn catalog_templates_interpolate() {
        let t = &catalog(Locale::Es).doc;
        assert_eq!(
            t.signature_client("Juan"),
            "Firma de Juan / Representante"
        );
        assert_eq!(t.invoice_subtitle("001"), "Anexo al Contrato #001");
        assert!(t.confirmation("5 de Junio del 2026").ends_with("5 de Junio del 2026."));
    }
}
