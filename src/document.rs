use chrono::NaiveDate;

use crate::config::{Company, Pricing};
use crate::engine::{money, parse_money};
use crate::locale::{catalog, format_event_date, parking_phrase};
use crate::model::{Order, OrderDetails, SoundOption};

/// One styled run of text inside a paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPart {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub line_break: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryItem {
    pub label: String,
    pub value: String,
}

/// Renderer-agnostic document tree. Nodes carry display data only (no
/// styling units, no layout, no business logic), so every renderer is a
/// plain match over the same variants.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentNode {
    Header {
        title: String,
        subtitle: Option<String>,
    },
    Paragraph {
        parts: Vec<TextPart>,
    },
    List {
        items: Vec<DocumentNode>,
    },
    Clause {
        number: u32,
        title: String,
        content: Vec<DocumentNode>,
    },
    Summary {
        title: String,
        details: Vec<SummaryItem>,
    },
    Signatures,
    Spacer,
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderDocuments {
    pub contract: Vec<DocumentNode>,
    pub invoice: Vec<DocumentNode>,
}

fn text(value: impl Into<String>) -> TextPart {
    TextPart { text: value.into(), bold: false, italic: false, line_break: false }
}

fn bold(value: impl Into<String>) -> TextPart {
    TextPart { bold: true, ..text(value) }
}

fn italic(value: impl Into<String>) -> TextPart {
    TextPart { italic: true, ..text(value) }
}

fn line(value: impl Into<String>) -> TextPart {
    TextPart { line_break: true, ..text(value) }
}

fn bold_line(value: impl Into<String>) -> TextPart {
    TextPart { bold: true, line_break: true, ..text(value) }
}

fn para(parts: Vec<TextPart>) -> DocumentNode {
    DocumentNode::Paragraph { parts }
}

fn para1(value: impl Into<String>) -> DocumentNode {
    para(vec![text(value)])
}

fn bold_para(value: impl Into<String>) -> DocumentNode {
    para(vec![bold(value)])
}

fn value_or(value: &str, fallback: &str) -> String {
    if value.is_empty() { fallback.to_string() } else { value.to_string() }
}

/// Hands out contract clause numbers: 1-based, strictly increasing in
/// emission order, never reset or reused within a build.
struct ClauseCounter(u32);

impl ClauseCounter {
    fn next(&mut self) -> u32 {
        self.0 += 1;
        self.0
    }
}

/// Builds the contract and invoice trees for an order. Pure: the same
/// order, pricing, company, and issue date always produce the same trees.
/// Balances are taken verbatim from the order's derived fields so the
/// invoice can never disagree with the preview.
pub fn build(order: &Order, pricing: &Pricing, company: &Company, today: NaiveDate) -> OrderDocuments {
    let t = &catalog(order.locale).doc;
    let mut counter = ClauseCounter(0);

    let contract_number = value_or(&order.contract_number, "DSE-2025-000");
    let client_name = value_or(&order.client_name, &format!("[{}]", t.client_name_placeholder));
    let event_date = format_event_date(
        order.locale,
        &order.event_day,
        &order.event_month,
        &order.event_year,
    );

    // === CONTRACT ===
    let mut contract: Vec<DocumentNode> = vec![
        DocumentNode::Header {
            title: company.display_name.clone(),
            subtitle: Some(format!("{} #{}", t.contract_title, contract_number)),
        },
        para(vec![text(t.intro1), bold(client_name.as_str()), text(t.intro2)]),
        DocumentNode::Spacer,
    ];

    // Deposit clause: the two bodies are mutually exclusive templates.
    let deposit_content = if order.deposit_applies {
        vec![
            para1(t.deposit_p1_with),
            para1(t.deposit_p2_with),
            para1(t.deposit_p3_with),
            DocumentNode::List {
                items: vec![para1(t.deposit_b1_with), para1(t.deposit_b2_with)],
            },
            para1(t.deposit_p4_with),
        ]
    } else {
        vec![
            para1(t.deposit_p1_no),
            para1(t.deposit_p2_no),
            para1(t.deposit_p3_no),
            DocumentNode::List {
                items: vec![para1(t.deposit_b1_no), para1(t.deposit_b2_no)],
            },
            para1(t.deposit_p4_no),
        ]
    };
    contract.push(DocumentNode::Clause {
        number: counter.next(),
        title: t.deposit_title.to_string(),
        content: deposit_content,
    });

    contract.push(DocumentNode::Clause {
        number: counter.next(),
        title: t.punctuality_title.to_string(),
        content: vec![para1(t.punctuality_p1), para1(t.punctuality_p2)],
    });

    // Sound clause applies to music orders only; `Pending` renders the
    // action-required block instead of a settled statement.
    if let OrderDetails::Music(music) = &order.details {
        let mut content = match music.sound_option {
            SoundOption::Client => vec![para1(t.sound_opt_client)],
            SoundOption::Basic => vec![para1(t.sound_opt_basic)],
            SoundOption::Upgrade => vec![para1(t.sound_opt_upgrade)],
            SoundOption::Pending => vec![
                bold_para(t.sound_pending_p1),
                DocumentNode::List {
                    items: vec![
                        bold_para(t.sound_pending_b1),
                        bold_para(t.sound_pending_b2),
                        bold_para(t.sound_pending_b3),
                    ],
                },
            ],
        };
        content.push(para1(t.sound_p2));
        contract.push(DocumentNode::Clause {
            number: counter.next(),
            title: t.sound_title.to_string(),
            content,
        });
    }

    contract.push(DocumentNode::Clause {
        number: counter.next(),
        title: t.access_title.to_string(),
        content: vec![para1(format!(
            "{}{}{}",
            t.access_p1_1,
            value_or(&order.parking_spaces, "5"),
            t.access_p1_2
        ))],
    });

    contract.push(DocumentNode::Clause {
        number: counter.next(),
        title: t.reschedule_title.to_string(),
        content: vec![para1(t.reschedule_p1), para1(t.reschedule_p2)],
    });

    contract.push(DocumentNode::Clause {
        number: counter.next(),
        title: t.staff_images_title.to_string(),
        content: vec![para1(t.staff_images_p1)],
    });

    contract.push(DocumentNode::Clause {
        number: counter.next(),
        title: t.safety_title.to_string(),
        content: vec![para1(t.safety_p1)],
    });

    contract.push(DocumentNode::Clause {
        number: counter.next(),
        title: t.comms_title.to_string(),
        content: vec![
            bold_para(t.comms_provider),
            para1(format!("Email: {}", company.email)),
            para1(format!("WhatsApp/Message: {}", company.phone)),
            DocumentNode::Spacer,
            bold_para(t.comms_client),
            para1(format!("Email: {}", value_or(&order.client_email, t.not_provided))),
            para1(format!(
                "{}: {}",
                t.phone,
                value_or(&order.client_phone, t.not_provided)
            )),
            para(vec![italic(t.comms_last)]),
        ],
    });

    contract.push(DocumentNode::Clause {
        number: counter.next(),
        title: t.client_content_title.to_string(),
        content: vec![
            para1(t.client_content_p1),
            bold_para(t.client_content_p2),
            para1(company.socials.clone()),
        ],
    });

    contract.push(DocumentNode::Clause {
        number: counter.next(),
        title: t.liability_title.to_string(),
        content: vec![para1(t.liability_p1)],
    });

    contract.push(DocumentNode::Clause {
        number: counter.next(),
        title: t.indemnification_title.to_string(),
        content: vec![para1(t.indemnification_p1)],
    });

    contract.push(DocumentNode::Clause {
        number: counter.next(),
        title: t.force_majeure_title.to_string(),
        content: vec![para1(t.force_majeure_p1)],
    });

    contract.push(DocumentNode::Clause {
        number: counter.next(),
        title: t.jurisdiction_title.to_string(),
        content: vec![para1(t.jurisdiction_p1)],
    });

    contract.push(DocumentNode::Spacer);

    // Service summary. Values come from the order as-is; the derived
    // balance field for the kind is shown verbatim.
    let (service_value, time_value, balance_value) = match &order.details {
        OrderDetails::Music(music) => (
            value_or(&music.service_description, t.not_provided),
            music.service_time.clone(),
            order.remaining_balance.clone(),
        ),
        OrderDetails::Booth(booth) => (
            value_or(&booth.service_description, t.not_provided),
            booth.service_time.clone(),
            order.remaining_balance.clone(),
        ),
        OrderDetails::Dj(dj) => (
            value_or(&dj.package_name, t.not_provided),
            format!("{} - {}", dj.start_time, dj.end_time),
            dj.balance_50.clone(),
        ),
    };
    contract.push(DocumentNode::Summary {
        title: t.summary_details_title.to_string(),
        details: vec![
            SummaryItem { label: t.summary_service.to_string(), value: service_value },
            SummaryItem { label: t.summary_time.to_string(), value: time_value },
            SummaryItem {
                label: t.summary_total_cost.to_string(),
                value: format!("${:.2} USD", parse_money(&order.total_cost)),
            },
            SummaryItem {
                label: t.summary_balance.to_string(),
                value: format!("${balance_value} USD"),
            },
            SummaryItem {
                label: t.summary_address.to_string(),
                value: value_or(&order.address, t.not_provided),
            },
            SummaryItem {
                label: t.summary_activity.to_string(),
                value: value_or(&order.activity_type, t.not_provided),
            },
            SummaryItem {
                label: t.summary_notes.to_string(),
                value: value_or(&order.notes, t.no_notes),
            },
        ],
    });

    if let OrderDetails::Dj(dj) = &order.details {
        contract.push(DocumentNode::Summary {
            title: String::new(),
            details: vec![
                SummaryItem {
                    label: t.summary_duration.to_string(),
                    value: dj.duration_text.clone(),
                },
                SummaryItem {
                    label: t.summary_package.to_string(),
                    value: value_or(&dj.package_name, t.not_provided),
                },
                SummaryItem {
                    label: t.summary_venue.to_string(),
                    value: value_or(&dj.venue_name, t.not_provided),
                },
                SummaryItem {
                    label: t.summary_guests.to_string(),
                    value: value_or(&dj.guest_count, t.not_provided),
                },
            ],
        });
    }

    let mut payment_details = Vec::new();
    if order.deposit_applies {
        let deposit_value = match &order.details {
            OrderDetails::Dj(dj) => format!("${} USD", dj.deposit_50),
            _ => format!("${:.2} USD", pricing.deposit_music_booth),
        };
        payment_details.push(SummaryItem {
            label: t.summary_deposit.to_string(),
            value: deposit_value,
        });
    }
    payment_details.push(SummaryItem {
        label: t.summary_parking.to_string(),
        value: parking_phrase(order.locale, &value_or(&order.parking_spaces, "5")),
    });
    payment_details.push(SummaryItem {
        label: "ATH Móvil Business:".to_string(),
        value: company.ath_movil.clone(),
    });
    payment_details.push(SummaryItem {
        label: t.summary_checks.to_string(),
        value: company.checks_payable_to.clone(),
    });
    contract.push(DocumentNode::Summary {
        title: t.summary_payment_title.to_string(),
        details: payment_details,
    });

    contract.push(DocumentNode::Clause {
        number: counter.next(),
        title: t.confirmation_title.to_string(),
        content: vec![para1(t.confirmation(&event_date))],
    });

    contract.push(DocumentNode::Signatures);

    // === INVOICE ===
    let base_cost = parse_money(&order.total_cost);
    let sound_surcharge = match &order.details {
        OrderDetails::Music(music) if music.sound_option == SoundOption::Upgrade => {
            pricing.sound_upgrade
        }
        _ => 0.0,
    };
    let subtotal = base_cost + sound_surcharge;
    let (deposit_paid, balance_due) = match &order.details {
        OrderDetails::Dj(dj) => (
            if order.deposit_applies { parse_money(&dj.deposit_50) } else { 0.0 },
            dj.balance_50.clone(),
        ),
        _ => (
            if order.deposit_applies { pricing.deposit_music_booth } else { 0.0 },
            order.remaining_balance.clone(),
        ),
    };

    let service_description = match &order.details {
        OrderDetails::Music(music) => music.service_description.clone(),
        OrderDetails::Booth(booth) => booth.service_description.clone(),
        OrderDetails::Dj(dj) => dj.package_name.clone(),
    };

    let mut table_rows = vec![vec![
        format!(
            "{}\n{}",
            t.invoice_service_desc,
            value_or(&service_description, t.invoice_service_desc_placeholder)
        ),
        format!("${base_cost:.2}"),
    ]];
    if sound_surcharge > 0.0 {
        table_rows.push(vec![
            t.invoice_sound_upgrade.to_string(),
            format!("${sound_surcharge:.2}"),
        ]);
    }

    let mut totals = vec![SummaryItem {
        label: t.invoice_subtotal.to_string(),
        value: format!("${}", money(subtotal)),
    }];
    if deposit_paid > 0.0 {
        totals.push(SummaryItem {
            label: t.invoice_deposit_paid.to_string(),
            value: format!("-${}", money(deposit_paid)),
        });
    }
    totals.push(SummaryItem {
        label: t.invoice_balance_due.to_string(),
        value: format!("${:.2} USD", parse_money(&balance_due)),
    });

    let invoice: Vec<DocumentNode> = vec![
        DocumentNode::Header {
            title: company.legal_name.clone(),
            subtitle: Some(format!(
                "{} | {}",
                t.invoice_title,
                t.invoice_subtitle(&contract_number)
            )),
        },
        para(vec![
            bold(format!("{}:", t.invoice_bill_to)),
            line(client_name.clone()),
            line(value_or(&order.client_email, t.not_provided)),
            line(value_or(&order.client_phone, t.not_provided)),
            bold_line(format!("{}:", t.invoice_from)),
            bold_line(company.legal_name.as_str()),
            line(company.address.as_str()),
            line(company.email.as_str()),
            line(company.phone.as_str()),
        ]),
        para(vec![
            bold_line(format!("{}: {}", t.invoice_number, contract_number)),
            bold_line(format!(
                "{}: {}",
                t.invoice_issue_date,
                today.format("%-d/%-m/%Y")
            )),
            bold_line(format!(
                "{}: {}/{}/{}",
                t.invoice_event_date, order.event_day, order.event_month, order.event_year
            )),
        ]),
        DocumentNode::Table {
            headers: vec![t.invoice_table_desc.to_string(), t.invoice_table_total.to_string()],
            rows: table_rows,
        },
        DocumentNode::Summary { title: String::new(), details: totals },
        para(vec![
            bold(format!("{}:", t.invoice_notes)),
            TextPart {
                italic: true,
                line_break: true,
                ..text(value_or(&order.invoice_notes, t.invoice_notes_placeholder))
            },
        ]),
        DocumentNode::Spacer,
        para(vec![bold(t.invoice_thank_you)]),
        para1(t.invoice_footer),
    ];

    OrderDocuments { contract, invoice }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::recompute;
    use crate::model::{AddonChoice, OrderKind, SetupType};

    fn company() -> Company {
        toml::from_str(include_str!("../company.toml")).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    fn built(order: &Order) -> OrderDocuments {
        build(order, &Pricing::default(), &company(), today())
    }

    fn clause_numbers(nodes: &[DocumentNode]) -> Vec<u32> {
        nodes
            .iter()
            .filter_map(|n| match n {
                DocumentNode::Clause { number, .. } => Some(*number),
                _ => None,
            })
            .collect()
    }

    fn flatten_text(nodes: &[DocumentNode]) -> String {
        let mut out = String::new();
        for node in nodes {
            match node {
                DocumentNode::Header { title, subtitle } => {
                    out.push_str(title);
                    out.push('\n');
                    if let Some(sub) = subtitle {
                        out.push_str(sub);
                        out.push('\n');
                    }
                }
                DocumentNode::Paragraph { parts } => {
                    for part in parts {
                        out.push_str(&part.text);
                    }
                    out.push('\n');
                }
                DocumentNode::List { items } => out.push_str(&flatten_text(items)),
                DocumentNode::Clause { title, content, .. } => {
                    out.push_str(title);
                    out.push('\n');
                    out.push_str(&flatten_text(content));
                }
                DocumentNode::Summary { title, details } => {
                    out.push_str(title);
                    out.push('\n');
                    for item in details {
                        out.push_str(&item.label);
                        out.push(' ');
                        out.push_str(&item.value);
                        out.push('\n');
                    }
                }
                DocumentNode::Table { headers, rows } => {
                    out.push_str(&headers.join(" "));
                    out.push('\n');
                    for row in rows {
                        out.push_str(&row.join(" "));
                        out.push('\n');
                    }
                }
                DocumentNode::Signatures | DocumentNode::Spacer => {}
            }
        }
        out
    }

    #[test]
    fn clause_numbers_are_gap_free_across_branches() {
        for deposit in [true, false] {
            for kind in [OrderKind::Music, OrderKind::Booth, OrderKind::Dj] {
                let mut order = Order::new(kind);
                order.deposit_applies = deposit;
                let docs = built(&order);
                let numbers = clause_numbers(&docs.contract);
                let expected: Vec<u32> = (1..=numbers.len() as u32).collect();
                assert_eq!(numbers, expected, "kind {kind:?} deposit {deposit}");
                assert!(clause_numbers(&docs.invoice).is_empty());
            }
        }
    }

    #[test]
    fn upgrade_invoice_scenario() {
        let mut order = Order::new(OrderKind::Music);
        order.total_cost = "500.00".to_string();
        order.deposit_applies = true;
        if let crate::model::OrderDetails::Music(music) = &mut order.details {
            music.sound_option = SoundOption::Upgrade;
        }
        let order = recompute(&order, &Pricing::default()).order;
        assert_eq!(order.remaining_balance, "525.00");

        let docs = built(&order);
        let table = docs
            .invoice
            .iter()
            .find_map(|n| match n {
                DocumentNode::Table { rows, .. } => Some(rows.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table[1][1], "$150.00");

        let totals = docs
            .invoice
            .iter()
            .find_map(|n| match n {
                DocumentNode::Summary { title, details } if title.is_empty() => {
                    Some(details.clone())
                }
                _ => None,
            })
            .unwrap();
        assert_eq!(totals[0].value, "$650.00");
        assert_eq!(totals[1].value, "-$125.00");
        // Balance due comes verbatim from the derived field.
        assert_eq!(totals[2].value, "$525.00 USD");
    }

    #[test]
    fn no_surcharge_row_without_the_upgrade() {
        let mut order = Order::new(OrderKind::Music);
        order.total_cost = "500.00".to_string();
        let order = recompute(&order, &Pricing::default()).order;
        let docs = built(&order);
        let table = docs
            .invoice
            .iter()
            .find_map(|n| match n {
                DocumentNode::Table { rows, .. } => Some(rows.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn empty_values_fall_back_to_placeholders() {
        let order = Order::new(OrderKind::Music);
        let docs = built(&order);
        let contract_text = flatten_text(&docs.contract);
        assert!(contract_text.contains("[Nombre del Cliente]"));
        assert!(contract_text.contains("No provisto"));
        // The parking count defaults rather than rendering empty.
        assert!(contract_text.contains("(5 espacios)"));
    }

    #[test]
    fn deposit_branch_swaps_the_whole_clause_body() {
        let mut order = Order::new(OrderKind::Music);
        order.deposit_applies = true;
        let with = flatten_text(&built(&order).contract);
        order.deposit_applies = false;
        let without = flatten_text(&built(&order).contract);
        assert!(with.contains("depósito de $125.00"));
        assert!(!without.contains("depósito de $125.00"));
        assert!(without.contains("No se requiere depósito"));
    }

    #[test]
    fn pending_sound_emits_the_action_required_block() {
        let order = Order::new(OrderKind::Music);
        let text = flatten_text(&built(&order).contract);
        assert!(text.contains("ACCIÓN REQUERIDA"));
        assert!(text.contains("[__] Opción 1"));
        assert!(text.contains("[__] Opción 3"));
    }

    #[test]
    fn booth_contract_has_no_sound_clause() {
        let order = Order::new(OrderKind::Booth);
        let text = flatten_text(&built(&order).contract);
        assert!(!text.contains("Opción seleccionada"));
        assert!(!text.contains("ACCIÓN REQUERIDA"));
    }

    #[test]
    fn dj_invoice_uses_the_fifty_fifty_split() {
        let mut order = Order::new(OrderKind::Dj);
        order.total_cost = "1000.00".to_string();
        if let crate::model::OrderDetails::Dj(dj) = &mut order.details {
            dj.setup_type = Some(SetupType::Premium);
        }
        let order = recompute(&order, &Pricing::default()).order;
        let docs = built(&order);
        let totals = docs
            .invoice
            .iter()
            .find_map(|n| match n {
                DocumentNode::Summary { title, details } if title.is_empty() => {
                    Some(details.clone())
                }
                _ => None,
            })
            .unwrap();
        assert_eq!(totals[1].value, "-$500.00");
        assert_eq!(totals[2].value, "$500.00 USD");
    }

    #[test]
    fn english_locale_renders_english_strings() {
        let mut order = Order::new(OrderKind::Booth);
        order.locale = crate::locale::Locale::En;
        if let crate::model::OrderDetails::Booth(booth) = &mut order.details {
            booth.photo_booth = true;
            booth.speaker_addon = AddonChoice::Hire;
        }
        let order = recompute(&order, &Pricing::default()).order;
        let text = flatten_text(&built(&order).contract);
        assert!(text.contains("SERVICE AGREEMENT"));
        assert!(text.contains("DEPOSIT AND FINAL PAYMENT"));
        // Derived data stays canonical even under the English locale.
        assert!(text.contains("PHOTO BOOTH - 2 horas + Bocina"));
    }
}
