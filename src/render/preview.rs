use comfy_table::{Attribute, Cell, Table};

use crate::config::Company;
use crate::document::DocumentNode;
use crate::locale::catalog;
use crate::model::Order;

use super::footer_line;

/// Renders a document tree as terminal text. Tables and summaries go
/// through comfy-table; everything else is plain paragraphs, so the preview
/// stays textually equivalent to the exported formats.
pub fn render(nodes: &[DocumentNode], order: &Order, company: &Company) -> String {
    let mut out = String::new();
    render_nodes(nodes, order, company, &mut out);
    out.push('\n');
    out.push_str(&footer_line(company));
    out.push('\n');
    out
}

fn render_nodes(nodes: &[DocumentNode], order: &Order, company: &Company, out: &mut String) {
    for node in nodes {
        match node {
            DocumentNode::Header { title, subtitle } => {
                out.push_str(&"═".repeat(60));
                out.push('\n');
                out.push_str(title);
                out.push('\n');
                if let Some(subtitle) = subtitle {
                    out.push_str(subtitle);
                    out.push('\n');
                }
                out.push_str(&"═".repeat(60));
                out.push_str("\n\n");
            }
            DocumentNode::Paragraph { parts } => {
                for part in parts {
                    if part.line_break {
                        out.push('\n');
                    }
                    out.push_str(&part.text);
                }
                out.push_str("\n\n");
            }
            DocumentNode::List { items } => {
                for item in items {
                    out.push_str("  • ");
                    out.push_str(inline_text(item).trim_end());
                    out.push('\n');
                }
                out.push('\n');
            }
            DocumentNode::Clause { number, title, content } => {
                out.push_str(&format!("{number}. {title}\n"));
                out.push_str(&"─".repeat(40));
                out.push('\n');
                render_nodes(content, order, company, out);
            }
            DocumentNode::Summary { title, details } => {
                if !title.is_empty() {
                    out.push_str(title);
                    out.push('\n');
                }
                let mut table = Table::new();
                for item in details {
                    table.add_row(vec![
                        Cell::new(&item.label).add_attribute(Attribute::Bold),
                        Cell::new(&item.value),
                    ]);
                }
                out.push_str(&table.to_string());
                out.push_str("\n\n");
            }
            DocumentNode::Signatures => {
                let t = &catalog(order.locale).doc;
                let client = if order.client_name.is_empty() {
                    t.client_name_placeholder
                } else {
                    order.client_name.as_str()
                };
                out.push_str("\n_____________________________\n");
                out.push_str(&t.signature_client(client));
                out.push_str("\n\n_____________________________\n");
                out.push_str(&company.legal_name);
                out.push('\n');
                out.push_str(t.signature_provider);
                out.push_str("\n\n");
            }
            DocumentNode::Spacer => out.push('\n'),
            DocumentNode::Table { headers, rows } => {
                let mut table = Table::new();
                table.set_header(
                    headers
                        .iter()
                        .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
                        .collect::<Vec<_>>(),
                );
                for row in rows {
                    table.add_row(row.iter().map(Cell::new).collect::<Vec<_>>());
                }
                out.push_str(&table.to_string());
                out.push_str("\n\n");
            }
        }
    }
}

fn inline_text(node: &DocumentNode) -> String {
    match node {
        DocumentNode::Paragraph { parts } => {
            parts.iter().map(|p| p.text.as_str()).collect::<Vec<_>>().join("")
        }
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Pricing;
    use crate::document::build;
    use crate::engine::recompute;
    use crate::model::OrderKind;
    use chrono::NaiveDate;

    fn company() -> Company {
        toml::from_str(include_str!("../../company.toml")).unwrap()
    }

    #[test]
    fn preview_renders_every_node_kind() {
        let mut order = Order::new(OrderKind::Music);
        order.client_name = "Juan Pérez".to_string();
        order.total_cost = "500.00".to_string();
        let order = recompute(&order, &Pricing::default()).order;
        let docs = build(
            &order,
            &Pricing::default(),
            &company(),
            NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
        );

        let contract = render(&docs.contract, &order, &company());
        assert!(contract.contains("CONTRATO DE SERVICIOS"));
        assert!(contract.contains("1. DEPÓSITO Y PAGO FINAL"));
        assert!(contract.contains("  • "));
        assert!(contract.contains("Firma de Juan Pérez / Representante"));
        assert!(contract.contains("Representante Autorizado"));

        let invoice = render(&docs.invoice, &order, &company());
        assert!(invoice.contains("FACTURA"));
        assert!(invoice.contains("Descripción"));
        assert!(invoice.contains("$375.00 USD"));
    }

    #[test]
    fn preview_uses_the_placeholder_signature_when_unnamed() {
        let order = Order::new(OrderKind::Booth);
        let docs = build(
            &order,
            &Pricing::default(),
            &company(),
            NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
        );
        let text = render(&docs.contract, &order, &company());
        assert!(text.contains("Firma de Nombre del Cliente / Representante"));
    }
}
