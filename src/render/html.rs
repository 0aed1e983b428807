use std::fs;
use std::path::{Path, PathBuf};

use tera::{Context, Tera};

use crate::config::Company;
use crate::document::{DocumentNode, OrderDocuments, TextPart};
use crate::locale::catalog;
use crate::model::Order;

use super::{RenderError, footer_line};

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '\n' => out.push_str("<br>"),
            _ => out.push(c),
        }
    }
    out
}

fn run(part: &TextPart) -> String {
    let mut html = escape(&part.text);
    if part.italic {
        html = format!("<em>{html}</em>");
    }
    if part.bold {
        html = format!("<strong>{html}</strong>");
    }
    if part.line_break { format!("<br>{html}") } else { html }
}

/// HTML body for a document tree. The page scaffold (US-Letter sheet, font
/// family, fixed margins) lives in the tera template so this stays a pure
/// visitor over the same nodes the other renderers consume.
pub fn body(nodes: &[DocumentNode], order: &Order, company: &Company) -> String {
    let mut out = String::new();
    render_nodes(nodes, order, company, &mut out);
    out
}

fn render_nodes(nodes: &[DocumentNode], order: &Order, company: &Company, out: &mut String) {
    for node in nodes {
        match node {
            DocumentNode::Header { title, subtitle } => {
                out.push_str("<header>");
                out.push_str(&format!("<h1>{}</h1>", escape(title)));
                if let Some(subtitle) = subtitle {
                    out.push_str(&format!("<h2>{}</h2>", escape(subtitle)));
                }
                out.push_str("</header>\n");
            }
            DocumentNode::Paragraph { parts } => {
                out.push_str("<p>");
                for part in parts {
                    out.push_str(&run(part));
                }
                out.push_str("</p>\n");
            }
            DocumentNode::List { items } => {
                out.push_str("<ul>\n");
                for item in items {
                    if let DocumentNode::Paragraph { parts } = item {
                        out.push_str("<li>");
                        for part in parts {
                            out.push_str(&run(part));
                        }
                        out.push_str("</li>\n");
                    }
                }
                out.push_str("</ul>\n");
            }
            DocumentNode::Clause { number, title, content } => {
                out.push_str("<section class=\"clause\">\n");
                out.push_str(&format!("<h3>{}. {}</h3>\n", number, escape(title)));
                render_nodes(content, order, company, out);
                out.push_str("</section>\n");
            }
            DocumentNode::Summary { title, details } => {
                if !title.is_empty() {
                    out.push_str(&format!("<h3>{}</h3>\n", escape(title)));
                }
                out.push_str("<table class=\"summary\">\n");
                for item in details {
                    out.push_str(&format!(
                        "<tr><td class=\"label\">{}</td><td>{}</td></tr>\n",
                        escape(&item.label),
                        escape(&item.value)
                    ));
                }
                out.push_str("</table>\n");
            }
            DocumentNode::Signatures => {
                let t = &catalog(order.locale).doc;
                let client = if order.client_name.is_empty() {
                    t.client_name_placeholder
                } else {
                    order.client_name.as_str()
                };
                out.push_str("<div class=\"signatures\">\n");
                out.push_str(&format!(
                    "<div class=\"signature\"><div class=\"rule\"></div>{}</div>\n",
                    escape(&t.signature_client(client))
                ));
                out.push_str(&format!(
                    "<div class=\"signature provider\"><div class=\"rule\"></div>{}<br>{}</div>\n",
                    escape(&company.legal_name),
                    escape(t.signature_provider)
                ));
                out.push_str("</div>\n");
            }
            DocumentNode::Spacer => out.push_str("<div class=\"spacer\"></div>\n"),
            DocumentNode::Table { headers, rows } => {
                out.push_str("<table class=\"items\">\n<thead><tr>");
                for header in headers {
                    out.push_str(&format!("<th>{}</th>", escape(header)));
                }
                out.push_str("</tr></thead>\n<tbody>\n");
                for row in rows {
                    out.push_str("<tr>");
                    for cell in row {
                        out.push_str(&format!("<td>{}</td>", escape(cell)));
                    }
                    out.push_str("</tr>\n");
                }
                out.push_str("</tbody>\n</table>\n");
            }
        }
    }
}

/// Writes the contract + invoice as one standalone word-processor-openable
/// HTML document on the same US-Letter geometry as the PDF.
pub fn export_document(
    docs: &OrderDocuments,
    order: &Order,
    company: &Company,
    tera: &Tera,
    output_dir: &Path,
    file_stem: &str,
) -> Result<PathBuf, RenderError> {
    let full_body = format!(
        "{}\n<div class=\"page-break\"></div>\n{}",
        body(&docs.contract, order, company),
        body(&docs.invoice, order, company)
    );
    let mut context = Context::new();
    context.insert("body", &full_body);
    context.insert("footer", &escape(&footer_line(company)));
    context.insert("title", &escape(&company.legal_name));
    let rendered = tera.render("contract.html.tera", &context)?;

    fs::create_dir_all(output_dir)?;
    let html_path = output_dir.join(format!("{file_stem}.html"));
    fs::write(&html_path, rendered)?;
    Ok(html_path)
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
    fn html_escapes_user_text() {
        assert_eq!(escape("Juan <script> & Co."), "Juan &lt;script&gt; &amp; Co.");
    }

    #[test]
    fn body_covers_every_node_kind() {
        let mut order = Order::new(OrderKind::Music);
        order.client_name = "Ana & Luis".to_string();
        order.total_cost = "500.00".to_string();
        let order = recompute(&order, &Pricing::default()).order;
        let docs = build(
            &order,
            &Pricing::default(),
            &company(),
            NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
        );

        let contract = body(&docs.contract, &order, &company());
        assert!(contract.contains("<h1>"));
        assert!(contract.contains("<h3>1. DEPÓSITO Y PAGO FINAL</h3>"));
        assert!(contract.contains("<ul>"));
        assert!(contract.contains("class=\"signatures\""));
        assert!(contract.contains("Ana &amp; Luis"));

        let invoice = body(&docs.invoice, &order, &company());
        assert!(invoice.contains("class=\"items\""));
        assert!(invoice.contains("<th>Descripción</th>"));
        assert!(invoice.contains("class=\"summary\""));
    }
}
