use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tera::{Context, Tera};

use crate::config::Company;
use crate::document::{DocumentNode, OrderDocuments, TextPart};
use crate::locale::catalog;
use crate::model::Order;

use super::{RenderError, footer_line};

/// Escapes user text for Typst markup.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '#' | '$' | '*' | '_' | '[' | ']' | '`' | '@' | '<' | '>' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str(" \\ "),
            _ => out.push(c),
        }
    }
    out
}

fn run(part: &TextPart) -> String {
    let escaped = escape(&part.text);
    let styled = match (part.bold, part.italic) {
        (true, true) => format!("*_{escaped}_*"),
        (true, false) => format!("*{escaped}*"),
        (false, true) => format!("_{escaped}_"),
        (false, false) => escaped,
    };
    if part.line_break { format!("\\ {styled}") } else { styled }
}

/// Typst markup for a document tree. The page scaffold (geometry, fonts)
/// lives in the tera template; this visitor emits content only.
pub fn markup(nodes: &[DocumentNode], order: &Order, company: &Company) -> String {
    let mut out = String::new();
    render_nodes(nodes, order, company, &mut out);
    out
}

fn render_nodes(nodes: &[DocumentNode], order: &Order, company: &Company, out: &mut String) {
    for node in nodes {
        match node {
            DocumentNode::Header { title, subtitle } => {
                out.push_str(&format!(
                    "#align(center)[#text(size: 20pt, weight: \"bold\")[{}]]\n",
                    escape(title)
                ));
                if let Some(subtitle) = subtitle {
                    out.push_str(&format!(
                        "#align(center)[#text(size: 12pt)[{}]]\n",
                        escape(subtitle)
                    ));
                }
                out.push_str("#v(1em)\n\n");
            }
            DocumentNode::Paragraph { parts } => {
                for part in parts {
                    if part.text.is_empty() {
                        continue;
                    }
                    out.push_str(&run(part));
                }
                out.push_str("\n\n");
            }
            DocumentNode::List { items } => {
                for item in items {
                    if let DocumentNode::Paragraph { parts } = item {
                        out.push_str("- ");
                        for part in parts {
                            out.push_str(&run(part));
                        }
                        out.push('\n');
                    }
                }
                out.push('\n');
            }
            DocumentNode::Clause { number, title, content } => {
                out.push_str(&format!("== {}. {}\n\n", number, escape(title)));
                render_nodes(content, order, company, out);
            }
            DocumentNode::Summary { title, details } => {
                if !title.is_empty() {
                    out.push_str(&format!("== {}\n\n", escape(title)));
                }
                for item in details {
                    out.push_str(&format!(
                        "*{}* {}\n\n",
                        escape(&item.label),
                        escape(&item.value)
                    ));
                }
            }
            DocumentNode::Signatures => {
                let t = &catalog(order.locale).doc;
                let client = if order.client_name.is_empty() {
                    t.client_name_placeholder
                } else {
                    order.client_name.as_str()
                };
                out.push_str("#v(3em)\n");
                out.push_str("#line(length: 16em)\n");
                out.push_str(&format!("{}\n\n", escape(&t.signature_client(client))));
                out.push_str("#v(2em)\n");
                out.push_str(&format!(
                    "#align(right)[#line(length: 16em) \\ {} \\ {}]\n\n",
                    escape(&company.legal_name),
                    escape(t.signature_provider)
                ));
            }
            DocumentNode::Spacer => out.push_str("#v(1em)\n\n"),
            DocumentNode::Table { headers, rows } => {
                out.push_str(&format!("#table(\n  columns: {},\n", headers.len()));
                for header in headers {
                    out.push_str(&format!("  [*{}*],\n", escape(header)));
                }
                for row in rows {
                    for cell in row {
                        out.push_str(&format!("  [{}],\n", escape(cell)));
                    }
                }
                out.push_str(")\n\n");
            }
        }
    }
}

/// Renders both documents into one `.typ` file and compiles it with the
/// external Typst binary, the same flow the business uses for invoices.
pub fn export_pdf(
    docs: &OrderDocuments,
    order: &Order,
    company: &Company,
    tera: &Tera,
    output_dir: &Path,
    file_stem: &str,
) -> Result<PathBuf, RenderError> {
    if Command::new("typst").arg("--version").output().is_err() {
        return Err(RenderError::TypstMissing);
    }

    let body = format!(
        "{}\n#pagebreak()\n\n{}",
        markup(&docs.contract, order, company),
        markup(&docs.invoice, order, company)
    );
    let mut context = Context::new();
    context.insert("body", &body);
    context.insert("footer", &escape(&footer_line(company)));
    let rendered = tera.render("contract.typ.tera", &context)?;

    fs::create_dir_all(output_dir)?;
    let typ_path = output_dir.join(format!("{file_stem}.typ"));
    let pdf_path = output_dir.join(format!("{file_stem}.pdf"));
    fs::write(&typ_path, rendered)?;

    match Command::new("typst")
        .arg("compile")
        .arg(&typ_path)
        .arg(&pdf_path)
        .status()
    {
        Ok(status) if status.success() => Ok(pdf_path),
        _ => Err(RenderError::CompileFailed(typ_path)),
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
    fn escape_neutralizes_markup_characters() {
        assert_eq!(escape("5 * #vip [si]"), "5 \\* \\#vip \\[si\\]");
        assert_eq!(escape("a\nb"), "a \\ b");
    }

    #[test]
    fn markup_renders_headings_and_tables() {
        let mut order = Order::new(OrderKind::Music);
        order.client_name = "Juan".to_string();
        order.total_cost = "500.00".to_string();
        let order = recompute(&order, &Pricing::default()).order;
        let docs = build(
            &order,
            &Pricing::default(),
            &company(),
            NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
        );

        let contract = markup(&docs.contract, &order, &company());
        assert!(contract.contains("== 1. DEPÓSITO Y PAGO FINAL"));
        assert!(contract.contains("#align(center)"));
        assert!(contract.contains("#line(length: 16em)"));

        let invoice = markup(&docs.invoice, &order, &company());
        assert!(invoice.contains("#table(\n  columns: 2,"));
        assert!(invoice.contains("[*Descripción*]"));
    }

    #[test]
    fn user_text_cannot_inject_typst_code() {
        let mut order = Order::new(OrderKind::Music);
        order.client_name = "#import \"evil\"".to_string();
        let docs = build(
            &order,
            &Pricing::default(),
            &company(),
            NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
        );
        let text = markup(&docs.contract, &order, &company());
        assert!(!text.contains("#import"));
        assert!(text.contains("\\#import"));
    }
}
