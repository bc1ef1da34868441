//! HTML preview of a resume, styled inline so the page stands alone.

use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use super::preview::{build_preview, EntryBlock, Link, MeterTone, PreviewDocument, PreviewItem};
use crate::models::resume::Profile;

const DARK: &str = "#2d3748";
const MEDIUM: &str = "#4a5568";
const LIGHT: &str = "#a0aec0";
const RULE: &str = "#e2e8f0";
const BLUE: &str = "#3182ce";
const GREEN: &str = "#38a169";

pub fn render_html(profile: &Profile) -> String {
    render_document(&build_preview(profile))
}

// `write!` into a String cannot fail, so its results are discarded below.
fn render_document(doc: &PreviewDocument) -> String {
    let mut out = String::with_capacity(4096);
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>{}</title>", text(&doc.full_name));
    out.push_str("</head>\n");
    let _ = writeln!(
        out,
        "<body style=\"margin:0;background:#fff\">\n<div style=\"max-width:794px;margin:0 auto;padding:2rem;font-family:'Calibri','Arial',sans-serif;line-height:1.5\">"
    );

    let _ = writeln!(
        out,
        "<header style=\"text-align:center;margin-bottom:2rem;border-bottom:2px solid {RULE};padding-bottom:1.5rem\">"
    );
    let _ = writeln!(
        out,
        "<h1 style=\"font-size:2.5rem;font-weight:bold;color:{DARK};font-family:'Georgia',serif;margin:0 0 .5rem\">{}</h1>",
        text(&doc.full_name)
    );
    let _ = writeln!(
        out,
        "<p style=\"font-size:1.25rem;font-weight:600;color:{BLUE};margin:0 0 .25rem\">{}</p>",
        text(&doc.job_title)
    );
    if !doc.contacts.is_empty() {
        let _ = write!(out, "<div style=\"font-size:.875rem;color:{MEDIUM}\">");
        for contact in &doc.contacts {
            let _ = write!(out, "<span style=\"margin:0 .5rem\">{}</span>", text(contact));
        }
        out.push_str("</div>\n");
    }
    if !doc.links.is_empty() {
        out.push_str("<div style=\"margin-top:.5rem\">");
        write_links(&mut out, &doc.links);
        out.push_str("</div>\n");
    }
    out.push_str("</header>\n");

    for section in &doc.sections {
        let _ = writeln!(
            out,
            "<section style=\"margin-bottom:1.5rem\">\n<h2 style=\"font-size:1.25rem;font-weight:bold;color:{DARK};border-bottom:1px solid {RULE};padding-bottom:.5rem;text-transform:uppercase\">{}</h2>",
            section.title
        );
        for item in &section.items {
            write_item(&mut out, item);
        }
        out.push_str("</section>\n");
    }

    out.push_str("</div>\n</body>\n</html>\n");
    out
}

fn write_links(out: &mut String, links: &[Link]) {
    for link in links {
        let _ = write!(
            out,
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\" style=\"color:{BLUE};text-decoration:underline;margin:0 .5rem\">{}</a>",
            attr(&link.url),
            link.label
        );
    }
}

fn write_item(out: &mut String, item: &PreviewItem) {
    match item {
        PreviewItem::Paragraph(body) => {
            let _ = writeln!(out, "<p style=\"color:{MEDIUM}\">{}</p>", text(body));
        }
        PreviewItem::Entry(entry) => write_entry(out, entry),
        PreviewItem::Meter {
            label,
            level,
            proficiency,
            tone,
        } => {
            let fill = match tone {
                MeterTone::Blue => BLUE,
                MeterTone::Green => GREEN,
            };
            let width = u32::from(*proficiency) * 20;
            let _ = writeln!(
                out,
                "<div style=\"margin-bottom:.5rem\"><div style=\"display:flex;justify-content:space-between\"><span style=\"color:{DARK};font-weight:500\">{}</span><span style=\"font-size:.75rem;color:{LIGHT}\">{}</span></div><div style=\"height:.375rem;border-radius:9999px;background-color:{RULE}\"><div style=\"height:100%;border-radius:9999px;width:{width}%;background-color:{fill}\"></div></div></div>",
                text(label),
                text(level)
            );
        }
    }
}

fn write_entry(out: &mut String, entry: &EntryBlock) {
    out.push_str("<div style=\"margin-bottom:1rem\">\n");
    let _ = write!(
        out,
        "<div style=\"display:flex;justify-content:space-between\"><div><p style=\"font-weight:bold;color:{DARK};margin:0\">{}</p>",
        text(&entry.title)
    );
    if let Some(subtitle) = &entry.subtitle {
        let _ = write!(
            out,
            "<p style=\"font-size:.875rem;color:{MEDIUM};margin:0\">{}</p>",
            text(subtitle)
        );
    }
    out.push_str("</div>");
    if let Some(period) = &entry.period {
        let _ = write!(
            out,
            "<p style=\"font-size:.875rem;color:{MEDIUM};margin:0\">{}</p>",
            text(period)
        );
    }
    out.push_str("</div>\n");

    if !entry.links.is_empty() {
        out.push_str("<div style=\"font-size:.875rem\">");
        write_links(out, &entry.links);
        out.push_str("</div>\n");
    }
    if !entry.bullets.is_empty() {
        let _ = write!(out, "<ul style=\"color:{MEDIUM};padding-left:1.25rem\">");
        for bullet in &entry.bullets {
            let _ = write!(out, "<li style=\"margin-bottom:.25rem\">{}</li>", text(bullet));
        }
        out.push_str("</ul>\n");
    }
    if let Some(body) = &entry.body {
        let _ = writeln!(out, "<p style=\"color:{MEDIUM}\">{}</p>", text(body));
    }
    out.push_str("</div>\n");
}
