//! Paints a [`RenderTree`] as HTML for browser previews.
//!
//! Produces a `<style>` block with the font-face declarations followed by the
//! menu root element. Only inline styles are emitted, no scripts and no event
//! handlers. Text fragments come from the markup expander and are inserted as
//! they are; attribute values are escaped. Card icon glyphs are operator text
//! too and go into their `<span>` unescaped, like the expanded text.

use super::{
    CardNode, CornerBadge, FontFace, Header, RenderTree, SectionNode, TextNode,
    TextStyle,
};
use crate::config::BadgePosition;
use std::fmt::{self, Write};

/// CSS class of the preview root element
pub const ROOT_CLASS: &str = "help-menu-preview";

/// Render the whole tree to an HTML fragment
pub fn paint_html(tree: &RenderTree) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_tree(tree, &mut out);
    out
}

/// `@font-face` rules for the tree's custom fonts (empty when none are used)
pub fn font_face_css(faces: &[FontFace]) -> String {
    faces
        .iter()
        .map(|face| {
            format!(
                "@font-face{{font-family:'{}';src:url('{}');}}",
                escape_css_string(&face.family),
                escape_css_string(&face.src)
            )
        })
        .collect()
}

fn write_tree(tree: &RenderTree, out: &mut String) -> fmt::Result {
    if !tree.font_faces.is_empty() {
        write!(out, "<style>{}</style>", font_face_css(&tree.font_faces))?;
    }

    let background = tree
        .background
        .to_css()
        .map(|css| format!("background:{};", css))
        .unwrap_or_default();
    write!(
        out,
        "<div class=\"{}\" style=\"{}width:{}px;padding:{}px;font-family:{};color:{};\
         border-radius:10px;box-shadow:0 5px 20px rgba(0,0,0,0.2);position:relative;\
         box-sizing:border-box;\">",
        ROOT_CLASS,
        escape_html(&background),
        tree.canvas_width,
        tree.padding,
        escape_html(&tree.base_text.font_family.to_css()),
        escape_html(&tree.base_text.color),
    )?;

    if let Some(badge) = &tree.corner_badge {
        write_badge(badge, out)?;
    }
    write_header(&tree.header, out)?;
    for section in &tree.sections {
        write_section(section, out)?;
    }

    out.push_str("</div>");
    Ok(())
}

fn style_css(style: &TextStyle) -> String {
    format!(
        "font-size:{}px;color:{};font-family:{};font-weight:{};font-style:{};",
        style.font_size,
        style.color,
        style.font_family.to_css(),
        style.font_weight.as_css(),
        style.font_style.as_css()
    )
}

fn write_text(node: &TextNode, extra_css: &str, out: &mut String) -> fmt::Result {
    write!(
        out,
        "<div style=\"{}{}\">{}</div>",
        escape_html(&style_css(&node.style)),
        extra_css,
        node.text
    )
}

fn write_badge(badge: &CornerBadge, out: &mut String) -> fmt::Result {
    let anchor = match badge.position {
        BadgePosition::TopRight => "top:8px;right:8px;",
        BadgePosition::BottomRight => "bottom:8px;right:8px;",
        BadgePosition::BottomLeft => "bottom:8px;left:8px;",
    };
    let extra = format!(
        "position:absolute;{}background:rgba(255,255,255,0.85);padding:4px 8px;\
         border:1px solid rgba(0,0,0,0.08);z-index:10;white-space:nowrap;",
        anchor
    );
    write_text(&badge.text, &extra, out)
}

fn write_header(header: &Header, out: &mut String) -> fmt::Result {
    out.push_str(
        "<div style=\"margin-bottom:30px;display:flex;align-items:flex-start;justify-content:space-between;\">\
         <div style=\"display:flex;align-items:flex-start;\">",
    );
    if let Some(url) = &header.avatar_url {
        write!(
            out,
            "<img src=\"{}\" style=\"width:80px;height:80px;border-radius:50%;margin-right:20px;\" />",
            escape_html(url)
        )?;
    }
    out.push_str("<div>");
    write_text(&header.title, "margin-bottom:10px;", out)?;
    if let Some(qq) = &header.qq {
        write_text(qq, "margin-bottom:8px;", out)?;
    }
    if let Some(description) = &header.description {
        write_text(description, "margin-bottom:5px;", out)?;
    }
    if let Some(notice) = &header.notice {
        write_text(notice, "", out)?;
    }
    out.push_str("</div></div>");
    if let Some(url) = &header.logo_url {
        write!(
            out,
            "<img src=\"{}\" style=\"max-width:80px;max-height:80px;margin-left:20px;object-fit:contain;\" />",
            escape_html(url)
        )?;
    }
    out.push_str("</div>");
    Ok(())
}

fn write_section(section: &SectionNode, out: &mut String) -> fmt::Result {
    out.push_str("<div style=\"margin-bottom:30px;\">");
    write_text(&section.title, "margin-bottom:15px;", out)?;
    write!(
        out,
        "<div style=\"display:grid;grid-template-columns:repeat({}, {}px);gap:{}px;\">",
        section.grid.columns, section.grid.card_width_px, section.grid.gap_px
    )?;
    for card in &section.cards {
        write_card(card, out)?;
    }
    out.push_str("</div></div>");
    Ok(())
}

fn write_card(card: &CardNode, out: &mut String) -> fmt::Result {
    write!(
        out,
        "<div style=\"background:{};border:2px solid {};border-radius:10px;min-height:{}px;\
         padding:12px;display:flex;flex-direction:column;justify-content:flex-start;\
         position:relative;box-sizing:border-box;\">",
        escape_html(&card.background),
        escape_html(&card.border),
        card.min_height_px
    )?;

    let indent = if let Some(icon) = &card.icon {
        write!(
            out,
            "<span style=\"position:absolute;left:12px;top:12px;font-size:{}px;line-height:1;\">{}</span>",
            icon.font_size, icon.glyph
        )?;
        "margin-left:30px;"
    } else {
        ""
    };

    write_text(
        &card.title,
        &format!("{}margin-bottom:4px;line-height:1.3;word-break:break-word;", indent),
        out,
    )?;
    write_text(
        &card.description,
        &format!("{}margin-bottom:3px;line-height:1.4;word-break:break-word;", indent),
        out,
    )?;
    if let Some(usage) = &card.usage {
        write_text(
            usage,
            &format!("{}opacity:0.75;line-height:1.3;word-break:break-word;", indent),
            out,
        )?;
    }
    out.push_str("</div>");
    Ok(())
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn escape_css_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}
