//! Printable label markup.

use super::LabelContent;

const PRINT_STYLE: &str = "\
@page { size: auto; margin: 0; }
body { margin: 0; font-family: Inter, sans-serif; }
.printable-label { display: flex; flex-direction: column; align-items: center; padding: 16px; }
.item-name { font-size: 18px; font-weight: 600; margin-bottom: 8px; }
.barcode-svg svg { width: 320px; height: auto; }
.mrp { font-size: 20px; font-weight: 700; margin-top: 8px; }
@media print {
  body * { visibility: hidden; }
  #print-area, #print-area * { visibility: visible; }
  #print-area { position: absolute; left: 0; top: 0; }
}
";

/// Escape text for HTML content and attribute values.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }

    escaped
}

/// The printable label fragment: name, symbol markup and price line.
///
/// `svg` is inserted as-is and must already be well-formed markup.
pub fn print_fragment(content: &LabelContent, svg: &str) -> String {
    format!(
        "<div class=\"printable-label\">\
<div class=\"item-name\">{name}</div>\
<div class=\"barcode-svg\">{svg}</div>\
<div class=\"mrp\">{price}</div>\
</div>",
        name = escape_html(content.name.as_str()),
        price = escape_html(&content.price_line()),
    )
}

/// A standalone document whose print styles show only the print area.
pub fn print_document(fragment: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Barcode Label</title>\n\
<style>\n{PRINT_STYLE}</style>\n</head>\n<body>\n<div id=\"print-area\">{fragment}</div>\n</body>\n</html>\n"
    )
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::validation::LabelInput;

    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn fragment_contains_label_parts() -> TestResult {
        let content = LabelInput::new("Salt & Pepper", "590123412345", "9.9").validate()?;

        let fragment = print_fragment(&content, "<svg></svg>");

        assert!(fragment.starts_with("<div class=\"printable-label\">"));
        assert!(fragment.contains("<div class=\"item-name\">Salt &amp; Pepper</div>"));
        assert!(fragment.contains("<div class=\"barcode-svg\"><svg></svg></div>"));
        assert!(fragment.contains("<div class=\"mrp\">MRP: 9.90</div>"));

        Ok(())
    }

    #[test]
    fn document_wraps_fragment_in_print_area() {
        let document = print_document("<p>label</p>");

        assert!(document.contains("<div id=\"print-area\"><p>label</p></div>"));
        assert!(document.contains("@media print"));
    }
}
