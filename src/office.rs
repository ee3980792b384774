//! Text extraction from zipped-XML office documents (.docx, .odt).

use std::fs::File;
use std::io::Read;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;
use zip::ZipArchive;

use crate::error::{InsightsError, Result};

/// Which XML vocabulary to expect inside the archive.
struct Markup {
    entry: &'static str,
    /// Elements that force a line break.
    breaks: &'static [&'static [u8]],
    /// Elements whose end closes a paragraph.
    paragraph_ends: &'static [&'static [u8]],
}

const DOCX: Markup = Markup {
    entry: "word/document.xml",
    breaks: &[b"br"],
    paragraph_ends: &[b"p"],
};

const ODT: Markup = Markup {
    entry: "content.xml",
    breaks: &[b"line-break", b"br"],
    paragraph_ends: &[b"p", b"h"],
};

pub fn extract_docx(path: &Path) -> Result<String> {
    extract(path, &DOCX)
}

pub fn extract_odt(path: &Path) -> Result<String> {
    extract(path, &ODT)
}

fn extract(path: &Path, markup: &Markup) -> Result<String> {
    let file = File::open(path).map_err(|e| office_err(path, format!("open failed: {e}")))?;
    let mut archive =
        ZipArchive::new(file).map_err(|e| office_err(path, format!("open zip failed: {e}")))?;
    let mut entry = archive
        .by_name(markup.entry)
        .map_err(|_| office_err(path, format!("missing {}", markup.entry)))?;
    let mut xml = String::new();
    entry
        .read_to_string(&mut xml)
        .map_err(|e| office_err(path, format!("read {} failed: {e}", markup.entry)))?;
    parse_markup(&xml, markup).map_err(|reason| office_err(path, reason))
}

fn parse_markup(xml: &str, markup: &Markup) -> std::result::Result<String, String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut out = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                if markup.breaks.contains(&e.name().local_name().as_ref()) {
                    out.push('\n');
                }
            }
            Ok(Event::End(e)) => {
                if markup
                    .paragraph_ends
                    .contains(&e.name().local_name().as_ref())
                {
                    out.push('\n');
                }
            }
            Ok(Event::Text(t)) => {
                let decoded = t.decode().map_err(|e| e.to_string())?;
                out.push_str(
                    &quick_xml::escape::unescape(&decoded).map_err(|e| e.to_string())?,
                );
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(format!("xml parse failed: {e}")),
            _ => {}
        }
        buf.clear();
    }
    Ok(tidy_lines(&out))
}

fn office_err(path: &Path, reason: String) -> InsightsError {
    InsightsError::Office {
        path: path.to_path_buf(),
        reason,
    }
}

/// Collapses runs of blank lines and trims line edges.
fn tidy_lines(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut last_blank = false;
    for raw_line in s.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            if !last_blank {
                out.push('\n');
                last_blank = true;
            }
        } else {
            if !out.is_empty() && !last_blank {
                out.push('\n');
            }
            out.push_str(line);
            out.push('\n');
            last_blank = false;
        }
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tidy_collapses_blank_runs() {
        assert_eq!(tidy_lines("a\n\n\n\nb\n"), "a\n\nb");
        assert_eq!(tidy_lines("  x  \ny\n"), "x\ny");
        assert_eq!(tidy_lines(""), "");
    }

    #[test]
    fn docx_paragraphs_become_lines() {
        let xml = r##"<w:document xmlns:w="ns"><w:body>
            <w:p><w:r><w:t>One</w:t></w:r></w:p>
            <w:p><w:r><w:t>Two</w:t></w:r></w:p>
        </w:body></w:document>"##;
        assert_eq!(parse_markup(xml, &DOCX).unwrap(), "One\nTwo");
    }

    #[test]
    fn odt_line_breaks_are_preserved() {
        let xml = r##"<office:doc xmlns:office="ns" xmlns:text="ns2">
            <text:p>First<text:line-break/>Second</text:p>
        </office:doc>"##;
        assert_eq!(parse_markup(xml, &ODT).unwrap(), "First\nSecond");
    }
}
