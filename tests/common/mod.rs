//! In-memory XLSX fixtures for integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// A fixture cell value.
#[derive(Debug, Clone)]
pub enum V {
    /// Shared string
    S(&'static str),
    /// Number
    N(f64),
    /// Boolean
    B(bool),
    /// Styled cell without a value
    Blank,
}

/// Builds a minimal but valid workbook package.
#[derive(Default)]
pub struct WorkbookBuilder {
    sheets: Vec<(String, String)>,
    strings: Vec<String>,
}

impl WorkbookBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sheet whose rows start at row 1 and cells at column A.
    pub fn sheet(mut self, name: &str, rows: &[&[V]]) -> Self {
        let mut data = String::new();
        for (r, cells) in rows.iter().enumerate() {
            data.push_str(&format!(r#"<row r="{}">"#, r + 1));
            for (c, value) in cells.iter().enumerate() {
                let reference = format!("{}{}", column_letter(c), r + 1);
                data.push_str(&self.cell_xml(&reference, value));
            }
            data.push_str("</row>");
        }
        self.sheets.push((name.to_string(), data));
        self
    }

    /// Add a sheet from raw `<sheetData>` content.
    pub fn raw_sheet(mut self, name: &str, sheet_data: &str) -> Self {
        self.sheets.push((name.to_string(), sheet_data.to_string()));
        self
    }

    fn cell_xml(&mut self, reference: &str, value: &V) -> String {
        match value {
            V::S(text) => {
                let idx = self.intern(text);
                format!(r#"<c r="{reference}" t="s"><v>{idx}</v></c>"#)
            }
            V::N(n) => format!(r#"<c r="{reference}"><v>{n}</v></c>"#),
            V::B(b) => format!(r#"<c r="{reference}" t="b"><v>{}</v></c>"#, u8::from(*b)),
            V::Blank => format!(r#"<c r="{reference}" s="1"/>"#),
        }
    }

    fn intern(&mut self, text: &str) -> usize {
        if let Some(pos) = self.strings.iter().position(|s| s == text) {
            return pos;
        }
        self.strings.push(text.to_string());
        self.strings.len() - 1
    }

    /// Serialize the package.
    pub fn build(&self) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();

        let mut content_types = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#,
        );
        for i in 1..=self.sheets.len() {
            content_types.push_str(&format!(
                r#"<Override PartName="/xl/worksheets/sheet{i}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#
            ));
        }
        content_types.push_str("</Types>");
        put(&mut zip, "[Content_Types].xml", &content_types, options);

        put(
            &mut zip,
            "_rels/.rels",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#,
            options,
        );

        let mut workbook = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>"#,
        );
        let mut rels = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );
        for (i, (name, _)) in self.sheets.iter().enumerate() {
            let n = i + 1;
            workbook.push_str(&format!(
                r#"<sheet name="{}" sheetId="{n}" r:id="rId{n}"/>"#,
                escape(name)
            ));
            rels.push_str(&format!(
                r#"<Relationship Id="rId{n}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{n}.xml"/>"#
            ));
        }
        workbook.push_str("</sheets></workbook>");
        rels.push_str("</Relationships>");
        put(&mut zip, "xl/workbook.xml", &workbook, options);
        put(&mut zip, "xl/_rels/workbook.xml.rels", &rels, options);

        let mut sst = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );
        for s in &self.strings {
            sst.push_str(&format!("<si><t>{}</t></si>", escape(s)));
        }
        sst.push_str("</sst>");
        put(&mut zip, "xl/sharedStrings.xml", &sst, options);

        for (i, (_, data)) in self.sheets.iter().enumerate() {
            let xml = format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{data}</sheetData></worksheet>"#
            );
            put(&mut zip, &format!("xl/worksheets/sheet{}.xml", i + 1), &xml, options);
        }

        zip.finish().unwrap().into_inner()
    }
}

fn put(zip: &mut ZipWriter<Cursor<Vec<u8>>>, name: &str, body: &str, options: SimpleFileOptions) {
    zip.start_file(name, options).unwrap();
    zip.write_all(body.as_bytes()).unwrap();
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn column_letter(col: usize) -> char {
    (b'A' + col as u8) as char
}

/// Run a conversion into a string.
pub fn convert_to_string(
    data: &[u8],
    options: &sheetjson::ConvertOptions,
) -> (sheetjson::Result<sheetjson::ConversionSummary>, String) {
    let mut out = Vec::new();
    let result = sheetjson::convert_bytes(data, options, &mut out);
    (result, String::from_utf8(out).unwrap())
}
