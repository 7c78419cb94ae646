//! XLSX workbook loading and worksheet parsing.

use crate::container::WorkbookPackage;
use crate::detect::ensure_workbook;
use crate::error::{Error, Result};
use crate::model::{Cell, CellRef, CellValue, Row, Sheet};
use quick_xml::events::{BytesStart, Event};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::shared_strings::SharedStrings;

const WORKBOOK_PART: &str = "xl/workbook.xml";
const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";

/// Sheet entry from workbook.xml, with its part path resolved.
#[derive(Debug, Clone)]
struct SheetInfo {
    name: String,
    part: String,
}

/// An opened XLSX workbook.
///
/// Sheet metadata and shared strings are read up front; worksheet parts are
/// parsed on demand by [`Workbook::sheet`].
///
/// # Example
///
/// ```no_run
/// use sheetjson::xlsx::Workbook;
///
/// let workbook = Workbook::open("ExampleSheet.xlsx")?;
/// for index in 0..workbook.sheet_count() {
///     let sheet = workbook.sheet(index)?;
///     println!("{}: {} rows", sheet.name, sheet.rows.len());
/// }
/// # Ok::<(), sheetjson::Error>(())
/// ```
#[derive(Debug)]
pub struct Workbook {
    package: WorkbookPackage,
    shared_strings: SharedStrings,
    sheets: Vec<SheetInfo>,
}

impl Workbook {
    /// Open an XLSX file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "opening workbook");

        let mut reader = BufReader::new(File::open(path)?);
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Load a workbook from in-memory bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        ensure_workbook(&data)?;
        Self::from_package(WorkbookPackage::from_bytes(data)?)
    }

    fn from_package(package: WorkbookPackage) -> Result<Self> {
        let shared_strings = match package.read_optional_xml(SHARED_STRINGS_PART)? {
            Some(xml) => SharedStrings::parse(&xml)?,
            None => SharedStrings::default(),
        };

        let sheets = Self::parse_workbook(&package)?;
        tracing::debug!(sheets = sheets.len(), "loaded workbook");

        Ok(Self {
            package,
            shared_strings,
            sheets,
        })
    }

    /// Read the ordered sheet list and resolve each sheet's part path.
    fn parse_workbook(package: &WorkbookPackage) -> Result<Vec<SheetInfo>> {
        let xml = package.read_xml(WORKBOOK_PART)?;
        let rels = package.read_relationships(WORKBOOK_PART)?;

        let mut reader = quick_xml::Reader::from_str(&xml);
        reader.config_mut().trim_text(true);

        let mut sheets = Vec::new();
        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e)) if e.name().as_ref() == b"sheet" => {
                    let mut name = String::new();
                    let mut rel_id = String::new();
                    for attr in e.attributes().flatten() {
                        let key = attr.key.as_ref();
                        if key == b"name" {
                            name = attr
                                .unescape_value()
                                .map_err(|err| Error::XmlParse(err.to_string()))?
                                .into_owned();
                        } else if key == b"r:id" || key.ends_with(b":id") {
                            rel_id = String::from_utf8_lossy(&attr.value).into_owned();
                        }
                    }

                    let rel = rels.get(&rel_id).ok_or_else(|| {
                        Error::MissingComponent(format!(
                            "relationship '{rel_id}' for sheet '{name}'"
                        ))
                    })?;
                    if !rel.is_worksheet() {
                        // chartsheets and dialog sheets have no cell grid
                        tracing::debug!(sheet = %name, rel_type = %rel.rel_type, "skipping non-worksheet sheet");
                    } else if rel.external {
                        return Err(Error::InvalidData(format!(
                            "sheet '{name}' points outside the package"
                        )));
                    } else {
                        sheets.push(SheetInfo {
                            name,
                            part: WorkbookPackage::resolve_path(WORKBOOK_PART, &rel.target),
                        });
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(sheets)
    }

    /// Get the number of sheets.
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Get sheet names in workbook order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Name of the sheet at `index`.
    pub fn sheet_name(&self, index: usize) -> Option<&str> {
        self.sheets.get(index).map(|s| s.name.as_str())
    }

    /// Parse the sheet at `index`.
    pub fn sheet(&self, index: usize) -> Result<Sheet> {
        let info = self.sheets.get(index).ok_or_else(|| {
            Error::InvalidData(format!(
                "sheet index {index} out of range ({} sheets)",
                self.sheets.len()
            ))
        })?;

        let xml = self.package.read_xml(&info.part)?;
        let mut sheet = Sheet::new(info.name.clone(), index);
        self.parse_sheet(&xml, &mut sheet)?;

        tracing::debug!(sheet = %sheet.name, part = %info.part, rows = sheet.rows.len(), "parsed sheet");
        Ok(sheet)
    }

    /// Parse every sheet in workbook order.
    pub fn sheets(&self) -> impl Iterator<Item = Result<Sheet>> + '_ {
        (0..self.sheets.len()).map(move |index| self.sheet(index))
    }

    /// Parse worksheet XML into rows of typed cells.
    fn parse_sheet(&self, xml: &str, sheet: &mut Sheet) -> Result<()> {
        let mut reader = quick_xml::Reader::from_str(xml);
        reader.config_mut().trim_text(false);

        let mut buf = Vec::new();
        let mut current_row: Option<Row> = None;
        let mut next_row = 0usize;
        let mut cell: Option<PendingCell> = None;
        let mut in_value = false;
        let mut phonetic_depth = 0usize;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => match e.name().as_ref() {
                    b"row" => {
                        let index = row_index(e)?.unwrap_or(next_row);
                        current_row = Some(Row::new(index));
                    }
                    b"c" => {
                        if let Some(row) = current_row.as_ref() {
                            cell = Some(PendingCell::start(e, row)?);
                        }
                    }
                    b"rPh" => phonetic_depth += 1,
                    b"v" | b"t" if cell.is_some() && phonetic_depth == 0 => in_value = true,
                    _ => {}
                },
                Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                    b"row" => {
                        let index = row_index(e)?.unwrap_or(next_row);
                        next_row = following_row(index)?;
                        sheet.add_row(Row::new(index));
                    }
                    b"c" => {
                        if let Some(row) = current_row.as_mut() {
                            let pending = PendingCell::start(e, row)?;
                            row.add_cell(Cell::new(pending.column, CellValue::Empty));
                        }
                    }
                    _ => {}
                },
                Ok(Event::Text(ref e)) if in_value => {
                    let text = e.unescape().map_err(|err| Error::XmlParse(err.to_string()))?;
                    if let Some(pending) = cell.as_mut() {
                        pending.raw.push_str(&text);
                        pending.has_value = true;
                    }
                }
                Ok(Event::End(ref e)) => match e.name().as_ref() {
                    b"row" => {
                        if let Some(row) = current_row.take() {
                            next_row = following_row(row.index)?;
                            sheet.add_row(row);
                        }
                    }
                    b"c" => {
                        if let (Some(pending), Some(row)) = (cell.take(), current_row.as_mut()) {
                            let value = self.resolve_value(&pending)?;
                            row.add_cell(Cell::new(pending.column, value));
                        }
                    }
                    b"rPh" => phonetic_depth = phonetic_depth.saturating_sub(1),
                    b"v" | b"t" => in_value = false,
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(())
    }

    /// Turn a cell's raw text and type attribute into a [`CellValue`].
    fn resolve_value(&self, cell: &PendingCell) -> Result<CellValue> {
        if !cell.has_value {
            return Ok(CellValue::Empty);
        }

        let raw = cell.raw.as_str();
        let value = match cell.cell_type.as_deref() {
            Some("s") => {
                let text = raw
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .and_then(|idx| self.shared_strings.get(idx))
                    .ok_or_else(|| {
                        Error::InvalidData(format!("shared string index {raw:?} out of range"))
                    })?;
                CellValue::Text(text.to_string())
            }
            Some("str") | Some("inlineStr") => CellValue::Text(raw.to_string()),
            // NaN, infinities and out-of-range literals have no JSON number form
            None | Some("n") => match raw.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => CellValue::Number(n),
                _ => CellValue::Other(raw.to_string()),
            },
            // booleans, errors and ISO dates
            Some(_) => CellValue::Other(raw.to_string()),
        };
        Ok(value)
    }
}

/// A `<c>` element whose value is still being read.
#[derive(Debug)]
struct PendingCell {
    column: usize,
    cell_type: Option<String>,
    raw: String,
    has_value: bool,
}

impl PendingCell {
    /// Read the attributes of a `<c>` element.
    ///
    /// Cells without an `r` reference follow the previous cell in the row.
    fn start(e: &BytesStart<'_>, row: &Row) -> Result<Self> {
        let mut column = match row.cells.last() {
            Some(last) => last.column.checked_add(1).ok_or_else(|| {
                Error::InvalidData(format!("column after {} overflows", last.column))
            })?,
            None => 0,
        };
        let mut cell_type = None;

        for attr in e.attributes().flatten() {
            match attr.key.as_ref() {
                b"r" => {
                    let reference = String::from_utf8_lossy(&attr.value);
                    let parsed = CellRef::parse(&reference).ok_or_else(|| {
                        Error::InvalidData(format!("bad cell reference {reference:?}"))
                    })?;
                    column = parsed.column;
                }
                b"t" => cell_type = Some(String::from_utf8_lossy(&attr.value).into_owned()),
                _ => {}
            }
        }

        Ok(Self {
            column,
            cell_type,
            raw: String::new(),
            has_value: false,
        })
    }
}

/// Zero-based index from a `<row r="N">` attribute.
fn row_index(e: &BytesStart<'_>) -> Result<Option<usize>> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == b"r" {
            let text = String::from_utf8_lossy(&attr.value);
            return text
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .map(Some)
                .ok_or_else(|| Error::InvalidData(format!("bad row number {text:?}")));
        }
    }
    Ok(None)
}

/// Index of the row implied after `index` when the next `<row>` has no `r`.
fn following_row(index: usize) -> Result<usize> {
    index
        .checked_add(1)
        .ok_or_else(|| Error::InvalidData(format!("row after {index} overflows")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workbook_with_strings(strings: &[&str]) -> Workbook {
        let xml = format!(
            "<sst>{}</sst>",
            strings
                .iter()
                .map(|s| format!("<si><t>{s}</t></si>"))
                .collect::<String>()
        );
        let package = {
            use std::io::{Cursor, Write};
            let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
            let opts = zip::write::SimpleFileOptions::default();
            zip.start_file(WORKBOOK_PART, opts).unwrap();
            zip.write_all(b"<workbook><sheets/></workbook>").unwrap();
            zip.start_file(SHARED_STRINGS_PART, opts).unwrap();
            zip.write_all(xml.as_bytes()).unwrap();
            WorkbookPackage::from_bytes(zip.finish().unwrap().into_inner()).unwrap()
        };
        Workbook::from_package(package).unwrap()
    }

    fn parse(workbook: &Workbook, body: &str) -> Sheet {
        let xml = format!("<worksheet><sheetData>{body}</sheetData></worksheet>");
        let mut sheet = Sheet::new("Test", 0);
        workbook.parse_sheet(&xml, &mut sheet).unwrap();
        sheet
    }

    #[test]
    fn test_cell_types() {
        let wb = workbook_with_strings(&["Id", "Qty"]);
        let sheet = parse(
            &wb,
            r#"<row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c></row>
               <row r="2"><c r="A2"><v>1</v></c><c r="B2" t="n"><v>2.5</v></c>
                 <c r="C2" t="b"><v>1</v></c><c r="D2" t="inlineStr"><is><t>hi</t></is></c>
                 <c r="E2" s="3"/><c r="F2" t="str"><f>A2&amp;"x"</f><v>1x</v></c></row>"#,
        );

        assert_eq!(sheet.rows.len(), 2);
        let header: Vec<&CellValue> = sheet.rows[0].cells.iter().map(|c| &c.value).collect();
        assert_eq!(
            header,
            vec![&CellValue::Text("Id".into()), &CellValue::Text("Qty".into())]
        );

        let data = &sheet.rows[1].cells;
        assert_eq!(data[0], Cell::new(0, CellValue::Number(1.0)));
        assert_eq!(data[1], Cell::new(1, CellValue::Number(2.5)));
        assert_eq!(data[2], Cell::new(2, CellValue::Other("1".into())));
        assert_eq!(data[3], Cell::new(3, CellValue::Text("hi".into())));
        assert_eq!(data[4], Cell::new(4, CellValue::Empty));
        assert_eq!(data[5], Cell::new(5, CellValue::Text("1x".into())));
    }

    #[test]
    fn test_row_and_column_gaps() {
        let wb = workbook_with_strings(&[]);
        let sheet = parse(
            &wb,
            r#"<row r="2"><c r="C2"><v>3</v></c></row><row r="5"/><row><c><v>1</v></c><c><v>2</v></c></row>"#,
        );

        let indices: Vec<usize> = sheet.rows.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![1, 4, 5]);
        assert_eq!(sheet.rows[0].cells[0].column, 2);
        assert!(sheet.rows[1].cells.is_empty());
        let cols: Vec<usize> = sheet.rows[2].cells.iter().map(|c| c.column).collect();
        assert_eq!(cols, vec![0, 1]);
    }

    #[test]
    fn test_formula_without_cached_value_is_empty() {
        let wb = workbook_with_strings(&[]);
        let sheet = parse(&wb, r#"<row r="1"><c r="A1"><f>SUM(B1:B2)</f></c></row>"#);
        assert_eq!(sheet.rows[0].cells[0].value, CellValue::Empty);
    }

    #[test]
    fn test_bad_shared_string_index() {
        let wb = workbook_with_strings(&["only"]);
        let xml = r#"<worksheet><sheetData><row r="1"><c r="A1" t="s"><v>4</v></c></row></sheetData></worksheet>"#;
        let mut sheet = Sheet::new("Test", 0);
        assert!(matches!(
            wb.parse_sheet(xml, &mut sheet),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn test_non_finite_numbers_are_not_numeric() {
        let wb = workbook_with_strings(&[]);
        let sheet = parse(
            &wb,
            r#"<row r="1"><c r="A1"><v>1e999</v></c><c r="B1"><v>NaN</v></c><c r="C1" t="n"><v>-inf</v></c><c r="D1"><v>1e308</v></c></row>"#,
        );

        let cells = &sheet.rows[0].cells;
        assert_eq!(cells[0].value, CellValue::Other("1e999".into()));
        assert_eq!(cells[1].value, CellValue::Other("NaN".into()));
        assert_eq!(cells[2].value, CellValue::Other("-inf".into()));
        assert_eq!(cells[3].value, CellValue::Number(1e308));
    }

    #[test]
    fn test_inline_string_skips_phonetic_runs() {
        let wb = workbook_with_strings(&[]);
        let sheet = parse(
            &wb,
            r#"<row r="1"><c r="A1" t="inlineStr"><is><r><t>東</t></r><r><t>京</t></r><rPh sb="0" eb="2"><t>トウキョウ</t></rPh></is></c><c r="B1" t="inlineStr"><is><t>都</t></is></c></row>"#,
        );

        let cells = &sheet.rows[0].cells;
        assert_eq!(cells[0].value, CellValue::Text("東京".into()));
        assert_eq!(cells[1].value, CellValue::Text("都".into()));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_row_number_overflow() {
        let wb = workbook_with_strings(&[]);
        for body in [
            r#"<row r="18446744073709551615"/><row/>"#,
            r#"<row r="18446744073709551615"></row><row><c><v>1</v></c></row>"#,
        ] {
            let xml = format!("<worksheet><sheetData>{body}</sheetData></worksheet>");
            let mut sheet = Sheet::new("Test", 0);
            assert!(matches!(
                wb.parse_sheet(&xml, &mut sheet),
                Err(Error::InvalidData(_))
            ));
        }
    }

    #[test]
    fn test_last_row_without_successor_is_kept() {
        let wb = workbook_with_strings(&[]);
        let sheet = parse(&wb, &format!(r#"<row r="{}"><c r="A1"><v>1</v></c></row>"#, usize::MAX));
        assert_eq!(sheet.rows[0].index, usize::MAX - 1);
    }

    fn workbook_with_rels(sheets: &str, rels: &str) -> Result<Workbook> {
        use std::io::{Cursor, Write};
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let opts = zip::write::SimpleFileOptions::default();
        let workbook = format!(
            r#"<workbook xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>{sheets}</sheets></workbook>"#
        );
        let rels = format!(
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{rels}</Relationships>"#
        );
        for (name, body) in [
            (WORKBOOK_PART, workbook.as_str()),
            ("xl/_rels/workbook.xml.rels", rels.as_str()),
            ("xl/worksheets/sheet1.xml", "<worksheet><sheetData/></worksheet>"),
        ] {
            zip.start_file(name, opts).unwrap();
            zip.write_all(body.as_bytes()).unwrap();
        }
        let package = WorkbookPackage::from_bytes(zip.finish().unwrap().into_inner())?;
        Workbook::from_package(package)
    }

    #[test]
    fn test_chartsheets_are_skipped() {
        let wb = workbook_with_rels(
            r#"<sheet name="Data" sheetId="1" r:id="rId1"/><sheet name="Chart" sheetId="2" r:id="rId2"/>"#,
            r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
               <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/chartsheet" Target="chartsheets/sheet1.xml"/>"#,
        )
        .unwrap();

        assert_eq!(wb.sheet_names(), vec!["Data"]);
        assert!(wb.sheet(0).unwrap().rows.is_empty());
    }

    #[test]
    fn test_external_sheet_target_is_rejected() {
        let result = workbook_with_rels(
            r#"<sheet name="Remote" sheetId="1" r:id="rId1"/>"#,
            r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="file:///tmp/other.xlsx" TargetMode="External"/>"#,
        );
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_sheet_index_out_of_range() {
        let wb = workbook_with_strings(&[]);
        assert_eq!(wb.sheet_count(), 0);
        assert!(matches!(wb.sheet(0), Err(Error::InvalidData(_))));
    }
}
