//! Record serialization against a layout table.

use std::io::Write;

use chrono::NaiveDate;
use patron_model::{CandidateRecord, CanonicalValue, FieldType, FlatRecord};
use tracing::info;

use crate::error::FlatError;
use crate::layout::{BlockKind, FlatLayout, LayoutKind};

/// Streams encoded records to any [`Write`] sink.
///
/// The caller owns buffering decisions; the pipeline wraps files in a
/// `BufWriter` before handing them over.
pub struct FlatWriter<'a, W: Write> {
    writer: W,
    layout: &'a FlatLayout,
    records_written: usize,
}

impl<'a, W: Write> FlatWriter<'a, W> {
    /// Checks the layout and wraps the sink.
    pub fn new(writer: W, layout: &'a FlatLayout) -> Result<Self, FlatError> {
        layout.check()?;
        Ok(Self {
            writer,
            layout,
            records_written: 0,
        })
    }

    /// Encodes one record in layout order.
    pub fn write_record(&mut self, record: &FlatRecord) -> Result<(), FlatError> {
        match &self.layout.kind {
            LayoutKind::Tagged { form } => self.write_tagged(form.clone(), record)?,
            LayoutKind::FixedWidth => self.write_fixed(record)?,
            LayoutKind::Delimited { delimiter } => self.write_delimited(*delimiter, record)?,
        }
        self.records_written += 1;
        Ok(())
    }

    /// Encodes a batch in iteration order.
    pub fn write_all<'r, I>(&mut self, records: I) -> Result<(), FlatError>
    where
        I: IntoIterator<Item = &'r FlatRecord>,
    {
        for record in records {
            self.write_record(record)?;
        }
        Ok(())
    }

    /// Flushes and returns the sink.
    pub fn finish(mut self) -> Result<W, FlatError> {
        self.writer.flush()?;
        info!(records = self.records_written, "flat output flushed");
        Ok(self.writer)
    }

    pub fn records_written(&self) -> usize {
        self.records_written
    }

    fn write_tagged(&mut self, form: String, record: &FlatRecord) -> Result<(), FlatError> {
        writeln!(self.writer, "*** DOCUMENT BOUNDARY ***")?;
        writeln!(self.writer, "FORM={form}")?;
        for (tag, value) in &self.layout.defaults {
            writeln!(self.writer, ".{tag}.   |a{value}")?;
        }
        // Un-blocked fields first, then each block wrapped in its
        // BEGIN/END markers, and only when it has content.
        for field in &self.layout.fields {
            if field.block.is_none() {
                if let Some(value) = self.render(record, field.field) {
                    writeln!(self.writer, ".{}.   |a{}", field.tag, value)?;
                }
            }
        }
        self.write_block(record, BlockKind::Address, "USER_ADDR1")?;
        self.write_block(record, BlockKind::ExtendedInfo, "USER_XINFO")?;
        Ok(())
    }

    fn write_block(
        &mut self,
        record: &FlatRecord,
        block: BlockKind,
        marker: &str,
    ) -> Result<(), FlatError> {
        let members: Vec<(String, String)> = self
            .layout
            .fields
            .iter()
            .filter(|field| field.block == Some(block))
            .filter_map(|field| {
                self.render(record, field.field)
                    .map(|value| (field.tag.clone(), value))
            })
            .collect();
        if members.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, ".{marker}_BEGIN.")?;
        for (tag, value) in members {
            writeln!(self.writer, ".{tag}.   |a{value}")?;
        }
        writeln!(self.writer, ".{marker}_END.")?;
        Ok(())
    }

    fn write_fixed(&mut self, record: &FlatRecord) -> Result<(), FlatError> {
        let mut line = String::with_capacity(self.layout.total_width());
        for field in &self.layout.fields {
            let width = field.width.unwrap_or(0);
            let value = self.render(record, field.field).unwrap_or_default();
            let mut cell: String = value.chars().take(width).collect();
            while cell.chars().count() < width {
                cell.push(' ');
            }
            line.push_str(&cell);
        }
        writeln!(self.writer, "{line}")?;
        Ok(())
    }

    fn write_delimited(&mut self, delimiter: char, record: &FlatRecord) -> Result<(), FlatError> {
        let values: Vec<String> = self
            .layout
            .fields
            .iter()
            .map(|field| self.render(record, field.field).unwrap_or_default())
            .collect();
        writeln!(self.writer, "{}", values.join(&delimiter.to_string()))?;
        Ok(())
    }

    fn render(&self, record: &FlatRecord, field: FieldType) -> Option<String> {
        record.get(field).map(|value| match value {
            CanonicalValue::Text(text) => text.clone(),
            CanonicalValue::Date(date) => date.format(&self.layout.date_format).to_string(),
        })
    }
}

/// Decodes one fixed-width line back into a record.
///
/// The inverse of the fixed-width encoding, used to verify that a
/// layout loses nothing. Blank cells come back as absent fields.
pub fn decode_fixed(layout: &FlatLayout, line: &str) -> Result<FlatRecord, FlatError> {
    layout.check()?;
    let expected = layout.total_width();
    let chars: Vec<char> = line.chars().collect();
    if chars.len() != expected {
        return Err(FlatError::WidthMismatch {
            expected,
            actual: chars.len(),
        });
    }

    let mut candidate = CandidateRecord::new(0);
    let mut offset = 0;
    for field in &layout.fields {
        let width = field.width.unwrap_or(0);
        let cell: String = chars[offset..offset + width].iter().collect();
        offset += width;
        let trimmed = cell.trim_end();
        if trimmed.is_empty() {
            continue;
        }
        let value = if field.field == FieldType::Date {
            let date = NaiveDate::parse_from_str(trimmed, &layout.date_format).map_err(|_| {
                FlatError::InvalidDate {
                    tag: field.tag.clone(),
                    value: trimmed.to_string(),
                }
            })?;
            CanonicalValue::Date(date)
        } else {
            CanonicalValue::Text(trimmed.to_string())
        };
        candidate.insert(field.field, value);
    }
    Ok(FlatRecord::from_accepted(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::FlatField;
    use patron_model::FieldType;

    fn record(fields: &[(FieldType, CanonicalValue)]) -> FlatRecord {
        let mut candidate = CandidateRecord::new(0);
        for (field, value) in fields {
            candidate.insert(*field, value.clone());
        }
        FlatRecord::from_accepted(candidate)
    }

    fn sample() -> FlatRecord {
        record(&[
            (FieldType::GivenName, CanonicalValue::text("Jane")),
            (FieldType::FamilyName, CanonicalValue::text("Doe")),
            (FieldType::Phone, CanonicalValue::text("780-242-9978")),
            (FieldType::PostalCode, CanonicalValue::text("T6G0G4")),
            (
                FieldType::Date,
                CanonicalValue::Date(NaiveDate::from_ymd_opt(2005, 12, 23).unwrap()),
            ),
        ])
    }

    #[test]
    fn tagged_output_matches_the_symphony_shape() {
        let layout = FlatLayout::symphony_default();
        let mut writer = FlatWriter::new(Vec::new(), &layout).unwrap();
        writer.write_record(&sample()).unwrap();
        let bytes = writer.finish().unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.starts_with("*** DOCUMENT BOUNDARY ***\nFORM=LDUSER\n"));
        assert!(text.contains(".USER_PREF_LANG.   |aENGLISH\n"));
        assert!(text.contains(".USER_FIRST_NAME.   |aJane\n"));
        assert!(text.contains(".USER_BIRTH_DATE.   |a20051223\n"));
        // Address fields sit inside the addr1 block.
        let begin = text.find(".USER_ADDR1_BEGIN.").unwrap();
        let end = text.find(".USER_ADDR1_END.").unwrap();
        let phone = text.find(".PHONE.   |a780-242-9978").unwrap();
        assert!(begin < phone && phone < end);
        // No xinfo fields, so no xinfo block.
        assert!(!text.contains("USER_XINFO_BEGIN"));
    }

    #[test]
    fn empty_address_block_is_omitted() {
        let layout = FlatLayout::symphony_default();
        let mut writer = FlatWriter::new(Vec::new(), &layout).unwrap();
        writer
            .write_record(&record(&[(
                FieldType::GivenName,
                CanonicalValue::text("Jane"),
            )]))
            .unwrap();
        let text = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert!(!text.contains("USER_ADDR1_BEGIN"));
    }

    fn fixed_layout() -> FlatLayout {
        FlatLayout {
            kind: LayoutKind::FixedWidth,
            fields: vec![
                FlatField {
                    field: FieldType::GivenName,
                    tag: "FIRST".into(),
                    width: Some(12),
                    block: None,
                },
                FlatField {
                    field: FieldType::Barcode,
                    tag: "ID".into(),
                    width: Some(14),
                    block: None,
                },
                FlatField {
                    field: FieldType::Date,
                    tag: "DOB".into(),
                    width: Some(8),
                    block: None,
                },
            ],
            defaults: Vec::new(),
            date_format: "%Y%m%d".to_string(),
        }
    }

    #[test]
    fn fixed_width_round_trips() {
        let layout = fixed_layout();
        let original = record(&[
            (FieldType::GivenName, CanonicalValue::text("Jane")),
            (FieldType::Barcode, CanonicalValue::text("21221012345678")),
            (
                FieldType::Date,
                CanonicalValue::Date(NaiveDate::from_ymd_opt(2005, 12, 23).unwrap()),
            ),
        ]);

        let mut writer = FlatWriter::new(Vec::new(), &layout).unwrap();
        writer.write_record(&original).unwrap();
        let text = String::from_utf8(writer.finish().unwrap()).unwrap();
        let line = text.lines().next().unwrap();
        assert_eq!(line.chars().count(), layout.total_width());

        let decoded = decode_fixed(&layout, line).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn fixed_decode_rejects_bad_width_and_dates() {
        let layout = fixed_layout();
        assert!(matches!(
            decode_fixed(&layout, "short"),
            Err(FlatError::WidthMismatch { .. })
        ));
        let bad = format!("{:<12}{:<14}{:<8}", "Jane", "212210", "20x51223");
        assert!(matches!(
            decode_fixed(&layout, &bad),
            Err(FlatError::InvalidDate { .. })
        ));
    }

    #[test]
    fn delimited_layout_joins_in_order() {
        let mut layout = fixed_layout();
        layout.kind = LayoutKind::Delimited { delimiter: '|' };
        let mut writer = FlatWriter::new(Vec::new(), &layout).unwrap();
        writer
            .write_record(&record(&[
                (FieldType::GivenName, CanonicalValue::text("Jane")),
                (
                    FieldType::Date,
                    CanonicalValue::Date(NaiveDate::from_ymd_opt(2005, 12, 23).unwrap()),
                ),
            ]))
            .unwrap();
        let text = String::from_utf8(writer.finish().unwrap()).unwrap();
        // Missing barcode leaves its slot empty.
        assert_eq!(text, "Jane||20051223\n");
    }
}
