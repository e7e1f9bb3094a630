//! FILENAME: core/persistence/src/xlsx_writer.rs

use crate::layout::SheetLayout;
use crate::PersistenceError;
use engine::CellValue;
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook as XlsxWorkbook, Worksheet};
use std::path::Path;
use subtable_engine::MultiLevelTable;

/// Excel character width used for every table column.
const COLUMN_WIDTH: f64 = 24.0;

/// Writes a table to a single-sheet XLSX file.
///
/// Group labels spanning several adjacent columns are merged; flat columns
/// in a two-line header are merged vertically.
pub fn save_xlsx_table(table: &MultiLevelTable, path: &Path) -> Result<(), PersistenceError> {
    let mut xlsx = XlsxWorkbook::new();
    let worksheet = xlsx.add_worksheet();
    worksheet.set_name(table.name())?;

    let layout = SheetLayout::of(table);
    let header_format = header_format();
    let body_format = Format::new().set_text_wrap().set_align(FormatAlign::Top);
    let offset = layout.index_width as u16;

    // Index header cells
    for line in 0..layout.header_lines {
        for (i, label) in layout.index_labels(table, line).iter().enumerate() {
            if !label.is_empty() {
                worksheet.write_string_with_format(line as u32, i as u16, label, &header_format)?;
            }
        }
    }

    // Column header cells
    let last_line = (layout.header_lines - 1) as u32;
    for span in table.header().group_spans() {
        let first_col = offset + span.start as u16;
        let last_col = first_col + span.len as u16 - 1;
        if span.flat && last_line > 0 {
            worksheet.merge_range(0, first_col, last_line, first_col, &span.label, &header_format)?;
        } else if span.len > 1 {
            worksheet.merge_range(0, first_col, 0, last_col, &span.label, &header_format)?;
        } else {
            worksheet.write_string_with_format(0, first_col, &span.label, &header_format)?;
        }
        if !span.flat {
            for col in span.start..span.start + span.len {
                let label = layout.column_label(table, col, 1);
                worksheet.write_string_with_format(1, offset + col as u16, &label, &header_format)?;
            }
        }
    }

    // Body
    for row in 0..table.row_count() {
        let line = (layout.header_lines + row) as u32;
        for (i, cell) in layout.index_cells(table, row).iter().enumerate() {
            write_cell(worksheet, line, i as u16, cell, &header_format)?;
        }
        for (col, cell) in table.row_cells(row).iter().enumerate() {
            write_cell(worksheet, line, offset + col as u16, cell, &body_format)?;
        }
    }

    for col in 0..(offset as usize + table.column_count()) {
        worksheet.set_column_width(col as u16, COLUMN_WIDTH)?;
    }

    xlsx.save(path)?;
    Ok(())
}

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_text_wrap()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin)
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &CellValue,
    format: &Format,
) -> Result<(), PersistenceError> {
    match cell {
        CellValue::Empty => {}
        CellValue::Number(n) => {
            worksheet.write_number_with_format(row, col, *n, format)?;
        }
        CellValue::Boolean(b) => {
            worksheet.write_boolean_with_format(row, col, *b, format)?;
        }
        CellValue::Text(_) | CellValue::Date(_) => {
            worksheet.write_string_with_format(row, col, cell.display(), format)?;
        }
    }
    Ok(())
}
