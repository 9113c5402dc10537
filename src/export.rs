use rust_xlsxwriter::{Format, Workbook, XlsxError};
use time::macros::format_description;

use crate::candidates::repo::Candidate;
use crate::employees::repo::Employee;

/// Serializes rows under human-readable headers into an xlsx workbook, built
/// entirely in memory so concurrent exports never share a file path.
fn build_workbook(
    sheet_name: &str,
    headers: &[&str],
    rows: Vec<Vec<String>>,
) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    let bold = Format::new().set_bold();
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &bold)?;
    }
    for (row, values) in rows.into_iter().enumerate() {
        for (col, value) in values.into_iter().enumerate() {
            worksheet.write_string(row as u32 + 1, col as u16, &value)?;
        }
    }

    workbook.save_to_buffer()
}

pub fn employees_to_xlsx(employees: &[Employee]) -> anyhow::Result<Vec<u8>> {
    let date_format = format_description!("[year]-[month]-[day]");
    let mut rows = Vec::with_capacity(employees.len());
    for e in employees {
        rows.push(vec![
            e.first_name.clone(),
            e.last_name.clone(),
            e.position.clone(),
            e.hire_date.format(&date_format)?,
            e.status.clone(),
        ]);
    }
    let bytes = build_workbook(
        "Employees",
        &["First Name", "Last Name", "Position", "Hire Date", "Status"],
        rows,
    )?;
    Ok(bytes)
}

pub fn candidates_to_xlsx(candidates: &[Candidate]) -> anyhow::Result<Vec<u8>> {
    let rows = candidates
        .iter()
        .map(|c| vec![c.name.clone(), c.position.clone(), c.status.clone()])
        .collect();
    let bytes = build_workbook("Candidates", &["Name", "Position", "Status"], rows)?;
    Ok(bytes)
}

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub fn attachment_disposition(filename: &str) -> String {
    format!("attachment; filename=\"{filename}\"")
}
