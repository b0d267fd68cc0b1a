use std::path::Path;

use anyhow::Result;
use resume_screen_core::{CandidateRecord, Ranking};
use rust_xlsxwriter::{Format, Workbook};

pub const WORK_EXPERIENCE_DISPLAY_LIMIT: usize = 500;

const REPORT_COLUMNS: [&str; 7] = [
    "Rank",
    "Name",
    "Phone",
    "Email",
    "Score",
    "Work Experience",
    "Skills",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRow {
    pub rank: usize,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub score: String,
    pub work_experience: String,
    pub skills: String,
}

pub fn build_rows(ranking: &Ranking, records: &[CandidateRecord]) -> Vec<CandidateRow> {
    ranking
        .order
        .iter()
        .enumerate()
        .map(|(position, &index)| {
            let record = &records[index];
            CandidateRow {
                rank: position + 1,
                name: sanitize_cell(&record.full_name),
                phone: sanitize_cell(&record.phone_number),
                email: sanitize_cell(&record.email_address),
                score: format!("{:.2}", ranking.scores[index]),
                work_experience: truncate_cell(
                    &sanitize_cell(&record.work_experience),
                    WORK_EXPERIENCE_DISPLAY_LIMIT,
                ),
                skills: sanitize_cell(&record.skills),
            }
        })
        .collect()
}

fn sanitize_cell(value: &str) -> String {
    value.replace('\n', " ").replace("  ", " ")
}

fn truncate_cell(value: &str, limit: usize) -> String {
    if value.chars().count() > limit {
        let mut truncated: String = value.chars().take(limit).collect();
        truncated.push_str("...");
        truncated
    } else {
        value.to_string()
    }
}

pub fn write_xlsx(path: &Path, rows: &[CandidateRow]) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Candidates")?;

    let header_format = Format::new().set_bold();
    for (column, header) in REPORT_COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, column as u16, *header, &header_format)?;
    }

    for (index, row) in rows.iter().enumerate() {
        let sheet_row = (index + 1) as u32;
        worksheet.write_number(sheet_row, 0, row.rank as f64)?;
        worksheet.write_string(sheet_row, 1, row.name.as_str())?;
        worksheet.write_string(sheet_row, 2, row.phone.as_str())?;
        worksheet.write_string(sheet_row, 3, row.email.as_str())?;
        worksheet.write_string(sheet_row, 4, row.score.as_str())?;
        worksheet.write_string(sheet_row, 5, row.work_experience.as_str())?;
        worksheet.write_string(sheet_row, 6, row.skills.as_str())?;
    }

    workbook.save(path)?;
    Ok(())
}

pub fn write_csv(path: &Path, rows: &[CandidateRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(REPORT_COLUMNS)?;

    for row in rows {
        let rank = row.rank.to_string();
        writer.write_record([
            rank.as_str(),
            row.name.as_str(),
            row.phone.as_str(),
            row.email.as_str(),
            row.score.as_str(),
            row.work_experience.as_str(),
            row.skills.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
