//! Excel export of the daily production report.
//!
//! One workbook, one sheet per report section. Returned as bytes for a
//! Content-Disposition download.

use rust_xlsxwriter::{Color, Format, Workbook, Worksheet, XlsxError};

use crate::models::Job;
use crate::services::todo::TodoReport;

fn xlsx_err(e: XlsxError) -> crate::error::AppError {
    crate::error::AppError::Internal {
        source: anyhow::anyhow!("Workbook generation failed: {}", e),
    }
}

const JOB_COLUMNS: [&str; 5] = ["Job #", "Name", "Workflow", "Status", "Due"];

fn section_format() -> Format {
    Format::new().set_bold().set_background_color(Color::RGB(0xDCE6F1))
}

fn header_format() -> Format {
    Format::new().set_bold()
}

fn write_job_table(
    sheet: &mut Worksheet,
    mut row: u32,
    title: &str,
    jobs: &[Job],
) -> Result<u32, XlsxError> {
    sheet.write_string_with_format(row, 0, title, &section_format())?;
    row += 1;

    for (col, name) in JOB_COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(row, col as u16, *name, &header_format())?;
    }
    row += 1;

    for job in jobs {
        sheet.write_number(row, 0, job.id as f64)?;
        sheet.write_string(row, 1, &job.name)?;
        sheet.write_string(row, 2, job.workflow.as_str())?;
        sheet.write_string(row, 3, job.status.as_str())?;
        let due = job
            .real_due_date
            .or(job.due_date)
            .map(|d| d.to_string())
            .unwrap_or_default();
        sheet.write_string(row, 4, &due)?;
        row += 1;
    }

    // Blank separator row.
    Ok(row + 1)
}

/// Build the daily report workbook.
pub fn todo_workbook(report: &TodoReport) -> crate::error::AppResult<Vec<u8>> {
    let mut workbook = Workbook::new();

    // Due jobs, one section per window day.
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Due Jobs").map_err(xlsx_err)?;
        sheet.set_column_width(1, 40).map_err(xlsx_err)?;

        let mut row = 0u32;
        for (index, day) in report.window.days().iter().enumerate() {
            let mut title = format!("Due {}", day);
            if report.manager_tools {
                let hours = &report.bucket_hours[index];
                title.push_str(&format!(
                    "  ({:.2} artist hrs / {:.2} office hrs)",
                    hours.artist_hours, hours.all_artist_hours
                ));
            }
            row = write_job_table(sheet, row, &title, &report.jobs_due[index]).map_err(xlsx_err)?;
        }
    }

    // Revisions per day plus the overdue backlog.
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Revisions").map_err(xlsx_err)?;
        sheet.set_column_width(1, 40).map_err(xlsx_err)?;

        let mut row = 0u32;
        for (index, day) in report.window.days().iter().enumerate() {
            row = write_job_table(
                sheet,
                row,
                &format!("Revisions due {}", day),
                &report.revisions_due[index],
            )
            .map_err(xlsx_err)?;
        }
        write_job_table(sheet, row, "Overdue revisions", &report.overdue_revisions)
            .map_err(xlsx_err)?;
    }

    // File-out buckets.
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("File Out").map_err(xlsx_err)?;
        sheet.set_column_width(1, 40).map_err(xlsx_err)?;

        let file_out = &report.file_out;
        let sections: [(&str, &Vec<Job>, f64); 6] = [
            ("File out today", &file_out.today, file_out.today_hours),
            ("File out tomorrow", &file_out.tomorrow, file_out.tomorrow_hours),
            ("File out +2 days", &file_out.plus_two, file_out.plus_two_hours),
            ("File out +3 days", &file_out.plus_three, file_out.plus_three_hours),
            ("File out later", &file_out.later, file_out.later_hours),
            ("File out overdue", &file_out.overdue, file_out.overdue_hours),
        ];

        let mut row = 0u32;
        for (name, jobs, hours) in sections {
            let title = if report.manager_tools {
                format!("{}  ({:.2} hrs)", name, hours)
            } else {
                name.to_string()
            };
            row = write_job_table(sheet, row, &title, jobs).map_err(xlsx_err)?;
        }
    }

    // Overdue, hold, and pending lists.
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Overdue and Holds").map_err(xlsx_err)?;
        sheet.set_column_width(1, 40).map_err(xlsx_err)?;

        let mut row = 0u32;
        row = write_job_table(sheet, row, "Overdue jobs", &report.overdue_jobs).map_err(xlsx_err)?;
        row = write_job_table(sheet, row, "Jobs on hold", &report.jobs_on_hold).map_err(xlsx_err)?;
        write_job_table(sheet, row, "Pending jobs", &report.jobs_pending).map_err(xlsx_err)?;
    }

    workbook.save_to_buffer().map_err(xlsx_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::todo::{DayWindow, WINDOW_DAYS};
    use crate::services::todo::{BucketHours, FileOutBuckets};
    use chrono::NaiveDate;

    fn empty_report() -> TodoReport {
        TodoReport {
            window: DayWindow::starting(NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()),
            jobs_due: std::array::from_fn(|_| Vec::new()),
            bucket_hours: [BucketHours::default(); WINDOW_DAYS],
            revisions_due: std::array::from_fn(|_| Vec::new()),
            overdue_revisions: Vec::new(),
            file_out: FileOutBuckets::default(),
            overdue_jobs: Vec::new(),
            jobs_on_hold: Vec::new(),
            jobs_pending: Vec::new(),
            manager_tools: true,
        }
    }

    #[test]
    fn workbook_bytes_are_a_zip_container() {
        let bytes = todo_workbook(&empty_report()).unwrap();
        // XLSX is a ZIP archive.
        assert_eq!(&bytes[..2], b"PK");
    }
}
