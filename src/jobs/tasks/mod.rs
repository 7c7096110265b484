mod daily_report;

pub use daily_report::DailyReportTask;
