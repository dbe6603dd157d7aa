pub mod bug_reports;
