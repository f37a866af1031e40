use humansize::file_size_opts as options;
use humansize::FileSize;
use std::io::{self, Write};
use std::path::{Path, MAIN_SEPARATOR};

use super::scanner::ScanReport;

const KILOBYTE: u64 = 1024;
const MEGABYTE: u64 = KILOBYTE * 1024;
const GIGABYTE: u64 = MEGABYTE * 1024;

/// Formats a byte count with the largest applicable G/M/K suffix and one
/// decimal place, or as a raw integer below one kilobyte.
pub fn format_size(size: u64, human_readable: bool) -> String
{
    if !human_readable {
        return size.to_string();
    }

    if size >= GIGABYTE {
        format!("{:.1}G", size as f64 / GIGABYTE as f64)
    } else if size >= MEGABYTE {
        format!("{:.1}M", size as f64 / MEGABYTE as f64)
    } else if size >= KILOBYTE {
        format!("{:.1}K", size as f64 / KILOBYTE as f64)
    } else {
        size.to_string()
    }
}

pub fn build_total_line(total_size: u64, human_readable: bool, root: &Path) -> String
{
    format!("{}\t{}{}", format_size(total_size, human_readable), root.display(), MAIN_SEPARATOR)
}

pub fn print_total(writer: &mut impl Write, report: &ScanReport, human_readable: bool, root: &Path) -> io::Result<()>
{
    writeln!(writer, "{}", build_total_line(report.total_size, human_readable, root))
}

/// One-line statistics for the verbose log.
pub fn build_summary(report: &ScanReport) -> String
{
    let size_readable = report
        .total_size
        .file_size(options::BINARY)
        .unwrap_or_else(|_| report.total_size.to_string());

    let mut summary = format!(
        "{} in {} files across {} directories, took {}ms",
        size_readable,
        report.files,
        report.directories,
        report.duration.as_millis()
    );

    if !report.is_complete() {
        summary += &format!(" ({} unreadable)", report.errors.len());
    }

    summary
}
