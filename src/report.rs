use std::fmt::Write;

use crate::benchmark::TableReport;

const RULE: &str = "====================================================";

/// Full text block for one table: headline figures followed by the
/// per-bucket distribution and structural collisions.
pub fn render_table(report: &TableReport) -> String {
    let m = &report.metrics;
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "==== {} ====", report.title);
    let _ = writeln!(out, "Strategy: {}", report.strategy);
    let _ = writeln!(out, "Size: {}", m.size());
    let _ = writeln!(out, "Capacity: {}", m.capacity());
    let _ = writeln!(out, "Total collisions (insert): {}", m.collisions_total());
    let _ = writeln!(out, "Insert time (ns): {}", report.insert_time.as_nanos());
    let _ = writeln!(out, "Search time (ns): {}", report.search_time.as_nanos());
    let _ = writeln!(out, "Search probes: {} ({} found)", report.probes, report.found);
    let _ = writeln!(out, "Non-empty buckets: {}", m.non_empty_buckets());
    let _ = writeln!(out, "Max chain length: {}", m.max_chain_length());
    let _ = writeln!(
        out,
        "Average chain length (non-empty buckets only): {:.3}",
        m.avg_chain_len_non_empty()
    );

    let _ = writeln!(out, "\nDistribution (keys per bucket):");
    for (i, n) in m.distribution().iter().enumerate() {
        let _ = writeln!(out, "{i:02}: {n}");
    }
    let _ = writeln!(out, "\nCollisions per bucket (chain length - 1, min 0):");
    for (i, n) in m.collisions_per_bucket().iter().enumerate() {
        let _ = writeln!(out, "{i:02}: {n}");
    }
    out
}

/// `title (cap=N):` followed by `0:a | 1:b | ...` on the next line.
pub fn render_bucket_row(title: &str, values: &[usize]) -> String {
    let row = values
        .iter()
        .enumerate()
        .map(|(i, v)| format!("{i}:{v}"))
        .collect::<Vec<_>>()
        .join(" | ");
    format!("{} (cap={}):\n{}", title, values.len(), row)
}

/// Console report for every table, separated by rules.
pub fn render_console(reports: &[TableReport]) -> String {
    let mut out = String::new();
    for (n, report) in reports.iter().enumerate() {
        let _ = writeln!(out, "{RULE}");
        let _ = writeln!(out, "{}", render_table(report));
        let _ = writeln!(out, "-- BUCKET DISTRIBUTION (table {}) --", n + 1);
        let _ = writeln!(out, "{}", render_bucket_row("Keys per bucket", report.metrics.distribution()));
        let _ = writeln!(
            out,
            "{}",
            render_bucket_row("Collisions per bucket", report.metrics.collisions_per_bucket())
        );
        out.push('\n');
    }
    let _ = writeln!(out, "{RULE}");
    out
}
