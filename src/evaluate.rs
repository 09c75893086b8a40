//! Status evaluation
//!
//! Maps the OCS status code and the metrics record to a severity, the
//! summary line and the performance data. Only the status code and the
//! number of pending app updates influence the severity.

use crate::constants::SIZE_DECIMALS;
use crate::models::{ApiStatus, EvaluationResult, MetricsRecord, PerfDatum, Severity};
use crate::output::humanize_bytes;

/// Evaluate one serverinfo response.
///
/// `metrics` is only consulted for status code 200.
pub fn evaluate(status: &ApiStatus, metrics: Option<&MetricsRecord>) -> EvaluationResult {
    match (status.statuscode, metrics) {
        (200, Some(metrics)) => evaluate_healthy(metrics),
        (200, None) => upstream(Severity::Unknown, status),
        (400..=599, _) => upstream(Severity::Critical, status),
        _ => upstream(Severity::Warning, status),
    }
}

fn upstream(severity: Severity, status: &ApiStatus) -> EvaluationResult {
    EvaluationResult {
        severity,
        summary: format!("{}: {}: {}", severity, status.status, status.message),
        perf_data: Vec::new(),
    }
}

fn evaluate_healthy(metrics: &MetricsRecord) -> EvaluationResult {
    let severity = if metrics.app_updates_available > 0 {
        Severity::Warning
    } else {
        Severity::Ok
    };

    EvaluationResult {
        severity,
        summary: summary_line(severity, metrics),
        perf_data: perf_data(metrics),
    }
}

fn summary_line(severity: Severity, m: &MetricsRecord) -> String {
    let mut line = format!(
        "{} - Nextcloud {} ({} available), ",
        severity,
        m.version,
        humanize_bytes(u128::from(m.free_space), SIZE_DECIMALS)
    );

    if m.app_updates_available > 0 {
        line.push_str(&format!(
            "{} app updates available ({}), ",
            m.app_updates_available,
            m.app_updates.join(", ")
        ));
    }

    line.push_str(&format!(
        "{} users ({} < 5min, {} < 1h, {} < 24h), {} files, ",
        m.users,
        m.active_users.last_5_minutes,
        m.active_users.last_hour,
        m.active_users.last_day,
        m.files
    ));
    line.push_str(&format!(
        "{} shares ({} user, {} group, {} link, {} federated), ",
        m.shares.total, m.shares.user, m.shares.groups, m.shares.link, m.shares.federated_sent
    ));
    line.push_str(&format!(
        "{}, PHP {}, {} {} ({})",
        m.webserver,
        m.php_version,
        m.database.kind,
        m.database.version,
        humanize_bytes(u128::from(m.database.size), SIZE_DECIMALS)
    ));

    line
}

fn perf_data(m: &MetricsRecord) -> Vec<PerfDatum> {
    vec![
        PerfDatum::bytes("free_space", m.free_space),
        PerfDatum::new("load1", m.cpu_load[0]),
        PerfDatum::new("load5", m.cpu_load[1]),
        PerfDatum::new("load15", m.cpu_load[2]),
        PerfDatum::bytes("mem_free", m.mem_free).with_range(0, m.mem_total),
        PerfDatum::bytes("swap_free", m.swap_free).with_range(0, m.swap_total),
        PerfDatum::new("app_updates", m.app_updates_available),
        PerfDatum::new("users", m.users),
        PerfDatum::new("users5m", m.active_users.last_5_minutes),
        PerfDatum::new("users1h", m.active_users.last_hour),
        PerfDatum::new("users24h", m.active_users.last_day),
        PerfDatum::new("files", m.files),
        PerfDatum::new("shares", m.shares.total),
        PerfDatum::bytes("db_size", m.database.size),
    ]
}
