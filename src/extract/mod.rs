//! Metrics extraction from the serverinfo JSON document
//!
//! Every field is read by JSON pointer. A missing path is reported as
//! `CheckError::MissingField` naming the path instead of degrading to an
//! empty value.

use serde_json::Value;

use crate::models::{
    ActiveUsers, ApiStatus, CheckError, DatabaseInfo, MetricsRecord, ShareCounts,
};

const META: &str = "/ocs/meta";
const SYSTEM: &str = "/ocs/data/nextcloud/system";
const STORAGE: &str = "/ocs/data/nextcloud/storage";
const SHARES: &str = "/ocs/data/nextcloud/shares";
const ACTIVE_USERS: &str = "/ocs/data/activeUsers";
const SERVER: &str = "/ocs/data/server";

/// Decoded serverinfo response
#[derive(Debug, Clone)]
pub struct OcsResponse {
    pub status: ApiStatus,
    /// Present whenever the server reported status code 200
    pub metrics: Option<MetricsRecord>,
}

/// Decode a response body. The data block is only projected for status 200
/// because error responses carry an empty `data` member.
pub fn parse_response(body: &[u8]) -> Result<OcsResponse, CheckError> {
    let document: Value = serde_json::from_slice(body)?;
    let status = extract_status(&document)?;

    let metrics = if status.statuscode == 200 {
        Some(extract_metrics(&document)?)
    } else {
        None
    };

    Ok(OcsResponse { status, metrics })
}

/// Read `ocs.meta`
pub fn extract_status(document: &Value) -> Result<ApiStatus, CheckError> {
    let path = format!("{META}/statuscode");
    let statuscode = match lookup(document, &path)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    let statuscode = statuscode.ok_or_else(|| invalid(&path, "an integer"))?;

    Ok(ApiStatus {
        statuscode,
        status: text_or_empty(document, &format!("{META}/status"))?,
        message: text_or_empty(document, &format!("{META}/message"))?,
    })
}

/// Project `ocs.data` into a metrics record
pub fn extract_metrics(document: &Value) -> Result<MetricsRecord, CheckError> {
    let sys = |field: &str| format!("{SYSTEM}/{field}");
    let kib = |field: &str| -> Result<u64, CheckError> {
        let path = sys(field);
        count(document, &path)?
            .checked_mul(1024)
            .ok_or_else(|| invalid(&path, "a representable KiB count"))
    };

    Ok(MetricsRecord {
        version: text(document, &sys("version"))?,
        free_space: count(document, &sys("freespace"))?,
        cpu_load: [
            load(document, &sys("cpuload/0"))?,
            load(document, &sys("cpuload/1"))?,
            load(document, &sys("cpuload/2"))?,
        ],
        mem_free: kib("mem_free")?,
        mem_total: kib("mem_total")?,
        swap_free: kib("swap_free")?,
        swap_total: kib("swap_total")?,
        app_updates_available: count(document, &sys("apps/num_updates_available"))?,
        app_updates: app_names(document, &sys("apps/app_updates"))?,
        users: count(document, &format!("{STORAGE}/num_users"))?,
        active_users: ActiveUsers {
            last_5_minutes: count(document, &format!("{ACTIVE_USERS}/last5minutes"))?,
            last_hour: count(document, &format!("{ACTIVE_USERS}/last1hour"))?,
            last_day: count(document, &format!("{ACTIVE_USERS}/last24hours"))?,
        },
        files: count(document, &format!("{STORAGE}/num_files"))?,
        shares: ShareCounts {
            total: count(document, &format!("{SHARES}/num_shares"))?,
            user: count(document, &format!("{SHARES}/num_shares_user"))?,
            groups: count(document, &format!("{SHARES}/num_shares_groups"))?,
            link: count(document, &format!("{SHARES}/num_shares_link"))?,
            federated_sent: count(document, &format!("{SHARES}/num_fed_shares_sent"))?,
        },
        webserver: text(document, &format!("{SERVER}/webserver"))?,
        php_version: text(document, &format!("{SERVER}/php/version"))?,
        database: DatabaseInfo {
            kind: text(document, &format!("{SERVER}/database/type"))?,
            version: text(document, &format!("{SERVER}/database/version"))?,
            size: count(document, &format!("{SERVER}/database/size"))?,
        },
    })
}

fn lookup<'a>(document: &'a Value, path: &str) -> Result<&'a Value, CheckError> {
    document
        .pointer(path)
        .ok_or_else(|| CheckError::MissingField(dotted(path)))
}

fn invalid(path: &str, expected: &'static str) -> CheckError {
    CheckError::InvalidField {
        path: dotted(path),
        expected,
    }
}

/// `/ocs/meta/status` -> `ocs.meta.status`
fn dotted(path: &str) -> String {
    path.trim_start_matches('/').replace('/', ".")
}

fn text(document: &Value, path: &str) -> Result<String, CheckError> {
    match lookup(document, path)? {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(invalid(path, "a string")),
    }
}

fn text_or_empty(document: &Value, path: &str) -> Result<String, CheckError> {
    match lookup(document, path)? {
        Value::Null => Ok(String::new()),
        _ => text(document, path),
    }
}

/// Non-negative integer; integral floats and numeric strings are accepted
fn count(document: &Value, path: &str) -> Result<u64, CheckError> {
    let value = lookup(document, path)?;
    let parsed = match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| invalid(path, "a non-negative integer"))
}

fn load(document: &Value, path: &str) -> Result<f64, CheckError> {
    let parsed = match lookup(document, path)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| invalid(path, "a number"))
}

/// App names pending an update. The server sends a map keyed by app name,
/// or `[]` when there is nothing to update.
fn app_names(document: &Value, path: &str) -> Result<Vec<String>, CheckError> {
    match lookup(document, path)? {
        Value::Object(map) => Ok(map.keys().cloned().collect()),
        Value::Array(list) => Ok((0..list.len()).map(|index| index.to_string()).collect()),
        _ => Err(invalid(path, "an object keyed by app name")),
    }
}
