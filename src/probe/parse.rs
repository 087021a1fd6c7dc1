// Parsers for raw probe output.
// Each returns None when the text does not have the expected shape; the collector
// substitutes the field default in that case.

use crate::models::{DiskStats, MemoryStats, ServiceProcess};

/// Programs the collector itself runs while probing. Their rows in the process
/// table can mention the service name and must not be mistaken for the service.
const PROBE_TOOLS: &[&str] = &["grep", "ps", "journalctl", "systemctl"];

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Accepts both `3.1` and the decimal-comma form `3,1` some locales print.
fn parse_decimal(s: &str) -> Option<f64> {
    s.trim().replace(',', ".").parse::<f64>().ok()
}

/// Aggregate CPU utilisation from `top -bn1`.
///
/// Reads the `Cpu(s)` summary line (`%Cpu(s):  3.1 us,  1.0 sy, ... 95.0 id, ...`
/// or the older `Cpu(s):  3.1%us,  1.0%sy, ...`). Usage is `100 - idle`; when no
/// idle figure is present the user figure is used.
///
/// top pads figures to five columns, so `100.0` lands directly after the previous
/// label's comma (`id,100.0 wa`). Figures are therefore read as number/label runs
/// rather than whitespace tokens.
pub fn cpu_usage(top_output: &str) -> Option<f64> {
    let line = top_output.lines().find(|l| l.contains("Cpu(s)"))?;
    let (_, fields) = line.split_once(':')?;

    let mut user = None;
    let mut idle = None;
    let mut rest = fields;
    while let Some(start) = rest.find(|c: char| c.is_ascii_digit()) {
        let figure = &rest[start..];
        let value_len = figure
            .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == ','))
            .unwrap_or(figure.len());
        let value = figure[..value_len].trim_end_matches(',');
        let tail =
            figure[value_len..].trim_start_matches(|c: char| c == '%' || c.is_whitespace());
        let label_len = tail
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(tail.len());
        match (&tail[..label_len], parse_decimal(value)) {
            ("us", Some(v)) => user = Some(v),
            ("id", Some(v)) => idle = Some(v),
            _ => {}
        }
        rest = &tail[label_len..];
    }

    let usage = match (idle, user) {
        (Some(id), _) => 100.0 - id,
        (None, Some(us)) => us,
        (None, None) => return None,
    };
    Some(round1(usage.clamp(0.0, 100.0)))
}

/// Memory from `free -m`: the `Mem:` row (or the first data row when the label is
/// localised). Percent is used/total from that row, one decimal.
pub fn memory(free_output: &str) -> Option<MemoryStats> {
    let row = free_output
        .lines()
        .find(|l| l.trim_start().starts_with("Mem:"))
        .or_else(|| free_output.lines().nth(1))?;
    let cols: Vec<&str> = row.split_whitespace().collect();
    let total_col = *cols.get(1)?;
    let used_col = *cols.get(2)?;
    let total: u64 = total_col.parse().ok()?;
    let used: u64 = used_col.parse().ok()?;
    let used_percent = if total > 0 {
        round1(used as f64 * 100.0 / total as f64)
    } else {
        0.0
    };
    Some(MemoryStats {
        used_megabytes: used_col.to_string(),
        total_megabytes: total_col.to_string(),
        used_percent,
    })
}

/// Root filesystem from `df -h /`. Rows wrapped onto a second line (long device
/// names) are joined before the columns are read.
pub fn disk(df_output: &str) -> Option<DiskStats> {
    let cols: Vec<&str> = df_output
        .lines()
        .skip(1)
        .flat_map(str::split_whitespace)
        .collect();
    let total = *cols.get(1)?;
    let used = *cols.get(2)?;
    let percent = *cols.get(4)?;
    if !percent.ends_with('%') {
        return None;
    }
    Some(DiskStats {
        used_human: used.to_string(),
        total_human: total.to_string(),
        used_percent_label: percent.to_string(),
    })
}

/// First non-empty trimmed line. Used for `uptime -p`, `tailscale ip -4`,
/// `systemctl is-active` and `hostname`.
pub fn first_line(output: &str) -> Option<String> {
    output
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(str::to_string)
}

/// First whitespace-separated token, e.g. the primary address from `hostname -I`.
pub fn first_token(output: &str) -> Option<String> {
    output.split_whitespace().next().map(str::to_string)
}

/// The service's row in `ps aux`: first row whose command contains `pattern`,
/// ignoring rows for the probe tools themselves.
pub fn service_process(ps_output: &str, pattern: &str) -> Option<ServiceProcess> {
    ps_output.lines().find_map(|line| {
        let cols: Vec<&str> = line.split_whitespace().collect();
        if cols.len() < 11 || cols[1].parse::<u32>().is_err() {
            return None;
        }
        let program = cols[10].rsplit('/').next().unwrap_or(cols[10]);
        if PROBE_TOOLS.contains(&program) {
            return None;
        }
        if !cols[10..].join(" ").contains(pattern) {
            return None;
        }
        Some(ServiceProcess {
            pid: cols[1].to_string(),
            cpu_percent: cols[2].to_string(),
            mem_percent: cols[3].to_string(),
        })
    })
}

/// Text after `marker` on the last journal line that contains it.
pub fn last_marked_value(journal: &str, marker: &str) -> Option<String> {
    journal
        .lines()
        .rev()
        .find_map(|l| l.rsplit_once(marker))
        .map(|(_, value)| value.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// True when a journal line mentions `channel` followed by `marker`, ignoring case.
pub fn channel_listening(journal: &str, channel: &str, marker: &str) -> bool {
    let channel = channel.to_lowercase();
    let marker = marker.to_lowercase();
    journal.lines().any(|line| {
        let line = line.to_lowercase();
        line.find(&channel)
            .is_some_and(|at| line[at + channel.len()..].contains(&marker))
    })
}
