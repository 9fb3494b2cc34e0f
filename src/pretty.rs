//! # Interactive Formatters
//!
//! Colorized one-line rendering for developer terminals. Each recognized
//! payload variant has its own layout; everything else goes through the
//! generic formatter. Nothing in here is meant to be parsed by machines, and
//! none of it leaks into the entry itself, so structured output is unaffected
//! by whether a terminal is attached.

use crate::entry::{LogEntry, Message};
use crate::payload::{value_to_string, Payload, RedisLog, RequestLog, ServiceErrorLog, ServiceLog, SqlLog};
use std::fmt::{self, Write};

const RESET: &str = "\u{1b}[0m";
const ERROR_TEXT: &str = "\u{1b}[0;31m";

/// Palette index for secondary text (ids, units).
const DIM: u8 = 8;
/// Palette index for the datastore tags.
const DATASTORE_TAG: u8 = 24;

const BLUE: u8 = 34;
const YELLOW: u8 = 220;
const RED: u8 = 202;

/// Width of the left-aligned query column for datastore lines.
const QUERY_COLUMN: usize = 32;

fn fg(code: u8) -> String {
    format!("\u{1b}[38;5;{}m", code)
}

/// Color band for an HTTP status code: 2xx, 4xx and 5xx are colored,
/// anything else keeps the terminal's default color.
pub fn status_color(status: u16) -> Option<u8> {
    match status {
        200..=299 => Some(BLUE),
        400..=499 => Some(YELLOW),
        500..=599 => Some(RED),
        _ => None,
    }
}

/// Renders an entry as a single colorized line, newline included.
pub fn render(entry: &LogEntry) -> String {
    let mut line = String::with_capacity(128);
    // Writing into a String cannot fail.
    let _ = write_line(&mut line, entry);
    fold_line_breaks(line)
}

/// Escapes line breaks inside the rendered fields so the entry keeps to a
/// single terminal line.
fn fold_line_breaks(line: String) -> String {
    let body = line.strip_suffix('\n').unwrap_or(&line);
    if !body.contains(|c: char| c == '\n' || c == '\r') {
        return line;
    }
    let mut folded = body.replace('\r', "\\r").replace('\n', "\\n");
    folded.push('\n');
    folded
}

fn write_line(out: &mut String, entry: &LogEntry) -> fmt::Result {
    let level = entry.severity();
    write!(
        out,
        "{}{}{} [{}] ",
        fg(level.color()),
        level.short_name(),
        RESET,
        entry.time().format("%H:%M:%S")
    )?;

    match entry.message() {
        Message::Single(Payload::Request(log)) => write_request(out, log),
        Message::Single(Payload::Sql(log)) => write_sql(out, log),
        Message::Single(Payload::Redis(log)) => write_redis(out, log),
        Message::Single(Payload::Service(log)) => write_service(out, log),
        Message::Single(Payload::ServiceError(log)) => write_service_error(out, log),
        other => writeln!(out, "{}", other),
    }
}

fn write_status(out: &mut String, status: u16) -> fmt::Result {
    match status_color(status) {
        Some(color) => write!(out, "{}{}{}", fg(color), status, RESET),
        None => write!(out, "{}{}", RESET, status),
    }
}

fn write_latency(out: &mut String, micros: u64) -> fmt::Result {
    write!(out, " {:>8}{}µs{}", micros, fg(DIM), RESET)
}

/// `id status latency method uri` shared by inbound and outbound calls.
fn write_call(out: &mut String, id: &str, status: u16, latency: u64, method: &str, uri: &str) -> fmt::Result {
    write!(out, "{}{} ", fg(DIM), id)?;
    write_status(out, status)?;
    write_latency(out, latency)?;
    write!(out, " {} {} ", method, uri)
}

fn write_request(out: &mut String, log: &RequestLog) -> fmt::Result {
    write_call(out, &log.id, log.response, log.response_time, &log.method, &log.uri)?;
    out.push('\n');
    Ok(())
}

fn write_service(out: &mut String, log: &ServiceLog) -> fmt::Result {
    write_call(
        out,
        &log.correlation_id,
        log.response_code,
        log.response_time,
        &log.http_method,
        &log.uri,
    )?;
    out.push('\n');
    Ok(())
}

fn write_service_error(out: &mut String, log: &ServiceErrorLog) -> fmt::Result {
    let call = &log.log;
    write_call(
        out,
        &call.correlation_id,
        call.response_code,
        call.response_time,
        &call.http_method,
        &call.uri,
    )?;
    writeln!(out, "{} {}{}", ERROR_TEXT, log.error_message, RESET)
}

fn write_datastore(out: &mut String, column: &str, tag: &str, duration: u64, detail: &str) -> fmt::Result {
    write!(
        out,
        "{}{:<width$} {}{}{}",
        fg(DIM),
        column,
        fg(DATASTORE_TAG),
        tag,
        RESET,
        width = QUERY_COLUMN
    )?;
    write_latency(out, duration)?;
    writeln!(out, " {}", detail)
}

fn write_sql(out: &mut String, log: &SqlLog) -> fmt::Result {
    write_datastore(out, &log.kind, "SQL", log.duration, &format!("  {}", log.query))
}

fn write_redis(out: &mut String, log: &RedisLog) -> fmt::Result {
    let args: Vec<String> = log.args.iter().map(value_to_string).collect();
    let first = args.first().map(String::as_str).unwrap_or("");

    if log.is_pipeline() {
        write_datastore(out, &log.query, "REDIS", log.duration, strip_brackets(first))
    } else {
        write_datastore(out, first, "REDIS", log.duration, &args.join(" "))
    }
}

/// Removes one surrounding `[`...`]` pair. Arguments without that pair are
/// shown unchanged rather than losing their first and last characters.
pub fn strip_brackets(arg: &str) -> &str {
    arg.strip_prefix('[')
        .and_then(|inner| inner.strip_suffix(']'))
        .unwrap_or(arg)
}
