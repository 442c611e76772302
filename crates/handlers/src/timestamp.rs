//! Timestamp logger handler
//!
//! Writes one line announcing the upcoming Jenkins invocation, stamped with
//! the local wall-clock time, and returns a fixed response.

use crate::errors::HandlerError;
use crate::invocation::{InvocationContext, InvocationEvent};
use crate::response::Response;

use chrono::{DateTime, Local, TimeZone};
use std::io::{self, Write};
use tracing::debug;

/// `strftime` format of the logged timestamp
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Message prefix of the emitted line
pub const LOG_PREFIX: &str = "Se invocará a Jenkins";

/// String that is JSON-encoded into the response body
pub const RESPONSE_MESSAGE: &str = "Print executed";

/// Logs the invocation time and acknowledges with a static body.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampLogger;

impl TimestampLogger {
    pub fn new() -> Self {
        Self
    }

    /// Handle an invocation, writing the log line to stdout.
    pub fn handle(
        &self,
        event: &InvocationEvent,
        context: &InvocationContext,
    ) -> Result<Response, HandlerError> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.handle_at(event, context, &Local::now(), &mut out)
    }

    /// Handle an invocation at a given instant, writing to `out`.
    pub fn handle_at<Tz, W>(
        &self,
        _event: &InvocationEvent,
        context: &InvocationContext,
        now: &DateTime<Tz>,
        out: &mut W,
    ) -> Result<Response, HandlerError>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
        W: Write,
    {
        let line = log_line(now);
        writeln!(out, "{}", line).map_err(|e| HandlerError::Output { source: e })?;
        out.flush().map_err(|e| HandlerError::Output { source: e })?;

        debug!(request_id = %context.request_id, "timestamp logged");

        Ok(Response::ok(serde_json::to_string(RESPONSE_MESSAGE)?))
    }
}

/// Render the announcement line for `now`.
pub fn log_line<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("{} - {}", LOG_PREFIX, now.format(TIMESTAMP_FORMAT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDateTime, Timelike, Utc};
    use serde_json::json;

    /// Sink that refuses every write
    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn parse_line(line: &str) -> NaiveDateTime {
        let stamp = line
            .strip_prefix("Se invocará a Jenkins - ")
            .expect("line should start with the announcement prefix");
        assert_eq!(stamp.len(), "YYYY-MM-DD HH:MM:SS".len());
        NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).expect("valid timestamp")
    }

    #[test]
    fn test_log_line_format() {
        let now = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 2).unwrap();
        assert_eq!(log_line(&now), "Se invocará a Jenkins - 2024-03-07 09:05:02");
    }

    #[test]
    fn test_response_is_fixed() {
        let logger = TimestampLogger::new();
        let now = Local::now();
        let mut out = Vec::new();

        let response = logger
            .handle_at(&json!(null), &InvocationContext::default(), &now, &mut out)
            .unwrap();

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"statusCode": 200, "body": "\"Print executed\""})
        );
    }

    #[test]
    fn test_response_ignores_event_content() {
        let logger = TimestampLogger::new();
        let now = Local::now();
        let events = [
            json!(null),
            json!({}),
            json!({"detail": {"pipeline": "app", "nested": [1, 2, 3]}}),
            json!("raw string"),
        ];

        for event in &events {
            let mut out = Vec::new();
            let ctx = InvocationContext::new("req-1", "timestamp-logger");
            let response = logger.handle_at(event, &ctx, &now, &mut out).unwrap();
            assert_eq!(response, Response::ok("\"Print executed\""));
        }
    }

    #[test]
    fn test_emits_single_parseable_line() {
        let logger = TimestampLogger::new();
        let now = Local::now();
        let mut out = Vec::new();

        logger
            .handle_at(&json!({}), &InvocationContext::default(), &now, &mut out)
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 1);
        assert!(text.ends_with('\n'));

        let parsed = parse_line(lines[0]);
        assert_eq!(parsed, now.naive_local().with_nanosecond(0).unwrap());
    }

    #[test]
    fn test_repeated_invocations_are_identical() {
        let logger = TimestampLogger::new();
        let event = json!({"source": "aws.events"});
        let ctx = InvocationContext::local("timestamp-logger");

        let first = logger
            .handle_at(&event, &ctx, &Local::now(), &mut Vec::new())
            .unwrap();
        let second = logger
            .handle_at(&event, &ctx, &Local::now(), &mut Vec::new())
            .unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_write_failure_is_fatal() {
        let logger = TimestampLogger::new();
        let result = logger.handle_at(
            &json!({}),
            &InvocationContext::default(),
            &Local::now(),
            &mut ClosedPipe,
        );

        assert!(matches!(result, Err(HandlerError::Output { .. })));
    }

    #[test]
    fn test_handle_with_local_clock_returns_fixed_response() {
        let response = TimestampLogger::new()
            .handle(&json!({}), &InvocationContext::default())
            .unwrap();
        assert_eq!(response, Response::ok("\"Print executed\""));
    }
}
