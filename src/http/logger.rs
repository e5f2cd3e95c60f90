//! Request logging middleware.
//!
//! Every request is tagged with a random correlation id and produces exactly
//! two log lines through the configured [`Logger`]:
//!
//! ```text
//! [<id>][<timestamp>] METHOD:URI START:<elapsed>
//! [<id>][<timestamp>] METHOD:URI <status> END:<elapsed>
//! ```
//!
//! The end line reuses the id and timestamp captured at entry and carries
//! the status code of whatever response the pipeline produced, so the two
//! lines of a request can always be paired in the output. The middleware
//! observes the request and response without modifying either.

use std::time::{Duration, Instant};

use axum::{extract::Request, extract::State, middleware::Next, response::Response};
use chrono::Local;
use uuid::Uuid;

use super::state::AppState;

/// Log sink used by the HTTP layer.
///
/// Injected through [`AppState`] so tests can capture output instead of
/// depending on process stdout.
pub trait Logger: Send + Sync {
    /// Emit an informational line (request start/end).
    fn info(&self, line: &str);
    /// Emit an error line (controller failures).
    fn error(&self, line: &str);
}

/// Default sink: info lines to stdout, error lines to stderr.
pub struct StdoutLogger;

impl Logger for StdoutLogger {
    fn info(&self, line: &str) {
        println!("{line}");
    }

    fn error(&self, line: &str) {
        eprintln!("{line}");
    }
}

/// Format a duration as milliseconds with two decimal places.
fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.2}ms", elapsed.as_secs_f64() * 1000.0)
}

/// Middleware wrapping every request with correlation-id logging.
///
/// Registered as the outermost layer so the end line reflects the final
/// status for every response path, including errors produced by inner
/// layers.
pub async fn log_requests(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let id = Uuid::new_v4();
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let start = Instant::now();

    state.logger.info(&format!(
        "[{id}][{timestamp}] {method}:{uri} START:{}",
        format_elapsed(start.elapsed())
    ));

    let response = next.run(req).await;

    state.logger.info(&format!(
        "[{id}][{timestamp}] {method}:{uri} {} END:{}",
        response.status().as_u16(),
        format_elapsed(start.elapsed())
    ));

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_formats_with_two_decimals() {
        assert_eq!(format_elapsed(Duration::ZERO), "0.00ms");
        assert_eq!(format_elapsed(Duration::from_millis(5)), "5.00ms");
        assert_eq!(format_elapsed(Duration::from_micros(1500)), "1.50ms");
        assert_eq!(format_elapsed(Duration::from_secs(2)), "2000.00ms");
    }

    #[test]
    fn elapsed_rounds_sub_centisecond_values() {
        assert_eq!(format_elapsed(Duration::from_micros(4)), "0.00ms");
        assert_eq!(format_elapsed(Duration::from_micros(9_996)), "10.00ms");
    }
}
