//! `frame`: replay recorded message events through the resize bridge.
//!
//! Input is NDJSON, one `{"origin": "...", "data": ...}` event per line. Each
//! height change is printed to stdout as `<line>\t<height>`; malformed lines
//! are logged and skipped.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use super::FrameArgs;
use crate::bridge::{FrameElement, MessageChannel, MessageEvent, ResizeBridge, ResizeFilter};
use crate::config::{BookingConfig, SiteConfig};
use crate::utils::plural_count;
use crate::{debug, log};

/// Counts from one replay.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FrameReport {
    pub events: usize,
    pub skipped: usize,
    pub resizes: usize,
    pub final_height: String,
}

pub fn run_frame(config: &SiteConfig, args: &FrameArgs) -> Result<()> {
    let input: Box<dyn BufRead> = match args.input.as_deref() {
        None => Box::new(std::io::stdin().lock()),
        Some(path) if path == Path::new("-") => Box::new(std::io::stdin().lock()),
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
    };

    let mut out = std::io::stdout().lock();
    let report = replay(&config.booking, input, &mut out)?;
    log!(
        "frame";
        "{}, {}, {} skipped, height {}",
        plural_count(report.events, "event"),
        plural_count(report.resizes, "resize"),
        report.skipped,
        report.final_height
    );
    Ok(())
}

/// Build a bridge from `[booking]`, mount it, and post every event in `input`.
pub fn replay(
    booking: &BookingConfig,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<FrameReport> {
    let channel = Arc::new(MessageChannel::new());
    let frame = Arc::new(FrameElement::with_height(format!("{}px", booking.height)));
    let bridge = ResizeBridge::new(Arc::clone(&channel), frame, filter_for(booking));
    bridge.mount();

    let mut report = FrameReport::default();
    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("failed to read line {line_no}"))?;
        if line.trim().is_empty() {
            continue;
        }

        let event: MessageEvent = match serde_json::from_str(&line) {
            Ok(event) => event,
            Err(e) => {
                log!("frame"; "line {}: skipped, {}", line_no, e);
                report.skipped += 1;
                continue;
            }
        };
        report.events += 1;

        let before = bridge.frame().height();
        channel.post(&event);
        let after = bridge.frame().height();
        if after != before {
            report.resizes += 1;
            writeln!(out, "{line_no}\t{after}").context("failed to write output")?;
        }
    }

    bridge.unmount();
    report.final_height = bridge.frame().height();
    Ok(report)
}

fn filter_for(booking: &BookingConfig) -> ResizeFilter {
    let filter = ResizeFilter::new(booking.marker.as_str());
    match booking.trusted_origins() {
        Some(origins) => {
            debug!("frame"; "accepting resize messages from {}", origins.join(", "));
            filter.allow_origins(origins)
        }
        None => filter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const EVENTS: &str = r#"{"origin":"https://media.ctrealtymedia.com","data":{"penpal":"call","methodName":"resize","args":[812]}}
{"origin":"https://media.ctrealtymedia.com","data":{"type":"scroll","y":40}}

not json
{"origin":"https://evil.example","data":{"penpal":"call","methodName":"resize","args":[10]}}
{"origin":"https://media.ctrealtymedia.com","data":{"penpal":"call","methodName":"resize","args":[812]}}
{"origin":"https://media.ctrealtymedia.com","data":{"penpal":"call","methodName":"resize","args":[950.5]}}
"#;

    fn run(booking: &BookingConfig) -> (FrameReport, String) {
        let mut out = Vec::new();
        let report = replay(booking, Cursor::new(EVENTS), &mut out).unwrap();
        (report, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_replay_reports_changes() {
        let (report, out) = run(&BookingConfig::default());
        assert_eq!(report.events, 5);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.resizes, 2);
        assert_eq!(report.final_height, "950.5px");
        assert_eq!(out, "1\t812px\n7\t950.5px\n");
    }

    #[test]
    fn test_replay_any_origin() {
        let booking = BookingConfig {
            any_origin: true,
            ..Default::default()
        };
        let (report, out) = run(&booking);
        assert_eq!(report.resizes, 4);
        assert_eq!(out, "1\t812px\n5\t10px\n6\t812px\n7\t950.5px\n");
    }

    #[test]
    fn test_replay_starts_at_configured_height() {
        let booking = BookingConfig {
            height: 600,
            ..Default::default()
        };
        let mut out = Vec::new();
        let report = replay(&booking, Cursor::new(""), &mut out).unwrap();
        assert_eq!(report.final_height, "600px");
        assert!(out.is_empty());
    }
}
