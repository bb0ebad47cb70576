use std::io;

use super::*;
use crate::test_utils::{RecordingVisitor, Rejected, all_event_kinds, trace_lines};
use crate::types::{SectionKind, Type};
use crate::visitor::NopVisitor;

/// Sink that fails every write and counts the attempts
#[derive(Default)]
struct BrokenSink {
    writes: usize,
}

impl Write for BrokenSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        self.writes += 1;
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn type_section_events() -> Vec<Event<'static>> {
    vec![
        Event::BeginModule { version: 1 },
        Event::BeginTypeSection { size: 12 },
        Event::Type { index: 0, params: &[], results: &[Type::I32] },
        Event::TypeCount { count: 1 },
        Event::EndTypeSection,
        Event::EndModule,
    ]
}

#[test]
fn test_type_section_trace() {
    let events = type_section_events();
    let mut logger = LoggingVisitor::new(Vec::new(), RecordingVisitor::new());
    for event in &events {
        logger.visit(event).unwrap();
    }
    assert_eq!(logger.depth(), 0);

    let (out, recorder) = logger.into_parts();
    assert_eq!(
        trace_lines(&out),
        [
            "BeginModule(version: 1)",
            "  BeginTypeSection(size: 12)",
            "    OnType(index: 0, params: [], results: [i32])",
            "    OnTypeCount(count: 1)",
            "  EndTypeSection",
            "EndModule",
        ]
    );

    let expected: Vec<String> = events.iter().map(|e| format!("{:?}", e)).collect();
    assert_eq!(recorder.events, expected);
}

#[test]
fn test_consumer_failure_is_returned_unchanged() {
    let mut logger = LoggingVisitor::new(Vec::new(), RecordingVisitor::failing_on("OnType"));
    let mut results = Vec::new();
    for event in &type_section_events() {
        results.push(logger.visit(event));
    }

    assert_eq!(results[2], Err(Rejected { event: "OnType" }));
    assert!(results.iter().enumerate().all(|(i, r)| i == 2 || r.is_ok()));

    // The failing event is still traced
    let (out, _) = logger.into_parts();
    assert_eq!(trace_lines(&out).len(), 6);
    assert_eq!(trace_lines(&out)[2], "    OnType(index: 0, params: [], results: [i32])");
}

#[test]
fn test_failing_end_event_still_dedents() {
    let mut logger = LoggingVisitor::new(Vec::new(), RecordingVisitor::failing_on("EndTypeSection"));
    logger.visit(&Event::BeginModule { version: 1 }).unwrap();
    logger.visit(&Event::BeginTypeSection { size: 0 }).unwrap();
    assert_eq!(
        logger.visit(&Event::EndTypeSection),
        Err(Rejected { event: "EndTypeSection" })
    );
    assert_eq!(logger.depth(), 2);

    logger.visit(&Event::EndModule).unwrap();
    assert_eq!(logger.depth(), 0);
    let (out, _) = logger.into_parts();
    assert_eq!(
        trace_lines(&out),
        [
            "BeginModule(version: 1)",
            "  BeginTypeSection(size: 0)",
            "  EndTypeSection",
            "EndModule",
        ]
    );
}

#[test]
fn test_silent_events_are_forwarded_without_output() {
    let silent: Vec<Event<'static>> = all_event_kinds()
        .into_iter()
        .filter(Event::is_silent)
        .collect();
    let mut logger = LoggingVisitor::new(Vec::new(), RecordingVisitor::new());
    for event in &silent {
        logger.visit(event).unwrap();
    }

    assert_eq!(logger.depth(), 0);
    assert!(logger.sink().is_empty());
    assert_eq!(logger.inner().events.len(), silent.len());
}

#[test]
fn test_on_error_is_forwarded_with_its_answer() {
    let diagnostic = Diagnostic::new(Some(8), "bad section id");

    let mut declines = LoggingVisitor::new(Vec::new(), RecordingVisitor::new());
    assert!(!declines.on_error(&diagnostic));

    let mut handles = LoggingVisitor::new(
        Vec::new(),
        RecordingVisitor {
            handles_errors: true,
            ..Default::default()
        },
    );
    assert!(handles.on_error(&diagnostic));
    assert_eq!(handles.inner().diagnostics, [diagnostic]);
    assert!(handles.sink().is_empty());
}

#[test]
fn test_set_state_is_recorded_not_rendered() {
    let state = ReaderState {
        offset: 10,
        section: SectionKind::Code,
        size: 42,
    };
    let mut logger = LoggingVisitor::new(Vec::new(), RecordingVisitor::new());
    assert!(logger.last_state().is_none());

    logger.on_set_state(&state);
    assert_eq!(logger.last_state(), Some(&state));
    assert_eq!(logger.inner().states, [state]);
    assert!(logger.sink().is_empty());
}

#[test]
fn test_every_kind_is_forwarded_and_rendered_once() {
    let events = all_event_kinds();
    let mut logger = LoggingVisitor::new(Vec::new(), RecordingVisitor::new());
    for event in &events {
        logger.visit(event).unwrap();
    }
    assert_eq!(logger.depth(), 0);

    let (out, recorder) = logger.into_parts();
    let lines = trace_lines(&out);
    let rendered = events.iter().filter(|e| !e.is_silent()).count();
    assert_eq!(lines.len(), rendered);
    assert_eq!(recorder.events.len(), events.len());

    // Begin events open a region of two columns each
    assert_eq!(lines[0], "BeginModule(version: 1)");
    assert_eq!(lines[1], "  BeginCustomSection(name: \"producers\", size: 8)");
    assert_eq!(lines.last().map(String::as_str), Some("EndModule"));
}

#[test]
fn test_sink_failure_is_latched() {
    let mut logger = LoggingVisitor::new(BrokenSink::default(), RecordingVisitor::new());
    for event in &type_section_events() {
        assert!(logger.visit(event).is_ok());
    }

    assert_eq!(logger.sink().writes, 1);
    assert_eq!(
        logger.sink_error().map(io::Error::kind),
        Some(io::ErrorKind::BrokenPipe)
    );
    // Nesting is still tracked and every event still reached the consumer
    assert_eq!(logger.depth(), 0);
    assert_eq!(logger.inner().events.len(), 6);
}

#[test]
fn test_unclosed_region_is_tolerated() {
    let mut logger = LoggingVisitor::new(Vec::new(), NopVisitor);
    logger.visit(&Event::BeginModule { version: 1 }).unwrap();
    logger.visit(&Event::BeginCodeSection { size: 4 }).unwrap();
    assert_eq!(logger.depth(), 4);

    let (out, NopVisitor) = logger.into_parts();
    assert_eq!(trace_lines(&out).len(), 2);
}

#[test]
#[should_panic(expected = "unbalanced trace nesting")]
fn test_end_without_begin_panics() {
    let mut logger = LoggingVisitor::new(Vec::new(), NopVisitor);
    let _ = logger.visit(&Event::EndModule);
}

#[test]
fn test_deep_nesting_indents_every_level() {
    const DEPTH: usize = 100;
    let mut logger = LoggingVisitor::new(Vec::new(), NopVisitor);
    for _ in 0..DEPTH {
        logger.visit(&Event::BeginGlobalInitExpr { index: 0 }).unwrap();
    }
    logger.visit(&Event::Nop).unwrap();
    for _ in 0..DEPTH {
        logger.visit(&Event::EndGlobalInitExpr { index: 0 }).unwrap();
    }

    let (out, _) = logger.into_parts();
    let lines = trace_lines(&out);
    assert_eq!(lines.len(), DEPTH * 2 + 1);
    assert_eq!(lines[DEPTH], format!("{}OnNopExpr", " ".repeat(DEPTH * 2)));
    assert_eq!(lines[DEPTH - 1].trim_start(), "BeginGlobalInitExpr(index: 0)");
    assert_eq!(lines[DEPTH + 1].len() - lines[DEPTH + 1].trim_start().len(), (DEPTH - 1) * 2);
}

#[test]
fn test_chained_loggers() {
    let mut inner = LoggingVisitor::new(Vec::new(), NopVisitor);
    let mut outer = LoggingVisitor::new(Vec::new(), &mut inner);
    for event in &type_section_events() {
        outer.visit(event).unwrap();
    }
    let (outer_out, _) = outer.into_parts();
    let (inner_out, _) = inner.into_parts();
    assert_eq!(outer_out, inner_out);
}
