use crate::cli::args::{OutputFormat, TraceArgs};
use crate::exit_codes::SUCCESS;
use anyhow::{Context, Result};
use nullalarm_core::{
    match_cause, seeded_rng, CauseOrigin, Injections, LineKind, Scenario, StackTrace,
};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Debug, Serialize)]
pub struct TraceReport {
    pub scenario: Scenario,
    pub lines: Vec<String>,
    pub kinds: Vec<LineKind>,
    pub injections: Injections,
    pub cause: &'static str,
    pub cause_origin: CauseOrigin,
}

impl TraceReport {
    fn new(trace: StackTrace, cause: nullalarm_core::Cause) -> Self {
        let kinds = trace.iter().map(LineKind::classify).collect();
        Self {
            scenario: trace.scenario(),
            injections: trace.injections(),
            lines: trace.into_lines(),
            kinds,
            cause: cause.text,
            cause_origin: cause.origin,
        }
    }
}

pub fn build_reports(seed: Option<u64>, count: usize) -> Vec<TraceReport> {
    let mut rng = seeded_rng(seed);
    (0..count)
        .map(|_| {
            let trace = nullalarm_core::generate(&mut rng);
            let cause = match_cause(&trace, &mut rng);
            TraceReport::new(trace, cause)
        })
        .collect()
}

pub fn write_text<W: Write>(out: &mut W, reports: &[TraceReport]) -> io::Result<()> {
    for (i, report) in reports.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        for (line, kind) in report.lines.iter().zip(&report.kinds) {
            if kind.indented() {
                writeln!(out, "    {line}")?;
            } else {
                writeln!(out, "{line}")?;
            }
        }
        writeln!(out, "Possible Cause: {}", report.cause)?;
    }
    Ok(())
}

pub fn run(args: TraceArgs) -> Result<i32> {
    tracing::debug!(seed = ?args.seed, count = args.count, "generating traces");
    let reports = build_reports(args.seed, args.count);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Text => write_text(&mut out, &reports).context("writing traces")?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &reports).context("encoding traces")?;
            writeln!(out).context("writing traces")?;
        }
    }
    Ok(SUCCESS)
}
