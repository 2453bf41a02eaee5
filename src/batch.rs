//! Parse whole fragment files and write one `<stem>.spans.json` artifact
//! per input file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use span_types::{PageContext, Span};
use tracing::info;

use crate::catalog::StrategyId;
use crate::error::{Error, Result};
use crate::orchestrator::{Orchestrator, OrchestratorKind};
use crate::scanner::{self, Fragment, FragmentFile};

// ── Output types ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct SpanResult {
    pub text: String,
    pub page_year: u32,
    pub page_is_bc: Option<bool>,
    /// Winning strategy, `None` when nothing matched.
    pub strategy: Option<StrategyId>,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchStats {
    pub total: usize,
    pub matched: usize,
    pub unmatched: usize,
    /// Count of wins per strategy.
    pub by_strategy: BTreeMap<StrategyId, usize>,
    /// Matches whose duration could not be computed.
    pub missing_weight: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub source: PathBuf,
    pub orchestrator: OrchestratorKind,
    pub stats: BatchStats,
    pub results: Vec<SpanResult>,
}

// ── Parsing ──────────────────────────────────────────────────────────

/// Parse every fragment in parallel. Output order follows input order.
pub fn parse_all(orchestrator: &Orchestrator, fragments: &[Fragment]) -> Vec<SpanResult> {
    fragments
        .par_iter()
        .map(|f| {
            let page = PageContext::new(f.page_year, f.page_is_bc);
            let (strategy, span) = match orchestrator.parse_with_id(&f.text, &page) {
                Some((id, span)) => (Some(id), Some(span)),
                None => (None, None),
            };
            SpanResult {
                text: f.text.clone(),
                page_year: f.page_year,
                page_is_bc: f.page_is_bc,
                strategy,
                span,
            }
        })
        .collect()
}

pub fn summarize(results: &[SpanResult]) -> BatchStats {
    let mut stats = BatchStats {
        total: results.len(),
        ..BatchStats::default()
    };
    for r in results {
        match (&r.strategy, &r.span) {
            (Some(id), Some(span)) => {
                stats.matched += 1;
                *stats.by_strategy.entry(*id).or_default() += 1;
                if span.weight.is_none() {
                    stats.missing_weight += 1;
                }
            }
            _ => stats.unmatched += 1,
        }
    }
    stats
}

// ── Files ────────────────────────────────────────────────────────────

pub fn output_path(output_dir: &Path, stem: &str) -> PathBuf {
    output_dir.join(format!("{stem}.spans.json"))
}

/// Parse one fragment file and write its artifact.
pub fn process_file(
    orchestrator: &Orchestrator,
    file: &FragmentFile,
    output_dir: &Path,
) -> Result<(PathBuf, BatchStats)> {
    let fragments = scanner::read_fragments(&file.path)?;
    let results = parse_all(orchestrator, &fragments);
    let stats = summarize(&results);
    let report = BatchReport {
        source: file.path.clone(),
        orchestrator: orchestrator.kind(),
        stats: stats.clone(),
        results,
    };

    let path = output_path(output_dir, &file.stem);
    let json = serde_json::to_string_pretty(&report)?;
    std::fs::write(&path, &json).map_err(|e| Error::io(&path, e))?;
    info!(
        path = %path.display(),
        total = stats.total,
        matched = stats.matched,
        "wrote spans"
    );
    Ok((path, stats))
}

/// Parse every fragment file under `input` into `output_dir`.
/// `threads` sizes a dedicated pool; `None` uses rayon's global pool.
pub fn run_batch(
    input: &Path,
    output_dir: &Path,
    kind: OrchestratorKind,
    threads: Option<usize>,
) -> Result<Vec<(PathBuf, BatchStats)>> {
    let files = scanner::scan_fragment_files(input)?;
    info!(count = files.len(), input = %input.display(), "found fragment files");
    std::fs::create_dir_all(output_dir).map_err(|e| Error::io(output_dir, e))?;

    let orchestrator = Orchestrator::new(kind);
    let run = || -> Result<Vec<(PathBuf, BatchStats)>> {
        files
            .iter()
            .map(|f| process_file(&orchestrator, f, output_dir))
            .collect()
    };

    match threads {
        Some(n) => rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build()?
            .install(run),
        None => run(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frag(text: &str, page_year: u32, page_is_bc: Option<bool>) -> Fragment {
        Fragment {
            text: text.to_string(),
            page_year,
            page_is_bc,
        }
    }

    #[test]
    fn test_parse_all_preserves_order() {
        let orch = Orchestrator::new(OrchestratorKind::YearsNoFallback);
        let frags: Vec<Fragment> = (1..=200)
            .map(|y| frag(&format!("{y} BC"), y, Some(true)))
            .collect();
        let results = parse_all(&orch, &frags);
        for (i, r) in results.iter().enumerate() {
            assert_eq!(r.span.as_ref().unwrap().start_year, i as u32 + 1);
        }
    }

    #[test]
    fn test_summarize_counts() {
        let orch = Orchestrator::new(OrchestratorKind::YearsNoFallback);
        let frags = [
            frag("490 BC", 490, Some(true)),
            frag("1066", 1066, None),
            frag("5th century BCE", 450, Some(true)),
            frag("no date here", 1000, None),
            frag("", 1000, None),
        ];
        let stats = summarize(&parse_all(&orch, &frags));
        assert_eq!(stats.total, 5);
        assert_eq!(stats.matched, 3);
        assert_eq!(stats.unmatched, 2);
        assert_eq!(stats.by_strategy[&StrategyId::ExplicitYear], 2);
        assert_eq!(stats.by_strategy[&StrategyId::Century], 1);
        assert_eq!(stats.missing_weight, 0);
    }

    #[test]
    fn test_run_batch_writes_artifacts() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        std::fs::write(
            input.path().join("bronze_age.jsonl"),
            concat!(
                r#"{"text": "Shang (China, c. 1600-1046 BC)", "page_year": 1500, "page_is_bc": true}"#,
                "\n",
                r#"{"text": "Unrelated line", "page_year": 1500, "page_is_bc": true}"#,
                "\n",
            ),
        )
        .unwrap();

        let written =
            run_batch(input.path(), output.path(), OrchestratorKind::TimePeriods, Some(2)).unwrap();
        assert_eq!(written.len(), 1);
        let (path, stats) = &written[0];
        assert_eq!(*path, output.path().join("bronze_age.spans.json"));
        assert_eq!((stats.matched, stats.unmatched), (2, 0));

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(json["orchestrator"], "time-periods");
        assert_eq!(
            json["results"][0]["strategy"],
            "parenthesized-location-circa-year-range"
        );
        assert_eq!(json["results"][0]["span"]["start_year"], 1600);
        assert_eq!(json["results"][0]["span"]["is_bc"], true);
        assert_eq!(json["results"][1]["strategy"], "fallback");
        assert_eq!(json["stats"]["by_strategy"]["fallback"], 1);
    }

    #[test]
    fn test_run_batch_reports_bad_line() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        std::fs::write(input.path().join("broken.jsonl"), "{not json}\n").unwrap();
        let err = run_batch(input.path(), output.path(), OrchestratorKind::Years, None).unwrap_err();
        assert!(matches!(err, Error::InvalidFragment { line: 1, .. }));
    }
}
