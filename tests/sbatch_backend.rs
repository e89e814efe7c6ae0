// tests/sbatch_backend.rs
//
// Drives the real process backend with `sh -c` standing in for `sbatch`.
// The script sees the dependency flag and path as positional arguments.

#![cfg(unix)]

use slurmchain::errors::PipelineError;
use slurmchain::submit::{AckParser, SbatchBackend, SchedulerBackend, SubmitRequest, Submitter};
use slurmchain::types::{FanInPolicy, JobId};
use slurmchain_test_utils::builders::graph_of;
use slurmchain_test_utils::init_tracing;

fn fake_sbatch(script: &str) -> SbatchBackend {
    SbatchBackend::new(
        "sh",
        vec!["-c".to_string(), script.to_string(), "sbatch".to_string()],
    )
}

#[tokio::test]
async fn backend_passes_dependency_flag_then_path() {
    init_tracing();

    let mut backend = fake_sbatch(r#"echo "args: $*""#);
    let request = SubmitRequest {
        job: "B".to_string(),
        path: "./B.sh".to_string(),
        after: vec![JobId::new("41")],
    };

    let response = backend.submit(&request).await.unwrap();

    assert!(response.success());
    assert_eq!(response.stdout.trim(), "args: --dependency=afterok:41 ./B.sh");
}

#[tokio::test]
async fn chain_through_a_real_process() {
    init_tracing();

    // Answers with an id derived from the number of arguments, so roots and
    // dependent jobs get different ids.
    let backend = fake_sbatch(r#"echo "sbatch: note"; echo "Submitted batch job 10$#""#);
    let (graph, ids) = graph_of(&["A", "B"], &[("B", "A")]);
    let mut submitter = Submitter::new(backend, AckParser::default(), FanInPolicy::Reject);

    let report = submitter.submit(&graph, ids[0], None).await.unwrap();

    assert_eq!(report.job_id_of("A"), Some(&JobId::new("101")));
    assert_eq!(report.job_id_of("B"), Some(&JobId::new("102")));
    assert_eq!(report.jobs()[1].after, vec![JobId::new("101")]);
}

#[tokio::test]
async fn non_zero_exit_is_reported_with_output() {
    init_tracing();

    let backend = fake_sbatch(r#"echo "sbatch: error: invalid partition" >&2; exit 3"#);
    let (graph, ids) = graph_of(&["A", "B"], &[("B", "A")]);
    let mut submitter = Submitter::new(backend, AckParser::default(), FanInPolicy::Reject);

    match submitter.submit(&graph, ids[0], None).await {
        Err(PipelineError::SchedulerInvocation {
            job,
            exit_code,
            output,
            ..
        }) => {
            assert_eq!(job, "A");
            assert_eq!(exit_code, Some(3));
            assert!(output.contains("invalid partition"));
        }
        other => panic!("Expected SchedulerInvocation, got: {:?}", other),
    }
}

#[tokio::test]
async fn missing_scheduler_binary_is_an_invocation_error() {
    init_tracing();

    let backend = SbatchBackend::new("slurmchain-no-such-sbatch", Vec::new());
    let (graph, ids) = graph_of(&["A"], &[]);
    let mut submitter = Submitter::new(backend, AckParser::default(), FanInPolicy::Reject);

    assert!(matches!(
        submitter.submit(&graph, ids[0], None).await,
        Err(PipelineError::SchedulerInvocation { exit_code: None, .. })
    ));
}

#[tokio::test]
async fn output_without_acknowledgment_is_a_parse_error() {
    init_tracing();

    let backend = SbatchBackend::new("echo", Vec::new());
    let (graph, ids) = graph_of(&["A"], &[]);
    let mut submitter = Submitter::new(backend, AckParser::default(), FanInPolicy::Reject);

    match submitter.submit(&graph, ids[0], None).await {
        Err(PipelineError::AcknowledgmentParse { output, .. }) => {
            assert_eq!(output.trim(), "./A.sh");
        }
        other => panic!("Expected AcknowledgmentParse, got: {:?}", other),
    }
}
