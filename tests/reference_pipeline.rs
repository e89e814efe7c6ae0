// tests/reference_pipeline.rs

use slurmchain::pipeline::reference_pipeline;
use slurmchain::submit::{AckParser, DryRunBackend};
use slurmchain::submit_pipeline;
use slurmchain::types::{FanInPolicy, JobId};
use slurmchain_test_utils::fake_scheduler::FakeScheduler;
use slurmchain_test_utils::init_tracing;

const CHAIN: [&str; 7] = [
    "get_samplelist",
    "fastqc",
    "multiqc",
    "make_idx",
    "map_reads",
    "mapping_qc",
    "feature_count",
];

#[test]
fn reference_pipeline_is_a_single_chain() {
    let pipeline = reference_pipeline().unwrap();

    assert_eq!(pipeline.graph.len(), 7);
    assert_eq!(pipeline.root_names(), vec!["get_samplelist"]);
    assert_eq!(pipeline.graph.roots(), pipeline.roots);

    for pair in CHAIN.windows(2) {
        let parent = pipeline.graph.find(pair[0]).unwrap();
        let child = pipeline.graph.find(pair[1]).unwrap();
        assert_eq!(pipeline.graph.node(parent).successors(), &[child]);
    }

    pipeline
        .graph
        .validate(&pipeline.roots, FanInPolicy::Reject)
        .unwrap();
}

#[tokio::test]
async fn reference_pipeline_submits_every_stage_in_order() {
    init_tracing();

    let pipeline = reference_pipeline().unwrap();
    let fake = FakeScheduler::starting_at(9000);

    let report = submit_pipeline(&pipeline, fake.clone(), AckParser::default(), FanInPolicy::Reject)
        .await
        .unwrap();

    assert_eq!(report.order(), CHAIN.to_vec());
    assert_eq!(fake.paths()[0], "./scripts/get_samplelist.sh");
    assert_eq!(fake.paths()[6], "./feature_counts/featureCount.sbatch");

    for (k, job) in report.jobs().iter().enumerate() {
        assert_eq!(job.job_id, JobId::new((9000 + k).to_string()));
        if k == 0 {
            assert!(job.after.is_empty());
        } else {
            assert_eq!(job.after, vec![JobId::new((9000 + k - 1).to_string())]);
        }
    }
}

#[tokio::test]
async fn dry_run_invents_sequential_ids() {
    init_tracing();

    let pipeline = reference_pipeline().unwrap();
    let backend = DryRunBackend::new("sbatch", Vec::new());

    let report = submit_pipeline(&pipeline, backend, AckParser::default(), FanInPolicy::Reject)
        .await
        .unwrap();

    assert_eq!(report.len(), 7);
    assert_eq!(report.job_id_of("get_samplelist"), Some(&JobId::new("1")));
    assert_eq!(report.job_id_of("feature_count"), Some(&JobId::new("7")));
}

#[tokio::test]
async fn starting_mid_chain_skips_earlier_stages() {
    init_tracing();

    let mut pipeline = reference_pipeline().unwrap();
    pipeline.set_roots_by_name(&["map_reads"]).unwrap();
    let fake = FakeScheduler::starting_at(1);

    let report = submit_pipeline(&pipeline, fake.clone(), AckParser::default(), FanInPolicy::Reject)
        .await
        .unwrap();

    assert_eq!(report.order(), vec!["map_reads", "mapping_qc", "feature_count"]);
}
