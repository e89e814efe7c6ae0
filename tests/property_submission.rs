// tests/property_submission.rs

use std::collections::HashMap;

use proptest::prelude::*;
use slurmchain::dag::JobGraph;
use slurmchain::submit::{AckParser, Submitter};
use slurmchain::types::FanInPolicy;
use slurmchain_test_utils::fake_scheduler::FakeScheduler;

// Random trees: job i > 0 hangs below a job with a smaller index, which
// keeps the graph acyclic and free of fan-in.
fn tree_strategy(max_jobs: usize) -> impl Strategy<Value = Vec<usize>> {
    (1..=max_jobs).prop_flat_map(|n| {
        proptest::collection::vec(any::<usize>(), n).prop_map(|raw| {
            raw.into_iter()
                .enumerate()
                .map(|(i, r)| if i == 0 { 0 } else { r % i })
                .collect()
        })
    })
}

// Random DAGs: job i may depend on any subset of the jobs before it.
fn dag_strategy(max_jobs: usize) -> impl Strategy<Value = Vec<Vec<usize>>> {
    (1..=max_jobs).prop_flat_map(|n| {
        proptest::collection::vec(proptest::collection::vec(any::<usize>(), 0..3), n).prop_map(
            |raw| {
                raw.into_iter()
                    .enumerate()
                    .map(|(i, picks)| {
                        let mut parents: Vec<usize> = if i == 0 {
                            Vec::new()
                        } else {
                            picks.into_iter().map(|p| p % i).collect()
                        };
                        parents.sort_unstable();
                        parents.dedup();
                        parents
                    })
                    .collect()
            },
        )
    })
}

fn block_on<F: std::future::Future>(f: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(f)
}

proptest! {
    #[test]
    fn tree_submits_each_job_once_after_its_parent(parents in tree_strategy(12)) {
        let mut graph = JobGraph::new();
        let ids: Vec<_> = (0..parents.len())
            .map(|i| graph.add_job(format!("job_{i}"), format!("./job_{i}.sh")).unwrap())
            .collect();
        for (i, &p) in parents.iter().enumerate().skip(1) {
            graph.declare_dependency(ids[i], ids[p]);
        }

        let fake = FakeScheduler::starting_at(1);
        let mut submitter = Submitter::new(fake.clone(), AckParser::default(), FanInPolicy::Reject);
        let report = block_on(submitter.submit(&graph, ids[0], None)).unwrap();

        prop_assert_eq!(report.len(), parents.len());
        prop_assert_eq!(fake.paths().len(), parents.len());

        let position: HashMap<&str, usize> = report
            .order()
            .into_iter()
            .enumerate()
            .map(|(k, name)| (name, k))
            .collect();

        for (i, &p) in parents.iter().enumerate().skip(1) {
            let child = format!("job_{i}");
            let parent = format!("job_{p}");
            prop_assert!(position[parent.as_str()] < position[child.as_str()]);

            let job = &report.jobs()[position[child.as_str()]];
            prop_assert_eq!(&job.after, &vec![report.job_id_of(&parent).unwrap().clone()]);
        }
    }

    #[test]
    fn merge_submits_each_job_once_after_all_parents(parents in dag_strategy(10)) {
        let mut graph = JobGraph::new();
        let ids: Vec<_> = (0..parents.len())
            .map(|i| graph.add_job(format!("job_{i}"), format!("./job_{i}.sh")).unwrap())
            .collect();
        for (i, ps) in parents.iter().enumerate() {
            for &p in ps {
                graph.declare_dependency(ids[i], ids[p]);
            }
        }

        let fake = FakeScheduler::starting_at(1);
        let mut submitter = Submitter::new(fake.clone(), AckParser::default(), FanInPolicy::Merge);
        let report = block_on(submitter.submit_roots(&graph, &graph.roots())).unwrap();

        prop_assert_eq!(report.len(), parents.len());

        for (i, ps) in parents.iter().enumerate() {
            let job = report.jobs().iter().find(|j| j.name == format!("job_{i}")).unwrap();
            let expected: Vec<_> = ps
                .iter()
                .map(|p| report.job_id_of(&format!("job_{p}")).unwrap().clone())
                .collect();
            prop_assert_eq!(&job.after, &expected);
        }
    }
}
