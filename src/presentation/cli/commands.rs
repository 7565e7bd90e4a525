//! CLI command implementations
//!
//! Each command seeds a small in-memory cluster (no persisted store, per
//! the scope this crate covers), runs one scheduling operation against it,
//! and prints a summary — the harness analog of jobweaver's `AnalyzeCommand`.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use crate::application::use_cases::{
    BuildFeatureList, JobStartData, Schedule, TestJobDependency, UpdateJobDependency,
};
use crate::domain::entities::{Job, Partition, ResourceRequest};
use crate::domain::ports::{
    BitmapIntersectionSelector, PermissiveAssociations, PermissiveReservations, UnlimitedLicenses,
    NoPreemption, UnsignedStubSigner,
};
use crate::domain::value_objects::{JobId, NodeBitmap, Priority};
use crate::infrastructure::agent_queue::MpscAgentQueue;
use crate::infrastructure::config::SchedulerConfig;
use crate::infrastructure::context::{PluginPorts, SchedulerContext};
use crate::domain::repositories::JobDirectory;
use crate::domain::repositories::PartitionDirectory;

const DEMO_NODE_COUNT: usize = 16;

/// Builds the demo cluster every CLI command operates against: one
/// partition spanning all nodes, three pending jobs of varying priority.
async fn seed_context() -> SchedulerContext {
    let (agent_queue, mut receiver) = MpscAgentQueue::channel();
    tokio::spawn(async move { while receiver.recv().await.is_some() {} });

    let ports = PluginPorts {
        node_selector: Arc::new(BitmapIntersectionSelector),
        reservation_engine: Arc::new(PermissiveReservations),
        license_engine: Arc::new(UnlimitedLicenses),
        preemption_engine: Arc::new(NoPreemption),
        association_validator: Arc::new(PermissiveAssociations),
        credential_signer: Arc::new(UnsignedStubSigner),
        outbound_agent: Arc::new(agent_queue),
    };

    let ctx = SchedulerContext::new(DEMO_NODE_COUNT, SchedulerConfig::load(), ports);

    {
        let mut partitions = ctx.partitions.write().await;
        partitions
            .insert(Partition::new("batch", NodeBitmap::full(DEMO_NODE_COUNT), 64))
            .expect("seed partition insert never fails");
    }
    {
        let mut jobs = ctx.jobs.write().await;
        for (id, priority, min_nodes) in [(1u32, 500u32, 2u32), (2, 300, 4), (3, 100, 1)] {
            let mut job = Job::new(JobId::new(id), format!("demo-job-{id}"), 1000, 1000);
            job.priority = Priority::new(priority);
            job.partitions = vec!["batch".to_string()];
            job.resources = ResourceRequest::new(min_nodes, min_nodes * 2);
            jobs.insert(job).expect("seed job insert never fails");
        }
    }

    ctx
}

pub struct ScheduleCommand;

impl ScheduleCommand {
    pub async fn execute(job_limit: usize) -> Result<()> {
        let ctx = seed_context().await;
        let outcomes = Schedule::new(job_limit).execute(&ctx).await;

        println!("\n{}", "=".repeat(60));
        println!("SCHEDULE PASS");
        println!("{}", "=".repeat(60));
        for outcome in &outcomes {
            println!("  {outcome:?}");
        }
        info!(considered = outcomes.len(), "schedule pass finished");
        Ok(())
    }
}

pub struct QueueCommand;

impl QueueCommand {
    pub async fn execute(clear_start: bool) -> Result<()> {
        let ctx = seed_context().await;
        let mut jobs = ctx.jobs.write().await;
        let partitions = ctx.partitions.read().await;
        let partition_refs = partitions.all();
        let result =
            crate::application::use_cases::BuildJobQueue::new().execute(clear_start, &mut *jobs, &partition_refs);

        println!("\n{}", "=".repeat(60));
        println!("PENDING QUEUE ({} entries)", result.entries.len());
        println!("{}", "=".repeat(60));
        for entry in &result.entries {
            println!("  job {} -> partition {} (priority {})", entry.job_id, entry.partition_name, entry.priority);
        }
        Ok(())
    }
}

pub struct DependencyUpdateCommand;

impl DependencyUpdateCommand {
    pub async fn execute(job_id: u32, spec: &str) -> Result<()> {
        let ctx = seed_context().await;
        let mut jobs = ctx.jobs.write().await;
        UpdateJobDependency::new()
            .execute(JobId::new(job_id), spec, &mut *jobs)
            .context("failed to update job dependency list")?;
        println!("job {job_id} dependency list updated to: {spec}");
        Ok(())
    }
}

pub struct DependencyTestCommand;

impl DependencyTestCommand {
    pub async fn execute(job_id: u32) -> Result<()> {
        let ctx = seed_context().await;
        let mut jobs = ctx.jobs.write().await;
        let status = TestJobDependency::new()
            .execute(JobId::new(job_id), &mut *jobs)
            .context("failed to evaluate job dependency")?;
        println!("job {job_id} dependency status: {status:?}");
        Ok(())
    }
}

pub struct DependencyShowCommand;

impl DependencyShowCommand {
    pub async fn execute(job_id: u32) -> Result<()> {
        let ctx = seed_context().await;
        let jobs = ctx.jobs.read().await;
        let job = jobs
            .get(JobId::new(job_id))
            .ok_or_else(|| anyhow::anyhow!("job {job_id} does not exist"))?;
        println!("job {job_id} dependencies: {}", job.dependencies);
        Ok(())
    }
}

pub struct FeatureCommand;

impl FeatureCommand {
    pub async fn execute(constraint: &str) -> Result<()> {
        let terms = BuildFeatureList::new()
            .execute(constraint)
            .context("failed to parse feature constraint")?;
        println!("parsed {} term(s):", terms.len());
        for term in &terms {
            println!("  {} (count={:?}, op={:?})", term.name, term.count, term.op);
        }
        Ok(())
    }
}

pub struct WillRunCommand;

impl WillRunCommand {
    pub async fn execute(job_id: u32) -> Result<()> {
        let ctx = seed_context().await;
        let prediction = JobStartData::new()
            .execute(&ctx, JobId::new(job_id))
            .await
            .context("failed to predict job start time")?;
        println!(
            "job {job_id} earliest start: {} ({} candidate node(s))",
            prediction.earliest_start,
            prediction.candidate_nodes.count()
        );
        Ok(())
    }
}
