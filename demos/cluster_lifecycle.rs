//! Cluster Lifecycle
//!
//! This example drives a database cluster through its lifecycle with a
//! shared definition, then simulates a controller restart.
//!
//! Key concepts:
//! - Guarded transitions over a caller-owned context
//! - Entry and exit actions
//! - Checkpoints plus context-driven recovery of the actual state
//!
//! Run with: RUST_LOG=debug cargo run --example cluster_lifecycle

use hsm::core::Guard;
use hsm::machine::StateMachineDefinition;
use hsm::{state_enum, Instance, Signal};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
pub struct ClusterCtx {
    ready_replicas: u32,
    desired_replicas: u32,
    deleting: bool,
    notifications: Vec<String>,
}

state_enum! {
    enum ClusterPhase {
        Creating,
        Running,
        Updating,
        Deleted,
    }
    context: ClusterCtx;
    final: [Deleted]
}

#[derive(Debug, PartialEq)]
enum ClusterEvent {
    Reconcile,
    ScaleRequested,
    Delete,
}

fn definition() -> Result<StateMachineDefinition<ClusterPhase, ClusterEvent>, hsm::BuildError> {
    let all_ready = || Guard::new(|c: &ClusterCtx| c.ready_replicas >= c.desired_replicas);

    let mut machine = StateMachineDefinition::new("cluster", ClusterPhase::Creating);
    machine
        .state(ClusterPhase::Creating)
        .transition(ClusterEvent::Reconcile, ClusterPhase::Running, [all_ready()])
        .transition(ClusterEvent::Delete, ClusterPhase::Deleted, [])
        .build()?;
    machine
        .state(ClusterPhase::Running)
        .on_enter(|c: &mut ClusterCtx| {
            c.notifications.push("cluster is running".to_string());
            Ok(())
        })
        .transition(ClusterEvent::ScaleRequested, ClusterPhase::Updating, [])
        .transition(ClusterEvent::Delete, ClusterPhase::Deleted, [])
        .internal_transition(
            ClusterEvent::Reconcile,
            |c: &mut ClusterCtx| Ok(Some(Signal::new(format!("{} replicas healthy", c.ready_replicas)))),
            [],
        )
        .build()?;
    machine
        .state(ClusterPhase::Updating)
        .on_exit(|c: &mut ClusterCtx| {
            c.notifications.push("update finished".to_string());
            Ok(())
        })
        .transition(ClusterEvent::Reconcile, ClusterPhase::Running, [all_ready()])
        .build()?;
    machine.on_recover(|c: &ClusterCtx| {
        if c.deleting {
            Ok(ClusterPhase::Deleted)
        } else if c.ready_replicas >= c.desired_replicas {
            Ok(ClusterPhase::Running)
        } else {
            Ok(ClusterPhase::Updating)
        }
    });
    Ok(machine)
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Cluster Lifecycle ===\n");

    let machine = Arc::new(definition()?);
    let mut cluster = Instance::new(
        Arc::clone(&machine),
        ClusterCtx {
            desired_replicas: 3,
            ..ClusterCtx::default()
        },
    );

    for ready in 1..=3 {
        cluster.context_mut().ready_replicas = ready;
        let fired = cluster.fire(&ClusterEvent::Reconcile)?;
        println!("ready={ready}: {:?} -> {:?}", fired, cluster.current_state());
    }

    cluster.fire(&ClusterEvent::ScaleRequested)?;
    cluster.context_mut().desired_replicas = 5;
    println!("scale requested: {:?}", cluster.current_state());

    let checkpoint = cluster.checkpoint();
    let saved = checkpoint.to_json()?;
    println!("\nCheckpoint saved with label {:?}", checkpoint.current_state);

    // The controller restarts; meanwhile the cluster finished scaling.
    let mut ctx = cluster.into_context();
    ctx.ready_replicas = 5;

    let restored = Instance::restore(machine, hsm::Checkpoint::from_json(&saved)?, ctx)?;
    println!("Recovered state after restart: {:?}", restored.current_state());
    println!("History: {:?}", restored.history().get_path());
    println!("Notifications: {:?}", restored.context().notifications);

    println!("\n=== Example Complete ===");
    Ok(())
}
