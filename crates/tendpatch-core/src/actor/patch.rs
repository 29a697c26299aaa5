//! `PatchActor`: serialises patch tasks on one host
//!
//! The mailbox processes one `RunPatchTask` at a time, so two tasks never
//! drive the package managers concurrently.

use kameo::actor::{ActorRef, WeakActorRef};
use kameo::error::ActorStopReason;
use kameo::message::{Context, Message};
use kameo::prelude::*;
use tracing::{info, warn};

use crate::error::{CoreError, PatchError};
use crate::message::RunPatchTask;
use crate::patch::PatchRunner;

/// Arguments for spawning a `PatchActor`
pub struct PatchActorArgs {
    /// Runner that applies each task
    pub runner: PatchRunner,
}

/// Actor owning the host's `PatchRunner`
pub struct PatchActor {
    runner: PatchRunner,
    /// Tasks handled so far
    completed: u64,
}

impl Actor for PatchActor {
    type Args = PatchActorArgs;
    type Error = CoreError;

    async fn on_start(args: Self::Args, actor_ref: ActorRef<Self>) -> Result<Self, Self::Error> {
        info!(id = %actor_ref.id(), "PatchActor starting");

        Ok(Self {
            runner: args.runner,
            completed: 0,
        })
    }

    async fn on_stop(
        &mut self,
        _actor_ref: WeakActorRef<Self>,
        reason: ActorStopReason,
    ) -> Result<(), Self::Error> {
        info!(completed = self.completed, reason = ?reason, "PatchActor stopping");
        Ok(())
    }
}

impl Message<RunPatchTask> for PatchActor {
    type Reply = Result<(), PatchError>;

    async fn handle(
        &mut self,
        msg: RunPatchTask,
        _ctx: &mut Context<Self, Self::Reply>,
    ) -> Self::Reply {
        let task_number = self.completed + 1;
        info!(task = task_number, dry_run = msg.task.dry_run, "patch task started");

        let result = self.runner.run_updates(&msg.ctx, &msg.task).await;
        self.completed = task_number;

        match &result {
            Ok(()) => info!(task = task_number, "patch task succeeded"),
            Err(err) => warn!(task = task_number, error = %err, "patch task failed"),
        }
        result
    }
}
