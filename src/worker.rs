use std::ops::ControlFlow;
use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::thread::JoinHandle;

use tracing::{event, Level};

use crate::error::SynthError;
use crate::error::SynthError::JobDisconnected;
use crate::search::builder::SearchParams;
use crate::search::SearchOutcome;
use crate::transform::builder::TransformParams;
use crate::transform::{Progress, TransformMonitor, TransformReport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobEvent<P, R> {
    Progress(P),
    Finished(R),
}

/// A search running on its own thread. Dropping the handle stops a transform
/// job the next time it reports progress.
pub struct JobHandle<P, R> {
    /// Only transform jobs can be interrupted.
    kill: Option<Sender<()>>,
    events: Receiver<JobEvent<P, R>>,
    thread: Option<JoinHandle<()>>,
}

impl JobHandle<Progress, TransformReport> {
    /// Asks the transform to stop after the assignment it is testing. A job
    /// that has already finished ignores this.
    pub fn cancel(&self) {
        let Some(kill) = &self.kill else {
            return;
        };
        if kill.send(()).is_err() {
            event!(Level::TRACE, "Cancel sent to a job that already exited");
        }
    }
}

impl<P, R> JobHandle<P, R> {
    pub fn recv(&self) -> Result<JobEvent<P, R>, SynthError> {
        self.events.recv().map_err(|_| JobDisconnected)
    }

    /// `Ok(None)` when nothing is pending yet.
    pub fn try_recv(&self) -> Result<Option<JobEvent<P, R>>, SynthError> {
        match self.events.try_recv() {
            Ok(e) => Ok(Some(e)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(JobDisconnected),
        }
    }

    pub fn wait(self) -> Result<R, SynthError> {
        self.wait_with(|_| {})
    }

    /// Blocks until the job finishes, handing every progress update to
    /// `on_progress` on the calling thread.
    pub fn wait_with<F: FnMut(P)>(mut self, mut on_progress: F) -> Result<R, SynthError> {
        loop {
            match self.recv()? {
                JobEvent::Progress(p) => on_progress(p),
                JobEvent::Finished(r) => {
                    if let Some(t) = self.thread.take() {
                        if t.join().is_err() {
                            event!(Level::ERROR, "Job thread panicked after finishing");
                        }
                    }
                    return Ok(r);
                }
            }
        }
    }
}

pub fn spawn_search(params: &SearchParams) -> Result<JobHandle<(), SearchOutcome>, SynthError> {
    let search = params.build()?;
    let (event_sender, events) = std::sync::mpsc::channel();
    let thread = std::thread::spawn(move || {
        let outcome = search.run();
        if event_sender.send(JobEvent::Finished(outcome)).is_err() {
            event!(Level::TRACE, "Search result dropped, handle is gone");
        }
    });
    Ok(JobHandle {
        kill: None,
        events,
        thread: Some(thread),
    })
}

pub fn spawn_transform(
    params: &TransformParams,
) -> Result<JobHandle<Progress, TransformReport>, SynthError> {
    let search = params.build()?;
    let (event_sender, events) = std::sync::mpsc::channel();
    let (kill, kill_receiver) = std::sync::mpsc::channel();
    let thread = std::thread::spawn(move || {
        let mut monitor = KillSwitch {
            kill: kill_receiver,
            events: event_sender.clone(),
        };
        let report = search.run(&mut monitor);
        if event_sender.send(JobEvent::Finished(report)).is_err() {
            event!(Level::TRACE, "Transform report dropped, handle is gone");
        }
    });
    Ok(JobHandle {
        kill: Some(kill),
        events,
        thread: Some(thread),
    })
}

/// Forwards progress to the handle and breaks on a kill message or once the
/// handle has been dropped.
struct KillSwitch {
    kill: Receiver<()>,
    events: Sender<JobEvent<Progress, TransformReport>>,
}

impl TransformMonitor for KillSwitch {
    fn on_progress(&mut self, progress: Progress) -> ControlFlow<()> {
        match self.kill.try_recv() {
            Ok(_) | Err(TryRecvError::Disconnected) => return ControlFlow::Break(()),
            Err(TryRecvError::Empty) => {}
        }
        match self.events.send(JobEvent::Progress(progress)) {
            Ok(_) => ControlFlow::Continue(()),
            Err(_) => ControlFlow::Break(()),
        }
    }
}
