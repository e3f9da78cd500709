//! Run adjustments off the calling thread
//!
//! Each worker owns its buffer, so a saturation pass and a brightness pass
//! over two copies of an image can run side by side.

use crate::{
    AdjustError, AdjustResult,
    buffer::{BufferAdjuster, PixelLayout},
    channel::HsvChannel,
    colour_model::Precision,
};
use crossbeam::channel::{Receiver, bounded};
use derivative::Derivative;
use derive_setters::Setters;
use std::thread::{self, JoinHandle};

/// One buffer adjustment handed to a worker thread
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct AdjustJob {
    #[derivative(Default(value = "HsvChannel::Saturation"))]
    pub channel: HsvChannel,
    #[derivative(Default(value = "Vec::new()"))]
    pub buffer: Vec<u8>,
    #[derivative(Default(value = "1.0"))]
    pub last: f64,
    #[derivative(Default(value = "1.0"))]
    pub cur: f64,
    #[derivative(Default(value = "PixelLayout::RGBA"))]
    pub layout: PixelLayout,
    #[derivative(Default(value = "Precision::Full"))]
    pub precision: Precision,
}

impl AdjustJob {
    pub fn new(channel: HsvChannel, buffer: Vec<u8>, last: f64, cur: f64) -> Self {
        Self::default()
            .with_channel(channel)
            .with_buffer(buffer)
            .with_last(last)
            .with_cur(cur)
    }

    /// Run the job on the current thread.
    pub fn run(mut self) -> Vec<u8> {
        BufferAdjuster::new()
            .with_layout(self.layout)
            .with_precision(self.precision)
            .process(Some(&mut self.buffer[..]), self.last, self.cur, self.channel);
        self.buffer
    }
}

/// Background adjustment worker
pub struct AdjustWorker {
    name: String,
    receiver: Receiver<Vec<u8>>,
    join_handle: Option<JoinHandle<()>>,
}

impl AdjustWorker {
    /// Spawn a thread that adjusts the job's buffer and posts it back
    pub fn start(job: AdjustJob) -> AdjustResult<Self> {
        let name = format!("{}-adjust", job.channel.name().to_lowercase());
        let (sender, receiver) = bounded(1);

        let join_handle = thread::Builder::new().name(name.clone()).spawn(move || {
            let buffer = job.run();
            if sender.send(buffer).is_err() {
                log::warn!("adjust worker result dropped: receiver gone");
            }
        })?;

        log::debug!("started {name} worker");

        Ok(Self {
            name,
            receiver,
            join_handle: Some(join_handle),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Block until the adjusted buffer arrives
    pub fn recv(&self) -> AdjustResult<Vec<u8>> {
        self.receiver
            .recv()
            .map_err(|e| AdjustError::Worker(format!("{}: {e}", self.name)))
    }

    /// Join the worker thread
    pub fn stop(mut self) -> AdjustResult<()> {
        if let Some(handle) = self.join_handle.take() {
            handle.join().map_err(|e| {
                log::error!("{} worker panicked: {:?}", self.name, e);
                AdjustError::Worker(format!("{} thread panicked: {:?}", self.name, e))
            })?;
        }

        log::debug!("stopped {} worker", self.name);
        Ok(())
    }

    fn finish(self) -> AdjustResult<Vec<u8>> {
        let buffer = self.recv();
        self.stop()?;
        buffer
    }
}

/// Run every job on its own thread and collect the buffers in job order
pub fn adjust_in_parallel(jobs: Vec<AdjustJob>) -> AdjustResult<Vec<Vec<u8>>> {
    let mut workers = Vec::with_capacity(jobs.len());

    for job in jobs {
        match AdjustWorker::start(job) {
            Ok(worker) => workers.push(worker),
            Err(e) => {
                log::warn!("failed to start adjust worker, joining {} started: {e}", workers.len());
                stop_all(workers);
                return Err(e);
            }
        }
    }

    workers.into_iter().map(AdjustWorker::finish).collect()
}

fn stop_all(workers: Vec<AdjustWorker>) {
    for worker in workers {
        let name = worker.name().to_string();
        if let Err(e) = worker.stop() {
            log::warn!("{name}: {e}");
        }
    }
}
