//! The convergence sweep: the same segment traced once per term count, from a single term up to
//! `max_terms`, pairing each count with the residual it leaves.
//!
//! `sweep()` is the plain synchronous version. `spawn()` runs it on a worker thread and hands the
//! samples over a channel, so the caller can write them out while the worker keeps tracing.
use futures::channel::mpsc::{self, UnboundedReceiver};
use futures::StreamExt;
use log::{debug, warn};

use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::canvas::Surface;
use crate::error::TraceError;
use crate::error_log::SweepSample;
use crate::shapes::{Color, Segment};
use crate::tracer::SteppedTracer;

#[derive(Copy, Clone, Debug)]
pub struct SweepConfig {
    /// Must already be ordered
    pub segment: Segment,
    pub max_terms: u32,
    pub step: i64,
    /// Pause between iterations, only honored by `spawn()`
    pub delay: Duration,
    pub color: Color,
}

/// Lazily traces `config.segment` with 1, 2, ... `config.max_terms` terms. Every trace is drawn
/// on the same surface.
pub fn sweep<'a, S: Surface + ?Sized>(
    config: &'a SweepConfig,
    surface: &'a mut S,
) -> impl Iterator<Item = Result<SweepSample, TraceError>> + 'a {
    (1..=config.max_terms).map(move |terms| -> Result<SweepSample, TraceError> {
        let tracer = SteppedTracer::new(terms, config.step, config.color)?;
        let result = tracer.trace(&mut *surface, config.segment)?;
        Ok(SweepSample {
            terms,
            residual: result.residual(),
        })
    })
}

pub struct SweepHandle<S> {
    samples: UnboundedReceiver<SweepSample>,
    worker: JoinHandle<Result<S, TraceError>>,
}

/// Starts the sweep on its own thread, drawing on `surface`. The surface is given back by
/// `SweepHandle::join`.
pub fn spawn<S: Surface + Send + 'static>(config: SweepConfig, mut surface: S) -> SweepHandle<S> {
    let (tx, samples) = mpsc::unbounded();
    let worker = thread::spawn(move || -> Result<S, TraceError> {
        for sample in sweep(&config, &mut surface) {
            let sample = sample?;
            debug!("Sweep sample ready: {}", sample);
            if tx.unbounded_send(sample).is_err() {
                warn!(
                    "Nobody is listening to the sweep anymore, stopping after {} terms",
                    sample.terms
                );
                break;
            }
            if !config.delay.is_zero() {
                thread::sleep(config.delay);
            }
        }
        Ok(surface)
    });

    SweepHandle { samples, worker }
}

impl<S> SweepHandle<S> {
    /// Waits for the next sample. `None` once the worker is done, whether it finished or failed.
    pub async fn next(&mut self) -> Option<SweepSample> {
        self.samples.next().await
    }

    pub fn join(self) -> anyhow::Result<S> {
        // dropping the receiver first lets a still running worker notice and stop
        drop(self.samples);
        let surface = self
            .worker
            .join()
            .map_err(|_| anyhow::anyhow!("The sweep worker panicked"))??;
        Ok(surface)
    }
}
