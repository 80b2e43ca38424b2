//! Bookkeeping for the instruments a recorder has placed in a registry.
//!
//! Registration is all-or-nothing: if any instrument of a recorder is rejected
//! the ones registered before it are removed again, so a failed constructor
//! never leaves half a recorder behind. Teardown attempts every instrument
//! and reports the ones the registry did not know about. It touches the
//! registry only once: a stale handle must not remove the instruments of a
//! newer recorder that registered the same identities.

use super::buckets::NAMESPACE;
use crate::error::{MetricsError, Result};
use prometheus::core::Collector;
use prometheus::Registry;
use std::sync::atomic::{AtomicBool, Ordering};

/// Something that can hand the registry a fresh boxed handle to itself.
trait Instrument: Send + Sync {
    // ---
    fn boxed(&self) -> Box<dyn Collector>;
}

impl<C> Instrument for C
where
    C: Collector + Clone + 'static,
{
    fn boxed(&self) -> Box<dyn Collector> {
        // ---
        Box::new(self.clone())
    }
}

/// Fully-qualified metric name, `app_<subsystem>_<name>`.
pub(crate) fn fq_name(subsystem: &str, name: &str) -> String {
    // ---
    format!("{NAMESPACE}_{subsystem}_{name}")
}

pub(crate) struct Registration {
    registry: Registry,
    instruments: Vec<(String, Box<dyn Instrument>)>,
    released: AtomicBool,
}

impl Registration {
    // ---
    pub fn new(registry: &Registry) -> Self {
        // ---
        Self {
            registry: registry.clone(),
            instruments: Vec::new(),
            released: AtomicBool::new(false),
        }
    }

    /// Registers `collector` under `name`, rolling back earlier registrations on failure.
    pub fn register<C>(&mut self, name: String, collector: &C) -> Result<()>
    where
        C: Collector + Clone + 'static,
    {
        // ---
        match self.registry.register(collector.boxed()) {
            Ok(()) => {
                self.instruments.push((name, Box::new(collector.clone())));
                Ok(())
            }
            Err(err) => {
                self.rollback();
                match err {
                    prometheus::Error::AlreadyReg => Err(MetricsError::AlreadyRegistered { metric: name }),
                    other => Err(other.into()),
                }
            }
        }
    }

    /// Removes every registered instrument, reporting the ones that failed.
    ///
    /// Only the first call reaches the registry. Later calls report every
    /// instrument as failed and leave the registry alone.
    pub fn unregister(&self) -> Result<()> {
        // ---
        if self.released.swap(true, Ordering::AcqRel) {
            tracing::warn!("Metrics already unregistered, ignoring repeated teardown");
            return Err(MetricsError::Unregister {
                metrics: self.instruments.iter().map(|(name, _)| name.clone()).collect(),
            });
        }

        let failed: Vec<String> = self
            .instruments
            .iter()
            .filter_map(|(name, instrument)| match self.registry.unregister(instrument.boxed()) {
                Ok(()) => None,
                Err(err) => {
                    tracing::warn!("Failed to unregister {}: {}", name, err);
                    Some(name.clone())
                }
            })
            .collect();

        if failed.is_empty() {
            tracing::debug!("Unregistered {} metric(s)", self.instruments.len());
            Ok(())
        } else {
            Err(MetricsError::Unregister { metrics: failed })
        }
    }

    fn rollback(&mut self) {
        // ---
        for (name, instrument) in self.instruments.drain(..) {
            if let Err(err) = self.registry.unregister(instrument.boxed()) {
                tracing::warn!("Failed to roll back registration of {}: {}", name, err);
            }
        }
    }
}
