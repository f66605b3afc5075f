use core_types::DeleteWarning;

/// Receives warnings about trees that could not be deleted.
///
/// Reporting is fire-and-forget, a sink must never fail the delete.
pub trait MessageSink: Send + Sync {
    fn warn(&self, warning: DeleteWarning);
}

/// Sink that writes warnings to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl MessageSink for TracingSink {
    fn warn(&self, warning: DeleteWarning) {
        tracing::warn!(
            path = %warning.path().display(),
            reason = %warning.reason(),
            "{}",
            warning
        );
    }
}

/// Forwards warnings to a channel, e.g. to a UI thread.
impl MessageSink for flume::Sender<DeleteWarning> {
    fn warn(&self, warning: DeleteWarning) {
        // a dropped receiver just means nobody listens anymore
        self.send(warning).ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_channel_sink_forwards_warnings() {
        let (tx, rx) = flume::unbounded();
        let warning = DeleteWarning::DirectoryInUse {
            path: PathBuf::from("/tmp/busy"),
        };

        tx.warn(warning.clone());

        assert_eq!(rx.try_recv().unwrap(), warning);
    }

    #[test]
    fn test_channel_sink_without_receiver() {
        let (tx, rx) = flume::unbounded::<DeleteWarning>();
        drop(rx);
        tx.warn(DeleteWarning::AccessDeniedForDeletion {
            path: PathBuf::from("/tmp/locked"),
        });
    }
}
