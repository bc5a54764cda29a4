use tokio::sync::broadcast;

/// Why a run stopped admitting new requests.
///
/// Both causes are expected termination paths, not errors: the run still
/// produces a report from whatever records were collected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopCause {
    /// The user interrupted the run (Ctrl-C or an explicit cancel).
    Canceled,
    /// The global timeout elapsed.
    Deadline,
}

pub type ShutdownSender = broadcast::Sender<StopCause>;
pub type ShutdownReceiver = broadcast::Receiver<StopCause>;
