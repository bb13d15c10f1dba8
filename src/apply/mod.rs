mod apply_wait;
mod gate;
mod notifier;

pub use apply_wait::ApplyWait;
pub use gate::ApplyGate;
pub use gate::CommittedIndexGate;
pub use notifier::notifier;
pub use notifier::ApplyWaitError;
pub use notifier::Notifier;
pub use notifier::NotifierWaiter;
