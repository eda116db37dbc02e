use super::trajectory::TrajectoryError;
use crate::core::models::frame::Frame;
use crate::core::models::topology::Topology;
use std::sync::Arc;

/// A pull-based, ordered sequence of trajectory frames.
///
/// End of data is signalled by the iterator returning `None`; a failure to
/// produce a frame is `Some(Err(..))`. The two are never conflated, so callers
/// can distinguish a short trajectory from a corrupt one.
pub trait FrameSource: Iterator<Item = Result<Frame, TrajectoryError>> {
    /// The topology shared by every frame of the source.
    fn topology(&self) -> &Arc<Topology>;

    /// The number of frames the source will yield, if known in advance.
    ///
    /// Lazy sources return `None`.
    fn total_frames(&self) -> Option<usize>;
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn topology(&self) -> &Arc<Topology> {
        (**self).topology()
    }

    fn total_frames(&self) -> Option<usize> {
        (**self).total_frames()
    }
}
