//! Collaborator traits.

use crate::id::VolumeHandle;

/// Named-volume lookup exposed by the geometry.
///
/// The scoring layer queries this once, at construction, and caches the
/// handle. Implementations must be immutable after geometry
/// construction: the same name always resolves to the same handle.
pub trait VolumeLookup {
    /// Resolve a placed volume by name.
    ///
    /// Returns `None` if no volume with that name exists.
    fn volume_handle(&self, name: &str) -> Option<VolumeHandle>;
}

impl<T: VolumeLookup + ?Sized> VolumeLookup for &T {
    fn volume_handle(&self, name: &str) -> Option<VolumeHandle> {
        (**self).volume_handle(name)
    }
}
