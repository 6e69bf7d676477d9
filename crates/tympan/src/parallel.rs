//! Data-parallel maps over frame indices.
//!
//! With the `parallel` feature the work is spread over the rayon thread pool;
//! otherwise it runs on the calling thread. Output order always follows the
//! frame index.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[cfg(feature = "parallel")]
pub(crate) fn map_frames<T, F>(num_frames: usize, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    (0..num_frames).into_par_iter().map(f).collect()
}

#[cfg(not(feature = "parallel"))]
pub(crate) fn map_frames<T, F>(num_frames: usize, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    (0..num_frames).map(f).collect()
}
