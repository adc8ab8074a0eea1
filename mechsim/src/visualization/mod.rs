pub mod figure;
pub mod playback;
