use glam::Mat4;

use crate::batch::{FLOATS_PER_INSTANCE, VERTICES_PER_INSTANCE};
use crate::error::RenderError;

/// The drawing context a [`BatchRenderer`](crate::BatchRenderer) talks to.
///
/// Implementations own a dynamic vertex buffer and a static index buffer of
/// sequential triples sized for the batch capacity. A frame calls
/// `set_projection_view`, then `upload_vertices` and `draw_indexed` exactly
/// once each.
pub trait RenderBackend {
    fn set_projection_view(&mut self, matrix: Mat4);

    /// Replace the vertex buffer contents, starting at offset zero.
    fn upload_vertices(&mut self, vertices: &[f32]) -> Result<(), RenderError>;

    /// Draw `index_count` indices as a triangle list.
    fn draw_indexed(&mut self, index_count: u32) -> Result<(), RenderError>;
}

/// One completed frame as seen by a [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedFrame {
    pub projection_view: Mat4,
    pub vertices: Vec<f32>,
    pub index_count: u32,
}

impl RecordedFrame {
    pub fn instance_count(&self) -> usize {
        self.vertices.len() / FLOATS_PER_INSTANCE
    }
}

/// Headless backend that keeps what it was given. Used by tests and the CLI.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    projection_view: Mat4,
    pending: Vec<f32>,
    frames: Vec<RecordedFrame>,
    keep_frames: Option<usize>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only the most recent `n` frames. Long headless runs use this to
    /// stay bounded.
    pub fn keeping_last(n: usize) -> Self {
        Self {
            keep_frames: Some(n),
            ..Self::default()
        }
    }

    pub fn frames(&self) -> &[RecordedFrame] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&RecordedFrame> {
        self.frames.last()
    }

    /// Human-readable dump of the last frame.
    pub fn describe(&self) -> String {
        let Some(frame) = self.last_frame() else {
            return "=== no frames recorded ===\n".to_string();
        };
        let mut out = format!(
            "=== Frame: {} instances, {} indices ===\n",
            frame.instance_count(),
            frame.index_count
        );
        for (i, inst) in frame.vertices.chunks_exact(FLOATS_PER_INSTANCE).enumerate() {
            out.push_str(&format!(
                "  [{i:>4}] ({:.1}, {:.1}) ({:.1}, {:.1}) ({:.1}, {:.1}) rgb=({:.2}, {:.2}, {:.2})\n",
                inst[0], inst[1], inst[5], inst[6], inst[10], inst[11], inst[2], inst[3], inst[4]
            ));
        }
        out
    }
}

impl RenderBackend for RecordingBackend {
    fn set_projection_view(&mut self, matrix: Mat4) {
        self.projection_view = matrix;
    }

    fn upload_vertices(&mut self, vertices: &[f32]) -> Result<(), RenderError> {
        self.pending.clear();
        self.pending.extend_from_slice(vertices);
        Ok(())
    }

    fn draw_indexed(&mut self, index_count: u32) -> Result<(), RenderError> {
        debug_assert_eq!(
            index_count as usize,
            self.pending.len() / FLOATS_PER_INSTANCE * VERTICES_PER_INSTANCE
        );
        self.frames.push(RecordedFrame {
            projection_view: self.projection_view,
            vertices: std::mem::take(&mut self.pending),
            index_count,
        });
        if let Some(keep) = self.keep_frames {
            let excess = self.frames.len().saturating_sub(keep);
            self.frames.drain(..excess);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_one_frame_per_draw() {
        let mut backend = RecordingBackend::new();
        backend.set_projection_view(Mat4::IDENTITY);
        backend.upload_vertices(&[0.0; FLOATS_PER_INSTANCE]).unwrap();
        backend.draw_indexed(3).unwrap();
        assert_eq!(backend.frames().len(), 1);
        assert_eq!(backend.last_frame().unwrap().instance_count(), 1);
        assert!(backend.describe().contains("1 instances"));
    }

    #[test]
    fn keeping_last_bounds_history() {
        let mut backend = RecordingBackend::keeping_last(2);
        for _ in 0..5 {
            backend.upload_vertices(&[]).unwrap();
            backend.draw_indexed(0).unwrap();
        }
        assert_eq!(backend.frames().len(), 2);
    }

    #[test]
    fn describe_empty() {
        assert!(RecordingBackend::new().describe().contains("no frames"));
    }
}
