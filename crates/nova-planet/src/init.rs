//! One-shot surface initialization guard.

use nova_terrain::TerrainField;
use tracing::debug;

use crate::mesh::SurfaceBuffers;
use crate::surface::{BuildOutcome, SurfaceStyle, build_surface};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum InitState {
    Pending,
    Done,
}

/// Runs [`build_surface`] once per style.
///
/// Call [`SurfaceInit::ensure`] on every lifecycle signal (mount, resize,
/// buffer allocation). The build runs the first time the host is ready and is
/// skipped afterwards until the style changes or [`SurfaceInit::invalidate`]
/// is called.
#[derive(Clone, Debug)]
pub struct SurfaceInit {
    style: SurfaceStyle,
    state: InitState,
    last: Option<BuildOutcome>,
}

impl SurfaceInit {
    pub fn new(style: SurfaceStyle) -> Self {
        Self {
            style,
            state: InitState::Pending,
            last: None,
        }
    }

    pub fn style(&self) -> &SurfaceStyle {
        &self.style
    }

    /// True once a build has been applied or skipped for the current style.
    pub fn is_built(&self) -> bool {
        self.state == InitState::Done
    }

    /// Outcome of the most recent build attempt.
    pub fn last_outcome(&self) -> Option<BuildOutcome> {
        self.last
    }

    /// Replace the style. A different style re-arms the build.
    pub fn set_style(&mut self, style: SurfaceStyle) {
        if style != self.style {
            self.style = style;
            self.state = InitState::Pending;
        }
    }

    /// Force the next [`SurfaceInit::ensure`] to rebuild, e.g. after the
    /// terrain field changed.
    pub fn invalidate(&mut self) {
        self.state = InitState::Pending;
    }

    /// Build the surface if it has not been built for the current style.
    ///
    /// Returns `None` when there was nothing to do. A deferred build stays
    /// pending and is attempted again on the next call.
    pub fn ensure<M, F>(&mut self, mesh: &mut M, field: &F) -> Option<BuildOutcome>
    where
        M: SurfaceBuffers + ?Sized,
        F: TerrainField + ?Sized,
    {
        if self.state == InitState::Done {
            return None;
        }

        let outcome = build_surface(mesh, field, &self.style);
        match outcome {
            BuildOutcome::Deferred => {
                debug!("surface init pending until host buffers exist");
            }
            BuildOutcome::Applied(_) | BuildOutcome::Skipped(_) => {
                self.state = InitState::Done;
            }
        }
        self.last = Some(outcome);
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{DirtyFlags, MeshBuffersMut, SurfaceMesh};
    use glam::Vec3;
    use std::cell::Cell;

    /// Host that becomes ready after the first lifecycle signal.
    struct LateHost {
        mesh: Option<SurfaceMesh>,
    }

    impl SurfaceBuffers for LateHost {
        fn buffers_mut(&mut self) -> Option<MeshBuffersMut<'_>> {
            self.mesh.as_mut().and_then(|m| m.buffers_mut())
        }
        fn mark_dirty(&mut self, flags: DirtyFlags) {
            if let Some(m) = self.mesh.as_mut() {
                m.mark_dirty(flags);
            }
        }
    }

    #[test]
    fn test_builds_only_once() {
        let calls = Cell::new(0usize);
        let field = |_: Vec3| {
            calls.set(calls.get() + 1);
            0.0
        };
        let mut mesh = SurfaceMesh::uv_sphere(4.0, 8, 4);
        let mut init = SurfaceInit::new(SurfaceStyle::default());

        assert!(matches!(init.ensure(&mut mesh, &field), Some(BuildOutcome::Applied(_))));
        let after_first = calls.get();
        assert_eq!(after_first, mesh.vertex_count());

        for _ in 0..5 {
            assert_eq!(init.ensure(&mut mesh, &field), None);
        }
        assert_eq!(calls.get(), after_first);
        assert!(init.is_built());
    }

    #[test]
    fn test_deferred_until_host_ready() {
        let mut host = LateHost { mesh: None };
        let field = |_: Vec3| 1.0_f32;
        let mut init = SurfaceInit::new(SurfaceStyle::default());

        assert_eq!(init.ensure(&mut host, &field), Some(BuildOutcome::Deferred));
        assert!(!init.is_built());

        host.mesh = Some(SurfaceMesh::uv_sphere(4.0, 8, 4));
        assert!(matches!(init.ensure(&mut host, &field), Some(BuildOutcome::Applied(_))));
        assert!(init.is_built());
        assert!(matches!(init.last_outcome(), Some(BuildOutcome::Applied(_))));
    }

    #[test]
    fn test_style_change_rearms() {
        let mut mesh = SurfaceMesh::uv_sphere(4.0, 8, 4);
        let field = |_: Vec3| 1.0_f32;
        let mut init = SurfaceInit::new(SurfaceStyle::default());
        init.ensure(&mut mesh, &field);

        init.set_style(SurfaceStyle::default());
        assert_eq!(init.ensure(&mut mesh, &field), None);

        init.set_style(SurfaceStyle {
            threshold: 0.28,
            ..Default::default()
        });
        assert!(init.ensure(&mut mesh, &field).is_some());
        assert_eq!(init.style().threshold, 0.28);
    }

    #[test]
    fn test_invalidate_rearms() {
        let mut mesh = SurfaceMesh::uv_sphere(4.0, 8, 4);
        let field = |_: Vec3| 1.0_f32;
        let mut init = SurfaceInit::new(SurfaceStyle::default());
        init.ensure(&mut mesh, &field);
        init.invalidate();
        assert!(init.ensure(&mut mesh, &field).is_some());
    }
}
